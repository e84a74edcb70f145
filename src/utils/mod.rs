//! Numerical helpers shared by the solver and inference code.

mod matrix;

pub use matrix::{
    column_norms, invert_upper, is_constant, max_abs, quadratic_form, scaled_factor,
    scaled_sum_of_squares, solve_upper, solve_upper_transpose, times, transpose_times,
    ScaledFactor, ScaledInverse,
};
