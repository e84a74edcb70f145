//! Ordinary least squares regression over loosely-typed tabular rows.
//!
//! Rows arrive as maps from column name to a number, a string or null. The
//! engine coerces the selected columns, drops incomplete rows listwise,
//! assembles a design of an intercept, the independent variables and the
//! controls, solves the normal equations and derives the full inference
//! suite: standard errors, t-statistics, p-values, confidence intervals, R²,
//! adjusted R² and the overall F-test.
//!
//! Fitting is a pure computation: no state survives between calls, so the
//! engine can be used from any number of threads at once.
//!
//! # Example
//!
//! ```rust,ignore
//! use tabular_ols::prelude::*;
//!
//! let selection = VariableSelection::new()
//!     .dependent("salary")
//!     .independent("experience")
//!     .control("age");
//!
//! let result = perform_regression(&rows, &selection)?;
//! println!("R² = {}", result.r_squared);
//! for c in &result.coefficients {
//!     println!("{:>12} {:>10.4} (t = {:.2})", c.name, c.value, c.t_statistic);
//! }
//! ```

pub mod core;
pub(crate) mod design;
pub mod inference;
pub mod solvers;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::{
        CellValue, ConstantResponse, Dataset, IntervalType, ListwiseInfo, PredictionInterval,
        RegressionCoefficient, RegressionOptions, RegressionOptionsBuilder, RegressionResult, Row,
        VariableSelection,
    };
    pub use crate::solvers::{
        ErrorKind, FittedOls, FittedRegressor, OlsRegressor, RegressionError, Regressor,
    };
    pub use crate::{perform_regression, perform_regression_with_options};
}

pub use crate::core::{
    CellValue, ConstantResponse, Dataset, IntervalType, ListwiseInfo, PredictionInterval,
    RegressionCoefficient, RegressionOptions, RegressionResult, Row, VariableSelection,
};
pub use crate::solvers::{
    ErrorKind, FittedOls, FittedRegressor, OlsRegressor, RegressionError, Regressor,
};

/// Fit an OLS model with default options and return its result.
///
/// # Errors
/// Any [`RegressionError`]; no partial result is ever returned.
pub fn perform_regression(
    rows: &[Row],
    selection: &VariableSelection,
) -> Result<RegressionResult, RegressionError> {
    perform_regression_with_options(rows, selection, RegressionOptions::default())
}

/// Fit an OLS model with explicit options and return its result.
pub fn perform_regression_with_options(
    rows: &[Row],
    selection: &VariableSelection,
    options: RegressionOptions,
) -> Result<RegressionResult, RegressionError> {
    OlsRegressor::new(options)
        .fit(rows, selection)
        .map(FittedOls::into_result)
}
