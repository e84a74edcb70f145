//! Regression solvers.

mod ols;
mod traits;

pub use ols::{FittedOls, OlsRegressor, OlsRegressorBuilder};
pub use traits::{ErrorKind, FittedRegressor, RegressionError, Regressor};
