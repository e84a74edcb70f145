//! Core traits and the error taxonomy for regression estimators.

use crate::core::{
    coerce_cell, IntervalType, OptionsError, PredictionInterval, RegressionResult, Row,
    VariableSelection,
};
use thiserror::Error;

/// Errors that can occur during regression fitting.
#[derive(Debug, Error)]
pub enum RegressionError {
    #[error("no dependent variable selected")]
    MissingDependent,

    #[error("at least one independent variable must be selected")]
    NoIndependentVariables,

    #[error("column '{0}' does not exist in the dataset")]
    UnknownColumn(String),

    #[error("no usable observations: all {n_rows} rows have a missing or non-numeric value in a selected column")]
    NoValidObservations { n_rows: usize },

    #[error("insufficient observations: need at least {needed} complete rows for this model, got {got}")]
    InsufficientObservations { needed: usize, got: usize },

    #[error("design matrix is singular: '{column}' is constant or collinear with other selected variables")]
    SingularMatrix { column: String },

    #[error("dependent variable has no variance across the {n_observations} usable rows")]
    DegenerateResponse { n_observations: usize },

    #[error("{quantity} exceeds the range of double precision for this data; rescale the selected variables")]
    OutOfRange { quantity: String },

    #[error("invalid options: {0}")]
    InvalidOptions(#[from] OptionsError),
}

/// Failure classes presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Variable selection is incomplete or names an unknown column.
    Selection,
    /// Too few complete observations for the number of regressors.
    InsufficientData,
    /// Cross-product matrix is not invertible within tolerance.
    SingularMatrix,
    /// Dependent variable is constant.
    DegenerateResponse,
    /// A finite input produced a statistic beyond `f64` range.
    OutOfRange,
    /// Options failed validation.
    Configuration,
}

impl RegressionError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegressionError::MissingDependent
            | RegressionError::NoIndependentVariables
            | RegressionError::UnknownColumn(_) => ErrorKind::Selection,
            RegressionError::NoValidObservations { .. }
            | RegressionError::InsufficientObservations { .. } => ErrorKind::InsufficientData,
            RegressionError::SingularMatrix { .. } => ErrorKind::SingularMatrix,
            RegressionError::DegenerateResponse { .. } => ErrorKind::DegenerateResponse,
            RegressionError::OutOfRange { .. } => ErrorKind::OutOfRange,
            RegressionError::InvalidOptions(_) => ErrorKind::Configuration,
        }
    }
}

/// A regression estimator that can be fit to tabular rows.
///
/// Fitting returns a fitted model that can then make predictions.
pub trait Regressor {
    /// The type of the fitted model.
    type Fitted: FittedRegressor;

    /// Fit the model to the data.
    ///
    /// # Arguments
    /// * `rows` - Observations as ingested; unusable rows are dropped listwise
    /// * `selection` - Dependent, independent and control columns
    fn fit(
        &self,
        rows: &[Row],
        selection: &VariableSelection,
    ) -> Result<Self::Fitted, RegressionError>;
}

/// A fitted regression model that can make predictions.
pub trait FittedRegressor {
    /// Predict the dependent variable for each row.
    ///
    /// Rows lacking a usable value for any regressor yield `None`.
    fn predict(&self, rows: &[Row]) -> Vec<Option<f64>>;

    /// Access the regression results (coefficients, statistics, etc.).
    fn result(&self) -> &RegressionResult;

    /// Get R² (convenience method).
    fn r_squared(&self) -> f64 {
        self.result().r_squared
    }

    /// Name of the dependent column the model was fit on.
    fn dependent(&self) -> &str;

    /// Calculate R² on new rows.
    ///
    /// Only rows with a usable dependent value and usable regressors count.
    /// Returns `None` when no such rows exist.
    fn score(&self, rows: &[Row]) -> Option<f64> {
        let dependent = self.dependent();
        let pairs: Vec<(f64, f64)> = rows
            .iter()
            .zip(self.predict(rows))
            .filter_map(|(row, pred)| Some((coerce_cell(row, dependent)?, pred?)))
            .collect();

        if pairs.is_empty() {
            return None;
        }

        let n = pairs.len() as f64;
        let y_mean: f64 = pairs.iter().map(|&(y, _)| y).sum::<f64>() / n;

        let tss: f64 = pairs.iter().map(|&(y, _)| (y - y_mean).powi(2)).sum();
        let rss: f64 = pairs.iter().map(|&(y, p)| (y - p).powi(2)).sum();

        let score = if tss == 0.0 {
            // Constant target: only an exact reproduction counts as a fit
            if rss == 0.0 {
                1.0
            } else {
                0.0
            }
        } else {
            1.0 - rss / tss
        };
        Some(score)
    }

    /// Make predictions with confidence or prediction intervals.
    ///
    /// # Arguments
    /// * `rows` - Rows to predict
    /// * `interval` - `IntervalType::Confidence` for the mean response,
    ///   `IntervalType::Prediction` for a new observation
    /// * `level` - Confidence level (e.g., 0.95 for 95% intervals)
    fn predict_with_interval(
        &self,
        rows: &[Row],
        interval: IntervalType,
        level: f64,
    ) -> Result<Vec<Option<PredictionInterval>>, RegressionError>;
}
