//! Variable selection: which columns play which role in the model.

use crate::solvers::RegressionError;
use serde::{Deserialize, Serialize};

/// Dependent, independent and control columns for one regression run.
///
/// Regressor order in the fitted model is: intercept, then `independent` in
/// the order given, then `controls` in the order given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableSelection {
    /// Response column. Must be set before fitting.
    pub dependent: Option<String>,
    /// Explanatory columns of interest. At least one is required.
    pub independent: Vec<String>,
    /// Additional control columns.
    #[serde(default)]
    pub controls: Vec<String>,
}

impl VariableSelection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dependent column.
    pub fn dependent(mut self, column: impl Into<String>) -> Self {
        self.dependent = Some(column.into());
        self
    }

    /// Append an independent column.
    pub fn independent(mut self, column: impl Into<String>) -> Self {
        self.independent.push(column.into());
        self
    }

    /// Append a control column.
    pub fn control(mut self, column: impl Into<String>) -> Self {
        self.controls.push(column.into());
        self
    }

    /// Check the selection is complete and return the dependent column.
    ///
    /// # Errors
    /// - `MissingDependent` if no dependent column is set
    /// - `NoIndependentVariables` if the independent list is empty
    pub fn validate(&self) -> Result<&str, RegressionError> {
        let dependent = self
            .dependent
            .as_deref()
            .ok_or(RegressionError::MissingDependent)?;
        if self.independent.is_empty() {
            return Err(RegressionError::NoIndependentVariables);
        }
        Ok(dependent)
    }

    /// Regressor columns in design-matrix order (intercept excluded).
    pub fn regressor_names(&self) -> impl Iterator<Item = &str> {
        self.independent
            .iter()
            .chain(self.controls.iter())
            .map(String::as_str)
    }

    /// Every selected column: dependent first, then regressors.
    pub fn all_columns(&self) -> impl Iterator<Item = &str> {
        self.dependent.as_deref().into_iter().chain(self.regressor_names())
    }

    /// Number of design-matrix columns, intercept included.
    pub fn n_parameters(&self) -> usize {
        1 + self.independent.len() + self.controls.len()
    }
}
