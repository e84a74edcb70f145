//! In-memory table handed over by the dataset loader.

use super::{Row, VariableSelection};
use crate::solvers::RegressionError;
use serde::{Deserialize, Serialize};

/// Rows plus the ordered list of column names they were parsed with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Column names in file order.
    pub columns: Vec<String>,
    /// One map per observation.
    pub rows: Vec<Row>,
}

impl Dataset {
    /// Create a dataset from column names and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Check every column named in `selection` exists in this dataset.
    ///
    /// Runs after the selection itself is validated, so a missing dependent
    /// column is reported as `MissingDependent` rather than unknown.
    pub fn check_selection(&self, selection: &VariableSelection) -> Result<(), RegressionError> {
        selection.validate()?;
        match selection.all_columns().find(|c| !self.has_column(c)) {
            Some(unknown) => Err(RegressionError::UnknownColumn(unknown.to_string())),
            None => Ok(()),
        }
    }
}
