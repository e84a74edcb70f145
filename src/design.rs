//! Design-matrix assembly from loosely-typed rows.

use crate::core::{coerce_cell, ListwiseInfo, Row, VariableSelection};
use crate::solvers::RegressionError;
use faer::{Col, Mat};

/// Numeric design produced from rows and a selection.
///
/// Column 0 of `x` is the constant 1.0; the remaining columns follow
/// `selection.regressor_names()`. `names` labels every column of `x`.
#[derive(Debug, Clone)]
pub(crate) struct DesignMatrix {
    pub x: Mat<f64>,
    pub y: Col<f64>,
    pub names: Vec<String>,
    pub listwise: ListwiseInfo,
}

impl DesignMatrix {
    /// Sanitize `rows` listwise and assemble the design.
    ///
    /// # Errors
    /// - Selection errors from [`VariableSelection::validate`]
    /// - `NoValidObservations` if no row survives sanitization
    /// - `InsufficientObservations` unless retained rows exceed the number
    ///   of regressors (intercept included)
    pub fn from_rows(
        rows: &[Row],
        selection: &VariableSelection,
        intercept_label: &str,
    ) -> Result<Self, RegressionError> {
        selection.validate()?;

        let columns: Vec<&str> = selection.all_columns().collect();
        let mut invalid = vec![0usize; columns.len()];
        let mut drop_mask = Vec::with_capacity(rows.len());
        let mut retained: Vec<Vec<f64>> = Vec::with_capacity(rows.len());

        for row in rows {
            let mut values = Vec::with_capacity(columns.len());
            for (j, column) in columns.iter().enumerate() {
                match coerce_cell(row, column) {
                    Some(v) => values.push(v),
                    None => invalid[j] += 1,
                }
            }
            let complete = values.len() == columns.len();
            drop_mask.push(!complete);
            if complete {
                retained.push(values);
            }
        }

        let invalid_counts = columns
            .iter()
            .zip(invalid)
            .map(|(c, count)| (c.to_string(), count))
            .collect();
        let listwise = ListwiseInfo::from_mask(&drop_mask, invalid_counts);

        if listwise.has_removed() {
            log::warn!(
                "listwise deletion dropped {} of {} rows",
                listwise.n_removed(),
                listwise.n_original
            );
            for (column, count) in listwise.invalid_counts.iter().filter(|(_, n)| *n > 0) {
                log::debug!("column '{}': {} unusable values", column, count);
            }
        }

        let n = retained.len();
        if n == 0 {
            return Err(RegressionError::NoValidObservations { n_rows: rows.len() });
        }

        let p = selection.n_parameters();
        if n <= p {
            return Err(RegressionError::InsufficientObservations {
                needed: p + 1,
                got: n,
            });
        }

        // retained[i] = [y, regressors...], so regressor j sits at index j
        let x = Mat::from_fn(n, p, |i, j| if j == 0 { 1.0 } else { retained[i][j] });
        let y = Col::from_fn(n, |i| retained[i][0]);

        let names = std::iter::once(intercept_label.to_string())
            .chain(selection.regressor_names().map(str::to_string))
            .collect();

        log::debug!("assembled design matrix: {} observations x {} columns", n, p);

        Ok(Self {
            x,
            y,
            names,
            listwise,
        })
    }

    /// Number of retained observations.
    pub fn n_observations(&self) -> usize {
        self.x.nrows()
    }

    /// Number of design-matrix columns, intercept included.
    pub fn n_parameters(&self) -> usize {
        self.x.ncols()
    }
}

/// Build the design row `[1, regressors...]` for one input row.
///
/// Returns `None` if any regressor is missing or unusable.
pub(crate) fn design_row<'a>(
    row: &Row,
    regressors: impl Iterator<Item = &'a str>,
) -> Option<Vec<f64>> {
    std::iter::once(Some(1.0))
        .chain(regressors.map(|c| coerce_cell(row, c)))
        .collect()
}
