//! Listwise deletion bookkeeping.
//!
//! A row is kept only when every selected column coerces to a finite number.
//! [`ListwiseInfo`] records which rows survived so that per-observation output
//! (residuals, predicted values) can be lined up with the original table.
//!
//! # Example
//!
//! With rows 2 and 3 dropped from five input rows:
//! - `residuals = [r0, r1, r4]` (length 3)
//! - `info.expand(&residuals) = [Some(r0), Some(r1), None, None, Some(r4)]`

use serde::{Deserialize, Serialize};

/// Information about the rows removed before fitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListwiseInfo {
    /// Number of input rows.
    pub n_original: usize,

    /// Number of rows kept.
    pub n_retained: usize,

    /// Indices of kept rows, ascending.
    pub kept_indices: Vec<usize>,

    /// Indices of dropped rows, ascending.
    pub dropped_indices: Vec<usize>,

    /// Per selected column (dependent first, then regressors): how many rows
    /// held an unusable value there.
    pub invalid_counts: Vec<(String, usize)>,
}

impl ListwiseInfo {
    /// Build from a per-row drop mask and per-column invalid counts.
    pub(crate) fn from_mask(drop_mask: &[bool], invalid_counts: Vec<(String, usize)>) -> Self {
        let (dropped_indices, kept_indices): (Vec<usize>, Vec<usize>) =
            (0..drop_mask.len()).partition(|&i| drop_mask[i]);

        Self {
            n_original: drop_mask.len(),
            n_retained: kept_indices.len(),
            kept_indices,
            dropped_indices,
            invalid_counts,
        }
    }

    /// Number of rows removed.
    pub fn n_removed(&self) -> usize {
        self.dropped_indices.len()
    }

    /// Check if any rows were removed.
    pub fn has_removed(&self) -> bool {
        !self.dropped_indices.is_empty()
    }

    /// Expand a retained-row series to original length, `None` at dropped rows.
    ///
    /// `values` must have one entry per retained row, in retained order.
    pub fn expand(&self, values: &[f64]) -> Vec<Option<f64>> {
        let mut expanded = vec![None; self.n_original];
        for (&orig_idx, &v) in self.kept_indices.iter().zip(values) {
            expanded[orig_idx] = Some(v);
        }
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mask() {
        let info = ListwiseInfo::from_mask(&[false, false, true, true, false], Vec::new());

        assert_eq!(info.n_original, 5);
        assert_eq!(info.n_retained, 3);
        assert_eq!(info.kept_indices, vec![0, 1, 4]);
        assert_eq!(info.dropped_indices, vec![2, 3]);
        assert_eq!(info.n_removed(), 2);
        assert!(info.has_removed());
    }

    #[test]
    fn test_expand() {
        let info = ListwiseInfo::from_mask(&[false, false, true, true, false], Vec::new());
        let expanded = info.expand(&[1.0, 2.0, 3.0]);

        assert_eq!(expanded, vec![Some(1.0), Some(2.0), None, None, Some(3.0)]);
    }

    #[test]
    fn test_nothing_removed() {
        let info = ListwiseInfo::from_mask(&[false; 4], Vec::new());
        assert!(!info.has_removed());
        assert_eq!(info.expand(&[0.0, 1.0, 2.0, 3.0]).len(), 4);
    }
}
