//! Regression options and configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default label of the constant column in the returned coefficients.
pub const DEFAULT_INTERCEPT_LABEL: &str = "(Intercept)";

/// How to treat a dependent variable with zero variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConstantResponse {
    /// Fail with `RegressionError::DegenerateResponse` (default).
    #[default]
    Reject,
    /// Return a result with R² = adjusted R² = F = 0, F p-value 1 and
    /// `degenerate_response` set.
    Sentinel,
}

/// Configuration options for the OLS engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionOptions {
    /// Confidence level for coefficient intervals (default: 0.95).
    pub confidence_level: f64,
    /// Relative pivot threshold for singularity detection (default: 1e-10).
    ///
    /// Columns are scaled to unit norm before a Householder QR; the design
    /// is singular when a diagonal entry of R falls to or below
    /// `rank_tolerance` times the largest one.
    pub rank_tolerance: f64,
    /// Name reported for the intercept coefficient.
    pub intercept_label: String,
    /// Policy for a constant dependent variable.
    pub constant_response: ConstantResponse,
}

impl Default for RegressionOptions {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
            rank_tolerance: 1e-10,
            intercept_label: DEFAULT_INTERCEPT_LABEL.to_string(),
            constant_response: ConstantResponse::Reject,
        }
    }
}

/// Errors that can occur when validating regression options.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("confidence_level must be in (0, 1), got {0}")]
    InvalidConfidenceLevel(f64),
    #[error("rank_tolerance must be positive and finite, got {0}")]
    InvalidRankTolerance(f64),
    #[error("intercept_label must not be empty")]
    EmptyInterceptLabel,
}

impl RegressionOptions {
    /// Create a new builder for regression options.
    pub fn builder() -> RegressionOptionsBuilder {
        RegressionOptionsBuilder::default()
    }

    /// Validate the options and return an error if invalid.
    pub fn validate(&self) -> Result<(), OptionsError> {
        validate_confidence_level(self.confidence_level)?;
        if !self.rank_tolerance.is_finite() || self.rank_tolerance <= 0.0 {
            return Err(OptionsError::InvalidRankTolerance(self.rank_tolerance));
        }
        if self.intercept_label.trim().is_empty() {
            return Err(OptionsError::EmptyInterceptLabel);
        }
        Ok(())
    }
}

/// Check a confidence level lies strictly between 0 and 1.
pub(crate) fn validate_confidence_level(level: f64) -> Result<(), OptionsError> {
    // Written so NaN fails too
    if level > 0.0 && level < 1.0 {
        Ok(())
    } else {
        Err(OptionsError::InvalidConfidenceLevel(level))
    }
}

/// Builder for `RegressionOptions`.
#[derive(Debug, Clone, Default)]
pub struct RegressionOptionsBuilder {
    options: RegressionOptions,
}

impl RegressionOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the confidence level for confidence intervals.
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.options.confidence_level = level;
        self
    }

    /// Set the relative pivot tolerance for singularity detection.
    pub fn rank_tolerance(mut self, tol: f64) -> Self {
        self.options.rank_tolerance = tol;
        self
    }

    /// Set the label of the intercept coefficient.
    pub fn intercept_label(mut self, label: impl Into<String>) -> Self {
        self.options.intercept_label = label.into();
        self
    }

    /// Set the constant-response policy.
    pub fn constant_response(mut self, policy: ConstantResponse) -> Self {
        self.options.constant_response = policy;
        self
    }

    /// Build and validate the options.
    pub fn build(self) -> Result<RegressionOptions, OptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }

    /// Build the options without validation.
    pub fn build_unchecked(self) -> RegressionOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = RegressionOptions::default();
        assert!((opts.confidence_level - 0.95).abs() < 1e-10);
        assert!((opts.rank_tolerance - 1e-10).abs() < 1e-20);
        assert_eq!(opts.intercept_label, "(Intercept)");
        assert_eq!(opts.constant_response, ConstantResponse::Reject);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let opts = RegressionOptions::builder()
            .confidence_level(0.9)
            .intercept_label("const")
            .constant_response(ConstantResponse::Sentinel)
            .build()
            .unwrap();

        assert!((opts.confidence_level - 0.9).abs() < 1e-10);
        assert_eq!(opts.intercept_label, "const");
        assert_eq!(opts.constant_response, ConstantResponse::Sentinel);
    }

    #[test]
    fn test_validation_invalid_confidence_level() {
        for level in [0.0, 1.0, -0.5, f64::NAN] {
            let result = RegressionOptions::builder().confidence_level(level).build();
            assert!(matches!(
                result,
                Err(OptionsError::InvalidConfidenceLevel(_))
            ));
        }
    }

    #[test]
    fn test_validation_invalid_rank_tolerance() {
        for tol in [0.0, -1e-10, f64::INFINITY] {
            let result = RegressionOptions::builder().rank_tolerance(tol).build();
            assert!(matches!(result, Err(OptionsError::InvalidRankTolerance(_))));
        }
    }

    #[test]
    fn test_validation_empty_label() {
        let result = RegressionOptions::builder().intercept_label("  ").build();
        assert!(matches!(result, Err(OptionsError::EmptyInterceptLabel)));
    }

    #[test]
    fn test_build_unchecked_skips_validation() {
        let opts = RegressionOptions::builder()
            .confidence_level(2.0)
            .build_unchecked();
        assert!((opts.confidence_level - 2.0).abs() < 1e-10);
        assert!(opts.validate().is_err());
    }
}
