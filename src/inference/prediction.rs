//! Prediction interval calculations.

use super::CoefficientInference;
use crate::core::{IntervalType, PredictionInterval};
use crate::utils::ScaledInverse;
use faer::Col;

/// Computes the interval around one point prediction.
///
/// # Arguments
/// * `x0` - Design row including the leading 1 for the intercept
/// * `coefficients` - Fitted coefficients, same order as `x0`
/// * `xtx_inverse` - (X'X)⁻¹ of the fitted design
/// * `sigma` - Residual standard error
/// * `df` - Residual degrees of freedom
/// * `confidence_level` - Confidence level (e.g., 0.95)
/// * `interval_type` - Confidence or Prediction interval
pub fn prediction_interval(
    x0: &[f64],
    coefficients: &Col<f64>,
    xtx_inverse: &ScaledInverse,
    sigma: f64,
    df: f64,
    confidence_level: f64,
    interval_type: IntervalType,
) -> PredictionInterval {
    let fit: f64 = x0.iter().enumerate().map(|(j, &v)| v * coefficients[j]).sum();

    // h = x₀'(X'X)⁻¹x₀ (leverage of the new point)
    let h = xtx_inverse.leverage(x0).max(0.0);

    let se = match interval_type {
        IntervalType::Confidence => sigma * h.sqrt(),
        IntervalType::Prediction => sigma * (1.0 + h).sqrt(),
    };
    let margin = CoefficientInference::t_critical(df, confidence_level) * se;

    PredictionInterval {
        fit,
        lower: fit - margin,
        upper: fit + margin,
        se,
    }
}
