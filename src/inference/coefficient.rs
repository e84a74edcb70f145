//! Coefficient inference calculations.

use crate::core::RegressionCoefficient;
use crate::utils::ScaledInverse;
use faer::Col;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Computes inference statistics for regression coefficients.
pub struct CoefficientInference;

impl CoefficientInference {
    /// Compute standard errors for OLS coefficients.
    ///
    /// SE(β_j) = σ · sqrt((X'X)^(-1)_{jj}), with σ the residual standard error.
    ///
    /// Taking σ rather than σ² keeps the product in range for responses
    /// whose variance overflows.
    pub fn standard_errors(xtx_inverse: &ScaledInverse, sigma: f64) -> Col<f64> {
        let root_diagonal = xtx_inverse.diagonal_sqrt();
        Col::from_fn(root_diagonal.len(), |j| sigma * root_diagonal[j])
    }

    /// Compute t-statistics for coefficients.
    ///
    /// t_j = β_j / SE(β_j), NaN where SE(β_j) is zero.
    pub fn t_statistics(coefficients: &Col<f64>, std_errors: &Col<f64>) -> Col<f64> {
        let n = coefficients.nrows();
        let mut t_stats = Col::zeros(n);

        for j in 0..n {
            if std_errors[j].is_nan() || std_errors[j] == 0.0 {
                t_stats[j] = f64::NAN;
            } else {
                t_stats[j] = coefficients[j] / std_errors[j];
            }
        }

        t_stats
    }

    /// Compute p-values from t-statistics.
    ///
    /// p_j = 2 * P(|T| > |t_j|) where T ~ t(df)
    pub fn p_values(t_statistics: &Col<f64>, df: f64) -> Col<f64> {
        let n = t_statistics.nrows();
        let t_dist = StudentsT::new(0.0, 1.0, df).ok();

        Col::from_fn(n, |j| match &t_dist {
            Some(dist) if !t_statistics[j].is_nan() => {
                // Two-tailed test
                2.0 * (1.0 - dist.cdf(t_statistics[j].abs()))
            }
            _ => f64::NAN,
        })
    }

    /// Two-sided critical value t_{1-α/2, df}.
    pub fn t_critical(df: f64, confidence_level: f64) -> f64 {
        let alpha = 1.0 - confidence_level;
        StudentsT::new(0.0, 1.0, df).map_or(f64::NAN, |d| d.inverse_cdf(1.0 - alpha / 2.0))
    }

    /// Compute confidence intervals for coefficients.
    ///
    /// CI_j = β_j ± t_{α/2, df} * SE(β_j)
    pub fn confidence_intervals(
        coefficients: &Col<f64>,
        std_errors: &Col<f64>,
        df: f64,
        confidence_level: f64,
    ) -> (Col<f64>, Col<f64>) {
        let n = coefficients.nrows();
        let t_crit = Self::t_critical(df, confidence_level);

        let mut lower = Col::zeros(n);
        let mut upper = Col::zeros(n);
        for j in 0..n {
            let margin = t_crit * std_errors[j];
            lower[j] = coefficients[j] - margin;
            upper[j] = coefficients[j] + margin;
        }

        (lower, upper)
    }

    /// Assemble per-coefficient records in design-matrix order.
    pub fn summarize(
        names: &[String],
        coefficients: &Col<f64>,
        xtx_inverse: &ScaledInverse,
        sigma: f64,
        df: f64,
        confidence_level: f64,
    ) -> Vec<RegressionCoefficient> {
        let se = Self::standard_errors(xtx_inverse, sigma);
        let t_stats = Self::t_statistics(coefficients, &se);
        let p_vals = Self::p_values(&t_stats, df);
        let (lower, upper) = Self::confidence_intervals(coefficients, &se, df, confidence_level);

        names
            .iter()
            .enumerate()
            .map(|(j, name)| RegressionCoefficient {
                name: name.clone(),
                value: coefficients[j],
                std_error: se[j],
                t_statistic: t_stats[j],
                p_value: p_vals[j],
                conf_interval: (lower[j], upper[j]),
            })
            .collect()
    }
}
