//! Goodness-of-fit statistics.

use crate::core::ConstantResponse;
use crate::solvers::RegressionError;
use crate::utils::{is_constant, max_abs, scaled_sum_of_squares};
use faer::Col;
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

/// Model-level statistics derived from the response and residuals.
#[derive(Debug, Clone, PartialEq)]
pub struct FitStatistics {
    pub r_squared: f64,
    pub adj_r_squared: f64,
    pub f_statistic: f64,
    pub f_pvalue: f64,
    pub mse: f64,
    pub rmse: f64,
    pub log_likelihood: Option<f64>,
    pub aic: Option<f64>,
    pub bic: Option<f64>,
    pub degenerate_response: bool,
}

impl FitStatistics {
    /// Compute fit statistics for a model with `n_params` columns
    /// (intercept included).
    ///
    /// RSS and TSS are only ever handled as `scale²·ssq` pairs, so ratios
    /// such as R² and F stay exact when the sums themselves overflow.
    ///
    /// # Errors
    /// - `InsufficientObservations` if n - p is not positive
    /// - `DegenerateResponse` if `y` is constant and the policy is `Reject`
    /// - `OutOfRange` if the residual variance is not representable
    pub fn compute(
        y: &Col<f64>,
        residuals: &Col<f64>,
        n_params: usize,
        tolerance: f64,
        policy: ConstantResponse,
    ) -> Result<Self, RegressionError> {
        let n = y.nrows();
        if n <= n_params {
            return Err(RegressionError::InsufficientObservations {
                needed: n_params + 1,
                got: n,
            });
        }

        let df_resid = (n - n_params) as f64;
        let df_model = (n_params - 1) as f64;
        let n_f = n as f64;

        let y_values: Vec<f64> = y.iter().copied().collect();
        let y_scale = max_abs(&y_values).max(f64::MIN_POSITIVE);
        let y_mean = y_scale * y_values.iter().map(|v| v / y_scale).sum::<f64>() / n_f;
        let deviations: Vec<f64> = y_values.iter().map(|v| v - y_mean).collect();
        let residual_values: Vec<f64> = residuals.iter().copied().collect();

        let (tss_scale, tss_ssq) = scaled_sum_of_squares(&deviations);
        let (rss_scale, rss_ssq) = scaled_sum_of_squares(&residual_values);

        let rmse = rss_scale * (rss_ssq / df_resid).sqrt();
        let mse = rmse * rmse;
        if !mse.is_finite() {
            return Err(RegressionError::OutOfRange {
                quantity: "residual variance".to_string(),
            });
        }

        // Gaussian log-likelihood at the ML variance RSS / n, k = p + 1
        // parameters counting σ²; undefined for an exact fit
        let k = (n_params + 1) as f64;
        let log_likelihood = (rss_ssq > 0.0).then(|| {
            let log_variance = 2.0 * rss_scale.ln() + (rss_ssq / n_f).ln();
            -0.5 * n_f * (1.0 + (2.0 * std::f64::consts::PI).ln() + log_variance)
        });
        let aic = log_likelihood.map(|ll| 2.0 * k - 2.0 * ll);
        let bic = log_likelihood.map(|ll| k * n_f.ln() - 2.0 * ll);

        if is_constant(y, tolerance) || tss_ssq == 0.0 {
            return match policy {
                ConstantResponse::Reject => {
                    Err(RegressionError::DegenerateResponse { n_observations: n })
                }
                ConstantResponse::Sentinel => {
                    log::warn!("dependent variable is constant; reporting sentinel fit statistics");
                    Ok(Self {
                        r_squared: 0.0,
                        adj_r_squared: 0.0,
                        f_statistic: 0.0,
                        f_pvalue: 1.0,
                        mse,
                        rmse,
                        log_likelihood,
                        aic,
                        bic,
                        degenerate_response: true,
                    })
                }
            };
        }

        // RSS / TSS
        let unexplained = (rss_scale / tss_scale).powi(2) * rss_ssq / tss_ssq;

        let r_squared = (1.0 - unexplained).clamp(0.0, 1.0);
        let adj_r_squared = 1.0 - (1.0 - r_squared) * (n_f - 1.0) / df_resid;

        let f_statistic = if rss_ssq > 0.0 {
            ((1.0 - unexplained).max(0.0) / df_model) / (unexplained / df_resid)
        } else {
            f64::INFINITY
        };

        let f_pvalue = if f_statistic.is_infinite() {
            0.0
        } else {
            FisherSnedecor::new(df_model, df_resid).map_or(f64::NAN, |d| 1.0 - d.cdf(f_statistic))
        };

        Ok(Self {
            r_squared,
            adj_r_squared,
            f_statistic,
            f_pvalue,
            mse,
            rmse,
            log_likelihood,
            aic,
            bic,
            degenerate_response: false,
        })
    }
}
