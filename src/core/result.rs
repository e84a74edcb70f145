//! Regression result structures.

use super::listwise::ListwiseInfo;
use crate::utils::scaled_sum_of_squares;
use serde::{Deserialize, Serialize};

/// Serde representation for statistics that are legitimately non-finite.
///
/// Finite values stay JSON numbers; `inf`, `-inf` and `NaN` are written as
/// those strings, since JSON numbers cannot hold them.
mod extended_float {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if *value > 0.0 {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(v),
            Repr::Text(s) => match s.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                "NaN" => Ok(f64::NAN),
                other => Err(D::Error::custom(format!("invalid number '{}'", other))),
            },
        }
    }
}

/// Estimate and inference for one design-matrix column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionCoefficient {
    /// Source column name, or the intercept label.
    pub name: String,

    /// Estimated coefficient.
    pub value: f64,

    /// Standard error, sqrt(σ² · (X'X)⁻¹ⱼⱼ). Never negative.
    pub std_error: f64,

    /// `value / std_error`; NaN when the standard error is zero.
    #[serde(with = "extended_float")]
    pub t_statistic: f64,

    /// Two-sided p-value from Student's t with the residual degrees of freedom.
    /// NaN when the t-statistic is undefined.
    #[serde(with = "extended_float")]
    pub p_value: f64,

    /// Confidence interval (lower, upper) at the result's confidence level.
    pub conf_interval: (f64, f64),
}

/// Complete result from a regression fit.
///
/// `residuals`, `predicted` and `actual` have one entry per retained row, in
/// input order; `coefficients` are intercept, independents, then controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    // ========== Core Results ==========
    /// One entry per design-matrix column.
    pub coefficients: Vec<RegressionCoefficient>,

    /// Residuals (actual - predicted).
    pub residuals: Vec<f64>,

    /// Fitted values Xβ.
    pub predicted: Vec<f64>,

    /// Observed dependent values of the retained rows.
    pub actual: Vec<f64>,

    /// Number of retained observations.
    pub n_observations: usize,

    /// Number of parameters, intercept included.
    pub n_parameters: usize,

    // ========== Fit Statistics ==========
    /// Coefficient of determination (R²).
    pub r_squared: f64,

    /// Adjusted R².
    pub adj_r_squared: f64,

    /// F-statistic for overall model significance.
    ///
    /// Infinite for an exact fit (RSS = 0 with TSS > 0); serialized as the
    /// string `"inf"` in that case.
    #[serde(with = "extended_float")]
    pub f_statistic: f64,

    /// P-value for the F-statistic.
    #[serde(with = "extended_float")]
    pub f_pvalue: f64,

    /// Residual variance estimate σ² = RSS / (n - p).
    pub mse: f64,

    /// Square root of `mse`.
    pub rmse: f64,

    // ========== Information Criteria ==========
    /// Gaussian log-likelihood; `None` for an exact fit.
    pub log_likelihood: Option<f64>,

    /// Akaike Information Criterion.
    pub aic: Option<f64>,

    /// Bayesian Information Criterion.
    pub bic: Option<f64>,

    /// Confidence level used for intervals.
    pub confidence_level: f64,

    /// Set when the dependent variable was constant and the sentinel policy
    /// filled in R², adjusted R² and F.
    pub degenerate_response: bool,

    // ========== Listwise Deletion ==========
    /// Which input rows were used.
    pub listwise: ListwiseInfo,
}

impl RegressionResult {
    /// Residual degrees of freedom (n - p).
    pub fn residual_df(&self) -> usize {
        self.n_observations.saturating_sub(self.n_parameters)
    }

    /// Model degrees of freedom (p - 1).
    pub fn model_df(&self) -> usize {
        self.n_parameters.saturating_sub(1)
    }

    /// The intercept coefficient.
    pub fn intercept(&self) -> Option<&RegressionCoefficient> {
        self.coefficients.first()
    }

    /// Look up a coefficient by column name.
    pub fn coefficient(&self, name: &str) -> Option<&RegressionCoefficient> {
        self.coefficients.iter().find(|c| c.name == name)
    }

    /// Coefficient values in design-matrix order.
    pub fn coefficient_values(&self) -> Vec<f64> {
        self.coefficients.iter().map(|c| c.value).collect()
    }

    /// Residual sum of squares (RSS).
    ///
    /// `+∞` when the sum exceeds `f64`; the fit statistics never need it.
    pub fn rss(&self) -> f64 {
        let (scale, ssq) = scaled_sum_of_squares(&self.residuals);
        scale * scale * ssq
    }

    /// Total sum of squares (TSS).
    pub fn tss(&self) -> f64 {
        if self.actual.is_empty() {
            return 0.0;
        }
        let n = self.actual.len() as f64;
        let y_mean = self.actual.iter().map(|y| y / n).sum::<f64>();
        let deviations: Vec<f64> = self.actual.iter().map(|y| y - y_mean).collect();
        let (scale, ssq) = scaled_sum_of_squares(&deviations);
        scale * scale * ssq
    }

    /// Explained sum of squares (ESS = TSS - RSS).
    pub fn ess(&self) -> f64 {
        self.tss() - self.rss()
    }

    /// Residuals aligned to the input rows, `None` where a row was dropped.
    pub fn residuals_expanded(&self) -> Vec<Option<f64>> {
        self.listwise.expand(&self.residuals)
    }

    /// Predicted values aligned to the input rows, `None` where a row was dropped.
    pub fn predicted_expanded(&self) -> Vec<Option<f64>> {
        self.listwise.expand(&self.predicted)
    }
}
