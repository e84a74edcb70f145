//! Ordinary Least Squares regression solver.

use crate::core::{
    validate_confidence_level, ConstantResponse, Dataset, IntervalType, PredictionInterval,
    RegressionOptions, RegressionOptionsBuilder, RegressionResult, Row, VariableSelection,
};
use crate::design::{design_row, DesignMatrix};
use crate::inference::{prediction_interval, CoefficientInference, FitStatistics};
use crate::solvers::traits::{FittedRegressor, RegressionError, Regressor};
use crate::utils::{
    max_abs, scaled_factor, solve_upper, solve_upper_transpose, times, transpose_times,
    ScaledInverse,
};
use faer::{Col, Mat};

/// Ordinary Least Squares regression estimator.
///
/// Solves the normal equations (X'X)β = X'y for a design of an intercept,
/// the independent columns, then the controls. X'X is factored as R'R from a
/// QR decomposition of the column-equilibrated design; a rank-deficient
/// design is rejected with `RegressionError::SingularMatrix` instead of
/// producing aliased coefficients.
///
/// # Example
///
/// ```rust,ignore
/// use tabular_ols::prelude::*;
///
/// let selection = VariableSelection::new()
///     .dependent("price")
///     .independent("area")
///     .control("rooms");
///
/// let fitted = OlsRegressor::builder()
///     .confidence_level(0.99)
///     .build()
///     .fit(&rows, &selection)?;
///
/// println!("R² = {}", fitted.r_squared());
/// for c in &fitted.result().coefficients {
///     println!("{}: {} ({})", c.name, c.value, c.std_error);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct OlsRegressor {
    options: RegressionOptions,
}

/// Solution of the normal equations.
#[derive(Debug, Clone)]
struct NormalSolution {
    coefficients: Col<f64>,
    xtx_inverse: ScaledInverse,
}

impl OlsRegressor {
    /// Create a new OLS regressor with the given options.
    pub fn new(options: RegressionOptions) -> Self {
        Self { options }
    }

    /// Create a builder for configuring the regressor.
    pub fn builder() -> OlsRegressorBuilder {
        OlsRegressorBuilder::default()
    }

    /// Options this regressor fits with.
    pub fn options(&self) -> &RegressionOptions {
        &self.options
    }

    /// Fit on a loaded dataset, rejecting selections that name columns the
    /// dataset does not have.
    pub fn fit_dataset(
        &self,
        dataset: &Dataset,
        selection: &VariableSelection,
    ) -> Result<FittedOls, RegressionError> {
        dataset.check_selection(selection)?;
        self.fit(&dataset.rows, selection)
    }

    /// Solve (X'X)β = X'y.
    ///
    /// With X·D⁻¹ = Q·R, X'X = D·R'R·D. The system is solved for
    /// γ = D·β / s on the unit-norm design with response y / s, where s is
    /// the largest |y|, so no intermediate leaves the scale of the data. The
    /// triangular solves are followed by one refinement step on the
    /// residual, which recovers the accuracy lost by squaring the condition
    /// number in the normal equations.
    fn solve_normal_equations(
        &self,
        design: &DesignMatrix,
    ) -> Result<NormalSolution, RegressionError> {
        let x = &design.x;
        let n = x.nrows();
        let p = x.ncols();

        let factor = scaled_factor(x, self.options.rank_tolerance).map_err(|j| {
            RegressionError::SingularMatrix {
                column: design.names[j].clone(),
            }
        })?;

        let y_values: Vec<f64> = design.y.iter().copied().collect();
        let y_scale = max_abs(&y_values).max(f64::MIN_POSITIVE);
        let y_unit = Col::from_fn(n, |i| design.y[i] / y_scale);

        let solve = |rhs: &Col<f64>| -> Col<f64> {
            let z = solve_upper_transpose(&factor.r, rhs);
            solve_upper(&factor.r, &z)
        };

        let mut gamma = solve(&transpose_times(&factor.unit, &y_unit));

        let fitted = times(&factor.unit, &gamma);
        let residuals = Col::from_fn(n, |i| y_unit[i] - fitted[i]);
        let correction = solve(&transpose_times(&factor.unit, &residuals));
        for j in 0..p {
            gamma[j] += correction[j];
        }

        let coefficients = Col::from_fn(p, |j| gamma[j] * (y_scale / factor.scale[j]));
        if let Some(j) = (0..p).find(|&j| !coefficients[j].is_finite()) {
            return Err(RegressionError::OutOfRange {
                quantity: format!("coefficient of '{}'", design.names[j]),
            });
        }

        Ok(NormalSolution {
            coefficients,
            xtx_inverse: factor.inverse(),
        })
    }
}

impl Regressor for OlsRegressor {
    type Fitted = FittedOls;

    fn fit(
        &self,
        rows: &[Row],
        selection: &VariableSelection,
    ) -> Result<Self::Fitted, RegressionError> {
        self.options.validate()?;

        let design = DesignMatrix::from_rows(rows, selection, &self.options.intercept_label)?;
        let n = design.n_observations();
        let p = design.n_parameters();

        let NormalSolution {
            coefficients,
            xtx_inverse,
        } = self.solve_normal_equations(&design)?;

        let predicted = times(&design.x, &coefficients);
        let residuals = Col::from_fn(n, |i| design.y[i] - predicted[i]);
        if !(0..n).all(|i| predicted[i].is_finite() && residuals[i].is_finite()) {
            return Err(RegressionError::OutOfRange {
                quantity: "fitted values".to_string(),
            });
        }

        let stats = FitStatistics::compute(
            &design.y,
            &residuals,
            p,
            self.options.rank_tolerance,
            self.options.constant_response,
        )?;

        let df = (n - p) as f64;
        let coefficient_table = CoefficientInference::summarize(
            &design.names,
            &coefficients,
            &xtx_inverse,
            stats.rmse,
            df,
            self.options.confidence_level,
        );

        log::debug!(
            "OLS fit: n = {}, p = {}, R² = {:.6}, F = {:.6}",
            n,
            p,
            stats.r_squared,
            stats.f_statistic
        );

        let result = RegressionResult {
            coefficients: coefficient_table,
            residuals: residuals.iter().copied().collect(),
            predicted: predicted.iter().copied().collect(),
            actual: design.y.iter().copied().collect(),
            n_observations: n,
            n_parameters: p,
            r_squared: stats.r_squared,
            adj_r_squared: stats.adj_r_squared,
            f_statistic: stats.f_statistic,
            f_pvalue: stats.f_pvalue,
            mse: stats.mse,
            rmse: stats.rmse,
            log_likelihood: stats.log_likelihood,
            aic: stats.aic,
            bic: stats.bic,
            confidence_level: self.options.confidence_level,
            degenerate_response: stats.degenerate_response,
            listwise: design.listwise,
        };

        Ok(FittedOls {
            options: self.options.clone(),
            dependent: selection.validate()?.to_string(),
            regressors: selection.regressor_names().map(str::to_string).collect(),
            coefficients,
            xtx_inverse,
            result,
        })
    }
}

/// A fitted OLS regression model.
#[derive(Debug, Clone)]
pub struct FittedOls {
    options: RegressionOptions,
    dependent: String,
    /// Regressor columns after the intercept, in design order.
    regressors: Vec<String>,
    coefficients: Col<f64>,
    /// (X'X)⁻¹ for prediction intervals
    xtx_inverse: ScaledInverse,
    result: RegressionResult,
}

impl FittedOls {
    /// Get the options used to fit this model.
    pub fn options(&self) -> &RegressionOptions {
        &self.options
    }

    /// (X'X)⁻¹ of the fitted design, intercept first.
    ///
    /// Entries can underflow to zero when a regressor is extremely large;
    /// the model's own standard errors and intervals never form this matrix.
    pub fn xtx_inverse(&self) -> Mat<f64> {
        self.xtx_inverse.to_matrix()
    }

    /// Consume the model and keep only the result.
    pub fn into_result(self) -> RegressionResult {
        self.result
    }

    fn design_row(&self, row: &Row) -> Option<Vec<f64>> {
        design_row(row, self.regressors.iter().map(String::as_str))
    }
}

impl FittedRegressor for FittedOls {
    fn predict(&self, rows: &[Row]) -> Vec<Option<f64>> {
        rows.iter()
            .map(|row| {
                self.design_row(row).map(|x0| {
                    x0.iter()
                        .enumerate()
                        .map(|(j, &v)| v * self.coefficients[j])
                        .sum()
                })
            })
            .collect()
    }

    fn result(&self) -> &RegressionResult {
        &self.result
    }

    fn dependent(&self) -> &str {
        &self.dependent
    }

    fn predict_with_interval(
        &self,
        rows: &[Row],
        interval: IntervalType,
        level: f64,
    ) -> Result<Vec<Option<PredictionInterval>>, RegressionError> {
        validate_confidence_level(level)?;
        let df = self.result.residual_df() as f64;

        Ok(rows
            .iter()
            .map(|row| {
                self.design_row(row).map(|x0| {
                    prediction_interval(
                        &x0,
                        &self.coefficients,
                        &self.xtx_inverse,
                        self.result.rmse,
                        df,
                        level,
                        interval,
                    )
                })
            })
            .collect())
    }
}

/// Builder for `OlsRegressor`.
#[derive(Debug, Clone, Default)]
pub struct OlsRegressorBuilder {
    builder: RegressionOptionsBuilder,
}

impl OlsRegressorBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the confidence level for confidence intervals.
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.builder = self.builder.confidence_level(level);
        self
    }

    /// Set the relative pivot tolerance for singularity detection.
    pub fn rank_tolerance(mut self, tol: f64) -> Self {
        self.builder = self.builder.rank_tolerance(tol);
        self
    }

    /// Set the label of the intercept coefficient.
    pub fn intercept_label(mut self, label: impl Into<String>) -> Self {
        self.builder = self.builder.intercept_label(label);
        self
    }

    /// Set the constant-response policy.
    pub fn constant_response(mut self, policy: ConstantResponse) -> Self {
        self.builder = self.builder.constant_response(policy);
        self
    }

    /// Build the OLS regressor.
    ///
    /// Options are validated when fitting, so invalid settings surface as
    /// `RegressionError::InvalidOptions`.
    pub fn build(self) -> OlsRegressor {
        OlsRegressor::new(self.builder.build_unchecked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CellValue;
    use crate::solvers::ErrorKind;

    fn rows_from(columns: &[&str], data: &[Vec<f64>]) -> Vec<Row> {
        data.iter()
            .map(|values| {
                columns
                    .iter()
                    .zip(values)
                    .map(|(c, &v)| (c.to_string(), CellValue::from(v)))
                    .collect()
            })
            .collect()
    }

    fn line_rows() -> Vec<Row> {
        // y = 2 + 3x
        let data: Vec<Vec<f64>> = (0..5).map(|i| vec![i as f64, 2.0 + 3.0 * i as f64]).collect();
        rows_from(&["x", "y"], &data)
    }

    fn selection() -> VariableSelection {
        VariableSelection::new().dependent("y").independent("x")
    }

    #[test]
    fn test_simple_fit() {
        let fitted = OlsRegressor::default()
            .fit(&line_rows(), &selection())
            .expect("model should fit");
        let result = fitted.result();

        assert_eq!(result.coefficients[0].name, "(Intercept)");
        assert!((result.coefficients[0].value - 2.0).abs() < 1e-10);
        assert!((result.coefficients[1].value - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_predict() {
        let fitted = OlsRegressor::default()
            .fit(&line_rows(), &selection())
            .expect("model should fit");

        let mut new_rows = rows_from(&["x"], &[vec![10.0], vec![11.0]]);
        new_rows.push(Row::new());
        let preds = fitted.predict(&new_rows);

        assert!((preds[0].unwrap() - (2.0 + 3.0 * 10.0)).abs() < 1e-10);
        assert!((preds[1].unwrap() - (2.0 + 3.0 * 11.0)).abs() < 1e-10);
        assert!(preds[2].is_none());
    }

    #[test]
    fn test_invalid_options_rejected_at_fit() {
        let err = OlsRegressor::builder()
            .confidence_level(1.5)
            .build()
            .fit(&line_rows(), &selection())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_huge_regressor_is_not_singular() {
        let data: Vec<Vec<f64>> = (0..8)
            .map(|i| {
                let u = 1.0 + i as f64 + ((i * i) % 3) as f64;
                vec![1e160 * u, 2.0 + 3.0 * u + 0.1 * (i as f64).sin()]
            })
            .collect();
        let rows = rows_from(&["x", "y"], &data);

        let fitted = OlsRegressor::default()
            .fit(&rows, &selection())
            .expect("full-rank design");
        let slope = &fitted.result().coefficients[1];

        assert!((slope.value * 1e160 - 3.0).abs() < 0.1);
        assert!(slope.std_error.is_finite() && slope.std_error > 0.0);
    }

    #[test]
    fn test_xtx_inverse_matches_cross_product() {
        let data: Vec<Vec<f64>> = (0..8)
            .map(|i| {
                let x = i as f64;
                vec![x, (x * 0.7).sin(), 1.0 + 0.5 * x - (x * 0.7).sin()]
            })
            .collect();
        let rows = rows_from(&["x", "s", "y"], &data);
        let selection = VariableSelection::new()
            .dependent("y")
            .independent("x")
            .control("s");

        let regressor = OlsRegressor::default();
        let design =
            DesignMatrix::from_rows(&rows, &selection, "(Intercept)").expect("design builds");
        let solution = regressor
            .solve_normal_equations(&design)
            .expect("full rank");
        let xtx_inverse = solution.xtx_inverse.to_matrix();

        let x = &design.x;
        let p = x.ncols();
        for i in 0..p {
            for j in 0..p {
                let v: f64 = (0..p)
                    .map(|k| {
                        let xtx_ik: f64 = (0..x.nrows()).map(|r| x[(r, i)] * x[(r, k)]).sum();
                        xtx_ik * xtx_inverse[(k, j)]
                    })
                    .sum();
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((v - expected).abs() < 1e-8, "({}, {}) = {}", i, j, v);
            }
        }
    }
}
