//! Matrix utility functions.

use faer::{Col, Mat};

/// Largest absolute value, or 0 for an empty slice.
pub fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |m, v| m.max(v.abs()))
}

/// Sum of squares as `(scale, ssq)` with Σv² = scale²·ssq.
///
/// Values are divided by their largest magnitude before squaring, so finite
/// inputs never overflow even when Σv² itself is beyond `f64`. An all-zero
/// input gives `(0.0, 0.0)`.
pub fn scaled_sum_of_squares(values: &[f64]) -> (f64, f64) {
    let scale = max_abs(values);
    if scale == 0.0 {
        return (0.0, 0.0);
    }
    let ssq = values.iter().map(|v| (v / scale).powi(2)).sum();
    (scale, ssq)
}

/// Euclidean norm of each column, computed without overflow.
pub fn column_norms(x: &Mat<f64>) -> Vec<f64> {
    (0..x.ncols())
        .map(|j| {
            let column: Vec<f64> = (0..x.nrows()).map(|i| x[(i, j)]).collect();
            let (scale, ssq) = scaled_sum_of_squares(&column);
            scale * ssq.sqrt()
        })
        .collect()
}

/// Triangular factor of the column-equilibrated design.
#[derive(Debug, Clone)]
pub struct ScaledFactor {
    /// The equilibrated design X·D⁻¹.
    pub unit: Mat<f64>,
    /// Upper-triangular R (p × p) of X·D⁻¹ = Q·R.
    pub r: Mat<f64>,
    /// Column norms D used for equilibration.
    pub scale: Vec<f64>,
}

impl ScaledFactor {
    /// (X'X)⁻¹ = D⁻¹·R⁻¹·R⁻ᵀ·D⁻¹, kept in equilibrated form.
    pub fn inverse(&self) -> ScaledInverse {
        let p = self.r.ncols();
        let r_inv = invert_upper(&self.r);
        let inner = Mat::from_fn(p, p, |i, j| {
            (i.max(j)..p).map(|k| r_inv[(i, k)] * r_inv[(j, k)]).sum::<f64>()
        });
        ScaledInverse {
            inner,
            scale: self.scale.clone(),
        }
    }
}

/// (X'X)⁻¹ stored as D⁻¹·C·D⁻¹ with C = R⁻¹·R⁻ᵀ.
///
/// C is well scaled whatever the magnitude of the data, so variances are
/// read off it without forming entries of (X'X)⁻¹ that could underflow.
#[derive(Debug, Clone)]
pub struct ScaledInverse {
    /// C = R⁻¹·R⁻ᵀ of the unit-norm design.
    pub inner: Mat<f64>,
    /// Column norms D.
    pub scale: Vec<f64>,
}

impl ScaledInverse {
    /// sqrt((X'X)⁻¹ⱼⱼ) for every column.
    pub fn diagonal_sqrt(&self) -> Vec<f64> {
        self.scale
            .iter()
            .enumerate()
            .map(|(j, d)| self.inner[(j, j)].max(0.0).sqrt() / d)
            .collect()
    }

    /// Leverage x₀'(X'X)⁻¹x₀ of a design row.
    pub fn leverage(&self, x0: &[f64]) -> f64 {
        let scaled: Vec<f64> = x0.iter().zip(&self.scale).map(|(v, d)| v / d).collect();
        quadratic_form(&self.inner, &scaled)
    }

    /// The full (X'X)⁻¹. Entries may underflow for extremely large columns.
    pub fn to_matrix(&self) -> Mat<f64> {
        let p = self.inner.nrows();
        Mat::from_fn(p, p, |i, j| {
            self.inner[(i, j)] / self.scale[i] / self.scale[j]
        })
    }
}

/// Factor `x` after scaling every column to unit norm.
///
/// With unit columns, |R_kk| is the distance of column k from the span of
/// columns 0..k, so a small diagonal entry pins down the first column that is
/// (numerically) a combination of the columns before it.
///
/// # Errors
/// Returns the index of the first column that is all zeros or whose |R_kk|
/// is at most `tolerance` times the largest diagonal entry.
pub fn scaled_factor(x: &Mat<f64>, tolerance: f64) -> Result<ScaledFactor, usize> {
    let n_cols = x.ncols();
    let scale = column_norms(x);

    if let Some(j) = scale.iter().position(|&s| !(s.is_finite() && s > 0.0)) {
        return Err(j);
    }

    let x_scaled = Mat::from_fn(x.nrows(), n_cols, |i, j| x[(i, j)] / scale[j]);
    let qr = x_scaled.qr();
    let r_full = qr.R();

    let r = Mat::from_fn(n_cols, n_cols, |i, j| if i <= j { r_full[(i, j)] } else { 0.0 });

    let max_diag = (0..n_cols).map(|k| r[(k, k)].abs()).fold(0.0_f64, f64::max);
    for k in 0..n_cols {
        let d = r[(k, k)].abs();
        if !d.is_finite() || d <= tolerance * max_diag {
            return Err(k);
        }
    }

    Ok(ScaledFactor {
        unit: x_scaled,
        r,
        scale,
    })
}

/// Solve R·x = b for upper-triangular R by back-substitution.
pub fn solve_upper(r: &Mat<f64>, b: &Col<f64>) -> Col<f64> {
    let n = r.nrows();
    let mut x = Col::zeros(n);
    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in (i + 1)..n {
            sum -= r[(i, j)] * x[j];
        }
        x[i] = sum / r[(i, i)];
    }
    x
}

/// Solve R'·x = b for upper-triangular R by forward substitution.
pub fn solve_upper_transpose(r: &Mat<f64>, b: &Col<f64>) -> Col<f64> {
    let n = r.nrows();
    let mut x = Col::zeros(n);
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= r[(j, i)] * x[j];
        }
        x[i] = sum / r[(i, i)];
    }
    x
}

/// Inverse of an upper-triangular matrix.
pub fn invert_upper(r: &Mat<f64>) -> Mat<f64> {
    let n = r.nrows();
    let mut inv = Mat::zeros(n, n);

    // Solve R * X = I column by column
    for col in 0..n {
        for i in (0..=col).rev() {
            let mut sum = if i == col { 1.0 } else { 0.0 };
            for j in (i + 1)..=col {
                sum -= r[(i, j)] * inv[(j, col)];
            }
            inv[(i, col)] = sum / r[(i, i)];
        }
    }

    inv
}

/// X'·v.
pub fn transpose_times(x: &Mat<f64>, v: &Col<f64>) -> Col<f64> {
    Col::from_fn(x.ncols(), |j| (0..x.nrows()).map(|i| x[(i, j)] * v[i]).sum())
}

/// X·b.
pub fn times(x: &Mat<f64>, b: &Col<f64>) -> Col<f64> {
    Col::from_fn(x.nrows(), |i| (0..x.ncols()).map(|j| x[(i, j)] * b[j]).sum())
}

/// Quadratic form v'·A·v.
pub fn quadratic_form(a: &Mat<f64>, v: &[f64]) -> f64 {
    let n = v.len();
    let mut h = 0.0;
    for i in 0..n {
        for j in 0..n {
            h += v[i] * a[(i, j)] * v[j];
        }
    }
    h
}

/// Check whether all values equal the first within a tolerance relative to
/// max(1, |first|).
pub fn is_constant(values: &Col<f64>, tolerance: f64) -> bool {
    let n = values.nrows();
    if n == 0 {
        return true;
    }
    let first = values[0];
    let bound = tolerance * first.abs().max(1.0);
    (1..n).all(|i| (values[i] - first).abs() <= bound)
}
