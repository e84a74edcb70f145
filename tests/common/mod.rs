//! Common test utilities and data generators.

#![allow(dead_code)]

use tabular_ols::{CellValue, Row, VariableSelection};

/// Build rows from named numeric columns of equal length.
pub fn rows_from_columns(columns: &[(&str, Vec<f64>)]) -> Vec<Row> {
    let n = columns.first().map_or(0, |(_, v)| v.len());
    (0..n)
        .map(|i| {
            columns
                .iter()
                .map(|(name, values)| (name.to_string(), CellValue::from(values[i])))
                .collect()
        })
        .collect()
}

/// Generate linear data: y = intercept + Σ (j+1)·x_j + noise.
///
/// Columns are named `x0`, `x1`, ... and `y`. Returns the rows, the selection
/// (all features independent) and the true slopes.
pub fn generate_linear_rows(
    n_samples: usize,
    n_features: usize,
    intercept: f64,
    noise_std: f64,
    seed: u64,
) -> (Vec<Row>, VariableSelection, Vec<f64>) {
    // Simple deterministic "random" for reproducibility
    let mut rng_state = seed;
    let mut next_rand = || -> f64 {
        rng_state = rng_state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1);
        ((rng_state >> 33) as f64) / (u32::MAX as f64) * 2.0 - 1.0
    };

    let true_coefficients: Vec<f64> = (0..n_features).map(|j| (j + 1) as f64).collect();
    let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(n_samples); n_features];
    let mut y = Vec::with_capacity(n_samples);

    for _ in 0..n_samples {
        let mut yi = intercept;
        for j in 0..n_features {
            let xij = next_rand();
            columns[j].push(xij);
            yi += xij * true_coefficients[j];
        }
        yi += noise_std * next_rand();
        y.push(yi);
    }

    let names: Vec<String> = (0..n_features).map(|j| format!("x{}", j)).collect();
    let mut named: Vec<(&str, Vec<f64>)> = names
        .iter()
        .map(String::as_str)
        .zip(columns)
        .collect();
    named.push(("y", y));

    let selection = names
        .iter()
        .fold(VariableSelection::new().dependent("y"), |s, name| {
            s.independent(name.as_str())
        });

    (rows_from_columns(&named), selection, true_coefficients)
}

/// Rows where control `c` is exactly twice independent `x`.
pub fn generate_collinear_rows(n_samples: usize) -> Vec<Row> {
    let x: Vec<f64> = (0..n_samples).map(|i| i as f64).collect();
    let c: Vec<f64> = x.iter().map(|v| 2.0 * v).collect();
    let y: Vec<f64> = x.iter().map(|v| 1.0 + 2.0 * v + (v * v) * 0.1).collect();
    rows_from_columns(&[("x", x), ("c", c), ("y", y)])
}

/// Approximate equality check for floating point values.
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}
