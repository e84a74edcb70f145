//! Validation tests comparing results against R's `lm()`.
//!
//! Reference values were produced in R and are reproduced here with the
//! data the models were fit on.

mod common;

use approx::assert_relative_eq;
use tabular_ols::prelude::*;

// ============================================================================
// Dataset 1: Simple Linear Regression
// R: set.seed(42); n=20; x=1:20; y=2.5+3*x+rnorm(n,sd=0.5); lm(y~x)
// ============================================================================

fn dataset1() -> Vec<Row> {
    let x: Vec<f64> = (1..=20).map(|i| i as f64).collect();
    let y = vec![
        6.1854792236,
        8.2176509143,
        11.6815642057,
        14.8164313025,
        17.7021341616,
        20.4469377420,
        24.2557609987,
        26.4526704808,
        30.5092118569,
        32.4686429505,
        36.1524348271,
        39.6433226964,
        40.8055696494,
        44.3606056166,
        47.4333393318,
        50.8179751990,
        53.3578735393,
        55.1717722895,
        58.2797665357,
        63.1600566729,
    ];
    common::rows_from_columns(&[("x", x), ("y", y)])
}

#[test]
fn test_ols_simple_vs_r() {
    let selection = VariableSelection::new().dependent("y").independent("x");
    let result = perform_regression(&dataset1(), &selection).expect("fit should succeed");

    let intercept = result.intercept().expect("intercept is always present");
    let slope = result.coefficient("x").expect("x was selected");

    // R results - coefficients and R²
    assert_relative_eq!(intercept.value, 3.008845227701627, epsilon = 1e-7);
    assert_relative_eq!(slope.value, 2.960677598286641, epsilon = 1e-7);
    assert_relative_eq!(result.r_squared, 0.998773884764589, epsilon = 1e-8);

    // R results - standard errors
    assert_relative_eq!(intercept.std_error, 0.292895615787820, epsilon = 1e-6);
    assert_relative_eq!(slope.std_error, 0.024450453598427, epsilon = 1e-6);

    // R results - t-statistics
    assert_relative_eq!(intercept.t_statistic, 10.272756113499822, epsilon = 1e-4);
    assert_relative_eq!(slope.t_statistic, 121.088861863778604, epsilon = 1e-3);

    // R results - p-values
    // p_intercept = 5.893230752934917e-09
    // p_coefficient = 1.162241529734109e-27
    assert!(intercept.p_value < 1e-8, "p_intercept={}", intercept.p_value);
    assert!(slope.p_value < 1e-20, "p_coefficient={}", slope.p_value);

    // R results - F-statistic
    assert_relative_eq!(result.f_statistic, 14662.512467465243390, epsilon = 1.0);
    assert!(result.f_pvalue < 1e-20);

    // Residuals (first 5)
    let expected_residuals = [
        0.215956397585084,
        -0.712549509972986,
        -0.209313816892890,
        -0.035124318367676,
        -0.110099057564337,
    ];
    for (r, e) in result.residuals.iter().zip(expected_residuals) {
        assert_relative_eq!(*r, e, epsilon = 1e-7);
    }
}

#[test]
fn test_ols_aic_bic_loglik_vs_r() {
    let selection = VariableSelection::new().dependent("y").independent("x");
    let result = perform_regression(&dataset1(), &selection).expect("fit should succeed");

    // R: logLik(fit), AIC(fit), BIC(fit); k counts σ as a parameter
    assert_relative_eq!(
        result.log_likelihood.expect("RSS is positive"),
        -18.100905691064835,
        epsilon = 1e-6
    );
    assert_relative_eq!(result.aic.expect("RSS is positive"), 42.201811382129669, epsilon = 1e-6);
    assert_relative_eq!(result.bic.expect("RSS is positive"), 45.189008202791641, epsilon = 1e-6);
}

#[test]
fn test_ols_confidence_interval_vs_t_quantile() {
    let selection = VariableSelection::new().dependent("y").independent("x");
    let result = perform_regression(&dataset1(), &selection).expect("fit should succeed");

    // qt(0.975, 18) = 2.10092204024096
    let slope = result.coefficient("x").expect("x was selected");
    let margin = 2.10092204024096 * slope.std_error;
    assert_relative_eq!(slope.conf_interval.0, slope.value - margin, epsilon = 1e-8);
    assert_relative_eq!(slope.conf_interval.1, slope.value + margin, epsilon = 1e-8);
}

// ============================================================================
// Dataset 2: Multiple Regression
// ============================================================================

fn dataset2() -> Vec<Row> {
    let n = 50;
    let x1: Vec<f64> = (0..n).map(|i| i as f64 * 10.0 / 49.0).collect();
    let x2: Vec<f64> = x1.iter().map(|&xi| xi.sin() * 5.0).collect();
    let y = vec![
        0.6933614059,
        2.6668738795,
        7.5982714087,
        12.0597551133,
        15.4573682745,
        15.3951707407,
        17.3012019858,
        16.9425259175,
        19.6967157093,
        18.5061691466,
        18.9104712325,
        17.9136536085,
        16.5113175090,
        12.7371402652,
        11.4286818303,
        6.6096654232,
        4.8951811761,
        2.2585231899,
        -1.6745445167,
        -1.2782422556,
        -2.7444614582,
        -4.4448328918,
        -3.8921692186,
        -5.3363797508,
        -5.3148307360,
        -2.2387209175,
        -1.6320143238,
        2.9904234915,
        3.9165459002,
        8.1406939638,
        11.1661469337,
        13.5191982841,
        19.3106030748,
        21.6571384579,
        24.1117196144,
        26.9266912639,
        29.4859308494,
        30.5087316990,
        28.4438449201,
        32.1203208094,
        31.2475736825,
        30.9863749947,
        30.0269817818,
        29.0198069830,
        24.6912796697,
        24.2515193055,
        20.6665743461,
        18.7279376604,
        16.0723888706,
        13.5605614995,
    ];
    common::rows_from_columns(&[("x1", x1), ("x2", x2), ("y", y)])
}

#[test]
fn test_ols_multiple_vs_r() {
    let selection = VariableSelection::new()
        .dependent("y")
        .independent("x1")
        .independent("x2");
    let result = perform_regression(&dataset2(), &selection).expect("fit should succeed");

    // R results:
    // intercept = 0.586633340017646
    // coef1 = 2.078575906332045
    // coef2 = 3.022440472606421
    // r_squared = 0.992375515498879
    let values = result.coefficient_values();
    assert_relative_eq!(values[0], 0.586633340017646, epsilon = 1e-6);
    assert_relative_eq!(values[1], 2.078575906332045, epsilon = 1e-6);
    assert_relative_eq!(values[2], 3.022440472606421, epsilon = 1e-6);
    assert_relative_eq!(result.r_squared, 0.992375515498879, epsilon = 1e-6);
    assert_eq!(result.residual_df(), 47);
}

#[test]
fn test_control_role_does_not_change_estimates() {
    // lm(y ~ x1 + x2) does not distinguish independents from controls
    let as_independents = VariableSelection::new()
        .dependent("y")
        .independent("x1")
        .independent("x2");
    let with_control = VariableSelection::new()
        .dependent("y")
        .independent("x1")
        .control("x2");

    let rows = dataset2();
    let a = perform_regression(&rows, &as_independents).expect("fit should succeed");
    let b = perform_regression(&rows, &with_control).expect("fit should succeed");

    for (ca, cb) in a.coefficients.iter().zip(&b.coefficients) {
        assert_eq!(ca.name, cb.name);
        assert_relative_eq!(ca.value, cb.value, epsilon = 1e-12);
        assert_relative_eq!(ca.std_error, cb.std_error, epsilon = 1e-12);
    }
    assert_relative_eq!(a.f_statistic, b.f_statistic, epsilon = 1e-9);
}
