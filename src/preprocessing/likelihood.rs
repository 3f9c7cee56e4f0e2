//! Normal log-likelihood objectives for lambda estimation
//!
//! Both functions return `NaN` when the transformed data has zero variance,
//! which the line search treats as strictly worse than any finite score.

use super::transforms::{box_cox_value, yeo_johnson, ZERO};

/// Population variance (divides by `n`).
fn population_variance(values: &[f64]) -> f64 {
    // identical values: the mean may not round back to them exactly
    if values.windows(2).all(|w| w[0] == w[1]) {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2) / n).sum()
}

/// Shift every element up by `|min| + 1` when the minimum is below `ZERO`.
fn shift_positive(values: &mut [f64]) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    if min < ZERO {
        let shift = min.abs() + 1.0;
        values.iter_mut().for_each(|v| *v += shift);
    }
}

/// Yeo-Johnson log-likelihood of `data` under `lambda`.
///
/// `llf = (λ - 1) · Σ ln(data') - (n / 2) · ln(var(y'))` where `y` is the
/// transformed column and `'` marks the positivity shift, applied
/// independently to `data` and `y`. The shift only keeps the logarithm
/// defined; the caller's data is left as is.
pub fn yeo_johnson_llf(data: &[f64], lambda: f64) -> f64 {
    let n = data.len();
    if n == 0 {
        return f64::NAN;
    }

    let mut y = yeo_johnson(data, lambda);
    let mut shifted = data.to_vec();
    shift_positive(&mut shifted);
    shift_positive(&mut y);

    let var = population_variance(&y);
    if var == 0.0 {
        return f64::NAN;
    }

    let log_sum: f64 = shifted.iter().map(|v| v.ln()).sum();
    (lambda - 1.0) * log_sum - n as f64 / 2.0 * var.ln()
}

/// Box-Cox log-likelihood of strictly positive `data` under `lambda`.
///
/// `llf = (λ - 1) · Σ ln(y) - (n / 2) · ln(var(bc(y, λ)))`. Lambda values
/// within `ZERO` of zero (either sign) use the logarithm.
pub fn box_cox_llf(data: &[f64], lambda: f64) -> f64 {
    let n = data.len();
    if n == 0 {
        return f64::NAN;
    }

    let transformed: Vec<f64> = if lambda.abs() > ZERO {
        data.iter().map(|&y| (y.powf(lambda) - 1.0) / lambda).collect()
    } else {
        data.iter().map(|&y| box_cox_value(y, 0.0)).collect()
    };

    let var = population_variance(&transformed);
    if var == 0.0 {
        return f64::NAN;
    }

    let log_sum: f64 = data.iter().map(|y| y.ln()).sum();
    (lambda - 1.0) * log_sum - n as f64 / 2.0 * var.ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_data_is_not_comparable() {
        assert!(yeo_johnson_llf(&[3.0, 3.0, 3.0], 0.5).is_nan());
        assert!(box_cox_llf(&[2.0, 2.0], 1.0).is_nan());
    }

    #[test]
    fn test_yeo_johnson_llf_lambda_one() {
        // λ = 1 leaves the data alone and cancels the log term.
        let data = [1.0, 2.0, 3.0, 4.0];
        let expected = -2.0 * 1.25_f64.ln();
        assert!((yeo_johnson_llf(&data, 1.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_yeo_johnson_llf_shift_is_local() {
        let data = vec![-4.0, -1.0, 0.0, 2.0, 9.0];
        let copy = data.clone();
        let llf = yeo_johnson_llf(&data, 0.7);
        assert!(llf.is_finite());
        assert_eq!(data, copy);
    }

    #[test]
    fn test_yeo_johnson_llf_matches_manual_shift() {
        let data = [-2.0, 0.0, 1.0, 5.0];
        let lambda = 0.5;

        let mut y = yeo_johnson(&data, lambda);
        let y_min = y.iter().copied().fold(f64::INFINITY, f64::min);
        y.iter_mut().for_each(|v| *v += y_min.abs() + 1.0);
        let n = 4.0;
        let mean = y.iter().sum::<f64>() / n;
        let var = y.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let log_sum: f64 = data.iter().map(|d| (d + 3.0_f64).ln()).sum();
        let expected = (lambda - 1.0) * log_sum - n / 2.0 * var.ln();

        assert!((yeo_johnson_llf(&data, lambda) - expected).abs() < 1e-10);
    }

    #[test]
    fn test_box_cox_llf_continuous_through_zero() {
        let data = [1.0, 2.0, 5.0, 11.0, 30.0];
        let at_zero = box_cox_llf(&data, 0.0);
        let near_zero = box_cox_llf(&data, 1e-9);
        let below_zero = box_cox_llf(&data, -1e-9);
        assert!((at_zero - near_zero).abs() < 1e-6);
        assert!((at_zero - below_zero).abs() < 1e-6);
    }

    #[test]
    fn test_box_cox_llf_prefers_log_for_lognormal_shape() {
        let data: Vec<f64> = (1..=10).map(|i| (i as f64).exp()).collect();
        assert!(box_cox_llf(&data, 0.0) > box_cox_llf(&data, 1.0));
    }
}
