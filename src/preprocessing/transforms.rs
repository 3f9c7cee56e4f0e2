//! Piecewise power transforms
//!
//! Element-wise Box-Cox and Yeo-Johnson mappings for a fixed lambda.
//! Every function returns a new vector; inputs are never modified.

/// Threshold below which lambda is treated as zero.
///
/// Shared by estimation and transformation so both pick the same branch.
pub const ZERO: f64 = 1e-16;

/// Box-Cox transform of a single value already floored to be positive.
#[inline]
pub fn box_cox_value(y: f64, lambda: f64) -> f64 {
    if lambda > ZERO {
        (y.powf(lambda) - 1.0) / lambda
    } else {
        y.ln()
    }
}

/// Box-Cox transform with every value floored at `min_value`.
///
/// `(y^λ - 1) / λ` when `λ > ZERO`, otherwise `ln(y)`.
pub fn box_cox(values: &[f64], lambda: f64, min_value: f64) -> Vec<f64> {
    values
        .iter()
        .map(|&v| box_cox_value(v.max(min_value), lambda))
        .collect()
}

/// Yeo-Johnson transform of a single value.
#[inline]
pub fn yeo_johnson_value(x: f64, lambda: f64) -> f64 {
    if x >= 0.0 {
        if lambda > ZERO {
            ((x + 1.0).powf(lambda) - 1.0) / lambda
        } else {
            (x + 1.0).ln()
        }
    } else if lambda != 2.0 {
        let two_min_lam = 2.0 - lambda;
        -((-x + 1.0).powf(two_min_lam) - 1.0) / two_min_lam
    } else {
        -(-x + 1.0).ln()
    }
}

/// Yeo-Johnson transform of a column.
///
/// | condition            | result                          |
/// |----------------------|---------------------------------|
/// | `x >= 0`, `λ > ZERO` | `((x+1)^λ - 1) / λ`             |
/// | `x >= 0`, `λ <= ZERO`| `ln(x+1)`                       |
/// | `x < 0`, `λ != 2`    | `-((-x+1)^(2-λ) - 1) / (2-λ)`   |
/// | `x < 0`, `λ == 2`    | `-ln(-x+1)`                     |
pub fn yeo_johnson(values: &[f64], lambda: f64) -> Vec<f64> {
    values.iter().map(|&x| yeo_johnson_value(x, lambda)).collect()
}
