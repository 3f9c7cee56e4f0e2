//! Per-column lambda estimation
//!
//! [`PowerMethod`] is the closed set of supported transforms. Each variant
//! carries its fixed parameters by value, so a copy can be handed to every
//! worker without sharing state.

use super::likelihood::{box_cox_llf, yeo_johnson_llf};
use super::transforms::{box_cox, yeo_johnson};
use crate::error::{Result, SkewError};
use crate::optimizer::{brent_minimize, Bracket, BrentConfig};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default floor applied before Box-Cox.
pub const DEFAULT_MIN_VALUE: f64 = 1e-12;

/// Whether a Yeo-Johnson lambda falls outside the open interval `(0, 2)`.
fn outside_yeo_johnson_range(lambda: f64) -> bool {
    lambda <= 0.0 || lambda >= 2.0
}

/// Power transform variant and its fixed parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PowerMethod {
    /// Box-Cox on data floored at `min_value` (must be > 0)
    BoxCox { min_value: f64 },
    /// Yeo-Johnson, with `bracket` seeding the line search
    YeoJohnson { bracket: Bracket },
}

impl Default for PowerMethod {
    fn default() -> Self {
        PowerMethod::YeoJohnson {
            bracket: Bracket::default(),
        }
    }
}

impl PowerMethod {
    /// Box-Cox with the default floor
    pub fn box_cox() -> Self {
        PowerMethod::BoxCox {
            min_value: DEFAULT_MIN_VALUE,
        }
    }

    /// Yeo-Johnson with the default `(-2, 2)` bracket
    pub fn yeo_johnson() -> Self {
        PowerMethod::YeoJohnson {
            bracket: Bracket::default(),
        }
    }

    /// Name used in logs and error messages
    pub fn name(&self) -> &'static str {
        match self {
            PowerMethod::BoxCox { .. } => "BoxCoxTransformer",
            PowerMethod::YeoJohnson { .. } => "YeoJohnsonTransformer",
        }
    }

    /// Check the variant parameters
    pub fn validate(&self) -> Result<()> {
        match *self {
            PowerMethod::BoxCox { min_value } => {
                if !min_value.is_finite() || min_value <= 0.0 {
                    return Err(SkewError::InvalidParameter {
                        name: "min_value".to_string(),
                        value: min_value.to_string(),
                        reason: "must be finite and strictly positive".to_string(),
                    });
                }
                Ok(())
            }
            PowerMethod::YeoJohnson { bracket } => bracket.validate(),
        }
    }

    /// Estimate the lambda maximizing the normal log-likelihood of `values`.
    pub fn estimate(&self, values: &[f64]) -> Result<f64> {
        self.estimate_with(values, &BrentConfig::default())
    }

    /// [`estimate`](Self::estimate) with explicit line-search settings.
    pub fn estimate_with(&self, values: &[f64], config: &BrentConfig) -> Result<f64> {
        match *self {
            PowerMethod::BoxCox { min_value } => {
                let floored: Vec<f64> = values.iter().map(|&v| v.max(min_value)).collect();
                let result = brent_minimize(
                    |lambda| -box_cox_llf(&floored, lambda),
                    Bracket::default(),
                    config,
                )?;
                Ok(result.x)
            }
            PowerMethod::YeoJohnson { bracket } => {
                let result =
                    brent_minimize(|lambda| -yeo_johnson_llf(values, lambda), bracket, config)?;
                if outside_yeo_johnson_range(result.x) {
                    warn!(lambda = result.x, "Yeo-Johnson lambda outside (0, 2), left unclamped");
                }
                Ok(result.x)
            }
        }
    }

    /// Apply the forward transform with a fixed lambda, returning a new column.
    pub fn apply(&self, values: &[f64], lambda: f64) -> Vec<f64> {
        match *self {
            PowerMethod::BoxCox { min_value } => box_cox(values, lambda, min_value),
            PowerMethod::YeoJohnson { .. } => yeo_johnson(values, lambda),
        }
    }
}
