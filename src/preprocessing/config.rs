//! Power transform configuration

use super::estimator::PowerMethod;
use crate::error::{Result, SkewError};
use crate::optimizer::Bracket;
use serde::{Deserialize, Serialize};

/// Configuration for a skewness transformer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerTransformConfig {
    /// Columns to fit and transform. `None` selects every numeric column.
    pub columns: Option<Vec<String>>,

    /// Number of parallel estimation jobs.
    /// `1` runs sequentially, `-1` uses every available thread,
    /// lower negatives use `threads + 1 + n_jobs`.
    pub n_jobs: i32,

    /// Return a labelled frame from `transform` (otherwise a bare matrix)
    pub as_df: bool,

    /// Transform variant and its parameters
    pub method: PowerMethod,
}

impl Default for PowerTransformConfig {
    fn default() -> Self {
        Self {
            columns: None,
            n_jobs: 1,
            as_df: true,
            method: PowerMethod::default(),
        }
    }
}

impl PowerTransformConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Default Box-Cox configuration (`min_value = 1e-12`)
    pub fn box_cox() -> Self {
        Self::default().with_method(PowerMethod::box_cox())
    }

    /// Default Yeo-Johnson configuration (bracket `(-2, 2)`)
    pub fn yeo_johnson() -> Self {
        Self::default().with_method(PowerMethod::yeo_johnson())
    }

    /// Load a configuration from a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Builder method to restrict the transformed columns
    pub fn with_columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Builder method to set the number of jobs
    pub fn with_n_jobs(mut self, n_jobs: i32) -> Self {
        self.n_jobs = n_jobs;
        self
    }

    /// Builder method to choose frame or matrix output
    pub fn with_as_df(mut self, as_df: bool) -> Self {
        self.as_df = as_df;
        self
    }

    /// Builder method to set the transform variant
    pub fn with_method(mut self, method: PowerMethod) -> Self {
        self.method = method;
        self
    }

    /// Builder method to set the Box-Cox floor
    pub fn with_min_value(mut self, min_value: f64) -> Self {
        self.method = PowerMethod::BoxCox { min_value };
        self
    }

    /// Builder method to set the Yeo-Johnson search bracket
    pub fn with_bracket(mut self, bracket: Bracket) -> Self {
        self.method = PowerMethod::YeoJohnson { bracket };
        self
    }

    /// Check parameter values
    pub fn validate(&self) -> Result<()> {
        if self.n_jobs == 0 {
            return Err(SkewError::InvalidParameter {
                name: "n_jobs".to_string(),
                value: "0".to_string(),
                reason: "must be non-zero".to_string(),
            });
        }
        self.method.validate()
    }
}
