//! Skewness preprocessing module
//!
//! Provides per-feature power transforms that pull skewed numeric columns
//! towards a Gaussian shape:
//! - Box-Cox (strictly positive data, enforced with a floor)
//! - Yeo-Johnson (any real data)
//!
//! Lambdas are estimated per column by maximum likelihood and stored in a
//! [`FittedPowerModel`] that `transform` applies.

mod config;
mod estimator;
mod skewness;
pub mod likelihood;
pub mod transforms;
pub mod validation;

pub use config::PowerTransformConfig;
pub use estimator::{PowerMethod, DEFAULT_MIN_VALUE};
pub use skewness::{FittedPowerModel, PowerTransformer, TransformOutput};
pub use transforms::{box_cox, yeo_johnson, ZERO};
pub use validation::TableInput;
