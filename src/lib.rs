//! Kolosal Skew - Power transforms for skewed tabular features
//!
//! This crate estimates and applies per-column Box-Cox and Yeo-Johnson
//! transforms:
//! - Maximum-likelihood lambda estimation with a bracketed Brent search
//! - Fit/transform orchestration over frames, matrices, and row records
//! - Parallel per-column estimation
//!
//! # Modules
//!
//! - [`preprocessing`] - Transform formulas, likelihoods, and the transformer
//! - [`optimizer`] - Univariate bracket and Brent line search
//! - [`utils`] - File loading and worker pool helpers
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use kolosal_skew::prelude::*;
//! use polars::prelude::*;
//!
//! let df = df!("income" => &[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
//! let mut transformer = PowerTransformer::box_cox();
//! let out = transformer.fit_transform(&df).unwrap();
//! println!("{:?}", transformer.lambdas());
//! # let _ = out;
//! ```

// Core error handling
pub mod error;

// Transforms and estimation
pub mod preprocessing;
pub mod optimizer;

// Utilities
pub mod utils;

// Services
pub mod cli;

pub use error::{SkewError, Result};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{SkewError, Result};

    // Preprocessing
    pub use crate::preprocessing::{
        FittedPowerModel, PowerMethod, PowerTransformConfig, PowerTransformer, TableInput,
        TransformOutput,
    };

    // Optimization
    pub use crate::optimizer::Bracket;
}
