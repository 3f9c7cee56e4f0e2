//! Error types for the skewness transformers

use thiserror::Error;

/// Result type alias for skewness operations
pub type Result<T> = std::result::Result<T, SkewError>;

/// Main error type for fitting and applying power transforms
#[derive(Error, Debug)]
pub enum SkewError {
    /// Input cannot be read as a table, or explicit columns were given for a non-table input
    #[error("Structural error: {0}")]
    StructuralError(String),

    /// A requested or fit-time column is absent from the table
    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("{transformer} requires at least {required} samples, got {got}")]
    InsufficientData {
        transformer: String,
        required: usize,
        got: usize,
    },

    #[error("Non-finite value in column '{0}'")]
    NonFiniteValue(String),

    #[error("Model not fitted")]
    ModelNotFitted,

    /// The likelihood was non-finite everywhere the line search looked
    #[error("Estimation degenerate: {0}")]
    EstimationDegeneracy(String),

    #[error("Convergence failed after {iterations} iterations")]
    ConvergenceError { iterations: usize },

    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Thread pool error: {0}")]
    ThreadPoolError(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl SkewError {
    /// Attach a column name to estimation failures raised by a per-column worker.
    pub(crate) fn in_column(self, column: &str) -> Self {
        match self {
            SkewError::EstimationDegeneracy(reason) => {
                SkewError::EstimationDegeneracy(format!("column '{}': {}", column, reason))
            }
            other => other,
        }
    }
}

impl From<polars::error::PolarsError> for SkewError {
    fn from(err: polars::error::PolarsError) -> Self {
        SkewError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for SkewError {
    fn from(err: serde_json::Error) -> Self {
        SkewError::SerializationError(err.to_string())
    }
}
