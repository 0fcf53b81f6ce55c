//! Error types for anomaly scoring operations.
//!
//! Only a handful of conditions are checked at runtime: the inner-dimension
//! rule of matrix multiplication, empty inputs to the robust statistics, and
//! the shape/content of model records and configuration. Everything else
//! (vector length agreement, output capacity, NaN inputs) is a caller contract.

use thiserror::Error;

/// Main error type for anomaly scoring operations.
#[derive(Error, Debug)]
pub enum DetectError {
    /// Matrix product requested with incompatible inner dimensions.
    #[error("Shape mismatch: left operand has {a_cols} columns but right operand has {b_rows} rows")]
    ShapeMismatch { a_cols: usize, b_rows: usize },

    /// Statistic requested over an empty buffer.
    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    /// Buffer length disagrees with its declared shape.
    #[error("Length mismatch: expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Model record failed validation.
    #[error("Invalid model '{name}': {reason}")]
    InvalidModel { name: String, reason: String },

    /// Configuration validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Model record could not be decoded.
    #[cfg(feature = "serde")]
    #[error("Model decoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for anomaly scoring operations.
pub type Result<T> = std::result::Result<T, DetectError>;

impl DetectError {
    /// Create a shape mismatch error.
    #[must_use]
    pub const fn shape_mismatch(a_cols: usize, b_rows: usize) -> Self {
        Self::ShapeMismatch { a_cols, b_rows }
    }

    /// Create an empty input error.
    #[must_use]
    pub const fn empty_input(context: &'static str) -> Self {
        Self::EmptyInput(context)
    }

    /// Create a length mismatch error.
    #[must_use]
    pub const fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::LengthMismatch { expected, actual }
    }

    /// Create an invalid model error.
    #[must_use]
    pub fn invalid_model(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidModel {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
