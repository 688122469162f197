//! Error types for stroke recording.

use thiserror::Error;

/// Errors raised while opening or extending a stroke.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DrawError {
    #[error("Invalid stroke config: {0}")]
    InvalidStrokeConfig(String),
    #[error("Non-finite point ({x}, {y})")]
    NonFinitePoint { x: f64, y: f64 },
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Result type for drawing operations.
pub type DrawResult<T> = Result<T, DrawError>;
