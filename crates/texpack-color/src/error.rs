//! Error types for texpack-color

use thiserror::Error;

/// Errors that can occur during color processing operations
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] texpack_core::Error),

    /// Invalid color value
    #[error("invalid color value: {0}")]
    InvalidColorValue(String),
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
