//! Error types for texpack-transform

use thiserror::Error;

/// Errors that can occur during geometric transformations
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] texpack_core::Error),

    /// Invalid target size
    #[error("invalid target size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
