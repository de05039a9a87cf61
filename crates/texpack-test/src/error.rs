//! Error types for the test helpers

use thiserror::Error;

/// Errors that can occur while preparing or checking regression fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to write a fixture image
    #[error("failed to write image '{path}': {message}")]
    ImageWrite { path: String, message: String },

    /// Failed to create a scratch directory
    #[error("failed to create directory '{path}': {message}")]
    DirectoryCreate { path: String, message: String },

    /// Core container error while building a fixture
    #[error("core error: {0}")]
    Core(#[from] texpack_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for test helper operations
pub type TestResult<T> = Result<T, TestError>;
