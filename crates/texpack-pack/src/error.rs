//! Error types for texpack-pack
//!
//! Single-image operations fail fast with the first `PackError`; only the
//! batch runner turns errors into per-item results.

use std::path::PathBuf;
use texpack_core::ChannelId;
use texpack_io::IoError;
use thiserror::Error;

/// Errors that can occur while packing or unpacking channels
#[derive(Debug, Error)]
pub enum PackError {
    /// Every channel slot was empty
    #[error("no input images provided for channel packing")]
    NoSourcesProvided,

    /// A present source disagrees with the largest source's resolution
    #[error(
        "size mismatch: {offending_name} ({}x{}) vs expected {}x{} from {reference_name}",
        .offending_size.0, .offending_size.1, .expected_size.0, .expected_size.1
    )]
    SizeMismatch {
        offending_name: String,
        offending_size: (u32, u32),
        expected_size: (u32, u32),
        reference_name: String,
    },

    /// A source could not be opened or decoded
    #[error("cannot load {}: {cause}", .path.display())]
    SourceLoad {
        path: PathBuf,
        #[source]
        cause: IoError,
    },

    /// Bit-depth selector outside {8, 16, 24, 32}
    #[error("unsupported bit depth: {value} (expected 8, 16, 24 or 32)")]
    UnsupportedBitDepth { value: u32 },

    /// File extension is not on the allow-list
    #[error(
        "unsupported image format: {} (supported: {})",
        .path.display(),
        texpack_io::supported_extensions()
    )]
    UnsupportedFormat { path: PathBuf },

    /// Borrow from a channel that holds no image
    #[error("channel {channel} has no image set")]
    EmptyChannel { channel: ChannelId },

    /// Batch started with an empty input list
    #[error("no image paths provided for batch unpacking")]
    NoInputs,

    /// Save requested before any merged image was created
    #[error("no merged image to save")]
    NothingComposed,

    /// Unpack requested before any image was loaded
    #[error("no image loaded to unpack")]
    NothingLoaded,

    /// Save requested before any channels were unpacked
    #[error("no channels to save")]
    NothingUnpacked,

    /// Persisting an output file failed
    #[error("failed to write {}: {cause}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        cause: IoError,
    },

    /// Invalid solid color
    #[error(transparent)]
    Color(#[from] texpack_color::ColorError),

    /// Resampling failed
    #[error(transparent)]
    Transform(#[from] texpack_transform::TransformError),

    /// Pixel container error
    #[error("core error: {0}")]
    Core(#[source] texpack_core::Error),

    /// Directory creation or other file system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<texpack_core::Error> for PackError {
    fn from(err: texpack_core::Error) -> Self {
        match err {
            texpack_core::Error::UnsupportedBitDepth(value) => {
                PackError::UnsupportedBitDepth { value }
            }
            other => PackError::Core(other),
        }
    }
}

/// Result type for pack operations
pub type PackResult<T> = Result<T, PackError>;
