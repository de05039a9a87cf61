//! Image format identification
//!
//! Two independent checks live here:
//!
//! - the extension allow-list that decides whether a path is accepted at
//!   all (no content sniffing), and
//! - magic-number detection that picks the decoder for accepted files.

use crate::{IoError, IoResult};
use std::path::Path;

/// Magic numbers for image format detection
mod magic {
    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// DDS: "DDS "
    pub const DDS: &[u8] = b"DDS ";
}

/// Supported container formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Lossless RGBA raster
    Png,
    /// DirectDraw Surface compressed texture container (read only)
    Dds,
}

impl ImageFormat {
    /// Every accepted format, in allow-list order.
    pub const SUPPORTED: [ImageFormat; 2] = [ImageFormat::Png, ImageFormat::Dds];

    /// Get the file extension for this format (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Dds => "dds",
        }
    }

    /// Match an extension against the allow-list, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::SUPPORTED
            .into_iter()
            .find(|f| f.extension().eq_ignore_ascii_case(ext))
    }

    /// Format implied by a path's extension, if it is on the allow-list.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Whether this format can be written.
    pub fn can_encode(self) -> bool {
        matches!(self, Self::Png)
    }
}

/// True if the path's extension is on the allow-list.
pub fn is_supported_path<P: AsRef<Path>>(path: P) -> bool {
    ImageFormat::from_path(path).is_some()
}

/// Comma-separated allow-list, e.g. for error messages (".png, .dds").
pub fn supported_extensions() -> String {
    ImageFormat::SUPPORTED
        .iter()
        .map(|f| format!(".{}", f.extension()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Detect image format from bytes
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 4 {
        return Err(IoError::InvalidData(
            "not enough data to detect format".to_string(),
        ));
    }

    if data.starts_with(magic::DDS) {
        return Ok(ImageFormat::Dds);
    }

    // PNG needs 8 bytes
    if data.len() >= 8 && data.starts_with(magic::PNG) {
        return Ok(ImageFormat::Png);
    }

    Err(IoError::UnsupportedFormat(
        "unknown image format".to_string(),
    ))
}
