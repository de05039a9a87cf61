//! Image header reading
//!
//! Provides metadata extraction from image files without decoding pixel data.
//! The size reconciler uses this to compare channel sources before paying
//! for a full decode.

use crate::format::{ImageFormat, detect_format_from_bytes};
use crate::{IoError, IoResult};
use std::fs;
use std::path::Path;

/// Image metadata read without decoding pixel data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHeader {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Bits per channel as stored in the file
    pub bits_per_channel: u32,
    /// Channels per pixel (1 for grayscale, 3 for RGB, 4 for RGBA)
    pub channels: u32,
    /// Detected container format
    pub format: ImageFormat,
}

impl ImageHeader {
    /// `(width, height)`
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Bits per pixel (`bits_per_channel * channels`)
    pub fn bits_per_pixel(&self) -> u32 {
        self.bits_per_channel * self.channels
    }
}

/// Read image metadata from a file without decoding pixel data.
pub fn read_image_header<P: AsRef<Path>>(path: P) -> IoResult<ImageHeader> {
    let data = fs::read(path)?;
    read_image_header_mem(&data)
}

/// Read image metadata from bytes without decoding pixel data
pub fn read_image_header_mem(data: &[u8]) -> IoResult<ImageHeader> {
    let format = detect_format_from_bytes(data)?;
    read_header_for_format(data, format)
}

fn read_header_for_format(data: &[u8], format: ImageFormat) -> IoResult<ImageHeader> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => crate::png::read_header_png(data),

        #[cfg(feature = "dds-format")]
        ImageFormat::Dds => crate::dds::read_header_dds(data),

        #[allow(unreachable_patterns)]
        _ => Err(IoError::UnsupportedFormat(format!(
            "{} header probing not enabled",
            format.extension()
        ))),
    }
}
