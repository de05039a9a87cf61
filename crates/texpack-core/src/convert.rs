//! Output format conversion
//!
//! Re-quantizes a composed RGBA raster to one of the fixed output targets
//! selected by a bit-depth value:
//!
//! | Selector | Layout | Bits per channel |
//! |---|---|---|
//! | 8  | RGB, alpha dropped | 8 |
//! | 16 | single gray plane  | 16 |
//! | 24 | RGB, alpha dropped | 8 |
//! | 32 | RGBA               | 8 |
//!
//! `8` and `24` produce identical pixels; both labels are kept because the
//! front end offers them as distinct choices.
//!
//! No precision is invented: the 16-bit target stores the 8-bit luminance
//! value unchanged in a 16-bit container.

use crate::error::{Error, Result};
use crate::plane::Plane;
use crate::raster::Raster;
use crate::{ChannelId, color};

/// Output bit-depth selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// 3-channel, 8 bits per channel
    Bpp8,
    /// 1-channel, 16-bit grayscale
    Bpp16,
    /// 3-channel, 8 bits per channel (same pixels as `Bpp8`)
    Bpp24,
    /// 4-channel, 8 bits per channel
    Bpp32,
}

impl BitDepth {
    /// All selectors in user-facing order.
    pub const ALL: [BitDepth; 4] = [
        BitDepth::Bpp8,
        BitDepth::Bpp16,
        BitDepth::Bpp24,
        BitDepth::Bpp32,
    ];

    /// Create a selector from its numeric label.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedBitDepth`] unless `bits` is 8, 16, 24 or 32.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            8 => Ok(BitDepth::Bpp8),
            16 => Ok(BitDepth::Bpp16),
            24 => Ok(BitDepth::Bpp24),
            32 => Ok(BitDepth::Bpp32),
            _ => Err(Error::UnsupportedBitDepth(bits)),
        }
    }

    /// Numeric label of this selector.
    pub fn bits(self) -> u32 {
        match self {
            BitDepth::Bpp8 => 8,
            BitDepth::Bpp16 => 16,
            BitDepth::Bpp24 => 24,
            BitDepth::Bpp32 => 32,
        }
    }

    /// Bits per channel of the produced image.
    pub fn bits_per_channel(self) -> u32 {
        match self {
            BitDepth::Bpp16 => 16,
            _ => 8,
        }
    }

    /// Channels in the produced image.
    pub fn channels(self) -> u32 {
        match self {
            BitDepth::Bpp8 | BitDepth::Bpp24 => 3,
            BitDepth::Bpp16 => 1,
            BitDepth::Bpp32 => 4,
        }
    }

    /// True if converting a source with `source_bits_per_channel` to this
    /// target stores fewer bits per channel than the source had.
    ///
    /// The converter never refuses such a conversion; callers use this to
    /// warn.
    pub fn is_precision_loss(self, source_bits_per_channel: u32) -> bool {
        self.bits_per_channel() < source_bits_per_channel
    }
}

/// A composed image re-quantized to an output layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertedImage {
    /// Interleaved RGB, 8 bits per channel
    Rgb8 {
        width: u32,
        height: u32,
        data: Vec<u8>,
    },
    /// Single gray channel, 16 bits per sample
    Gray16 {
        width: u32,
        height: u32,
        data: Vec<u16>,
    },
    /// Full RGBA raster, 8 bits per channel
    Rgba8(Raster),
}

impl ConvertedImage {
    /// Get `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            ConvertedImage::Rgb8 { width, height, .. }
            | ConvertedImage::Gray16 { width, height, .. } => (*width, *height),
            ConvertedImage::Rgba8(raster) => raster.dimensions(),
        }
    }

    /// Number of channels.
    pub fn channels(&self) -> u32 {
        match self {
            ConvertedImage::Rgb8 { .. } => 3,
            ConvertedImage::Gray16 { .. } => 1,
            ConvertedImage::Rgba8(_) => 4,
        }
    }

    /// Bits per channel.
    pub fn bits_per_channel(&self) -> u32 {
        match self {
            ConvertedImage::Gray16 { .. } => 16,
            _ => 8,
        }
    }

    /// Bits per pixel (`bits_per_channel * channels`).
    pub fn bits_per_pixel(&self) -> u32 {
        self.bits_per_channel() * self.channels()
    }
}

impl Raster {
    /// Reduce to a single luminance plane.
    ///
    /// Uses [`color::luminance`]. Alpha is ignored.
    pub fn convert_to_luminance(&self) -> Plane {
        let data = self
            .data()
            .iter()
            .map(|&p| {
                let (r, g, b, _) = color::extract_rgba(p);
                color::luminance(r, g, b)
            })
            .collect();
        Plane::from_raw(self.width(), self.height(), data)
    }

    /// Re-quantize to the layout selected by `depth`.
    pub fn convert_to_bit_depth(&self, depth: BitDepth) -> ConvertedImage {
        let (width, height) = self.dimensions();
        match depth {
            BitDepth::Bpp8 | BitDepth::Bpp24 => ConvertedImage::Rgb8 {
                width,
                height,
                data: self.to_rgb_bytes(),
            },
            BitDepth::Bpp16 => ConvertedImage::Gray16 {
                width,
                height,
                data: self
                    .convert_to_luminance()
                    .data()
                    .iter()
                    .map(|&v| u16::from(v))
                    .collect(),
            },
            BitDepth::Bpp32 => ConvertedImage::Rgba8(self.clone()),
        }
    }

    /// Re-quantize using a numeric bit-depth label.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedBitDepth`] for labels other than
    /// 8, 16, 24 and 32.
    pub fn convert_to_bits(&self, bits: u32) -> Result<ConvertedImage> {
        Ok(self.convert_to_bit_depth(BitDepth::from_bits(bits)?))
    }

    /// True if every pixel has alpha 255.
    pub fn is_opaque(&self) -> bool {
        self.data()
            .iter()
            .all(|&p| ChannelId::Alpha.sample(p) == 255)
    }
}
