//! texpack Core - Pixel containers for channel packing
//!
//! This crate provides the data structures shared by the rest of the
//! workspace:
//!
//! - [`Plane`] / [`PlaneMut`] - single-channel 8-bit sample grid
//! - [`Raster`] / [`RasterMut`] - four-channel RGBA image, 8 bits per channel
//! - [`ChannelId`] - the fixed Red, Green, Blue, Alpha slot order
//! - [`BitDepth`] / [`ConvertedImage`] - output re-quantization targets

pub mod channel;
pub mod convert;
pub mod error;
pub mod plane;
pub mod raster;

pub use channel::ChannelId;
pub use convert::{BitDepth, ConvertedImage};
pub use error::{Error, Result};
pub use plane::{Plane, PlaneMut};
pub use raster::{Raster, RasterMut};

/// Packing and unpacking of `0xRRGGBBAA` pixel words.
///
/// A pixel's bytes in big-endian order are its red, green, blue and alpha
/// samples, so `u32::to_be_bytes` is the channel split.
pub mod color {
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Opaque pixel from three samples.
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        u32::from_be_bytes([r, g, b, u8::MAX])
    }

    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        u32::from_be_bytes([r, g, b, a])
    }

    /// Samples of `pixel` as `(r, g, b, a)`.
    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        let [r, g, b, a] = pixel.to_be_bytes();
        (r, g, b, a)
    }

    /// ITU-R 601-2 luma weights in 16.16 fixed point.
    const L_RED_WEIGHT: u32 = 19595;
    const L_GREEN_WEIGHT: u32 = 38470;
    const L_BLUE_WEIGHT: u32 = 7471;

    /// Luminance `L = R * 299/1000 + G * 587/1000 + B * 114/1000`, rounded.
    #[inline]
    pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
        let l = r as u32 * L_RED_WEIGHT + g as u32 * L_GREEN_WEIGHT + b as u32 * L_BLUE_WEIGHT;
        ((l + 0x8000) >> 16) as u8
    }

}
