//! Linear to sRGB transfer curve
//!
//! Implements the IEC 61966-2-1 encode curve used by the unpack path to
//! compensate for tools that store channel data under a different transfer
//! function than the packer expects:
//!
//! ```text
//! v <= 0.0031308 : v * 12.92
//! otherwise      : 1.055 * v^(1/2.4) - 0.055
//! ```
//!
//! 8-bit planes go through a 256-entry table built once on first use.

use std::sync::OnceLock;
use texpack_core::Plane;

/// Below this linear value the curve is a straight line.
const LINEAR_THRESHOLD: f32 = 0.003_130_8;
const LINEAR_SLOPE: f32 = 12.92;
const GAMMA_SCALE: f32 = 1.055;
const GAMMA_OFFSET: f32 = 0.055;
const GAMMA_EXPONENT: f32 = 1.0 / 2.4;

/// Encode a normalized linear value in `[0, 1]` to sRGB.
///
/// Input is clamped to `[0, 1]`.
#[inline]
pub fn linear_to_srgb(v: f32) -> f32 {
    let v = v.clamp(0.0, 1.0);
    if v <= LINEAR_THRESHOLD {
        v * LINEAR_SLOPE
    } else {
        GAMMA_SCALE * v.powf(GAMMA_EXPONENT) - GAMMA_OFFSET
    }
}

/// Encode an 8-bit sample, rescaling to 0..=255 and rounding.
#[inline]
pub fn linear_to_srgb_u8(sample: u8) -> u8 {
    let encoded = linear_to_srgb(f32::from(sample) / 255.0) * 255.0;
    encoded.round().clamp(0.0, 255.0) as u8
}

/// The 8-bit lookup table for [`linear_to_srgb_u8`].
pub fn linear_to_srgb_lut() -> &'static [u8; 256] {
    static LUT: OnceLock<[u8; 256]> = OnceLock::new();
    LUT.get_or_init(|| {
        let mut lut = [0u8; 256];
        for (i, entry) in lut.iter_mut().enumerate() {
            *entry = linear_to_srgb_u8(i as u8);
        }
        lut
    })
}

/// Apply the linear to sRGB curve to every sample of a plane.
pub fn apply_gamma(plane: &Plane) -> Plane {
    plane.map_lut(linear_to_srgb_lut())
}
