//! Solid color synthesis
//!
//! Builds the uniform images the channel assignment model substitutes for a
//! file when a channel is set to a flat color. Color channels get an opaque
//! RGB image of the color; the alpha channel gets the color's luminance
//! replicated into a gray image, so the first decoded channel carries it.

use crate::{ColorError, ColorResult};
use std::fmt;
use std::str::FromStr;
use texpack_core::{ChannelId, Plane, Raster, color};

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Parse `rrggbb` or `#rrggbb` (hex digits in either case).
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidColorValue`] for anything else.
    pub fn from_hex(s: &str) -> ColorResult<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidColorValue(format!(
                "expected 6 hex digits, got {:?}",
                s
            )));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|e| ColorError::InvalidColorValue(e.to_string()))
        };
        Ok(Rgb::new(byte(0)?, byte(2)?, byte(4)?))
    }

    /// Lowercase `rrggbb` without the leading `#`.
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// ITU-R 601-2 luminance of this color.
    pub fn luminance(self) -> u8 {
        color::luminance(self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> ColorResult<Self> {
        Rgb::from_hex(s)
    }
}

/// Build a uniform image of `rgb` for the given destination channel.
///
/// Red, Green and Blue receive an opaque RGB image of the color. Alpha
/// receives an opaque gray image of the color's luminance.
///
/// # Errors
///
/// Returns [`ColorError::Core`] if width or height is 0.
pub fn solid_raster(rgb: Rgb, channel: ChannelId, width: u32, height: u32) -> ColorResult<Raster> {
    let raster = match channel {
        ChannelId::Alpha => Raster::from_gray(&Plane::new_filled(width, height, rgb.luminance())?),
        _ => Raster::new_filled(width, height, color::compose_rgb(rgb.r, rgb.g, rgb.b))?,
    };
    Ok(raster)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgb::from_hex("#ff8000").unwrap(), Rgb::new(255, 128, 0));
        assert_eq!(Rgb::from_hex("0A0b0C").unwrap(), Rgb::new(10, 11, 12));
        assert_eq!("#ffffff".parse::<Rgb>().unwrap(), Rgb::WHITE);
        assert!(Rgb::from_hex("#fff").is_err());
        assert!(Rgb::from_hex("zzzzzz").is_err());
        assert!(Rgb::from_hex("#+1+2+3").is_err());
    }

    #[test]
    fn test_hex_display() {
        let c = Rgb::new(0xab, 0x01, 0xff);
        assert_eq!(c.to_hex(), "ab01ff");
        assert_eq!(c.to_string(), "#ab01ff");
    }

    #[test]
    fn test_luminance() {
        assert_eq!(Rgb::WHITE.luminance(), 255);
        assert_eq!(Rgb::BLACK.luminance(), 0);
        assert_eq!(Rgb::new(255, 0, 0).luminance(), 76);
    }

    #[test]
    fn test_solid_raster() {
        let red = Rgb::new(200, 100, 50);
        let rgb = solid_raster(red, ChannelId::Green, 4, 3).unwrap();
        assert_eq!(rgb.dimensions(), (4, 3));
        assert_eq!(rgb.get_rgba(3, 2), Some((200, 100, 50, 255)));

        let alpha = solid_raster(red, ChannelId::Alpha, 4, 3).unwrap();
        let l = red.luminance();
        assert_eq!(alpha.get_rgba(0, 0), Some((l, l, l, 255)));
        assert!(solid_raster(red, ChannelId::Red, 0, 3).is_err());
    }
}
