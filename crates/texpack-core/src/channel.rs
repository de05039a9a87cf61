//! Channel identifiers
//!
//! The four output slots of a packed texture. Slot order is significant:
//! it is the composition order of the packed image and the index used by
//! every per-channel array in the workspace.

use crate::color;
use std::fmt;

/// One of the four channels of a packed RGBA image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChannelId {
    /// Red channel (bits 24-31)
    Red,
    /// Green channel (bits 16-23)
    Green,
    /// Blue channel (bits 8-15)
    Blue,
    /// Alpha channel (bits 0-7)
    Alpha,
}

impl ChannelId {
    /// All channels in composition order.
    pub const ALL: [ChannelId; 4] = [
        ChannelId::Red,
        ChannelId::Green,
        ChannelId::Blue,
        ChannelId::Alpha,
    ];

    /// Position of this channel in composition order (0..4).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            ChannelId::Red => 0,
            ChannelId::Green => 1,
            ChannelId::Blue => 2,
            ChannelId::Alpha => 3,
        }
    }

    /// Channel at position `index` in composition order.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Single-letter name used in file names (`R`, `G`, `B`, `A`).
    pub fn letter(self) -> char {
        match self {
            ChannelId::Red => 'R',
            ChannelId::Green => 'G',
            ChannelId::Blue => 'B',
            ChannelId::Alpha => 'A',
        }
    }

    /// Bit shift of this channel inside a packed `0xRRGGBBAA` pixel.
    #[inline]
    pub fn shift(self) -> u32 {
        match self {
            ChannelId::Red => color::RED_SHIFT,
            ChannelId::Green => color::GREEN_SHIFT,
            ChannelId::Blue => color::BLUE_SHIFT,
            ChannelId::Alpha => color::ALPHA_SHIFT,
        }
    }

    /// Read this channel's sample out of a packed pixel.
    #[inline]
    pub fn sample(self, pixel: u32) -> u8 {
        ((pixel >> self.shift()) & 0xff) as u8
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_and_index() {
        for (i, ch) in ChannelId::ALL.iter().enumerate() {
            assert_eq!(ch.index(), i);
            assert_eq!(ChannelId::from_index(i), Some(*ch));
        }
        assert_eq!(ChannelId::from_index(4), None);
    }

    #[test]
    fn test_letters() {
        let letters: String = ChannelId::ALL.iter().map(|c| c.letter()).collect();
        assert_eq!(letters, "RGBA");
        assert_eq!(ChannelId::Alpha.to_string(), "A");
    }

    #[test]
    fn test_sample() {
        let pixel = color::compose_rgba(1, 2, 3, 4);
        let samples: Vec<u8> = ChannelId::ALL.iter().map(|c| c.sample(pixel)).collect();
        assert_eq!(samples, vec![1, 2, 3, 4]);
    }
}
