//! Raster - four-channel RGBA image
//!
//! Every decoded source image and every composed (packed) image is a
//! `Raster`: `width * height` packed 32-bit pixels in `0xRRGGBBAA` order,
//! 8 bits per channel.
//!
//! # Ownership model
//!
//! Like [`Plane`], a `Raster` is an `Arc` handle. Cloning shares the pixel
//! storage, which lets the channel assignment model hand the very same image
//! to several slots; [`Raster::ptr_eq`] tells whether two handles are the
//! same image.

use crate::channel::ChannelId;
use crate::color;
use crate::error::{Error, Result};
use crate::plane::Plane;
use std::sync::Arc;

/// Internal raster data
#[derive(Debug, PartialEq, Eq)]
struct RasterData {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

/// Immutable, shareable RGBA image.
#[derive(Debug, Clone)]
pub struct Raster {
    inner: Arc<RasterData>,
}

impl Raster {
    /// Create a raster with every pixel set to the packed value `pixel`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new_filled(width: u32, height: u32, pixel: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Raster {
            inner: Arc::new(RasterData {
                width,
                height,
                data: vec![pixel; width as usize * height as usize],
            }),
        })
    }

    /// Create a fully transparent black raster.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_filled(width, height, 0)
    }

    /// Build a raster from interleaved RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSize`] if `bytes.len() != width * height * 4`.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: bytes.len(),
            });
        }
        let data = bytes
            .chunks_exact(4)
            .map(|p| color::compose_rgba(p[0], p[1], p[2], p[3]))
            .collect();
        Ok(Raster {
            inner: Arc::new(RasterData {
                width,
                height,
                data,
            }),
        })
    }

    /// Expand a gray plane into an opaque raster with R = G = B = sample.
    pub fn from_gray(plane: &Plane) -> Raster {
        let data = plane
            .data()
            .iter()
            .map(|&v| color::compose_rgb(v, v, v))
            .collect();
        Raster {
            inner: Arc::new(RasterData {
                width: plane.width(),
                height: plane.height(),
                data,
            }),
        }
    }

    /// Merge four same-sized planes index-aligned into one raster, in
    /// composition order (Red, Green, Blue, Alpha).
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if any plane differs in size
    /// from the red plane.
    pub fn from_planes(planes: [&Plane; 4]) -> Result<Raster> {
        let (w, h) = planes[0].dimensions();
        for plane in &planes[1..] {
            if plane.dimensions() != (w, h) {
                return Err(Error::DimensionMismatch {
                    expected: (w, h),
                    actual: plane.dimensions(),
                });
            }
        }

        let [r, g, b, a] = planes;
        let data = r
            .data()
            .iter()
            .zip(g.data())
            .zip(b.data())
            .zip(a.data())
            .map(|(((&r, &g), &b), &a)| color::compose_rgba(r, g, b, a))
            .collect();

        Ok(Raster {
            inner: Arc::new(RasterData {
                width: w,
                height: h,
                data,
            }),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.inner.width) * u64::from(self.inner.height)
    }

    /// Raw packed pixels, row-major.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Packed pixel at (x, y), or `None` if out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Packed pixel at (x, y) without checking the logical size.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        self.inner.data[y as usize * self.inner.width as usize + x as usize]
    }

    /// RGBA values at (x, y).
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        self.get_pixel(x, y).map(color::extract_rgba)
    }

    /// Extract a single channel as an 8-bit plane.
    pub fn channel(&self, channel: ChannelId) -> Plane {
        let data = self.inner.data.iter().map(|&p| channel.sample(p)).collect();
        Plane::from_raw(self.inner.width, self.inner.height, data)
    }

    /// Split into the four channel planes in composition order.
    pub fn split(&self) -> [Plane; 4] {
        ChannelId::ALL.map(|ch| self.channel(ch))
    }

    /// Interleaved RGBA bytes.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.inner.data.len() * 4);
        for &p in &self.inner.data {
            let (r, g, b, a) = color::extract_rgba(p);
            out.extend_from_slice(&[r, g, b, a]);
        }
        out
    }

    /// Interleaved RGB bytes (alpha dropped).
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.inner.data.len() * 3);
        for &p in &self.inner.data {
            out.extend_from_slice(&p.to_be_bytes()[..3]);
        }
        out
    }

    /// True if both handles share the same storage.
    pub fn ptr_eq(&self, other: &Raster) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Try to get mutable access to the pixels.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<RasterMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(RasterMut { inner: data }),
            Err(arc) => Err(Raster { inner: arc }),
        }
    }

    /// Create a mutable copy of this raster.
    pub fn to_mut(&self) -> RasterMut {
        RasterMut {
            inner: RasterData {
                width: self.inner.width,
                height: self.inner.height,
                data: self.inner.data.clone(),
            },
        }
    }
}

impl PartialEq for Raster {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.inner == other.inner
    }
}

impl Eq for Raster {}

/// Mutable raster
///
/// Convert back to an immutable [`Raster`] using `Into<Raster>`.
#[derive(Debug)]
pub struct RasterMut {
    inner: RasterData,
}

impl RasterMut {
    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Packed pixel at (x, y) without checking the logical size.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        self.inner.data[y as usize * self.inner.width as usize + x as usize]
    }

    /// Set the packed pixel at (x, y) without checking the logical size.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, pixel: u32) {
        let w = self.inner.width as usize;
        self.inner.data[y as usize * w + x as usize] = pixel;
    }

    /// Set RGBA values at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_rgba(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) -> Result<()> {
        if x >= self.inner.width {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.inner.width as usize,
            });
        }
        if y >= self.inner.height {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.inner.height as usize,
            });
        }
        self.set_pixel_unchecked(x, y, color::compose_rgba(r, g, b, a));
        Ok(())
    }

    /// Mutable packed pixels, row-major.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }
}

impl From<RasterMut> for Raster {
    fn from(raster: RasterMut) -> Self {
        Raster {
            inner: Arc::new(raster.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_bytes() {
        let bytes = [1, 2, 3, 4, 5, 6, 7, 8];
        let raster = Raster::from_rgba_bytes(2, 1, &bytes).unwrap();
        assert_eq!(raster.get_rgba(1, 0), Some((5, 6, 7, 8)));
        assert_eq!(raster.to_rgba_bytes(), bytes.to_vec());
        assert_eq!(raster.to_rgb_bytes(), vec![1, 2, 3, 5, 6, 7]);
        assert!(Raster::from_rgba_bytes(2, 2, &bytes).is_err());
    }

    #[test]
    fn test_split_and_merge() {
        let mut rm = Raster::new(3, 3).unwrap().to_mut();
        rm.set_rgba(1, 2, 10, 20, 30, 40).unwrap();
        let raster: Raster = rm.into();

        let planes = raster.split();
        assert_eq!(planes[0].get(1, 2), Some(10));
        assert_eq!(planes[3].get(1, 2), Some(40));

        let merged = Raster::from_planes([&planes[0], &planes[1], &planes[2], &planes[3]]).unwrap();
        assert_eq!(merged, raster);
    }

    #[test]
    fn test_from_planes_size_mismatch() {
        let a = Plane::new(4, 4).unwrap();
        let b = Plane::new(4, 3).unwrap();
        assert!(matches!(
            Raster::from_planes([&a, &a, &b, &a]),
            Err(Error::DimensionMismatch { expected: (4, 4), actual: (4, 3) })
        ));
    }

    #[test]
    fn test_from_gray() {
        let plane = Plane::new_filled(2, 2, 90).unwrap();
        let raster = Raster::from_gray(&plane);
        assert_eq!(raster.get_rgba(1, 1), Some((90, 90, 90, 255)));
    }
}
