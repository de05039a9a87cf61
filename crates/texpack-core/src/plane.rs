//! Plane - single-channel 8-bit sample grid
//!
//! A `Plane` holds one scalar map (roughness, metallic, a mask, ...) as
//! `width * height` unsigned bytes in row-major order.
//!
//! # Ownership model
//!
//! `Plane` uses `Arc` for cheap cloning (shared ownership); a produced plane
//! is never modified in place. To build or edit samples, convert to
//! [`PlaneMut`] via [`Plane::try_into_mut`] or [`Plane::to_mut`], then
//! convert back with `Into<Plane>`.

use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal plane data
#[derive(Debug, PartialEq, Eq)]
struct PlaneData {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PlaneData {
    fn filled(width: u32, height: u32, value: u8) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(PlaneData {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        })
    }
}

/// Immutable, shareable 8-bit plane.
///
/// # Examples
///
/// ```
/// use texpack_core::Plane;
///
/// let plane = Plane::new_filled(4, 2, 255).unwrap();
/// assert_eq!(plane.dimensions(), (4, 2));
/// assert!(plane.is_uniform(255));
/// ```
#[derive(Debug, Clone)]
pub struct Plane {
    inner: Arc<PlaneData>,
}

impl Plane {
    /// Create a zero-filled plane.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_filled(width, height, 0)
    }

    /// Create a plane with every sample set to `value`.
    pub fn new_filled(width: u32, height: u32, value: u8) -> Result<Self> {
        Ok(Plane {
            inner: Arc::new(PlaneData::filled(width, height, value)?),
        })
    }

    /// Wrap an existing row-major sample buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSize`] if `data.len() != width * height`.
    pub fn from_vec(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Plane {
            inner: Arc::new(PlaneData {
                width,
                height,
                data,
            }),
        })
    }

    /// Wrap a buffer already known to hold `width * height` samples.
    pub(crate) fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Plane {
            inner: Arc::new(PlaneData {
                width,
                height,
                data,
            }),
        }
    }

    /// Get the plane width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the plane height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Raw row-major samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// Sample at (x, y), or `None` if out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.get_unchecked(x, y))
    }

    /// Sample at (x, y) without bounds checking against the logical size.
    ///
    /// # Panics
    ///
    /// Panics if the computed index is past the end of the buffer.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> u8 {
        self.inner.data[y as usize * self.inner.width as usize + x as usize]
    }

    /// True if every sample equals `value`.
    pub fn is_uniform(&self, value: u8) -> bool {
        self.inner.data.iter().all(|&v| v == value)
    }

    /// True if both handles share the same storage.
    pub fn ptr_eq(&self, other: &Plane) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Apply a sample-wise lookup table, producing a new plane.
    pub fn map_lut(&self, lut: &[u8; 256]) -> Plane {
        let data = self.inner.data.iter().map(|&v| lut[v as usize]).collect();
        Plane {
            inner: Arc::new(PlaneData {
                width: self.inner.width,
                height: self.inner.height,
                data,
            }),
        }
    }

    /// Try to get mutable access to the samples.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<PlaneMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PlaneMut { inner: data }),
            Err(arc) => Err(Plane { inner: arc }),
        }
    }

    /// Create a mutable copy of this plane.
    pub fn to_mut(&self) -> PlaneMut {
        PlaneMut {
            inner: PlaneData {
                width: self.inner.width,
                height: self.inner.height,
                data: self.inner.data.clone(),
            },
        }
    }
}

impl PartialEq for Plane {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.inner == other.inner
    }
}

impl Eq for Plane {}

/// Mutable plane
///
/// Allows modification of samples. Convert back to an immutable [`Plane`]
/// using `Into<Plane>`.
#[derive(Debug)]
pub struct PlaneMut {
    inner: PlaneData,
}

impl PlaneMut {
    /// Get the plane width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the plane height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Sample at (x, y), or `None` if out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.inner.data[y as usize * self.inner.width as usize + x as usize])
    }

    /// Set the sample at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set(&mut self, x: u32, y: u32, value: u8) -> Result<()> {
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
        self.set_unchecked(x, y, value);
        Ok(())
    }

    /// Set the sample at (x, y) without checking the logical size.
    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, value: u8) {
        let w = self.inner.width as usize;
        self.inner.data[y as usize * w + x as usize] = value;
    }

    /// Set every sample to `value`.
    pub fn fill(&mut self, value: u8) {
        self.inner.data.fill(value);
    }

    /// Mutable row-major samples.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }
}

impl From<PlaneMut> for Plane {
    fn from(plane: PlaneMut) -> Self {
        Plane {
            inner: Arc::new(plane.inner),
        }
    }
}
