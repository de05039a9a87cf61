//! texpack-test - Regression test helpers for texpack
//!
//! Integration tests in each crate's `tests/` directory are written as
//! `*_reg.rs` files that accumulate checks in a [`RegParams`] and report
//! them all at the end:
//!
//! ```ignore
//! use texpack_test::RegParams;
//!
//! let mut rp = RegParams::new("pack");
//! rp.compare_values(100.0, width as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! Fixture images are generated on the fly into a per-test scratch
//! directory under `tests/regout` at the workspace root.
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: set to "display" to also write intermediate images
//!   for visual inspection

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use std::fs;
use std::path::{Path, PathBuf};
use texpack_core::{Raster, color};

/// Get the path to the workspace root
fn workspace_root() -> PathBuf {
    // texpack-test is at crates/texpack-test, so go up two directories
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> PathBuf {
    workspace_root().join("tests").join("regout")
}

/// Create an empty scratch directory `regout/<name>` for one test.
///
/// Any leftovers from a previous run are removed first.
pub fn scratch_dir(name: &str) -> TestResult<PathBuf> {
    let dir = regout_dir().join(name);
    if dir.exists() {
        fs::remove_dir_all(&dir)?;
    }
    fs::create_dir_all(&dir).map_err(|e| TestError::DirectoryCreate {
        path: dir.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

/// Write `raster` as an RGBA PNG at `dir/name`.
pub fn write_raster_png(dir: &Path, name: &str, raster: &Raster) -> TestResult<PathBuf> {
    let path = dir.join(name);
    texpack_io::write_raster(raster, &path).map_err(|e| TestError::ImageWrite {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(path)
}

/// Write a single-color RGBA PNG of the given size at `dir/name`.
pub fn write_solid_png(
    dir: &Path,
    name: &str,
    width: u32,
    height: u32,
    rgba: (u8, u8, u8, u8),
) -> TestResult<PathBuf> {
    let (r, g, b, a) = rgba;
    let raster = Raster::new_filled(width, height, color::compose_rgba(r, g, b, a))?;
    write_raster_png(dir, name, &raster)
}

/// Write a file with a supported extension but undecodable content.
pub fn write_corrupt_file(dir: &Path, name: &str) -> TestResult<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, b"\x89PNG\r\n\x1a\nthis is not a png stream")?;
    Ok(path)
}

/// Write a single-color DXT1 DDS file at `dir/name`.
///
/// `rgb565` is the packed 5:6:5 color of every block. `width` and `height`
/// must be multiples of 4.
pub fn write_dxt1_dds(
    dir: &Path,
    name: &str,
    width: u32,
    height: u32,
    rgb565: u16,
) -> TestResult<PathBuf> {
    let blocks = (width / 4) * (height / 4);
    let mut data = Vec::with_capacity(128 + 8 * blocks as usize);
    data.extend_from_slice(b"DDS ");
    let header: [u32; 31] = {
        let mut h = [0u32; 31];
        h[0] = 124; // header size
        h[1] = 0x1 | 0x2 | 0x4 | 0x1000 | 0x80000; // caps, height, width, pixel format, linear size
        h[2] = height;
        h[3] = width;
        h[4] = 8 * blocks;
        h[18] = 32; // pixel format size
        h[19] = 0x4; // fourcc present
        h[20] = u32::from_le_bytes(*b"DXT1");
        h[26] = 0x1000; // texture
        h
    };
    for word in header {
        data.extend_from_slice(&word.to_le_bytes());
    }
    for _ in 0..blocks {
        // color0 > color1 selects four-color mode; all indices pick color0
        data.extend_from_slice(&rgb565.to_le_bytes());
        data.extend_from_slice(&0u16.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
    }
    let path = dir.join(name);
    fs::write(&path, data)?;
    Ok(path)
}
