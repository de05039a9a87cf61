//! Channel extraction
//!
//! Splits a packed image back into its Red, Green, Blue and Alpha planes,
//! optionally passing every plane (alpha included) through the linear to
//! sRGB curve.

use crate::{PackError, PackResult};
use std::fs;
use std::path::{Path, PathBuf};
use texpack_core::{ChannelId, Plane, Raster};

/// Base name used when an image has no usable file stem
pub const DEFAULT_BASE_NAME: &str = "unpacked";

/// Unpacking options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnpackOptions {
    /// Apply the linear to sRGB curve to each extracted plane
    pub gamma_correction: bool,
}

/// Split a decoded raster into its four planes.
pub fn unpack_raster(raster: &Raster, options: &UnpackOptions) -> [Plane; 4] {
    let planes = raster.split();
    if options.gamma_correction {
        planes.map(|p| texpack_color::apply_gamma(&p))
    } else {
        planes
    }
}

/// Decode `path` and split it into its four planes.
///
/// Three-channel sources unpack with an opaque alpha plane.
///
/// # Errors
///
/// Returns [`PackError::SourceLoad`] if the file cannot be decoded.
pub fn unpack_channels(path: &Path, options: &UnpackOptions) -> PackResult<[Plane; 4]> {
    let raster = texpack_io::read_image(path).map_err(|cause| PackError::SourceLoad {
        path: path.to_path_buf(),
        cause,
    })?;
    tracing::debug!(
        path = %path.display(),
        gamma = options.gamma_correction,
        "unpacking channels"
    );
    Ok(unpack_raster(&raster, options))
}

/// `{base}_{letter}.png`
pub fn channel_file_name(base: &str, channel: ChannelId) -> String {
    format!("{}_{}.png", base, channel.letter())
}

/// File stem of `path`, or [`DEFAULT_BASE_NAME`].
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_NAME.to_string())
}

/// Write each plane as a grayscale PNG named by [`channel_file_name`].
///
/// `dir` is created if needed. Returns the written paths in channel order.
///
/// # Errors
///
/// Returns [`PackError::Io`] if `dir` cannot be created and
/// [`PackError::Write`] if a plane cannot be written.
pub fn save_planes(planes: &[Plane; 4], dir: &Path, base: &str) -> PackResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut files = Vec::with_capacity(planes.len());
    for (channel, plane) in ChannelId::ALL.into_iter().zip(planes) {
        let path = dir.join(channel_file_name(base, channel));
        texpack_io::write_plane(plane, &path).map_err(|cause| PackError::Write {
            path: path.clone(),
            cause,
        })?;
        files.push(path);
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use texpack_core::color;

    #[test]
    fn test_unpack_order() {
        let raster = Raster::new_filled(2, 2, color::compose_rgba(1, 2, 3, 4)).unwrap();
        let planes = unpack_raster(&raster, &UnpackOptions::default());
        let values: Vec<u8> = planes.iter().map(|p| p.data()[0]).collect();
        assert_eq!(values, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_gamma_applies_to_every_plane() {
        let raster = Raster::new_filled(1, 1, color::compose_rgba(128, 0, 255, 128)).unwrap();
        let options = UnpackOptions {
            gamma_correction: true,
        };
        let planes = unpack_raster(&raster, &options);
        let values: Vec<u8> = planes.iter().map(|p| p.data()[0]).collect();
        assert_eq!(values, vec![188, 0, 255, 188]);
    }

    #[test]
    fn test_names() {
        assert_eq!(channel_file_name("rock", ChannelId::Alpha), "rock_A.png");
        assert_eq!(base_name(Path::new("dir/rock_orm.dds")), "rock_orm");
        assert_eq!(base_name(Path::new("")), DEFAULT_BASE_NAME);
    }

    #[test]
    fn test_missing_file_is_source_load() {
        let err = unpack_channels(Path::new("no/such/file.png"), &UnpackOptions::default());
        assert!(matches!(err, Err(PackError::SourceLoad { .. })));
    }
}
