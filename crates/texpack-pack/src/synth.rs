//! Channel synthesis
//!
//! Turns up to four decoded sources into the four planes of a packed
//! image:
//!
//! 1. Reconcile sizes; all slots empty is [`PackError::NoSourcesProvided`].
//! 2. An empty slot becomes a plane of 255.
//! 3. A source of another size is resampled (bicubic) to the target.
//! 4. Unless transparent colors are preserved, fully transparent pixels
//!    get sample 255.
//! 5. The source's first channel becomes the plane, whatever slot it
//!    fills.

use crate::reconcile::{SourceInfo, display_name, reconcile_paths, reconcile_sizes};
use crate::{PackError, PackResult};
use std::path::Path;
use texpack_core::{ChannelId, Plane, Raster};

/// Sample value for channels with no source
pub const EMPTY_CHANNEL_VALUE: u8 = 255;

/// Packing options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackOptions {
    /// Keep the color of fully transparent pixels instead of forcing 255
    pub preserve_transparent_colors: bool,
}

impl Default for PackOptions {
    fn default() -> Self {
        PackOptions {
            preserve_transparent_colors: true,
        }
    }
}

/// A decoded source image and the name it is reported under.
#[derive(Debug, Clone)]
pub struct ChannelInput {
    pub name: String,
    pub raster: Raster,
}

impl ChannelInput {
    pub fn new(name: impl Into<String>, raster: Raster) -> Self {
        ChannelInput {
            name: name.into(),
            raster,
        }
    }

    /// Decode a source file.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::SourceLoad`] naming the path on failure.
    pub fn load(path: &Path) -> PackResult<Self> {
        let raster = texpack_io::read_image(path).map_err(|cause| PackError::SourceLoad {
            path: path.to_path_buf(),
            cause,
        })?;
        Ok(ChannelInput::new(display_name(path), raster))
    }

    fn info(&self) -> SourceInfo {
        SourceInfo::new(self.name.clone(), self.raster.dimensions())
    }
}

/// Produce the plane a single source contributes at `size`.
///
/// # Errors
///
/// Returns [`PackError::Transform`] if `size` has a zero dimension.
pub fn source_plane(raster: &Raster, size: (u32, u32), options: &PackOptions) -> PackResult<Plane> {
    let raster = texpack_transform::scale_to_size(raster, size.0, size.1)?;
    let first = raster.channel(ChannelId::Red);
    if options.preserve_transparent_colors {
        return Ok(first);
    }

    let alpha = raster.channel(ChannelId::Alpha);
    let mut plane = first.try_into_mut().unwrap_or_else(|shared| shared.to_mut());
    let mut flattened = 0usize;
    for (v, &a) in plane.data_mut().iter_mut().zip(alpha.data()) {
        if a == 0 {
            *v = EMPTY_CHANNEL_VALUE;
            flattened += 1;
        }
    }
    if flattened > 0 {
        tracing::debug!(flattened, "forced transparent samples to white");
    }
    Ok(plane.into())
}

/// Build the four planes at an explicit target size, without reconciling.
///
/// # Errors
///
/// Returns [`PackError::Transform`] if `size` has a zero dimension.
pub fn synthesize_planes_at(
    inputs: &[Option<ChannelInput>; 4],
    size: (u32, u32),
    options: &PackOptions,
) -> PackResult<[Plane; 4]> {
    let [r, g, b, a] = ChannelId::ALL.map(|channel| match &inputs[channel.index()] {
        Some(input) => {
            tracing::debug!(%channel, source = %input.name, "extracting channel");
            source_plane(&input.raster, size, options)
        }
        None => Ok(Plane::new_filled(size.0, size.1, EMPTY_CHANNEL_VALUE)?),
    });
    Ok([r?, g?, b?, a?])
}

/// Reconcile sizes, then build the four planes.
///
/// # Errors
///
/// Returns [`PackError::NoSourcesProvided`] if every slot is empty and
/// [`PackError::SizeMismatch`] if present sources disagree in size.
pub fn synthesize_planes(
    inputs: &[Option<ChannelInput>; 4],
    options: &PackOptions,
) -> PackResult<[Plane; 4]> {
    let infos: Vec<Option<SourceInfo>> = inputs
        .iter()
        .map(|i| i.as_ref().map(ChannelInput::info))
        .collect();
    let size = reconcile_sizes(&infos)?.ok_or(PackError::NoSourcesProvided)?;
    synthesize_planes_at(inputs, size, options)
}

/// Pack decoded sources into one RGBA raster in Red, Green, Blue, Alpha order.
pub fn pack_channels(inputs: &[Option<ChannelInput>; 4], options: &PackOptions) -> PackResult<Raster> {
    let [r, g, b, a] = synthesize_planes(inputs, options)?;
    let packed = Raster::from_planes([&r, &g, &b, &a])?;
    tracing::info!(
        width = packed.width(),
        height = packed.height(),
        sources = inputs.iter().flatten().count(),
        "channels packed"
    );
    Ok(packed)
}

/// Pack source files into one RGBA raster.
///
/// Sizes are checked from file headers before any image is decoded.
pub fn pack_files<P: AsRef<Path>>(paths: &[Option<P>; 4], options: &PackOptions) -> PackResult<Raster> {
    if reconcile_paths(paths)?.is_none() {
        return Err(PackError::NoSourcesProvided);
    }
    let mut inputs: [Option<ChannelInput>; 4] = Default::default();
    for (slot, path) in inputs.iter_mut().zip(paths) {
        if let Some(path) = path {
            *slot = Some(ChannelInput::load(path.as_ref())?);
        }
    }
    pack_channels(&inputs, options)
}
