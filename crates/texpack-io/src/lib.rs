//! texpack-io - Image I/O for the texpack channel packing engine
//!
//! Decodes source images of any supported format into RGBA
//! [`Raster`]s and writes planes, rasters and converted images as PNG.
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | PNG    | Yes  | Yes   | `png-format` |
//! | DDS    | Yes  | No    | `dds-format` |
//!
//! Decoding picks the codec from the file's magic number; the extension
//! allow-list in [`format`] decides which paths callers accept at all.

pub mod error;
pub mod format;
pub mod header;

#[cfg(feature = "png-format")]
pub mod png;

#[cfg(feature = "dds-format")]
pub mod dds;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format_from_bytes, is_supported_path, supported_extensions};
pub use header::{ImageHeader, read_image_header, read_image_header_mem};

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use texpack_core::{ConvertedImage, Plane, Raster};

/// Read an image from a file path
///
/// The decoder is chosen from the file contents, not its extension.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(IoError::Io)?;
    let raster = read_image_mem(&data)?;
    tracing::debug!(
        path = %path.display(),
        width = raster.width(),
        height = raster.height(),
        "decoded image"
    );
    Ok(raster)
}

/// Read an image from bytes
pub fn read_image_mem(data: &[u8]) -> IoResult<Raster> {
    let format = detect_format_from_bytes(data)?;
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(std::io::Cursor::new(data)),

        #[cfg(feature = "dds-format")]
        ImageFormat::Dds => dds::read_dds(data),

        #[allow(unreachable_patterns)]
        _ => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            format
        ))),
    }
}

/// Write an RGBA raster as PNG
pub fn write_raster<P: AsRef<Path>>(raster: &Raster, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let writer = create_png_target(path)?;
    write_raster_png(raster, writer)?;
    tracing::debug!(path = %path.display(), "wrote raster");
    Ok(())
}

/// Write a single plane as an 8-bit grayscale PNG
pub fn write_plane<P: AsRef<Path>>(plane: &Plane, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let writer = create_png_target(path)?;
    write_plane_png(plane, writer)?;
    tracing::debug!(path = %path.display(), "wrote plane");
    Ok(())
}

/// Write a converted image in its own layout (RGB8, Gray16 or RGBA8)
pub fn write_converted<P: AsRef<Path>>(image: &ConvertedImage, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let writer = create_png_target(path)?;
    write_converted_png(image, writer)?;
    tracing::debug!(
        path = %path.display(),
        bits_per_pixel = image.bits_per_pixel(),
        "wrote converted image"
    );
    Ok(())
}

/// Open `path` for writing after checking it names a PNG file.
fn create_png_target(path: &Path) -> IoResult<BufWriter<File>> {
    match ImageFormat::from_path(path) {
        Some(format) if format.can_encode() => {}
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "cannot write {}: only .png output is supported",
                path.display()
            )));
        }
    }
    let file = File::create(path).map_err(IoError::Io)?;
    Ok(BufWriter::new(file))
}

#[cfg(feature = "png-format")]
fn write_raster_png(raster: &Raster, writer: BufWriter<File>) -> IoResult<()> {
    png::write_png(raster, writer)
}

#[cfg(feature = "png-format")]
fn write_plane_png(plane: &Plane, writer: BufWriter<File>) -> IoResult<()> {
    png::write_png_gray(plane, writer)
}

#[cfg(feature = "png-format")]
fn write_converted_png(image: &ConvertedImage, writer: BufWriter<File>) -> IoResult<()> {
    match image {
        ConvertedImage::Rgb8 {
            width,
            height,
            data,
        } => png::write_png_rgb(*width, *height, data, writer),
        ConvertedImage::Gray16 {
            width,
            height,
            data,
        } => png::write_png_gray16(*width, *height, data, writer),
        ConvertedImage::Rgba8(raster) => png::write_png(raster, writer),
    }
}

#[cfg(not(feature = "png-format"))]
fn write_raster_png(_raster: &Raster, _writer: BufWriter<File>) -> IoResult<()> {
    Err(IoError::UnsupportedFormat("PNG support not enabled".to_string()))
}

#[cfg(not(feature = "png-format"))]
fn write_plane_png(_plane: &Plane, _writer: BufWriter<File>) -> IoResult<()> {
    Err(IoError::UnsupportedFormat("PNG support not enabled".to_string()))
}

#[cfg(not(feature = "png-format"))]
fn write_converted_png(_image: &ConvertedImage, _writer: BufWriter<File>) -> IoResult<()> {
    Err(IoError::UnsupportedFormat("PNG support not enabled".to_string()))
}
