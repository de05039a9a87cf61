//! DDS texture support (read only)
//!
//! DirectDraw Surface files are decoded through the `image` crate's DDS
//! codec (BC1/BC2/BC3 block compression) and expanded to an RGBA
//! [`Raster`]. Only the top mip level is read.

use crate::format::ImageFormat;
use crate::header::ImageHeader;
use crate::{IoError, IoResult};
use image::ImageDecoder;
use image::codecs::dds::DdsDecoder;
use std::io::Cursor;
use texpack_core::Raster;

/// Read a DDS image from bytes
pub fn read_dds(data: &[u8]) -> IoResult<Raster> {
    let img = image::load_from_memory_with_format(data, image::ImageFormat::Dds)
        .map_err(|e| IoError::DecodeError(format!("DDS decode error: {}", e)))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Raster::from_rgba_bytes(width, height, rgba.as_raw())?)
}

/// Read DDS metadata without decompressing blocks
pub fn read_header_dds(data: &[u8]) -> IoResult<ImageHeader> {
    let decoder = DdsDecoder::new(Cursor::new(data))
        .map_err(|e| IoError::DecodeError(format!("DDS header error: {}", e)))?;
    let (width, height) = decoder.dimensions();
    let color_type = decoder.color_type();
    let channels = u32::from(color_type.channel_count());
    let bits_per_channel = u32::from(color_type.bits_per_pixel()) / channels.max(1);

    Ok(ImageHeader {
        width,
        height,
        bits_per_channel,
        channels,
        format: ImageFormat::Dds,
    })
}
