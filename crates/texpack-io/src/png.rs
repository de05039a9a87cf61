//! PNG image format support
//!
//! Every PNG layout decodes to an RGBA [`Raster`]: gray is replicated into
//! R, G and B, missing alpha becomes 255, and 16-bit samples keep their high
//! byte. Writing supports the layouts the format converter produces.

use crate::format::ImageFormat;
use crate::header::ImageHeader;
use crate::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Cursor, Seek, Write};
use texpack_core::{Plane, Raster, color};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Raster> {
    let mut decoder = Decoder::new(reader);
    // Palette and sub-byte gray become 8-bit samples, tRNS becomes alpha
    decoder.set_transformations(Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let color_type = output_info.color_type;
    let wide = output_info.bit_depth == BitDepth::Sixteen;
    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let samples = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "indexed PNG was not expanded".to_string(),
            ));
        }
    };
    // Byte stride between consecutive samples; 16-bit keeps the high byte
    let step = if wide { 2 } else { 1 };
    let pixel_bytes = samples * step;

    let mut raster = Raster::new(width, height)?.to_mut();
    for y in 0..height {
        let row_start = y as usize * bytes_per_row;
        for x in 0..width {
            let idx = row_start + x as usize * pixel_bytes;
            let s = |i: usize| data[idx + i * step];
            let pixel = match samples {
                1 => color::compose_rgb(s(0), s(0), s(0)),
                2 => color::compose_rgba(s(0), s(0), s(0), s(1)),
                3 => color::compose_rgb(s(0), s(1), s(2)),
                _ => color::compose_rgba(s(0), s(1), s(2), s(3)),
            };
            raster.set_pixel_unchecked(x, y, pixel);
        }
    }

    Ok(raster.into())
}

/// Read PNG metadata without decoding pixel data
pub fn read_header_png(data: &[u8]) -> IoResult<ImageHeader> {
    let decoder = Decoder::new(Cursor::new(data));
    let reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;
    let info = reader.info();

    Ok(ImageHeader {
        width: info.width,
        height: info.height,
        bits_per_channel: info.bit_depth as u32,
        channels: info.color_type.samples() as u32,
        format: ImageFormat::Png,
    })
}

/// Write an RGBA raster as an 8-bit RGBA PNG
pub fn write_png<W: Write>(raster: &Raster, writer: W) -> IoResult<()> {
    let (width, height) = raster.dimensions();
    encode(
        writer,
        width,
        height,
        ColorType::Rgba,
        BitDepth::Eight,
        &raster.to_rgba_bytes(),
    )
}

/// Write interleaved 8-bit RGB samples
pub fn write_png_rgb<W: Write>(width: u32, height: u32, data: &[u8], writer: W) -> IoResult<()> {
    check_len(data.len(), width, height, 3)?;
    encode(writer, width, height, ColorType::Rgb, BitDepth::Eight, data)
}

/// Write a plane as an 8-bit grayscale PNG
pub fn write_png_gray<W: Write>(plane: &Plane, writer: W) -> IoResult<()> {
    let (width, height) = plane.dimensions();
    encode(
        writer,
        width,
        height,
        ColorType::Grayscale,
        BitDepth::Eight,
        plane.data(),
    )
}

/// Write 16-bit grayscale samples (stored big-endian, as PNG requires)
pub fn write_png_gray16<W: Write>(
    width: u32,
    height: u32,
    data: &[u16],
    writer: W,
) -> IoResult<()> {
    check_len(data.len(), width, height, 1)?;
    let bytes: Vec<u8> = data.iter().flat_map(|v| v.to_be_bytes()).collect();
    encode(
        writer,
        width,
        height,
        ColorType::Grayscale,
        BitDepth::Sixteen,
        &bytes,
    )
}

fn check_len(len: usize, width: u32, height: u32, samples: usize) -> IoResult<()> {
    let expected = width as usize * height as usize * samples;
    if len != expected {
        return Err(IoError::Core(texpack_core::Error::BufferSize {
            expected,
            actual: len,
        }));
    }
    Ok(())
}

fn encode<W: Write>(
    writer: W,
    width: u32,
    height: u32,
    color_type: ColorType,
    bit_depth: BitDepth,
    data: &[u8],
) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(bit_depth);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_roundtrip_rgba() {
        let mut rm = Raster::new(5, 5).unwrap().to_mut();
        rm.set_rgba(0, 0, 255, 0, 0, 255).unwrap();
        rm.set_rgba(1, 1, 0, 255, 0, 128).unwrap();
        rm.set_rgba(2, 2, 10, 20, 30, 0).unwrap();
        let raster: Raster = rm.into();

        let mut buffer = Vec::new();
        write_png(&raster, &mut buffer).unwrap();
        let raster2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(raster2, raster);
        // Fully transparent pixels keep their color
        assert_eq!(raster2.get_rgba(2, 2), Some((10, 20, 30, 0)));
    }

    #[test]
    fn test_png_gray_reads_as_opaque_rgb() {
        let plane = Plane::from_vec(3, 1, vec![0, 100, 255]).unwrap();
        let mut buffer = Vec::new();
        write_png_gray(&plane, &mut buffer).unwrap();

        let raster = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(raster.get_rgba(1, 0), Some((100, 100, 100, 255)));
        assert!(raster.is_opaque());
    }

    #[test]
    fn test_png_gray16_keeps_high_byte() {
        let mut buffer = Vec::new();
        write_png_gray16(2, 1, &[0x1234, 0x00ff], &mut buffer).unwrap();

        let header = read_header_png(&buffer).unwrap();
        assert_eq!(header.bits_per_channel, 16);
        assert_eq!(header.channels, 1);

        let raster = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(raster.get_rgba(0, 0), Some((0x12, 0x12, 0x12, 255)));
        assert_eq!(raster.get_rgba(1, 0), Some((0, 0, 0, 255)));
    }

    #[test]
    fn test_png_rgb_header() {
        let mut buffer = Vec::new();
        write_png_rgb(2, 2, &[7; 12], &mut buffer).unwrap();
        let header = read_header_png(&buffer).unwrap();
        assert_eq!(header.dimensions(), (2, 2));
        assert_eq!(header.bits_per_pixel(), 24);
        assert!(write_png_rgb(2, 2, &[7; 11], Vec::new()).is_err());
    }
}
