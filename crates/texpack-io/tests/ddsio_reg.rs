//! DDS I/O regression test
//!
//! Tests header probing and block decoding of DXT1 textures.
//!
//! Run with:
//! ```
//! cargo test -p texpack-io --test ddsio_reg
//! ```

use texpack_core::{ChannelId, Plane};
use texpack_io::{ImageFormat, is_supported_path, read_image, read_image_header};
use texpack_test::{RegParams, scratch_dir, write_dxt1_dds};

// 5:6:5 orange: red 31 -> 255, green 32 -> 129, blue 0
const ORANGE_565: u16 = (31 << 11) | (32 << 5);

#[test]
fn ddsio_reg() {
    let mut rp = RegParams::new("ddsio");
    let dir = scratch_dir("ddsio").unwrap();
    let path = write_dxt1_dds(&dir, "orange.dds", 4, 8, ORANGE_565).unwrap();
    rp.check(is_supported_path(&path), ".dds is an accepted input");

    // Test 1: header is probed without decoding blocks
    let header = read_image_header(&path).unwrap();
    rp.check(header.format == ImageFormat::Dds, "header format is DDS");
    rp.compare_values(4.0, header.width as f64, 0.0);
    rp.compare_values(8.0, header.height as f64, 0.0);
    rp.compare_values(3.0, header.channels as f64, 0.0);
    rp.compare_values(8.0, header.bits_per_channel as f64, 0.0);

    // Test 2: every decoded pixel is the block color, fully opaque
    let raster = read_image(&path).unwrap();
    rp.compare_values(4.0, raster.width() as f64, 0.0);
    rp.compare_values(8.0, raster.height() as f64, 0.0);
    rp.check(
        raster.get_rgba(3, 7) == Some((255, 129, 0, 255)),
        "corner pixel decodes to orange",
    );
    for (channel, value) in ChannelId::ALL.into_iter().zip([255, 129, 0, 255]) {
        rp.compare_uniform(&raster.channel(channel), value);
    }
    let green: Plane = raster.channel(ChannelId::Green);
    rp.display_plane(&green, "green").unwrap();

    // Test 3: a truncated block section is a decode error
    let data = std::fs::read(&path).unwrap();
    let truncated = dir.join("truncated.dds");
    std::fs::write(&truncated, &data[..data.len() - 4]).unwrap();
    rp.check(read_image(&truncated).is_err(), "truncated DDS fails to decode");

    assert!(rp.cleanup(), "ddsio regression test failed");
}
