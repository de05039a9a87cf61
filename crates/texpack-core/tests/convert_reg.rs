//! Format conversion regression test
//!
//! Tests re-quantization of a composed raster to each output layout.
//!
//! Run with:
//! ```
//! cargo test -p texpack-core --test convert_reg
//! ```

use texpack_core::{BitDepth, ChannelId, ConvertedImage, Error, Plane, Raster, color};
use texpack_test::RegParams;

fn composed() -> Raster {
    let r = Plane::from_vec(3, 1, vec![255, 0, 0]).unwrap();
    let g = Plane::from_vec(3, 1, vec![0, 255, 0]).unwrap();
    let b = Plane::from_vec(3, 1, vec![0, 0, 255]).unwrap();
    let a = Plane::from_vec(3, 1, vec![255, 128, 0]).unwrap();
    Raster::from_planes([&r, &g, &b, &a]).unwrap()
}

#[test]
fn convert_reg() {
    let mut rp = RegParams::new("convert");
    let raster = composed();

    // Test 1: 8 and 24 drop alpha and agree pixel for pixel
    let rgb8 = raster.convert_to_bit_depth(BitDepth::Bpp8);
    let rgb24 = raster.convert_to_bit_depth(BitDepth::Bpp24);
    rp.check(rgb8 == rgb24, "8 and 24 produce the same pixels");
    match &rgb8 {
        ConvertedImage::Rgb8 { data, .. } => {
            rp.check(data.as_slice() == [255, 0, 0, 0, 255, 0, 0, 0, 255], "rgb bytes");
        }
        other => {
            rp.check(false, &format!("unexpected layout {other:?}"));
        }
    }
    rp.compare_values(24.0, rgb8.bits_per_pixel() as f64, 0.0);

    // Test 2: 16 is one gray channel holding the luminance
    let gray = raster.convert_to_bit_depth(BitDepth::Bpp16);
    rp.compare_values(1.0, gray.channels() as f64, 0.0);
    rp.compare_values(16.0, gray.bits_per_channel() as f64, 0.0);
    if let ConvertedImage::Gray16 { data, .. } = &gray {
        let expected: Vec<u16> = [(255, 0, 0), (0, 255, 0), (0, 0, 255)]
            .iter()
            .map(|&(r, g, b)| u16::from(color::luminance(r, g, b)))
            .collect();
        rp.check(*data == expected, "gray samples are luminance");
    }

    // Test 3: 32 keeps alpha untouched
    match raster.convert_to_bits(32).unwrap() {
        ConvertedImage::Rgba8(out) => {
            rp.compare_planes(&raster.channel(ChannelId::Alpha), &out.channel(ChannelId::Alpha));
            rp.check(out.ptr_eq(&raster), "32-bit output shares the raster");
        }
        other => {
            rp.check(false, &format!("unexpected layout {other:?}"));
        }
    }

    // Test 4: unknown selectors are rejected
    for bits in [0, 1, 12, 48, 64] {
        rp.check(
            matches!(raster.convert_to_bits(bits), Err(Error::UnsupportedBitDepth(b)) if b == bits),
            &format!("{bits} rejected"),
        );
    }

    // Test 5: precision warnings only when narrowing
    rp.check(BitDepth::Bpp8.is_precision_loss(16), "16 to 8 loses precision");
    rp.check(!BitDepth::Bpp16.is_precision_loss(8), "8 to 16 does not");
    rp.check(!raster.is_opaque(), "composed raster has transparency");

    rp.display_plane(&raster.convert_to_luminance(), "luminance")
        .unwrap();
    assert!(rp.cleanup(), "convert regression test failed");
}
