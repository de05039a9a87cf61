//! Scaling regression test
//!
//! Resamples generated images up and down and checks size, value range and
//! smoothness of the result.
//!
//! Run with:
//! ```
//! cargo test -p texpack-transform --test scale_reg
//! ```

use texpack_core::{ChannelId, Plane, Raster, color};
use texpack_test::RegParams;
use texpack_transform::{scale_plane_to_size, scale_to_size};

fn horizontal_ramp(width: u32, height: u32) -> Plane {
    let mut pm = Plane::new(width, height).unwrap().to_mut();
    for y in 0..height {
        for x in 0..width {
            pm.set_unchecked(x, y, (x * 255 / (width - 1)) as u8);
        }
    }
    pm.into()
}

#[test]
fn scale_reg() {
    let mut rp = RegParams::new("scale");

    // Test 1: ramp upscaled stays monotonic with fixed endpoints
    let ramp = horizontal_ramp(32, 4);
    let up = scale_plane_to_size(&ramp, 128, 8).unwrap();
    rp.compare_values(128.0, up.width() as f64, 0.0);
    rp.compare_values(8.0, up.height() as f64, 0.0);
    let row = up.row(3);
    rp.check(row.windows(2).all(|w| w[0] <= w[1]), "upscaled ramp is monotonic");
    rp.compare_values(0.0, row[0] as f64, 1.0);
    rp.compare_values(255.0, row[127] as f64, 1.0);

    // Test 2: downscaled ramp keeps its mean
    let down = scale_plane_to_size(&ramp, 8, 2).unwrap();
    let mean_src = ramp.data().iter().map(|&v| v as f64).sum::<f64>() / ramp.data().len() as f64;
    let mean_dst = down.data().iter().map(|&v| v as f64).sum::<f64>() / down.data().len() as f64;
    eprintln!("  mean {:.2} -> {:.2}", mean_src, mean_dst);
    rp.compare_values(mean_src, mean_dst, 2.0);

    // Test 3: raster channels resample like planes when opaque
    let raster = Raster::from_planes([&ramp, &ramp, &ramp, &Plane::new_filled(32, 4, 255).unwrap()])
        .unwrap();
    let scaled = scale_to_size(&raster, 128, 8).unwrap();
    rp.compare_planes(&up, &scaled.channel(ChannelId::Red));
    rp.compare_uniform(&scaled.channel(ChannelId::Alpha), 255);

    // Test 4: odd aspect changes keep a uniform image uniform
    let pixel = color::compose_rgba(12, 34, 56, 78);
    let flat = Raster::new_filled(5, 9, pixel).unwrap();
    let out = scale_to_size(&flat, 13, 2).unwrap();
    let a = out.channel(ChannelId::Alpha);
    rp.compare_uniform(&a, 78);
    let g = out.channel(ChannelId::Green);
    rp.check(
        g.data().iter().all(|&v| v.abs_diff(34) <= 1),
        "premultiplied round trip stays within 1",
    );

    rp.display_plane(&up, "ramp_up").unwrap();
    assert!(rp.cleanup(), "scale regression test failed");
}
