//! Bicubic image scaling
//!
//! Separable two-pass convolution with the Catmull-Rom cubic (`a = -0.5`).
//! Output sample `i` is centered on source position `(i + 0.5) * src/dst`;
//! when shrinking, the kernel support widens by `src/dst` so every source
//! pixel contributes (area-aware downscale). Weights are normalized per
//! output sample, and taps falling outside the image are dropped.
//!
//! RGBA rasters are resampled with premultiplied alpha, so fully
//! transparent pixels do not bleed their color into neighbors; a pixel that
//! ends up fully transparent has its color cleared to 0.

use crate::{TransformError, TransformResult};
use texpack_core::{Plane, Raster, color};

/// Kernel half-width at unit scale
const BICUBIC_SUPPORT: f32 = 2.0;

/// Catmull-Rom cubic, `a = -0.5`
#[inline]
fn catmull_rom(x: f32) -> f32 {
    let x = x.abs();
    if x < 1.0 {
        1.5 * x * x * x - 2.5 * x * x + 1.0
    } else if x < 2.0 {
        -0.5 * x * x * x + 2.5 * x * x - 4.0 * x + 2.0
    } else {
        0.0
    }
}

/// Normalized taps for one output sample
struct KernelWeights {
    /// First source index to sample from
    start: usize,
    /// One weight per source sample from `start`
    weights: Vec<f32>,
}

fn precompute_weights(src_len: usize, dst_len: usize) -> Vec<KernelWeights> {
    let scale = src_len as f32 / dst_len as f32;
    let filter_scale = scale.max(1.0);
    let support = BICUBIC_SUPPORT * filter_scale;

    (0..dst_len)
        .map(|dst_i| {
            let center = (dst_i as f32 + 0.5) * scale;
            let start = (center - support + 0.5).floor().max(0.0) as usize;
            let end = ((center + support + 0.5).floor().max(0.0) as usize).min(src_len);

            let mut weights: Vec<f32> = (start..end)
                .map(|si| catmull_rom((si as f32 + 0.5 - center) / filter_scale))
                .collect();
            let sum: f32 = weights.iter().sum();

            if weights.is_empty() || sum.abs() < 1e-8 {
                // Degenerate window: nearest source sample
                let nearest = (center as usize).min(src_len - 1);
                return KernelWeights {
                    start: nearest,
                    weights: vec![1.0],
                };
            }
            for w in &mut weights {
                *w /= sum;
            }
            KernelWeights { start, weights }
        })
        .collect()
}

#[inline]
fn accumulate<const N: usize>(kw: &KernelWeights, sample: impl Fn(usize) -> [f32; N]) -> [f32; N] {
    let mut sum = [0.0f32; N];
    for (i, &w) in kw.weights.iter().enumerate() {
        for (acc, v) in sum.iter_mut().zip(sample(kw.start + i)) {
            *acc += v * w;
        }
    }
    sum
}

/// Resample an `N`-channel float image, horizontal pass then vertical.
fn resample<const N: usize>(
    src: &[[f32; N]],
    src_w: usize,
    src_h: usize,
    dst_w: usize,
    dst_h: usize,
) -> Vec<[f32; N]> {
    let h_weights = precompute_weights(src_w, dst_w);
    let v_weights = precompute_weights(src_h, dst_h);

    let mut temp = vec![[0.0f32; N]; dst_w * src_h];
    for y in 0..src_h {
        let row = &src[y * src_w..(y + 1) * src_w];
        for (x, kw) in h_weights.iter().enumerate() {
            temp[y * dst_w + x] = accumulate(kw, |sx| row[sx]);
        }
    }

    let mut dst = vec![[0.0f32; N]; dst_w * dst_h];
    for (y, kw) in v_weights.iter().enumerate() {
        for x in 0..dst_w {
            dst[y * dst_w + x] = accumulate(kw, |sy| temp[sy * dst_w + x]);
        }
    }
    dst
}

#[inline]
fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

fn check_size(width: u32, height: u32) -> TransformResult<()> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidSize { width, height });
    }
    Ok(())
}

/// Scale an RGBA raster to exactly `width x height`.
///
/// Returns a handle to the same image if it already has that size.
///
/// # Errors
///
/// Returns [`TransformError::InvalidSize`] if either target dimension is 0.
pub fn scale_to_size(raster: &Raster, width: u32, height: u32) -> TransformResult<Raster> {
    check_size(width, height)?;
    if raster.dimensions() == (width, height) {
        return Ok(raster.clone());
    }

    let premultiplied: Vec<[f32; 4]> = raster
        .data()
        .iter()
        .map(|&p| {
            let (r, g, b, a) = color::extract_rgba(p);
            let alpha = f32::from(a) / 255.0;
            [
                f32::from(r) * alpha,
                f32::from(g) * alpha,
                f32::from(b) * alpha,
                f32::from(a),
            ]
        })
        .collect();

    let scaled = resample(
        &premultiplied,
        raster.width() as usize,
        raster.height() as usize,
        width as usize,
        height as usize,
    );

    let mut out = Raster::new(width, height)?.to_mut();
    for (dst, [r, g, b, a]) in out.data_mut().iter_mut().zip(scaled) {
        let alpha = to_u8(a);
        *dst = if alpha == 0 {
            color::compose_rgba(0, 0, 0, 0)
        } else {
            let k = 255.0 / f32::from(alpha);
            color::compose_rgba(to_u8(r * k), to_u8(g * k), to_u8(b * k), alpha)
        };
    }
    Ok(out.into())
}

/// Scale a single plane to exactly `width x height`.
///
/// Returns a handle to the same plane if it already has that size.
///
/// # Errors
///
/// Returns [`TransformError::InvalidSize`] if either target dimension is 0.
pub fn scale_plane_to_size(plane: &Plane, width: u32, height: u32) -> TransformResult<Plane> {
    check_size(width, height)?;
    if plane.dimensions() == (width, height) {
        return Ok(plane.clone());
    }

    let samples: Vec<[f32; 1]> = plane.data().iter().map(|&v| [f32::from(v)]).collect();
    let scaled = resample(
        &samples,
        plane.width() as usize,
        plane.height() as usize,
        width as usize,
        height as usize,
    );
    let data = scaled.into_iter().map(|[v]| to_u8(v)).collect();
    Ok(Plane::from_vec(width, height, data)?)
}
