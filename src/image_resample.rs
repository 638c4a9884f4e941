//! Separable image resampling.
//!
//! Scales a [`RenderingBuffer`] to a target size with any
//! [`ImageFilterFunction`]. When shrinking, the kernel is stretched by the
//! scale factor so every source pixel contributes (area-style
//! downsampling). Samples past the border are clamped to the edge pixel.
//! Color channels are filtered premultiplied by alpha.

use crate::error::RasterError;
use crate::image_filters::ImageFilterFunction;
use crate::rendering_buffer::{RenderingBuffer, BPP};

/// Contributions of source pixels to one destination pixel.
struct Contrib {
    start: usize,
    weights: Vec<f64>,
}

/// Weight table mapping `dst_len` destination samples onto `src_len`
/// source samples.
fn contributions<F: ImageFilterFunction>(src_len: u32, dst_len: u32, filter: &F) -> Vec<Contrib> {
    let scale = src_len as f64 / dst_len as f64;
    let stretch = scale.max(1.0);
    let support = filter.radius() * stretch;
    let last = src_len as i64 - 1;

    (0..dst_len)
        .map(|i| {
            let center = (i as f64 + 0.5) * scale - 0.5;
            let lo = (center - support).floor() as i64 + 1;
            let hi = (center + support).ceil() as i64 - 1;

            let mut taps: Vec<(usize, f64)> = Vec::new();
            for j in lo..=hi {
                let d = (j as f64 - center).abs() / stretch;
                if d >= filter.radius() {
                    continue;
                }
                taps.push((j.clamp(0, last) as usize, filter.calc_weight(d)));
            }
            let sum: f64 = taps.iter().map(|t| t.1).sum();
            if taps.is_empty() || sum.abs() < 1e-12 {
                let nearest = (center.round() as i64).clamp(0, last) as usize;
                return Contrib {
                    start: nearest,
                    weights: vec![1.0],
                };
            }

            // Fold clamped taps into a dense run starting at the first index.
            let start = taps.iter().map(|t| t.0).min().unwrap_or(0);
            let end = taps.iter().map(|t| t.0).max().unwrap_or(0);
            let mut weights = vec![0.0; end - start + 1];
            for (idx, w) in taps {
                weights[idx - start] += w / sum;
            }
            Contrib { start, weights }
        })
        .collect()
}

/// Resample `src` to `width × height`.
///
/// Returns an exact copy when the size is unchanged and an empty buffer
/// when either target dimension (or the source) is zero.
pub fn resample<F: ImageFilterFunction>(
    src: &RenderingBuffer,
    width: u32,
    height: u32,
    filter: &F,
) -> Result<RenderingBuffer, RasterError> {
    if width == src.width() && height == src.height() {
        return Ok(src.clone());
    }
    if width == 0 || height == 0 || src.is_empty() {
        return RenderingBuffer::new(width, height);
    }

    let sw = src.width() as usize;
    let sh = src.height() as usize;
    let dw = width as usize;

    // Premultiplied source samples.
    let pre: Vec<[f64; 4]> = src
        .pixels()
        .map(|p| {
            let a = p.a as f64 / 255.0;
            [p.r as f64 * a, p.g as f64 * a, p.b as f64 * a, p.a as f64]
        })
        .collect();

    // Horizontal pass: sh rows of dw samples.
    let xc = contributions(src.width(), width, filter);
    let mut tmp = vec![[0.0f64; 4]; dw * sh];
    for y in 0..sh {
        let row = &pre[y * sw..(y + 1) * sw];
        for (x, c) in xc.iter().enumerate() {
            tmp[y * dw + x] = accumulate(c, |j| row[j]);
        }
    }

    // Vertical pass straight into the destination.
    let yc = contributions(src.height(), height, filter);
    let mut dst = RenderingBuffer::new(width, height)?;
    let out = dst.as_bytes_mut();
    for (y, c) in yc.iter().enumerate() {
        for x in 0..dw {
            let v = accumulate(c, |j| tmp[j * dw + x]);
            let off = (y * dw + x) * BPP;
            out[off..off + BPP].copy_from_slice(&unpremultiply(v));
        }
    }
    Ok(dst)
}

#[inline]
fn accumulate(c: &Contrib, sample: impl Fn(usize) -> [f64; 4]) -> [f64; 4] {
    let mut acc = [0.0; 4];
    for (k, w) in c.weights.iter().enumerate() {
        let s = sample(c.start + k);
        for ch in 0..4 {
            acc[ch] += s[ch] * w;
        }
    }
    acc
}

#[inline]
fn unpremultiply(v: [f64; 4]) -> [u8; 4] {
    let a = v[3].clamp(0.0, 255.0);
    let to_u8 = |x: f64| x.round().clamp(0.0, 255.0) as u8;
    if a < 0.5 {
        return [0, 0, 0, 0];
    }
    let k = 255.0 / a;
    [to_u8(v[0] * k), to_u8(v[1] * k), to_u8(v[2] * k), to_u8(a)]
}

// ============================================================================
// Tests
// ============================================================================
