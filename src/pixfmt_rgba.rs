//! RGBA pixel format with alpha blending.
//!
//! Provides the `PixelFormat` trait and `PixfmtRgba32`, which reads and
//! writes non-premultiplied RGBA32 pixels in a [`RenderingBuffer`].

use crate::basics::{CoverType, COVER_FULL};
use crate::color::Rgba8;
use crate::rendering_buffer::{RenderingBuffer, BPP};

// ============================================================================
// PixelFormat trait
// ============================================================================

/// Trait for pixel formats that can blend colors into a rendering buffer.
///
/// Callers are expected to clip; coordinates passed here are inside the
/// buffer.
pub trait PixelFormat {
    type ColorType;

    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Blend a single pixel at (x, y) with color `c` and coverage `cover`.
    fn blend_pixel(&mut self, x: i32, y: i32, c: &Self::ColorType, cover: CoverType);

    /// Blend a horizontal line of `len` pixels at (x, y) with uniform color and coverage.
    fn blend_hline(&mut self, x: i32, y: i32, len: u32, c: &Self::ColorType, cover: CoverType);

    /// Blend a horizontal span of `len` pixels with per-pixel coverage values.
    fn blend_solid_hspan(
        &mut self,
        x: i32,
        y: i32,
        len: u32,
        c: &Self::ColorType,
        covers: &[CoverType],
    );

    /// Copy (overwrite) a horizontal line of `len` pixels with color `c`.
    fn copy_hline(&mut self, x: i32, y: i32, len: u32, c: &Self::ColorType);

    /// Copy (overwrite) a single pixel at (x, y) with color `c`.
    fn copy_pixel(&mut self, x: i32, y: i32, c: &Self::ColorType);

    /// Get the pixel color at (x, y).
    fn pixel(&self, x: i32, y: i32) -> Self::ColorType;
}

// ============================================================================
// PixfmtRgba32: non-premultiplied RGBA, 8 bits per channel
// ============================================================================

/// Pixel format for non-premultiplied RGBA32 (4 bytes per pixel).
///
/// Component order: R=0, G=1, B=2, A=3. An opaque color at full coverage
/// is copied exactly; anything else is interpolated with `Rgba8::lerp`.
pub struct PixfmtRgba32<'a> {
    rbuf: &'a mut RenderingBuffer,
}

impl<'a> PixfmtRgba32<'a> {
    pub fn new(rbuf: &'a mut RenderingBuffer) -> Self {
        Self { rbuf }
    }

    /// Clear the entire buffer to a solid color.
    pub fn clear(&mut self, c: &Rgba8) {
        self.rbuf.clear(*c);
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> usize {
        (y as usize * self.rbuf.width() as usize + x as usize) * BPP
    }

    /// Blend a single pixel (internal helper, no bounds checking).
    #[inline]
    fn blend_pix(p: &mut [u8], c: &Rgba8, cover: CoverType) {
        let alpha = Rgba8::mult_cover(c.a, cover);
        if alpha == COVER_FULL {
            p.copy_from_slice(&[c.r, c.g, c.b, c.a]);
            return;
        }
        p[0] = Rgba8::lerp(p[0], c.r, alpha);
        p[1] = Rgba8::lerp(p[1], c.g, alpha);
        p[2] = Rgba8::lerp(p[2], c.b, alpha);
        p[3] = Rgba8::lerp(p[3], 255, alpha);
    }
}

impl PixelFormat for PixfmtRgba32<'_> {
    type ColorType = Rgba8;

    fn width(&self) -> u32 {
        self.rbuf.width()
    }

    fn height(&self) -> u32 {
        self.rbuf.height()
    }

    fn pixel(&self, x: i32, y: i32) -> Rgba8 {
        let off = self.offset(x, y);
        let p = &self.rbuf.as_bytes()[off..off + BPP];
        Rgba8::new(p[0], p[1], p[2], p[3])
    }

    fn copy_pixel(&mut self, x: i32, y: i32, c: &Rgba8) {
        let off = self.offset(x, y);
        self.rbuf.as_bytes_mut()[off..off + BPP].copy_from_slice(&[c.r, c.g, c.b, c.a]);
    }

    fn copy_hline(&mut self, x: i32, y: i32, len: u32, c: &Rgba8) {
        let off = self.offset(x, y);
        let span = &mut self.rbuf.as_bytes_mut()[off..off + len as usize * BPP];
        for p in span.chunks_exact_mut(BPP) {
            p.copy_from_slice(&[c.r, c.g, c.b, c.a]);
        }
    }

    fn blend_pixel(&mut self, x: i32, y: i32, c: &Rgba8, cover: CoverType) {
        if c.a == 0 || cover == 0 {
            return;
        }
        let off = self.offset(x, y);
        Self::blend_pix(&mut self.rbuf.as_bytes_mut()[off..off + BPP], c, cover);
    }

    fn blend_hline(&mut self, x: i32, y: i32, len: u32, c: &Rgba8, cover: CoverType) {
        if c.a == 0 || cover == 0 {
            return;
        }
        let off = self.offset(x, y);
        let span = &mut self.rbuf.as_bytes_mut()[off..off + len as usize * BPP];
        for p in span.chunks_exact_mut(BPP) {
            Self::blend_pix(p, c, cover);
        }
    }

    fn blend_solid_hspan(&mut self, x: i32, y: i32, len: u32, c: &Rgba8, covers: &[CoverType]) {
        if c.a == 0 {
            return;
        }
        let off = self.offset(x, y);
        let span = &mut self.rbuf.as_bytes_mut()[off..off + len as usize * BPP];
        for (p, &cover) in span.chunks_exact_mut(BPP).zip(covers) {
            if cover > 0 {
                Self::blend_pix(p, c, cover);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
