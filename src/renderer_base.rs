//! Base renderer with clipping.
//!
//! Wraps a [`PixelFormat`] and clips every operation to the buffer bounds
//! before handing it down.

use crate::basics::CoverType;
use crate::pixfmt_rgba::PixelFormat;

/// Base renderer that clips drawing operations to the pixel format bounds.
pub struct RendererBase<PF: PixelFormat> {
    ren: PF,
}

impl<PF: PixelFormat> RendererBase<PF> {
    pub fn new(ren: PF) -> Self {
        Self { ren }
    }

    pub fn width(&self) -> u32 {
        self.ren.width()
    }

    pub fn height(&self) -> u32 {
        self.ren.height()
    }

    pub fn xmax(&self) -> i32 {
        self.ren.width() as i32 - 1
    }

    pub fn ymax(&self) -> i32 {
        self.ren.height() as i32 - 1
    }

    /// Returns `true` if (x, y) is inside the buffer.
    pub fn inbox(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x <= self.xmax() && y <= self.ymax()
    }

    pub fn ren(&self) -> &PF {
        &self.ren
    }

    /// Fill the whole buffer with `c`.
    pub fn clear(&mut self, c: &PF::ColorType) {
        for y in 0..self.height() as i32 {
            self.ren.copy_hline(0, y, self.width(), c);
        }
    }

    pub fn copy_pixel(&mut self, x: i32, y: i32, c: &PF::ColorType) {
        if self.inbox(x, y) {
            self.ren.copy_pixel(x, y, c);
        }
    }

    pub fn blend_pixel(&mut self, x: i32, y: i32, c: &PF::ColorType, cover: CoverType) {
        if self.inbox(x, y) {
            self.ren.blend_pixel(x, y, c, cover);
        }
    }

    /// Get the pixel at (x, y), or default if outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> PF::ColorType
    where
        PF::ColorType: Default,
    {
        if self.inbox(x, y) {
            self.ren.pixel(x, y)
        } else {
            PF::ColorType::default()
        }
    }

    /// Copy a horizontal line (clipped). x1, x2 are inclusive endpoints.
    pub fn copy_hline(&mut self, mut x1: i32, y: i32, mut x2: i32, c: &PF::ColorType) {
        if x1 > x2 {
            std::mem::swap(&mut x1, &mut x2);
        }
        if y > self.ymax() || y < 0 || x1 > self.xmax() || x2 < 0 {
            return;
        }
        x1 = x1.max(0);
        x2 = x2.min(self.xmax());
        self.ren.copy_hline(x1, y, (x2 - x1 + 1) as u32, c);
    }

    /// Overwrite the rectangle with corners (x1, y1) and (x2, y2), both
    /// inclusive (clipped).
    pub fn copy_bar(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, c: &PF::ColorType) {
        let (ya, yb) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        for y in ya.max(0)..=yb.min(self.ymax()) {
            self.copy_hline(x1, y, x2, c);
        }
    }

    /// Blend a solid horizontal span with per-pixel coverage (clipped).
    pub fn blend_solid_hspan(
        &mut self,
        mut x: i32,
        y: i32,
        mut len: i32,
        c: &PF::ColorType,
        covers: &[CoverType],
    ) {
        if y > self.ymax() || y < 0 {
            return;
        }

        let mut covers_offset = 0usize;
        if x < 0 {
            len += x;
            if len <= 0 {
                return;
            }
            covers_offset = (-x) as usize;
            x = 0;
        }
        if x + len > self.xmax() + 1 {
            len = self.xmax() - x + 1;
            if len <= 0 {
                return;
            }
        }
        self.ren
            .blend_solid_hspan(x, y, len as u32, c, &covers[covers_offset..]);
    }
}

// ============================================================================
// Tests
// ============================================================================
