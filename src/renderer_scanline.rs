//! Scanline renderers.
//!
//! Drive the rasterizer's sweep and hand each span of coverage to a
//! [`RendererBase`].

use crate::pixfmt_rgba::PixelFormat;
use crate::rasterizer_scanline_aa::{RasterizerScanlineAa, Scanline};
use crate::renderer_base::RendererBase;

/// Render every scanline of `ras` in a single solid color. An open
/// contour is closed first.
pub fn render_scanlines_aa_solid<PF: PixelFormat>(
    ras: &mut RasterizerScanlineAa,
    ren: &mut RendererBase<PF>,
    color: &PF::ColorType,
) {
    ras.close_polygon();
    let mut sl = Scanline::new();
    for y in ras.min_y()..=ras.max_y() {
        if ras.sweep_scanline(y, &mut sl) {
            render_scanline_aa_solid(&sl, ren, color);
        }
    }
}

/// Render one scanline in a solid color.
pub fn render_scanline_aa_solid<PF: PixelFormat>(
    sl: &Scanline,
    ren: &mut RendererBase<PF>,
    color: &PF::ColorType,
) {
    let y = sl.y();
    for span in sl.spans() {
        ren.blend_solid_hspan(span.x, y, span.len as i32, color, sl.covers(span));
    }
}
