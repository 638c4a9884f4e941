//! Drawing surface.
//!
//! [`Surface`] is the small set of 2D operations the identicon pipeline
//! draws with: rectangle and polygon fills, polygon outlines, and a
//! transform stack. [`Canvas`] implements it on a [`RenderingBuffer`] with
//! the anti-aliased scanline rasterizer.

use std::f64::consts::PI;

use crate::basics::VertexSource;
use crate::color::Rgba8;
use crate::conv_stroke::ConvStroke;
use crate::conv_transform::ConvTransform;
use crate::error::RasterError;
use crate::path_storage::PathStorage;
use crate::pixfmt_rgba::PixfmtRgba32;
use crate::rasterizer_scanline_aa::RasterizerScanlineAa;
use crate::renderer_base::RendererBase;
use crate::renderer_scanline::render_scanlines_aa_solid;
use crate::rendering_buffer::RenderingBuffer;
use crate::trans_affine::TransAffine;

// ============================================================================
// Surface trait
// ============================================================================

/// A 2D drawing target with a current transform.
///
/// All geometry is given in the current local frame. `translate` and the
/// rotations compose onto that frame; `save`/`restore` push and pop it.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Fill the rectangle `(x, y, w, h)`.
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba8);

    /// Fill a closed polygon path (non-zero rule).
    fn fill_path(&mut self, path: &PathStorage, color: Rgba8);

    /// Stroke the outline of a closed polygon path.
    fn stroke_path(&mut self, path: &PathStorage, width: f64, color: Rgba8);

    /// Push the current transform.
    fn save(&mut self);

    /// Pop the transform pushed by the matching `save`. Unbalanced calls
    /// leave the transform untouched.
    fn restore(&mut self);

    fn translate(&mut self, dx: f64, dy: f64);

    /// Rotate by `angle` radians (clockwise on screen).
    fn rotate(&mut self, angle: f64);

    /// Rotate by `turns` quarter turns.
    fn rotate_quarter_turns(&mut self, turns: u32) {
        self.rotate((turns % 4) as f64 * PI / 2.0);
    }
}

// ============================================================================
// Canvas
// ============================================================================

/// Raster surface backed by an owned RGBA buffer.
pub struct Canvas {
    buf: RenderingBuffer,
    ras: RasterizerScanlineAa,
    trans: TransAffine,
    stack: Vec<TransAffine>,
}

impl Canvas {
    /// A `width × height` canvas cleared to `background`.
    pub fn new(width: u32, height: u32, background: Rgba8) -> Result<Self, RasterError> {
        Ok(Self {
            buf: RenderingBuffer::new_filled(width, height, background)?,
            ras: RasterizerScanlineAa::new(width, height),
            trans: TransAffine::new(),
            stack: Vec::new(),
        })
    }

    pub fn buffer(&self) -> &RenderingBuffer {
        &self.buf
    }

    pub fn into_buffer(self) -> RenderingBuffer {
        self.buf
    }

    /// Current local-to-device transform.
    pub fn transform(&self) -> &TransAffine {
        &self.trans
    }

    /// Depth of the saved transform stack.
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn clear(&mut self, color: Rgba8) {
        self.buf.clear(color);
    }

    fn render<VS: VertexSource>(&mut self, vs: &mut VS, color: Rgba8) {
        self.ras.reset();
        self.ras.add_path(vs, 0);
        let mut ren = RendererBase::new(PixfmtRgba32::new(&mut self.buf));
        render_scanlines_aa_solid(&mut self.ras, &mut ren, &color);
    }

    fn concat(&mut self, m: &TransAffine) {
        self.trans.premultiply(m);
    }
}

impl Surface for Canvas {
    fn width(&self) -> u32 {
        self.buf.width()
    }

    fn height(&self) -> u32 {
        self.buf.height()
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba8) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let mut rect = PathStorage::new();
        rect.move_to(x, y);
        rect.line_to(x + w, y);
        rect.line_to(x + w, y + h);
        rect.line_to(x, y + h);
        rect.close_polygon();
        self.fill_path(&rect, color);
    }

    fn fill_path(&mut self, path: &PathStorage, color: Rgba8) {
        let mut vs = ConvTransform::new(path.cursor(), self.trans);
        self.render(&mut vs, color);
    }

    fn stroke_path(&mut self, path: &PathStorage, width: f64, color: Rgba8) {
        let mut stroke = ConvStroke::new(path.cursor());
        stroke.set_width(width);
        let mut vs = ConvTransform::new(stroke, self.trans);
        self.render(&mut vs, color);
    }

    fn save(&mut self) {
        self.stack.push(self.trans);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(t) => self.trans = t,
            None => log::trace!("canvas restore without matching save"),
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.concat(&TransAffine::new_translation(dx, dy));
    }

    fn rotate(&mut self, angle: f64) {
        self.concat(&TransAffine::new_rotation(angle));
    }

    fn rotate_quarter_turns(&mut self, turns: u32) {
        self.concat(&TransAffine::new_quarter_turns(turns));
    }
}

// ============================================================================
// Tests
// ============================================================================
