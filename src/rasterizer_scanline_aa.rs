//! High-level polygon scanline rasterizer with anti-aliasing.
//!
//! Accepts polygon contours (move_to/line_to/close) in pixel coordinates,
//! accumulates them into a [`RasterizerCellsAa`] grid and sweeps the grid
//! row by row into [`Scanline`]s of raw coverage values (0..255).

use crate::basics::{
    is_close, is_end_poly, is_move_to, is_stop, is_vertex, poly_coord, CoverType, FillingRule,
    VertexSource, POLY_SUBPIXEL_SHIFT,
};
use crate::rasterizer_cells_aa::RasterizerCellsAa;

// ============================================================================
// AA scale constants
// ============================================================================

const AA_SHIFT: u32 = 8;
const AA_SCALE: u32 = 1 << AA_SHIFT;
const AA_MASK: u32 = AA_SCALE - 1;
const AA_SCALE2: u32 = AA_SCALE * 2;
const AA_MASK2: u32 = AA_SCALE2 - 1;

// ============================================================================
// Scanline: one row of coverage spans
// ============================================================================

/// A run of consecutive pixels with non-zero coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub x: i32,
    pub len: u32,
    /// Offset of the span's first cover in [`Scanline::covers`].
    pub covers_start: usize,
}

/// Unpacked scanline: per-pixel coverage grouped into spans.
#[derive(Debug, Clone, Default)]
pub struct Scanline {
    y: i32,
    covers: Vec<CoverType>,
    spans: Vec<Span>,
}

impl Scanline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn num_spans(&self) -> usize {
        self.spans.len()
    }

    /// Coverage values of one span.
    pub fn covers(&self, span: &Span) -> &[CoverType] {
        &self.covers[span.covers_start..span.covers_start + span.len as usize]
    }

    fn reset(&mut self, y: i32) {
        self.y = y;
        self.covers.clear();
        self.spans.clear();
    }

    fn add_cell(&mut self, x: i32, cover: CoverType) {
        if let Some(last) = self.spans.last_mut() {
            if last.x + last.len as i32 == x {
                last.len += 1;
                self.covers.push(cover);
                return;
            }
        }
        self.spans.push(Span {
            x,
            len: 1,
            covers_start: self.covers.len(),
        });
        self.covers.push(cover);
    }
}

// ============================================================================
// RasterizerScanlineAa: the high-level polygon rasterizer
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    Initial,
    MoveTo,
    LineTo,
    Closed,
}

/// Polygon rasterizer with anti-aliased output, clipped to a
/// `width × height` target.
///
/// Usage:
/// 1. Optionally set `filling_rule()`
/// 2. Define contours with `move_to_d()` / `line_to_d()` or `add_path()`
/// 3. Call `sweep_scanline()` for each row in `min_y()..=max_y()`
pub struct RasterizerScanlineAa {
    outline: RasterizerCellsAa,
    filling_rule: FillingRule,
    start_x: i32,
    start_y: i32,
    x: i32,
    y: i32,
    status: Status,
}

impl RasterizerScanlineAa {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            outline: RasterizerCellsAa::new(width, height),
            filling_rule: FillingRule::NonZero,
            start_x: 0,
            start_y: 0,
            x: 0,
            y: 0,
            status: Status::Initial,
        }
    }

    /// Reset the rasterizer, discarding all polygon data.
    pub fn reset(&mut self) {
        self.outline.reset();
        self.status = Status::Initial;
    }

    /// Set the filling rule (non-zero winding or even-odd).
    pub fn filling_rule(&mut self, rule: FillingRule) {
        self.filling_rule = rule;
    }

    pub fn min_y(&self) -> i32 {
        self.outline.min_y()
    }

    pub fn max_y(&self) -> i32 {
        self.outline.max_y()
    }

    // ---------------------------------------------------------------
    // Contour input
    // ---------------------------------------------------------------

    /// Start a new contour, closing the previous one.
    pub fn move_to_d(&mut self, x: f64, y: f64) {
        if self.status == Status::LineTo {
            self.close_polygon();
        }
        self.start_x = poly_coord(x);
        self.start_y = poly_coord(y);
        self.x = self.start_x;
        self.y = self.start_y;
        self.status = Status::MoveTo;
    }

    pub fn line_to_d(&mut self, x: f64, y: f64) {
        if self.status == Status::Initial {
            self.move_to_d(x, y);
            return;
        }
        let (nx, ny) = (poly_coord(x), poly_coord(y));
        self.outline.line(self.x, self.y, nx, ny);
        self.x = nx;
        self.y = ny;
        self.status = Status::LineTo;
    }

    /// Close the current contour back to its starting point.
    pub fn close_polygon(&mut self) {
        if self.status == Status::LineTo {
            self.outline.line(self.x, self.y, self.start_x, self.start_y);
            self.x = self.start_x;
            self.y = self.start_y;
            self.status = Status::Closed;
        }
    }

    /// Add every contour of a vertex source.
    pub fn add_path<VS: VertexSource>(&mut self, vs: &mut VS, path_id: u32) {
        let (mut x, mut y) = (0.0, 0.0);
        vs.rewind(path_id);
        loop {
            let cmd = vs.vertex(&mut x, &mut y);
            if is_stop(cmd) {
                break;
            }
            if is_move_to(cmd) {
                self.move_to_d(x, y);
            } else if is_vertex(cmd) {
                self.line_to_d(x, y);
            } else if is_close(cmd) || is_end_poly(cmd) {
                self.close_polygon();
            }
        }
        self.close_polygon();
    }

    // ---------------------------------------------------------------
    // Coverage output
    // ---------------------------------------------------------------

    /// Convert a cell area into a coverage value, per the filling rule.
    pub fn calculate_alpha(&self, area: i32) -> u32 {
        let mut cover = area >> (POLY_SUBPIXEL_SHIFT * 2 + 1 - AA_SHIFT);

        if cover < 0 {
            cover = -cover;
        }
        if self.filling_rule == FillingRule::EvenOdd {
            cover &= AA_MASK2 as i32;
            if cover > AA_SCALE as i32 {
                cover = AA_SCALE2 as i32 - cover;
            }
        }
        if cover > AA_MASK as i32 {
            cover = AA_MASK as i32;
        }
        cover as u32
    }

    /// Fill `sl` with the coverage of row `y`. Returns `false` when the row
    /// is empty.
    pub fn sweep_scanline(&self, y: i32, sl: &mut Scanline) -> bool {
        sl.reset(y);
        let cells = self.outline.row(y);
        let width = self.outline.width() as usize;
        let mut cover = 0i32;
        for (x, cell) in cells.iter().take(width).enumerate() {
            cover += cell.cover;
            let alpha = self.calculate_alpha((cover << (POLY_SUBPIXEL_SHIFT + 1)) - cell.area);
            if alpha > 0 {
                sl.add_cell(x as i32, alpha as CoverType);
            }
        }
        sl.num_spans() > 0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::PointD;
    use crate::path_storage::PathStorage;

    fn coverage(ras: &RasterizerScanlineAa, y: i32, width: usize) -> Vec<u8> {
        let mut sl = Scanline::new();
        let mut row = vec![0u8; width];
        if ras.sweep_scanline(y, &mut sl) {
            for span in sl.spans() {
                for (i, c) in sl.covers(span).iter().enumerate() {
                    row[span.x as usize + i] = *c;
                }
            }
        }
        row
    }

    fn rect(ras: &mut RasterizerScanlineAa, x1: f64, y1: f64, x2: f64, y2: f64) {
        ras.move_to_d(x1, y1);
        ras.line_to_d(x2, y1);
        ras.line_to_d(x2, y2);
        ras.line_to_d(x1, y2);
        ras.close_polygon();
    }

    #[test]
    fn test_calculate_alpha() {
        let mut ras = RasterizerScanlineAa::new(1, 1);
        assert_eq!(ras.calculate_alpha(0), 0);
        assert_eq!(ras.calculate_alpha(256 << 9), 255);
        assert_eq!(ras.calculate_alpha(-(128 << 9)), 128);
        ras.filling_rule(FillingRule::EvenOdd);
        assert_eq!(ras.calculate_alpha(512 << 9), 0);
    }

    #[test]
    fn test_axis_aligned_square_full_coverage() {
        let mut ras = RasterizerScanlineAa::new(8, 8);
        rect(&mut ras, 2.0, 2.0, 5.0, 5.0);
        assert_eq!(ras.min_y(), 2);
        assert_eq!(ras.max_y(), 4);
        for y in 2..5 {
            assert_eq!(coverage(&ras, y, 8), vec![0, 0, 255, 255, 255, 0, 0, 0]);
        }
        let mut sl = Scanline::new();
        assert!(!ras.sweep_scanline(1, &mut sl));
    }

    #[test]
    fn test_half_pixel_edges() {
        let mut ras = RasterizerScanlineAa::new(4, 1);
        rect(&mut ras, 0.5, 0.0, 2.5, 1.0);
        assert_eq!(coverage(&ras, 0, 4), vec![128, 255, 128, 0]);
    }

    #[test]
    fn test_orientation_does_not_matter_for_nonzero() {
        let mut cw = RasterizerScanlineAa::new(6, 6);
        rect(&mut cw, 1.0, 1.0, 4.0, 4.0);
        let mut ccw = RasterizerScanlineAa::new(6, 6);
        rect(&mut ccw, 4.0, 1.0, 1.0, 4.0);
        for y in 0..6 {
            assert_eq!(coverage(&cw, y, 6), coverage(&ccw, y, 6));
        }
    }

    #[test]
    fn test_even_odd_hole() {
        let mut ras = RasterizerScanlineAa::new(6, 6);
        ras.filling_rule(FillingRule::EvenOdd);
        rect(&mut ras, 0.0, 0.0, 6.0, 6.0);
        rect(&mut ras, 2.0, 2.0, 4.0, 4.0);
        assert_eq!(coverage(&ras, 3, 6), vec![255, 255, 0, 0, 255, 255]);
    }

    #[test]
    fn test_shape_partly_outside_is_clipped() {
        let mut ras = RasterizerScanlineAa::new(4, 4);
        rect(&mut ras, -10.0, -10.0, 2.0, 10.0);
        for y in 0..4 {
            assert_eq!(coverage(&ras, y, 4), vec![255, 255, 0, 0]);
        }
    }

    #[test]
    fn test_add_path() {
        let path = PathStorage::from_polygon(&[
            PointD::new(0.0, 0.0),
            PointD::new(4.0, 0.0),
            PointD::new(4.0, 4.0),
            PointD::new(0.0, 4.0),
        ]);
        let mut ras = RasterizerScanlineAa::new(4, 4);
        ras.add_path(&mut path.cursor(), 0);
        assert_eq!(coverage(&ras, 0, 4), vec![255; 4]);
        ras.reset();
        let mut sl = Scanline::new();
        assert!(!ras.sweep_scanline(0, &mut sl));
    }
}
