//! Anti-aliased cell rasterizer engine.
//!
//! Converts edges (line segments in 24.8 fixed-point coordinates) into
//! per-pixel cells holding a `cover` (net winding contribution, the sum of
//! dy across the cell) and an `area` (twice the signed area of the edge
//! fragments inside the cell). `RasterizerScanlineAa` turns those into
//! coverage values.
//!
//! The canvases here are small, so cells live in a dense grid clipped to the
//! target size instead of a sorted cell list. Geometry left of the target
//! is folded onto its left edge (it still contributes winding), geometry
//! right of it lands in a spill column that is never swept, and rows outside
//! the target are dropped.

use crate::basics::{POLY_SUBPIXEL_MASK, POLY_SUBPIXEL_SCALE, POLY_SUBPIXEL_SHIFT};

// ============================================================================
// CellAa: a single pixel cell with coverage data
// ============================================================================

/// A pixel cell storing accumulated coverage and area from edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellAa {
    pub cover: i32,
    pub area: i32,
}

// ============================================================================
// RasterizerCellsAa: the edge-to-cell conversion engine
// ============================================================================

/// Dense cell grid covering `width × height` pixels plus one spill column.
pub struct RasterizerCellsAa {
    width: u32,
    height: u32,
    cells: Vec<CellAa>,
    min_y: i32,
    max_y: i32,
}

impl RasterizerCellsAa {
    pub fn new(width: u32, height: u32) -> Self {
        let cols = width as usize + 1;
        Self {
            width,
            height,
            cells: vec![CellAa::default(); cols * height as usize],
            min_y: i32::MAX,
            max_y: i32::MIN,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Clear every touched row.
    pub fn reset(&mut self) {
        if self.min_y <= self.max_y {
            let cols = self.cols();
            let start = self.min_y as usize * cols;
            let end = (self.max_y as usize + 1) * cols;
            self.cells[start..end].fill(CellAa::default());
        }
        self.min_y = i32::MAX;
        self.max_y = i32::MIN;
    }

    /// First row holding cells.
    pub fn min_y(&self) -> i32 {
        self.min_y
    }

    /// Last row holding cells.
    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    /// Total number of cells with a non-zero contribution.
    pub fn total_cells(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.cover != 0 || c.area != 0)
            .count()
    }

    /// Cells of row `y`, including the spill column.
    pub fn row(&self, y: i32) -> &[CellAa] {
        if y < 0 || y as u32 >= self.height {
            return &[];
        }
        let cols = self.cols();
        let start = y as usize * cols;
        &self.cells[start..start + cols]
    }

    #[inline]
    fn cols(&self) -> usize {
        self.width as usize + 1
    }

    // ---------------------------------------------------------------
    // Edge input
    // ---------------------------------------------------------------

    /// Add an edge from `(x1, y1)` to `(x2, y2)` in 24.8 fixed point.
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        if y1 == y2 {
            return;
        }
        let right = (self.width as i32) << POLY_SUBPIXEL_SHIFT;

        // Split where the edge crosses the left or right boundary so each
        // piece can be clamped without changing its winding.
        let mut cuts: [(i32, i32); 4] = [(x1, y1); 4];
        let mut n = 1;
        let bounds = if x1 <= x2 { [0, right] } else { [right, 0] };
        for bx in bounds {
            if let Some(p) = crossing(x1, y1, x2, y2, bx) {
                cuts[n] = p;
                n += 1;
            }
        }
        cuts[n] = (x2, y2);
        n += 1;

        for w in cuts[..n].windows(2) {
            let (ax, ay) = w[0];
            let (bx, by) = w[1];
            self.render_line(ax.clamp(0, right), ay, bx.clamp(0, right), by);
        }
    }

    /// Walk the edge row by row; `x` is already within `[0, width << 8]`.
    fn render_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        if y1 == y2 {
            return;
        }
        let dx = (x2 - x1) as i64;
        let dy = (y2 - y1) as i64;
        let x_at = |y: i32| x1 + (dx * (y - y1) as i64 / dy) as i32;

        let (lo, hi) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
        let first_row = (lo >> POLY_SUBPIXEL_SHIFT).max(0);
        let last_row = ((hi - 1) >> POLY_SUBPIXEL_SHIFT).min(self.height as i32 - 1);
        if first_row > last_row {
            return;
        }

        for ey in first_row..=last_row {
            let top = ey << POLY_SUBPIXEL_SHIFT;
            let bottom = top + POLY_SUBPIXEL_SCALE as i32;
            let (ya, yb) = if y1 < y2 {
                (y1.max(top), y2.min(bottom))
            } else {
                (y1.min(bottom), y2.max(top))
            };
            if ya == yb {
                continue;
            }
            self.render_hline(ey, x_at(ya), ya - top, x_at(yb), yb - top);
        }
        self.min_y = self.min_y.min(first_row);
        self.max_y = self.max_y.max(last_row);
    }

    /// Distribute a piece confined to row `ey` over the cells it crosses.
    /// `fy1`/`fy2` are offsets within the row, in `[0, 256]`.
    fn render_hline(&mut self, ey: i32, x1: i32, fy1: i32, x2: i32, fy2: i32) {
        let ex1 = x1 >> POLY_SUBPIXEL_SHIFT;
        let ex2 = x2 >> POLY_SUBPIXEL_SHIFT;
        if ex1 == ex2 {
            let mask = POLY_SUBPIXEL_MASK as i32;
            self.add(ey, ex1, x1 & mask, fy1, x2 & mask, fy2);
            return;
        }

        let dx = (x2 - x1) as i64;
        let dy = (fy2 - fy1) as i64;
        let step = if x2 > x1 { 1 } else { -1 };
        let (mut cx, mut px, mut py) = (ex1, x1, fy1);
        while cx != ex2 {
            let bx = if step > 0 { (cx + 1) << 8 } else { cx << 8 };
            let by = fy1 + (dy * (bx - x1) as i64 / dx) as i32;
            let base = cx << POLY_SUBPIXEL_SHIFT;
            self.add(ey, cx, px - base, py, bx - base, by);
            px = bx;
            py = by;
            cx += step;
        }
        let base = cx << POLY_SUBPIXEL_SHIFT;
        self.add(ey, cx, px - base, py, x2 - base, fy2);
    }

    #[inline]
    fn add(&mut self, ey: i32, ex: i32, fx1: i32, fy1: i32, fx2: i32, fy2: i32) {
        let d = fy2 - fy1;
        if d == 0 {
            return;
        }
        let cols = self.cols();
        let ex = (ex.max(0) as usize).min(cols - 1);
        let cell = &mut self.cells[ey as usize * cols + ex];
        cell.cover += d;
        cell.area += (fx1 + fx2) * d;
    }
}

/// Point where the edge strictly crosses the vertical line `x = bx`.
fn crossing(x1: i32, y1: i32, x2: i32, y2: i32, bx: i32) -> Option<(i32, i32)> {
    if (x1 < bx && x2 > bx) || (x1 > bx && x2 < bx) {
        let t = (bx - x1) as i64 * (y2 - y1) as i64 / (x2 - x1) as i64;
        Some((bx, y1 + t as i32))
    } else {
        None
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: i32 = POLY_SUBPIXEL_SCALE as i32;

    #[test]
    fn test_vertical_edge_on_pixel_boundary() {
        let mut cells = RasterizerCellsAa::new(4, 4);
        cells.line(ONE, 0, ONE, 2 * ONE);
        assert_eq!(cells.min_y(), 0);
        assert_eq!(cells.max_y(), 1);
        assert_eq!(cells.row(0)[1], CellAa { cover: ONE, area: 0 });
        assert_eq!(cells.row(1)[1], CellAa { cover: ONE, area: 0 });
        assert_eq!(cells.total_cells(), 2);
    }

    #[test]
    fn test_vertical_edge_mid_pixel() {
        let mut cells = RasterizerCellsAa::new(4, 4);
        cells.line(ONE / 2, 0, ONE / 2, ONE);
        assert_eq!(cells.row(0)[0], CellAa { cover: ONE, area: ONE * ONE });
    }

    #[test]
    fn test_horizontal_edge_adds_nothing() {
        let mut cells = RasterizerCellsAa::new(4, 4);
        cells.line(0, ONE, 3 * ONE, ONE);
        assert_eq!(cells.total_cells(), 0);
        assert!(cells.min_y() > cells.max_y());
    }

    #[test]
    fn test_diagonal_cover_sums_to_dy() {
        let mut cells = RasterizerCellsAa::new(8, 8);
        cells.line(0, 0, 6 * ONE, 3 * ONE);
        for y in 0..3 {
            let total: i32 = cells.row(y).iter().map(|c| c.cover).sum();
            assert_eq!(total, ONE);
        }
    }

    #[test]
    fn test_left_of_canvas_folds_to_column_zero() {
        let mut cells = RasterizerCellsAa::new(4, 4);
        cells.line(-5 * ONE, 0, -5 * ONE, ONE);
        assert_eq!(cells.row(0)[0], CellAa { cover: ONE, area: 0 });
    }

    #[test]
    fn test_edge_crossing_left_boundary() {
        let mut cells = RasterizerCellsAa::new(4, 4);
        cells.line(-ONE, 0, ONE, 2 * ONE);
        let total: i32 = (0..2).map(|y| cells.row(y).iter().map(|c| c.cover).sum::<i32>()).sum();
        assert_eq!(total, 2 * ONE);
        // The upper half lies left of the canvas.
        assert_eq!(cells.row(0)[0].area, 0);
    }

    #[test]
    fn test_rows_outside_are_dropped() {
        let mut cells = RasterizerCellsAa::new(4, 4);
        cells.line(ONE, -3 * ONE, ONE, 10 * ONE);
        assert_eq!(cells.min_y(), 0);
        assert_eq!(cells.max_y(), 3);
        assert!(cells.row(-1).is_empty());
        assert!(cells.row(4).is_empty());
    }

    #[test]
    fn test_reset() {
        let mut cells = RasterizerCellsAa::new(4, 4);
        cells.line(ONE, 0, 2 * ONE, 3 * ONE);
        assert!(cells.total_cells() > 0);
        cells.reset();
        assert_eq!(cells.total_cells(), 0);
    }
}
