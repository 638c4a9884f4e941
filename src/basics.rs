//! Shared raster vocabulary: coverage and subpixel constants, path
//! commands, points, and the [`VertexSource`] trait every pipeline stage
//! implements.

// ============================================================================
// Coverage and subpixel precision
// ============================================================================

/// Anti-aliasing coverage of one pixel, 0 to 255.
pub type CoverType = u8;

pub const COVER_FULL: CoverType = u8::MAX;

/// Rasterizer coordinates are 24.8 fixed point.
pub const POLY_SUBPIXEL_SHIFT: u32 = 8;
pub const POLY_SUBPIXEL_SCALE: u32 = 1 << POLY_SUBPIXEL_SHIFT;
pub const POLY_SUBPIXEL_MASK: u32 = POLY_SUBPIXEL_SCALE - 1;

/// Pixel coordinate to 24.8 fixed point, rounding half away from zero.
#[inline]
pub fn poly_coord(v: f64) -> i32 {
    (v * POLY_SUBPIXEL_SCALE as f64).round() as i32
}

/// How overlapping contours decide what is inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillingRule {
    #[default]
    NonZero,
    EvenOdd,
}

// ============================================================================
// Path commands
// ============================================================================

pub const PATH_CMD_STOP: u32 = 0;
pub const PATH_CMD_MOVE_TO: u32 = 1;
pub const PATH_CMD_LINE_TO: u32 = 2;
pub const PATH_CMD_END_POLY: u32 = 0x0F;
/// Flag or-ed into `PATH_CMD_END_POLY` when the contour is closed.
pub const PATH_FLAGS_CLOSE: u32 = 0x40;

#[inline]
pub fn is_vertex(cmd: u32) -> bool {
    cmd == PATH_CMD_MOVE_TO || cmd == PATH_CMD_LINE_TO
}

#[inline]
pub fn is_stop(cmd: u32) -> bool {
    cmd == PATH_CMD_STOP
}

#[inline]
pub fn is_move_to(cmd: u32) -> bool {
    cmd == PATH_CMD_MOVE_TO
}

/// End of a contour, closed or not.
#[inline]
pub fn is_end_poly(cmd: u32) -> bool {
    cmd & !PATH_FLAGS_CLOSE == PATH_CMD_END_POLY
}

#[inline]
pub fn is_close(cmd: u32) -> bool {
    cmd == PATH_CMD_END_POLY | PATH_FLAGS_CLOSE
}

// ============================================================================
// Geometry
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointD {
    pub x: f64,
    pub y: f64,
}

impl PointD {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A pull-style stream of path vertices.
///
/// Paths, the transform adaptor and the stroker all implement it, so they
/// chain into each other and finally into the rasterizer.
pub trait VertexSource {
    /// Restart iteration from the first vertex.
    fn rewind(&mut self, path_id: u32);

    /// Write the next vertex into `x`/`y` and return its command;
    /// `PATH_CMD_STOP` once the stream is exhausted.
    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32;
}

impl<T: VertexSource + ?Sized> VertexSource for &mut T {
    fn rewind(&mut self, path_id: u32) {
        (**self).rewind(path_id);
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        (**self).vertex(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poly_coord_rounds_symmetrically() {
        assert_eq!(poly_coord(1.0), 256);
        assert_eq!(poly_coord(0.5), 128);
        assert_eq!(poly_coord(-2.0), -512);
        assert_eq!(poly_coord(0.5 / 256.0), 1);
        assert_eq!(poly_coord(-0.5 / 256.0), -1);
    }

    #[test]
    fn test_commands() {
        assert!(is_stop(PATH_CMD_STOP));
        assert!(is_move_to(PATH_CMD_MOVE_TO));
        assert!(is_vertex(PATH_CMD_LINE_TO));
        assert!(!is_vertex(PATH_CMD_STOP));
        assert!(!is_vertex(PATH_CMD_END_POLY));
        assert!(is_end_poly(PATH_CMD_END_POLY));
        assert!(is_end_poly(PATH_CMD_END_POLY | PATH_FLAGS_CLOSE));
        assert!(is_close(PATH_CMD_END_POLY | PATH_FLAGS_CLOSE));
        assert!(!is_close(PATH_CMD_END_POLY));
    }
}
