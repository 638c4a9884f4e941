//! Drawing a single patch.

use crate::canvas::Surface;
use crate::color::Rgba8;
use crate::color_policy::PatchColors;
use crate::composer::CellPlacement;
use crate::patch::{PatchFlags, PatchLibrary};

/// Guard stroke width in source-canvas pixels.
pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;

/// Draw one patch into its cell.
///
/// The cell square is painted first (fill color when inverted, background
/// otherwise), then the polygon is drawn in a frame centered on the cell
/// and rotated by the placement's turn: the guard outline if there is one,
/// then the shape itself in the opposite color of the cell.
pub fn draw_patch<S: Surface + ?Sized>(
    surface: &mut S,
    library: &PatchLibrary,
    placement: &CellPlacement,
    colors: &PatchColors,
    background: Rgba8,
    stroke_width: f64,
) {
    let patch = placement.patch % library.len();
    let turn = placement.turn % 4;
    let invert = placement.invert ^ library.flags(patch).contains(PatchFlags::INVERTED);

    log::trace!(
        "patch {} at ({}, {}) turn {} invert {}",
        patch,
        placement.x,
        placement.y,
        turn,
        invert
    );

    let size = library.cell_size() as f64;
    let (x, y) = (placement.x as f64, placement.y as f64);
    let (cell, shape) = if invert {
        (colors.fill, background)
    } else {
        (background, colors.fill)
    };
    surface.fill_rect(x, y, size, size, cell);

    let offset = library.offset() as f64;
    surface.save();
    surface.translate(x + offset, y + offset);
    surface.rotate_quarter_turns(turn);
    let path = library.shape(patch);
    if let Some(guard) = colors.guard {
        surface.stroke_path(path, stroke_width, guard);
    }
    surface.fill_path(path, shape);
    surface.restore();
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::composer::CellRole;
    use crate::path_storage::PathStorage;

    /// Records the calls made against it.
    #[derive(Default)]
    struct Recorder {
        ops: Vec<String>,
    }

    impl Surface for Recorder {
        fn width(&self) -> u32 {
            60
        }
        fn height(&self) -> u32 {
            60
        }
        fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba8) {
            self.ops.push(format!("rect {} {} {} {} {}", x, y, w, h, color));
        }
        fn fill_path(&mut self, _path: &PathStorage, color: Rgba8) {
            self.ops.push(format!("fill {}", color));
        }
        fn stroke_path(&mut self, _path: &PathStorage, width: f64, color: Rgba8) {
            self.ops.push(format!("stroke {} {}", width, color));
        }
        fn save(&mut self) {
            self.ops.push("save".into());
        }
        fn restore(&mut self) {
            self.ops.push("restore".into());
        }
        fn translate(&mut self, dx: f64, dy: f64) {
            self.ops.push(format!("translate {} {}", dx, dy));
        }
        fn rotate(&mut self, angle: f64) {
            self.ops.push(format!("rotate {}", angle));
        }
        fn rotate_quarter_turns(&mut self, turns: u32) {
            self.ops.push(format!("turn {}", turns));
        }
    }

    fn placement(patch: usize, turn: u32, invert: bool) -> CellPlacement {
        CellPlacement {
            x: 20,
            y: 40,
            patch,
            turn,
            invert,
            role: CellRole::Side,
        }
    }

    const RED: Rgba8 = Rgba8::new_opaque(255, 0, 0);

    #[test]
    fn test_draw_order() {
        let lib = PatchLibrary::new(20);
        let colors = PatchColors {
            fill: RED,
            guard: Some(RED.complement()),
        };
        let mut rec = Recorder::default();
        draw_patch(&mut rec, &lib, &placement(1, 6, false), &colors, Rgba8::WHITE, 1.0);
        assert_eq!(
            rec.ops,
            vec![
                "rect 20 40 20 20 #ffffff",
                "save",
                "translate 30 50",
                "turn 2",
                "stroke 1 #00ffff",
                "fill #ff0000",
                "restore",
            ]
        );
    }

    #[test]
    fn test_invert_swaps_colors() {
        let lib = PatchLibrary::new(20);
        let colors = PatchColors {
            fill: RED,
            guard: None,
        };
        let mut rec = Recorder::default();
        draw_patch(&mut rec, &lib, &placement(2, 0, true), &colors, Rgba8::WHITE, 1.0);
        assert_eq!(rec.ops[0], "rect 20 40 20 20 #ff0000");
        assert_eq!(rec.ops[4], "fill #ffffff");
    }

    #[test]
    fn test_catalog_inversion_cancels_placement_inversion() {
        let lib = PatchLibrary::new(20);
        let colors = PatchColors {
            fill: RED,
            guard: None,
        };
        let mut rec = Recorder::default();
        // 31 wraps to 15, which carries the INVERTED flag.
        draw_patch(&mut rec, &lib, &placement(31, 0, true), &colors, Rgba8::WHITE, 1.0);
        assert_eq!(rec.ops[0], "rect 20 40 20 20 #ffffff");
        assert_eq!(rec.ops[4], "fill #ff0000");
    }

    #[test]
    fn test_full_square_covers_cell() {
        let lib = PatchLibrary::new(20);
        let colors = PatchColors {
            fill: Rgba8::BLACK,
            guard: None,
        };
        let mut canvas = Canvas::new(60, 60, Rgba8::WHITE).unwrap();
        draw_patch(&mut canvas, &lib, &placement(0, 3, false), &colors, Rgba8::WHITE, 1.0);
        let buf = canvas.buffer();
        for y in 40..60 {
            for x in 20..40 {
                assert_eq!(buf.pixel(x, y), Some(Rgba8::BLACK), "at ({}, {})", x, y);
            }
        }
        assert_eq!(buf.pixel(19, 50), Some(Rgba8::WHITE));
        assert_eq!(buf.pixel(40, 50), Some(Rgba8::WHITE));
        assert_eq!(canvas.save_depth(), 0);
    }
}
