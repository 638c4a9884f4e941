//! Nine-cell grid layout.
//!
//! One center patch, four side patches walking clockwise from the top and
//! four corner patches walking clockwise from the top-left. Each step
//! around the ring adds one quarter turn, so the side and corner rings are
//! rotationally symmetric.

use crate::canvas::Surface;
use crate::code::RenderSpec;
use crate::color::Rgba8;
use crate::color_policy::PatchColors;
use crate::patch::PatchLibrary;
use crate::patch_renderer::draw_patch;

/// Which ring of the grid a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellRole {
    Center,
    Side,
    Corner,
}

/// One patch instance on the grid, in source-canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPlacement {
    pub x: u32,
    pub y: u32,
    /// Catalog index, reduced modulo the catalog length when drawn.
    pub patch: usize,
    /// Quarter turns, reduced modulo 4 when drawn.
    pub turn: u32,
    pub invert: bool,
    pub role: CellRole,
}

/// Grid positions as multiples of the cell size: sides from the top,
/// corners from the top-left, both clockwise.
const SIDE_CELLS: [(u32, u32); 4] = [(1, 0), (2, 1), (1, 2), (0, 1)];
const CORNER_CELLS: [(u32, u32); 4] = [(0, 0), (2, 0), (2, 2), (0, 2)];

/// Place the nine patches for `spec` on a grid of `cell_size` pixel cells.
///
/// Order: center, then the four sides, then the four corners.
pub fn layout(spec: &RenderSpec, cell_size: u32) -> [CellPlacement; 9] {
    let s = cell_size;
    let center = CellPlacement {
        x: s,
        y: s,
        patch: spec.middle_type,
        turn: 0,
        invert: spec.middle_invert,
        role: CellRole::Center,
    };
    let mut cells = [center; 9];
    for (i, (cx, cy)) in SIDE_CELLS.into_iter().enumerate() {
        cells[1 + i] = CellPlacement {
            x: cx * s,
            y: cy * s,
            patch: spec.side_type,
            turn: spec.side_turn.wrapping_add(i as u32),
            invert: spec.side_invert,
            role: CellRole::Side,
        };
    }
    for (i, (cx, cy)) in CORNER_CELLS.into_iter().enumerate() {
        cells[5 + i] = CellPlacement {
            x: cx * s,
            y: cy * s,
            patch: spec.corner_type,
            turn: spec.corner_turn.wrapping_add(i as u32),
            invert: spec.corner_invert,
            role: CellRole::Corner,
        };
    }
    cells
}

/// Draw all nine patches onto `surface`.
pub fn compose<S: Surface + ?Sized>(
    surface: &mut S,
    library: &PatchLibrary,
    spec: &RenderSpec,
    colors: &PatchColors,
    background: Rgba8,
    stroke_width: f64,
) {
    for cell in layout(spec, library.cell_size()) {
        draw_patch(surface, library, &cell, colors, background, stroke_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::decode;

    #[test]
    fn test_layout_positions() {
        let cells = layout(&decode(0u32), 20);
        let pos: Vec<_> = cells.iter().map(|c| (c.x, c.y)).collect();
        assert_eq!(
            pos,
            vec![
                (20, 20),
                (20, 0),
                (40, 20),
                (20, 40),
                (0, 20),
                (0, 0),
                (40, 0),
                (40, 40),
                (0, 40),
            ]
        );
        assert_eq!(cells[0].role, CellRole::Center);
        assert!(cells[1..5].iter().all(|c| c.role == CellRole::Side));
        assert!(cells[5..].iter().all(|c| c.role == CellRole::Corner));
    }

    #[test]
    fn test_turns_advance_clockwise() {
        let mut spec = decode(0u32);
        spec.side_turn = 3;
        spec.corner_turn = 1;
        let cells = layout(&spec, 20);
        assert_eq!(cells[0].turn, 0);
        let sides: Vec<_> = cells[1..5].iter().map(|c| c.turn).collect();
        assert_eq!(sides, vec![3, 4, 5, 6]);
        let corners: Vec<_> = cells[5..].iter().map(|c| c.turn).collect();
        assert_eq!(corners, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_layout_scales_with_cell_size() {
        let spec = decode(0x1234_5678u32);
        let small = layout(&spec, 20);
        let large = layout(&spec, 40);
        for (a, b) in small.iter().zip(large.iter()) {
            assert_eq!((a.x * 2, a.y * 2), (b.x, b.y));
            assert_eq!((a.patch, a.turn, a.invert), (b.patch, b.turn, b.invert));
        }
    }

    #[test]
    fn test_placements_carry_spec_fields() {
        let mut spec = decode(0u32);
        spec.middle_type = 8;
        spec.side_type = 6;
        spec.side_invert = true;
        spec.corner_type = 14;
        let cells = layout(&spec, 20);
        assert_eq!(cells[0].patch, 8);
        assert!(cells[1..5].iter().all(|c| c.patch == 6 && c.invert));
        assert!(cells[5..].iter().all(|c| c.patch == 14 && !c.invert));
    }
}
