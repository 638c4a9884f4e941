//! Patch catalog and the per-size polygon library.
//!
//! A patch is a polygon whose vertices sit on a 5×5 grid, numbered 0 to 24
//! left to right, top to bottom. The catalog is fixed; [`PatchLibrary`]
//! turns it into polygons for one cell size, centered on the origin so a
//! rotation about the origin turns the patch in place.

use bitflags::bitflags;

use crate::basics::PointD;
use crate::path_storage::PathStorage;

/// Grid cells per patch side.
pub const PATCH_CELLS: u32 = 4;
/// Grid points per patch side.
pub const PATCH_GRIDS: u32 = PATCH_CELLS + 1;

bitflags! {
    /// Per-patch catalog flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PatchFlags: u8 {
        /// The shape looks the same under a half turn.
        const SYMMETRIC = 1;
        /// The patch is drawn with fill and background swapped.
        const INVERTED = 2;
    }
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchDef {
    /// Grid vertex indices; the last repeats the first.
    pub vertices: &'static [u8],
    pub flags: PatchFlags,
}

const fn def(vertices: &'static [u8], flags: PatchFlags) -> PatchDef {
    PatchDef { vertices, flags }
}

const NONE: PatchFlags = PatchFlags::empty();
const SYM: PatchFlags = PatchFlags::SYMMETRIC;

/// The full vocabulary. Entry 15 is entry 0 drawn inverted.
pub const PATCH_CATALOG: [PatchDef; 16] = [
    def(&[0, 4, 24, 20, 0], SYM),
    def(&[0, 4, 20, 0], NONE),
    def(&[2, 24, 20, 2], NONE),
    def(&[0, 2, 20, 22, 0], NONE),
    def(&[2, 14, 22, 10, 2], SYM),
    def(&[0, 14, 24, 22, 0], NONE),
    def(&[2, 24, 22, 13, 11, 22, 20, 2], NONE),
    def(&[0, 14, 22, 0], NONE),
    def(&[6, 8, 18, 16, 6], SYM),
    def(&[4, 20, 10, 12, 2, 4], NONE),
    def(&[0, 2, 12, 10, 0], NONE),
    def(&[10, 14, 22, 10], NONE),
    def(&[20, 12, 24, 20], NONE),
    def(&[10, 2, 12, 10], NONE),
    def(&[0, 2, 10, 0], NONE),
    def(
        &[0, 4, 24, 20, 0],
        PatchFlags::SYMMETRIC.union(PatchFlags::INVERTED),
    ),
];

/// Number of catalog entries.
pub const PATCH_COUNT: usize = PATCH_CATALOG.len();

/// Normalize a turn for a patch: modulo 4, and modulo 2 for symmetric
/// patches whose half turn is a no-op.
pub fn canonical_turn(patch: usize, turn: u32) -> u32 {
    let turn = turn % 4;
    if PATCH_CATALOG[patch % PATCH_COUNT]
        .flags
        .contains(PatchFlags::SYMMETRIC)
    {
        turn % 2
    } else {
        turn
    }
}

// ============================================================================
// PatchLibrary
// ============================================================================

/// Catalog polygons for one cell size.
///
/// Grid coordinates use integer scale `cell_size / 4` and offset
/// `cell_size / 2`, so sizes not divisible by 4 lose sub-cell precision.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchLibrary {
    cell_size: u32,
    offset: u32,
    shapes: Vec<PathStorage>,
}

impl PatchLibrary {
    pub fn new(cell_size: u32) -> Self {
        let mut lib = Self {
            cell_size: 0,
            offset: 0,
            shapes: Vec::with_capacity(PATCH_COUNT),
        };
        lib.configure(cell_size);
        lib
    }

    /// Rebuild every polygon for a new cell size.
    pub fn configure(&mut self, cell_size: u32) {
        if cell_size % PATCH_CELLS != 0 {
            log::warn!(
                "patch size {} is not a multiple of {}; patch vertices will be rounded",
                cell_size,
                PATCH_CELLS
            );
        }
        let scale = (cell_size / PATCH_CELLS) as i64;
        let offset = cell_size / 2;

        self.shapes = PATCH_CATALOG
            .iter()
            .map(|patch| {
                let points: Vec<PointD> = patch
                    .vertices
                    .iter()
                    .map(|&v| {
                        let v = v as u32;
                        let vx = (v % PATCH_GRIDS) as i64 * scale - offset as i64;
                        let vy = (v / PATCH_GRIDS) as i64 * scale - offset as i64;
                        PointD::new(vx as f64, vy as f64)
                    })
                    .collect();
                PathStorage::from_polygon(&points)
            })
            .collect();
        self.cell_size = cell_size;
        self.offset = offset;
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Distance from a cell corner to its center, in whole pixels.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Polygon for a patch index (taken modulo the catalog length).
    pub fn shape(&self, index: usize) -> &PathStorage {
        &self.shapes[index % self.shapes.len()]
    }

    /// Flags for a patch index (taken modulo the catalog length).
    pub fn flags(&self, index: usize) -> PatchFlags {
        PATCH_CATALOG[index % PATCH_COUNT].flags
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        assert_eq!(PATCH_COUNT, 16);
        assert_eq!(PATCH_CATALOG[15].vertices, PATCH_CATALOG[0].vertices);
        for patch in &PATCH_CATALOG {
            assert!(patch.vertices.iter().all(|&v| (v as u32) < PATCH_GRIDS * PATCH_GRIDS));
            assert_eq!(patch.vertices.first(), patch.vertices.last());
        }
    }

    #[test]
    fn test_flags() {
        for (i, patch) in PATCH_CATALOG.iter().enumerate() {
            let expected = match i {
                0 | 4 | 8 => PatchFlags::SYMMETRIC,
                15 => PatchFlags::SYMMETRIC | PatchFlags::INVERTED,
                _ => PatchFlags::empty(),
            };
            assert_eq!(patch.flags, expected, "patch {}", i);
        }
    }

    #[test]
    fn test_polygons_are_centered() {
        let lib = PatchLibrary::new(20);
        assert_eq!(lib.len(), 16);
        assert_eq!(lib.offset(), 10);
        let square: Vec<_> = lib.shape(0).points().collect();
        assert_eq!(square[0], PointD::new(-10.0, -10.0));
        assert_eq!(square[1], PointD::new(10.0, -10.0));
        assert_eq!(square[2], PointD::new(10.0, 10.0));
        assert_eq!(square[3], PointD::new(-10.0, 10.0));
        assert_eq!(lib.shape(0).bounding_rect(), Some((-10.0, -10.0, 10.0, 10.0)));
        // center square of patch 8
        assert_eq!(lib.shape(8).bounding_rect(), Some((-5.0, -5.0, 5.0, 5.0)));
    }

    #[test]
    fn test_index_wraps() {
        let lib = PatchLibrary::new(20);
        assert_eq!(lib.shape(17), lib.shape(1));
        assert_eq!(lib.flags(31), PatchFlags::SYMMETRIC | PatchFlags::INVERTED);
    }

    #[test]
    fn test_reconfigure_replaces_polygons() {
        let mut lib = PatchLibrary::new(20);
        lib.configure(40);
        assert_eq!(lib.cell_size(), 40);
        assert_eq!(lib.shape(0).bounding_rect(), Some((-20.0, -20.0, 20.0, 20.0)));
    }

    #[test]
    fn test_size_not_multiple_of_four_rounds() {
        // scale 5, offset 11: the far edge lands at 9, not 11.
        let lib = PatchLibrary::new(22);
        assert_eq!(lib.shape(0).bounding_rect(), Some((-11.0, -11.0, 9.0, 9.0)));
    }

    #[test]
    fn test_canonical_turn() {
        assert_eq!(canonical_turn(0, 2), 0);
        assert_eq!(canonical_turn(4, 3), 1);
        assert_eq!(canonical_turn(1, 3), 3);
        assert_eq!(canonical_turn(1, 6), 2);
        assert_eq!(canonical_turn(31, 2), 0);
    }
}
