//! Affine transform converter for vertex sources.
//!
//! Wraps a [`VertexSource`] and applies a [`TransAffine`] to each vertex
//! coordinate. The canvas uses it to move patch outlines from their local
//! frame into device space.

use crate::basics::{is_vertex, VertexSource};
use crate::trans_affine::TransAffine;

/// Applies an affine transform to each vertex from a source.
///
/// Owns the source; use `ConvTransform<&mut S>` or a
/// [`PathCursor`](crate::path_storage::PathCursor) to borrow.
pub struct ConvTransform<VS: VertexSource> {
    source: VS,
    trans: TransAffine,
}

impl<VS: VertexSource> ConvTransform<VS> {
    pub fn new(source: VS, trans: TransAffine) -> Self {
        Self { source, trans }
    }

    pub fn transform(&self) -> &TransAffine {
        &self.trans
    }
}

impl<VS: VertexSource> VertexSource for ConvTransform<VS> {
    fn rewind(&mut self, path_id: u32) {
        self.source.rewind(path_id);
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        let cmd = self.source.vertex(x, y);
        if is_vertex(cmd) {
            self.trans.transform(x, y);
        }
        cmd
    }
}

// ============================================================================
// Tests
// ============================================================================
