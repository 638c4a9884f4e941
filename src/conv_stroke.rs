//! Stroke converter for closed polygons.
//!
//! Generates the outline ring of every sub-path of a source: an offset
//! contour on each side of the center line, the second one traversed in
//! reverse so that the non-zero rule fills exactly the band between them.
//!
//! Joins are mitered up to `miter_limit` (as a multiple of the half width).
//! Past the limit the outer side falls back to a bevel and the inner side
//! to a jag through the vertex itself. Every sub-path is treated as closed:
//! the canvas only ever strokes polygon outlines.

use crate::basics::{
    is_end_poly, is_move_to, is_stop, is_vertex, PointD, VertexSource, PATH_CMD_END_POLY,
    PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP, PATH_FLAGS_CLOSE,
};
use crate::path_storage::Vertex;

/// Points closer than this are merged before offsetting.
const VERTEX_DIST_EPSILON: f64 = 1e-9;

/// Default miter limit, in half widths.
pub const DEFAULT_MITER_LIMIT: f64 = 4.0;

/// Stroke converter: generates a stroked outline from a polygon path.
pub struct ConvStroke<VS: VertexSource> {
    source: VS,
    width: f64,
    miter_limit: f64,
    out_vertices: Vec<Vertex>,
    out_vertex: usize,
}

impl<VS: VertexSource> ConvStroke<VS> {
    pub fn new(source: VS) -> Self {
        Self {
            source,
            width: 1.0,
            miter_limit: DEFAULT_MITER_LIMIT,
            out_vertices: Vec::new(),
            out_vertex: 0,
        }
    }

    pub fn set_width(&mut self, w: f64) {
        self.width = w.abs();
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn set_miter_limit(&mut self, ml: f64) {
        self.miter_limit = ml;
    }

    pub fn miter_limit(&self) -> f64 {
        self.miter_limit
    }

    /// Read every sub-path from the source and generate the outline rings.
    fn generate(&mut self, path_id: u32) {
        self.out_vertices.clear();
        self.out_vertex = 0;
        self.source.rewind(path_id);

        let mut poly: Vec<PointD> = Vec::new();
        let (mut x, mut y) = (0.0, 0.0);
        loop {
            let cmd = self.source.vertex(&mut x, &mut y);
            if is_stop(cmd) {
                break;
            }
            if is_move_to(cmd) {
                self.emit_ring(&poly);
                poly.clear();
                poly.push(PointD::new(x, y));
            } else if is_vertex(cmd) {
                poly.push(PointD::new(x, y));
            } else if is_end_poly(cmd) {
                self.emit_ring(&poly);
                poly.clear();
            }
        }
        self.emit_ring(&poly);
    }

    fn emit_ring(&mut self, poly: &[PointD]) {
        let points = dedup_closed(poly);
        if points.len() < 2 || self.width <= 0.0 {
            return;
        }
        let half = self.width / 2.0;
        let outer = offset_contour(&points, half, self.miter_limit);
        let mut inner = offset_contour(&points, -half, self.miter_limit);
        inner.reverse();
        self.push_contour(&outer);
        self.push_contour(&inner);
    }

    fn push_contour(&mut self, contour: &[PointD]) {
        for (i, p) in contour.iter().enumerate() {
            let cmd = if i == 0 { PATH_CMD_MOVE_TO } else { PATH_CMD_LINE_TO };
            self.out_vertices.push(Vertex::new(p.x, p.y, cmd));
        }
        self.out_vertices
            .push(Vertex::new(0.0, 0.0, PATH_CMD_END_POLY | PATH_FLAGS_CLOSE));
    }
}

impl<VS: VertexSource> VertexSource for ConvStroke<VS> {
    fn rewind(&mut self, path_id: u32) {
        self.generate(path_id);
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        let Some(v) = self.out_vertices.get(self.out_vertex) else {
            return PATH_CMD_STOP;
        };
        *x = v.x;
        *y = v.y;
        self.out_vertex += 1;
        v.cmd
    }
}

// ============================================================================
// Geometry helpers
// ============================================================================

/// Drop consecutive duplicates and a trailing copy of the first point.
fn dedup_closed(poly: &[PointD]) -> Vec<PointD> {
    let mut out: Vec<PointD> = Vec::with_capacity(poly.len());
    for p in poly {
        if out.last().map_or(true, |q| distance(q, p) > VERTEX_DIST_EPSILON) {
            out.push(*p);
        }
    }
    while out.len() > 1 && distance(&out[0], &out[out.len() - 1]) <= VERTEX_DIST_EPSILON {
        out.pop();
    }
    out
}

#[inline]
fn distance(a: &PointD, b: &PointD) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

/// Unit direction from `a` to `b`.
#[inline]
fn direction(a: &PointD, b: &PointD) -> (f64, f64) {
    let len = distance(a, b);
    ((b.x - a.x) / len, (b.y - a.y) / len)
}

/// Offset a closed polygon by `offset` along the left normal `(-dy, dx)`
/// of each edge (negative offsets go to the other side).
fn offset_contour(points: &[PointD], offset: f64, miter_limit: f64) -> Vec<PointD> {
    let n = points.len();
    let mut out = Vec::with_capacity(n * 2);
    for i in 0..n {
        let prev = &points[(i + n - 1) % n];
        let cur = &points[i];
        let next = &points[(i + 1) % n];

        let (d0x, d0y) = direction(prev, cur);
        let (d1x, d1y) = direction(cur, next);
        let (n0x, n0y) = (-d0y * offset, d0x * offset);
        let (n1x, n1y) = (-d1y * offset, d1x * offset);

        let cos = d0x * d1x + d0y * d1y;
        let denom = 1.0 + cos;
        let miter_ratio = if denom > VERTEX_DIST_EPSILON {
            (2.0 / denom).sqrt()
        } else {
            f64::INFINITY
        };

        if miter_ratio <= miter_limit {
            out.push(PointD::new(
                cur.x + (n0x + n1x) / denom,
                cur.y + (n0y + n1y) / denom,
            ));
            continue;
        }

        // The path turns toward the offset side: this is the inner corner.
        let cross = d0x * d1y - d0y * d1x;
        out.push(PointD::new(cur.x + n0x, cur.y + n0y));
        if cross * offset > 0.0 {
            out.push(*cur);
        }
        out.push(PointD::new(cur.x + n1x, cur.y + n1y));
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
