//! Path storage: the vertex container for polygon outlines.
//!
//! Stores vertices with path commands in a flat `Vec`. A path can hold
//! several sub-paths, each started by `move_to` and optionally terminated
//! by `close_polygon`.

use crate::basics::{
    is_move_to, is_stop, is_vertex, PointD, VertexSource, PATH_CMD_END_POLY, PATH_CMD_LINE_TO,
    PATH_CMD_MOVE_TO, PATH_CMD_STOP, PATH_FLAGS_CLOSE,
};

/// A vertex with coordinates and a path command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub cmd: u32,
}

impl Vertex {
    pub fn new(x: f64, y: f64, cmd: u32) -> Self {
        Self { x, y, cmd }
    }
}

/// Path storage: an ordered sequence of vertices with commands.
///
/// Implements [`VertexSource`] directly; use [`PathStorage::cursor`] to
/// iterate a shared path without cloning it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathStorage {
    vertices: Vec<Vertex>,
    iterator: usize,
}

impl PathStorage {
    /// Create an empty path storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a closed polygon from a list of points.
    pub fn from_polygon(points: &[PointD]) -> Self {
        let mut path = Self::new();
        if let Some((first, rest)) = points.split_first() {
            path.move_to(first.x, first.y);
            for p in rest {
                path.line_to(p.x, p.y);
            }
            path.close_polygon();
        }
        path
    }

    // ---------------------------------------------------------------
    // Path construction
    // ---------------------------------------------------------------

    /// Add a move_to command.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.vertices.push(Vertex::new(x, y, PATH_CMD_MOVE_TO));
    }

    /// Add a line_to command.
    pub fn line_to(&mut self, x: f64, y: f64) {
        self.vertices.push(Vertex::new(x, y, PATH_CMD_LINE_TO));
    }

    /// Close the current polygon. No-op if the last command is not a vertex.
    pub fn close_polygon(&mut self) {
        if is_vertex(self.last_command()) {
            self.vertices
                .push(Vertex::new(0.0, 0.0, PATH_CMD_END_POLY | PATH_FLAGS_CLOSE));
        }
    }

    // ---------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------

    /// Total number of vertices stored (including end_poly markers).
    pub fn total_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// All stored vertices.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Command of the last vertex, or `PATH_CMD_STOP` if empty.
    pub fn last_command(&self) -> u32 {
        self.vertices.last().map_or(PATH_CMD_STOP, |v| v.cmd)
    }

    /// Number of sub-paths (counted by `move_to` commands).
    pub fn num_paths(&self) -> usize {
        self.vertices.iter().filter(|v| is_move_to(v.cmd)).count()
    }

    /// Coordinates of every vertex command, in order.
    pub fn points(&self) -> impl Iterator<Item = PointD> + '_ {
        self.vertices
            .iter()
            .filter(|v| is_vertex(v.cmd))
            .map(|v| PointD::new(v.x, v.y))
    }

    /// Axis-aligned bounds `(x1, y1, x2, y2)`, or `None` for an empty path.
    pub fn bounding_rect(&self) -> Option<(f64, f64, f64, f64)> {
        let mut points = self.points();
        let first = points.next()?;
        Some(points.fold(
            (first.x, first.y, first.x, first.y),
            |(x1, y1, x2, y2), p| (x1.min(p.x), y1.min(p.y), x2.max(p.x), y2.max(p.y)),
        ))
    }

    /// A read-only vertex source over this path.
    pub fn cursor(&self) -> PathCursor<'_> {
        PathCursor {
            vertices: &self.vertices,
            iterator: 0,
        }
    }
}

impl VertexSource for PathStorage {
    fn rewind(&mut self, path_id: u32) {
        self.iterator = path_id as usize;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        next_vertex(&self.vertices, &mut self.iterator, x, y)
    }
}

// ===================================================================
// PathCursor
// ===================================================================

/// Borrowed iteration state over a [`PathStorage`].
///
/// Lets many renders share one immutable path (the patch catalog) while
/// each keeps its own read position.
#[derive(Debug, Clone)]
pub struct PathCursor<'a> {
    vertices: &'a [Vertex],
    iterator: usize,
}

impl VertexSource for PathCursor<'_> {
    fn rewind(&mut self, path_id: u32) {
        self.iterator = path_id as usize;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        next_vertex(self.vertices, &mut self.iterator, x, y)
    }
}

#[inline]
fn next_vertex(vertices: &[Vertex], iterator: &mut usize, x: &mut f64, y: &mut f64) -> u32 {
    let Some(v) = vertices.get(*iterator) else {
        return PATH_CMD_STOP;
    };
    *x = v.x;
    *y = v.y;
    *iterator += 1;
    v.cmd
}

/// Collect the remaining vertices of a source, for inspection in tests and
/// diagnostics.
pub fn collect_vertices(vs: &mut dyn VertexSource) -> Vec<Vertex> {
    let mut out = Vec::new();
    let (mut x, mut y) = (0.0, 0.0);
    loop {
        let cmd = vs.vertex(&mut x, &mut y);
        if is_stop(cmd) {
            break;
        }
        out.push(Vertex::new(x, y, cmd));
    }
    out
}

// ===================================================================
// Tests
// ===================================================================
