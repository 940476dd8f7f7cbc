//! Grid indexing and vertex helpers shared by the surface and wall passes.

use crate::relief_pipeline::stl::{PREAMBLE_SIZE, TRIANGLE_SIZE};

pub type Vertex = [f32; 3];

/// Triangles in the closed solid over a `width`x`height` grid: top and bottom
/// surfaces plus one wall quad per perimeter edge. Zero when either side has
/// fewer than two samples.
pub fn triangle_count(width: usize, height: usize) -> u64 {
    if width < 2 || height < 2 {
        return 0;
    }
    let (cols, rows) = ((width - 1) as u64, (height - 1) as u64);
    let surfaces = 2 * 2 * cols * rows;
    let walls = 2 * (2 * cols + 2 * rows);
    surfaces + walls
}

/// Exact size of the serialized stream for `triangles` facets.
pub fn stl_byte_len(triangles: u64) -> u64 {
    PREAMBLE_SIZE as u64 + TRIANGLE_SIZE as u64 * triangles
}

/// Unit normal of the triangle by the right-hand rule, or the zero vector
/// when the triangle has no area.
pub fn face_normal(v0: Vertex, v1: Vertex, v2: Vertex) -> Vertex {
    let e1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
    let e2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
    let n = [
        e1[1] * e2[2] - e1[2] * e2[1],
        e1[2] * e2[0] - e1[0] * e2[2],
        e1[0] * e2[1] - e1[1] * e2[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len > f32::EPSILON {
        [n[0] / len, n[1] / len, n[2] / len]
    } else {
        [0.0, 0.0, 0.0]
    }
}

/// Vertex lookup over a thickness grid.
///
/// Grid cell `(x, y)` sits at `(x * px_mm, y * px_mm)`; the top sheet takes
/// its height from the field and the bottom sheet lies on `z = 0`.
pub(crate) struct HeightGrid<'a> {
    pub width: usize,
    pub height: usize,
    px_mm: f64,
    field: &'a [f32],
}

impl<'a> HeightGrid<'a> {
    pub fn new(field: &'a [f32], width: usize, height: usize, px_mm: f64) -> Self {
        Self { width, height, px_mm, field }
    }

    #[inline]
    fn plan(&self, x: usize, y: usize) -> (f32, f32) {
        ((x as f64 * self.px_mm) as f32, (y as f64 * self.px_mm) as f32)
    }

    #[inline]
    pub fn top(&self, x: usize, y: usize) -> Vertex {
        let (px, py) = self.plan(x, y);
        [px, py, self.field[y * self.width + x]]
    }

    #[inline]
    pub fn bottom(&self, x: usize, y: usize) -> Vertex {
        let (px, py) = self.plan(x, y);
        [px, py, 0.0]
    }
}
