//! Scanline machinery: reusable scratch buffers, per-row views, and the
//! intercept collection that drives the even-odd parity fill.
//!
//! Each pixel row `r` is sampled along the scanline `y = r + 0.5`. A
//! segment contributes an intercept wherever it crosses that line, except
//! exactly at its endpoints; shared endpoints are resolved once per
//! contour by the vertex pass so parity never double-counts a join.

use glam::Vec2;

use crate::distance::{eval_bezier, CurveExt};
use crate::outline::{Contour, Curve, Line, Segment};

/// Reusable buffers for one `generate` call: the squared-distance grid,
/// the per-row intercept lists, and the row descriptors wiring the two
/// together.
///
/// Rows are addressed in outline space (y up). Row `j` aliases the
/// distance slice starting at `(size − 1 − j) · size`, so the distance
/// grid is laid out top-row-first and needs no flip at image assembly.
#[derive(Default)]
pub struct Scratch {
    size: usize,
    max_row_intercepts: usize,
    distances: Vec<f32>,
    intercepts: Vec<f32>,
    rows: Vec<Row>,
}

#[derive(Clone, Copy)]
struct Row {
    distances_start: usize,
    intercepts_start: usize,
    intercept_count: usize,
}

impl Scratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size the buffers for `size²` pixels and at most `2 · segment_count`
    /// intercepts per row, and reset distances to +∞ and intercept counts
    /// to zero.
    pub(crate) fn reset(&mut self, size: usize, segment_count: usize) {
        self.size = size;
        self.max_row_intercepts = segment_count * 2;

        self.distances.clear();
        self.distances.resize(size * size, f32::INFINITY);

        self.intercepts.resize(size * self.max_row_intercepts, 0.0);

        self.rows.clear();
        self.rows.extend((0..size).map(|j| Row {
            distances_start: (size - 1 - j) * size,
            intercepts_start: j * self.max_row_intercepts,
            intercept_count: 0,
        }));
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    /// Distance slice for outline-space row `j`.
    pub(crate) fn row_distances_mut(&mut self, row: usize) -> &mut [f32] {
        let start = self.rows[row].distances_start;
        &mut self.distances[start..start + self.size]
    }

    pub(crate) fn push_intercept(&mut self, row: usize, x: f32) {
        let r = &mut self.rows[row];
        self.intercepts[r.intercepts_start + r.intercept_count] = x;
        r.intercept_count += 1;
    }

    /// Distance slice and collected intercepts for one row, borrowed
    /// together for the parity pass.
    pub(crate) fn row_parts_mut(&mut self, row: usize) -> (&mut [f32], &mut [f32]) {
        let r = self.rows[row];
        (
            &mut self.distances[r.distances_start..r.distances_start + self.size],
            &mut self.intercepts[r.intercepts_start..r.intercepts_start + r.intercept_count],
        )
    }

    /// The whole distance grid, top image row first.
    pub(crate) fn distances(&self) -> &[f32] {
        &self.distances
    }

    pub(crate) fn distances_mut(&mut self) -> &mut [f32] {
        &mut self.distances
    }
}

/// Pixel rows whose scanline lies strictly inside `[y_min, y_max]`,
/// clamped to the image. Scanlines touching the span boundary exactly are
/// excluded; such contacts are endpoint or tangent cases and belong to the
/// vertex pass.
pub(crate) fn intercept_rows(y_min: f32, y_max: f32, size: usize) -> Option<(i32, i32)> {
    let mut lo = (y_min - 0.5).ceil() as i32;
    let mut hi = (y_max - 0.5).floor() as i32;
    if lo as f32 + 0.5 == y_min {
        lo += 1;
    }
    if hi as f32 + 0.5 == y_max {
        hi -= 1;
    }
    lo = lo.max(0);
    hi = hi.min(size as i32 - 1);
    (lo <= hi).then_some((lo, hi))
}

pub(crate) fn line_intercepts(line: &Line, rows: (i32, i32), scratch: &mut Scratch) {
    // A horizontal line never crosses a scanline.
    if line.p1.y == line.p2.y {
        return;
    }

    let delta = line.p2 - line.p1;
    let slope = delta.x / delta.y;
    let offset = line.p1.x - slope * line.p1.y;

    for row in rows.0..=rows.1 {
        let y = row as f32 + 0.5;
        let intercept = Vec2::new(slope * y + offset, y);

        // Endpoint hits are the vertex pass's job.
        if intercept != line.p1 && intercept != line.p2 {
            scratch.push_intercept(row as usize, intercept.x);
        }
    }
}

pub(crate) fn curve_intercepts(
    curve: &Curve,
    ext: &CurveExt,
    rows: (i32, i32),
    scratch: &mut Scratch,
) {
    for row in rows.0..=rows.1 {
        let y = row as f32 + 0.5;

        for t in quadratic_roots(ext.a.y, ext.b.y, ext.c.y - y) {
            if t > 0.0 && t < 1.0 {
                let intercept = eval_bezier(ext, t);

                // Endpoint hits are the vertex pass's job.
                if intercept != curve.p1 && intercept != curve.p2 {
                    scratch.push_intercept(row as usize, intercept.x);
                }
            }
        }
    }
}

/// Real roots of `a·t² + b·t + c = 0`. Missing roots come back NaN, which
/// the caller's open-interval check rejects.
fn quadratic_roots(a: f32, b: f32, c: f32) -> [f32; 2] {
    if a == 0.0 {
        if b == 0.0 {
            return [f32::NAN; 2];
        }
        return [-c / b, f32::NAN];
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return [f32::NAN; 2];
    }

    let sq = discriminant.sqrt();
    let inv = 0.5 / a;
    [(-b + sq) * inv, (-b - sq) * inv]
}

struct VertexRef {
    point: Vec2,
    prev_y: f32,
    next_y: f32,
}

/// Contour vertex pass: decide, per shared segment endpoint sitting
/// exactly on a scanline, whether the contour actually crosses there.
///
/// Each vertex carries the y of its neighboring point along the previous
/// and next segment (for a curve that is the control point, falling back
/// to the far endpoint when the control ties the vertex's own y). Runs of
/// consecutive equal-y vertices collapse to their first vertex with the
/// run's outer adjacencies, so a horizontal stretch acts as one vertex.
/// A vertex is a crossing only when its two adjacencies lie strictly on
/// opposite sides of the scanline.
pub(crate) fn vertex_intercepts(contour: &Contour, scratch: &mut Scratch) {
    let n = contour.segments.len();
    let mut vertices = Vec::with_capacity(n);

    for i in 0..n {
        let segment = &contour.segments[i];
        let prev = &contour.segments[(i + n - 1) % n];
        let point = segment.start();

        let prev_y = match prev {
            Segment::Line(line) => line.p1.y,
            Segment::Curve(curve) => {
                if curve.p2.y == point.y {
                    curve.p1.y
                } else {
                    curve.p2.y
                }
            }
        };
        let next_y = match segment {
            Segment::Line(line) => line.p2.y,
            Segment::Curve(curve) => {
                if curve.p2.y == point.y {
                    curve.p3.y
                } else {
                    curve.p2.y
                }
            }
        };

        vertices.push(VertexRef {
            point,
            prev_y,
            next_y,
        });
    }

    // Rotate to a run boundary; a contour whose vertices all share one y
    // has no crossings at all.
    let Some(start) =
        (0..n).find(|&i| vertices[i].point.y != vertices[(i + n - 1) % n].point.y)
    else {
        return;
    };

    let mut i = 0;
    while i < n {
        let first = (start + i) % n;
        let run_y = vertices[first].point.y;

        let mut j = i + 1;
        while j < n && vertices[(start + j) % n].point.y == run_y {
            j += 1;
        }
        let last = (start + j - 1) % n;

        emit_vertex(
            vertices[first].point,
            vertices[first].prev_y,
            vertices[last].next_y,
            scratch,
        );

        i = j;
    }
}

fn emit_vertex(point: Vec2, prev_y: f32, next_y: f32, scratch: &mut Scratch) {
    if point.y <= 0.0 {
        return;
    }

    let floor = point.y.floor();
    if point.y - floor != 0.5 {
        return;
    }

    let row = floor as usize;
    if row >= scratch.size() {
        return;
    }

    let upward = prev_y < point.y && next_y > point.y;
    let downward = prev_y > point.y && next_y < point.y;
    if upward || downward {
        scratch.push_intercept(row, point.x);
    }
}
