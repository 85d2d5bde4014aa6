//! Shortest squared distance from a point to a segment, plus the
//! per-segment auxiliary data the kernel precomputes.
//!
//! Lines are closed-form. Curves use an iterative bracket narrowing over
//! the bezier parameter, split beforehand at the point of maximum
//! curvature so each bracket sees a unimodal distance function. Distances
//! stay squared throughout; the kernel takes a single sqrt pass at the
//! end.

use glam::Vec2;

use crate::outline::{Curve, Line, Segment};

/// Axis-aligned bounding span of a segment.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Span {
    pub min: Vec2,
    pub max: Vec2,
}

impl Span {
    fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Precomputed line data: direction and inverse squared length.
pub(crate) struct LineExt {
    pub a: Vec2,
    pub inv_length2: f32,
}

impl LineExt {
    pub fn new(line: &Line) -> Self {
        let a = line.p2 - line.p1;
        Self {
            a,
            inv_length2: 1.0 / a.length_squared(),
        }
    }
}

/// Precomputed curve data: polynomial form `B(t) = a·t² + b·t + c` and the
/// bracket-narrowing cutoff (roughly the reciprocal of the arc length).
pub(crate) struct CurveExt {
    pub a: Vec2,
    pub b: Vec2,
    pub c: Vec2,
    pub max_half_sub_line_length: f32,
}

impl CurveExt {
    pub fn new(curve: &Curve) -> Self {
        Self {
            a: curve.p1 - 2.0 * curve.p2 + curve.p3,
            b: 2.0 * (curve.p2 - curve.p1),
            c: curve.p1,
            max_half_sub_line_length: 1.0
                / (curve.p1.distance(curve.p2) + curve.p2.distance(curve.p3)),
        }
    }
}

pub(crate) fn eval_bezier(curve: &CurveExt, t: f32) -> Vec2 {
    curve.a * t * t + curve.b * t + curve.c
}

pub(crate) fn line_span(line: &Line) -> Span {
    Span {
        min: line.p1.min(line.p2),
        max: line.p1.max(line.p2),
    }
}

/// Exact bounds of a quadratic bezier. The control point only pulls the
/// curve toward itself, so the extremum term is needed just when `p2`
/// escapes the endpoint box.
pub(crate) fn curve_span(curve: &Curve, ext: &CurveExt) -> Span {
    let mut span = Span {
        min: curve.p1.min(curve.p3),
        max: curve.p1.max(curve.p3),
    };

    if !span.contains(curve.p2) {
        let extreme_t = Vec2::new(
            axis_extreme_t(ext.a.x, ext.b.x),
            axis_extreme_t(ext.a.y, ext.b.y),
        );
        let extreme = ext.a * extreme_t * extreme_t + ext.b * extreme_t + ext.c;
        span.min = span.min.min(extreme);
        span.max = span.max.max(extreme);
    }

    span
}

/// Parameter of the axis extremum `B'(t) = 0`, clamped to `[0, 1]`.
/// Degenerate axes (zero quadratic coefficient) report 0.
fn axis_extreme_t(a: f32, b: f32) -> f32 {
    let d = -2.0 * a;
    if d == 0.0 {
        0.0
    } else {
        (b / d).clamp(0.0, 1.0)
    }
}

pub(crate) fn segment_span(segment: &Segment) -> Span {
    match segment {
        Segment::Line(line) => line_span(line),
        Segment::Curve(curve) => curve_span(curve, &CurveExt::new(curve)),
    }
}

/// Squared distance from `p` to a line segment: project onto the
/// direction, clamp the parameter, measure to the clamped point.
pub(crate) fn line_distance2(line: &Line, ext: &LineExt, p: Vec2) -> f32 {
    let b = p - line.p1;
    let t = (ext.a.dot(b) * ext.inv_length2).clamp(0.0, 1.0);
    b.distance_squared(ext.a * t)
}

/// Squared distance from `p` to a quadratic bezier.
///
/// The parameter domain is split at the point of maximum curvature `u`;
/// each non-empty side gets an independent bracket search and the smaller
/// result wins.
pub(crate) fn curve_distance2(ext: &CurveExt, p: Vec2) -> f32 {
    let d = -2.0 * ext.a.length_squared();
    let u = if d == 0.0 {
        0.0
    } else {
        (ext.a.dot(ext.b) / d).clamp(0.0, 1.0)
    };

    let mut dist2 = f32::INFINITY;

    if u > 0.0 {
        dist2 = dist2.min(closest_on_arc(ext, p, 0.0, u));
    }

    if u < 1.0 {
        dist2 = dist2.min(closest_on_arc(ext, p, u, 1.0));
    }

    dist2
}

/// Bracket-narrowing search for the closest point on `[low_t, high_t]`.
///
/// Each step halves the sampling radius around the bracket midpoint and
/// shifts the bracket toward whichever end still holds the running
/// minimum; the branch order is significant and must stay first-match.
/// Terminates once the radius drops below the curve's sub-line cutoff and
/// returns the squared distance to the final chord.
fn closest_on_arc(curve: &CurveExt, p: Vec2, low_t: f32, high_t: f32) -> f32 {
    let mut mid_t = (low_t + high_t) * 0.5;
    let mut low_b = eval_bezier(curve, low_t);
    let mut mid_b = eval_bezier(curve, mid_t);
    let mut high_b = eval_bezier(curve, high_t);
    let mut low_d2 = p.distance_squared(low_b);
    let mut mid_d2 = p.distance_squared(mid_b);
    let mut high_d2 = p.distance_squared(high_b);
    let mut min_d2 = low_d2.min(mid_d2).min(high_d2);
    let mut half_len = (high_t - low_t) * 0.5;

    while half_len > curve.max_half_sub_line_length {
        half_len *= 0.5;

        let t1 = mid_t - half_len;
        let t2 = mid_t + half_len;
        let b1 = eval_bezier(curve, t1);
        let b2 = eval_bezier(curve, t2);
        let d1 = p.distance_squared(b1);
        let d2 = p.distance_squared(b2);

        min_d2 = min_d2.min(d1).min(d2);

        if low_d2.min(d1) <= min_d2 {
            high_b = mid_b;
            high_d2 = mid_d2;
            mid_t = t1;
            mid_b = b1;
            mid_d2 = d1;
        } else if high_d2.min(d2) <= min_d2 {
            low_b = mid_b;
            low_d2 = mid_d2;
            mid_t = t2;
            mid_b = b2;
            mid_d2 = d2;
        } else {
            low_b = b1;
            low_d2 = d1;
            high_b = b2;
            high_d2 = d2;
        }
    }

    chord_distance2(low_b, high_b, p)
}

/// Squared distance from `p` to the segment `a → b`.
fn chord_distance2(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    let ab = b - a;
    let length2 = ab.length_squared();
    if length2 == 0.0 {
        return p.distance_squared(a);
    }
    let t = ((p - a).dot(ab) / length2).clamp(0.0, 1.0);
    p.distance_squared(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn line_distance_matches_hand_values() {
        let line = Line::new(v(0.0, 0.0), v(10.0, 0.0));
        let ext = LineExt::new(&line);

        // Perpendicular drop inside the segment.
        assert_eq!(line_distance2(&line, &ext, v(5.0, 3.0)), 9.0);
        // Beyond an endpoint the distance is to the endpoint.
        assert_eq!(line_distance2(&line, &ext, v(13.0, 4.0)), 25.0);
        assert_eq!(line_distance2(&line, &ext, v(-3.0, -4.0)), 25.0);
        // On the segment.
        assert_eq!(line_distance2(&line, &ext, v(7.0, 0.0)), 0.0);
    }

    #[test]
    fn curve_span_is_exact() {
        let curve = Curve::new(v(0.0, 0.0), v(5.0, 10.0), v(10.0, 0.0));
        let ext = CurveExt::new(&curve);
        let span = curve_span(&curve, &ext);
        assert_eq!(span.min, v(0.0, 0.0));
        assert_eq!(span.max, v(10.0, 5.0));

        // Control point inside the endpoint box: no extremum work needed.
        let flat = Curve::new(v(0.0, 0.0), v(5.0, 1.0), v(10.0, 2.0));
        let flat_ext = CurveExt::new(&flat);
        let flat_span = curve_span(&flat, &flat_ext);
        assert_eq!(flat_span.min, v(0.0, 0.0));
        assert_eq!(flat_span.max, v(10.0, 2.0));
    }

    /// Dense parameter sampling as an independent oracle for the bracket
    /// search.
    fn brute_force_distance(curve: &CurveExt, p: Vec2) -> f32 {
        let mut best = f32::INFINITY;
        for i in 0..=4000 {
            let t = i as f32 / 4000.0;
            best = best.min(p.distance_squared(eval_bezier(curve, t)));
        }
        best.sqrt()
    }

    #[test]
    fn curve_distance_matches_brute_force() {
        let curve = Curve::new(v(10.0, 10.0), v(50.0, 90.0), v(90.0, 10.0));
        let ext = CurveExt::new(&curve);

        for gy in 0..=10 {
            for gx in 0..=10 {
                let p = v(gx as f32 * 10.0, gy as f32 * 10.0);
                let got = curve_distance2(&ext, p).sqrt();
                let want = brute_force_distance(&ext, p);
                assert!(
                    (got - want).abs() < 0.05,
                    "point {p:?}: got {got}, brute force {want}"
                );
            }
        }
    }

    #[test]
    fn curve_distance_handles_near_degenerate_curvature() {
        // Nearly straight curve: the quadratic coefficient is tiny, so the
        // split and the bracket cutoff both operate near their limits.
        let curve = Curve::new(v(0.0, 0.0), v(50.0, 0.01), v(100.0, 0.0));
        let ext = CurveExt::new(&curve);
        let d = curve_distance2(&ext, v(50.0, 10.0)).sqrt();
        assert!((d - 10.0).abs() < 0.02, "got {d}");
    }

    #[test]
    fn curve_distance_is_deterministic() {
        let curve = Curve::new(v(3.0, 7.0), v(41.0, 83.0), v(97.0, 13.0));
        let ext = CurveExt::new(&curve);
        let p = v(29.5, 31.5);
        let first = curve_distance2(&ext, p);
        for _ in 0..8 {
            assert_eq!(curve_distance2(&ext, p).to_bits(), first.to_bits());
        }
    }
}
