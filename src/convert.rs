//! Building outlines from kurbo paths.
//!
//! kurbo works in f64 and speaks lines, quadratics and cubics; the kernel
//! works in f32 and speaks lines and quadratics. The conversion casts at
//! the boundary, approximates cubics with quadratic splines, closes any
//! open subpath with a line, and normalizes the result.

use glam::Vec2;
use kurbo::{BezPath, CubicBez, PathEl, Point};

use crate::error::SdfError;
use crate::outline::{Contour, Outline, Segment};

fn pt(p: Point) -> Vec2 {
    Vec2::new(p.x as f32, p.y as f32)
}

/// Parse SVG path data and convert it to an [`Outline`].
///
/// `accuracy` bounds the cubic→quadratic approximation error, in path
/// units.
pub fn outline_from_svg(d: &str, accuracy: f64) -> Result<Outline, SdfError> {
    let path = BezPath::from_svg(d)?;
    outline_from_bez_path(&path, accuracy)
}

/// Convert a [`kurbo::BezPath`] to an [`Outline`].
///
/// Every subpath becomes one contour; subpaths left open are closed with
/// a straight line. Cubic segments are approximated by quadratic splines
/// to within `accuracy`. The outline is normalized before it is returned;
/// an input with no drawable subpaths yields [`SdfError::EmptyOutline`].
pub fn outline_from_bez_path(path: &BezPath, accuracy: f64) -> Result<Outline, SdfError> {
    let mut contours = Vec::new();
    let mut segments: Vec<Segment> = Vec::new();
    let mut start = Point::ZERO;
    let mut current = Point::ZERO;

    let mut flush = |segments: &mut Vec<Segment>, start: Point, current: Point| {
        if segments.is_empty() {
            return;
        }
        if pt(current) != pt(start) {
            segments.push(Segment::line(pt(current), pt(start)));
        }
        contours.push(Contour::new(std::mem::take(segments)));
    };

    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                flush(&mut segments, start, current);
                start = p;
                current = p;
            }
            PathEl::LineTo(p) => {
                if pt(current) != pt(p) {
                    segments.push(Segment::line(pt(current), pt(p)));
                }
                current = p;
            }
            PathEl::QuadTo(c, p) => {
                if pt(current) != pt(p) || pt(current) != pt(c) {
                    segments.push(Segment::curve(pt(current), pt(c), pt(p)));
                }
                current = p;
            }
            PathEl::CurveTo(c1, c2, p) => {
                // Stitch the quadratic spline back together in f32 so
                // rounding cannot break the contour's exact connectivity.
                let cubic = CubicBez::new(current, c1, c2, p);
                let quads: Vec<_> = cubic.to_quads(accuracy).map(|(_, _, q)| q).collect();
                let mut chain = pt(current);
                for (i, quad) in quads.iter().enumerate() {
                    let end = if i + 1 == quads.len() { pt(p) } else { pt(quad.p2) };
                    if chain != end || chain != pt(quad.p1) {
                        segments.push(Segment::curve(chain, pt(quad.p1), end));
                    }
                    chain = end;
                }
                current = p;
            }
            PathEl::ClosePath => {
                flush(&mut segments, start, current);
                current = start;
            }
        }
    }
    flush(&mut segments, start, current);

    let mut outline = Outline::new(contours);
    outline.normalize();

    if outline.contours.is_empty() {
        return Err(SdfError::EmptyOutline);
    }

    Ok(outline)
}
