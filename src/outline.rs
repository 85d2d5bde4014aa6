//! Outline geometry: lines, quadratic bezier curves, and the closed
//! contours built from them.
//!
//! All coordinates are `f32`. Validation is strict and bitwise: contour
//! connectivity requires exact endpoint equality, not epsilon-closeness,
//! because the scanline pass filters endpoint intercepts by the same
//! comparison.

use glam::Vec2;

/// Coordinate magnitude limit. Rejects NaN and infinity through the
/// comparison itself (NaN fails any `<=`).
const COORD_LIMIT: f32 = 1.0e9;

/// Cross products below this are treated as collinear by `normalize`.
const COLLINEAR_EPS: f32 = 1.0e-6;

fn point_valid(p: Vec2) -> bool {
    p.x.abs() <= COORD_LIMIT && p.y.abs() <= COORD_LIMIT
}

/// A straight segment from `p1` to `p2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub p1: Vec2,
    pub p2: Vec2,
}

impl Line {
    pub fn new(p1: Vec2, p2: Vec2) -> Self {
        Self { p1, p2 }
    }

    pub fn is_valid(&self) -> bool {
        point_valid(self.p1) && point_valid(self.p2) && self.p1 != self.p2
    }
}

/// A quadratic bezier: endpoints `p1`, `p3` and control point `p2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve {
    pub p1: Vec2,
    pub p2: Vec2,
    pub p3: Vec2,
}

impl Curve {
    pub fn new(p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        Self { p1, p2, p3 }
    }

    pub fn is_valid(&self) -> bool {
        point_valid(self.p1)
            && point_valid(self.p2)
            && point_valid(self.p3)
            && self.p1 != self.p2
            && self.p2 != self.p3
            && self.p3 != self.p1
    }
}

/// Either a straight line or a quadratic bezier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line(Line),
    Curve(Curve),
}

impl Segment {
    pub fn line(p1: Vec2, p2: Vec2) -> Self {
        Self::Line(Line::new(p1, p2))
    }

    pub fn curve(p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        Self::Curve(Curve::new(p1, p2, p3))
    }

    /// First point of the segment.
    pub fn start(&self) -> Vec2 {
        match self {
            Self::Line(line) => line.p1,
            Self::Curve(curve) => curve.p1,
        }
    }

    /// Last point of the segment.
    pub fn end(&self) -> Vec2 {
        match self {
            Self::Line(line) => line.p2,
            Self::Curve(curve) => curve.p3,
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Self::Line(line) => line.is_valid(),
            Self::Curve(curve) => curve.is_valid(),
        }
    }
}

/// An ordered, closed loop of segments. Each segment's end must equal the
/// next segment's start, and the last must connect back to the first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour {
    pub segments: Vec<Segment>,
}

impl Contour {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn is_valid(&self) -> bool {
        if self.segments.len() < 2 {
            return false;
        }

        if !self.segments.iter().all(Segment::is_valid) {
            return false;
        }

        // Exact connectivity, including the closing edge.
        let n = self.segments.len();
        (0..n).all(|i| self.segments[i].end() == self.segments[(i + 1) % n].start())
    }

    /// Rewrite curves whose control point is collinear with their endpoints
    /// as lines, then drop zero-length lines.
    pub fn normalize(&mut self) {
        for segment in &mut self.segments {
            if let Segment::Curve(curve) = segment {
                let cross = (curve.p1 - curve.p2).perp_dot(curve.p3 - curve.p2);
                if cross.abs() <= COLLINEAR_EPS {
                    *segment = Segment::line(curve.p1, curve.p3);
                }
            }
        }

        self.segments.retain(|segment| match segment {
            Segment::Line(line) => line.p1 != line.p2,
            Segment::Curve(_) => true,
        });
    }

    /// Componentwise scale followed by translation, applied to every
    /// control point. Segment order is preserved.
    pub fn transform(&mut self, scale: Vec2, translate: Vec2) {
        for segment in &mut self.segments {
            match segment {
                Segment::Line(line) => {
                    line.p1 = line.p1 * scale + translate;
                    line.p2 = line.p2 * scale + translate;
                }
                Segment::Curve(curve) => {
                    curve.p1 = curve.p1 * scale + translate;
                    curve.p2 = curve.p2 * scale + translate;
                    curve.p3 = curve.p3 * scale + translate;
                }
            }
        }
    }
}

/// One or more closed contours defining a filled region via even-odd
/// winding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    pub contours: Vec<Contour>,
}

impl Outline {
    pub fn new(contours: Vec<Contour>) -> Self {
        Self { contours }
    }

    pub fn is_valid(&self) -> bool {
        !self.contours.is_empty() && self.contours.iter().all(Contour::is_valid)
    }

    /// Normalize every contour and drop the ones left empty.
    pub fn normalize(&mut self) {
        self.contours.retain_mut(|contour| {
            contour.normalize();
            !contour.segments.is_empty()
        });
    }

    pub fn transform(&mut self, scale: Vec2, translate: Vec2) {
        for contour in &mut self.contours {
            contour.transform(scale, translate);
        }
    }

    /// Tight axis-aligned bounds over all segments, or `None` when the
    /// outline has no segments. Curve bounds are exact, not control-hull.
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let mut bounds: Option<(Vec2, Vec2)> = None;
        for contour in &self.contours {
            for segment in &contour.segments {
                let span = crate::distance::segment_span(segment);
                bounds = Some(match bounds {
                    Some((min, max)) => (min.min(span.min), max.max(span.max)),
                    None => (span.min, span.max),
                });
            }
        }
        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    fn square(x0: f32, y0: f32, x1: f32, y1: f32) -> Contour {
        Contour::new(vec![
            Segment::line(v(x0, y0), v(x1, y0)),
            Segment::line(v(x1, y0), v(x1, y1)),
            Segment::line(v(x1, y1), v(x0, y1)),
            Segment::line(v(x0, y1), v(x0, y0)),
        ])
    }

    #[test]
    fn segment_validity() {
        assert!(Segment::line(v(0.0, 0.0), v(1.0, 0.0)).is_valid());
        assert!(!Segment::line(v(1.0, 2.0), v(1.0, 2.0)).is_valid());
        assert!(!Segment::line(v(0.0, f32::NAN), v(1.0, 0.0)).is_valid());
        assert!(!Segment::line(v(0.0, 2.0e9), v(1.0, 0.0)).is_valid());

        assert!(Segment::curve(v(0.0, 0.0), v(1.0, 2.0), v(2.0, 0.0)).is_valid());
        assert!(!Segment::curve(v(0.0, 0.0), v(0.0, 0.0), v(2.0, 0.0)).is_valid());
        assert!(!Segment::curve(v(0.0, 0.0), v(1.0, 2.0), v(0.0, 0.0)).is_valid());
    }

    #[test]
    fn contour_requires_closed_loop() {
        assert!(square(0.0, 0.0, 4.0, 4.0).is_valid());

        // Too few segments.
        let short = Contour::new(vec![Segment::line(v(0.0, 0.0), v(1.0, 0.0))]);
        assert!(!short.is_valid());

        // Disconnected interior endpoint.
        let broken = Contour::new(vec![
            Segment::line(v(0.0, 0.0), v(4.0, 0.0)),
            Segment::line(v(4.0, 0.1), v(0.0, 4.0)),
            Segment::line(v(0.0, 4.0), v(0.0, 0.0)),
        ]);
        assert!(!broken.is_valid());

        // Unclosed loop.
        let open = Contour::new(vec![
            Segment::line(v(0.0, 0.0), v(4.0, 0.0)),
            Segment::line(v(4.0, 0.0), v(0.0, 4.0)),
        ]);
        assert!(!open.is_valid());
    }

    #[test]
    fn outline_validity() {
        assert!(!Outline::default().is_valid());
        assert!(Outline::new(vec![square(0.0, 0.0, 4.0, 4.0)]).is_valid());
        assert!(!Outline::new(vec![square(0.0, 0.0, 4.0, 4.0), Contour::default()]).is_valid());
    }

    #[test]
    fn normalize_straightens_collinear_curves() {
        let mut contour = Contour::new(vec![
            Segment::curve(v(0.0, 0.0), v(5.0, 5.0), v(10.0, 10.0)),
            Segment::line(v(10.0, 10.0), v(0.0, 0.0)),
        ]);
        contour.normalize();
        assert_eq!(contour.segments[0], Segment::line(v(0.0, 0.0), v(10.0, 10.0)));

        // A genuinely curved segment is left alone.
        let mut curved = Contour::new(vec![
            Segment::curve(v(0.0, 0.0), v(5.0, 8.0), v(10.0, 0.0)),
            Segment::line(v(10.0, 0.0), v(0.0, 0.0)),
        ]);
        curved.normalize();
        assert!(matches!(curved.segments[0], Segment::Curve(_)));
    }

    #[test]
    fn normalize_drops_degenerates_and_empty_contours() {
        // A collinear curve whose endpoints coincide collapses to a
        // zero-length line and is dropped, emptying the contour.
        let mut outline = Outline::new(vec![
            Contour::new(vec![
                Segment::curve(v(1.0, 1.0), v(1.0, 1.0000001), v(1.0, 1.0)),
                Segment::line(v(3.0, 3.0), v(3.0, 3.0)),
            ]),
            square(0.0, 0.0, 4.0, 4.0),
        ]);
        outline.normalize();
        assert_eq!(outline.contours.len(), 1);
        assert_eq!(outline.contours[0].segments.len(), 4);
    }

    #[test]
    fn transform_scales_then_translates() {
        let mut contour = Contour::new(vec![
            Segment::line(v(1.0, 2.0), v(3.0, 2.0)),
            Segment::curve(v(3.0, 2.0), v(2.0, 4.0), v(1.0, 2.0)),
        ]);
        contour.transform(v(2.0, 3.0), v(10.0, -1.0));

        assert_eq!(
            contour.segments[0],
            Segment::line(v(12.0, 5.0), v(16.0, 5.0))
        );
        assert_eq!(
            contour.segments[1],
            Segment::curve(v(16.0, 5.0), v(14.0, 11.0), v(12.0, 5.0))
        );
        assert!(contour.is_valid());
    }

    #[test]
    fn bounds_cover_curve_extrema() {
        let outline = Outline::new(vec![Contour::new(vec![
            Segment::curve(v(0.0, 0.0), v(5.0, 10.0), v(10.0, 0.0)),
            Segment::line(v(10.0, 0.0), v(0.0, 0.0)),
        ])]);
        let (min, max) = outline.bounds().unwrap();
        assert_eq!(min, v(0.0, 0.0));
        // Apex of the quadratic is at half the control height.
        assert_eq!(max, v(10.0, 5.0));
    }
}
