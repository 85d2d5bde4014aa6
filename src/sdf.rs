//! The SDF generation kernel: outline in, grayscale distance field out.
//!
//! One pass over the segments fills a squared-distance grid and collects
//! scanline intercepts; a parity walk over the sorted intercepts negates
//! interior distances; a final normalisation maps distance into `[0, 1]`
//! around 0.5 and quantises to bytes. The contour lands on 128, the
//! interior above, the exterior below, with a linear ramp `range` outline
//! units wide straddling the boundary.

use std::cell::RefCell;

use glam::Vec2;
use image::GrayImage;

use crate::distance::{
    curve_distance2, curve_span, line_distance2, line_span, CurveExt, LineExt, Span,
};
use crate::error::SdfError;
use crate::outline::{Outline, Segment};
use crate::scanline::{
    curve_intercepts, intercept_rows, line_intercepts, vertex_intercepts, Scratch,
};

thread_local! {
    static SCRATCH: RefCell<Scratch> = RefCell::new(Scratch::new());
}

/// Generate a `size × size` signed distance field from `outline`.
///
/// `range` is the total width, in outline units, of the 0→1 intensity
/// gradient across the contour; pixels farther than `range / 2` from the
/// outline saturate to 0 or 255. The output is flipped vertically so that
/// row 0 of the image corresponds to the largest outline y.
///
/// Scratch buffers are kept in thread-local storage and reused across
/// calls; see [`generate_with`] to manage them explicitly.
pub fn generate(outline: &Outline, size: u32, range: f32) -> Result<GrayImage, SdfError> {
    SCRATCH.with(|scratch| generate_with(outline, size, range, &mut scratch.borrow_mut()))
}

/// [`generate`] with caller-owned scratch buffers.
///
/// The buffers are fully re-initialised here, so a single `Scratch` can be
/// reused across outlines of any size; reuse across threads requires one
/// `Scratch` per thread.
pub fn generate_with(
    outline: &Outline,
    size: u32,
    range: f32,
    scratch: &mut Scratch,
) -> Result<GrayImage, SdfError> {
    if !outline.is_valid() {
        return Err(SdfError::InvalidOutline);
    }

    if size == 0 {
        return Ok(GrayImage::new(0, 0));
    }

    let px = size as usize;
    let segment_count = outline.contours.iter().map(|c| c.segments.len()).sum();
    scratch.reset(px, segment_count);

    for contour in &outline.contours {
        for segment in &contour.segments {
            process_segment(segment, px, range, scratch);
        }

        // Shared segment endpoints sitting exactly on a scanline are
        // classified once per contour.
        vertex_intercepts(contour, scratch);
    }

    for distance in scratch.distances_mut() {
        *distance = distance.sqrt();
    }

    // Even-odd parity: sort each row's intercepts and negate the distance
    // of every pixel column between successive pairs.
    let size_f = size as f32;
    for row in 0..px {
        let (distances, intercepts) = scratch.row_parts_mut(row);
        intercepts.sort_unstable_by(f32::total_cmp);

        let mut count = intercepts.len();
        if count % 2 != 0 {
            debug_assert!(false, "odd intercept count {count} on row {row}");
            count -= 1;
        }

        for pair in intercepts[..count].chunks_exact(2) {
            let lo = pair[0].clamp(0.0, size_f);
            let hi = pair[1].clamp(0.0, size_f);
            let first = (lo - 0.5).ceil() as i32;
            let last = (hi - 0.5).floor() as i32;
            for x in first..=last {
                let distance = &mut distances[x as usize];
                *distance = -*distance;
            }
        }
    }

    let mut image = GrayImage::new(size, size);
    let inv_range = 1.0 / range;
    for (dst, distance) in image.iter_mut().zip(scratch.distances()) {
        *dst = transnorm(0.5 - *distance * inv_range);
    }

    Ok(image)
}

fn process_segment(segment: &Segment, size: usize, range: f32, scratch: &mut Scratch) {
    match segment {
        Segment::Line(line) => {
            let ext = LineExt::new(line);
            let span = line_span(line);
            update_distances(span, size, range, scratch, |p| line_distance2(line, &ext, p));
            if let Some(rows) = intercept_rows(span.min.y, span.max.y, size) {
                line_intercepts(line, rows, scratch);
            }
        }
        Segment::Curve(curve) => {
            let ext = CurveExt::new(curve);
            let span = curve_span(curve, &ext);
            update_distances(span, size, range, scratch, |p| curve_distance2(&ext, p));
            if let Some(rows) = intercept_rows(span.min.y, span.max.y, size) {
                curve_intercepts(curve, &ext, rows, scratch);
            }
        }
    }
}

/// Min-update the squared distance of every pixel center within
/// `range / 2` of the segment's bounds. Anything farther saturates in the
/// final normalisation, so it never needs a distance.
fn update_distances(
    span: Span,
    size: usize,
    range: f32,
    scratch: &mut Scratch,
    distance2: impl Fn(Vec2) -> f32,
) {
    let half_range = range * 0.5;
    let x_min = (((span.min.x - half_range).floor()) as i32).max(0);
    let y_min = (((span.min.y - half_range).floor()) as i32).max(0);
    let x_max = (((span.max.x + half_range).ceil()) as i32).min(size as i32);
    let y_max = (((span.max.y + half_range).ceil()) as i32).min(size as i32);

    for y in y_min..y_max {
        let row = scratch.row_distances_mut(y as usize);
        for x in x_min..x_max {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let cell = &mut row[x as usize];
            *cell = cell.min(distance2(p));
        }
    }
}

/// Map `[0, 1]` to `[0, 255]` with saturation.
fn transnorm(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}
