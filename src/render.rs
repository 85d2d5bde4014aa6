//! Raster comparison of an outline against its generated SDF.
//!
//! Renders the outline through tiny-skia's even-odd fill and composites
//! three panels side by side: the filled outline, the raw SDF, and the
//! SDF thresholded at the contour value 128. Useful for eyeballing parity
//! bugs, which show up as inverted stripes in the middle panel only.

use std::path::Path;

use image::GrayImage;

use crate::outline::{Outline, Segment};

/// Convert an [`Outline`] to a `tiny_skia::Path`, applying `transform`.
fn outline_to_tinyskia(
    outline: &Outline,
    transform: tiny_skia::Transform,
) -> Option<tiny_skia::Path> {
    let mut pb = tiny_skia::PathBuilder::new();
    for contour in &outline.contours {
        let Some(first) = contour.segments.first() else {
            continue;
        };
        let (x, y) = transform_point(first.start().x, first.start().y, transform);
        pb.move_to(x, y);
        for segment in &contour.segments {
            match segment {
                Segment::Line(line) => {
                    let (x, y) = transform_point(line.p2.x, line.p2.y, transform);
                    pb.line_to(x, y);
                }
                Segment::Curve(curve) => {
                    let (cx, cy) = transform_point(curve.p2.x, curve.p2.y, transform);
                    let (x, y) = transform_point(curve.p3.x, curve.p3.y, transform);
                    pb.quad_to(cx, cy, x, y);
                }
            }
        }
        pb.close();
    }
    pb.finish()
}

/// Apply a transform manually to a point.
fn transform_point(x: f32, y: f32, t: tiny_skia::Transform) -> (f32, f32) {
    (t.sx * x + t.kx * y + t.tx, t.ky * x + t.sy * y + t.ty)
}

/// Encode a pixmap to PNG bytes.
fn encode_png(pixmap: &tiny_skia::Pixmap) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut encoder = png::Encoder::new(&mut buf, pixmap.width(), pixmap.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(pixmap.data()).unwrap();
    drop(writer);
    buf
}

/// Render a side-by-side comparison PNG.
///
/// Left panel: the outline filled with the even-odd rule.
/// Middle panel: the SDF as produced.
/// Right panel: the SDF thresholded at 128.
///
/// The outline is drawn in the same frame the SDF was generated in, so
/// the left and right panels should agree pixel-for-pixel away from the
/// anti-aliased boundary.
pub fn render_comparison(
    outline: &Outline,
    sdf: &GrayImage,
    output_path: &Path,
) -> Result<(), std::io::Error> {
    let size = sdf.width();
    if size == 0 {
        return Ok(());
    }
    let separator: u32 = 2;

    // ── Left panel: even-odd fill of the outline ──
    // The SDF's row 0 holds the largest outline y, so flip.
    let transform = tiny_skia::Transform {
        sx: 1.0,
        kx: 0.0,
        ky: 0.0,
        sy: -1.0,
        tx: 0.0,
        ty: size as f32,
    };

    let mut fill_panel = tiny_skia::Pixmap::new(size, size).unwrap();
    fill_panel.fill(tiny_skia::Color::WHITE);
    let mut paint = tiny_skia::Paint::default();
    paint.set_color(tiny_skia::Color::BLACK);
    paint.anti_alias = true;
    if let Some(sk_path) = outline_to_tinyskia(outline, transform) {
        fill_panel.fill_path(
            &sk_path,
            &paint,
            tiny_skia::FillRule::EvenOdd,
            tiny_skia::Transform::identity(),
            None,
        );
    }

    // ── Middle panel: the SDF itself ──
    let mut sdf_panel = tiny_skia::Pixmap::new(size, size).unwrap();
    for y in 0..size {
        for x in 0..size {
            let luma = sdf.get_pixel(x, y).0[0];
            let pm = tiny_skia::PremultipliedColorU8::from_rgba(luma, luma, luma, 255).unwrap();
            sdf_panel.pixels_mut()[(y * size + x) as usize] = pm;
        }
    }

    // ── Right panel: interior per the stored distances ──
    let mut threshold_panel = tiny_skia::Pixmap::new(size, size).unwrap();
    for y in 0..size {
        for x in 0..size {
            let luma = if sdf.get_pixel(x, y).0[0] >= 128 { 0 } else { 255 };
            let pm = tiny_skia::PremultipliedColorU8::from_rgba(luma, luma, luma, 255).unwrap();
            threshold_panel.pixels_mut()[(y * size + x) as usize] = pm;
        }
    }

    // ── Composite ──
    let total_w = size * 3 + separator * 2;
    let mut final_pixmap = tiny_skia::Pixmap::new(total_w, size).unwrap();
    final_pixmap.fill(tiny_skia::Color::from_rgba8(200, 200, 200, 255));
    for y in 0..size {
        for x in 0..size {
            let idx = (y * size + x) as usize;
            final_pixmap.pixels_mut()[(y * total_w + x) as usize] = fill_panel.pixels()[idx];
            final_pixmap.pixels_mut()[(y * total_w + size + separator + x) as usize] =
                sdf_panel.pixels()[idx];
            final_pixmap.pixels_mut()[(y * total_w + (size + separator) * 2 + x) as usize] =
                threshold_panel.pixels()[idx];
        }
    }

    std::fs::write(output_path, encode_png(&final_pixmap))
}
