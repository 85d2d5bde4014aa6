use clap::Parser;
use std::path::PathBuf;

use bez2sdf::glam::Vec2;

#[derive(Parser)]
#[command(name = "bez2sdf", about = "Bezier outlines to signed distance field bitmaps")]
struct Cli {
    /// SVG path data describing the outline, e.g. "M 16 16 L 48 16 L 48 48 L 16 48 Z"
    #[arg(short = 'd', long = "path")]
    path: String,

    /// Output PNG path
    #[arg(short, long)]
    output: PathBuf,

    /// Image width and height in pixels
    #[arg(short, long, default_value = "256")]
    size: u32,

    /// Total width of the 0-to-1 distance gradient, in outline units
    #[arg(short, long, default_value = "16")]
    range: f32,

    /// Scale and center the outline to fill the image, leaving this margin in pixels
    #[arg(long)]
    fit: Option<f32>,

    /// Cubic-to-quadratic approximation accuracy, in path units
    #[arg(long, default_value = "0.25")]
    accuracy: f64,

    /// Write a side-by-side comparison PNG (outline fill | SDF | threshold)
    #[arg(long)]
    compare: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut outline = bez2sdf::outline_from_svg(&cli.path, cli.accuracy)?;
    let segments: usize = outline.contours.iter().map(|c| c.segments.len()).sum();
    eprintln!(
        "  Parse       {} contours, {} segments",
        outline.contours.len(),
        segments,
    );

    if let Some(margin) = cli.fit {
        if let Some((min, max)) = outline.bounds() {
            let extent = max - min;
            let avail = cli.size as f32 - 2.0 * margin;
            let scale = (avail / extent.x.max(f32::EPSILON))
                .min(avail / extent.y.max(f32::EPSILON));
            let translate =
                (Vec2::splat(cli.size as f32) - extent * scale) * 0.5 - min * scale;
            outline.transform(Vec2::splat(scale), translate);
            eprintln!(
                "  Fit         scale {:.3}, translate ({:.1}, {:.1})",
                scale, translate.x, translate.y,
            );
        }
    }

    let sdf = bez2sdf::generate(&outline, cli.size, cli.range)?;
    sdf.save(&cli.output)?;
    eprintln!(
        "  Write       {} ({}x{}, range {})",
        cli.output.display(),
        cli.size,
        cli.size,
        cli.range,
    );

    if let Some(ref compare) = cli.compare {
        bez2sdf::render::render_comparison(&outline, &sdf, compare)?;
        eprintln!("  Compare     {}", compare.display());
    }

    Ok(())
}
