//! bez2sdf: bezier outlines → signed distance field bitmaps.
//!
//! Rasterizes closed outlines of lines and quadratic bezier curves into
//! single-channel signed distance fields: 128 on the contour, brighter
//! inside, darker outside, with a linear gradient of configurable width
//! straddling the boundary.
//!
//! # Example
//!
//! ```
//! use bez2sdf::{generate, Contour, Outline, Segment};
//! use bez2sdf::glam::Vec2;
//!
//! let p = |x: f32, y: f32| Vec2::new(x, y);
//! let square = Contour::new(vec![
//!     Segment::line(p(16.0, 16.0), p(48.0, 16.0)),
//!     Segment::line(p(48.0, 16.0), p(48.0, 48.0)),
//!     Segment::line(p(48.0, 48.0), p(16.0, 48.0)),
//!     Segment::line(p(16.0, 48.0), p(16.0, 16.0)),
//! ]);
//! let sdf = generate(&Outline::new(vec![square]), 64, 8.0)?;
//! assert_eq!(sdf.dimensions(), (64, 64));
//! # Ok::<(), bez2sdf::SdfError>(())
//! ```

#![forbid(unsafe_code)]

mod convert;
mod distance;
mod outline;
mod scanline;
mod sdf;

pub mod error;
pub mod render;

// Re-export the geometry crates so downstream users get the same versions
// used by Outline (glam) and the path converters (kurbo).
pub use glam;
pub use kurbo;

pub use convert::{outline_from_bez_path, outline_from_svg};
pub use error::SdfError;
pub use outline::{Contour, Curve, Line, Outline, Segment};
pub use scanline::Scratch;
pub use sdf::{generate, generate_with};
