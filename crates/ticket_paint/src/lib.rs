//! Ticket Paint
//!
//! Builds the ticket outline and rasterizes its drop shadow.
//!
//! # Features
//!
//! - Rounded-rectangle contours with scalloped tear-off notches
//! - Alpha-only shadow masks with a software Gaussian blur
//! - A [`TicketCanvas`] seam with a recording canvas and a tiny-skia pixmap canvas
//!
//! # Example
//!
//! ```ignore
//! use ticket_core::{CornerRadius, HoleSpec, Orientation, Rect};
//! use ticket_paint::{build_contour, ShadowConfig, ShadowRasterizer};
//!
//! let bounds = Rect::from_ltrb(0.0, 0.0, 200.0, 100.0);
//! let contour = build_contour(
//!     bounds,
//!     CornerRadius::uniform(10.0),
//!     Orientation::Horizontal,
//!     HoleSpec::new(100.0, 15.0),
//! );
//!
//! let mut rasterizer = ShadowRasterizer::new();
//! let shadow = rasterizer.render(&contour, None, &ShadowConfig::with_blur_radius(8.0), 220, 120);
//! ```

pub mod blur;
pub mod canvas;
pub mod error;
pub mod raster;
pub mod shadow;
pub mod shape;

pub use blur::{BlurCapability, GaussianBlur, NoBlur};
pub use canvas::{CanvasCommand, PixmapCanvas, RecordingCanvas, TicketCanvas};
pub use error::{PaintError, Result};
pub use shadow::{
    ShadowConfig, ShadowMask, ShadowOutput, ShadowRasterizer, MAX_BLUR_RADIUS, MAX_ELEVATION_DP,
    SHADOW_ALPHA,
};
pub use shape::{build_contour, build_contour_into, rounded_rect_contour};
