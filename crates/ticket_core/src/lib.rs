//! Ticket Core
//!
//! Foundational types for building ticket outlines:
//!
//! - **Geometry**: `Point`, `Size`, `Rect` and per-corner `CornerRadius`
//! - **Contour**: an ordered move/line/arc command list describing a closed outline
//! - **Ticket parameters**: notch `Orientation` and `HoleSpec`
//! - **Style**: immutable `Color` and `Stroke` values passed into draw calls
//!
//! # Example
//!
//! ```rust
//! use ticket_core::{Contour, Point, Rect};
//!
//! let mut contour = Contour::new();
//! contour.move_to(Point::new(0.0, 10.0));
//! contour.arc_to(Rect::from_ltrb(0.0, 0.0, 20.0, 20.0), 180.0, 90.0);
//! contour.line_to(Point::new(0.0, 10.0));
//!
//! assert!(contour.is_closed(1e-4));
//! ```

pub mod contour;
pub mod error;
pub mod geometry;
pub mod style;
pub mod ticket;

pub use contour::{
    ArcSegment, Contour, ContourCommand, ContourSegment, CONTOUR_INLINE_CAPACITY,
};
pub use error::{Result, TicketError};
pub use geometry::{CornerRadius, Point, Rect, Size};
pub use style::{Color, LineCap, LineJoin, Stroke};
pub use ticket::{sanitize_length, HoleSpec, Orientation};
