//! Ticket View
//!
//! Binds ticket outlines and shadows to a host container: configuration,
//! container size, notch anchoring and lazy rebuilds gated by a dirty flag.
//!
//! # Example
//!
//! ```ignore
//! use ticket_paint::RecordingCanvas;
//! use ticket_view::{SiblingAnchor, TicketConfig, TicketView};
//!
//! let config = TicketConfig::from_toml_str(r#"
//!     orientation = "horizontal"
//!     hole_radius = 12.0
//!     corner_radius = 8.0
//!     elevation = 6.0
//! "#)?;
//!
//! let mut view = TicketView::new(config, 2.0)?;
//! view.resize(320.0, 180.0)?;
//! view.attach_anchor(Box::new(SiblingAnchor::new(divider_bounds)));
//! view.on_layout_complete();
//!
//! let mut canvas = RecordingCanvas::new();
//! view.draw(&mut canvas);
//! ```

pub mod anchor;
pub mod config;
pub mod dirty;
pub mod view;

pub use anchor::{AnchorResolver, SiblingAnchor};
pub use config::{format_color, parse_color, ConfigError, TicketConfig};
pub use dirty::{DirtyHandle, DirtyState, DirtyTracker};
pub use view::TicketView;
