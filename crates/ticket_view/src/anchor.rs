//! Hole placement from a sibling element
//!
//! A ticket can line its notches up with another element in the same
//! container, typically a divider between the stub and the body. The
//! resolver reports the hole position once that element has been laid out.

use ticket_core::{Orientation, Rect};

/// Supplies the notch position from layout information the view does not own
pub trait AnchorResolver {
    /// Current hole position in the container's coordinate space.
    ///
    /// `None` means the anchor is absent or not laid out yet; the view then
    /// keeps its previous position.
    fn resolve_hole_position(&self, orientation: Orientation, hole_radius: f32) -> Option<f32>;
}

/// Anchors the notches to the center of a sibling's bounds
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SiblingAnchor {
    /// Sibling bounds relative to the ticket container, once known
    pub bounds: Option<Rect>,
}

impl SiblingAnchor {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds: Some(bounds),
        }
    }

    /// An anchor whose sibling has not been laid out
    pub fn unresolved() -> Self {
        Self::default()
    }
}

impl AnchorResolver for SiblingAnchor {
    fn resolve_hole_position(&self, orientation: Orientation, hole_radius: f32) -> Option<f32> {
        let bounds = self.bounds?;
        let half = |extent: f32| if extent > 0.0 { extent / 2.0 } else { 0.0 };

        let position = match orientation {
            Orientation::Horizontal => bounds.left() + half(bounds.width()) - hole_radius,
            Orientation::Vertical => bounds.bottom() - half(bounds.height()) + hole_radius,
        };
        Some(position)
    }
}

impl<F> AnchorResolver for F
where
    F: Fn(Orientation, f32) -> Option<f32>,
{
    fn resolve_hole_position(&self, orientation: Orientation, hole_radius: f32) -> Option<f32> {
        self(orientation, hole_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_uses_center_x() {
        let anchor = SiblingAnchor::new(Rect::new(80.0, 10.0, 40.0, 20.0));
        assert_eq!(anchor.resolve_hole_position(Orientation::Horizontal, 15.0), Some(85.0));
    }

    #[test]
    fn test_vertical_uses_center_y() {
        let anchor = SiblingAnchor::new(Rect::new(0.0, 40.0, 100.0, 20.0));
        assert_eq!(anchor.resolve_hole_position(Orientation::Vertical, 10.0), Some(60.0));
    }

    #[test]
    fn test_zero_extent_contributes_nothing() {
        let anchor = SiblingAnchor::new(Rect::new(50.0, 30.0, 0.0, 0.0));
        assert_eq!(anchor.resolve_hole_position(Orientation::Horizontal, 5.0), Some(45.0));
        assert_eq!(anchor.resolve_hole_position(Orientation::Vertical, 5.0), Some(35.0));
    }

    #[test]
    fn test_unresolved_anchor() {
        assert_eq!(
            SiblingAnchor::unresolved().resolve_hole_position(Orientation::Vertical, 5.0),
            None
        );
    }

    #[test]
    fn test_closure_resolver() {
        let fixed = |_: Orientation, radius: f32| Some(100.0 - radius);
        assert_eq!(fixed.resolve_hole_position(Orientation::Horizontal, 4.0), Some(96.0));
    }
}
