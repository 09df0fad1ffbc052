//! Ticket shape parameters

use tracing::warn;

/// Which pair of opposite edges carries the scalloped notches
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    /// Notches cut into the top and bottom edges
    Horizontal,
    /// Notches cut into the left and right edges
    #[default]
    Vertical,
}

/// Placement and size of the tear-off notches
///
/// `position` is measured along the governing axis: x for
/// [`Orientation::Horizontal`], y for [`Orientation::Vertical`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HoleSpec {
    pub position: f32,
    pub radius: f32,
}

impl HoleSpec {
    pub const NONE: HoleSpec = HoleSpec {
        position: 0.0,
        radius: 0.0,
    };

    pub const fn new(position: f32, radius: f32) -> Self {
        Self { position, radius }
    }

    /// Whether a notch is actually carved out
    pub fn is_visible(&self) -> bool {
        self.radius > 0.0
    }

    /// Copy with a negative or NaN radius clamped to zero
    pub fn sanitized(&self) -> Self {
        Self {
            position: if self.position.is_finite() {
                self.position
            } else {
                warn!(position = self.position, "non-finite hole position, using 0");
                0.0
            },
            radius: sanitize_length("hole_radius", self.radius),
        }
    }
}

/// Clamp a length that must not be negative.
///
/// Negative and NaN values become 0 and emit a warning; the caller keeps
/// drawing with the clamped value.
pub fn sanitize_length(name: &'static str, value: f32) -> f32 {
    if value >= 0.0 {
        value
    } else {
        warn!(name, value, "invalid length, clamping to zero");
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_orientation_is_vertical() {
        assert_eq!(Orientation::default(), Orientation::Vertical);
    }

    #[test]
    fn test_sanitize_length() {
        assert_eq!(sanitize_length("w", 4.5), 4.5);
        assert_eq!(sanitize_length("w", 0.0), 0.0);
        assert_eq!(sanitize_length("w", -1.0), 0.0);
        assert_eq!(sanitize_length("w", f32::NAN), 0.0);
    }

    #[test]
    fn test_hole_spec_sanitized() {
        let hole = HoleSpec::new(42.0, -8.0).sanitized();
        assert_eq!(hole, HoleSpec::new(42.0, 0.0));
        assert!(!hole.is_visible());

        let hole = HoleSpec::new(f32::INFINITY, 6.0).sanitized();
        assert_eq!(hole, HoleSpec::new(0.0, 6.0));
        assert!(hole.is_visible());
    }
}
