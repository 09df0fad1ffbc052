//! Core geometry types
//!
//! All coordinates are in pixels with the y axis pointing down, matching
//! the host canvas the ticket is drawn into.

use tracing::{debug, warn};

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Check whether two points coincide within `eps` on both axes
    pub fn approx_eq(&self, other: Point, eps: f32) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Convert to a Rect at the origin (0, 0)
    pub const fn to_rect(self) -> Rect {
        Rect {
            origin: Point::ZERO,
            size: self,
        }
    }

    /// Whether either side is zero (or negative)
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Whole-pixel dimensions, rounding partial pixels up
    pub fn to_pixels(&self) -> (u32, u32) {
        (
            self.width.max(0.0).ceil() as u32,
            self.height.max(0.0).ceil() as u32,
        )
    }
}

impl From<Size> for Rect {
    /// Convert Size to Rect at origin (0, 0)
    fn from(size: Size) -> Self {
        size.to_rect()
    }
}

/// 2D rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Create a rect from its four edges
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn left(&self) -> f32 {
        self.origin.x
    }

    pub fn top(&self) -> f32 {
        self.origin.y
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Get the size of this rect
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Inset the rect by a delta (shrink from all sides)
    pub fn inset(&self, dx: f32, dy: f32) -> Self {
        Rect {
            origin: Point::new(self.origin.x + dx, self.origin.y + dy),
            size: Size::new(
                (self.size.width - 2.0 * dx).max(0.0),
                (self.size.height - 2.0 * dy).max(0.0),
            ),
        }
    }

    /// Expand rect to include a point
    pub fn expand_to_include(&self, point: Point) -> Self {
        Rect::from_ltrb(
            self.left().min(point.x),
            self.top().min(point.y),
            self.right().max(point.x),
            self.bottom().max(point.y),
        )
    }

    /// Get the union of two rects (smallest rect containing both)
    pub fn union(&self, other: &Rect) -> Self {
        Rect::from_ltrb(
            self.left().min(other.left()),
            self.top().min(other.top()),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }
}

/// Corner radii for rounded rectangles
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerRadius {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadius {
    pub const ZERO: CornerRadius = CornerRadius {
        top_left: 0.0,
        top_right: 0.0,
        bottom_right: 0.0,
        bottom_left: 0.0,
    };

    /// Create a corner radius with different values for each corner.
    /// Order: top_left, top_right, bottom_right, bottom_left (clockwise from top-left)
    pub fn new(top_left: f32, top_right: f32, bottom_right: f32, bottom_left: f32) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    pub fn uniform(radius: f32) -> Self {
        Self::new(radius, radius, radius, radius)
    }

    pub fn to_array(&self) -> [f32; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// Check if all corner radii are the same
    pub fn is_uniform(&self) -> bool {
        self.top_left == self.top_right
            && self.top_right == self.bottom_right
            && self.bottom_right == self.bottom_left
    }

    /// Clamp the radii into the range a `rect` can draw.
    ///
    /// Negative radii become 0. A radius whose diameter exceeds the shorter
    /// side of `rect` is reduced to half of that side.
    pub fn clamped_to(&self, rect: Rect) -> Self {
        let max_radius = (rect.width().min(rect.height()) / 2.0).max(0.0);
        let clamp = |name: &'static str, radius: f32| -> f32 {
            let radius = crate::sanitize_length(name, radius);
            if radius > max_radius {
                debug!(name, radius, max_radius, "corner radius exceeds rect, clamping");
                max_radius
            } else {
                radius
            }
        };

        Self {
            top_left: clamp("top_left_radius", self.top_left),
            top_right: clamp("top_right_radius", self.top_right),
            bottom_right: clamp("bottom_right_radius", self.bottom_right),
            bottom_left: clamp("bottom_left_radius", self.bottom_left),
        }
    }

    /// Clamp negative radii to zero without reference to a rect
    pub fn non_negative(&self) -> Self {
        let [tl, tr, br, bl] = self.to_array();
        if tl < 0.0 || tr < 0.0 || br < 0.0 || bl < 0.0 {
            warn!(radii = ?self, "negative corner radius, clamping to zero");
        }
        Self::new(tl.max(0.0), tr.max(0.0), br.max(0.0), bl.max(0.0))
    }
}

impl From<f32> for CornerRadius {
    fn from(radius: f32) -> Self {
        Self::uniform(radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::from_ltrb(10.0, 20.0, 110.0, 70.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
        assert_eq!(rect.width(), 100.0);
        assert_eq!(rect.height(), 50.0);
        assert_eq!(rect.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn test_rect_inset_never_negative() {
        let rect = Size::new(20.0, 10.0).to_rect().inset(7.5, 7.5);
        assert_eq!(rect.left(), 7.5);
        assert_eq!(rect.width(), 5.0);
        assert_eq!(rect.height(), 0.0);
    }

    #[test]
    fn test_size_to_pixels_rounds_up() {
        assert_eq!(Size::new(99.2, 40.0).to_pixels(), (100, 40));
        assert_eq!(Size::new(-3.0, 1.0).to_pixels(), (0, 1));
    }

    #[test]
    fn test_corner_radius_clamps_negative() {
        let radii = CornerRadius::new(-4.0, 8.0, 0.0, -0.5).non_negative();
        assert_eq!(radii, CornerRadius::new(0.0, 8.0, 0.0, 0.0));
    }

    #[test]
    fn test_corner_radius_clamps_overflow() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        let radii = CornerRadius::new(80.0, 10.0, -2.0, 50.0).clamped_to(rect);
        assert_eq!(radii, CornerRadius::new(50.0, 10.0, 0.0, 50.0));
    }

    #[test]
    fn test_uniform_from_f32() {
        let radii: CornerRadius = 12.0.into();
        assert!(radii.is_uniform());
        assert_eq!(radii.to_array(), [12.0; 4]);
    }
}
