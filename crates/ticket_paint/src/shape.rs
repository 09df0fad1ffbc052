//! Ticket outline construction
//!
//! A ticket is a rounded rectangle whose border is interrupted by two
//! semicircular notches on opposite edges, like a tear-off perforation:
//!
//! ```text
//!  Vertical                     Horizontal
//!  ╭────────────────╮           ╭─────╮  ╭──────╮
//!  │                │           │      ╰╯       │
//!  ╯                ╰           │               │
//!  ╮                ╭           │      ╭╮       │
//!  │                │           ╰─────╯  ╰──────╯
//!  ╰────────────────╯
//! ```
//!
//! The outline is walked clockwise starting just below the top-left corner.
//! Each corner is a 90° arc inscribed in a square of side `2 × radius`
//! anchored at that corner. Notches are 180° arcs with a negative sweep so
//! they carve into the shape.

use ticket_core::{Contour, CornerRadius, HoleSpec, Orientation, Point, Rect};

// =============================================================================
// Public API
// =============================================================================

/// Build the closed outline of a ticket.
///
/// Radii are clamped before use: negative values become 0 and a corner whose
/// diameter exceeds the shorter side of `bounds` is reduced to fit. A hole
/// radius of 0 leaves the edges straight.
pub fn build_contour(
    bounds: Rect,
    radii: CornerRadius,
    orientation: Orientation,
    hole: HoleSpec,
) -> Contour {
    let mut contour = Contour::new();
    build_contour_into(&mut contour, bounds, radii, orientation, hole);
    contour
}

/// Rebuild a ticket outline into an existing contour, reusing its storage
pub fn build_contour_into(
    contour: &mut Contour,
    bounds: Rect,
    radii: CornerRadius,
    orientation: Orientation,
    hole: HoleSpec,
) {
    contour.reset();
    let edges = TicketEdges::new(bounds, radii);
    notch_layout(orientation).trace(contour, &edges, hole.sanitized());
}

/// Build a plain rounded rectangle using the same corner treatment as tickets
pub fn rounded_rect_contour(bounds: Rect, radii: CornerRadius) -> Contour {
    let edges = TicketEdges::new(bounds, radii);
    let mut contour = Contour::new();

    edges.start(&mut contour);
    edges.top_left(&mut contour);
    contour.line_to(Point::new(edges.right - edges.radii.top_right, edges.top));
    edges.top_right(&mut contour);
    contour.line_to(Point::new(edges.right, edges.bottom - edges.radii.bottom_right));
    edges.bottom_right(&mut contour);
    contour.line_to(Point::new(edges.left + edges.radii.bottom_left, edges.bottom));
    edges.bottom_left(&mut contour);
    edges.close(&mut contour);

    contour
}

// =============================================================================
// Corner Treatment
// =============================================================================

/// Rectangle edges plus clamped corner radii
#[derive(Clone, Copy, Debug)]
struct TicketEdges {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
    radii: CornerRadius,
}

impl TicketEdges {
    fn new(bounds: Rect, radii: CornerRadius) -> Self {
        Self {
            left: bounds.left(),
            top: bounds.top(),
            right: bounds.right(),
            bottom: bounds.bottom(),
            radii: radii.non_negative().clamped_to(bounds),
        }
    }

    fn start(&self, contour: &mut Contour) {
        contour.move_to(Point::new(self.left, self.top + self.radii.top_left));
    }

    fn close(&self, contour: &mut Contour) {
        contour.line_to(Point::new(self.left, self.top + self.radii.top_left));
    }

    fn top_left(&self, contour: &mut Contour) {
        let r = self.radii.top_left;
        let oval = Rect::from_ltrb(self.left, self.top, self.left + r * 2.0, self.top + r * 2.0);
        corner(contour, oval, 180.0, r);
    }

    fn top_right(&self, contour: &mut Contour) {
        let r = self.radii.top_right;
        let oval = Rect::from_ltrb(self.right - r * 2.0, self.top, self.right, self.top + r * 2.0);
        corner(contour, oval, 270.0, r);
    }

    fn bottom_right(&self, contour: &mut Contour) {
        let r = self.radii.bottom_right;
        let oval = Rect::from_ltrb(
            self.right - r * 2.0,
            self.bottom - r * 2.0,
            self.right,
            self.bottom,
        );
        corner(contour, oval, 0.0, r);
    }

    fn bottom_left(&self, contour: &mut Contour) {
        let r = self.radii.bottom_left;
        let oval = Rect::from_ltrb(
            self.left,
            self.bottom - r * 2.0,
            self.left + r * 2.0,
            self.bottom,
        );
        corner(contour, oval, 90.0, r);
    }
}

/// Quarter arc for a rounded corner; a zero radius leaves a plain line join
fn corner(contour: &mut Contour, oval: Rect, start_angle: f32, radius: f32) {
    if radius > 0.0 {
        contour.arc_to(oval, start_angle, 90.0);
    }
}

// =============================================================================
// Notch Layouts
// =============================================================================

/// Traces a full ticket outline for one notch orientation
trait NotchLayout {
    fn trace(&self, contour: &mut Contour, edges: &TicketEdges, hole: HoleSpec);
}

/// Notches on the left and right edges
struct VerticalNotches;

/// Notches on the top and bottom edges
struct HorizontalNotches;

fn notch_layout(orientation: Orientation) -> &'static dyn NotchLayout {
    match orientation {
        Orientation::Vertical => &VerticalNotches,
        Orientation::Horizontal => &HorizontalNotches,
    }
}

impl NotchLayout for VerticalNotches {
    /// `hole.position` is the y of the notch's lower end; the notch spans
    /// `position - 2r ..= position`.
    fn trace(&self, contour: &mut Contour, e: &TicketEdges, hole: HoleSpec) {
        let (pos, r) = (hole.position, hole.radius);

        e.start(contour);
        e.top_left(contour);
        contour.line_to(Point::new(e.right - e.radii.top_right, e.top));
        e.top_right(contour);

        // Right notch, from its top end around the inside to its bottom end
        if hole.is_visible() {
            contour.line_to(Point::new(e.right, pos - r * 2.0));
            contour.arc_to(
                Rect::from_ltrb(e.right - r, pos - r * 2.0, e.right + r, pos),
                270.0,
                -180.0,
            );
        }
        contour.line_to(Point::new(e.right, e.bottom - e.radii.bottom_right));
        e.bottom_right(contour);

        contour.line_to(Point::new(e.left + e.radii.bottom_left, e.bottom));
        e.bottom_left(contour);

        // Left notch, walked upward
        if hole.is_visible() {
            contour.line_to(Point::new(e.left, pos + r * 2.0));
            contour.arc_to(
                Rect::from_ltrb(e.left - r, pos - r * 2.0, e.left + r, pos),
                90.0,
                -180.0,
            );
        }
        e.close(contour);
    }
}

impl NotchLayout for HorizontalNotches {
    /// `hole.position` is the x of the notch's left end; both notches span
    /// `position ..= position + 2r`.
    ///
    /// The two edges approach their notch differently. The top edge runs to
    /// the notch's far end (`position + 2r`) and the arc's connector then
    /// retraces back to `position`; the bottom edge stops at the notch center
    /// (`position + r`) before the connector moves to `position + 2r`. Both
    /// carve the same notch when filled, but a stroked border draws a line
    /// across the whole top notch mouth and half of the bottom one.
    fn trace(&self, contour: &mut Contour, e: &TicketEdges, hole: HoleSpec) {
        let (pos, r) = (hole.position, hole.radius);

        e.start(contour);
        e.top_left(contour);

        if hole.is_visible() {
            contour.line_to(Point::new(pos + r * 2.0, e.top));
            contour.arc_to(
                Rect::from_ltrb(pos, e.top - r, pos + r * 2.0, e.top + r),
                180.0,
                -180.0,
            );
        }
        contour.line_to(Point::new(e.right - e.radii.top_right, e.top));
        e.top_right(contour);

        contour.line_to(Point::new(e.right, e.bottom - e.radii.bottom_right));
        e.bottom_right(contour);

        if hole.is_visible() {
            contour.line_to(Point::new(pos + r, e.bottom));
            contour.arc_to(
                Rect::from_ltrb(pos, e.bottom - r, pos + r * 2.0, e.bottom + r),
                0.0,
                -180.0,
            );
        }
        contour.line_to(Point::new(e.left + e.radii.bottom_left, e.bottom));
        e.bottom_left(contour);

        e.close(contour);
    }
}
