//! Contour command model
//!
//! A [`Contour`] is the outline of a ticket expressed as an ordered list of
//! move/line/arc commands. Arcs are described the way canvas APIs describe
//! them: an oval bounding box plus a start angle and a sweep, both in
//! degrees. 0° points at 3 o'clock and a positive sweep runs clockwise in
//! y-down space.
//!
//! `ArcTo` never lifts the pen: when the current point is not the arc's start
//! point, a straight segment connects them first.

use std::f32::consts::PI;
use std::fmt;

use smallvec::SmallVec;

use crate::geometry::{Point, Rect};

/// Commands a ticket contour holds before spilling to the heap.
///
/// A two-notch ticket needs 1 move, 6 arcs and 6 lines.
pub const CONTOUR_INLINE_CAPACITY: usize = 16;

/// One drawing command of a contour
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContourCommand {
    /// Start a new outline at a point
    MoveTo(Point),
    /// Straight segment to a point
    LineTo(Point),
    /// Elliptical arc inscribed in `oval`
    ArcTo {
        oval: Rect,
        start_angle: f32,
        sweep_angle: f32,
    },
}

impl ContourCommand {
    /// The point the pen rests on after this command
    pub fn end_point(&self) -> Point {
        match *self {
            ContourCommand::MoveTo(p) | ContourCommand::LineTo(p) => p,
            ContourCommand::ArcTo {
                oval,
                start_angle,
                sweep_angle,
            } => ArcSegment::new(oval, start_angle, sweep_angle).end_point(),
        }
    }
}

impl fmt::Display for ContourCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContourCommand::MoveTo(p) => write!(f, "M {},{}", p.x, p.y),
            ContourCommand::LineTo(p) => write!(f, "L {},{}", p.x, p.y),
            ContourCommand::ArcTo {
                oval,
                start_angle,
                sweep_angle,
            } => write!(
                f,
                "A {},{},{},{} {} {}",
                oval.left(),
                oval.top(),
                oval.right(),
                oval.bottom(),
                start_angle,
                sweep_angle
            ),
        }
    }
}

/// An arc command resolved into geometric terms
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSegment {
    pub oval: Rect,
    pub start_angle: f32,
    pub sweep_angle: f32,
}

impl ArcSegment {
    pub fn new(oval: Rect, start_angle: f32, sweep_angle: f32) -> Self {
        Self {
            oval,
            start_angle,
            sweep_angle,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.oval.left() + self.oval.right()) / 2.0,
            (self.oval.top() + self.oval.bottom()) / 2.0,
        )
    }

    /// Horizontal and vertical radii of the oval
    pub fn radii(&self) -> (f32, f32) {
        (self.oval.width() / 2.0, self.oval.height() / 2.0)
    }

    /// Point on the oval at `degrees`
    pub fn point_at(&self, degrees: f32) -> Point {
        let c = self.center();
        let (rx, ry) = self.radii();
        let (cos, sin) = unit_vector(degrees);
        Point::new(c.x + rx * cos, c.y + ry * sin)
    }

    pub fn start_point(&self) -> Point {
        self.point_at(self.start_angle)
    }

    pub fn end_point(&self) -> Point {
        self.point_at(self.start_angle + self.sweep_angle)
    }

    /// Tight bounds: both endpoints plus every axis extreme the sweep crosses
    pub fn bounds(&self) -> Rect {
        let start = self.start_point();
        let mut bounds = Rect::from_ltrb(start.x, start.y, start.x, start.y)
            .expand_to_include(self.end_point());

        let (lo, hi) = if self.sweep_angle >= 0.0 {
            (self.start_angle, self.start_angle + self.sweep_angle)
        } else {
            (self.start_angle + self.sweep_angle, self.start_angle)
        };
        let mut quadrant = (lo / 90.0).ceil() * 90.0;
        while quadrant <= hi {
            bounds = bounds.expand_to_include(self.point_at(quadrant));
            quadrant += 90.0;
        }
        bounds
    }

    /// Approximate the arc with cubic Béziers of at most 90° each.
    ///
    /// Returns `(control1, control2, end)` triples; the first curve starts at
    /// [`ArcSegment::start_point`].
    pub fn to_cubics(&self) -> SmallVec<[(Point, Point, Point); 2]> {
        let mut curves = SmallVec::new();
        if self.sweep_angle == 0.0 {
            return curves;
        }

        let pieces = (self.sweep_angle.abs() / 90.0 - 1e-4).ceil().max(1.0) as usize;
        let step = self.sweep_angle / pieces as f32;
        let k = 4.0 / 3.0 * (step.to_radians() / 4.0).tan();
        let (rx, ry) = self.radii();

        for i in 0..pieces {
            let a0 = self.start_angle + step * i as f32;
            let a1 = if i + 1 == pieces {
                self.start_angle + self.sweep_angle
            } else {
                a0 + step
            };
            let (cos0, sin0) = unit_vector(a0);
            let (cos1, sin1) = unit_vector(a1);
            let p0 = self.point_at(a0);
            let p1 = self.point_at(a1);
            let c1 = Point::new(p0.x - k * rx * sin0, p0.y + k * ry * cos0);
            let c2 = Point::new(p1.x + k * rx * sin1, p1.y - k * ry * cos1);
            curves.push((c1, c2, p1));
        }
        curves
    }

    /// Sample the arc as a polyline within `tolerance` of the true curve.
    ///
    /// The start point is not included.
    fn flatten_into(&self, tolerance: f32, out: &mut Vec<Point>) {
        let (rx, ry) = self.radii();
        let radius = rx.max(ry);
        let sweep = self.sweep_angle.to_radians().abs();

        let pieces = if radius > tolerance && sweep > 0.0 {
            let step = 2.0 * (1.0 - tolerance / radius).acos();
            (sweep / step).ceil().max(1.0) as usize
        } else {
            1
        };

        let step = self.sweep_angle / pieces as f32;
        for i in 1..pieces {
            out.push(self.point_at(self.start_angle + step * i as f32));
        }
        out.push(self.end_point());
    }
}

/// Resolved drawing operation with arcs lowered to cubic curves
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContourSegment {
    MoveTo(Point),
    LineTo(Point),
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
}

/// A closed outline built from move/line/arc commands
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Contour {
    commands: SmallVec<[ContourCommand; CONTOUR_INLINE_CAPACITY]>,
}

impl Contour {
    /// Create a new empty contour
    pub fn new() -> Self {
        Self {
            commands: SmallVec::new(),
        }
    }

    /// Remove all commands, keeping the storage
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Move to a point
    pub fn move_to(&mut self, point: Point) -> &mut Self {
        self.commands.push(ContourCommand::MoveTo(point));
        self
    }

    /// Line to a point
    pub fn line_to(&mut self, point: Point) -> &mut Self {
        self.commands.push(ContourCommand::LineTo(point));
        self
    }

    /// Arc inscribed in `oval`, connected to the current point by a line
    pub fn arc_to(&mut self, oval: Rect, start_angle: f32, sweep_angle: f32) -> &mut Self {
        self.commands.push(ContourCommand::ArcTo {
            oval,
            start_angle,
            sweep_angle,
        });
        self
    }

    /// Get the contour commands
    pub fn commands(&self) -> &[ContourCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Whether the command storage has spilled to the heap
    pub fn spilled(&self) -> bool {
        self.commands.spilled()
    }

    /// First point of the outline
    pub fn start_point(&self) -> Option<Point> {
        match self.commands.first()? {
            ContourCommand::MoveTo(p) | ContourCommand::LineTo(p) => Some(*p),
            ContourCommand::ArcTo {
                oval,
                start_angle,
                sweep_angle,
            } => Some(ArcSegment::new(*oval, *start_angle, *sweep_angle).start_point()),
        }
    }

    /// Last point of the outline
    pub fn end_point(&self) -> Option<Point> {
        self.commands.last().map(ContourCommand::end_point)
    }

    /// Whether the outline returns to its starting point within `eps`
    pub fn is_closed(&self, eps: f32) -> bool {
        match (self.start_point(), self.end_point()) {
            (Some(start), Some(end)) => start.approx_eq(end, eps),
            _ => false,
        }
    }

    /// Iterate the arc commands
    pub fn arcs(&self) -> impl Iterator<Item = ArcSegment> + '_ {
        self.commands.iter().filter_map(|cmd| match *cmd {
            ContourCommand::ArcTo {
                oval,
                start_angle,
                sweep_angle,
            } => Some(ArcSegment::new(oval, start_angle, sweep_angle)),
            _ => None,
        })
    }

    /// Tight bounding rectangle of the drawn outline
    pub fn bounds(&self) -> Rect {
        let mut bounds: Option<Rect> = None;
        let mut include = |r: Rect| {
            bounds = Some(match bounds {
                Some(b) => b.union(&r),
                None => r,
            });
        };

        for cmd in &self.commands {
            match *cmd {
                ContourCommand::MoveTo(p) | ContourCommand::LineTo(p) => {
                    include(Rect::from_ltrb(p.x, p.y, p.x, p.y))
                }
                ContourCommand::ArcTo {
                    oval,
                    start_angle,
                    sweep_angle,
                } => include(ArcSegment::new(oval, start_angle, sweep_angle).bounds()),
            }
        }

        bounds.unwrap_or(Rect::ZERO)
    }

    /// Lower the contour to move/line/cubic segments.
    ///
    /// Implicit arc connectors become explicit `LineTo`s.
    pub fn segments(&self) -> Vec<ContourSegment> {
        let mut out = Vec::with_capacity(self.commands.len() * 2);
        let mut current: Option<Point> = None;

        for cmd in &self.commands {
            match *cmd {
                ContourCommand::MoveTo(p) => {
                    out.push(ContourSegment::MoveTo(p));
                    current = Some(p);
                }
                ContourCommand::LineTo(p) => {
                    if current.is_none() {
                        out.push(ContourSegment::MoveTo(p));
                    } else {
                        out.push(ContourSegment::LineTo(p));
                    }
                    current = Some(p);
                }
                ContourCommand::ArcTo {
                    oval,
                    start_angle,
                    sweep_angle,
                } => {
                    let arc = ArcSegment::new(oval, start_angle, sweep_angle);
                    let start = arc.start_point();
                    match current {
                        None => out.push(ContourSegment::MoveTo(start)),
                        Some(p) if p != start => out.push(ContourSegment::LineTo(start)),
                        _ => {}
                    }
                    for (control1, control2, end) in arc.to_cubics() {
                        out.push(ContourSegment::CubicTo {
                            control1,
                            control2,
                            end,
                        });
                    }
                    current = Some(arc.end_point());
                }
            }
        }
        out
    }

    /// Sample the outline as a polygon within `tolerance` of the true curve
    pub fn flatten(&self, tolerance: f32) -> Vec<Point> {
        let tolerance = tolerance.max(1e-3);
        let mut points: Vec<Point> = Vec::with_capacity(self.commands.len() * 8);

        for cmd in &self.commands {
            match *cmd {
                ContourCommand::MoveTo(p) | ContourCommand::LineTo(p) => points.push(p),
                ContourCommand::ArcTo {
                    oval,
                    start_angle,
                    sweep_angle,
                } => {
                    let arc = ArcSegment::new(oval, start_angle, sweep_angle);
                    let start = arc.start_point();
                    if points.last() != Some(&start) {
                        points.push(start);
                    }
                    arc.flatten_into(tolerance, &mut points);
                }
            }
        }
        points
    }

    /// Nonzero-winding hit test against the flattened outline
    pub fn contains(&self, point: Point) -> bool {
        let polygon = self.flatten(0.25);
        if polygon.len() < 3 {
            return false;
        }

        let is_left = |a: Point, b: Point| (b.x - a.x) * (point.y - a.y) - (point.x - a.x) * (b.y - a.y);

        let mut winding = 0i32;
        for (i, &a) in polygon.iter().enumerate() {
            let b = polygon[(i + 1) % polygon.len()];
            if a.y <= point.y {
                if b.y > point.y && is_left(a, b) > 0.0 {
                    winding += 1;
                }
            } else if b.y <= point.y && is_left(a, b) < 0.0 {
                winding -= 1;
            }
        }
        winding != 0
    }
}

impl fmt::Display for Contour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cmd in &self.commands {
            writeln!(f, "{cmd}")?;
        }
        Ok(())
    }
}

/// `(cos, sin)` of an angle in degrees, exact on the four axis directions
fn unit_vector(degrees: f32) -> (f32, f32) {
    let d = degrees.rem_euclid(360.0);
    if d == 0.0 {
        (1.0, 0.0)
    } else if d == 90.0 {
        (0.0, 1.0)
    } else if d == 180.0 {
        (-1.0, 0.0)
    } else if d == 270.0 {
        (0.0, -1.0)
    } else {
        let r = d * PI / 180.0;
        (r.cos(), r.sin())
    }
}
