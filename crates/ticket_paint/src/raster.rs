//! Conversion from ticket types to tiny-skia

use ticket_core::{Color, Contour, ContourSegment, LineCap, LineJoin, Stroke};
use tiny_skia::{Paint, Path, PathBuilder};

/// Lower a contour to a closed tiny-skia path.
///
/// Returns `None` for an empty contour or one that collapses to nothing
/// drawable.
pub fn contour_to_path(contour: &Contour) -> Option<Path> {
    let mut builder = PathBuilder::with_capacity(contour.len() * 2, contour.len() * 6);

    for segment in contour.segments() {
        match segment {
            ContourSegment::MoveTo(p) => builder.move_to(p.x, p.y),
            ContourSegment::LineTo(p) => builder.line_to(p.x, p.y),
            ContourSegment::CubicTo {
                control1,
                control2,
                end,
            } => builder.cubic_to(control1.x, control1.y, control2.x, control2.y, end.x, end.y),
        }
    }
    builder.close();
    builder.finish()
}

pub fn to_skia_color(color: Color) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_rgba8();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

pub fn to_skia_stroke(stroke: &Stroke) -> tiny_skia::Stroke {
    tiny_skia::Stroke {
        width: stroke.width,
        miter_limit: stroke.miter_limit,
        line_cap: match stroke.cap {
            LineCap::Butt => tiny_skia::LineCap::Butt,
            LineCap::Round => tiny_skia::LineCap::Round,
            LineCap::Square => tiny_skia::LineCap::Square,
        },
        line_join: match stroke.join {
            LineJoin::Miter => tiny_skia::LineJoin::Miter,
            LineJoin::Round => tiny_skia::LineJoin::Round,
            LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
        },
        ..Default::default()
    }
}

/// Anti-aliased solid paint
pub fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia_color(color));
    paint.anti_alias = true;
    paint
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticket_core::{Point, Rect};

    #[test]
    fn test_contour_to_path_bounds() {
        let mut contour = Contour::new();
        contour
            .move_to(Point::new(0.0, 10.0))
            .arc_to(Rect::from_ltrb(0.0, 0.0, 20.0, 20.0), 180.0, 90.0)
            .line_to(Point::new(50.0, 0.0))
            .line_to(Point::new(50.0, 30.0))
            .line_to(Point::new(0.0, 30.0))
            .line_to(Point::new(0.0, 10.0));

        let path = contour_to_path(&contour).expect("path");
        let bounds = path.bounds();
        assert_eq!(bounds.left(), 0.0);
        assert_eq!(bounds.top(), 0.0);
        assert_eq!(bounds.right(), 50.0);
        assert_eq!(bounds.bottom(), 30.0);
    }

    #[test]
    fn test_empty_contour_has_no_path() {
        assert!(contour_to_path(&Contour::new()).is_none());
    }

    #[test]
    fn test_color_conversion() {
        let color = to_skia_color(Color::from_argb(0x80FF0000));
        let rgba = color.to_color_u8();
        assert_eq!((rgba.red(), rgba.green(), rgba.blue(), rgba.alpha()), (255, 0, 0, 128));
    }

    #[test]
    fn test_stroke_conversion() {
        let stroke = to_skia_stroke(&Stroke::new(3.0).with_cap(LineCap::Round));
        assert_eq!(stroke.width, 3.0);
        assert_eq!(stroke.line_cap, tiny_skia::LineCap::Round);
    }
}
