//! Draw targets for a ticket
//!
//! [`TicketCanvas`] is the surface a ticket view composites onto: the shadow
//! mask first, then the contour fill, then the optional border stroke.

use std::path::Path;

use ticket_core::{Color, Contour, Point, Stroke};
use tiny_skia::{FillRule, FilterQuality, IntSize, Pixmap, PixmapPaint, Transform};
use tracing::warn;

use crate::error::{PaintError, Result};
use crate::raster::{contour_to_path, solid_paint, to_skia_color, to_skia_stroke};
use crate::shadow::ShadowMask;

/// A surface that can draw the parts of a ticket
pub trait TicketCanvas {
    /// Composite a shadow mask as black at `offset`
    fn draw_shadow(&mut self, mask: &ShadowMask, offset: Point);

    /// Fill the contour with a solid color
    fn fill_contour(&mut self, contour: &Contour, color: Color);

    /// Stroke the contour outline
    fn stroke_contour(&mut self, contour: &Contour, stroke: &Stroke, color: Color);
}

// =============================================================================
// RecordingCanvas
// =============================================================================

/// A recorded canvas call
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasCommand {
    /// Shadow masks are recorded by summary rather than by pixels
    DrawShadow {
        width: u32,
        height: u32,
        coverage: usize,
        offset: Point,
    },
    FillContour {
        contour: Contour,
        color: Color,
    },
    StrokeContour {
        contour: Contour,
        stroke: Stroke,
        color: Color,
    },
}

/// A canvas that records calls for later inspection
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<CanvasCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[CanvasCommand] {
        &self.commands
    }

    /// Take the recorded commands
    pub fn take_commands(&mut self) -> Vec<CanvasCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl TicketCanvas for RecordingCanvas {
    fn draw_shadow(&mut self, mask: &ShadowMask, offset: Point) {
        self.commands.push(CanvasCommand::DrawShadow {
            width: mask.width(),
            height: mask.height(),
            coverage: mask.coverage(),
            offset,
        });
    }

    fn fill_contour(&mut self, contour: &Contour, color: Color) {
        self.commands.push(CanvasCommand::FillContour {
            contour: contour.clone(),
            color,
        });
    }

    fn stroke_contour(&mut self, contour: &Contour, stroke: &Stroke, color: Color) {
        self.commands.push(CanvasCommand::StrokeContour {
            contour: contour.clone(),
            stroke: *stroke,
            color,
        });
    }
}

// =============================================================================
// PixmapCanvas
// =============================================================================

/// A canvas that rasterizes into an RGBA pixmap with tiny-skia
pub struct PixmapCanvas {
    pixmap: Pixmap,
}

impl PixmapCanvas {
    /// Create a transparent canvas
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(PaintError::InvalidSize { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Flood the whole canvas with `color`
    pub fn fill_background(&mut self, color: Color) {
        self.pixmap.fill(to_skia_color(color));
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Encode the canvas as PNG
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| PaintError::Encode(e.to_string()))
    }

    /// Write the canvas to a PNG file
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl TicketCanvas for PixmapCanvas {
    fn draw_shadow(&mut self, mask: &ShadowMask, offset: Point) {
        let Some(size) = IntSize::from_wh(mask.width(), mask.height()) else {
            return;
        };
        // Black with the mask as alpha is already premultiplied
        let rgba: Vec<u8> = mask.data().iter().flat_map(|&a| [0, 0, 0, a]).collect();
        let Some(shadow) = Pixmap::from_vec(rgba, size) else {
            warn!(width = mask.width(), height = mask.height(), "shadow mask size mismatch");
            return;
        };

        let whole_pixels = offset.x.fract() == 0.0 && offset.y.fract() == 0.0;
        let paint = PixmapPaint {
            quality: if whole_pixels {
                FilterQuality::Nearest
            } else {
                FilterQuality::Bilinear
            },
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(
            0,
            0,
            shadow.as_ref(),
            &paint,
            Transform::from_translate(offset.x, offset.y),
            None,
        );
    }

    fn fill_contour(&mut self, contour: &Contour, color: Color) {
        if let Some(path) = contour_to_path(contour) {
            self.pixmap.fill_path(
                &path,
                &solid_paint(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn stroke_contour(&mut self, contour: &Contour, stroke: &Stroke, color: Color) {
        if let Some(path) = contour_to_path(contour) {
            self.pixmap.stroke_path(
                &path,
                &solid_paint(color),
                &to_skia_stroke(stroke),
                Transform::identity(),
                None,
            );
        }
    }
}

impl std::fmt::Debug for PixmapCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapCanvas")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::rounded_rect_contour;
    use ticket_core::{CornerRadius, Rect};

    fn pixel(canvas: &PixmapCanvas, x: u32, y: u32) -> [u8; 4] {
        let px = canvas.pixmap().pixel(x, y).expect("in bounds");
        [px.red(), px.green(), px.blue(), px.alpha()]
    }

    #[test]
    fn test_recording_canvas() {
        let contour = rounded_rect_contour(Rect::new(0.0, 0.0, 10.0, 10.0), CornerRadius::ZERO);
        let mut canvas = RecordingCanvas::new();
        let mut mask = ShadowMask::new(4, 4);
        mask.data_mut()[5] = 10;

        canvas.draw_shadow(&mask, Point::new(0.0, 2.0));
        canvas.fill_contour(&contour, Color::WHITE);
        canvas.stroke_contour(&contour, &Stroke::new(1.0), Color::GRAY);

        assert_eq!(canvas.commands().len(), 3);
        assert_eq!(
            canvas.commands()[0],
            CanvasCommand::DrawShadow {
                width: 4,
                height: 4,
                coverage: 1,
                offset: Point::new(0.0, 2.0),
            }
        );
        assert!(matches!(canvas.commands()[2], CanvasCommand::StrokeContour { color, .. } if color == Color::GRAY));

        let taken = canvas.take_commands();
        assert_eq!(taken.len(), 3);
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn test_pixmap_canvas_fill() {
        let mut canvas = PixmapCanvas::new(40, 30).expect("canvas");
        let contour = rounded_rect_contour(Rect::from_ltrb(5.0, 5.0, 35.0, 25.0), CornerRadius::uniform(4.0));
        canvas.fill_contour(&contour, Color::from_hex(0xFF0000));

        assert_eq!(pixel(&canvas, 20, 15), [255, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 1, 1), [0, 0, 0, 0]);
        // Rounded corner leaves the very corner pixel clear
        assert_eq!(pixel(&canvas, 5, 5)[3], 0);
    }

    #[test]
    fn test_pixmap_canvas_shadow_offset() {
        let mut canvas = PixmapCanvas::new(8, 8).expect("canvas");
        let mut mask = ShadowMask::new(8, 8);
        mask.data_mut()[0] = 200;

        canvas.draw_shadow(&mask, Point::new(0.0, 3.0));
        assert_eq!(pixel(&canvas, 0, 3), [0, 0, 0, 200]);
        assert_eq!(pixel(&canvas, 0, 0)[3], 0);
    }

    #[test]
    fn test_invalid_canvas_size() {
        assert!(matches!(
            PixmapCanvas::new(0, 10),
            Err(PaintError::InvalidSize { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_encode_png() {
        let mut canvas = PixmapCanvas::new(4, 4).expect("canvas");
        canvas.fill_background(Color::WHITE);
        let png = canvas.encode_png().expect("png");
        assert_eq!(&png[1..4], b"PNG");
    }
}
