//! Offscreen ticket rendering

use anyhow::{Context, Result};
use image::GrayImage;
use std::path::Path;
use ticket_core::{Color, Rect};
use ticket_paint::{PixmapCanvas, RecordingCanvas, ShadowMask};
use ticket_view::{SiblingAnchor, TicketConfig, TicketView};

/// A single ticket filling a fixed-size container
pub struct TicketScene {
    view: TicketView,
}

impl TicketScene {
    pub fn new(config: TicketConfig, width: f32, height: f32, scale: f32) -> Result<Self> {
        let mut view = TicketView::new(config, scale).context("Invalid ticket config")?;
        view.resize(width, height).context("Invalid container size")?;
        Ok(Self { view })
    }

    pub fn view(&self) -> &TicketView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut TicketView {
        &mut self.view
    }

    /// Center the notches on a sibling laid out at `bounds`
    pub fn anchor_to(&mut self, bounds: Rect) {
        self.view.attach_anchor(Box::new(SiblingAnchor::new(bounds)));
        // There is no real layout pass offscreen
        self.view.on_layout_complete();
    }

    /// Bring cached geometry up to date without producing pixels
    pub fn rebuild(&mut self) {
        self.view.draw(&mut RecordingCanvas::new());
    }

    /// Paint the ticket onto a new pixmap the size of the container
    pub fn render(&mut self, background: Option<Color>) -> Result<PixmapCanvas> {
        let (width, height) = self.view.size().to_pixels();
        let mut canvas = PixmapCanvas::new(width, height)
            .with_context(|| format!("Cannot render a {width}x{height} ticket"))?;
        if let Some(color) = background {
            canvas.fill_background(color);
        }
        self.view.draw(&mut canvas);
        Ok(canvas)
    }
}

/// Write a shadow mask as an 8-bit grayscale PNG
pub fn save_mask(mask: &ShadowMask, path: &Path) -> Result<()> {
    let image = GrayImage::from_raw(mask.width(), mask.height(), mask.data().to_vec())
        .context("Shadow mask size does not match its data")?;
    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Parse `x,y,width,height`
pub fn parse_rect(value: &str) -> std::result::Result<Rect, String> {
    let parts: Vec<f32> = value
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| format!("invalid number in {value:?}: {e}"))?;

    match parts.as_slice() {
        &[x, y, width, height] if width >= 0.0 && height >= 0.0 => {
            Ok(Rect::new(x, y, width, height))
        }
        [_, _, _, _] => Err(format!("negative size in {value:?}")),
        _ => Err(format!("expected x,y,width,height, got {value:?}")),
    }
}
