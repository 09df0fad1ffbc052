//! Ticket view
//!
//! [`TicketView`] holds a ticket's configuration and container size, caches
//! the outline and shadow built from them, and paints onto a
//! [`TicketCanvas`]. Every mutator marks the cache stale; the next
//! [`TicketView::draw`] rebuilds it exactly once.

use ticket_core::{
    sanitize_length, Color, Contour, CornerRadius, HoleSpec, Orientation, Rect, Result, Size,
    Stroke, TicketError,
};
use ticket_paint::{
    build_contour_into, BlurCapability, ShadowConfig, ShadowOutput, ShadowRasterizer, TicketCanvas,
};
use tracing::{debug, trace};

use crate::anchor::AnchorResolver;
use crate::config::{ensure_finite, TicketConfig};
use crate::dirty::{DirtyHandle, DirtyState, DirtyTracker};

/// A ticket-shaped container
pub struct TicketView {
    config: TicketConfig,
    scale_factor: f32,
    size: Size,
    bounds: Rect,
    shadow_config: ShadowConfig,
    contour: Contour,
    rasterizer: ShadowRasterizer,
    dirty: DirtyTracker,
    pending_anchor: Option<Box<dyn AnchorResolver>>,
    rebuilds: u64,
}

impl TicketView {
    /// Create a view with the software blur.
    ///
    /// `scale_factor` is the output's pixel density, used to scale the
    /// elevation ceiling.
    pub fn new(config: TicketConfig, scale_factor: f32) -> Result<Self> {
        Self::with_rasterizer(config, scale_factor, ShadowRasterizer::new())
    }

    /// Create a view with a specific blur implementation
    pub fn with_blur(
        config: TicketConfig,
        scale_factor: f32,
        blur: Box<dyn BlurCapability>,
    ) -> Result<Self> {
        Self::with_rasterizer(config, scale_factor, ShadowRasterizer::with_blur(blur))
    }

    fn with_rasterizer(
        config: TicketConfig,
        scale_factor: f32,
        rasterizer: ShadowRasterizer,
    ) -> Result<Self> {
        config.validate()?;
        let scale_factor = ensure_finite("scale_factor", scale_factor)?;
        let shadow_config = ShadowConfig::from_elevation(config.elevation, scale_factor);

        Ok(Self {
            config,
            scale_factor,
            size: Size::ZERO,
            bounds: Rect::ZERO,
            shadow_config,
            contour: Contour::new(),
            rasterizer,
            dirty: DirtyTracker::new(),
            pending_anchor: None,
            rebuilds: 0,
        })
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.config.orientation = orientation;
        self.dirty.mark_dirty();
    }

    pub fn set_hole_radius(&mut self, radius: f32) -> Result<()> {
        self.config.hole_radius = ensure_finite("hole_radius", radius)?;
        self.dirty.mark_dirty();
        Ok(())
    }

    pub fn set_hole_position(&mut self, position: f32) -> Result<()> {
        self.config.hole_position = ensure_finite("hole_position", position)?;
        self.dirty.mark_dirty();
        Ok(())
    }

    /// Same radius on every corner
    pub fn set_corner_radius(&mut self, radius: f32) -> Result<()> {
        let radius = ensure_finite("corner_radius", radius)?;
        self.config.set_corner_radii(CornerRadius::uniform(radius));
        self.dirty.mark_dirty();
        Ok(())
    }

    pub fn set_corner_radii(&mut self, radii: CornerRadius) -> Result<()> {
        for (name, value) in [
            ("top_left_corner_radius", radii.top_left),
            ("top_right_corner_radius", radii.top_right),
            ("bottom_right_corner_radius", radii.bottom_right),
            ("bottom_left_corner_radius", radii.bottom_left),
        ] {
            ensure_finite(name, value)?;
        }
        self.config.set_corner_radii(radii);
        self.dirty.mark_dirty();
        Ok(())
    }

    pub fn set_show_border(&mut self, show: bool) {
        self.config.show_border = show;
        self.dirty.mark_dirty();
    }

    pub fn set_border_color(&mut self, color: Color) {
        self.config.border_color = color;
        self.dirty.mark_dirty();
    }

    pub fn set_border_width(&mut self, width: f32) -> Result<()> {
        self.config.border_width = ensure_finite("border_width", width)?;
        self.dirty.mark_dirty();
        Ok(())
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.config.background_color = color;
        self.dirty.mark_dirty();
    }

    /// Change the shadow elevation, in pixels
    pub fn set_elevation(&mut self, elevation: f32) -> Result<()> {
        self.config.elevation = ensure_finite("elevation", elevation)?;
        self.shadow_config = ShadowConfig::from_elevation(elevation, self.scale_factor);
        self.update_bounds();
        self.dirty.mark_dirty();
        Ok(())
    }

    /// Suppress the shadow while rendering a non-interactive preview
    pub fn set_preview_mode(&mut self, preview: bool) {
        self.rasterizer.set_preview_mode(preview);
        self.dirty.mark_dirty();
    }

    /// Apply a new container size.
    ///
    /// The cache is only invalidated when the size actually changes.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        let width = ensure_finite("width", width)?;
        let height = ensure_finite("height", height)?;
        if width < 0.0 || height < 0.0 {
            return Err(TicketError::InvalidSize { width, height });
        }

        let size = Size::new(width, height);
        if size != self.size {
            self.size = size;
            self.update_bounds();
            self.dirty.mark_dirty();
        }
        Ok(())
    }

    // =========================================================================
    // Anchoring
    // =========================================================================

    /// Resolve the hole position from `anchor` now.
    ///
    /// An unresolved anchor leaves the current position untouched. Returns
    /// whether the position was updated.
    pub fn set_anchor(&mut self, anchor: &dyn AnchorResolver) -> bool {
        let hole_radius = sanitize_length("hole_radius", self.config.hole_radius);
        let resolved = anchor
            .resolve_hole_position(self.config.orientation, hole_radius)
            .filter(|position| position.is_finite());

        match resolved {
            Some(position) => {
                debug!(position, orientation = ?self.config.orientation, "hole position anchored");
                self.config.hole_position = position;
                self.dirty.mark_dirty();
                true
            }
            None => {
                debug!("anchor unresolved, keeping hole position");
                false
            }
        }
    }

    /// Defer anchoring until the first [`TicketView::on_layout_complete`]
    pub fn attach_anchor(&mut self, anchor: Box<dyn AnchorResolver>) {
        self.pending_anchor = Some(anchor);
    }

    /// Layout pass finished: resolve a pending anchor, once
    pub fn on_layout_complete(&mut self) {
        if let Some(anchor) = self.pending_anchor.take() {
            self.set_anchor(anchor.as_ref());
        }
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Paint the ticket: shadow, then fill, then the optional border.
    ///
    /// Stale geometry is rebuilt first.
    pub fn draw(&mut self, canvas: &mut dyn TicketCanvas) {
        if self.dirty.take_dirty() {
            self.rebuild();
        }
        if self.size.is_empty() {
            trace!("empty ticket, nothing to draw");
            return;
        }

        if let Some(shadow) = self.rasterizer.shadow() {
            trace!(offset_y = shadow.offset.y, "compositing shadow");
            canvas.draw_shadow(shadow.mask, shadow.offset);
        }

        canvas.fill_contour(&self.contour, self.config.background_color);

        if self.config.show_border {
            canvas.stroke_contour(&self.contour, &self.border_stroke(), self.config.border_color);
        }
    }

    fn rebuild(&mut self) {
        self.update_bounds();
        let hole = self.hole();
        build_contour_into(
            &mut self.contour,
            self.bounds,
            self.config.corner_radii(),
            self.config.orientation,
            hole,
        );

        let border = self.config.show_border.then(|| self.border_stroke());
        let (width, height) = self.size.to_pixels();
        let has_shadow = self
            .rasterizer
            .render(&self.contour, border.as_ref(), &self.shadow_config, width, height)
            .is_some();

        self.rebuilds += 1;
        debug!(
            rebuilds = self.rebuilds,
            commands = self.contour.len(),
            has_shadow,
            width,
            height,
            "ticket rebuilt"
        );
    }

    /// Container rect inset by half the blur so the shadow stays inside
    fn update_bounds(&mut self) {
        let inset = self.shadow_config.blur_radius / 2.0;
        self.bounds = self.size.to_rect().inset(inset, inset);
    }

    fn hole(&self) -> HoleSpec {
        HoleSpec::new(self.config.hole_position, self.config.hole_radius)
    }

    fn border_stroke(&self) -> Stroke {
        Stroke::new(self.config.border_width)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &TicketConfig {
        &self.config
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Outline rect, inset from the container by half the blur radius
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The outline from the last rebuild
    pub fn contour(&self) -> &Contour {
        &self.contour
    }

    pub fn shadow_config(&self) -> ShadowConfig {
        self.shadow_config
    }

    /// The shadow from the last rebuild, if any
    pub fn shadow(&self) -> Option<ShadowOutput<'_>> {
        self.rasterizer.shadow()
    }

    pub fn hole_position(&self) -> f32 {
        self.config.hole_position
    }

    pub fn dirty_state(&self) -> DirtyState {
        self.dirty.state()
    }

    /// Handle for invalidating the view from another thread
    pub fn dirty_handle(&self) -> DirtyHandle {
        self.dirty.handle()
    }

    /// How many times geometry has been rebuilt
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    pub fn shadow_allocations(&self) -> u32 {
        self.rasterizer.allocations()
    }
}

impl std::fmt::Debug for TicketView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketView")
            .field("config", &self.config)
            .field("size", &self.size)
            .field("bounds", &self.bounds)
            .field("dirty", &self.dirty.state())
            .field("rebuilds", &self.rebuilds)
            .finish()
    }
}
