//! Drop shadow rasterization
//!
//! The shadow is an alpha-only mask: the ticket contour is filled (and
//! optionally stroked) at a fixed 20% opacity into an offscreen buffer, then
//! blurred in place. Color is irrelevant here; the host composites the mask
//! as black beneath the ticket, shifted down by half the blur radius.

use ticket_core::{Contour, Point, Stroke};
use tiny_skia::{Color as SkiaColor, FillRule, Paint, Pixmap, Transform};
use tracing::{debug, trace, warn};

use crate::blur::{BlurCapability, GaussianBlur};
use crate::raster::{contour_to_path, to_skia_stroke};

/// Largest blur radius in pixels
pub const MAX_BLUR_RADIUS: f32 = 25.0;

/// Elevation, in density-independent units, that maps to [`MAX_BLUR_RADIUS`]
pub const MAX_ELEVATION_DP: f32 = 24.0;

/// Opacity of the unblurred shadow shape (~20%)
pub const SHADOW_ALPHA: u8 = 51;

// =============================================================================
// ShadowConfig
// =============================================================================

/// Blur, opacity and offset of a drop shadow
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowConfig {
    /// Blur radius in pixels, `0.0..=MAX_BLUR_RADIUS`
    pub blur_radius: f32,
    /// Opacity of the shape before blurring
    pub alpha: u8,
    /// Vertical draw offset, half the blur radius
    pub offset_y: f32,
}

impl ShadowConfig {
    /// No shadow
    pub const NONE: ShadowConfig = ShadowConfig {
        blur_radius: 0.0,
        alpha: SHADOW_ALPHA,
        offset_y: 0.0,
    };

    /// Shadow with an explicit blur radius, clamped to the supported range
    pub fn with_blur_radius(blur_radius: f32) -> Self {
        let blur_radius = if blur_radius > 0.0 {
            blur_radius.min(MAX_BLUR_RADIUS)
        } else {
            0.0
        };
        Self {
            blur_radius,
            alpha: SHADOW_ALPHA,
            offset_y: blur_radius / 2.0,
        }
    }

    /// Map an elevation in pixels to a shadow.
    ///
    /// `scale_factor` is the output's pixel density; [`MAX_ELEVATION_DP`] is
    /// converted with it (truncated to whole pixels) and elevations at or
    /// beyond it get the full [`MAX_BLUR_RADIUS`]. Non-positive elevation
    /// yields [`ShadowConfig::NONE`].
    pub fn from_elevation(elevation: f32, scale_factor: f32) -> Self {
        if !(elevation > 0.0) {
            return Self::NONE;
        }
        let scale_factor = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        let max_elevation = (MAX_ELEVATION_DP * scale_factor).trunc().max(1.0);
        Self::with_blur_radius(MAX_BLUR_RADIUS * (elevation / max_elevation))
    }

    pub fn is_visible(&self) -> bool {
        self.blur_radius > 0.0
    }

    /// Where the mask is drawn relative to the ticket's container
    pub fn offset(&self) -> Point {
        Point::new(0.0, self.offset_y)
    }
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self::NONE
    }
}

// =============================================================================
// ShadowMask
// =============================================================================

/// Single-channel 8-bit alpha buffer, row-major
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShadowMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ShadowMask {
    /// Fully transparent mask
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Reset every pixel to transparent
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Alpha at `(x, y)`, 0 outside the mask
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Number of pixels with non-zero alpha
    pub fn coverage(&self) -> usize {
        self.data.iter().filter(|&&a| a != 0).count()
    }

    pub fn max_alpha(&self) -> u8 {
        self.data.iter().copied().max().unwrap_or(0)
    }
}

/// A rendered shadow ready for compositing
#[derive(Clone, Copy, Debug)]
pub struct ShadowOutput<'a> {
    pub mask: &'a ShadowMask,
    /// Offset at which to draw the mask
    pub offset: Point,
}

// =============================================================================
// ShadowRasterizer
// =============================================================================

/// Renders ticket contours into blurred shadow masks.
///
/// Buffers are kept between renders and only reallocated when the output size
/// changes.
pub struct ShadowRasterizer {
    blur: Box<dyn BlurCapability>,
    blur_supported: bool,
    preview_mode: bool,
    /// RGBA staging surface the contour is rasterized into
    staging: Option<Pixmap>,
    mask: Option<ShadowMask>,
    has_shadow: bool,
    offset: Point,
    allocations: u32,
}

impl ShadowRasterizer {
    /// Rasterizer backed by the software [`GaussianBlur`]
    pub fn new() -> Self {
        Self::with_blur(Box::new(GaussianBlur::new()))
    }

    /// Rasterizer backed by a specific blur.
    ///
    /// The blur's support is queried here and never again.
    pub fn with_blur(blur: Box<dyn BlurCapability>) -> Self {
        let blur_supported = blur.is_supported();
        debug!(blur = blur.name(), blur_supported, "shadow rasterizer created");
        Self {
            blur,
            blur_supported,
            preview_mode: false,
            staging: None,
            mask: None,
            has_shadow: false,
            offset: Point::ZERO,
            allocations: 0,
        }
    }

    /// Disable shadows for non-interactive preview rendering
    pub fn set_preview_mode(&mut self, preview: bool) {
        self.preview_mode = preview;
    }

    pub fn preview_mode(&self) -> bool {
        self.preview_mode
    }

    pub fn blur_supported(&self) -> bool {
        self.blur_supported
    }

    /// How many times the shadow buffers have been (re)allocated
    pub fn allocations(&self) -> u32 {
        self.allocations
    }

    /// Render the shadow of `contour` into a `width × height` mask.
    ///
    /// `border` strokes the contour into the same mask. Returns `None` when
    /// there is nothing to draw: zero blur, no blur support, preview mode, an
    /// empty output size or an undrawable contour. None of these are errors.
    pub fn render(
        &mut self,
        contour: &Contour,
        border: Option<&Stroke>,
        config: &ShadowConfig,
        width: u32,
        height: u32,
    ) -> Option<ShadowOutput<'_>> {
        self.has_shadow = false;

        if !config.is_visible() || !self.blur_supported || self.preview_mode {
            trace!(
                blur_radius = config.blur_radius,
                blur_supported = self.blur_supported,
                preview = self.preview_mode,
                "shadow skipped"
            );
            return None;
        }
        if width == 0 || height == 0 {
            return None;
        }
        let path = contour_to_path(contour)?;
        if !self.ensure_buffers(width, height) {
            return None;
        }

        let (Some(staging), Some(mask)) = (self.staging.as_mut(), self.mask.as_mut()) else {
            return None;
        };

        staging.fill(SkiaColor::TRANSPARENT);

        let mut paint = Paint::default();
        paint.set_color_rgba8(0, 0, 0, config.alpha);
        paint.anti_alias = true;

        staging.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        if let Some(stroke) = border {
            staging.stroke_path(&path, &paint, &to_skia_stroke(stroke), Transform::identity(), None);
        }

        for (dst, px) in mask.data_mut().iter_mut().zip(staging.pixels()) {
            *dst = px.alpha();
        }

        self.blur.blur_alpha(mask, config.blur_radius);

        self.has_shadow = true;
        self.offset = config.offset();
        self.shadow()
    }

    /// The most recent shadow, if the last render produced one
    pub fn shadow(&self) -> Option<ShadowOutput<'_>> {
        if !self.has_shadow {
            return None;
        }
        self.mask.as_ref().map(|mask| ShadowOutput {
            mask,
            offset: self.offset,
        })
    }

    /// Make sure buffers of exactly `width × height` exist.
    ///
    /// Returns false if the staging pixmap cannot be allocated.
    fn ensure_buffers(&mut self, width: u32, height: u32) -> bool {
        let reusable = matches!(
            &self.mask,
            Some(mask) if mask.width() == width && mask.height() == height
        ) && self.staging.is_some();
        if reusable {
            return true;
        }

        let Some(staging) = Pixmap::new(width, height) else {
            warn!(width, height, "cannot allocate shadow buffer");
            self.staging = None;
            self.mask = None;
            return false;
        };

        self.staging = Some(staging);
        self.mask = Some(ShadowMask::new(width, height));
        self.allocations += 1;
        debug!(width, height, allocations = self.allocations, "allocated shadow buffers");
        true
    }
}

impl Default for ShadowRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ShadowRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShadowRasterizer")
            .field("blur", &self.blur.name())
            .field("blur_supported", &self.blur_supported)
            .field("preview_mode", &self.preview_mode)
            .field("has_shadow", &self.has_shadow)
            .field("allocations", &self.allocations)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blur::NoBlur;
    use crate::shape::build_contour;
    use ticket_core::{CornerRadius, HoleSpec, Orientation, Rect};

    const W: u32 = 160;
    const H: u32 = 120;

    fn ticket() -> Contour {
        build_contour(
            Rect::from_ltrb(30.0, 30.0, 130.0, 90.0),
            CornerRadius::uniform(8.0),
            Orientation::Horizontal,
            HoleSpec::new(60.0, 10.0),
        )
    }

    #[test]
    fn test_elevation_mapping() {
        assert_eq!(ShadowConfig::from_elevation(0.0, 1.0), ShadowConfig::NONE);
        assert_eq!(ShadowConfig::from_elevation(-4.0, 1.0), ShadowConfig::NONE);
        assert_eq!(ShadowConfig::from_elevation(f32::NAN, 1.0), ShadowConfig::NONE);

        let half = ShadowConfig::from_elevation(12.0, 1.0);
        assert_eq!(half.blur_radius, 12.5);
        assert_eq!(half.offset_y, 6.25);
        assert_eq!(half.alpha, SHADOW_ALPHA);

        assert_eq!(ShadowConfig::from_elevation(24.0, 1.0).blur_radius, MAX_BLUR_RADIUS);
        assert_eq!(ShadowConfig::from_elevation(500.0, 1.0).blur_radius, MAX_BLUR_RADIUS);

        // 24dp at 2.625x is 63px
        assert_eq!(ShadowConfig::from_elevation(63.0, 2.625).blur_radius, MAX_BLUR_RADIUS);
        assert!(ShadowConfig::from_elevation(40.0, 2.625).blur_radius < MAX_BLUR_RADIUS);
    }

    #[test]
    fn test_blur_radius_is_monotonic() {
        let mut last = 0.0;
        for step in 0..=60 {
            let blur = ShadowConfig::from_elevation(step as f32 * 0.5, 1.0).blur_radius;
            assert!(blur >= last);
            last = blur;
        }
        assert_eq!(last, MAX_BLUR_RADIUS);
    }

    #[test]
    fn test_zero_elevation_has_no_shadow() {
        let mut rasterizer = ShadowRasterizer::new();
        let config = ShadowConfig::from_elevation(0.0, 1.0);
        let border = Stroke::new(2.0);
        assert!(rasterizer.render(&ticket(), Some(&border), &config, W, H).is_none());
        assert!(rasterizer.shadow().is_none());
        assert_eq!(rasterizer.allocations(), 0);
    }

    #[test]
    fn test_unsupported_blur_has_no_shadow() {
        let mut rasterizer = ShadowRasterizer::with_blur(Box::new(NoBlur));
        assert!(!rasterizer.blur_supported());
        let config = ShadowConfig::with_blur_radius(10.0);
        assert!(rasterizer.render(&ticket(), None, &config, W, H).is_none());
    }

    #[test]
    fn test_preview_mode_has_no_shadow() {
        let mut rasterizer = ShadowRasterizer::new();
        let config = ShadowConfig::with_blur_radius(10.0);
        assert!(rasterizer.render(&ticket(), None, &config, W, H).is_some());

        rasterizer.set_preview_mode(true);
        assert!(rasterizer.render(&ticket(), None, &config, W, H).is_none());
        assert!(rasterizer.shadow().is_none());
    }

    #[test]
    fn test_empty_inputs_have_no_shadow() {
        let mut rasterizer = ShadowRasterizer::new();
        let config = ShadowConfig::with_blur_radius(4.0);
        assert!(rasterizer.render(&ticket(), None, &config, 0, H).is_none());
        assert!(rasterizer.render(&Contour::new(), None, &config, W, H).is_none());
    }

    #[test]
    fn test_shadow_fill_and_offset() {
        let mut rasterizer = ShadowRasterizer::new();
        let config = ShadowConfig::with_blur_radius(2.0);
        let shadow = rasterizer.render(&ticket(), None, &config, W, H).expect("shadow");

        assert_eq!(shadow.offset, Point::new(0.0, 1.0));
        assert_eq!((shadow.mask.width(), shadow.mask.height()), (W, H));
        // Interior keeps the flat shadow opacity, far outside stays clear
        assert_eq!(shadow.mask.alpha_at(100, 60), SHADOW_ALPHA);
        assert_eq!(shadow.mask.alpha_at(5, 5), 0);
        // Inside the top notch
        assert_eq!(shadow.mask.alpha_at(70, 32), 0);
        assert!(shadow.mask.max_alpha() <= SHADOW_ALPHA);
    }

    #[test]
    fn test_border_adds_to_mask() {
        let config = ShadowConfig::with_blur_radius(3.0);
        let border = Stroke::new(4.0);

        let mut plain = ShadowRasterizer::new();
        let without: u64 = plain
            .render(&ticket(), None, &config, W, H)
            .map(|s| s.mask.data().iter().map(|&a| u64::from(a)).sum())
            .unwrap_or(0);

        let mut bordered = ShadowRasterizer::new();
        let with: u64 = bordered
            .render(&ticket(), Some(&border), &config, W, H)
            .map(|s| s.mask.data().iter().map(|&a| u64::from(a)).sum())
            .unwrap_or(0);

        assert!(with > without);
    }

    #[test]
    fn test_buffers_reused_at_same_size() {
        let mut rasterizer = ShadowRasterizer::new();
        let config = ShadowConfig::with_blur_radius(6.0);

        let first = rasterizer
            .render(&ticket(), None, &config, W, H)
            .map(|s| s.mask.data().as_ptr())
            .expect("shadow");
        let second = rasterizer
            .render(&ticket(), None, &config, W, H)
            .map(|s| s.mask.data().as_ptr())
            .expect("shadow");
        assert_eq!(first, second);
        assert_eq!(rasterizer.allocations(), 1);

        rasterizer.render(&ticket(), None, &config, W + 20, H);
        assert_eq!(rasterizer.allocations(), 2);
        rasterizer.render(&ticket(), None, &config, W + 20, H);
        assert_eq!(rasterizer.allocations(), 2);
    }

    #[test]
    fn test_repeated_renders_are_identical() {
        let mut rasterizer = ShadowRasterizer::new();
        let config = ShadowConfig::with_blur_radius(9.0);
        let first = rasterizer
            .render(&ticket(), None, &config, W, H)
            .map(|s| s.mask.clone())
            .expect("shadow");
        let second = rasterizer
            .render(&ticket(), None, &config, W, H)
            .map(|s| s.mask.clone())
            .expect("shadow");
        assert_eq!(first, second);
    }

    #[test]
    fn test_footprint_grows_with_elevation() {
        let mut rasterizer = ShadowRasterizer::new();
        let contour = ticket();
        let mut last = 0;

        for elevation in [2.0, 4.0, 8.0, 12.0, 18.0, 24.0, 30.0] {
            let config = ShadowConfig::from_elevation(elevation, 1.0);
            let coverage = rasterizer
                .render(&contour, None, &config, W, H)
                .map(|s| s.mask.coverage())
                .expect("shadow");
            assert!(coverage >= last, "elevation {elevation}: {coverage} < {last}");
            last = coverage;
        }
    }
}
