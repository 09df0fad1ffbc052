//! Alpha-mask blur
//!
//! Shadow masks are blurred in place by a [`BlurCapability`]. Hosts without a
//! usable blur hand the rasterizer a [`NoBlur`], which makes it skip shadow
//! work entirely.

use std::num::NonZeroUsize;

use lru::LruCache;
use tracing::trace;

use crate::shadow::{ShadowMask, MAX_BLUR_RADIUS};

/// A blur primitive that can soften an 8-bit alpha mask
pub trait BlurCapability: Send {
    /// Whether this blur can run on the current host.
    ///
    /// Queried once when a rasterizer is created.
    fn is_supported(&self) -> bool;

    /// Blur `mask` in place with the given radius in pixels
    fn blur_alpha(&mut self, mask: &mut ShadowMask, radius: f32);

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

// =============================================================================
// NoBlur
// =============================================================================

/// Placeholder for hosts without a blur primitive
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBlur;

impl BlurCapability for NoBlur {
    fn is_supported(&self) -> bool {
        false
    }

    fn blur_alpha(&mut self, _mask: &mut ShadowMask, _radius: f32) {}

    fn name(&self) -> &'static str {
        "none"
    }
}

// =============================================================================
// GaussianBlur
// =============================================================================

/// Radii whose kernels stay cached
const KERNEL_CACHE_CAPACITY: usize = 4;

/// Separable software Gaussian blur with Q16 fixed-point weights.
///
/// The most recently used kernels are cached by radius and the intermediate
/// row buffer is reused, so repeated blurs at the same size do not allocate.
#[derive(Debug)]
pub struct GaussianBlur {
    kernels: LruCache<u32, Vec<u32>>,
    scratch: Vec<u8>,
}

impl Default for GaussianBlur {
    fn default() -> Self {
        Self::new()
    }
}

impl GaussianBlur {
    pub fn new() -> Self {
        let capacity = NonZeroUsize::new(KERNEL_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self {
            kernels: LruCache::new(capacity),
            scratch: Vec::new(),
        }
    }

    /// Number of distinct kernels built so far
    pub fn cached_kernels(&self) -> usize {
        self.kernels.len()
    }

    fn kernel(&mut self, radius: f32) -> &[u32] {
        self.kernels
            .get_or_insert(radius.to_bits(), || {
                let taps = radius.ceil() as u32;
                trace!(radius, taps, "building blur kernel");
                gaussian_kernel_q16(taps, blur_sigma(radius))
            })
            .as_slice()
    }
}

impl BlurCapability for GaussianBlur {
    fn is_supported(&self) -> bool {
        true
    }

    fn blur_alpha(&mut self, mask: &mut ShadowMask, radius: f32) {
        if !(radius > 0.0) || mask.is_empty() {
            return;
        }
        let radius = radius.min(MAX_BLUR_RADIUS);
        let (width, height) = (mask.width(), mask.height());

        // Take the scratch buffer so the kernel borrow stays disjoint
        let mut scratch = std::mem::take(&mut self.scratch);
        scratch.resize(mask.data().len(), 0);

        let kernel = self.kernel(radius);
        if kernel.len() > 1 {
            horizontal_blur_q16(mask.data(), &mut scratch, width, height, kernel);
            vertical_blur_q16(&scratch, mask.data_mut(), width, height, kernel);
        }

        self.scratch = scratch;
    }

    fn name(&self) -> &'static str {
        "gaussian"
    }
}

/// Standard deviation for a blur radius, matching the common mobile
/// intrinsic so shadows keep their familiar softness
fn blur_sigma(radius: f32) -> f32 {
    0.4 * radius + 0.6
}

/// Normalized 1D Gaussian with `2 * radius + 1` taps summing to exactly 1.0 in Q16
fn gaussian_kernel_q16(radius: u32, sigma: f32) -> Vec<u32> {
    if radius == 0 || !(sigma > 0.0) {
        return vec![1 << 16];
    }

    let r = radius as i32;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|w| ((w / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();

    // Push rounding error into the center tap
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let mid = weights.len() / 2;
    weights[mid] = (i64::from(weights[mid]) + 65536 - acc).clamp(0, 65536) as u32;

    weights
}

fn horizontal_blur_q16(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        let row = (y * w) as usize;
        for x in 0..w {
            let mut acc = 0u64;
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                acc += u64::from(kw) * u64::from(src[row + sx as usize]);
            }
            dst[row + x as usize] = q16_to_u8(acc);
        }
    }
}

fn vertical_blur_q16(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0u64;
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                acc += u64::from(kw) * u64::from(src[(sy * w + x) as usize]);
            }
            dst[(y * w + x) as usize] = q16_to_u8(acc);
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}
