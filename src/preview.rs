//! Responsive scale engine for the on-screen preview.
//!
//! The preview squeezes a fixed 794px-wide page into whatever elastic
//! container hosts it. The engine listens to container resizes (with
//! window resizes as a fallback signal) and produces a uniform display
//! scale, nothing else. The scale is a visual transform on the
//! preview instance only; the export path never sees it, which is what
//! keeps a zoomed preview from ever distorting the exported page.

use papier_scene::PAGE_WIDTH;

/// Lower clamp: below this the preview would be unreadable anyway.
pub const MIN_SCALE: f32 = 0.3;

/// Container padding in scene units: tight below the 800px breakpoint,
/// roomier above it.
const NARROW_BREAKPOINT: f32 = 800.0;
const NARROW_PADDING: f32 = 20.0;
const WIDE_PADDING: f32 = 40.0;

/// The display transform handed to the preview embedder: a uniform 2-D
/// scale anchored at top-center (so the page shrinks in place under a
/// centered toolbar).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewTransform {
    pub scale: f32,
    pub origin: TransformOrigin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformOrigin {
    #[default]
    TopCenter,
}

/// Computes and tracks the preview scale across resize events.
#[derive(Debug, Clone)]
pub struct PreviewScaler {
    scale: f32,
    ready: bool,
}

impl Default for PreviewScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewScaler {
    /// Starts unmeasured: `is_ready()` stays false until the first resize
    /// observation so the embedder can hold the preview invisible instead
    /// of flashing it at the wrong size.
    pub fn new() -> Self {
        Self { scale: 1.0, ready: false }
    }

    /// The pure scale computation:
    /// `clamp(min((width - padding) / 794, 1), 0.3, 1)`.
    pub fn fit(container_width: f32) -> f32 {
        if !container_width.is_finite() {
            return MIN_SCALE;
        }
        let padding = if container_width < NARROW_BREAKPOINT {
            NARROW_PADDING
        } else {
            WIDE_PADDING
        };
        let scale = ((container_width - padding) / PAGE_WIDTH).min(1.0);
        if scale > MIN_SCALE { scale } else { MIN_SCALE }
    }

    /// Continuous container observation feeds this on every resize.
    pub fn on_container_resize(&mut self, container_width: f32) -> f32 {
        self.scale = Self::fit(container_width);
        self.ready = true;
        self.scale
    }

    /// Window resizes are the fallback signal; same computation, last
    /// writer wins.
    pub fn on_window_resize(&mut self, container_width: f32) -> f32 {
        self.on_container_resize(container_width)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// True once at least one measurement has settled.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn transform(&self) -> PreviewTransform {
        PreviewTransform { scale: self.scale, origin: TransformOrigin::TopCenter }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_container_clamps_to_one() {
        // (1600 - 40) / 794 > 1, clamped down.
        assert_eq!(PreviewScaler::fit(1600.0), 1.0);
    }

    #[test]
    fn test_narrow_container_uses_small_padding() {
        // Below the 800 breakpoint the padding is 20.
        let expected = (500.0 - 20.0) / 794.0;
        assert!((PreviewScaler::fit(500.0) - expected).abs() < 1e-6);
        assert!((PreviewScaler::fit(500.0) - 0.604).abs() < 1e-3);
    }

    #[test]
    fn test_tiny_container_clamps_up_to_floor() {
        assert_eq!(PreviewScaler::fit(50.0), MIN_SCALE);
        assert_eq!(PreviewScaler::fit(0.0), MIN_SCALE);
        assert_eq!(PreviewScaler::fit(-100.0), MIN_SCALE);
    }

    #[test]
    fn test_scale_is_never_zero_or_negative() {
        for width in [f32::NEG_INFINITY, -1.0, 0.0, 19.9, 800.0, 1e9, f32::NAN] {
            let scale = PreviewScaler::fit(width);
            assert!(scale >= MIN_SCALE && scale <= 1.0, "width {} -> {}", width, scale);
        }
    }

    #[test]
    fn test_ready_only_after_first_observation() {
        let mut scaler = PreviewScaler::new();
        assert!(!scaler.is_ready());
        scaler.on_container_resize(1024.0);
        assert!(scaler.is_ready());
        assert_eq!(scaler.scale(), (1024.0 - 40.0) / 794.0);
    }

    #[test]
    fn test_window_resize_is_equivalent_fallback() {
        let mut a = PreviewScaler::new();
        let mut b = PreviewScaler::new();
        a.on_container_resize(640.0);
        b.on_window_resize(640.0);
        assert_eq!(a.scale(), b.scale());
    }

    #[test]
    fn test_transform_is_top_center_anchored() {
        let mut scaler = PreviewScaler::new();
        scaler.on_container_resize(500.0);
        let t = scaler.transform();
        assert_eq!(t.origin, TransformOrigin::TopCenter);
        assert_eq!(t.scale, scaler.scale());
    }
}
