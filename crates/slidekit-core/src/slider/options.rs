//! L4 Atomic Layer: Derived values from slider configuration

use std::time::Duration;

pub use crate::config::{
    Breakpoints, DragReference, DragThreshold, Granularity, PageSize, SliderConfig,
};

/// Extension trait for SliderConfig with utility methods
pub trait SliderConfigExt {
    /// Items per page for a viewport width
    fn resolve_page_size(&self, viewport_width: f64) -> usize;

    /// Autoplay period, if autoplay is configured
    fn autoplay_delay(&self) -> Option<Duration>;

    /// Commit threshold in pixels for a reference width
    fn threshold_px(&self, reference_width: f64) -> f64;
}

impl SliderConfigExt for SliderConfig {
    fn resolve_page_size(&self, viewport_width: f64) -> usize {
        let size = match self.page_size {
            PageSize::Fixed(n) => n,
            PageSize::Responsive => self.breakpoints.resolve(viewport_width),
        };
        size.max(1)
    }

    #[inline]
    fn autoplay_delay(&self) -> Option<Duration> {
        self.autoplay_delay_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    #[inline]
    fn threshold_px(&self, reference_width: f64) -> f64 {
        match self.drag_threshold {
            DragThreshold::Ratio(ratio) => ratio * reference_width.max(0.0),
            DragThreshold::Pixels(px) => px,
        }
    }
}

impl Breakpoints {
    /// Items per page at `viewport_width`
    #[inline]
    pub fn resolve(&self, viewport_width: f64) -> usize {
        if viewport_width >= self.wide_min_width {
            self.wide
        } else {
            self.narrow
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_responsive_breakpoints() {
        let config = SliderConfig::projects();
        assert_eq!(config.resolve_page_size(1440.0), 3);
        assert_eq!(config.resolve_page_size(1024.0), 3);
        assert_eq!(config.resolve_page_size(1023.0), 2);
        assert_eq!(config.resolve_page_size(375.0), 2);
    }

    #[test]
    fn test_fixed_page_size_ignores_width() {
        let config = SliderConfig::testimonials();
        assert_eq!(config.resolve_page_size(2000.0), 1);
        assert_eq!(config.resolve_page_size(300.0), 1);
    }

    #[test]
    fn test_threshold_px() {
        assert!((SliderConfig::projects().threshold_px(1200.0) - 120.0).abs() < 1e-9);
        assert!((SliderConfig::testimonials().threshold_px(800.0) - 120.0).abs() < 1e-9);
        assert_eq!(SliderConfig::category_projects().threshold_px(1200.0), 50.0);
    }

    #[test]
    fn test_autoplay_delay() {
        assert_eq!(
            SliderConfig::category_projects().autoplay_delay(),
            Some(Duration::from_millis(5000))
        );
        assert_eq!(SliderConfig::projects().autoplay_delay(), None);

        let zero = SliderConfig {
            autoplay_delay_ms: Some(0),
            ..SliderConfig::category_projects()
        };
        assert_eq!(zero.autoplay_delay(), None);
    }
}
