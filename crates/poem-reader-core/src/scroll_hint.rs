#![forbid(unsafe_code)]

//! Visibility and step size for the "more below" affordance of the overlay.

use serde::{Deserialize, Serialize};

/// Scroll geometry of the overlay, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    #[must_use]
    pub const fn new(scroll_top: f64, scroll_height: f64, client_height: f64) -> Self {
        Self {
            scroll_top,
            scroll_height,
            client_height,
        }
    }

    /// Largest reachable `scroll_top`.
    #[must_use]
    pub fn max_scroll_top(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }
}

/// Tolerances for the scroll hint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollHintConfig {
    /// Content must exceed the viewport by more than this to count as overflowing.
    pub overflow_tolerance_px: f64,
    /// Within this distance of the bottom the hint is hidden.
    pub bottom_tolerance_px: f64,
    /// Fraction of the viewport height scrolled per hint click.
    pub step_fraction: f64,
}

impl Default for ScrollHintConfig {
    fn default() -> Self {
        Self {
            overflow_tolerance_px: 8.0,
            bottom_tolerance_px: 16.0,
            step_fraction: 0.6,
        }
    }
}

impl ScrollHintConfig {
    /// Whether the hint should be shown for `metrics` while the overlay is `open`.
    #[must_use]
    pub fn is_visible(&self, metrics: ScrollMetrics, open: bool) -> bool {
        if !open {
            return false;
        }
        let overflows = metrics.scroll_height > metrics.client_height + self.overflow_tolerance_px;
        let near_bottom = metrics.scroll_top + metrics.client_height
            >= metrics.scroll_height - self.bottom_tolerance_px;
        overflows && !near_bottom
    }

    /// Distance to scroll down when the hint is clicked.
    #[must_use]
    pub fn step(&self, metrics: ScrollMetrics) -> f64 {
        metrics.client_height * self.step_fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_while_closed() {
        let cfg = ScrollHintConfig::default();
        assert!(!cfg.is_visible(ScrollMetrics::new(0.0, 2000.0, 600.0), false));
    }

    #[test]
    fn visible_when_overflowing_at_top() {
        let cfg = ScrollHintConfig::default();
        assert!(cfg.is_visible(ScrollMetrics::new(0.0, 2000.0, 600.0), true));
    }

    #[test]
    fn hidden_within_overflow_tolerance() {
        let cfg = ScrollHintConfig::default();
        assert!(!cfg.is_visible(ScrollMetrics::new(0.0, 608.0, 600.0), true));
        assert!(cfg.is_visible(ScrollMetrics::new(0.0, 640.0, 600.0), true));
    }

    #[test]
    fn hidden_near_bottom() {
        let cfg = ScrollHintConfig::default();
        // 1384 + 600 = 1984 >= 2000 - 16
        assert!(!cfg.is_visible(ScrollMetrics::new(1384.0, 2000.0, 600.0), true));
        assert!(cfg.is_visible(ScrollMetrics::new(1383.0, 2000.0, 600.0), true));
    }

    #[test]
    fn step_is_fraction_of_viewport() {
        let cfg = ScrollHintConfig::default();
        let step = cfg.step(ScrollMetrics::new(0.0, 2000.0, 500.0));
        assert!((step - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn max_scroll_top_never_negative() {
        assert_eq!(ScrollMetrics::new(0.0, 100.0, 600.0).max_scroll_top(), 0.0);
        assert_eq!(ScrollMetrics::new(0.0, 900.0, 600.0).max_scroll_top(), 300.0);
    }
}
