//! Scroll-derived detail opacity and the overlap gate
//!
//! Fed the viewport-relative top of the grid's first row on every scroll
//! event. Published values only change when they actually move (boolean
//! flip or more than `opacity_epsilon`), so a scripted scroll firing dozens
//! of events per second does not re-render on each one.

use crate::config::OverlapConfig;
use crate::layout::GridGeometry;

/// Overlap and opacity for a grid position
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlapReading {
    pub overlap: bool,
    pub opacity: f32,
}

impl Default for OverlapReading {
    fn default() -> Self {
        Self {
            overlap: false,
            opacity: 1.0,
        }
    }
}

/// Derive overlap and opacity from the grid's top edge
///
/// Opacity is 1 until the grid reaches the threshold, falls linearly to 0
/// over `fade_fraction` of the viewport height, then stays at 0.
pub fn derive(grid_top: f32, geometry: &GridGeometry, config: &OverlapConfig) -> OverlapReading {
    let threshold = geometry.overlap_threshold;
    let span = config.fade_fraction * geometry.viewport_height;
    let past = threshold - grid_top;
    let opacity = if past <= 0.0 {
        1.0
    } else if span <= 0.0 {
        0.0
    } else {
        (1.0 - past / span).clamp(0.0, 1.0)
    };
    OverlapReading {
        overlap: grid_top <= threshold,
        opacity,
    }
}

/// Change-guarded holder of the published reading
#[derive(Clone, Debug)]
pub struct OverlapGate {
    config: OverlapConfig,
    published: OverlapReading,
}

impl OverlapGate {
    pub fn new(config: OverlapConfig) -> Self {
        Self {
            config,
            published: OverlapReading::default(),
        }
    }

    pub fn reading(&self) -> OverlapReading {
        self.published
    }

    /// Reading for `grid_top` without publishing it
    pub fn peek(&self, grid_top: f32, geometry: &GridGeometry) -> OverlapReading {
        derive(grid_top, geometry, &self.config)
    }

    /// Recompute and publish; returns `true` if the published value moved
    pub fn update(&mut self, grid_top: f32, geometry: &GridGeometry) -> bool {
        let next = self.peek(grid_top, geometry);
        self.publish(next)
    }

    /// Hold at fully visible, not overlapped (scripted phases)
    pub fn hold(&mut self) -> bool {
        self.publish(OverlapReading::default())
    }

    fn publish(&mut self, next: OverlapReading) -> bool {
        let overlap_changed = next.overlap != self.published.overlap;
        let opacity_changed = (next.opacity - self.published.opacity).abs() > self.config.opacity_epsilon
            // always land exactly on the ends
            || (next.opacity != self.published.opacity && (next.opacity == 0.0 || next.opacity == 1.0));
        if !(overlap_changed || opacity_changed) {
            return false;
        }
        if overlap_changed {
            self.published.overlap = next.overlap;
        }
        if opacity_changed {
            self.published.opacity = next.opacity;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> GridGeometry {
        GridGeometry {
            landing_padding: 260.0,
            peek_padding: 704.0,
            row_height: 294.0,
            overlap_threshold: 600.0,
            viewport_height: 800.0,
        }
    }

    #[test]
    fn test_opacity_is_linear_past_threshold() {
        let config = OverlapConfig::default();
        // fade span = 0.25 * 800 = 200
        let g = geometry();
        assert_eq!(derive(700.0, &g, &config), OverlapReading { overlap: false, opacity: 1.0 });
        assert_eq!(derive(600.0, &g, &config).opacity, 1.0);
        assert!(derive(600.0, &g, &config).overlap);
        assert!((derive(550.0, &g, &config).opacity - 0.75).abs() < 1e-6);
        assert!((derive(500.0, &g, &config).opacity - 0.5).abs() < 1e-6);
        assert_eq!(derive(400.0, &g, &config).opacity, 0.0);
        assert_eq!(derive(-300.0, &g, &config).opacity, 0.0);
    }

    #[test]
    fn test_change_guard_skips_small_moves() {
        let mut gate = OverlapGate::new(OverlapConfig::default());
        let g = geometry();
        assert!(!gate.update(650.0, &g));

        assert!(gate.update(550.0, &g));
        let published = gate.reading().opacity;
        // 0.5px of scroll moves opacity by 0.0025
        assert!(!gate.update(549.5, &g));
        assert_eq!(gate.reading().opacity, published);

        assert!(gate.update(540.0, &g));
        assert!((gate.reading().opacity - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_overlap_flip_always_publishes() {
        let mut gate = OverlapGate::new(OverlapConfig::default());
        let g = geometry();
        assert!(gate.update(600.0, &g));
        assert!(gate.reading().overlap);
        assert_eq!(gate.reading().opacity, 1.0);
        assert!(gate.update(600.5, &g));
        assert!(!gate.reading().overlap);
    }

    #[test]
    fn test_small_move_onto_an_end_publishes() {
        let mut gate = OverlapGate::new(OverlapConfig::default());
        let g = geometry();
        gate.update(401.0, &g);
        assert!((gate.reading().opacity - 0.005).abs() < 1e-6);
        assert!(gate.update(400.0, &g));
        assert_eq!(gate.reading().opacity, 0.0);
    }

    #[test]
    fn test_hold_resets_to_visible() {
        let mut gate = OverlapGate::new(OverlapConfig::default());
        let g = geometry();
        gate.update(450.0, &g);
        assert!(gate.hold());
        assert_eq!(gate.reading(), OverlapReading::default());
        assert!(!gate.hold());
    }
}
