//! Engine configuration
//!
//! All durations and thresholds are design parameters. Defaults match the
//! shipped site; hosts can override any subset from JSON:
//!
//! ```rust
//! use folio_engine::EngineConfig;
//!
//! let config = EngineConfig::from_json(r#"{ "timing": { "fade_ms": 250.0 } }"#).unwrap();
//! assert_eq!(config.timing.fade_ms, 250.0);
//! assert_eq!(config.timing.grid_animation_ms, 800.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::transition::Easing;

/// Duration of the synchronized scroll + padding animation in milliseconds
pub const GRID_ANIMATION_MS: f32 = 800.0;

/// Duration of detail-surface opacity fades in milliseconds
pub const FADE_MS: f32 = 300.0;

/// Duration of the hover-driven row reveal scroll in milliseconds
pub const ROW_REVEAL_MS: f32 = 400.0;

/// Sidebar hover events closer together than this are considered "fast"
pub const FAST_HOVER_THRESHOLD_MS: f64 = 80.0;

/// Quiet period before a buffered fast hover target is committed
pub const HOVER_SETTLE_DELAY_MS: f64 = 100.0;

/// Top-level engine configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub timing: TimingConfig,
    pub layout: LayoutConfig,
    pub geometry: GeometryConfig,
    pub hover: HoverConfig,
    pub overlap: OverlapConfig,
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON configuration and validate it
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> EngineResult<()> {
        let t = &self.timing;
        positive("timing.grid_animation_ms", t.grid_animation_ms)?;
        positive("timing.fade_ms", t.fade_ms)?;
        positive("timing.scroll_to_anchor_ms", t.scroll_to_anchor_ms)?;
        positive("timing.row_reveal_ms", t.row_reveal_ms)?;

        let l = &self.layout;
        positive("layout.min_row_height", l.min_row_height)?;
        positive("layout.mobile_min_row_height", l.mobile_min_row_height)?;
        positive("layout.default_aspect_ratio", l.default_aspect_ratio)?;
        if l.max_row_height < l.min_row_height {
            return Err(EngineError::InvalidConfig {
                field: "layout.max_row_height",
                reason: "must not be below min_row_height",
            });
        }
        if l.mobile_max_row_height < l.mobile_min_row_height {
            return Err(EngineError::InvalidConfig {
                field: "layout.mobile_max_row_height",
                reason: "must not be below mobile_min_row_height",
            });
        }

        if self.geometry.landing_rows == 0 {
            return Err(EngineError::InvalidConfig {
                field: "geometry.landing_rows",
                reason: "at least one row must land in view",
            });
        }

        if self.hover.settle_delay_ms < 0.0 || self.hover.fast_threshold_ms < 0.0 {
            return Err(EngineError::InvalidConfig {
                field: "hover",
                reason: "delays must not be negative",
            });
        }

        let o = &self.overlap;
        if !(o.fade_fraction > 0.0 && o.fade_fraction <= 1.0) {
            return Err(EngineError::InvalidConfig {
                field: "overlap.fade_fraction",
                reason: "must be in (0, 1]",
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> EngineResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig {
            field,
            reason: "must be positive",
        })
    }
}

/// Phase durations and the curves that drive them
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Synchronized scroll + padding animation (enter and return)
    pub grid_animation_ms: f32,
    /// Detail-surface fade in / fade out
    pub fade_ms: f32,
    /// Scroll-only return to the anchor position
    pub scroll_to_anchor_ms: f32,
    /// Hover-driven row reveal scroll
    pub row_reveal_ms: f32,
    /// Curve shared by scroll and padding during grid animations
    pub grid_easing: Easing,
    /// Curve for the opacity fades
    pub fade_easing: Easing,
    /// Curve for the row reveal scroll
    pub reveal_easing: Easing,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            grid_animation_ms: GRID_ANIMATION_MS,
            fade_ms: FADE_MS,
            scroll_to_anchor_ms: GRID_ANIMATION_MS,
            row_reveal_ms: ROW_REVEAL_MS,
            grid_easing: Easing::EaseInOut,
            fade_easing: Easing::Linear,
            reveal_easing: Easing::Material,
        }
    }
}

/// Justified-row height bands
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub min_row_height: f32,
    pub max_row_height: f32,
    pub mobile_min_row_height: f32,
    pub mobile_max_row_height: f32,
    /// Viewports at or below this width use the mobile band
    pub mobile_breakpoint: f32,
    /// Used for items without a measured cover aspect ratio
    pub default_aspect_ratio: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_row_height: 200.0,
            max_row_height: 250.0,
            mobile_min_row_height: 100.0,
            mobile_max_row_height: 150.0,
            mobile_breakpoint: 640.0,
            default_aspect_ratio: 1.5,
        }
    }
}

impl LayoutConfig {
    /// Row height band `(min, max)` for a viewport width
    pub fn band(&self, viewport_width: f32) -> (f32, f32) {
        if viewport_width <= self.mobile_breakpoint {
            (self.mobile_min_row_height, self.mobile_max_row_height)
        } else {
            (self.min_row_height, self.max_row_height)
        }
    }
}

/// Inputs for landing / peek padding
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Full rows visible at rest on the landing view
    pub landing_rows: usize,
    /// How much of the next row peeks below the landing rows
    pub landing_peek: f32,
    /// How much of the first row peeks below the detail surface
    pub peek_reveal: f32,
    /// Vertical gap between rows
    pub row_gap: f32,
    /// Title + subtitle label height added to every tile row
    pub tile_label_height: f32,
    /// Scroll position the detail view is anchored at
    pub anchor_scroll: f32,
    /// Distance from the anchor still considered "at the anchor"
    pub anchor_tolerance: f32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            landing_rows: 2,
            landing_peek: 48.0,
            peek_reveal: 96.0,
            row_gap: 24.0,
            tile_label_height: 44.0,
            anchor_scroll: 0.0,
            anchor_tolerance: 1.0,
        }
    }
}

/// Hover oscillation filter and row reveal tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    pub fast_threshold_ms: f64,
    pub settle_delay_ms: f64,
    /// Margin kept between a revealed row and the viewport edge
    pub reveal_margin: f32,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            fast_threshold_ms: FAST_HOVER_THRESHOLD_MS,
            settle_delay_ms: HOVER_SETTLE_DELAY_MS,
            reveal_margin: 16.0,
        }
    }
}

/// Scroll-derived opacity tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlapConfig {
    /// Viewport-height fraction over which the detail surface fades out
    pub fade_fraction: f32,
    /// Opacity changes smaller than this are not published
    pub opacity_epsilon: f32,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            fade_fraction: 0.25,
            opacity_epsilon: 0.01,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{ "hover": { "settle_delay_ms": 150.0 } }"#).unwrap();
        assert_eq!(config.hover.settle_delay_ms, 150.0);
        assert_eq!(config.hover.fast_threshold_ms, FAST_HOVER_THRESHOLD_MS);
        assert_eq!(config.layout, LayoutConfig::default());
    }

    #[test]
    fn test_round_trip_json() {
        let config = EngineConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(EngineConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_inverted_band() {
        let mut config = EngineConfig::default();
        config.layout.max_row_height = 150.0;
        let err = config.validate().unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidConfig {
                field: "layout.max_row_height",
                reason: "must not be below min_row_height",
            }
        );
    }

    #[test]
    fn test_rejects_zero_duration() {
        let err = EngineConfig::from_json(r#"{ "timing": { "fade_ms": 0.0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidConfig { field: "timing.fade_ms", .. }
        ));
    }

    #[test]
    fn test_mobile_band() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.band(640.0), (100.0, 150.0));
        assert_eq!(layout.band(1200.0), (200.0, 250.0));
    }
}
