//! Grid geometry derived from measured rows
//!
//! Geometry is never persisted. The host measures (viewport height, detail
//! surface edges) and the engine snapshots the derived paddings when a
//! sequence starts, so a re-measure mid-flight cannot move an animation's
//! target.

use serde::{Deserialize, Serialize};

use super::justified::GridRow;
use crate::config::GeometryConfig;

/// Plain measurements handed over by the host's DOM adapter
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryInput<'a> {
    pub viewport_height: f32,
    /// Rows from [`super::build_rows`] for the current grid width
    pub rows: &'a [GridRow],
    /// Lower edge of the detail surface, in viewport pixels
    pub detail_bottom: f32,
    /// Bottom of the last interactive control inside the detail surface,
    /// when the host can measure it
    pub controls_bottom: Option<f32>,
}

/// Derived grid offsets
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    /// Top offset that fits N rows plus a peek of the next row in view
    pub landing_padding: f32,
    /// Top offset that leaves the first row peeking below the detail surface
    pub peek_padding: f32,
    /// Height of the first row including labels
    pub row_height: f32,
    /// Grid-top position at which the grid starts covering the detail surface
    pub overlap_threshold: f32,
    pub viewport_height: f32,
}

impl GridGeometry {
    /// Derive geometry from measurements
    ///
    /// Returns `None` while measurement is not possible yet (zero-height
    /// viewport before first paint, or no rows laid out).
    pub fn measure(input: &GeometryInput<'_>, config: &GeometryConfig) -> Option<Self> {
        if !(input.viewport_height > 0.0) || input.rows.is_empty() {
            return None;
        }

        let vh = input.viewport_height;
        let landing_rows = config.landing_rows.min(input.rows.len());
        let rows_extent = rows_extent(input.rows, landing_rows, config);
        let landing_padding = (vh - rows_extent - config.row_gap - config.landing_peek).max(0.0);
        let peek_padding = (vh - config.peek_reveal).max(0.0);

        Some(Self {
            landing_padding,
            peek_padding,
            row_height: input.rows[0].row_height + config.tile_label_height,
            overlap_threshold: input.controls_bottom.unwrap_or(input.detail_bottom),
            viewport_height: vh,
        })
    }
}

/// Height of the first `count` rows including labels and inter-row gaps
pub fn rows_extent(rows: &[GridRow], count: usize, config: &GeometryConfig) -> f32 {
    let taken = &rows[..count.min(rows.len())];
    let tiles: f32 = taken
        .iter()
        .map(|r| r.row_height + config.tile_label_height)
        .sum();
    let gaps = taken.len().saturating_sub(1) as f32 * config.row_gap;
    tiles + gaps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(height: f32) -> GridRow {
        GridRow {
            tiles: Vec::new(),
            row_height: height,
            filled: true,
        }
    }

    #[test]
    fn test_unavailable_before_first_paint() {
        let rows = [row(220.0)];
        let config = GeometryConfig::default();
        let input = GeometryInput {
            viewport_height: 0.0,
            rows: &rows,
            detail_bottom: 600.0,
            controls_bottom: None,
        };
        assert!(GridGeometry::measure(&input, &config).is_none());

        let input = GeometryInput {
            viewport_height: 900.0,
            rows: &[],
            detail_bottom: 600.0,
            controls_bottom: None,
        };
        assert!(GridGeometry::measure(&input, &config).is_none());
    }

    #[test]
    fn test_landing_and_peek_padding() {
        let rows = [row(220.0), row(200.0), row(240.0)];
        let config = GeometryConfig::default();
        let input = GeometryInput {
            viewport_height: 1000.0,
            rows: &rows,
            detail_bottom: 780.0,
            controls_bottom: None,
        };
        let geometry = GridGeometry::measure(&input, &config).unwrap();

        // Two rows: (220 + 44) + (200 + 44) + one gap of 24 = 532
        assert_eq!(rows_extent(&rows, 2, &config), 532.0);
        // 1000 - 532 - 24 - 48
        assert_eq!(geometry.landing_padding, 396.0);
        assert_eq!(geometry.peek_padding, 904.0);
        assert_eq!(geometry.row_height, 264.0);
        assert_eq!(geometry.overlap_threshold, 780.0);
    }

    #[test]
    fn test_controls_bottom_refines_threshold() {
        let rows = [row(220.0)];
        let input = GeometryInput {
            viewport_height: 1000.0,
            rows: &rows,
            detail_bottom: 780.0,
            controls_bottom: Some(742.0),
        };
        let geometry = GridGeometry::measure(&input, &GeometryConfig::default()).unwrap();
        assert_eq!(geometry.overlap_threshold, 742.0);
    }

    #[test]
    fn test_short_viewport_clamps_padding_to_zero() {
        let rows = [row(250.0), row(250.0)];
        let input = GeometryInput {
            viewport_height: 300.0,
            rows: &rows,
            detail_bottom: 200.0,
            controls_bottom: None,
        };
        let geometry = GridGeometry::measure(&input, &GeometryConfig::default()).unwrap();
        assert_eq!(geometry.landing_padding, 0.0);
        assert_eq!(geometry.peek_padding, 204.0);
    }
}
