//! Justified-row grid layout
//!
//! Items are appended greedily to the current row. After each append the row
//! height implied by fitting the row to the viewport width is
//! `viewport_width / Σ(aspect_ratio × size_weight)`. When that height drops
//! below the band minimum (and the row has more than one item) the last item
//! moves to a new row and the previous row is finalized:
//!
//! 1. clamp the implied height into `[min, max]`
//! 2. give each tile its share of the row's aspect weight (sums to 100%)
//!
//! The trailing row is only clamped to `max` and keeps natural proportional
//! widths, so a sparse last row stays short instead of being stretched.

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::content::{ProjectSummary, SizeClass};

/// Layout input for one grid item
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileSpec {
    /// Width / height of the cover; `None` uses the configured default
    pub aspect_ratio: Option<f32>,
    pub size: SizeClass,
}

impl TileSpec {
    pub fn new(aspect_ratio: f32, size: SizeClass) -> Self {
        Self {
            aspect_ratio: Some(aspect_ratio),
            size,
        }
    }
}

impl From<&ProjectSummary> for TileSpec {
    fn from(summary: &ProjectSummary) -> Self {
        Self {
            aspect_ratio: summary.cover_aspect_ratio,
            size: summary.tile_size,
        }
    }
}

/// A positioned tile
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Index into the input item list
    pub index: usize,
    /// Resolved aspect ratio (default applied)
    pub aspect_ratio: f32,
    /// Share of the viewport width, in percent
    pub width_percent: f32,
}

/// One row of the grid
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridRow {
    pub tiles: Vec<Tile>,
    /// Resolved tile height in pixels (labels excluded)
    pub row_height: f32,
    /// Whether the row was stretched to the full width
    pub filled: bool,
}

impl GridRow {
    /// Sum of the tiles' width percentages
    pub fn total_width_percent(&self) -> f32 {
        self.tiles.iter().map(|t| t.width_percent).sum()
    }

    /// Check whether the row holds the item at `index`
    pub fn contains(&self, index: usize) -> bool {
        self.tiles.iter().any(|t| t.index == index)
    }
}

#[derive(Clone, Copy)]
struct Pending {
    index: usize,
    aspect_ratio: f32,
    weight: f32,
}

impl Pending {
    fn aspect_weight(&self) -> f32 {
        self.aspect_ratio * self.weight
    }
}

/// Lay out `items` into justified rows for a viewport `viewport_width` wide
///
/// Returns no rows for an empty list or a non-positive width.
pub fn build_rows(items: &[TileSpec], viewport_width: f32, config: &LayoutConfig) -> Vec<GridRow> {
    if items.is_empty() || !(viewport_width > 0.0) {
        return Vec::new();
    }

    let (min_height, max_height) = config.band(viewport_width);
    let mut rows = Vec::new();
    let mut current: Vec<Pending> = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let aspect_ratio = match item.aspect_ratio {
            Some(ar) if ar.is_finite() && ar > 0.0 => ar,
            _ => config.default_aspect_ratio,
        };
        current.push(Pending {
            index,
            aspect_ratio,
            weight: item.size.weight(),
        });

        if implied_height(&current, viewport_width) < min_height && current.len() > 1 {
            if let Some(overflow) = current.pop() {
                rows.push(finalize_filled(&current, viewport_width, min_height, max_height));
                current.clear();
                current.push(overflow);
            }
        }
    }

    if !current.is_empty() {
        rows.push(finalize_trailing(&current, viewport_width, max_height));
    }

    rows
}

/// Lay out the grid listing directly
pub fn build_rows_for(projects: &[ProjectSummary], viewport_width: f32, config: &LayoutConfig) -> Vec<GridRow> {
    let specs: Vec<TileSpec> = projects.iter().map(TileSpec::from).collect();
    build_rows(&specs, viewport_width, config)
}

fn total_aspect_weight(tiles: &[Pending]) -> f32 {
    tiles.iter().map(Pending::aspect_weight).sum()
}

fn implied_height(tiles: &[Pending], viewport_width: f32) -> f32 {
    viewport_width / total_aspect_weight(tiles)
}

fn finalize_filled(tiles: &[Pending], viewport_width: f32, min_height: f32, max_height: f32) -> GridRow {
    let row_height = implied_height(tiles, viewport_width).clamp(min_height, max_height);
    let total = total_aspect_weight(tiles);
    GridRow {
        tiles: tiles
            .iter()
            .map(|t| Tile {
                index: t.index,
                aspect_ratio: t.aspect_ratio,
                width_percent: t.aspect_weight() / total * 100.0,
            })
            .collect(),
        row_height,
        filled: true,
    }
}

fn finalize_trailing(tiles: &[Pending], viewport_width: f32, max_height: f32) -> GridRow {
    let row_height = implied_height(tiles, viewport_width).min(max_height);
    GridRow {
        tiles: tiles
            .iter()
            .map(|t| Tile {
                index: t.index,
                aspect_ratio: t.aspect_ratio,
                width_percent: (row_height * t.aspect_weight() / viewport_width * 100.0).min(100.0),
            })
            .collect(),
        row_height,
        filled: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs(ratios: &[f32], size: SizeClass) -> Vec<TileSpec> {
        ratios.iter().map(|&r| TileSpec::new(r, size)).collect()
    }

    #[test]
    fn test_empty_and_zero_width() {
        let config = LayoutConfig::default();
        assert!(build_rows(&[], 1200.0, &config).is_empty());
        assert!(build_rows(&specs(&[1.5], SizeClass::Large), 0.0, &config).is_empty());
    }

    #[test]
    fn test_three_items_fill_one_row_within_band() {
        // Band chosen so the row's natural height (~280px) is inside it
        let config = LayoutConfig {
            max_row_height: 300.0,
            ..LayoutConfig::default()
        };
        let rows = build_rows(&specs(&[1.5, 1.0, 1.78], SizeClass::Large), 1200.0, &config);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.tiles.len(), 3);
        assert!(row.row_height >= config.min_row_height && row.row_height <= config.max_row_height);
        assert!((row.total_width_percent() - 100.0).abs() <= 0.01);
    }

    #[test]
    fn test_sparse_trailing_row_stays_short() {
        // Natural height 280px exceeds the default 250px cap: the last row is
        // clamped and keeps natural widths instead of stretching to 100%.
        let config = LayoutConfig::default();
        let rows = build_rows(&specs(&[1.5, 1.0, 1.78], SizeClass::Large), 1200.0, &config);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].row_height, 250.0);
        assert!(!rows[0].filled);
        let expected = 250.0 * 4.28 / 1200.0 * 100.0;
        assert!((rows[0].total_width_percent() - expected).abs() < 0.01);
    }

    #[test]
    fn test_overflow_starts_new_row() {
        let config = LayoutConfig::default();
        // Four 1.5-ratio large tiles: 1200 / 6.0 = 200 (still fits), a fifth
        // drops the implied height to 160 and moves to a new row.
        let rows = build_rows(&specs(&[1.5; 5], SizeClass::Large), 1200.0, &config);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].tiles.len(), 4);
        assert!(rows[0].filled);
        assert_eq!(rows[0].row_height, 200.0);
        assert!((rows[0].total_width_percent() - 100.0).abs() < 0.01);
        assert_eq!(rows[1].tiles.len(), 1);
        assert_eq!(rows[1].tiles[0].index, 4);
        assert!(rows[1].contains(4));
    }

    #[test]
    fn test_interior_row_clamped_before_widths() {
        // Two very wide tiles: implied 1200 / 7.0 = 171 < 200 after the
        // second, so the first row holds one tile clamped up to the max band
        // and still spans 100% width.
        let config = LayoutConfig::default();
        let rows = build_rows(&specs(&[3.5, 3.5], SizeClass::Large), 1200.0, &config);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row_height, 250.0);
        assert!((rows[0].tiles[0].width_percent - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_single_wide_item_clamped_to_full_width() {
        let config = LayoutConfig::default();
        let rows = build_rows(&specs(&[10.0], SizeClass::Large), 1200.0, &config);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tiles.len(), 1);
        assert!(rows[0].tiles[0].width_percent <= 100.0);
        assert!((rows[0].tiles[0].width_percent - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_missing_aspect_ratio_uses_default() {
        let config = LayoutConfig::default();
        let items = [TileSpec {
            aspect_ratio: None,
            size: SizeClass::Medium,
        }];
        let rows = build_rows(&items, 1200.0, &config);
        assert_eq!(rows[0].tiles[0].aspect_ratio, 1.5);
    }

    #[test]
    fn test_mobile_band_applies_below_breakpoint() {
        let config = LayoutConfig::default();
        let rows = build_rows(&specs(&[1.0; 6], SizeClass::Medium), 400.0, &config);
        for row in rows.iter().filter(|r| r.filled) {
            assert!(row.row_height >= 100.0 && row.row_height <= 150.0);
        }
    }

    #[test]
    fn test_layout_is_pure() {
        let config = LayoutConfig::default();
        let items = specs(&[1.5, 0.8, 1.2, 2.0, 1.0, 0.66, 1.78], SizeClass::Medium);
        assert_eq!(build_rows(&items, 1440.0, &config), build_rows(&items, 1440.0, &config));
    }
}
