//! Grid layout
//!
//! Pure functions only: the host's measurement adapter supplies numbers, and
//! the same inputs always produce the same rows.

mod geometry;
mod justified;

pub use geometry::{rows_extent, GeometryInput, GridGeometry};
pub use justified::{build_rows, build_rows_for, GridRow, Tile, TileSpec};
