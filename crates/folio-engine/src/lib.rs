//! View-transition engine for the folio portfolio site
//!
//! This crate turns "user clicked a tile" or "user scrolled" into a
//! choreographed sequence of scroll, grid-padding and opacity animations
//! between the project grid and the full-bleed detail viewer:
//! - Justified grid layout and the geometry derived from it
//! - A fetch-once content cache in front of the CMS
//! - Hover coordination between the sidebar and the grid
//! - The transition state machine and its URL negotiation
//!
//! ## Architecture
//!
//! - [`transition`]: easing curves, tweens, cancellable scroll
//! - [`layout`]: justified rows and grid geometry (pure functions)
//! - [`cache`]: content store boundary and the memoizing cache
//! - [`hover`]: highlight ownership, oscillation filter, row reveal
//! - [`engine`]: phases, sequences, the [`TransitionEngine`]
//! - [`gallery`]: active media cursor of the detail viewer
//!
//! ## Example
//!
//! ```rust
//! use folio_engine::{
//!     EngineConfig, GridGeometry, MemoryQuery, MemoryStore, MemoryViewport, Phase,
//!     ProjectRecord, Target, TransitionEngine,
//! };
//!
//! let store = MemoryStore::with_records(vec![ProjectRecord::new("p1", "Harbour", "harbour", 2023)]);
//! let mut engine = TransitionEngine::new(EngineConfig::default(), store, MemoryQuery::new()).unwrap();
//! engine.update_geometry(Some(GridGeometry {
//!     landing_padding: 260.0,
//!     peek_padding: 704.0,
//!     row_height: 294.0,
//!     overlap_threshold: 600.0,
//!     viewport_height: 800.0,
//! }));
//!
//! let mut viewport = MemoryViewport::new(800.0);
//! engine.select(Target::parse("harbour"), 0.0, &mut viewport);
//! let mut now = 0.0;
//! while engine.is_in_flight() {
//!     now += 16.0;
//!     engine.tick(now, &mut viewport);
//! }
//! assert_eq!(engine.phase(), Phase::Ready);
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: all state lives here and is testable without a browser
//! 2. **Time Abstraction**: every operation takes `now_ms`; nothing reads a clock
//! 3. **Measurement at the edge**: hosts hand in plain numbers through
//!    [`ScrollSurface`] and [`GeometryInput`]

pub mod cache;
pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod gallery;
pub mod hover;
pub mod layout;
pub mod transition;
pub mod viewport;

// WASM exports (only available with "wasm" feature)
#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use wasm::*;

// Re-export core types for convenience
pub use cache::{ContentCache, ContentStore, MemoryStore};
pub use config::{EngineConfig, GeometryConfig, HoverConfig, LayoutConfig, OverlapConfig, TimingConfig};
pub use content::{MediaItem, MediaKind, ProjectRecord, ProjectSummary, Selection, SizeClass, Slug, Target};
pub use engine::{
    Affordance, DetailSurface, EngineEvent, GridReturnDriver, MemoryQuery, NavigationIntent, Phase,
    QueryParamLayer, Request, TransitionEngine,
};
pub use error::{EngineError, EngineResult, StoreError};
pub use gallery::GalleryCursor;
pub use hover::{FilterDecision, HoverCoordinator, HoverSource, HoverState, RowBox, RowLocator};
pub use layout::{build_rows, GeometryInput, GridGeometry, GridRow, Tile, TileSpec};
pub use transition::Easing;
pub use viewport::{MemoryViewport, ScrollSurface};

/// Duration of the grid padding/scroll animation in milliseconds
pub use config::GRID_ANIMATION_MS;

/// Duration of detail-surface fades in milliseconds
pub use config::FADE_MS;
