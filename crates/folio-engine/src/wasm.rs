//! Browser bindings
//!
//! [`FolioEngine`] wraps a [`TransitionEngine`] over the page's window: the
//! URL layer writes through `History.pushState` and the viewport adapter
//! reads and writes `window.scrollY`. Records are handed over from JS as
//! CMS JSON; structured values cross the boundary as JSON strings.

use tracing::warn;
use wasm_bindgen::prelude::*;

use crate::cache::MemoryStore;
use crate::config::EngineConfig;
use crate::content::{ProjectRecord, Target};
use crate::engine::{parse_query, query_url, QueryParamLayer, TransitionEngine};
use crate::error::EngineError;
use crate::hover::{RowBox, MUTED_OPACITY};
use crate::layout::GridGeometry;
use crate::viewport::ScrollSurface;

fn to_js(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| to_js(e.into()))
}

/// Query layer over `window.location` / `window.history`
pub struct BrowserQuery {
    window: web_sys::Window,
}

impl QueryParamLayer for BrowserQuery {
    fn read(&self) -> Option<Target> {
        let search = self.window.location().search().ok()?;
        parse_query(&search)
    }

    fn push(&mut self, param: Option<&Target>) {
        let url = query_url(param);
        let pushed = self
            .window
            .history()
            .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(&url)));
        if let Err(e) = pushed {
            warn!(%url, error = ?e, "history push failed");
        }
    }

    fn reports_pushes(&self) -> bool {
        false
    }
}

/// Scroll surface over the window
pub struct BrowserViewport {
    window: web_sys::Window,
}

impl ScrollSurface for BrowserViewport {
    fn scroll_y(&self) -> f32 {
        self.window.scroll_y().unwrap_or(0.0) as f32
    }

    fn scroll_to(&mut self, y: f32) {
        self.window.scroll_to_with_x_and_y(0.0, f64::from(y));
    }

    fn viewport_height(&self) -> f32 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0) as f32
    }
}

/// JS-facing engine handle
#[wasm_bindgen]
pub struct FolioEngine {
    engine: TransitionEngine<MemoryStore, BrowserQuery>,
    viewport: BrowserViewport,
}

#[wasm_bindgen]
impl FolioEngine {
    /// Create an engine; `config_json` overrides any subset of the defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<FolioEngine, JsValue> {
        console_error_panic_hook::set_once();

        let config = match config_json {
            Some(json) => EngineConfig::from_json(&json).map_err(to_js)?,
            None => EngineConfig::default(),
        };
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let engine = TransitionEngine::new(
            config,
            MemoryStore::new(),
            BrowserQuery {
                window: window.clone(),
            },
        )
        .map_err(to_js)?;

        Ok(FolioEngine {
            engine,
            viewport: BrowserViewport { window },
        })
    }

    /// Make records (JSON array) available to `select` and `prefetch`
    pub fn load_records(&mut self, records_json: &str) -> Result<usize, JsValue> {
        let records: Vec<ProjectRecord> = serde_json::from_str(records_json).map_err(|e| to_js(e.into()))?;
        let count = records.len();
        let store = self.engine.cache_mut().store_mut();
        for record in records {
            store.insert(record);
        }
        Ok(count)
    }

    /// First-paint record from the server
    pub fn seed(&mut self, record_json: &str) -> Result<bool, JsValue> {
        let record: ProjectRecord = serde_json::from_str(record_json).map_err(|e| to_js(e.into()))?;
        Ok(self.engine.seed(record))
    }

    pub fn seed_information(&mut self) -> bool {
        self.engine.seed_information()
    }

    /// Show the page named by the current URL, if its record is loaded
    pub fn restore_from_url(&mut self) -> bool {
        self.engine.restore_from_url()
    }

    /// Select a slug (or `"information"`); returns the request outcome
    pub fn select(&mut self, value: &str, now_ms: f64) -> Result<String, JsValue> {
        let outcome = self.engine.select(Target::parse(value), now_ms, &mut self.viewport);
        json(&outcome)
    }

    pub fn close(&mut self, now_ms: f64) -> Result<String, JsValue> {
        let outcome = self.engine.close(now_ms, &mut self.viewport);
        json(&outcome)
    }

    pub fn prefetch(&mut self, slug: &str) {
        self.engine.prefetch(slug);
    }

    /// Call once per animation frame
    pub fn tick(&mut self, now_ms: f64) {
        self.engine.tick(now_ms, &mut self.viewport);
    }

    /// Call from the scroll listener with the grid's first-row top
    pub fn on_scroll(&mut self, grid_top: f32) {
        self.engine.on_scroll(grid_top);
    }

    /// Call when the query string changed (popstate, router update)
    ///
    /// The engine's own `pushState` writes need not be reported.
    pub fn on_url_change(&mut self, now_ms: f64) -> Result<Option<String>, JsValue> {
        let observed = self.engine.query().read();
        match self.engine.on_url_change(observed, now_ms, &mut self.viewport) {
            Some(outcome) => json(&outcome).map(Some),
            None => Ok(None),
        }
    }

    /// Replace grid geometry (JSON object)
    pub fn set_geometry(&mut self, geometry_json: &str) -> Result<(), JsValue> {
        let geometry: GridGeometry = serde_json::from_str(geometry_json).map_err(|e| to_js(e.into()))?;
        self.engine.update_geometry(Some(geometry));
        Ok(())
    }

    pub fn clear_geometry(&mut self) {
        self.engine.clear_geometry();
    }

    /// Current geometry as JSON
    pub fn geometry(&self) -> Result<String, JsValue> {
        let geometry = self
            .engine
            .geometry()
            .ok_or_else(|| to_js(EngineError::GeometryUnavailable))?;
        json(geometry)
    }

    pub fn tile_hover(&mut self, id: &str) {
        self.engine.tile_hover(id);
    }

    pub fn sidebar_hover(&mut self, id: &str, now_ms: f64) {
        self.engine.sidebar_hover(id, now_ms, &self.viewport);
    }

    pub fn clear_hover(&mut self) {
        self.engine.clear_hover();
    }

    /// Whether the sidebar entry for `slug` renders muted
    pub fn sidebar_muted(&self, slug: &str) -> bool {
        self.engine.sidebar_muted(slug)
    }

    /// Opacity for the sidebar entry for `slug`
    pub fn sidebar_opacity(&self, slug: &str) -> f32 {
        if self.engine.sidebar_muted(slug) {
            MUTED_OPACITY
        } else {
            1.0
        }
    }

    /// Register `locate(id) -> [top, bottom] | null` for sidebar row reveal
    pub fn register_row_reveal_handler(&mut self, locate: js_sys::Function) {
        self.engine
            .register_row_reveal_handler(Box::new(move |id: &str| -> Option<RowBox> {
                let value = locate.call1(&JsValue::NULL, &JsValue::from_str(id)).ok()?;
                let edges: js_sys::Array = value.dyn_into().ok()?;
                let top = edges.get(0).as_f64()?;
                let bottom = edges.get(1).as_f64()?;
                Some(RowBox::new(top as f32, bottom as f32))
            }));
    }

    pub fn unregister_row_reveal_handler(&mut self) {
        self.engine.unregister_row_reveal_handler();
    }

    pub fn gallery_next(&mut self) -> usize {
        self.engine.gallery_next()
    }

    pub fn gallery_prev(&mut self) -> usize {
        self.engine.gallery_prev()
    }

    pub fn gallery_select(&mut self, index: usize) -> bool {
        self.engine.gallery_select(index)
    }

    pub fn gallery_remount_key(&self) -> f64 {
        self.engine.gallery().remount_key() as f64
    }

    pub fn media_label(&self, index: usize) -> Option<String> {
        self.engine.media_label(index)
    }

    pub fn phase(&self) -> String {
        self.engine.phase().name().to_string()
    }

    pub fn grid_padding(&self) -> f32 {
        self.engine.grid_padding()
    }

    pub fn is_in_flight(&self) -> bool {
        self.engine.is_in_flight()
    }

    /// Selected project record as JSON, if any
    pub fn active_record(&self) -> Result<Option<String>, JsValue> {
        self.engine.active_record().map(json).transpose()
    }

    pub fn detail_surface(&self) -> Result<String, JsValue> {
        json(&self.engine.detail_surface())
    }

    pub fn hover_state(&self) -> Result<String, JsValue> {
        json(self.engine.hover_state())
    }

    /// Events since the last call, as a JSON array
    pub fn drain_events(&mut self) -> Result<String, JsValue> {
        json(&self.engine.drain_events())
    }
}
