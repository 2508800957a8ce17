//! Transition state machine
//!
//! [`TransitionEngine`] owns the phase, the selection, the content cache and
//! the hover coordinator. It is driven from the host's frame loop: every
//! operation takes `now_ms` and a [`ScrollSurface`], and nothing happens
//! between calls.
//!
//! ## Request handling
//!
//! - Requests are accepted only at rest (`Idle`/`Ready`) with nothing
//!   deferred; anything else is dropped.
//! - Content is resolved before a sequence starts. A failed fetch leaves
//!   phase, selection and URL untouched.
//! - Without grid geometry a resolved request is deferred and started on
//!   the first tick after geometry arrives.
//! - User requests set a [`NavigationIntent`] before the URL is written, so
//!   the engine's own write is never mistaken for an external navigation.

mod events;
mod intent;
mod overlap;
mod phase;
mod runner;
pub mod sequence;

pub use events::{EngineEvent, Request, RequestKind};
pub use intent::{parse_query, query_url, MemoryQuery, NavigationIntent, QueryParamLayer, PROJECT_PARAM};
pub use overlap::{derive as derive_overlap, OverlapGate, OverlapReading};
pub use phase::{GridReturnDriver, Phase};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::cache::{ContentCache, ContentStore};
use crate::config::EngineConfig;
use crate::content::{ProjectRecord, Selection, Target};
use crate::error::EngineResult;
use crate::gallery::{media_label, GalleryCursor};
use crate::hover::{
    mutes, FilterDecision, HoverCoordinator, HoverSource, HoverState, RowLocator, RowRevealLink,
};
use crate::layout::{GeometryInput, GridGeometry};
use crate::viewport::ScrollSurface;

use runner::RunningSequence;
use sequence::PlanContext;

/// Where a request came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Origin {
    /// Click or keyboard; writes the URL when done
    User,
    /// Observed URL change (back/forward); never writes the URL back
    Url,
}

/// Request parked until geometry is available
#[derive(Clone, Debug)]
enum Deferred {
    Select(Target, Origin),
    Close(Origin),
}

/// Call-to-action shown under the grid's leading row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affordance {
    KeepBrowsing,
    BackToProject,
}

/// Derived visual state of the detail surface
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetailSurface {
    pub mounted: bool,
    pub opacity: f32,
    /// Pointer events enabled
    pub interactive: bool,
    /// Pause any playing video
    pub pause_media: bool,
    pub affordance: Affordance,
}

/// The view-transition coordination engine
pub struct TransitionEngine<S: ContentStore, Q: QueryParamLayer> {
    config: EngineConfig,
    cache: ContentCache<S>,
    query: Q,
    phase: Phase,
    selection: Selection,
    intent: Option<NavigationIntent>,
    geometry: Option<GridGeometry>,
    /// Grid top offset currently applied
    padding: f32,
    /// Phase-driven detail opacity; tracks the overlap gate at `Ready`
    detail_opacity: f32,
    /// Last reported viewport-relative top of the grid's first row
    grid_top: Option<f32>,
    gate: OverlapGate,
    hover: HoverCoordinator,
    reveal: RowRevealLink,
    gallery: GalleryCursor,
    running: Option<RunningSequence>,
    deferred: Option<Deferred>,
    frame: u64,
    events: Vec<EngineEvent>,
}

impl<S: ContentStore, Q: QueryParamLayer> TransitionEngine<S, Q> {
    /// Create an idle engine; fails if `config` does not validate
    pub fn new(config: EngineConfig, store: S, query: Q) -> EngineResult<Self> {
        config.validate()?;
        let reveal = RowRevealLink::new(&config.hover, &config.timing);
        let gate = OverlapGate::new(config.overlap.clone());
        Ok(Self {
            config,
            cache: ContentCache::new(store),
            query,
            phase: Phase::Idle,
            selection: Selection::None,
            intent: None,
            geometry: None,
            padding: 0.0,
            detail_opacity: 0.0,
            grid_top: None,
            gate,
            hover: HoverCoordinator::new(),
            reveal,
            gallery: GalleryCursor::default(),
            running: None,
            deferred: None,
            frame: 0,
            events: Vec::new(),
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Record shown by the detail surface, if a project is selected
    pub fn active_record(&self) -> Option<&ProjectRecord> {
        self.selection.slug().and_then(|slug| self.cache.get(slug))
    }

    /// Grid top offset to apply this frame
    pub fn grid_padding(&self) -> f32 {
        self.padding
    }

    pub fn geometry(&self) -> Option<&GridGeometry> {
        self.geometry.as_ref()
    }

    pub fn intent(&self) -> Option<&NavigationIntent> {
        self.intent.as_ref()
    }

    pub fn hover_state(&self) -> &HoverState {
        self.hover.state()
    }

    pub fn overlap(&self) -> OverlapReading {
        self.gate.reading()
    }

    pub fn gallery(&self) -> &GalleryCursor {
        &self.gallery
    }

    pub fn cache(&self) -> &ContentCache<S> {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut ContentCache<S> {
        &mut self.cache
    }

    pub fn query(&self) -> &Q {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut Q {
        &mut self.query
    }

    /// A sequence is running, a request is deferred, or the phase is scripted
    pub fn is_in_flight(&self) -> bool {
        self.running.is_some() || self.deferred.is_some() || !self.phase.is_resting()
    }

    /// Snapshot for the presentation layer
    pub fn detail_surface(&self) -> DetailSurface {
        let reading = self.gate.reading();
        let mounted = !self.selection.is_none();
        DetailSurface {
            mounted,
            opacity: if mounted { self.detail_opacity } else { 0.0 },
            interactive: mounted && self.phase == Phase::Ready && self.running.is_none() && !reading.overlap,
            pause_media: reading.overlap,
            affordance: if reading.overlap {
                Affordance::BackToProject
            } else {
                Affordance::KeepBrowsing
            },
        }
    }

    /// Take every event emitted since the last call
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Show `target`, animating from whatever is displayed now
    pub fn select(&mut self, target: Target, now_ms: f64, surface: &mut dyn ScrollSurface) -> Request {
        self.request_select(target, Origin::User, now_ms, surface)
    }

    /// Hide the detail surface and return the grid to landing geometry
    pub fn close(&mut self, now_ms: f64, surface: &mut dyn ScrollSurface) -> Request {
        self.request_close(Origin::User, now_ms, surface)
    }

    /// Warm the cache for `slug`; never affects phase
    pub fn prefetch(&mut self, slug: &str) {
        self.cache.prefetch(slug);
    }

    /// First-paint data: cache `record` and jump straight to `Ready` on it
    ///
    /// Returns `false` (caching only) while a transition is in flight.
    pub fn seed(&mut self, record: ProjectRecord) -> bool {
        let target = Target::Project(record.slug.clone());
        self.cache.seed(record);
        self.jump_to(target)
    }

    /// Jump straight to `Ready` on the information page
    pub fn seed_information(&mut self) -> bool {
        self.jump_to(Target::Information)
    }

    /// Cache several records without changing what is displayed
    pub fn seed_many(&mut self, records: impl IntoIterator<Item = ProjectRecord>) -> usize {
        self.cache.seed_many(records)
    }

    /// Deep link without server data: show what the URL names, if it resolves
    pub fn restore_from_url(&mut self) -> bool {
        let Some(target) = self.query.read() else {
            return false;
        };
        self.resolve(&target) && self.jump_to(target)
    }

    /// Report a query-parameter change observed by the host
    ///
    /// Returns the outcome when the observation drove a transition.
    pub fn on_url_change(
        &mut self,
        observed: Option<Target>,
        now_ms: f64,
        surface: &mut dyn ScrollSurface,
    ) -> Option<Request> {
        let observed_selection = Selection::from_param(observed.clone());
        if let Some(intent) = &self.intent {
            if intent.matches(&observed_selection) {
                debug!(selection = ?observed_selection, "navigation intent fulfilled");
                self.intent = None;
            } else {
                trace!(observed = ?observed_selection, intent = ?intent.target(), "url change ignored");
            }
            return None;
        }
        if observed_selection == self.selection {
            return None;
        }

        debug!(observed = ?observed_selection, "external navigation");
        Some(match observed {
            Some(target) => self.request_select(target, Origin::Url, now_ms, surface),
            None => self.request_close(Origin::Url, now_ms, surface),
        })
    }

    fn request_select(
        &mut self,
        target: Target,
        origin: Origin,
        now_ms: f64,
        surface: &mut dyn ScrollSurface,
    ) -> Request {
        if self.is_in_flight() {
            return self.drop_request(RequestKind::Select(target));
        }

        if self.selection.shows(&target) {
            let ctx = self.plan_context(surface.scroll_y(), false);
            return match sequence::rescroll(&ctx) {
                Some(seq) => {
                    self.start_sequence(seq, now_ms, surface);
                    Request::ScrollOnly
                }
                None => Request::NoOp,
            };
        }

        if !self.resolve(&target) {
            return Request::Failed;
        }
        if origin == Origin::User {
            self.set_intent(Selection::from(target.clone()));
        }

        let Some(geometry) = self.geometry else {
            debug!(?target, "geometry unavailable, request deferred");
            self.deferred = Some(Deferred::Select(target, origin));
            return Request::Deferred;
        };
        self.begin_select(target, origin, &geometry, now_ms, surface);
        Request::Started
    }

    fn begin_select(
        &mut self,
        target: Target,
        origin: Origin,
        geometry: &GridGeometry,
        now_ms: f64,
        surface: &mut dyn ScrollSurface,
    ) {
        let ctx = self.plan_context(surface.scroll_y(), origin == Origin::User);
        let seq = if self.phase == Phase::Ready {
            sequence::switch(&target, &ctx)
        } else {
            sequence::enter(&target, geometry, &ctx)
        };
        self.start_sequence(seq, now_ms, surface);
    }

    fn request_close(&mut self, origin: Origin, now_ms: f64, surface: &mut dyn ScrollSurface) -> Request {
        if self.is_in_flight() {
            return self.drop_request(RequestKind::Close);
        }

        if self.selection.is_none() {
            let ctx = self.plan_context(surface.scroll_y(), false);
            return match sequence::scroll_to_top(&ctx) {
                Some(seq) => {
                    self.start_sequence(seq, now_ms, surface);
                    Request::ScrollOnly
                }
                None => Request::NoOp,
            };
        }

        if origin == Origin::User {
            self.set_intent(Selection::None);
        }
        let Some(geometry) = self.geometry else {
            debug!("geometry unavailable, close deferred");
            self.deferred = Some(Deferred::Close(origin));
            return Request::Deferred;
        };
        self.begin_close(origin, &geometry, now_ms, surface);
        Request::Started
    }

    fn begin_close(
        &mut self,
        origin: Origin,
        geometry: &GridGeometry,
        now_ms: f64,
        surface: &mut dyn ScrollSurface,
    ) {
        let ctx = self.plan_context(surface.scroll_y(), origin == Origin::User);
        let seq = sequence::close(geometry, &ctx);
        self.start_sequence(seq, now_ms, surface);
    }

    fn plan_context(&self, scroll_y: f32, commit_url: bool) -> PlanContext<'_> {
        PlanContext {
            timing: &self.config.timing,
            scroll_y,
            anchor: self.config.geometry.anchor_scroll,
            anchor_tolerance: self.config.geometry.anchor_tolerance,
            commit_url,
        }
    }

    fn drop_request(&mut self, kind: RequestKind) -> Request {
        trace!(?kind, phase = %self.phase, "request dropped, transition in flight");
        self.events.push(EngineEvent::RequestDropped(kind));
        Request::Dropped
    }

    /// Make `target` displayable; the information page needs no fetch
    fn resolve(&mut self, target: &Target) -> bool {
        match target {
            Target::Information => true,
            Target::Project(slug) => self.cache.fetch(slug).is_some(),
        }
    }

    fn set_intent(&mut self, target: Selection) {
        self.intent = Some(NavigationIntent::new(target));
    }

    fn jump_to(&mut self, target: Target) -> bool {
        if self.is_in_flight() {
            trace!(?target, "seed while in flight, cached only");
            return false;
        }
        self.mount(target);
        self.set_phase(Phase::Ready);
        self.detail_opacity = 1.0;
        if let Some(geometry) = self.geometry {
            self.padding = geometry.peek_padding;
        }
        self.refresh_gate();
        true
    }

    // =========================================================================
    // Frame loop and measurement
    // =========================================================================

    /// Advance animations by one frame
    pub fn tick(&mut self, now_ms: f64, surface: &mut dyn ScrollSurface) {
        self.frame += 1;
        if self.running.is_none() {
            self.start_deferred(now_ms, surface);
        }
        self.advance(now_ms, surface);
        if !self.hover.is_locked() {
            self.reveal.tick(now_ms, surface);
        }
    }

    fn start_deferred(&mut self, now_ms: f64, surface: &mut dyn ScrollSurface) {
        let Some(geometry) = self.geometry else {
            return;
        };
        match self.deferred.take() {
            Some(Deferred::Select(target, origin)) => {
                debug!(?target, "starting deferred select");
                self.begin_select(target, origin, &geometry, now_ms, surface);
            }
            Some(Deferred::Close(origin)) => {
                debug!("starting deferred close");
                self.begin_close(origin, &geometry, now_ms, surface);
            }
            None => {}
        }
    }

    /// Report the viewport-relative top of the grid's first row
    pub fn on_scroll(&mut self, grid_top: f32) {
        self.grid_top = Some(grid_top);
        if self.phase == Phase::Ready && self.running.is_none() {
            self.refresh_gate();
        }
    }

    /// Replace the grid geometry (`None` while unmeasurable)
    ///
    /// At rest the padding snaps to the new geometry; running sequences keep
    /// the targets they were planned with.
    pub fn update_geometry(&mut self, geometry: Option<GridGeometry>) {
        self.geometry = geometry;
        if self.running.is_some() || !self.phase.is_resting() {
            return;
        }
        if let Some(g) = geometry {
            self.padding = match self.phase {
                Phase::Ready => g.peek_padding,
                _ => g.landing_padding,
            };
            if self.phase == Phase::Ready {
                self.refresh_gate();
            }
        }
    }

    /// Derive geometry from host measurements and apply it
    pub fn measure(&mut self, input: &GeometryInput<'_>) -> Option<GridGeometry> {
        let geometry = GridGeometry::measure(input, &self.config.geometry);
        self.update_geometry(geometry);
        geometry
    }

    /// Forget geometry (e.g. the grid unmounted)
    pub fn clear_geometry(&mut self) {
        self.update_geometry(None);
    }

    fn refresh_gate(&mut self) {
        let (Some(grid_top), Some(geometry)) = (self.grid_top, self.geometry) else {
            return;
        };
        if self.gate.update(grid_top, &geometry) {
            let reading = self.gate.reading();
            self.detail_opacity = reading.opacity;
            self.events.push(EngineEvent::OverlapChanged {
                overlap: reading.overlap,
                opacity: reading.opacity,
            });
        }
    }

    // =========================================================================
    // Hover
    // =========================================================================

    /// Pointer entered a grid tile
    pub fn tile_hover(&mut self, id: &str) {
        if self.hover.set_highlight(id, HoverSource::Primary) {
            self.events.push(EngineEvent::HighlightChanged(Some(id.to_string())));
        }
    }

    /// Pointer entered a sidebar entry
    ///
    /// Prefetches the project and feeds the row-reveal link. Returns `None`
    /// while hover is locked.
    pub fn sidebar_hover(&mut self, id: &str, now_ms: f64, surface: &dyn ScrollSurface) -> Option<FilterDecision> {
        self.prefetch(id);
        if self.hover.is_locked() {
            return None;
        }
        if self.hover.set_highlight(id, HoverSource::Secondary) {
            self.events.push(EngineEvent::HighlightChanged(Some(id.to_string())));
        }
        Some(self.reveal.on_hover(id, now_ms, surface))
    }

    /// Pointer left a tile or sidebar entry
    pub fn clear_hover(&mut self) {
        if self.hover.clear() {
            self.events.push(EngineEvent::HighlightChanged(None));
        }
        self.reveal.on_leave();
    }

    /// Whether the sidebar entry for `slug` renders muted
    pub fn sidebar_muted(&self, slug: &str) -> bool {
        mutes(slug, self.hover.state(), &self.selection, self.detail_surface().opacity)
    }

    pub fn register_row_reveal_handler(&mut self, locator: Box<dyn RowLocator>) {
        self.reveal.register(locator);
    }

    pub fn unregister_row_reveal_handler(&mut self) {
        self.reveal.unregister();
    }

    fn lock_hover(&mut self) {
        if self.hover.lock() {
            self.events.push(EngineEvent::HighlightChanged(None));
        }
        self.reveal.suspend();
    }

    // =========================================================================
    // Gallery
    // =========================================================================

    pub fn gallery_next(&mut self) -> usize {
        self.gallery.next()
    }

    pub fn gallery_prev(&mut self) -> usize {
        self.gallery.prev()
    }

    pub fn gallery_select(&mut self, index: usize) -> bool {
        self.gallery.select(index)
    }

    /// Thumbnail label for media `index` of the active record
    pub fn media_label(&self, index: usize) -> Option<String> {
        let record = self.active_record()?;
        media_label(record.project_code.as_deref(), index)
    }

    // =========================================================================
    // State changes shared with the runner
    // =========================================================================

    fn set_phase(&mut self, phase: Phase) {
        if self.phase == phase {
            return;
        }
        debug!(from = %self.phase, to = %phase, "phase changed");
        self.events.push(EngineEvent::PhaseChanged {
            from: self.phase,
            to: phase,
        });
        self.phase = phase;
    }

    fn set_selection(&mut self, selection: Selection) {
        if self.selection == selection {
            return;
        }
        self.selection = selection.clone();
        self.events.push(EngineEvent::SelectionChanged(selection));
    }

    /// Swap the detail surface to `target`, invisible
    fn mount(&mut self, target: Target) {
        let media = match &target {
            Target::Project(slug) => self.cache.get(slug).map_or(0, |r| r.media.len()),
            Target::Information => 0,
        };
        self.gallery = GalleryCursor::new(media);
        self.detail_opacity = 0.0;
        self.set_selection(target.into());
    }

    fn unmount(&mut self) {
        self.gallery = GalleryCursor::default();
        self.detail_opacity = 0.0;
        self.set_selection(Selection::None);
    }

    fn write_url(&mut self, param: Option<Target>) {
        let selection = Selection::from_param(param.clone());
        if !self.intent.as_ref().is_some_and(|i| i.matches(&selection)) {
            self.set_intent(selection);
        }
        self.query.push(param.as_ref());
        if !self.query.reports_pushes() {
            // No echo will arrive to fulfil the intent
            self.intent = None;
        }
        debug!(?param, "url written");
        self.events.push(EngineEvent::UrlWritten(param));
    }
}
