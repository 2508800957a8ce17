//! Sidebar hover -> grid row reveal
//!
//! The grid registers a [`RowLocator`] (a DOM measurement call-out); the
//! link filters sidebar hover events, locates the hovered row and runs a
//! cancellable scroll that brings it into view along the nearer edge.

use tracing::trace;

use super::oscillation::{FilterDecision, OscillationFilter};
use crate::config::{HoverConfig, TimingConfig};
use crate::transition::{CancellableScroll, Easing, ScrollStatus};
use crate::viewport::ScrollSurface;

/// Vertical extent of a row, relative to the top of the viewport
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowBox {
    pub top: f32,
    pub bottom: f32,
}

impl RowBox {
    pub fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    pub fn center(&self) -> f32 {
        (self.top + self.bottom) * 0.5
    }
}

/// Measurement call-out resolving a hover id to its row's box
pub trait RowLocator {
    fn locate_row(&self, id: &str) -> Option<RowBox>;
}

impl<F> RowLocator for F
where
    F: Fn(&str) -> Option<RowBox>,
{
    fn locate_row(&self, id: &str) -> Option<RowBox> {
        self(id)
    }
}

/// Scroll offset that reveals `row`, or `None` if it is already visible
///
/// Visible means inside the viewport with `margin` to spare at both ends.
/// Otherwise the nearer edge is aligned: a row centered above the viewport
/// midpoint gets its top aligned to the top margin, one below gets its
/// bottom aligned to the bottom margin.
pub fn reveal_target(row: RowBox, scroll_y: f32, viewport_height: f32, margin: f32) -> Option<f32> {
    if row.top >= margin && row.bottom <= viewport_height - margin {
        return None;
    }
    let delta = if row.center() < viewport_height * 0.5 {
        row.top - margin
    } else {
        row.bottom - (viewport_height - margin)
    };
    Some((scroll_y + delta).max(0.0))
}

/// Hover-to-scroll link between the sidebar and the grid
pub struct RowRevealLink {
    locator: Option<Box<dyn RowLocator>>,
    filter: OscillationFilter,
    active: Option<CancellableScroll>,
    margin: f32,
    duration_ms: f32,
    easing: Easing,
}

impl RowRevealLink {
    pub fn new(hover: &HoverConfig, timing: &TimingConfig) -> Self {
        Self {
            locator: None,
            filter: OscillationFilter::new(hover),
            active: None,
            margin: hover.reveal_margin,
            duration_ms: timing.row_reveal_ms,
            easing: timing.reveal_easing,
        }
    }

    /// Install the grid's row locator, replacing any previous one
    pub fn register(&mut self, locator: Box<dyn RowLocator>) {
        self.locator = Some(locator);
    }

    /// Remove the locator and stop any reveal in flight
    pub fn unregister(&mut self) {
        self.locator = None;
        self.cancel();
        self.filter.reset();
    }

    pub fn is_registered(&self) -> bool {
        self.locator.is_some()
    }

    /// Check whether a reveal scroll is in flight
    pub fn is_scrolling(&self) -> bool {
        self.active.is_some()
    }

    /// Feed a sidebar hover; committed targets start a reveal
    pub fn on_hover(&mut self, id: &str, now_ms: f64, surface: &dyn ScrollSurface) -> FilterDecision {
        let decision = self.filter.on_event(id, now_ms);
        trace!(id, ?decision, "sidebar hover filtered");
        if decision == FilterDecision::Commit {
            self.start(id, now_ms, surface);
        }
        decision
    }

    /// Pointer left the sidebar: forget buffered targets
    pub fn on_leave(&mut self) {
        self.filter.reset();
    }

    /// Commit a settled target and advance the reveal scroll one frame
    pub fn tick(&mut self, now_ms: f64, surface: &mut dyn ScrollSurface) {
        if let Some(id) = self.filter.poll(now_ms) {
            self.start(&id, now_ms, surface);
        }
        if let Some(scroll) = self.active.as_mut() {
            if scroll.step(now_ms, surface) != ScrollStatus::Running {
                self.active = None;
            }
        }
    }

    /// Stop the reveal in flight where it is
    pub fn cancel(&mut self) {
        if let Some(scroll) = self.active.take() {
            scroll.cancel();
        }
    }

    /// Stop the reveal in flight and drop any buffered target
    ///
    /// Called before a scripted scroll so nothing hovered earlier commits
    /// once the script hands the viewport back.
    pub fn suspend(&mut self) {
        self.cancel();
        self.filter.clear_pending();
    }

    fn start(&mut self, id: &str, now_ms: f64, surface: &dyn ScrollSurface) {
        self.cancel();
        let Some(row) = self.locator.as_ref().and_then(|l| l.locate_row(id)) else {
            return;
        };
        let from = surface.scroll_y();
        let Some(to) = reveal_target(row, from, surface.viewport_height(), self.margin) else {
            return;
        };
        let scroll = CancellableScroll::new(from, to, now_ms, self.duration_ms, self.easing);
        if !scroll.status().is_settled() {
            self.active = Some(scroll);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::MemoryViewport;

    const VH: f32 = 800.0;

    #[test]
    fn test_visible_row_needs_no_scroll() {
        assert_eq!(reveal_target(RowBox::new(100.0, 350.0), 0.0, VH, 16.0), None);
    }

    #[test]
    fn test_row_above_aligns_top_edge() {
        // Partly above the viewport
        let target = reveal_target(RowBox::new(-120.0, 130.0), 500.0, VH, 16.0);
        assert_eq!(target, Some(500.0 - 136.0));
    }

    #[test]
    fn test_row_below_aligns_bottom_edge() {
        let target = reveal_target(RowBox::new(700.0, 950.0), 200.0, VH, 16.0);
        assert_eq!(target, Some(200.0 + 950.0 - 784.0));
    }

    #[test]
    fn test_target_never_negative() {
        let target = reveal_target(RowBox::new(-40.0, 210.0), 10.0, VH, 16.0);
        assert_eq!(target, Some(0.0));
    }

    fn link_with_row(row: RowBox) -> RowRevealLink {
        let mut link = RowRevealLink::new(&HoverConfig::default(), &TimingConfig::default());
        link.register(Box::new(move |id: &str| (id == "dunes").then_some(row)));
        link
    }

    #[test]
    fn test_committed_hover_scrolls_row_into_view() {
        let mut viewport = MemoryViewport::new(VH);
        let mut link = link_with_row(RowBox::new(900.0, 1150.0));

        assert_eq!(link.on_hover("dunes", 0.0, &viewport), FilterDecision::Commit);
        assert!(link.is_scrolling());

        let mut now = 0.0;
        while link.is_scrolling() {
            now += 16.0;
            link.tick(now, &mut viewport);
        }
        assert_eq!(viewport.scroll_y(), 1150.0 - 784.0);
    }

    #[test]
    fn test_unknown_row_is_ignored() {
        let viewport = MemoryViewport::new(VH);
        let mut link = link_with_row(RowBox::new(900.0, 1150.0));
        link.on_hover("harbour", 0.0, &viewport);
        assert!(!link.is_scrolling());
    }

    #[test]
    fn test_unregister_cancels_in_flight_reveal() {
        let mut viewport = MemoryViewport::new(VH);
        let mut link = link_with_row(RowBox::new(900.0, 1150.0));
        link.on_hover("dunes", 0.0, &viewport);
        link.tick(16.0, &mut viewport);
        let reached = viewport.scroll_y();

        link.unregister();
        assert!(!link.is_registered());
        link.tick(32.0, &mut viewport);
        assert_eq!(viewport.scroll_y(), reached);
    }

    #[test]
    fn test_deferred_hover_reveals_after_settle() {
        let mut viewport = MemoryViewport::new(VH);
        let mut link = link_with_row(RowBox::new(900.0, 1150.0));
        link.on_hover("glass", 0.0, &viewport);
        assert_eq!(link.on_hover("dunes", 20.0, &viewport), FilterDecision::Deferred);
        assert!(!link.is_scrolling());

        link.tick(130.0, &mut viewport);
        assert!(link.is_scrolling());
    }

    #[test]
    fn test_suspend_drops_buffered_target() {
        let mut viewport = MemoryViewport::new(VH);
        let mut link = link_with_row(RowBox::new(900.0, 1150.0));
        link.on_hover("glass", 0.0, &viewport);
        link.on_hover("dunes", 20.0, &viewport);

        link.suspend();
        link.tick(500.0, &mut viewport);
        assert!(!link.is_scrolling());
        assert!(viewport.writes().is_empty());
    }
}
