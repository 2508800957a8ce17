//! Oscillation filter for sidebar-driven grid scrolling
//!
//! A pointer resting on the boundary between two sidebar entries re-fires
//! enter events on every micro-movement. Fast events are buffered and only
//! committed after a settle delay; a strict `A, B, A` flicker inside the
//! fast window is dropped outright.

use std::collections::VecDeque;

use crate::config::HoverConfig;

/// Outcome of feeding one hover event through the filter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterDecision {
    /// Act on the event now
    Commit,
    /// Buffered; [`OscillationFilter::poll`] commits it once settled
    Deferred,
    /// Flicker pattern, discarded
    Dropped,
    /// Same target as the last commit
    Unchanged,
}

#[derive(Clone, Debug)]
struct Pending {
    id: String,
    deadline_ms: f64,
}

/// Rate filter over a stream of `(id, now)` hover events
#[derive(Clone, Debug)]
pub struct OscillationFilter {
    fast_threshold_ms: f64,
    settle_delay_ms: f64,
    /// Last three raw events, dropped ones included
    history: VecDeque<(String, f64)>,
    committed: Option<String>,
    pending: Option<Pending>,
}

impl OscillationFilter {
    pub fn new(config: &HoverConfig) -> Self {
        Self {
            fast_threshold_ms: config.fast_threshold_ms,
            settle_delay_ms: config.settle_delay_ms,
            history: VecDeque::with_capacity(3),
            committed: None,
            pending: None,
        }
    }

    /// Feed one hover event
    pub fn on_event(&mut self, id: &str, now_ms: f64) -> FilterDecision {
        let previous_ms = self.history.back().map(|(_, t)| *t);
        if self.history.len() == 3 {
            self.history.pop_front();
        }
        self.history.push_back((id.to_string(), now_ms));

        if self.is_flicker() {
            // The pointer is back on `id`; whatever was buffered is stale
            self.pending = if self.committed.as_deref() == Some(id) {
                None
            } else {
                Some(Pending {
                    id: id.to_string(),
                    deadline_ms: now_ms + self.settle_delay_ms,
                })
            };
            return FilterDecision::Dropped;
        }

        if self.committed.as_deref() == Some(id) {
            self.pending = None;
            return FilterDecision::Unchanged;
        }

        let fast = previous_ms.is_some_and(|t| now_ms - t < self.fast_threshold_ms);
        if fast {
            self.pending = Some(Pending {
                id: id.to_string(),
                deadline_ms: now_ms + self.settle_delay_ms,
            });
            FilterDecision::Deferred
        } else {
            self.committed = Some(id.to_string());
            self.pending = None;
            FilterDecision::Commit
        }
    }

    /// Commit the buffered target once its settle delay has elapsed
    pub fn poll(&mut self, now_ms: f64) -> Option<String> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|p| now_ms >= p.deadline_ms);
        if !due {
            return None;
        }
        let pending = self.pending.take()?;
        self.committed = Some(pending.id.clone());
        Some(pending.id)
    }

    /// Target currently buffered, if any
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.id.as_str())
    }

    /// Last committed target
    pub fn committed(&self) -> Option<&str> {
        self.committed.as_deref()
    }

    /// Drop the buffered target, keeping history and the last commit
    pub fn clear_pending(&mut self) {
        self.pending = None;
    }

    /// Forget everything (pointer left the sidebar)
    pub fn reset(&mut self) {
        self.history.clear();
        self.committed = None;
        self.pending = None;
    }

    // Three consecutive events alternating between exactly two targets,
    // both gaps inside the fast window.
    fn is_flicker(&self) -> bool {
        if self.history.len() < 3 {
            return false;
        }
        let (a, t0) = &self.history[0];
        let (b, t1) = &self.history[1];
        let (c, t2) = &self.history[2];
        a == c
            && a != b
            && t1 - t0 < self.fast_threshold_ms
            && t2 - t1 < self.fast_threshold_ms
    }
}
