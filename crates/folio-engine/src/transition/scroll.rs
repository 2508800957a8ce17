//! Cancellable frame-stepped scroll animation
//!
//! Used for the hover-driven row reveal, where a newer hover supersedes an
//! in-flight scroll. Cancelling stops the loop where it is: there is no
//! final jump to the old target.

use std::cell::Cell;
use std::rc::Rc;

use super::easing::Easing;
use super::tween::Tween;
use crate::viewport::ScrollSurface;

/// Completion state of a [`CancellableScroll`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollStatus {
    /// Still animating; call `step` again next frame
    Running,
    /// Reached the target
    Finished,
    /// Stopped by its [`CancelHandle`]
    Cancelled,
}

impl ScrollStatus {
    /// Whether the animation has resolved (finished or cancelled)
    pub fn is_settled(self) -> bool {
        !matches!(self, ScrollStatus::Running)
    }
}

/// Handle that stops a [`CancellableScroll`]
///
/// Single-threaded: the engine lives on the UI thread.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    cancelled: Rc<Cell<bool>>,
}

impl CancelHandle {
    /// Request cancellation; the scroll resolves on its next step
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Returns `true` if cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Eased scroll toward a target, advanced once per frame
#[derive(Debug)]
pub struct CancellableScroll {
    tween: Tween,
    cancel: CancelHandle,
    status: ScrollStatus,
}

impl CancellableScroll {
    /// Start a scroll from `from` to `to` at `now_ms`
    ///
    /// A zero-distance scroll is finished immediately.
    pub fn new(from: f32, to: f32, now_ms: f64, duration_ms: f32, easing: Easing) -> Self {
        let tween = Tween::new(from, to, now_ms, duration_ms, easing);
        let status = if tween.distance() < f32::EPSILON {
            ScrollStatus::Finished
        } else {
            ScrollStatus::Running
        };
        Self {
            tween,
            cancel: CancelHandle::default(),
            status,
        }
    }

    /// Handle that can cancel this scroll from elsewhere
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Cancel directly
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Target offset
    pub fn target(&self) -> f32 {
        self.tween.to
    }

    /// Current status without advancing
    pub fn status(&self) -> ScrollStatus {
        self.status
    }

    /// Advance one frame, writing the interpolated offset to `surface`
    pub fn step(&mut self, now_ms: f64, surface: &mut dyn ScrollSurface) -> ScrollStatus {
        if self.status.is_settled() {
            return self.status;
        }
        if self.cancel.is_cancelled() {
            self.status = ScrollStatus::Cancelled;
            return self.status;
        }

        surface.scroll_to(self.tween.sample(now_ms));
        if self.tween.is_complete(now_ms) {
            self.status = ScrollStatus::Finished;
        }
        self.status
    }
}
