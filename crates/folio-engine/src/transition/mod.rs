//! Animation and transition primitives
//!
//! - [`easing`]: closed-form time -> progress curves
//! - [`Tween`] / [`SyncedTween`] / [`Fade`]: timestamp-sampled interpolation
//! - [`CancellableScroll`]: frame-stepped scroll that a newer request can stop

pub mod easing;
mod scroll;
mod tween;

pub use easing::Easing;
pub use scroll::{CancelHandle, CancellableScroll, ScrollStatus};
pub use tween::{lerp, progress, Fade, SyncedFrame, SyncedTween, Tween};
