//! Engine outputs for the presentation layer

use serde::{Deserialize, Serialize};

use crate::content::{Selection, Target};

use super::phase::Phase;

/// Outcome of a `select`/`close` call
///
/// None of these are errors: dropped and deferred requests are expected
/// under fast input and before first paint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Request {
    /// A full phase sequence started
    Started,
    /// Same target re-selected: scrolling back to the anchor
    ScrollOnly,
    /// Nothing to do
    NoOp,
    /// Another transition is in flight
    Dropped,
    /// Waiting for grid geometry; starts on the first tick after it arrives
    Deferred,
    /// Content could not be resolved; state untouched
    Failed,
}

/// What a dropped request asked for
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestKind {
    Select(Target),
    Close,
}

/// Presentation-facing notifications, drained once per frame
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    PhaseChanged { from: Phase, to: Phase },
    SelectionChanged(Selection),
    UrlWritten(Option<Target>),
    RequestDropped(RequestKind),
    HighlightChanged(Option<String>),
    /// Change-guarded overlap/opacity update
    OverlapChanged { overlap: bool, opacity: f32 },
}
