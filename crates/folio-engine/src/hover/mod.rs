//! Hover coordination between the sidebar and the grid
//!
//! Both panels report pointer-enter/leave here; whichever wrote last wins.
//! The engine locks the coordinator around its own script-driven scrolls so
//! the grid sweeping under a resting pointer does not re-trigger hover.
//!
//! # Row reveal
//!
//! Sidebar hovers additionally flow through [`RowRevealLink`], which
//! filters oscillation noise and scrolls the grid to keep the hovered row
//! visible.

mod oscillation;
mod reveal;

pub use oscillation::{FilterDecision, OscillationFilter};
pub use reveal::{reveal_target, RowBox, RowLocator, RowRevealLink};

use serde::{Deserialize, Serialize};

use crate::content::Selection;

/// Opacity applied to muted sidebar entries
pub const MUTED_OPACITY: f32 = 0.3;

/// Detail opacity above which a selection counts as visible
const VISIBLE_SELECTION_OPACITY: f32 = 0.5;

/// Which panel produced a highlight
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverSource {
    /// Grid tile
    Primary,
    /// Sidebar entry
    Secondary,
}

/// Snapshot of the hover coordinator
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoverState {
    pub highlighted_id: Option<String>,
    pub source: Option<HoverSource>,
    pub locked: bool,
}

/// Last-write-wins highlight owner
#[derive(Clone, Debug, Default)]
pub struct HoverCoordinator {
    state: HoverState,
}

impl HoverCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &HoverState {
        &self.state
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.state.highlighted_id.as_deref()
    }

    pub fn is_locked(&self) -> bool {
        self.state.locked
    }

    /// Highlight `id`; ignored while locked
    ///
    /// Returns `true` if the visible highlight changed.
    pub fn set_highlight(&mut self, id: &str, source: HoverSource) -> bool {
        if self.state.locked {
            return false;
        }
        let changed = self.state.highlighted_id.as_deref() != Some(id);
        self.state.highlighted_id = Some(id.to_string());
        self.state.source = Some(source);
        changed
    }

    /// Drop the highlight (pointer left)
    pub fn clear(&mut self) -> bool {
        let changed = self.state.highlighted_id.is_some();
        self.state.highlighted_id = None;
        self.state.source = None;
        changed
    }

    /// Clear and suppress further highlights
    pub fn lock(&mut self) -> bool {
        self.state.locked = true;
        self.clear()
    }

    pub fn unlock(&mut self) {
        self.state.locked = false;
    }
}

/// Whether a sidebar entry renders muted
///
/// Any hover, or a selection whose detail surface is still mostly visible,
/// mutes every entry except the highlighted one. While hovering, the
/// hovered entry is the highlighted one; otherwise the selected project is.
pub fn mutes(entry_slug: &str, hover: &HoverState, selection: &Selection, detail_opacity: f32) -> bool {
    let hovering = hover.highlighted_id.is_some();
    let showing = selection.slug().is_some() && detail_opacity > VISIBLE_SELECTION_OPACITY;
    if !(hovering || showing) {
        return false;
    }
    let highlighted = if hovering {
        hover.highlighted_id.as_deref() == Some(entry_slug)
    } else {
        selection.slug() == Some(entry_slug)
    };
    !highlighted
}
