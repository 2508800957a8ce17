//! Transition phases

use serde::{Deserialize, Serialize};

/// Who animates the grid back to its landing offset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridReturnDriver {
    /// Scroll and padding stepped together from the frame loop
    Script,
    /// Viewport already at the anchor; padding is written once and the
    /// presentation layer's CSS transition animates it
    Css,
}

/// One state of the transition state machine
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Grid only, at rest
    #[default]
    Idle,
    /// New content mounted invisibly for one frame
    Entering,
    ScrollingToPeek,
    GridAnimating,
    /// One paint frame so the fade-out transition applies
    GalleryPreparingFadeOut,
    GalleryFadingOut,
    GridReturning(GridReturnDriver),
    GalleryFadingIn,
    /// Detail surface shown, opacity tracks scroll
    Ready,
}

impl Phase {
    /// Resting phases accept new selection requests
    pub fn is_resting(self) -> bool {
        matches!(self, Phase::Idle | Phase::Ready)
    }

    /// Stable name for logs and the browser facade
    pub fn name(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Entering => "entering",
            Phase::ScrollingToPeek => "scrolling-to-peek",
            Phase::GridAnimating => "grid-animating",
            Phase::GalleryPreparingFadeOut => "gallery-preparing-fade-out",
            Phase::GalleryFadingOut => "gallery-fading-out",
            Phase::GridReturning(GridReturnDriver::Script) => "grid-returning-js",
            Phase::GridReturning(GridReturnDriver::Css) => "grid-returning-css",
            Phase::GalleryFadingIn => "gallery-fading-in",
            Phase::Ready => "ready",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_idle_and_ready_rest() {
        let scripted = [
            Phase::Entering,
            Phase::ScrollingToPeek,
            Phase::GridAnimating,
            Phase::GalleryPreparingFadeOut,
            Phase::GalleryFadingOut,
            Phase::GridReturning(GridReturnDriver::Script),
            Phase::GridReturning(GridReturnDriver::Css),
            Phase::GalleryFadingIn,
        ];
        assert!(Phase::Idle.is_resting());
        assert!(Phase::Ready.is_resting());
        assert!(scripted.iter().all(|p| !p.is_resting()));
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(Phase::GalleryPreparingFadeOut.to_string(), "gallery-preparing-fade-out");
        assert_eq!(
            Phase::GridReturning(GridReturnDriver::Css).name(),
            "grid-returning-css"
        );
    }
}
