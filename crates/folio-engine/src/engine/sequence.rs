//! Phase sequences as data
//!
//! Every scripted transition is an ordered list of [`Step`]s built by one
//! of the planners below and executed by the engine's generic runner. Each
//! step fully completes before the next begins; the phase order is plain
//! data that tests can inspect without running a frame loop.

use crate::config::TimingConfig;
use crate::content::Target;
use crate::layout::GridGeometry;

use super::phase::{GridReturnDriver, Phase};

/// How long a step lasts
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepDuration {
    /// Until the next frame after the one it started in
    Frame,
    Millis(f32),
}

/// Scroll/padding work done during a step
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    Still,
    /// Script-driven scroll; padding untouched
    Scroll { to: f32 },
    /// Scroll and padding on one eased progress
    Synced { scroll_to: f32, padding_to: f32 },
    /// Padding written once at step start; CSS animates it
    CssPadding { to: f32 },
}

impl Motion {
    /// Whether the step moves the viewport from script
    pub fn drives_scroll(&self) -> bool {
        matches!(self, Motion::Scroll { .. } | Motion::Synced { .. })
    }
}

/// Opacity a fade step lands on
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FadeTarget {
    Hidden,
    Visible,
    /// Whatever the overlap gate derives from the current scroll
    ScrollDerived,
}

/// Side effect performed when a step starts or a sequence finishes
#[derive(Clone, Debug, PartialEq)]
pub enum StepAction {
    /// Swap the detail surface to `target` (invisible until faded in)
    Mount(Target),
    /// Remove the detail surface
    Unmount,
    /// Write the query parameter
    CommitUrl(Option<Target>),
}

/// One `(phase, duration, side effect)` entry
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub phase: Phase,
    pub duration: StepDuration,
    pub motion: Motion,
    pub fade: Option<FadeTarget>,
    pub on_enter: Vec<StepAction>,
}

impl Step {
    fn new(phase: Phase, duration: StepDuration) -> Self {
        Self {
            phase,
            duration,
            motion: Motion::Still,
            fade: None,
            on_enter: Vec::new(),
        }
    }

    fn motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }

    fn fade(mut self, target: FadeTarget) -> Self {
        self.fade = Some(target);
        self
    }

    fn on_enter(mut self, action: StepAction) -> Self {
        self.on_enter.push(action);
        self
    }
}

/// Ordered steps plus what happens after the last one
#[derive(Clone, Debug, PartialEq)]
pub struct Sequence {
    pub steps: Vec<Step>,
    pub on_finish: Vec<StepAction>,
    /// Resting phase the sequence ends in
    pub end: Phase,
}

impl Sequence {
    /// Phases in execution order, ending with the resting phase
    pub fn phases(&self) -> Vec<Phase> {
        self.steps
            .iter()
            .map(|s| s.phase)
            .chain(std::iter::once(self.end))
            .collect()
    }

    /// Total scripted time, counting frame steps as zero
    pub fn duration_ms(&self) -> f32 {
        self.steps
            .iter()
            .map(|s| match s.duration {
                StepDuration::Frame => 0.0,
                StepDuration::Millis(ms) => ms,
            })
            .sum()
    }
}

/// Inputs captured when a sequence is planned
///
/// Targets are resolved here, so re-measuring the grid mid-flight does not
/// move them.
#[derive(Clone, Copy, Debug)]
pub struct PlanContext<'a> {
    pub timing: &'a TimingConfig,
    pub scroll_y: f32,
    /// Scroll offset the detail view rests at
    pub anchor: f32,
    pub anchor_tolerance: f32,
    /// Write the URL when the sequence finishes
    pub commit_url: bool,
}

impl PlanContext<'_> {
    fn drifted(&self) -> bool {
        (self.scroll_y - self.anchor).abs() > self.anchor_tolerance
    }

    fn commit(&self, param: Option<Target>) -> Vec<StepAction> {
        if self.commit_url {
            vec![StepAction::CommitUrl(param)]
        } else {
            Vec::new()
        }
    }
}

/// Select from the grid-only resting state
pub fn enter(target: &Target, geometry: &GridGeometry, ctx: &PlanContext<'_>) -> Sequence {
    let t = ctx.timing;
    Sequence {
        steps: vec![
            Step::new(Phase::Entering, StepDuration::Frame)
                .on_enter(StepAction::Mount(target.clone())),
            Step::new(Phase::GridAnimating, StepDuration::Millis(t.grid_animation_ms)).motion(
                Motion::Synced {
                    scroll_to: ctx.anchor,
                    padding_to: geometry.peek_padding,
                },
            ),
            Step::new(Phase::GalleryFadingIn, StepDuration::Millis(t.fade_ms))
                .fade(FadeTarget::ScrollDerived),
        ],
        on_finish: ctx.commit(Some(target.clone())),
        end: Phase::Ready,
    }
}

/// Select a different target while one is displayed
///
/// The grid is already at peek padding, so only the viewport is brought
/// back to the anchor, and only if it drifted.
pub fn switch(target: &Target, ctx: &PlanContext<'_>) -> Sequence {
    let t = ctx.timing;
    let mount = StepAction::Mount(target.clone());
    let mut steps = vec![Step::new(Phase::GalleryFadingOut, StepDuration::Millis(t.fade_ms))
        .fade(FadeTarget::Hidden)];

    let fade_in = Step::new(Phase::GalleryFadingIn, StepDuration::Millis(t.fade_ms))
        .fade(FadeTarget::ScrollDerived);
    if ctx.drifted() {
        steps.push(
            Step::new(Phase::ScrollingToPeek, StepDuration::Millis(t.scroll_to_anchor_ms))
                .motion(Motion::Scroll { to: ctx.anchor })
                .on_enter(mount),
        );
        steps.push(fade_in);
    } else {
        steps.push(fade_in.on_enter(mount));
    }

    Sequence {
        steps,
        on_finish: ctx.commit(Some(target.clone())),
        end: Phase::Ready,
    }
}

/// Re-select the displayed target: scroll back to the anchor if drifted
pub fn rescroll(ctx: &PlanContext<'_>) -> Option<Sequence> {
    if !ctx.drifted() {
        return None;
    }
    Some(Sequence {
        steps: vec![Step::new(
            Phase::ScrollingToPeek,
            StepDuration::Millis(ctx.timing.scroll_to_anchor_ms),
        )
        .motion(Motion::Scroll { to: ctx.anchor })
        .fade(FadeTarget::Visible)],
        on_finish: Vec::new(),
        end: Phase::Ready,
    })
}

/// Close the detail view and return the grid to landing geometry
///
/// When the viewport is already at the top only the padding moves, and
/// the presentation layer's CSS transition drives it.
pub fn close(geometry: &GridGeometry, ctx: &PlanContext<'_>) -> Sequence {
    let t = ctx.timing;
    let (driver, motion) = if ctx.scroll_y.abs() > ctx.anchor_tolerance {
        (
            GridReturnDriver::Script,
            Motion::Synced {
                scroll_to: 0.0,
                padding_to: geometry.landing_padding,
            },
        )
    } else {
        (
            GridReturnDriver::Css,
            Motion::CssPadding {
                to: geometry.landing_padding,
            },
        )
    };

    Sequence {
        steps: vec![
            Step::new(Phase::GalleryPreparingFadeOut, StepDuration::Frame),
            Step::new(Phase::GalleryFadingOut, StepDuration::Millis(t.fade_ms))
                .fade(FadeTarget::Hidden),
            Step::new(
                Phase::GridReturning(driver),
                StepDuration::Millis(t.grid_animation_ms),
            )
            .motion(motion)
            .on_enter(StepAction::Unmount),
        ],
        on_finish: ctx.commit(None),
        end: Phase::Idle,
    }
}

/// `close()` with nothing displayed: scroll to the top if scrolled
pub fn scroll_to_top(ctx: &PlanContext<'_>) -> Option<Sequence> {
    if ctx.scroll_y.abs() <= ctx.anchor_tolerance {
        return None;
    }
    Some(Sequence {
        steps: vec![Step::new(
            Phase::GridReturning(GridReturnDriver::Script),
            StepDuration::Millis(ctx.timing.grid_animation_ms),
        )
        .motion(Motion::Scroll { to: 0.0 })],
        on_finish: Vec::new(),
        end: Phase::Idle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> GridGeometry {
        GridGeometry {
            landing_padding: 260.0,
            peek_padding: 704.0,
            row_height: 294.0,
            overlap_threshold: 640.0,
            viewport_height: 800.0,
        }
    }

    fn ctx(timing: &TimingConfig, scroll_y: f32, commit_url: bool) -> PlanContext<'_> {
        PlanContext {
            timing,
            scroll_y,
            anchor: 0.0,
            anchor_tolerance: 1.0,
            commit_url,
        }
    }

    #[test]
    fn test_enter_sequence_order() {
        let timing = TimingConfig::default();
        let target = Target::parse("harbour");
        let seq = enter(&target, &geometry(), &ctx(&timing, 300.0, true));
        assert_eq!(
            seq.phases(),
            vec![
                Phase::Entering,
                Phase::GridAnimating,
                Phase::GalleryFadingIn,
                Phase::Ready
            ]
        );
        assert_eq!(seq.duration_ms(), 1100.0);
        assert_eq!(
            seq.steps[1].motion,
            Motion::Synced {
                scroll_to: 0.0,
                padding_to: 704.0
            }
        );
        assert_eq!(seq.on_finish, vec![StepAction::CommitUrl(Some(target))]);
    }

    #[test]
    fn test_url_origin_does_not_commit() {
        let timing = TimingConfig::default();
        let seq = enter(&Target::Information, &geometry(), &ctx(&timing, 0.0, false));
        assert!(seq.on_finish.is_empty());
    }

    #[test]
    fn test_switch_skips_scroll_at_anchor() {
        let timing = TimingConfig::default();
        let target = Target::parse("dunes");
        let seq = switch(&target, &ctx(&timing, 0.0, true));
        assert_eq!(
            seq.phases(),
            vec![Phase::GalleryFadingOut, Phase::GalleryFadingIn, Phase::Ready]
        );
        assert_eq!(seq.steps[1].on_enter, vec![StepAction::Mount(target)]);
    }

    #[test]
    fn test_switch_scrolls_when_drifted() {
        let timing = TimingConfig::default();
        let seq = switch(&Target::parse("dunes"), &ctx(&timing, 420.0, true));
        assert_eq!(
            seq.phases(),
            vec![
                Phase::GalleryFadingOut,
                Phase::ScrollingToPeek,
                Phase::GalleryFadingIn,
                Phase::Ready
            ]
        );
        // Content swaps while hidden, before the scroll
        assert_eq!(seq.steps[1].on_enter.len(), 1);
        assert!(seq.steps[2].on_enter.is_empty());
    }

    #[test]
    fn test_rescroll_only_when_drifted() {
        let timing = TimingConfig::default();
        assert!(rescroll(&ctx(&timing, 0.5, true)).is_none());
        let seq = rescroll(&ctx(&timing, 300.0, true)).unwrap();
        assert_eq!(seq.phases(), vec![Phase::ScrollingToPeek, Phase::Ready]);
        assert!(seq.on_finish.is_empty());
    }

    #[test]
    fn test_close_picks_driver() {
        let timing = TimingConfig::default();
        let scripted = close(&geometry(), &ctx(&timing, 350.0, true));
        assert_eq!(
            scripted.phases(),
            vec![
                Phase::GalleryPreparingFadeOut,
                Phase::GalleryFadingOut,
                Phase::GridReturning(GridReturnDriver::Script),
                Phase::Idle
            ]
        );
        assert_eq!(scripted.steps[0].duration, StepDuration::Frame);

        let css = close(&geometry(), &ctx(&timing, 0.0, true));
        assert_eq!(css.steps[2].phase, Phase::GridReturning(GridReturnDriver::Css));
        assert_eq!(css.steps[2].motion, Motion::CssPadding { to: 260.0 });
        assert_eq!(css.on_finish, vec![StepAction::CommitUrl(None)]);
    }

    #[test]
    fn test_scroll_to_top_from_idle() {
        let timing = TimingConfig::default();
        assert!(scroll_to_top(&ctx(&timing, 0.0, true)).is_none());
        let seq = scroll_to_top(&ctx(&timing, 500.0, true)).unwrap();
        assert_eq!(
            seq.phases(),
            vec![Phase::GridReturning(GridReturnDriver::Script), Phase::Idle]
        );
        assert_eq!(seq.steps[0].motion, Motion::Scroll { to: 0.0 });
    }
}
