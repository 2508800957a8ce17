//! Generic sequence runner
//!
//! Executes a [`Sequence`] one step at a time from the frame loop. A step
//! completes on the first tick at or past its duration (frame steps: the
//! first tick after the frame they started in); on completion its exact
//! final values are written and the next step starts at the same `now`.

use std::collections::VecDeque;

use tracing::debug;

use super::sequence::{FadeTarget, Motion, Sequence, Step, StepAction, StepDuration};
use super::{EngineEvent, Phase, QueryParamLayer, TransitionEngine};
use crate::cache::ContentStore;
use crate::transition::{Fade, SyncedTween, Tween};
use crate::viewport::ScrollSurface;

/// Sequence in flight
pub(super) struct RunningSequence {
    active: ActiveStep,
    remaining: VecDeque<Step>,
    on_finish: Vec<StepAction>,
    end: Phase,
}

struct ActiveStep {
    duration: StepDuration,
    started_ms: f64,
    started_frame: u64,
    motion: LiveMotion,
    fade: Option<Fade>,
}

enum LiveMotion {
    Still,
    Scroll(Tween),
    Synced(SyncedTween),
}

impl ActiveStep {
    fn is_done(&self, now_ms: f64, frame: u64) -> bool {
        match self.duration {
            StepDuration::Frame => frame > self.started_frame,
            StepDuration::Millis(ms) => now_ms - self.started_ms >= f64::from(ms),
        }
    }

    /// Write this frame's values; exact targets once `done`
    fn apply(
        &self,
        now_ms: f64,
        done: bool,
        surface: &mut dyn ScrollSurface,
        padding: &mut f32,
        opacity: &mut f32,
    ) {
        match &self.motion {
            LiveMotion::Still => {}
            LiveMotion::Scroll(tween) => {
                surface.scroll_to(if done { tween.to } else { tween.sample(now_ms) });
            }
            LiveMotion::Synced(synced) => {
                let frame = if done {
                    synced.final_frame()
                } else {
                    synced.sample(now_ms)
                };
                surface.scroll_to(frame.scroll);
                *padding = frame.padding;
            }
        }
        if let Some(fade) = &self.fade {
            *opacity = if done { fade.target() } else { fade.opacity(now_ms) };
        }
    }
}

fn millis(duration: StepDuration) -> f32 {
    match duration {
        StepDuration::Frame => 0.0,
        StepDuration::Millis(ms) => ms,
    }
}

impl<S: ContentStore, Q: QueryParamLayer> TransitionEngine<S, Q> {
    pub(super) fn start_sequence(&mut self, sequence: Sequence, now_ms: f64, surface: &mut dyn ScrollSurface) {
        debug!(phases = ?sequence.phases(), "sequence started");
        if self.gate.hold() {
            self.events.push(EngineEvent::OverlapChanged {
                overlap: false,
                opacity: 1.0,
            });
        }

        let mut remaining: VecDeque<Step> = sequence.steps.into();
        let Some(first) = remaining.pop_front() else {
            self.finish(sequence.on_finish, sequence.end);
            return;
        };
        let active = self.enter_step(first, now_ms, surface);
        self.running = Some(RunningSequence {
            active,
            remaining,
            on_finish: sequence.on_finish,
            end: sequence.end,
        });
    }

    /// Step the running sequence; completed steps hand over within the frame
    pub(super) fn advance(&mut self, now_ms: f64, surface: &mut dyn ScrollSurface) {
        loop {
            let frame = self.frame;
            let Some(running) = self.running.as_mut() else {
                return;
            };
            let done = running.active.is_done(now_ms, frame);
            running
                .active
                .apply(now_ms, done, surface, &mut self.padding, &mut self.detail_opacity);
            if !done {
                return;
            }

            match running.remaining.pop_front() {
                Some(step) => {
                    let active = self.enter_step(step, now_ms, surface);
                    if let Some(running) = self.running.as_mut() {
                        running.active = active;
                    }
                }
                None => {
                    if let Some(finished) = self.running.take() {
                        self.finish(finished.on_finish, finished.end);
                    }
                    return;
                }
            }
        }
    }

    fn enter_step(&mut self, step: Step, now_ms: f64, surface: &dyn ScrollSurface) -> ActiveStep {
        self.set_phase(step.phase);
        for action in step.on_enter {
            self.perform(action);
        }
        if step.motion.drives_scroll() {
            self.lock_hover();
        }

        let duration_ms = millis(step.duration);
        let easing = self.config.timing.grid_easing;
        let motion = match step.motion {
            Motion::Still => LiveMotion::Still,
            Motion::Scroll { to } => {
                LiveMotion::Scroll(Tween::new(surface.scroll_y(), to, now_ms, duration_ms, easing))
            }
            Motion::Synced {
                scroll_to,
                padding_to,
            } => LiveMotion::Synced(SyncedTween {
                scroll_from: surface.scroll_y(),
                scroll_to,
                padding_from: self.padding,
                padding_to,
                start_ms: now_ms,
                duration_ms,
                easing,
            }),
            Motion::CssPadding { to } => {
                self.padding = to;
                LiveMotion::Still
            }
        };
        let fade = step.fade.map(|target| {
            Fade::new(
                self.detail_opacity,
                self.fade_target(target),
                now_ms,
                duration_ms,
                self.config.timing.fade_easing,
            )
        });

        ActiveStep {
            duration: step.duration,
            started_ms: now_ms,
            started_frame: self.frame,
            motion,
            fade,
        }
    }

    fn fade_target(&self, target: FadeTarget) -> f32 {
        match target {
            FadeTarget::Hidden => 0.0,
            FadeTarget::Visible => 1.0,
            FadeTarget::ScrollDerived => match (self.grid_top, self.geometry) {
                (Some(grid_top), Some(geometry)) => self.gate.peek(grid_top, &geometry).opacity,
                _ => 1.0,
            },
        }
    }

    fn perform(&mut self, action: StepAction) {
        match action {
            StepAction::Mount(target) => self.mount(target),
            StepAction::Unmount => self.unmount(),
            StepAction::CommitUrl(param) => self.write_url(param),
        }
    }

    fn finish(&mut self, on_finish: Vec<StepAction>, end: Phase) {
        for action in on_finish {
            self.perform(action);
        }
        self.set_phase(end);
        self.hover.unlock();
        if end == Phase::Ready {
            self.refresh_gate();
        }
        debug!(phase = %end, "sequence finished");
    }
}
