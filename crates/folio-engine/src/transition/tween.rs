//! Time-driven interpolation primitives
//!
//! Tweens hold their own start time and are sampled with the frame
//! timestamp, so a caller never accumulates deltas and a dropped frame
//! cannot drift an animation.

use super::easing::Easing;

/// Linear interpolation between two scalars
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Progress (0.0 to 1.0) of an animation started at `start_ms`
#[inline]
pub fn progress(start_ms: f64, duration_ms: f32, now_ms: f64) -> f32 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    let elapsed = (now_ms - start_ms) as f32;
    (elapsed / duration_ms).clamp(0.0, 1.0)
}

/// A single eased scalar animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    /// Start time (ms)
    pub start_ms: f64,
    /// Duration (ms)
    pub duration_ms: f32,
    pub easing: Easing,
}

impl Tween {
    /// Create a new tween
    pub fn new(from: f32, to: f32, start_ms: f64, duration_ms: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
            easing,
        }
    }

    /// Get progress (0.0 to 1.0)
    pub fn progress(&self, now_ms: f64) -> f32 {
        progress(self.start_ms, self.duration_ms, now_ms)
    }

    /// Check if the tween is complete
    pub fn is_complete(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// Interpolated value at `now_ms`; exactly `to` once complete
    pub fn sample(&self, now_ms: f64) -> f32 {
        let p = self.progress(now_ms);
        if p >= 1.0 {
            return self.to;
        }
        lerp(self.from, self.to, self.easing.apply(p))
    }

    /// Distance covered by the whole tween
    pub fn distance(&self) -> f32 {
        (self.to - self.from).abs()
    }
}

/// Scroll position and grid padding advanced on one shared curve
///
/// Both values read the same eased progress on every frame so they finish
/// in the same frame. Separate tweens with equal parameters would still
/// diverge if they were started on different frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SyncedTween {
    pub scroll_from: f32,
    pub scroll_to: f32,
    pub padding_from: f32,
    pub padding_to: f32,
    pub start_ms: f64,
    pub duration_ms: f32,
    pub easing: Easing,
}

/// One frame of a [`SyncedTween`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SyncedFrame {
    pub scroll: f32,
    pub padding: f32,
}

impl SyncedTween {
    /// Get progress (0.0 to 1.0)
    pub fn progress(&self, now_ms: f64) -> f32 {
        progress(self.start_ms, self.duration_ms, now_ms)
    }

    /// Check if animation is complete
    pub fn is_complete(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// Interpolated scroll and padding at `now_ms`
    pub fn sample(&self, now_ms: f64) -> SyncedFrame {
        let p = self.progress(now_ms);
        if p >= 1.0 {
            return self.final_frame();
        }
        let eased = self.easing.apply(p);
        SyncedFrame {
            scroll: lerp(self.scroll_from, self.scroll_to, eased),
            padding: lerp(self.padding_from, self.padding_to, eased),
        }
    }

    /// Values once the animation has landed
    pub fn final_frame(&self) -> SyncedFrame {
        SyncedFrame {
            scroll: self.scroll_to,
            padding: self.padding_to,
        }
    }
}

/// Opacity fade of the detail surface
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fade {
    tween: Tween,
}

impl Fade {
    /// Fade from the current opacity to `to`
    pub fn new(from: f32, to: f32, start_ms: f64, duration_ms: f32, easing: Easing) -> Self {
        Self {
            tween: Tween::new(from.clamp(0.0, 1.0), to.clamp(0.0, 1.0), start_ms, duration_ms, easing),
        }
    }

    /// Opacity at `now_ms`
    pub fn opacity(&self, now_ms: f64) -> f32 {
        self.tween.sample(now_ms)
    }

    /// Check if the fade is complete
    pub fn is_complete(&self, now_ms: f64) -> bool {
        self.tween.is_complete(now_ms)
    }

    /// Opacity once the fade has landed
    pub fn target(&self) -> f32 {
        self.tween.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_endpoints() {
        let tween = Tween::new(400.0, 0.0, 100.0, 800.0, Easing::EaseInOut);
        assert_eq!(tween.sample(100.0), 400.0);
        assert_eq!(tween.sample(900.0), 0.0);
        assert_eq!(tween.sample(5000.0), 0.0);
        assert!((tween.sample(500.0) - 200.0).abs() < 0.01);
        assert!(!tween.is_complete(899.0));
        assert!(tween.is_complete(900.0));
    }

    #[test]
    fn test_tween_before_start_holds_from() {
        let tween = Tween::new(10.0, 20.0, 100.0, 100.0, Easing::Linear);
        assert_eq!(tween.sample(50.0), 10.0);
    }

    #[test]
    fn test_zero_duration_is_immediately_complete() {
        let tween = Tween::new(10.0, 20.0, 0.0, 0.0, Easing::Linear);
        assert!(tween.is_complete(0.0));
        assert_eq!(tween.sample(0.0), 20.0);
    }

    #[test]
    fn test_synced_tween_shares_progress() {
        let tween = SyncedTween {
            scroll_from: 600.0,
            scroll_to: 0.0,
            padding_from: 300.0,
            padding_to: 700.0,
            start_ms: 0.0,
            duration_ms: 800.0,
            easing: Easing::EaseInOut,
        };
        for step in 0..=50 {
            let now = step as f64 * 16.0;
            let frame = tween.sample(now);
            let scroll_t = (600.0 - frame.scroll) / 600.0;
            let padding_t = (frame.padding - 300.0) / 400.0;
            assert!((scroll_t - padding_t).abs() < 1e-4, "diverged at {}ms", now);
        }
        assert_eq!(tween.sample(800.0), tween.final_frame());
    }

    #[test]
    fn test_fade_clamps_opacity() {
        let fade = Fade::new(1.4, -0.2, 0.0, 300.0, Easing::Linear);
        assert_eq!(fade.opacity(0.0), 1.0);
        assert_eq!(fade.target(), 0.0);
        assert!((fade.opacity(150.0) - 0.5).abs() < 0.001);
        assert!(fade.is_complete(300.0));
    }
}
