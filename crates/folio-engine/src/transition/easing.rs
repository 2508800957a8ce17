//! Easing functions for animations
//!
//! Every curve is closed form (or a bounded solve) so scroll position and
//! padding can be advanced from the same frame loop without a CSS engine.

use serde::{Deserialize, Serialize};

/// Ease-in-out cubic function
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Ease-out cubic function
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Ease-in cubic function
#[inline]
pub fn ease_in_cubic(t: f32) -> f32 {
    t * t * t
}

/// Linear interpolation (no easing)
#[inline]
pub fn linear(t: f32) -> f32 {
    t
}

/// Exponential ease-in with a quartic landing
///
/// Slow start, fast middle, firm settle.
pub fn expo_quart(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else if t < 0.5 {
        2f32.powf(16.0 * t - 8.0) / 2.0
    } else {
        1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
    }
}

/// Ease-out quartic: starts immediately, decelerates smoothly
///
/// Suited to taking over from a user-initiated scroll.
#[inline]
pub fn snap_ease(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(4)
}

/// `cubic-bezier(0.4, 0, 0.2, 1)`, the Material standard curve
///
/// Solves the bezier x polynomial for the curve parameter with
/// Newton-Raphson, then evaluates y. Matches the CSS timing function so a
/// script-driven value can track a CSS transition.
pub fn material_ease(t: f32) -> f32 {
    const P1X: f32 = 0.4;
    const P1Y: f32 = 0.0;
    const P2X: f32 = 0.2;
    const P2Y: f32 = 1.0;

    let t = t.clamp(0.0, 1.0);
    let mut x = t;
    for _ in 0..8 {
        let inv = 1.0 - x;
        let bx = 3.0 * P1X * x * inv * inv + 3.0 * P2X * x * x * inv + x * x * x;
        if (bx - t).abs() < 1e-4 {
            break;
        }
        let dx = 3.0 * P1X * inv * inv - 6.0 * P1X * x * inv + 6.0 * P2X * x * inv
            - 3.0 * P2X * x * x
            + 3.0 * x * x;
        if dx.abs() < 1e-6 {
            break;
        }
        x = (x - (bx - t) / dx).clamp(0.0, 1.0);
    }
    let inv = 1.0 - x;
    3.0 * P1Y * x * inv * inv + 3.0 * P2Y * x * x * inv + x * x * x
}

/// Named easing curve, selectable from configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    EaseInOut,
    EaseOutCubic,
    EaseInCubic,
    Linear,
    ExpoQuart,
    Snap,
    Material,
}

impl Easing {
    /// Map linear progress in `[0, 1]` to eased progress
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::EaseInOut => ease_in_out(t),
            Easing::EaseOutCubic => ease_out_cubic(t),
            Easing::EaseInCubic => ease_in_cubic(t),
            Easing::Linear => linear(t),
            Easing::ExpoQuart => expo_quart(t),
            Easing::Snap => snap_ease(t),
            Easing::Material => material_ease(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_in_out() {
        // Start at 0
        assert!((ease_in_out(0.0) - 0.0).abs() < 0.001);
        // End at 1
        assert!((ease_in_out(1.0) - 1.0).abs() < 0.001);
        // Midpoint at 0.5
        assert!((ease_in_out(0.5) - 0.5).abs() < 0.001);
        // Slow start, slow settle
        assert!(ease_in_out(0.1) < 0.1);
        assert!(ease_in_out(0.9) > 0.9);
    }

    #[test]
    fn test_ease_out_cubic() {
        assert!((ease_out_cubic(0.0) - 0.0).abs() < 0.001);
        assert!((ease_out_cubic(1.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_linear() {
        assert!((linear(0.0) - 0.0).abs() < 0.001);
        assert!((linear(0.5) - 0.5).abs() < 0.001);
        assert!((linear(1.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_material_matches_css_reference_points() {
        // Reference values sampled from cubic-bezier(0.4, 0, 0.2, 1)
        assert!((material_ease(0.5) - 0.7757).abs() < 0.01);
        assert!((material_ease(0.25) - 0.2378).abs() < 0.01);
        assert!(material_ease(1.0) > 0.999);
    }

    #[test]
    fn test_expo_quart_is_continuous_at_midpoint() {
        let below = expo_quart(0.4999);
        let above = expo_quart(0.5);
        assert!((below - above).abs() < 0.01);
    }

    #[test]
    fn test_easing_apply_clamps_input() {
        assert_eq!(Easing::EaseInOut.apply(-1.0), 0.0);
        assert!((Easing::EaseInOut.apply(2.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_easing_serde_names() {
        let json = serde_json::to_string(&Easing::EaseInOut).unwrap();
        assert_eq!(json, "\"ease_in_out\"");
        let parsed: Easing = serde_json::from_str("\"material\"").unwrap();
        assert_eq!(parsed, Easing::Material);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const ALL: [Easing; 7] = [
        Easing::EaseInOut,
        Easing::EaseOutCubic,
        Easing::EaseInCubic,
        Easing::Linear,
        Easing::ExpoQuart,
        Easing::Snap,
        Easing::Material,
    ];

    proptest! {
        /// All easing functions should map [0,1] inputs to [0,1] outputs
        #[test]
        fn easing_bounded_output(t in 0.0f32..=1.0) {
            for easing in ALL {
                let result = easing.apply(t);
                prop_assert!(result >= -0.001, "{:?}({}) = {} < 0", easing, t, result);
                prop_assert!(result <= 1.001, "{:?}({}) = {} > 1", easing, t, result);
            }
        }

        /// All easing functions should be monotonically increasing
        #[test]
        fn easing_monotonic(t1 in 0.0f32..=1.0, t2 in 0.0f32..=1.0) {
            let (t_lo, t_hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
            for easing in ALL {
                prop_assert!(
                    easing.apply(t_lo) <= easing.apply(t_hi) + 0.001,
                    "{:?} not monotonic: f({}) > f({})",
                    easing, t_lo, t_hi
                );
            }
        }

        /// Endpoints should be fixed: f(0) = 0, f(1) = 1
        #[test]
        fn easing_endpoints_fixed(_seed in any::<u64>()) {
            for easing in ALL {
                prop_assert!((easing.apply(0.0) - 0.0).abs() < 0.001);
                prop_assert!((easing.apply(1.0) - 1.0).abs() < 0.001);
            }
        }
    }
}
