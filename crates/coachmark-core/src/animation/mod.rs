#![forbid(unsafe_code)]

//! Easing curves and time-based tweens.
//!
//! A [`Tween`] interpolates between two values of any [`Interpolate`] type
//! over a fixed [`Duration`], shaped by an [`Easing`] curve. Tweens are
//! advanced explicitly with [`Tween::tick`]; nothing in here reads a clock.
//!
//! # Invariants
//!
//! 1. Raw progress is always in [0.0, 1.0].
//! 2. Once complete, [`Tween::value`] returns the target exactly, even for
//!    easings that overshoot mid-flight.
//! 3. Zero-duration tweens complete on the first tick.
//!
//! # Failure Modes
//!
//! - Easing curves that never reach 1.0 at `t = 1.0` are masked by
//!   invariant 2: the settled value is always the target.

mod tween;

pub use tween::{Interpolate, Tween};

use std::f64::consts::PI;
use std::fmt;

/// A plain easing function over normalized progress.
pub type EasingFn = fn(f64) -> f64;

/// Easing curve applied to tween progress.
#[derive(Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Easing {
    /// Linear interpolation.
    #[default]
    Linear,
    /// Cubic ease-in (accelerating).
    EaseIn,
    /// Cubic ease-out (decelerating).
    EaseOut,
    /// Cubic S-curve.
    EaseInOut,
    /// Spring-like wobble around the target; the parameter is the
    /// bounciness (0 = no bounce, 1 = one full oscillation).
    Elastic(f64),
    /// Caller-supplied curve.
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(EasingFn),
}

impl Easing {
    /// The elastic curve used for the highlight and badge by default.
    pub const DEFAULT_ELASTIC: Self = Self::Elastic(0.7);

    /// Apply the easing function to a progress value (0.0 to 1.0).
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
            Self::Elastic(bounciness) => {
                let p = bounciness * PI;
                1.0 - (t * PI / 2.0).cos().powi(3) * (t * p).cos()
            }
            Self::Custom(f) => f(t),
        }
    }

    /// Check if this easing can produce values outside 0.0-1.0.
    pub fn can_overshoot(self) -> bool {
        matches!(self, Self::Elastic(b) if b > 0.0) || matches!(self, Self::Custom(_))
    }
}

impl PartialEq for Easing {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Linear, Self::Linear)
            | (Self::EaseIn, Self::EaseIn)
            | (Self::EaseOut, Self::EaseOut)
            | (Self::EaseInOut, Self::EaseInOut) => true,
            (Self::Elastic(a), Self::Elastic(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => std::ptr::fn_addr_eq(*a, *b),
            _ => false,
        }
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("Linear"),
            Self::EaseIn => f.write_str("EaseIn"),
            Self::EaseOut => f.write_str("EaseOut"),
            Self::EaseInOut => f.write_str("EaseInOut"),
            Self::Elastic(b) => f.debug_tuple("Elastic").field(b).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<EasingFn> for Easing {
    fn from(f: EasingFn) -> Self {
        Self::Custom(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smoothstep(t: f64) -> f64 {
        t * t * (3.0 - 2.0 * t)
    }

    #[test]
    fn endpoints_are_exact() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::Custom(smoothstep),
        ] {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at 1");
        }
    }

    #[test]
    fn elastic_endpoints_are_close() {
        let e = Easing::DEFAULT_ELASTIC;
        assert!(e.apply(0.0).abs() < 1e-12);
        assert!((e.apply(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn overshoot_classification() {
        assert!(Easing::DEFAULT_ELASTIC.can_overshoot());
        assert!(!Easing::Elastic(0.0).can_overshoot());
        assert!(!Easing::Linear.can_overshoot());
        assert!(!Easing::EaseInOut.can_overshoot());
    }

    #[test]
    fn equality_includes_custom_pointers() {
        assert_eq!(Easing::Custom(smoothstep), Easing::Custom(smoothstep));
        assert_ne!(Easing::Elastic(0.7), Easing::Elastic(0.5));
        assert_ne!(Easing::Linear, Easing::EaseIn);
    }

    #[test]
    fn default_is_linear() {
        assert_eq!(Easing::default(), Easing::Linear);
    }

    #[test]
    fn debug_hides_function_pointer() {
        let dbg = format!("{:?}", Easing::Custom(smoothstep));
        assert_eq!(dbg, "Custom(..)");
    }
}
