#![forbid(unsafe_code)]

use std::time::Duration;

use super::Easing;
use crate::geometry::Vec2;

/// Values a [`Tween`] can interpolate.
pub trait Interpolate: Copy {
    /// Interpolate from `self` to `to` at eased progress `t` (may exceed 1.0).
    fn interpolate(self, to: Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    #[inline]
    fn interpolate(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Interpolate for Vec2 {
    #[inline]
    fn interpolate(self, to: Self, t: f64) -> Self {
        self.lerp(to, t)
    }
}

/// Interpolation from one value to another over a fixed duration.
#[derive(Debug, Clone)]
pub struct Tween<T> {
    from: T,
    to: T,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl<T: Interpolate> Tween<T> {
    /// Create a tween from `from` to `to`.
    #[must_use]
    pub fn new(from: T, to: T, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    /// Advance by `delta`. Returns `true` once the tween has completed.
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.elapsed = self.elapsed.saturating_add(delta).min(self.duration);
        self.is_complete()
    }

    /// Raw (un-eased) progress in [0.0, 1.0].
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Whether the full duration has elapsed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Current interpolated value. Exactly the target once complete.
    #[must_use]
    pub fn value(&self) -> T {
        if self.is_complete() {
            return self.to;
        }
        self.from.interpolate(self.to, self.easing.apply(self.progress()))
    }

    /// Start value.
    #[must_use]
    pub fn from(&self) -> T {
        self.from
    }

    /// Target value.
    #[must_use]
    pub fn target(&self) -> T {
        self.to
    }

    /// Configured duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn linear_midpoint() {
        let mut tween = Tween::new(0.0, 10.0, MS_100, Easing::Linear);
        tween.tick(Duration::from_millis(50));
        assert!((tween.value() - 5.0).abs() < 1e-9);
        assert!(!tween.is_complete());
    }

    #[test]
    fn settles_exactly_on_target() {
        let mut tween = Tween::new(Vec2::new(1.0, 2.0), Vec2::new(3.3, 4.4), MS_100, Easing::DEFAULT_ELASTIC);
        for _ in 0..7 {
            tween.tick(Duration::from_millis(16));
        }
        assert!(tween.is_complete());
        assert_eq!(tween.value(), Vec2::new(3.3, 4.4));
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut tween = Tween::new(0.0, 1.0, Duration::ZERO, Easing::Linear);
        assert_eq!(tween.progress(), 1.0);
        assert!(tween.tick(Duration::ZERO));
        assert_eq!(tween.value(), 1.0);
    }

    #[test]
    fn overshoot_tick_is_clamped() {
        let mut tween = Tween::new(0.0, 1.0, MS_100, Easing::EaseOut);
        assert!(tween.tick(Duration::from_secs(5)));
        assert_eq!(tween.progress(), 1.0);
    }

    #[test]
    fn accessors() {
        let tween = Tween::new(2.0, 4.0, MS_100, Easing::Linear);
        assert_eq!(tween.from(), 2.0);
        assert_eq!(tween.target(), 4.0);
        assert_eq!(tween.duration(), MS_100);
        assert_eq!(tween.value(), 2.0);
    }
}
