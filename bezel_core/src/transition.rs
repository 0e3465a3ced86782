// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reveal and conceal transitions.
//!
//! A [`Transition`] moves the bezel's displayed [`Appearance`] (alpha and
//! scale) toward a target along a [`SpringCurve`]. Transitions always begin
//! from whatever is on screen right now: starting a new one replaces the one
//! in flight, it never queues behind it.
//!
//! | kind | reveal from hidden | conceal to |
//! |---|---|---|
//! | `Fade` | alpha 0, current scale | alpha 0, current scale |
//! | `ZoomIn` | alpha 0, scale 0.5 | alpha 0, scale 1.5 |
//! | `ZoomOut` | alpha 0, scale 1.5 | alpha 0, scale 0.5 |
//!
//! `Zoom` is direction-dependent: it resolves to `ZoomIn` when revealing
//! and `ZoomOut` when concealing. Every reveal ends at alpha 1, scale 1.

use core::f64::consts::E;
use core::time::Duration;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::time::HostTime;

/// Scale of a zoomed bezel that is smaller than identity.
pub const SMALL_SCALE: f64 = 0.5;

/// Scale of a zoomed bezel that is larger than identity.
pub const LARGE_SCALE: f64 = 1.5;

/// Which way a transition runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward visible.
    In,
    /// Toward hidden.
    Out,
}

/// How the bezel enters and leaves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    /// Opacity only.
    #[default]
    Fade,
    /// Zoom in when revealing, zoom out when concealing.
    Zoom,
    /// Grow while revealing; grow past identity while concealing.
    ZoomIn,
    /// Shrink while revealing; shrink below identity while concealing.
    ZoomOut,
}

impl AnimationKind {
    /// Resolves direction-dependent kinds for `direction`.
    #[must_use]
    pub const fn resolve(self, direction: Direction) -> Self {
        match (self, direction) {
            (Self::Zoom, Direction::In) => Self::ZoomIn,
            (Self::Zoom, Direction::Out) => Self::ZoomOut,
            (kind, _) => kind,
        }
    }
}

/// What the bezel and dimming background currently display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Appearance {
    /// Opacity of the bezel and the background.
    pub alpha: f64,
    /// Uniform scale of the bezel about its center.
    pub scale: f64,
}

impl Appearance {
    /// Fully shown at identity scale.
    pub const SHOWN: Self = Self {
        alpha: 1.0,
        scale: 1.0,
    };

    /// Fully transparent at identity scale.
    pub const HIDDEN: Self = Self {
        alpha: 0.0,
        scale: 1.0,
    };

    /// Linear interpolation toward `to` by `t`.
    #[must_use]
    pub fn lerp(self, to: Self, t: f64) -> Self {
        Self {
            alpha: self.alpha + (to.alpha - self.alpha) * t,
            scale: self.scale + (to.scale - self.scale) * t,
        }
    }
}

/// A spring-shaped easing curve.
///
/// With `damping` 1.0 the spring is critically damped: it approaches the
/// target as fast as possible without overshoot. Lower damping overshoots.
/// The stiffness is chosen so the spring settles within `duration`; at
/// `duration` the curve snaps to exactly 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringCurve {
    /// Total length of the transition.
    pub duration: Duration,
    /// Damping ratio in `(0, 1]`.
    pub damping: f64,
}

/// `ω·t` reached at the end of the duration. With critical damping the
/// residual `(1 + x)·e^(−x)` at `x = 9.23` is below 0.1%.
const SETTLE_OMEGA_T: f64 = 9.23;

impl SpringCurve {
    /// 0.3 s, critically damped.
    pub const DEFAULT: Self = Self {
        duration: Duration::from_millis(300),
        damping: 1.0,
    };

    /// Creates a curve.
    ///
    /// # Panics
    ///
    /// Panics if `damping` is not in `(0, 1]`.
    #[must_use]
    pub fn new(duration: Duration, damping: f64) -> Self {
        assert!(
            damping > 0.0 && damping <= 1.0,
            "spring damping must be in (0, 1], got {damping}"
        );
        Self { duration, damping }
    }

    /// Progress in `[0, 1]`-ish (underdamped springs overshoot) after
    /// `elapsed`.
    #[must_use]
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if elapsed >= self.duration || self.duration.is_zero() {
            return 1.0;
        }
        let x = SETTLE_OMEGA_T * elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let zeta = self.damping;
        if zeta >= 1.0 {
            1.0 - (1.0 + x) * E.powf(-x)
        } else {
            let wd = (1.0 - zeta * zeta).sqrt();
            let envelope = E.powf(-zeta * x);
            1.0 - envelope * ((wd * x).cos() + zeta / wd * (wd * x).sin())
        }
    }
}

impl Default for SpringCurve {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One in-flight reveal or conceal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    direction: Direction,
    kind: AnimationKind,
    from: Appearance,
    to: Appearance,
    started: HostTime,
    curve: SpringCurve,
}

impl Transition {
    /// Begins a transition from `current`, the appearance on screen at `now`.
    ///
    /// `kind` is resolved for `direction`. A reveal of a fully transparent
    /// bezel starts from the zoom kind's entry scale; a reveal that
    /// interrupts a conceal continues from where the conceal got to.
    #[must_use]
    pub fn begin(
        direction: Direction,
        kind: AnimationKind,
        current: Appearance,
        now: HostTime,
        curve: SpringCurve,
    ) -> Self {
        let kind = kind.resolve(direction);
        let (from, to) = match direction {
            Direction::In => {
                let from = if current.alpha <= 0.0 {
                    Appearance {
                        alpha: 0.0,
                        scale: match kind {
                            AnimationKind::ZoomIn => SMALL_SCALE,
                            AnimationKind::ZoomOut => LARGE_SCALE,
                            _ => current.scale,
                        },
                    }
                } else {
                    current
                };
                (from, Appearance::SHOWN)
            }
            Direction::Out => {
                let scale = match kind {
                    AnimationKind::ZoomIn => LARGE_SCALE,
                    AnimationKind::ZoomOut => SMALL_SCALE,
                    _ => current.scale,
                };
                (current, Appearance { alpha: 0.0, scale })
            }
        };
        Self {
            direction,
            kind,
            from,
            to,
            started: now,
            curve,
        }
    }

    /// Which way this transition runs.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// The resolved kind.
    #[must_use]
    pub const fn kind(&self) -> AnimationKind {
        self.kind
    }

    /// Appearance at the start.
    #[must_use]
    pub const fn from(&self) -> Appearance {
        self.from
    }

    /// Appearance at the end.
    #[must_use]
    pub const fn to(&self) -> Appearance {
        self.to
    }

    /// When the transition started.
    #[must_use]
    pub const fn started(&self) -> HostTime {
        self.started
    }

    /// When the transition ends.
    #[must_use]
    pub fn ends(&self) -> HostTime {
        self.started + self.curve.duration
    }

    /// The appearance at `now`. Alpha is clamped to `[0, 1]` even when an
    /// underdamped curve overshoots.
    #[must_use]
    pub fn sample(&self, now: HostTime) -> Appearance {
        if self.is_complete(now) {
            return self.to;
        }
        let t = self.curve.progress(now.saturating_duration_since(self.started));
        let mut a = self.from.lerp(self.to, t);
        a.alpha = a.alpha.clamp(0.0, 1.0);
        a
    }

    /// Returns `true` once `now` has reached the end.
    #[must_use]
    pub fn is_complete(&self, now: HostTime) -> bool {
        now >= self.ends()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> HostTime {
        HostTime::from_millis(v)
    }

    #[test]
    fn zoom_resolves_by_direction() {
        assert_eq!(AnimationKind::Zoom.resolve(Direction::In), AnimationKind::ZoomIn);
        assert_eq!(AnimationKind::Zoom.resolve(Direction::Out), AnimationKind::ZoomOut);
        assert_eq!(AnimationKind::Fade.resolve(Direction::Out), AnimationKind::Fade);
        assert_eq!(AnimationKind::ZoomIn.resolve(Direction::Out), AnimationKind::ZoomIn);
    }

    #[test]
    fn critically_damped_curve_is_monotonic_and_settles() {
        let curve = SpringCurve::DEFAULT;
        let mut prev = 0.0;
        for step in 0..=30 {
            let p = curve.progress(Duration::from_millis(step * 10));
            assert!(p >= prev, "no overshoot or reversal at {step}");
            assert!(p <= 1.0);
            prev = p;
        }
        assert_eq!(curve.progress(Duration::ZERO), 0.0);
        assert!(curve.progress(Duration::from_millis(290)) > 0.99);
        assert_eq!(curve.progress(Duration::from_millis(300)), 1.0);
    }

    #[test]
    fn underdamped_curve_overshoots() {
        let curve = SpringCurve::new(Duration::from_millis(300), 0.3);
        let peak = (0..300)
            .map(|ms| curve.progress(Duration::from_millis(ms)))
            .fold(0.0, f64::max);
        assert!(peak > 1.0, "peak {peak}");
    }

    #[test]
    #[should_panic(expected = "spring damping must be in (0, 1]")]
    fn zero_damping_is_rejected() {
        let _ = SpringCurve::new(Duration::from_millis(300), 0.0);
    }

    #[test]
    fn reveal_from_hidden_uses_entry_scale() {
        let t = Transition::begin(
            Direction::In,
            AnimationKind::Zoom,
            Appearance::HIDDEN,
            ms(0),
            SpringCurve::DEFAULT,
        );
        assert_eq!(t.kind(), AnimationKind::ZoomIn);
        assert_eq!(t.sample(ms(0)), Appearance { alpha: 0.0, scale: 0.5 });
        assert_eq!(t.sample(ms(300)), Appearance::SHOWN);
        assert!(t.is_complete(ms(300)));
        assert!(!t.is_complete(ms(299)));

        let t = Transition::begin(
            Direction::In,
            AnimationKind::ZoomOut,
            Appearance::HIDDEN,
            ms(0),
            SpringCurve::DEFAULT,
        );
        assert_eq!(t.from().scale, LARGE_SCALE);
    }

    #[test]
    fn conceal_targets() {
        let conceal = |kind| {
            Transition::begin(Direction::Out, kind, Appearance::SHOWN, ms(0), SpringCurve::DEFAULT)
                .to()
        };
        assert_eq!(conceal(AnimationKind::Zoom), Appearance { alpha: 0.0, scale: 0.5 });
        assert_eq!(conceal(AnimationKind::ZoomIn), Appearance { alpha: 0.0, scale: 1.5 });
        assert_eq!(conceal(AnimationKind::Fade), Appearance::HIDDEN);
    }

    #[test]
    fn interrupted_conceal_reveals_from_current_state() {
        let out = Transition::begin(
            Direction::Out,
            AnimationKind::Zoom,
            Appearance::SHOWN,
            ms(0),
            SpringCurve::DEFAULT,
        );
        let mid = out.sample(ms(100));
        assert!(mid.alpha > 0.0 && mid.alpha < 1.0);

        let back = Transition::begin(
            Direction::In,
            AnimationKind::Zoom,
            mid,
            ms(100),
            SpringCurve::DEFAULT,
        );
        assert_eq!(back.sample(ms(100)), mid, "no jump at the interruption");
        assert_eq!(back.sample(ms(400)), Appearance::SHOWN);
    }
}
