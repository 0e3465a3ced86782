// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timing and animation configuration for a HUD.

use core::time::Duration;

use crate::transition::{AnimationKind, SpringCurve};

/// How long toast-style HUDs stay up before hiding themselves.
pub const TOAST_DURATION: Duration = Duration::from_millis(700);

/// Configuration for a [`Hud`](crate::hud::Hud).
///
/// Zero durations disable the corresponding delay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudConfig {
    /// How long a `show` waits before revealing. A task that finishes within
    /// this window never shows a HUD at all.
    pub grace_time: Duration,
    /// Once revealed, the HUD stays up at least this long even if `hide` is
    /// called sooner.
    pub min_show_time: Duration,
    /// Reveal and conceal animation.
    pub animation: AnimationKind,
    /// Detach from the host surface once a hide completes.
    pub remove_on_hide: bool,
    /// Spring curve driving reveal and conceal transitions.
    pub curve: SpringCurve,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl HudConfig {
    /// No grace, no minimum show time, fade, stays attached after hiding.
    pub const DEFAULT: Self = Self {
        grace_time: Duration::ZERO,
        min_show_time: Duration::ZERO,
        animation: AnimationKind::Fade,
        remove_on_hide: false,
        curve: SpringCurve::DEFAULT,
    };

    /// Short-lived status HUD that removes itself once hidden.
    ///
    /// Pair with [`Hud::hide_after_delay`](crate::hud::Hud::hide_after_delay)
    /// and [`TOAST_DURATION`].
    #[must_use]
    pub const fn toast() -> Self {
        Self {
            remove_on_hide: true,
            ..Self::DEFAULT
        }
    }

    /// Sets the grace time.
    #[must_use]
    pub const fn with_grace_time(mut self, grace_time: Duration) -> Self {
        self.grace_time = grace_time;
        self
    }

    /// Sets the minimum show time.
    #[must_use]
    pub const fn with_min_show_time(mut self, min_show_time: Duration) -> Self {
        self.min_show_time = min_show_time;
        self
    }

    /// Sets the animation kind.
    #[must_use]
    pub const fn with_animation(mut self, animation: AnimationKind) -> Self {
        self.animation = animation;
        self
    }

    /// Sets whether the HUD detaches once hidden.
    #[must_use]
    pub const fn with_remove_on_hide(mut self, remove_on_hide: bool) -> Self {
        self.remove_on_hide = remove_on_hide;
        self
    }

    /// Sets the transition curve.
    #[must_use]
    pub const fn with_curve(mut self, curve: SpringCurve) -> Self {
        self.curve = curve;
        self
    }
}
