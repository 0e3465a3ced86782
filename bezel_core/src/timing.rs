// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-loop timing types.
//!
//! - [`FrameTick`]: one callback from the host's UI loop, either at display
//!   refresh cadence or because a timer deadline came due
//! - [`TickOutcome`]: what the HUD needs from the host loop next
//!
//! # Data flow
//!
//! 1. The host produces a [`FrameTick`] from its display-refresh callback
//!    (or from a one-shot wakeup scheduled at
//!    [`Hud::next_deadline`](crate::hud::Hud::next_deadline)).
//! 2. [`Hud::tick`](crate::hud::Hud::tick) fires due timers, advances the
//!    in-flight transition and polls the progress feed.
//! 3. The returned [`TickOutcome`] says whether another refresh tick is
//!    wanted and when the next timer is due, so an idle host can sleep.

use core::time::Duration;

use crate::time::HostTime;

/// A callback from the host's UI loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTick {
    /// Current host time when the tick was generated.
    pub now: HostTime,
    /// Display refresh interval, if known.
    pub refresh_interval: Option<Duration>,
    /// Monotonically increasing tick counter.
    pub frame_index: u64,
}

impl FrameTick {
    /// Creates a tick at `now` with no refresh information.
    ///
    /// Useful for hosts that wake only on timer deadlines.
    #[inline]
    #[must_use]
    pub const fn at(now: HostTime) -> Self {
        Self {
            now,
            refresh_interval: None,
            frame_index: 0,
        }
    }
}

/// What a [`Hud`](crate::hud::Hud) wants from the host loop after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct TickOutcome {
    /// A transition, spinner or progress link is active and wants the next
    /// display-refresh tick.
    pub needs_frame: bool,
    /// The earliest pending timer deadline, if any.
    pub next_deadline: Option<HostTime>,
}

impl TickOutcome {
    /// Returns `true` if the HUD has nothing left to do until the next
    /// lifecycle call.
    #[inline]
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        !self.needs_frame && self.next_deadline.is_none()
    }

    /// Returns the time the host should wake next, given the tick that just
    /// ran.
    ///
    /// Wants-frame outcomes wake one refresh interval later (or immediately
    /// when the interval is unknown); otherwise the next timer deadline.
    #[must_use]
    pub fn wake_at(&self, tick: &FrameTick) -> Option<HostTime> {
        let frame = self
            .needs_frame
            .then(|| tick.now + tick.refresh_interval.unwrap_or(Duration::ZERO));
        match (frame, self.next_deadline) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}
