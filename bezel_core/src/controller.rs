// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The show/hide timing state machine.
//!
//! [`TimingController`] decides *when* a HUD reveals and conceals; the
//! [`Hud`](crate::hud::Hud) decides *how*. Entry points return a
//! [`Directive`] for the HUD to carry out, or `None` when the request is
//! deferred (waiting on a timer) or has no effect.
//!
//! ```text
//!             show (grace > 0)          grace fires
//!   Idle ───────────────────► PendingShow ─────────► Visible
//!    │  show (grace = 0)                               │ │
//!    └────────────────────────────────────────────────►┘ │ hide, elapsed < min-show
//!                                                        ▼
//!   Idle / Removed ◄── Hiding ◄──── min-show fires ── PendingHide
//! ```
//!
//! Each timer role has at most one live token. Installing a new token always
//! cancels the previous one first, and a firing timer only acts if the
//! lifecycle still holds the token that fired.

use core::time::Duration;

use crate::hud::HudId;
use crate::time::HostTime;
use crate::timer::{TimerId, TimerQueue, TimerRole};
use crate::trace::{LifecycleEvent, TimerAction, TimerEvent, Tracer};

/// Lifecycle state of one HUD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Not shown, nothing pending.
    Idle,
    /// `show` was called; waiting out the grace time.
    PendingShow {
        /// The grace timer.
        grace: TimerId,
        /// Whether to animate the reveal.
        animated: bool,
    },
    /// On screen (or animating in).
    Visible {
        /// When the reveal began.
        shown_at: HostTime,
    },
    /// `hide` was called early; waiting out the minimum show time.
    PendingHide {
        /// When the reveal began.
        shown_at: HostTime,
        /// The min-show timer.
        min_show: TimerId,
        /// Whether to animate the conceal.
        animated: bool,
    },
    /// Concealing; cleanup runs when the conceal finishes.
    Hiding,
    /// Detached for good. Every call is a no-op.
    Removed,
}

/// The discriminant of a [`Lifecycle`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleKind {
    /// See [`Lifecycle::Idle`].
    Idle,
    /// See [`Lifecycle::PendingShow`].
    PendingShow,
    /// See [`Lifecycle::Visible`].
    Visible,
    /// See [`Lifecycle::PendingHide`].
    PendingHide,
    /// See [`Lifecycle::Hiding`].
    Hiding,
    /// See [`Lifecycle::Removed`].
    Removed,
}

impl LifecycleKind {
    /// A short lowercase name, for trace output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::PendingShow => "pending-show",
            Self::Visible => "visible",
            Self::PendingHide => "pending-hide",
            Self::Hiding => "hiding",
            Self::Removed => "removed",
        }
    }
}

impl Lifecycle {
    /// Returns the discriminant.
    #[must_use]
    pub const fn kind(&self) -> LifecycleKind {
        match self {
            Self::Idle => LifecycleKind::Idle,
            Self::PendingShow { .. } => LifecycleKind::PendingShow,
            Self::Visible { .. } => LifecycleKind::Visible,
            Self::PendingHide { .. } => LifecycleKind::PendingHide,
            Self::Hiding => LifecycleKind::Hiding,
            Self::Removed => LifecycleKind::Removed,
        }
    }

    /// When the current reveal began; `None` unless visible or pending hide.
    #[must_use]
    pub const fn shown_at(&self) -> Option<HostTime> {
        match self {
            Self::Visible { shown_at } | Self::PendingHide { shown_at, .. } => Some(*shown_at),
            _ => None,
        }
    }

    /// Returns `true` while the HUD is (or is becoming) visible.
    #[must_use]
    pub const fn is_shown(&self) -> bool {
        self.shown_at().is_some()
    }
}

/// What the HUD must do in response to a lifecycle call or a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Directive {
    /// Make the HUD visible.
    Reveal {
        /// Run the reveal transition rather than snapping.
        animated: bool,
    },
    /// Hide the HUD, then clean up.
    Conceal {
        /// Run the conceal transition rather than snapping.
        animated: bool,
    },
}

/// A timer that came due in [`TimingController::fire_next`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fired {
    /// Which timer fired.
    pub role: TimerRole,
    /// What the HUD must do, if anything.
    pub directive: Option<Directive>,
}

/// Grace, minimum-show and delayed-hide choreography for one HUD.
#[derive(Clone, Debug)]
pub struct TimingController {
    hud: HudId,
    grace_time: Duration,
    min_show_time: Duration,
    lifecycle: Lifecycle,
    hide_delay: Option<(TimerId, bool)>,
    timers: TimerQueue,
}

impl TimingController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(hud: HudId, grace_time: Duration, min_show_time: Duration) -> Self {
        Self {
            hud,
            grace_time,
            min_show_time,
            lifecycle: Lifecycle::Idle,
            hide_delay: None,
            timers: TimerQueue::new(),
        }
    }

    /// The current lifecycle state.
    #[must_use]
    pub const fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// The grace time used by the next `show`.
    #[must_use]
    pub const fn grace_time(&self) -> Duration {
        self.grace_time
    }

    /// The minimum show time used by the next `hide`.
    #[must_use]
    pub const fn min_show_time(&self) -> Duration {
        self.min_show_time
    }

    /// Changes the grace time. A grace timer already running keeps its
    /// deadline.
    pub fn set_grace_time(&mut self, grace_time: Duration) {
        self.grace_time = grace_time;
    }

    /// Changes the minimum show time. A min-show timer already running keeps
    /// its deadline.
    pub fn set_min_show_time(&mut self, min_show_time: Duration) {
        self.min_show_time = min_show_time;
    }

    /// Returns `true` if a delayed hide is scheduled.
    #[must_use]
    pub const fn has_hide_delay(&self) -> bool {
        self.hide_delay.is_some()
    }

    /// The earliest pending timer deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<HostTime> {
        self.timers.next_deadline()
    }

    /// Requests that the HUD be shown.
    ///
    /// With a grace time the reveal is deferred; otherwise (or when the HUD
    /// is already up, or concealing) it happens now.
    pub fn show(&mut self, now: HostTime, animated: bool, tracer: &mut Tracer) -> Option<Directive> {
        match self.lifecycle {
            Lifecycle::Removed => None,
            Lifecycle::Idle | Lifecycle::PendingShow { .. } if !self.grace_time.is_zero() => {
                if let Lifecycle::PendingShow { grace, .. } = self.lifecycle {
                    self.cancel(grace, TimerRole::Grace, now, tracer);
                }
                let grace = self.schedule(TimerRole::Grace, now, self.grace_time, tracer);
                self.set_lifecycle(Lifecycle::PendingShow { grace, animated }, now, tracer);
                None
            }
            Lifecycle::PendingShow { grace, .. } => {
                self.cancel(grace, TimerRole::Grace, now, tracer);
                Some(self.reveal_now(now, animated, tracer))
            }
            Lifecycle::PendingHide { min_show, .. } => {
                self.cancel(min_show, TimerRole::MinShow, now, tracer);
                Some(self.reveal_now(now, animated, tracer))
            }
            Lifecycle::Idle | Lifecycle::Visible { .. } | Lifecycle::Hiding => {
                Some(self.reveal_now(now, animated, tracer))
            }
        }
    }

    /// Requests that the HUD be hidden.
    ///
    /// A HUD that has not been visible for the minimum show time yet stays up
    /// until it has. A HUD still inside its grace time is never revealed.
    pub fn hide(&mut self, now: HostTime, animated: bool, tracer: &mut Tracer) -> Option<Directive> {
        match self.lifecycle {
            Lifecycle::Idle | Lifecycle::Hiding | Lifecycle::Removed => None,
            Lifecycle::PendingShow { grace, .. } => {
                self.cancel(grace, TimerRole::Grace, now, tracer);
                Some(self.conceal_now(now, false, tracer))
            }
            Lifecycle::Visible { shown_at } => {
                let elapsed = now.saturating_duration_since(shown_at);
                if !self.min_show_time.is_zero() && elapsed < self.min_show_time {
                    let min_show = self.schedule(
                        TimerRole::MinShow,
                        now,
                        self.min_show_time - elapsed,
                        tracer,
                    );
                    self.set_lifecycle(
                        Lifecycle::PendingHide {
                            shown_at,
                            min_show,
                            animated,
                        },
                        now,
                        tracer,
                    );
                    None
                } else {
                    Some(self.conceal_now(now, animated, tracer))
                }
            }
            Lifecycle::PendingHide {
                shown_at, min_show, ..
            } => {
                // Already waiting; the latest call decides the animation.
                self.lifecycle = Lifecycle::PendingHide {
                    shown_at,
                    min_show,
                    animated,
                };
                None
            }
        }
    }

    /// Schedules a `hide(animated)` after `delay`, replacing any previously
    /// scheduled delayed hide.
    pub fn hide_after_delay(
        &mut self,
        now: HostTime,
        animated: bool,
        delay: Duration,
        tracer: &mut Tracer,
    ) {
        if self.lifecycle == Lifecycle::Removed {
            return;
        }
        self.cancel_hide_delay(now, tracer);
        let id = self.schedule(TimerRole::HideDelay, now, delay, tracer);
        self.hide_delay = Some((id, animated));
    }

    /// Fires the earliest timer due at `now`, if any.
    ///
    /// Call repeatedly until it returns `None`; each call fires one timer so
    /// the HUD can carry out the directive before the next one fires.
    pub fn fire_next(&mut self, now: HostTime, tracer: &mut Tracer) -> Option<Fired> {
        let (id, role) = self.timers.pop_due(now)?;
        tracer.timer(&TimerEvent {
            hud: self.hud,
            at: now,
            role,
            action: TimerAction::Fired,
        });
        let directive = match (role, self.lifecycle) {
            (TimerRole::Grace, Lifecycle::PendingShow { grace, animated }) if grace == id => {
                Some(self.reveal_now(now, animated, tracer))
            }
            (
                TimerRole::MinShow,
                Lifecycle::PendingHide {
                    min_show, animated, ..
                },
            ) if min_show == id => Some(self.conceal_now(now, animated, tracer)),
            (TimerRole::HideDelay, _) => match self.hide_delay {
                Some((pending, animated)) if pending == id => {
                    self.hide_delay = None;
                    self.hide(now, animated, tracer)
                }
                _ => None,
            },
            _ => None,
        };
        Some(Fired { role, directive })
    }

    /// Records that the conceal transition finished and cleanup ran.
    ///
    /// Lands in [`Lifecycle::Removed`] when the HUD was detached, otherwise
    /// [`Lifecycle::Idle`]. Does nothing unless concealing.
    pub fn finish_conceal(&mut self, now: HostTime, removed: bool, tracer: &mut Tracer) {
        if self.lifecycle != Lifecycle::Hiding {
            return;
        }
        if removed {
            self.clear_timers(now, tracer);
            self.set_lifecycle(Lifecycle::Removed, now, tracer);
        } else {
            self.set_lifecycle(Lifecycle::Idle, now, tracer);
        }
    }

    /// Cancels every timer and enters [`Lifecycle::Removed`].
    pub fn remove(&mut self, now: HostTime, tracer: &mut Tracer) {
        if self.lifecycle == Lifecycle::Removed {
            return;
        }
        self.clear_timers(now, tracer);
        self.set_lifecycle(Lifecycle::Removed, now, tracer);
    }

    fn reveal_now(&mut self, now: HostTime, animated: bool, tracer: &mut Tracer) -> Directive {
        self.cancel_hide_delay(now, tracer);
        self.set_lifecycle(Lifecycle::Visible { shown_at: now }, now, tracer);
        Directive::Reveal { animated }
    }

    fn conceal_now(&mut self, now: HostTime, animated: bool, tracer: &mut Tracer) -> Directive {
        let was_shown = self.lifecycle.is_shown();
        self.cancel_hide_delay(now, tracer);
        self.set_lifecycle(Lifecycle::Hiding, now, tracer);
        Directive::Conceal {
            animated: animated && was_shown,
        }
    }

    fn clear_timers(&mut self, now: HostTime, tracer: &mut Tracer) {
        match self.lifecycle {
            Lifecycle::PendingShow { grace, .. } => self.cancel(grace, TimerRole::Grace, now, tracer),
            Lifecycle::PendingHide { min_show, .. } => {
                self.cancel(min_show, TimerRole::MinShow, now, tracer);
            }
            _ => {}
        }
        self.cancel_hide_delay(now, tracer);
        self.timers.clear();
    }

    fn cancel_hide_delay(&mut self, now: HostTime, tracer: &mut Tracer) {
        if let Some((id, _)) = self.hide_delay.take() {
            self.cancel(id, TimerRole::HideDelay, now, tracer);
        }
    }

    fn schedule(
        &mut self,
        role: TimerRole,
        now: HostTime,
        delay: Duration,
        tracer: &mut Tracer,
    ) -> TimerId {
        let id = self.timers.schedule_after(role, now, delay);
        tracer.timer(&TimerEvent {
            hud: self.hud,
            at: now,
            role,
            action: TimerAction::Scheduled {
                deadline: now + delay,
            },
        });
        id
    }

    fn cancel(&mut self, id: TimerId, role: TimerRole, now: HostTime, tracer: &mut Tracer) {
        if self.timers.cancel(id) {
            tracer.timer(&TimerEvent {
                hud: self.hud,
                at: now,
                role,
                action: TimerAction::Cancelled,
            });
        }
    }

    fn set_lifecycle(&mut self, next: Lifecycle, now: HostTime, tracer: &mut Tracer) {
        let from = self.lifecycle.kind();
        self.lifecycle = next;
        tracer.lifecycle(&LifecycleEvent {
            hud: self.hud,
            at: now,
            from,
            to: next.kind(),
        });
    }
}
