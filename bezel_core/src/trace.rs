// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the HUD lifecycle.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! the lifecycle code calls at each step: state changes, timer activity,
//! transitions, cleanup and progress. All method bodies default to no-ops,
//! so implementing only the events you care about is fine.
//!
//! [`Tracer`] owns an optional boxed `TraceSink`. When the `trace` feature is
//! **off**, every `Tracer` method compiles to nothing and the sink passed to
//! [`Tracer::new`] is dropped immediately. When **on**, each method performs
//! a single `Option` branch before dispatching.
//!
//! A `Hud` owns its tracer, so a sink that the caller wants to read back
//! afterwards is shared through `Rc<RefCell<_>>`, which implements
//! `TraceSink` by forwarding.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use crate::controller::LifecycleKind;
use crate::hud::HudId;
use crate::time::HostTime;
use crate::timer::TimerRole;
use crate::transition::{AnimationKind, Direction};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What happened to a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerAction {
    /// The timer was armed.
    Scheduled {
        /// When it comes due.
        deadline: HostTime,
    },
    /// The timer was disarmed before coming due.
    Cancelled,
    /// The timer came due and its callback ran.
    Fired,
}

/// Which point of a transition is reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionPhase {
    /// A transition started.
    Began,
    /// A transition was replaced before finishing.
    Interrupted,
    /// A transition reached its end.
    Finished,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a HUD moves between lifecycle states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LifecycleEvent {
    /// Which HUD.
    pub hud: HudId,
    /// When.
    pub at: HostTime,
    /// Previous state.
    pub from: LifecycleKind,
    /// New state.
    pub to: LifecycleKind,
}

/// Emitted when a lifecycle timer is scheduled, cancelled or fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerEvent {
    /// Which HUD.
    pub hud: HudId,
    /// When.
    pub at: HostTime,
    /// Which timer.
    pub role: TimerRole,
    /// What happened.
    pub action: TimerAction,
}

/// Emitted when a reveal or conceal transition starts, is interrupted or
/// finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionEvent {
    /// Which HUD.
    pub hud: HudId,
    /// When.
    pub at: HostTime,
    /// Reveal or conceal.
    pub direction: Direction,
    /// The resolved animation kind.
    pub kind: AnimationKind,
    /// Start, interruption or end.
    pub phase: TransitionPhase,
    /// Whether the transition animates; `false` means it snapped.
    pub animated: bool,
}

/// Emitted when a hide completes and cleanup runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CleanupEvent {
    /// Which HUD.
    pub hud: HudId,
    /// When.
    pub at: HostTime,
    /// Whether the HUD was detached from its host surface.
    pub detached: bool,
}

/// Emitted when the displayed progress changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressEvent {
    /// Which HUD.
    pub hud: HudId,
    /// When.
    pub at: HostTime,
    /// The new, clamped fraction.
    pub fraction: f64,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the HUD lifecycle.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a HUD changes lifecycle state.
    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        _ = e;
    }

    /// Called when a timer is scheduled, cancelled or fires.
    fn on_timer(&mut self, e: &TimerEvent) {
        _ = e;
    }

    /// Called when a transition starts, is interrupted or finishes.
    fn on_transition(&mut self, e: &TransitionEvent) {
        _ = e;
    }

    /// Called when a hide completes.
    fn on_cleanup(&mut self, e: &CleanupEvent) {
        _ = e;
    }

    /// Called when the displayed progress changes.
    fn on_progress(&mut self, e: &ProgressEvent) {
        _ = e;
    }
}

impl<T: TraceSink + ?Sized> TraceSink for Rc<RefCell<T>> {
    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        self.borrow_mut().on_lifecycle(e);
    }

    fn on_timer(&mut self, e: &TimerEvent) {
        self.borrow_mut().on_timer(e);
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        self.borrow_mut().on_transition(e);
    }

    fn on_cleanup(&mut self, e: &CleanupEvent) {
        self.borrow_mut().on_cleanup(e);
    }

    fn on_progress(&mut self, e: &ProgressEvent) {
        self.borrow_mut().on_progress(e);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Zero-overhead dispatcher to an optional [`TraceSink`].
#[derive(Default)]
pub struct Tracer {
    #[cfg(feature = "trace")]
    sink: Option<Box<dyn TraceSink>>,
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl Tracer {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: Box<dyn TraceSink>) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {}
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns `true` if events reach a sink.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        #[cfg(feature = "trace")]
        {
            self.sink.is_some()
        }
        #[cfg(not(feature = "trace"))]
        {
            false
        }
    }

    /// Emits a [`LifecycleEvent`].
    #[inline]
    pub fn lifecycle(&mut self, e: &LifecycleEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_lifecycle(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TimerEvent`].
    #[inline]
    pub fn timer(&mut self, e: &TimerEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_timer(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TransitionEvent`].
    #[inline]
    pub fn transition(&mut self, e: &TransitionEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_transition(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CleanupEvent`].
    #[inline]
    pub fn cleanup(&mut self, e: &CleanupEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_cleanup(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ProgressEvent`].
    #[inline]
    pub fn progress(&mut self, e: &ProgressEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_progress(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}
