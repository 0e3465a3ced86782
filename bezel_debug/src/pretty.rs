// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are printed in milliseconds since the clock origin.

use std::io::Write;

use bezel_core::time::HostTime;
use bezel_core::trace::{
    CleanupEvent, LifecycleEvent, ProgressEvent, TimerAction, TimerEvent, TraceSink,
    TransitionEvent, TransitionPhase,
};
use bezel_core::transition::Direction;

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its destination.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn ms(t: HostTime) -> f64 {
    t.nanos() as f64 / 1_000_000.0
}

fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::In => "reveal",
        Direction::Out => "conceal",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        let _ = writeln!(
            self.writer,
            "[lifecycle] hud={} at={:.1}ms {} -> {}",
            e.hud.0,
            ms(e.at),
            e.from.name(),
            e.to.name(),
        );
    }

    fn on_timer(&mut self, e: &TimerEvent) {
        let action = match e.action {
            TimerAction::Scheduled { deadline } => format!("scheduled for {:.1}ms", ms(deadline)),
            TimerAction::Cancelled => "cancelled".to_owned(),
            TimerAction::Fired => "fired".to_owned(),
        };
        let _ = writeln!(
            self.writer,
            "[timer] hud={} at={:.1}ms {} {action}",
            e.hud.0,
            ms(e.at),
            e.role.name(),
        );
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        let phase = match (e.phase, e.animated) {
            (TransitionPhase::Began, _) => "began",
            (TransitionPhase::Interrupted, _) => "interrupted",
            (TransitionPhase::Finished, true) => "finished",
            (TransitionPhase::Finished, false) => "snapped",
        };
        let _ = writeln!(
            self.writer,
            "[transition] hud={} at={:.1}ms {} {:?} {phase}",
            e.hud.0,
            ms(e.at),
            direction_name(e.direction),
            e.kind,
        );
    }

    fn on_cleanup(&mut self, e: &CleanupEvent) {
        let _ = writeln!(
            self.writer,
            "[cleanup] hud={} at={:.1}ms detached={}",
            e.hud.0,
            ms(e.at),
            e.detached,
        );
    }

    fn on_progress(&mut self, e: &ProgressEvent) {
        let _ = writeln!(
            self.writer,
            "[progress] hud={} at={:.1}ms fraction={:.3}",
            e.hud.0,
            ms(e.at),
            e.fraction,
        );
    }
}
