// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A simulated host loop for bezel HUDs.
//!
//! [`SimLoop`] plays the part of the host: it ticks a [`Hud`] once per
//! refresh interval while the HUD asks for frames, sleeps straight to the
//! next timer deadline while it does not, and hands every evaluation to a
//! [`Presenter`]. Nothing reads a real clock, so every run is reproducible.
//!
//! [`RecordingPresenter`] and [`EventLog`] capture what a presenter and a
//! trace sink saw; [`scenario`] builds the canonical lifecycle runs on top.

#![no_std]

extern crate alloc;

pub mod scenario;

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::time::Duration;

use bezel_core::controller::LifecycleKind;
use bezel_core::host::Presenter;
use bezel_core::hud::Hud;
use bezel_core::node::{HudChanges, Node};
use bezel_core::time::HostTime;
use bezel_core::timing::{FrameTick, TickOutcome};
use bezel_core::trace::{
    CleanupEvent, LifecycleEvent, ProgressEvent, TimerEvent, TraceSink, Tracer, TransitionEvent,
};

/// A 60 Hz refresh interval.
pub const DEFAULT_REFRESH: Duration = Duration::from_nanos(16_666_667);

/// What was on screen after one simulated frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSample {
    /// Frame counter.
    pub frame_index: u64,
    /// When the frame ran.
    pub at: HostTime,
    /// Lifecycle state after the tick.
    pub lifecycle: LifecycleKind,
    /// Effective bezel opacity, container fade included.
    pub alpha: f64,
    /// Bezel scale.
    pub scale: f64,
    /// Whether the HUD asked for another frame.
    pub needs_frame: bool,
}

/// Steps a HUD through simulated time.
#[derive(Debug)]
pub struct SimLoop {
    now: HostTime,
    refresh: Duration,
    frame_index: u64,
    changes: HudChanges,
    samples: Vec<FrameSample>,
}

impl Default for SimLoop {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH)
    }
}

impl SimLoop {
    /// Creates a loop at time zero with the given refresh interval.
    #[must_use]
    pub fn new(refresh: Duration) -> Self {
        Self {
            now: HostTime::ZERO,
            refresh,
            frame_index: 0,
            changes: HudChanges::default(),
            samples: Vec::new(),
        }
    }

    /// The simulated current time.
    #[must_use]
    pub const fn now(&self) -> HostTime {
        self.now
    }

    /// Every frame run so far, in order.
    #[must_use]
    pub fn samples(&self) -> &[FrameSample] {
        &self.samples
    }

    /// Runs one frame at `at`: tick, evaluate, present, sample.
    pub fn step(&mut self, hud: &mut Hud, presenter: &mut impl Presenter, at: HostTime) -> TickOutcome {
        self.now = self.now.max(at);
        self.frame_index += 1;
        let outcome = hud.tick(&FrameTick {
            now: self.now,
            refresh_interval: Some(self.refresh),
            frame_index: self.frame_index,
        });
        hud.evaluate_into(&mut self.changes);
        if !self.changes.is_empty() {
            presenter.apply(hud, &self.changes);
        }
        self.samples.push(FrameSample {
            frame_index: self.frame_index,
            at: self.now,
            lifecycle: hud.lifecycle().kind(),
            alpha: hud.nodes().effective_opacity(Node::Bezel),
            scale: hud.displayed().scale,
            needs_frame: outcome.needs_frame,
        });
        outcome
    }

    /// Advances to `target`.
    ///
    /// The first frame runs one refresh interval out, as a host does after
    /// any call into the HUD. After that frames follow the refresh interval
    /// while the HUD needs them; otherwise the loop sleeps until the next
    /// timer deadline or `target`, whichever comes first. Deadlines always
    /// get a frame of their own.
    pub fn advance_to(&mut self, hud: &mut Hud, presenter: &mut impl Presenter, target: HostTime) {
        let mut wants_frame = true;
        while self.now < target {
            let mut next = if wants_frame {
                self.now + self.refresh
            } else {
                target
            };
            if let Some(deadline) = hud.next_deadline()
                && deadline > self.now
            {
                next = next.min(deadline);
            }
            let outcome = self.step(hud, presenter, next.min(target));
            wants_frame = outcome.needs_frame;
        }
    }

    /// Samples taken at or after `from` and before `to`.
    pub fn samples_between(&self, from: HostTime, to: HostTime) -> impl Iterator<Item = &FrameSample> {
        self.samples
            .iter()
            .filter(move |s| s.at >= from && s.at < to)
    }

    /// The highest bezel opacity sampled so far.
    #[must_use]
    pub fn max_alpha(&self) -> f64 {
        self.samples.iter().map(|s| s.alpha).fold(0.0, f64::max)
    }
}

/// A [`Presenter`] that counts what it was told.
#[derive(Clone, Debug, Default)]
pub struct RecordingPresenter {
    /// Number of non-empty change sets received.
    pub applies: usize,
    /// Number of times the HUD attached to the host surface.
    pub attaches: usize,
    /// Number of times the HUD detached from the host surface.
    pub detaches: usize,
    /// Every node mounted, in order.
    pub mounted: Vec<Node>,
    /// Every node unmounted, in order.
    pub unmounted: Vec<Node>,
}

impl Presenter for RecordingPresenter {
    fn apply(&mut self, _hud: &Hud, changes: &HudChanges) {
        self.applies += 1;
        self.attaches += usize::from(changes.attached);
        self.detaches += usize::from(changes.detached);
        self.mounted.extend_from_slice(&changes.mounted);
        self.unmounted.extend_from_slice(&changes.unmounted);
    }
}

/// A [`TraceSink`] that keeps every event, split by kind.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    /// Lifecycle changes.
    pub lifecycle: Vec<LifecycleEvent>,
    /// Timer activity.
    pub timers: Vec<TimerEvent>,
    /// Transition starts, interruptions and ends.
    pub transitions: Vec<TransitionEvent>,
    /// Completed hides.
    pub cleanups: Vec<CleanupEvent>,
    /// Progress changes.
    pub progress: Vec<ProgressEvent>,
}

impl EventLog {
    /// Creates a log and a [`Tracer`] feeding it.
    #[must_use]
    pub fn shared() -> (Rc<RefCell<Self>>, Tracer) {
        let log = Rc::new(RefCell::new(Self::default()));
        let tracer = Tracer::new(Box::new(Rc::clone(&log)));
        (log, tracer)
    }
}

impl TraceSink for EventLog {
    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        self.lifecycle.push(*e);
    }

    fn on_timer(&mut self, e: &TimerEvent) {
        self.timers.push(*e);
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        self.transitions.push(*e);
    }

    fn on_cleanup(&mut self, e: &CleanupEvent) {
        self.cleanups.push(*e);
    }

    fn on_progress(&mut self, e: &ProgressEvent) {
        self.progress.push(*e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bezel_core::config::HudConfig;
    use kurbo::Rect;

    fn ms(v: u64) -> HostTime {
        HostTime::from_millis(v)
    }

    fn hud(config: HudConfig) -> Hud {
        let mut hud = Hud::new(config);
        hud.attach(Rect::new(0.0, 0.0, 320.0, 480.0));
        hud
    }

    #[test]
    fn idle_hud_sleeps_to_the_target() {
        let mut sim = SimLoop::default();
        let mut presenter = RecordingPresenter::default();
        let mut hud = hud(HudConfig::DEFAULT);
        sim.advance_to(&mut hud, &mut presenter, ms(1_000));
        // One frame after the call, then straight to the target.
        assert_eq!(sim.samples().len(), 2);
        assert_eq!(sim.now(), ms(1_000));
        assert_eq!(presenter.attaches, 1);
    }

    #[test]
    fn deadlines_get_their_own_frame() {
        let mut sim = SimLoop::default();
        let mut presenter = RecordingPresenter::default();
        let config = HudConfig::DEFAULT.with_grace_time(Duration::from_millis(250));
        let mut hud = hud(config);
        hud.show(sim.now(), false);
        sim.advance_to(&mut hud, &mut presenter, ms(300));
        let reveal = sim
            .samples()
            .iter()
            .find(|s| s.lifecycle == LifecycleKind::Visible)
            .expect("grace fired");
        assert_eq!(reveal.at, ms(250));
        assert_eq!(reveal.alpha, 1.0);
    }

    #[test]
    fn visible_spinner_keeps_frames_coming() {
        let mut sim = SimLoop::default();
        let mut presenter = RecordingPresenter::default();
        let mut hud = hud(HudConfig::DEFAULT);
        hud.show(sim.now(), false);
        sim.advance_to(&mut hud, &mut presenter, ms(100));
        assert_eq!(sim.samples().len(), 6);
        assert!(sim.samples().iter().all(|s| s.needs_frame));
    }

    #[test]
    fn event_log_is_shared() {
        let (log, tracer) = EventLog::shared();
        let mut hud = hud(HudConfig::DEFAULT);
        hud.set_tracer(tracer);
        hud.show(ms(0), false);
        assert_eq!(log.borrow().lifecycle.len(), 1);
        assert_eq!(log.borrow().transitions.len(), 1);
    }
}
