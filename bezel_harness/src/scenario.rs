// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canonical lifecycle scenarios.
//!
//! Each scenario builds a HUD over a 320×480 host surface, drives it
//! through [`SimLoop`] and returns the whole run for inspection. The tracer
//! passed in receives every event, so the same runs back both the tests and
//! the traces `hud_demo` prints.

use core::time::Duration;

use bezel_core::config::HudConfig;
use bezel_core::geometry::{CapsulePath, capsule_path};
use bezel_core::hud::Hud;
use bezel_core::indicator::BAR_SIZE;
use bezel_core::time::HostTime;
use bezel_core::trace::Tracer;
use kurbo::Rect;

use crate::{RecordingPresenter, SimLoop};

/// Host surface every scenario runs on.
pub const HOST_BOUNDS: Rect = Rect::new(0.0, 0.0, 320.0, 480.0);

/// A finished scenario run.
#[derive(Debug)]
pub struct ScenarioRun {
    /// The HUD, in its final state.
    pub hud: Hud,
    /// The loop, with every frame sample.
    pub sim: SimLoop,
    /// What the presenter was told.
    pub presenter: RecordingPresenter,
}

/// A named scenario.
#[derive(Clone, Copy, Debug)]
pub struct Scenario {
    /// Short identifier.
    pub name: &'static str,
    /// One-line description.
    pub summary: &'static str,
    /// Runs the scenario, sending trace events to the tracer.
    pub run: fn(Tracer) -> ScenarioRun,
}

/// Every lifecycle scenario, in order.
pub const ALL: [Scenario; 4] = [
    Scenario {
        name: "grace-then-hide",
        summary: "grace 0.5 s, hide at 0.1 s: never visible",
        run: grace_then_early_hide,
    },
    Scenario {
        name: "min-show",
        summary: "min-show 1.0 s, hide at 0.3 s: conceal starts at 1.0 s",
        run: early_hide_waits_for_min_show,
    },
    Scenario {
        name: "delayed-hide-unshown",
        summary: "hide after 0.7 s with no show: nothing to hide",
        run: delayed_hide_without_show,
    },
    Scenario {
        name: "delayed-hide-min-show",
        summary: "show, hide after 0.7 s, min-show 1.0 s: conceal starts at 1.0 s",
        run: delayed_hide_within_min_show,
    },
];

fn ms(v: u64) -> HostTime {
    HostTime::from_millis(v)
}

fn start(config: HudConfig, tracer: Tracer) -> ScenarioRun {
    let mut hud = Hud::new(config);
    hud.set_tracer(tracer);
    hud.attach(HOST_BOUNDS);
    ScenarioRun {
        hud,
        sim: SimLoop::default(),
        presenter: RecordingPresenter::default(),
    }
}

impl ScenarioRun {
    fn advance_to(&mut self, target: HostTime) {
        self.sim
            .advance_to(&mut self.hud, &mut self.presenter, target);
    }
}

/// Grace time 0.5 s; `show` at 0, `hide` at 0.1 s, before the grace timer
/// fires. The HUD must never become visible and ends idle.
pub fn grace_then_early_hide(tracer: Tracer) -> ScenarioRun {
    let config = HudConfig::DEFAULT.with_grace_time(Duration::from_millis(500));
    let mut run = start(config, tracer);
    run.hud.show(run.sim.now(), true);
    run.advance_to(ms(100));
    run.hud.hide(run.sim.now(), true);
    run.advance_to(ms(1_000));
    run
}

/// Minimum show time 1.0 s; `show` at 0, `hide` at 0.3 s. The conceal must
/// not start before 1.0 s.
pub fn early_hide_waits_for_min_show(tracer: Tracer) -> ScenarioRun {
    let config = HudConfig::DEFAULT.with_min_show_time(Duration::from_secs(1));
    let mut run = start(config, tracer);
    run.hud.show(run.sim.now(), true);
    run.advance_to(ms(300));
    run.hud.hide(run.sim.now(), true);
    run.advance_to(ms(2_000));
    run
}

/// `hide_after_delay(0.7 s)` at 0 with no `show`. The delayed hide fires at
/// 0.7 s and finds nothing to hide.
pub fn delayed_hide_without_show(tracer: Tracer) -> ScenarioRun {
    let mut run = start(HudConfig::DEFAULT, tracer);
    run.hud
        .hide_after_delay(run.sim.now(), true, Duration::from_millis(700));
    run.advance_to(ms(1_500));
    run
}

/// Minimum show time 1.0 s; `show` then `hide_after_delay(0.7 s)` at 0. The
/// delayed hide fires at 0.7 s and defers to the minimum show time, so the
/// conceal starts at 1.0 s.
pub fn delayed_hide_within_min_show(tracer: Tracer) -> ScenarioRun {
    let config = HudConfig::DEFAULT.with_min_show_time(Duration::from_secs(1));
    let mut run = start(config, tracer);
    run.hud.show(run.sim.now(), true);
    run.hud
        .hide_after_delay(run.sim.now(), true, Duration::from_millis(700));
    run.advance_to(ms(2_000));
    run
}

/// The bar at half progress in its default size.
#[must_use]
pub fn half_full_bar() -> CapsulePath {
    capsule_path(0.5, BAR_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use bezel_core::controller::LifecycleKind;
    use bezel_core::geometry::FillBranch;
    use bezel_core::indicator::{Indicator, Mode};
    use bezel_core::timer::TimerRole;
    use bezel_core::trace::{TimerAction, TransitionPhase};
    use bezel_core::transition::Direction;

    use crate::EventLog;

    fn conceal_starts(log: &EventLog) -> Vec<HostTime> {
        log.transitions
            .iter()
            .filter(|t| t.direction == Direction::Out && t.phase == TransitionPhase::Began)
            .map(|t| t.at)
            .collect()
    }

    #[test]
    fn grace_hide_is_never_visible() {
        let (log, tracer) = EventLog::shared();
        let run = grace_then_early_hide(tracer);

        assert_eq!(run.sim.max_alpha(), 0.0);
        assert!(run.sim.samples().iter().all(|s| s.alpha == 0.0));
        assert_eq!(run.hud.lifecycle().kind(), LifecycleKind::Idle);

        let log = log.borrow();
        assert!(
            log.transitions.iter().all(|t| t.direction == Direction::Out),
            "no reveal ever started"
        );
        let grace: Vec<_> = log
            .timers
            .iter()
            .filter(|t| t.role == TimerRole::Grace)
            .map(|t| t.action)
            .collect();
        assert_eq!(
            grace,
            [
                TimerAction::Scheduled { deadline: ms(500) },
                TimerAction::Cancelled
            ]
        );
        assert_eq!(run.hud.next_deadline(), None);
    }

    #[test]
    fn min_show_defers_the_conceal() {
        let (log, tracer) = EventLog::shared();
        let run = early_hide_waits_for_min_show(tracer);

        assert_eq!(conceal_starts(&log.borrow()), [ms(1_000)]);
        assert!(
            run.sim
                .samples_between(ms(300), ms(1_000))
                .all(|s| s.alpha == 1.0),
            "fully shown until the minimum show time is up"
        );
        let pending: Vec<_> = run
            .sim
            .samples_between(ms(301), ms(1_000))
            .map(|s| s.lifecycle)
            .collect();
        assert!(pending.iter().all(|k| *k == LifecycleKind::PendingHide));

        assert_eq!(run.hud.lifecycle().kind(), LifecycleKind::Idle);
        let last = run.sim.samples().last().expect("frames ran");
        assert_eq!(last.alpha, 0.0);
        assert_eq!(log.borrow().cleanups.len(), 1);
    }

    #[test]
    fn delayed_hide_without_show_is_a_no_op() {
        let (log, tracer) = EventLog::shared();
        let run = delayed_hide_without_show(tracer);

        let log = log.borrow();
        assert!(log.timers.iter().any(|t| t.role == TimerRole::HideDelay
            && t.action == TimerAction::Fired
            && t.at == ms(700)));
        assert!(log.transitions.is_empty());
        assert!(log.cleanups.is_empty());
        assert!(log.lifecycle.is_empty());
        assert_eq!(run.hud.lifecycle().kind(), LifecycleKind::Idle);
        assert_eq!(run.sim.max_alpha(), 0.0);
    }

    #[test]
    fn delayed_hide_respects_min_show() {
        let (log, tracer) = EventLog::shared();
        let run = delayed_hide_within_min_show(tracer);

        let log = log.borrow();
        let to_pending = log
            .lifecycle
            .iter()
            .find(|e| e.to == LifecycleKind::PendingHide)
            .expect("the delayed hide came too early");
        assert_eq!(to_pending.at, ms(700));
        assert_eq!(conceal_starts(&log), [ms(1_000)]);
        assert_eq!(run.hud.lifecycle().kind(), LifecycleKind::Idle);
        assert_eq!(run.presenter.detaches, 0);
    }

    #[test]
    fn half_full_bar_fills_through_the_body() {
        let bar = half_full_bar();
        assert_eq!(bar.amount, 60.0);
        assert_eq!(bar.fill_branch, FillBranch::Middle);

        let mut hud = Hud::new(HudConfig::DEFAULT);
        hud.set_mode(Mode::Bar);
        hud.set_progress(0.5);
        let Indicator::Bar(indicator) = hud.indicator() else {
            panic!("bar mode mounts a bar");
        };
        assert_eq!(indicator.path(BAR_SIZE).fill_branch, FillBranch::Middle);
    }

    #[test]
    fn every_scenario_runs() {
        for scenario in ALL {
            let run = (scenario.run)(Tracer::none());
            assert!(!run.sim.samples().is_empty(), "{} ran no frames", scenario.name);
        }
    }
}
