// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated host loop that exercises HUD lifecycles and the diagnostics
//! pipeline.
//!
//! Runs every canonical scenario from [`bezel_harness::scenario`] into a
//! shared [`RecorderSink`], replays the recording through a
//! [`PrettyPrintSink`], then drives a [`HudStack`] of preset HUDs through a
//! [`PlanPresenter`] and reports what each frame would draw. Finally writes
//! the recording as a Chrome trace.

use std::cell::RefCell;
use std::fs::File;
use std::io::BufWriter;
use std::rc::Rc;

use bezel_core::hud::HudStack;
use bezel_core::indicator::Mode;
use bezel_core::presets;
use bezel_core::time::HostTime;
use bezel_core::timing::FrameTick;
use bezel_core::trace::{TraceSink, Tracer};
use bezel_debug::pretty::PrettyPrintSink;
use bezel_debug::recorder::{RecordedEvent, RecorderSink};
use bezel_harness::DEFAULT_REFRESH;
use bezel_harness::scenario::{self, HOST_BOUNDS};
use bezel_render::{ApproxTextMeasure, DamageRegion, PlanPresenter};

/// How long the stack demo runs, in milliseconds.
const STACK_RUN_MS: u64 = 2_500;

fn main() {
    let recorder = Rc::new(RefCell::new(RecorderSink::new()));

    // -- scenarios ---------------------------------------------------------
    for s in scenario::ALL {
        let run = (s.run)(Tracer::new(Box::new(Rc::clone(&recorder))));
        println!(
            "{:<24} {} | {} frames, peak alpha {:.2}, ends {}",
            s.name,
            s.summary,
            run.sim.samples().len(),
            run.sim.max_alpha(),
            run.hud.lifecycle().kind().name(),
        );
    }
    let bar = scenario::half_full_bar();
    println!(
        "{:<24} fill reaches {:.1} of 120, {:?}",
        "half-full-bar", bar.amount, bar.fill_branch,
    );

    // -- replay ------------------------------------------------------------
    println!();
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    for event in recorder.borrow().events() {
        replay(&event, &mut pretty);
    }

    // -- stack -------------------------------------------------------------
    println!();
    run_stack(&recorder);

    // -- export Chrome trace -----------------------------------------------
    let path = "trace.json";
    let file = File::create(path).expect("failed to create trace.json");
    let mut writer = BufWriter::new(file);
    bezel_debug::chrome::export(recorder.borrow().as_bytes(), &mut writer)
        .expect("failed to write Chrome trace");

    println!("Wrote {path} ({} events)", recorder.borrow().events().len());
}

/// A loading HUD with progress, replaced by a success toast at 1.2 s.
fn run_stack(recorder: &Rc<RefCell<RecorderSink>>) {
    let mut stack = HudStack::new(HOST_BOUNDS);
    let mut presenter = PlanPresenter::new(ApproxTextMeasure);

    let loading = presets::show_loading(&mut stack, HostTime::ZERO, "Uploading");
    if let Some(hud) = stack.get_mut(loading) {
        hud.set_tracer(Tracer::new(Box::new(Rc::clone(recorder))));
        hud.set_mode(Mode::Annular);
    }

    let mut now = HostTime::ZERO;
    let mut frame_index = 0;
    let mut redrawn = 0;
    while now <= HostTime::from_millis(STACK_RUN_MS) {
        let ms = now.nanos() / 1_000_000;
        if let Some(hud) = stack.get_mut(loading) {
            hud.set_progress((ms as f64 / 1_000.0).min(1.0));
        }
        if ms >= 1_200 && stack.top().is_some_and(|hud| hud.id() == loading) {
            stack.hide_top(now, true);
            let done = presets::show_success(&mut stack, now, "Uploaded");
            if let Some(hud) = stack.get_mut(done) {
                hud.set_tracer(Tracer::new(Box::new(Rc::clone(recorder))));
            }
        }

        let outcome = stack.tick(&FrameTick {
            now,
            refresh_interval: Some(DEFAULT_REFRESH),
            frame_index,
        });
        stack.present(&mut presenter);

        let damage = presenter.take_damage();
        if !damage.is_empty() {
            redrawn += 1;
        }
        if frame_index % 30 == 0 {
            let items: usize = presenter.plans().map(|(_, plan)| plan.items.len()).sum();
            println!(
                "[stack] at={ms}ms huds={} items={items} damage={} needs_frame={}",
                stack.len(),
                describe(&damage),
                outcome.needs_frame,
            );
        }

        now += DEFAULT_REFRESH;
        frame_index += 1;
    }
    println!("[stack] {redrawn} of {frame_index} frames needed a redraw");
}

fn describe(damage: &DamageRegion) -> String {
    match damage {
        DamageRegion::Full => "full".to_owned(),
        DamageRegion::Rects(rects) => format!("{} rects", rects.len()),
        DamageRegion::None => "none".to_owned(),
    }
}

fn replay(event: &RecordedEvent, sink: &mut impl TraceSink) {
    match event {
        RecordedEvent::Lifecycle(e) => sink.on_lifecycle(e),
        RecordedEvent::Timer(e) => sink.on_timer(e),
        RecordedEvent::Transition(e) => sink.on_transition(e),
        RecordedEvent::Cleanup(e) => sink.on_cleanup(e),
        RecordedEvent::Progress(e) => sink.on_progress(e),
    }
}
