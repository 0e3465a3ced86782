// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! Each HUD gets its own track (`tid` is the HUD id). Animated reveals and
//! conceals become duration slices, progress becomes a counter, and
//! everything else is an instant event.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use bezel_core::time::HostTime;
use bezel_core::trace::{TimerAction, TransitionPhase};
use bezel_core::transition::Direction;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Lifecycle(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": e.to.name(),
                    "cat": "Lifecycle",
                    "ts": to_us(e.at),
                    "pid": 0,
                    "tid": e.hud.0,
                    "s": "t",
                    "args": {
                        "from": e.from.name(),
                        "to": e.to.name(),
                    }
                }));
            }
            RecordedEvent::Timer(e) => {
                let (action, deadline) = match e.action {
                    TimerAction::Scheduled { deadline } => ("scheduled", Some(to_us(deadline))),
                    TimerAction::Cancelled => ("cancelled", None),
                    TimerAction::Fired => ("fired", None),
                };
                events.push(json!({
                    "ph": "i",
                    "name": format!("{} {action}", e.role.name()),
                    "cat": "Timer",
                    "ts": to_us(e.at),
                    "pid": 0,
                    "tid": e.hud.0,
                    "s": "t",
                    "args": {
                        "role": e.role.name(),
                        "action": action,
                        "deadline_us": deadline,
                    }
                }));
            }
            RecordedEvent::Transition(e) => {
                let name = match e.direction {
                    Direction::In => "reveal",
                    Direction::Out => "conceal",
                };
                let ph = match (e.phase, e.animated) {
                    (TransitionPhase::Began, true) => "B",
                    (TransitionPhase::Interrupted | TransitionPhase::Finished, true) => "E",
                    (_, false) => "i",
                };
                let mut event = json!({
                    "ph": ph,
                    "name": name,
                    "cat": "Transition",
                    "ts": to_us(e.at),
                    "pid": 0,
                    "tid": e.hud.0,
                    "args": {
                        "kind": format!("{:?}", e.kind),
                        "phase": format!("{:?}", e.phase),
                    }
                });
                if ph == "i" {
                    event["s"] = json!("t");
                }
                events.push(event);
            }
            RecordedEvent::Cleanup(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "cleanup",
                    "cat": "Lifecycle",
                    "ts": to_us(e.at),
                    "pid": 0,
                    "tid": e.hud.0,
                    "s": "t",
                    "args": {
                        "detached": e.detached,
                    }
                }));
            }
            RecordedEvent::Progress(e) => {
                events.push(json!({
                    "ph": "C",
                    "name": format!("progress {}", e.hud.0),
                    "cat": "Progress",
                    "ts": to_us(e.at),
                    "pid": 0,
                    "args": {
                        "fraction": e.fraction,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn to_us(t: HostTime) -> f64 {
    t.nanos() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use bezel_core::hud::HudId;
    use bezel_core::timer::TimerRole;
    use bezel_core::trace::{ProgressEvent, TimerEvent, TraceSink, TransitionEvent};
    use bezel_core::transition::AnimationKind;

    fn transition(at_ms: u64, phase: TransitionPhase, animated: bool) -> TransitionEvent {
        TransitionEvent {
            hud: HudId(9),
            at: HostTime::from_millis(at_ms),
            direction: Direction::In,
            kind: AnimationKind::Fade,
            phase,
            animated,
        }
    }

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_timer(&TimerEvent {
            hud: HudId(9),
            at: HostTime::ZERO,
            role: TimerRole::Grace,
            action: TimerAction::Fired,
        });
        rec.on_transition(&transition(0, TransitionPhase::Began, true));
        rec.on_progress(&ProgressEvent {
            hud: HudId(9),
            at: HostTime::from_millis(100),
            fraction: 0.5,
        });
        rec.on_transition(&transition(300, TransitionPhase::Finished, true));
        rec.on_transition(&transition(400, TransitionPhase::Finished, false));

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 5);

        assert_eq!(parsed[0]["ph"], "i");
        assert_eq!(parsed[0]["name"], "grace fired");
        assert_eq!(parsed[0]["tid"], 9);

        assert_eq!(parsed[1]["ph"], "B");
        assert_eq!(parsed[1]["name"], "reveal");

        assert_eq!(parsed[2]["ph"], "C");
        assert_eq!(parsed[2]["args"]["fraction"], 0.5);
        assert_eq!(parsed[2]["ts"], 100_000.0);

        assert_eq!(parsed[3]["ph"], "E");
        assert_eq!(parsed[4]["ph"], "i");
        assert_eq!(parsed[4]["s"], "t");
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
