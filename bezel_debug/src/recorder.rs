// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].

use bezel_core::controller::LifecycleKind;
use bezel_core::hud::HudId;
use bezel_core::time::HostTime;
use bezel_core::timer::TimerRole;
use bezel_core::trace::{
    CleanupEvent, LifecycleEvent, ProgressEvent, TimerAction, TimerEvent, TraceSink,
    TransitionEvent, TransitionPhase,
};
use bezel_core::transition::{AnimationKind, Direction};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_LIFECYCLE: u8 = 1;
const TAG_TIMER: u8 = 2;
const TAG_TRANSITION: u8 = 3;
const TAG_CLEANUP: u8 = 4;
const TAG_PROGRESS: u8 = 5;

const ACTION_SCHEDULED: u8 = 0;
const ACTION_CANCELLED: u8 = 1;
const ACTION_FIRED: u8 = 2;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Decodes everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<RecordedEvent> {
        decode(&self.buf).collect()
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_header(&mut self, tag: u8, hud: HudId, at: HostTime) {
        self.write_u8(tag);
        self.write_u32(hud.0);
        self.write_u64(at.nanos());
    }

    fn write_lifecycle(&mut self, k: LifecycleKind) {
        self.write_u8(match k {
            LifecycleKind::Idle => 0,
            LifecycleKind::PendingShow => 1,
            LifecycleKind::Visible => 2,
            LifecycleKind::PendingHide => 3,
            LifecycleKind::Hiding => 4,
            LifecycleKind::Removed => 5,
        });
    }

    fn write_role(&mut self, r: TimerRole) {
        self.write_u8(match r {
            TimerRole::Grace => 0,
            TimerRole::MinShow => 1,
            TimerRole::HideDelay => 2,
        });
    }

    fn write_kind(&mut self, k: AnimationKind) {
        self.write_u8(match k {
            AnimationKind::Fade => 0,
            AnimationKind::Zoom => 1,
            AnimationKind::ZoomIn => 2,
            AnimationKind::ZoomOut => 3,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        self.write_header(TAG_LIFECYCLE, e.hud, e.at);
        self.write_lifecycle(e.from);
        self.write_lifecycle(e.to);
    }

    fn on_timer(&mut self, e: &TimerEvent) {
        self.write_header(TAG_TIMER, e.hud, e.at);
        self.write_role(e.role);
        match e.action {
            TimerAction::Scheduled { deadline } => {
                self.write_u8(ACTION_SCHEDULED);
                self.write_u64(deadline.nanos());
            }
            TimerAction::Cancelled => {
                self.write_u8(ACTION_CANCELLED);
                self.write_u64(0);
            }
            TimerAction::Fired => {
                self.write_u8(ACTION_FIRED);
                self.write_u64(0);
            }
        }
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        self.write_header(TAG_TRANSITION, e.hud, e.at);
        self.write_u8(match e.direction {
            Direction::In => 0,
            Direction::Out => 1,
        });
        self.write_kind(e.kind);
        self.write_u8(match e.phase {
            TransitionPhase::Began => 0,
            TransitionPhase::Interrupted => 1,
            TransitionPhase::Finished => 2,
        });
        self.write_u8(u8::from(e.animated));
    }

    fn on_cleanup(&mut self, e: &CleanupEvent) {
        self.write_header(TAG_CLEANUP, e.hud, e.at);
        self.write_u8(u8::from(e.detached));
    }

    fn on_progress(&mut self, e: &ProgressEvent) {
        self.write_header(TAG_PROGRESS, e.hud, e.at);
        self.write_u64(e.fraction.to_bits());
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`LifecycleEvent`].
    Lifecycle(LifecycleEvent),
    /// A [`TimerEvent`].
    Timer(TimerEvent),
    /// A [`TransitionEvent`].
    Transition(TransitionEvent),
    /// A [`CleanupEvent`].
    Cleanup(CleanupEvent),
    /// A [`ProgressEvent`].
    Progress(ProgressEvent),
}

impl RecordedEvent {
    /// The HUD the event is about.
    #[must_use]
    pub fn hud(&self) -> HudId {
        match self {
            Self::Lifecycle(e) => e.hud,
            Self::Timer(e) => e.hud,
            Self::Transition(e) => e.hud,
            Self::Cleanup(e) => e.hud,
            Self::Progress(e) => e.hud,
        }
    }

    /// When the event happened.
    #[must_use]
    pub fn at(&self) -> HostTime {
        match self {
            Self::Lifecycle(e) => e.at,
            Self::Timer(e) => e.at,
            Self::Transition(e) => e.at,
            Self::Cleanup(e) => e.at,
            Self::Progress(e) => e.at,
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_header(&mut self) -> Option<(HudId, HostTime)> {
        Some((HudId(self.read_u32()?), HostTime(self.read_u64()?)))
    }

    fn read_lifecycle(&mut self) -> Option<LifecycleKind> {
        Some(match self.read_u8()? {
            0 => LifecycleKind::Idle,
            1 => LifecycleKind::PendingShow,
            2 => LifecycleKind::Visible,
            3 => LifecycleKind::PendingHide,
            4 => LifecycleKind::Hiding,
            _ => LifecycleKind::Removed,
        })
    }

    fn read_role(&mut self) -> Option<TimerRole> {
        Some(match self.read_u8()? {
            0 => TimerRole::Grace,
            1 => TimerRole::MinShow,
            _ => TimerRole::HideDelay,
        })
    }

    fn read_kind(&mut self) -> Option<AnimationKind> {
        Some(match self.read_u8()? {
            0 => AnimationKind::Fade,
            1 => AnimationKind::Zoom,
            2 => AnimationKind::ZoomIn,
            _ => AnimationKind::ZoomOut,
        })
    }

    fn decode_lifecycle(&mut self) -> Option<RecordedEvent> {
        let (hud, at) = self.read_header()?;
        Some(RecordedEvent::Lifecycle(LifecycleEvent {
            hud,
            at,
            from: self.read_lifecycle()?,
            to: self.read_lifecycle()?,
        }))
    }

    fn decode_timer(&mut self) -> Option<RecordedEvent> {
        let (hud, at) = self.read_header()?;
        let role = self.read_role()?;
        let action = self.read_u8()?;
        let deadline = self.read_u64()?;
        let action = match action {
            ACTION_SCHEDULED => TimerAction::Scheduled {
                deadline: HostTime(deadline),
            },
            ACTION_CANCELLED => TimerAction::Cancelled,
            _ => TimerAction::Fired,
        };
        Some(RecordedEvent::Timer(TimerEvent {
            hud,
            at,
            role,
            action,
        }))
    }

    fn decode_transition(&mut self) -> Option<RecordedEvent> {
        let (hud, at) = self.read_header()?;
        Some(RecordedEvent::Transition(TransitionEvent {
            hud,
            at,
            direction: match self.read_u8()? {
                0 => Direction::In,
                _ => Direction::Out,
            },
            kind: self.read_kind()?,
            phase: match self.read_u8()? {
                0 => TransitionPhase::Began,
                1 => TransitionPhase::Interrupted,
                _ => TransitionPhase::Finished,
            },
            animated: self.read_u8()? != 0,
        }))
    }

    fn decode_cleanup(&mut self) -> Option<RecordedEvent> {
        let (hud, at) = self.read_header()?;
        Some(RecordedEvent::Cleanup(CleanupEvent {
            hud,
            at,
            detached: self.read_u8()? != 0,
        }))
    }

    fn decode_progress(&mut self) -> Option<RecordedEvent> {
        let (hud, at) = self.read_header()?;
        Some(RecordedEvent::Progress(ProgressEvent {
            hud,
            at,
            fraction: f64::from_bits(self.read_u64()?),
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_LIFECYCLE => self.decode_lifecycle(),
            TAG_TIMER => self.decode_timer(),
            TAG_TRANSITION => self.decode_transition(),
            TAG_CLEANUP => self.decode_cleanup(),
            TAG_PROGRESS => self.decode_progress(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> HostTime {
        HostTime::from_millis(ms)
    }

    #[test]
    fn timer_actions_keep_their_deadline() {
        let mut rec = RecorderSink::new();
        let scheduled = TimerEvent {
            hud: HudId(2),
            at: at(0),
            role: TimerRole::Grace,
            action: TimerAction::Scheduled { deadline: at(500) },
        };
        let cancelled = TimerEvent {
            action: TimerAction::Cancelled,
            at: at(100),
            ..scheduled
        };
        rec.on_timer(&scheduled);
        rec.on_timer(&cancelled);

        assert_eq!(
            rec.events(),
            [RecordedEvent::Timer(scheduled), RecordedEvent::Timer(cancelled)]
        );
    }

    #[test]
    fn mixed_events_decode_in_order() {
        let mut rec = RecorderSink::new();
        let lifecycle = LifecycleEvent {
            hud: HudId(1),
            at: at(0),
            from: LifecycleKind::Idle,
            to: LifecycleKind::Visible,
        };
        let transition = TransitionEvent {
            hud: HudId(1),
            at: at(0),
            direction: Direction::In,
            kind: AnimationKind::ZoomIn,
            phase: TransitionPhase::Began,
            animated: true,
        };
        let progress = ProgressEvent {
            hud: HudId(1),
            at: at(16),
            fraction: 0.25,
        };
        let cleanup = CleanupEvent {
            hud: HudId(1),
            at: at(900),
            detached: true,
        };
        rec.on_lifecycle(&lifecycle);
        rec.on_transition(&transition);
        rec.on_progress(&progress);
        rec.on_cleanup(&cleanup);

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(
            events,
            [
                RecordedEvent::Lifecycle(lifecycle),
                RecordedEvent::Transition(transition),
                RecordedEvent::Progress(progress),
                RecordedEvent::Cleanup(cleanup),
            ]
        );
        assert_eq!(events[2].at(), at(16));
        assert_eq!(events[3].hud(), HudId(1));
    }

    #[test]
    fn truncated_and_empty_buffers() {
        assert!(decode(&[]).next().is_none());

        let mut rec = RecorderSink::new();
        rec.on_cleanup(&CleanupEvent {
            hud: HudId(1),
            at: at(5),
            detached: false,
        });
        let bytes = rec.into_bytes();
        assert!(decode(&bytes[..bytes.len() - 1]).next().is_none());
        assert!(decode(&[0xff, 0, 0]).next().is_none(), "unknown tag stops");
    }
}
