// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot timers resolved on the host loop.
//!
//! A [`TimerQueue`] holds deadlines in struct-of-arrays slots with a
//! generation counter per slot. Scheduling returns a [`TimerId`] handle that
//! owns the right to cancel that one timer. Unlike layer handles, a stale
//! timer handle is not a contract violation: cancelling a timer that already
//! fired or was cancelled is a no-op, and firing retires the slot so the
//! handle goes stale by itself.
//!
//! Nothing here reads a clock. Timers come due when the owner calls
//! [`pop_due`](TimerQueue::pop_due) with the current [`HostTime`].

use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use crate::time::HostTime;

/// Which pending lifecycle transition a timer drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerRole {
    /// Delays the reveal after `show`, so short tasks never flash a HUD.
    Grace,
    /// Defers the conceal after `hide` until the HUD has been visible for the
    /// minimum show time.
    MinShow,
    /// Calls `hide` after a caller-chosen delay.
    HideDelay,
}

impl TimerRole {
    /// A short lowercase name, for trace output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Grace => "grace",
            Self::MinShow => "min-show",
            Self::HideDelay => "hide-delay",
        }
    }
}

/// A handle to one scheduled timer in a [`TimerQueue`].
///
/// Contains both a slot index and a generation counter so that a handle to a
/// fired or cancelled timer can never cancel a later timer that reuses the
/// slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId {
    idx: u32,
    generation: u32,
}

impl TimerId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimerId({}@gen{})", self.idx, self.generation)
    }
}

#[derive(Clone, Copy, Debug)]
struct Armed {
    deadline: HostTime,
    role: TimerRole,
    /// Scheduling order, to fire equal deadlines first-in first-out.
    seq: u64,
}

/// A small queue of one-shot timers.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    generation: Vec<u32>,
    armed: Vec<Option<Armed>>,
    free_list: Vec<u32>,
    next_seq: u64,
}

impl TimerQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a timer that comes due at `deadline`.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "a HUD holds at most a handful of timers"
    )]
    pub fn schedule_at(&mut self, role: TimerRole, deadline: HostTime) -> TimerId {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.generation[idx as usize] += 1;
            idx
        } else {
            let idx = self.armed.len() as u32;
            self.generation.push(0);
            self.armed.push(None);
            idx
        };
        self.armed[idx as usize] = Some(Armed {
            deadline,
            role,
            seq: self.next_seq,
        });
        self.next_seq += 1;
        TimerId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Schedules a timer that comes due `delay` after `now`.
    pub fn schedule_after(&mut self, role: TimerRole, now: HostTime, delay: Duration) -> TimerId {
        self.schedule_at(role, now + delay)
    }

    /// Cancels a timer.
    ///
    /// Returns `true` if the timer was still armed. Cancelling a timer that
    /// already fired or was already cancelled does nothing and returns
    /// `false`.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        if !self.is_armed(id) {
            return false;
        }
        self.retire(id.idx);
        true
    }

    /// Returns whether `id` refers to a timer that has not fired or been
    /// cancelled.
    #[must_use]
    pub fn is_armed(&self, id: TimerId) -> bool {
        let i = id.idx as usize;
        i < self.armed.len() && self.generation[i] == id.generation && self.armed[i].is_some()
    }

    /// Returns the deadline of an armed timer.
    #[must_use]
    pub fn deadline(&self, id: TimerId) -> Option<HostTime> {
        if !self.is_armed(id) {
            return None;
        }
        self.armed[id.idx as usize].map(|a| a.deadline)
    }

    /// Returns the earliest deadline among armed timers.
    #[must_use]
    pub fn next_deadline(&self) -> Option<HostTime> {
        self.armed.iter().flatten().map(|a| a.deadline).min()
    }

    /// Removes and returns the earliest timer whose deadline is at or before
    /// `now`.
    ///
    /// Ties fire in scheduling order. Call repeatedly until it returns
    /// `None` to drain everything that is due.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "slot indices were allocated as u32"
    )]
    pub fn pop_due(&mut self, now: HostTime) -> Option<(TimerId, TimerRole)> {
        let (idx, armed) = self
            .armed
            .iter()
            .enumerate()
            .filter_map(|(i, a)| a.map(|a| (i, a)))
            .filter(|(_, a)| a.deadline <= now)
            .min_by_key(|(_, a)| (a.deadline, a.seq))?;
        let idx = idx as u32;
        let id = TimerId {
            idx,
            generation: self.generation[idx as usize],
        };
        self.retire(idx);
        Some((id, armed.role))
    }

    /// Cancels every armed timer.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "slot indices were allocated as u32"
    )]
    pub fn clear(&mut self) {
        for (idx, slot) in self.armed.iter_mut().enumerate() {
            if slot.take().is_some() {
                self.free_list.push(idx as u32);
            }
        }
    }

    /// Returns the number of armed timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.armed.iter().flatten().count()
    }

    /// Returns `true` if no timer is armed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.armed.iter().all(Option::is_none)
    }

    fn retire(&mut self, idx: u32) {
        self.armed[idx as usize] = None;
        self.free_list.push(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> HostTime {
        HostTime::from_millis(v)
    }

    #[test]
    fn schedule_and_pop_in_deadline_order() {
        let mut q = TimerQueue::new();
        let late = q.schedule_at(TimerRole::MinShow, ms(900));
        let early = q.schedule_at(TimerRole::Grace, ms(500));
        assert_eq!(q.len(), 2);
        assert_eq!(q.next_deadline(), Some(ms(500)));

        assert_eq!(q.pop_due(ms(100)), None, "nothing is due yet");
        assert_eq!(q.pop_due(ms(1000)), Some((early, TimerRole::Grace)));
        assert_eq!(q.pop_due(ms(1000)), Some((late, TimerRole::MinShow)));
        assert_eq!(q.pop_due(ms(1000)), None);
        assert!(q.is_empty());
    }

    #[test]
    fn equal_deadlines_fire_fifo() {
        let mut q = TimerQueue::new();
        let a = q.schedule_at(TimerRole::HideDelay, ms(10));
        let b = q.schedule_at(TimerRole::Grace, ms(10));
        assert_eq!(q.pop_due(ms(10)).map(|(id, _)| id), Some(a));
        assert_eq!(q.pop_due(ms(10)).map(|(id, _)| id), Some(b));
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut q = TimerQueue::new();
        let id = q.schedule_after(TimerRole::Grace, ms(0), Duration::from_millis(500));
        assert_eq!(q.deadline(id), Some(ms(500)));
        assert!(q.cancel(id));
        assert!(!q.cancel(id), "second cancel is a no-op");
        assert_eq!(q.next_deadline(), None);
        assert_eq!(q.deadline(id), None);
    }

    #[test]
    fn fired_handle_is_stale() {
        let mut q = TimerQueue::new();
        let id = q.schedule_at(TimerRole::Grace, ms(5));
        assert!(q.pop_due(ms(5)).is_some());
        assert!(!q.is_armed(id));
        assert!(!q.cancel(id), "cancelling a fired timer does nothing");
    }

    #[test]
    fn stale_handle_cannot_cancel_reused_slot() {
        let mut q = TimerQueue::new();
        let old = q.schedule_at(TimerRole::Grace, ms(5));
        assert!(q.cancel(old));
        let new = q.schedule_at(TimerRole::MinShow, ms(50));
        assert_eq!(old.index(), new.index(), "slot is reused");
        assert_ne!(old.generation(), new.generation());
        assert!(!q.cancel(old));
        assert!(q.is_armed(new), "new timer survives the stale cancel");
    }

    #[test]
    fn clear_disarms_everything() {
        let mut q = TimerQueue::new();
        let a = q.schedule_at(TimerRole::Grace, ms(1));
        let b = q.schedule_at(TimerRole::HideDelay, ms(2));
        q.clear();
        assert!(q.is_empty());
        assert!(!q.is_armed(a));
        assert!(!q.is_armed(b));
        assert_eq!(q.pop_due(ms(100)), None);
    }
}
