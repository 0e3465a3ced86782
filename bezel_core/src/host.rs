// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract for embedding a HUD.
//!
//! Bezel never owns a view tree, a clock or a thread. The embedding
//! application supplies the following pieces:
//!
//! - **Tick source**: calls [`Hud::tick`] at display-refresh cadence while
//!   [`TickOutcome::needs_frame`] is set, and otherwise at
//!   [`Hud::next_deadline`]. Not abstracted by a trait because every UI
//!   toolkit drives its loop differently.
//!
//! - **Presenter**: implements [`Presenter`] to apply evaluated
//!   [`HudChanges`] to a native subtree (or to a software renderer through
//!   `bezel_render`).
//!
//! - **Delegate**: optionally implements [`HudDelegate`] to hear about
//!   completed hides.
//!
//! - **Progress feed**: optionally implements [`ProgressFeed`] so background
//!   work can report progress without touching the HUD. The HUD polls it
//!   once per tick while visible. [`SharedProgress`] is a ready-made feed
//!   backed by an atomic.
//!
//! # Frame loop pseudocode
//!
//! ```rust,ignore
//! fn on_frame(tick: FrameTick) {
//!     // Fire timers, advance transitions, poll the feed
//!     let outcome = hud.tick(&tick);
//!
//!     // Evaluate: drain dirty channels, recompute opacity and transforms
//!     let changes = hud.evaluate();
//!
//!     // Present: apply incremental changes to the native subtree
//!     presenter.apply(&hud, &changes);
//!
//!     // Sleep until the next refresh or timer
//!     schedule_wakeup(outcome.wake_at(&tick));
//! }
//! ```
//!
//! [`Hud::tick`]: crate::hud::Hud::tick
//! [`Hud::next_deadline`]: crate::hud::Hud::next_deadline
//! [`TickOutcome::needs_frame`]: crate::timing::TickOutcome::needs_frame

#[cfg(target_has_atomic = "64")]
use alloc::sync::Arc;
#[cfg(target_has_atomic = "64")]
use core::sync::atomic::{AtomicU64, Ordering};

use crate::hud::{Hud, HudId};
use crate::indicator::clamp_fraction;
use crate::node::HudChanges;

/// Applies evaluated HUD changes to a native presentation subtree.
///
/// Native view presenters, `bezel_render` and test doubles all implement
/// this trait, enabling generic host loops.
pub trait Presenter {
    /// Applies `changes` to the backing subtree, reading current property
    /// values from `hud` as needed.
    fn apply(&mut self, hud: &Hud, changes: &HudChanges);
}

/// Receives notifications about a HUD.
///
/// The delegate is told after the completion handler has run.
pub trait HudDelegate {
    /// Called once a hide completes and cleanup has run.
    fn on_hidden(&mut self, id: HudId);
}

/// A source of progress polled by the HUD once per tick while it is
/// visible.
pub trait ProgressFeed {
    /// Returns the current completion fraction. Values outside `[0, 1]` are
    /// clamped and NaN reads as `0`.
    fn poll(&self) -> f64;
}

impl<F: Fn() -> f64> ProgressFeed for F {
    fn poll(&self) -> f64 {
        self()
    }
}

/// Progress published from any thread and read by the HUD's feed link.
///
/// Clones share the same value. Writers call [`set`](Self::set); the HUD
/// owns one clone as its [`ProgressFeed`].
#[cfg(target_has_atomic = "64")]
#[derive(Clone, Debug, Default)]
pub struct SharedProgress(Arc<AtomicU64>);

#[cfg(target_has_atomic = "64")]
impl SharedProgress {
    /// Creates a feed reading `0`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes `fraction`, clamped to `[0, 1]`.
    pub fn set(&self, fraction: f64) {
        self.0
            .store(clamp_fraction(fraction).to_bits(), Ordering::Relaxed);
    }

    /// Reads the last published fraction.
    #[must_use]
    pub fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }
}

#[cfg(target_has_atomic = "64")]
impl ProgressFeed for SharedProgress {
    fn poll(&self) -> f64 {
        self.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_has_atomic = "64")]
    #[test]
    fn shared_progress_clamps_and_shares() {
        let writer = SharedProgress::new();
        let reader = writer.clone();
        assert_eq!(reader.poll(), 0.0);
        writer.set(0.25);
        assert_eq!(reader.poll(), 0.25);
        writer.set(7.0);
        assert_eq!(reader.poll(), 1.0);
        writer.set(f64::NAN);
        assert_eq!(reader.poll(), 0.0);
    }

    #[test]
    fn closures_are_feeds() {
        let feed = || 0.5;
        assert_eq!(feed.poll(), 0.5);
    }
}
