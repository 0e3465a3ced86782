// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The HUDs attached to one host surface.

use alloc::vec::Vec;

use kurbo::Rect;

use super::{Hud, HudId};
use crate::controller::Lifecycle;
use crate::host::Presenter;
use crate::node::HudChanges;
use crate::time::HostTime;
use crate::timing::{FrameTick, TickOutcome};

/// The HUDs shown over one host surface, bottom to top.
///
/// A stack lets the host drive every HUD from one loop and find the topmost
/// one again without keeping handles around. HUDs that detach for good are
/// dropped after the presenter has seen them go.
#[derive(Debug, Default)]
pub struct HudStack {
    host_bounds: Rect,
    huds: Vec<Hud>,
    changes: HudChanges,
}

impl HudStack {
    /// Creates an empty stack over a host surface covering `host_bounds`.
    #[must_use]
    pub fn new(host_bounds: Rect) -> Self {
        Self {
            host_bounds,
            huds: Vec::new(),
            changes: HudChanges::default(),
        }
    }

    /// Attaches `hud` on top of the stack and returns its id.
    pub fn push(&mut self, mut hud: Hud) -> HudId {
        hud.attach(self.host_bounds);
        let id = hud.id();
        self.huds.push(hud);
        id
    }

    /// Attaches `hud` on top, marks it to detach once hidden, and shows it.
    pub fn show_hud(&mut self, mut hud: Hud, now: HostTime, animated: bool) -> HudId {
        hud.set_remove_on_hide(true);
        let id = self.push(hud);
        if let Some(hud) = self.huds.last_mut() {
            hud.show(now, animated);
        }
        id
    }

    /// Hides the topmost HUD that is still attached, and detaches it once
    /// hidden. Returns `false` if there is none.
    pub fn hide_top(&mut self, now: HostTime, animated: bool) -> bool {
        let Some(hud) = self.top_mut() else {
            return false;
        };
        hud.set_remove_on_hide(true);
        hud.hide(now, animated);
        true
    }

    /// The topmost HUD that has not been removed.
    #[must_use]
    pub fn top(&self) -> Option<&Hud> {
        self.huds
            .iter()
            .rev()
            .find(|hud| hud.lifecycle() != Lifecycle::Removed)
    }

    /// Mutable access to the topmost HUD that has not been removed.
    pub fn top_mut(&mut self) -> Option<&mut Hud> {
        self.huds
            .iter_mut()
            .rev()
            .find(|hud| hud.lifecycle() != Lifecycle::Removed)
    }

    /// The HUD with the given id.
    #[must_use]
    pub fn get(&self, id: HudId) -> Option<&Hud> {
        self.huds.iter().find(|hud| hud.id() == id)
    }

    /// Mutable access to the HUD with the given id.
    pub fn get_mut(&mut self, id: HudId) -> Option<&mut Hud> {
        self.huds.iter_mut().find(|hud| hud.id() == id)
    }

    /// Number of HUDs in the stack, including ones awaiting removal.
    #[must_use]
    pub fn len(&self) -> usize {
        self.huds.len()
    }

    /// Returns `true` if the stack holds no HUDs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.huds.is_empty()
    }

    /// Iterates over the HUDs, bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Hud> {
        self.huds.iter()
    }

    /// Forwards new host bounds to every HUD.
    pub fn on_host_bounds_changed(&mut self, host_bounds: Rect) {
        self.host_bounds = host_bounds;
        for hud in &mut self.huds {
            hud.on_host_bounds_changed(host_bounds);
        }
    }

    /// Ticks every HUD and merges what they need next.
    pub fn tick(&mut self, tick: &FrameTick) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        for hud in &mut self.huds {
            let o = hud.tick(tick);
            outcome.needs_frame |= o.needs_frame;
            outcome.next_deadline = match (outcome.next_deadline, o.next_deadline) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            };
        }
        outcome
    }

    /// Evaluates every HUD, hands the changes to `presenter`, then drops the
    /// HUDs that were removed and are no longer attached.
    pub fn present(&mut self, presenter: &mut impl Presenter) {
        for hud in &mut self.huds {
            hud.evaluate_into(&mut self.changes);
            if !self.changes.is_empty() {
                presenter.apply(hud, &self.changes);
            }
        }
        self.huds.retain(|hud| {
            hud.lifecycle() != Lifecycle::Removed || hud.nodes().is_attached()
        });
    }
}
