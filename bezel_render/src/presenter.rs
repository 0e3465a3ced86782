// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A presenter that keeps layouts, render plans and damage current.

use alloc::vec::Vec;
use core::fmt;

use bezel_core::host::Presenter;
use bezel_core::hud::{Hud, HudId};
use bezel_core::node::HudChanges;

use crate::damage::DamageRegion;
use crate::layout::{BezelLayout, TextMeasure};
use crate::plan::RenderPlan;

#[derive(Debug)]
struct Entry {
    hud: HudId,
    layout: BezelLayout,
    plan: RenderPlan,
}

/// Turns evaluated HUD changes into [`RenderPlan`]s.
///
/// One presenter serves every HUD on a host surface, so it can be handed to
/// [`HudStack::present`](bezel_core::hud::HudStack::present) directly. A
/// HUD's layout is only recomputed when it was attached, relaid out or had
/// nodes mounted or unmounted; its plan is rebuilt on every apply. Damage
/// accumulates across applies until [`take_damage`](Self::take_damage).
pub struct PlanPresenter<M> {
    measure: M,
    entries: Vec<Entry>,
    damage: DamageRegion,
}

impl<M> fmt::Debug for PlanPresenter<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanPresenter")
            .field("entries", &self.entries)
            .field("damage", &self.damage)
            .finish_non_exhaustive()
    }
}

impl<M: TextMeasure> PlanPresenter<M> {
    /// Creates a presenter measuring text with `measure`.
    #[must_use]
    pub fn new(measure: M) -> Self {
        Self {
            measure,
            entries: Vec::new(),
            damage: DamageRegion::None,
        }
    }

    /// The current plan of `hud`, if it is attached.
    #[must_use]
    pub fn plan(&self, hud: HudId) -> Option<&RenderPlan> {
        self.entry(hud).map(|e| &e.plan)
    }

    /// The current layout of `hud`, if it is attached.
    #[must_use]
    pub fn layout(&self, hud: HudId) -> Option<&BezelLayout> {
        self.entry(hud).map(|e| &e.layout)
    }

    /// Plans of every attached HUD, in the order they were first presented.
    pub fn plans(&self) -> impl Iterator<Item = (HudId, &RenderPlan)> {
        self.entries.iter().map(|e| (e.hud, &e.plan))
    }

    /// Returns the damage accumulated since the last call and resets it.
    pub fn take_damage(&mut self) -> DamageRegion {
        core::mem::replace(&mut self.damage, DamageRegion::None)
    }

    fn entry(&self, hud: HudId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.hud == hud)
    }
}

impl<M: TextMeasure> Presenter for PlanPresenter<M> {
    fn apply(&mut self, hud: &Hud, changes: &HudChanges) {
        let id = hud.id();
        let index = self.entries.iter().position(|e| e.hud == id);

        if changes.detached || !hud.nodes().is_attached() {
            if let Some(index) = index {
                let entry = self.entries.remove(index);
                self.damage
                    .merge(&DamageRegion::from_changes(changes, &entry.layout));
            }
            return;
        }

        let index = match index {
            Some(index) => {
                let entry = &mut self.entries[index];
                if changes.attached || changes.topology_changed || !changes.layout.is_empty() {
                    entry.layout = BezelLayout::compute(hud, &mut self.measure);
                }
                index
            }
            None => {
                self.entries.push(Entry {
                    hud: id,
                    layout: BezelLayout::compute(hud, &mut self.measure),
                    plan: RenderPlan::new(),
                });
                self.entries.len() - 1
            }
        };

        let entry = &mut self.entries[index];
        self.damage
            .merge(&DamageRegion::from_changes(changes, &entry.layout));
        entry.plan.build_into(hud, &entry.layout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bezel_core::config::HudConfig;
    use bezel_core::hud::HudStack;
    use bezel_core::node::Node;
    use bezel_core::time::HostTime;
    use bezel_core::timing::FrameTick;
    use kurbo::{Rect, Size};

    use crate::layout::ApproxTextMeasure;

    fn ms(v: u64) -> HostTime {
        HostTime::from_millis(v)
    }

    fn host() -> Rect {
        Rect::new(0.0, 0.0, 320.0, 480.0)
    }

    #[test]
    fn first_present_is_full_damage() {
        let mut stack = HudStack::new(host());
        let mut presenter = PlanPresenter::new(ApproxTextMeasure);
        let id = stack.show_hud(Hud::new(HudConfig::DEFAULT), ms(0), false);
        stack.present(&mut presenter);

        assert_eq!(presenter.take_damage(), DamageRegion::Full);
        assert!(presenter.take_damage().is_empty());
        let plan = presenter.plan(id).expect("attached HUDs have a plan");
        assert_eq!(plan.items.len(), 3);
        assert_eq!(
            presenter.layout(id).map(|l| l.bezel),
            Some(Rect::new(121.5, 201.5, 198.5, 278.5))
        );
    }

    #[test]
    fn spinner_steps_damage_only_the_indicator() {
        let mut stack = HudStack::new(host());
        let mut presenter = PlanPresenter::new(ApproxTextMeasure);
        let id = stack.show_hud(Hud::new(HudConfig::DEFAULT), ms(0), false);
        stack.present(&mut presenter);
        let _ = presenter.take_damage();

        stack.tick(&FrameTick::at(ms(100)));
        stack.present(&mut presenter);
        let DamageRegion::Rects(rects) = presenter.take_damage() else {
            panic!("a spinner step is partial damage");
        };
        let indicator = presenter
            .layout(id)
            .and_then(|l| l.frame(Node::Indicator))
            .expect("spinner is laid out");
        assert_eq!(rects.len(), 1);
        assert!(rects[0].contains(indicator.center()));
    }

    #[test]
    fn label_change_relays_out() {
        let mut stack = HudStack::new(host());
        let mut presenter = PlanPresenter::new(|text: &str, size: f64| {
            Size::new(text.len() as f64 * 10.0, size)
        });
        let id = stack.show_hud(Hud::new(HudConfig::DEFAULT), ms(0), false);
        stack.present(&mut presenter);
        let before = presenter.layout(id).map(|l| l.bezel);

        if let Some(hud) = stack.get_mut(id) {
            hud.set_label("A much longer label");
        }
        stack.present(&mut presenter);
        let after = presenter.layout(id).map(|l| l.bezel);
        assert_ne!(before, after);
        assert_eq!(presenter.take_damage(), DamageRegion::Full);
    }

    #[test]
    fn detached_huds_are_forgotten() {
        let mut stack = HudStack::new(host());
        let mut presenter = PlanPresenter::new(ApproxTextMeasure);
        let a = stack.show_hud(Hud::new(HudConfig::DEFAULT), ms(0), false);
        let b = stack.show_hud(Hud::new(HudConfig::DEFAULT), ms(0), false);
        stack.present(&mut presenter);
        assert_eq!(presenter.plans().count(), 2);

        assert!(stack.hide_top(ms(10), false));
        stack.present(&mut presenter);
        assert!(presenter.plan(b).is_none());
        assert!(presenter.plan(a).is_some());
        assert_eq!(stack.len(), 1);
    }
}
