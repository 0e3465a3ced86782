// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial damage tracking for partial re-rendering.

use alloc::vec::Vec;

use bezel_core::node::{HudChanges, Node};
use bezel_core::transition::LARGE_SCALE;
use kurbo::{Affine, Rect};

use crate::layout::BezelLayout;

/// Room left around damaged frames for stroke overhang and antialiasing.
const OVERHANG: f64 = 2.0;

/// A region of the host surface that needs re-rendering.
///
/// Hosts can use this to only redraw areas that changed since the last
/// frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DamageRegion {
    /// The entire host surface needs redrawing.
    #[default]
    Full,
    /// Rectangles in host coordinates that need redrawing.
    Rects(Vec<Rect>),
    /// Nothing changed; the previous frame can be reused.
    None,
}

impl DamageRegion {
    /// Returns `true` if no region needs redrawing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Merges another damage region into this one.
    pub fn merge(&mut self, other: &Self) {
        match (&*self, other) {
            (Self::Full, _) | (_, Self::Full) => *self = Self::Full,
            (Self::None, _) => *self = other.clone(),
            (_, Self::None) => {}
            (Self::Rects(a), Self::Rects(b)) => {
                let mut merged = a.clone();
                merged.extend_from_slice(b);
                *self = Self::Rects(merged);
            }
        }
    }

    /// Damage caused by one evaluation's `changes` to a HUD laid out as
    /// `layout`.
    ///
    /// Attachment, mounting, relayout and anything touching the container or
    /// the dimming background damage the whole surface. Otherwise the bezel
    /// or the changed content nodes are damaged, grown to cover the largest
    /// zoom the bezel can be drawn at.
    #[must_use]
    pub fn from_changes(changes: &HudChanges, layout: &BezelLayout) -> Self {
        if changes.is_empty() {
            return Self::None;
        }
        let whole_surface = |nodes: &[Node]| {
            nodes
                .iter()
                .any(|n| matches!(n, Node::Container | Node::Background))
        };
        if changes.attached
            || changes.detached
            || changes.topology_changed
            || !changes.layout.is_empty()
            || whole_surface(&changes.transforms)
            || whole_surface(&changes.opacities)
            || whole_surface(&changes.content)
        {
            return Self::Full;
        }

        let zoom = Affine::scale_about(LARGE_SCALE, layout.bezel.center());
        let damaged = |rect: Rect| zoom.transform_rect_bbox(rect).inflate(OVERHANG, OVERHANG);
        let bezel_changed = [&changes.transforms, &changes.opacities, &changes.content]
            .iter()
            .any(|list| list.contains(&Node::Bezel));
        if bezel_changed {
            return Self::Rects(alloc::vec![damaged(layout.bezel)]);
        }

        let mut rects: Vec<Rect> = Vec::new();
        for node in changes
            .transforms
            .iter()
            .chain(&changes.opacities)
            .chain(&changes.content)
        {
            if let Some(frame) = layout.frame(*node) {
                let rect = damaged(frame);
                if !rects.contains(&rect) {
                    rects.push(rect);
                }
            }
        }
        if rects.is_empty() {
            Self::None
        } else {
            Self::Rects(rects)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn layout() -> BezelLayout {
        BezelLayout {
            host: Rect::new(0.0, 0.0, 320.0, 480.0),
            bezel: Rect::new(120.0, 200.0, 200.0, 280.0),
            indicator: Some(Rect::new(140.0, 220.0, 180.0, 260.0)),
            ..BezelLayout::default()
        }
    }

    #[test]
    fn merge_rules() {
        let mut d = DamageRegion::None;
        d.merge(&DamageRegion::Rects(vec![Rect::new(0.0, 0.0, 10.0, 10.0)]));
        assert!(matches!(&d, DamageRegion::Rects(r) if r.len() == 1));
        d.merge(&DamageRegion::Rects(vec![Rect::new(5.0, 5.0, 20.0, 20.0)]));
        assert!(matches!(&d, DamageRegion::Rects(r) if r.len() == 2));
        d.merge(&DamageRegion::None);
        assert!(matches!(&d, DamageRegion::Rects(r) if r.len() == 2));
        d.merge(&DamageRegion::Full);
        assert_eq!(d, DamageRegion::Full);
        assert!(!d.is_empty());
        assert!(DamageRegion::None.is_empty());
    }

    #[test]
    fn no_changes_no_damage() {
        assert!(DamageRegion::from_changes(&HudChanges::default(), &layout()).is_empty());
    }

    #[test]
    fn attachment_and_background_are_full() {
        let changes = HudChanges {
            detached: true,
            ..HudChanges::default()
        };
        assert_eq!(DamageRegion::from_changes(&changes, &layout()), DamageRegion::Full);
        let changes = HudChanges {
            opacities: vec![Node::Background],
            ..HudChanges::default()
        };
        assert_eq!(DamageRegion::from_changes(&changes, &layout()), DamageRegion::Full);
    }

    #[test]
    fn bezel_change_covers_its_largest_zoom() {
        let changes = HudChanges {
            transforms: vec![Node::Bezel, Node::Indicator],
            opacities: vec![Node::Bezel, Node::Indicator],
            ..HudChanges::default()
        };
        let DamageRegion::Rects(rects) = DamageRegion::from_changes(&changes, &layout()) else {
            panic!("bezel changes are partial damage");
        };
        assert_eq!(rects, [Rect::new(98.0, 178.0, 222.0, 302.0)]);
    }

    #[test]
    fn indicator_content_damages_only_the_indicator() {
        let changes = HudChanges {
            content: vec![Node::Indicator],
            ..HudChanges::default()
        };
        let DamageRegion::Rects(rects) = DamageRegion::from_changes(&changes, &layout()) else {
            panic!("content changes are partial damage");
        };
        assert_eq!(rects, [Rect::new(128.0, 208.0, 192.0, 272.0)]);
    }
}
