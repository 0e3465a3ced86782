// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Evaluation and change tracking.
//!
//! Evaluation follows a drain-recompute pattern for each dirty channel:
//!
//! 1. **TRANSFORM**: drain dirty nodes, recompute each node's
//!    `world_transform` as `parent_world * local_transform`.
//! 2. **OPACITY**: drain dirty nodes, recompute each node's
//!    `effective_opacity` as `parent_effective * local_opacity`.
//! 3. **CONTENT** / **LAYOUT**: drain dirty nodes (no recomputation;
//!    presenters read the current values from the HUD directly).
//! 4. **TOPOLOGY**: drain; mounts and unmounts are reported from the
//!    pending lists.
//!
//! Attachment requests are resolved last, so a presenter sees
//! [`HudChanges::detached`] together with the final fade to transparent.

use alloc::vec::Vec;

use kurbo::Affine;

use super::{Node, NodeTree};
use crate::dirty;

/// The set of changes produced by a single evaluation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HudChanges {
    /// Nodes whose world transform was recomputed.
    pub transforms: Vec<Node>,
    /// Nodes whose effective opacity was recomputed.
    pub opacities: Vec<Node>,
    /// Nodes whose drawn content changed.
    pub content: Vec<Node>,
    /// Nodes whose size or placement changed.
    pub layout: Vec<Node>,
    /// Nodes mounted since the last evaluation.
    pub mounted: Vec<Node>,
    /// Nodes unmounted since the last evaluation.
    pub unmounted: Vec<Node>,
    /// Whether any node was mounted or unmounted.
    pub topology_changed: bool,
    /// The container was attached to the host surface.
    pub attached: bool,
    /// The container was detached from the host surface.
    pub detached: bool,
}

impl HudChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.transforms.clear();
        self.opacities.clear();
        self.content.clear();
        self.layout.clear();
        self.mounted.clear();
        self.unmounted.clear();
        self.topology_changed = false;
        self.attached = false;
        self.detached = false;
    }

    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
            && self.opacities.is_empty()
            && self.content.is_empty()
            && self.layout.is_empty()
            && self.mounted.is_empty()
            && self.unmounted.is_empty()
            && !self.topology_changed
            && !self.attached
            && !self.detached
    }
}

fn to_nodes(indices: impl Iterator<Item = u32>) -> Vec<Node> {
    indices.filter_map(Node::from_index).collect()
}

impl NodeTree {
    /// Evaluates the tree, recomputing dirty properties and returning the
    /// set of changes.
    pub fn evaluate(&mut self) -> HudChanges {
        let mut changes = HudChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer
    /// to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut HudChanges) {
        changes.clear();

        let mut dirty_transforms = to_nodes(
            self.dirty
                .drain(dirty::TRANSFORM)
                .affected()
                .deterministic()
                .run(),
        );
        // Slot order is parent-before-child.
        dirty_transforms.sort_unstable();
        for &node in &dirty_transforms {
            let i = node.index() as usize;
            let parent_world = node.parent().map_or(Affine::IDENTITY, |p| {
                self.world_transform[p.index() as usize]
            });
            self.world_transform[i] = parent_world * self.local_transform[i];
        }
        changes.transforms = dirty_transforms;

        let mut dirty_opacities = to_nodes(
            self.dirty
                .drain(dirty::OPACITY)
                .affected()
                .deterministic()
                .run(),
        );
        dirty_opacities.sort_unstable();
        for &node in &dirty_opacities {
            let i = node.index() as usize;
            let parent_opacity = node
                .parent()
                .map_or(1.0, |p| self.effective_opacity[p.index() as usize]);
            self.effective_opacity[i] = parent_opacity * self.local_opacity[i];
        }
        changes.opacities = dirty_opacities;

        changes.content = to_nodes(self.dirty.drain(dirty::CONTENT).deterministic().run());
        changes.layout = to_nodes(self.dirty.drain(dirty::LAYOUT).deterministic().run());

        // Drain TOPOLOGY; the pending lists say what actually changed.
        let _: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();
        core::mem::swap(&mut self.pending_mounted, &mut changes.mounted);
        core::mem::swap(&mut self.pending_unmounted, &mut changes.unmounted);
        changes.topology_changed = !changes.mounted.is_empty() || !changes.unmounted.is_empty();

        if self.pending_attach {
            self.pending_attach = false;
            self.attached = true;
            changes.attached = true;
        }
        if self.pending_detach {
            self.pending_detach = false;
            self.attached = false;
            changes.detached = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settled() -> NodeTree {
        let mut tree = NodeTree::new();
        let _ = tree.evaluate();
        tree
    }

    #[test]
    fn first_evaluate_reports_everything() {
        let mut tree = NodeTree::new();
        let changes = tree.evaluate();
        assert_eq!(changes.transforms, Node::ALL);
        assert_eq!(changes.opacities, Node::ALL);
        assert_eq!(
            changes.mounted,
            [Node::Container, Node::Background, Node::Bezel, Node::Indicator]
        );
        assert!(changes.topology_changed);
        assert_eq!(tree.effective_opacity(Node::Indicator), 0.0);
    }

    #[test]
    fn no_change_evaluate_returns_empty() {
        let mut tree = settled();
        assert!(tree.evaluate().is_empty());
    }

    #[test]
    fn container_opacity_propagates() {
        let mut tree = settled();
        tree.set_opacity(Node::Container, 1.0);
        tree.set_opacity(Node::Bezel, 0.5);
        tree.set_opacity(Node::Label, 0.5);
        let changes = tree.evaluate();
        assert!(changes.opacities.contains(&Node::Label));
        assert!(changes.opacities.contains(&Node::Background));
        let eps = 1e-12;
        assert!((tree.effective_opacity(Node::Bezel) - 0.5).abs() < eps);
        assert!((tree.effective_opacity(Node::Label) - 0.25).abs() < eps);
        assert!(tree.effective_opacity(Node::Background) == 0.0);
    }

    #[test]
    fn bezel_scale_reaches_children_only() {
        let mut tree = settled();
        tree.set_transform(Node::Bezel, Affine::scale(0.5));
        let changes = tree.evaluate();
        assert_eq!(
            changes.transforms,
            [Node::Bezel, Node::Indicator, Node::Label, Node::Details, Node::Button]
        );
        assert_eq!(tree.world_transform(Node::Indicator), Affine::scale(0.5));
        assert_eq!(tree.world_transform(Node::Background), Affine::IDENTITY);
    }

    #[test]
    fn unchanged_values_do_not_mark() {
        let mut tree = settled();
        tree.set_opacity(Node::Bezel, 0.0);
        tree.set_transform(Node::Bezel, Affine::IDENTITY);
        assert!(tree.evaluate().is_empty());
    }

    #[test]
    fn mounting_reports_topology_and_layout() {
        let mut tree = settled();
        tree.set_mounted(Node::Label, true);
        tree.set_mounted(Node::Indicator, false);
        let changes = tree.evaluate();
        assert_eq!(changes.mounted, [Node::Label]);
        assert_eq!(changes.unmounted, [Node::Indicator]);
        assert!(changes.topology_changed);
        assert!(changes.layout.contains(&Node::Bezel));
        assert!(changes.content.contains(&Node::Label));
    }

    #[test]
    fn mount_then_unmount_in_one_frame_cancels() {
        let mut tree = settled();
        tree.set_mounted(Node::Button, true);
        tree.set_mounted(Node::Button, false);
        let changes = tree.evaluate();
        assert!(changes.mounted.is_empty());
        assert!(changes.unmounted.is_empty());
        assert!(!changes.topology_changed);
    }

    #[test]
    fn attach_and_detach_lifecycle() {
        let mut tree = settled();
        tree.request_attach();
        let changes = tree.evaluate();
        assert!(changes.attached);
        assert!(tree.is_attached());

        assert!(!tree.evaluate().attached, "attach is reported once");

        tree.request_detach();
        let changes = tree.evaluate();
        assert!(changes.detached);
        assert!(!tree.is_attached());

        tree.request_detach();
        assert!(!tree.evaluate().detached, "already detached");
    }

    #[test]
    fn evaluate_into_reuses_buffer() {
        let mut tree = NodeTree::new();
        let mut changes = HudChanges::default();
        tree.evaluate_into(&mut changes);
        assert!(!changes.mounted.is_empty());

        tree.set_opacity(Node::Label, 0.5);
        tree.evaluate_into(&mut changes);
        assert!(changes.mounted.is_empty(), "mounted should be cleared");
        assert_eq!(changes.opacities, [Node::Label]);
    }
}
