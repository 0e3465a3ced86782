// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-shape node storage with dirty tracking.

use alloc::vec::Vec;

use kurbo::Affine;
use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use super::Node;
use crate::dirty;

const N: usize = Node::COUNT;

/// Per-node properties of one HUD, with dirty tracking.
///
/// Mutators mark the appropriate channel only when the value actually
/// changes. World transforms and effective opacities are derived and only
/// refreshed by [`evaluate`](Self::evaluate).
pub struct NodeTree {
    pub(super) local_transform: [Affine; N],
    pub(super) local_opacity: [f64; N],
    pub(super) mounted: [bool; N],
    pub(super) world_transform: [Affine; N],
    pub(super) effective_opacity: [f64; N],
    pub(super) dirty: DirtyTracker<u32>,
    pub(super) pending_mounted: Vec<Node>,
    pub(super) pending_unmounted: Vec<Node>,
    pub(super) attached: bool,
    pub(super) pending_attach: bool,
    pub(super) pending_detach: bool,
}

impl core::fmt::Debug for NodeTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeTree")
            .field("local_opacity", &self.local_opacity)
            .field("mounted", &self.mounted)
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}

impl Default for NodeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeTree {
    /// Creates the tree of a HUD that has never been shown.
    ///
    /// The container, background and bezel start transparent; the indicator
    /// is mounted (spinner mode is the default) and the labels and button
    /// are not. Everything is dirty so the first evaluation reports the full
    /// state.
    #[must_use]
    pub fn new() -> Self {
        let mut tree = Self {
            local_transform: [Affine::IDENTITY; N],
            local_opacity: [1.0; N],
            mounted: [false; N],
            world_transform: [Affine::IDENTITY; N],
            effective_opacity: [1.0; N],
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            pending_mounted: Vec::new(),
            pending_unmounted: Vec::new(),
            attached: false,
            pending_attach: false,
            pending_detach: false,
        };
        for node in [Node::Container, Node::Background, Node::Bezel] {
            tree.local_opacity[node.index() as usize] = 0.0;
        }
        for node in Node::ALL {
            if let Some(parent) = node.parent() {
                let _ = tree
                    .dirty
                    .add_dependency(node.index(), parent.index(), dirty::TRANSFORM);
                let _ = tree
                    .dirty
                    .add_dependency(node.index(), parent.index(), dirty::OPACITY);
            }
            tree.dirty.mark(node.index(), dirty::CONTENT);
            tree.dirty.mark(node.index(), dirty::LAYOUT);
        }
        for node in [Node::Container, Node::Background, Node::Bezel, Node::Indicator] {
            tree.mounted[node.index() as usize] = true;
            tree.pending_mounted.push(node);
            tree.dirty.mark(node.index(), dirty::TOPOLOGY);
        }
        tree.dirty
            .mark_with(Node::Container.index(), dirty::TRANSFORM, &EagerPolicy);
        tree.dirty
            .mark_with(Node::Container.index(), dirty::OPACITY, &EagerPolicy);
        tree
    }

    // -- Property getters (read-only, no dirty marking) --

    /// Returns the local transform, relative to the node's center.
    #[must_use]
    pub fn local_transform(&self, node: Node) -> Affine {
        self.local_transform[node.index() as usize]
    }

    /// Returns the local opacity.
    #[must_use]
    pub fn local_opacity(&self, node: Node) -> f64 {
        self.local_opacity[node.index() as usize]
    }

    /// Returns whether the node is mounted.
    #[must_use]
    pub fn is_mounted(&self, node: Node) -> bool {
        self.mounted[node.index() as usize]
    }

    /// Returns the world transform computed by the last evaluation.
    #[must_use]
    pub fn world_transform(&self, node: Node) -> Affine {
        self.world_transform[node.index() as usize]
    }

    /// Returns the effective opacity computed by the last evaluation.
    #[must_use]
    pub fn effective_opacity(&self, node: Node) -> f64 {
        self.effective_opacity[node.index() as usize]
    }

    /// Returns whether the container is attached to the host surface, as of
    /// the last evaluation.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    // -- Mutation API (auto-marks dirty) --

    /// Sets the local transform.
    ///
    /// Marks the TRANSFORM channel dirty with eager propagation to
    /// descendants.
    pub fn set_transform(&mut self, node: Node, transform: Affine) {
        let slot = &mut self.local_transform[node.index() as usize];
        if *slot == transform {
            return;
        }
        *slot = transform;
        self.dirty
            .mark_with(node.index(), dirty::TRANSFORM, &EagerPolicy);
    }

    /// Sets the local opacity.
    ///
    /// Marks the OPACITY channel dirty with eager propagation to
    /// descendants.
    ///
    /// # Panics
    ///
    /// Panics if `opacity` is NaN.
    pub fn set_opacity(&mut self, node: Node, opacity: f64) {
        assert!(!opacity.is_nan(), "opacity must not be NaN");
        let opacity = opacity.clamp(0.0, 1.0);
        let slot = &mut self.local_opacity[node.index() as usize];
        if *slot == opacity {
            return;
        }
        *slot = opacity;
        self.dirty
            .mark_with(node.index(), dirty::OPACITY, &EagerPolicy);
    }

    /// Mounts or unmounts a node. Returns `true` if that changed anything.
    ///
    /// # Panics
    ///
    /// Panics if asked to unmount the container, background or bezel, which
    /// are always present.
    pub fn set_mounted(&mut self, node: Node, mounted: bool) -> bool {
        assert!(
            mounted || node.index() > Node::Bezel.index(),
            "{node:?} is structural and cannot be unmounted"
        );
        let slot = &mut self.mounted[node.index() as usize];
        if *slot == mounted {
            return false;
        }
        *slot = mounted;
        let (list, undo) = if mounted {
            (&mut self.pending_mounted, &mut self.pending_unmounted)
        } else {
            (&mut self.pending_unmounted, &mut self.pending_mounted)
        };
        // Mount and unmount within one frame cancel out.
        if let Some(pos) = undo.iter().position(|&n| n == node) {
            undo.remove(pos);
        } else {
            list.push(node);
        }
        self.dirty.mark(node.index(), dirty::TOPOLOGY);
        self.dirty.mark(node.index(), dirty::CONTENT);
        self.dirty.mark(Node::Bezel.index(), dirty::LAYOUT);
        true
    }

    /// Marks a node's drawn content dirty.
    pub fn mark_content(&mut self, node: Node) {
        self.dirty.mark(node.index(), dirty::CONTENT);
    }

    /// Marks a node's size or placement dirty.
    pub fn mark_layout(&mut self, node: Node) {
        self.dirty.mark(node.index(), dirty::LAYOUT);
    }

    /// Requests attachment to the host surface on the next evaluation.
    ///
    /// A pending detach is cancelled instead.
    pub fn request_attach(&mut self) {
        if self.pending_detach {
            self.pending_detach = false;
        } else if !self.attached {
            self.pending_attach = true;
        }
    }

    /// Requests detachment from the host surface on the next evaluation.
    ///
    /// A pending attach is cancelled instead.
    pub fn request_detach(&mut self) {
        if self.pending_attach {
            self.pending_attach = false;
        } else if self.attached {
            self.pending_detach = true;
        }
    }
}
