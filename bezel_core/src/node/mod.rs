// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The HUD's node tree.
//!
//! Every HUD has the same seven nodes in the same shape:
//!
//! ```text
//!   Container
//!   ├── Background      (dimming layer over the host surface)
//!   └── Bezel           (the rounded panel)
//!       ├── Indicator
//!       ├── Label
//!       ├── Details
//!       └── Button
//! ```
//!
//! Because the shape is fixed, nodes are named by the [`Node`] enum rather
//! than by allocated handles, and [`NodeTree`] stores per-node properties in
//! fixed-size arrays indexed by [`Node::index`]. What varies is which nodes
//! are *mounted* (the indicator only when the mode has one, the labels and
//! button only when they have content), their local opacity and transform,
//! and whether the container is attached to the host surface at all.
//!
//! Local transforms are relative to the node's center, so a bezel scale of
//! 0.5 shrinks it toward the middle of the screen.

mod evaluate;
mod tree;

pub use evaluate::HudChanges;
pub use tree::NodeTree;

use core::fmt;

/// One node of the HUD tree.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Node {
    /// Root: covers the host surface; fades as a whole on show and hide.
    Container,
    /// Dimming layer behind the bezel.
    Background,
    /// The rounded panel holding the content.
    Bezel,
    /// The mounted progress indicator.
    Indicator,
    /// Main status text.
    Label,
    /// Secondary, smaller text.
    Details,
    /// Optional action button.
    Button,
}

impl Node {
    /// Number of nodes.
    pub const COUNT: usize = 7;

    /// Every node, parents before children.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Container,
        Self::Background,
        Self::Bezel,
        Self::Indicator,
        Self::Label,
        Self::Details,
        Self::Button,
    ];

    /// Returns the node's slot index; parents have smaller indices than
    /// their children.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// Returns the node at `idx`, if any.
    #[must_use]
    pub const fn from_index(idx: u32) -> Option<Self> {
        match idx {
            0 => Some(Self::Container),
            1 => Some(Self::Background),
            2 => Some(Self::Bezel),
            3 => Some(Self::Indicator),
            4 => Some(Self::Label),
            5 => Some(Self::Details),
            6 => Some(Self::Button),
            _ => None,
        }
    }

    /// Returns the parent node; `None` for the container.
    #[must_use]
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Container => None,
            Self::Background | Self::Bezel => Some(Self::Container),
            Self::Indicator | Self::Label | Self::Details | Self::Button => Some(Self::Bezel),
        }
    }

    /// A short lowercase name, for trace output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Background => "background",
            Self::Bezel => "bezel",
            Self::Indicator => "indicator",
            Self::Label => "label",
            Self::Details => "details",
            Self::Button => "button",
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.name())
    }
}
