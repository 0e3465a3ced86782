// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render plan: the visible nodes of one HUD, back to front.

use alloc::string::String;
use alloc::vec::Vec;

use bezel_core::hud::{BUTTON_BORDER_WIDTH, BezelStyle, DETAILS_FONT_SIZE, Hud, LABEL_FONT_SIZE};
use bezel_core::indicator::{CustomKind, Indicator};
use bezel_core::node::Node;
use kurbo::{Affine, Rect};
use peniko::Color;

use crate::layout::BezelLayout;
use crate::paint::{DrawOp, paint_indicator, paint_panel};

/// What a render item draws.
#[derive(Clone, Debug, PartialEq)]
pub enum ItemContent {
    /// The dimming background or the bezel panel.
    Panel {
        /// Fill style, so the host can blur behind blurred panels.
        style: BezelStyle,
        /// The panel fill.
        fill: DrawOp,
    },
    /// A built-in indicator, as draw ops.
    Indicator {
        /// Fills and strokes, back to front.
        ops: Vec<DrawOp>,
    },
    /// Custom content the host draws itself.
    Surface {
        /// The id the content was registered with.
        id: u64,
    },
    /// A label.
    Text {
        /// The text.
        text: String,
        /// Font size in points; the main label is bold.
        font_size: f64,
        /// Text color.
        color: Color,
    },
    /// The action button: a bordered capsule with a centered title.
    Button {
        /// The title.
        title: String,
        /// Title font size.
        font_size: f64,
        /// Title and border color.
        color: Color,
        /// Border width.
        border_width: f64,
        /// Corner radius of the border.
        corner_radius: f64,
    },
}

/// One visible node, ready to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderItem {
    /// The node this item draws.
    pub node: Node,
    /// Frame in host coordinates, before `transform`.
    pub frame: Rect,
    /// Host-space transform, including the bezel zoom about its center.
    pub transform: Affine,
    /// Effective opacity, accumulated from ancestors.
    pub opacity: f64,
    /// What to draw.
    pub content: ItemContent,
}

/// The visible nodes of one HUD for one frame, back to front.
///
/// Hosts either draw the items directly or map each [`Node`] onto a native
/// layer and copy the item's properties over.
#[derive(Clone, Debug, Default)]
pub struct RenderPlan {
    /// Items in back-to-front order.
    pub items: Vec<RenderItem>,
}

impl RenderPlan {
    /// Creates an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the plan for reuse.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Builds the plan for `hud` laid out as `layout`.
    #[must_use]
    pub fn build(hud: &Hud, layout: &BezelLayout) -> Self {
        let mut plan = Self::new();
        plan.build_into(hud, layout);
        plan
    }

    /// Rebuilds this plan for `hud`, reusing its allocation.
    ///
    /// Detached HUDs produce no items, and neither do unmounted or fully
    /// transparent nodes.
    pub fn build_into(&mut self, hud: &Hud, layout: &BezelLayout) {
        self.clear();
        let nodes = hud.nodes();
        if !nodes.is_attached() {
            return;
        }
        let pivot = Affine::translate(layout.bezel.center().to_vec2());
        for node in Node::ALL {
            if node == Node::Container || !nodes.is_mounted(node) {
                continue;
            }
            let opacity = nodes.effective_opacity(node);
            if opacity <= 0.0 {
                continue;
            }
            let Some(frame) = layout.frame(node) else {
                continue;
            };
            let Some(content) = content_for(hud, node, frame) else {
                continue;
            };
            self.items.push(RenderItem {
                node,
                frame,
                transform: pivot * nodes.world_transform(node) * pivot.inverse(),
                opacity,
                content,
            });
        }
    }
}

fn content_for(hud: &Hud, node: Node, frame: Rect) -> Option<ItemContent> {
    let color = hud.content_color();
    Some(match node {
        Node::Container => return None,
        Node::Background => panel(hud.background_style(), frame),
        Node::Bezel => panel(hud.bezel_style(), frame),
        Node::Indicator => match hud.indicator() {
            Indicator::Custom(custom) => match custom.content().kind {
                CustomKind::Surface(id) => ItemContent::Surface { id },
                CustomKind::Icon(_) => ItemContent::Indicator {
                    ops: paint_indicator(hud.indicator(), frame),
                },
            },
            indicator => ItemContent::Indicator {
                ops: paint_indicator(indicator, frame),
            },
        },
        Node::Label => ItemContent::Text {
            text: hud.label()?.into(),
            font_size: LABEL_FONT_SIZE,
            color,
        },
        Node::Details => ItemContent::Text {
            text: hud.details()?.into(),
            font_size: DETAILS_FONT_SIZE,
            color,
        },
        Node::Button => ItemContent::Button {
            title: hud.button()?.title.clone(),
            font_size: DETAILS_FONT_SIZE,
            color,
            border_width: BUTTON_BORDER_WIDTH,
            corner_radius: frame.height() / 2.0,
        },
    })
}

fn panel(style: BezelStyle, frame: Rect) -> ItemContent {
    ItemContent::Panel {
        style,
        fill: paint_panel(&style, frame),
    }
}
