// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bezel placement and content stacking.
//!
//! The bezel is centered on the host surface (plus the configured offset),
//! kept at least `margin` away from the host's edges, and sized to hold its
//! content with `margin` on every side. Content is stacked top to bottom
//! (indicator, label, details, button) with [`DEFAULT_PADDING`] between
//! items, each item centered horizontally, the stack centered vertically.

use alloc::vec::Vec;

use bezel_core::hud::{
    BUTTON_EXTRA_WIDTH, DEFAULT_PADDING, DETAILS_FONT_SIZE, Hud, LABEL_FONT_SIZE,
};
use bezel_core::indicator::ProgressIndicator;
use bezel_core::node::Node;
use kurbo::{Point, Rect, Size};

/// Measures text for layout.
///
/// Hosts implement this with their text stack. Closures
/// `FnMut(&str, f64) -> Size` taking the text and font size work too.
pub trait TextMeasure {
    /// Returns the size of `text` set at `font_size`.
    fn measure(&mut self, text: &str, font_size: f64) -> Size;
}

impl<F: FnMut(&str, f64) -> Size> TextMeasure for F {
    fn measure(&mut self, text: &str, font_size: f64) -> Size {
        self(text, font_size)
    }
}

/// A rough monospace estimate, for tests and headless demos.
///
/// Each character is 0.6 em wide; each line is 1.2 em tall.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApproxTextMeasure;

impl TextMeasure for ApproxTextMeasure {
    fn measure(&mut self, text: &str, font_size: f64) -> Size {
        let mut lines = 0_usize;
        let mut widest = 0_usize;
        for line in text.lines() {
            lines += 1;
            widest = widest.max(line.chars().count());
        }
        Size::new(
            widest as f64 * 0.6 * font_size,
            lines as f64 * 1.2 * font_size,
        )
    }
}

/// Frames of a HUD's nodes in host coordinates, before any bezel zoom.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BezelLayout {
    /// The host surface; also the container and background frame.
    pub host: Rect,
    /// The bezel panel.
    pub bezel: Rect,
    /// The indicator, if mounted.
    pub indicator: Option<Rect>,
    /// The main label, if mounted.
    pub label: Option<Rect>,
    /// The details label, if mounted.
    pub details: Option<Rect>,
    /// The button, if mounted.
    pub button: Option<Rect>,
}

impl BezelLayout {
    /// Lays out `hud` inside its host bounds.
    pub fn compute(hud: &Hud, measure: &mut impl TextMeasure) -> Self {
        let host = hud.host_bounds();
        let knobs = hud.layout();
        let margin = knobs.margin.max(0.0);
        let nodes = hud.nodes();

        let mut items: Vec<(Node, Size)> = Vec::with_capacity(4);
        if nodes.is_mounted(Node::Indicator) {
            items.push((Node::Indicator, hud.indicator().preferred_size()));
        }
        if let Some(text) = hud.label().filter(|_| nodes.is_mounted(Node::Label)) {
            items.push((Node::Label, measure.measure(text, LABEL_FONT_SIZE)));
        }
        if let Some(text) = hud.details().filter(|_| nodes.is_mounted(Node::Details)) {
            items.push((Node::Details, measure.measure(text, DETAILS_FONT_SIZE)));
        }
        if let Some(button) = hud.button().filter(|_| nodes.is_mounted(Node::Button)) {
            let title = measure.measure(&button.title, DETAILS_FONT_SIZE);
            items.push((
                Node::Button,
                Size::new(title.width + BUTTON_EXTRA_WIDTH, title.height),
            ));
        }

        let max_content_width = (host.width() - 4.0 * margin).max(0.0);
        for (_, size) in &mut items {
            size.width = size.width.min(max_content_width);
        }
        let content_width = items.iter().map(|(_, s)| s.width).fold(0.0, f64::max);
        let gaps = items.len().saturating_sub(1) as f64;
        let content_height = items.iter().map(|(_, s)| s.height).sum::<f64>() + gaps * DEFAULT_PADDING;

        let mut width = (content_width + 2.0 * margin).max(knobs.min_size.width);
        let mut height = (content_height + 2.0 * margin).max(knobs.min_size.height);
        if knobs.square {
            let side = width.max(height);
            width = side;
            height = side;
        }
        width = width.min((host.width() - 2.0 * margin).max(0.0));
        height = height.min((host.height() - 2.0 * margin).max(0.0));

        let wanted = host.center() + knobs.offset;
        let center = Point::new(
            keep_inside(wanted.x, host.x0 + margin, host.x1 - margin, width),
            keep_inside(wanted.y, host.y0 + margin, host.y1 - margin, height),
        );
        let bezel = Rect::from_center_size(center, Size::new(width, height));

        let mut layout = Self {
            host,
            bezel,
            ..Self::default()
        };
        let mut top = bezel.y0 + (height - content_height) / 2.0;
        for (node, size) in items {
            let frame = Rect::from_origin_size(Point::new(center.x - size.width / 2.0, top), size);
            top += size.height + DEFAULT_PADDING;
            match node {
                Node::Indicator => layout.indicator = Some(frame),
                Node::Label => layout.label = Some(frame),
                Node::Details => layout.details = Some(frame),
                Node::Button => layout.button = Some(frame),
                _ => {}
            }
        }
        layout
    }

    /// The frame of `node`, if it has one.
    #[must_use]
    pub fn frame(&self, node: Node) -> Option<Rect> {
        match node {
            Node::Container | Node::Background => Some(self.host),
            Node::Bezel => Some(self.bezel),
            Node::Indicator => self.indicator,
            Node::Label => self.label,
            Node::Details => self.details,
            Node::Button => self.button,
        }
    }
}

/// Moves a span of `extent` centered on `wanted` so it lies within
/// `[lo, hi]`, or centers it there if it cannot fit.
fn keep_inside(wanted: f64, lo: f64, hi: f64, extent: f64) -> f64 {
    let min = lo + extent / 2.0;
    let max = hi - extent / 2.0;
    if min > max {
        (lo + hi) / 2.0
    } else {
        wanted.clamp(min, max)
    }
}
