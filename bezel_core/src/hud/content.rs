// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Styling and layout parameters of a HUD's bezel and text.

use alloc::string::String;

use kurbo::{Size, Vec2};
use peniko::Color;

/// Vertical gap between the indicator, labels and button.
pub const DEFAULT_PADDING: f64 = 4.0;

/// Font size of the main label.
pub const LABEL_FONT_SIZE: f64 = 16.0;

/// Font size of the details label and the button title.
pub const DETAILS_FONT_SIZE: f64 = 12.0;

/// Extra width added to the button around its title.
pub const BUTTON_EXTRA_WIDTH: f64 = 20.0;

/// Border width of the button.
pub const BUTTON_BORDER_WIDTH: f64 = 1.0;

/// How a bezel or the dimming background fills its area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FillStyle {
    /// Flat color.
    Solid,
    /// Blurred backdrop tinted with the color.
    #[default]
    Blur,
}

/// Fill and shape of a rounded panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BezelStyle {
    /// Flat or blurred.
    pub style: FillStyle,
    /// Fill color, or blur tint.
    pub color: Color,
    /// Corner radius.
    pub corner_radius: f64,
}

impl BezelStyle {
    /// The default bezel: light blurred panel with 5px corners.
    pub const BEZEL: Self = Self {
        style: FillStyle::Blur,
        color: Color::from_rgba8(204, 204, 204, 153),
        corner_radius: 5.0,
    };

    /// The default dimming background: nothing.
    pub const BACKGROUND: Self = Self {
        style: FillStyle::Solid,
        color: Color::TRANSPARENT,
        corner_radius: 0.0,
    };
}

impl Default for BezelStyle {
    fn default() -> Self {
        Self::BEZEL
    }
}

/// An action button below the labels.
///
/// The HUD only draws it. Taps are the host's business: it hit-tests the
/// button frame from `bezel_render`'s layout and reacts itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ButtonSpec {
    /// Title text.
    pub title: String,
}

impl ButtonSpec {
    /// A button with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Where and how big the bezel is inside the host bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutKnobs {
    /// Offset of the bezel center from the host center.
    pub offset: Vec2,
    /// Space kept around the bezel and around its content.
    pub margin: f64,
    /// Smallest bezel size; zero means no minimum.
    pub min_size: Size,
    /// Force the bezel to be square.
    pub square: bool,
}

impl LayoutKnobs {
    /// Centered, 20px margins, no minimum size, not square.
    pub const DEFAULT: Self = Self {
        offset: Vec2::ZERO,
        margin: 20.0,
        min_size: Size::ZERO,
        square: false,
    };

    /// Sets the offset.
    #[must_use]
    pub const fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the margin.
    #[must_use]
    pub const fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the minimum size.
    #[must_use]
    pub const fn with_min_size(mut self, min_size: Size) -> Self {
        self.min_size = min_size;
        self
    }

    /// Sets whether the bezel is square.
    #[must_use]
    pub const fn with_square(mut self, square: bool) -> Self {
        self.square = square;
        self
    }
}

impl Default for LayoutKnobs {
    fn default() -> Self {
        Self::DEFAULT
    }
}
