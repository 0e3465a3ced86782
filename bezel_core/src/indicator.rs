// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Progress indicators.
//!
//! A HUD mounts at most one [`Indicator`] at a time, chosen by its [`Mode`].
//! The set of indicators is closed; every variant carries only the state it
//! needs, and all of them answer the [`ProgressIndicator`] interface.
//!
//! Indicators never draw. Setters report whether anything visible changed,
//! and the HUD turns a `true` into a CONTENT mark on the indicator node. The
//! next paint pass reads the indicator back and asks [`geometry`] for shapes.
//!
//! [`geometry`]: crate::geometry

use kurbo::Size;
use peniko::Color;

use crate::geometry::{CapsulePath, RingPath, capsule_path, ring_path};
use crate::time::HostTime;

/// Preferred size of ring indicators and the spinner.
pub const RING_SIZE: Size = Size::new(37.0, 37.0);

/// Preferred size of the bar indicator.
pub const BAR_SIZE: Size = Size::new(120.0, 10.0);

/// Number of spokes on the spinner.
pub const SPINNER_SPOKES: u8 = 12;

/// How long the spinner dwells on each spoke, in nanoseconds.
pub const SPINNER_STEP_NANOS: u64 = 1_000_000_000 / SPINNER_SPOKES as u64;

/// Alpha of the ring background relative to the content color.
const RING_BACKGROUND_ALPHA: f32 = 0.1;

/// What a HUD displays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Indeterminate spinner.
    #[default]
    Spinner,
    /// Pie-chart ring.
    Ring,
    /// Thin annular ring.
    Annular,
    /// Horizontal capsule bar.
    Bar,
    /// Caller-supplied content such as a success or error icon.
    CustomContent,
    /// Labels only.
    TextOnly,
}

impl Mode {
    /// Returns `true` for modes that display [`Hud::progress`].
    ///
    /// [`Hud::progress`]: crate::hud::Hud::progress
    #[must_use]
    pub const fn is_determinate(self) -> bool {
        matches!(self, Self::Ring | Self::Annular | Self::Bar)
    }
}

/// A built-in vector icon for [`CustomContent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Icon {
    /// A check mark.
    Success,
    /// A cross.
    Error,
    /// An exclamation mark.
    Info,
}

/// What a custom-content HUD shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CustomKind {
    /// A built-in icon.
    Icon(Icon),
    /// Content the host draws itself, identified by an opaque id.
    Surface(u64),
}

/// Caller-supplied indicator content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CustomContent {
    /// What to show.
    pub kind: CustomKind,
    /// Size to reserve in the bezel.
    pub size: Size,
}

impl CustomContent {
    /// A 37×37 built-in icon.
    #[must_use]
    pub const fn icon(icon: Icon) -> Self {
        Self {
            kind: CustomKind::Icon(icon),
            size: RING_SIZE,
        }
    }
}

/// Foreground and background colors of an indicator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorColors {
    /// Progress arc, bar fill and outline, spinner and icon tint.
    pub foreground: Color,
    /// Ring track, or the unfilled part of the bar.
    pub background: Color,
}

impl IndicatorColors {
    /// White on white, the colors of a freshly created indicator.
    pub const WHITE: Self = Self {
        foreground: Color::WHITE,
        background: Color::WHITE,
    };

    /// Ring colors derived from a content color: the track is the same hue
    /// at 10% alpha.
    #[must_use]
    pub fn ring(content: Color) -> Self {
        Self {
            foreground: content,
            background: content.with_alpha(RING_BACKGROUND_ALPHA),
        }
    }

    /// Bar colors derived from a content color: the unfilled part stays
    /// transparent.
    #[must_use]
    pub fn bar(content: Color) -> Self {
        Self {
            foreground: content,
            background: Color::TRANSPARENT,
        }
    }
}

/// The interface every indicator answers.
pub trait ProgressIndicator {
    /// Sets the displayed fraction, clamped to `[0, 1]`.
    ///
    /// Returns `true` if the displayed value changed. Indicators without a
    /// notion of progress ignore the call and return `false`.
    fn set_fraction(&mut self, fraction: f64) -> bool;

    /// Sets the colors. Returns `true` if they changed.
    fn set_colors(&mut self, colors: IndicatorColors) -> bool;

    /// Size the indicator would like to occupy in the bezel.
    fn preferred_size(&self) -> Size;
}

/// Clamps a progress fraction to `[0, 1]`, mapping NaN to `0`.
#[inline]
#[must_use]
pub fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

/// Returns whether two colors have identical components.
fn same_color(a: Color, b: Color) -> bool {
    a.components == b.components
}

fn replace_colors(slot: &mut IndicatorColors, colors: IndicatorColors) -> bool {
    if same_color(slot.foreground, colors.foreground)
        && same_color(slot.background, colors.background)
    {
        return false;
    }
    *slot = colors;
    true
}

fn replace_fraction(slot: &mut f64, fraction: f64) -> bool {
    let fraction = clamp_fraction(fraction);
    if *slot == fraction {
        return false;
    }
    *slot = fraction;
    true
}

// -- Spinner --

/// An indeterminate spinner: spokes whose brightness chases around the
/// circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spinner {
    color: Color,
    phase: u8,
}

impl Spinner {
    /// Creates a white spinner at phase zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            color: Color::WHITE,
            phase: 0,
        }
    }

    /// The tint.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Index of the brightest spoke, in `0..SPINNER_SPOKES`.
    #[must_use]
    pub const fn phase(&self) -> u8 {
        self.phase
    }

    /// Moves the highlight to the spoke for `now`. Returns `true` if it moved.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "value is reduced modulo SPINNER_SPOKES first"
    )]
    pub fn advance(&mut self, now: HostTime) -> bool {
        let phase = ((now.nanos() / SPINNER_STEP_NANOS) % u64::from(SPINNER_SPOKES)) as u8;
        if phase == self.phase {
            return false;
        }
        self.phase = phase;
        true
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressIndicator for Spinner {
    fn set_fraction(&mut self, fraction: f64) -> bool {
        _ = fraction;
        false
    }

    fn set_colors(&mut self, colors: IndicatorColors) -> bool {
        if same_color(self.color, colors.foreground) {
            return false;
        }
        self.color = colors.foreground;
        true
    }

    fn preferred_size(&self) -> Size {
        RING_SIZE
    }
}

// -- Ring --

/// A pie or annular progress ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingIndicator {
    annular: bool,
    fraction: f64,
    colors: IndicatorColors,
}

impl RingIndicator {
    /// Creates an empty white ring.
    #[must_use]
    pub const fn new(annular: bool) -> Self {
        Self {
            annular,
            fraction: 0.0,
            colors: IndicatorColors::WHITE,
        }
    }

    /// Whether this is the thin annular style.
    #[must_use]
    pub const fn is_annular(&self) -> bool {
        self.annular
    }

    /// Switches between pie and annular. Returns `true` if it changed.
    pub fn set_annular(&mut self, annular: bool) -> bool {
        let changed = self.annular != annular;
        self.annular = annular;
        changed
    }

    /// The displayed fraction.
    #[must_use]
    pub const fn fraction(&self) -> f64 {
        self.fraction
    }

    /// The current colors.
    #[must_use]
    pub const fn colors(&self) -> IndicatorColors {
        self.colors
    }

    /// Builds the ring geometry for `bounds`.
    #[must_use]
    pub fn path(&self, bounds: Size) -> RingPath {
        ring_path(
            self.fraction,
            bounds,
            crate::geometry::ring::DEFAULT_STROKE_WIDTH,
            self.annular,
        )
    }
}

impl ProgressIndicator for RingIndicator {
    fn set_fraction(&mut self, fraction: f64) -> bool {
        replace_fraction(&mut self.fraction, fraction)
    }

    fn set_colors(&mut self, colors: IndicatorColors) -> bool {
        replace_colors(&mut self.colors, colors)
    }

    fn preferred_size(&self) -> Size {
        RING_SIZE
    }
}

// -- Bar --

/// A horizontal capsule bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarIndicator {
    fraction: f64,
    colors: IndicatorColors,
}

impl BarIndicator {
    /// Creates an empty bar with a white outline and fill.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fraction: 0.0,
            colors: IndicatorColors {
                foreground: Color::WHITE,
                background: Color::TRANSPARENT,
            },
        }
    }

    /// The displayed fraction.
    #[must_use]
    pub const fn fraction(&self) -> f64 {
        self.fraction
    }

    /// The current colors.
    #[must_use]
    pub const fn colors(&self) -> IndicatorColors {
        self.colors
    }

    /// Builds the bar geometry for `size`.
    #[must_use]
    pub fn path(&self, size: Size) -> CapsulePath {
        capsule_path(self.fraction, size)
    }
}

impl Default for BarIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressIndicator for BarIndicator {
    fn set_fraction(&mut self, fraction: f64) -> bool {
        replace_fraction(&mut self.fraction, fraction)
    }

    fn set_colors(&mut self, colors: IndicatorColors) -> bool {
        replace_colors(&mut self.colors, colors)
    }

    fn preferred_size(&self) -> Size {
        BAR_SIZE
    }
}

// -- Custom --

/// Caller-supplied content, tinted with the content color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CustomIndicator {
    content: CustomContent,
    tint: Color,
}

impl CustomIndicator {
    /// Wraps `content` with a white tint.
    #[must_use]
    pub const fn new(content: CustomContent) -> Self {
        Self {
            content,
            tint: Color::WHITE,
        }
    }

    /// The wrapped content.
    #[must_use]
    pub const fn content(&self) -> CustomContent {
        self.content
    }

    /// The tint.
    #[must_use]
    pub const fn tint(&self) -> Color {
        self.tint
    }
}

impl ProgressIndicator for CustomIndicator {
    fn set_fraction(&mut self, fraction: f64) -> bool {
        _ = fraction;
        false
    }

    fn set_colors(&mut self, colors: IndicatorColors) -> bool {
        if same_color(self.tint, colors.foreground) {
            return false;
        }
        self.tint = colors.foreground;
        true
    }

    fn preferred_size(&self) -> Size {
        self.content.size
    }
}

// -- Indicator --

/// The indicator mounted in a HUD's bezel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Indicator {
    /// Nothing mounted: text-only mode, or custom mode without content.
    None,
    /// Indeterminate spinner.
    Spinner(Spinner),
    /// Pie or annular ring.
    Ring(RingIndicator),
    /// Capsule bar.
    Bar(BarIndicator),
    /// Caller-supplied content.
    Custom(CustomIndicator),
}

impl Indicator {
    /// Creates the indicator that `mode` calls for.
    ///
    /// `CustomContent` without content yields [`Indicator::None`], leaving an
    /// empty bezel.
    #[must_use]
    pub fn for_mode(mode: Mode, custom: Option<CustomContent>) -> Self {
        match mode {
            Mode::Spinner => Self::Spinner(Spinner::new()),
            Mode::Ring => Self::Ring(RingIndicator::new(false)),
            Mode::Annular => Self::Ring(RingIndicator::new(true)),
            Mode::Bar => Self::Bar(BarIndicator::new()),
            Mode::CustomContent => custom.map_or(Self::None, |c| Self::Custom(CustomIndicator::new(c))),
            Mode::TextOnly => Self::None,
        }
    }

    /// Returns `true` if this indicator can serve `mode` without being
    /// replaced (ring style may still need a switch).
    #[must_use]
    pub fn serves(&self, mode: Mode, custom: Option<CustomContent>) -> bool {
        match (self, mode) {
            (Self::Spinner(_), Mode::Spinner)
            | (Self::Ring(_), Mode::Ring | Mode::Annular)
            | (Self::Bar(_), Mode::Bar)
            | (Self::None, Mode::TextOnly) => true,
            (Self::Custom(c), Mode::CustomContent) => Some(c.content()) == custom,
            (Self::None, Mode::CustomContent) => custom.is_none(),
            _ => false,
        }
    }

    /// Returns `true` if nothing is mounted.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Applies `content` color with the palette this kind of indicator uses.
    /// Returns `true` if the colors changed.
    pub fn apply_content_color(&mut self, content: Color) -> bool {
        let colors = match self {
            Self::Bar(_) => IndicatorColors::bar(content),
            _ => IndicatorColors::ring(content),
        };
        self.set_colors(colors)
    }

    /// Advances the spinner, if this is one. Returns `true` if it moved.
    pub fn advance(&mut self, now: HostTime) -> bool {
        match self {
            Self::Spinner(s) => s.advance(now),
            _ => false,
        }
    }

    /// Returns `true` if the indicator animates on its own.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        matches!(self, Self::Spinner(_))
    }
}

impl ProgressIndicator for Indicator {
    fn set_fraction(&mut self, fraction: f64) -> bool {
        match self {
            Self::None => false,
            Self::Spinner(s) => s.set_fraction(fraction),
            Self::Ring(r) => r.set_fraction(fraction),
            Self::Bar(b) => b.set_fraction(fraction),
            Self::Custom(c) => c.set_fraction(fraction),
        }
    }

    fn set_colors(&mut self, colors: IndicatorColors) -> bool {
        match self {
            Self::None => false,
            Self::Spinner(s) => s.set_colors(colors),
            Self::Ring(r) => r.set_colors(colors),
            Self::Bar(b) => b.set_colors(colors),
            Self::Custom(c) => c.set_colors(colors),
        }
    }

    fn preferred_size(&self) -> Size {
        match self {
            Self::None => Size::ZERO,
            Self::Spinner(s) => s.preferred_size(),
            Self::Ring(r) => r.preferred_size(),
            Self::Bar(b) => b.preferred_size(),
            Self::Custom(c) => c.preferred_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_pick_indicators() {
        assert!(matches!(Indicator::for_mode(Mode::Spinner, None), Indicator::Spinner(_)));
        assert!(matches!(
            Indicator::for_mode(Mode::Annular, None),
            Indicator::Ring(r) if r.is_annular()
        ));
        assert!(matches!(
            Indicator::for_mode(Mode::Ring, None),
            Indicator::Ring(r) if !r.is_annular()
        ));
        assert!(matches!(Indicator::for_mode(Mode::Bar, None), Indicator::Bar(_)));
        assert!(Indicator::for_mode(Mode::TextOnly, None).is_none());
        assert!(
            Indicator::for_mode(Mode::CustomContent, None).is_none(),
            "custom mode without content mounts nothing"
        );
        let icon = CustomContent::icon(Icon::Success);
        assert_eq!(
            Indicator::for_mode(Mode::CustomContent, Some(icon)).preferred_size(),
            RING_SIZE
        );
    }

    #[test]
    fn preferred_sizes() {
        assert_eq!(Indicator::for_mode(Mode::Spinner, None).preferred_size(), RING_SIZE);
        assert_eq!(Indicator::for_mode(Mode::Ring, None).preferred_size(), RING_SIZE);
        assert_eq!(Indicator::for_mode(Mode::Bar, None).preferred_size(), BAR_SIZE);
        assert_eq!(Indicator::None.preferred_size(), Size::ZERO);
    }

    #[test]
    fn set_fraction_reports_change_only() {
        let mut ind = Indicator::for_mode(Mode::Bar, None);
        assert!(ind.set_fraction(0.5));
        assert!(!ind.set_fraction(0.5), "same value is not a change");
        assert!(ind.set_fraction(2.0));
        assert!(matches!(ind, Indicator::Bar(b) if b.fraction() == 1.0));
        assert!(!ind.set_fraction(7.0), "clamps to the same value");
        assert!(ind.set_fraction(f64::NAN));
        assert!(matches!(ind, Indicator::Bar(b) if b.fraction() == 0.0));
    }

    #[test]
    fn spinner_and_custom_ignore_fraction() {
        let mut spinner = Indicator::for_mode(Mode::Spinner, None);
        assert!(!spinner.set_fraction(0.3));
        let mut custom =
            Indicator::for_mode(Mode::CustomContent, Some(CustomContent::icon(Icon::Error)));
        assert!(!custom.set_fraction(0.3));
        assert!(!Indicator::None.set_fraction(0.3));
    }

    #[test]
    fn ring_colors_derive_translucent_track() {
        let mut ind = Indicator::for_mode(Mode::Annular, None);
        let content = Color::from_rgba8(0, 0, 0, 255);
        assert!(ind.apply_content_color(content));
        assert!(!ind.apply_content_color(content), "unchanged colors");
        let Indicator::Ring(ring) = ind else {
            panic!("annular mode mounts a ring");
        };
        assert_eq!(ring.colors().foreground, content);
        assert!((ring.colors().background.components[3] - 0.1).abs() < 1e-6);
    }

    #[test]
    fn bar_colors_keep_transparent_remainder() {
        let mut ind = Indicator::for_mode(Mode::Bar, None);
        let content = Color::from_rgba8(10, 20, 30, 200);
        assert!(ind.apply_content_color(content));
        let Indicator::Bar(bar) = ind else {
            panic!("bar mode mounts a bar");
        };
        assert_eq!(bar.colors().foreground, content);
        assert_eq!(bar.colors().background, Color::TRANSPARENT);
    }

    #[test]
    fn spinner_advances_once_per_step() {
        let mut s = Spinner::new();
        assert!(!s.advance(HostTime(SPINNER_STEP_NANOS - 1)));
        assert!(s.advance(HostTime(SPINNER_STEP_NANOS)));
        assert_eq!(s.phase(), 1);
        assert!(s.advance(HostTime(SPINNER_STEP_NANOS * 12)));
        assert_eq!(s.phase(), 0, "wraps around after a full turn");
    }

    #[test]
    fn serves_matches_compatible_modes() {
        let ring = Indicator::for_mode(Mode::Ring, None);
        assert!(ring.serves(Mode::Annular, None));
        assert!(!ring.serves(Mode::Bar, None));
        let icon = Some(CustomContent::icon(Icon::Info));
        let custom = Indicator::for_mode(Mode::CustomContent, icon);
        assert!(custom.serves(Mode::CustomContent, icon));
        assert!(!custom.serves(Mode::CustomContent, Some(CustomContent::icon(Icon::Error))));
    }
}
