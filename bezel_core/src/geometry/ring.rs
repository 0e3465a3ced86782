// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pie and annular progress rings.
//!
//! Both styles start at 12 o'clock and sweep clockwise by `fraction · 2π`.
//!
//! - **Pie**: a thin full-circle outline with a thick arc inside it that
//!   replaces whatever is under it ([`REPLACE`](super::REPLACE)), so a translucent
//!   foreground is not darkened by the outline.
//! - **Annular**: a full background track and a foreground arc of the same
//!   width on the same radius. The track has butt caps; the foreground has
//!   square caps.

use core::f64::consts::{FRAC_PI_2, TAU};

use kurbo::{Arc, BezPath, Cap, Point, Shape, Size, Stroke, Vec2};

use peniko::BlendMode;

use super::{ARC_TOLERANCE, REPLACE, debug_assert_fraction};

/// Start angle of every ring: 12 o'clock.
pub const START_ANGLE: f64 = -FRAC_PI_2;

/// Default stroke width of ring indicators.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// One stroked arc of a ring.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcStroke {
    /// The centerline.
    pub arc: Arc,
    /// Width and caps.
    pub stroke: Stroke,
    /// How the stroke composites.
    pub blend: BlendMode,
}

impl ArcStroke {
    fn new(center: Point, radius: f64, sweep: f64, stroke: Stroke, blend: BlendMode) -> Self {
        Self {
            arc: Arc::new(center, Vec2::new(radius, radius), START_ANGLE, sweep, 0.0),
            stroke,
            blend,
        }
    }

    /// Returns the sweep angle in radians.
    #[inline]
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.arc.sweep_angle
    }

    /// Returns the centerline radius.
    #[inline]
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.arc.radii.x
    }

    /// Returns the centerline as a path.
    #[must_use]
    pub fn to_path(&self) -> BezPath {
        self.arc.to_path(ARC_TOLERANCE)
    }
}

/// The two strokes of a ring indicator.
#[derive(Clone, Debug, PartialEq)]
pub struct RingPath {
    /// The full-circle track (annular) or outline (pie).
    pub background: ArcStroke,
    /// The progress arc.
    pub foreground: ArcStroke,
}

/// Builds the ring for `fraction` inside `bounds`.
///
/// Radii derive from `bounds.width`; the ring is centered in `bounds`.
///
/// # Panics
///
/// Debug-asserts that `fraction` is already clamped to `[0, 1]`.
#[must_use]
pub fn ring_path(fraction: f64, bounds: Size, stroke_width: f64, annular: bool) -> RingPath {
    debug_assert_fraction(fraction);
    let center = Point::new(bounds.width / 2.0, bounds.height / 2.0);
    let sweep = fraction * TAU;

    if annular {
        let radius = (bounds.width - stroke_width) / 2.0;
        RingPath {
            background: ArcStroke::new(
                center,
                radius,
                TAU,
                Stroke::new(stroke_width).with_caps(Cap::Butt),
                BlendMode::default(),
            ),
            foreground: ArcStroke::new(
                center,
                radius,
                sweep,
                Stroke::new(stroke_width).with_caps(Cap::Square),
                BlendMode::default(),
            ),
        }
    } else {
        let fill_width = stroke_width * 2.0;
        RingPath {
            background: ArcStroke::new(
                center,
                bounds.width / 2.0 - stroke_width / 2.0,
                TAU,
                Stroke::new(stroke_width),
                BlendMode::default(),
            ),
            foreground: ArcStroke::new(
                center,
                bounds.width / 2.0 - fill_width / 2.0,
                sweep,
                Stroke::new(fill_width).with_caps(Cap::Butt),
                REPLACE,
            ),
        }
    }
}
