// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Indicator geometry.
//!
//! Pure functions from a fraction and a bounds size to `kurbo` shapes. No
//! colors, no drawing surface; `bezel_render` pairs these shapes with
//! colors and blend modes.
//!
//! - [`ring`]: pie and annular progress rings, as stroked arcs.
//! - [`bar`]: the horizontal capsule bar, as an outline and a fill path.
//!
//! Coordinates are in the indicator's local space with the origin at the
//! top-left corner and y pointing down, so a positive sweep runs clockwise
//! on screen.

pub mod bar;
pub mod ring;

use peniko::{BlendMode, Compose, Mix};

pub use bar::{CapsulePath, FillBranch, capsule_path};
pub use ring::{ArcStroke, RingPath, ring_path};

/// Flattening tolerance used when arcs are appended to a [`kurbo::BezPath`].
///
/// Tight enough that fill areas match the exact capsule to well under a
/// thousandth of a square pixel.
pub const ARC_TOLERANCE: f64 = 1e-6;

/// Replaces the destination, alpha included. Everything else composites
/// with the default source-over [`BlendMode`].
pub const REPLACE: BlendMode = BlendMode::new(Mix::Normal, Compose::Copy);

/// Debug-asserts that a fraction was clamped before it reached geometry.
#[inline]
pub(crate) fn debug_assert_fraction(fraction: f64) {
    debug_assert!(
        (0.0..=1.0).contains(&fraction),
        "fraction must be clamped to [0, 1] before geometry, got {fraction}"
    );
}
