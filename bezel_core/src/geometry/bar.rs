// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The horizontal capsule progress bar.
//!
//! The outline is a rounded rectangle inset 2 px from the bounds with radius
//! `h/2 − 2`, stroked 2 px wide. The fill is a smaller capsule inset 4 px
//! with radius `r = h/2 − 4`, clipped at `amount = fraction · w` measured
//! from the left edge of the bounds.
//!
//! Which part of the capsule `amount` reaches decides the fill shape, see
//! [`FillBranch`]. The branches meet without jumps, so the filled area never
//! shrinks as the fraction grows.

use core::f64::consts::{FRAC_PI_2, PI};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Arc, BezPath, Point, RoundedRect, Size, Vec2};

use super::{ARC_TOLERANCE, debug_assert_fraction};

/// Inset of the outline centerline from the bounds.
pub const OUTLINE_INSET: f64 = 2.0;

/// Stroke width of the outline.
pub const OUTLINE_WIDTH: f64 = 2.0;

/// Inset of the fill capsule from the bounds.
pub const FILL_INSET: f64 = 4.0;

/// Which part of the capsule the fill reaches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FillBranch {
    /// Nothing to fill.
    Empty,
    /// The fill ends inside the left cap; only the circular segment left of
    /// `amount` is filled.
    LeftCap,
    /// The fill covers the left cap and a straight body ending at `amount`.
    Middle,
    /// The fill covers the body and part of the right cap.
    RightCap,
}

/// The outline and fill of a capsule bar.
#[derive(Clone, Debug)]
pub struct CapsulePath {
    /// The outline centerline, to be stroked [`OUTLINE_WIDTH`] wide.
    pub outline: RoundedRect,
    /// Corner radius of the outline.
    pub outline_radius: f64,
    /// The filled region; empty when [`fill_branch`](Self::fill_branch) is
    /// [`FillBranch::Empty`].
    pub fill: BezPath,
    /// Which branch produced [`fill`](Self::fill).
    pub fill_branch: FillBranch,
    /// `fraction · width`: how far the fill reaches from the left edge.
    pub amount: f64,
}

/// Builds the bar for `fraction` inside a bar of `size`.
///
/// # Panics
///
/// Debug-asserts that `fraction` is already clamped to `[0, 1]`.
#[must_use]
pub fn capsule_path(fraction: f64, size: Size) -> CapsulePath {
    debug_assert_fraction(fraction);
    let (w, h) = (size.width, size.height);
    let outline_radius = (h / 2.0 - OUTLINE_INSET).max(0.0);
    let outline = RoundedRect::new(
        OUTLINE_INSET,
        OUTLINE_INSET,
        w - OUTLINE_INSET,
        h - OUTLINE_INSET,
        outline_radius,
    );

    let r = (outline_radius - (FILL_INSET - OUTLINE_INSET)).max(0.0);
    let amount = fraction * w;
    let capsule = FillCapsule {
        left: r + FILL_INSET,
        right: w - r - FILL_INSET,
        cy: h / 2.0,
        r,
    };

    let fill_branch = if amount >= capsule.left && amount <= capsule.right {
        FillBranch::Middle
    } else if amount > capsule.left {
        FillBranch::RightCap
    } else if amount > 0.0 {
        FillBranch::LeftCap
    } else {
        FillBranch::Empty
    };

    let fill = match fill_branch {
        FillBranch::Empty => BezPath::new(),
        FillBranch::LeftCap => capsule.left_segment(amount),
        FillBranch::Middle => capsule.through_body(amount),
        FillBranch::RightCap => capsule.into_right_cap(amount),
    };

    CapsulePath {
        outline,
        outline_radius,
        fill,
        fill_branch,
        amount,
    }
}

/// The fill capsule: two cap circles of radius `r` centered at `left` and
/// `right` on the line `y = cy`.
struct FillCapsule {
    left: f64,
    right: f64,
    cy: f64,
    r: f64,
}

impl FillCapsule {
    fn top(&self) -> f64 {
        self.cy - self.r
    }

    fn bottom(&self) -> f64 {
        self.cy + self.r
    }

    fn arc(&self, cx: f64, start: f64, sweep: f64) -> Arc {
        Arc::new(
            Point::new(cx, self.cy),
            Vec2::new(self.r, self.r),
            start,
            sweep,
            0.0,
        )
    }

    /// Appends the left half-circle from the bottom of the cap, through
    /// 9 o'clock, to its top.
    fn append_left_cap(&self, path: &mut BezPath) {
        path.extend(self.arc(self.left, FRAC_PI_2, PI).append_iter(ARC_TOLERANCE));
    }

    /// The circular segment of the left cap that lies left of `amount`.
    fn left_segment(&self, amount: f64) -> BezPath {
        let mut path = BezPath::new();
        let offset = (amount - self.left).clamp(-self.r, 0.0);
        if self.r <= 0.0 || offset <= -self.r {
            return path;
        }
        // Chord at `amount` meets the circle at angles ±phi, phi in (π/2, π].
        let phi = (offset / self.r).clamp(-1.0, 1.0).acos();
        let arc = self.arc(self.left, phi, 2.0 * (PI - phi));
        path.move_to(arc.center + Vec2::from_angle(phi) * self.r);
        path.extend(arc.append_iter(ARC_TOLERANCE));
        path.close_path();
        path
    }

    /// Left cap plus a straight body ending at `amount`.
    fn through_body(&self, amount: f64) -> BezPath {
        let mut path = BezPath::new();
        path.move_to((self.left, self.top()));
        path.line_to((amount, self.top()));
        path.line_to((amount, self.bottom()));
        path.line_to((self.left, self.bottom()));
        self.append_left_cap(&mut path);
        path.close_path();
        path
    }

    /// Left cap, full body, and the part of the right cap left of `amount`.
    fn into_right_cap(&self, amount: f64) -> BezPath {
        let mut path = BezPath::new();
        // Past the tip of the cap there is nothing more to fill.
        let reach = (amount - self.right).min(self.r);
        let theta = if self.r > 0.0 {
            (reach / self.r).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };
        let rise = self.r * theta.sin();

        path.move_to((self.left, self.top()));
        path.line_to((self.right, self.top()));
        path.extend(
            self.arc(self.right, -FRAC_PI_2, FRAC_PI_2 - theta)
                .append_iter(ARC_TOLERANCE),
        );
        path.line_to((self.right + reach, self.cy + rise));
        path.extend(
            self.arc(self.right, theta, FRAC_PI_2 - theta)
                .append_iter(ARC_TOLERANCE),
        );
        path.line_to((self.left, self.bottom()));
        self.append_left_cap(&mut path);
        path.close_path();
        path
    }
}
