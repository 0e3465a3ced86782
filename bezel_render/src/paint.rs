// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw ops for indicators and panels.
//!
//! Paths come from [`bezel_core::geometry`]; this module picks the colors,
//! stroke styles and paint order, and moves everything into host
//! coordinates.

use alloc::vec::Vec;
use core::f64::consts::TAU;

use bezel_core::geometry::FillBranch;
use bezel_core::geometry::bar::OUTLINE_WIDTH;
use bezel_core::hud::BezelStyle;
use bezel_core::indicator::{CustomKind, Icon, Indicator, SPINNER_SPOKES, Spinner};
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{
    Affine, BezPath, Cap, Circle, Join, Line, Point, Rect, RoundedRect, Shape, Stroke, Vec2,
};
use peniko::{BlendMode, Color};

/// Flattening tolerance for rounded rects and circles.
const TOLERANCE: f64 = 0.1;

/// Spinner spoke width, relative to the indicator width.
const SPOKE_WIDTH: f64 = 0.08;

/// Inner end of a spinner spoke, relative to the outer radius.
const SPOKE_INNER: f64 = 0.45;

/// Alpha of the spoke furthest behind the highlight.
const SPOKE_TAIL_ALPHA: f32 = 0.15;

/// Icon stroke width, relative to the indicator width.
const ICON_STROKE: f64 = 0.09;

/// One fill or stroke, in host coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Fill `path` with `color`.
    Fill {
        /// The area to fill.
        path: BezPath,
        /// Fill color.
        color: Color,
        /// How the fill composites.
        blend: BlendMode,
    },
    /// Stroke `path` with `color`.
    Stroke {
        /// The centerline.
        path: BezPath,
        /// Width, caps and joins.
        stroke: Stroke,
        /// Stroke color.
        color: Color,
        /// How the stroke composites.
        blend: BlendMode,
    },
}

impl DrawOp {
    /// The color this op paints with.
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Self::Fill { color, .. } | Self::Stroke { color, .. } => *color,
        }
    }

    /// The op's path, before stroking.
    #[must_use]
    pub fn path(&self) -> &BezPath {
        match self {
            Self::Fill { path, .. } | Self::Stroke { path, .. } => path,
        }
    }

    /// How the op composites.
    #[must_use]
    pub fn blend(&self) -> BlendMode {
        match self {
            Self::Fill { blend, .. } | Self::Stroke { blend, .. } => *blend,
        }
    }
}

fn stroke(path: BezPath, stroke: Stroke, color: Color) -> DrawOp {
    DrawOp::Stroke {
        path,
        stroke,
        color,
        blend: BlendMode::default(),
    }
}

fn fill(path: BezPath, color: Color) -> DrawOp {
    DrawOp::Fill {
        path,
        color,
        blend: BlendMode::default(),
    }
}

fn is_visible(color: Color) -> bool {
    color.components[3] > 0.0
}

/// Draw ops for `indicator` placed at `frame`, back to front.
///
/// Host-drawn custom surfaces and [`Indicator::None`] produce no ops.
#[must_use]
pub fn paint_indicator(indicator: &Indicator, frame: Rect) -> Vec<DrawOp> {
    let size = frame.size();
    let mut ops = Vec::new();
    match indicator {
        Indicator::None => {}
        Indicator::Ring(ring) => {
            let colors = ring.colors();
            let path = ring.path(size);
            let track = if ring.is_annular() {
                colors.background
            } else {
                colors.foreground
            };
            ops.push(DrawOp::Stroke {
                path: path.background.to_path(),
                stroke: path.background.stroke.clone(),
                color: track,
                blend: path.background.blend,
            });
            if path.foreground.sweep() > 0.0 {
                ops.push(DrawOp::Stroke {
                    path: path.foreground.to_path(),
                    stroke: path.foreground.stroke.clone(),
                    color: colors.foreground,
                    blend: path.foreground.blend,
                });
            }
        }
        Indicator::Bar(bar) => {
            let colors = bar.colors();
            let path = bar.path(size);
            if is_visible(colors.background) {
                ops.push(fill(path.outline.to_path(TOLERANCE), colors.background));
            }
            ops.push(stroke(
                path.outline.to_path(TOLERANCE),
                Stroke::new(OUTLINE_WIDTH),
                colors.foreground,
            ));
            if path.fill_branch != FillBranch::Empty {
                ops.push(fill(path.fill, colors.foreground));
            }
        }
        Indicator::Spinner(spinner) => paint_spinner(spinner, size.width, &mut ops),
        Indicator::Custom(custom) => {
            if let CustomKind::Icon(icon) = custom.content().kind {
                paint_icon(icon, size.width, custom.tint(), &mut ops);
            }
        }
    }

    let offset = Affine::translate(frame.origin().to_vec2());
    for op in &mut ops {
        match op {
            DrawOp::Fill { path, .. } | DrawOp::Stroke { path, .. } => path.apply_affine(offset),
        }
    }
    ops
}

/// Spokes around the center; the one at the spinner's phase is opaque and
/// the ones behind it fade out.
fn paint_spinner(spinner: &Spinner, side: f64, ops: &mut Vec<DrawOp>) {
    let center = Point::new(side / 2.0, side / 2.0);
    let width = side * SPOKE_WIDTH;
    let outer = side / 2.0 - width / 2.0;
    let inner = outer * SPOKE_INNER;
    let style = Stroke::new(width).with_caps(Cap::Round);
    for i in 0..SPINNER_SPOKES {
        let angle = f64::from(i) / f64::from(SPINNER_SPOKES) * TAU - TAU / 4.0;
        let dir = Vec2::new(angle.cos(), angle.sin());
        let line = Line::new(center + dir * inner, center + dir * outer);
        let behind = (spinner.phase() + SPINNER_SPOKES - i) % SPINNER_SPOKES;
        let fade = f32::from(behind) / f32::from(SPINNER_SPOKES);
        let alpha = 1.0 - fade * (1.0 - SPOKE_TAIL_ALPHA);
        ops.push(stroke(
            line.to_path(TOLERANCE),
            style.clone(),
            spinner.color().multiply_alpha(alpha),
        ));
    }
}

fn paint_icon(icon: Icon, side: f64, tint: Color, ops: &mut Vec<DrawOp>) {
    let s = side;
    let style = Stroke::new(s * ICON_STROKE)
        .with_caps(Cap::Round)
        .with_join(Join::Round);
    match icon {
        Icon::Success => {
            let mut path = BezPath::new();
            path.move_to((s * 0.2, s * 0.52));
            path.line_to((s * 0.42, s * 0.74));
            path.line_to((s * 0.8, s * 0.28));
            ops.push(stroke(path, style, tint));
        }
        Icon::Error => {
            let mut path = BezPath::new();
            path.move_to((s * 0.25, s * 0.25));
            path.line_to((s * 0.75, s * 0.75));
            path.move_to((s * 0.75, s * 0.25));
            path.line_to((s * 0.25, s * 0.75));
            ops.push(stroke(path, style, tint));
        }
        Icon::Info => {
            let bar = Line::new((s * 0.5, s * 0.2), (s * 0.5, s * 0.58));
            ops.push(stroke(bar.to_path(TOLERANCE), style, tint));
            let dot = Circle::new((s * 0.5, s * 0.78), s * ICON_STROKE * 0.65);
            ops.push(fill(dot.to_path(TOLERANCE), tint));
        }
    }
}

/// The fill of a bezel or background panel covering `frame`.
///
/// [`FillStyle::Blur`](bezel_core::hud::FillStyle::Blur) panels still fill
/// with their tint; blurring what is behind them is up to the host.
#[must_use]
pub fn paint_panel(style: &BezelStyle, frame: Rect) -> DrawOp {
    let panel = RoundedRect::from_rect(frame, style.corner_radius);
    fill(panel.to_path(TOLERANCE), style.color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bezel_core::indicator::{
        CustomContent, IndicatorColors, Mode, ProgressIndicator, RING_SIZE,
    };
    use kurbo::Size;
    use peniko::{Compose, Mix};

    fn indicator(mode: Mode, fraction: f64) -> Indicator {
        let mut indicator = Indicator::for_mode(mode, None);
        indicator.apply_content_color(Color::BLACK);
        indicator.set_fraction(fraction);
        indicator
    }

    fn frame(size: Size) -> Rect {
        Rect::from_origin_size((10.0, 20.0), size)
    }

    #[test]
    fn empty_pie_draws_only_the_outline() {
        let ops = paint_indicator(&indicator(Mode::Ring, 0.0), frame(RING_SIZE));
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].color(), Color::BLACK);
    }

    #[test]
    fn pie_foreground_replaces_the_outline() {
        let ops = paint_indicator(&indicator(Mode::Ring, 0.5), frame(RING_SIZE));
        assert_eq!(ops.len(), 2);
        assert!(matches!(
            ops[1],
            DrawOp::Stroke {
                blend: BlendMode {
                    compose: Compose::Copy,
                    ..
                },
                ..
            }
        ));
    }

    #[test]
    fn only_the_pie_foreground_replaces() {
        let pie = paint_indicator(&indicator(Mode::Ring, 0.5), frame(RING_SIZE));
        assert_eq!(pie[0].blend(), BlendMode::default());
        assert_eq!(pie[1].blend(), BlendMode::new(Mix::Normal, Compose::Copy));

        let mut bar = indicator(Mode::Bar, 0.5);
        bar.set_colors(IndicatorColors {
            foreground: Color::BLACK,
            background: Color::WHITE,
        });
        let others = [
            paint_indicator(&indicator(Mode::Annular, 0.5), frame(RING_SIZE)),
            paint_indicator(&bar, frame(Size::new(120.0, 10.0))),
            paint_indicator(&indicator(Mode::Spinner, 0.0), frame(RING_SIZE)),
        ];
        for op in others.iter().flatten() {
            assert_eq!(op.blend(), BlendMode::default(), "{op:?}");
        }
    }

    #[test]
    fn annular_track_uses_the_background_color() {
        let ops = paint_indicator(&indicator(Mode::Annular, 0.5), frame(RING_SIZE));
        let colors = IndicatorColors::ring(Color::BLACK);
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].color(), colors.background);
        assert_eq!(ops[1].color(), colors.foreground);
    }

    #[test]
    fn ops_are_moved_into_the_frame() {
        let f = frame(RING_SIZE);
        let ops = paint_indicator(&indicator(Mode::Ring, 1.0), f);
        for op in &ops {
            let bounds = op.path().bounding_box();
            assert!(bounds.x0 >= f.x0 - 1e-6 && bounds.x1 <= f.x1 + 1e-6);
            assert!(bounds.y0 >= f.y0 - 1e-6 && bounds.y1 <= f.y1 + 1e-6);
        }
    }

    #[test]
    fn bar_skips_transparent_remainder_and_empty_fill() {
        let size = Size::new(120.0, 10.0);
        let ops = paint_indicator(&indicator(Mode::Bar, 0.0), frame(size));
        assert_eq!(ops.len(), 1, "outline only");
        assert!(matches!(ops[0], DrawOp::Stroke { .. }));

        let ops = paint_indicator(&indicator(Mode::Bar, 0.5), frame(size));
        assert_eq!(ops.len(), 2);
        assert!(matches!(ops[1], DrawOp::Fill { .. }));
    }

    #[test]
    fn bar_paints_a_visible_remainder_first() {
        let mut bar = indicator(Mode::Bar, 0.5);
        bar.set_colors(IndicatorColors {
            foreground: Color::BLACK,
            background: Color::WHITE,
        });
        let ops = paint_indicator(&bar, frame(Size::new(120.0, 10.0)));
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[0].color(), Color::WHITE);
    }

    #[test]
    fn spinner_highlights_its_phase() {
        let mut spinner = indicator(Mode::Spinner, 0.0);
        spinner.advance(bezel_core::time::HostTime(250_000_000));
        let Indicator::Spinner(s) = spinner else {
            panic!("spinner mode builds a spinner");
        };
        let ops = paint_indicator(&spinner, frame(RING_SIZE));
        assert_eq!(ops.len(), usize::from(SPINNER_SPOKES));
        assert_eq!(s.phase(), 3);
        assert_eq!(ops[3].color(), Color::BLACK);
        let next = ops[4].color().components[3];
        assert!(next < 0.25, "the spoke ahead of the highlight is faint");
    }

    #[test]
    fn icons_and_surfaces() {
        let check = Indicator::for_mode(Mode::CustomContent, Some(CustomContent::icon(Icon::Success)));
        assert_eq!(paint_indicator(&check, frame(RING_SIZE)).len(), 1);
        let info = Indicator::for_mode(Mode::CustomContent, Some(CustomContent::icon(Icon::Info)));
        assert_eq!(paint_indicator(&info, frame(RING_SIZE)).len(), 2);
        let surface = Indicator::for_mode(
            Mode::CustomContent,
            Some(CustomContent {
                kind: CustomKind::Surface(7),
                size: Size::new(50.0, 50.0),
            }),
        );
        assert!(paint_indicator(&surface, frame(RING_SIZE)).is_empty());
        assert!(paint_indicator(&Indicator::None, frame(RING_SIZE)).is_empty());
    }

    #[test]
    fn panel_fills_with_the_style_color() {
        let op = paint_panel(&BezelStyle::BEZEL, Rect::new(0.0, 0.0, 80.0, 80.0));
        assert_eq!(op.color(), BezelStyle::BEZEL.color);
    }
}
