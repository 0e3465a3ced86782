// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout, draw ops and damage tracking for bezel HUDs.
//!
//! This crate sits between [`bezel_core`]'s evaluated node tree and whatever
//! actually puts pixels on screen. It defines:
//!
//! - [`BezelLayout`]: where the bezel and its content sit on the host
//!   surface, given a [`TextMeasure`]
//! - [`DrawOp`]: a fill or stroke of a `kurbo` path with a `peniko` color
//!   and a `peniko` blend mode
//! - [`RenderItem`] / [`RenderPlan`]: the visible nodes of one HUD, back to
//!   front
//! - [`DamageRegion`]: which part of the host surface needs redrawing
//! - [`PlanPresenter`]: a [`Presenter`](bezel_core::host::Presenter) that
//!   keeps all of the above current

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod damage;
mod layout;
mod paint;
mod plan;
mod presenter;

pub use damage::DamageRegion;
pub use layout::{ApproxTextMeasure, BezelLayout, TextMeasure};
pub use paint::{DrawOp, paint_indicator, paint_panel};
pub use plan::{ItemContent, RenderItem, RenderPlan};
pub use presenter::PlanPresenter;
