// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The HUD node tree uses multi-channel dirty tracking (via
//! [`understory_dirty`]) so presenters only touch what changed. Each channel
//! represents an independent category of change.
//!
//! # Propagation semantics
//!
//! - **Propagating**: [`TRANSFORM`] and [`OPACITY`] use
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) and have dependency
//!   edges from child to parent. Fading the container or zooming the bezel
//!   marks every node inside it, because world transforms and effective
//!   opacities are inherited.
//!
//! - **Local-only**: [`CONTENT`] (indicator redraw, label text, colors) and
//!   [`LAYOUT`] (sizes and offsets that move nodes inside the bezel) mark
//!   only the node they name.
//!
//! - **Structural**: [`TOPOLOGY`] is marked when a node is mounted or
//!   unmounted, e.g. when a mode change swaps the indicator.
//!
//! # Consumption
//!
//! [`Hud::evaluate`](crate::hud::Hud::evaluate) drains all channels and
//! surfaces the results as [`HudChanges`](crate::node::HudChanges), which
//! presenters [consume](crate::host::Presenter::apply).

use understory_dirty::Channel;

/// Transform changed: world transforms of descendants must be recomputed.
pub const TRANSFORM: Channel = Channel::new(0);

/// Opacity changed: effective opacities of descendants must be recomputed.
pub const OPACITY: Channel = Channel::new(1);

/// Drawn content changed: no propagation needed.
pub const CONTENT: Channel = Channel::new(2);

/// Node mounted or unmounted.
pub const TOPOLOGY: Channel = Channel::new(3);

/// Size or placement inside the bezel changed: no propagation needed.
pub const LAYOUT: Channel = Channel::new(4);
