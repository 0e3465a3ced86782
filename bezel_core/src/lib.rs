// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle, timing and indicator geometry for progress HUD overlays.
//!
//! `bezel_core` provides the state machine and data structures behind a
//! progress HUD: a translucent panel that communicates indeterminate or
//! determinate progress, short status text, or a transient message. It is
//! `no_std` compatible (with `alloc`) and never touches a real view tree or
//! pixel surface; those are reached through the [`host`] traits.
//!
//! # Architecture
//!
//! The host's UI loop drives everything. Lifecycle calls return immediately;
//! waits are one-shot timers that fire from [`Hud::tick`](hud::Hud::tick):
//!
//! ```text
//!   show / hide / hide_after_delay
//!       │
//!       ▼
//!   TimingController ──► Directive (Reveal / Conceal)
//!       ▲                    │
//!       │ TimerQueue         ▼
//!   FrameTick ──► Hud::tick() ──► Transition ──► NodeTree
//!                                                    │
//!                 ┌──────────────────────────────────┘
//!                 ▼
//!   Hud::evaluate() ──► HudChanges ──► Presenter::apply()
//! ```
//!
//! **[`controller`]** — The show/hide state machine: grace time, minimum
//! show time and delayed hide, with owned cancellation tokens per timer role.
//!
//! **[`timer`]** — Generational one-shot timer queue.
//!
//! **[`transition`]** — Fade/zoom reveal and conceal driven by a critically
//! damped spring, interruptible from the displayed state.
//!
//! **[`geometry`]** — Ring (pie/annular) and capsule bar paths as `kurbo`
//! shapes.
//!
//! **[`indicator`]** — The closed set of progress indicators and the
//! [`ProgressIndicator`](indicator::ProgressIndicator) interface.
//!
//! **[`node`]** / **[`dirty`]** — The fixed HUD node tree with multi-channel
//! dirty tracking via `understory_dirty`.
//!
//! **[`hud`]** — The [`Hud`](hud::Hud) itself, plus the [`HudStack`](hud::HudStack)
//! lookup used by the [`presets`].
//!
//! **[`host`]** — What the embedding application supplies: a
//! [`Presenter`](host::Presenter), an optional [`HudDelegate`](host::HudDelegate)
//! and an optional [`ProgressFeed`](host::ProgressFeed).
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! lifecycle instrumentation, with a zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod controller;
pub mod dirty;
pub mod geometry;
pub mod host;
pub mod hud;
pub mod indicator;
pub mod node;
pub mod presets;
pub mod time;
pub mod timer;
pub mod timing;
pub mod trace;
pub mod transition;
