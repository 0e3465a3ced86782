// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The HUD and its stack.
//!
//! A [`Hud`] owns everything about one overlay: its [`TimingController`],
//! the mounted [`Indicator`], the [`NodeTree`] presenters read from, the
//! in-flight [`Transition`] and the optional collaborators (progress feed,
//! delegate, completion handler). Lifecycle calls take the current
//! [`HostTime`] and return immediately; the host drives time forward with
//! [`Hud::tick`].
//!
//! A `Hud` is `!Send`: it holds boxed collaborators with no
//! `Send` bound, so moving it to another thread does not compile. Progress
//! from background work arrives through a
//! [`ProgressFeed`](crate::host::ProgressFeed) instead.

mod content;
mod stack;

pub use content::{
    BUTTON_BORDER_WIDTH, BUTTON_EXTRA_WIDTH, BezelStyle, ButtonSpec, DEFAULT_PADDING,
    DETAILS_FONT_SIZE, FillStyle, LABEL_FONT_SIZE, LayoutKnobs,
};
pub use stack::HudStack;

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};
use core::time::Duration;

use kurbo::{Affine, Rect};
use peniko::Color;

use crate::config::HudConfig;
use crate::controller::{Directive, Lifecycle, TimingController};
use crate::host::{HudDelegate, ProgressFeed};
use crate::indicator::{CustomContent, Indicator, Mode, ProgressIndicator, clamp_fraction};
use crate::node::{HudChanges, Node, NodeTree};
use crate::time::HostTime;
use crate::timing::{FrameTick, TickOutcome};
use crate::trace::{CleanupEvent, ProgressEvent, Tracer, TransitionEvent, TransitionPhase};
use crate::transition::{AnimationKind, Appearance, Direction, Transition};

/// Default content color: black at 70% alpha.
pub const DEFAULT_CONTENT_COLOR: Color = Color::from_rgba8(0, 0, 0, 179);

/// Identifies a HUD in trace events and delegate callbacks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HudId(pub u32);

impl HudId {
    /// Allocates a process-unique id.
    #[must_use]
    pub fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Debug for HudId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HudId({})", self.0)
    }
}

/// One progress HUD overlay.
pub struct Hud {
    id: HudId,
    config: HudConfig,
    controller: TimingController,
    mode: Mode,
    custom: Option<CustomContent>,
    indicator: Indicator,
    progress: f64,
    content_color: Color,
    label: Option<String>,
    details: Option<String>,
    button: Option<ButtonSpec>,
    bezel_style: BezelStyle,
    background_style: BezelStyle,
    layout: LayoutKnobs,
    host_bounds: Rect,
    nodes: NodeTree,
    transition: Option<Transition>,
    displayed: Appearance,
    last_seen: HostTime,
    feed: Option<Box<dyn ProgressFeed>>,
    progress_link: bool,
    delegate: Option<Box<dyn HudDelegate>>,
    completion: Option<Box<dyn FnOnce()>>,
    tracer: Tracer,
}

impl fmt::Debug for Hud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hud")
            .field("id", &self.id)
            .field("lifecycle", &self.controller.lifecycle())
            .field("mode", &self.mode)
            .field("progress", &self.progress)
            .field("displayed", &self.displayed)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl Hud {
    /// Creates an idle, transparent spinner HUD.
    #[must_use]
    pub fn new(config: HudConfig) -> Self {
        let id = HudId::next();
        let mut indicator = Indicator::for_mode(Mode::Spinner, None);
        indicator.apply_content_color(DEFAULT_CONTENT_COLOR);
        Self {
            id,
            config,
            controller: TimingController::new(id, config.grace_time, config.min_show_time),
            mode: Mode::Spinner,
            custom: None,
            indicator,
            progress: 0.0,
            content_color: DEFAULT_CONTENT_COLOR,
            label: None,
            details: None,
            button: None,
            bezel_style: BezelStyle::BEZEL,
            background_style: BezelStyle::BACKGROUND,
            layout: LayoutKnobs::DEFAULT,
            host_bounds: Rect::ZERO,
            nodes: NodeTree::new(),
            transition: None,
            displayed: Appearance::HIDDEN,
            last_seen: HostTime::ZERO,
            feed: None,
            progress_link: false,
            delegate: None,
            completion: None,
            tracer: Tracer::none(),
        }
    }

    // -- Lifecycle --

    /// Shows the HUD, after the grace time if one is configured.
    pub fn show(&mut self, now: HostTime, animated: bool) {
        self.last_seen = now;
        let directive = self.controller.show(now, animated, &mut self.tracer);
        self.execute(directive, now);
    }

    /// Hides the HUD, no sooner than the minimum show time after it was
    /// revealed. Does nothing if it is not shown.
    pub fn hide(&mut self, now: HostTime, animated: bool) {
        self.last_seen = now;
        let directive = self.controller.hide(now, animated, &mut self.tracer);
        self.execute(directive, now);
    }

    /// Hides the HUD after `delay`, replacing any earlier delayed hide.
    pub fn hide_after_delay(&mut self, now: HostTime, animated: bool, delay: Duration) {
        self.last_seen = now;
        self.controller
            .hide_after_delay(now, animated, delay, &mut self.tracer);
    }

    /// Drives the HUD forward to `tick.now`.
    ///
    /// Fires due timers, advances the in-flight transition, polls the
    /// progress feed and steps the spinner.
    pub fn tick(&mut self, tick: &FrameTick) -> TickOutcome {
        let now = tick.now;
        self.last_seen = now;
        while let Some(fired) = self.controller.fire_next(now, &mut self.tracer) {
            self.execute(fired.directive, now);
        }

        if let Some(transition) = self.transition {
            self.apply_appearance(transition.sample(now));
            if transition.is_complete(now) {
                self.transition = None;
                self.trace_transition(
                    now,
                    transition.direction(),
                    transition.kind(),
                    TransitionPhase::Finished,
                    true,
                );
                if transition.direction() == Direction::Out {
                    self.cleanup(now);
                }
            }
        }

        let shown = self.controller.lifecycle().is_shown();
        if shown
            && self.progress_link
            && let Some(fraction) = self.feed.as_ref().map(|feed| feed.poll())
        {
            self.set_progress(fraction);
        }
        if (shown || self.transition.is_some()) && self.indicator.advance(now) {
            self.nodes.mark_content(Node::Indicator);
        }

        TickOutcome {
            needs_frame: self.transition.is_some()
                || (shown && (self.indicator.is_animating() || self.is_progress_linked())),
            next_deadline: self.controller.next_deadline(),
        }
    }

    /// The earliest pending timer deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<HostTime> {
        self.controller.next_deadline()
    }

    /// Attaches the HUD to a host surface covering `host_bounds`.
    pub fn attach(&mut self, host_bounds: Rect) {
        self.set_host_bounds(host_bounds);
        self.nodes.request_attach();
    }

    /// Tells the HUD its host surface changed size, e.g. after a rotation.
    pub fn on_host_bounds_changed(&mut self, host_bounds: Rect) {
        self.set_host_bounds(host_bounds);
    }

    /// Detaches the HUD for good, without running the hide cleanup or
    /// notifying anyone.
    pub fn remove(&mut self, now: HostTime) {
        self.last_seen = now;
        if self.controller.lifecycle() == Lifecycle::Removed {
            return;
        }
        self.controller.remove(now, &mut self.tracer);
        self.transition = None;
        self.progress_link = false;
        self.apply_appearance(Appearance::HIDDEN);
        self.nodes.set_opacity(Node::Container, 0.0);
        self.nodes.request_detach();
    }

    /// Evaluates the node tree and returns what changed since the last
    /// evaluation.
    pub fn evaluate(&mut self) -> HudChanges {
        self.nodes.evaluate()
    }

    /// Like [`evaluate`](Self::evaluate), but reuses `changes`.
    pub fn evaluate_into(&mut self, changes: &mut HudChanges) {
        self.nodes.evaluate_into(changes);
    }

    // -- Content --

    /// Switches the display mode, swapping the indicator as needed.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.update_indicator();
    }

    /// Sets the content shown in [`Mode::CustomContent`]. `None` leaves an
    /// empty bezel.
    pub fn set_custom_content(&mut self, custom: Option<CustomContent>) {
        if self.custom == custom {
            return;
        }
        self.custom = custom;
        if self.mode == Mode::CustomContent {
            self.update_indicator();
        }
    }

    /// Sets the progress shown by determinate indicators, clamped to
    /// `[0, 1]` (NaN reads as `0`).
    pub fn set_progress(&mut self, fraction: f64) {
        let fraction = clamp_fraction(fraction);
        if self.progress == fraction {
            return;
        }
        self.progress = fraction;
        if self.indicator.set_fraction(fraction) {
            self.nodes.mark_content(Node::Indicator);
        }
        self.tracer.progress(&ProgressEvent {
            hud: self.id,
            at: self.last_seen,
            fraction,
        });
    }

    /// Sets or clears the feed polled for progress while the HUD is shown.
    pub fn set_progress_feed(&mut self, feed: Option<Box<dyn ProgressFeed>>) {
        self.feed = feed;
    }

    /// Sets the color of the labels, button and indicator.
    pub fn set_content_color(&mut self, color: Color) {
        if self.content_color == color {
            return;
        }
        self.content_color = color;
        if self.indicator.apply_content_color(color) {
            self.nodes.mark_content(Node::Indicator);
        }
        for node in [Node::Label, Node::Details, Node::Button] {
            if self.nodes.is_mounted(node) {
                self.nodes.mark_content(node);
            }
        }
    }

    /// Sets the main label. An empty string hides it.
    pub fn set_label(&mut self, text: impl Into<String>) {
        let text = non_empty(text.into());
        if self.label != text {
            self.nodes.set_mounted(Node::Label, text.is_some());
            self.label = text;
            self.touch_text(Node::Label);
        }
    }

    /// Sets the details label. An empty string hides it.
    pub fn set_details(&mut self, text: impl Into<String>) {
        let text = non_empty(text.into());
        if self.details != text {
            self.nodes.set_mounted(Node::Details, text.is_some());
            self.details = text;
            self.touch_text(Node::Details);
        }
    }

    /// Sets or removes the action button.
    pub fn set_button(&mut self, button: Option<ButtonSpec>) {
        if self.button != button {
            self.nodes.set_mounted(Node::Button, button.is_some());
            self.button = button;
            self.touch_text(Node::Button);
        }
    }

    /// Sets the bezel's fill and corner radius.
    pub fn set_bezel_style(&mut self, style: BezelStyle) {
        if self.bezel_style != style {
            self.bezel_style = style;
            self.nodes.mark_content(Node::Bezel);
        }
    }

    /// Sets the dimming background's fill.
    pub fn set_background_style(&mut self, style: BezelStyle) {
        if self.background_style != style {
            self.background_style = style;
            self.nodes.mark_content(Node::Background);
        }
    }

    /// Sets the bezel's placement and sizing knobs.
    pub fn set_layout(&mut self, layout: LayoutKnobs) {
        if self.layout != layout {
            self.layout = layout;
            self.nodes.mark_layout(Node::Bezel);
        }
    }

    // -- Configuration and collaborators --

    /// Sets the grace time used by the next `show`.
    pub fn set_grace_time(&mut self, grace_time: Duration) {
        self.config.grace_time = grace_time;
        self.controller.set_grace_time(grace_time);
    }

    /// Sets the minimum show time used by the next `hide`.
    pub fn set_min_show_time(&mut self, min_show_time: Duration) {
        self.config.min_show_time = min_show_time;
        self.controller.set_min_show_time(min_show_time);
    }

    /// Sets the reveal and conceal animation.
    pub fn set_animation(&mut self, animation: AnimationKind) {
        self.config.animation = animation;
    }

    /// Sets whether the HUD detaches once hidden.
    pub fn set_remove_on_hide(&mut self, remove_on_hide: bool) {
        self.config.remove_on_hide = remove_on_hide;
    }

    /// Sets or clears the delegate.
    pub fn set_delegate(&mut self, delegate: Option<Box<dyn HudDelegate>>) {
        self.delegate = delegate;
    }

    /// Arms the completion handler for the next completed hide.
    ///
    /// The handler runs once, before the delegate is told. Set it again to
    /// be told about a later hide.
    pub fn set_completion(&mut self, completion: impl FnOnce() + 'static) {
        self.completion = Some(Box::new(completion));
    }

    /// Disarms the completion handler.
    pub fn clear_completion(&mut self) {
        self.completion = None;
    }

    /// Replaces the tracer.
    pub fn set_tracer(&mut self, tracer: Tracer) {
        self.tracer = tracer;
    }

    // -- Getters --

    /// This HUD's id.
    #[must_use]
    pub const fn id(&self) -> HudId {
        self.id
    }

    /// The current configuration.
    #[must_use]
    pub const fn config(&self) -> &HudConfig {
        &self.config
    }

    /// The lifecycle state.
    #[must_use]
    pub const fn lifecycle(&self) -> Lifecycle {
        self.controller.lifecycle()
    }

    /// The display mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// The content for [`Mode::CustomContent`].
    #[must_use]
    pub const fn custom_content(&self) -> Option<CustomContent> {
        self.custom
    }

    /// The mounted indicator.
    #[must_use]
    pub const fn indicator(&self) -> &Indicator {
        &self.indicator
    }

    /// The progress fraction.
    #[must_use]
    pub const fn progress(&self) -> f64 {
        self.progress
    }

    /// The content color.
    #[must_use]
    pub const fn content_color(&self) -> Color {
        self.content_color
    }

    /// The main label.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The details label.
    #[must_use]
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// The action button.
    #[must_use]
    pub const fn button(&self) -> Option<&ButtonSpec> {
        self.button.as_ref()
    }

    /// The bezel style.
    #[must_use]
    pub const fn bezel_style(&self) -> BezelStyle {
        self.bezel_style
    }

    /// The dimming background style.
    #[must_use]
    pub const fn background_style(&self) -> BezelStyle {
        self.background_style
    }

    /// Placement and sizing knobs.
    #[must_use]
    pub const fn layout(&self) -> LayoutKnobs {
        self.layout
    }

    /// Bounds of the host surface.
    #[must_use]
    pub const fn host_bounds(&self) -> Rect {
        self.host_bounds
    }

    /// The node tree, as of the last evaluation.
    #[must_use]
    pub const fn nodes(&self) -> &NodeTree {
        &self.nodes
    }

    /// What the bezel currently displays.
    #[must_use]
    pub const fn displayed(&self) -> Appearance {
        self.displayed
    }

    /// The in-flight transition.
    #[must_use]
    pub const fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    /// Returns `true` while the progress feed is being polled.
    #[must_use]
    pub const fn is_progress_linked(&self) -> bool {
        self.progress_link && self.feed.is_some()
    }

    // -- Internals --

    fn execute(&mut self, directive: Option<Directive>, now: HostTime) {
        match directive {
            Some(Directive::Reveal { animated }) => self.reveal(now, animated),
            Some(Directive::Conceal { animated }) => self.conceal(now, animated),
            None => {}
        }
    }

    fn reveal(&mut self, now: HostTime, animated: bool) {
        self.interrupt(now);
        self.nodes.set_opacity(Node::Container, 1.0);
        self.progress_link = true;
        let kind = self.config.animation.resolve(Direction::In);
        if animated {
            let transition = Transition::begin(
                Direction::In,
                self.config.animation,
                self.displayed,
                now,
                self.config.curve,
            );
            self.transition = Some(transition);
            self.apply_appearance(transition.sample(now));
            self.trace_transition(now, Direction::In, kind, TransitionPhase::Began, true);
        } else {
            self.apply_appearance(Appearance::SHOWN);
            self.trace_transition(now, Direction::In, kind, TransitionPhase::Finished, false);
        }
    }

    fn conceal(&mut self, now: HostTime, animated: bool) {
        self.interrupt(now);
        let kind = self.config.animation.resolve(Direction::Out);
        if animated {
            let transition = Transition::begin(
                Direction::Out,
                self.config.animation,
                self.displayed,
                now,
                self.config.curve,
            );
            self.transition = Some(transition);
            self.trace_transition(now, Direction::Out, kind, TransitionPhase::Began, true);
        } else {
            self.apply_appearance(Appearance::HIDDEN);
            self.trace_transition(now, Direction::Out, kind, TransitionPhase::Finished, false);
            self.cleanup(now);
        }
    }

    /// Drops the in-flight transition, leaving the display where it got to.
    fn interrupt(&mut self, now: HostTime) {
        if let Some(old) = self.transition.take() {
            self.apply_appearance(old.sample(now));
            self.trace_transition(
                now,
                old.direction(),
                old.kind(),
                TransitionPhase::Interrupted,
                true,
            );
        }
    }

    /// Runs once a conceal has finished: stop the feed, go transparent,
    /// detach if configured, then tell the completion handler and the
    /// delegate, in that order.
    fn cleanup(&mut self, now: HostTime) {
        self.progress_link = false;
        self.nodes.set_opacity(Node::Container, 0.0);
        let detach = self.config.remove_on_hide;
        if detach {
            self.nodes.request_detach();
        }
        self.controller
            .finish_conceal(now, detach, &mut self.tracer);
        self.tracer.cleanup(&CleanupEvent {
            hud: self.id,
            at: now,
            detached: detach,
        });
        if let Some(completion) = self.completion.take() {
            completion();
        }
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.on_hidden(self.id);
        }
    }

    fn apply_appearance(&mut self, appearance: Appearance) {
        self.displayed = appearance;
        self.nodes.set_opacity(Node::Bezel, appearance.alpha);
        self.nodes.set_opacity(Node::Background, appearance.alpha);
        self.nodes
            .set_transform(Node::Bezel, Affine::scale(appearance.scale));
    }

    fn update_indicator(&mut self) {
        if self.indicator.serves(self.mode, self.custom) {
            if let Indicator::Ring(ring) = &mut self.indicator
                && ring.set_annular(self.mode == Mode::Annular)
            {
                self.nodes.mark_content(Node::Indicator);
            }
            return;
        }
        self.indicator = Indicator::for_mode(self.mode, self.custom);
        self.indicator.apply_content_color(self.content_color);
        self.indicator.set_fraction(self.progress);
        if !self
            .nodes
            .set_mounted(Node::Indicator, !self.indicator.is_none())
        {
            // Swapped one indicator for another in place.
            self.nodes.mark_content(Node::Indicator);
            self.nodes.mark_layout(Node::Bezel);
        }
    }

    fn touch_text(&mut self, node: Node) {
        self.nodes.mark_content(node);
        self.nodes.mark_layout(Node::Bezel);
    }

    fn set_host_bounds(&mut self, host_bounds: Rect) {
        if self.host_bounds != host_bounds {
            self.host_bounds = host_bounds;
            self.nodes.mark_layout(Node::Container);
            self.nodes.mark_layout(Node::Bezel);
        }
    }

    fn trace_transition(
        &mut self,
        now: HostTime,
        direction: Direction,
        kind: AnimationKind,
        phase: TransitionPhase,
        animated: bool,
    ) {
        self.tracer.transition(&TransitionEvent {
            hud: self.id,
            at: now,
            direction,
            kind,
            phase,
            animated,
        });
    }
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use crate::controller::LifecycleKind;

    fn ms(v: u64) -> HostTime {
        HostTime::from_millis(v)
    }

    fn tick(hud: &mut Hud, at: u64) -> TickOutcome {
        hud.tick(&FrameTick::at(ms(at)))
    }

    struct Recorder(Rc<RefCell<Vec<&'static str>>>);

    impl HudDelegate for Recorder {
        fn on_hidden(&mut self, _id: HudId) {
            self.0.borrow_mut().push("delegate");
        }
    }

    #[test]
    fn unanimated_show_is_immediately_opaque() {
        let mut hud = Hud::new(HudConfig::DEFAULT);
        hud.show(ms(0), false);
        let _ = hud.evaluate();
        assert_eq!(hud.lifecycle().kind(), LifecycleKind::Visible);
        assert_eq!(hud.nodes().effective_opacity(Node::Bezel), 1.0);
        assert_eq!(hud.displayed(), Appearance::SHOWN);
    }

    #[test]
    fn animated_show_fades_in_over_the_curve() {
        let mut hud = Hud::new(HudConfig::DEFAULT);
        hud.show(ms(0), true);
        assert_eq!(hud.displayed().alpha, 0.0);
        let mid = tick(&mut hud, 100);
        assert!(mid.needs_frame);
        let alpha = hud.displayed().alpha;
        assert!(alpha > 0.0 && alpha < 1.0, "alpha {alpha} mid-transition");
        tick(&mut hud, 300);
        assert_eq!(hud.displayed(), Appearance::SHOWN);
        assert!(hud.transition().is_none());
    }

    #[test]
    fn completion_runs_before_delegate() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hud = Hud::new(HudConfig::DEFAULT);
        hud.set_delegate(Some(Box::new(Recorder(Rc::clone(&log)))));
        let completion_log = Rc::clone(&log);
        hud.set_completion(move || completion_log.borrow_mut().push("completion"));
        hud.show(ms(0), false);
        hud.hide(ms(10), false);
        assert_eq!(*log.borrow(), ["completion", "delegate"]);
    }

    #[test]
    fn double_hide_cleans_up_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hud = Hud::new(HudConfig::DEFAULT);
        hud.set_delegate(Some(Box::new(Recorder(Rc::clone(&log)))));
        hud.show(ms(0), false);
        hud.hide(ms(10), false);
        hud.hide(ms(20), false);
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(hud.lifecycle(), Lifecycle::Idle);
    }

    #[test]
    fn animated_hide_cleans_up_when_the_transition_ends() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hud = Hud::new(HudConfig::DEFAULT.with_remove_on_hide(true));
        hud.attach(Rect::new(0.0, 0.0, 320.0, 480.0));
        hud.set_delegate(Some(Box::new(Recorder(Rc::clone(&log)))));
        hud.show(ms(0), false);
        let _ = hud.evaluate();
        hud.hide(ms(100), true);
        tick(&mut hud, 200);
        assert!(log.borrow().is_empty(), "still concealing");
        tick(&mut hud, 400);
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(hud.lifecycle(), Lifecycle::Removed);
        let changes = hud.evaluate();
        assert!(changes.detached);
        assert_eq!(hud.nodes().effective_opacity(Node::Container), 0.0);
    }

    #[test]
    fn show_during_hiding_interrupts_without_cleanup() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hud = Hud::new(HudConfig::DEFAULT.with_animation(AnimationKind::Zoom));
        hud.set_delegate(Some(Box::new(Recorder(Rc::clone(&log)))));
        hud.show(ms(0), false);
        hud.hide(ms(100), true);
        tick(&mut hud, 150);
        let mid = hud.displayed();
        assert!(mid.alpha < 1.0 && mid.scale < 1.0, "zoomed out part way");

        hud.show(ms(150), true);
        let transition = hud.transition().copied();
        assert!(matches!(transition, Some(t) if t.direction() == Direction::In));
        assert_eq!(hud.displayed(), mid, "reveal continues from the displayed state");
        tick(&mut hud, 600);
        assert!(log.borrow().is_empty());
        assert_eq!(hud.displayed(), Appearance::SHOWN);
        assert_eq!(hud.lifecycle().kind(), LifecycleKind::Visible);
    }

    #[test]
    fn mode_round_trip_keeps_one_indicator() {
        let mut hud = Hud::new(HudConfig::DEFAULT);
        let _ = hud.evaluate();
        for mode in [Mode::Ring, Mode::Bar, Mode::Ring] {
            hud.set_mode(mode);
            let changes = hud.evaluate();
            assert!(hud.nodes().is_mounted(Node::Indicator));
            assert!(changes.content.contains(&Node::Indicator));
        }
        assert!(matches!(hud.indicator(), Indicator::Ring(r) if !r.is_annular()));

        hud.set_mode(Mode::Annular);
        assert!(matches!(hud.indicator(), Indicator::Ring(r) if r.is_annular()));

        hud.set_mode(Mode::TextOnly);
        assert!(hud.indicator().is_none());
        assert!(hud.evaluate().unmounted.contains(&Node::Indicator));
    }

    #[test]
    fn new_indicator_inherits_progress_and_color() {
        let mut hud = Hud::new(HudConfig::DEFAULT);
        hud.set_progress(0.4);
        hud.set_content_color(Color::WHITE);
        hud.set_mode(Mode::Bar);
        let Indicator::Bar(bar) = hud.indicator() else {
            panic!("bar mode mounts a bar");
        };
        assert_eq!(bar.fraction(), 0.4);
        assert_eq!(bar.colors().foreground, Color::WHITE);
    }

    #[test]
    fn progress_is_clamped_and_marks_only_on_change() {
        let mut hud = Hud::new(HudConfig::DEFAULT);
        hud.set_mode(Mode::Ring);
        let _ = hud.evaluate();
        hud.set_progress(1.5);
        assert_eq!(hud.progress(), 1.0);
        assert_eq!(hud.evaluate().content, [Node::Indicator]);
        hud.set_progress(3.0);
        assert!(hud.evaluate().is_empty());
        hud.set_progress(f64::NAN);
        assert_eq!(hud.progress(), 0.0);
    }

    #[test]
    fn custom_mode_without_content_is_an_empty_bezel() {
        let mut hud = Hud::new(HudConfig::DEFAULT);
        hud.set_mode(Mode::CustomContent);
        assert!(hud.indicator().is_none());
        assert!(!hud.nodes().is_mounted(Node::Indicator));
        hud.set_custom_content(Some(CustomContent::icon(crate::indicator::Icon::Success)));
        assert!(matches!(hud.indicator(), Indicator::Custom(_)));
        assert!(hud.nodes().is_mounted(Node::Indicator));
    }

    #[test]
    fn labels_mount_and_unmount() {
        let mut hud = Hud::new(HudConfig::DEFAULT);
        let _ = hud.evaluate();
        hud.set_label("Loading");
        hud.set_button(Some(ButtonSpec::new("Cancel")));
        let changes = hud.evaluate();
        assert_eq!(changes.mounted, [Node::Label, Node::Button]);
        assert!(changes.layout.contains(&Node::Bezel));
        assert_eq!(hud.label(), Some("Loading"));

        hud.set_label("");
        assert_eq!(hud.label(), None);
        assert_eq!(hud.evaluate().unmounted, [Node::Label]);
    }

    #[test]
    fn feed_is_polled_only_while_shown() {
        let value = Rc::new(RefCell::new(0.25));
        let reader = Rc::clone(&value);
        let mut hud = Hud::new(HudConfig::DEFAULT);
        hud.set_mode(Mode::Bar);
        hud.set_progress_feed(Some(Box::new(move || *reader.borrow())));

        tick(&mut hud, 0);
        assert_eq!(hud.progress(), 0.0, "not shown yet");

        hud.show(ms(0), false);
        assert!(tick(&mut hud, 16).needs_frame);
        assert_eq!(hud.progress(), 0.25);

        hud.hide(ms(20), false);
        *value.borrow_mut() = 0.75;
        assert!(tick(&mut hud, 32).is_idle());
        assert_eq!(hud.progress(), 0.25, "link stopped on hide");
    }

    #[test]
    fn completion_is_one_shot() {
        let count = Rc::new(RefCell::new(0));
        let mut hud = Hud::new(HudConfig::DEFAULT);
        let c = Rc::clone(&count);
        hud.set_completion(move || *c.borrow_mut() += 1);
        hud.show(ms(0), false);
        hud.hide(ms(10), false);
        hud.show(ms(20), false);
        hud.hide(ms(30), false);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn host_bounds_change_marks_layout() {
        let mut hud = Hud::new(HudConfig::DEFAULT);
        hud.attach(Rect::new(0.0, 0.0, 320.0, 480.0));
        let _ = hud.evaluate();
        hud.on_host_bounds_changed(Rect::new(0.0, 0.0, 480.0, 320.0));
        let changes = hud.evaluate();
        assert_eq!(changes.layout, [Node::Container, Node::Bezel]);
        hud.on_host_bounds_changed(Rect::new(0.0, 0.0, 480.0, 320.0));
        assert!(hud.evaluate().is_empty());
    }

    #[test]
    fn remove_detaches_silently() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hud = Hud::new(HudConfig::DEFAULT);
        hud.attach(Rect::new(0.0, 0.0, 100.0, 100.0));
        hud.set_delegate(Some(Box::new(Recorder(Rc::clone(&log)))));
        hud.show(ms(0), false);
        let _ = hud.evaluate();
        hud.remove(ms(5));
        assert!(hud.evaluate().detached);
        assert!(log.borrow().is_empty());
        hud.show(ms(10), false);
        assert_eq!(hud.lifecycle(), Lifecycle::Removed);
    }
}
