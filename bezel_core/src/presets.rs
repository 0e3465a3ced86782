// Copyright 2026 the Bezel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-call HUDs for common situations.
//!
//! Each preset builds a [`Hud`], pushes it onto a [`HudStack`] so it detaches
//! once hidden, and shows it with animation. Success and error toasts also
//! schedule their own hide after [`TOAST_DURATION`].

use alloc::string::String;

use crate::config::{HudConfig, TOAST_DURATION};
use crate::hud::{Hud, HudId, HudStack};
use crate::indicator::{CustomContent, Icon, Mode};
use crate::time::HostTime;

fn show_icon(stack: &mut HudStack, now: HostTime, text: String, icon: Icon) -> HudId {
    let mut hud = Hud::new(HudConfig::toast());
    hud.set_mode(Mode::CustomContent);
    hud.set_custom_content(Some(CustomContent::icon(icon)));
    hud.set_label(text);
    let id = stack.show_hud(hud, now, true);
    if let Some(hud) = stack.get_mut(id) {
        hud.hide_after_delay(now, true, TOAST_DURATION);
    }
    id
}

/// Shows a check mark with `text`, hiding itself after [`TOAST_DURATION`].
pub fn show_success(stack: &mut HudStack, now: HostTime, text: impl Into<String>) -> HudId {
    show_icon(stack, now, text.into(), Icon::Success)
}

/// Shows a cross with `text`, hiding itself after [`TOAST_DURATION`].
pub fn show_error(stack: &mut HudStack, now: HostTime, text: impl Into<String>) -> HudId {
    show_icon(stack, now, text.into(), Icon::Error)
}

/// Shows `text` alone. The caller hides it.
pub fn show_message(stack: &mut HudStack, now: HostTime, text: impl Into<String>) -> HudId {
    let mut hud = Hud::new(HudConfig::toast());
    hud.set_mode(Mode::TextOnly);
    hud.set_label(text);
    stack.show_hud(hud, now, true)
}

/// Shows a spinner with `text`. The caller hides it.
pub fn show_loading(stack: &mut HudStack, now: HostTime, text: impl Into<String>) -> HudId {
    let mut hud = Hud::new(HudConfig::toast());
    hud.set_mode(Mode::Spinner);
    hud.set_label(text);
    stack.show_hud(hud, now, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::LifecycleKind;
    use crate::indicator::Indicator;
    use crate::timing::FrameTick;
    use kurbo::Rect;

    fn ms(v: u64) -> HostTime {
        HostTime::from_millis(v)
    }

    fn stack() -> HudStack {
        HudStack::new(Rect::new(0.0, 0.0, 320.0, 480.0))
    }

    #[test]
    fn success_toast_hides_itself() {
        let mut stack = stack();
        let id = show_success(&mut stack, ms(0), "Saved");
        let hud = stack.get(id).expect("toast was pushed");
        assert_eq!(hud.label(), Some("Saved"));
        assert!(matches!(hud.indicator(), Indicator::Custom(c)
            if c.content() == CustomContent::icon(Icon::Success)));
        assert_eq!(hud.next_deadline(), Some(ms(700)));

        stack.tick(&FrameTick::at(ms(700)));
        let hud = stack.get(id).expect("still in the stack until presented");
        assert_eq!(hud.lifecycle().kind(), LifecycleKind::Hiding);
        stack.tick(&FrameTick::at(ms(1_000)));
        let hud = stack.get(id).expect("still in the stack until presented");
        assert_eq!(hud.lifecycle().kind(), LifecycleKind::Removed);
    }

    #[test]
    fn error_uses_the_error_icon() {
        let mut stack = stack();
        let id = show_error(&mut stack, ms(0), "Failed");
        let hud = stack.get(id).expect("toast was pushed");
        assert!(matches!(hud.indicator(), Indicator::Custom(c)
            if c.content() == CustomContent::icon(Icon::Error)));
    }

    #[test]
    fn message_and_loading_wait_for_the_caller() {
        let mut stack = stack();
        let message = show_message(&mut stack, ms(0), "Hello");
        let loading = show_loading(&mut stack, ms(0), "Working");
        let hud = stack.get(message).expect("message was pushed");
        assert!(hud.indicator().is_none());
        assert_eq!(hud.next_deadline(), None);
        let hud = stack.get(loading).expect("loading was pushed");
        assert!(matches!(hud.indicator(), Indicator::Spinner(_)));
        assert!(hud.config().remove_on_hide);
        assert_eq!(stack.top().map(Hud::id), Some(loading));
    }
}
