//! Notifications fired on a list's root element.
//!
//! Before-notifications are cancelable; a listener calling
//! `prevent_default()` vetoes the transition before any state changes.
//! After-notifications fire once the transition (and its animation) has
//! settled.

use navkit::Notification;

use crate::item::ItemKey;

/// Identifies which notification is fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavEventKind {
    BeforeExpand,
    Expand,
    BeforeCollapse,
    Collapse,
    /// Roving focus moved into the region; fired without bubbling so only
    /// the region itself announces it.
    FocusNavigatedHere,
}

impl NavEventKind {
    pub fn name(self) -> &'static str {
        match self {
            NavEventKind::BeforeExpand => "navlist:beforeExpand",
            NavEventKind::Expand => "navlist:expand",
            NavEventKind::BeforeCollapse => "navlist:beforeCollapse",
            NavEventKind::Collapse => "navlist:collapse",
            NavEventKind::FocusNavigatedHere => "navlist:focusNavigatedHere",
        }
    }

    pub fn is_cancelable(self) -> bool {
        matches!(self, NavEventKind::BeforeExpand | NavEventKind::BeforeCollapse)
    }

    /// Build the notification for an item.
    pub fn notification(self, key: &ItemKey, trigger: Trigger) -> Notification {
        let notification = Notification::new(self.name())
            .with_detail(key.as_str())
            .with_cause(trigger.name());
        if self.is_cancelable() {
            notification.cancelable()
        } else {
            notification
        }
    }
}

/// What originated an expand/collapse request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Application code.
    #[default]
    Api,
    Keyboard,
    Pointer,
}

impl Trigger {
    pub fn name(self) -> &'static str {
        match self {
            Trigger::Api => "api",
            Trigger::Keyboard => "keyboard",
            Trigger::Pointer => "pointer",
        }
    }
}

/// Result of handling an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

impl From<bool> for EventResult {
    fn from(handled: bool) -> Self {
        if handled {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}
