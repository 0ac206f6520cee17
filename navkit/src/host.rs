//! Host services consumed by widgets.
//!
//! Widgets never own the document they live in. Everything they need from
//! it (focus, visibility, ancestry, modal layering and notification
//! dispatch) goes through [`ElementHost`], which the embedding UI layer
//! implements. [`MemoryHost`](crate::MemoryHost) is an in-memory
//! implementation for tests and headless use.

use crate::element::ElementId;

/// A named notification dispatched on an element.
///
/// Mirrors DOM-style custom events: a notification may bubble to ancestors
/// and may be cancelable, in which case any listener can veto the action
/// that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Notification name, e.g. `"navlist:expand"`.
    pub name: &'static str,
    /// Optional payload (usually the key of the item concerned).
    pub detail: Option<String>,
    /// What originated the action (`"keyboard"`, `"pointer"`, ...).
    pub cause: Option<&'static str>,
    /// Whether ancestors of the target also receive it.
    pub bubbles: bool,
    /// Whether listeners may veto it.
    pub cancelable: bool,
    canceled: bool,
}

impl Notification {
    /// A bubbling, non-cancelable notification.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            detail: None,
            cause: None,
            bubbles: true,
            cancelable: false,
            canceled: false,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_cause(mut self, cause: &'static str) -> Self {
        self.cause = Some(cause);
        self
    }

    pub fn cancelable(mut self) -> Self {
        self.cancelable = true;
        self
    }

    /// Stop the notification from reaching ancestors of the target.
    pub fn non_bubbling(mut self) -> Self {
        self.bubbles = false;
        self
    }

    /// Veto the action announced by this notification.
    ///
    /// Has no effect unless the notification is cancelable.
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.canceled = true;
        }
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled
    }
}

/// Result of dispatching a [`Notification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    /// A listener called [`Notification::prevent_default`].
    pub canceled: bool,
    /// Number of listeners that received the notification.
    pub delivered: usize,
}

/// Document services a widget relies on.
///
/// All methods are synchronous and must not call back into the widget that
/// invoked them, except through notification listeners.
pub trait ElementHost: Send + Sync {
    /// Whether the element is attached and rendered (it and all ancestors
    /// are visible).
    fn is_visible(&self, element: &ElementId) -> bool;

    /// Whether `ancestor` is `element` or one of its ancestors.
    fn contains(&self, ancestor: &ElementId, element: &ElementId) -> bool;

    /// Whether the element sits in the topmost modal layer (or no modal is
    /// open), i.e. it is not obscured by a modal.
    fn is_above_top_modal_layer(&self, element: &ElementId) -> bool;

    /// The element that currently has focus.
    fn focused(&self) -> Option<ElementId>;

    /// Move focus to the element. Returns false if the element cannot take
    /// focus (unknown or hidden).
    fn focus(&self, element: &ElementId) -> bool;

    /// Dispatch a notification on the element.
    fn dispatch(&self, target: &ElementId, notification: Notification) -> DispatchOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prevent_default_requires_cancelable() {
        let mut plain = Notification::new("navlist:expand");
        plain.prevent_default();
        assert!(!plain.is_canceled());

        let mut vetoable = Notification::new("navlist:beforeExpand").cancelable();
        vetoable.prevent_default();
        assert!(vetoable.is_canceled());
    }
}
