use async_trait::async_trait;
use log::debug;
use navkit::{AnimationAction, Key};

use crate::config::DrillKind;
use crate::events::{NavEventKind, Trigger};
use crate::item::ItemKey;
use crate::tree::ExpansionState;

use super::{expanded_walk, DrillContext, DrillStrategy};

/// Groups open and close in place.
///
/// Collapsing a group keeps the expansion state of its descendants, so
/// opening it again restores the subtree as it was.
#[derive(Debug, Default, Clone, Copy)]
pub struct CollapsibleDrill;

impl CollapsibleDrill {
    async fn toggle(&self, cx: &DrillContext, key: &ItemKey, state: ExpansionState) {
        let animate = cx.config().animate;
        match state {
            ExpansionState::Collapsed => {
                if !cx.vetoed(NavEventKind::BeforeExpand, key, Trigger::Keyboard) {
                    self.expand(cx, key, animate, Trigger::Keyboard).await;
                }
            }
            ExpansionState::Expanded => {
                if !cx.vetoed(NavEventKind::BeforeCollapse, key, Trigger::Keyboard) {
                    self.collapse(cx, key, animate, Trigger::Keyboard).await;
                }
            }
            ExpansionState::NotExpandable => {}
        }
    }
}

#[async_trait]
impl DrillStrategy for CollapsibleDrill {
    fn kind(&self) -> DrillKind {
        DrillKind::Collapsible
    }

    fn marker(&self) -> &'static str {
        "navlist-collapsible"
    }

    async fn expand(&self, cx: &DrillContext, key: &ItemKey, animate: bool, trigger: Trigger) -> bool {
        let Some(_mark) = cx.begin_transition(key) else {
            return false;
        };
        let changed = cx
            .write(|s| s.tree.is_group(key) && s.expanded.insert(key.clone()))
            .unwrap_or(false);
        if !changed {
            return false;
        }
        debug!("{}: expand {} ({})", cx.root(), key, trigger.name());

        cx.coordinator()
            .run(&cx.item_element(key), DrillKind::Collapsible, AnimationAction::Expand, animate)
            .await;

        if !cx.is_expanded(key) {
            debug!("{}: {} collapsed during its expansion", cx.root(), key);
            return false;
        }
        cx.notify(NavEventKind::Expand, key, trigger);
        true
    }

    async fn collapse(&self, cx: &DrillContext, key: &ItemKey, animate: bool, trigger: Trigger) -> bool {
        let Some(_mark) = cx.begin_transition(key) else {
            return false;
        };
        let changed = cx
            .write(|s| {
                if !s.expanded.remove(key) {
                    return None;
                }
                // A cursor hidden by the collapse moves up to the group.
                let hidden = s
                    .cursor
                    .as_ref()
                    .is_some_and(|c| s.tree.is_descendant(c, key));
                if hidden {
                    s.cursor = Some(key.clone());
                }
                Some(hidden)
            })
            .flatten();
        let Some(cursor_moved) = changed else {
            return false;
        };
        debug!("{}: collapse {} ({})", cx.root(), key, trigger.name());

        cx.coordinator()
            .run(&cx.item_element(key), DrillKind::Collapsible, AnimationAction::Collapse, animate)
            .await;

        if cx.is_expanded(key) {
            debug!("{}: {} expanded during its collapse", cx.root(), key);
            return false;
        }
        if cursor_moved {
            cx.focus_cursor_if_inside();
        }
        cx.notify(NavEventKind::Collapse, key, trigger);
        true
    }

    async fn handle_key(&self, cx: &DrillContext, key: Key, current: Option<&ItemKey>) -> bool {
        let Some(current) = current else {
            return false;
        };
        let disabled = cx.read(|s| s.tree.is_disabled(current)).unwrap_or(true);
        let state = self.expansion_state(cx, current);

        match key {
            Key::Right => match state {
                ExpansionState::Collapsed if !disabled => {
                    self.toggle(cx, current, state).await;
                    true
                }
                ExpansionState::Expanded => {
                    let first = cx
                        .read(|s| {
                            s.tree
                                .children(Some(current))
                                .iter()
                                .find(|i| !i.disabled)
                                .map(|i| i.key.clone())
                        })
                        .flatten();
                    match first {
                        Some(child) => {
                            cx.move_cursor(child);
                            true
                        }
                        None => false,
                    }
                }
                _ => false,
            },
            Key::Left => match state {
                ExpansionState::Expanded if !disabled => {
                    self.toggle(cx, current, state).await;
                    true
                }
                _ => {
                    let parent = cx.read(|s| s.tree.parent(current).cloned()).flatten();
                    match parent {
                        Some(parent) => {
                            cx.move_cursor(parent);
                            true
                        }
                        None => false,
                    }
                }
            },
            k if k.is_activation() && !disabled && state != ExpansionState::NotExpandable => {
                self.toggle(cx, current, state).await;
                true
            }
            _ => false,
        }
    }

    fn visible_keys(&self, cx: &DrillContext) -> Vec<ItemKey> {
        cx.read(expanded_walk).unwrap_or_default()
    }
}
