//! Drill-mode strategies.
//!
//! A list picks one [`DrillStrategy`] at construction and routes every
//! expand, collapse and key request through it. The trait's default methods
//! describe a list that never expands anything; each mode overrides what it
//! supports.

mod collapsible;
mod horizontal;
mod none;
mod sliding;

pub use collapsible::CollapsibleDrill;
pub use horizontal::HorizontalDrill;
pub use none::FlatDrill;
pub use sliding::SlidingDrill;

use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use log::debug;
use navkit::{ElementHost, ElementId, Key};

use crate::animation::AnimationCoordinator;
use crate::breadcrumb::{BreadcrumbEntry, BreadcrumbMenu};
use crate::config::{DrillKind, NavListConfig, ReadingDirection};
use crate::events::{NavEventKind, Trigger};
use crate::item::ItemKey;
use crate::keys;
use crate::tree::{ExpansionState, ItemTree};

/// Build the strategy for a resolved mode.
pub fn strategy_for(kind: DrillKind, config: &NavListConfig) -> Box<dyn DrillStrategy> {
    match kind {
        DrillKind::None => Box::new(FlatDrill),
        DrillKind::Horizontal => Box::new(HorizontalDrill::new()),
        DrillKind::Collapsible => Box::new(CollapsibleDrill),
        DrillKind::Sliding => Box::new(SlidingDrill::new(config)),
    }
}

// =============================================================================
// Shared list state
// =============================================================================

/// Mutable state of one list, shared between the list and its strategy.
#[derive(Debug, Default)]
pub struct ListState {
    pub(crate) tree: ItemTree,
    /// Groups currently expanded.
    pub(crate) expanded: HashSet<ItemKey>,
    /// Items with a transition still in flight.
    pub(crate) in_transition: HashSet<ItemKey>,
    /// Item the keyboard cursor is on.
    pub(crate) cursor: Option<ItemKey>,
    /// Mode markers applied to the root element.
    pub(crate) markers: BTreeSet<&'static str>,
    pub(crate) destroyed: bool,
}

impl ListState {
    pub(crate) fn new(tree: ItemTree) -> Self {
        Self {
            tree,
            ..Self::default()
        }
    }
}

/// Everything a strategy may touch: shared state plus host services.
#[derive(Clone)]
pub struct DrillContext {
    pub(crate) state: Arc<RwLock<ListState>>,
    pub(crate) coordinator: AnimationCoordinator,
    pub(crate) host: Arc<dyn ElementHost>,
    pub(crate) root: ElementId,
    pub(crate) config: Arc<NavListConfig>,
}

impl std::fmt::Debug for DrillContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrillContext")
            .field("root", &self.root)
            .field("coordinator", &self.coordinator)
            .finish()
    }
}

impl DrillContext {
    pub fn root(&self) -> &ElementId {
        &self.root
    }

    pub fn config(&self) -> &NavListConfig {
        &self.config
    }

    pub fn coordinator(&self) -> &AnimationCoordinator {
        &self.coordinator
    }

    /// Element rendering the item.
    pub fn item_element(&self, key: &ItemKey) -> ElementId {
        self.root.join(key.as_str())
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&ListState) -> R) -> Option<R> {
        self.state.read().ok().map(|guard| f(&guard))
    }

    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut ListState) -> R) -> Option<R> {
        self.state.write().ok().map(|mut guard| f(&mut guard))
    }

    /// Fire an after-notification on the root.
    pub fn notify(&self, kind: NavEventKind, key: &ItemKey, trigger: Trigger) {
        self.host.dispatch(&self.root, kind.notification(key, trigger));
    }

    /// Fire a cancelable before-notification. Returns true if a listener
    /// vetoed it.
    pub fn vetoed(&self, kind: NavEventKind, key: &ItemKey, trigger: Trigger) -> bool {
        let outcome = self.host.dispatch(&self.root, kind.notification(key, trigger));
        if outcome.canceled {
            debug!("{} on {} vetoed", kind.name(), key);
        }
        outcome.canceled
    }

    /// Mark `key` as transitioning. Returns `None` while an earlier
    /// transition on the same item is still in flight.
    pub(crate) fn begin_transition(&self, key: &ItemKey) -> Option<TransitionMark> {
        let fresh = self
            .write(|s| s.in_transition.insert(key.clone()))
            .unwrap_or(false);
        if !fresh {
            debug!("rejecting request on {}: transition in flight", key);
            return None;
        }
        Some(TransitionMark {
            state: Arc::clone(&self.state),
            key: key.clone(),
        })
    }

    pub(crate) fn is_expanded(&self, key: &ItemKey) -> bool {
        self.read(|s| s.expanded.contains(key)).unwrap_or(false)
    }

    pub(crate) fn is_destroyed(&self) -> bool {
        self.read(|s| s.destroyed).unwrap_or(true)
    }

    /// Put the cursor on `key` and follow it with focus.
    pub(crate) fn move_cursor(&self, key: ItemKey) {
        self.write(|s| s.cursor = Some(key));
        self.focus_cursor_if_inside();
    }

    /// Move the host focus to the cursor item, but only when focus already
    /// lives inside the list.
    pub(crate) fn focus_cursor_if_inside(&self) {
        let Some(cursor) = self.read(|s| s.cursor.clone()).flatten() else {
            return;
        };
        let inside = self
            .host
            .focused()
            .is_some_and(|focused| self.host.contains(&self.root, &focused));
        if inside {
            self.host.focus(&self.item_element(&cursor));
        }
    }
}

/// Clears the in-transition flag of an item when dropped.
#[derive(Debug)]
pub(crate) struct TransitionMark {
    state: Arc<RwLock<ListState>>,
    key: ItemKey,
}

impl Drop for TransitionMark {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.write() {
            state.in_transition.remove(&self.key);
        }
    }
}

// =============================================================================
// Strategy contract
// =============================================================================

/// Expand/collapse and key semantics of one drill mode.
///
/// `expand` and `collapse` resolve after the transition's animation has
/// finished and report whether anything changed. Requests that would not
/// change anything are no-ops returning false.
#[async_trait]
pub trait DrillStrategy: Send + Sync + std::fmt::Debug {
    fn kind(&self) -> DrillKind;

    /// Marker applied to the root element while the strategy is active.
    fn marker(&self) -> &'static str;

    /// Apply mode markers. Does not touch the items.
    fn initialize(&self, cx: &DrillContext) {
        let marker = self.marker();
        cx.write(|s| s.markers.insert(marker));
    }

    fn expansion_state(&self, cx: &DrillContext, key: &ItemKey) -> ExpansionState {
        cx.read(|s| {
            if !s.tree.is_group(key) {
                ExpansionState::NotExpandable
            } else if s.expanded.contains(key) {
                ExpansionState::Expanded
            } else {
                ExpansionState::Collapsed
            }
        })
        .unwrap_or(ExpansionState::NotExpandable)
    }

    async fn expand(
        &self,
        _cx: &DrillContext,
        _key: &ItemKey,
        _animate: bool,
        _trigger: Trigger,
    ) -> bool {
        false
    }

    async fn collapse(
        &self,
        _cx: &DrillContext,
        _key: &ItemKey,
        _animate: bool,
        _trigger: Trigger,
    ) -> bool {
        false
    }

    /// Handle an expand/collapse key on the cursor item. `key` is already
    /// in logical form (see [`DrillStrategy::map_key`]).
    async fn handle_key(&self, _cx: &DrillContext, _key: Key, _current: Option<&ItemKey>) -> bool {
        false
    }

    /// Turn a physical key into its logical meaning for this mode.
    fn map_key(&self, key: Key, direction: ReadingDirection) -> Key {
        keys::mirror(key, direction)
    }

    /// Step back exactly one level.
    async fn collapse_current_level(
        &self,
        _cx: &DrillContext,
        _animate: bool,
        _trigger: Trigger,
    ) -> bool {
        false
    }

    /// Jump back to breadcrumb `index`, leaving a stack of that depth.
    async fn select_breadcrumb(
        &self,
        _cx: &DrillContext,
        _index: usize,
        _animate: bool,
        _trigger: Trigger,
    ) -> bool {
        false
    }

    fn breadcrumbs(&self) -> Option<BreadcrumbMenu> {
        None
    }

    fn breadcrumb_entries(&self) -> Vec<BreadcrumbEntry> {
        Vec::new()
    }

    /// Group whose children are the visible level (`None` = top level).
    fn current_level(&self) -> Option<ItemKey> {
        None
    }

    /// Items shown to the user and to assistive technology, in order.
    fn visible_keys(&self, cx: &DrillContext) -> Vec<ItemKey> {
        cx.read(|s| s.tree.walk().into_iter().map(|(i, _)| i.key.clone()).collect())
            .unwrap_or_default()
    }

    /// Items preceded by a separator marker.
    fn separators(&self) -> Vec<ItemKey> {
        Vec::new()
    }

    /// Items were inserted or removed.
    fn items_changed(&self, cx: &DrillContext) {
        forget_removed(cx);
    }

    /// Remove markers and mode state. Safe to call more than once.
    fn destroy(&self, cx: &DrillContext) {
        let marker = self.marker();
        cx.write(|s| s.markers.remove(marker));
    }
}

/// Drop expansion entries of items that left the tree.
pub(crate) fn forget_removed(cx: &DrillContext) {
    cx.write(|s| {
        let ListState { tree, expanded, .. } = s;
        expanded.retain(|k| tree.contains(k));
    });
}

/// Preorder walk that only descends into expanded groups.
pub(crate) fn expanded_walk(state: &ListState) -> Vec<ItemKey> {
    fn descend(items: &[crate::item::Item], state: &ListState, out: &mut Vec<ItemKey>) {
        for item in items {
            out.push(item.key.clone());
            if state.expanded.contains(&item.key) {
                descend(item.children(), state, out);
            }
        }
    }
    let mut out = Vec::new();
    descend(state.tree.roots(), state, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use navkit::{ImmediateAnimator, MemoryHost};

    fn context(kind: DrillKind) -> (DrillContext, Box<dyn DrillStrategy>) {
        let items = vec![
            Item::group("a", "A", vec![Item::leaf("a1", "A1")]),
            Item::group("b", "B", vec![Item::leaf("b1", "B1")]),
        ];
        let config = NavListConfig::new();
        let cx = DrillContext {
            state: Arc::new(RwLock::new(ListState::new(ItemTree::new(items)))),
            coordinator: AnimationCoordinator::new(Arc::new(ImmediateAnimator)),
            host: Arc::new(MemoryHost::new()),
            root: ElementId::new("nav"),
            config: Arc::new(config.clone()),
        };
        (cx, strategy_for(kind, &config))
    }

    #[test]
    fn every_strategy_forgets_removed_groups() {
        for kind in [
            DrillKind::None,
            DrillKind::Horizontal,
            DrillKind::Collapsible,
            DrillKind::Sliding,
        ] {
            let (cx, strategy) = context(kind);
            cx.write(|s| {
                s.expanded.insert(ItemKey::from("a"));
                s.expanded.insert(ItemKey::from("b"));
                s.tree.remove(&ItemKey::from("a"));
            });
            strategy.items_changed(&cx);
            let expanded = cx.read(|s| s.expanded.clone()).unwrap_or_default();
            assert_eq!(expanded, HashSet::from([ItemKey::from("b")]), "{kind:?}");
        }
    }
}
