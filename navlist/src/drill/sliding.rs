use std::sync::RwLock;

use async_trait::async_trait;
use log::debug;
use navkit::{AnimationAction, Key};

use crate::breadcrumb::{BreadcrumbEntry, BreadcrumbMenu, BreadcrumbStack};
use crate::config::{DrillKind, NavListConfig};
use crate::events::{NavEventKind, Trigger};
use crate::item::ItemKey;

use super::{forget_removed, DrillContext, DrillStrategy};

/// One level visible at a time.
///
/// Expanding a group slides its children in and pushes a breadcrumb entry
/// per level crossed; collapsing pops them again. The breadcrumb stack is
/// the source of truth for the current level: its top entry is the group
/// whose children are shown.
#[derive(Debug)]
pub struct SlidingDrill {
    stack: RwLock<BreadcrumbStack>,
}

impl SlidingDrill {
    pub fn new(config: &NavListConfig) -> Self {
        Self {
            stack: RwLock::new(BreadcrumbStack::new(
                config.hierarchy_menu_threshold,
                config.breadcrumb_label_width,
            )),
        }
    }

    fn with_stack<R>(&self, f: impl FnOnce(&mut BreadcrumbStack) -> R) -> Option<R> {
        self.stack.write().ok().map(|mut stack| f(&mut stack))
    }

    fn depth(&self) -> usize {
        self.stack.read().map(|s| s.depth()).unwrap_or(0)
    }

    /// Pop the top level with a real collapse. Returns false when the stack
    /// is empty or the level is still transitioning.
    async fn pop_level(&self, cx: &DrillContext, animate: bool, trigger: Trigger) -> bool {
        let Some(top) = self.with_stack(|s| s.top().cloned()).flatten() else {
            return false;
        };
        let key = top.item_key;
        let Some(_mark) = cx.begin_transition(&key) else {
            return false;
        };
        self.with_stack(|s| s.pop());
        cx.write(|s| {
            s.expanded.remove(&key);
            s.cursor = Some(key.clone());
        });
        debug!(
            "{}: slide out of {} to depth {} ({})",
            cx.root(),
            key,
            self.depth(),
            trigger.name()
        );

        let highlight = cx.coordinator().suppress_focus_highlight();
        cx.coordinator()
            .run(&cx.item_element(&key), DrillKind::Sliding, AnimationAction::SlideOut, animate)
            .await;

        if cx.is_expanded(&key) {
            debug!("{}: {} re-entered during its collapse", cx.root(), key);
            return false;
        }
        cx.focus_cursor_if_inside();
        drop(highlight);
        cx.notify(NavEventKind::Collapse, &key, trigger);
        true
    }

    /// Pop levels until the stack is `depth` deep. Only the final step is
    /// animated.
    async fn unwind_to(&self, cx: &DrillContext, depth: usize, animate: bool, trigger: Trigger) -> bool {
        let mut changed = false;
        while self.depth() > depth {
            let last = self.depth() == depth + 1;
            if !self.pop_level(cx, animate && last, trigger).await {
                return false;
            }
            changed = true;
        }
        changed
    }

    fn entry_for(cx: &DrillContext, key: &ItemKey) -> Option<BreadcrumbEntry> {
        let root_label = cx.config().root_label.clone();
        cx.read(|s| {
            let parent = s.tree.parent(key).cloned();
            let label = parent
                .as_ref()
                .and_then(|p| s.tree.label(p))
                .map(str::to_string)
                .unwrap_or(root_label);
            BreadcrumbEntry::new(parent, label, key.clone())
        })
    }
}

#[async_trait]
impl DrillStrategy for SlidingDrill {
    fn kind(&self) -> DrillKind {
        DrillKind::Sliding
    }

    fn marker(&self) -> &'static str {
        "navlist-sliding"
    }

    async fn expand(&self, cx: &DrillContext, key: &ItemKey, animate: bool, trigger: Trigger) -> bool {
        let Some(_mark) = cx.begin_transition(key) else {
            return false;
        };
        let expandable = cx
            .read(|s| s.tree.is_group(key) && !s.expanded.contains(key))
            .unwrap_or(false);
        if !expandable {
            return false;
        }
        let ancestors = cx.read(|s| s.tree.ancestors(key)).unwrap_or_default();

        // Leave any level that is not on the way to the target.
        loop {
            match self.current_level() {
                Some(level) if !ancestors.contains(&level) => {
                    if !self.pop_level(cx, false, trigger).await {
                        return false;
                    }
                }
                _ => break,
            }
        }

        let start = match self.current_level() {
            Some(level) => ancestors
                .iter()
                .position(|a| *a == level)
                .map_or(0, |p| p + 1),
            None => 0,
        };
        let mut chain: Vec<ItemKey> = ancestors[start..].to_vec();
        chain.push(key.clone());

        let entries: Vec<BreadcrumbEntry> = chain
            .iter()
            .filter_map(|level| Self::entry_for(cx, level))
            .collect();
        self.with_stack(|s| entries.into_iter().for_each(|e| s.push(e)));
        cx.write(|s| {
            s.expanded.extend(chain.iter().cloned());
            let children = s.tree.children(Some(key));
            s.cursor = children
                .iter()
                .find(|i| !i.disabled)
                .or_else(|| children.first())
                .map(|i| i.key.clone());
        });
        debug!(
            "{}: slide into {} to depth {} ({})",
            cx.root(),
            key,
            self.depth(),
            trigger.name()
        );

        let highlight = cx.coordinator().suppress_focus_highlight();
        let busy = cx.coordinator().hold();
        cx.coordinator()
            .run(&cx.item_element(key), DrillKind::Sliding, AnimationAction::SlideIn, animate)
            .await;

        if !cx.is_expanded(key) {
            debug!("{}: {} left during its expansion", cx.root(), key);
            return false;
        }
        cx.focus_cursor_if_inside();
        drop(highlight);
        drop(busy);
        for level in &chain {
            cx.notify(NavEventKind::Expand, level, trigger);
        }
        true
    }

    async fn collapse(&self, cx: &DrillContext, key: &ItemKey, animate: bool, trigger: Trigger) -> bool {
        let Some(position) = self.stack.read().ok().and_then(|s| s.position(key)) else {
            return false;
        };
        self.unwind_to(cx, position, animate, trigger).await
    }

    async fn handle_key(&self, cx: &DrillContext, key: Key, current: Option<&ItemKey>) -> bool {
        let animate = cx.config().animate;
        match key {
            Key::Left | Key::Escape => {
                let Some(level) = self.current_level() else {
                    return false;
                };
                if !cx.vetoed(NavEventKind::BeforeCollapse, &level, Trigger::Keyboard) {
                    self.collapse_current_level(cx, animate, Trigger::Keyboard)
                        .await;
                }
                true
            }
            k if k == Key::Right || k.is_activation() => {
                let Some(current) = current else {
                    return false;
                };
                let drillable = cx
                    .read(|s| s.tree.is_group(current) && !s.tree.is_disabled(current))
                    .unwrap_or(false);
                if !drillable {
                    return false;
                }
                if !cx.vetoed(NavEventKind::BeforeExpand, current, Trigger::Keyboard) {
                    self.expand(cx, current, animate, Trigger::Keyboard).await;
                }
                true
            }
            _ => false,
        }
    }

    async fn collapse_current_level(&self, cx: &DrillContext, animate: bool, trigger: Trigger) -> bool {
        self.pop_level(cx, animate, trigger).await
    }

    async fn select_breadcrumb(
        &self,
        cx: &DrillContext,
        index: usize,
        animate: bool,
        trigger: Trigger,
    ) -> bool {
        if index >= self.depth() {
            return false;
        }
        self.unwind_to(cx, index, animate, trigger).await
    }

    fn breadcrumbs(&self) -> Option<BreadcrumbMenu> {
        self.stack.read().ok().map(|s| s.menu().clone())
    }

    fn breadcrumb_entries(&self) -> Vec<BreadcrumbEntry> {
        self.stack
            .read()
            .map(|s| s.entries().to_vec())
            .unwrap_or_default()
    }

    fn current_level(&self) -> Option<ItemKey> {
        self.stack
            .read()
            .ok()
            .and_then(|s| s.top().map(|e| e.item_key.clone()))
    }

    fn visible_keys(&self, cx: &DrillContext) -> Vec<ItemKey> {
        let level = self.current_level();
        cx.read(|s| {
            s.tree
                .children(level.as_ref())
                .iter()
                .map(|i| i.key.clone())
                .collect()
        })
        .unwrap_or_default()
    }

    fn items_changed(&self, cx: &DrillContext) {
        forget_removed(cx);
        let dropped = cx
            .read(|s| {
                self.with_stack(|stack| stack.retain_known(|k| s.tree.contains(k)))
                    .unwrap_or_default()
            })
            .unwrap_or_default();
        if dropped.is_empty() {
            return;
        }
        debug!("{}: discarding {} stale breadcrumbs", cx.root(), dropped.len());
        cx.write(|s| {
            for entry in &dropped {
                s.expanded.remove(&entry.item_key);
            }
        });
    }
}
