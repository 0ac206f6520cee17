//! Navigation list widget state.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, Weak};

use log::{debug, trace};
use navkit::{AnimationService, ElementHost, ElementId, KeyCombo};

use crate::animation::{AnimationCoordinator, AnimationTheme};
use crate::breadcrumb::{BreadcrumbEntry, BreadcrumbMenu};
use crate::config::{ConfigError, DrillKind, NavListConfig};
use crate::drill::{strategy_for, DrillContext, DrillStrategy, ListState};
use crate::events::{EventResult, NavEventKind, Trigger};
use crate::item::{Item, ItemKey};
use crate::keys::Step;
use crate::registry::{FocusRegion, FocusRegistry};
use crate::tree::{ExpansionState, ItemTree};

/// Unique identifier for a NavList instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NavListId(usize);

impl NavListId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for NavListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__navlist_{}", self.0)
    }
}

/// Page services a list is constructed with.
#[derive(Clone)]
pub struct NavServices {
    pub host: Arc<dyn ElementHost>,
    pub animator: Arc<dyn AnimationService>,
    pub registry: Arc<FocusRegistry>,
    pub theme: AnimationTheme,
    /// Skip every animation.
    pub reduce_motion: bool,
}

impl NavServices {
    pub fn new(
        host: Arc<dyn ElementHost>,
        animator: Arc<dyn AnimationService>,
        registry: Arc<FocusRegistry>,
    ) -> Self {
        Self {
            host,
            animator,
            registry,
            theme: AnimationTheme::default(),
            reduce_motion: false,
        }
    }

    pub fn theme(mut self, theme: AnimationTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn reduce_motion(mut self, reduce_motion: bool) -> Self {
        self.reduce_motion = reduce_motion;
        self
    }
}

/// Options of a single expand/collapse request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    /// Fire the cancelable before-notification first.
    pub vetoable: bool,
    pub animate: bool,
    pub trigger: Trigger,
}

impl Default for Request {
    fn default() -> Self {
        Self {
            vetoable: false,
            animate: true,
            trigger: Trigger::Api,
        }
    }
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vetoable(mut self, vetoable: bool) -> Self {
        self.vetoable = vetoable;
        self
    }

    pub fn animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = trigger;
        self
    }
}

/// Render-facing snapshot of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub key: ItemKey,
    pub label: String,
    pub depth: usize,
    pub state: ExpansionState,
    pub disabled: bool,
    /// The keyboard cursor is on this item.
    pub current: bool,
    /// A separator is drawn before the item.
    pub separator_before: bool,
    /// Not part of the visible level; hidden from assistive technology.
    pub a11y_hidden: bool,
}

/// The list as a focus region: its entry point is the cursor item.
struct ListRegion {
    root: ElementId,
    state: Weak<RwLock<ListState>>,
}

impl FocusRegion for ListRegion {
    fn root(&self) -> ElementId {
        self.root.clone()
    }

    fn entry_point(&self) -> ElementId {
        let cursor = self.state.upgrade().and_then(|state| {
            let cursor = state.read().ok()?.cursor.clone();
            cursor
        });
        match cursor {
            Some(key) => self.root.join(key.as_str()),
            None => self.root.clone(),
        }
    }
}

/// A hierarchical navigation list.
///
/// The drill mode is fixed at construction. All methods take `&self`; the
/// state is shared with the active strategy behind a lock that is never
/// held across an animation.
///
/// # Example
///
/// ```ignore
/// let list = NavList::new(
///     ElementId::new("sidebar"),
///     NavListConfig::new().drill_mode(DrillMode::Sliding),
///     items,
///     services,
/// )?;
/// list.show();
/// list.expand(&"docs".into(), true).await;
/// assert_eq!(list.current_level(), Some("docs".into()));
/// ```
pub struct NavList {
    id: NavListId,
    kind: DrillKind,
    cx: DrillContext,
    strategy: Box<dyn DrillStrategy>,
    registry: Arc<FocusRegistry>,
    region: Arc<dyn FocusRegion>,
}

impl std::fmt::Debug for NavList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavList")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("root", &self.cx.root)
            .field("strategy", &self.strategy)
            .finish()
    }
}

impl NavList {
    /// Create a list rooted at `root`.
    ///
    /// Fails when the configuration combines options that cannot work
    /// together.
    pub fn new(
        root: ElementId,
        config: NavListConfig,
        items: Vec<Item>,
        services: NavServices,
    ) -> Result<Self, ConfigError> {
        let kind = config.resolve()?;
        let coordinator = AnimationCoordinator::new(services.animator)
            .with_theme(services.theme)
            .with_reduce_motion(services.reduce_motion);
        let state = Arc::new(RwLock::new(ListState::new(ItemTree::new(items))));
        let strategy = strategy_for(kind, &config);
        let cx = DrillContext {
            state: Arc::clone(&state),
            coordinator,
            host: services.host,
            root: root.clone(),
            config: Arc::new(config),
        };
        strategy.initialize(&cx);

        let region: Arc<dyn FocusRegion> = Arc::new(ListRegion {
            root,
            state: Arc::downgrade(&state),
        });
        let list = Self {
            id: NavListId::new(),
            kind,
            cx,
            strategy,
            registry: services.registry,
            region,
        };
        list.reset_cursor();
        debug!("{} created on {} ({})", list.id, list.cx.root, kind.name());
        Ok(list)
    }

    pub fn id(&self) -> NavListId {
        self.id
    }

    pub fn root(&self) -> &ElementId {
        &self.cx.root
    }

    pub fn kind(&self) -> DrillKind {
        self.kind
    }

    pub fn config(&self) -> &NavListConfig {
        &self.cx.config
    }

    // -------------------------------------------------------------------------
    // Expand / collapse
    // -------------------------------------------------------------------------

    /// Expand a group, animated per configuration. With `vetoable`, a
    /// listener of the before-expand notification may cancel it.
    pub async fn expand(&self, key: &ItemKey, vetoable: bool) -> bool {
        let request = Request::new()
            .vetoable(vetoable)
            .animate(self.cx.config.animate);
        self.expand_with(key, request).await
    }

    pub async fn collapse(&self, key: &ItemKey, vetoable: bool) -> bool {
        let request = Request::new()
            .vetoable(vetoable)
            .animate(self.cx.config.animate);
        self.collapse_with(key, request).await
    }

    pub async fn expand_with(&self, key: &ItemKey, request: Request) -> bool {
        if self.cx.is_destroyed() {
            return false;
        }
        if request.vetoable && self.cx.vetoed(NavEventKind::BeforeExpand, key, request.trigger) {
            return false;
        }
        self.strategy
            .expand(&self.cx, key, request.animate, request.trigger)
            .await
    }

    pub async fn collapse_with(&self, key: &ItemKey, request: Request) -> bool {
        if self.cx.is_destroyed() {
            return false;
        }
        if request.vetoable
            && self
                .cx
                .vetoed(NavEventKind::BeforeCollapse, key, request.trigger)
        {
            return false;
        }
        self.strategy
            .collapse(&self.cx, key, request.animate, request.trigger)
            .await
    }

    /// Step back one level (the breadcrumb "previous" control).
    pub async fn collapse_current_level(&self) -> bool {
        let Some(level) = self.strategy.current_level() else {
            return false;
        };
        if self
            .cx
            .vetoed(NavEventKind::BeforeCollapse, &level, Trigger::Pointer)
        {
            return false;
        }
        self.strategy
            .collapse_current_level(&self.cx, self.cx.config.animate, Trigger::Pointer)
            .await
    }

    /// Jump back to breadcrumb `index` of the hierarchy menu.
    pub async fn select_breadcrumb(&self, index: usize) -> bool {
        self.strategy
            .select_breadcrumb(&self.cx, index, self.cx.config.animate, Trigger::Pointer)
            .await
    }

    /// Pointer activation of an item: moves the cursor there and toggles
    /// the item when it is a group.
    pub async fn activate(&self, key: &ItemKey) -> bool {
        let known = self
            .cx
            .read(|s| s.tree.contains(key) && !s.tree.is_disabled(key))
            .unwrap_or(false);
        if !known || !self.set_cursor(key) {
            return false;
        }
        if !matches!(self.kind, DrillKind::Collapsible | DrillKind::Sliding) {
            return false;
        }
        let request = Request::new()
            .vetoable(true)
            .animate(self.cx.config.animate)
            .trigger(Trigger::Pointer);
        match self.expansion_state(key) {
            ExpansionState::Collapsed => self.expand_with(key, request).await,
            ExpansionState::Expanded => self.collapse_with(key, request).await,
            ExpansionState::NotExpandable => false,
        }
    }

    /// Expanded groups in document order. A snapshot, not a live view.
    pub fn expanded(&self) -> Vec<ItemKey> {
        self.all_keys()
            .into_iter()
            .filter(|k| self.expansion_state(k) == ExpansionState::Expanded)
            .collect()
    }

    pub fn expansion_state(&self, key: &ItemKey) -> ExpansionState {
        self.strategy.expansion_state(&self.cx, key)
    }

    /// Whether a transition is in flight.
    pub fn is_busy(&self) -> bool {
        self.cx.coordinator.busy().is_busy()
    }

    /// Resolve once every in-flight transition has settled.
    pub async fn when_ready(&self) {
        self.cx.coordinator.busy().when_ready().await
    }

    pub fn focus_highlight_suppressed(&self) -> bool {
        self.cx.coordinator.focus_highlight_suppressed()
    }

    // -------------------------------------------------------------------------
    // Keyboard
    // -------------------------------------------------------------------------

    /// Handle a key pressed while focus is in the list.
    pub async fn handle_key(&self, combo: KeyCombo) -> EventResult {
        if self.cx.is_destroyed() || combo.modifiers.ctrl || combo.modifiers.alt {
            return EventResult::Ignored;
        }
        let logical = self
            .strategy
            .map_key(combo.key, self.cx.config.reading_direction);
        let current = self.cursor();
        if self
            .strategy
            .handle_key(&self.cx, logical, current.as_ref())
            .await
        {
            return EventResult::Consumed;
        }
        match Step::from_logical(logical) {
            Some(step) => self.step(step).into(),
            None => EventResult::Ignored,
        }
    }

    /// Move the cursor linearly over visible, enabled items.
    fn step(&self, step: Step) -> bool {
        let visible = self.visible_keys();
        let (enabled, at) = self
            .cx
            .read(|s| {
                let enabled: Vec<bool> = visible.iter().map(|k| !s.tree.is_disabled(k)).collect();
                let at = s
                    .cursor
                    .as_ref()
                    .and_then(|c| visible.iter().position(|k| k == c));
                (enabled, at)
            })
            .unwrap_or_default();

        let target = match (step, at) {
            (Step::First, _) | (Step::Next, None) | (Step::Previous, None) => {
                enabled.iter().position(|e| *e)
            }
            (Step::Last, _) => enabled.iter().rposition(|e| *e),
            (Step::Next, Some(at)) => enabled
                .iter()
                .enumerate()
                .skip(at + 1)
                .find(|(_, e)| **e)
                .map(|(i, _)| i),
            (Step::Previous, Some(at)) => enabled[..at].iter().rposition(|e| *e),
        };
        match target {
            Some(index) if Some(index) != at => {
                trace!("{}: cursor -> {}", self.id, visible[index]);
                self.cx.move_cursor(visible[index].clone());
                true
            }
            _ => false,
        }
    }

    pub fn cursor(&self) -> Option<ItemKey> {
        self.cx.read(|s| s.cursor.clone()).flatten()
    }

    /// Put the cursor on a visible item.
    pub fn set_cursor(&self, key: &ItemKey) -> bool {
        if !self.visible_keys().contains(key) {
            return false;
        }
        self.cx.write(|s| s.cursor = Some(key.clone()));
        true
    }

    fn reset_cursor(&self) {
        let visible = self.visible_keys();
        self.cx.write(|s| {
            let keep = s.cursor.as_ref().is_some_and(|c| visible.contains(c));
            if !keep {
                s.cursor = visible.iter().find(|k| !s.tree.is_disabled(k)).cloned();
            }
        });
    }

    // -------------------------------------------------------------------------
    // Views
    // -------------------------------------------------------------------------

    pub fn breadcrumbs(&self) -> Option<BreadcrumbMenu> {
        self.strategy.breadcrumbs()
    }

    pub fn breadcrumb_entries(&self) -> Vec<BreadcrumbEntry> {
        self.strategy.breadcrumb_entries()
    }

    /// Group whose children form the visible level (`None` = top level).
    pub fn current_level(&self) -> Option<ItemKey> {
        self.strategy.current_level()
    }

    pub fn visible_keys(&self) -> Vec<ItemKey> {
        self.strategy.visible_keys(&self.cx)
    }

    pub fn item_views(&self) -> Vec<ItemView> {
        let visible: HashSet<ItemKey> = self.visible_keys().into_iter().collect();
        let separators: HashSet<ItemKey> = self.strategy.separators().into_iter().collect();
        let rows: Vec<(ItemKey, String, usize, bool)> = self
            .cx
            .read(|s| {
                s.tree
                    .walk()
                    .into_iter()
                    .map(|(i, depth)| (i.key.clone(), i.label.clone(), depth, i.disabled))
                    .collect()
            })
            .unwrap_or_default();
        let cursor = self.cursor();

        rows.into_iter()
            .map(|(key, label, depth, disabled)| ItemView {
                state: self.expansion_state(&key),
                current: cursor.as_ref() == Some(&key),
                separator_before: separators.contains(&key),
                a11y_hidden: !visible.contains(&key),
                key,
                label,
                depth,
                disabled,
            })
            .collect()
    }

    /// Mode markers currently applied to the root element.
    pub fn markers(&self) -> Vec<&'static str> {
        self.cx
            .read(|s| s.markers.iter().copied().collect())
            .unwrap_or_default()
    }

    fn all_keys(&self) -> Vec<ItemKey> {
        self.cx
            .read(|s| s.tree.walk().into_iter().map(|(i, _)| i.key.clone()).collect())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Items
    // -------------------------------------------------------------------------

    /// Insert items under `parent` (top level when `None`) at `index`.
    pub fn insert_items(&self, parent: Option<&ItemKey>, index: usize, items: Vec<Item>) -> bool {
        let inserted = self
            .cx
            .write(|s| s.tree.insert(parent, index, items))
            .unwrap_or(false);
        if inserted {
            self.items_changed();
        }
        inserted
    }

    /// Remove an item and its subtree.
    pub fn remove_item(&self, key: &ItemKey) -> Option<Item> {
        let removed = self.cx.write(|s| s.tree.remove(key)).flatten();
        if removed.is_some() {
            self.items_changed();
        }
        removed
    }

    /// The rendering layer finished a pass. Resyncs separators, the
    /// breadcrumb stack and the cursor with the current items.
    pub fn render_complete(&self) {
        if !self.cx.is_destroyed() {
            self.items_changed();
        }
    }

    fn items_changed(&self) {
        self.strategy.items_changed(&self.cx);
        self.reset_cursor();
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Register with the focus registry as a newly disclosed region.
    pub fn show(&self) {
        if !self.cx.is_destroyed() {
            self.registry.add(&self.region);
        }
    }

    pub fn hide(&self) {
        self.registry.remove(&self.cx.root);
    }

    pub fn is_shown(&self) -> bool {
        self.registry.contains(&self.cx.root)
    }

    /// Detach the list: strategy markers go, the region is unregistered and
    /// every further request is ignored. Idempotent.
    pub fn destroy(&self) {
        let first = self
            .cx
            .write(|s| !std::mem::replace(&mut s.destroyed, true))
            .unwrap_or(false);
        if !first {
            return;
        }
        self.strategy.destroy(&self.cx);
        self.registry.remove(&self.cx.root);
        debug!("{} destroyed", self.id);
    }
}

impl Drop for NavList {
    fn drop(&mut self) {
        self.registry.remove(&self.cx.root);
    }
}
