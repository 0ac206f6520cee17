//! Breadcrumb stack for sliding navigation.
//!
//! The stack is the single source of truth. The hierarchy menu shown next to
//! the list is a [`BreadcrumbMenu`] regenerated from the stack after every
//! mutation, so the two can never drift apart.

use navkit::text::truncate_to_width;

use crate::item::ItemKey;

/// One level traversed while drilling in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbEntry {
    /// Level the item was expanded from (`None` for the top level).
    pub parent_key: Option<ItemKey>,
    /// Label of that level, shown in the hierarchy menu.
    pub parent_label: String,
    /// The item that was expanded.
    pub item_key: ItemKey,
}

impl BreadcrumbEntry {
    pub fn new(
        parent_key: Option<ItemKey>,
        parent_label: impl Into<String>,
        item_key: ItemKey,
    ) -> Self {
        Self {
            parent_key,
            parent_label: parent_label.into(),
            item_key,
        }
    }
}

/// One row of the hierarchy menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Position in the stack (0 = bottom).
    pub index: usize,
    /// Display label, truncated to the configured width.
    pub label: String,
    pub item_key: ItemKey,
}

/// Derived view of the stack for the hierarchy menu and "previous" control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreadcrumbMenu {
    pub entries: Vec<MenuEntry>,
    /// Whether the menu (with its separator and toggle) is displayed.
    pub shown: bool,
    /// Label of the "previous" control: the level a single step back
    /// returns to.
    pub previous_label: Option<String>,
}

impl BreadcrumbMenu {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ordered stack of expanded ancestor levels, bottom = top level.
#[derive(Debug, Clone)]
pub struct BreadcrumbStack {
    entries: Vec<BreadcrumbEntry>,
    menu: BreadcrumbMenu,
    /// -1 never shows the menu, N shows it from depth N on.
    threshold: i32,
    label_width: usize,
}

impl BreadcrumbStack {
    pub fn new(threshold: i32, label_width: usize) -> Self {
        let mut stack = Self {
            entries: Vec::new(),
            menu: BreadcrumbMenu::default(),
            threshold,
            label_width,
        };
        stack.sync_menu();
        stack
    }

    pub fn push(&mut self, entry: BreadcrumbEntry) {
        self.entries.push(entry);
        self.sync_menu();
    }

    /// Remove the top entry. Returns `None` when empty.
    pub fn pop(&mut self) -> Option<BreadcrumbEntry> {
        let entry = self.entries.pop()?;
        self.sync_menu();
        Some(entry)
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top(&self) -> Option<&BreadcrumbEntry> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[BreadcrumbEntry] {
        &self.entries
    }

    /// Stack position of the entry recorded for `item_key`.
    pub fn position(&self, item_key: &ItemKey) -> Option<usize> {
        self.entries.iter().position(|e| &e.item_key == item_key)
    }

    pub fn menu(&self) -> &BreadcrumbMenu {
        &self.menu
    }

    pub fn is_menu_shown(&self) -> bool {
        self.menu.shown
    }

    /// Drop entries whose item no longer exists, together with every entry
    /// above them (their levels are unreachable). Returns the dropped
    /// entries, top first.
    pub fn retain_known(&mut self, exists: impl Fn(&ItemKey) -> bool) -> Vec<BreadcrumbEntry> {
        let Some(first_stale) = self.entries.iter().position(|e| !exists(&e.item_key)) else {
            return Vec::new();
        };
        let mut dropped = self.entries.split_off(first_stale);
        dropped.reverse();
        self.sync_menu();
        dropped
    }

    fn sync_menu(&mut self) {
        let depth = self.entries.len();
        self.menu.entries = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, e)| MenuEntry {
                index,
                label: truncate_to_width(&e.parent_label, self.label_width),
                item_key: e.item_key.clone(),
            })
            .collect();
        self.menu.shown = self.threshold >= 0 && depth >= self.threshold as usize;
        self.menu.previous_label = self.top().map(|e| e.parent_label.clone());
    }
}
