//! Read-only view over the hierarchical item collection.

use std::collections::HashMap;

use log::warn;

use crate::item::{Item, ItemKey};

/// Expansion state of an item as seen by rendering and keyboard handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpansionState {
    Expanded,
    Collapsed,
    /// Leaves (and groups without children) can never expand.
    NotExpandable,
}

/// Hierarchy of items with a derived parent index.
///
/// The tree owns the items; parent links are kept as keys in a side index
/// rebuilt whenever the structure changes, so traversal upwards never needs
/// owning back-references.
#[derive(Debug, Clone, Default)]
pub struct ItemTree {
    roots: Vec<Item>,
    /// Item key to parent key (`None` for top-level items).
    parents: HashMap<ItemKey, Option<ItemKey>>,
}

impl ItemTree {
    pub fn new(roots: Vec<Item>) -> Self {
        let mut tree = Self {
            roots,
            parents: HashMap::new(),
        };
        tree.reindex();
        tree
    }

    pub fn roots(&self) -> &[Item] {
        &self.roots
    }

    /// Number of items at every depth.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn contains(&self, key: &ItemKey) -> bool {
        self.parents.contains_key(key)
    }

    /// Find an item anywhere in the tree.
    pub fn get(&self, key: &ItemKey) -> Option<&Item> {
        if !self.contains(key) {
            return None;
        }
        let mut items = self.roots.as_slice();
        let mut found = None;
        for step in self.path(key) {
            let item = items.iter().find(|i| i.key == step)?;
            items = item.children();
            found = Some(item);
        }
        found
    }

    pub fn label(&self, key: &ItemKey) -> Option<&str> {
        self.get(key).map(|i| i.label.as_str())
    }

    /// Parent of an item (`None` for top-level and unknown items).
    pub fn parent(&self, key: &ItemKey) -> Option<&ItemKey> {
        self.parents.get(key).and_then(|p| p.as_ref())
    }

    /// Children of `parent`, or the top level when `parent` is `None`.
    pub fn children(&self, parent: Option<&ItemKey>) -> &[Item] {
        match parent {
            None => &self.roots,
            Some(key) => self.get(key).map(Item::children).unwrap_or(&[]),
        }
    }

    /// Whether the item has children it could expand to.
    pub fn is_group(&self, key: &ItemKey) -> bool {
        self.get(key).is_some_and(Item::has_children)
    }

    pub fn is_disabled(&self, key: &ItemKey) -> bool {
        self.get(key).is_some_and(|i| i.disabled)
    }

    /// Ancestors of an item, top level first, excluding the item itself.
    pub fn ancestors(&self, key: &ItemKey) -> Vec<ItemKey> {
        let mut chain = Vec::new();
        let mut current = self.parent(key);
        while let Some(parent) = current {
            chain.push(parent.clone());
            current = self.parent(parent);
        }
        chain.reverse();
        chain
    }

    /// Ancestors followed by the item itself. Empty for unknown keys.
    pub fn path(&self, key: &ItemKey) -> Vec<ItemKey> {
        if !self.contains(key) {
            return Vec::new();
        }
        let mut path = self.ancestors(key);
        path.push(key.clone());
        path
    }

    /// Depth of an item (0 = top level).
    pub fn depth(&self, key: &ItemKey) -> usize {
        self.ancestors(key).len()
    }

    /// Whether `key` lies strictly below `ancestor`.
    pub fn is_descendant(&self, key: &ItemKey, ancestor: &ItemKey) -> bool {
        let mut current = self.parent(key);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent(parent);
        }
        false
    }

    /// All items in document order with their depth.
    pub fn walk(&self) -> Vec<(&Item, usize)> {
        let mut out = Vec::with_capacity(self.len());
        Self::collect(&self.roots, 0, &mut out);
        out
    }

    fn collect<'a>(items: &'a [Item], depth: usize, out: &mut Vec<(&'a Item, usize)>) {
        for item in items {
            out.push((item, depth));
            Self::collect(item.children(), depth + 1, out);
        }
    }

    /// Insert items under `parent` (top level when `None`) at `index`.
    ///
    /// The index is clamped to the sibling count. Returns false if the parent
    /// is unknown.
    pub fn insert(&mut self, parent: Option<&ItemKey>, index: usize, items: Vec<Item>) -> bool {
        let siblings = match parent {
            None => &mut self.roots,
            Some(key) => match Self::find_mut(&mut self.roots, key) {
                Some(item) => item.children.get_or_insert_with(Vec::new),
                None => return false,
            },
        };
        let at = index.min(siblings.len());
        siblings.splice(at..at, items);
        self.reindex();
        true
    }

    /// Remove an item and its subtree.
    pub fn remove(&mut self, key: &ItemKey) -> Option<Item> {
        let removed = Self::remove_from(&mut self.roots, key);
        if removed.is_some() {
            self.reindex();
        }
        removed
    }

    fn find_mut<'a>(items: &'a mut [Item], key: &ItemKey) -> Option<&'a mut Item> {
        for item in items {
            if &item.key == key {
                return Some(item);
            }
            if let Some(children) = item.children.as_mut() {
                if let Some(found) = Self::find_mut(children, key) {
                    return Some(found);
                }
            }
        }
        None
    }

    fn remove_from(items: &mut Vec<Item>, key: &ItemKey) -> Option<Item> {
        if let Some(pos) = items.iter().position(|i| &i.key == key) {
            return Some(items.remove(pos));
        }
        items
            .iter_mut()
            .filter_map(|i| i.children.as_mut())
            .find_map(|children| Self::remove_from(children, key))
    }

    fn reindex(&mut self) {
        self.parents.clear();
        let mut stack: Vec<(&Item, Option<&ItemKey>)> =
            self.roots.iter().rev().map(|i| (i, None)).collect();
        while let Some((item, parent)) = stack.pop() {
            if self
                .parents
                .insert(item.key.clone(), parent.cloned())
                .is_some()
            {
                warn!("duplicate item key {}", item.key);
            }
            stack.extend(item.children().iter().rev().map(|c| (c, Some(&item.key))));
        }
    }
}
