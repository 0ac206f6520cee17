//! Navigable items.

use serde::{Deserialize, Serialize};

/// Opaque, comparable identifier of an item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKey(String);

impl ItemKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ItemKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// One entry of a navigation list.
///
/// An item without `children` is a leaf. Items with a non-empty child
/// sequence are groups that a drill mode may expand.
///
/// ```ignore
/// let items = vec![
///     Item::leaf("home", "Home"),
///     Item::group("docs", "Documents", vec![
///         Item::leaf("cv", "Resume"),
///         Item::leaf("tax", "Taxes").disabled(),
///     ]),
/// ];
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub key: ItemKey,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Item>>,
    #[serde(default)]
    pub disabled: bool,
}

impl Item {
    pub fn leaf(key: impl Into<ItemKey>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            children: None,
            disabled: false,
        }
    }

    pub fn group(key: impl Into<ItemKey>, label: impl Into<String>, children: Vec<Item>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            children: Some(children),
            disabled: false,
        }
    }

    /// Mark the item disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Whether the item has at least one child.
    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// Child items (empty for leaves).
    pub fn children(&self) -> &[Item] {
        self.children.as_deref().unwrap_or(&[])
    }
}
