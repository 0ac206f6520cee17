use std::sync::RwLock;

use log::trace;
use navkit::Key;

use crate::config::{DrillKind, ReadingDirection};
use crate::item::ItemKey;
use crate::keys;
use crate::tree::ExpansionState;

use super::{forget_removed, DrillContext, DrillStrategy};

/// Single-level toolbar.
///
/// Left/Right walk the items, mirrored under right-to-left reading order.
/// A separator sits before every item but the first and is recomputed
/// whenever items change.
#[derive(Debug, Default)]
pub struct HorizontalDrill {
    separators: RwLock<Vec<ItemKey>>,
}

impl HorizontalDrill {
    pub fn new() -> Self {
        Self::default()
    }

    fn recompute(&self, cx: &DrillContext) {
        let keys: Vec<ItemKey> = cx
            .read(|s| s.tree.roots().iter().skip(1).map(|i| i.key.clone()).collect())
            .unwrap_or_default();
        trace!("{}: {} separators", cx.root(), keys.len());
        if let Ok(mut separators) = self.separators.write() {
            *separators = keys;
        }
    }
}

impl DrillStrategy for HorizontalDrill {
    fn kind(&self) -> DrillKind {
        DrillKind::Horizontal
    }

    fn marker(&self) -> &'static str {
        "navlist-horizontal"
    }

    fn initialize(&self, cx: &DrillContext) {
        let marker = self.marker();
        cx.write(|s| s.markers.insert(marker));
        self.recompute(cx);
    }

    fn expansion_state(&self, cx: &DrillContext, key: &ItemKey) -> ExpansionState {
        let group = cx.read(|s| s.tree.is_group(key)).unwrap_or(false);
        if group {
            ExpansionState::Expanded
        } else {
            ExpansionState::NotExpandable
        }
    }

    fn map_key(&self, key: Key, direction: ReadingDirection) -> Key {
        keys::rotate_horizontal(keys::mirror(key, direction))
    }

    fn visible_keys(&self, cx: &DrillContext) -> Vec<ItemKey> {
        cx.read(|s| s.tree.roots().iter().map(|i| i.key.clone()).collect())
            .unwrap_or_default()
    }

    fn separators(&self) -> Vec<ItemKey> {
        self.separators
            .read()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    fn items_changed(&self, cx: &DrillContext) {
        forget_removed(cx);
        self.recompute(cx);
    }

    fn destroy(&self, cx: &DrillContext) {
        let marker = self.marker();
        cx.write(|s| s.markers.remove(marker));
        if let Ok(mut separators) = self.separators.write() {
            separators.clear();
        }
    }
}
