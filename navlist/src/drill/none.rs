use crate::config::DrillKind;
use crate::item::ItemKey;
use crate::tree::ExpansionState;

use super::{DrillContext, DrillStrategy};

/// Every group is shown expanded; nothing ever collapses.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlatDrill;

impl DrillStrategy for FlatDrill {
    fn kind(&self) -> DrillKind {
        DrillKind::None
    }

    fn marker(&self) -> &'static str {
        "navlist-flat"
    }

    fn expansion_state(&self, cx: &DrillContext, key: &ItemKey) -> ExpansionState {
        let group = cx.read(|s| s.tree.is_group(key)).unwrap_or(false);
        if group {
            ExpansionState::Expanded
        } else {
            ExpansionState::NotExpandable
        }
    }
}
