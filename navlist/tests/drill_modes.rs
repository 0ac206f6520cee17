mod common;

use common::{key, keys, no_animation, Page};
use navlist::prelude::*;

async fn press(list: &NavList, k: Key) -> EventResult {
    list.handle_key(KeyCombo::plain(k)).await
}

fn config_for(kind: DrillKind) -> NavListConfig {
    match kind {
        DrillKind::None => no_animation(DrillMode::None),
        DrillKind::Horizontal => NavListConfig::new().edge(Edge::Top).animate(false),
        DrillKind::Collapsible => no_animation(DrillMode::Collapsible),
        DrillKind::Sliding => no_animation(DrillMode::Sliding),
    }
}

// =============================================================================
// Shared Contract
// =============================================================================

#[test]
fn test_not_expandable_iff_no_children() {
    for kind in [
        DrillKind::None,
        DrillKind::Horizontal,
        DrillKind::Collapsible,
        DrillKind::Sliding,
    ] {
        let page = Page::new();
        let list = page.list("nav", config_for(kind));
        assert_eq!(list.kind(), kind);
        let tree = ItemTree::new(common::sample_items());
        for (item, _) in tree.walk() {
            let state = list.expansion_state(&item.key);
            assert_eq!(
                state == ExpansionState::NotExpandable,
                !item.has_children(),
                "{} in {} mode",
                item.key,
                kind.name()
            );
        }
    }
}

#[test]
fn test_empty_group_is_not_expandable() {
    let page = Page::new();
    let items = vec![Item::group("empty", "Empty", vec![])];
    let root = page.mount("nav", &items);
    let list = NavList::new(
        root,
        no_animation(DrillMode::Collapsible),
        items,
        page.services(std::sync::Arc::new(navkit::ImmediateAnimator)),
    )
    .unwrap();
    assert_eq!(
        list.expansion_state(&key("empty")),
        ExpansionState::NotExpandable
    );
}

#[test]
fn test_markers_follow_mode_and_destroy() {
    let page = Page::new();
    let list = page.list("nav", config_for(DrillKind::Sliding));
    assert_eq!(list.markers(), vec!["navlist-sliding"]);
    list.destroy();
    assert!(list.markers().is_empty());
    list.destroy();
    assert!(list.markers().is_empty());
}

#[tokio::test]
async fn test_requests_after_destroy_are_ignored() {
    let page = Page::new();
    let list = page.list("nav", config_for(DrillKind::Collapsible));
    list.destroy();
    assert!(!list.expand(&key("a"), false).await);
    assert_eq!(press(&list, Key::Down).await, EventResult::Ignored);
}

// =============================================================================
// None Mode
// =============================================================================

#[tokio::test]
async fn test_flat_groups_always_expanded() {
    let page = Page::new();
    let list = page.list("nav", config_for(DrillKind::None));
    assert_eq!(list.expansion_state(&key("a")), ExpansionState::Expanded);
    assert!(!list.expand(&key("a"), false).await);
    assert!(!list.collapse(&key("a"), false).await);
    assert_eq!(list.expansion_state(&key("a")), ExpansionState::Expanded);
    assert_eq!(list.expanded(), keys(&["a", "a1", "b", "d"]));
}

#[tokio::test]
async fn test_flat_arrows_move_linearly() {
    let page = Page::new();
    let list = page.list("nav", config_for(DrillKind::None));
    assert_eq!(list.cursor(), Some(key("a")));

    assert_eq!(press(&list, Key::Down).await, EventResult::Consumed);
    assert_eq!(list.cursor(), Some(key("a1")));
    assert_eq!(press(&list, Key::Right).await, EventResult::Ignored);
    assert_eq!(list.cursor(), Some(key("a1")));

    press(&list, Key::End).await;
    assert_eq!(list.cursor(), Some(key("d1")));
    press(&list, Key::Home).await;
    assert_eq!(list.cursor(), Some(key("a")));
    assert_eq!(press(&list, Key::Up).await, EventResult::Ignored);
}

#[tokio::test]
async fn test_linear_movement_skips_disabled() {
    let page = Page::new();
    let list = page.list("nav", config_for(DrillKind::None));
    assert!(list.set_cursor(&key("c")));
    press(&list, Key::Down).await;
    assert_eq!(list.cursor(), Some(key("d1")));
    press(&list, Key::Up).await;
    assert_eq!(list.cursor(), Some(key("c")));
}

#[tokio::test]
async fn test_modified_keys_are_ignored() {
    let page = Page::new();
    let list = page.list("nav", config_for(DrillKind::None));
    for modifiers in [Modifiers::ctrl(), Modifiers::alt()] {
        let combo = KeyCombo::new(Key::Down, modifiers);
        assert_eq!(list.handle_key(combo).await, EventResult::Ignored);
    }
    assert_eq!(list.cursor(), Some(key("a")));
}

#[tokio::test]
async fn test_cursor_moves_focus_when_inside() {
    let page = Page::new();
    let list = page.list("nav", config_for(DrillKind::None));
    page.focus(&list.root().join("a"));
    press(&list, Key::Down).await;
    assert_eq!(
        navkit::ElementHost::focused(&page.host),
        Some(list.root().join("a1"))
    );
}

// =============================================================================
// Horizontal Mode
// =============================================================================

#[test]
fn test_horizontal_shows_single_level_with_separators() {
    let page = Page::new();
    let list = page.list("bar", config_for(DrillKind::Horizontal));
    assert_eq!(list.visible_keys(), keys(&["a", "b", "c", "d"]));

    let views = list.item_views();
    let separated: Vec<&str> = views
        .iter()
        .filter(|v| v.separator_before)
        .map(|v| v.key.as_str())
        .collect();
    assert_eq!(separated, ["b", "c", "d"]);
    assert!(views.iter().find(|v| v.key == key("a1")).unwrap().a11y_hidden);
}

#[test]
fn test_horizontal_separators_follow_item_changes() {
    let page = Page::new();
    let list = page.list("bar", config_for(DrillKind::Horizontal));

    assert!(list.insert_items(None, 0, vec![Item::leaf("z", "Z")]));
    let separated = |list: &NavList| -> Vec<String> {
        list.item_views()
            .into_iter()
            .filter(|v| v.separator_before)
            .map(|v| v.key.to_string())
            .collect()
    };
    assert_eq!(separated(&list), ["a", "b", "c", "d"]);

    assert!(list.remove_item(&key("b")).is_some());
    assert_eq!(separated(&list), ["a", "c", "d"]);
}

#[test]
fn test_render_complete_resyncs_until_destroyed() {
    let page = Page::new();
    let list = page.list("bar", config_for(DrillKind::Horizontal));
    list.render_complete();
    assert_eq!(list.item_views().iter().filter(|v| v.separator_before).count(), 3);

    list.destroy();
    list.render_complete();
    assert!(list.item_views().iter().all(|v| !v.separator_before));
    assert!(list.markers().is_empty());
}

#[tokio::test]
async fn test_horizontal_logical_next_ltr() {
    let page = Page::new();
    let list = page.list("bar", config_for(DrillKind::Horizontal));
    assert_eq!(press(&list, Key::Right).await, EventResult::Consumed);
    assert_eq!(list.cursor(), Some(key("b")));
    press(&list, Key::Left).await;
    assert_eq!(list.cursor(), Some(key("a")));
}

#[tokio::test]
async fn test_horizontal_logical_next_rtl() {
    let page = Page::new();
    let config = config_for(DrillKind::Horizontal).reading_direction(ReadingDirection::Rtl);
    let list = page.list("bar", config);

    // Visual Left is "next" under right-to-left.
    assert_eq!(press(&list, Key::Left).await, EventResult::Consumed);
    assert_eq!(list.cursor(), Some(key("b")));
    press(&list, Key::Left).await;
    assert_eq!(list.cursor(), Some(key("c")));
    press(&list, Key::Right).await;
    assert_eq!(list.cursor(), Some(key("b")));
}

#[tokio::test]
async fn test_horizontal_never_expands() {
    let page = Page::new();
    let list = page.list("bar", config_for(DrillKind::Horizontal));
    assert!(!list.expand(&key("a"), false).await);
    assert_eq!(press(&list, Key::Enter).await, EventResult::Ignored);
    assert_eq!(list.visible_keys().len(), 4);
}

// =============================================================================
// Collapsible Mode
// =============================================================================

#[tokio::test]
async fn test_collapsible_expand_fires_before_and_after() {
    let page = Page::new();
    let list = page.list("nav", config_for(DrillKind::Collapsible));

    assert!(list.expand(&key("a"), true).await);
    assert_eq!(list.expansion_state(&key("a")), ExpansionState::Expanded);
    assert_eq!(
        page.host.dispatched_names(),
        ["navlist:beforeExpand", "navlist:expand"]
    );
    let (target, after) = page.host.dispatched().pop().unwrap();
    assert_eq!(&target, list.root());
    assert_eq!(after.detail.as_deref(), Some("a"));
    assert_eq!(after.cause, Some("api"));
}

#[tokio::test]
async fn test_collapsible_veto_abandons_transition() {
    let page = Page::new();
    let list = page.list("nav", config_for(DrillKind::Collapsible));
    page.host
        .listen(list.root(), "navlist:beforeExpand", |n| n.prevent_default());

    assert!(!list.expand(&key("a"), true).await);
    assert_eq!(list.expansion_state(&key("a")), ExpansionState::Collapsed);
    assert_eq!(page.host.dispatched_names(), ["navlist:beforeExpand"]);

    // Non-vetoable requests skip the before-notification.
    assert!(list.expand(&key("a"), false).await);
}

#[tokio::test]
async fn test_collapsible_noops() {
    let page = Page::new();
    let list = page.list("nav", config_for(DrillKind::Collapsible));
    assert!(!list.collapse(&key("a"), false).await);
    assert!(!list.expand(&key("c"), false).await);
    assert!(list.expand(&key("a"), false).await);
    assert!(!list.expand(&key("a"), false).await);
    assert!(!list.expand(&key("missing"), false).await);
}

#[tokio::test]
async fn test_collapsible_round_trip_restores_state() {
    let page = Page::new();
    let list = page.list("nav", config_for(DrillKind::Collapsible));
    let before = list.item_views();

    assert!(list.expand(&key("b"), false).await);
    assert!(list.collapse(&key("b"), false).await);

    assert_eq!(list.expansion_state(&key("b")), ExpansionState::Collapsed);
    assert!(list.expanded().is_empty());
    assert_eq!(list.item_views(), before);
}

#[tokio::test]
async fn test_collapsible_visible_items_follow_expansion() {
    let page = Page::new();
    let list = page.list("nav", config_for(DrillKind::Collapsible));
    assert_eq!(list.visible_keys(), keys(&["a", "b", "c", "d"]));
    list.expand(&key("a"), false).await;
    assert_eq!(list.visible_keys(), keys(&["a", "a1", "a2", "b", "c", "d"]));
}

#[tokio::test]
async fn test_collapsible_keeps_descendant_state() {
    let page = Page::new();
    let list = page.list("nav", config_for(DrillKind::Collapsible));
    list.expand(&key("a"), false).await;
    list.expand(&key("a1"), false).await;
    assert!(list.set_cursor(&key("a11")));

    assert!(list.collapse(&key("a"), false).await);
    assert_eq!(list.cursor(), Some(key("a")));
    assert_eq!(list.visible_keys(), keys(&["a", "b", "c", "d"]));

    list.expand(&key("a"), false).await;
    assert!(list.visible_keys().contains(&key("a11")));
    assert_eq!(list.expanded(), keys(&["a", "a1"]));
}

#[tokio::test]
async fn test_collapsible_arrow_keys() {
    let page = Page::new();
    let list = page.list("nav", config_for(DrillKind::Collapsible));

    assert_eq!(press(&list, Key::Right).await, EventResult::Consumed);
    assert_eq!(list.expansion_state(&key("a")), ExpansionState::Expanded);

    // Right on an expanded group moves to its first child.
    press(&list, Key::Right).await;
    assert_eq!(list.cursor(), Some(key("a1")));

    // Left on a collapsed child moves to its parent.
    press(&list, Key::Left).await;
    assert_eq!(list.cursor(), Some(key("a")));

    press(&list, Key::Left).await;
    assert_eq!(list.expansion_state(&key("a")), ExpansionState::Collapsed);
    assert_eq!(press(&list, Key::Left).await, EventResult::Ignored);
}

#[tokio::test]
async fn test_collapsible_right_skips_disabled_children() {
    let page = Page::new();
    let list = page.list("nav", config_for(DrillKind::Collapsible));
    assert!(list.insert_items(Some(&key("b")), 0, vec![Item::leaf("b0", "B0").disabled()]));
    assert!(list.expand(&key("b"), false).await);
    assert!(list.set_cursor(&key("b")));

    assert_eq!(press(&list, Key::Right).await, EventResult::Consumed);
    assert_eq!(list.cursor(), Some(key("b1")));
}

#[tokio::test]
async fn test_collapsible_arrows_flip_under_rtl() {
    let page = Page::new();
    let config = config_for(DrillKind::Collapsible).reading_direction(ReadingDirection::Rtl);
    let list = page.list("nav", config);

    press(&list, Key::Left).await;
    assert_eq!(list.expansion_state(&key("a")), ExpansionState::Expanded);
    press(&list, Key::Right).await;
    assert_eq!(list.expansion_state(&key("a")), ExpansionState::Collapsed);
}

#[tokio::test]
async fn test_collapsible_activation_toggles_groups() {
    let page = Page::new();
    let list = page.list("nav", config_for(DrillKind::Collapsible));

    press(&list, Key::Enter).await;
    assert_eq!(list.expansion_state(&key("a")), ExpansionState::Expanded);
    press(&list, Key::Char(' ')).await;
    assert_eq!(list.expansion_state(&key("a")), ExpansionState::Collapsed);

    list.set_cursor(&key("c"));
    assert_eq!(press(&list, Key::Enter).await, EventResult::Ignored);
}

#[tokio::test]
async fn test_collapsible_keyboard_is_vetoable() {
    let page = Page::new();
    let list = page.list("nav", config_for(DrillKind::Collapsible));
    page.host
        .listen(list.root(), "navlist:beforeExpand", |n| n.prevent_default());

    assert_eq!(press(&list, Key::Right).await, EventResult::Consumed);
    assert_eq!(list.expansion_state(&key("a")), ExpansionState::Collapsed);
    let (_, before) = page.host.dispatched().pop().unwrap();
    assert_eq!(before.cause, Some("keyboard"));
}

#[tokio::test]
async fn test_disabled_group_not_expanded_by_keyboard() {
    let page = Page::new();
    let list = page.list("nav", config_for(DrillKind::Collapsible));
    assert!(list.set_cursor(&key("d")));

    assert_eq!(press(&list, Key::Right).await, EventResult::Ignored);
    assert_eq!(press(&list, Key::Enter).await, EventResult::Ignored);
    assert_eq!(list.expansion_state(&key("d")), ExpansionState::Collapsed);
    assert!(!list.activate(&key("d")).await);
}

#[tokio::test]
async fn test_pointer_activation_toggles() {
    let page = Page::new();
    let list = page.list("nav", config_for(DrillKind::Collapsible));

    assert!(list.activate(&key("b")).await);
    assert_eq!(list.cursor(), Some(key("b")));
    assert_eq!(list.expansion_state(&key("b")), ExpansionState::Expanded);
    let (_, after) = page.host.dispatched().pop().unwrap();
    assert_eq!(after.cause, Some("pointer"));

    assert!(list.activate(&key("b")).await);
    assert_eq!(list.expansion_state(&key("b")), ExpansionState::Collapsed);
}

#[tokio::test]
async fn test_expanded_is_document_order_snapshot() {
    let page = Page::new();
    let list = page.list("nav", config_for(DrillKind::Collapsible));
    list.expand(&key("b"), false).await;
    list.expand(&key("a"), false).await;

    let snapshot = list.expanded();
    assert_eq!(snapshot, keys(&["a", "b"]));
    list.collapse(&key("a"), false).await;
    assert_eq!(snapshot, keys(&["a", "b"]));
    assert_eq!(list.expanded(), keys(&["b"]));
}

#[tokio::test]
async fn test_removed_group_leaves_expanded_set() {
    let page = Page::new();
    let list = page.list("nav", config_for(DrillKind::Collapsible));
    list.expand(&key("b"), false).await;
    list.set_cursor(&key("b1"));

    assert!(list.remove_item(&key("b")).is_some());
    assert!(list.expanded().is_empty());
    assert_eq!(list.cursor(), Some(key("a")));
}
