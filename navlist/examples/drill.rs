//! Drill Example
//!
//! Scripts a keyboard session against a sliding navigation list and prints
//! the visible level and breadcrumbs after every key. Logs go to drill.log.

use std::fs::File;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use navkit::{ElementHost, ElementId, MemoryHost, TimedAnimator};
use navlist::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

fn items() -> Vec<Item> {
    vec![
        Item::leaf("inbox", "Inbox"),
        Item::group(
            "projects",
            "Projects",
            vec![
                Item::group(
                    "navkit",
                    "navkit",
                    vec![Item::leaf("issues", "Issues"), Item::leaf("pulls", "Pull requests")],
                ),
                Item::leaf("archive", "Archive").disabled(),
            ],
        ),
        Item::group("settings", "Settings", vec![Item::leaf("profile", "Profile")]),
    ]
}

fn mount(host: &MemoryHost, root: &ElementId, items: &[Item]) {
    for item in items {
        host.insert(root.join(item.key.as_str()), Some(root));
        mount(host, root, item.children());
    }
}

fn print_state(list: &NavList) {
    let level = list
        .current_level()
        .map(|k| k.to_string())
        .unwrap_or_else(|| "/".to_string());
    let crumbs: Vec<String> = list
        .breadcrumbs()
        .map(|menu| menu.entries.into_iter().map(|e| e.label).collect())
        .unwrap_or_default();
    println!("level {level}  breadcrumbs {crumbs:?}");
    for view in list.item_views().into_iter().filter(|v| !v.a11y_hidden) {
        let marker = if view.current { ">" } else { " " };
        let state = match view.state {
            ExpansionState::Collapsed => "+",
            ExpansionState::Expanded => "-",
            ExpansionState::NotExpandable => " ",
        };
        let disabled = if view.disabled { " (disabled)" } else { "" };
        println!("  {marker} {state} {}{disabled}", view.label);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("drill.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let host = MemoryHost::new();
    let body = host.insert("body", None);
    let root = host.insert("sidebar", Some(&body));
    let items = items();
    mount(&host, &root, &items);

    let registry = Arc::new(FocusRegistry::new(Arc::new(host.clone())));
    let services = NavServices::new(
        Arc::new(host.clone()),
        Arc::new(TimedAnimator::new(false)),
        Arc::clone(&registry),
    );
    let config = NavListConfig::new()
        .drill_mode(DrillMode::Sliding)
        .root_label("Home");
    let list = NavList::new(root, config, items, services)?;
    list.show();

    // Jump into the list from the page.
    host.focus(&body);
    registry.dispatch(&host.key_event(Key::F(6)));
    println!("focus: {:?}", host.focused());
    print_state(&list);

    let script = [
        KeyCode::Down,
        KeyCode::Enter,
        KeyCode::Right,
        KeyCode::Down,
        KeyCode::Esc,
        KeyCode::Left,
    ];
    for code in script {
        let Ok(combo) = KeyCombo::try_from(KeyEvent::new(code, KeyModifiers::NONE)) else {
            continue;
        };
        let result = list.handle_key(combo).await;
        list.when_ready().await;
        let outcome = if result.is_handled() { "handled" } else { "ignored" };
        println!("\n{:?} -> {outcome}", combo.key);
        print_state(&list);
    }

    println!("\nnotifications: {:?}", host.dispatched_names());

    // And back out to where focus came from.
    registry.dispatch(&host.key_event(Key::F(6)));
    println!("focus: {:?}", host.focused());
    Ok(())
}
