#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use futures::future::{BoxFuture, FutureExt};
use navkit::{
    AnimationAction, AnimationService, ElementId, ImmediateAnimator, MemoryHost, TransitionConfig,
};
use navlist::prelude::*;
use tokio::sync::oneshot;

/// A page with a body element, a shared registry and an outside button.
pub struct Page {
    pub host: MemoryHost,
    pub body: ElementId,
    pub button: ElementId,
    pub registry: Arc<FocusRegistry>,
}

impl Page {
    pub fn new() -> Self {
        let host = MemoryHost::new();
        let body = host.insert("body", None);
        let button = host.insert("button", Some(&body));
        let registry = Arc::new(FocusRegistry::new(Arc::new(host.clone())));
        Self {
            host,
            body,
            button,
            registry,
        }
    }

    pub fn services(&self, animator: Arc<dyn AnimationService>) -> NavServices {
        NavServices::new(Arc::new(self.host.clone()), animator, Arc::clone(&self.registry))
    }

    /// Mount a list root with one element per item, all visible.
    pub fn mount(&self, root: &str, items: &[Item]) -> ElementId {
        let root = self.host.insert(root, Some(&self.body));
        fn add(host: &MemoryHost, root: &ElementId, items: &[Item]) {
            for item in items {
                host.insert(root.join(item.key.as_str()), Some(root));
                add(host, root, item.children());
            }
        }
        add(&self.host, &root, items);
        root
    }

    pub fn list(&self, root: &str, config: NavListConfig) -> NavList {
        self.list_with(root, config, Arc::new(ImmediateAnimator))
    }

    pub fn list_with(
        &self,
        root: &str,
        config: NavListConfig,
        animator: Arc<dyn AnimationService>,
    ) -> NavList {
        let items = sample_items();
        let root = self.mount(root, &items);
        NavList::new(root, config, items, self.services(animator)).expect("valid config")
    }

    /// Route queued focus/blur/click events through the registry.
    pub fn pump(&self) {
        for event in self.host.take_events() {
            self.registry.dispatch(&event);
        }
    }

    pub fn press(&self, key: Key) -> EventResult {
        self.pump();
        let result = self.registry.dispatch(&self.host.key_event(key));
        self.pump();
        result
    }

    pub fn focus(&self, element: &ElementId) {
        self.host.focus(element);
        self.pump();
    }
}

/// ```text
/// a            A
/// ├─ a1        A1
/// │  ├─ a11    A11
/// │  └─ a12    A12
/// └─ a2        A2
/// b            B
/// └─ b1        B1
/// c            C
/// d (disabled) D
/// └─ d1        D1
/// ```
pub fn sample_items() -> Vec<Item> {
    vec![
        Item::group(
            "a",
            "A",
            vec![
                Item::group("a1", "A1", vec![Item::leaf("a11", "A11"), Item::leaf("a12", "A12")]),
                Item::leaf("a2", "A2"),
            ],
        ),
        Item::group("b", "B", vec![Item::leaf("b1", "B1")]),
        Item::leaf("c", "C"),
        Item::group("d", "D", vec![Item::leaf("d1", "D1")]).disabled(),
    ]
}

pub fn key(k: &str) -> ItemKey {
    ItemKey::from(k)
}

pub fn keys(ks: &[&str]) -> Vec<ItemKey> {
    ks.iter().map(|k| ItemKey::from(*k)).collect()
}

pub fn no_animation(mode: DrillMode) -> NavListConfig {
    NavListConfig::new().drill_mode(mode).animate(false)
}

/// Animation service whose effects finish only when released.
#[derive(Clone, Default)]
pub struct ManualAnimator {
    inner: Arc<Mutex<ManualInner>>,
}

#[derive(Default)]
struct ManualInner {
    calls: Vec<(ElementId, AnimationAction, TransitionConfig)>,
    pending: Vec<oneshot::Sender<()>>,
}

impl ManualAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<(ElementId, AnimationAction, TransitionConfig)> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn actions(&self) -> Vec<AnimationAction> {
        self.calls().into_iter().map(|(_, a, _)| a).collect()
    }

    pub fn pending(&self) -> usize {
        self.inner.lock().unwrap().pending.len()
    }

    /// Finish every effect started so far.
    pub fn release_all(&self) {
        let pending = std::mem::take(&mut self.inner.lock().unwrap().pending);
        for tx in pending {
            let _ = tx.send(());
        }
    }
}

impl AnimationService for ManualAnimator {
    fn animate(
        &self,
        element: &ElementId,
        action: AnimationAction,
        config: TransitionConfig,
    ) -> BoxFuture<'static, ()> {
        let (tx, rx) = oneshot::channel();
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push((element.clone(), action, config));
        inner.pending.push(tx);
        async move {
            let _ = rx.await;
        }
        .boxed()
    }
}
