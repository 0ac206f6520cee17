//! Focus navigation registry.
//!
//! Tracks every visible navigation region of a page and arbitrates the
//! "jump to navigation" key across them. One registry is created per page
//! session and shared by every list on it.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, Weak};

use log::{debug, trace};
use navkit::{ElementHost, ElementId, Event, Key, KeyCombo, Notification};

use crate::events::{EventResult, NavEventKind};

/// A live region the registry can move focus into.
pub trait FocusRegion: Send + Sync {
    /// Root element of the region; also its identifier.
    fn root(&self) -> ElementId;

    /// Element that receives focus when the region is jumped to.
    fn entry_point(&self) -> ElementId;
}

/// Registry options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Key that jumps focus into the most recently disclosed region, and
    /// back out of it.
    pub jump_key: KeyCombo,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            jump_key: KeyCombo::plain(Key::F(6)),
        }
    }
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jump_key(mut self, key: impl Into<KeyCombo>) -> Self {
        self.jump_key = key.into();
        self
    }
}

struct RegionRecord {
    id: ElementId,
    /// Disclosure order, strictly increasing per `add`.
    order: u64,
    region: Weak<dyn FocusRegion>,
}

#[derive(Default)]
struct RegistryInner {
    /// Records in disclosure order, oldest first.
    regions: Vec<RegionRecord>,
    next_order: u64,
    /// Element focused before focus entered each region.
    prior_focus: HashMap<ElementId, ElementId>,
    /// Most recent blur target seen by the page handler.
    last_blurred: Option<ElementId>,
    /// Page-level key/blur handlers installed.
    page_listening: bool,
    /// Regions with region-local handlers installed.
    region_listeners: HashSet<ElementId>,
    /// Region the last page-level jump landed in; the next jump continues
    /// from there.
    rotation: Option<ElementId>,
}

impl RegistryInner {
    /// Innermost (most recently disclosed) region containing `element`.
    fn owner(&self, host: &dyn ElementHost, element: &ElementId) -> Option<ElementId> {
        self.regions
            .iter()
            .rev()
            .find(|r| host.contains(&r.id, element))
            .map(|r| r.id.clone())
    }
}

/// Roving-focus coordinator shared by every list on a page.
///
/// Regions are held weakly; a dropped list never keeps its record alive
/// past the next lookup.
pub struct FocusRegistry {
    host: Arc<dyn ElementHost>,
    config: RegistryConfig,
    inner: RwLock<RegistryInner>,
}

impl std::fmt::Debug for FocusRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusRegistry")
            .field("config", &self.config)
            .field("regions", &self.regions())
            .field("listening", &self.is_listening())
            .finish()
    }
}

impl FocusRegistry {
    pub fn new(host: Arc<dyn ElementHost>) -> Self {
        Self::with_config(host, RegistryConfig::default())
    }

    pub fn with_config(host: Arc<dyn ElementHost>, config: RegistryConfig) -> Self {
        Self {
            host,
            config,
            inner: RwLock::new(RegistryInner::default()),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register a region as just disclosed. Re-adding a region moves it to
    /// the most recent position.
    pub fn add(&self, region: &Arc<dyn FocusRegion>) {
        let id = region.root();
        if let Ok(mut inner) = self.inner.write() {
            inner.regions.retain(|r| r.id != id && r.region.strong_count() > 0);
            let order = inner.next_order;
            inner.next_order += 1;
            inner.regions.push(RegionRecord {
                id: id.clone(),
                order,
                region: Arc::downgrade(region),
            });
            if !inner.page_listening {
                trace!("installing page focus handlers");
                inner.page_listening = true;
            }
            inner.region_listeners.insert(id.clone());
            inner.rotation = None;
            debug!("region {} disclosed (order {})", id, order);
        }
    }

    /// Forget a region. Tears the page handlers down with the last one.
    pub fn remove(&self, id: &ElementId) {
        if let Ok(mut inner) = self.inner.write() {
            let before = inner.regions.len();
            inner.regions.retain(|r| &r.id != id);
            if inner.regions.len() == before {
                return;
            }
            inner.region_listeners.remove(id);
            inner.prior_focus.remove(id);
            inner.rotation = None;
            debug!("region {} removed", id);
            if inner.regions.is_empty() {
                trace!("removing page focus handlers");
                inner.page_listening = false;
                inner.last_blurred = None;
            }
        }
    }

    /// Return focus to where it was before it entered region `id`.
    ///
    /// Fails without side effects when nothing is cached or the cached
    /// element is hidden or under a modal layer.
    pub fn toggle_previous_focus(&self, id: &ElementId) -> bool {
        let Some(previous) = self
            .inner
            .read()
            .ok()
            .and_then(|inner| inner.prior_focus.get(id).cloned())
        else {
            return false;
        };
        if !self.is_reachable(&previous) {
            trace!("prior focus {} of {} is stale", previous, id);
            return false;
        }
        if !self.host.focus(&previous) {
            return false;
        }
        if let Ok(mut inner) = self.inner.write() {
            inner.prior_focus.remove(id);
        }
        debug!("focus returned from {} to {}", id, previous);
        true
    }

    /// Route a host event to the page-level or region-local handler.
    pub fn dispatch(&self, event: &Event) -> EventResult {
        let Ok(inner) = self.inner.read() else {
            return EventResult::Ignored;
        };
        if !inner.page_listening {
            return EventResult::Ignored;
        }
        let owner = event
            .target()
            .and_then(|target| inner.owner(self.host.as_ref(), target))
            .filter(|id| inner.region_listeners.contains(id));
        drop(inner);

        match event {
            Event::Key { key, modifiers, .. } => {
                let combo = KeyCombo::new(*key, *modifiers);
                match owner {
                    Some(region) => self.on_region_key(&region, combo),
                    None => self.on_page_key(combo),
                }
            }
            Event::Blur { target } => {
                if let Ok(mut inner) = self.inner.write() {
                    inner.last_blurred = Some(target.clone());
                }
                EventResult::Ignored
            }
            Event::Focus { .. } | Event::Click { .. } => {
                if let Some(region) = owner {
                    self.on_region_entered(&region);
                }
                EventResult::Ignored
            }
        }
    }

    fn on_page_key(&self, combo: KeyCombo) -> EventResult {
        if combo != self.config.jump_key {
            return EventResult::Ignored;
        }
        let (candidates, rotation) = match self.inner.read() {
            Ok(inner) => (
                inner
                    .regions
                    .iter()
                    .rev()
                    .filter_map(|r| r.region.upgrade().map(|region| (r.id.clone(), region)))
                    .collect::<Vec<_>>(),
                inner.rotation.clone(),
            ),
            Err(_) => return EventResult::Ignored,
        };
        let eligible: Vec<(ElementId, Arc<dyn FocusRegion>)> = candidates
            .into_iter()
            .filter(|(id, _)| self.host.is_visible(id) && self.host.is_above_top_modal_layer(id))
            .collect();
        if eligible.is_empty() {
            trace!("jump key with no eligible region");
            return EventResult::Ignored;
        }

        let pick = rotation
            .and_then(|last| eligible.iter().position(|(id, _)| *id == last))
            .map_or(0, |p| (p + 1) % eligible.len());
        let (id, region) = &eligible[pick];

        let previous = self.host.focused();
        if let Ok(mut inner) = self.inner.write() {
            if let Some(previous) = &previous {
                inner.prior_focus.insert(id.clone(), previous.clone());
            }
            inner.rotation = Some(id.clone());
        }
        let entry = region.entry_point();
        if !self.host.focus(&entry) {
            debug!("entry point {} of {} refused focus", entry, id);
        }
        debug!("jumped into {} at {}", id, entry);
        self.host.dispatch(
            id,
            Notification::new(NavEventKind::FocusNavigatedHere.name()).non_bubbling(),
        );
        EventResult::Consumed
    }

    fn on_region_key(&self, region: &ElementId, combo: KeyCombo) -> EventResult {
        let escape = combo == KeyCombo::plain(Key::Escape);
        if combo != self.config.jump_key && !escape {
            return EventResult::Ignored;
        }
        self.toggle_previous_focus(region).into()
    }

    /// Focus (or a click) landed inside `region`. Cache where it came from
    /// unless a usable prior focus is already known.
    fn on_region_entered(&self, region: &ElementId) {
        let Ok(mut inner) = self.inner.write() else {
            return;
        };
        let usable = inner
            .prior_focus
            .get(region)
            .is_some_and(|previous| self.is_reachable(previous));
        if usable {
            return;
        }
        let Some(blurred) = inner.last_blurred.clone() else {
            return;
        };
        if self.host.contains(region, &blurred) {
            return;
        }
        trace!("caching {} as prior focus of {}", blurred, region);
        inner.prior_focus.insert(region.clone(), blurred);
    }

    /// A cached element hidden or under a modal layer counts as absent.
    fn is_reachable(&self, element: &ElementId) -> bool {
        self.host.is_visible(element) && self.host.is_above_top_modal_layer(element)
    }

    /// Whether the page-level handlers are installed.
    pub fn is_listening(&self) -> bool {
        self.inner.read().map(|i| i.page_listening).unwrap_or(false)
    }

    /// Whether region-local handlers are installed for `id`.
    pub fn is_region_listening(&self, id: &ElementId) -> bool {
        self.inner
            .read()
            .map(|i| i.region_listeners.contains(id))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|i| i.regions.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.inner
            .read()
            .map(|i| i.regions.iter().any(|r| &r.id == id))
            .unwrap_or(false)
    }

    /// Cached prior focus of a region.
    pub fn prior_focus(&self, id: &ElementId) -> Option<ElementId> {
        self.inner
            .read()
            .ok()
            .and_then(|i| i.prior_focus.get(id).cloned())
    }

    /// Registered region ids, least recently disclosed first.
    pub fn regions(&self) -> Vec<ElementId> {
        self.inner
            .read()
            .map(|i| {
                let mut records: Vec<&RegionRecord> = i.regions.iter().collect();
                records.sort_by_key(|r| r.order);
                records.into_iter().map(|r| r.id.clone()).collect()
            })
            .unwrap_or_default()
    }
}
