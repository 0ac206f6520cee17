//! Sequencing of expand/collapse transitions.
//!
//! Every transition is a [`Transition`] future with a single resolution
//! point. While it is pending the owning list is busy, so readiness
//! observers wait for it; sliding transitions additionally suppress the
//! focus highlight until focus has been reassigned.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::future::{self, BoxFuture, FusedFuture, FutureExt};
use log::trace;
use navkit::{AnimationAction, AnimationService, Easing, ElementId, TransitionConfig};
use tokio::sync::watch;

use crate::config::DrillKind;

// =============================================================================
// Theme
// =============================================================================

/// Transition settings keyed by drill mode and action.
#[derive(Debug, Clone)]
pub struct AnimationTheme {
    entries: HashMap<(DrillKind, AnimationAction), TransitionConfig>,
    fallback: TransitionConfig,
}

impl Default for AnimationTheme {
    fn default() -> Self {
        let in_place = TransitionConfig::millis(200, Easing::EaseOut);
        let slide = TransitionConfig::millis(250, Easing::EaseInOut);
        Self::empty(TransitionConfig::default())
            .with(DrillKind::Collapsible, AnimationAction::Expand, in_place)
            .with(DrillKind::Collapsible, AnimationAction::Collapse, in_place)
            .with(DrillKind::Sliding, AnimationAction::SlideIn, slide)
            .with(DrillKind::Sliding, AnimationAction::SlideOut, slide)
    }
}

impl AnimationTheme {
    /// A theme where every pair uses `fallback`.
    pub fn empty(fallback: TransitionConfig) -> Self {
        Self {
            entries: HashMap::new(),
            fallback,
        }
    }

    pub fn with(mut self, kind: DrillKind, action: AnimationAction, config: TransitionConfig) -> Self {
        self.entries.insert((kind, action), config);
        self
    }

    pub fn get(&self, kind: DrillKind, action: AnimationAction) -> TransitionConfig {
        self.entries
            .get(&(kind, action))
            .copied()
            .unwrap_or(self.fallback)
    }
}

// =============================================================================
// Busy marker
// =============================================================================

/// Counts in-flight transitions of one list.
#[derive(Debug, Clone)]
pub struct BusyState {
    pending: Arc<watch::Sender<usize>>,
}

impl Default for BusyState {
    fn default() -> Self {
        Self::new()
    }
}

impl BusyState {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self {
            pending: Arc::new(tx),
        }
    }

    /// Mark one transition as started. It ends when the guard drops.
    pub fn acquire(&self) -> BusyGuard {
        self.pending.send_modify(|n| *n += 1);
        BusyGuard {
            pending: Arc::clone(&self.pending),
        }
    }

    pub fn pending(&self) -> usize {
        *self.pending.borrow()
    }

    pub fn is_busy(&self) -> bool {
        self.pending() > 0
    }

    /// Resolve once no transition is in flight.
    pub async fn when_ready(&self) {
        let mut rx = self.pending.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = rx.wait_for(|n| *n == 0).await;
    }
}

/// Holds the owning list busy until dropped.
#[derive(Debug)]
pub struct BusyGuard {
    pending: Arc<watch::Sender<usize>>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.pending.send_modify(|n| *n = n.saturating_sub(1));
    }
}

// =============================================================================
// Focus highlight
// =============================================================================

/// Keeps the focus ring hidden while raised. Cleared when dropped, whatever
/// path the transition took.
#[derive(Debug)]
pub struct FocusHighlightGuard {
    raised: Arc<AtomicUsize>,
}

impl Drop for FocusHighlightGuard {
    fn drop(&mut self) {
        self.raised.fetch_sub(1, Ordering::SeqCst);
    }
}

// =============================================================================
// Transition
// =============================================================================

/// Completion signal of one transition.
///
/// Resolves exactly once; polling after completion stays ready. The busy
/// marker is released at completion, or when the transition is dropped
/// unfinished.
pub struct Transition {
    effect: BoxFuture<'static, ()>,
    busy: Option<BusyGuard>,
}

impl Transition {
    pub fn is_finished(&self) -> bool {
        self.busy.is_none()
    }
}

impl std::fmt::Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("finished", &self.is_finished())
            .finish()
    }
}

impl Future for Transition {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.busy.is_none() {
            return Poll::Ready(());
        }
        match self.effect.poll_unpin(cx) {
            Poll::Ready(()) => {
                self.busy = None;
                Poll::Ready(())
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl FusedFuture for Transition {
    fn is_terminated(&self) -> bool {
        self.is_finished()
    }
}

// =============================================================================
// Coordinator
// =============================================================================

/// Runs visual transitions on behalf of one list.
#[derive(Clone)]
pub struct AnimationCoordinator {
    service: Arc<dyn AnimationService>,
    theme: Arc<AnimationTheme>,
    busy: BusyState,
    highlight: Arc<AtomicUsize>,
    reduce_motion: bool,
}

impl std::fmt::Debug for AnimationCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationCoordinator")
            .field("busy", &self.busy.pending())
            .field("reduce_motion", &self.reduce_motion)
            .finish()
    }
}

impl AnimationCoordinator {
    pub fn new(service: Arc<dyn AnimationService>) -> Self {
        Self {
            service,
            theme: Arc::new(AnimationTheme::default()),
            busy: BusyState::new(),
            highlight: Arc::new(AtomicUsize::new(0)),
            reduce_motion: false,
        }
    }

    pub fn with_theme(mut self, theme: AnimationTheme) -> Self {
        self.theme = Arc::new(theme);
        self
    }

    /// Complete every transition instantly.
    pub fn with_reduce_motion(mut self, reduce_motion: bool) -> Self {
        self.reduce_motion = reduce_motion;
        self
    }

    pub fn theme(&self) -> &AnimationTheme {
        &self.theme
    }

    pub fn busy(&self) -> &BusyState {
        &self.busy
    }

    /// Start a transition on `element`.
    ///
    /// The list is busy from this call until the returned future resolves.
    /// With `animate` off (or reduced motion) the animation service is not
    /// consulted and the transition is already complete on first poll.
    pub fn run(
        &self,
        element: &ElementId,
        kind: DrillKind,
        action: AnimationAction,
        animate: bool,
    ) -> Transition {
        let busy = Some(self.busy.acquire());
        if !animate || self.reduce_motion {
            trace!("{} on {} without animation", action.name(), element);
            return Transition {
                effect: future::ready(()).boxed(),
                busy,
            };
        }
        let config = self.theme.get(kind, action);
        trace!("{} on {} ({:?})", action.name(), element, config.duration);
        Transition {
            effect: self.service.animate(element, action, config),
            busy,
        }
    }

    /// Hold the list busy outside of a [`Transition`], e.g. while
    /// finalising focus after one.
    pub fn hold(&self) -> BusyGuard {
        self.busy.acquire()
    }

    /// Suppress the focus highlight until the guard drops.
    pub fn suppress_focus_highlight(&self) -> FocusHighlightGuard {
        self.highlight.fetch_add(1, Ordering::SeqCst);
        FocusHighlightGuard {
            raised: Arc::clone(&self.highlight),
        }
    }

    pub fn focus_highlight_suppressed(&self) -> bool {
        self.highlight.load(Ordering::SeqCst) > 0
    }
}
