//! Animation service contract.
//!
//! The host owns the actual effects. Widgets only ask it to play an
//! [`AnimationAction`] on an element and wait for the returned future,
//! which is the single completion signal of that effect.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};
use log::trace;

use crate::element::ElementId;
use crate::transitions::TransitionConfig;

/// Visual effect requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationAction {
    /// Reveal a child group in place.
    Expand,
    /// Hide a child group in place.
    Collapse,
    /// Slide a deeper level in, replacing the current one.
    SlideIn,
    /// Slide back out to the parent level.
    SlideOut,
}

impl AnimationAction {
    pub fn name(self) -> &'static str {
        match self {
            AnimationAction::Expand => "expand",
            AnimationAction::Collapse => "collapse",
            AnimationAction::SlideIn => "slideIn",
            AnimationAction::SlideOut => "slideOut",
        }
    }
}

/// Plays effects on elements.
///
/// Implementations must always resolve the returned future, even when the
/// effect is skipped or the element disappears.
pub trait AnimationService: Send + Sync {
    fn animate(
        &self,
        element: &ElementId,
        action: AnimationAction,
        config: TransitionConfig,
    ) -> BoxFuture<'static, ()>;
}

/// Completes every effect immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateAnimator;

impl AnimationService for ImmediateAnimator {
    fn animate(
        &self,
        _element: &ElementId,
        _action: AnimationAction,
        _config: TransitionConfig,
    ) -> BoxFuture<'static, ()> {
        future::ready(()).boxed()
    }
}

/// Completes each effect after its configured duration, on the tokio timer.
#[derive(Debug, Default, Clone)]
pub struct TimedAnimator {
    active: Arc<AtomicUsize>,
    /// Whether reduce_motion is enabled (instant completion)
    reduce_motion: bool,
}

impl TimedAnimator {
    pub fn new(reduce_motion: bool) -> Self {
        Self {
            active: Arc::new(AtomicUsize::new(0)),
            reduce_motion,
        }
    }

    /// Number of effects currently playing.
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    pub fn has_active(&self) -> bool {
        self.active() > 0
    }
}

impl AnimationService for TimedAnimator {
    fn animate(
        &self,
        element: &ElementId,
        action: AnimationAction,
        config: TransitionConfig,
    ) -> BoxFuture<'static, ()> {
        if self.reduce_motion || config.is_instant() {
            return future::ready(()).boxed();
        }
        trace!(
            "animating {} on {} for {:?} ({})",
            action.name(),
            element,
            config.duration,
            config.easing.name()
        );
        let playing = Playing::start(&self.active);
        async move {
            tokio::time::sleep(config.duration).await;
            drop(playing);
        }
        .boxed()
    }
}

/// One effect counted as active until dropped, finished or not.
struct Playing(Arc<AtomicUsize>);

impl Playing {
    fn start(active: &Arc<AtomicUsize>) -> Self {
        active.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(active))
    }
}

impl Drop for Playing {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
