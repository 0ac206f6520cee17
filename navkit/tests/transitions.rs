use std::time::Duration;

use navkit::{
    AnimationAction, AnimationService, Easing, ElementId, ImmediateAnimator, TimedAnimator,
    TransitionConfig,
};

// =============================================================================
// TransitionConfig
// =============================================================================

#[test]
fn test_default_transition() {
    let config = TransitionConfig::default();
    assert_eq!(config.duration, Duration::from_millis(200));
    assert_eq!(config.easing, Easing::EaseOut);
    assert!(!config.is_instant());
}

#[test]
fn test_instant_transition() {
    let config = TransitionConfig::instant();
    assert!(config.is_instant());
    assert_eq!(config.easing.name(), "linear");
}

#[test]
fn test_easing_names() {
    assert_eq!(Easing::EaseInOut.name(), "ease-in-out");
    assert_eq!(Easing::default(), Easing::Linear);
}

// =============================================================================
// Animation Services
// =============================================================================

#[tokio::test]
async fn test_immediate_animator_resolves() {
    let element = ElementId::new("nav/list");
    ImmediateAnimator
        .animate(&element, AnimationAction::Expand, TransitionConfig::default())
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_timed_animator_tracks_active_effects() {
    let animator = TimedAnimator::new(false);
    let element = ElementId::new("nav/list");
    let effect = animator.animate(
        &element,
        AnimationAction::SlideIn,
        TransitionConfig::millis(250, Easing::EaseInOut),
    );
    assert!(animator.has_active());
    effect.await;
    assert_eq!(animator.active(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_effect_is_no_longer_active() {
    let animator = TimedAnimator::new(false);
    let element = ElementId::new("nav/list");
    let effect = animator.animate(
        &element,
        AnimationAction::Collapse,
        TransitionConfig::millis(200, Easing::EaseOut),
    );
    assert_eq!(animator.active(), 1);
    drop(effect);
    assert_eq!(animator.active(), 0);

    let mut started = Box::pin(animator.animate(
        &element,
        AnimationAction::Expand,
        TransitionConfig::millis(200, Easing::EaseOut),
    ));
    assert!(futures::poll!(started.as_mut()).is_pending());
    drop(started);
    assert!(!animator.has_active());
}

#[tokio::test]
async fn test_reduced_motion_skips_timer() {
    let animator = TimedAnimator::new(true);
    let element = ElementId::new("nav/list");
    animator
        .animate(
            &element,
            AnimationAction::Collapse,
            TransitionConfig::millis(10_000, Easing::Linear),
        )
        .await;
    assert!(!animator.has_active());
}

#[test]
fn test_action_names() {
    assert_eq!(AnimationAction::SlideIn.name(), "slideIn");
    assert_eq!(AnimationAction::Collapse.name(), "collapse");
}
