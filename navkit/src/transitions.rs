//! Transition settings handed to the animation service.

use std::time::Duration;

/// Timing curve of an effect. The host maps it onto whatever its renderer
/// supports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// CSS-style timing function name.
    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseIn => "ease-in",
            Easing::EaseOut => "ease-out",
            Easing::EaseInOut => "ease-in-out",
        }
    }
}

/// Duration and curve of one effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionConfig {
    pub duration: Duration,
    pub easing: Easing,
}

impl TransitionConfig {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    pub fn millis(ms: u64, easing: Easing) -> Self {
        Self::new(Duration::from_millis(ms), easing)
    }

    /// Zero duration: the effect jumps straight to its end state.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Easing::Linear)
    }

    pub fn is_instant(&self) -> bool {
        self.duration.is_zero()
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self::millis(200, Easing::EaseOut)
    }
}
