pub mod animation;
pub mod element;
pub mod event;
pub mod host;
pub mod memory;
pub mod text;
pub mod transitions;

pub use animation::{AnimationAction, AnimationService, ImmediateAnimator, TimedAnimator};
pub use element::ElementId;
pub use event::{Event, Key, KeyCombo, Modifiers};
pub use host::{DispatchOutcome, ElementHost, Notification};
pub use memory::MemoryHost;
pub use transitions::{Easing, TransitionConfig};
