pub mod animation;
pub mod breadcrumb;
pub mod config;
pub mod drill;
pub mod events;
pub mod item;
pub mod keys;
pub mod nav_list;
pub mod registry;
pub mod tree;

pub use nav_list::{NavList, NavListId, NavServices, Request};
pub use registry::{FocusRegion, FocusRegistry, RegistryConfig};

pub mod prelude {
    pub use crate::animation::{AnimationCoordinator, AnimationTheme, BusyState};
    pub use crate::breadcrumb::{BreadcrumbEntry, BreadcrumbMenu, BreadcrumbStack, MenuEntry};
    pub use crate::config::{
        ConfigError, DisplayMode, DrillKind, DrillMode, Edge, NavListConfig, ReadingDirection,
    };
    pub use crate::drill::DrillStrategy;
    pub use crate::events::{EventResult, NavEventKind, Trigger};
    pub use crate::item::{Item, ItemKey};
    pub use crate::nav_list::{ItemView, NavList, NavListId, NavServices, Request};
    pub use crate::registry::{FocusRegion, FocusRegistry, RegistryConfig};
    pub use crate::tree::{ExpansionState, ItemTree};

    pub use navkit::{ElementHost, ElementId, Key, KeyCombo, Modifiers};
}
