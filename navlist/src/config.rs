//! Navigation list configuration.

use serde::Deserialize;
use thiserror::Error;

/// How hierarchical items are explored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrillMode {
    /// Every group is shown expanded.
    #[default]
    None,
    /// Groups expand and collapse in place.
    Collapsible,
    /// One level visible at a time, with breadcrumbs back to the root.
    Sliding,
}

/// Where the list is docked. `Top` lays items out as a horizontal toolbar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    #[default]
    Start,
    Top,
}

/// Item presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    All,
    /// Icon-only items; incompatible with drilling.
    Icons,
}

/// Reading direction of the surrounding page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingDirection {
    #[default]
    Ltr,
    Rtl,
}

impl ReadingDirection {
    pub fn is_rtl(self) -> bool {
        self == ReadingDirection::Rtl
    }
}

/// The strategy a list runs with, resolved from a valid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrillKind {
    None,
    Horizontal,
    Collapsible,
    Sliding,
}

impl DrillKind {
    pub fn name(self) -> &'static str {
        match self {
            DrillKind::None => "none",
            DrillKind::Horizontal => "horizontal",
            DrillKind::Collapsible => "collapsible",
            DrillKind::Sliding => "sliding",
        }
    }
}

/// Per-instance configuration.
///
/// Built in code with the setter chain or loaded from data:
///
/// ```ignore
/// let config = NavListConfig::new()
///     .drill_mode(DrillMode::Sliding)
///     .hierarchy_menu_threshold(2)
///     .root_label("All files");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavListConfig {
    pub drill_mode: DrillMode,
    pub edge: Edge,
    pub display: DisplayMode,
    pub reading_direction: ReadingDirection,

    /// Breadcrumb depth at which the hierarchy menu appears.
    /// `-1` never shows it, `0` always shows it.
    pub hierarchy_menu_threshold: i32,

    /// Label of the top level in breadcrumbs.
    pub root_label: String,

    /// Maximum display width of breadcrumb labels, in columns.
    pub breadcrumb_label_width: usize,

    /// Animate transitions triggered by user input.
    pub animate: bool,
}

impl Default for NavListConfig {
    fn default() -> Self {
        Self {
            drill_mode: DrillMode::None,
            edge: Edge::Start,
            display: DisplayMode::All,
            reading_direction: ReadingDirection::Ltr,
            hierarchy_menu_threshold: 0,
            root_label: "Root".to_string(),
            breadcrumb_label_width: 24,
            animate: true,
        }
    }
}

impl NavListConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drill_mode(mut self, mode: DrillMode) -> Self {
        self.drill_mode = mode;
        self
    }

    pub fn edge(mut self, edge: Edge) -> Self {
        self.edge = edge;
        self
    }

    pub fn display(mut self, display: DisplayMode) -> Self {
        self.display = display;
        self
    }

    pub fn reading_direction(mut self, direction: ReadingDirection) -> Self {
        self.reading_direction = direction;
        self
    }

    pub fn hierarchy_menu_threshold(mut self, threshold: i32) -> Self {
        self.hierarchy_menu_threshold = threshold;
        self
    }

    pub fn root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }

    pub fn breadcrumb_label_width(mut self, width: usize) -> Self {
        self.breadcrumb_label_width = width;
        self
    }

    pub fn animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    /// Validate the combination of options and pick the drill strategy.
    pub fn resolve(&self) -> Result<DrillKind, ConfigError> {
        if self.hierarchy_menu_threshold < -1 {
            return Err(ConfigError::InvalidThreshold(self.hierarchy_menu_threshold));
        }
        if self.edge == Edge::Top && self.drill_mode != DrillMode::None {
            return Err(ConfigError::HorizontalDrill(self.drill_mode));
        }
        if self.display == DisplayMode::Icons && self.drill_mode != DrillMode::None {
            return Err(ConfigError::IconsDrill(self.drill_mode));
        }
        Ok(match (self.edge, self.drill_mode) {
            (Edge::Top, _) => DrillKind::Horizontal,
            (Edge::Start, DrillMode::None) => DrillKind::None,
            (Edge::Start, DrillMode::Collapsible) => DrillKind::Collapsible,
            (Edge::Start, DrillMode::Sliding) => DrillKind::Sliding,
        })
    }
}

/// Configuration rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("drill mode {0:?} is not supported with a horizontal (top edge) list")]
    HorizontalDrill(DrillMode),

    #[error("drill mode {0:?} is not supported with icon-only display")]
    IconsDrill(DrillMode),

    #[error("hierarchy menu threshold must be -1 or greater, got {0}")]
    InvalidThreshold(i32),
}
