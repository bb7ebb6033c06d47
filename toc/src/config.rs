//! Widget configuration: element attributes or a TOML file

use crate::error::TocError;
use crate::levels::{HeadingLevelSpec, DEFAULT_LEVELS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A directly supplied table-of-contents entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocItem {
    /// Id of the element the entry links to
    pub id: String,
    /// Link text
    pub title: String,
}

impl TocItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

fn default_levels() -> String {
    DEFAULT_LEVELS.to_string()
}

/// Widget options, mirroring the element's attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocConfig {
    /// ARIA role; the widget uses `navigation` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Selector of the element containing the content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    /// Comma-separated heading levels (tag names or digits)
    #[serde(default = "default_levels")]
    pub levels: String,

    /// Entries rendered as a flat list when no `src` is configured
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<TocItem>,

    /// Sticky mode: `smart`, `true` or `false`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticky: Option<String>,

    /// Expand/collapse behavior; options are handed to the toggle controller as-is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toggle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toggle_on: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toggle_off: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toggle_overlay: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toggle_anim: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toggle_state: Option<String>,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            role: None,
            src: None,
            levels: default_levels(),
            items: Vec::new(),
            sticky: None,
            toggle: None,
            toggle_on: None,
            toggle_off: None,
            toggle_overlay: None,
            toggle_anim: None,
            toggle_state: None,
        }
    }
}

impl TocConfig {
    /// Config scanning the container matched by `selector`
    pub fn with_src(selector: impl Into<String>) -> Self {
        Self {
            src: Some(selector.into()),
            ..Self::default()
        }
    }

    /// Config rendering a flat list of `items`
    pub fn with_items(items: Vec<TocItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Build from element attributes (`src`, `levels`, `sticky`, `toggle-on`, ...)
    ///
    /// Attribute names are matched case-insensitively; unknown attributes are ignored.
    pub fn from_attributes<'a, I>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = Self::default();
        for (name, value) in attributes {
            let owned = Some(value.to_string());
            match name.to_ascii_lowercase().as_str() {
                "role" => config.role = owned,
                "src" => config.src = owned,
                "levels" => config.levels = value.to_string(),
                "sticky" => config.sticky = owned,
                "toggle" => config.toggle = owned,
                "toggle-on" => config.toggle_on = owned,
                "toggle-off" => config.toggle_off = owned,
                "toggle-overlay" => config.toggle_overlay = owned,
                "toggle-anim" => config.toggle_anim = owned,
                "toggle-state" => config.toggle_state = owned,
                other => log::debug!("Ignoring unknown attribute '{}'", other),
            }
        }
        config
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, TocError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    ///
    /// # Parameters
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(TocConfig)` - Successfully loaded configuration
    /// * `Err(TocError)` - Error reading or parsing the file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TocError> {
        let content = fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TocError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Resolve which content to render; `src` wins over `items`
    pub fn render_mode(&self) -> Result<RenderMode, TocError> {
        if let Some(selector) = &self.src {
            return Ok(RenderMode::Source {
                selector: selector.clone(),
                levels: HeadingLevelSpec::parse(&self.levels)?,
            });
        }
        if !self.items.is_empty() {
            return Ok(RenderMode::Items {
                items: self.items.clone(),
            });
        }
        Ok(RenderMode::Empty)
    }

    /// Sticky behavior requested by the `sticky` attribute, if any
    pub fn sticky_mode(&self) -> Option<StickyMode> {
        self.sticky.as_deref().and_then(StickyMode::parse)
    }

    /// Toggle options when the `toggle` attribute enables the collaborator
    pub fn toggle_options(&self) -> Option<ToggleOptions> {
        match self.toggle.as_deref() {
            None | Some("false") => None,
            Some(_) => Some(ToggleOptions {
                on: self.toggle_on.clone(),
                off: self.toggle_off.clone(),
                overlay: self.toggle_overlay.clone(),
                anim: self.toggle_anim.clone(),
                state: self.toggle_state.clone(),
            }),
        }
    }
}

/// What a render pass produces content from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderMode {
    /// Scan the container matched by `selector` for headings
    Source {
        selector: String,
        levels: HeadingLevelSpec,
    },
    /// Render the given entries as a flat list
    Items { items: Vec<TocItem> },
    /// Neither configured; no content
    Empty,
}

/// Mode handed to the sticky-position controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StickyMode {
    Smart,
    Always,
    /// Unrecognized value, passed through verbatim
    Custom(String),
}

impl StickyMode {
    /// Parse the `sticky` attribute; `None` when sticky behavior is off
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "false" | "" => None,
            "smart" => Some(Self::Smart),
            "true" => Some(Self::Always),
            other => {
                log::warn!("Unrecognized sticky mode '{}', passing it through", other);
                Some(Self::Custom(other.to_string()))
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Smart => "smart",
            Self::Always => "true",
            Self::Custom(mode) => mode,
        }
    }
}

/// Options handed verbatim to the expand/collapse controller
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToggleOptions {
    pub on: Option<String>,
    pub off: Option<String>,
    pub overlay: Option<String>,
    pub anim: Option<String>,
    pub state: Option<String>,
}
