use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A page under construction: site-wide settings plus the ordered blocks
/// placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub site: SiteConfig,
    #[serde(rename = "block", default)]
    pub blocks: Vec<PlacedBlock>,
}

/// Site configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
}

pub(crate) fn default_accent_color() -> String {
    "#333333".to_string()
}

/// Light or dark rendering of the whole page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// CSS class applied to `<body>`
    pub fn css_class(self) -> &'static str {
        match self {
            Theme::Light => "theme-light",
            Theme::Dark => "theme-dark",
        }
    }
}

/// A block the user dropped on the canvas: which renderer to use and the
/// configuration handed to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default = "empty_config")]
    pub config: Value,
}

impl PlacedBlock {
    /// Create a block with a freshly generated id
    pub fn new(type_tag: impl Into<String>, config: Value) -> Self {
        Self {
            id: new_block_id(),
            type_tag: type_tag.into(),
            config,
        }
    }
}

pub(crate) fn empty_config() -> Value {
    Value::Object(Default::default())
}

/// Generate an opaque unique id for a placed block
pub fn new_block_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            site: SiteConfig {
                title: title.into(),
                description: None,
                theme: Theme::default(),
                accent_color: default_accent_color(),
            },
            blocks: Vec::new(),
        }
    }

    pub fn block(&self, id: &str) -> Option<&PlacedBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
