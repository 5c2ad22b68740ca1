//! Block registry and dispatcher.
//!
//! The registry is the one place block types are declared. The palette is
//! read from it and dispatch looks renderers up in it, so the two cannot
//! disagree about which type tags exist.

use crate::blocks;
use leptos::prelude::*;
use page_kit_core::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Turns a configuration payload into a rendered block.
///
/// Renderers take the payload by value and fail only when they cannot read
/// it as their config type.
pub type RenderFn = fn(Value) -> std::result::Result<AnyView, serde_json::Error>;

/// Palette glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Icon {
    #[serde(rename = "ApiIcon")]
    Api,
    #[serde(rename = "PersonIcon")]
    Person,
    #[serde(rename = "CollectionsIcon")]
    Collections,
    #[serde(rename = "RestaurantMenuIcon")]
    RestaurantMenu,
    #[serde(rename = "AddBoxIcon")]
    AddBox,
    #[serde(rename = "ArticleIcon")]
    Article,
}

impl Icon {
    /// Text glyph used where no icon font is available (terminal palette)
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Api => "⚙",
            Icon::Person => "👤",
            Icon::Collections => "🖼",
            Icon::RestaurantMenu => "🍽",
            Icon::AddBox => "➕",
            Icon::Article => "📰",
        }
    }
}

/// Everything the builder knows about one block type
#[derive(Debug, Clone, Copy)]
pub struct ComponentDescriptor {
    pub type_tag: &'static str,
    pub display_name: &'static str,
    pub icon: Icon,
    pub render: RenderFn,
}

/// Marks an entry as draggable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ItemKind {
    #[serde(rename = "sidebarItem")]
    SidebarItem,
}

/// A palette entry
#[derive(Debug, Clone)]
pub struct SidebarItem {
    pub id: String,
    pub kind: ItemKind,
    pub component: ComponentDescriptor,
}

/// Palette entry as sent to the editor
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteEntry {
    pub id: String,
    pub kind: ItemKind,
    #[serde(rename = "type")]
    pub type_tag: &'static str,
    pub display_name: &'static str,
    pub icon: Icon,
}

/// Why a block produced no output
#[derive(Debug)]
pub enum DispatchError {
    UnknownType(String),
    InvalidConfig {
        type_tag: String,
        source: serde_json::Error,
    },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::UnknownType(tag) => write!(f, "Unknown block type '{}'", tag),
            DispatchError::InvalidConfig { type_tag, source } => {
                write!(f, "Invalid config for '{}': {}", type_tag, source)
            }
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::InvalidConfig { source, .. } => Some(source),
            DispatchError::UnknownType(_) => None,
        }
    }
}

/// Ordered set of placeable block types, keyed by type tag
#[derive(Debug, Default)]
pub struct Registry {
    items: Vec<SidebarItem>,
    by_tag: HashMap<&'static str, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in block type, in palette order.
    ///
    /// Build this once at startup and pass it to whatever needs it.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for descriptor in blocks::BUILTIN {
            registry
                .register(*descriptor)
                .expect("built-in block type tags are distinct");
        }
        registry
    }

    /// Add a block type to the end of the palette
    pub fn register(&mut self, component: ComponentDescriptor) -> Result<&SidebarItem> {
        if self.by_tag.contains_key(component.type_tag) {
            return Err(Error::DuplicateBlockType(component.type_tag.to_string()));
        }

        let index = self.items.len();
        self.by_tag.insert(component.type_tag, index);
        self.items.push(SidebarItem {
            id: uuid::Uuid::new_v4().simple().to_string(),
            kind: ItemKind::SidebarItem,
            component,
        });
        Ok(&self.items[index])
    }

    pub fn items(&self) -> &[SidebarItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, type_tag: &str) -> Option<&ComponentDescriptor> {
        self.by_tag
            .get(type_tag)
            .map(|&index| &self.items[index].component)
    }

    pub fn contains(&self, type_tag: &str) -> bool {
        self.by_tag.contains_key(type_tag)
    }

    /// Render a block, or nothing.
    ///
    /// An unknown type tag or an unreadable payload yields `None` and is not
    /// reported. Use [`Registry::dispatch`] to find out why.
    pub fn render(&self, type_tag: &str, config: Value) -> Option<AnyView> {
        self.dispatch(type_tag, config).ok()
    }

    /// Render a block, reporting why nothing was produced
    pub fn dispatch(
        &self,
        type_tag: &str,
        config: Value,
    ) -> std::result::Result<AnyView, DispatchError> {
        let component = self
            .get(type_tag)
            .ok_or_else(|| DispatchError::UnknownType(type_tag.to_string()))?;

        (component.render)(config).map_err(|source| DispatchError::InvalidConfig {
            type_tag: type_tag.to_string(),
            source,
        })
    }

    /// Render straight to an HTML fragment
    pub fn render_html(&self, type_tag: &str, config: Value) -> Option<String> {
        self.render(type_tag, config).map(|view| view.to_html())
    }

    pub fn palette(&self) -> Vec<PaletteEntry> {
        self.items
            .iter()
            .map(|item| PaletteEntry {
                id: item.id.clone(),
                kind: item.kind,
                type_tag: item.component.type_tag,
                display_name: item.component.display_name,
                icon: item.component.icon,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    fn about_config() -> Value {
        json!({
            "title": "X",
            "subtitle": "Y",
            "description": "Z",
            "skills": [],
            "experiences": [],
            "education": [],
            "contact": {"email": "a@b.com", "phone": "", "location": ""}
        })
    }

    #[test]
    fn test_about_screen_renders_title_and_subtitle() {
        let registry = Registry::builtin();
        let html = registry
            .render_html("AboutScreenComponent", about_config())
            .unwrap();
        assert!(html.contains('X'));
        assert!(html.contains('Y'));
        assert!(html.contains("mailto:a@b.com"));
    }

    #[test]
    fn test_unknown_type_renders_nothing() {
        let registry = Registry::builtin();
        assert!(registry.render("NotARealType", json!({})).is_none());
        assert!(registry.render("", json!(null)).is_none());
        // Tags are matched exactly
        assert!(registry.render("aboutscreencomponent", about_config()).is_none());
    }

    #[test]
    fn test_dispatch_reports_unknown_type() {
        let registry = Registry::builtin();
        let err = registry.dispatch("NotARealType", json!({})).unwrap_err();
        assert!(matches!(err, DispatchError::UnknownType(ref tag) if tag == "NotARealType"));
        assert!(err.to_string().contains("NotARealType"));
    }

    #[test]
    fn test_unreadable_config_renders_nothing() {
        let registry = Registry::builtin();
        let bad = json!({"title": ["not", "a", "string"]});

        assert!(registry.render("AboutScreenComponent", bad.clone()).is_none());
        let err = registry.dispatch("AboutScreenComponent", bad).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidConfig { .. }));
    }

    #[test]
    fn test_fractional_numbers_dispatch() {
        let registry = Registry::builtin();
        let html = registry
            .render_html(
                "DevExperienceAboutComponent",
                json!({"name": "Grace", "yearsOfExperience": 2.5}),
            )
            .unwrap();
        assert!(html.contains("with 2.5 years of experience"));
    }

    #[test]
    fn test_every_registered_type_renders() {
        let registry = Registry::builtin();
        for item in registry.items() {
            let tag = item.component.type_tag;
            let html = registry
                .render_html(tag, json!({}))
                .unwrap_or_else(|| panic!("{} rendered nothing", tag));
            assert!(!html.is_empty(), "{} rendered empty html", tag);
        }
    }

    #[test]
    fn test_palette_and_dispatch_agree() {
        let registry = Registry::builtin();
        assert_eq!(registry.len(), blocks::BUILTIN.len());
        assert_eq!(registry.palette().len(), registry.len());

        let tags: HashSet<_> = registry.items().iter().map(|i| i.component.type_tag).collect();
        assert_eq!(tags.len(), registry.len());
        for tag in tags {
            assert!(registry.contains(tag));
            assert!(registry.dispatch(tag, json!({})).is_ok());
        }
    }

    #[test]
    fn test_palette_order_and_ids() {
        let registry = Registry::builtin();
        let items = registry.items();
        assert_eq!(items[0].component.type_tag, "AboutScreenComponent");
        assert_eq!(items[1].component.type_tag, "DevExperienceAboutComponent");

        let ids: HashSet<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), items.len());
        assert!(items.iter().all(|i| i.kind == ItemKind::SidebarItem));
    }

    #[test]
    fn test_register_rejects_duplicate_tag() {
        let mut registry = Registry::new();
        registry.register(blocks::about_screen::DESCRIPTOR).unwrap();
        let err = registry
            .register(blocks::about_screen::DESCRIPTOR)
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateBlockType(_)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_empty_registry_renders_nothing() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert!(registry.render("AboutScreenComponent", about_config()).is_none());
    }

    #[test]
    fn test_palette_serializes_for_editor() {
        let registry = Registry::builtin();
        let json = serde_json::to_value(registry.palette()).unwrap();
        assert_eq!(json[0]["type"], "AboutScreenComponent");
        assert_eq!(json[0]["kind"], "sidebarItem");
        assert_eq!(json[0]["icon"], "ApiIcon");
        assert!(json[0]["displayName"].is_string());
    }
}
