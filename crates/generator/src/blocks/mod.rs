//! Built-in block renderers.
//!
//! Each block owns its config type and a view function; config fields all
//! default to empty so a half-filled block still renders.

pub mod about_screen;
pub mod add_demos;
pub mod add_project;
pub mod blog_grid;
pub mod demos;
pub mod dev_experience;
pub mod menu_demo;

use crate::registry::ComponentDescriptor;
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Every built-in block, in palette order
pub const BUILTIN: &[ComponentDescriptor] = &[
    about_screen::DESCRIPTOR,
    dev_experience::DESCRIPTOR,
    demos::DESCRIPTOR,
    add_demos::DESCRIPTOR,
    add_project::DESCRIPTOR,
    menu_demo::DESCRIPTOR,
    blog_grid::DESCRIPTOR,
];

/// Read a payload as `C` and render it with `view`
pub(crate) fn render_typed<C, V>(
    config: Value,
    view: fn(C) -> V,
) -> Result<AnyView, serde_json::Error>
where
    C: DeserializeOwned,
    V: IntoView + 'static,
{
    let config: C = serde_json::from_value(config)?;
    Ok(view(config).into_any())
}
