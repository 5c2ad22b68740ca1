// Static page generation with Leptos SSR

pub mod blocks;
pub mod markdown;
pub mod page;
pub mod registry;

pub use page::{RenderOptions, html_escape, render_page};
pub use registry::{
    ComponentDescriptor, DispatchError, Icon, ItemKind, PaletteEntry, Registry, SidebarItem,
};
