pub mod api;
pub mod build;
pub mod init;
pub mod palette;
pub mod preview;
pub mod validate;

use anyhow::{Context, Result};
use page_kit_core::{Page, parse_page_toml};
use std::path::{Path, PathBuf};

pub const PAGE_TOML: &str = "page.toml";

pub fn page_toml_path(dir: &Path) -> PathBuf {
    dir.join(PAGE_TOML)
}

/// Load page.toml from a page directory, with hints when it is missing
pub fn load_page(dir: &Path) -> Result<Page> {
    if !dir.exists() {
        anyhow::bail!(
            "Page directory does not exist: {}\nRun 'page-kit init {}' first",
            dir.display(),
            dir.display()
        );
    }

    let page_toml = page_toml_path(dir);
    if !page_toml.exists() {
        anyhow::bail!(
            "{} not found in {}\nRun 'page-kit init {}' first",
            PAGE_TOML,
            dir.display(),
            dir.display()
        );
    }

    parse_page_toml(&page_toml).with_context(|| format!("Failed to parse {}", PAGE_TOML))
}
