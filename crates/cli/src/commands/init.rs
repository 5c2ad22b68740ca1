use super::{PAGE_TOML, page_toml_path};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Escape a string for safe inclusion in a TOML basic string
///
/// The template is written by hand to keep its comments, so values are
/// escaped here rather than going through the toml serializer.
///
/// See: https://toml.io/en/v1.0.0#string
fn toml_escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\x08' => out.push_str("\\b"),
            '\x0C' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Page title from the directory name: `my-portfolio` -> `My Portfolio`
fn title_from_dir(path: &Path) -> String {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("My Page");

    let title: Vec<String> = name
        .split(['-', '_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();

    if title.is_empty() {
        "My Page".to_string()
    } else {
        title.join(" ")
    }
}

fn page_template(title: &str) -> String {
    format!(
        r##"# page-kit page configuration
#
# Blocks render top to bottom in the order they appear here.
# Run 'page-kit palette' to list the block types you can use.

[site]
title = "{title}"
# description = "Shown to search engines"
theme = "light"          # light or dark
accent_color = "#333333"

[[block]]
type = "AboutScreenComponent"

[block.config]
title = "{title}"
subtitle = "A short line about what you do"
description = "Tell visitors who you are."
skills = [
    {{ name = "Rust", level = 80 }},
]
experiences = []
education = []

[block.config.contact]
email = "you@example.com"
phone = ""
location = ""
"##,
        title = toml_escape_string(title)
    )
}

/// Create a new page directory with a starter page.toml
pub async fn run(path: PathBuf) -> Result<()> {
    println!("📄 Initializing page at: {}", path.display());

    let page_toml = page_toml_path(&path);
    if page_toml.exists() {
        anyhow::bail!(
            "{} already exists in {}; refusing to overwrite",
            PAGE_TOML,
            path.display()
        );
    }

    fs::create_dir_all(path.join("assets")).context("Failed to create assets directory")?;

    let title = title_from_dir(&path);
    fs::write(&page_toml, page_template(&title))
        .with_context(|| format!("Failed to write {}", page_toml.display()))?;
    tracing::info!(path = %page_toml.display(), "wrote starter page");

    println!("   ✓ Created {}", PAGE_TOML);
    println!("   ✓ Created assets/");
    println!();
    println!("Next steps:");
    println!("   page-kit preview {}", path.display());

    Ok(())
}
