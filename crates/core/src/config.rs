use crate::error::{Error, Result};
use crate::types::*;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Raw TOML configuration structure
/// This matches the page.toml file structure exactly
#[derive(Debug, Deserialize)]
struct RawConfig {
    site: RawSite,
    #[serde(default)]
    block: Vec<RawBlock>,
}

#[derive(Debug, Deserialize)]
struct RawSite {
    title: String,
    description: Option<String>,
    #[serde(default)]
    theme: Theme,
    accent_color: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    id: Option<String>, // Generated when hand-written without one
    #[serde(rename = "type")]
    type_tag: String,
    config: Option<Value>,
}

/// Parse page.toml from a file path
pub fn parse_page_toml<P: AsRef<Path>>(path: P) -> Result<Page> {
    let content = fs::read_to_string(path)?;
    parse_page_toml_str(&content)
}

/// Parse page.toml from a string (useful for testing)
pub fn parse_page_toml_str(content: &str) -> Result<Page> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.site.title.trim().is_empty() {
        return Err(Error::ConfigParse("site.title must not be empty".to_string()));
    }

    let accent_color = match raw.site.accent_color {
        Some(color) => validate_color(&color, "site.accent_color")?,
        None => default_accent_color(),
    };

    let site = SiteConfig {
        title: raw.site.title,
        description: raw.site.description,
        theme: raw.site.theme,
        accent_color,
    };

    let blocks: Result<Vec<PlacedBlock>> = raw
        .block
        .into_iter()
        .enumerate()
        .map(|(i, b)| {
            if b.type_tag.trim().is_empty() {
                return Err(Error::ConfigParse(format!("block[{}].type must not be empty", i)));
            }

            let config = match b.config {
                Some(value @ Value::Object(_)) => value,
                Some(_) => {
                    return Err(Error::ConfigParse(format!(
                        "block[{}].config must be a table",
                        i
                    )));
                }
                None => empty_config(),
            };

            Ok(PlacedBlock {
                id: b.id.unwrap_or_else(new_block_id),
                type_tag: b.type_tag,
                config,
            })
        })
        .collect();

    Ok(Page {
        site,
        blocks: blocks?,
    })
}

/// Serialize a page back into page.toml form.
///
/// TOML has no null, so null values inside block configs are dropped.
pub fn page_to_toml_string(page: &Page) -> Result<String> {
    let mut page = page.clone();
    for block in &mut page.blocks {
        strip_nulls(&mut block.config);
    }
    Ok(toml::to_string(&page)?)
}

/// Write a page to page.toml.
///
/// The content goes to a hidden temporary file in the same directory, which
/// is then renamed over `path`. Readers see either the old page or the new
/// one, never a truncated file.
pub fn save_page_toml<P: AsRef<Path>>(path: P, page: &Page) -> Result<()> {
    let path = path.as_ref();
    let content = page_to_toml_string(page)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::Builder::new()
        .prefix(".page.toml.")
        .tempfile_in(dir)?;
    file.write_all(content.as_bytes())?;
    if let Ok(metadata) = fs::metadata(path) {
        file.as_file().set_permissions(metadata.permissions())?;
    }
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => {
            items.retain(|v| !v.is_null());
            items.iter_mut().for_each(strip_nulls);
        }
        _ => {}
    }
}

/// Validate a CSS hex colour: `#rgb` or `#rrggbb`
fn validate_color(color: &str, field_name: &str) -> Result<String> {
    let hex = color.strip_prefix('#').ok_or_else(|| {
        Error::ConfigParse(format!(
            "Invalid colour in '{}': '{}'. Expected #rgb or #rrggbb",
            field_name, color
        ))
    })?;

    if !(hex.len() == 3 || hex.len() == 6) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::ConfigParse(format!(
            "Invalid colour in '{}': '{}'. Expected #rgb or #rrggbb",
            field_name, color
        )));
    }

    Ok(color.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_color() {
        assert!(validate_color("#333", "c").is_ok());
        assert!(validate_color("#1A1A1A", "c").is_ok());
        assert!(validate_color("333333", "c").is_err());
        assert!(validate_color("#12345", "c").is_err());
        assert!(validate_color("#gggggg", "c").is_err());

        let err = validate_color("red", "site.accent_color").unwrap_err();
        assert!(err.to_string().contains("site.accent_color"));
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml = r##"
[site]
title = "Portfolio"
        "##;

        let page = parse_page_toml_str(toml).unwrap();
        assert_eq!(page.site.title, "Portfolio");
        assert_eq!(page.site.theme, Theme::Light);
        assert_eq!(page.site.accent_color, "#333333");
        assert!(page.blocks.is_empty());
    }

    #[test]
    fn test_parse_blocks_in_order() {
        let toml = r##"
[site]
title = "Portfolio"
theme = "dark"
accent_color = "#ff6b35"

[[block]]
id = "about"
type = "AboutScreenComponent"

[block.config]
title = "X"
subtitle = "Y"
skills = [{ name = "Rust", level = 90 }]

[[block]]
type = "DevExperienceAboutComponent"
        "##;

        let page = parse_page_toml_str(toml).unwrap();
        assert_eq!(page.site.theme, Theme::Dark);
        assert_eq!(page.blocks.len(), 2);

        let about = &page.blocks[0];
        assert_eq!(about.id, "about");
        assert_eq!(about.type_tag, "AboutScreenComponent");
        assert_eq!(about.config["skills"][0]["level"], 90);

        // Missing id and config are filled in
        let dev = &page.blocks[1];
        assert!(!dev.id.is_empty());
        assert_eq!(dev.config, json!({}));
    }

    #[test]
    fn test_parse_rejects_bad_accent_color() {
        let toml = r##"
[site]
title = "Portfolio"
accent_color = "orange"
        "##;

        let result = parse_page_toml_str(toml);
        assert!(result.unwrap_err().to_string().contains("Invalid colour"));
    }

    #[test]
    fn test_parse_rejects_unknown_theme() {
        let toml = r##"
[site]
title = "Portfolio"
theme = "sepia"
        "##;

        assert!(parse_page_toml_str(toml).is_err());
    }

    #[test]
    fn test_parse_rejects_empty_title_and_type() {
        assert!(parse_page_toml_str("[site]\ntitle = \"  \"\n").is_err());

        let toml = r##"
[site]
title = "Portfolio"

[[block]]
type = ""
        "##;
        let err = parse_page_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("block[0].type"));
    }

    #[test]
    fn test_parse_rejects_scalar_config() {
        let toml = r##"
[site]
title = "Portfolio"

[[block]]
type = "AboutScreenComponent"
config = "nope"
        "##;

        let err = parse_page_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("must be a table"));
    }

    #[test]
    fn test_save_and_reload() {
        let mut page = Page::new("Round Trip");
        page.site.theme = Theme::Dark;
        let about = page.place(
            "AboutScreenComponent",
            json!({
                "title": "X",
                "skills": [{"name": "Rust", "level": 80}],
                "contact": {"email": "a@b.com", "phone": null}
            }),
        );
        page.place("BlogGridComponent", json!({}));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.toml");
        save_page_toml(&path, &page).unwrap();

        let reloaded = parse_page_toml(&path).unwrap();
        assert_eq!(reloaded.site, page.site);
        assert_eq!(reloaded.blocks.len(), 2);
        assert_eq!(reloaded.blocks[0].id, about);
        assert_eq!(reloaded.blocks[0].config["skills"][0]["name"], "Rust");
        // Nulls cannot be written to TOML
        assert!(reloaded.blocks[0].config["contact"].get("phone").is_none());
        assert_eq!(reloaded.blocks[1].type_tag, "BlogGridComponent");
    }

    #[test]
    fn test_readers_never_see_partial_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.toml");

        let mut page = Page::new("Busy");
        for i in 0..50 {
            page.place("AboutScreenComponent", json!({"title": format!("Block {}", i)}));
        }
        save_page_toml(&path, &page).unwrap();

        let writer = {
            let path = path.clone();
            let page = page.clone();
            std::thread::spawn(move || {
                for _ in 0..200 {
                    save_page_toml(&path, &page).unwrap();
                }
            })
        };

        while !writer.is_finished() {
            let reloaded = parse_page_toml(&path).unwrap();
            assert_eq!(reloaded.blocks.len(), 50);
        }
        writer.join().unwrap();

        // Only page.toml remains; no temporary files left behind
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("page.toml")]);
    }
}
