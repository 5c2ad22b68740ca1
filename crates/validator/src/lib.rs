// Page validation: block types, block configs, referenced assets

use page_kit_core::Page;
use page_kit_generator::{DispatchError, Registry};
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use walkdir::WalkDir;

/// Prefix under which files from the project's `assets/` directory are served
pub const ASSETS_PREFIX: &str = "/assets/";

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check every block on a page against the registry
pub fn validate_page(page: &Page, registry: &Registry) -> ValidationReport {
    let mut report = ValidationReport::default();

    if page.is_empty() {
        report
            .warnings
            .push("Page has no blocks; it will render empty".to_string());
    }

    let mut seen_ids = HashSet::new();
    for (i, block) in page.blocks.iter().enumerate() {
        if !seen_ids.insert(block.id.as_str()) {
            report.errors.push(format!(
                "block[{}]: duplicate id '{}'",
                i, block.id
            ));
        }

        match registry.dispatch(&block.type_tag, block.config.clone()) {
            Ok(_) => report
                .info
                .push(format!("block[{}]: {} ok", i, block.type_tag)),
            Err(DispatchError::UnknownType(tag)) => report.warnings.push(format!(
                "block[{}]: unknown block type '{}' will render nothing",
                i, tag
            )),
            Err(e @ DispatchError::InvalidConfig { .. }) => {
                report.errors.push(format!("block[{}]: {}", i, e))
            }
        }
    }

    report
}

/// Check that every `/assets/...` path used in a block config exists under
/// `project_dir/assets`
pub fn validate_assets(page: &Page, project_dir: &Path, report: &mut ValidationReport) {
    let assets_dir = project_dir.join("assets");
    let available: HashSet<String> = WalkDir::new(&assets_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            e.path()
                .strip_prefix(&assets_dir)
                .ok()
                .map(|p| p.to_string_lossy().replace('\\', "/"))
        })
        .collect();

    report
        .info
        .push(format!("{} asset files available", available.len()));

    for block in &page.blocks {
        let mut referenced = BTreeSet::new();
        collect_asset_refs(&block.config, &mut referenced);
        for asset in referenced {
            if !available.contains(&asset) {
                report.errors.push(format!(
                    "block '{}': missing asset '{}{}'",
                    block.id, ASSETS_PREFIX, asset
                ));
            }
        }
    }
}

fn collect_asset_refs(value: &Value, out: &mut BTreeSet<String>) {
    match value {
        Value::String(s) => {
            if let Some(rest) = s.strip_prefix(ASSETS_PREFIX) {
                out.insert(rest.to_string());
            }
        }
        Value::Array(items) => items.iter().for_each(|v| collect_asset_refs(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_asset_refs(v, out)),
        _ => {}
    }
}
