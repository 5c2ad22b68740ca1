use super::load_page;
use anyhow::{Context, Result};
use page_kit_generator::{RenderOptions, Registry, render_page};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Copy `src` into `dst` recursively, returning the number of files copied
fn copy_dir(src: &Path, dst: &Path) -> Result<usize> {
    let mut copied = 0;
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(src)?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Build static site for deployment
pub async fn run(path: PathBuf, output: PathBuf, registry: &Registry) -> Result<()> {
    println!("🔨 Building static site...");
    println!("   Source: {}", path.display());
    println!("   Output: {}", output.display());
    println!();

    let page = load_page(&path)?;

    println!("✓ Loaded: {}", page.site.title);
    println!("  Blocks: {}", page.blocks.len());
    println!();

    for block in &page.blocks {
        if let Err(e) = registry.dispatch(&block.type_tag, block.config.clone()) {
            eprintln!("   ⚠ Warning: block {} renders nothing: {}", block.id, e);
        }
    }

    println!("📁 Creating output directory...");
    fs::create_dir_all(&output).context("Failed to create output directory")?;

    println!("🎨 Copying assets...");
    let assets_src = path.join("assets");
    let copied_assets = if assets_src.exists() {
        copy_dir(&assets_src, &output.join("assets"))?
    } else {
        0
    };
    println!("   ✓ Copied {} asset files", copied_assets);

    println!("📄 Generating index.html...");
    let html = render_page(&page, registry, RenderOptions::default());
    fs::write(output.join("index.html"), html).context("Failed to write index.html")?;
    println!("   ✓ Generated index.html");

    println!();
    println!("✅ Build complete!");
    println!("   Output: {}", output.display());
    println!();
    println!("To test locally:");
    println!("   cd {} && python3 -m http.server 8000", output.display());
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"
[site]
title = "Built"

[[block]]
type = "DevExperienceAboutComponent"

[block.config]
name = "Linus"

[[block]]
type = "NotARealType"
"##;

    #[tokio::test]
    async fn test_build_writes_index_and_assets() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("site");
        let out = dir.path().join("dist");
        fs::create_dir_all(src.join("assets/img")).unwrap();
        fs::write(src.join("assets/img/logo.png"), b"png").unwrap();
        fs::write(src.join("page.toml"), PAGE).unwrap();

        run(src, out.clone(), &Registry::builtin()).await.unwrap();

        let html = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(html.contains("<title>Built</title>"));
        assert!(html.contains("Linus"));
        assert!(!html.contains("NotARealType"));
        assert!(out.join("assets/img/logo.png").is_file());
    }

    #[tokio::test]
    async fn test_build_missing_page_toml() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(dir.path().to_path_buf(), dir.path().join("dist"), &Registry::builtin())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("page.toml not found"));
    }
}
