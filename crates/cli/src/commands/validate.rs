use super::load_page;
use page_kit_generator::Registry;
use page_kit_validator::{validate_assets, validate_page};
use std::path::PathBuf;

pub async fn run(path: PathBuf, registry: &Registry) -> anyhow::Result<()> {
    println!("Validating page at: {}", path.display());

    let page = load_page(&path)?;
    println!("✓ page.toml valid");
    println!("  Page: {}", page.site.title);
    println!("  Blocks: {}", page.blocks.len());
    println!();

    let mut report = validate_page(&page, registry);
    validate_assets(&page, &path, &mut report);

    for line in &report.info {
        println!("  ✓ {}", line);
    }
    for line in &report.warnings {
        println!("  ⚠ {}", line);
    }
    for line in &report.errors {
        eprintln!("  ✗ {}", line);
    }

    if !report.is_ok() {
        anyhow::bail!("Validation failed with {} error(s)", report.errors.len());
    }

    println!("\n✅ Page is valid");
    Ok(())
}
