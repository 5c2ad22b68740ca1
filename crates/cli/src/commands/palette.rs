use anyhow::{Context, Result};
use page_kit_generator::Registry;

/// Print the block palette in registry order
pub fn run(registry: &Registry, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(&registry.palette())
            .context("Failed to serialize palette")?;
        println!("{}", out);
        return Ok(());
    }

    println!("{} block types:\n", registry.len());
    for item in registry.items() {
        let component = &item.component;
        println!(
            "  {}  {:<30} {}",
            component.icon.glyph(),
            component.type_tag,
            component.display_name
        );
    }
    Ok(())
}
