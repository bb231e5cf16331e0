use anyhow::{Context, Result};
use tracing::info;

use crate::catalog::{Catalog, Shape};
use crate::config::Config;
use crate::resolver::Resolver;

pub fn run(
    input: Option<String>,
    outputs: Vec<String>,
    config_path: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let config = Config::load_with_path(config_path)?;
    let input = super::input_path(input, &config.catalog.input);
    let outputs = super::output_paths(outputs, &config.catalog.outputs, &input);

    info!("Input: {}", input.display());
    for output in &outputs {
        info!("Output: {}", output.display());
    }

    let mut catalog = Catalog::load(&input, &config.catalog)
        .with_context(|| format!("Failed to load catalog {}", input.display()))?;

    match catalog.shape() {
        Shape::Processed => {
            info!(
                "Catalog already has `{}`; copying it through unchanged",
                config.catalog.processed_marker
            );
        }
        Shape::Array | Shape::Wrapped(_) => {
            let resolver = Resolver::from_config(&config.prompts);
            let count = catalog.rewrite(&resolver, &config.catalog.default_stage);
            info!("Rewrote {} prompts", count);
        }
    }

    if dry_run {
        info!("Dry run: nothing written");
        return Ok(());
    }

    catalog.save(&outputs).context("Failed to save catalog")?;
    Ok(())
}
