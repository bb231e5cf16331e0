use anyhow::{Context, Result};
use tracing::info;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::split;

pub fn run(
    input: Option<String>,
    outputs: Vec<String>,
    marker: Option<String>,
    config_path: Option<String>,
) -> Result<()> {
    let config = Config::load_with_path(config_path)?;
    let input = super::input_path(input, &config.catalog.input);
    let outputs = super::output_paths(outputs, &config.split.outputs, &input);
    let marker = marker.unwrap_or_else(|| config.split.global_end_marker.clone());

    info!("Splitting {}", input.display());

    let catalog = Catalog::load(&input, &config.catalog)
        .with_context(|| format!("Failed to load catalog {}", input.display()))?;
    let processed = split::split(catalog, &marker).context("Failed to split catalog")?;

    processed.save(&outputs).context("Failed to save catalog")?;
    Ok(())
}
