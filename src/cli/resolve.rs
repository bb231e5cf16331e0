use anyhow::{bail, Result};
use tracing::debug;

use crate::config::Config;
use crate::resolver::Resolver;

/// Print the prompt a single skill would get.
pub fn run(
    skill_key: &str,
    stage: Option<String>,
    explain: bool,
    config_path: Option<String>,
) -> Result<()> {
    let skill_key = skill_key.trim();
    if skill_key.is_empty() {
        bail!("skillKey must not be empty");
    }

    let config = Config::load_with_path(config_path)?;
    let stage = stage.unwrap_or_else(|| config.catalog.default_stage.clone());
    let resolver = Resolver::from_config(&config.prompts);

    let (rule, prompt) = resolver.explain(skill_key, &stage);
    debug!("{} (stage {}) resolved by rule {}", skill_key, stage, rule);

    if explain {
        println!("rule: {}", rule);
        println!();
    }
    println!("{}", prompt);
    Ok(())
}
