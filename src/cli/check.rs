use anyhow::{bail, Context, Result};

use crate::catalog::Catalog;
use crate::check::{CatalogChecker, Severity};
use crate::config::Config;
use crate::resolver::Resolver;

pub fn run(input: Option<String>, config_path: Option<String>) -> Result<()> {
    let config = Config::load_with_path(config_path)?;
    let input = super::input_path(input, &config.catalog.input);

    let catalog = Catalog::load(&input, &config.catalog)
        .with_context(|| format!("Failed to load catalog {}", input.display()))?;
    let checker = CatalogChecker::new(
        Resolver::from_config(&config.prompts),
        config.catalog.default_stage.clone(),
    );
    let issues = checker.check(&catalog);

    checker.print_issues(&issues);

    let errors = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .count();
    if errors > 0 {
        bail!("{} check error(s) found", errors);
    }

    Ok(())
}
