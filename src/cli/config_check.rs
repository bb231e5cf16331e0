use anyhow::Result;
use std::str::FromStr;

use crate::config::Config;
use crate::resolver::{Resolver, Stage, DEFAULT_STAGE};

struct CheckResult {
    passed: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
}

impl CheckResult {
    fn new() -> Self {
        Self {
            passed: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn pass(&mut self, msg: impl Into<String>) {
        self.passed.push(msg.into());
    }

    fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }
}

pub fn run(config_path: Option<String>) -> Result<()> {
    let mut results = CheckResult::new();

    let config = match Config::load_with_path(config_path.clone()) {
        Ok(config) => {
            let source = config_path.as_deref().unwrap_or("default search path");
            results.pass(format!("Config loaded from {}", source));
            config
        }
        Err(e) => {
            results.error(format!("Failed to load config: {:#}", e));
            print_results(&results);
            anyhow::bail!("{} config error(s) found", results.errors.len());
        }
    };

    check_config(&config, &mut results);
    print_results(&results);

    if !results.errors.is_empty() {
        anyhow::bail!("{} config error(s) found", results.errors.len());
    }

    Ok(())
}

fn check_config(config: &Config, results: &mut CheckResult) {
    let catalog = &config.catalog;

    if catalog.input.is_file() {
        results.pass(format!("Catalog: {}", catalog.input.display()));
    } else {
        results.warn(format!(
            "Catalog {} does not exist (pass --input to override)",
            catalog.input.display()
        ));
    }

    if catalog.outputs.is_empty() {
        results.pass("Outputs: rewrite input in place");
    } else {
        let outputs: Vec<_> = catalog
            .outputs
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        results.pass(format!("Outputs: {}", outputs.join(", ")));
    }

    if catalog.skills_field.trim().is_empty() {
        results.error("catalog.skills_field is empty");
    }
    if catalog.processed_marker.trim().is_empty() {
        results.error("catalog.processed_marker is empty");
    }

    let stage = catalog.default_stage.as_str();
    if stage == DEFAULT_STAGE || Stage::from_str(stage).is_ok() {
        results.pass(format!("Default stage: {}", stage));
    } else {
        results.warn(format!(
            "Default stage '{}' is not a known stage; records without a stage get the generic prompt",
            stage
        ));
    }

    let prompts = &config.prompts;
    match prompts.preamble_mode.as_deref() {
        None | Some("append") | Some("overwrite") => {}
        Some(other) => results.error(format!(
            "prompts.preamble_mode '{}' is invalid (expected append or overwrite)",
            other
        )),
    }
    let has_custom = prompts
        .preamble_custom
        .as_deref()
        .is_some_and(|c| !c.trim().is_empty());
    match (has_custom, prompts.is_overwrite()) {
        (true, true) => results.pass("Preamble: custom (replaces built-in)"),
        (true, false) => results.pass("Preamble: built-in + custom"),
        (false, true) => results.warn(
            "prompts.preamble_mode = overwrite without preamble_custom; the built-in preamble is used",
        ),
        (false, false) => results.pass("Preamble: built-in"),
    }
    results.pass(format!(
        "Fence: {}",
        if prompts.fence { "```text" } else { "off" }
    ));

    let marker = &config.split.global_end_marker;
    if marker.is_empty() {
        results.error("split.global_end_marker is empty");
    } else if !Resolver::from_config(prompts)
        .resolve("config.check", DEFAULT_STAGE)
        .contains(marker.as_str())
    {
        results.warn(
            "split.global_end_marker does not occur in composed prompts; `split` will fail on rewritten catalogs",
        );
    } else {
        results.pass("Split marker found in composed prompts");
    }
}

fn print_results(results: &CheckResult) {
    println!();
    for msg in &results.passed {
        println!("  \u{2713} {}", msg);
    }
    for msg in &results.warnings {
        println!("  ! {}", msg);
    }
    for msg in &results.errors {
        println!("  \u{2717} {}", msg);
    }
    println!();
    println!(
        "{} passed, {} warnings, {} errors",
        results.passed.len(),
        results.warnings.len(),
        results.errors.len()
    );
}
