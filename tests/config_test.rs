//! Configuration defaults and file discovery

use anyhow::Result;
use serial_test::serial;
use std::fs;
use std::path::PathBuf;

use skillprompts::config::Config;
use skillprompts::resolver::Resolver;

/// Runs `f` with the working directory set to `dir`, restoring it afterwards.
fn in_dir<T>(dir: &std::path::Path, f: impl FnOnce() -> T) -> T {
    let saved = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir).unwrap();
    let out = f();
    std::env::set_current_dir(saved).unwrap();
    out
}

#[test]
fn test_config_has_defaults() -> Result<()> {
    let config = Config::default();

    assert_eq!(config.catalog.default_stage, "cross");
    assert_eq!(config.catalog.skills_field, "skills");
    assert!(config.prompts.fence);
    assert!(!config.split.global_end_marker.is_empty());

    Ok(())
}

#[test]
#[serial]
fn test_config_from_working_directory() -> Result<()> {
    let dir = tempfile::TempDir::new()?;
    fs::write(
        dir.path().join("skillprompts.toml"),
        r#"
[catalog]
input = "data/skills.json"
outputs = ["web/skills.json", "mobile/skills.json"]
default_stage = "retro"

[prompts]
fence = false
preamble_custom = "EXTRA\n- Keep quotes in ILS."
"#,
    )?;

    let config = in_dir(dir.path(), || Config::load_with_path(None))?;
    assert_eq!(config.catalog.input, PathBuf::from("data/skills.json"));
    assert_eq!(config.catalog.outputs.len(), 2);
    assert_eq!(config.catalog.default_stage, "retro");

    let resolver = Resolver::from_config(&config.prompts);
    let prompt = resolver.resolve("misc.thing", &config.catalog.default_stage);
    assert!(prompt.starts_with("You are Studio Agent"));
    assert!(prompt.contains("- Keep quotes in ILS.\n\nSKILL\n"));

    Ok(())
}

#[test]
#[serial]
fn test_explicit_path_wins_over_working_directory() -> Result<()> {
    let dir = tempfile::TempDir::new()?;
    fs::write(
        dir.path().join("skillprompts.toml"),
        "[catalog]\ndefault_stage = \"retro\"\n",
    )?;
    let explicit = dir.path().join("other.toml");
    fs::write(&explicit, "[catalog]\ndefault_stage = \"printing\"\n")?;

    let config = in_dir(dir.path(), || {
        Config::load_with_path(Some(explicit.to_str().unwrap().to_string()))
    })?;
    assert_eq!(config.catalog.default_stage, "printing");

    Ok(())
}
