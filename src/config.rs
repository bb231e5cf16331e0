use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::resolver::{DEFAULT_STAGE, PREAMBLE_END_MARKER};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub prompts: PromptsConfig,
    #[serde(default)]
    pub split: SplitConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog to read (default: "convex/skills/agentSkills.generated.json")
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Files to write. Empty means rewrite the input in place.
    /// Every path receives identical bytes.
    #[serde(default)]
    pub outputs: Vec<PathBuf>,

    /// Field holding the skills array when the catalog is a wrapping object
    #[serde(default = "default_skills_field")]
    pub skills_field: String,

    /// Top-level field marking a catalog that was already split; such
    /// catalogs are copied through untouched
    #[serde(default = "default_processed_marker")]
    pub processed_marker: String,

    /// Stage assumed for records without one
    #[serde(default = "default_stage")]
    pub default_stage: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            outputs: Vec::new(),
            skills_field: default_skills_field(),
            processed_marker: default_processed_marker(),
            default_stage: default_stage(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptsConfig {
    /// Wrap every prompt in a ```text fence (default: true)
    #[serde(default = "default_true")]
    pub fence: bool,

    /// Extra studio rules added to the preamble
    #[serde(default)]
    pub preamble_custom: Option<String>,

    /// "append" (default) or "overwrite"
    #[serde(default)]
    pub preamble_mode: Option<String>,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            fence: true,
            preamble_custom: None,
            preamble_mode: None,
        }
    }
}

impl PromptsConfig {
    /// Whether `preamble_custom` replaces the built-in preamble.
    pub fn is_overwrite(&self) -> bool {
        matches!(self.preamble_mode.as_deref(), Some("overwrite"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Text that ends the shared global prompt (inclusive)
    #[serde(default = "default_global_end_marker")]
    pub global_end_marker: String,

    /// Files to write. Empty means rewrite the input in place.
    #[serde(default)]
    pub outputs: Vec<PathBuf>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            global_end_marker: default_global_end_marker(),
            outputs: Vec::new(),
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from("convex/skills/agentSkills.generated.json")
}

fn default_skills_field() -> String {
    "skills".to_string()
}

fn default_processed_marker() -> String {
    "globalPrompt".to_string()
}

fn default_stage() -> String {
    DEFAULT_STAGE.to_string()
}

fn default_global_end_marker() -> String {
    PREAMBLE_END_MARKER.to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a specific path, or use default search paths
    pub fn load_with_path(path: Option<String>) -> Result<Self> {
        if let Some(config_path) = path {
            debug!("Loading config from explicit path: {}", config_path);
            return Self::load_from_path(&config_path);
        }

        if Path::new("skillprompts.toml").exists() {
            debug!("Loading config from ./skillprompts.toml");
            return Self::load_from_path("skillprompts.toml");
        }

        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("skillprompts").join("config.toml");
            if config_path.exists() {
                debug!("Loading config from {:?}", config_path);
                return Self::load_from_path(&config_path);
            }
        }

        debug!("Using default config");
        Ok(Self::default())
    }

    fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(
            config.catalog.input,
            PathBuf::from("convex/skills/agentSkills.generated.json")
        );
        assert!(config.catalog.outputs.is_empty());
        assert_eq!(config.catalog.skills_field, "skills");
        assert_eq!(config.catalog.processed_marker, "globalPrompt");
        assert_eq!(config.catalog.default_stage, "cross");
        assert!(config.prompts.fence);
        assert!(!config.prompts.is_overwrite());
        assert_eq!(config.split.global_end_marker, PREAMBLE_END_MARKER);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("skills_field = \"skills\""));
        assert!(toml_str.contains("processed_marker = \"globalPrompt\""));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
[catalog]
input = "skills.json"
outputs = ["a.json", "b.json"]

[prompts]
fence = false
"#,
        )
        .unwrap();
        assert_eq!(config.catalog.input, PathBuf::from("skills.json"));
        assert_eq!(config.catalog.outputs.len(), 2);
        assert_eq!(config.catalog.default_stage, "cross");
        assert!(!config.prompts.fence);
        assert_eq!(config.split.global_end_marker, PREAMBLE_END_MARKER);
    }

    #[test]
    fn test_is_overwrite() {
        let mut prompts = PromptsConfig::default();
        assert!(!prompts.is_overwrite());
        prompts.preamble_mode = Some("append".to_string());
        assert!(!prompts.is_overwrite());
        prompts.preamble_mode = Some("overwrite".to_string());
        assert!(prompts.is_overwrite());
    }

    #[test]
    fn test_load_explicit_missing_path_fails() {
        let result = Config::load_with_path(Some("/nonexistent/skillprompts.toml".to_string()));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to read config file"));
    }

    #[test]
    fn test_load_explicit_invalid_toml_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[catalog\ninput = ").unwrap();
        let result = Config::load_with_path(Some(path.to_str().unwrap().to_string()));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid config file"));
    }
}
