use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading, transforming or saving a skill catalog.
/// Every variant is raised before any output file is touched, except
/// [`CatalogError::Write`].
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected a top-level array or object, got {0}")]
    UnexpectedTopLevel(&'static str),

    #[error("Expected a top-level array of skills, got {0}")]
    ExpectedArray(&'static str),

    #[error("Top-level object has no `{0}` array")]
    MissingSkillsArray(String),

    #[error("Entry {index} is not an object")]
    NotAnObject { index: usize },

    #[error("Entry {index} is missing a valid skillKey")]
    MissingSkillKey { index: usize },

    #[error("Entry {index} ({skill_key}) has no string prompt")]
    MissingPrompt { index: usize, skill_key: String },

    #[error("Catalog has no skills")]
    EmptyCatalog,

    #[error("Could not find the global prompt end marker in the first skill's prompt")]
    MarkerNotFound,

    #[error("No output paths configured")]
    NoOutputs,

    #[error("Failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// JSON type name used in shape errors.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
