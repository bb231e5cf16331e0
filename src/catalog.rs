//! Loading, rewriting and saving the skill catalog document.
//!
//! Records are kept as raw JSON objects so that every field other than
//! `prompt` survives a run unchanged, key order included.

use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::CatalogConfig;
use crate::error::{json_kind, CatalogError};
use crate::resolver::Resolver;

pub const SKILL_KEY_FIELD: &str = "skillKey";
pub const STAGE_FIELD: &str = "stage";
pub const PROMPT_FIELD: &str = "prompt";

/// Top-level layout of a catalog file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// `[ {skill}, ... ]`
    Array,
    /// `{ "<field>": [ {skill}, ... ], ...other fields }`
    Wrapped(String),
    /// Carries the processed marker; passed through untouched.
    Processed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    root: Value,
    shape: Shape,
}

impl Catalog {
    /// Read and validate a catalog file.
    pub fn load(path: &Path, config: &CatalogConfig) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Err(CatalogError::NotFound(path.to_path_buf()));
        }
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let root: Value = serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_value(root, config)?;
        debug!(
            "Loaded {} skills from {} ({:?})",
            catalog.skills().len(),
            path.display(),
            catalog.shape
        );
        Ok(catalog)
    }

    /// Classify and validate an already-parsed document.
    pub fn from_value(root: Value, config: &CatalogConfig) -> Result<Self, CatalogError> {
        let shape = match &root {
            Value::Array(_) => Shape::Array,
            Value::Object(map) if map.contains_key(&config.processed_marker) => Shape::Processed,
            Value::Object(map) => match map.get(&config.skills_field) {
                Some(Value::Array(_)) => Shape::Wrapped(config.skills_field.clone()),
                _ => return Err(CatalogError::MissingSkillsArray(config.skills_field.clone())),
            },
            other => return Err(CatalogError::UnexpectedTopLevel(json_kind(other))),
        };
        let catalog = Self { root, shape };
        if catalog.shape != Shape::Processed {
            validate_skills(catalog.skills())?;
        }
        Ok(catalog)
    }

    /// Wrap a split document; always treated as processed.
    pub(crate) fn processed(root: Value) -> Self {
        Self {
            root,
            shape: Shape::Processed,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn is_processed(&self) -> bool {
        self.shape == Shape::Processed
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    /// Skill records. Empty for processed catalogs.
    pub fn skills(&self) -> &[Value] {
        let array = match &self.shape {
            Shape::Array => self.root.as_array(),
            Shape::Wrapped(field) => self.root.get(field).and_then(Value::as_array),
            Shape::Processed => None,
        };
        array.map(Vec::as_slice).unwrap_or(&[])
    }

    fn skills_mut(&mut self) -> Option<&mut Vec<Value>> {
        match &self.shape {
            Shape::Array => self.root.as_array_mut(),
            Shape::Wrapped(field) => self.root.get_mut(field).and_then(Value::as_array_mut),
            Shape::Processed => None,
        }
    }

    /// Overwrite every record's `prompt`. Returns the number of records
    /// rewritten; processed catalogs are left as they are.
    pub fn rewrite(&mut self, resolver: &Resolver, default_stage: &str) -> usize {
        let Some(skills) = self.skills_mut() else {
            return 0;
        };
        let mut count = 0;
        for skill in skills.iter_mut() {
            let Some(key) = skill_key(skill) else {
                continue;
            };
            let record_stage = stage(skill).unwrap_or(default_stage);
            let prompt = resolver.resolve(key, record_stage);
            if let Some(record) = skill.as_object_mut() {
                record.insert(PROMPT_FIELD.to_string(), Value::String(prompt));
                count += 1;
            }
        }
        count
    }

    /// Pretty JSON with two-space indent, literal non-ASCII text and a
    /// trailing newline.
    pub fn to_json_string(&self) -> Result<String, CatalogError> {
        let mut out = serde_json::to_string_pretty(&self.root)?;
        out.push('\n');
        Ok(out)
    }

    /// Serialize once and write the same bytes to every output path.
    /// Each file is replaced atomically through a sibling temp file.
    pub fn save(&self, outputs: &[PathBuf]) -> Result<(), CatalogError> {
        if outputs.is_empty() {
            return Err(CatalogError::NoOutputs);
        }
        let content = self.to_json_string()?;
        for path in outputs {
            write_atomic(path, content.as_bytes())?;
            info!("Wrote {}", path.display());
        }
        Ok(())
    }
}

/// Skill key of a record, if it has a non-empty string one.
pub fn skill_key(record: &Value) -> Option<&str> {
    record
        .get(SKILL_KEY_FIELD)
        .and_then(Value::as_str)
        .filter(|k| !k.is_empty())
}

/// Stage of a record, trimmed. Blank or non-string stages count as absent.
pub fn stage(record: &Value) -> Option<&str> {
    record
        .get(STAGE_FIELD)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn validate_skills(skills: &[Value]) -> Result<(), CatalogError> {
    for (index, skill) in skills.iter().enumerate() {
        if !skill.is_object() {
            return Err(CatalogError::NotAnObject { index });
        }
        if skill_key(skill).is_none() {
            return Err(CatalogError::MissingSkillKey { index });
        }
    }
    Ok(())
}

fn write_atomic(path: &Path, content: &[u8]) -> Result<(), CatalogError> {
    let write_err = |source| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(write_err)?;
    let mut tmp = tempfile::NamedTempFile::new_in(&parent).map_err(write_err)?;
    tmp.write_all(content).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
