//! Factor shared prompt text out of a rewritten catalog.
//!
//! Produces `{ "globalPrompt", "categoryPrompts", "skills" }` where each
//! skill keeps only its own block.

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::catalog::{self, Catalog, Shape, PROMPT_FIELD};
use crate::error::CatalogError;

const SKILL_MARKER: &str = "\nSKILL\n";

pub const GLOBAL_PROMPT_FIELD: &str = "globalPrompt";
pub const CATEGORY_PROMPTS_FIELD: &str = "categoryPrompts";
pub const SKILLS_FIELD: &str = "skills";

/// Split every prompt into global, per-stage and per-skill parts.
/// Already processed catalogs come back unchanged.
pub fn split(catalog: Catalog, global_end_marker: &str) -> Result<Catalog, CatalogError> {
    if catalog.is_processed() {
        info!("Catalog already processed; passing through");
        return Ok(catalog);
    }
    if matches!(catalog.shape(), Shape::Wrapped(_)) {
        return Err(CatalogError::ExpectedArray("object"));
    }

    let skills = catalog.skills();
    let prompts = skills
        .iter()
        .enumerate()
        .map(|(index, skill)| {
            skill
                .get(PROMPT_FIELD)
                .and_then(Value::as_str)
                .ok_or_else(|| CatalogError::MissingPrompt {
                    index,
                    skill_key: catalog::skill_key(skill).unwrap_or_default().to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let first = prompts.first().ok_or(CatalogError::EmptyCatalog)?;
    let global_end = first
        .find(global_end_marker)
        .ok_or(CatalogError::MarkerNotFound)?
        + global_end_marker.len();
    let global_prompt = &first[..global_end];

    let mut category_prompts = Map::new();
    let mut out_skills = Vec::with_capacity(skills.len());

    for (skill, prompt) in skills.iter().zip(prompts.iter().copied()) {
        let remainder = strip_global(prompt, global_prompt, global_end_marker);
        let (category, specific) = match remainder.find(SKILL_MARKER) {
            Some(at) => (&remainder[..at], &remainder[at + 1..]),
            None => ("", remainder),
        };

        if let Some(stage) = catalog::stage(skill) {
            if !category.is_empty() && !category_prompts.contains_key(stage) {
                debug!("Category prompt for stage {}", stage);
                category_prompts.insert(stage.to_string(), Value::String(category.to_string()));
            }
        }

        let mut record = skill.clone();
        if let Some(object) = record.as_object_mut() {
            object.insert(
                PROMPT_FIELD.to_string(),
                Value::String(specific.to_string()),
            );
        }
        out_skills.push(record);
    }

    info!(
        "Split {} skills into a global prompt and {} category prompts",
        out_skills.len(),
        category_prompts.len()
    );

    let mut root = Map::new();
    root.insert(
        GLOBAL_PROMPT_FIELD.to_string(),
        Value::String(global_prompt.to_string()),
    );
    root.insert(
        CATEGORY_PROMPTS_FIELD.to_string(),
        Value::Object(category_prompts),
    );
    root.insert(SKILLS_FIELD.to_string(), Value::Array(out_skills));
    Ok(Catalog::processed(Value::Object(root)))
}

/// Remove the shared prefix. Prompts that diverge from it are cut at the
/// end marker instead; prompts without the marker are kept whole.
fn strip_global<'a>(prompt: &'a str, global_prompt: &str, marker: &str) -> &'a str {
    if let Some(rest) = prompt.strip_prefix(global_prompt) {
        return rest;
    }
    match prompt.find(marker) {
        Some(at) => &prompt[at + marker.len()..],
        None => {
            warn!("Prompt does not contain the global end marker; kept whole");
            prompt
        }
    }
}
