//! Prompt resolution for skill records.
//!
//! A `skillKey` and its stage are classified once into a [`Rule`], then the
//! matching template is composed with the studio preamble. Rules are tried in
//! fixed priority order:
//!
//! 1. curated exact-match prompts
//! 2. `.questionsPack5` question packs
//! 3. key-prefix families
//! 4. stage defaults
//! 5. the generic fallback, which always matches

pub mod family;
pub mod manual;
pub mod stage;
pub mod templates;

use std::fmt;
use std::str::FromStr;

use crate::config::PromptsConfig;

pub use family::Family;
pub use manual::ManualEntry;
pub use stage::Stage;
pub use templates::{PromptSpec, PREAMBLE, PREAMBLE_END_MARKER};

/// Suffix that marks a five-question pack skill.
pub const QUESTIONS_PACK_SUFFIX: &str = ".questionsPack5";

/// Stage used when a record has none.
pub const DEFAULT_STAGE: &str = "cross";

const GENERIC_SPEC: PromptSpec<'static> = PromptSpec {
    goal: "Execute this skill in a studio-real way while preserving traceability and safety gating.",
    when_use: "- Use when this specific skill is selected.",
    when_not: "- Do NOT output prose outside schema JSON.",
    process: "1) Interpret inputs carefully.\n2) Apply studio rules (non-destructive edits, printing/rentals/safety gates).\n3) Output only schema JSON.",
    quality: "- Strict schema compliance.\n- No hallucinated facts.",
};

/// Which rule produced a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Manual,
    QuestionPack,
    Family(Family),
    Stage(Stage),
    Generic,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Manual => write!(f, "manual"),
            Rule::QuestionPack => write!(f, "questions-pack"),
            Rule::Family(family) => write!(f, "family:{}", family),
            Rule::Stage(stage) => write!(f, "stage:{}", stage),
            Rule::Generic => write!(f, "generic"),
        }
    }
}

/// Pick the rule for a skill. Total: falls through to [`Rule::Generic`].
pub fn classify(skill_key: &str, stage: &str) -> Rule {
    if manual::lookup(skill_key).is_some() {
        return Rule::Manual;
    }
    if skill_key.ends_with(QUESTIONS_PACK_SUFFIX) {
        return Rule::QuestionPack;
    }
    if let Some(family) = Family::from_skill_key(skill_key) {
        return Rule::Family(family);
    }
    match Stage::from_str(stage) {
        Ok(stage) => Rule::Stage(stage),
        Err(_) => Rule::Generic,
    }
}

/// Resolve a prompt with the built-in preamble and fencing.
pub fn resolve(skill_key: &str, stage: &str) -> String {
    Resolver::default().resolve(skill_key, stage)
}

/// Composes prompts with a fixed preamble. Pure: the same inputs always
/// produce the same string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolver {
    preamble: String,
    fence: bool,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(PREAMBLE, true)
    }
}

impl Resolver {
    pub fn new(preamble: impl Into<String>, fence: bool) -> Self {
        Self {
            preamble: preamble.into(),
            fence,
        }
    }

    /// Build from the `[prompts]` config section. A custom preamble is
    /// appended to the built-in one unless the mode is `overwrite`.
    pub fn from_config(config: &PromptsConfig) -> Self {
        let preamble = match config.preamble_custom.as_deref().map(str::trim) {
            Some(custom) if !custom.is_empty() => {
                if config.is_overwrite() {
                    custom.to_string()
                } else {
                    format!("{}\n\n{}", PREAMBLE.trim(), custom)
                }
            }
            _ => PREAMBLE.to_string(),
        };
        Self::new(preamble, config.fence)
    }

    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    pub fn fence(&self) -> bool {
        self.fence
    }

    pub fn resolve(&self, skill_key: &str, stage: &str) -> String {
        self.explain(skill_key, stage).1
    }

    /// Resolve and report which rule matched.
    pub fn explain(&self, skill_key: &str, stage: &str) -> (Rule, String) {
        let stage = normalize_stage(stage);
        let rule = classify(skill_key, stage);
        let block = match rule {
            Rule::Manual => match manual::lookup(skill_key) {
                Some(ManualEntry::Skill(spec)) => templates::skill_block(skill_key, spec),
                Some(ManualEntry::QuestionPack { focus }) => {
                    templates::questions_pack_block(skill_key, focus)
                }
                None => templates::skill_block(skill_key, &GENERIC_SPEC),
            },
            Rule::QuestionPack => templates::questions_pack_block(
                skill_key,
                manual::questions_focus(skill_key).unwrap_or(templates::GENERIC_QUESTIONS_FOCUS),
            ),
            Rule::Family(family) => templates::skill_block(skill_key, &family.spec()),
            Rule::Stage(stage) => {
                let goal = stage.goal();
                templates::skill_block(skill_key, &stage.spec(&goal))
            }
            Rule::Generic => templates::skill_block(skill_key, &GENERIC_SPEC),
        };
        (rule, templates::compose(&self.preamble, &block, self.fence))
    }
}

fn normalize_stage(stage: &str) -> &str {
    let stage = stage.trim();
    if stage.is_empty() {
        DEFAULT_STAGE
    } else {
        stage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_priority_manual_beats_suffix() {
        assert_eq!(classify("planning.questionsPack5", "planning"), Rule::Manual);
        assert_eq!(
            classify("printing.questionsPack5", "printing"),
            Rule::QuestionPack
        );
    }

    #[test]
    fn test_classify_suffix_beats_family() {
        assert_eq!(classify("image.questionsPack5", "cross"), Rule::QuestionPack);
    }

    #[test]
    fn test_classify_family_beats_stage() {
        assert_eq!(
            classify("accounting.newThing", "printing"),
            Rule::Family(Family::Accounting)
        );
    }

    #[test]
    fn test_classify_stage_and_generic() {
        assert_eq!(
            classify("vendors.newThing", "printing"),
            Rule::Stage(Stage::Printing)
        );
        assert_eq!(classify("vendors.newThing", "cross"), Rule::Generic);
        assert_eq!(classify("vendors.newThing", ""), Rule::Generic);
    }

    #[test]
    fn test_rule_display() {
        assert_eq!(Rule::Manual.to_string(), "manual");
        assert_eq!(Rule::QuestionPack.to_string(), "questions-pack");
        assert_eq!(Rule::Family(Family::Image).to_string(), "family:image");
        assert_eq!(Rule::Stage(Stage::Retro).to_string(), "stage:retro");
        assert_eq!(Rule::Generic.to_string(), "generic");
    }

    #[test]
    fn test_empty_stage_normalizes_to_cross() {
        let resolver = Resolver::default();
        assert_eq!(
            resolver.resolve("misc.thing", ""),
            resolver.resolve("misc.thing", "cross")
        );
        assert_eq!(
            resolver.resolve("misc.thing", "   "),
            resolver.resolve("misc.thing", "cross")
        );
    }

    #[test]
    fn test_from_config_append_and_overwrite() {
        let mut config = PromptsConfig {
            preamble_custom: Some("STUDIO NOTE\n- Be brief.".to_string()),
            ..PromptsConfig::default()
        };
        let appended = Resolver::from_config(&config);
        assert!(appended.preamble().starts_with("You are Studio Agent"));
        assert!(appended.preamble().ends_with("- Be brief."));

        config.preamble_mode = Some("overwrite".to_string());
        let replaced = Resolver::from_config(&config);
        assert_eq!(replaced.preamble(), "STUDIO NOTE\n- Be brief.");

        config.preamble_custom = Some("   ".to_string());
        assert_eq!(Resolver::from_config(&config).preamble(), PREAMBLE);
    }

    #[test]
    fn test_from_config_fence_flag() {
        let config = PromptsConfig {
            fence: false,
            ..PromptsConfig::default()
        };
        let resolver = Resolver::from_config(&config);
        assert!(!resolver.fence());
        assert!(!resolver.resolve("misc.thing", "").starts_with("```"));
    }
}
