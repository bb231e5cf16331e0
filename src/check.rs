use serde_json::Value;
use std::collections::BTreeMap;

use crate::catalog::{self, Catalog, PROMPT_FIELD};
use crate::resolver::Resolver;

#[derive(Debug, Clone)]
pub struct CheckIssue {
    pub severity: Severity,
    pub category: String,
    pub skill_key: Option<String>,
    pub message: String,
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Compares stored prompts against what a rewrite would produce.
pub struct CatalogChecker {
    resolver: Resolver,
    default_stage: String,
}

impl CatalogChecker {
    pub fn new(resolver: Resolver, default_stage: impl Into<String>) -> Self {
        Self {
            resolver,
            default_stage: default_stage.into(),
        }
    }

    pub fn check(&self, catalog: &Catalog) -> Vec<CheckIssue> {
        if catalog.is_processed() {
            return vec![CheckIssue {
                severity: Severity::Info,
                category: "catalog".to_string(),
                skill_key: None,
                message: "Catalog is already split; prompts are not checked".to_string(),
                suggestion: None,
            }];
        }

        let mut issues = Vec::new();
        let mut rule_counts: BTreeMap<String, usize> = BTreeMap::new();

        for skill in catalog.skills() {
            let Some(key) = catalog::skill_key(skill) else {
                continue;
            };
            let stage = catalog::stage(skill).unwrap_or(self.default_stage.as_str());
            let (rule, expected) = self.resolver.explain(key, stage);
            *rule_counts.entry(rule.to_string()).or_default() += 1;

            issues.extend(self.check_prompt(key, skill.get(PROMPT_FIELD), &expected));
        }

        if !rule_counts.is_empty() {
            let summary = rule_counts
                .iter()
                .map(|(rule, count)| format!("{}={}", rule, count))
                .collect::<Vec<_>>()
                .join(", ");
            issues.push(CheckIssue {
                severity: Severity::Info,
                category: "rules".to_string(),
                skill_key: None,
                message: format!("Resolution rules: {}", summary),
                suggestion: None,
            });
        }

        issues
    }

    fn check_prompt(&self, key: &str, prompt: Option<&Value>, expected: &str) -> Vec<CheckIssue> {
        let issue = |severity, category: &str, message: String, suggestion: Option<&str>| {
            CheckIssue {
                severity,
                category: category.to_string(),
                skill_key: Some(key.to_string()),
                message,
                suggestion: suggestion.map(str::to_string),
            }
        };

        let prompt = match prompt {
            None | Some(Value::Null) => {
                return vec![issue(
                    Severity::Error,
                    "prompt",
                    "Missing prompt".to_string(),
                    Some("Run `skillprompts rewrite`"),
                )]
            }
            Some(Value::String(text)) => text,
            Some(_) => {
                return vec![issue(
                    Severity::Error,
                    "prompt",
                    "Prompt is not a string".to_string(),
                    Some("Run `skillprompts rewrite`"),
                )]
            }
        };

        if prompt.trim().is_empty() {
            return vec![issue(
                Severity::Error,
                "prompt",
                "Empty prompt".to_string(),
                Some("Run `skillprompts rewrite`"),
            )];
        }

        let mut issues = Vec::new();

        // Double-encoded line breaks show up as a literal backslash-n.
        if !prompt.contains('\n') && prompt.contains("\\n") {
            issues.push(issue(
                Severity::Warning,
                "encoding",
                "Prompt contains escaped \\n sequences instead of line breaks".to_string(),
                Some("Check the tool that last wrote this catalog"),
            ));
        }

        if prompt != expected {
            issues.push(issue(
                Severity::Warning,
                "stale",
                "Prompt differs from the resolved template".to_string(),
                Some("Run `skillprompts rewrite` to regenerate"),
            ));
        }

        issues
    }

    pub fn print_issues(&self, issues: &[CheckIssue]) {
        let problems = issues
            .iter()
            .filter(|i| i.severity != Severity::Info)
            .count();
        if problems == 0 {
            println!("✅ All prompts are up to date!");
        } else {
            println!("\n📋 Skill catalog check:\n");
        }

        let errors: Vec<_> = issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .collect();
        let warnings: Vec<_> = issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .collect();
        let infos: Vec<_> = issues
            .iter()
            .filter(|i| i.severity == Severity::Info)
            .collect();

        print_group("❌ Errors", &errors);
        print_group("⚠️  Warnings", &warnings);
        print_group("ℹ️  Info", &infos);

        println!(
            "Summary: {} errors, {} warnings, {} info",
            errors.len(),
            warnings.len(),
            infos.len()
        );
    }
}

fn print_group(title: &str, issues: &[&CheckIssue]) {
    if issues.is_empty() {
        return;
    }
    println!("{} ({}):", title, issues.len());
    for issue in issues {
        match &issue.skill_key {
            Some(key) => println!("   • [{}] {}: {}", issue.category, key, issue.message),
            None => println!("   • [{}] {}", issue.category, issue.message),
        }
        if let Some(suggestion) = &issue.suggestion {
            println!("     💡 {}", suggestion);
        }
    }
    println!();
}
