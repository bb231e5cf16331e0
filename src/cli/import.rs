use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::import::SkillBookParser;

/// Convert a Markdown skill book into a catalog array.
pub fn run(markdown: &str, outputs: Vec<String>, config_path: Option<String>) -> Result<()> {
    let file = Path::new(markdown);
    if !file.exists() {
        bail!("File not found: {}", markdown);
    }
    if !file.is_file() {
        bail!("Path is not a file: {}", markdown);
    }

    let config = Config::load_with_path(config_path)?;
    let outputs = super::output_paths(outputs, &config.catalog.outputs, &config.catalog.input);

    let content = fs::read_to_string(file)?;
    let parser = SkillBookParser::new()?;
    let skills = parser.parse(&content);
    if skills.is_empty() {
        bail!("No skills found in {}", markdown);
    }
    info!("Parsed {} skills from {}", skills.len(), markdown);

    let value = serde_json::to_value(&skills)?;
    let catalog = Catalog::from_value(value, &config.catalog)
        .context("Imported skills do not form a valid catalog")?;
    catalog.save(&outputs).context("Failed to save catalog")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_file_not_found() {
        let result = run("/tmp/nonexistent-skill-book-xyz.md", vec![], None);
        assert!(result.unwrap_err().to_string().contains("File not found"));
    }

    #[test]
    fn test_run_path_is_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = run(dir.path().to_str().unwrap(), vec![], None);
        assert!(result.unwrap_err().to_string().contains("not a file"));
    }

    #[test]
    fn test_run_no_skills() {
        let dir = tempfile::TempDir::new().unwrap();
        let book = dir.path().join("book.md");
        fs::write(&book, "# Nothing here\n\n## Appendix\ntext\n").unwrap();
        let out = dir.path().join("out.json");
        let result = run(
            book.to_str().unwrap(),
            vec![out.to_str().unwrap().to_string()],
            None,
        );
        assert!(result.unwrap_err().to_string().contains("No skills found"));
        assert!(!out.exists());
    }

    #[test]
    fn test_run_writes_catalog() {
        let dir = tempfile::TempDir::new().unwrap();
        let book = dir.path().join("book.md");
        fs::write(
            &book,
            "## retro.lessonsLearned — Lessons\n- **Stage:** retro\n\n### Prompt\nSummarize.\n",
        )
        .unwrap();
        let out = dir.path().join("out.json");
        run(
            book.to_str().unwrap(),
            vec![out.to_str().unwrap().to_string()],
            None,
        )
        .unwrap();

        let root: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(root[0]["skillKey"], "retro.lessonsLearned");
        assert_eq!(root[0]["stage"], "retro");
        assert_eq!(root[0]["prompt"], "Summarize.");
    }
}
