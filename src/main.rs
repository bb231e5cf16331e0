use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use skillprompts::cli;

#[derive(Parser)]
#[command(name = "skillprompts", version)]
#[command(about = "Rewrite studio agent skill prompts from curated templates", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ./skillprompts.toml or ~/.config/skillprompts/config.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate every skill's prompt in a catalog
    Rewrite {
        /// Catalog to read (default: from config)
        #[arg(short = 'i', long = "input")]
        input: Option<String>,

        /// Output file path; repeat to write several identical copies
        #[arg(short = 'o', long = "output")]
        output: Vec<String>,

        /// Resolve prompts but write nothing
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the prompt a single skill would get
    Resolve {
        /// Skill key, e.g. "planning.questionsPack5"
        skill_key: String,

        /// Stage (default: from config, usually "cross")
        #[arg(long)]
        stage: Option<String>,

        /// Also print which rule produced the prompt
        #[arg(long)]
        explain: bool,
    },

    /// Factor the shared preamble and stage overlays out of a rewritten catalog
    Split {
        /// Catalog to read (default: from config)
        #[arg(short = 'i', long = "input")]
        input: Option<String>,

        /// Output file path; repeat to write several identical copies
        #[arg(short = 'o', long = "output")]
        output: Vec<String>,

        /// Text that ends the global prompt (default: from config)
        #[arg(long)]
        marker: Option<String>,
    },

    /// Build a catalog from a Markdown skill book
    Import {
        /// Markdown file to parse
        markdown: String,

        /// Output file path; repeat to write several identical copies
        #[arg(short = 'o', long = "output")]
        output: Vec<String>,
    },

    /// Report missing, malformed or stale prompts
    Check {
        /// Catalog to read (default: from config)
        #[arg(short = 'i', long = "input")]
        input: Option<String>,
    },

    /// Validate the configuration file
    ConfigCheck,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Rewrite {
            input,
            output,
            dry_run,
        } => cli::rewrite::run(input, output, cli.config, dry_run)?,
        Commands::Resolve {
            skill_key,
            stage,
            explain,
        } => cli::resolve::run(&skill_key, stage, explain, cli.config)?,
        Commands::Split {
            input,
            output,
            marker,
        } => cli::split::run(input, output, marker, cli.config)?,
        Commands::Import { markdown, output } => cli::import::run(&markdown, output, cli.config)?,
        Commands::Check { input } => cli::check::run(input, cli.config)?,
        Commands::ConfigCheck => cli::config_check::run(cli.config)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_rewrite_defaults() {
        let cli = Cli::try_parse_from(["skillprompts", "rewrite"]).unwrap();
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
        match cli.command {
            Commands::Rewrite {
                input,
                output,
                dry_run,
            } => {
                assert!(input.is_none());
                assert!(output.is_empty());
                assert!(!dry_run);
            }
            _ => panic!("expected rewrite"),
        }
    }

    #[test]
    fn test_parse_rewrite_multiple_outputs() {
        let cli = Cli::try_parse_from([
            "skillprompts",
            "rewrite",
            "-i",
            "skills.json",
            "-o",
            "a.json",
            "--output",
            "b.json",
            "--dry-run",
            "--config",
            "custom.toml",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        match cli.command {
            Commands::Rewrite {
                input,
                output,
                dry_run,
            } => {
                assert_eq!(input.as_deref(), Some("skills.json"));
                assert_eq!(output, vec!["a.json", "b.json"]);
                assert!(dry_run);
            }
            _ => panic!("expected rewrite"),
        }
    }

    #[test]
    fn test_parse_resolve() {
        let cli = Cli::try_parse_from([
            "skillprompts",
            "resolve",
            "printing.questionsPack5",
            "--stage",
            "printing",
            "--explain",
        ])
        .unwrap();
        match cli.command {
            Commands::Resolve {
                skill_key,
                stage,
                explain,
            } => {
                assert_eq!(skill_key, "printing.questionsPack5");
                assert_eq!(stage.as_deref(), Some("printing"));
                assert!(explain);
            }
            _ => panic!("expected resolve"),
        }
    }

    #[test]
    fn test_parse_resolve_requires_key() {
        assert!(Cli::try_parse_from(["skillprompts", "resolve"]).is_err());
    }

    #[test]
    fn test_parse_split_and_import() {
        let cli = Cli::try_parse_from(["skillprompts", "split", "--marker", "END"]).unwrap();
        match cli.command {
            Commands::Split { marker, .. } => assert_eq!(marker.as_deref(), Some("END")),
            _ => panic!("expected split"),
        }

        let cli =
            Cli::try_parse_from(["skillprompts", "import", "book.md", "-o", "out.json"]).unwrap();
        match cli.command {
            Commands::Import { markdown, output } => {
                assert_eq!(markdown, "book.md");
                assert_eq!(output, vec!["out.json"]);
            }
            _ => panic!("expected import"),
        }
    }

    #[test]
    fn test_parse_check_and_config_check() {
        assert!(matches!(
            Cli::try_parse_from(["skillprompts", "check"]).unwrap().command,
            Commands::Check { input: None }
        ));
        assert!(matches!(
            Cli::try_parse_from(["skillprompts", "config-check"])
                .unwrap()
                .command,
            Commands::ConfigCheck
        ));
    }

    #[test]
    fn test_parse_missing_subcommand() {
        let result = Cli::try_parse_from(["skillprompts"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_unknown_subcommand() {
        let result = Cli::try_parse_from(["skillprompts", "foobar"]);
        assert!(result.is_err());
    }
}
