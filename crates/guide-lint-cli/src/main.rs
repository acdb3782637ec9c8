//! guide-lint CLI tool.
//!
//! Usage:
//! ```bash
//! guide-lint check [OPTIONS] [PATHS]...
//! guide-lint list-rules
//! guide-lint init
//! ```
//!
//! Exit codes: `0` every document is Complete, `1` at least one Draft,
//! `2` configuration or other failure.

use anyhow::Result;
use clap::{Parser, Subcommand};
use guide_lint_core::{ConfigError, DocType};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Compliance linter for markdown documentation and plans
#[derive(Parser)]
#[command(name = "guide-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint markdown files
    Check {
        /// Files or directories to lint (default: current directory)
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Treat every file as this document type
        #[arg(long)]
        doc_type: Option<DocType>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Only run specific evaluators (comma-separated)
        #[arg(long, value_delimiter = ',')]
        only: Option<Vec<String>>,
    },

    /// List the effective rule catalog
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `path:line: [SEVERITY] rule_id — message` lines and a summary.
    #[default]
    Text,
    /// JSON array of violation records.
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // stdout carries the report only
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            match err.downcast::<ConfigError>() {
                Ok(config_err) => eprintln!("{:?}", miette::Report::new(config_err)),
                Err(other) => eprintln!("Error: {other:#}"),
            }
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let source = config_resolver::resolve(std::path::Path::new("."), cli.config.as_deref());

    match cli.command {
        Commands::Check {
            paths,
            format,
            doc_type,
            exclude,
            only,
        } => commands::check::run(
            &commands::check::CheckOptions {
                paths,
                format,
                doc_type,
                exclude,
                only,
            },
            &source,
        ),
        Commands::ListRules => {
            commands::list_rules::run(&source)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init { force } => {
            commands::init::run(force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
