//! Check command implementation.

use anyhow::{Context, Result};
use guide_lint_core::{Analyzer, Catalog, Config, ConfigError, DocType, LintRun};
use guide_lint_rules::{all_evaluators, builtin_catalog, evaluators_by_name};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Exit status when every document is Complete.
pub const EXIT_COMPLETE: u8 = 0;
/// Exit status when at least one document is Draft.
pub const EXIT_DRAFT: u8 = 1;

/// Options of `guide-lint check`.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Files or directories to lint.
    pub paths: Vec<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// Forced document type.
    pub doc_type: Option<DocType>,
    /// Extra exclude globs.
    pub exclude: Vec<String>,
    /// Evaluator names to run instead of all of them.
    pub only: Option<Vec<String>>,
}

/// Runs the check command.
pub fn run(options: &CheckOptions, source: &ConfigSource) -> Result<ExitCode> {
    let config = load_config(source)?;
    let run = lint(options, config)?;

    super::output::print(&run, options.format)?;

    Ok(ExitCode::from(exit_status(&run)))
}

/// Loads the resolved configuration, or defaults when none was found.
pub fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    }
    Ok(Config::from_file(path)?)
}

/// Builds the built-in catalog with the configuration's overrides applied.
pub fn effective_catalog(config: &Config) -> Result<Catalog, ConfigError> {
    config.apply(builtin_catalog()?)
}

/// Lints every requested path.
pub fn lint(options: &CheckOptions, config: Config) -> Result<LintRun> {
    let catalog = effective_catalog(&config)?;

    let evaluators = match &options.only {
        Some(names) => evaluators_by_name(names.as_slice())?,
        None => all_evaluators(),
    };

    let mut builder = Analyzer::builder(catalog)
        .paths(options.paths.iter().cloned())
        .doc_type(options.doc_type)
        .config(config);

    for pattern in &options.exclude {
        builder = builder.exclude(pattern.clone());
    }
    for evaluator in evaluators {
        builder = builder.evaluator_box(evaluator);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Linting {:?} with {} evaluators and {} rules",
        options.paths,
        analyzer.evaluator_count(),
        analyzer.catalog().len()
    );

    Ok(analyzer.analyze())
}

/// Maps a run to its exit status.
#[must_use]
pub fn exit_status(run: &LintRun) -> u8 {
    if run.has_drafts() {
        EXIT_DRAFT
    } else {
        EXIT_COMPLETE
    }
}
