//! # guide-lint-core
//!
//! Core framework for linting methodology markdown against a versioned
//! guideline catalog.
//!
//! This crate provides:
//!
//! - [`Document`], a line-accurate block model of a markdown file
//! - [`Catalog`], the immutable set of compiled [`Rule`]s for one run
//! - [`Evaluator`] trait for checkers that turn a document into violations
//! - [`Analyzer`] for discovering files and running evaluators in parallel
//! - [`Report`] and [`LintRun`] carrying the per-document verdicts
//!
//! ## Example
//!
//! ```ignore
//! use guide_lint_core::{Analyzer, Config};
//!
//! let config = Config::from_file("guide-lint.toml".as_ref())?;
//! let catalog = config.apply(guide_lint_rules::builtin_catalog()?)?;
//!
//! let analyzer = Analyzer::builder(catalog)
//!     .path("docs")
//!     .config(config)
//!     .evaluator(MyEvaluator)
//!     .build()?;
//!
//! let run = analyzer.analyze();
//! println!("{} drafts", run.count_by_verdict().1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
pub mod catalog;
mod config;
mod context;
mod document;
mod parser;
mod report;
mod rule;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use catalog::{Catalog, CatalogError, MatcherDef, RuleDef, IO_UNREADABLE, PARSE_ANOMALY};
pub use config::{AnalyzerConfig, Config, ConfigError, NamingConfig, QualityConfig, RuleConfig};
pub use context::{LintContext, Placement};
pub use document::{Block, BlockKind, Checkbox, DocType, Document, ParseAnomaly, Table, TableRow};
pub use report::ReportBuilder;
pub use rule::{
    Category, Check, Evaluator, EvaluatorBox, Matcher, Refinement, Rule, Tier,
    TRUNCATED_IDENTIFIER_MIN_RUN,
};
pub use types::{LineRange, LintRun, Report, Severity, Verdict, Violation};
