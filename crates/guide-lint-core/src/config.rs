//! Configuration types for guide-lint.
//!
//! No configuration file is required; every field has a default matching the
//! built-in guideline version.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::catalog::dto::PhraseDto;
use crate::catalog::{loader, Catalog, CatalogError};

/// Top-level configuration for guide-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// File discovery settings.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Naming and placement convention.
    #[serde(default)]
    pub naming: NamingConfig,

    /// Quantitative targets for plans.
    #[serde(default)]
    pub quality: QualityConfig,

    /// Per-rule overrides keyed by rule id.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,

    /// Additional forbidden phrases.
    #[serde(default)]
    pub phrases: Vec<PhraseDto>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Applies custom phrases and per-rule overrides to a base catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if a phrase is invalid, collides with an existing
    /// rule id, or an override names an unknown rule.
    pub fn apply(&self, base: Catalog) -> Result<Catalog, ConfigError> {
        let phrases = loader::phrase_defs(&self.phrases)?;
        Ok(base.extend(phrases)?.with_overrides(&self.rules)?)
    }
}

/// File discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Glob patterns to exclude from directory walks.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            exclude: vec!["**/node_modules/**".to_string(), "**/target/**".to_string()],
            respect_gitignore: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Naming and placement convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Directory names that mark a documentation root.
    pub documentation_roots: Vec<String>,
    /// Directory names that mark a plan root.
    pub plan_roots: Vec<String>,
    /// Filename suffixes accepted under a documentation root.
    pub documentation_suffixes: Vec<String>,
    /// Filename suffixes accepted under a plan root.
    pub plan_suffixes: Vec<String>,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            documentation_roots: vec!["docs".to_string(), "documentation".to_string()],
            plan_roots: vec!["plans".to_string(), "plan".to_string()],
            documentation_suffixes: vec![
                "_documentation".to_string(),
                "_guidelines".to_string(),
                "_skill".to_string(),
            ],
            plan_suffixes: vec!["_plan".to_string()],
        }
    }
}

/// Quantitative targets for plan documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Minimum checklist items per objective.
    pub min_actions_per_objective: usize,
    /// Minimum fraction of checklist items carrying a verification marker.
    pub min_verification_ratio: f64,
    /// Literal marker identifying a verification step.
    pub verification_marker: String,
    /// Lines after a checklist item searched for the marker.
    pub verification_window: usize,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            min_actions_per_objective: 5,
            min_verification_ratio: 0.5,
            verification_marker: "**Verification".to_string(),
            verification_window: 3,
        }
    }
}

/// Per-rule override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<crate::Severity>,
}

/// Configuration errors. Each one aborts the run before any file is linted.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(guide_lint::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    #[diagnostic(
        code(guide_lint::config::parse),
        help("overrides use `[rules.<id>]` with `enabled` and `severity = \"fatal\" | \"warning\"`")
    )]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// The rule catalog could not be built.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Catalog(#[from] CatalogError),
}
