//! Core analyzer for orchestrating lint execution.

use crate::catalog::Catalog;
use crate::config::Config;
use crate::context::{LintContext, Placement};
use crate::document::{DocType, Document};
use crate::report::ReportBuilder;
use crate::rule::{Check, Evaluator, EvaluatorBox};
use crate::types::{LineRange, LintRun, Report, Violation};

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while configuring an analyzer.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Exclude pattern is not a valid glob.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),
}

/// Builder for configuring an [`Analyzer`].
pub struct AnalyzerBuilder {
    catalog: Catalog,
    paths: Vec<PathBuf>,
    evaluators: Vec<EvaluatorBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    doc_type: Option<DocType>,
}

impl AnalyzerBuilder {
    /// Creates a new builder around the catalog of this run.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            paths: Vec::new(),
            evaluators: Vec::new(),
            exclude_patterns: Vec::new(),
            config: None,
            doc_type: None,
        }
    }

    /// Adds a file or directory to lint.
    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Adds several files or directories to lint.
    #[must_use]
    pub fn paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Adds an evaluator.
    #[must_use]
    pub fn evaluator<E: Evaluator + 'static>(mut self, evaluator: E) -> Self {
        self.evaluators.push(Box::new(evaluator));
        self
    }

    /// Adds a boxed evaluator.
    #[must_use]
    pub fn evaluator_box(mut self, evaluator: EvaluatorBox) -> Self {
        self.evaluators.push(evaluator);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Forces a document type instead of inferring it per file.
    #[must_use]
    pub fn doc_type(mut self, doc_type: Option<DocType>) -> Self {
        self.doc_type = doc_type;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclude pattern is not a valid glob.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let excludes = self
            .exclude_patterns
            .iter()
            .chain(&config.analyzer.exclude)
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        let paths = if self.paths.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.paths
        };

        Ok(Analyzer {
            catalog: self.catalog,
            paths,
            evaluators: self.evaluators,
            excludes,
            config,
            doc_type: self.doc_type,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    catalog: Catalog,
    paths: Vec<PathBuf>,
    evaluators: Vec<EvaluatorBox>,
    excludes: Vec<glob::Pattern>,
    config: Config,
    doc_type: Option<DocType>,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder(catalog: Catalog) -> AnalyzerBuilder {
        AnalyzerBuilder::new(catalog)
    }

    /// Returns the catalog of this run.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the number of registered evaluators.
    #[must_use]
    pub fn evaluator_count(&self) -> usize {
        self.evaluators.len()
    }

    /// Lints every discovered file.
    ///
    /// Files are independent and processed in parallel; an unreadable file
    /// yields an `io-unreadable` report and does not stop the others.
    #[must_use]
    pub fn analyze(&self) -> LintRun {
        info!(
            "Starting lint of {:?} with catalog {} ({} rules)",
            self.paths,
            self.catalog.version(),
            self.catalog.len()
        );

        let files = self.discover_files();
        info!("Found {} files to lint", files.len());

        let reports: Vec<Report> = files.par_iter().map(|p| self.lint_file(p)).collect();
        let run = LintRun { reports };

        let (complete, draft) = run.count_by_verdict();
        info!("Lint complete: {complete} complete, {draft} draft");
        run
    }

    /// Reads and lints a single file.
    #[must_use]
    pub fn lint_file(&self, path: &Path) -> Report {
        debug!("Linting: {}", path.display());
        match std::fs::read_to_string(path) {
            Ok(text) => self.lint_source(path, text),
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                self.lint_unreadable(path, &e)
            }
        }
    }

    /// Lints already-loaded text as if it were the file at `path`.
    #[must_use]
    pub fn lint_source(&self, path: &Path, text: impl Into<String>) -> Report {
        let doc_type = self.resolve_doc_type(path);
        let document = Document::parse(path, doc_type, text);
        let ctx = LintContext::new(&document, &self.catalog, &self.config);

        let violations: Vec<Violation> = self
            .evaluators
            .par_iter()
            .filter(|e| e.applies_to(doc_type))
            .flat_map_iter(|e| {
                debug!("Running {} on {}", e.name(), path.display());
                e.evaluate(&ctx)
            })
            .collect();

        ReportBuilder::new(path, doc_type)
            .violations(violations)
            .violations(self.anomaly_violations(&document))
            .build()
    }

    fn lint_unreadable(&self, path: &Path, error: &std::io::Error) -> Report {
        let doc_type = self.resolve_doc_type(path);
        let document = Document::empty(path, doc_type);
        let ctx = LintContext::new(&document, &self.catalog, &self.config);

        let mut violations: Vec<Violation> = self
            .evaluators
            .iter()
            .filter(|e| !e.needs_content() && e.applies_to(doc_type))
            .flat_map(|e| e.evaluate(&ctx))
            .collect();

        if let Some(rule) = self.catalog.predicate(Check::IoUnreadable) {
            violations.push(rule.violation(LineRange::line(1), "", &error.to_string()));
        }

        ReportBuilder::new(path, doc_type)
            .violations(violations)
            .build()
    }

    fn anomaly_violations(&self, document: &Document) -> Vec<Violation> {
        let Some(rule) = self.catalog.predicate(Check::ParseAnomaly) else {
            return Vec::new();
        };
        document
            .anomalies
            .iter()
            .map(|a| {
                let excerpt = document.line(a.line_range.start).unwrap_or_default();
                rule.violation(a.line_range, excerpt.trim(), &a.message)
            })
            .collect()
    }

    fn resolve_doc_type(&self, path: &Path) -> DocType {
        Placement::detect(path, &self.config.naming).doc_type(path, self.doc_type)
    }

    /// Expands the configured paths into the sorted list of files to lint.
    ///
    /// Directories are walked for `*.md`; explicit file paths are kept even if
    /// they do not exist so the failure shows up in their report.
    fn discover_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for root in &self.paths {
            if !root.is_dir() {
                files.push(root.clone());
                continue;
            }

            let mut builder = ignore::WalkBuilder::new(root);
            builder.git_ignore(self.config.analyzer.respect_gitignore);

            for entry in builder.build() {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                        continue;
                    }
                };
                let path = entry.path();
                if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("md") {
                    continue;
                }
                if self.should_exclude(path) {
                    debug!("Excluding: {}", path.display());
                    continue;
                }
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        files.dedup();
        files
    }

    /// Checks if a path matches an exclude pattern.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.excludes.iter().any(|p| p.matches(&path_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RuleDef, IO_UNREADABLE, PARSE_ANOMALY};
    use crate::rule::{Category, Tier};
    use crate::types::{Severity, Verdict};
    use std::fs;
    use tempfile::TempDir;

    struct CountLines;

    impl Evaluator for CountLines {
        fn name(&self) -> &'static str {
            "count-lines"
        }

        fn evaluate(&self, ctx: &LintContext<'_>) -> Vec<Violation> {
            ctx.catalog
                .get("always")
                .map(|r| r.violation(ctx.document.full_range(), "x", "y"))
                .into_iter()
                .collect()
        }
    }

    fn catalog() -> Catalog {
        Catalog::load(
            "test",
            vec![RuleDef::phrase("always", Tier::IncompleteMarker, "always")
                .severity(Severity::Warning)],
        )
        .unwrap()
    }

    #[test]
    fn test_build_rejects_bad_glob() {
        let result = Analyzer::builder(catalog()).exclude("[").build();
        assert!(matches!(result, Err(AnalyzerError::Glob(_))));
    }

    #[test]
    fn test_exclude_patterns() {
        let analyzer = Analyzer::builder(catalog())
            .exclude("**/archive/**")
            .build()
            .unwrap();

        assert!(analyzer.should_exclude(Path::new("docs/archive/old_documentation.md")));
        assert!(analyzer.should_exclude(Path::new("web/node_modules/pkg/README.md")));
        assert!(!analyzer.should_exclude(Path::new("docs/api_documentation.md")));
    }

    #[test]
    fn test_discovers_markdown_recursively() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("docs/nested")).unwrap();
        fs::write(tmp.path().join("docs/a_documentation.md"), "# A\n").unwrap();
        fs::write(tmp.path().join("docs/nested/b_documentation.md"), "# B\n").unwrap();
        fs::write(tmp.path().join("docs/notes.txt"), "skip").unwrap();

        let analyzer = Analyzer::builder(catalog())
            .path(tmp.path())
            .build()
            .unwrap();
        let files = analyzer.discover_files();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().unwrap() == "md"));
    }

    #[test]
    fn test_unreadable_file_is_reported_not_fatal_to_run() {
        let tmp = TempDir::new().unwrap();
        let good = tmp.path().join("good_documentation.md");
        fs::write(&good, "# Good\n").unwrap();
        let missing = tmp.path().join("missing_documentation.md");

        let analyzer = Analyzer::builder(catalog())
            .path(&good)
            .path(&missing)
            .evaluator(CountLines)
            .build()
            .unwrap();
        let run = analyzer.analyze();

        assert_eq!(run.files_checked(), 2);
        let missing_report = run.report_for(&missing).unwrap();
        assert_eq!(missing_report.verdict, Verdict::Draft);
        assert_eq!(missing_report.violations.len(), 1);
        assert_eq!(missing_report.violations[0].rule_id, IO_UNREADABLE);

        let good_report = run.report_for(&good).unwrap();
        assert_eq!(good_report.verdict, Verdict::Complete);
        assert_eq!(good_report.violations.len(), 1);
    }

    #[test]
    fn test_anomalies_become_warnings() {
        let analyzer = Analyzer::builder(catalog()).build().unwrap();
        let report = analyzer.lint_source(Path::new("x_documentation.md"), "# T\n```\nopen\n");
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].rule_id, PARSE_ANOMALY);
        assert_eq!(report.violations[0].severity, Severity::Warning);
        assert_eq!(report.violations[0].category, Category::StructuralFormat);
        assert_eq!(report.violations[0].excerpt, "```");
        assert_eq!(report.verdict, Verdict::Complete);
    }

    #[test]
    fn test_explicit_doc_type_wins() {
        let analyzer = Analyzer::builder(catalog())
            .doc_type(Some(DocType::Plan))
            .build()
            .unwrap();
        let report = analyzer.lint_source(Path::new("notes_documentation.md"), "");
        assert_eq!(report.doc_type, DocType::Plan);
    }
}
