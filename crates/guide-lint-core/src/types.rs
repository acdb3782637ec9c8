//! Core types for violations, reports and lint runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::document::DocType;
use crate::rule::Category;

/// Severity level for lint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory finding, never changes the verdict.
    #[serde(alias = "Warning")]
    Warning,
    /// Auto-fail finding, forces the document to `Draft`.
    #[serde(alias = "Fatal")]
    Fatal,
}

impl Severity {
    /// Upper-case label used in text output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Warning => "WARNING",
            Self::Fatal => "FATAL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Fatal => write!(f, "fatal"),
        }
    }
}

/// An inclusive, 1-based range of source lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineRange {
    /// First line (1-indexed).
    pub start: usize,
    /// Last line (1-indexed, inclusive).
    pub end: usize,
}

impl LineRange {
    /// Creates a range covering `start..=end`.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Creates a range covering a single line.
    #[must_use]
    pub fn line(line: usize) -> Self {
        Self::new(line, line)
    }

    /// Returns true if `line` falls inside this range.
    #[must_use]
    pub fn contains(&self, line: usize) -> bool {
        self.start <= line && line <= self.end
    }

    /// Number of lines covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always false; a range covers at least one line.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl std::fmt::Display for LineRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// A single finding produced by an evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Id of the catalog rule that produced this finding.
    pub rule_id: String,
    /// Category of that rule.
    pub category: Category,
    /// Effective severity.
    pub severity: Severity,
    /// Lines the finding refers to.
    pub line_range: LineRange,
    /// Offending text, trimmed to a single line.
    pub excerpt: String,
    /// Human-readable message.
    pub message: String,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        rule_id: impl Into<String>,
        category: Category,
        severity: Severity,
        line_range: LineRange,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            category,
            severity,
            line_range,
            excerpt: String::new(),
            message: message.into(),
        }
    }

    /// Attaches the offending text.
    #[must_use]
    pub fn with_excerpt(mut self, excerpt: impl AsRef<str>) -> Self {
        self.excerpt = excerpt
            .as_ref()
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        self
    }

    /// Returns true if this finding forces a `Draft` verdict.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: [{}] {} \u{2014} {}",
            self.line_range.start,
            self.severity.label(),
            self.rule_id,
            self.message
        )
    }
}

/// Outcome of linting one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// No fatal violation.
    Complete,
    /// At least one fatal violation.
    Draft,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Complete => write!(f, "complete"),
            Self::Draft => write!(f, "draft"),
        }
    }
}

/// Aggregate result for one document.
///
/// Only [`ReportBuilder`](crate::ReportBuilder) constructs reports, which keeps
/// `verdict`, ordering and `counts` consistent with `violations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Path of the linted document.
    pub document_path: PathBuf,
    /// Document type the rules were selected for.
    pub doc_type: DocType,
    /// Complete or Draft.
    pub verdict: Verdict,
    /// Findings ordered by `(line_range.start, rule_id)`.
    pub violations: Vec<Violation>,
    /// Number of violations per category.
    pub counts: BTreeMap<Category, usize>,
}

impl Report {
    /// Returns true if the verdict is `Draft`.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.verdict == Verdict::Draft
    }

    /// Returns violations filtered by severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .collect()
    }

    /// Counts `(fatal, warning)` violations.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize) {
        let fatal = self.violations.iter().filter(|v| v.is_fatal()).count();
        (fatal, self.violations.len() - fatal)
    }

    /// Formats the report as text lines, one per violation.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = String::new();
        for v in &self.violations {
            let _ = writeln!(output, "{}:{v}", self.document_path.display());
        }
        output
    }
}

/// Reports for every document linted in one invocation.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintRun {
    /// Per-document reports, ordered by path.
    pub reports: Vec<Report>,
}

impl LintRun {
    /// Creates a new empty run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents linted.
    #[must_use]
    pub fn files_checked(&self) -> usize {
        self.reports.len()
    }

    /// Returns true if any document ended as `Draft`.
    #[must_use]
    pub fn has_drafts(&self) -> bool {
        self.reports.iter().any(Report::is_draft)
    }

    /// Counts `(complete, draft)` documents.
    #[must_use]
    pub fn count_by_verdict(&self) -> (usize, usize) {
        let drafts = self.reports.iter().filter(|r| r.is_draft()).count();
        (self.reports.len() - drafts, drafts)
    }

    /// Counts `(fatal, warning)` violations across all reports.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize) {
        self.reports
            .iter()
            .map(Report::count_by_severity)
            .fold((0, 0), |(f, w), (rf, rw)| (f + rf, w + rw))
    }

    /// Returns the report for a given path, if linted.
    #[must_use]
    pub fn report_for(&self, path: &std::path::Path) -> Option<&Report> {
        self.reports.iter().find(|r| r.document_path == path)
    }
}
