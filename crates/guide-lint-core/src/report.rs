//! Report construction.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::document::DocType;
use crate::types::{Report, Verdict, Violation};

/// Collects violations for one document and builds its [`Report`].
///
/// The verdict is `Draft` iff at least one violation is fatal. Violations are
/// ordered by `(line_range.start, rule_id)` with a stable sort; nothing is
/// merged or dropped.
#[derive(Debug)]
pub struct ReportBuilder {
    path: PathBuf,
    doc_type: DocType,
    violations: Vec<Violation>,
}

impl ReportBuilder {
    /// Starts a report for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, doc_type: DocType) -> Self {
        Self {
            path: path.into(),
            doc_type,
            violations: Vec::new(),
        }
    }

    /// Adds one violation.
    #[must_use]
    pub fn violation(mut self, violation: Violation) -> Self {
        self.violations.push(violation);
        self
    }

    /// Adds many violations.
    #[must_use]
    pub fn violations(mut self, violations: impl IntoIterator<Item = Violation>) -> Self {
        self.violations.extend(violations);
        self
    }

    /// Builds the report.
    #[must_use]
    pub fn build(self) -> Report {
        let mut violations = self.violations;
        violations.sort_by(|a, b| {
            a.line_range
                .start
                .cmp(&b.line_range.start)
                .then_with(|| a.rule_id.cmp(&b.rule_id))
        });

        let verdict = if violations.iter().any(Violation::is_fatal) {
            Verdict::Draft
        } else {
            Verdict::Complete
        };

        let mut counts = BTreeMap::new();
        for v in &violations {
            *counts.entry(v.category).or_insert(0) += 1;
        }

        Report {
            document_path: self.path,
            doc_type: self.doc_type,
            verdict,
            violations,
            counts,
        }
    }
}
