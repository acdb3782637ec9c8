//! Evaluator for the required parts of a documentation file.
//!
//! A documentation file carries an H1 title and ends with its marker lines,
//! `Status:` and `Last Updated:`, within the last [`FOOTER_WINDOW`] lines.
//! Each marker is its own catalog rule; the marker regex comes from the rule.

use guide_lint_core::{Category, Check, DocType, Evaluator, LineRange, LintContext, Violation};

/// Evaluator name for documentation sections.
pub const NAME: &str = "documentation-sections";

/// Number of trailing lines searched for footer markers.
pub const FOOTER_WINDOW: usize = 15;

/// Checks the title and footer markers of documentation files.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentationSections;

impl DocumentationSections {
    /// Creates the evaluator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for DocumentationSections {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires an H1 title and trailing Status/Last Updated markers"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::RequiredSection]
    }

    fn applies_to(&self, doc_type: DocType) -> bool {
        doc_type == DocType::Documentation
    }

    fn evaluate(&self, ctx: &LintContext<'_>) -> Vec<Violation> {
        let doc = ctx.document;
        let mut violations = Vec::new();

        if let Some(rule) = ctx.catalog.predicate(Check::DocumentationTitle) {
            let has_title = doc.headings().any(|(_, b)| b.heading_level() == Some(1));
            if !has_title {
                let first = doc.line(1).unwrap_or_default();
                violations.push(rule.violation(LineRange::line(1), first, ""));
            }
        }

        let lines: Vec<&str> = doc.raw_text.lines().collect();
        let tail = &lines[lines.len().saturating_sub(FOOTER_WINDOW)..];
        let last_line = LineRange::line(lines.len().max(1));
        let detail = format!("in the last {FOOTER_WINDOW} lines");

        for rule in ctx.catalog.rules_for(Check::DocumentationFooter) {
            let Some(pattern) = rule.matcher.regex() else {
                continue;
            };
            if !tail.iter().any(|line| pattern.is_match(line)) {
                violations.push(rule.violation(last_line, "", &detail));
            }
        }

        violations
    }
}
