//! Evaluator for the quantitative quality targets of plans.
//!
//! # Objectives
//!
//! An objective is a heading whose section holds checklist items directly,
//! i.e. none of its sub-headings hold checklist items of their own. Each
//! objective needs [`QualityConfig::min_actions_per_objective`] items.
//!
//! # Verification coverage
//!
//! A checklist item is verified when the marker (`**Verification` by default)
//! appears in the item itself or in the few lines after it. The ratio of
//! verified items is checked once per document.
//!
//! The guidelines state these as target bands rather than auto-fail rules,
//! so every finding is reported as a warning whatever the catalog says.

use guide_lint_core::{
    Category, Check, DocType, Document, Evaluator, LineRange, LintContext, QualityConfig,
    Severity, Violation,
};

/// Evaluator name for quantitative minimums.
pub const NAME: &str = "quantitative";

/// Checks actions per objective and verification coverage.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quantitative;

impl Quantitative {
    /// Creates the evaluator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for Quantitative {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Checks actions per objective and verification coverage"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::QuantitativeMinimum]
    }

    fn applies_to(&self, doc_type: DocType) -> bool {
        doc_type == DocType::Plan
    }

    fn evaluate(&self, ctx: &LintContext<'_>) -> Vec<Violation> {
        let doc = ctx.document;
        let quality = &ctx.config.quality;
        let mut violations = Vec::new();

        if let Some(rule) = ctx.catalog.predicate(Check::ObjectiveActions) {
            for (idx, count) in objectives(doc) {
                if count < quality.min_actions_per_objective {
                    let heading = &doc.blocks[idx];
                    let detail = format!(
                        "{count} checklist items, minimum is {}",
                        quality.min_actions_per_objective
                    );
                    violations.push(
                        rule.violation(
                            heading.line_range,
                            heading.heading_text().unwrap_or_default(),
                            &detail,
                        )
                        .with_excerpt(&heading.content),
                    );
                }
            }
        }

        if let Some(rule) = ctx.catalog.predicate(Check::VerificationCoverage) {
            if let Some(detail) = coverage_shortfall(doc, quality) {
                violations.push(rule.violation(LineRange::line(1), "", &detail));
            }
        }

        for v in &mut violations {
            v.severity = Severity::Warning;
        }
        violations
    }
}

/// Block index of every objective heading with its checklist item count.
fn objectives(doc: &Document) -> Vec<(usize, usize)> {
    let checklist_count =
        |from: usize, to: usize| doc.blocks[from..to].iter().filter(|b| b.is_checklist_item()).count();

    doc.headings()
        .filter_map(|(idx, _)| {
            let end = doc.section_end(idx);
            let count = checklist_count(idx + 1, end);
            if count == 0 {
                return None;
            }
            let nested = doc
                .headings()
                .filter(|(sub, _)| *sub > idx && *sub < end)
                .any(|(sub, _)| checklist_count(sub + 1, doc.section_end(sub)) > 0);
            (!nested).then_some((idx, count))
        })
        .collect()
}

/// Describes the coverage shortfall, or `None` when the target is met or the
/// document has no checklist items.
fn coverage_shortfall(doc: &Document, quality: &QualityConfig) -> Option<String> {
    let items: Vec<_> = doc.blocks.iter().filter(|b| b.is_checklist_item()).collect();
    if items.is_empty() {
        return None;
    }

    let marker = quality.verification_marker.as_str();
    let verified = items
        .iter()
        .filter(|item| {
            item.content.contains(marker)
                || (1..=quality.verification_window).any(|offset| {
                    doc.line(item.line_range.end + offset)
                        .is_some_and(|line| line.contains(marker))
                })
        })
        .count();

    let ratio = to_f64(verified) / to_f64(items.len());
    if ratio >= quality.min_verification_ratio {
        return None;
    }

    Some(format!(
        "{verified} of {} checklist items carry `{marker}` ({:.0}%), minimum is {:.0}%",
        items.len(),
        ratio * 100.0,
        quality.min_verification_ratio * 100.0
    ))
}

#[allow(clippy::cast_precision_loss)]
fn to_f64(n: usize) -> f64 {
    n as f64
}
