//! Evaluator for plan phases.
//!
//! A plan walks through Phase I to Phase IX. Every phase heading must be
//! present even when the phase does not apply; it is then marked
//! "Not Applicable". Phase 0 is recognised but optional.
//!
//! Numerals may be roman (`Phase VII`), arabic (`Phase 7`) or words
//! (`Phase Seven`). The heading regex comes from the `plan-phase-missing`
//! catalog rule, the status regex from `plan-phase-status`.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use guide_lint_core::{
    Block, Category, Check, DocType, Document, Evaluator, LineRange, LintContext, Rule, Violation,
};

/// Evaluator name for plan phases.
pub const NAME: &str = "plan-phases";

/// Phases every plan must contain.
pub const REQUIRED_PHASES: RangeInclusive<u32> = 1..=9;

const ROMAN: [&str; 10] = ["0", "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX"];

const WORDS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// Checks phase headings and their status markers.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanPhases;

impl PlanPhases {
    /// Creates the evaluator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for PlanPhases {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires Phase I through Phase IX, each with a status"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::RequiredSection]
    }

    fn applies_to(&self, doc_type: DocType) -> bool {
        doc_type == DocType::Plan
    }

    fn evaluate(&self, ctx: &LintContext<'_>) -> Vec<Violation> {
        let Some(rule) = ctx.catalog.predicate(Check::PlanPhases) else {
            return Vec::new();
        };
        let Some(pattern) = rule.matcher.regex() else {
            return Vec::new();
        };
        let doc = ctx.document;

        // phase number -> block index of its first heading
        let mut phases: BTreeMap<u32, usize> = BTreeMap::new();
        for (idx, block) in doc.headings() {
            let number = block
                .heading_text()
                .and_then(|text| pattern.captures(text))
                .and_then(|caps| caps.get(1))
                .and_then(|m| phase_number(m.as_str()));
            if let Some(n) = number {
                phases.entry(n).or_insert(idx);
            }
        }

        let mut violations = Vec::new();

        for missing in REQUIRED_PHASES.filter(|n| !phases.contains_key(n)) {
            let line = phases
                .range(missing..)
                .next()
                .map_or(doc.full_range().end, |(_, &idx)| doc.blocks[idx].line_range.start);
            violations.push(rule.violation(LineRange::line(line), &roman(missing), ""));
        }

        if let Some(status) = ctx.catalog.predicate(Check::PlanPhaseStatus) {
            if let Some(status_pattern) = status.matcher.regex() {
                for &idx in phases.values() {
                    let span = &doc.blocks[idx..doc.section_end(idx)];
                    let has_status = span.iter().any(|b| {
                        b.is_checklist_item()
                            || (!b.is_code_block() && status_pattern.is_match(&b.content))
                    });
                    if !has_status {
                        violations.push(heading_violation(doc, &doc.blocks[idx], status));
                    }
                }
            }
        }

        violations
    }
}

fn heading_violation(doc: &Document, heading: &Block, rule: &Rule) -> Violation {
    let text = heading.heading_text().unwrap_or_default();
    rule.violation(heading.line_range, text, "")
        .with_excerpt(doc.line(heading.line_range.start).unwrap_or_default())
}

/// Parses a phase numeral: arabic, roman (`I`..`XXXIX`) or an English word.
fn phase_number(numeral: &str) -> Option<u32> {
    let lower = numeral.to_ascii_lowercase();
    if let Ok(n) = lower.parse::<u32>() {
        return Some(n);
    }
    if let Some(n) = WORDS.iter().position(|w| *w == lower) {
        return u32::try_from(n).ok();
    }
    roman_value(&lower)
}

fn roman_value(numeral: &str) -> Option<u32> {
    let values = numeral
        .chars()
        .map(|c| match c {
            'i' => Some(1),
            'v' => Some(5),
            'x' => Some(10),
            _ => None,
        })
        .collect::<Option<Vec<u32>>>()?;

    let mut total: i64 = 0;
    for (i, &v) in values.iter().enumerate() {
        if values.get(i + 1).is_some_and(|&next| next > v) {
            total -= i64::from(v);
        } else {
            total += i64::from(v);
        }
    }
    let total = u32::try_from(total).ok()?;
    // reject non-canonical spellings such as `IIII` or `VX`
    (to_roman(total) == numeral.to_ascii_uppercase()).then_some(total)
}

fn to_roman(mut n: u32) -> String {
    let mut out = String::new();
    for (value, symbol) in [(10, "X"), (9, "IX"), (5, "V"), (4, "IV"), (1, "I")] {
        while n >= value {
            out.push_str(symbol);
            n -= value;
        }
    }
    out
}

fn roman(n: u32) -> String {
    usize::try_from(n)
        .ok()
        .and_then(|i| ROMAN.get(i))
        .map_or_else(|| n.to_string(), |s| (*s).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::builtin_catalog;
    use guide_lint_core::{Config, Severity};

    fn check(text: &str) -> Vec<Violation> {
        let catalog = builtin_catalog().expect("catalog");
        let config = Config::default();
        let doc = Document::parse("plans/x_plan.md", DocType::Plan, text);
        let ctx = LintContext::new(&doc, &catalog, &config);
        PlanPhases::new().evaluate(&ctx)
    }

    fn plan(skip: Option<u32>) -> String {
        let mut text = String::from("# Rollout Plan\n\n");
        for n in REQUIRED_PHASES {
            if Some(n) == skip {
                continue;
            }
            text.push_str(&format!("## Phase {}: Step {n}\n\n- [ ] Do step {n}\n\n", roman(n)));
        }
        text
    }

    #[test]
    fn test_numerals() {
        assert_eq!(phase_number("VII"), Some(7));
        assert_eq!(phase_number("ix"), Some(9));
        assert_eq!(phase_number("4"), Some(4));
        assert_eq!(phase_number("Zero"), Some(0));
        assert_eq!(phase_number("IIII"), None);
        assert_eq!(phase_number("vx"), None);
    }

    #[test]
    fn test_complete_plan_passes() {
        assert!(check(&plan(None)).is_empty());
    }

    #[test]
    fn test_missing_phase_is_one_fatal() {
        let violations = check(&plan(Some(7)));
        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.rule_id, "plan-phase-missing");
        assert_eq!(v.severity, Severity::Fatal);
        assert_eq!(v.excerpt, "VII");
        assert!(v.message.contains("`Phase VII`"));
    }

    #[test]
    fn test_missing_phase_points_at_next_phase() {
        let text = plan(Some(3));
        let violations = check(&text);
        let line = text
            .lines()
            .position(|l| l.starts_with("## Phase IV"))
            .expect("phase IV")
            + 1;
        assert_eq!(violations[0].line_range.start, line);
    }

    #[test]
    fn test_mixed_numerals_and_optional_phase_zero() {
        let mut text = String::from("# Plan\n\n## Phase Zero: Discovery\n\nStatus: done\n\n");
        for (n, label) in ["1", "Two", "III", "4", "five", "VI", "7", "eight", "IX"]
            .iter()
            .enumerate()
        {
            text.push_str(&format!("## Phase {label}\n\nNot Applicable: step {n} is covered elsewhere.\n\n"));
        }
        assert!(check(&text).is_empty());
    }

    #[test]
    fn test_phase_without_status_is_warning() {
        let text = plan(None).replace("- [ ] Do step 5", "Deploy to staging.");
        let violations = check(&text);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_id, "plan-phase-status");
        assert_eq!(violations[0].severity, Severity::Warning);
        assert_eq!(violations[0].excerpt, "## Phase V: Step 5");
    }

    #[test]
    fn test_empty_plan_reports_all_nine() {
        assert_eq!(check("").len(), 9);
    }
}
