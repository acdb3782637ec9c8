//! Evaluator for tiered forbidden phrases.
//!
//! # Rationale
//!
//! A methodology document is meant to be executed without follow-up
//! questions. Incomplete markers, vague references, vague quantifiers, false
//! simplicity and ambiguous instructions all leave the reader guessing.
//!
//! # Exemptions
//!
//! - Matches inside fenced code blocks or inline code spans are ignored for
//!   tiers 2-5. Tier 1 markers (`TODO`, `TBD`) are reported everywhere.
//! - A rule may carry a [`Refinement`] that drops matches it recognises, such
//!   as an ellipsis truncating a long identifier.

use std::ops::Range;

use guide_lint_core::{
    Category, Document, Evaluator, LineRange, LintContext, Matcher, Refinement, Rule, Violation,
};
use tracing::trace;

/// Evaluator name for forbidden phrases.
pub const NAME: &str = "forbidden-phrases";

/// Reports every catalog phrase found in the document text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForbiddenPhrases;

impl ForbiddenPhrases {
    /// Creates the evaluator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for ForbiddenPhrases {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Reports tiered forbidden words and phrases"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::ForbiddenPhrase]
    }

    fn evaluate(&self, ctx: &LintContext<'_>) -> Vec<Violation> {
        let doc = ctx.document;
        ctx.catalog
            .by_category(Category::ForbiddenPhrase)
            .flat_map(|rule| scan(doc, rule))
            .collect()
    }
}

fn scan(doc: &Document, rule: &Rule) -> Vec<Violation> {
    let Matcher::Phrase {
        pattern,
        tier,
        refinement,
        ..
    } = &rule.matcher
    else {
        return Vec::new();
    };

    let text = doc.raw_text.as_str();
    let mut violations = Vec::new();

    for m in pattern.find_iter(text) {
        let line = doc.line_of_offset(m.start());

        if !tier.applies_in_code()
            && (doc.in_code_block(line) || in_inline_code(doc, line, m.start()))
        {
            continue;
        }
        if refinement.is_some_and(|r: Refinement| r.suppresses(text, m.start(), m.end())) {
            trace!("{} suppressed at line {line}", rule.id);
            continue;
        }

        let end_line = doc.line_of_offset(m.end().saturating_sub(1));
        violations.push(
            rule.violation(LineRange::new(line, end_line), m.as_str(), "")
                .with_excerpt(doc.line(line).unwrap_or_default()),
        );
    }
    violations
}

/// Returns true if the byte `offset` (on `line`) sits inside a `` `code` `` span.
fn in_inline_code(doc: &Document, line: usize, offset: usize) -> bool {
    let Some(text) = doc.line(line) else {
        return false;
    };
    let column = offset - doc.offset_of_line(line);
    code_spans(text).iter().any(|span| span.contains(&column))
}

/// Byte ranges of inline code spans in one line, delimiters included.
///
/// A span opens with a run of backticks and closes at the next run of the
/// same length; an unmatched run is literal text.
fn code_spans(line: &str) -> Vec<Range<usize>> {
    let bytes = line.as_bytes();
    let run_at = |i: usize| bytes[i..].iter().take_while(|&&b| b == b'`').count();

    let mut spans = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'`' {
            i += 1;
            continue;
        }
        let open = run_at(i);
        let mut j = i + open;
        let mut close = None;
        while j < bytes.len() {
            if bytes[j] == b'`' {
                let run = run_at(j);
                if run == open {
                    close = Some(j + run);
                    break;
                }
                j += run;
            } else {
                j += 1;
            }
        }
        match close {
            Some(end) => {
                spans.push(i..end);
                i = end;
            }
            None => i += open,
        }
    }
    spans
}
