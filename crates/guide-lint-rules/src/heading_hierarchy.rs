//! Evaluator for heading hierarchy.
//!
//! Headings nest one level at a time: an `###` directly under a `#` skips a
//! level. The first heading only sets the baseline, so a document may start
//! at any level.

use guide_lint_core::{Category, Check, Evaluator, LintContext, Violation};

/// Evaluator name for heading hierarchy.
pub const NAME: &str = "heading-hierarchy";

/// Reports headings deeper than the previous heading plus one.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingHierarchy;

impl HeadingHierarchy {
    /// Creates the evaluator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for HeadingHierarchy {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Reports headings that skip a level"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::StructuralFormat]
    }

    fn evaluate(&self, ctx: &LintContext<'_>) -> Vec<Violation> {
        let Some(rule) = ctx.catalog.predicate(Check::HeadingHierarchy) else {
            return Vec::new();
        };

        let mut violations = Vec::new();
        let mut previous: Option<u8> = None;

        for (_, block) in ctx.document.headings() {
            let Some(level) = block.heading_level() else {
                continue;
            };
            if let Some(prev) = previous {
                if level > prev + 1 {
                    let detail = format!("H{prev} is followed by H{level}");
                    violations.push(
                        rule.violation(block.line_range, block.heading_text().unwrap_or_default(), &detail)
                            .with_excerpt(&block.content),
                    );
                }
            }
            previous = Some(level);
        }
        violations
    }
}
