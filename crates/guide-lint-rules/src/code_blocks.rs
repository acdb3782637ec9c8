//! Evaluator for fenced code block completeness.

use guide_lint_core::{BlockKind, Category, Check, Evaluator, LineRange, LintContext, Violation};

/// Evaluator name for code blocks.
pub const NAME: &str = "code-blocks";

/// Reports code fences without a language tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeBlocks;

impl CodeBlocks {
    /// Creates the evaluator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for CodeBlocks {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires a language tag on every fenced code block"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::CodeBlock]
    }

    fn evaluate(&self, ctx: &LintContext<'_>) -> Vec<Violation> {
        let Some(rule) = ctx.catalog.predicate(Check::CodeBlockLanguage) else {
            return Vec::new();
        };

        ctx.document
            .blocks
            .iter()
            .filter(|b| matches!(&b.kind, BlockKind::CodeBlock { language, .. } if language.is_empty()))
            .map(|b| {
                let fence = LineRange::line(b.line_range.start);
                rule.violation(fence, &b.content, "")
            })
            .collect()
    }
}
