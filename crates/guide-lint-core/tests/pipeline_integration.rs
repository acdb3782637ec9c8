//! Integration test: catalog, parser and analyzer without the built-in rules.
//!
//! A small catalog and a local evaluator stand in for the rules crate, so
//! these tests pin down what the core guarantees on its own.

use guide_lint_core::{
    Analyzer, Catalog, Category, Check, Config, DocType, Document, Evaluator, LintContext,
    RuleDef, Severity, Tier, Verdict, Violation, PARSE_ANOMALY,
};
use std::path::Path;

/// Flags fenced code blocks without a language tag.
struct UnlabeledFences;

impl Evaluator for UnlabeledFences {
    fn name(&self) -> &'static str {
        "unlabeled-fences"
    }

    fn evaluate(&self, ctx: &LintContext<'_>) -> Vec<Violation> {
        let Some(rule) = ctx.catalog.predicate(Check::CodeBlockLanguage) else {
            return Vec::new();
        };
        ctx.document
            .blocks
            .iter()
            .filter(|b| {
                matches!(&b.kind, guide_lint_core::BlockKind::CodeBlock { language, .. } if language.is_empty())
            })
            .map(|b| rule.violation(b.line_range, "", ""))
            .collect()
    }
}

fn catalog() -> Catalog {
    Catalog::load(
        "test-1",
        [
            RuleDef::phrase("forbidden-phrase-tier1-todo", Tier::IncompleteMarker, "TODO"),
            RuleDef::predicate(
                "code-block-language",
                Category::CodeBlock,
                Check::CodeBlockLanguage,
                "Code block has no language tag",
            ),
        ],
    )
    .expect("catalog should load")
}

fn analyzer() -> Analyzer {
    Analyzer::builder(catalog())
        .evaluator(UnlabeledFences)
        .build()
        .expect("analyzer should build")
}

const SAMPLE: &str = "\
# Sample

Intro paragraph.

| Key | Value |
|-----|-------|
| a   | 1     |

- [ ] first
- [x] second
  continued

```
unlabeled
```

##Broken heading

```rust
fn open() {
";

// ── Parser ──

#[test]
fn blocks_partition_every_line() {
    for text in [SAMPLE, "", "\n", "one line", "# H\n\n\n\ntext\n"] {
        let doc = Document::parse("docs/x_documentation.md", DocType::Documentation, text);
        let mut next = 1;
        for block in &doc.blocks {
            assert_eq!(block.line_range.start, next, "gap or overlap in {text:?}");
            next = block.line_range.end + 1;
        }
        if doc.line_count() > 0 {
            assert_eq!(next, doc.line_count() + 1, "trailing lines missed in {text:?}");
        }
    }
}

#[test]
fn malformed_input_becomes_anomalies() {
    let doc = Document::parse("docs/x_documentation.md", DocType::Documentation, SAMPLE);
    assert_eq!(doc.anomalies.len(), 2);
    assert!(doc.in_code_block(doc.line_count()));
}

// ── Analyzer ──

fn analyzer_with(config: Config) -> Analyzer {
    let catalog = config.apply(catalog()).expect("overrides");
    Analyzer::builder(catalog)
        .config(config)
        .evaluator(UnlabeledFences)
        .build()
        .expect("analyzer should build")
}

#[test]
fn fatal_dominates_the_verdict() {
    let text = "# Title\n\n```\nmake\n```\n";

    let fatal = analyzer().lint_source(Path::new("docs/x_documentation.md"), text);
    assert_eq!(fatal.verdict, Verdict::Draft);

    let config =
        Config::parse("[rules.code-block-language]\nseverity = \"warning\"\n").expect("config");
    let warning = analyzer_with(config).lint_source(Path::new("docs/x_documentation.md"), text);
    assert_eq!(warning.violations.len(), 1);
    assert_eq!(warning.verdict, Verdict::Complete);
}

#[test]
fn custom_evaluator_and_anomalies_are_reported() {
    let report = analyzer().lint_source(Path::new("docs/x_documentation.md"), SAMPLE);

    let ids: Vec<_> = report.violations.iter().map(|v| v.rule_id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["code-block-language", PARSE_ANOMALY, PARSE_ANOMALY]
    );
    assert!(report
        .violations
        .iter()
        .filter(|v| v.rule_id == PARSE_ANOMALY)
        .all(|v| v.severity == Severity::Warning));
    assert_eq!(report.counts.get(&Category::CodeBlock), Some(&1));
}

#[test]
fn same_input_gives_identical_reports() {
    let analyzer = analyzer();
    let first = analyzer.lint_source(Path::new("docs/x_documentation.md"), SAMPLE);
    let second = analyzer.lint_source(Path::new("docs/x_documentation.md"), SAMPLE);
    assert_eq!(first, second);
    assert_eq!(first.format(), second.format());
}

#[test]
fn disabled_rule_is_not_evaluated() {
    let config = Config::parse("[rules.code-block-language]\nenabled = false\n").expect("config");
    let report = analyzer_with(config).lint_source(Path::new("docs/x_documentation.md"), "```\nx\n```\n");
    assert!(report.violations.is_empty());
}
