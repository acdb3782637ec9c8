//! List rules command implementation.

use anyhow::Result;
use guide_lint_core::Catalog;
use guide_lint_rules::all_evaluators;
use std::fmt::Write;

use super::check::{effective_catalog, load_config};
use crate::config_resolver::ConfigSource;

/// Runs the list-rules command.
pub fn run(source: &ConfigSource) -> Result<()> {
    let config = load_config(source)?;
    let catalog = effective_catalog(&config)?;
    print!("{}", render(&catalog));
    Ok(())
}

/// Renders the catalog table and the evaluator list.
pub fn render(catalog: &Catalog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Rule catalog {} ({} rules):\n", catalog.version(), catalog.len());
    let _ = writeln!(
        out,
        "{:<48} {:<22} {:<9} Reference",
        "Id", "Category", "Severity"
    );
    let _ = writeln!(out, "{}", "-".repeat(96));

    for rule in catalog.iter() {
        let _ = writeln!(
            out,
            "{:<48} {:<22} {:<9} {}",
            rule.id,
            rule.category.to_string(),
            rule.severity.to_string(),
            rule.reference.as_deref().unwrap_or("-")
        );
    }

    let _ = writeln!(out, "\nEvaluators:");
    for evaluator in all_evaluators() {
        let _ = writeln!(out, "  {:<24} {}", evaluator.name(), evaluator.description());
    }

    let _ = writeln!(out, "\nUse --only to run specific evaluators, e.g.:");
    let _ = writeln!(out, "  guide-lint check --only forbidden-phrases,table-shape");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use guide_lint_core::Config;
    use guide_lint_rules::BUILTIN_VERSION;

    #[test]
    fn lists_every_rule_and_evaluator() {
        let catalog = effective_catalog(&Config::default()).expect("catalog");
        let text = render(&catalog);

        assert!(text.starts_with(&format!("Rule catalog {BUILTIN_VERSION}")));
        for rule in catalog.iter() {
            assert!(text.contains(&rule.id), "missing {}", rule.id);
        }
        assert!(text.contains("plan-phases"));
        assert!(text.contains("quantitative"));
    }

    #[test]
    fn disabled_rules_are_not_listed() {
        let config = Config::parse("[rules.code-block-language]\nenabled = false\n")
            .expect("config");
        let catalog = effective_catalog(&config).expect("catalog");
        assert!(!render(&catalog).contains("code-block-language"));
    }
}
