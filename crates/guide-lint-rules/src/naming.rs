//! Evaluator for file naming and placement.
//!
//! Under a documentation root a file is named `<topic>_documentation.md`,
//! `<topic>_guidelines.md` or `<topic>_skill.md`; under a plan root it is
//! `<topic>_plan.md`. Stems are lowercase snake case. Files outside any
//! registered root are left alone.
//!
//! Only the path is inspected, so this evaluator also runs for files that
//! could not be read.

use guide_lint_core::{Category, Check, Evaluator, LineRange, LintContext, Placement, Violation};

/// Evaluator name for naming.
pub const NAME: &str = "naming";

/// Checks the filename against the convention of its root.
#[derive(Debug, Clone, Copy, Default)]
pub struct Naming;

impl Naming {
    /// Creates the evaluator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for Naming {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Checks filename case and suffix against the placement convention"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Naming]
    }

    fn needs_content(&self) -> bool {
        false
    }

    fn evaluate(&self, ctx: &LintContext<'_>) -> Vec<Violation> {
        let Some(rule) = ctx.catalog.predicate(Check::FileNaming) else {
            return Vec::new();
        };

        let naming = &ctx.config.naming;
        let (root, suffixes) = match ctx.placement {
            Placement::DocumentationRoot => ("documentation", &naming.documentation_suffixes),
            Placement::PlanRoot => ("plan", &naming.plan_suffixes),
            Placement::Unplaced => return Vec::new(),
        };

        let path = ctx.path();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let failures = failed_conditions(&stem, root, suffixes);
        if failures.is_empty() {
            return Vec::new();
        }

        vec![rule.violation(LineRange::line(1), &file_name, &failures.join("; "))]
    }
}

fn failed_conditions(stem: &str, root: &str, suffixes: &[String]) -> Vec<String> {
    let mut failures = Vec::new();

    let snake = !stem.is_empty()
        && stem
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if !snake {
        failures.push("stem must use only lowercase letters, digits and underscores".to_string());
    }

    if !suffixes.iter().any(|s| stem.ends_with(s.as_str())) {
        let expected = suffixes
            .iter()
            .map(|s| format!("`{s}`"))
            .collect::<Vec<_>>()
            .join(", ");
        failures.push(format!("files under a {root} root must end with {expected}"));
    }

    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::builtin_catalog;
    use guide_lint_core::{Config, DocType, Document, Severity};

    fn check_with(path: &str, config: &Config) -> Vec<Violation> {
        let catalog = builtin_catalog().expect("catalog");
        let doc = Document::empty(path, DocType::Documentation);
        let ctx = LintContext::new(&doc, &catalog, config);
        Naming::new().evaluate(&ctx)
    }

    fn check(path: &str) -> Vec<Violation> {
        check_with(path, &Config::default())
    }

    #[test]
    fn test_conforming_names_pass() {
        assert!(check("docs/webapp_deployment_architecture_documentation.md").is_empty());
        assert!(check("docs/general_plan_crafting_guidelines.md").is_empty());
        assert!(check("docs/interview_skill.md").is_empty());
        assert!(check("plans/q3_migration_plan.md").is_empty());
    }

    #[test]
    fn test_bad_name_is_one_violation_listing_every_condition() {
        let violations = check("docs/WebApp-Deployment.md");
        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.rule_id, "file-naming");
        assert_eq!(v.severity, Severity::Fatal);
        assert_eq!(v.excerpt, "WebApp-Deployment.md");
        assert!(v.message.contains("lowercase"));
        assert!(v.message.contains("`_documentation`"));
    }

    #[test]
    fn test_suffix_must_match_root() {
        let violations = check("plans/rollout_documentation.md");
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("plan root"));
        assert!(!violations[0].message.contains("lowercase"));
    }

    #[test]
    fn test_unplaced_files_are_skipped() {
        assert!(check("README.md").is_empty());
        assert!(check("notes/Scratch-Pad.md").is_empty());
    }

    #[test]
    fn test_configurable_suffixes() {
        let config = Config::parse("[naming]\nplan_suffixes = [\"_plan\", \"_roadmap\"]\n")
            .expect("config");
        assert!(check_with("plans/q4_roadmap.md", &config).is_empty());
    }
}
