//! The built-in rule catalog.
//!
//! Rule definitions transcribe guideline version [`BUILTIN_VERSION`]. Phrase
//! rules are generated from the tier tables below, one rule per phrase, with
//! ids of the form `forbidden-phrase-tier<N>-<slug>`.

use guide_lint_core::catalog::loader::slug;
use guide_lint_core::{Catalog, CatalogError, Category, Check, Refinement, RuleDef, Severity, Tier};

/// Guideline version transcribed by the built-in catalog.
pub const BUILTIN_VERSION: &str = "2.3.0";

/// Id of the ellipsis phrase rule, whose phrase has no slug.
pub const ELLIPSIS_RULE: &str = "forbidden-phrase-tier3-ellipsis";

const TIER1_INCOMPLETE: &[&str] = &[
    "TODO",
    "TBD",
    "FIXME",
    "placeholder",
    "to be determined",
    "to be decided",
    "coming soon",
    "fill in later",
];

const TIER2_VAGUE_REFERENCE: &[&str] = &[
    "as needed",
    "as appropriate",
    "as necessary",
    "where applicable",
    "the usual",
    "the standard way",
    "similar to above",
    "see above",
];

const TIER3_VAGUE_QUANTIFIER: &[&str] = &[
    "etc.",
    "and so on",
    "and more",
    "various",
    "several",
    "a few",
    "a number of",
];

const TIER4_FALSE_SIMPLICITY: &[&str] = &[
    "simply",
    "just",
    "easy",
    "easily",
    "obviously",
    "clearly",
    "straightforward",
    "trivially",
    "of course",
];

const TIER5_AMBIGUOUS: &[&str] = &[
    "maybe",
    "perhaps",
    "might",
    "if possible",
    "where possible",
    "try to",
    "ideally",
    "should probably",
];

/// Heading text of a plan phase; group 1 is the numeral.
pub const PHASE_HEADING_PATTERN: &str = r"(?i)^phase\s+([0-9]+|[ivx]+|zero|one|two|three|four|five|six|seven|eight|nine)\b";

/// Text marking a phase as done, in progress, or not applicable.
pub const PHASE_STATUS_PATTERN: &str = r"(?i)\b(?:done|complete|completed|in[ -]progress|not applicable|n/a|status\s*:)|✅|🔄|⏳";

/// Trailing `Status:` marker line of a documentation file.
pub const STATUS_MARKER_PATTERN: &str = r"(?i)^\W*status\W*:";

/// Trailing `Last Updated:` marker line of a documentation file.
pub const LAST_UPDATED_MARKER_PATTERN: &str = r"(?i)^\W*last\s+updated\W*:";

/// Builds the built-in catalog.
///
/// # Errors
///
/// Only fails if the built-in table itself is inconsistent.
pub fn builtin_catalog() -> Result<Catalog, CatalogError> {
    Catalog::load(BUILTIN_VERSION, builtin_rule_defs())
}

/// Returns every built-in rule definition.
#[must_use]
pub fn builtin_rule_defs() -> Vec<RuleDef> {
    let mut defs = phrase_defs();
    defs.extend(structural_defs());
    defs
}

fn phrase_defs() -> Vec<RuleDef> {
    let tiers = [
        (Tier::IncompleteMarker, TIER1_INCOMPLETE),
        (Tier::VagueReference, TIER2_VAGUE_REFERENCE),
        (Tier::VagueQuantifier, TIER3_VAGUE_QUANTIFIER),
        (Tier::FalseSimplicity, TIER4_FALSE_SIMPLICITY),
        (Tier::AmbiguousInstruction, TIER5_AMBIGUOUS),
    ];

    let mut defs: Vec<RuleDef> = tiers
        .into_iter()
        .flat_map(|(tier, phrases)| {
            phrases.iter().map(move |phrase| {
                let id = format!("forbidden-phrase-tier{}-{}", tier.number(), slug(phrase));
                RuleDef::phrase(id, tier, *phrase)
            })
        })
        .collect();

    defs.push(
        RuleDef::phrase(ELLIPSIS_RULE, Tier::VagueQuantifier, "...")
            .refine(Refinement::TruncatedIdentifier),
    );
    defs
}

fn structural_defs() -> Vec<RuleDef> {
    vec![
        // Documentation
        RuleDef::predicate(
            "doc-title-h1",
            Category::RequiredSection,
            Check::DocumentationTitle,
            "Documentation has no H1 title",
        )
        .reference("Section 7.1"),
        RuleDef::pattern(
            "doc-status-marker",
            Category::RequiredSection,
            Check::DocumentationFooter,
            STATUS_MARKER_PATTERN,
            "Missing `Status:` marker line {detail}",
        )
        .reference("Section 7.1"),
        RuleDef::pattern(
            "doc-last-updated-marker",
            Category::RequiredSection,
            Check::DocumentationFooter,
            LAST_UPDATED_MARKER_PATTERN,
            "Missing `Last Updated:` marker line {detail}",
        )
        .reference("Section 7.1"),
        // All document types
        RuleDef::predicate(
            "heading-level-skip",
            Category::StructuralFormat,
            Check::HeadingHierarchy,
            "Heading `{match}` skips a level ({detail})",
        )
        .reference("Section 7.2"),
        // Plans
        RuleDef::pattern(
            "plan-phase-missing",
            Category::RequiredSection,
            Check::PlanPhases,
            PHASE_HEADING_PATTERN,
            "Plan is missing the `Phase {match}` heading",
        )
        .reference("Section 4"),
        RuleDef::pattern(
            "plan-phase-status",
            Category::RequiredSection,
            Check::PlanPhaseStatus,
            PHASE_STATUS_PATTERN,
            "`{match}` does not say whether it is done, in progress, or not applicable",
        )
        .severity(Severity::Warning)
        .reference("Section 4"),
        // Tables
        RuleDef::predicate(
            "table-header-only",
            Category::TableShape,
            Check::TableDataRows,
            "Table has a header but no data rows",
        )
        .reference("Section 3.2"),
        RuleDef::predicate(
            "table-empty-cell",
            Category::TableShape,
            Check::TableCells,
            "Table row has an empty cell in column {detail}; write `-` or `N/A` instead",
        )
        .reference("Section 3.2"),
        RuleDef::predicate(
            "table-column-mismatch",
            Category::TableShape,
            Check::TableColumns,
            "Table row has {detail}",
        )
        .severity(Severity::Warning)
        .reference("Section 3.2"),
        // Code blocks
        RuleDef::predicate(
            "code-block-language",
            Category::CodeBlock,
            Check::CodeBlockLanguage,
            "Code block has no language tag",
        )
        .reference("Section 13.2"),
        // Naming
        RuleDef::predicate(
            "file-naming",
            Category::Naming,
            Check::FileNaming,
            "File name `{match}` breaks the naming convention: {detail}",
        )
        .reference("Section 12"),
        // Quantitative minimums
        RuleDef::predicate(
            "objective-action-minimum",
            Category::QuantitativeMinimum,
            Check::ObjectiveActions,
            "Objective `{match}` has {detail}",
        )
        .severity(Severity::Warning)
        .reference("Section 10"),
        RuleDef::predicate(
            "verification-coverage",
            Category::QuantitativeMinimum,
            Check::VerificationCoverage,
            "Verification coverage is below the minimum: {detail}",
        )
        .severity(Severity::Warning)
        .reference("Section 11.5"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use guide_lint_core::{IO_UNREADABLE, PARSE_ANOMALY};

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = builtin_catalog().expect("built-in catalog must load");
        assert_eq!(catalog.version(), BUILTIN_VERSION);
        assert!(catalog.get(IO_UNREADABLE).is_some());
        assert!(catalog.get(PARSE_ANOMALY).is_some());
        assert!(catalog.get("forbidden-phrase-tier1-todo").is_some());
        assert!(catalog.get("forbidden-phrase-tier2-as-needed").is_some());
        assert!(catalog.get(ELLIPSIS_RULE).is_some());
    }

    #[test]
    fn test_every_tier_is_represented() {
        let catalog = builtin_catalog().expect("built-in catalog must load");
        for tier in Tier::ALL {
            assert!(
                catalog.iter().any(|r| r.tier() == Some(tier)),
                "no phrase for tier {}",
                tier.number()
            );
        }
    }

    #[test]
    fn test_only_auto_fail_rules_are_fatal() {
        let catalog = builtin_catalog().expect("built-in catalog must load");
        for id in [
            "plan-phase-status",
            "table-column-mismatch",
            "objective-action-minimum",
            "verification-coverage",
            PARSE_ANOMALY,
        ] {
            assert_eq!(catalog.get(id).map(|r| r.severity), Some(Severity::Warning), "{id}");
        }
        assert_eq!(
            catalog.get("plan-phase-missing").map(|r| r.severity),
            Some(Severity::Fatal)
        );
    }

    #[test]
    fn test_footer_check_has_two_rules() {
        let catalog = builtin_catalog().expect("built-in catalog must load");
        assert_eq!(catalog.rules_for(Check::DocumentationFooter).count(), 2);
    }

    #[test]
    fn test_phase_pattern_numerals() {
        let catalog = builtin_catalog().expect("built-in catalog must load");
        let pattern = catalog
            .predicate(Check::PlanPhases)
            .and_then(|r| r.matcher.regex())
            .expect("phase pattern");

        for heading in ["Phase VII: Observability", "phase 3 - Build", "Phase Zero", "PHASE ix"] {
            assert!(pattern.is_match(heading), "{heading}");
        }
        for heading in ["Phase Overview", "Phases", "Phase Constraints", "Rollout phase I"] {
            assert!(!pattern.is_match(heading), "{heading}");
        }
    }
}
