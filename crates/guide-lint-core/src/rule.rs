//! Rule definitions and the evaluator trait.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::context::LintContext;
use crate::document::DocType;
use crate::types::{LineRange, Severity, Violation};

/// Rule category. Each evaluator owns one or more categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Tiered forbidden words and phrases.
    ForbiddenPhrase,
    /// Mandatory headings and marker lines.
    RequiredSection,
    /// Table rows and cells.
    TableShape,
    /// File naming and placement.
    Naming,
    /// Fenced code block completeness.
    CodeBlock,
    /// Numeric quality targets.
    QuantitativeMinimum,
    /// Heading hierarchy and general well-formedness.
    StructuralFormat,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::ForbiddenPhrase => "forbidden-phrase",
            Self::RequiredSection => "required-section",
            Self::TableShape => "table-shape",
            Self::Naming => "naming",
            Self::CodeBlock => "code-block",
            Self::QuantitativeMinimum => "quantitative-minimum",
            Self::StructuralFormat => "structural-format",
        };
        f.write_str(s)
    }
}

/// Forbidden-phrase tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Tier 1: incomplete markers (`TODO`, `TBD`).
    IncompleteMarker,
    /// Tier 2: vague references (`as needed`, `the usual`).
    VagueReference,
    /// Tier 3: vague quantifiers (`etc.`, `...`).
    VagueQuantifier,
    /// Tier 4: false simplicity (`simply`, `just`).
    FalseSimplicity,
    /// Tier 5: ambiguous instructions (`maybe`, `might`).
    AmbiguousInstruction,
}

impl Tier {
    /// All tiers in order.
    pub const ALL: [Self; 5] = [
        Self::IncompleteMarker,
        Self::VagueReference,
        Self::VagueQuantifier,
        Self::FalseSimplicity,
        Self::AmbiguousInstruction,
    ];

    /// Tier number, 1-5.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::IncompleteMarker => 1,
            Self::VagueReference => 2,
            Self::VagueQuantifier => 3,
            Self::FalseSimplicity => 4,
            Self::AmbiguousInstruction => 5,
        }
    }

    /// Looks a tier up by number.
    #[must_use]
    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.number() == n)
    }

    /// Human-readable tier name.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::IncompleteMarker => "Incomplete Markers",
            Self::VagueReference => "Vague References",
            Self::VagueQuantifier => "Vague Quantifiers",
            Self::FalseSimplicity => "False Simplicity",
            Self::AmbiguousInstruction => "Ambiguous Instructions",
        }
    }

    /// Whether matches inside code are still reported.
    ///
    /// Only incomplete markers count in code: a `TODO` in an example is still
    /// unfinished work, an `etc.` in a comment is not prose ambiguity.
    #[must_use]
    pub fn applies_in_code(self) -> bool {
        self == Self::IncompleteMarker
    }
}

/// Extra predicate that can suppress a phrase match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Refinement {
    /// Suppresses an ellipsis glued to a long identifier run or a path separator
    /// (`gpkey_abc123def456...`, `src/.../mod.rs`).
    TruncatedIdentifier,
}

/// Minimum identifier run length for [`Refinement::TruncatedIdentifier`].
pub const TRUNCATED_IDENTIFIER_MIN_RUN: usize = 6;

impl Refinement {
    /// Returns true if the match at `start..end` of `text` should be dropped.
    #[must_use]
    pub fn suppresses(self, text: &str, start: usize, end: usize) -> bool {
        match self {
            Self::TruncatedIdentifier => {
                let before = &text[..start];
                let after = &text[end..];
                let is_sep = |c: char| c == '/' || c == '\\';
                let is_ident = |c: char| c.is_ascii_alphanumeric() || c == '_';

                if before.ends_with(is_sep) || after.starts_with(is_sep) {
                    return true;
                }
                let run_before = before.chars().rev().take_while(|&c| is_ident(c)).count();
                let run_after = after.chars().take_while(|&c| is_ident(c)).count();
                run_before >= TRUNCATED_IDENTIFIER_MIN_RUN
                    || run_after >= TRUNCATED_IDENTIFIER_MIN_RUN
            }
        }
    }
}

/// Named structural predicate implemented by an evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Check {
    /// The target file could not be read.
    IoUnreadable,
    /// The parser recorded an anomaly.
    ParseAnomaly,
    /// Documentation has an H1 title.
    DocumentationTitle,
    /// Documentation ends with its marker lines (`Status:`, `Last Updated:`).
    DocumentationFooter,
    /// Heading levels never skip.
    HeadingHierarchy,
    /// Every plan phase heading is present.
    PlanPhases,
    /// Every plan phase carries a status marker.
    PlanPhaseStatus,
    /// Tables have at least one data row.
    TableDataRows,
    /// Table cells are non-empty.
    TableCells,
    /// Table rows have as many cells as the header.
    TableColumns,
    /// Code fences carry a language tag.
    CodeBlockLanguage,
    /// Filename follows the placement convention.
    FileNaming,
    /// Objectives hold enough atomic actions.
    ObjectiveActions,
    /// Enough actions carry a verification step.
    VerificationCoverage,
}

/// How a rule matches.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// A forbidden phrase compiled to a case-insensitive regex.
    Phrase {
        /// The phrase as written in the guideline.
        text: String,
        /// Compiled matcher honoring word boundaries where appropriate.
        pattern: Regex,
        /// Tier the phrase belongs to.
        tier: Tier,
        /// Optional suppression predicate.
        refinement: Option<Refinement>,
    },
    /// A line-oriented regex used by a structural check.
    Pattern {
        /// Predicate the pattern serves.
        check: Option<Check>,
        /// Compiled regex.
        pattern: Regex,
    },
    /// A structural predicate with no pattern.
    Predicate(Check),
}

impl Matcher {
    /// The structural check this matcher serves, if any.
    #[must_use]
    pub fn check(&self) -> Option<Check> {
        match self {
            Self::Phrase { .. } => None,
            Self::Pattern { check, .. } => *check,
            Self::Predicate(check) => Some(*check),
        }
    }

    /// The compiled regex, if any.
    #[must_use]
    pub fn regex(&self) -> Option<&Regex> {
        match self {
            Self::Phrase { pattern, .. } | Self::Pattern { pattern, .. } => Some(pattern),
            Self::Predicate(_) => None,
        }
    }
}

/// One enforceable check from the catalog.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Stable key, unique within a catalog.
    pub id: String,
    /// Rule category.
    pub category: Category,
    /// Severity of produced violations.
    pub severity: Severity,
    /// Pattern or predicate.
    pub matcher: Matcher,
    /// Message with `{match}` and `{detail}` placeholders.
    pub message_template: String,
    /// Guideline section the rule cites.
    pub reference: Option<String>,
}

impl Rule {
    /// Renders the message template.
    #[must_use]
    pub fn render(&self, matched: &str, detail: &str) -> String {
        let mut message = self
            .message_template
            .replace("{match}", matched)
            .replace("{detail}", detail);
        if let Some(reference) = &self.reference {
            message.push_str(" (");
            message.push_str(reference);
            message.push(')');
        }
        message
    }

    /// Creates a violation of this rule.
    #[must_use]
    pub fn violation(&self, line_range: LineRange, matched: &str, detail: &str) -> Violation {
        Violation::new(
            self.id.clone(),
            self.category,
            self.severity,
            line_range,
            self.render(matched, detail),
        )
        .with_excerpt(matched)
    }

    /// Phrase tier, for forbidden-phrase rules.
    #[must_use]
    pub fn tier(&self) -> Option<Tier> {
        match &self.matcher {
            Matcher::Phrase { tier, .. } => Some(*tier),
            _ => None,
        }
    }
}

/// A checker over one parsed document.
///
/// Evaluators are independent of each other and only read the
/// [`LintContext`], so the analyzer may run them in parallel.
///
/// # Example
///
/// ```ignore
/// use guide_lint_core::{Check, Evaluator, LintContext, Violation};
///
/// pub struct CodeBlockLanguage;
///
/// impl Evaluator for CodeBlockLanguage {
///     fn name(&self) -> &'static str { "code-blocks" }
///
///     fn evaluate(&self, ctx: &LintContext<'_>) -> Vec<Violation> {
///         let Some(rule) = ctx.catalog.predicate(Check::CodeBlockLanguage) else {
///             return vec![];
///         };
///         // ...
///         vec![]
///     }
/// }
/// ```
pub trait Evaluator: Send + Sync {
    /// Returns the kebab-case name of this evaluator.
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this evaluator checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Categories of the catalog rules this evaluator applies.
    fn categories(&self) -> &'static [Category] {
        &[]
    }

    /// Whether this evaluator runs for the given document type.
    fn applies_to(&self, doc_type: DocType) -> bool {
        let _ = doc_type;
        true
    }

    /// Whether this evaluator reads document content.
    ///
    /// Evaluators returning `false` also run for files that could not be read.
    fn needs_content(&self) -> bool {
        true
    }

    /// Evaluates one document and returns any violations found.
    fn evaluate(&self, ctx: &LintContext<'_>) -> Vec<Violation>;
}

/// Type alias for boxed Evaluator trait objects.
pub type EvaluatorBox = Box<dyn Evaluator>;
