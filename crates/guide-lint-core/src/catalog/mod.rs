//! Versioned, immutable rule catalog.
//!
//! # Architecture
//!
//! ```text
//! built-in RuleDef table        [[phrases]] in guide-lint.toml
//!          │                       ↓ serde (DTO layer)
//!          │                    dto::PhraseDto
//!          │                       ↓ loader::phrase_defs()
//!          └──────────┬────────── RuleDef
//!                     ↓ loader::compile()
//!                   Rule (regex compiled once)
//!                     ↓ Catalog::load / extend / with_overrides
//!                   Catalog
//! ```
//!
//! Every operation that changes the rule set consumes the catalog and returns
//! a new value, so a catalog handed to an analyzer never changes under it.

use std::collections::BTreeMap;

use crate::config::RuleConfig;
use crate::rule::{Category, Check, Refinement, Rule, Tier};
use crate::types::Severity;

pub mod dto;
pub mod loader;

/// Errors raised while building a catalog.
///
/// Any of these invalidates every subsequent lint, so they abort the run.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum CatalogError {
    /// Two rules share an id.
    #[error("duplicate rule id `{id}`")]
    #[diagnostic(
        code(guide_lint::catalog::duplicate_id),
        help("rule ids must be unique; rename the custom phrase or drop the duplicate")
    )]
    DuplicateId {
        /// The repeated id.
        id: String,
    },

    /// A rule pattern did not compile.
    #[error("rule `{id}`: invalid pattern `{pattern}`: {source}")]
    #[diagnostic(code(guide_lint::catalog::invalid_pattern))]
    InvalidPattern {
        /// Rule id.
        id: String,
        /// Offending pattern.
        pattern: String,
        /// Regex compiler error.
        source: regex::Error,
    },

    /// A phrase rule has no text.
    #[error("rule `{id}`: phrase is empty")]
    #[diagnostic(code(guide_lint::catalog::empty_phrase))]
    EmptyPhrase {
        /// Rule id.
        id: String,
    },

    /// A custom phrase needs an explicit id.
    #[error("phrase `{phrase}` has no usable characters for an id")]
    #[diagnostic(
        code(guide_lint::catalog::missing_id),
        help("add `id = \"forbidden-phrase-custom-...\"` to the [[phrases]] entry")
    )]
    MissingId {
        /// The phrase.
        phrase: String,
    },

    /// Tier number outside 1-5.
    #[error("phrase `{phrase}`: unknown tier {tier}, expected 1-5")]
    #[diagnostic(code(guide_lint::catalog::unknown_tier))]
    UnknownTier {
        /// The phrase.
        phrase: String,
        /// The invalid tier.
        tier: u8,
    },

    /// An override names a rule that is not in the catalog.
    #[error("override for unknown rule `{id}`")]
    #[diagnostic(
        code(guide_lint::catalog::unknown_rule),
        help("run `guide-lint list-rules` to see the rule ids of this catalog")
    )]
    UnknownRule {
        /// The unknown id.
        id: String,
    },
}

/// Uncompiled matcher of a [`RuleDef`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatcherDef {
    /// Forbidden phrase; single words match on word boundaries, multi-word
    /// phrases as case-insensitive substrings.
    Phrase {
        /// Phrase text.
        text: String,
        /// Tier.
        tier: Tier,
        /// Optional suppression predicate.
        refinement: Option<Refinement>,
    },
    /// Regex source for a structural check.
    Pattern {
        /// Check the pattern serves.
        check: Option<Check>,
        /// Regex source.
        regex: String,
    },
    /// Pure structural predicate.
    Predicate(Check),
}

/// Declarative rule definition, compiled into a [`Rule`] when loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDef {
    /// Stable id.
    pub id: String,
    /// Category.
    pub category: Category,
    /// Default severity.
    pub severity: Severity,
    /// Matcher source.
    pub matcher: MatcherDef,
    /// Message template.
    pub message: String,
    /// Guideline section reference.
    pub reference: Option<String>,
}

impl RuleDef {
    /// A fatal forbidden-phrase rule.
    #[must_use]
    pub fn phrase(id: impl Into<String>, tier: Tier, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            id: id.into(),
            category: Category::ForbiddenPhrase,
            severity: Severity::Fatal,
            message: format!(
                "Tier {} ({}) phrase `{{match}}` is not allowed",
                tier.number(),
                tier.title()
            ),
            matcher: MatcherDef::Phrase {
                text,
                tier,
                refinement: None,
            },
            reference: Some("Section 9".to_string()),
        }
    }

    /// A fatal rule backed by a line regex.
    #[must_use]
    pub fn pattern(
        id: impl Into<String>,
        category: Category,
        check: Check,
        regex: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            severity: Severity::Fatal,
            matcher: MatcherDef::Pattern {
                check: Some(check),
                regex: regex.into(),
            },
            message: message.into(),
            reference: None,
        }
    }

    /// A fatal rule backed by a structural predicate.
    #[must_use]
    pub fn predicate(
        id: impl Into<String>,
        category: Category,
        check: Check,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            severity: Severity::Fatal,
            matcher: MatcherDef::Predicate(check),
            message: message.into(),
            reference: None,
        }
    }

    /// Sets the severity.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the guideline reference.
    #[must_use]
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Sets the message template.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attaches a refinement predicate to a phrase rule.
    #[must_use]
    pub fn refine(mut self, refinement: Refinement) -> Self {
        if let MatcherDef::Phrase {
            refinement: ref mut r,
            ..
        } = self.matcher
        {
            *r = Some(refinement);
        }
        self
    }
}

/// Rule id reported when a target file cannot be read.
pub const IO_UNREADABLE: &str = "io-unreadable";

/// Rule id reported for parser anomalies.
pub const PARSE_ANOMALY: &str = "parse-anomaly";

/// Rules every catalog carries regardless of guideline version.
#[must_use]
pub fn intrinsic_rules() -> Vec<RuleDef> {
    vec![
        RuleDef::predicate(
            IO_UNREADABLE,
            Category::StructuralFormat,
            Check::IoUnreadable,
            "File could not be read: {detail}",
        ),
        RuleDef::predicate(
            PARSE_ANOMALY,
            Category::StructuralFormat,
            Check::ParseAnomaly,
            "Markdown could not be classified cleanly: {detail}",
        )
        .severity(Severity::Warning),
    ]
}

/// The set of rules applied in one lint run.
#[derive(Debug, Clone)]
pub struct Catalog {
    version: String,
    rules: BTreeMap<String, Rule>,
}

impl Catalog {
    /// Compiles `defs` (plus the intrinsic rules) into a catalog.
    ///
    /// # Errors
    ///
    /// Fails on duplicate ids or rules that do not compile.
    pub fn load(
        version: impl Into<String>,
        defs: impl IntoIterator<Item = RuleDef>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self {
            version: version.into(),
            rules: BTreeMap::new(),
        };
        catalog.extend(intrinsic_rules().into_iter().chain(defs))
    }

    /// Returns a catalog with additional rules.
    ///
    /// # Errors
    ///
    /// Fails on ids already present or rules that do not compile.
    pub fn extend(mut self, defs: impl IntoIterator<Item = RuleDef>) -> Result<Self, CatalogError> {
        for def in defs {
            if self.rules.contains_key(&def.id) {
                return Err(CatalogError::DuplicateId { id: def.id });
            }
            let rule = loader::compile(def)?;
            self.rules.insert(rule.id.clone(), rule);
        }
        Ok(self)
    }

    /// Returns a catalog with per-rule overrides applied.
    ///
    /// Disabled rules are removed; severities are replaced.
    ///
    /// # Errors
    ///
    /// Fails if an override names a rule this catalog does not contain.
    pub fn with_overrides<'a>(
        mut self,
        overrides: impl IntoIterator<Item = (&'a String, &'a RuleConfig)>,
    ) -> Result<Self, CatalogError> {
        for (id, cfg) in overrides {
            let Some(rule) = self.rules.get_mut(id) else {
                return Err(CatalogError::UnknownRule { id: id.clone() });
            };
            if let Some(severity) = cfg.severity {
                rule.severity = severity;
            }
            if cfg.enabled == Some(false) {
                tracing::debug!("Disabling rule: {id}");
                self.rules.remove(id);
            }
        }
        Ok(self)
    }

    /// Guideline version the catalog transcribes.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Looks a rule up by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.get(id)
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the catalog has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// All rules ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    /// Rules of one category ordered by id.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Rule> {
        self.rules.values().filter(move |r| r.category == category)
    }

    /// Rules serving a structural check ordered by id.
    pub fn rules_for(&self, check: Check) -> impl Iterator<Item = &Rule> {
        self.rules
            .values()
            .filter(move |r| r.matcher.check() == Some(check))
    }

    /// The first rule serving a structural check, if enabled.
    #[must_use]
    pub fn predicate(&self, check: Check) -> Option<&Rule> {
        self.rules_for(check).next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<RuleDef> {
        vec![
            RuleDef::phrase("forbidden-phrase-tier1-todo", Tier::IncompleteMarker, "TODO"),
            RuleDef::phrase("forbidden-phrase-tier3-ellipsis", Tier::VagueQuantifier, "...")
                .refine(Refinement::TruncatedIdentifier),
            RuleDef::predicate(
                "code-block-language",
                Category::CodeBlock,
                Check::CodeBlockLanguage,
                "Code block has no language tag",
            ),
        ]
    }

    #[test]
    fn load_includes_intrinsic_rules() {
        let catalog = Catalog::load("test", sample()).unwrap();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.get(IO_UNREADABLE).is_some());
        assert_eq!(
            catalog.get(PARSE_ANOMALY).map(|r| r.severity),
            Some(Severity::Warning)
        );
        assert_eq!(catalog.version(), "test");
    }

    #[test]
    fn duplicate_id_fails_fast() {
        let mut defs = sample();
        defs.push(RuleDef::phrase("forbidden-phrase-tier1-todo", Tier::IncompleteMarker, "TBD"));
        let err = Catalog::load("test", defs).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { id } if id == "forbidden-phrase-tier1-todo"));
    }

    #[test]
    fn invalid_regex_fails_fast() {
        let defs = vec![RuleDef::pattern(
            "broken",
            Category::RequiredSection,
            Check::DocumentationFooter,
            "(unclosed",
            "broken",
        )];
        let err = Catalog::load("test", defs).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPattern { .. }));
    }

    #[test]
    fn overrides_disable_and_downgrade() {
        let catalog = Catalog::load("test", sample()).unwrap();
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "code-block-language".to_string(),
            RuleConfig {
                enabled: Some(false),
                severity: None,
            },
        );
        overrides.insert(
            "forbidden-phrase-tier3-ellipsis".to_string(),
            RuleConfig {
                enabled: None,
                severity: Some(Severity::Warning),
            },
        );
        let catalog = catalog.with_overrides(&overrides).unwrap();
        assert!(catalog.predicate(Check::CodeBlockLanguage).is_none());
        assert_eq!(
            catalog.get("forbidden-phrase-tier3-ellipsis").map(|r| r.severity),
            Some(Severity::Warning)
        );
    }

    #[test]
    fn override_of_unknown_rule_fails() {
        let catalog = Catalog::load("test", sample()).unwrap();
        let mut overrides = BTreeMap::new();
        overrides.insert("no-such-rule".to_string(), RuleConfig::default());
        assert!(matches!(
            catalog.with_overrides(&overrides),
            Err(CatalogError::UnknownRule { .. })
        ));
    }

    #[test]
    fn category_lookup_is_ordered_by_id() {
        let catalog = Catalog::load("test", sample()).unwrap();
        let ids: Vec<_> = catalog
            .by_category(Category::ForbiddenPhrase)
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec!["forbidden-phrase-tier1-todo", "forbidden-phrase-tier3-ellipsis"]
        );
    }
}
