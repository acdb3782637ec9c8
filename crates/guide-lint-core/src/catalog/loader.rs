//! DTO → definition conversion and definition → rule compilation.

use regex::Regex;

use super::dto::PhraseDto;
use super::{CatalogError, MatcherDef, RuleDef};
use crate::rule::{Matcher, Refinement, Rule, Tier};

/// Converts `[[phrases]]` entries into rule definitions.
///
/// # Errors
///
/// Returns the first entry with an unknown tier, an empty phrase, or no
/// derivable id.
pub fn phrase_defs(dtos: &[PhraseDto]) -> Result<Vec<RuleDef>, CatalogError> {
    dtos.iter().map(phrase_def).collect()
}

fn phrase_def(dto: &PhraseDto) -> Result<RuleDef, CatalogError> {
    let tier = Tier::from_number(dto.tier).ok_or_else(|| CatalogError::UnknownTier {
        phrase: dto.phrase.clone(),
        tier: dto.tier,
    })?;

    let id = match &dto.id {
        Some(id) => id.clone(),
        None => {
            let slug = slug(&dto.phrase);
            if slug.is_empty() {
                return Err(CatalogError::MissingId {
                    phrase: dto.phrase.clone(),
                });
            }
            format!("forbidden-phrase-custom-{slug}")
        }
    };

    let mut def = RuleDef::phrase(id, tier, dto.phrase.clone());
    if let Some(severity) = dto.severity {
        def = def.severity(severity);
    }
    if let Some(message) = &dto.message {
        def = def.message(message.clone());
    }
    if dto.allow_truncated_identifiers {
        def = def.refine(Refinement::TruncatedIdentifier);
    }
    Ok(def)
}

/// Lowercase, dash-separated form of a phrase (`"As Needed"` → `as-needed`).
#[must_use]
pub fn slug(phrase: &str) -> String {
    phrase
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Builds the regex source for a phrase.
///
/// A single word gets `\b` on each side that starts or ends with a word
/// character; a multi-word phrase matches as a substring with any run of
/// whitespace between its words. Incomplete markers match as plain
/// substrings, so `TODOs` and `TODO_ROLLBACK` are still caught.
#[must_use]
pub fn phrase_pattern(text: &str, tier: Tier) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > 1 {
        let body = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join(r"\s+");
        return format!("(?i){body}");
    }

    let word = text.trim();
    if tier == Tier::IncompleteMarker {
        return format!("(?i){}", regex::escape(word));
    }
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let lead = if word.starts_with(is_word) { r"\b" } else { "" };
    let trail = if word.ends_with(is_word) { r"\b" } else { "" };
    format!("(?i){lead}{}{trail}", regex::escape(word))
}

/// Compiles a definition into a rule.
///
/// # Errors
///
/// Fails on an empty phrase or a pattern that does not compile.
pub fn compile(def: RuleDef) -> Result<Rule, CatalogError> {
    let matcher = match def.matcher {
        MatcherDef::Phrase {
            text,
            tier,
            refinement,
        } => {
            if text.trim().is_empty() {
                return Err(CatalogError::EmptyPhrase { id: def.id });
            }
            let source = phrase_pattern(&text, tier);
            let pattern = compile_regex(&def.id, &source)?;
            Matcher::Phrase {
                text,
                pattern,
                tier,
                refinement,
            }
        }
        MatcherDef::Pattern { check, regex } => Matcher::Pattern {
            check,
            pattern: compile_regex(&def.id, &regex)?,
        },
        MatcherDef::Predicate(check) => Matcher::Predicate(check),
    };

    Ok(Rule {
        id: def.id,
        category: def.category,
        severity: def.severity,
        matcher,
        message_template: def.message,
        reference: def.reference,
    })
}

fn compile_regex(id: &str, source: &str) -> Result<Regex, CatalogError> {
    Regex::new(source).map_err(|e| CatalogError::InvalidPattern {
        id: id.to_string(),
        pattern: source.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    fn dto(phrase: &str, tier: u8) -> PhraseDto {
        PhraseDto {
            id: None,
            phrase: phrase.to_string(),
            tier,
            severity: None,
            message: None,
            allow_truncated_identifiers: false,
        }
    }

    fn matches_in(tier: Tier, phrase: &str, text: &str) -> bool {
        Regex::new(&phrase_pattern(phrase, tier)).unwrap().is_match(text)
    }

    fn matches(phrase: &str, text: &str) -> bool {
        matches_in(Tier::FalseSimplicity, phrase, text)
    }

    #[test]
    fn single_word_respects_boundaries() {
        assert!(matches("just", "Just run it"));
        assert!(!matches("just", "adjust the value"));
        assert!(matches("simply", "simply, run it"));
        assert!(!matches("simply", "simplyfied"));
    }

    #[test]
    fn incomplete_markers_match_inside_words() {
        let todo = |text| matches_in(Tier::IncompleteMarker, "TODO", text);
        assert!(todo("// todo: finish"));
        assert!(todo("Two TODOs remain"));
        assert!(todo("See MY_TODO_LIST"));
        assert!(todo("Open items: TODO_ROLLBACK"));
        assert!(!todo("to do"));
        assert!(matches_in(Tier::IncompleteMarker, "FIXME", "FIXMEs"));
    }

    #[test]
    fn punctuation_phrases_match_literally() {
        assert!(matches("etc.", "cargo, tanker, etc."));
        assert!(!matches("etc.", "etcetera"));
        assert!(matches("...", "tug, ..."));
        assert!(!matches("...", "a.b"));
    }

    #[test]
    fn multi_word_is_substring_across_whitespace() {
        assert!(matches("as needed", "Update AS\n  needed"));
        assert!(matches("if possible", "if possibles"));
    }

    #[test]
    fn slug_derivation() {
        assert_eq!(slug("As Needed"), "as-needed");
        assert_eq!(slug("etc."), "etc");
        assert_eq!(slug("..."), "");
    }

    #[test]
    fn phrase_defs_convert_dto() {
        let mut custom = dto("hopefully", 5);
        custom.severity = Some(Severity::Warning);
        let defs = phrase_defs(&[custom]).unwrap();
        assert_eq!(defs[0].id, "forbidden-phrase-custom-hopefully");
        assert_eq!(defs[0].severity, Severity::Warning);
    }

    #[test]
    fn phrase_defs_reject_bad_input() {
        assert!(matches!(
            phrase_defs(&[dto("hopefully", 9)]),
            Err(CatalogError::UnknownTier { tier: 9, .. })
        ));
        assert!(matches!(
            phrase_defs(&[dto("???", 2)]),
            Err(CatalogError::MissingId { .. })
        ));
    }

    #[test]
    fn compile_rejects_empty_phrase() {
        let mut d = dto("  ", 1);
        d.id = Some("blank".to_string());
        let def = phrase_defs(&[d]).unwrap().remove(0);
        assert!(matches!(compile(def), Err(CatalogError::EmptyPhrase { .. })));
    }
}
