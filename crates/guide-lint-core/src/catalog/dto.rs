//! TOML deserialization types (DTO layer) for catalog extensions.
//!
//! These types exist solely for serde deserialization.
//! They are converted to [`RuleDef`](super::RuleDef) values via the loader.

use serde::{Deserialize, Serialize};

use crate::types::Severity;

/// A forbidden phrase added through `[[phrases]]` in the config file.
///
/// ```toml
/// [[phrases]]
/// phrase = "hopefully"
/// tier = 5
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhraseDto {
    /// Rule id; derived from the phrase when omitted.
    #[serde(default)]
    pub id: Option<String>,
    /// Phrase text.
    pub phrase: String,
    /// Tier number, 1-5.
    pub tier: u8,
    /// Severity (default: fatal).
    #[serde(default)]
    pub severity: Option<Severity>,
    /// Custom message template.
    #[serde(default)]
    pub message: Option<String>,
    /// Apply the truncated-identifier exception.
    #[serde(default)]
    pub allow_truncated_identifiers: bool,
}
