//! # guide-lint-rules
//!
//! Built-in rule catalog and evaluators for guide-lint.
//!
//! ## Available Evaluators
//!
//! | Name | Doc types | Rules |
//! |------|-----------|-------|
//! | `forbidden-phrases` | all | `forbidden-phrase-tier<N>-<phrase>` |
//! | `documentation-sections` | documentation | `doc-title-h1`, `doc-status-marker`, `doc-last-updated-marker` |
//! | `plan-phases` | plan | `plan-phase-missing`, `plan-phase-status` |
//! | `heading-hierarchy` | all | `heading-level-skip` |
//! | `table-shape` | all | `table-header-only`, `table-empty-cell`, `table-column-mismatch` |
//! | `code-blocks` | all | `code-block-language` |
//! | `naming` | all | `file-naming` |
//! | `quantitative` | plan | `objective-action-minimum`, `verification-coverage` |
//!
//! ## Usage
//!
//! ```ignore
//! use guide_lint_core::Analyzer;
//! use guide_lint_rules::{builtin_catalog, ForbiddenPhrases, Naming};
//!
//! let analyzer = Analyzer::builder(builtin_catalog()?)
//!     .path("docs")
//!     .evaluator(ForbiddenPhrases::new())
//!     .evaluator(Naming::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builtin;
mod code_blocks;
mod documentation_sections;
mod forbidden_phrases;
mod heading_hierarchy;
mod naming;
mod plan_phases;
mod presets;
mod quantitative;
mod table_shape;

pub use builtin::{
    builtin_catalog, builtin_rule_defs, BUILTIN_VERSION, ELLIPSIS_RULE,
    LAST_UPDATED_MARKER_PATTERN, PHASE_HEADING_PATTERN, PHASE_STATUS_PATTERN,
    STATUS_MARKER_PATTERN,
};
pub use code_blocks::CodeBlocks;
pub use documentation_sections::{DocumentationSections, FOOTER_WINDOW};
pub use forbidden_phrases::ForbiddenPhrases;
pub use heading_hierarchy::HeadingHierarchy;
pub use naming::Naming;
pub use plan_phases::{PlanPhases, REQUIRED_PHASES};
pub use presets::{all_evaluators, evaluator_names, evaluators_by_name, UnknownEvaluator};
pub use quantitative::Quantitative;
pub use table_shape::TableShape;

/// Re-export core types for convenience.
pub use guide_lint_core::{Evaluator, Severity, Violation};
