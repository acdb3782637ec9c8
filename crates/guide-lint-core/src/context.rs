//! Context types for evaluator execution.

use std::path::{Component, Path};

use crate::catalog::Catalog;
use crate::config::{Config, NamingConfig};
use crate::document::{DocType, Document};

/// Where a file sits relative to the registered roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Under a documentation root (`docs/`).
    DocumentationRoot,
    /// Under a plan root (`plans/`).
    PlanRoot,
    /// Under neither.
    Unplaced,
}

impl Placement {
    /// Detects placement from path components.
    ///
    /// The innermost matching directory wins, so `plans/docs/x.md` sits
    /// under a documentation root.
    #[must_use]
    pub fn detect(path: &Path, naming: &NamingConfig) -> Self {
        let Some(parent) = path.parent() else {
            return Self::Unplaced;
        };
        for component in parent.components().rev() {
            if let Component::Normal(s) = component {
                let s = s.to_string_lossy();
                if naming.documentation_roots.iter().any(|r| r.as_str() == s.as_ref()) {
                    return Self::DocumentationRoot;
                }
                if naming.plan_roots.iter().any(|r| r.as_str() == s.as_ref()) {
                    return Self::PlanRoot;
                }
            }
        }
        Self::Unplaced
    }

    /// Resolves the document type: explicit flag, then filename suffix, then
    /// placement (plan root → plan), then documentation.
    #[must_use]
    pub fn doc_type(self, path: &Path, explicit: Option<DocType>) -> DocType {
        explicit
            .or_else(|| DocType::from_path(path))
            .unwrap_or(match self {
                Self::PlanRoot => DocType::Plan,
                Self::DocumentationRoot | Self::Unplaced => DocType::Documentation,
            })
    }
}

/// Context provided to evaluators.
///
/// Everything here is shared, read-only state for one document.
#[derive(Debug, Clone, Copy)]
pub struct LintContext<'a> {
    /// The parsed document (empty when the file was unreadable).
    pub document: &'a Document,
    /// The run's catalog.
    pub catalog: &'a Catalog,
    /// The run's configuration.
    pub config: &'a Config,
    /// Placement of the document path.
    pub placement: Placement,
}

impl<'a> LintContext<'a> {
    /// Creates a new context.
    #[must_use]
    pub fn new(document: &'a Document, catalog: &'a Catalog, config: &'a Config) -> Self {
        let placement = Placement::detect(&document.path, &config.naming);
        Self {
            document,
            catalog,
            config,
            placement,
        }
    }

    /// Path of the document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.document.path
    }

    /// Document type.
    #[must_use]
    pub fn doc_type(&self) -> DocType {
        self.document.doc_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_placement() {
        let naming = NamingConfig::default();
        let cases = [
            ("docs/api_documentation.md", Placement::DocumentationRoot),
            ("repo/documentation/x/y.md", Placement::DocumentationRoot),
            ("plans/q3_plan.md", Placement::PlanRoot),
            ("plans/docs/x.md", Placement::DocumentationRoot),
            ("README.md", Placement::Unplaced),
            ("src/docs.md", Placement::Unplaced),
        ];
        for (path, expected) in cases {
            assert_eq!(Placement::detect(Path::new(path), &naming), expected, "{path}");
        }
    }

    #[test]
    fn test_doc_type_resolution_order() {
        let p = Path::new("plans/notes.md");
        assert_eq!(Placement::PlanRoot.doc_type(p, None), DocType::Plan);
        assert_eq!(
            Placement::PlanRoot.doc_type(p, Some(DocType::Guideline)),
            DocType::Guideline
        );
        assert_eq!(
            Placement::PlanRoot.doc_type(Path::new("plans/x_documentation.md"), None),
            DocType::Documentation
        );
        assert_eq!(
            Placement::Unplaced.doc_type(Path::new("README.md"), None),
            DocType::Documentation
        );
    }
}
