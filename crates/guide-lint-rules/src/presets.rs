//! Evaluator registry.

use guide_lint_core::EvaluatorBox;
use thiserror::Error;

use crate::{
    CodeBlocks, DocumentationSections, ForbiddenPhrases, HeadingHierarchy, Naming, PlanPhases,
    Quantitative, TableShape,
};

/// An evaluator name that is not registered.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown evaluator `{name}`, expected one of: {}", evaluator_names().join(", "))]
pub struct UnknownEvaluator {
    /// The requested name.
    pub name: String,
}

/// Returns every built-in evaluator.
///
/// Evaluators skip document types they do not apply to, so one list serves
/// documentation, plans and guidelines alike.
#[must_use]
pub fn all_evaluators() -> Vec<EvaluatorBox> {
    vec![
        Box::new(ForbiddenPhrases::new()),
        Box::new(DocumentationSections::new()),
        Box::new(PlanPhases::new()),
        Box::new(HeadingHierarchy::new()),
        Box::new(TableShape::new()),
        Box::new(CodeBlocks::new()),
        Box::new(Naming::new()),
        Box::new(Quantitative::new()),
    ]
}

/// Names of every built-in evaluator.
#[must_use]
pub fn evaluator_names() -> Vec<&'static str> {
    all_evaluators().iter().map(|e| e.name()).collect()
}

/// Selects evaluators by name, in registry order.
///
/// # Errors
///
/// Returns the first name that is not registered.
pub fn evaluators_by_name<S: AsRef<str>>(names: &[S]) -> Result<Vec<EvaluatorBox>, UnknownEvaluator> {
    let requested: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    let known: Vec<&str> = evaluator_names();
    if let Some(unknown) = requested.iter().find(|n| !known.contains(n)) {
        return Err(UnknownEvaluator {
            name: (*unknown).to_string(),
        });
    }

    Ok(all_evaluators()
        .into_iter()
        .filter(|e| requested.contains(&e.name()))
        .collect())
}
