//! Evaluator for table shape.
//!
//! # Detected Problems
//!
//! - A table with a header but no data rows (`table-header-only`)
//! - A row with an empty cell (`table-empty-cell`); `-` and `N/A` are explicit
//!   values and pass
//! - A row whose cell count differs from the header (`table-column-mismatch`)

use guide_lint_core::{
    Block, Category, Check, Evaluator, LineRange, LintContext, Table, TableRow, Violation,
};

/// Evaluator name for table shape.
pub const NAME: &str = "table-shape";

/// Checks rows and cells of every table.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableShape;

impl TableShape {
    /// Creates the evaluator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for TableShape {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires data rows and filled cells in every table"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::TableShape]
    }

    fn evaluate(&self, ctx: &LintContext<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();
        for (block, table) in ctx.document.tables() {
            violations.extend(check_table(ctx, block, table));
        }
        violations
    }
}

fn check_table(ctx: &LintContext<'_>, block: &Block, table: &Table) -> Vec<Violation> {
    let catalog = ctx.catalog;
    let mut violations = Vec::new();

    // a header-only table is one finding; its header cells are not checked
    if table.rows.is_empty() {
        if let Some(rule) = catalog.predicate(Check::TableDataRows) {
            violations.push(rule.violation(block.line_range, &block.content, ""));
        }
        return violations;
    }

    let rows = std::iter::once(&table.header).chain(&table.rows);
    for row in rows {
        let excerpt = ctx.document.line(row.line).unwrap_or_default();

        if let Some(rule) = catalog.predicate(Check::TableCells) {
            let empty = empty_columns(row);
            if !empty.is_empty() {
                let detail = empty
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                violations.push(rule.violation(LineRange::line(row.line), excerpt, &detail));
            }
        }

        if let Some(rule) = catalog.predicate(Check::TableColumns) {
            let expected = table.column_count();
            let found = row.cells.len();
            if found != expected {
                let detail = format!("{found} cells, header has {expected}");
                violations.push(rule.violation(LineRange::line(row.line), excerpt, &detail));
            }
        }
    }

    violations
}

/// 1-based indices of empty cells in a row.
fn empty_columns(row: &TableRow) -> Vec<usize> {
    row.cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.trim().is_empty())
        .map(|(i, _)| i + 1)
        .collect()
}
