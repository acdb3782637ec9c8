//! Shared output formatting for lint results.

use anyhow::Result;
use guide_lint_core::{Category, LintRun, Severity};
use serde::Serialize;
use std::fmt::Write;

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(run: &LintRun, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(run)),
        OutputFormat::Json => println!("{}", render_json(run)?),
    }
    Ok(())
}

/// One violation line per finding followed by the summary line.
pub fn render_text(run: &LintRun) -> String {
    let mut output = String::new();
    for report in &run.reports {
        output.push_str(&report.format());
    }

    let (complete, draft) = run.count_by_verdict();
    let (fatal, warnings) = run.count_by_severity();
    let _ = writeln!(
        output,
        "Checked {} file(s): {complete} complete, {draft} draft; {fatal} fatal, {warnings} warning(s)",
        run.files_checked()
    );
    output
}

/// A flat violation record, one per finding across all reports.
#[derive(Debug, Serialize)]
struct Record<'a> {
    path: String,
    line: usize,
    end_line: usize,
    severity: Severity,
    category: Category,
    rule_id: &'a str,
    message: &'a str,
    excerpt: &'a str,
}

/// Renders every violation as a pretty-printed JSON array.
pub fn render_json(run: &LintRun) -> Result<String> {
    let records: Vec<Record<'_>> = run
        .reports
        .iter()
        .flat_map(|report| {
            report.violations.iter().map(move |v| Record {
                path: report.document_path.display().to_string(),
                line: v.line_range.start,
                end_line: v.line_range.end,
                severity: v.severity,
                category: v.category,
                rule_id: &v.rule_id,
                message: &v.message,
                excerpt: &v.excerpt,
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use guide_lint_core::{DocType, LineRange, ReportBuilder, Violation};

    fn sample_run() -> LintRun {
        let mut run = LintRun::new();
        run.reports.push(
            ReportBuilder::new("docs/ledger_export_documentation.md", DocType::Documentation)
                .violation(
                    Violation::new(
                        "table-column-mismatch",
                        Category::TableShape,
                        Severity::Warning,
                        LineRange::line(9),
                        "Table row has 3 cells, header has 2",
                    )
                    .with_excerpt("| a | b | c |"),
                )
                .violation(
                    Violation::new(
                        "forbidden-phrase-tier1-todo",
                        Category::ForbiddenPhrase,
                        Severity::Fatal,
                        LineRange::line(5),
                        "Incomplete marker `TODO` found",
                    )
                    .with_excerpt("TODO: describe the export format."),
                )
                .build(),
        );
        run.reports.push(
            ReportBuilder::new("docs/queue_worker_documentation.md", DocType::Documentation)
                .build(),
        );
        run
    }

    #[test]
    fn text_lists_violations_then_summary() {
        insta::assert_snapshot!(render_text(&sample_run()), @r"
        docs/ledger_export_documentation.md:5: [FATAL] forbidden-phrase-tier1-todo — Incomplete marker `TODO` found
        docs/ledger_export_documentation.md:9: [WARNING] table-column-mismatch — Table row has 3 cells, header has 2
        Checked 2 file(s): 1 complete, 1 draft; 1 fatal, 1 warning(s)
        ");
    }

    #[test]
    fn text_for_empty_run_is_summary_only() {
        insta::assert_snapshot!(
            render_text(&LintRun::new()),
            @"Checked 0 file(s): 0 complete, 0 draft; 0 fatal, 0 warning(s)"
        );
    }

    #[test]
    fn json_is_a_flat_record_array() {
        insta::assert_snapshot!(render_json(&sample_run()).expect("serializes"), @r#"
        [
          {
            "path": "docs/ledger_export_documentation.md",
            "line": 5,
            "end_line": 5,
            "severity": "fatal",
            "category": "forbidden-phrase",
            "rule_id": "forbidden-phrase-tier1-todo",
            "message": "Incomplete marker `TODO` found",
            "excerpt": "TODO: describe the export format."
          },
          {
            "path": "docs/ledger_export_documentation.md",
            "line": 9,
            "end_line": 9,
            "severity": "warning",
            "category": "table-shape",
            "rule_id": "table-column-mismatch",
            "message": "Table row has 3 cells, header has 2",
            "excerpt": "| a | b | c |"
          }
        ]
        "#);
    }

    #[test]
    fn json_for_clean_run_is_empty_array() {
        let mut run = LintRun::new();
        run.reports
            .push(ReportBuilder::new("plans/a_plan.md", DocType::Plan).build());
        assert_eq!(render_json(&run).expect("serializes"), "[]");
    }
}
