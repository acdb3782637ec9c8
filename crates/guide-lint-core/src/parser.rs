//! Line-oriented markdown parser.
//!
//! Produces the block sequence of a [`Document`](crate::Document). The parser
//! is deliberately small: it recognises ATX headings, pipe tables, fenced
//! code blocks and list items, and accumulates everything else (blank lines
//! included) into paragraphs. It never fails; input it cannot classify is
//! kept as a paragraph and, where useful, recorded as a [`ParseAnomaly`].

use crate::document::{Block, BlockKind, Checkbox, ParseAnomaly, Table, TableRow};
use crate::types::LineRange;

/// Output of [`parse`].
#[derive(Debug, Default)]
pub(crate) struct Parsed {
    pub blocks: Vec<Block>,
    pub anomalies: Vec<ParseAnomaly>,
}

const FENCE: &str = "```";

/// Parses markdown text into blocks covering every line exactly once.
pub(crate) fn parse(text: &str) -> Parsed {
    let lines: Vec<&str> = text.lines().collect();
    let mut out = Parsed::default();
    let mut i = 0;

    while i < lines.len() {
        let end = if let Some(language) = fence_open(lines[i]) {
            parse_code_block(&lines, i, language, &mut out)
        } else if let Some((level, heading)) = heading(lines[i]) {
            out.blocks.push(Block {
                kind: BlockKind::Heading {
                    level,
                    text: heading,
                },
                content: lines[i].to_string(),
                line_range: LineRange::line(i + 1),
            });
            i
        } else if starts_table(&lines, i) {
            parse_table(&lines, i, &mut out)
        } else if let Some(checkbox) = list_marker(lines[i]) {
            parse_list_item(&lines, i, checkbox, &mut out)
        } else {
            parse_paragraph(&lines, i, &mut out)
        };
        i = end + 1;
    }

    out
}

fn push(out: &mut Parsed, lines: &[&str], start: usize, end: usize, kind: BlockKind) {
    out.blocks.push(Block {
        kind,
        content: lines[start..=end].join("\n"),
        line_range: LineRange::new(start + 1, end + 1),
    });
}

fn parse_code_block(lines: &[&str], start: usize, language: String, out: &mut Parsed) -> usize {
    let close = lines[start + 1..]
        .iter()
        .position(|l| is_fence_close(l))
        .map(|p| start + 1 + p);

    let (end, closed) = match close {
        Some(end) => (end, true),
        None => {
            out.anomalies.push(ParseAnomaly {
                line_range: LineRange::new(start + 1, lines.len()),
                message: "code fence is never closed; the rest of the file is treated as code"
                    .to_string(),
            });
            (lines.len() - 1, false)
        }
    };

    push(out, lines, start, end, BlockKind::CodeBlock { language, closed });
    end
}

fn parse_table(lines: &[&str], start: usize, out: &mut Parsed) -> usize {
    let header = TableRow {
        line: start + 1,
        cells: split_cells(lines[start]),
    };
    let mut end = start + 1;
    let mut rows = Vec::new();
    while end + 1 < lines.len() && is_table_row(lines[end + 1]) {
        end += 1;
        rows.push(TableRow {
            line: end + 1,
            cells: split_cells(lines[end]),
        });
    }

    let table = Table {
        header,
        separator_line: start + 2,
        rows,
    };
    push(out, lines, start, end, BlockKind::Table(table));
    end
}

fn parse_list_item(
    lines: &[&str],
    start: usize,
    checkbox: Option<Checkbox>,
    out: &mut Parsed,
) -> usize {
    let mut end = start;
    while end + 1 < lines.len() && is_continuation(lines[end + 1]) {
        end += 1;
    }
    push(out, lines, start, end, BlockKind::ListItem { checkbox });
    end
}

fn parse_paragraph(lines: &[&str], start: usize, out: &mut Parsed) -> usize {
    let mut end = start;
    loop {
        if let Some(message) = heading_anomaly(lines[end]) {
            out.anomalies.push(ParseAnomaly {
                line_range: LineRange::line(end + 1),
                message,
            });
        }
        if end + 1 >= lines.len() || starts_block(lines, end + 1) {
            break;
        }
        end += 1;
    }
    push(out, lines, start, end, BlockKind::Paragraph);
    end
}

fn starts_block(lines: &[&str], i: usize) -> bool {
    fence_open(lines[i]).is_some()
        || heading(lines[i]).is_some()
        || starts_table(lines, i)
        || list_marker(lines[i]).is_some()
}

/// Returns the language tag if `line` opens a fence.
fn fence_open(line: &str) -> Option<String> {
    let rest = line.trim_start().strip_prefix(FENCE)?;
    Some(rest.trim_start_matches('`').trim().to_string())
}

fn is_fence_close(line: &str) -> bool {
    line.trim()
        .strip_prefix(FENCE)
        .is_some_and(|rest| rest.trim_start_matches('`').trim().is_empty())
}

fn heading(line: &str) -> Option<(u8, String)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = rest.trim().trim_end_matches('#').trim();
    if text.is_empty() {
        return None;
    }
    let level = u8::try_from(hashes).ok()?;
    Some((level, text.to_string()))
}

fn heading_anomaly(line: &str) -> Option<String> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    let next = line[hashes..].chars().next()?;
    if (1..=6).contains(&hashes) && next.is_alphanumeric() {
        Some(format!(
            "`{}` looks like a heading but has no space after the `#` marker",
            line.trim()
        ))
    } else {
        None
    }
}

fn starts_table(lines: &[&str], i: usize) -> bool {
    lines[i].contains('|') && lines.get(i + 1).is_some_and(|next| is_separator(next))
}

fn is_separator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.contains('|')
        && trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':') || c.is_whitespace())
}

fn is_table_row(line: &str) -> bool {
    !line.trim().is_empty() && line.contains('|') && fence_open(line).is_none()
}

/// Splits a table row into trimmed cells.
///
/// Leading and trailing pipes are optional; `\|` and pipes inside backtick
/// code spans do not delimit cells.
pub(crate) fn split_cells(line: &str) -> Vec<String> {
    let mut trimmed = line.trim();
    if let Some(rest) = trimmed.strip_prefix('|') {
        trimmed = rest;
    }
    if trimmed.ends_with('|') && !trimmed.ends_with("\\|") {
        trimmed = &trimmed[..trimmed.len() - 1];
    }

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_code = false;
    let mut escaped = false;
    for c in trimmed.chars() {
        match c {
            '|' if !escaped && !in_code => {
                cells.push(current.trim().to_string());
                current.clear();
            }
            _ => {
                if c == '`' && !escaped {
                    in_code = !in_code;
                }
                current.push(c);
            }
        }
        escaped = c == '\\' && !escaped;
    }
    cells.push(current.trim().to_string());
    cells
}

/// Returns `Some(checkbox)` if the line is a list item.
fn list_marker(line: &str) -> Option<Option<Checkbox>> {
    let s = line.trim_start();
    let rest = if let Some(rest) = s
        .strip_prefix("- ")
        .or_else(|| s.strip_prefix("* "))
        .or_else(|| s.strip_prefix("+ "))
    {
        rest
    } else {
        let digits = s.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        s[digits..]
            .strip_prefix(". ")
            .or_else(|| s[digits..].strip_prefix(") "))?
    };

    let rest = rest.trim_start();
    let checkbox = if rest.starts_with("[ ]") {
        Some(Checkbox::Open)
    } else if rest.starts_with("[x]") || rest.starts_with("[X]") {
        Some(Checkbox::Done)
    } else {
        None
    };
    Some(checkbox)
}

fn is_continuation(line: &str) -> bool {
    !line.trim().is_empty()
        && line.starts_with(char::is_whitespace)
        && list_marker(line).is_none()
        && fence_open(line).is_none()
}
