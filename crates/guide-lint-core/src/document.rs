//! Structural model of a parsed markdown document.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::parser;
use crate::types::LineRange;

/// Kind of methodology document, which selects the structural rules applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    /// `*_documentation.md`
    Documentation,
    /// `*_plan.md`
    Plan,
    /// `*_guidelines.md` and `*_skill.md`
    Guideline,
}

impl DocType {
    /// Infers the type from the filename suffix.
    ///
    /// Returns `None` when the stem carries no registered suffix.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let stem = path.file_stem()?.to_str()?.to_ascii_lowercase();
        if stem.ends_with("_documentation") {
            Some(Self::Documentation)
        } else if stem.ends_with("_plan") {
            Some(Self::Plan)
        } else if stem.ends_with("_guidelines") || stem.ends_with("_skill") {
            Some(Self::Guideline)
        } else {
            None
        }
    }
}

impl std::fmt::Display for DocType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Documentation => write!(f, "documentation"),
            Self::Plan => write!(f, "plan"),
            Self::Guideline => write!(f, "guideline"),
        }
    }
}

impl std::str::FromStr for DocType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "documentation" | "doc" | "docs" => Ok(Self::Documentation),
            "plan" => Ok(Self::Plan),
            "guideline" | "guidelines" | "skill" => Ok(Self::Guideline),
            other => Err(format!(
                "unknown document type `{other}`, expected: documentation, plan, guideline"
            )),
        }
    }
}

/// Checkbox state of a checklist list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkbox {
    /// `- [ ]`
    Open,
    /// `- [x]`
    Done,
}

/// One row of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Source line of the row.
    pub line: usize,
    /// Trimmed cell contents.
    pub cells: Vec<String>,
}

/// Shape information recorded for a table block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Header row.
    pub header: TableRow,
    /// Line of the `|---|` separator.
    pub separator_line: usize,
    /// Data rows following the separator.
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Number of header cells.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.header.cells.len()
    }
}

/// Kind of a structural block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// ATX heading, `level` in `1..=6`.
    Heading {
        /// Number of leading `#`.
        level: u8,
        /// Heading text without the markers.
        text: String,
    },
    /// Prose or blank lines.
    Paragraph,
    /// A list entry with its indented continuation lines.
    ListItem {
        /// Checkbox state for `- [ ]` / `- [x]` items.
        checkbox: Option<Checkbox>,
    },
    /// A pipe table.
    Table(Table),
    /// A fenced code block.
    CodeBlock {
        /// Text after the opening fence, empty when none was given.
        language: String,
        /// False when the fence was never closed.
        closed: bool,
    },
}

/// A structural unit of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// What the block is.
    pub kind: BlockKind,
    /// Raw lines of the block joined with `\n`.
    pub content: String,
    /// Lines covered.
    pub line_range: LineRange,
}

impl Block {
    /// Heading level, if this block is a heading.
    #[must_use]
    pub fn heading_level(&self) -> Option<u8> {
        match self.kind {
            BlockKind::Heading { level, .. } => Some(level),
            _ => None,
        }
    }

    /// Heading text, if this block is a heading.
    #[must_use]
    pub fn heading_text(&self) -> Option<&str> {
        match &self.kind {
            BlockKind::Heading { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Returns true for `- [ ]` / `- [x]` list items.
    #[must_use]
    pub fn is_checklist_item(&self) -> bool {
        matches!(
            self.kind,
            BlockKind::ListItem {
                checkbox: Some(_)
            }
        )
    }

    /// Returns true for fenced code blocks.
    #[must_use]
    pub fn is_code_block(&self) -> bool {
        matches!(self.kind, BlockKind::CodeBlock { .. })
    }
}

/// Something the parser could not classify cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAnomaly {
    /// Lines involved.
    pub line_range: LineRange,
    /// What was odd about them.
    pub message: String,
}

/// A parsed markdown document.
///
/// Immutable after [`Document::parse`]; evaluators only read from it.
#[derive(Debug, Clone)]
pub struct Document {
    /// File identifier.
    pub path: PathBuf,
    /// Document type the rules are selected for.
    pub doc_type: DocType,
    /// Blocks in source order, partitioning every line exactly once.
    pub blocks: Vec<Block>,
    /// Original content.
    pub raw_text: String,
    /// Classification problems found while parsing.
    pub anomalies: Vec<ParseAnomaly>,
    line_starts: Vec<usize>,
}

impl Document {
    /// Parses `raw_text` into a document. Never fails.
    #[must_use]
    pub fn parse(path: impl Into<PathBuf>, doc_type: DocType, raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        let parsed = parser::parse(&raw_text);
        let line_starts = line_starts(&raw_text);
        Self {
            path: path.into(),
            doc_type,
            blocks: parsed.blocks,
            raw_text,
            anomalies: parsed.anomalies,
            line_starts,
        }
    }

    /// Creates a document without content, used when the file was unreadable.
    #[must_use]
    pub fn empty(path: impl Into<PathBuf>, doc_type: DocType) -> Self {
        Self::parse(path, doc_type, String::new())
    }

    /// Number of lines in the source text.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.raw_text.lines().count()
    }

    /// Range covering the whole document (line 1 for an empty one).
    #[must_use]
    pub fn full_range(&self) -> LineRange {
        LineRange::new(1, self.line_count().max(1))
    }

    /// Returns the text of a 1-indexed line.
    #[must_use]
    pub fn line(&self, line: usize) -> Option<&str> {
        line.checked_sub(1)
            .and_then(|i| self.raw_text.lines().nth(i))
    }

    /// Converts a byte offset into a 1-indexed line number.
    #[must_use]
    pub fn line_of_offset(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(i) => i + 1,
            Err(i) => i,
        }
    }

    /// Byte offset where a 1-indexed line starts.
    #[must_use]
    pub fn offset_of_line(&self, line: usize) -> usize {
        line.checked_sub(1)
            .and_then(|i| self.line_starts.get(i).copied())
            .unwrap_or(self.raw_text.len())
    }

    /// Returns the block containing `line`.
    #[must_use]
    pub fn block_at(&self, line: usize) -> Option<&Block> {
        let idx = self
            .blocks
            .partition_point(|b| b.line_range.end < line);
        self.blocks
            .get(idx)
            .filter(|b| b.line_range.contains(line))
    }

    /// Returns true if `line` lies inside a fenced code block (fences included).
    #[must_use]
    pub fn in_code_block(&self, line: usize) -> bool {
        self.block_at(line).is_some_and(Block::is_code_block)
    }

    /// Iterates heading blocks with their index into `blocks`.
    pub fn headings(&self) -> impl Iterator<Item = (usize, &Block)> {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.heading_level().is_some())
    }

    /// Iterates table blocks.
    pub fn tables(&self) -> impl Iterator<Item = (&Block, &Table)> {
        self.blocks.iter().filter_map(|b| match &b.kind {
            BlockKind::Table(t) => Some((b, t)),
            _ => None,
        })
    }

    /// Index one past the last block belonging to the section opened by the
    /// heading at `heading_idx` (next heading of equal or higher level).
    #[must_use]
    pub fn section_end(&self, heading_idx: usize) -> usize {
        let Some(level) = self.blocks.get(heading_idx).and_then(Block::heading_level) else {
            return heading_idx;
        };
        self.blocks[heading_idx + 1..]
            .iter()
            .position(|b| b.heading_level().is_some_and(|l| l <= level))
            .map_or(self.blocks.len(), |p| heading_idx + 1 + p)
    }
}

fn line_starts(text: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    if text.is_empty() {
        return starts;
    }
    starts.push(0);
    for (i, b) in text.bytes().enumerate() {
        if b == b'\n' && i + 1 < text.len() {
            starts.push(i + 1);
        }
    }
    starts
}
