//! Line-level intermediate representation.
//!
//! A reader produces [`ClassifiedLine`]s; a writer consumes them. There is no
//! tree: nesting lives entirely in each line's `depth`.

use serde::{Deserialize, Serialize};

/// Syntactic category of one logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Blank,
    LineComment,
    BlockCommentLine,
    /// Code ending in the scope-open delimiter.
    BlockOpen,
    /// Code starting with the scope-close delimiter.
    BlockClose,
    Statement,
}

/// One classified logical line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedLine {
    /// 1-based physical line number of the first line this covers.
    pub number: usize,
    /// The line exactly as written.
    pub raw: String,
    /// `raw` without surrounding whitespace.
    pub trimmed: String,
    /// `trimmed` with comments removed. Empty for comment and blank lines.
    pub code: String,
    pub kind: LineKind,
    /// Nesting depth this line is emitted at.
    pub depth: usize,
    /// For `BlockClose`: text after the leading `}` (`else {`, `while (x);`).
    pub tail: Option<String>,
    /// A `BlockClose` whose tail opens a new block (`} else {`).
    pub reopens: bool,
    /// A `BlockClose` that found the depth already at zero.
    pub clamped: bool,
}

impl ClassifiedLine {
    pub fn new(number: usize, raw: &str, kind: LineKind, depth: usize) -> Self {
        let trimmed = raw.trim();
        Self {
            number,
            raw: raw.to_string(),
            trimmed: trimmed.to_string(),
            code: String::new(),
            kind,
            depth,
            tail: None,
            reopens: false,
            clamped: false,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Whether this line opens a scope (including `} else {`).
    pub fn opens_scope(&self) -> bool {
        self.kind == LineKind::BlockOpen || self.reopens
    }
}

/// Brace balance over a classified sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Balance {
    /// Close delimiters that had nothing to close.
    pub unmatched_closes: usize,
    /// Depth still open at end of input.
    pub unclosed: usize,
}

impl Balance {
    pub fn of(lines: &[ClassifiedLine]) -> Self {
        let unmatched_closes = lines.iter().filter(|l| l.clamped).count();
        let unclosed = lines
            .iter()
            .rev()
            .find(|l| !matches!(l.kind, LineKind::Blank))
            .map(|l| if l.opens_scope() { l.depth + 1 } else { l.depth })
            .unwrap_or(0);
        Self {
            unmatched_closes,
            unclosed,
        }
    }
}
