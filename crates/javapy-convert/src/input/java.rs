//! Java line classifier.
//!
//! Splits Java source into logical lines and tags each with a [`LineKind`] and
//! a nesting depth. Nothing here understands Java beyond comments, literals
//! and braces.

use crate::indent::IndentTracker;
use crate::ir::{ClassifiedLine, LineKind};
use crate::scan::{ends_with_code, split_comment};
use crate::traits::{ReadError, Reader};

/// Static instance of the Java reader for registry.
pub static JAVA_READER: JavaReader = JavaReader;

/// Java reader.
pub struct JavaReader;

impl Reader for JavaReader {
    fn language(&self) -> &'static str {
        "java"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["java"]
    }

    fn read(&self, source: &str) -> Result<Vec<ClassifiedLine>, ReadError> {
        read_java(source)
    }
}

/// Classify Java source, rejecting binary content.
pub fn read_java(source: &str) -> Result<Vec<ClassifiedLine>, ReadError> {
    if let Some(at) = source.find('\0') {
        return Err(ReadError::Binary(at));
    }
    Ok(classify(source))
}

/// Classify Java source line by line. Never fails; unbalanced braces are
/// clamped and flagged on the offending line.
pub fn classify(source: &str) -> Vec<ClassifiedLine> {
    let mut ctx = ClassifyContext::default();
    for (i, raw) in source.lines().enumerate() {
        ctx.line(i + 1, raw);
    }
    ctx.lines
}

#[derive(Default)]
struct ClassifyContext {
    lines: Vec<ClassifiedLine>,
    tracker: IndentTracker,
    in_block_comment: bool,
}

impl ClassifyContext {
    fn line(&mut self, number: usize, raw: &str) {
        let trimmed = raw.trim();
        let depth = self.tracker.depth();

        if self.in_block_comment {
            let Some(end) = raw.find("*/") else {
                self.push(ClassifiedLine::new(number, raw, LineKind::BlockCommentLine, depth));
                return;
            };
            self.in_block_comment = false;
            // ` b */ int z = 1;` is a comment line followed by code on the same line.
            let (comment, rest) = raw.split_at(end + 2);
            self.push(ClassifiedLine::new(number, comment, LineKind::BlockCommentLine, depth));
            if !rest.trim().is_empty() {
                self.line(number, rest);
            }
            return;
        }
        if trimmed.is_empty() {
            self.push(ClassifiedLine::new(number, raw, LineKind::Blank, depth));
            return;
        }
        if trimmed.starts_with("//") {
            self.push(ClassifiedLine::new(number, raw, LineKind::LineComment, depth));
            return;
        }

        let split = split_comment(trimmed);
        if split.opens_block {
            self.in_block_comment = true;
        }
        if split.code.is_empty() {
            let kind = if trimmed.starts_with("/*") {
                LineKind::BlockCommentLine
            } else {
                LineKind::LineComment
            };
            self.push(ClassifiedLine::new(number, raw, kind, depth));
            return;
        }

        let code = split.code;
        if code == "{" && self.merge_allman_brace() {
            return;
        }
        if code.starts_with('}') {
            self.close_line(number, raw, &code);
        } else if ends_with_code(&code, '{') {
            let depth = self.tracker.open();
            self.push(ClassifiedLine::new(number, raw, LineKind::BlockOpen, depth).with_code(code));
        } else {
            self.push(ClassifiedLine::new(number, raw, LineKind::Statement, depth).with_code(code));
        }
    }

    /// `}`, `}}`, `} else {`, `} while (x);`
    fn close_line(&mut self, number: usize, raw: &str, code: &str) {
        let mut rest = code;
        let mut clamped = false;
        while let Some(after) = rest.strip_prefix('}') {
            clamped |= !self.tracker.close();
            rest = after.trim_start();
        }
        let tail = rest.trim();
        let reopens = !tail.is_empty() && ends_with_code(tail, '{');
        let depth = self.tracker.depth();
        if reopens {
            self.tracker.open();
        }
        let mut line = ClassifiedLine::new(number, raw, LineKind::BlockClose, depth).with_code(code);
        line.tail = (!tail.is_empty()).then(|| tail.to_string());
        line.reopens = reopens;
        line.clamped = clamped;
        self.push(line);
    }

    /// A lone `{` after an unterminated statement opens that statement's block.
    fn merge_allman_brace(&mut self) -> bool {
        let Some(prev) = self.lines.last_mut() else {
            return false;
        };
        if prev.kind != LineKind::Statement || prev.code.ends_with(';') {
            return false;
        }
        prev.kind = LineKind::BlockOpen;
        prev.code.push_str(" {");
        prev.trimmed.push_str(" {");
        self.tracker.open();
        true
    }

    fn push(&mut self, line: ClassifiedLine) {
        self.lines.push(line);
    }
}
