//! Quote-aware scanning over one line of Java source.
//!
//! Everything that looks for a delimiter (comment markers, braces, `=`,
//! parameter lists) goes through [`CodeChars`] so that text inside string and
//! char literals never counts.

use std::str::CharIndices;

/// Iterator over `(byte offset, char, in_literal)` for a line of source.
///
/// The quote characters themselves report `in_literal = true`.
pub struct CodeChars<'a> {
    chars: CharIndices<'a>,
    quote: Option<char>,
    escaped: bool,
}

impl<'a> CodeChars<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            chars: line.char_indices(),
            quote: None,
            escaped: false,
        }
    }

    /// Whether the scan currently sits inside an unterminated literal.
    pub fn in_literal(&self) -> bool {
        self.quote.is_some()
    }
}

impl Iterator for CodeChars<'_> {
    type Item = (usize, char, bool);

    fn next(&mut self) -> Option<Self::Item> {
        let (i, c) = self.chars.next()?;
        match self.quote {
            Some(q) => {
                if self.escaped {
                    self.escaped = false;
                } else if c == '\\' {
                    self.escaped = true;
                } else if c == q {
                    self.quote = None;
                }
                Some((i, c, true))
            }
            None => {
                if c == '"' || c == '\'' {
                    self.quote = Some(c);
                    Some((i, c, true))
                } else {
                    Some((i, c, false))
                }
            }
        }
    }
}

/// Code positions outside literals, with the bracket depth *before* the char.
///
/// Depth counts `()`, `[]` and `{}` together and never goes below zero.
pub fn top_level(line: &str) -> impl Iterator<Item = (usize, char, usize)> + '_ {
    let mut depth = 0usize;
    CodeChars::new(line)
        .filter(|&(_, _, lit)| !lit)
        .map(move |(i, c, _)| {
            let before = depth;
            match c {
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth = depth.saturating_sub(1),
                _ => {}
            }
            let at = if matches!(c, ')' | ']' | '}') { depth } else { before };
            (i, c, at)
        })
}

/// Marker that starts a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentMarker {
    /// `//`
    Line,
    /// `/*`
    Block,
}

/// Find the first comment marker outside any literal.
pub fn find_comment(line: &str) -> Option<(usize, CommentMarker)> {
    let bytes = line.as_bytes();
    for (i, c, lit) in CodeChars::new(line) {
        if lit || c != '/' {
            continue;
        }
        match bytes.get(i + 1) {
            Some(b'/') => return Some((i, CommentMarker::Line)),
            Some(b'*') => return Some((i, CommentMarker::Block)),
            _ => {}
        }
    }
    None
}

/// A line split into its code part and any trailing comment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SplitComment {
    /// Code with comments removed, trimmed.
    pub code: String,
    /// Text of the comments that were removed, markers stripped.
    pub comment: Option<String>,
    /// A `/*` was opened and not closed on this line.
    pub opens_block: bool,
}

/// Separate code from `//` and `/* */` comments on one line.
///
/// Inline block comments that close on the same line are cut out and scanning
/// continues after them.
pub fn split_comment(line: &str) -> SplitComment {
    let mut code = String::new();
    let mut comments: Vec<String> = Vec::new();
    let mut rest = line;

    loop {
        match find_comment(rest) {
            None => {
                code.push_str(rest);
                break;
            }
            Some((at, CommentMarker::Line)) => {
                code.push_str(&rest[..at]);
                comments.push(rest[at + 2..].trim().to_string());
                break;
            }
            Some((at, CommentMarker::Block)) => {
                code.push_str(&rest[..at]);
                let body = &rest[at + 2..];
                match body.find("*/") {
                    Some(end) => {
                        comments.push(body[..end].trim().to_string());
                        code.push(' ');
                        rest = &body[end + 2..];
                    }
                    None => {
                        comments.push(body.trim().to_string());
                        return SplitComment {
                            code: code.trim().to_string(),
                            comment: Some(comments.join(" ")),
                            opens_block: true,
                        };
                    }
                }
            }
        }
    }

    let comments: Vec<String> = comments.into_iter().filter(|c| !c.is_empty()).collect();
    SplitComment {
        code: code.trim().to_string(),
        comment: (!comments.is_empty()).then(|| comments.join(" ")),
        opens_block: false,
    }
}

/// Index of the `)` matching the `(` at `open`, skipping literals.
pub fn matching_paren(line: &str, open: usize) -> Option<usize> {
    if line.as_bytes().get(open) != Some(&b'(') {
        return None;
    }
    let mut depth = 0usize;
    for (i, c, lit) in CodeChars::new(line) {
        if lit || i < open {
            continue;
        }
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// First `(` outside literals.
pub fn first_open_paren(line: &str) -> Option<usize> {
    CodeChars::new(line)
        .find(|&(_, c, lit)| !lit && c == '(')
        .map(|(i, _, _)| i)
}

/// Split on `sep` at bracket depth zero, outside literals.
///
/// When `angles` is set, `<...>` also nests; use it only where `<` cannot be a
/// comparison (declarations and parameter lists).
pub fn split_top_level(line: &str, sep: char, angles: bool) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c, lit) in CodeChars::new(line) {
        if lit {
            continue;
        }
        match c {
            '(' | '[' | '{' => depth += 1,
            '<' if angles => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            '>' if angles => depth = depth.saturating_sub(1),
            _ if c == sep && depth == 0 => {
                parts.push(line[start..i].trim());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(line[start..].trim());
    parts
}

/// Whether the last character of `code` is `c` and sits outside any literal.
pub fn ends_with_code(code: &str, c: char) -> bool {
    let mut last = None;
    let mut scan = CodeChars::new(code);
    for (i, ch, lit) in scan.by_ref() {
        if !ch.is_whitespace() {
            last = Some((i, ch, lit));
        }
    }
    matches!(last, Some((_, ch, false)) if ch == c) && !scan.in_literal()
}
