//! Line-by-line Java → Python statement translation.
//!
//! Each rule is an independent `fn(&LineContext) -> Option<Translation>`. The
//! [`RULES`] table is tried in order and the first rule returning `Some` wins;
//! the last entry always matches. Rules are pure: everything they need is in
//! the context, and any doubt is reported as a [`Finding`] next to the text.

mod control;
mod decl;
mod stmt;

use crate::finding::Finding;
use crate::ir::{ClassifiedLine, LineKind};
use crate::options::ConversionOptions;

pub use decl::python_type;

/// What kind of scope an opener starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeKind {
    /// A class, interface, enum or record body.
    Class { name: String, is_enum: bool },
    /// A method or constructor body.
    Callable,
    /// `do { ... } while (...)`, rendered as `while True:`.
    DoLoop,
    /// if/else/loops/try and anything else.
    Block,
}

/// One emitted line, relative to the depth of the source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutLine {
    pub extra_indent: usize,
    pub text: String,
}

/// The result of translating one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    pub lines: Vec<OutLine>,
    pub findings: Vec<Finding>,
    /// Scope this line opens, when it opens one.
    pub opens: Option<ScopeKind>,
    /// A brace-less header whose single-statement body is on the next line.
    pub expects_body: bool,
}

impl Translation {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn line(text: impl Into<String>) -> Self {
        Self {
            lines: vec![OutLine {
                extra_indent: 0,
                text: text.into(),
            }],
            ..Self::default()
        }
    }

    pub fn push(mut self, extra_indent: usize, text: impl Into<String>) -> Self {
        self.lines.push(OutLine {
            extra_indent,
            text: text.into(),
        });
        self
    }

    pub fn opening(mut self, scope: ScopeKind) -> Self {
        self.opens = Some(scope);
        self
    }

    pub fn with(mut self, finding: Finding) -> Self {
        self.findings.push(finding);
        self
    }

    /// Text of the only line, for inlining after `if x:`.
    fn single_text(&self) -> Option<&str> {
        match self.lines.as_slice() {
            [only] if only.extra_indent == 0 => Some(&only.text),
            _ => None,
        }
    }
}

/// Everything a rule may look at.
pub struct LineContext<'a> {
    /// The code being translated: the line's code, or a close line's tail.
    pub code: &'a str,
    /// `code` with the trailing `{` or `;` removed.
    pub header: &'a str,
    /// The line opens a scope (`header` had a `{`).
    pub opens_scope: bool,
    /// Enclosing scopes, outermost first.
    pub scopes: &'a [ScopeKind],
    pub options: &'a ConversionOptions,
}

impl LineContext<'_> {
    /// Name of the class whose body directly contains this line.
    pub fn enclosing_class(&self) -> Option<&str> {
        match self.scopes.last() {
            Some(ScopeKind::Class { name, .. }) => Some(name),
            _ => None,
        }
    }

    pub fn in_enum_body(&self) -> bool {
        matches!(self.scopes.last(), Some(ScopeKind::Class { is_enum: true, .. }))
    }
}

/// A named translation rule.
pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&LineContext<'_>) -> Option<Translation>,
}

/// Translation rules in priority order. The final rule always matches.
pub static RULES: &[Rule] = &[
    Rule { name: "annotation", apply: decl::annotation },
    Rule { name: "package_import", apply: decl::package_import },
    Rule { name: "class_decl", apply: decl::class_decl },
    Rule { name: "callable_decl", apply: decl::callable_decl },
    Rule { name: "enum_constants", apply: decl::enum_constants },
    Rule { name: "print", apply: stmt::print_call },
    Rule { name: "increment", apply: stmt::increment },
    Rule { name: "assignment", apply: stmt::assignment },
    Rule { name: "return", apply: stmt::return_stmt },
    Rule { name: "throw", apply: stmt::throw_stmt },
    Rule { name: "declaration", apply: decl::bare_declaration },
    Rule { name: "conditional", apply: control::conditional },
    Rule { name: "for_loop", apply: control::for_loop },
    Rule { name: "exception_block", apply: control::exception_block },
    Rule { name: "fallback", apply: stmt::fallback },
];

/// Translate one `Statement`, `BlockOpen` or reopening `BlockClose` line.
pub fn translate_line(
    line: &ClassifiedLine,
    scopes: &[ScopeKind],
    options: &ConversionOptions,
) -> Translation {
    let code = match line.kind {
        LineKind::BlockClose => line.tail.as_deref().unwrap_or(""),
        _ => line.code.as_str(),
    };
    translate_code(code, line.opens_scope(), scopes, options)
}

/// Translate a bare code fragment.
pub fn translate_code(
    code: &str,
    opens_scope: bool,
    scopes: &[ScopeKind],
    options: &ConversionOptions,
) -> Translation {
    let header = if opens_scope {
        code.strip_suffix('{').unwrap_or(code).trim_end()
    } else {
        strip_terminator(code)
    };
    let ctx = LineContext {
        code,
        header,
        opens_scope,
        scopes,
        options,
    };
    for rule in RULES {
        if let Some(mut t) = (rule.apply)(&ctx) {
            if opens_scope && t.opens.is_none() {
                t.opens = Some(ScopeKind::Block);
            }
            return t;
        }
    }
    // The fallback rule always matches.
    Translation::line(header)
}

/// Translate the statement after a brace-less `if (c)` so it can be inlined.
fn inline_statement(rest: &str, ctx: &LineContext<'_>) -> (String, Vec<Finding>) {
    let t = translate_code(rest, false, ctx.scopes, ctx.options);
    match t.single_text() {
        Some(text) => (text.to_string(), t.findings),
        None => (strip_terminator(rest).to_string(), t.findings),
    }
}

/// Translate text following a `}` that does not open a new block.
///
/// `} while (cond);` closes a `do` loop; everything else is punctuation left
/// over from anonymous classes and array initializers, or is unsupported.
pub fn translate_close_tail(tail: &str, closed: Option<&ScopeKind>) -> Translation {
    control::close_tail(tail, closed)
}

/// Drop one trailing `;` and surrounding whitespace.
pub fn strip_terminator(code: &str) -> &str {
    let code = code.trim();
    code.strip_suffix(';').unwrap_or(code).trim_end()
}

/// Java identifier (ASCII letters, digits, `_`, `$`; no leading digit).
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Declaration modifiers.
pub const MODIFIERS: &[&str] = &[
    "public",
    "private",
    "protected",
    "static",
    "final",
    "abstract",
    "synchronized",
    "native",
    "transient",
    "volatile",
    "strictfp",
    "default",
    "sealed",
    "non-sealed",
];

/// Keywords whose header can carry a brace-less body on the same line.
const CONTROL_KEYWORDS: &[&str] = &["if", "else", "while", "for", "do"];

/// `if (c) y = 1;`, `else y = 2;`: the statement after the keyword is a body,
/// and only the control-flow rules may translate the line.
pub fn starts_with_control(header: &str) -> bool {
    CONTROL_KEYWORDS.iter().any(|kw| match header.strip_prefix(kw) {
        Some(rest) => rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace() || c == '('),
        None => false,
    })
}

/// Words that can never name a method or variable.
pub const KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "case", "try", "catch", "finally", "return",
    "throw", "new", "synchronized", "break", "continue", "class", "interface", "enum", "import",
    "package", "assert", "yield",
];

/// Split on whitespace at top level, keeping `Map<String, Integer>` together.
pub fn tokens(s: &str) -> Vec<&str> {
    crate::scan::split_top_level(s, ' ', true)
        .into_iter()
        .flat_map(|t| t.split('\t'))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Remove leading `@Annotation` / `@Annotation(...)` tokens.
pub fn strip_annotations(code: &str) -> &str {
    let mut rest = code.trim_start();
    while let Some(after_at) = rest.strip_prefix('@') {
        let name_end = after_at
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
            .unwrap_or(after_at.len());
        let mut after = &after_at[name_end..];
        if after.starts_with('(') {
            match crate::scan::matching_paren(after, 0) {
                Some(close) => after = &after[close + 1..],
                None => return rest,
            }
        }
        rest = after.trim_start();
    }
    rest
}
