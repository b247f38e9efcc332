//! Simple statements: output calls, assignments, returns.

use super::{LineContext, Translation, is_identifier, starts_with_control, tokens};
use crate::finding::{Finding, FindingKind};
use crate::naming::is_constant_name;
use crate::scan::{matching_paren, top_level};

/// Where a Java output call writes and whether it ends the line.
#[derive(Clone, Copy)]
struct OutputCall {
    prefix: &'static str,
    newline: bool,
    stderr: bool,
}

// Longer prefixes first: `System.out.print` is a prefix of `println`.
const OUTPUT_CALLS: &[OutputCall] = &[
    OutputCall { prefix: "System.out.println", newline: true, stderr: false },
    OutputCall { prefix: "System.out.print", newline: false, stderr: false },
    OutputCall { prefix: "System.err.println", newline: true, stderr: true },
    OutputCall { prefix: "System.err.print", newline: false, stderr: true },
];

/// `System.out.println(x);` → `print(x)`, argument text kept verbatim.
pub(super) fn print_call(ctx: &LineContext<'_>) -> Option<Translation> {
    if ctx.opens_scope {
        return None;
    }
    let (call, rest) = OUTPUT_CALLS.iter().find_map(|c| {
        let rest = ctx.header.strip_prefix(c.prefix)?.trim_start();
        rest.starts_with('(').then_some((*c, rest))
    })?;
    let close = matching_paren(rest, 0)?;
    if !rest[close + 1..].trim().is_empty() {
        return None;
    }
    let arg = rest[1..close].trim();

    let mut args: Vec<&str> = Vec::new();
    if !arg.is_empty() {
        args.push(arg);
    }
    if !call.newline {
        args.push("end=\"\"");
    }
    if call.stderr {
        args.push("file=sys.stderr");
    }
    let t = Translation::line(format!("print({})", args.join(", ")));
    if call.stderr {
        return Some(t.with(Finding::info(
            FindingKind::Import,
            "output to stderr needs `import sys`",
        )));
    }
    Some(t)
}

/// `i++;` → `i += 1`
pub(super) fn increment(ctx: &LineContext<'_>) -> Option<Translation> {
    if ctx.opens_scope || starts_with_control(ctx.header) {
        return None;
    }
    let h = ctx.header;
    let (target, op) = if let Some(t) = h.strip_suffix("++") {
        (t, "+=")
    } else if let Some(t) = h.strip_suffix("--") {
        (t, "-=")
    } else if let Some(t) = h.strip_prefix("++") {
        (t, "+=")
    } else if let Some(t) = h.strip_prefix("--") {
        (t, "-=")
    } else {
        return None;
    };
    let target = target.trim();
    if !is_assign_target(target) {
        return None;
    }
    Some(Translation::line(format!(
        "{} {op} 1",
        rename_target(target, ctx)
    )))
}

/// `int totalCount = a + b;` → `total_count = a + b`
pub(super) fn assignment(ctx: &LineContext<'_>) -> Option<Translation> {
    if ctx.opens_scope || starts_with_control(ctx.header) {
        return None;
    }
    let (op_start, op_end) = find_assignment(ctx.header)?;
    let lhs = ctx.header[..op_start].trim();
    let op = &ctx.header[op_start..op_end];
    let rhs = ctx.header[op_end..].trim();

    let toks = tokens(lhs);
    let target = *toks.last()?;
    let target = target.trim_end_matches("[]");
    if !is_assign_target(target) {
        return None;
    }
    let target = rename_target(target, ctx);
    let rhs = array_initializer(rhs);
    Some(Translation::line(format!("{target} {op} {rhs}")))
}

pub(super) fn return_stmt(ctx: &LineContext<'_>) -> Option<Translation> {
    if ctx.opens_scope || !starts_with_word(ctx.header, "return") {
        return None;
    }
    Some(Translation::line(ctx.header))
}

/// `throw new E(msg);` → `raise E(msg)`
pub(super) fn throw_stmt(ctx: &LineContext<'_>) -> Option<Translation> {
    if ctx.opens_scope || !starts_with_word(ctx.header, "throw") {
        return None;
    }
    let expr = ctx.header["throw".len()..].trim();
    let expr = expr.strip_prefix("new ").map(str::trim_start).unwrap_or(expr);
    Some(Translation::line(format!("raise {expr}")))
}

/// Anything unrecognized. Statements lose their terminator; an unknown block
/// opener becomes `if True:` so its body stays nested.
pub(super) fn fallback(ctx: &LineContext<'_>) -> Option<Translation> {
    if !ctx.opens_scope {
        return Some(Translation::line(ctx.header));
    }
    let header = ctx.header.trim();
    let text = if header.is_empty() {
        "if True:".to_string()
    } else {
        format!("if True:  # {header}")
    };
    let what = if header.is_empty() { "{" } else { header };
    Some(Translation::line(text).with(Finding::info(
        FindingKind::Unsupported,
        format!("block `{what}` has no direct Python equivalent; kept as a nested block"),
    )))
}

/// Locate the top-level assignment operator, skipping `==`, `!=`, `<=`, `>=`.
///
/// Returns the byte range of the operator, including any compound prefix
/// (`+=`, `<<=`, `>>>=`).
pub fn find_assignment(code: &str) -> Option<(usize, usize)> {
    let bytes = code.as_bytes();
    for (i, c, depth) in top_level(code) {
        if c != '=' || depth != 0 {
            continue;
        }
        if bytes.get(i + 1) == Some(&b'=') {
            return None;
        }
        let prev = i.checked_sub(1).map(|p| bytes[p]);
        match prev {
            Some(b'=' | b'!') => return None,
            Some(b'+' | b'-' | b'*' | b'/' | b'%' | b'&' | b'|' | b'^') => {
                return Some((i - 1, i + 1));
            }
            Some(p @ (b'<' | b'>')) => {
                let mut start = i - 1;
                while start > 0 && bytes[start - 1] == p {
                    start -= 1;
                }
                if start == i - 1 {
                    // `<=` / `>=`
                    return None;
                }
                return Some((start, i + 1));
            }
            _ => return Some((i, i + 1)),
        }
    }
    None
}

fn starts_with_word(s: &str, word: &str) -> bool {
    match s.strip_prefix(word) {
        Some(rest) => rest.is_empty() || rest.starts_with([' ', '(', '\t', '"']),
        None => false,
    }
}

/// A plain name, a dotted field path or an indexed element.
fn is_assign_target(target: &str) -> bool {
    let base = target.split(['[', '.']).next().unwrap_or("");
    is_identifier(base)
}

/// Apply the naming convention to a plain variable; `this.x` becomes `self.x`.
fn rename_target(target: &str, ctx: &LineContext<'_>) -> String {
    if let Some(field) = target.strip_prefix("this.") {
        return format!("self.{field}");
    }
    if !is_identifier(target) || is_constant_name(target) {
        return target.to_string();
    }
    ctx.options.naming_convention.apply(target)
}

/// `{1, 2}` and `new int[]{1, 2}` → `[1, 2]`
fn array_initializer(rhs: &str) -> String {
    let body = match rhs.strip_prefix("new ") {
        Some(rest) => match rest.find("[]") {
            Some(at) if rest[at + 2..].trim_start().starts_with('{') => rest[at + 2..].trim_start(),
            _ => return rhs.to_string(),
        },
        None => rhs,
    };
    match body.strip_prefix('{').and_then(|b| b.strip_suffix('}')) {
        Some(items) => format!("[{}]", items.trim()),
        None => rhs.to_string(),
    }
}
