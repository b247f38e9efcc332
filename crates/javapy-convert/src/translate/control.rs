//! Control flow: conditionals, loops, exception handling.

use super::{LineContext, ScopeKind, Translation, inline_statement, is_identifier, tokens};
use crate::finding::{Finding, FindingKind};
use crate::scan::{matching_paren, split_top_level};

/// `keyword (inner) rest` split apart. `None` unless `code` starts with
/// `keyword` followed by a parenthesised group.
fn paren_clause<'a>(code: &'a str, keyword: &str) -> Option<(&'a str, &'a str)> {
    let rest = code.strip_prefix(keyword)?;
    let trimmed = rest.trim_start();
    if !trimmed.starts_with('(') {
        return None;
    }
    let offset = code.len() - trimmed.len();
    let close = matching_paren(code, offset)?;
    Some((code[offset + 1..close].trim(), code[close + 1..].trim()))
}

/// Finish a control header: `if c` + `{` → `if c:`; `if (c) x;` → `if c: x`.
fn header_line(head: String, rest: &str, ctx: &LineContext<'_>) -> Translation {
    if rest.is_empty() && !ctx.opens_scope && ctx.code.trim_end().ends_with(';') {
        // `while (poll());` has an empty body
        return Translation::line(format!("{head}: pass"));
    }
    if ctx.opens_scope || rest.is_empty() {
        let mut t = Translation::line(format!("{head}:"));
        t.expects_body = !ctx.opens_scope;
        return t;
    }
    // `if (x) { y(); }` on one line
    let rest = match rest.strip_prefix('{').and_then(|r| r.strip_suffix('}')) {
        Some(inner) if inner.trim().is_empty() => return Translation::line(format!("{head}: pass")),
        Some(inner) => inner.trim(),
        None => rest,
    };
    let (body, findings) = inline_statement(rest, ctx);
    let mut t = Translation::line(format!("{head}: {body}"));
    t.findings = findings;
    t
}

/// `if (c)` / `else if (c)` / `while (c)` / `else`.
pub(super) fn conditional(ctx: &LineContext<'_>) -> Option<Translation> {
    let code = ctx.header;
    for (keyword, py) in [("else if", "elif"), ("if", "if"), ("while", "while")] {
        if let Some((cond, rest)) = paren_clause(code, keyword) {
            return Some(header_line(format!("{py} {cond}"), rest, ctx));
        }
    }
    let rest = code.strip_prefix("else")?;
    if !(rest.is_empty() || rest.starts_with(char::is_whitespace)) {
        return None;
    }
    Some(header_line("else".to_string(), rest.trim(), ctx))
}

/// Counting and collection `for` loops.
pub(super) fn for_loop(ctx: &LineContext<'_>) -> Option<Translation> {
    let (inner, rest) = paren_clause(ctx.header, "for")?;
    match for_head(inner) {
        Some(head) => Some(header_line(head, rest, ctx)),
        None => Some(Translation::line(ctx.header).with(Finding::info(
            FindingKind::Unsupported,
            format!("for-loop `{}` does not match a range or collection shape", ctx.header),
        ))),
    }
}

/// Python head (without the colon) for the inside of a `for (...)`.
pub fn for_head(inner: &str) -> Option<String> {
    let clauses = split_top_level(inner, ';', false);
    match clauses.as_slice() {
        [init, cond, update] => counting_loop(init, cond, update),
        [single] => {
            let parts = split_top_level(single, ':', true);
            let [decl, collection] = parts.as_slice() else {
                return None;
            };
            let var = *tokens(decl).last()?;
            if !is_identifier(var) || collection.is_empty() {
                return None;
            }
            Some(format!("for {var} in {collection}"))
        }
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cmp {
    Lt,
    Le,
    Gt,
    Ge,
}

fn counting_loop(init: &str, cond: &str, update: &str) -> Option<String> {
    // init: `[type] var = start`
    if split_top_level(init, ',', true).len() != 1 {
        return None;
    }
    let eq = init.find('=')?;
    let decl = tokens(init[..eq].trim());
    let var = *decl.last()?;
    if !is_identifier(var) || decl.len() > 2 {
        return None;
    }
    let start = init[eq + 1..].trim();
    if start.is_empty() {
        return None;
    }

    // cond: `var <cmp> bound`
    let (cmp, lhs, bound) = split_comparison(cond)?;
    if lhs != var || bound.is_empty() || bound.contains("&&") || bound.contains("||") {
        return None;
    }

    let step = parse_step(update, var)?;
    let ascending = matches!(cmp, Cmp::Lt | Cmp::Le);
    if ascending != !step.starts_with('-') {
        return None;
    }

    let stop = match cmp {
        Cmp::Lt | Cmp::Gt => bound.to_string(),
        Cmp::Le => offset_bound(bound, 1),
        Cmp::Ge => offset_bound(bound, -1),
    };
    let args = match (start, step.as_str()) {
        ("0", "1") => stop,
        (_, "1") => format!("{start}, {stop}"),
        _ => format!("{start}, {stop}, {step}"),
    };
    Some(format!("for {var} in range({args})"))
}

fn split_comparison(cond: &str) -> Option<(Cmp, &str, &str)> {
    for (op, cmp) in [("<=", Cmp::Le), (">=", Cmp::Ge), ("<", Cmp::Lt), (">", Cmp::Gt)] {
        if let Some(at) = cond.find(op) {
            let lhs = cond[..at].trim();
            let rhs = cond[at + op.len()..].trim();
            return Some((cmp, lhs, rhs));
        }
    }
    None
}

/// Step as Python source: `1`, `-1`, `2`, `-(k)`.
fn parse_step(update: &str, var: &str) -> Option<String> {
    let update = update.trim();
    let inc = [format!("{var}++"), format!("++{var}")];
    let dec = [format!("{var}--"), format!("--{var}")];
    if inc.iter().any(|u| u == update) {
        return Some("1".into());
    }
    if dec.iter().any(|u| u == update) {
        return Some("-1".into());
    }
    let rest = update.strip_prefix(var)?.trim_start();
    if let Some(k) = rest.strip_prefix("+=") {
        let k = k.trim();
        return (!k.is_empty() && !k.starts_with('-')).then(|| k.to_string());
    }
    if let Some(k) = rest.strip_prefix("-=") {
        let k = k.trim();
        if k.is_empty() {
            return None;
        }
        return Some(match k.parse::<i64>().ok().and_then(i64::checked_neg) {
            Some(n) => n.to_string(),
            None => format!("-({k})"),
        });
    }
    None
}

/// `bound + delta`, folded when `bound` is an integer literal.
fn offset_bound(bound: &str, delta: i64) -> String {
    match bound.parse::<i64>().ok().and_then(|n| n.checked_add(delta)) {
        Some(n) => n.to_string(),
        None if delta >= 0 => format!("{bound} + {delta}"),
        None => format!("{bound} - {}", delta.unsigned_abs()),
    }
}

/// `try`, `catch`, `finally`, `do`, `synchronized`.
pub(super) fn exception_block(ctx: &LineContext<'_>) -> Option<Translation> {
    if !ctx.opens_scope {
        return None;
    }
    let h = ctx.header;
    match h {
        "try" => return Some(Translation::line("try:")),
        "finally" => return Some(Translation::line("finally:")),
        "do" => return Some(Translation::line("while True:").opening(ScopeKind::DoLoop)),
        _ => {}
    }
    if let Some((resources, _)) = paren_clause(h, "try") {
        return Some(try_with_resources(resources, h));
    }
    if let Some((param, _)) = paren_clause(h, "catch") {
        let toks = tokens(param);
        let (&name, types) = toks.split_last()?;
        let joined = types.join(" ");
        let types: Vec<&str> = joined
            .split('|')
            .map(str::trim)
            .filter(|t| !t.is_empty() && *t != "final")
            .map(|t| t.trim_start_matches("final ").trim())
            .collect();
        let clause = match types.as_slice() {
            [] => "Exception".to_string(),
            [one] => one.to_string(),
            many => format!("({})", many.join(", ")),
        };
        return Some(Translation::line(format!("except {clause} as {name}:")));
    }
    if let Some((lock, _)) = paren_clause(h, "synchronized") {
        return Some(Translation::line(format!("with {lock}:")).with(Finding::info(
            FindingKind::Unsupported,
            format!("`synchronized ({lock})` became `with {lock}:`; the lock must be a context manager"),
        )));
    }
    None
}

fn try_with_resources(resources: &str, header: &str) -> Translation {
    let items: Vec<&str> = split_top_level(resources, ';', true)
        .into_iter()
        .filter(|r| !r.is_empty())
        .collect();
    let mut withs = Vec::new();
    for item in &items {
        let Some(eq) = item.find('=') else {
            withs.push(item.to_string());
            continue;
        };
        let Some(&name) = tokens(item[..eq].trim()).last() else {
            continue;
        };
        withs.push(format!("{} as {name}", item[eq + 1..].trim()));
    }
    if withs.is_empty() {
        return Translation::line("try:").with(Finding::info(
            FindingKind::Unsupported,
            format!("could not read resources of `{header}`"),
        ));
    }
    Translation::line(format!("with {}:", withs.join(", ")))
}

/// Text after a `}` that does not reopen a block.
pub(super) fn close_tail(tail: &str, closed: Option<&ScopeKind>) -> Translation {
    let tail = tail.trim();
    if !tail.chars().any(|c| c.is_alphanumeric()) {
        return Translation::empty();
    }
    if let Some((cond, _)) = paren_clause(super::strip_terminator(tail), "while") {
        if closed == Some(&ScopeKind::DoLoop) {
            return Translation::empty()
                .push(1, format!("if not ({cond}):"))
                .push(2, "break");
        }
    }
    Translation::line(super::strip_terminator(tail)).with(Finding::info(
        FindingKind::Unsupported,
        format!("text after `}}` passed through: `{tail}`"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_head_shapes() {
        assert_eq!(for_head("int i = 0; i < 10; i++").as_deref(), Some("for i in range(10)"));
        assert_eq!(for_head("i = 0; i < n; ++i").as_deref(), Some("for i in range(n)"));
        assert_eq!(for_head("int i = n; i >= 0; i--").as_deref(), Some("for i in range(n, -1, -1)"));
        assert_eq!(for_head("int i = 10; i > 0; i -= 3").as_deref(), Some("for i in range(10, 0, -3)"));
        assert_eq!(for_head("int k = 0; k <= n; k++").as_deref(), Some("for k in range(n + 1)"));
        assert_eq!(for_head("String w : words").as_deref(), Some("for w in words"));
    }

    #[test]
    fn test_for_head_rejects_mismatched_shapes() {
        // direction disagrees with the comparison
        assert_eq!(for_head("int i = 0; i < 10; i--"), None);
        // condition on another variable
        assert_eq!(for_head("int i = 0; j < 10; i++"), None);
        assert_eq!(for_head(";;"), None);
        assert_eq!(for_head("int i = 0, j = 0; i < n; i++"), None);
    }

    #[test]
    fn test_extreme_literals_stay_symbolic() {
        assert_eq!(offset_bound("9223372036854775807", 1), "9223372036854775807 + 1");
        assert_eq!(offset_bound("-9223372036854775808", -1), "-9223372036854775808 - 1");
        assert_eq!(offset_bound("7", -1), "6");
        assert_eq!(
            parse_step("i -= -9223372036854775808", "i").as_deref(),
            Some("-(-9223372036854775808)")
        );
        assert_eq!(parse_step("i -= 4", "i").as_deref(), Some("-4"));
        assert_eq!(
            for_head("long i = 0; i <= 9223372036854775807; i++").as_deref(),
            Some("for i in range(9223372036854775807 + 1)")
        );
    }

    #[test]
    fn test_do_while_close() {
        let t = close_tail("while (x < 3);", Some(&ScopeKind::DoLoop));
        let texts: Vec<(usize, &str)> = t
            .lines
            .iter()
            .map(|l| (l.extra_indent, l.text.as_str()))
            .collect();
        assert_eq!(texts, vec![(1, "if not (x < 3):"), (2, "break")]);
    }

    #[test]
    fn test_close_tail_punctuation_ignored() {
        assert!(close_tail(");", None).lines.is_empty());
        assert!(close_tail(";", None).findings.is_empty());
    }

    #[test]
    fn test_try_with_resources() {
        let ctx_opts = crate::options::ConversionOptions::default();
        let t = super::super::translate_code(
            "try (BufferedReader br = new BufferedReader(r)) {",
            true,
            &[],
            &ctx_opts,
        );
        assert_eq!(t.lines[0].text, "with new BufferedReader(r) as br:");
    }

    #[test]
    fn test_empty_while_body() {
        let t = super::super::translate_code("while (poll());", false, &[], &Default::default());
        assert_eq!(t.lines[0].text, "while poll(): pass");
        assert!(!t.expects_body);
    }

    #[test]
    fn test_brace_less_if_expects_body() {
        let t = super::super::translate_code("if (x > 1)", false, &[], &Default::default());
        assert_eq!(t.lines[0].text, "if x > 1:");
        assert!(t.expects_body);
    }
}
