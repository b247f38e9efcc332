//! Heuristic checks on Java source and generated Python.
//!
//! Each check is a regex run over the code part of every line (literal
//! contents blanked, comments cut). A check reports at most once, at the
//! first line it matches. Nothing here blocks a conversion.

use crate::finding::{Finding, FindingKind, Severity};
use crate::scan::CodeChars;
use regex::Regex;
use std::sync::LazyLock;

/// Which side of a conversion a text belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl Side {
    fn comment_marker(self) -> &'static str {
        match self {
            Side::Source => "//",
            Side::Target => "#",
        }
    }
}

struct Check {
    kind: FindingKind,
    severity: Severity,
    pattern: Regex,
    message: &'static str,
}

/// `(kind, severity, pattern, message)`
type CheckDef = (FindingKind, Severity, &'static str, &'static str);

const SOURCE_CHECKS: &[CheckDef] = &[
    (
        FindingKind::EntryPoint,
        Severity::Info,
        r"\bpublic\s+static\s+void\s+main\s*\(",
        "main method found; call it under `if __name__ == \"__main__\":` after conversion",
    ),
    (
        FindingKind::Lambda,
        Severity::Info,
        r"->",
        "lambda expressions are kept as written; rewrite them as `lambda` or a `def`",
    ),
    (
        FindingKind::Switch,
        Severity::Info,
        r"\bswitch\s*\(",
        "switch statements are not translated; rewrite as if/elif or `match`",
    ),
    (
        FindingKind::Generics,
        Severity::Info,
        r"\b[A-Z]\w*\s*<(?:\s*[A-Z?]|>)",
        "generic type arguments are dropped; consider `typing` annotations",
    ),
    (
        FindingKind::Annotation,
        Severity::Info,
        r"^\s*@[A-Za-z]",
        "annotations have no direct Python equivalent and are dropped",
    ),
];

const TARGET_CHECKS: &[CheckDef] = &[
    (
        FindingKind::PrintStatement,
        Severity::Info,
        r"\bprint\(",
        "print is a function call in Python 3",
    ),
    (
        FindingKind::LeftoverTerminator,
        Severity::Warning,
        r";\s*$",
        "line still ends with `;`",
    ),
    (
        FindingKind::LeftoverBrace,
        Severity::Warning,
        r"^\s*[{}]|\{\s*$",
        "stray brace left in the output",
    ),
    (
        FindingKind::UntranslatedOutput,
        Severity::Warning,
        r"\bSystem\.(?:out|err)\.",
        "`System.out`/`System.err` call was not translated",
    ),
    (
        FindingKind::JavaLiteral,
        Severity::Warning,
        r"\b(?:null|true|false)\b",
        "Java literal left in the output; Python spells these `None`, `True`, `False`",
    ),
    (
        FindingKind::JavaOperator,
        Severity::Warning,
        r"&&|\|\||!(?:[^=]|$)",
        "Java logical operator left in the output; Python uses `and`, `or`, `not`",
    ),
];

fn compile(defs: &[CheckDef]) -> Vec<Check> {
    defs.iter()
        .filter_map(|&(kind, severity, pattern, message)| {
            let pattern = Regex::new(pattern).ok()?;
            Some(Check {
                kind,
                severity,
                pattern,
                message,
            })
        })
        .collect()
}

static SOURCE: LazyLock<Vec<Check>> = LazyLock::new(|| compile(SOURCE_CHECKS));
static TARGET: LazyLock<Vec<Check>> = LazyLock::new(|| compile(TARGET_CHECKS));

/// Check Java source text.
pub fn validate_source(text: &str) -> Vec<Finding> {
    run(&SOURCE, text, Side::Source)
}

/// Check generated Python text.
pub fn validate_target(text: &str) -> Vec<Finding> {
    run(&TARGET, text, Side::Target)
}

/// Check either side.
pub fn validate(text: &str, side: Side) -> Vec<Finding> {
    match side {
        Side::Source => validate_source(text),
        Side::Target => validate_target(text),
    }
}

fn run(checks: &[Check], text: &str, side: Side) -> Vec<Finding> {
    let code: Vec<String> = text.lines().map(|l| code_only(l, side)).collect();
    checks
        .iter()
        .filter_map(|check| {
            let line = code.iter().position(|l| check.pattern.is_match(l))?;
            Some(Finding::new(check.kind, check.severity, check.message).at_line(line + 1))
        })
        .collect()
}

/// The line with literal contents blanked and any comment removed.
fn code_only(line: &str, side: Side) -> String {
    let marker = side.comment_marker();
    let mut out = String::with_capacity(line.len());
    for (i, c, lit) in CodeChars::new(line) {
        if lit {
            // keep the quotes so `print("x")` still reads as a call
            out.push(if c == '"' || c == '\'' { c } else { ' ' });
            continue;
        }
        if line[i..].starts_with(marker) {
            break;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(findings: &[Finding]) -> Vec<FindingKind> {
        findings.iter().map(|f| f.kind).collect()
    }

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(SOURCE.len(), SOURCE_CHECKS.len());
        assert_eq!(TARGET.len(), TARGET_CHECKS.len());
    }

    #[test]
    fn test_entry_point_line() {
        let src = "public class App {\n    public static void main(String[] args) {\n    }\n}";
        let findings = validate_source(src);
        assert_eq!(kinds(&findings), vec![FindingKind::EntryPoint]);
        assert_eq!(findings[0].line, Some(2));
        assert_eq!(findings[0].severity, Severity::Info);
    }

    #[test]
    fn test_source_checks_report_once() {
        let src = "@Override\nList<String> a = x.map(s -> s);\nMap<K, V> m = new HashMap<>();\nswitch (k) {";
        let findings = validate_source(src);
        assert_eq!(
            kinds(&findings),
            vec![
                FindingKind::Lambda,
                FindingKind::Switch,
                FindingKind::Generics,
                FindingKind::Annotation
            ]
        );
        assert_eq!(findings[2].line, Some(2));
    }

    #[test]
    fn test_comparison_is_not_generics() {
        assert!(validate_source("if (a < b && c > d) {").is_empty());
    }

    #[test]
    fn test_print_is_info() {
        let findings = validate_target("x = 1\nprint(x)\n");
        assert_eq!(kinds(&findings), vec![FindingKind::PrintStatement]);
        assert_eq!(findings[0].line, Some(2));
        assert!(findings[0].is_suggestion());
    }

    #[test]
    fn test_target_leftovers() {
        let out = "if a && !b:\n    x = null;\n    System.out.flush()\n}";
        let findings = validate_target(out);
        assert_eq!(
            kinds(&findings),
            vec![
                FindingKind::LeftoverTerminator,
                FindingKind::LeftoverBrace,
                FindingKind::UntranslatedOutput,
                FindingKind::JavaLiteral,
                FindingKind::JavaOperator,
            ]
        );
        assert!(findings.iter().all(|f| !f.is_suggestion()));
    }

    #[test]
    fn test_literals_and_comments_ignored() {
        let out = "s = \"a; b && true {\"  # null;\nif a != b: pass\n";
        assert!(validate_target(out).is_empty());
    }

    #[test]
    fn test_clean_python() {
        assert!(validate_target("def f(self):\n    return {}\n").is_empty());
    }
}
