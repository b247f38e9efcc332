//! Declarations: types, callables, fields, annotations and imports.

use super::{
    KEYWORDS, LineContext, MODIFIERS, ScopeKind, Translation, is_identifier, starts_with_control,
    strip_annotations, tokens,
};
use crate::finding::{Finding, FindingKind};
use crate::scan::{first_open_paren, matching_paren, split_top_level};

const TYPE_KEYWORDS: &[&str] = &["class", "interface", "enum", "record"];

/// A line made only of annotations is dropped.
pub(super) fn annotation(ctx: &LineContext<'_>) -> Option<Translation> {
    if ctx.opens_scope || !ctx.header.starts_with('@') || ctx.header.starts_with("@interface") {
        return None;
    }
    if !strip_annotations(ctx.header).is_empty() {
        return None;
    }
    Some(Translation::empty().with(Finding::info(
        FindingKind::Annotation,
        format!("annotation `{}` has no Python equivalent and was dropped", ctx.header),
    )))
}

pub(super) fn package_import(ctx: &LineContext<'_>) -> Option<Translation> {
    if ctx.opens_scope {
        return None;
    }
    if ctx.header.starts_with("package ") {
        return Some(Translation::empty());
    }
    let target = ctx.header.strip_prefix("import ")?;
    Some(Translation::empty().with(Finding::info(
        FindingKind::Import,
        format!("import of `{}` dropped; add the Python equivalent by hand", target.trim()),
    )))
}

/// `class Foo extends Bar {` → `class Foo(Bar):`
pub(super) fn class_decl(ctx: &LineContext<'_>) -> Option<Translation> {
    if !ctx.opens_scope {
        return None;
    }
    let header = strip_annotations(ctx.header);
    let toks = tokens(header);
    let kw = toks.iter().position(|t| TYPE_KEYWORDS.contains(t))?;
    if !toks[..kw].iter().all(|t| MODIFIERS.contains(t)) {
        return None;
    }
    let name = identifier_prefix(toks.get(kw + 1)?);
    if name.is_empty() {
        return None;
    }

    let mut bases = Vec::new();
    if let Some(ext) = toks.iter().position(|t| *t == "extends") {
        let list: Vec<&str> = toks[ext + 1..]
            .iter()
            .take_while(|t| **t != "implements" && **t != "permits")
            .copied()
            .collect();
        let joined = list.join(" ");
        for base in split_top_level(&joined, ',', true) {
            let base = identifier_path_prefix(base);
            if !base.is_empty() {
                bases.push(base.to_string());
            }
        }
    }

    let is_enum = toks[kw] == "enum";
    let text = if bases.is_empty() {
        format!("class {name}:")
    } else {
        format!("class {name}({}):", bases.join(", "))
    };
    let mut t = Translation::line(text).opening(ScopeKind::Class {
        name: name.to_string(),
        is_enum,
    });
    if toks[kw] == "record" {
        t = t.with(Finding::info(
            FindingKind::Unsupported,
            format!("record `{name}` components are not turned into fields"),
        ));
    }
    Some(t)
}

/// `public int addAll(List<Integer> xs) {` → `def add_all(self, xs):`
pub(super) fn callable_decl(ctx: &LineContext<'_>) -> Option<Translation> {
    if !ctx.opens_scope {
        return None;
    }
    let header = strip_annotations(ctx.header);
    let open = first_open_paren(header)?;
    let close = matching_paren(header, open)?;
    let after = header[close + 1..].trim();
    if !(after.is_empty() || after.starts_with("throws ")) {
        return None;
    }
    let before = header[..open].trim_end();
    if before.contains('=') {
        return None;
    }
    let toks = tokens(before);
    let (&name, prefix) = toks.split_last()?;
    if !is_identifier(name) || KEYWORDS.contains(&name) {
        return None;
    }
    if prefix
        .iter()
        .any(|t| KEYWORDS.contains(t) && !MODIFIERS.contains(t))
    {
        return None;
    }

    let class_name = ctx.enclosing_class();
    let only_modifiers = prefix.iter().all(|t| MODIFIERS.contains(t));
    let is_ctor = only_modifiers && class_name == Some(name);
    if only_modifiers && !is_ctor {
        // `foo(x) {` with no return type is a call, not a declaration.
        return None;
    }
    let is_static = prefix.contains(&"static");
    let return_type = prefix
        .iter()
        .rev()
        .copied()
        .find(|t| !MODIFIERS.contains(t) && !t.starts_with('<'));

    let hints = ctx.options.emit_type_hints;
    let mut params: Vec<String> = parse_params(&header[open + 1..close])
        .into_iter()
        .map(|p| p.render(hints))
        .collect();
    let in_instance_scope = class_name.is_some() && !is_static;
    if in_instance_scope {
        match params.first().map(String::as_str) {
            Some("self") => {}
            _ => params.insert(0, "self".to_string()),
        }
    }

    let py_name = if is_ctor {
        "__init__".to_string()
    } else {
        ctx.options.naming_convention.apply(name)
    };
    let ret = match (hints, is_ctor, return_type) {
        (true, false, Some(rt)) => format!(" -> {}", python_type(rt)),
        (true, true, _) => " -> None".to_string(),
        _ => String::new(),
    };
    let def = format!("def {py_name}({}){ret}:", params.join(", "));

    let mut t = if is_static && class_name.is_some() {
        Translation::line("@staticmethod").push(0, def)
    } else {
        Translation::line(def)
    };
    if prefix.contains(&"abstract") {
        t = t.with(Finding::info(
            FindingKind::Unsupported,
            format!("`{name}` is abstract; consider `abc.abstractmethod`"),
        ));
    }
    Some(t.opening(ScopeKind::Callable))
}

/// Constant list inside an enum body: `RED, GREEN, BLUE;`
pub(super) fn enum_constants(ctx: &LineContext<'_>) -> Option<Translation> {
    if ctx.opens_scope || !ctx.in_enum_body() {
        return None;
    }
    let names: Vec<&str> = split_top_level(ctx.header, ',', false)
        .into_iter()
        .filter(|n| !n.is_empty())
        .collect();
    if names.is_empty() || !names.iter().all(|n| is_identifier(n)) {
        return None;
    }
    let mut t = Translation::empty();
    for name in names {
        t = t.push(0, format!("{name} = \"{name}\""));
    }
    Some(t)
}

/// Field or local declared without an initializer: `int count;` → `count = None`
pub(super) fn bare_declaration(ctx: &LineContext<'_>) -> Option<Translation> {
    if ctx.opens_scope || !ctx.code.trim_end().ends_with(';') || starts_with_control(ctx.header) {
        return None;
    }
    if ctx.header.contains(['(', '=', '"', '\'']) {
        return None;
    }
    let toks = tokens(strip_annotations(ctx.header));
    let (&name, prefix) = toks.split_last()?;
    let name = name.trim_end_matches("[]");
    if prefix.is_empty() || !is_identifier(name) {
        return None;
    }
    if prefix.iter().any(|t| KEYWORDS.contains(t) && !MODIFIERS.contains(t)) {
        return None;
    }
    let name = if crate::naming::is_constant_name(name) {
        name.to_string()
    } else {
        ctx.options.naming_convention.apply(name)
    };
    Some(Translation::line(format!("{name} = None")))
}

/// A parsed formal parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Param {
    name: String,
    java_type: Option<String>,
    varargs: bool,
}

impl Param {
    fn render(&self, hints: bool) -> String {
        let star = if self.varargs { "*" } else { "" };
        match (&self.java_type, hints) {
            (Some(ty), true) => format!("{star}{}: {}", self.name, python_type(ty)),
            _ => format!("{star}{}", self.name),
        }
    }
}

fn parse_params(list: &str) -> Vec<Param> {
    split_top_level(list, ',', true)
        .into_iter()
        .filter(|p| !p.is_empty())
        .filter_map(|p| {
            let p = strip_annotations(p);
            let toks: Vec<&str> = tokens(p).into_iter().filter(|t| *t != "final").collect();
            let (&raw_name, ty) = toks.split_last()?;
            let array_suffix = raw_name.ends_with("[]");
            let name = raw_name.trim_end_matches("[]");
            let mut java_type = (!ty.is_empty()).then(|| ty.join(" "));
            if array_suffix {
                java_type = java_type.map(|t| format!("{t}[]"));
            }
            let varargs = java_type.as_deref().is_some_and(|t| t.ends_with("..."));
            if varargs {
                java_type = java_type.map(|t| t.trim_end_matches("...").trim().to_string());
            }
            let name = if name == "this" { "self" } else { name };
            Some(Param {
                name: name.to_string(),
                java_type,
                varargs,
            })
        })
        .collect()
}

/// Best-effort Python spelling of a Java type, for hints only.
pub fn python_type(java: &str) -> String {
    let java = java.trim();
    if let Some(elem) = java.strip_suffix("[]") {
        return format!("list[{}]", python_type(elem));
    }
    let (base, args) = match java.find('<') {
        Some(lt) if java.ends_with('>') => {
            let inner = &java[lt + 1..java.len() - 1];
            let args: Vec<String> = split_top_level(inner, ',', true)
                .into_iter()
                .filter(|a| !a.is_empty() && *a != "?")
                .map(python_type)
                .collect();
            (&java[..lt], args)
        }
        _ => (java, Vec::new()),
    };
    let base = base.rsplit('.').next().unwrap_or(base);
    let generic = |name: &str| {
        if args.is_empty() {
            name.to_string()
        } else {
            format!("{name}[{}]", args.join(", "))
        }
    };
    match base {
        "int" | "long" | "short" | "byte" | "Integer" | "Long" | "Short" | "Byte"
        | "BigInteger" => "int".into(),
        "double" | "float" | "Double" | "Float" | "BigDecimal" => "float".into(),
        "boolean" | "Boolean" => "bool".into(),
        "char" | "Character" | "String" | "CharSequence" => "str".into(),
        "void" | "Void" => "None".into(),
        "Object" => "object".into(),
        "List" | "ArrayList" | "LinkedList" | "Collection" | "Iterable" => generic("list"),
        "Set" | "HashSet" | "TreeSet" | "LinkedHashSet" => generic("set"),
        "Map" | "HashMap" | "TreeMap" | "LinkedHashMap" => generic("dict"),
        "Optional" => match args.first() {
            Some(inner) => format!("{inner} | None"),
            None => "object | None".into(),
        },
        other => other.to_string(),
    }
}

fn identifier_prefix(tok: &str) -> &str {
    let end = tok
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .unwrap_or(tok.len());
    &tok[..end]
}

fn identifier_path_prefix(tok: &str) -> &str {
    let end = tok
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$' || c == '.'))
        .unwrap_or(tok.len());
    &tok[..end]
}
