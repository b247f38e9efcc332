//! Advisory findings attached to conversions and validations.

use serde::{Deserialize, Serialize};

/// How much attention a finding needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Category tag of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    EntryPoint,
    PrintStatement,
    Lambda,
    Switch,
    Generics,
    Annotation,
    Import,
    /// A construct the translator passed through without mapping it.
    Unsupported,
    UnbalancedBraces,
    LeftoverTerminator,
    LeftoverBrace,
    UntranslatedOutput,
    JavaLiteral,
    JavaOperator,
    ExtensionMismatch,
    /// A unit that failed to convert.
    ConversionError,
    InternalError,
}

impl FindingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::EntryPoint => "entry_point",
            FindingKind::PrintStatement => "print_statement",
            FindingKind::Lambda => "lambda",
            FindingKind::Switch => "switch",
            FindingKind::Generics => "generics",
            FindingKind::Annotation => "annotation",
            FindingKind::Import => "import",
            FindingKind::Unsupported => "unsupported",
            FindingKind::UnbalancedBraces => "unbalanced_braces",
            FindingKind::LeftoverTerminator => "leftover_terminator",
            FindingKind::LeftoverBrace => "leftover_brace",
            FindingKind::UntranslatedOutput => "untranslated_output",
            FindingKind::JavaLiteral => "java_literal",
            FindingKind::JavaOperator => "java_operator",
            FindingKind::ExtensionMismatch => "extension_mismatch",
            FindingKind::ConversionError => "conversion_error",
            FindingKind::InternalError => "internal_error",
        }
    }
}

/// A warning or suggestion.
///
/// Findings at [`Severity::Info`] are suggestions; anything higher is a
/// warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub message: String,
    /// 1-based line in the text the finding was raised against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub severity: Severity,
    pub kind: FindingKind,
    /// Originating file, in file and directory conversions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Finding {
    pub fn new(kind: FindingKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            severity,
            kind,
            file: None,
        }
    }

    pub fn info(kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Info, message)
    }

    pub fn warning(kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Warning, message)
    }

    pub fn error(kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Error, message)
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn is_suggestion(&self) -> bool {
        self.severity == Severity::Info
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{file}:")?;
        }
        if let Some(line) = self.line {
            write!(f, "{line}:")?;
        }
        if self.file.is_some() || self.line.is_some() {
            f.write_str(" ")?;
        }
        let level = match self.severity {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{level}[{}]: {}", self.kind.as_str(), self.message)
    }
}

/// Findings split into warnings and suggestions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    pub warnings: Vec<Finding>,
    pub suggestions: Vec<Finding>,
}

impl Findings {
    pub fn push(&mut self, finding: Finding) {
        if finding.is_suggestion() {
            self.suggestions.push(finding);
        } else {
            self.warnings.push(finding);
        }
    }

    pub fn append(&mut self, other: Findings) {
        self.warnings.extend(other.warnings);
        self.suggestions.extend(other.suggestions);
    }
}

impl Extend<Finding> for Findings {
    fn extend<I: IntoIterator<Item = Finding>>(&mut self, iter: I) {
        for finding in iter {
            self.push(finding);
        }
    }
}
