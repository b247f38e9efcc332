//! Conversion results.

use crate::finding::{Finding, FindingKind, Findings};
use serde::{Deserialize, Serialize};

/// A converted or passed-through file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetFile {
    pub file_name: String,
    pub content: String,
    pub file_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_path: Option<String>,
    #[serde(default)]
    pub warnings: Vec<Finding>,
    #[serde(default)]
    pub suggestions: Vec<Finding>,
}

/// The converted payload, shaped like the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConvertedOutput {
    Snippet { code: String },
    File { file: TargetFile },
    Directory { files: Vec<TargetFile> },
}

impl ConvertedOutput {
    /// All produced files; a snippet has none.
    pub fn files(&self) -> &[TargetFile] {
        match self {
            ConvertedOutput::Snippet { .. } => &[],
            ConvertedOutput::File { file } => std::slice::from_ref(file),
            ConvertedOutput::Directory { files } => files,
        }
    }
}

/// Per-run counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionSummary {
    pub total_units: usize,
    pub converted_units: usize,
    pub failed_units: usize,
    pub total_lines: usize,
    pub converted_lines: usize,
    /// `converted_units / total_units * 100`, or 0 for an empty run.
    pub success_rate: f64,
}

impl ConversionSummary {
    pub fn new(total_units: usize, converted_units: usize, failed_units: usize) -> Self {
        let success_rate = if total_units > 0 {
            converted_units as f64 / total_units as f64 * 100.0
        } else {
            0.0
        };
        Self {
            total_units,
            converted_units,
            failed_units,
            success_rate,
            ..Self::default()
        }
    }

    pub fn with_lines(mut self, total_lines: usize, converted_lines: usize) -> Self {
        self.total_lines = total_lines;
        self.converted_lines = converted_lines;
        self
    }

    /// Heuristic quality estimate in `[0, 100]`.
    pub fn score(&self, warnings: usize, suggestions: usize) -> f64 {
        let raw = self.success_rate - 10.0 * warnings as f64 - 2.0 * suggestions as f64;
        raw.clamp(0.0, 100.0)
    }
}

/// Outcome of one conversion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<ConvertedOutput>,
    pub elapsed_ms: u64,
    pub warnings: Vec<Finding>,
    pub suggestions: Vec<Finding>,
    /// Internal failures; empty when `success`.
    pub errors: Vec<String>,
    pub summary: ConversionSummary,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_id: Option<u64>,
    pub source_language: String,
    pub target_language: String,
}

impl ConversionResult {
    pub(crate) fn completed(
        output: ConvertedOutput,
        findings: Findings,
        summary: ConversionSummary,
        source_language: &str,
        target_language: &str,
    ) -> Self {
        let score = summary.score(findings.warnings.len(), findings.suggestions.len());
        Self {
            success: true,
            output: Some(output),
            elapsed_ms: 0,
            warnings: findings.warnings,
            suggestions: findings.suggestions,
            errors: Vec::new(),
            summary,
            score,
            history_id: None,
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        }
    }

    /// A run that produced no output. It counts as one failed unit however
    /// it failed.
    pub(crate) fn failed(
        kind: FindingKind,
        error: String,
        source_language: &str,
        target_language: &str,
    ) -> Self {
        Self {
            success: false,
            output: None,
            elapsed_ms: 0,
            warnings: vec![Finding::error(kind, error.clone())],
            suggestions: Vec::new(),
            errors: vec![error],
            summary: ConversionSummary::new(1, 0, 1),
            score: 0.0,
            history_id: None,
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        }
    }

    /// Converted code of a snippet or single-file run.
    pub fn code(&self) -> Option<&str> {
        match self.output.as_ref()? {
            ConvertedOutput::Snippet { code } => Some(code),
            ConvertedOutput::File { file } => Some(&file.content),
            ConvertedOutput::Directory { .. } => None,
        }
    }
}
