//! Traits for language readers and writers.

use crate::finding::Finding;
use crate::ir::ClassifiedLine;
use crate::options::ConversionOptions;

/// Error that can occur when reading source text into classified lines.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("binary content: NUL byte at offset {0}")]
    Binary(usize),
}

/// A reader classifies source text into lines.
pub trait Reader: Send + Sync {
    /// Language identifier (e.g., "java").
    fn language(&self) -> &'static str;

    /// File extensions this reader handles (e.g., &["java"]).
    fn extensions(&self) -> &'static [&'static str];

    /// Split and classify source text.
    fn read(&self, source: &str) -> Result<Vec<ClassifiedLine>, ReadError>;
}

/// Text produced by a writer, with whatever it could not translate cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Emitted {
    pub code: String,
    pub findings: Vec<Finding>,
    /// Lines that produced target code (comments and blanks excluded).
    pub converted_lines: usize,
}

/// A writer emits classified lines as source code in a target language.
pub trait Writer: Send + Sync {
    /// Language identifier (e.g., "python").
    fn language(&self) -> &'static str;

    /// File extension for output (e.g., "py").
    fn extension(&self) -> &'static str;

    /// Emit classified lines as source code.
    fn write(&self, lines: &[ClassifiedLine], options: &ConversionOptions) -> Emitted;
}
