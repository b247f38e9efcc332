//! Conversion requests and their shape validation.

use crate::options::ConversionOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a request carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConversionMode {
    /// Inline source text.
    Snippet,
    /// One named file.
    File,
    /// An ordered list of files.
    Directory,
}

impl ConversionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversionMode::Snippet => "snippet",
            ConversionMode::File => "file",
            ConversionMode::Directory => "directory",
        }
    }
}

impl fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConversionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "snippet" | "code" => Ok(ConversionMode::Snippet),
            "file" => Ok(ConversionMode::File),
            "directory" | "dir" => Ok(ConversionMode::Directory),
            _ => Err(format!("unknown conversion mode: {s}")),
        }
    }
}

/// A source file handed over by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SourceFile {
    pub file_name: String,
    pub content: String,
    /// Directory of the file relative to the converted root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_path: Option<String>,
    /// Free-form type tag carried to pass-through outputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
}

impl SourceFile {
    pub fn new(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
            relative_path: None,
            file_type: None,
        }
    }

    pub fn with_relative_path(mut self, path: impl Into<String>) -> Self {
        self.relative_path = Some(path.into());
        self
    }

    /// Extension after the last `.`, if any.
    pub fn extension(&self) -> Option<&str> {
        let (stem, ext) = self.file_name.rsplit_once('.')?;
        (!stem.is_empty() && !ext.is_empty()).then_some(ext)
    }

    /// Display path: `relative_path/file_name`.
    pub fn display_path(&self) -> String {
        match self.relative_path.as_deref() {
            Some(dir) if !dir.is_empty() => format!("{}/{}", dir.trim_end_matches('/'), self.file_name),
            _ => self.file_name.clone(),
        }
    }
}

fn default_source_language() -> String {
    "java".to_string()
}

fn default_target_language() -> String {
    "python".to_string()
}

/// A request to convert source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ConversionRequest {
    pub mode: ConversionMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<SourceFile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_directory: Vec<SourceFile>,
    #[serde(default = "default_source_language")]
    pub source_language: String,
    #[serde(default = "default_target_language")]
    pub target_language: String,
    #[serde(default)]
    pub options: ConversionOptions,
}

impl ConversionRequest {
    fn with_mode(mode: ConversionMode) -> Self {
        Self {
            mode,
            source_code: None,
            source_file: None,
            source_directory: Vec::new(),
            source_language: default_source_language(),
            target_language: default_target_language(),
            options: ConversionOptions::default(),
        }
    }

    pub fn snippet(code: impl Into<String>) -> Self {
        Self {
            source_code: Some(code.into()),
            ..Self::with_mode(ConversionMode::Snippet)
        }
    }

    pub fn file(file: SourceFile) -> Self {
        Self {
            source_file: Some(file),
            ..Self::with_mode(ConversionMode::File)
        }
    }

    pub fn directory(files: Vec<SourceFile>) -> Self {
        Self {
            source_directory: files,
            ..Self::with_mode(ConversionMode::Directory)
        }
    }

    pub fn with_options(mut self, options: ConversionOptions) -> Self {
        self.options = options;
        self
    }

    /// Check that the payload matches the mode exactly one way.
    pub fn payload(&self) -> Result<Payload<'_>, RequestError> {
        let has_code = self.source_code.is_some();
        let has_file = self.source_file.is_some();
        let has_dir = !self.source_directory.is_empty();
        let shape = |reason: &str| RequestError::InputShape {
            mode: self.mode,
            reason: reason.to_string(),
        };
        match self.mode {
            ConversionMode::Snippet => {
                if has_file || has_dir {
                    return Err(shape("snippet requests carry only source_code"));
                }
                let code = self.source_code.as_deref().ok_or_else(|| shape("source_code is missing"))?;
                Ok(Payload::Snippet(code))
            }
            ConversionMode::File => {
                if has_code || has_dir {
                    return Err(shape("file requests carry only source_file"));
                }
                let file = self.source_file.as_ref().ok_or_else(|| shape("source_file is missing"))?;
                if file.file_name.trim().is_empty() {
                    return Err(shape("source_file has an empty file_name"));
                }
                Ok(Payload::File(file))
            }
            ConversionMode::Directory => {
                if has_code || has_file {
                    return Err(shape("directory requests carry only source_directory"));
                }
                if !has_dir {
                    return Err(shape("source_directory is empty"));
                }
                Ok(Payload::Directory(&self.source_directory))
            }
        }
    }
}

/// The validated payload of a request.
#[derive(Debug, Clone, Copy)]
pub enum Payload<'a> {
    Snippet(&'a str),
    File(&'a SourceFile),
    Directory(&'a [SourceFile]),
}

/// A request rejected before any conversion work.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("invalid {mode} request: {reason}")]
    InputShape { mode: ConversionMode, reason: String },

    #[error("unsupported conversion {source_language} -> {target_language}")]
    UnsupportedLanguage {
        source_language: String,
        target_language: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_may_be_empty() {
        let req = ConversionRequest::snippet("");
        assert!(matches!(req.payload(), Ok(Payload::Snippet(""))));
    }

    #[test]
    fn test_snippet_without_code_rejected() {
        let req = ConversionRequest::with_mode(ConversionMode::Snippet);
        assert!(matches!(req.payload(), Err(RequestError::InputShape { .. })));
    }

    #[test]
    fn test_mixed_payload_rejected() {
        let mut req = ConversionRequest::file(SourceFile::new("A.java", ""));
        req.source_code = Some("int a;".into());
        let err = req.payload().unwrap_err();
        assert_eq!(err.to_string(), "invalid file request: file requests carry only source_file");
    }

    #[test]
    fn test_file_needs_name() {
        let req = ConversionRequest::file(SourceFile::new("  ", "int a;"));
        assert!(req.payload().is_err());
    }

    #[test]
    fn test_empty_directory_rejected() {
        assert!(ConversionRequest::directory(vec![]).payload().is_err());
    }

    #[test]
    fn test_json_defaults() {
        let req: ConversionRequest =
            serde_json::from_str(r#"{"mode": "snippet", "source_code": "int a;"}"#).unwrap();
        assert_eq!(req.source_language, "java");
        assert_eq!(req.target_language, "python");
        assert_eq!(req.options, ConversionOptions::default());
    }

    #[test]
    fn test_extension_and_display_path() {
        let f = SourceFile::new("Main.java", "").with_relative_path("src/app/");
        assert_eq!(f.extension(), Some("java"));
        assert_eq!(f.display_path(), "src/app/Main.java");
        assert_eq!(SourceFile::new(".gitignore", "").extension(), None);
        assert_eq!(SourceFile::new("Makefile", "").extension(), None);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("code".parse::<ConversionMode>(), Ok(ConversionMode::Snippet));
        assert_eq!("Directory".parse::<ConversionMode>(), Ok(ConversionMode::Directory));
        assert!("tarball".parse::<ConversionMode>().is_err());
    }
}
