//! Conversion options.

use crate::naming::NamingConvention;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Options controlling how Java is rendered as Python.
///
/// Example config.toml:
/// ```toml
/// [convert]
/// indent_width = 4
/// naming_convention = "snake_case"   # or "as_is"
/// include_comments = true
/// preserve_structure = true
/// emit_type_hints = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ConversionOptions {
    /// Spaces per indentation level. Zero is treated as one.
    pub indent_width: usize,
    /// Casing applied to assigned variables and method names.
    pub naming_convention: NamingConvention,
    /// Carry comments over as `#` comments.
    pub include_comments: bool,
    /// Keep blank lines where the source had them.
    pub preserve_structure: bool,
    /// Annotate parameters and return types with Python type hints.
    pub emit_type_hints: bool,
    /// Prepend a banner naming the source language and options.
    pub emit_header: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            naming_convention: NamingConvention::SnakeCase,
            include_comments: true,
            preserve_structure: true,
            emit_type_hints: false,
            emit_header: false,
        }
    }
}

impl ConversionOptions {
    pub fn indent_width(&self) -> usize {
        self.indent_width.max(1)
    }

    /// Compact `key=value` description used in the header banner.
    pub fn summary(&self) -> String {
        format!(
            "indent_width={}, naming_convention={}, include_comments={}, preserve_structure={}, emit_type_hints={}",
            self.indent_width(),
            self.naming_convention,
            self.include_comments,
            self.preserve_structure,
            self.emit_type_hints
        )
    }
}
