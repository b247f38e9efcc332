//! Line-level Java → Python translation.
//!
//! `javapy-convert` rewrites a practical subset of Java into Python without
//! parsing it. Each physical line is classified (comment, blank, block open,
//! block close, statement), brace nesting becomes an indentation depth, and
//! each code line is handed to a prioritized list of translation rules.
//!
//! # Architecture
//!
//! ```text
//!  Java text         classified lines          Python text
//! ───────────    ──────────────────────    ─────────────────
//! JavaReader ──> Vec<ClassifiedLine> ──> PythonWriter ──> code + findings
//!  (input/)           (ir.rs)               (output/, translate/)
//!                                                  │
//!                             validate_source / validate_target
//! ```
//!
//! [`Converter`] sequences the pipeline over a snippet, one file, or a
//! directory listing, and keeps a bounded history of completed runs.
//!
//! # Example
//!
//! ```
//! use javapy_convert::{ConversionRequest, Converter};
//!
//! let converter = Converter::new();
//! let src = "public class Foo {\n    public void bar() {\n        System.out.println(\"hi\");\n    }\n}\n";
//! let result = converter.convert(&ConversionRequest::snippet(src)).unwrap();
//! assert_eq!(result.code(), Some("class Foo:\n    def bar(self):\n        print(\"hi\")\n"));
//! ```
//!
//! # Note on Translation Fidelity
//!
//! This is best-effort, surface-level rewriting. Constructs with no rule are
//! passed through and reported as findings rather than rejected; the output
//! is a starting point for a human, not a guaranteed-runnable program.

pub mod finding;
pub mod history;
pub mod indent;
pub mod input;
pub mod ir;
pub mod naming;
pub mod options;
pub mod output;
pub mod registry;
pub mod request;
pub mod result;
pub mod scan;
pub mod service;
pub mod translate;
pub mod traits;
pub mod validate;

// Re-exports: data model
pub use finding::{Finding, FindingKind, Findings, Severity};
pub use history::{HistoryEntry, HistoryStats, HistoryStore};
pub use ir::{ClassifiedLine, LineKind};
pub use naming::NamingConvention;
pub use options::ConversionOptions;
pub use request::{ConversionMode, ConversionRequest, RequestError, SourceFile};
pub use result::{ConversionResult, ConversionSummary, ConvertedOutput, TargetFile};

// Re-exports: pipeline
pub use indent::IndentTracker;
pub use input::classify;
pub use naming::to_snake_case;
pub use service::Converter;
pub use traits::{Emitted, ReadError, Reader, Writer};
pub use validate::{validate_source, validate_target};
