//! Output writers - emit classified lines as source code.

pub mod python;

pub use python::{PYTHON_WRITER, PythonWriter, PythonWriterImpl};
