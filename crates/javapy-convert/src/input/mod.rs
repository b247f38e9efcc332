//! Input readers - classify source text into lines.

pub mod java;

pub use java::{JAVA_READER, JavaReader, classify, read_java};
