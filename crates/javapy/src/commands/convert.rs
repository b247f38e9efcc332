//! Convert command - turn Java files into Python.

use crate::config::JavapyConfig;
use anyhow::{Context, bail};
use clap::{Args, ValueEnum};
use javapy_convert::{
    ConversionMode, ConversionOptions, ConversionRequest, ConversionResult, ConvertedOutput, Converter,
    NamingConvention, SourceFile, TargetFile,
};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Convert command arguments
#[derive(Args, serde::Deserialize, schemars::JsonSchema)]
pub struct ConvertArgs {
    /// Java file or directory to convert, use - for stdin
    pub input: PathBuf,

    /// Output file, or directory when converting a directory (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Treat the input as a JSON conversion request
    #[arg(long)]
    #[serde(default)]
    pub request: bool,

    /// Print the full conversion result as JSON
    #[arg(long)]
    #[serde(default)]
    pub json: bool,

    /// Identifier casing
    #[arg(long)]
    pub naming: Option<Naming>,

    /// Spaces per indentation level
    #[arg(long)]
    pub indent: Option<usize>,

    /// Drop comments instead of carrying them over
    #[arg(long)]
    #[serde(default)]
    pub no_comments: bool,

    /// Drop blank lines
    #[arg(long)]
    #[serde(default)]
    pub compact: bool,

    /// Emit Python type hints on parameters and return types
    #[arg(long)]
    #[serde(default)]
    pub type_hints: bool,

    /// Prepend a banner describing the conversion
    #[arg(long)]
    #[serde(default)]
    pub header: bool,
}

#[derive(Clone, Copy, ValueEnum, serde::Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Naming {
    /// Keep identifiers as written
    AsIs,
    /// camelCase → snake_case
    SnakeCase,
}

impl From<Naming> for NamingConvention {
    fn from(n: Naming) -> Self {
        match n {
            Naming::AsIs => NamingConvention::AsIs,
            Naming::SnakeCase => NamingConvention::SnakeCase,
        }
    }
}

impl ConvertArgs {
    /// Layer the flags over configured options.
    pub fn apply(&self, mut options: ConversionOptions) -> ConversionOptions {
        if let Some(naming) = self.naming {
            options.naming_convention = naming.into();
        }
        if let Some(indent) = self.indent {
            options.indent_width = indent;
        }
        if self.no_comments {
            options.include_comments = false;
        }
        if self.compact {
            options.preserve_structure = false;
        }
        if self.type_hints {
            options.emit_type_hints = true;
        }
        if self.header {
            options.emit_header = true;
        }
        options
    }
}

/// Print JSON schema for the command's input arguments.
pub fn print_input_schema() {
    let schema = schemars::schema_for!(ConvertArgs);
    println!(
        "{}",
        serde_json::to_string_pretty(&schema).unwrap_or_default()
    );
}

/// Run the convert command
pub fn run(
    args: ConvertArgs,
    input_schema: bool,
    params_json: Option<&str>,
) -> anyhow::Result<()> {
    if input_schema {
        print_input_schema();
        return Ok(());
    }
    // Override args with --params-json if provided
    let args: ConvertArgs = match params_json {
        Some(json) => serde_json::from_str(json).context("invalid --params-json")?,
        None => args,
    };

    let root = std::env::current_dir().context("failed to resolve working directory")?;
    let config = JavapyConfig::load(&root);

    let request = if args.request {
        let text = super::read_input(&args.input)?;
        let mut request: ConversionRequest =
            serde_json::from_str(&text).context("invalid conversion request")?;
        request.options = args.apply(request.options);
        request
    } else {
        build_request(&args.input)?.with_options(args.apply(config.convert))
    };

    if request.mode == ConversionMode::Directory && args.output.is_none() && !args.json {
        bail!("--output is required when converting a directory");
    }

    let converter = Converter::with_history_capacity(config.history.capacity);
    let result = converter.convert(&request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        report(&result);
    }
    if !result.success {
        bail!("conversion failed: {}", result.errors.join("; "));
    }
    if let Some(output) = &result.output {
        write_output(output, args.output.as_deref(), args.json)?;
    }
    Ok(())
}

/// Turn the input path into a snippet, file or directory request.
fn build_request(input: &Path) -> anyhow::Result<ConversionRequest> {
    if input.as_os_str() == "-" {
        return Ok(ConversionRequest::snippet(super::read_input(input)?));
    }
    if input.is_dir() {
        let files = collect_directory(input)?;
        if files.is_empty() {
            bail!("{} contains no files", input.display());
        }
        return Ok(ConversionRequest::directory(files));
    }
    let content = super::read_input(input)?;
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("{} has no file name", input.display()))?;
    Ok(ConversionRequest::file(SourceFile::new(name, content)))
}

/// Every non-hidden file under `root`, in a stable order.
fn collect_directory(root: &Path) -> anyhow::Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'));
    for entry in walker {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let bytes =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let content = String::from_utf8_lossy(&bytes).into_owned();
        let name = entry.file_name().to_string_lossy().into_owned();
        let mut file = SourceFile::new(name, content);
        if let Some(dir) = relative_dir(root, path) {
            file = file.with_relative_path(dir);
        }
        files.push(file);
    }
    tracing::debug!(root = %root.display(), files = files.len(), "collected directory");
    Ok(files)
}

/// Parent directory of `path` relative to `root`, `/`-separated.
fn relative_dir(root: &Path, path: &Path) -> Option<String> {
    let parent = path.strip_prefix(root).ok()?.parent()?;
    let parts: Vec<String> = parent
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    (!parts.is_empty()).then(|| parts.join("/"))
}

fn report(result: &ConversionResult) {
    for finding in result.warnings.iter().chain(&result.suggestions) {
        eprintln!("{finding}");
    }
    let s = &result.summary;
    eprintln!(
        "Converted {}/{} unit(s), {}/{} line(s), score {:.0} ({} ms)",
        s.converted_units, s.total_units, s.converted_lines, s.total_lines, result.score, result.elapsed_ms
    );
}

fn write_output(output: &ConvertedOutput, dest: Option<&Path>, json: bool) -> anyhow::Result<()> {
    match (output, dest) {
        (ConvertedOutput::Snippet { code }, Some(path)) => write_file(path, code),
        (ConvertedOutput::File { file }, Some(path)) => {
            let path = if path.is_dir() {
                path.join(&file.file_name)
            } else {
                path.to_path_buf()
            };
            write_file(&path, &file.content)
        }
        (ConvertedOutput::Directory { files }, Some(dir)) => {
            for file in files {
                write_file(&target_path(dir, file), &file.content)?;
            }
            eprintln!("Wrote {} file(s) to {}", files.len(), dir.display());
            Ok(())
        }
        // JSON output already carries the code.
        (_, None) if json => Ok(()),
        (ConvertedOutput::Snippet { code }, None) => {
            print!("{code}");
            Ok(())
        }
        (ConvertedOutput::File { file }, None) => {
            print!("{}", file.content);
            Ok(())
        }
        (ConvertedOutput::Directory { .. }, None) => {
            bail!("--output is required when converting a directory")
        }
    }
}

fn target_path(dir: &Path, file: &TargetFile) -> PathBuf {
    let mut path = dir.to_path_buf();
    if let Some(rel) = &file.relative_path {
        path.extend(rel.split('/').filter(|p| !p.is_empty() && *p != ".."));
    }
    path.join(&file.file_name)
}

fn write_file(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
