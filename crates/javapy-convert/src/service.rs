//! Conversion orchestration over snippets, files and directories.

use crate::finding::{Finding, FindingKind, Findings};
use crate::history::{HistoryEntry, HistoryStats, HistoryStore, NewEntry, preview};
use crate::ir::{Balance, ClassifiedLine};
use crate::options::ConversionOptions;
use crate::registry::{reader_for_extension, reader_for_language, writer_for_language};
use crate::request::{ConversionRequest, Payload, RequestError, SourceFile};
use crate::result::{ConversionResult, ConversionSummary, ConvertedOutput, TargetFile};
use crate::traits::{ReadError, Reader, Writer};
use crate::validate::{validate_source, validate_target};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Runs conversions and owns their history.
///
/// Conversions share no mutable state except the history ledger, so one
/// `Converter` can serve any number of threads.
pub struct Converter {
    history: HistoryStore,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

/// One converted unit of source text.
struct Unit {
    code: String,
    findings: Vec<Finding>,
    converted_lines: usize,
}

/// Why a unit of source text produced no output.
#[derive(Debug, Clone)]
struct UnitError {
    kind: FindingKind,
    message: String,
}

impl UnitError {
    fn read(err: ReadError) -> Self {
        Self {
            kind: FindingKind::ConversionError,
            message: err.to_string(),
        }
    }

    fn internal(panic: &(dyn Any + Send)) -> Self {
        Self {
            kind: FindingKind::InternalError,
            message: format!("internal error: {}", panic_message(panic)),
        }
    }
}

impl std::fmt::Display for UnitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// What a successful pipeline run hands back for the result.
struct Run {
    output: ConvertedOutput,
    findings: Findings,
    summary: ConversionSummary,
    source_preview: String,
    target_preview: String,
}

impl Converter {
    pub fn new() -> Self {
        Self::with_history_capacity(crate::history::DEFAULT_CAPACITY)
    }

    pub fn with_history_capacity(capacity: usize) -> Self {
        Self {
            history: HistoryStore::new(capacity),
        }
    }

    /// Convert a request.
    ///
    /// Only a malformed request or an unsupported language pair is an `Err`.
    /// Everything that goes wrong afterwards is reported inside the result.
    pub fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult, RequestError> {
        let payload = request.payload()?;
        let unsupported = || RequestError::UnsupportedLanguage {
            source_language: request.source_language.clone(),
            target_language: request.target_language.clone(),
        };
        let reader = reader_for_language(&request.source_language).ok_or_else(unsupported)?;
        let writer = writer_for_language(&request.target_language).ok_or_else(unsupported)?;
        let source_language = reader.language();
        let target_language = writer.language();

        let start = Instant::now();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            run(payload, reader, writer, &request.options)
        }));

        let mut result = match outcome {
            Ok(Ok(run)) => {
                let mut result = ConversionResult::completed(
                    run.output,
                    run.findings,
                    run.summary,
                    source_language,
                    target_language,
                );
                result.elapsed_ms = elapsed_ms(start);
                result.history_id = Some(self.history.append(NewEntry {
                    source_preview: run.source_preview,
                    target_preview: run.target_preview,
                    source_language: source_language.to_string(),
                    target_language: target_language.to_string(),
                    mode: request.mode,
                    elapsed_ms: result.elapsed_ms,
                    score: result.score,
                    converted_lines: result.summary.converted_lines,
                }));
                result
            }
            Ok(Err(failure)) => {
                warn!(mode = %request.mode, error = %failure, "conversion failed");
                ConversionResult::failed(failure.kind, failure.message, source_language, target_language)
            }
            Err(panic) => {
                let failure = UnitError::internal(panic.as_ref());
                error!(mode = %request.mode, error = %failure, "conversion panicked");
                ConversionResult::failed(failure.kind, failure.message, source_language, target_language)
            }
        };
        result.elapsed_ms = elapsed_ms(start);

        info!(
            mode = %request.mode,
            success = result.success,
            total_units = result.summary.total_units,
            converted_units = result.summary.converted_units,
            failed_units = result.summary.failed_units,
            warnings = result.warnings.len(),
            suggestions = result.suggestions.len(),
            elapsed_ms = result.elapsed_ms,
            "conversion completed"
        );
        Ok(result)
    }

    /// One page of history, newest first. Pages are 1-based.
    pub fn history(&self, page: usize, size: usize) -> Vec<HistoryEntry> {
        self.history.page(page, size)
    }

    pub fn history_entry(&self, id: u64) -> Option<HistoryEntry> {
        self.history.get(id)
    }

    pub fn remove_history(&self, id: u64) -> bool {
        self.history.remove(id)
    }

    pub fn clear_history(&self) {
        self.history.clear();
    }

    pub fn history_stats(&self) -> HistoryStats {
        self.history.stats()
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Run `f`, turning a panic into an internal error.
fn guarded<T>(f: impl FnOnce() -> Result<T, UnitError>) -> Result<T, UnitError> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(r) => r,
        Err(panic) => Err(UnitError::internal(panic.as_ref())),
    }
}

fn run(
    payload: Payload<'_>,
    reader: &dyn Reader,
    writer: &dyn Writer,
    options: &ConversionOptions,
) -> Result<Run, UnitError> {
    match payload {
        Payload::Snippet(code) => {
            let unit = convert_unit(code, reader, writer, options)?;
            let summary = ConversionSummary::new(1, 1, 0)
                .with_lines(code.lines().count(), unit.converted_lines);
            let mut findings = Findings::default();
            findings.extend(unit.findings);
            Ok(Run {
                source_preview: preview(code),
                target_preview: preview(&unit.code),
                output: ConvertedOutput::Snippet { code: unit.code },
                findings,
                summary,
            })
        }
        Payload::File(file) => {
            let (target, findings, converted_lines) = convert_file(file, reader, writer, options)?;
            let summary = ConversionSummary::new(1, 1, 0)
                .with_lines(file.content.lines().count(), converted_lines);
            Ok(Run {
                source_preview: preview(&file.content),
                target_preview: preview(&target.content),
                output: ConvertedOutput::File { file: target },
                findings,
                summary,
            })
        }
        Payload::Directory(files) => Ok(convert_directory(files, reader, writer, options)),
    }
}

/// Classify, translate and check one unit of source text.
fn convert_unit(
    source: &str,
    reader: &dyn Reader,
    writer: &dyn Writer,
    options: &ConversionOptions,
) -> Result<Unit, UnitError> {
    guarded(|| {
        let lines = reader.read(source).map_err(UnitError::read)?;
        let emitted = writer.write(&lines, options);

        let mut findings = balance_findings(&lines);
        findings.extend(emitted.findings);
        findings.extend(validate_source(source));
        findings.extend(validate_target(&emitted.code));
        Ok(Unit {
            code: emitted.code,
            findings,
            converted_lines: emitted.converted_lines,
        })
    })
}

fn balance_findings(lines: &[ClassifiedLine]) -> Vec<Finding> {
    let balance = Balance::of(lines);
    let mut findings = Vec::new();
    if balance.unmatched_closes > 0 {
        let mut f = Finding::warning(
            FindingKind::UnbalancedBraces,
            format!("{} closing brace(s) without a matching opener", balance.unmatched_closes),
        );
        if let Some(first) = lines.iter().find(|l| l.clamped) {
            f = f.at_line(first.number);
        }
        findings.push(f);
    }
    if balance.unclosed > 0 {
        findings.push(Finding::warning(
            FindingKind::UnbalancedBraces,
            format!("{} block(s) still open at end of input", balance.unclosed),
        ));
    }
    findings
}

/// Convert one file regardless of its extension.
fn convert_file(
    file: &SourceFile,
    reader: &dyn Reader,
    writer: &dyn Writer,
    options: &ConversionOptions,
) -> Result<(TargetFile, Findings, usize), UnitError> {
    let path = file.display_path();
    debug!(file = %path, "converting file");
    let unit = convert_unit(&file.content, reader, writer, options)?;

    let mut file_findings = Findings::default();
    if !is_source_file(file, reader) {
        file_findings.push(Finding::warning(
            FindingKind::ExtensionMismatch,
            format!(
                "`{}` does not have a {} extension; converted anyway",
                file.file_name,
                reader.language()
            ),
        ));
    }
    file_findings.extend(unit.findings);

    let mut all = Findings::default();
    all.extend(
        file_findings
            .warnings
            .iter()
            .chain(&file_findings.suggestions)
            .cloned()
            .map(|f| f.in_file(path.clone())),
    );
    let target = TargetFile {
        file_name: target_file_name(&file.file_name, writer.extension()),
        content: unit.code,
        file_type: writer.language().to_string(),
        relative_path: file.relative_path.clone(),
        warnings: file_findings.warnings,
        suggestions: file_findings.suggestions,
    };
    Ok((target, all, unit.converted_lines))
}

/// Convert source files, pass everything else through. One failing file
/// never stops the batch.
fn convert_directory(
    files: &[SourceFile],
    reader: &dyn Reader,
    writer: &dyn Writer,
    options: &ConversionOptions,
) -> Run {
    let mut targets = Vec::with_capacity(files.len());
    let mut findings = Findings::default();
    let mut converted = 0;
    let mut failed = 0;
    let mut total_lines = 0;
    let mut converted_lines = 0;

    for file in files {
        let lines = file.content.lines().count();
        total_lines += lines;
        if !is_source_file(file, reader) {
            targets.push(pass_through(file));
            converted += 1;
            converted_lines += lines;
            continue;
        }
        match convert_file(file, reader, writer, options) {
            Ok((target, file_findings, file_lines)) => {
                targets.push(target);
                findings.append(file_findings);
                converted += 1;
                converted_lines += file_lines;
            }
            Err(failure) => {
                let path = file.display_path();
                warn!(file = %path, error = %failure, "file failed to convert");
                findings.push(
                    Finding::error(failure.kind, format!("failed to convert: {failure}")).in_file(path),
                );
                failed += 1;
            }
        }
    }

    let names: Vec<&str> = files.iter().map(|f| f.file_name.as_str()).collect();
    let target_names: Vec<&str> = targets.iter().map(|f| f.file_name.as_str()).collect();
    Run {
        source_preview: preview(&names.join(", ")),
        target_preview: preview(&target_names.join(", ")),
        output: ConvertedOutput::Directory { files: targets },
        findings,
        summary: ConversionSummary::new(files.len(), converted, failed)
            .with_lines(total_lines, converted_lines),
    }
}

fn pass_through(file: &SourceFile) -> TargetFile {
    let file_type = file
        .file_type
        .clone()
        .or_else(|| file.extension().map(str::to_string))
        .unwrap_or_else(|| "text".to_string());
    TargetFile {
        file_name: file.file_name.clone(),
        content: file.content.clone(),
        file_type,
        relative_path: file.relative_path.clone(),
        warnings: Vec::new(),
        suggestions: Vec::new(),
    }
}

/// Whether the file's extension belongs to `reader`.
fn is_source_file(file: &SourceFile, reader: &dyn Reader) -> bool {
    file.extension()
        .and_then(reader_for_extension)
        .is_some_and(|r| r.language() == reader.language())
}

/// `Main.java` → `Main.py`; a name without an extension gains one.
pub fn target_file_name(file_name: &str, extension: &str) -> String {
    let stem = match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    };
    format!("{stem}.{extension}")
}
