//! Python writer for classified Java lines.
//!
//! Drives the statement translator line by line and owns everything that
//! needs memory across lines: the stack of open scopes, `pass` for bodies that
//! came out empty, and the extra level under brace-less `if`/`for` headers.

use crate::finding::Finding;
use crate::indent::IndentTracker;
use crate::ir::{ClassifiedLine, LineKind};
use crate::options::ConversionOptions;
use crate::scan::split_comment;
use crate::translate::{ScopeKind, Translation, translate_close_tail, translate_line};
use crate::traits::{Emitted, Writer};

/// Static instance of the Python writer for registry.
pub static PYTHON_WRITER: PythonWriterImpl = PythonWriterImpl;

/// Python writer implementing the Writer trait.
pub struct PythonWriterImpl;

impl Writer for PythonWriterImpl {
    fn language(&self) -> &'static str {
        "python"
    }

    fn extension(&self) -> &'static str {
        "py"
    }

    fn write(&self, lines: &[ClassifiedLine], options: &ConversionOptions) -> Emitted {
        PythonWriter::emit(lines, options)
    }
}

/// Bookkeeping for one open scope.
struct Frame {
    /// Indent level of the header line.
    indent: usize,
    has_body: bool,
}

/// Emits classified lines as Python source code.
pub struct PythonWriter<'a> {
    options: &'a ConversionOptions,
    output: Vec<String>,
    findings: Vec<Finding>,
    kinds: Vec<ScopeKind>,
    frames: Vec<Frame>,
    /// Extra levels owed to the next statement after brace-less headers.
    pending_body: usize,
    converted_lines: usize,
}

impl<'a> PythonWriter<'a> {
    pub fn new(options: &'a ConversionOptions) -> Self {
        Self {
            options,
            output: Vec::new(),
            findings: Vec::new(),
            kinds: Vec::new(),
            frames: Vec::new(),
            pending_body: 0,
            converted_lines: 0,
        }
    }

    /// Emit classified lines as Python source.
    pub fn emit(lines: &[ClassifiedLine], options: &ConversionOptions) -> Emitted {
        let mut writer = PythonWriter::new(options);
        for line in lines {
            writer.write_line(line);
        }
        writer.finish()
    }

    fn finish(mut self) -> Emitted {
        self.settle_pending();
        while !self.frames.is_empty() {
            self.pop_scope();
        }
        // dropped package/import lines leave blank runs at the edges
        while self.output.last().is_some_and(|l| l.is_empty()) {
            self.output.pop();
        }
        let leading = self.output.iter().take_while(|l| l.is_empty()).count();
        self.output.drain(..leading);
        if self.options.emit_header && !self.output.is_empty() {
            let banner = [
                "# Converted from Java".to_string(),
                format!("# {}", self.options.summary()),
                String::new(),
            ];
            self.output.splice(0..0, banner);
        }
        let mut code = self.output.join("\n");
        if !code.is_empty() {
            code.push('\n');
        }
        Emitted {
            code,
            findings: self.findings,
            converted_lines: self.converted_lines,
        }
    }

    /// Indent level for the body of the innermost scope.
    fn base_indent(&self) -> usize {
        self.frames.last().map_or(0, |f| f.indent + 1)
    }

    fn write_line(&mut self, line: &ClassifiedLine) {
        match line.kind {
            LineKind::Blank => {
                if self.options.preserve_structure {
                    self.output.push(String::new());
                }
            }
            LineKind::LineComment | LineKind::BlockCommentLine => self.write_comment(line),
            LineKind::BlockClose => self.write_close(line),
            LineKind::Statement | LineKind::BlockOpen => {
                self.sync_depth(line.depth);
                let t = translate_line(line, &self.kinds, self.options);
                self.write_translation(line, t, true);
            }
        }
    }

    fn write_comment(&mut self, line: &ClassifiedLine) {
        if !self.options.include_comments {
            return;
        }
        let text = comment_text(&line.trimmed, line.kind);
        if text.is_empty() {
            return;
        }
        let indent = self.base_indent() + self.pending_body;
        self.push_text(indent, format!("# {text}"), false);
    }

    fn write_close(&mut self, line: &ClassifiedLine) {
        self.settle_pending();
        let mut closed = None;
        while self.frames.len() > line.depth {
            closed = self.pop_scope();
        }
        let Some(tail) = line.tail.as_deref() else {
            return;
        };
        self.converted_lines += 1;
        if line.reopens {
            let t = translate_line(line, &self.kinds, self.options);
            self.write_translation(line, t, false);
        } else {
            let t = translate_close_tail(tail, closed.as_ref());
            self.write_translation(line, t, false);
        }
    }

    fn write_translation(&mut self, line: &ClassifiedLine, t: Translation, count: bool) {
        if count {
            self.converted_lines += 1;
        }
        for finding in t.findings {
            let finding = match finding.line {
                Some(_) => finding,
                None => finding.at_line(line.number),
            };
            self.findings.push(finding);
        }

        let indent = self.base_indent() + self.pending_body;
        let mut last_indent = indent;
        let emitted = !t.lines.is_empty();
        for out in t.lines {
            last_indent = indent + out.extra_indent;
            self.push_text(last_indent, out.text, true);
        }
        self.append_trailing_comment(line, emitted, indent);

        match t.opens {
            Some(kind) => {
                self.pending_body = 0;
                self.kinds.push(kind);
                self.frames.push(Frame {
                    indent: last_indent,
                    has_body: false,
                });
            }
            None if t.expects_body => self.pending_body += 1,
            None if emitted => self.pending_body = 0,
            None => {}
        }
    }

    fn append_trailing_comment(&mut self, line: &ClassifiedLine, emitted: bool, indent: usize) {
        if !self.options.include_comments || line.kind == LineKind::BlockClose {
            return;
        }
        let Some(comment) = split_comment(&line.trimmed).comment else {
            return;
        };
        if emitted {
            if let Some(last) = self.output.last_mut() {
                last.push_str("  # ");
                last.push_str(&comment);
                return;
            }
        }
        self.push_text(indent, format!("# {comment}"), false);
    }

    fn push_text(&mut self, indent: usize, text: String, is_code: bool) {
        if is_code {
            if let Some(frame) = self.frames.last_mut() {
                frame.has_body = true;
            }
        }
        let ws = IndentTracker::render(indent, self.options.indent_width());
        self.output.push(format!("{ws}{text}"));
    }

    /// A brace-less header with nothing after it still needs a body.
    fn settle_pending(&mut self) {
        if self.pending_body > 0 {
            let indent = self.base_indent() + self.pending_body;
            self.push_text(indent, "pass".to_string(), true);
            self.pending_body = 0;
        }
    }

    /// Close scopes the classifier already left.
    fn sync_depth(&mut self, depth: usize) {
        while self.frames.len() > depth {
            self.pop_scope();
        }
    }

    fn pop_scope(&mut self) -> Option<ScopeKind> {
        let frame = self.frames.pop()?;
        if !frame.has_body {
            let ws = IndentTracker::render(frame.indent + 1, self.options.indent_width());
            self.output.push(format!("{ws}pass"));
        }
        if let Some(parent) = self.frames.last_mut() {
            parent.has_body = true;
        }
        self.kinds.pop()
    }
}

/// Comment text without markers: `// x`, `/** x`, ` * x`, `x */`.
fn comment_text(trimmed: &str, kind: LineKind) -> String {
    let text = match kind {
        LineKind::LineComment => trimmed.strip_prefix("//").unwrap_or(trimmed),
        _ => {
            let t = trimmed
                .trim_start_matches("/**")
                .trim_start_matches("/*")
                .trim_end_matches("*/")
                .trim();
            t.strip_prefix('*').unwrap_or(t)
        }
    };
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::classify;

    fn convert(src: &str) -> String {
        convert_with(src, &ConversionOptions::default())
    }

    fn convert_with(src: &str, options: &ConversionOptions) -> String {
        PythonWriter::emit(&classify(src), options).code
    }

    #[test]
    fn test_class_with_method() {
        let src = "public class Foo {\n    public void bar() {\n        System.out.println(\"hi\");\n    }\n}\n";
        assert_eq!(
            convert(src),
            "class Foo:\n    def bar(self):\n        print(\"hi\")\n"
        );
    }

    #[test]
    fn test_empty_bodies_get_pass() {
        assert_eq!(convert("class A {\n}"), "class A:\n    pass\n");
        assert_eq!(
            convert("class A {\n  void f() {\n  }\n}"),
            "class A:\n    def f(self):\n        pass\n"
        );
    }

    #[test]
    fn test_comment_only_body_gets_pass() {
        assert_eq!(
            convert("void f() {\n  // todo\n}"),
            "def f():\n    # todo\n    pass\n"
        );
    }

    #[test]
    fn test_else_chain() {
        let src = "if (a) {\n  x = 1;\n} else if (b) {\n  x = 2;\n} else {\n  x = 3;\n}";
        assert_eq!(
            convert(src),
            "if a:\n    x = 1\nelif b:\n    x = 2\nelse:\n    x = 3\n"
        );
    }

    #[test]
    fn test_do_while() {
        let src = "do {\n  i++;\n} while (i < 3);";
        assert_eq!(
            convert(src),
            "while True:\n    i += 1\n    if not (i < 3):\n        break\n"
        );
    }

    #[test]
    fn test_brace_less_bodies() {
        let src = "if (a)\n  x();\nelse\n  y();\nz();";
        assert_eq!(convert(src), "if a:\n    x()\nelse:\n    y()\nz()\n");
    }

    #[test]
    fn test_brace_less_header_at_end_gets_pass() {
        assert_eq!(convert("while (running)"), "while running:\n    pass\n");
    }

    #[test]
    fn test_comments_toggle() {
        let src = "/**\n * Docs.\n */\nint a = 1; // one";
        assert_eq!(convert(src), "# Docs.\na = 1  # one\n");
        let options = ConversionOptions {
            include_comments: false,
            ..Default::default()
        };
        assert_eq!(convert_with(src, &options), "a = 1\n");
    }

    #[test]
    fn test_blank_lines_toggle() {
        let src = "int a = 1;\n\nint b = 2;\n\n";
        assert_eq!(convert(src), "a = 1\n\nb = 2\n");
        let options = ConversionOptions {
            preserve_structure: false,
            ..Default::default()
        };
        assert_eq!(convert_with(src, &options), "a = 1\nb = 2\n");
    }

    #[test]
    fn test_indent_width() {
        let options = ConversionOptions {
            indent_width: 2,
            ..Default::default()
        };
        assert_eq!(convert_with("if (a) {\n  b();\n}", &options), "if a:\n  b()\n");
    }

    #[test]
    fn test_unclosed_scope_is_closed_at_end() {
        assert_eq!(convert("class A {\n  void f() {"), "class A:\n    def f(self):\n        pass\n");
    }

    #[test]
    fn test_findings_carry_line_numbers() {
        let emitted = PythonWriter::emit(&classify("int a;\nimport java.util.List;"), &Default::default());
        assert_eq!(emitted.findings.len(), 1);
        assert_eq!(emitted.findings[0].line, Some(2));
        assert_eq!(emitted.converted_lines, 2);
    }

    #[test]
    fn test_header_banner() {
        let options = ConversionOptions {
            emit_header: true,
            ..Default::default()
        };
        let out = convert_with("int a = 1;", &options);
        assert!(out.starts_with("# Converted from Java\n# indent_width=4"));
        assert!(out.ends_with("\n\na = 1\n"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(convert(""), "");
    }
}
