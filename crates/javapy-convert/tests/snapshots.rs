//! Snapshot tests for whole-program conversion.
//!
//! These tests verify that classification and emission produce expected
//! output. Run `cargo insta review` to update snapshots after intentional
//! changes.

use javapy_convert::{
    ConversionOptions, ConversionRequest, Converter, FindingKind, NamingConvention, Severity,
    SourceFile, classify, to_snake_case,
};

fn convert(src: &str) -> String {
    convert_with(src, ConversionOptions::default())
}

fn convert_with(src: &str, options: ConversionOptions) -> String {
    let result = Converter::new()
        .convert(&ConversionRequest::snippet(src).with_options(options))
        .expect("valid request");
    assert!(result.success, "conversion failed: {:?}", result.errors);
    result.code().unwrap_or_default().to_string()
}

fn suggestion_kinds(src: &str) -> Vec<FindingKind> {
    let result = Converter::new()
        .convert(&ConversionRequest::snippet(src))
        .expect("valid request");
    result.suggestions.iter().map(|f| f.kind).collect()
}

// ============================================================================
// Classifier - verify line kinds and depths
// ============================================================================

mod classifier {
    use super::*;

    fn render(src: &str) -> String {
        classify(src)
            .iter()
            .map(|l| {
                format!(
                    "{} {:?} depth={} code={:?}{}{}",
                    l.number,
                    l.kind,
                    l.depth,
                    l.code,
                    if l.clamped { " clamped" } else { "" },
                    if l.reopens { " reopens" } else { "" }
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn comments_and_unbalanced_close() {
        insta::assert_snapshot!(render("int a = 1; // x\n/* block\n   still */\n} else {"), @r#"
        1 Statement depth=0 code="int a = 1;"
        2 BlockCommentLine depth=0 code=""
        3 BlockCommentLine depth=0 code=""
        4 BlockClose depth=0 code="} else {" clamped reopens
        "#);
    }

    #[test]
    fn depth_never_negative() {
        let lines = classify("}}}\n{\n}\n}\nx;\n{{");
        assert_eq!(lines.iter().filter(|l| l.clamped).count(), 2);
        let last = lines.last().expect("lines");
        assert_eq!(last.depth, 0);
    }
}

// ============================================================================
// Programs - verify emitted Python
// ============================================================================

mod programs {
    use super::*;

    #[test]
    fn class_with_method() {
        let src = r#"public class Foo {
    public void bar() {
        System.out.println("hi");
    }
}
"#;
        assert_eq!(
            convert(src),
            "class Foo:\n    def bar(self):\n        print(\"hi\")\n"
        );
    }

    #[test]
    fn calculator() {
        let src = r#"package com.example;

import java.util.List;

/**
 * Simple calculator.
 */
public class Calculator {
    private int total;

    public Calculator(int start) {
        this.total = start;
    }

    public int addAll(List<Integer> values) {
        for (int v : values) {
            total += v;
        }
        return total;
    }

    public static void main(String[] args) {
        Calculator calc = new Calculator(0);
        for (int i = 0; i < 3; i++) {
            System.out.println(i);
        }
        if (calc.total > 0) {
            System.out.println("positive");
        } else {
            System.out.println("empty");
        }
    }
}
"#;
        insta::assert_snapshot!(convert(src), @r#"
        # Simple calculator.
        class Calculator:
            total = None

            def __init__(self, start):
                self.total = start

            def add_all(self, values):
                for v in values:
                    total += v
                return total

            @staticmethod
            def main(args):
                calc = new Calculator(0)
                for i in range(3):
                    print(i)
                if calc.total > 0:
                    print("positive")
                else:
                    print("empty")
        "#);
        assert_eq!(
            suggestion_kinds(src),
            vec![
                FindingKind::Import,
                FindingKind::EntryPoint,
                FindingKind::Generics,
                FindingKind::PrintStatement,
            ]
        );
    }

    #[test]
    fn loops_and_exceptions() {
        let src = r#"public class Counter {
    static final int MAX_COUNT = 5;

    public static int countDown(int start) {
        int steps = 0;
        do {
            start--;
            steps++;
        } while (start > 0);
        return steps;
    }

    public void risky(String path) {
        try {
            String url = "http://example.com"; // remote
            load(url);
        } catch (IOException | RuntimeException e) {
            System.err.println("failed: " + e);
        } finally {
            close();
        }
    }
}
"#;
        insta::assert_snapshot!(convert(src), @r#"
        class Counter:
            MAX_COUNT = 5

            @staticmethod
            def count_down(start):
                steps = 0
                while True:
                    start -= 1
                    steps += 1
                    if not (start > 0):
                        break
                return steps

            def risky(self, path):
                try:
                    url = "http://example.com"  # remote
                    load(url)
                except (IOException, RuntimeException) as e:
                    print("failed: " + e, file=sys.stderr)
                finally:
                    close()
        "#);
    }

    #[test]
    fn allman_and_brace_less() {
        let src = r#"class Grid
{
    static {
        System.out.println("loading");
    }

    void fill(int n)
    {
        for (int i = n; i >= 1; i--)
            mark(i);
        while (pending());
        if (n == 0) { reset(); }
    }
}
"#;
        insta::assert_snapshot!(convert(src), @r#"
        class Grid:
            if True:  # static
                print("loading")

            def fill(self, n):
                for i in range(n, 0, -1):
                    mark(i)
                while pending(): pass
                if n == 0: reset()
        "#);
        assert_eq!(
            suggestion_kinds(src),
            vec![FindingKind::Unsupported, FindingKind::PrintStatement]
        );
    }

    #[test]
    fn brace_less_branches_stay_conditional() {
        assert_eq!(convert("if (x > 0) y = 1;"), "if x > 0: y = 1\n");
        let src = "if (a) {\n    b();\n}\nelse y = 2;\nif (c) y = 1;\nelse if (d) y = 3;";
        assert_eq!(
            convert(src),
            "if a:\n    b()\nelse: y = 2\nif c: y = 1\nelif d: y = 3\n"
        );
    }

    #[test]
    fn code_after_block_comment_is_kept() {
        assert_eq!(
            convert("/* a\n   b */ int z = 1;\nint w = 2;"),
            "# a\n# b\nz = 1\nw = 2\n"
        );
    }

    #[test]
    fn options_change_output() {
        let src = "int itemCount = 0; // start\nitemCount++;";
        let options = ConversionOptions {
            indent_width: 2,
            naming_convention: NamingConvention::AsIs,
            include_comments: false,
            ..Default::default()
        };
        assert_eq!(convert_with(src, options), "itemCount = 0\nitemCount += 1\n");
        assert_eq!(convert(src), "item_count = 0  # start\nitem_count += 1\n");
    }

    #[test]
    fn type_hints() {
        let src = "class A {\n    public int twice(int x) {\n        return x * 2;\n    }\n}";
        let options = ConversionOptions {
            emit_type_hints: true,
            ..Default::default()
        };
        assert_eq!(
            convert_with(src, options),
            "class A:\n    def twice(self, x: int) -> int:\n        return x * 2\n"
        );
    }

    #[test]
    fn empty_source() {
        let result = Converter::new()
            .convert(&ConversionRequest::snippet(""))
            .expect("valid request");
        assert!(result.success);
        assert_eq!(result.code(), Some(""));
        assert!(result.warnings.is_empty());
        assert_eq!(result.score, 100.0);
    }
}

// ============================================================================
// Orchestration - summaries, failures, history
// ============================================================================

mod orchestration {
    use super::*;

    fn directory() -> Vec<SourceFile> {
        vec![
            SourceFile::new("App.java", "class App {\n}\n").with_relative_path("src"),
            SourceFile::new("notes.txt", "keep me\n"),
            SourceFile::new("Broken.java", "int a;\0"),
        ]
    }

    #[test]
    fn directory_summary() {
        let result = Converter::new()
            .convert(&ConversionRequest::directory(directory()))
            .expect("valid request");
        assert!(result.success);
        let s = result.summary;
        assert_eq!(s.total_units, 3);
        assert_eq!(s.converted_units, 2);
        assert_eq!(s.failed_units, 1);
        assert_eq!(s.converted_units + s.failed_units, s.total_units);
        assert!((s.success_rate - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(s.total_lines, 4);

        let files = result.output.as_ref().expect("output").files();
        let names: Vec<&str> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["App.py", "notes.txt"]);
        assert_eq!(files[0].content, "class App:\n    pass\n");
        assert_eq!(files[0].relative_path.as_deref(), Some("src"));
        assert_eq!(files[1].content, "keep me\n");
        assert_eq!(files[1].file_type, "txt");

        let failure = result
            .warnings
            .iter()
            .find(|w| w.kind == FindingKind::ConversionError)
            .expect("failure warning");
        assert_eq!(failure.severity, Severity::Error);
        assert_eq!(failure.file.as_deref(), Some("Broken.java"));
    }

    #[test]
    fn summary_json() {
        let files = vec![
            SourceFile::new("A.java", "int a = 1;\n"),
            SourceFile::new("B.java", "int b = 2;\nint c = 3;\n"),
        ];
        let result = Converter::new()
            .convert(&ConversionRequest::directory(files))
            .expect("valid request");
        insta::assert_json_snapshot!(result.summary, @r#"
        {
          "total_units": 2,
          "converted_units": 2,
          "failed_units": 0,
          "total_lines": 3,
          "converted_lines": 3,
          "success_rate": 100.0
        }
        "#);
    }

    #[test]
    fn history_lifecycle() {
        let converter = Converter::with_history_capacity(2);
        let ids: Vec<u64> = ["int a;", "int b;", "int c;"]
            .iter()
            .map(|src| {
                converter
                    .convert(&ConversionRequest::snippet(*src))
                    .expect("valid request")
                    .history_id
                    .expect("recorded")
            })
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let page: Vec<u64> = converter.history(1, 10).iter().map(|e| e.id).collect();
        assert_eq!(page, vec![3, 2]);
        assert!(converter.history_entry(1).is_none());
        assert_eq!(
            converter.history_entry(3).map(|e| e.target_preview),
            Some("c = None\n".to_string())
        );

        let stats = converter.history_stats();
        assert_eq!(stats.total_conversions, 2);
        assert_eq!(stats.most_common_source_language.as_deref(), Some("java"));

        assert!(converter.remove_history(3));
        converter.clear_history();
        assert!(converter.history(1, 10).is_empty());
    }

    #[test]
    fn converter_is_shareable() {
        fn check<T: Send + Sync>() {}
        check::<Converter>();
    }

    #[test]
    fn shape_errors_are_rejected() {
        let mut req = ConversionRequest::snippet("int a;");
        req.source_directory.push(SourceFile::new("A.java", ""));
        assert!(Converter::new().convert(&req).is_err());
    }

    #[test]
    fn long_previews_are_truncated() {
        let src = format!("int a = {};", "1 + ".repeat(40) + "1");
        let converter = Converter::new();
        let id = converter
            .convert(&ConversionRequest::snippet(src))
            .expect("valid request")
            .history_id
            .expect("recorded");
        let entry = converter.history_entry(id).expect("entry");
        assert_eq!(entry.source_preview.chars().count(), 103);
        assert!(entry.source_preview.ends_with("..."));
    }
}

// ============================================================================
// Naming
// ============================================================================

#[test]
fn snake_case_is_idempotent() {
    for ident in ["camelCase", "PascalCase", "already_snake", "x", "", "parseHTTPResponse"] {
        let once = to_snake_case(ident);
        assert_eq!(to_snake_case(&once), once, "{ident}");
    }
}
