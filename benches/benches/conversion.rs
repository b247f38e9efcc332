//! Benchmarks for classification and whole-request conversion.
//!
//! Inputs are synthetic classes of growing size so per-line cost is visible.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use javapy_convert::{ConversionRequest, Converter, SourceFile, classify};

/// A class with `methods` methods, each a loop, a branch and some output.
fn synthetic_class(methods: usize) -> String {
    let mut src = String::from("import java.util.List;\n\npublic class Bench {\n    private int total;\n\n");
    for m in 0..methods {
        src.push_str(&format!(
            r#"    /** Method {m}. */
    public int compute{m}(List<Integer> values, int limit) {{
        int runningSum = 0; // accumulator
        for (int i = 0; i < limit; i++) {{
            if (i % 2 == 0) {{
                runningSum += i;
            }} else if (i > 10) {{
                runningSum -= 1;
            }} else {{
                System.out.println("odd " + i);
            }}
        }}
        return runningSum;
    }}

"#
        ));
    }
    src.push_str("}\n");
    src
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    for methods in [10, 100, 1000] {
        let src = synthetic_class(methods);
        group.throughput(Throughput::Bytes(src.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(methods), &src, |b, src| {
            b.iter(|| classify(black_box(src)))
        });
    }
    group.finish();
}

fn bench_snippet(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_snippet");
    let converter = Converter::new();
    for methods in [10, 100, 1000] {
        let request = ConversionRequest::snippet(synthetic_class(methods));
        group.bench_with_input(BenchmarkId::from_parameter(methods), &request, |b, request| {
            b.iter(|| converter.convert(black_box(request)))
        });
    }
    group.finish();
}

fn bench_directory(c: &mut Criterion) {
    let files: Vec<SourceFile> = (0..50)
        .map(|i| SourceFile::new(format!("Bench{i}.java"), synthetic_class(20)))
        .collect();
    let request = ConversionRequest::directory(files);
    let converter = Converter::new();
    c.bench_function("convert_directory_50_files", |b| {
        b.iter(|| converter.convert(black_box(&request)))
    });
}

criterion_group!(benches, bench_classify, bench_snippet, bench_directory);
criterion_main!(benches);
