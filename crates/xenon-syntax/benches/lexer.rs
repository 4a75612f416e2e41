// Lexer and parser throughput benchmarks for Xenon.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use xenon_syntax::Lexer;

const CLASS_SOURCE: &str = r#"
class Counter {
    var count: int = 0;
    var label: string = "counter";

    fun increment(by: int): int {
        count = count + by;
        return count;
    }

    fun describe(): string {
        if (count > 10) {
            return label + " is large";
        } else {
            return label + " is small";
        }
    }
}
"#;

/// Lexes a simple expression with basic tokens.
fn bench_simple_expression(c: &mut Criterion) {
    let source = "var x: int = 42 + 10 * 5;";

    c.bench_function("simple_expression", |b| {
        b.iter(|| Lexer::new(black_box(source)).lex())
    });
}

/// Lexes a class with fields, methods and control flow.
fn bench_class_definition(c: &mut Criterion) {
    c.bench_function("class_definition", |b| {
        b.iter(|| Lexer::new(black_box(CLASS_SOURCE)).lex())
    });
}

/// Lexes inputs of growing size to measure throughput.
fn bench_input_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("input_size");

    let base_line = "var x: int = (a + b) * c % 7; // step\n";
    for size in [1, 10, 100, 1000] {
        let source = base_line.repeat(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| Lexer::new(black_box(source)).lex())
        });
    }

    group.finish();
}

/// Lexes and parses a class plus top-level statements.
fn bench_parse_program(c: &mut Criterion) {
    let source = format!(
        "{CLASS_SOURCE}\nvar c: Counter = new Counter();\nprint(c.increment(3));\nprint(c.describe());\n"
    );

    c.bench_function("parse_program", |b| {
        b.iter(|| xenon_syntax::parse(black_box(&source)))
    });
}

criterion_group!(
    benches,
    bench_simple_expression,
    bench_class_definition,
    bench_input_size,
    bench_parse_program
);
criterion_main!(benches);
