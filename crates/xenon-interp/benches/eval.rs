//! End-to-end evaluation benchmarks.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::io;
use xenon_interp::{Config, check_source, run_source};

const FIB: &str = "
class Fib {
    fun at(n: int): int {
        if (n < 2) { return n; }
        return at(n - 1) + at(n - 2);
    }
}
var f: Fib = new Fib();
print(f.at(20));
";

fn counter_program(iterations: usize) -> String {
    format!(
        "
class Counter {{
    var n: int = 0;
    fun bump(by: int): void {{ n = n + by; }}
    fun get(): int {{ return n; }}
}}
var c: Counter = new Counter();
var i: int = 0;
while (i < {iterations}) {{ c.bump(i % 7); i = i + 1; }}
print(c.get());
"
    )
}

fn bench_recursive_calls(c: &mut Criterion) {
    let config = Config::default();
    c.bench_function("fib_20", |b| {
        b.iter(|| run_source(black_box(FIB), io::sink(), &config));
    });
}

fn bench_loop_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("counter_loop");
    let config = Config::default();

    for iterations in [100, 1_000, 10_000] {
        let source = counter_program(iterations);
        group.bench_with_input(BenchmarkId::from_parameter(iterations), &source, |b, source| {
            b.iter(|| run_source(black_box(source), io::sink(), &config));
        });
    }

    group.finish();
}

fn bench_static_checks(c: &mut Criterion) {
    let source = counter_program(10);
    c.bench_function("check_only", |b| {
        b.iter(|| check_source(black_box(&source)));
    });
}

criterion_group!(
    benches,
    bench_recursive_calls,
    bench_loop_iterations,
    bench_static_checks
);
criterion_main!(benches);
