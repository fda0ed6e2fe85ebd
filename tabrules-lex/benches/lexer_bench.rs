//! Lexer benchmarks.
//!
//! Run with: `cargo bench --package tabrules-lex`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tabrules_lex::Lexer;

fn token_count(source: &str) -> usize {
    Lexer::tokenize(source).len()
}

fn bench_lexer_rule_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_rule_shapes");

    let rules = [
        ("comparison", "3C > 100"),
        ("range", "2C BETWEEN 0 AND 100"),
        ("pattern", "5C MATCHES \"^[A-Z]{3}[0-9]{4}$\""),
        ("arithmetic", "4C = 1C + 2C - 3C"),
        ("datatype", "6C IS NUMERIC"),
        ("required", "1C REQUIRED"),
    ];

    for (name, rule) in rules {
        group.throughput(Throughput::Bytes(rule.len() as u64));
        group.bench_function(name, |b| b.iter(|| token_count(black_box(rule))));
    }

    group.finish();
}

fn bench_lexer_long_expression(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_long_expression");
    let rule = "10C = 1C + 2C * (3C - 4C) / 5C + 6C * 7C - 8C / 9C";
    group.throughput(Throughput::Bytes(rule.len() as u64));
    group.bench_function("nested_arithmetic", |b| b.iter(|| token_count(black_box(rule))));
    group.finish();
}

criterion_group!(benches, bench_lexer_rule_shapes, bench_lexer_long_expression);
criterion_main!(benches);
