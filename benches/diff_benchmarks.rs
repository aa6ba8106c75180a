//! Benchmarks for merging perft breakdowns and parsing engine output.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use perft_debugger::engine::parse::parse_subject_output;
use perft_debugger::{compare, NodeCountResult};

const FILES: &str = "abcdefgh";

/// Breakdown with `n` distinct moves; `skew` shifts which moves are present.
fn breakdown(n: usize, skew: usize) -> NodeCountResult {
    let mut result = NodeCountResult::new();
    for i in skew..skew + n {
        let from = FILES.as_bytes()[i % 8] as char;
        let to = FILES.as_bytes()[(i / 8) % 8] as char;
        let mv = format!("{from}{}{to}{}", i % 7 + 1, i / 64 + 1);
        result.record_move(&mv, (i * 31) as u64);
    }
    result.total = result.per_move_sum();
    result
}

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");

    for n in [20, 48, 218] {
        let subject = breakdown(n, 0);
        let identical = subject.clone();
        let shifted = breakdown(n, n / 4);

        group.bench_with_input(BenchmarkId::new("identical", n), &n, |b, _| {
            b.iter(|| compare(black_box(&subject), black_box(&identical)))
        });
        group.bench_with_input(BenchmarkId::new("overlapping", n), &n, |b, _| {
            b.iter(|| compare(black_box(&subject), black_box(&shifted)))
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let reference = breakdown(218, 0);
    let mut lines: Vec<String> = reference
        .per_move
        .iter()
        .map(|(mv, count)| format!("{mv} {count}"))
        .collect();
    lines.push(String::new());
    lines.push(reference.total.to_string());

    c.bench_function("parse_subject_output/218", |b| {
        b.iter(|| parse_subject_output(black_box(&lines)))
    });
}

criterion_group!(benches, bench_compare, bench_parse);
criterion_main!(benches);
