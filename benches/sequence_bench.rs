//! Adapter benchmarks against their stdlib spellings
//!
//! Each variant drains the sequence to its last element, matching how the
//! adapters are consumed in the CLI runner.

use std::collections::HashSet;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pullseq::dataset::{distinct_input, nested_input, Uniqueness};
use pullseq::{flatten, SequenceExt};

fn bench_distinct(c: &mut Criterion) {
    let mut group = c.benchmark_group("distinct_by");
    for &size in &[100usize, 1_000, 10_000, 100_000] {
        for uniqueness in [Uniqueness::Same, Uniqueness::Distinct, Uniqueness::Mixed] {
            let input = distinct_input(size, uniqueness);
            let point = format!("{uniqueness}/{size}");
            group.throughput(Throughput::Elements(size as u64));

            group.bench_with_input(BenchmarkId::new("stdlib", &point), &input, |b, input| {
                b.iter(|| {
                    let mut seen = HashSet::new();
                    black_box(input.iter().copied().filter(|v| seen.insert(*v)).last())
                })
            });
            group.bench_with_input(BenchmarkId::new("optimized", &point), &input, |b, input| {
                b.iter(|| black_box(input.iter().copied().distinct_by(|v| *v).last()))
            });
        }
    }
    group.finish();
}

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten");
    let sublist_size = 10;
    for &size in &[100usize, 1_000, 10_000] {
        for probability in [0.0, 0.25, 0.75, 1.0] {
            let input = nested_input(size, sublist_size, probability);
            let point = format!("p={probability}/{size}");
            group.throughput(Throughput::Elements(size as u64));

            group.bench_with_input(BenchmarkId::new("stdlib", &point), &input, |b, input| {
                b.iter(|| black_box(input.iter().flatten().last()))
            });
            group.bench_with_input(BenchmarkId::new("optimized", &point), &input, |b, input| {
                b.iter(|| black_box(flatten(input.iter()).last()))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_distinct, bench_flatten);
criterion_main!(benches);
