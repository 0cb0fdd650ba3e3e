//! Benchmarks for query pipeline evaluation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use seqflow::prelude::*;

fn query_benchmark(c: &mut Criterion) {
    c.bench_function("to_list_10k", |b| {
        b.iter(|| {
            let mut query = Query::new(0..10_000);
            black_box(query.to_list().unwrap())
        })
    });

    c.bench_function("sliding_window_10", |b| {
        b.iter(|| {
            let mut windows = Query::new(0..1_000).sliding_window(10).unwrap();
            black_box(windows.to_list().unwrap())
        })
    });

    c.bench_function("unique_ever_seen_dense", |b| {
        b.iter(|| {
            let mut kept = Query::new((0..10_000).map(|x| x % 100)).unique_ever_seen();
            black_box(kept.to_list().unwrap())
        })
    });

    c.bench_function("grouper_fill_10k", |b| {
        b.iter(|| {
            let mut chunks = Query::new(0..10_000)
                .grouper(7, IncompletePolicy::Fill, Some(0))
                .unwrap();
            black_box(chunks.to_list().unwrap())
        })
    });
}

criterion_group!(benches, query_benchmark);
criterion_main!(benches);
