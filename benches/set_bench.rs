//! Benchmark for ThreadSafeSet vs ThreadUnsafeSet.
//!
//! Measures the cost of the reader/writer lock on single-threaded use and
//! the cost of streaming elements through a producer thread.

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use mapset::{ThreadSafeSet, ThreadUnsafeSet};
use std::hint::black_box;

// =============================================================================
// add Benchmark
// =============================================================================

fn benchmark_add(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("add");

    for size in [1_000, 10_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("ThreadUnsafeSet", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut set = ThreadUnsafeSet::new();
                    for index in 0..size {
                        set.add(black_box(index));
                    }
                    black_box(set)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("ThreadSafeSet", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let set = ThreadSafeSet::new();
                    for index in 0..size {
                        set.add(black_box(index));
                    }
                    black_box(set)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// intersect Benchmark
// =============================================================================

fn benchmark_intersect(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("intersect");

    for size in [1_000, 10_000] {
        let unsafe_a: ThreadUnsafeSet<i64> = (0..size).collect();
        let unsafe_b: ThreadUnsafeSet<i64> = (size / 2..size * 2).collect();
        group.bench_with_input(
            BenchmarkId::new("ThreadUnsafeSet", size),
            &size,
            |bencher, _| bencher.iter(|| black_box(unsafe_a.intersect(&unsafe_b))),
        );

        let safe_a: ThreadSafeSet<i64> = (0..size).collect();
        let safe_b: ThreadSafeSet<i64> = (size / 2..size * 2).collect();
        group.bench_with_input(
            BenchmarkId::new("ThreadSafeSet", size),
            &size,
            |bencher, _| bencher.iter(|| black_box(safe_a.intersect(&safe_b))),
        );
    }

    group.finish();
}

// =============================================================================
// pop Benchmark
// =============================================================================

fn benchmark_pop_drain(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("pop_drain");

    for size in [10_000, 100_000] {
        let unsafe_set: ThreadUnsafeSet<i64> = (0..size).collect();
        group.bench_with_input(
            BenchmarkId::new("ThreadUnsafeSet", size),
            &size,
            |bencher, _| {
                bencher.iter_batched(
                    || unsafe_set.clone(),
                    |mut set| {
                        while let Some(element) = set.pop() {
                            black_box(element);
                        }
                    },
                    BatchSize::LargeInput,
                );
            },
        );

        let safe_set: ThreadSafeSet<i64> = (0..size).collect();
        group.bench_with_input(
            BenchmarkId::new("ThreadSafeSet", size),
            &size,
            |bencher, _| {
                bencher.iter_batched(
                    || safe_set.clone(),
                    |set| {
                        while let Some(element) = set.pop() {
                            black_box(element);
                        }
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

// =============================================================================
// streaming Benchmark
// =============================================================================

fn benchmark_streaming(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("streaming");

    for size in [100, 1_000] {
        let set: ThreadSafeSet<i64> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("iter", size), &size, |bencher, _| {
            bencher.iter(|| black_box(set.iter().iter().count()));
        });

        group.bench_with_input(BenchmarkId::new("to_vec", size), &size, |bencher, _| {
            bencher.iter(|| black_box(set.to_vec().len()));
        });

        group.bench_with_input(
            BenchmarkId::new("iterator_stop_early", size),
            &size,
            |bencher, _| {
                bencher.iter(|| {
                    let mut iterator = set.iterator();
                    let first = iterator.next();
                    iterator.stop();
                    black_box(first)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_add,
    benchmark_intersect,
    benchmark_pop_drain,
    benchmark_streaming
);
criterion_main!(benches);
