//! Benchmarks for the telemetry cache hot paths.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use telem_cache::{DynamicCache, StaticCache};
use telem_core::{DataType, Series, TimeRange, TimeStamp};

fn secs_range(start: i64, end: i64) -> TimeRange {
    TimeRange::new(TimeStamp::from_secs(start), TimeStamp::from_secs(end))
}

fn filled_static(entries: usize) -> StaticCache {
    let mut cache = StaticCache::new();
    for i in 0..entries as i64 {
        let range = secs_range(i * 20, i * 20 + 10);
        let series = Series::new(DataType::Float64, range, vec![0.0; 64]);
        cache.write(range, vec![series]);
    }
    cache
}

fn benchmark_static_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("StaticCache/write");

    for size in [100, 1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| black_box(filled_static(size)))
        });
    }

    group.finish();
}

fn benchmark_static_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("StaticCache/read");

    for size in [100, 1000, 10000].iter() {
        let cache = filled_static(*size);
        let query = secs_range(0, *size as i64 * 20);
        group.bench_with_input(BenchmarkId::from_parameter(size), &cache, |b, cache| {
            b.iter(|| cache.read(black_box(query)))
        });
    }

    group.finish();
}

fn benchmark_dynamic_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("DynamicCache/write");

    for size in [1000, 10000, 100000].iter() {
        let series = Series::new(
            DataType::Float64,
            secs_range(0, *size as i64),
            vec![1.0; *size],
        );
        group.bench_with_input(BenchmarkId::from_parameter(size), &series, |b, series| {
            b.iter(|| {
                let mut cache = DynamicCache::new(4096, DataType::Float64).unwrap();
                black_box(cache.write(std::slice::from_ref(series)))
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_static_write,
    benchmark_static_read,
    benchmark_dynamic_write
);
criterion_main!(benches);
