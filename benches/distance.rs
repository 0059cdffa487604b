//! Benchmarks for the n-gram distance core.
//!
//! These measure the two shapes that dominate engine workloads: scalar
//! needle/haystack pairs across string lengths, and the columnar path
//! where one table is reused across many rows.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;

use gramdist::{constant_constant, vector_constant, Ascii, StringColumn, Utf8};

// === Generators ===

fn random_ascii(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.gen_range(b'a'..=b'z')).collect()
}

fn random_rows(n: usize, len: usize) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n).map(|_| random_ascii(&mut rng, len)).collect()
}

// === Benchmarks ===

fn bench_scalar_lengths(c: &mut Criterion) {
    let mut group = c.benchmark_group("constant_constant");

    for len in [16usize, 64, 256, 1024, 4096, 16384].iter() {
        group.throughput(Throughput::Bytes(*len as u64));

        let mut rng = StdRng::seed_from_u64(7);
        let needle = random_ascii(&mut rng, 32);
        let haystack = random_ascii(&mut rng, *len);

        group.bench_with_input(BenchmarkId::from_parameter(len), len, |bench, _| {
            bench.iter(|| {
                constant_constant::<Ascii<false>>(black_box(&needle), black_box(&haystack))
            });
        });
    }

    group.finish();
}

fn bench_utf8_scalar(c: &mut Criterion) {
    let mut group = c.benchmark_group("constant_constant_utf8");

    for len in [64usize, 1024, 16384].iter() {
        group.throughput(Throughput::Bytes(*len as u64));

        let mut rng = StdRng::seed_from_u64(7);
        let needle = random_ascii(&mut rng, 32);
        let haystack = random_ascii(&mut rng, *len);

        group.bench_with_input(BenchmarkId::from_parameter(len), len, |bench, _| {
            bench.iter(|| constant_constant::<Utf8<false>>(black_box(&needle), black_box(&haystack)));
        });
    }

    group.finish();
}

fn bench_batch_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector_constant");

    let row_len = 48; // short rows stay on the inline trail

    for n in [100usize, 1000, 10_000].iter() {
        group.throughput(Throughput::Elements(*n as u64));

        let rows = random_rows(*n, row_len);
        let column = StringColumn::from_rows(rows.iter().map(Vec::as_slice));
        let needle = b"the quick brown fox";

        group.bench_with_input(BenchmarkId::from_parameter(n), n, |bench, _| {
            bench.iter(|| vector_constant::<Ascii<false>>(black_box(&column), black_box(needle)));
        });
    }

    group.finish();
}

fn bench_batch_spilling_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector_constant_long_rows");

    // Rows past 256 bytes pay one trail allocation each.
    for row_len in [128usize, 512, 4096].iter() {
        group.throughput(Throughput::Bytes((row_len * 1000) as u64));

        let rows = random_rows(1000, *row_len);
        let column = StringColumn::from_rows(rows.iter().map(Vec::as_slice));
        let needle = b"the quick brown fox";

        group.bench_with_input(BenchmarkId::from_parameter(row_len), row_len, |bench, _| {
            bench.iter(|| vector_constant::<Ascii<false>>(black_box(&column), black_box(needle)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_scalar_lengths,
    bench_utf8_scalar,
    bench_batch_rows,
    bench_batch_spilling_rows,
);
criterion_main!(benches);
