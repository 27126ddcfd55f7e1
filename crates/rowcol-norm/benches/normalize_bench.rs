//! Benchmark for the normalization pipeline (staged vs streamed drivers).
//!
//! Compares:
//! - Staged driver with the default lane width
//! - Staged driver with single-row lanes
//! - Streamed driver (load fused with row normalization)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rowcol_norm::{normalize_matrix, NormKernel, SliceSource, VecSink};

fn matrix<const N: usize>() -> Vec<f64> {
    (0..N * N).map(|i| ((i % 1000) as f64) * 0.01).collect()
}

fn bench_size<const N: usize>(c: &mut Criterion) {
    let a = matrix::<N>();
    let elements = (N * N) as u64;

    let mut group = c.benchmark_group("normalize");
    group.throughput(Throughput::Elements(elements));

    group.bench_with_input(BenchmarkId::new("staged", N), &a, |bench, a| {
        bench.iter(|| black_box(normalize_matrix::<f64, N, N>(a).unwrap()));
    });

    group.bench_with_input(BenchmarkId::new("staged_lane1", N), &a, |bench, a| {
        bench.iter(|| {
            let mut src = SliceSource::new(a);
            let mut sink = VecSink::with_capacity(N * N);
            NormKernel::<N, N>::new()
                .lanes(1)
                .run(&mut src, &mut sink)
                .unwrap();
            black_box(sink.into_inner())
        });
    });

    group.bench_with_input(BenchmarkId::new("streamed", N), &a, |bench, a| {
        bench.iter(|| {
            let mut src = SliceSource::new(a);
            let mut sink = VecSink::with_capacity(N * N);
            NormKernel::<N, N>::new()
                .run_streamed(&mut src, &mut sink)
                .unwrap();
            black_box(sink.into_inner())
        });
    });

    group.finish();
}

fn bench_sizes(c: &mut Criterion) {
    bench_size::<64>(c);
    bench_size::<256>(c);
    bench_size::<1024>(c);
}

criterion_group!(benches, bench_sizes);
criterion_main!(benches);
