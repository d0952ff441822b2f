//! Throughput of the three block-evaluation modes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use teamscatter::kernel::{p2p_block, p2p_block_symmetric, p2p_self, LaplacePotential};
use teamscatter::points::random_system;

fn bench_block_evaluators(c: &mut Criterion) {
    let kernel = LaplacePotential;
    let mut group = c.benchmark_group("p2p");
    for n in [256usize, 512, 1024] {
        let (points, charges) = random_system(2 * n, 2525365464);
        let (x, t) = points.split_at(n);
        let (cx, ct) = charges.split_at(n);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_with_input(BenchmarkId::new("diagonal", n), &n, |b, _| {
            let mut r = vec![0.0f64; n];
            b.iter(|| p2p_self(&kernel, x, cx, &mut r));
        });
        group.bench_with_input(BenchmarkId::new("asymmetric", n), &n, |b, _| {
            let mut r = vec![0.0f64; n];
            b.iter(|| p2p_block(&kernel, x, cx, t, &mut r));
        });
        group.bench_with_input(BenchmarkId::new("symmetric", n), &n, |b, _| {
            let mut rx = vec![0.0f64; n];
            let mut rt = vec![0.0f64; n];
            b.iter(|| p2p_block_symmetric(&kernel, x, cx, &mut rx, t, ct, &mut rt));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_block_evaluators);
criterion_main!(benches);
