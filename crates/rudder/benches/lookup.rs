//! Benchmarks for key lookup and membership churn.

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rudder::HashRouter;

fn router_with_nodes(count: usize) -> HashRouter {
    let router = HashRouter::new(10);
    for i in 0..count {
        router.add(&format!("node-{i}"), 1).expect("distinct ids");
    }
    router
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");
    for &count in &[4usize, 64, 512] {
        let router = router_with_nodes(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &router, |b, router| {
            let mut i = 0u64;
            b.iter(|| {
                i = i.wrapping_add(1);
                router.get(&format!("key_{i}"))
            });
        });
    }
    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_remove");
    for &count in &[4usize, 64, 512] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter_batched(
                || router_with_nodes(count),
                |router| {
                    router.add("joiner", 1).unwrap();
                    router.remove("joiner").unwrap();
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_get, bench_churn);
criterion_main!(benches);
