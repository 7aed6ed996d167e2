use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use danker::{
    converge, EdgeIndexer, InMemoryEdges, InMemoryIterator, StreamingIterator, Strategy,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Left- and right-sorted copies of a random graph with ~`nodes * 8` edges
fn sorted_graph(nodes: u64) -> (InMemoryEdges, InMemoryEdges) {
    let mut rng = StdRng::seed_from_u64(42);
    let mut edges: Vec<(u64, u64)> = (0..nodes * 8)
        .map(|_| (rng.gen_range(0..nodes), rng.gen_range(0..nodes)))
        .collect();
    edges.sort_by_key(|&(s, _)| s);
    let left: String = edges.iter().map(|(s, t)| format!("{}\t{}\n", s, t)).collect();
    edges.sort_by_key(|&(_, t)| t);
    let right: String = edges.iter().map(|(s, t)| format!("{}\t{}\n", s, t)).collect();
    (
        InMemoryEdges::new("bench.links", left),
        InMemoryEdges::new("bench.links.right", right),
    )
}

/// Benchmark one indexing pass per layout
fn bench_indexing(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexing");

    for size in [1_000u64, 10_000].iter() {
        let (left, _) = sorted_graph(*size);
        group.bench_with_input(BenchmarkId::new("in_memory", size), size, |b, _| {
            b.iter(|| {
                let table = EdgeIndexer::new(Strategy::InMemory, 0.1).index(&left).unwrap();
                criterion::black_box(table.len());
            });
        });
        group.bench_with_input(BenchmarkId::new("streaming", size), size, |b, _| {
            b.iter(|| {
                let table = EdgeIndexer::new(Strategy::Streaming, 0.1).index(&left).unwrap();
                criterion::black_box(table.len());
            });
        });
    }
    group.finish();
}

/// Benchmark ten iterations with each strategy
fn bench_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterations");

    for size in [1_000u64, 10_000].iter() {
        let (left, right) = sorted_graph(*size);
        let big = EdgeIndexer::new(Strategy::InMemory, 0.1).index(&left).unwrap();
        let small = EdgeIndexer::new(Strategy::Streaming, 0.1).index(&left).unwrap();

        group.bench_with_input(BenchmarkId::new("in_memory", size), size, |b, _| {
            b.iter(|| {
                let mut iterator = InMemoryIterator::new(0.85, "bench.links");
                let ranks = converge(big.clone(), &mut iterator, 10).unwrap();
                criterion::black_box(ranks.len());
            });
        });
        group.bench_with_input(BenchmarkId::new("streaming", size), size, |b, _| {
            b.iter(|| {
                let mut iterator = StreamingIterator::new(right.clone(), 0.85);
                let ranks = converge(small.clone(), &mut iterator, 10).unwrap();
                criterion::black_box(ranks.len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_indexing, bench_iterations);
criterion_main!(benches);
