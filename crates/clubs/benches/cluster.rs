#![allow(missing_docs)]

use criterion::*;

use clubs::{Dataset, SeedMethod};

fn dataset(car: usize, dim: usize) -> Dataset<f32> {
    let rows = symagen::random_data::random_tabular_seedable(car, dim, -10.0, 10.0, 42);
    Dataset::from_rows(car, dim, rows.into_iter().flatten().collect()).unwrap()
}

fn neighbor_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("NeighborGraph");

    for car in [1_000, 5_000] {
        let data = dataset(car, 10);
        let id = BenchmarkId::new("k-10", car);
        group.bench_with_input(id, &data, |b, data| {
            b.iter(|| black_box(clubs::knn_graph(data, 10, None)))
        });
    }
    group.finish();
}

fn bounded_clustering(c: &mut Criterion) {
    let mut group = c.benchmark_group("BoundedClustering");

    let data = dataset(2_000, 10);
    for method in [
        SeedMethod::Lexical,
        SeedMethod::InwardsUpdating,
        SeedMethod::ExclusionUpdating,
    ] {
        let id = BenchmarkId::new(method.name(), 2_000);
        group.bench_with_input(id, &data, |b, data| {
            b.iter(|| black_box(clubs::cluster(data, 10, method, true)))
        });
    }
    group.finish();
}

criterion_group!(benches, neighbor_graph, bounded_clustering);
criterion_main!(benches);
