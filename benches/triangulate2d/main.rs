use std::time::Duration;

use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BatchSize;
use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use tmesh::prelude::*;

pub fn triangulate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangulate2d");
    group
        .noise_threshold(0.05)
        .measurement_time(Duration::from_secs(20))
        .sample_size(10);
    for num_points in [100, 1000, 10000] {
        group.throughput(Throughput::Elements(num_points as u64));
        group.bench_function(BenchmarkId::from_parameter(num_points), |b| {
            b.iter_batched(
                || setup_points(num_points),
                |points| triangulate_2d(&points).unwrap(),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, triangulate_benchmark);
criterion_main!(benches);

fn setup_points(num_points: usize) -> Vec<Point2d> {
    let mut rng = StdRng::seed_from_u64(1338);
    (0..num_points)
        .map(|_| {
            let x = rng.gen_range(0.0..1.0e5);
            let y = rng.gen_range(0.0..1.0e5);
            Point2d::new(x, y)
        })
        .collect()
}
