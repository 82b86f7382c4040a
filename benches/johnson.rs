use airnet::graph::generators::generate_airlines;
use airnet::Johnson;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_johnson(c: &mut Criterion) {
    let mut group = c.benchmark_group("johnson");
    group.sample_size(10);

    let mut rng = StdRng::seed_from_u64(7);
    for size in [100usize, 300, 600] {
        let network = generate_airlines(size, 5, &mut rng).build();

        group.bench_with_input(BenchmarkId::new("sequential", size), &network, |b, network| {
            let johnson = Johnson::new();
            b.iter(|| johnson.compute(black_box(network)))
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &network, |b, network| {
            let johnson = Johnson::new().with_parallel(true);
            b.iter(|| johnson.compute(black_box(network)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_johnson);
criterion_main!(benches);
