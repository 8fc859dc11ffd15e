use fare_core::{model::Route, weights::assign_weights};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn gen_rand_routes(number_airports: usize, number_routes: usize) -> Vec<Route> {
    let mut rng = rand::thread_rng();

    (0..number_routes)
        .map(|_| {
            let origin = rng.gen_range(0..number_airports);
            let destination = rng.gen_range(0..number_airports);
            Route::new(
                &format!("A{:05}", origin),
                &format!("A{:05}", destination),
            )
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_weights");
    for number_airports in [100, 1_000, 4_000] {
        let routes = gen_rand_routes(number_airports, number_airports * 16);
        group.bench_with_input(
            BenchmarkId::new("assign_weights", number_airports),
            &routes,
            |b, routes| {
                b.iter(|| assign_weights(black_box(routes)));
            },
        );
    }
    group.finish();
}
