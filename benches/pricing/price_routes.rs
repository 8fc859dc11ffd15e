use fare_core::prelude::*;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn gen_rand_store(number_airports: usize) -> MemoryStore {
    let mut rng = rand::thread_rng();

    // 8 routes per airport on average
    let number_routes = number_airports * 8;

    let mut store = MemoryStore::new();

    for i in 0..number_airports {
        let lat = rng.gen_range(-60.0..70.0);
        let lon = rng.gen_range(-180.0..180.0);
        let weight = rng.gen_range(1..=10);
        store.add_airport(airport!(&format!("A{:05}", i), lat, lon, weight));
    }

    for _ in 0..number_routes {
        let origin = rng.gen_range(0..number_airports);
        let destination = rng.gen_range(0..number_airports);
        store.add_route(route!(&format!("A{:05}", origin) => &format!("A{:05}", destination)));
    }

    store
}

fn criterion_benchmark(c: &mut Criterion) {
    let params = PricingParams::default();

    let mut group = c.benchmark_group("price_routes");
    for number_airports in [100, 1_000, 4_000] {
        let mut store = gen_rand_store(number_airports);
        group.bench_with_input(
            BenchmarkId::new("update_or_create_flights", number_airports),
            &params,
            |b, params| {
                b.iter(|| update_or_create_flights(&mut store, params).unwrap());
            },
        );
    }
    group.finish();
}
