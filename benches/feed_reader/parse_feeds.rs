use criterion::{black_box, criterion_group, criterion_main, Criterion};
use feed_reader::{AirportFeed, AirportFilter, IataCodes, RouteFeed};

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = parse_airports, parse_routes
}
criterion_main!(benches);

fn allow_list() -> AirportFilter {
    let mut path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("../crates/feed_reader/test_data/iata_codes.csv");
    AirportFilter::AllowList(IataCodes::from_csv(&path).unwrap())
}

fn kept_airports() -> AirportFeed {
    let mut path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("../crates/feed_reader/test_data/airports.csv");
    AirportFeed::from_csv(&path, &allow_list()).unwrap()
}

fn parse_airports(c: &mut Criterion) {
    let mut path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("../crates/feed_reader/test_data/airports.csv");
    let filter = allow_list();

    c.bench_function("parse_airports", |b| {
        b.iter(|| {
            let _ = AirportFeed::from_csv(black_box(&path), &filter);
        })
    });
}

fn parse_routes(c: &mut Criterion) {
    let mut path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("../crates/feed_reader/test_data/routes.dat");
    let codes = kept_airports().iata_codes();

    c.bench_function("parse_routes", |b| {
        b.iter(|| {
            let _ = RouteFeed::from_dat(black_box(&path), &codes);
        })
    });
}
