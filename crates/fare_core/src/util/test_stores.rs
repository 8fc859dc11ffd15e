use crate::{
    airport,
    model::Airport,
    route,
    store::{MemoryStore, SqliteStore},
};
use feed_reader::{AirportFeed, AirportFilter, IataCodes, RouteFeed, ScheduleFeed};

pub fn jfk() -> Airport {
    airport!("JFK", 40.6413, -73.7781)
}

pub fn lax() -> Airport {
    airport!("LAX", 33.9416, -118.4085)
}

pub fn cdg() -> Airport {
    airport!("CDG", 49.0097, 2.5479)
}

pub fn lhr() -> Airport {
    airport!("LHR", 51.4700, -0.4543)
}

pub fn generate_simple_store() -> MemoryStore {
    //  JFK <=> LAX
    //   ^
    //   |
    //  LHR <- CDG      ORD -> LAX (ORD is not stored)
    let mut store = MemoryStore::new();

    store.add_airports(vec![jfk(), lax(), cdg(), lhr()]);

    store.add_routes(route!("JFK", "LAX"));
    store.add_route(route!("CDG" => "LHR"));
    store.add_route(route!("LHR" => "JFK"));
    store.add_route(route!("ORD" => "LAX"));

    store
}

/// Timetable of the `feed_reader` test data
pub fn schedule() -> ScheduleFeed {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../feed_reader/test_data");
    ScheduleFeed::from_csv(&dir.join("flights.csv")).unwrap()
}

/// Airports and routes of the `feed_reader` test data
pub fn feeds() -> (AirportFeed, RouteFeed) {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../feed_reader/test_data");
    let codes = IataCodes::from_csv(&dir.join("iata_codes.csv")).unwrap();

    let airports =
        AirportFeed::from_csv(&dir.join("airports.csv"), &AirportFilter::AllowList(codes)).unwrap();
    let routes = RouteFeed::from_dat(&dir.join("routes.dat"), &airports.iata_codes()).unwrap();
    (airports, routes)
}

pub fn sqlite_store_with_feeds() -> SqliteStore {
    let (airports, routes) = feeds();
    let mut store = SqliteStore::open_in_memory().unwrap();

    crate::ingest::import_airports(&mut store, &airports);
    crate::ingest::import_routes(&mut store, &routes, "20241019120000");
    store
}
