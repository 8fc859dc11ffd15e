//! Crate to weight airports by popularity and price the flights between them.
//!
//! # Basic usage
//! ```
//! use fare_core::prelude::*;
//!
//! // Open the store once and pass it to every stage
//! let mut store = SqliteStore::open_in_memory().expect("Failed to open store");
//!
//! store.upsert_airport(&airport!("JFK", 40.6413, -73.7781)).unwrap();
//! store.upsert_airport(&airport!("LAX", 33.9416, -118.4085)).unwrap();
//! store.upsert_route(&route!("JFK" => "LAX")).unwrap();
//!
//! // Rank airports by the routes referencing them
//! let (weights, _) = update_airport_weights(&mut store).unwrap();
//! assert_eq!(weights.len(), 2);
//!
//! // Price every route
//! let stats = update_or_create_flights(&mut store, &PricingParams::default()).unwrap();
//! assert_eq!(stats.created, 1);
//!```
pub mod constants;
pub mod ingest;
pub mod model;
pub mod prelude;
pub mod pricing;
pub mod pricing_params;
pub mod statistics;
pub mod store;
pub mod util;
pub mod weights;
