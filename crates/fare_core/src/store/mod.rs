//! Storage collaborators of the weight assigner and the price calculator.
//!
//! A store handle is opened once by the caller and passed by reference to
//! every stage. Writes are single-record upserts; nothing is grouped into
//! transactions.
use std::fmt;

use crate::constants::Weight;
use crate::model::{Airport, Flight, Route, ScheduledFlight};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Result of a single upsert, as reported by the underlying primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No document with the key existed, a new one was inserted
    Created,
    /// An existing document was changed
    Modified,
    /// An existing document already held the written values
    Unchanged,
}

impl fmt::Display for UpsertOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpsertOutcome::Created => write!(f, "created"),
            UpsertOutcome::Modified => write!(f, "modified"),
            UpsertOutcome::Unchanged => write!(f, "unchanged"),
        }
    }
}

pub trait AirportStore {
    fn airport(&self, iata_code: &str) -> anyhow::Result<Option<Airport>>;

    fn airports(&self) -> anyhow::Result<Vec<Airport>>;

    /// Inserts or replaces the airport keyed by its IATA code. An existing
    /// weight is kept if `airport.weight` is `None`.
    fn upsert_airport(&mut self, airport: &Airport) -> anyhow::Result<UpsertOutcome>;

    /// Sets the weight of an existing airport. Returns `false` if no airport
    /// with this code exists.
    fn set_weight(&mut self, iata_code: &str, weight: Weight) -> anyhow::Result<bool>;
}

pub trait RouteStore {
    fn routes(&self) -> anyhow::Result<Vec<Route>>;

    fn upsert_route(&mut self, route: &Route) -> anyhow::Result<UpsertOutcome>;
}

pub trait FlightStore {
    fn flight(&self, origin: &str, destination: &str) -> anyhow::Result<Option<Flight>>;

    fn flights(&self) -> anyhow::Result<Vec<Flight>>;

    fn upsert_flight(&mut self, flight: &Flight) -> anyhow::Result<UpsertOutcome>;
}

/// Timetable of scheduled flights, one entry per flight number
pub trait ScheduleStore {
    fn scheduled_flight(&self, flight_number: &str) -> anyhow::Result<Option<ScheduledFlight>>;

    fn scheduled_flights(&self) -> anyhow::Result<Vec<ScheduledFlight>>;

    fn upsert_scheduled_flight(
        &mut self,
        flight: &ScheduledFlight,
    ) -> anyhow::Result<UpsertOutcome>;
}
