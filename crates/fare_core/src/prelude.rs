//! Re-exports of the most commonly used items in `fare_core`.
pub use crate::pricing_params::PricingParams;
pub use crate::store::{
    AirportStore, FlightStore, MemoryStore, RouteStore, ScheduleStore, SqliteStore,
    UpsertOutcome,
};

pub use crate::pricing::{calculate_price, price_between, update_or_create_flights};
pub use crate::weights::{apply_weights, assign_weights, update_airport_weights};

pub use crate::model::{Airport, Flight, Route, ScheduledFlight};
pub use crate::{airport, route};
