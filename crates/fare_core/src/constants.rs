/// Popularity weight of an airport, 1 (most referenced) to 10
pub type Weight = u8;
/// Three-letter IATA airport code (<https://www.iata.org/en/publications/directories/code-search/>)
pub type IataCode = String;

/// Weight assumed for airports that were never weighted
pub const DEFAULT_WEIGHT: Weight = 10;
pub const MIN_WEIGHT: Weight = 1;
pub const MAX_WEIGHT: Weight = 10;
/// Number of popularity buckets
pub const NUM_BUCKETS: usize = 10;

/// Mean Earth radius in miles used by the haversine distance
pub const EARTH_RADIUS_MILES: f64 = 3956.0;

/// Format of the `timestamp` field on routes and flights
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
