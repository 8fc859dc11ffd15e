use crate::{constants::EARTH_RADIUS_MILES, model::Airport};

/// Great-circle distance in miles between two airports
pub fn haversine_miles(src: &Airport, dst: &Airport) -> f64 {
    haversine(src.latitude, src.longitude, dst.latitude, dst.longitude)
}

// Calculates the great-circle distance between two points given in degrees
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let lon1 = lon1.to_radians();
    let lon2 = lon2.to_radians();
    let a = (lat2 - lat1) / 2.0;
    let b = (lon2 - lon1) / 2.0;
    let c = a.sin().powi(2) + lat1.cos() * lat2.cos() * b.sin().powi(2);
    // Rounding can push c slightly above 1 for antipodal points
    let d = 2.0 * c.sqrt().min(1.0).asin();

    EARTH_RADIUS_MILES * d
}

/// Rounds to two fraction digits, ties to even
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
