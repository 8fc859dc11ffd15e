use log::{debug, error, info};

use crate::{
    constants::MAX_WEIGHT,
    model::{timestamp_now, Airport, Flight},
    pricing_params::PricingParams,
    statistics::RunStats,
    store::{AirportStore, FlightStore, RouteStore, UpsertOutcome},
    util::math::{haversine_miles, round2},
};

const STEP_SIZE: f64 = 10.0;

/// Discount granted for the popularity of both airports. Airports without a
/// weight count as `params.default_weight`.
pub fn weight_discount(origin: &Airport, destination: &Airport, params: &PricingParams) -> f64 {
    let top = MAX_WEIGHT as f64 + 1.0;
    let origin_weight = origin.weight.unwrap_or(params.default_weight) as f64;
    let destination_weight = destination.weight.unwrap_or(params.default_weight) as f64;

    (top - origin_weight) * params.weight_step + (top - destination_weight) * params.weight_step
}

/// Fare for a distance in miles after `discount`, never below the base fee
pub fn price_for_distance(miles: f64, discount: f64, params: &PricingParams) -> f64 {
    let price = params.base_fee + miles * params.price_per_mile - discount;
    round2(price.max(params.base_fee))
}

/// Fare between two airports
pub fn price_between(origin: &Airport, destination: &Airport, params: &PricingParams) -> f64 {
    let miles = haversine_miles(origin, destination);
    price_for_distance(miles, weight_discount(origin, destination, params), params)
}

/// Looks up both airports and prices the connection. Returns `None` if
/// either airport is not stored.
pub fn calculate_price<S: AirportStore + ?Sized>(
    store: &S,
    origin: &str,
    destination: &str,
    params: &PricingParams,
) -> anyhow::Result<Option<f64>> {
    let (Some(origin_info), Some(destination_info)) =
        (store.airport(origin)?, store.airport(destination)?)
    else {
        return Ok(None);
    };

    Ok(Some(price_between(&origin_info, &destination_info, params)))
}

/// Prices every stored route and upserts one flight per route
pub fn update_or_create_flights<S>(
    store: &mut S,
    params: &PricingParams,
) -> anyhow::Result<RunStats>
where
    S: AirportStore + RouteStore + FlightStore + ?Sized,
{
    update_or_create_flights_with(store, params, timestamp_now)
}

/// Same as [`update_or_create_flights`] with the timestamp of each flight
/// taken from `clock`
pub fn update_or_create_flights_with<S, C>(
    store: &mut S,
    params: &PricingParams,
    mut clock: C,
) -> anyhow::Result<RunStats>
where
    S: AirportStore + RouteStore + FlightStore + ?Sized,
    C: FnMut() -> String,
{
    let mut stats = RunStats::default();
    stats.init();

    let routes = store.routes()?;
    let num_routes = routes.len();
    info!("BEGIN pricing {} routes", num_routes);

    let mut next_goal = STEP_SIZE;

    for (i, route) in routes.iter().enumerate() {
        let price = match calculate_price(&*store, &route.origin, &route.destination, params) {
            Ok(Some(price)) => price,
            Ok(None) => {
                debug!(
                    "Skipping flight from {} to {}: airport not found",
                    route.origin, route.destination
                );
                stats.skipped += 1;
                continue;
            }
            Err(e) => {
                error!(
                    "Error looking up airports of flight {} to {}: {:#}",
                    route.origin, route.destination, e
                );
                stats.failed += 1;
                continue;
            }
        };

        let flight = Flight::new(&route.origin, &route.destination, price, &clock());

        match store.upsert_flight(&flight) {
            Ok(outcome) => {
                match outcome {
                    UpsertOutcome::Created => info!(
                        "Created new flight from {} to {}: ${}",
                        flight.origin, flight.destination, flight.price
                    ),
                    UpsertOutcome::Modified => info!(
                        "Updated flight from {} to {}: ${}",
                        flight.origin, flight.destination, flight.price
                    ),
                    UpsertOutcome::Unchanged => info!(
                        "No changes made for flight from {} to {}",
                        flight.origin, flight.destination
                    ),
                }
                stats.record(outcome);
            }
            Err(e) => {
                error!(
                    "Error in upserting flight {} to {}: {:#}",
                    flight.origin, flight.destination, e
                );
                stats.failed += 1;
            }
        }

        let progress = (i + 1) as f64 / num_routes as f64;
        if progress * 100.0 >= next_goal {
            debug!("Progress: {:.2}%", progress * 100.0);
            next_goal += STEP_SIZE;
        }
    }

    stats.finish();
    info!("FINISHED pricing. {}", stats);

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::{
        airport, route,
        store::{FlightStore, MemoryStore},
        util::test_stores::{generate_simple_store, jfk, lax},
    };

    fn init_log() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn fixed_clock() -> String {
        "20241019120000".to_string()
    }

    #[test]
    fn jfk_to_lax_with_default_weights() {
        let params = PricingParams::default();
        let price = price_between(&jfk(), &lax(), &params);

        // ~2468 miles with a radius of 3956 miles, weight 10 still takes 2 per airport
        assert_eq!(weight_discount(&jfk(), &lax(), &params), 4.0);
        assert_abs_diff_eq!(price + 4.0, 226.2, epsilon = 1.0);
        assert_eq!(price, 221.68);
    }

    #[test]
    fn popular_origin_is_cheaper() {
        let params = PricingParams::default();
        let popular_jfk = jfk().with_weight(1);

        assert_eq!(weight_discount(&popular_jfk, &lax(), &params), 22.0);

        let full = price_between(&jfk(), &lax(), &params);
        let discounted = price_between(&popular_jfk, &lax(), &params);
        assert_abs_diff_eq!(full - discounted, 18.0, epsilon = 1e-9);
        assert_eq!(discounted, 203.68);
    }

    #[test]
    fn price_is_symmetric() {
        let params = PricingParams::default();
        assert_eq!(
            price_between(&jfk(), &lax(), &params),
            price_between(&lax(), &jfk(), &params)
        );
    }

    #[test]
    fn discount_never_goes_below_base_fee() {
        let params = PricingParams::default();
        // 10 miles apart, maximum discount of 40
        let a = airport!("AAA", 0.0, 0.0, 1);
        let b = airport!("BBB", 0.0, 0.145, 1);

        assert_eq!(weight_discount(&a, &b, &params), 40.0);
        assert_eq!(price_between(&a, &b, &params), 48.0);
        assert_eq!(price_between(&a, &a, &params), 48.0);
    }

    #[test]
    fn custom_params() {
        let params = PricingParams::new().base_fee(40.0).price_per_mile(0.06);
        assert_eq!(price_for_distance(1000.0, 0.0, &params), 100.0);
        assert_eq!(price_for_distance(1000.0, 100.0, &params), 40.0);
    }

    #[test]
    fn missing_airport_yields_no_price() {
        init_log();
        let mut store = MemoryStore::new();
        store.add_airport(lax());
        store.add_route(route!("JFK" => "LAX"));

        let params = PricingParams::default();
        assert_eq!(
            calculate_price(&store, "JFK", "LAX", &params).unwrap(),
            None
        );
        assert_eq!(
            calculate_price(&store, "LAX", "JFK", &params).unwrap(),
            None
        );

        let stats = update_or_create_flights(&mut store, &params).unwrap();

        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.written(), 0);
        assert_eq!(store.flight_writes, 0);
        assert!(store.flights().unwrap().is_empty());
    }

    #[test]
    fn flights_are_created_then_updated() {
        init_log();
        let mut store = generate_simple_store();
        let params = PricingParams::default();

        let stats = update_or_create_flights_with(&mut store, &params, fixed_clock).unwrap();
        assert_eq!(stats.created, 4);
        assert_eq!(stats.skipped, 1);

        let flight = store.flight("JFK", "LAX").unwrap().unwrap();
        assert_eq!(flight.price, "221.68");
        assert_eq!(flight.timestamp, "20241019120000");

        // Same values are still written but reported as unchanged
        let stats = update_or_create_flights_with(&mut store, &params, fixed_clock).unwrap();
        assert_eq!(stats.unchanged, 4);
        assert_eq!(store.flight_writes, 8);

        let stats =
            update_or_create_flights_with(&mut store, &params, || "20241020120000".to_string())
                .unwrap();
        assert_eq!(stats.modified, 4);
        assert_eq!(store.flights().unwrap().len(), 4);
    }

    #[test]
    fn failed_write_does_not_stop_the_run() {
        init_log();
        let mut store = generate_simple_store();
        store.fail_writes_for("JFK-LAX");

        let stats = update_or_create_flights(&mut store, &PricingParams::default()).unwrap();

        assert_eq!(stats.failed, 1);
        assert_eq!(stats.created, 3);
        assert!(store.flight("JFK", "LAX").unwrap().is_none());
        assert!(store.flight("LAX", "JFK").unwrap().is_some());
    }

    #[test]
    fn empty_route_set_is_a_no_op() {
        let mut store = MemoryStore::new();
        store.add_airports(vec![jfk(), lax()]);

        let stats = update_or_create_flights(&mut store, &PricingParams::default()).unwrap();
        assert_eq!(stats.total(), 0);
    }

    proptest! {
        #[test]
        fn price_never_below_base_fee(
            lat1 in -90.0..90.0f64,
            lon1 in -180.0..180.0f64,
            lat2 in -90.0..90.0f64,
            lon2 in -180.0..180.0f64,
            w1 in 1..=10u8,
            w2 in 1..=10u8,
        ) {
            let params = PricingParams::default();
            let a = airport!("AAA", lat1, lon1, w1);
            let b = airport!("BBB", lat2, lon2, w2);
            prop_assert!(price_between(&a, &b, &params) >= 48.0);
        }

        #[test]
        fn price_grows_with_distance(
            d1 in 0.0..13_000.0f64,
            d2 in 0.0..13_000.0f64,
            w1 in 1..=10u8,
            w2 in 1..=10u8,
        ) {
            let params = PricingParams::default();
            let a = airport!("AAA", 0.0, 0.0, w1);
            let b = airport!("BBB", 0.0, 0.0, w2);
            let discount = weight_discount(&a, &b, &params);

            let (near, far) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
            prop_assert!(
                price_for_distance(near, discount, &params)
                    <= price_for_distance(far, discount, &params)
            );
        }
    }
}
