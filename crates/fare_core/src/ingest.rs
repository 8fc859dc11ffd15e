//! Loading feed snapshots into a store and exporting priced flights.
use std::path::Path;

use anyhow::Context;
use feed_reader::{AirportFeed, RouteFeed, ScheduleFeed};
use log::{debug, error, info};

use crate::{
    model::{Airport, Route, ScheduledFlight},
    statistics::RunStats,
    store::{AirportStore, FlightStore, RouteStore, ScheduleStore, UpsertOutcome},
};

/// Upserts every airport of `feed`. Weights already in the store are kept.
pub fn import_airports<S>(store: &mut S, feed: &AirportFeed) -> RunStats
where
    S: AirportStore + ?Sized,
{
    let mut stats = RunStats::default();
    stats.init();

    info!("BEGIN importing {} airports", feed.get_airports().len());
    for record in feed.get_airports() {
        let airport = Airport::from(record);
        match store.upsert_airport(&airport) {
            Ok(outcome) => {
                match outcome {
                    UpsertOutcome::Created => debug!("Inserted airport {}", airport.iata_code),
                    UpsertOutcome::Modified => debug!("Updated airport {}", airport.iata_code),
                    UpsertOutcome::Unchanged => {
                        debug!("No changes for airport {}", airport.iata_code)
                    }
                }
                stats.record(outcome);
            }
            Err(e) => {
                error!("Error upserting airport {}: {:#}", airport.iata_code, e);
                stats.failed += 1;
            }
        }
    }
    stats.finish();
    info!("FINISHED importing airports. {}", stats);

    stats
}

/// Upserts every route of `feed`, stamped with `timestamp`
pub fn import_routes<S: RouteStore + ?Sized>(
    store: &mut S,
    feed: &RouteFeed,
    timestamp: &str,
) -> RunStats {
    let mut stats = RunStats::default();
    stats.init();

    info!("BEGIN importing {} routes", feed.get_routes().len());
    for record in feed.get_routes() {
        let route = Route::from_record(record, timestamp);
        match store.upsert_route(&route) {
            Ok(outcome) => {
                debug!("Route {} to {}: {}", route.origin, route.destination, outcome);
                stats.record(outcome);
            }
            Err(e) => {
                error!(
                    "Error upserting route {} to {}: {:#}",
                    route.origin, route.destination, e
                );
                stats.failed += 1;
            }
        }
    }
    stats.finish();
    info!("FINISHED importing routes. {}", stats);

    stats
}

/// Upserts every timetable entry of `feed` keyed by its flight number.
/// Later rows with the same flight number overwrite earlier ones.
pub fn import_schedule<S>(store: &mut S, feed: &ScheduleFeed) -> RunStats
where
    S: ScheduleStore + ?Sized,
{
    let mut stats = RunStats::default();
    stats.init();

    info!("BEGIN importing {} scheduled flights", feed.get_flights().len());
    for record in feed.get_flights() {
        let flight = ScheduledFlight::from(record);
        match store.upsert_scheduled_flight(&flight) {
            Ok(outcome) => {
                match outcome {
                    UpsertOutcome::Created => debug!("Inserted flight {}", flight.flight_number),
                    UpsertOutcome::Modified => debug!("Updated flight {}", flight.flight_number),
                    UpsertOutcome::Unchanged => {
                        debug!("No changes for flight {}", flight.flight_number)
                    }
                }
                stats.record(outcome);
            }
            Err(e) => {
                error!("Error upserting flight {}: {:#}", flight.flight_number, e);
                stats.failed += 1;
            }
        }
    }
    stats.finish();
    info!("FINISHED importing scheduled flights. {}", stats);

    stats
}

/// Reads `filtered_airports.csv` and `filtered_routes.csv` as written by
/// `feed_reader`
pub fn load_filtered_csv(
    airports_csv: &Path,
    routes_csv: &Path,
) -> anyhow::Result<(AirportFeed, RouteFeed)> {
    let airports = AirportFeed::from_filtered_csv(airports_csv)
        .context("Could not read filtered airports")?;
    let routes =
        RouteFeed::from_filtered_csv(routes_csv).context("Could not read filtered routes")?;
    Ok((airports, routes))
}

/// Writes all priced flights to `path`. Returns the number of flights.
pub fn export_flights_csv<S>(store: &S, path: &Path) -> anyhow::Result<usize>
where
    S: FlightStore + ?Sized,
{
    let flights = store.flights()?;

    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Could not create {}", path.display()))?;
    debug!("BEGIN writing flights");
    for flight in flights.iter() {
        wtr.serialize(flight)?;
    }
    wtr.flush()?;
    debug!("FINISHED writing flights");

    Ok(flights.len())
}
