//! Popularity weights of airports.
//!
//! Every airport referenced by a route is ranked by the number of routes
//! starting or ending there. The ranking is cut into ten buckets of
//! `max(n / 10, 1)` airports; the most referenced bucket gets weight 1 and
//! the least referenced gets weight 10. When `n` is not a multiple of ten
//! the trailing airports fall past the tenth bucket and are clamped to 10,
//! so the last bucket is larger than the others.
use log::{debug, error, info, warn};
use rustc_hash::FxHashMap;

use crate::{
    constants::{Weight, MAX_WEIGHT, NUM_BUCKETS},
    model::Route,
    store::{AirportStore, RouteStore},
};

/// Number of routes per airport, counting both ends of every route.
/// Duplicate routes are counted once per occurrence.
pub fn count_references(routes: &[Route]) -> FxHashMap<String, usize> {
    let mut counts: FxHashMap<String, usize> = FxHashMap::default();
    for route in routes {
        *counts.entry(route.origin.clone()).or_insert(0) += 1;
        *counts.entry(route.destination.clone()).or_insert(0) += 1;
    }
    counts
}

/// Airports sorted by reference count, most referenced first. Ties are
/// ordered by IATA code.
pub fn rank_airports(routes: &[Route]) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = count_references(routes).into_iter().collect();
    ranked.sort_by(|(a, count_a), (b, count_b)| count_b.cmp(count_a).then_with(|| a.cmp(b)));
    ranked
}

/// Assigns the bucket weight to every airport of an already ranked list
pub fn bucket_weights(ranked: &[(String, usize)]) -> FxHashMap<String, Weight> {
    let bucket_size = (ranked.len() / NUM_BUCKETS).max(1);

    ranked
        .iter()
        .enumerate()
        .map(|(i, (airport, _))| {
            let weight = (i / bucket_size + 1).min(MAX_WEIGHT as usize);
            (airport.clone(), weight as Weight)
        })
        .collect()
}

/// Weight of every airport referenced by `routes`
pub fn assign_weights(routes: &[Route]) -> FxHashMap<String, Weight> {
    bucket_weights(&rank_airports(routes))
}

/// Reads the full route set from the store and assigns weights
pub fn calculate_airport_weights<S: RouteStore + ?Sized>(
    store: &S,
) -> anyhow::Result<FxHashMap<String, Weight>> {
    let routes = store.routes()?;
    info!("Weighting airports of {} routes", routes.len());
    Ok(assign_weights(&routes))
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WeightReport {
    pub updated: usize,
    /// Weighted airports without a record in the airport store
    pub missing: usize,
    pub failed: usize,
}

/// Writes `weights` onto the airport records. Airports not contained in
/// `weights` keep whatever weight they had. A failed write is logged and the
/// remaining airports are still processed.
pub fn apply_weights<S: AirportStore + ?Sized>(
    store: &mut S,
    weights: &FxHashMap<String, Weight>,
) -> WeightReport {
    let mut report = WeightReport::default();

    let mut airports: Vec<(&String, &Weight)> = weights.iter().collect();
    airports.sort();

    for (airport, weight) in airports {
        match store.set_weight(airport, *weight) {
            Ok(true) => {
                debug!("Set weight of {} to {}", airport, weight);
                report.updated += 1;
            }
            Ok(false) => {
                warn!("Airport {} is referenced by routes but not stored", airport);
                report.missing += 1;
            }
            Err(e) => {
                error!("Error updating weight for airport {}: {:#}", airport, e);
                report.failed += 1;
            }
        }
    }

    info!(
        "Updated {} airport weights ({} missing, {} failed)",
        report.updated, report.missing, report.failed
    );
    report
}

/// Recomputes all weights from the route set and stores them
pub fn update_airport_weights<S: AirportStore + RouteStore + ?Sized>(
    store: &mut S,
) -> anyhow::Result<(FxHashMap<String, Weight>, WeightReport)> {
    let weights = calculate_airport_weights(&*store)?;
    let report = apply_weights(store, &weights);
    Ok((weights, report))
}
