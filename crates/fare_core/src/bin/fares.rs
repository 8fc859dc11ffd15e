use anyhow::Context;
use fare_core::{
    ingest::{
        export_flights_csv, import_airports, import_routes, import_schedule, load_filtered_csv,
    },
    model::timestamp_now,
    prelude::*,
    statistics::weight_distribution,
    util::cli::{self, Cfg, Command},
};
use feed_reader::ScheduleFeed;
use log::info;

fn weigh(store: &mut SqliteStore) -> anyhow::Result<()> {
    let (weights, report) = update_airport_weights(store)?;

    println!(
        "Weighted {} airports: {} updated, {} missing, {} failed",
        weights.len(),
        report.updated,
        report.missing,
        report.failed
    );
    for (i, count) in weight_distribution(&weights).iter().enumerate() {
        println!("[{:>2}]: {}", i + 1, count);
    }
    Ok(())
}

fn price(store: &mut SqliteStore, cfg: &Cfg) -> anyhow::Result<()> {
    let stats = update_or_create_flights(store, &cfg.params)?;
    println!("{}", stats);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cfg = cli::parse();
    info!("Using store {}", cfg.db.display());
    let mut store = SqliteStore::open(&cfg.db)?;

    match &cfg.command {
        Command::Import { airports, routes } => {
            let (airports, routes) = load_filtered_csv(airports, routes)?;
            let airport_stats = import_airports(&mut store, &airports);
            let route_stats = import_routes(&mut store, &routes, &timestamp_now());
            println!("Airports: {}", airport_stats);
            println!("Routes: {}", route_stats);
        }
        Command::ImportSchedule { flights } => {
            let feed = ScheduleFeed::from_csv(flights)?;
            let stats = import_schedule(&mut store, &feed);
            println!("Scheduled flights: {}", stats);
        }
        Command::Weigh => weigh(&mut store)?,
        Command::Price => price(&mut store, &cfg)?,
        Command::Run => {
            weigh(&mut store)?;
            price(&mut store, &cfg)?;
        }
        Command::Show {
            origin,
            destination,
        } => {
            let computed = calculate_price(&store, origin, destination, &cfg.params)?;
            let stored = store.flight(origin, destination)?;

            match computed {
                Some(price) => println!("{} -> {}: ${}", origin, destination, price),
                None => println!("{} -> {}: airport not found", origin, destination),
            }
            if let Some(flight) = stored {
                println!("Stored: ${} at {}", flight.price, flight.timestamp);
            }
        }
        Command::Export { out } => {
            let n = export_flights_csv(&store, out)
                .with_context(|| format!("Could not export flights to {}", out.display()))?;
            println!("Wrote {} flights to {}", n, out.display());
        }
    }

    Ok(())
}
