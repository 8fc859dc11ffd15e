//! Shell to inspect the airports, weights and prices of a store
use std::path::{Path, PathBuf};

use fare_core::{prelude::*, weights::rank_airports};
use reedline_repl_rs::clap::{value_parser, Arg, ArgMatches, Command};
use reedline_repl_rs::{Repl, Result};

/// Print store info
fn info(_args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    let counts = context.store.airports().and_then(|airports| {
        let routes = context.store.routes()?;
        let flights = context.store.flights()?;
        Ok((airports.len(), routes.len(), flights.len()))
    });

    match counts {
        Ok((airports, routes, flights)) => Ok(Some(format!(
            "Store has {} airports, {} routes and {} flights",
            airports, routes, flights
        ))),
        Err(e) => Ok(Some(format!("Error: {:#}", e))),
    }
}

fn show_airport(args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    let iata = args.get_one::<String>("iata").unwrap().to_uppercase();

    match context.store.airport(&iata) {
        Ok(Some(airport)) => Ok(Some(format!(
            "{} {} ({}, {})\nPosition: {}, {}\nWeight: {}",
            airport.iata_code,
            airport.name,
            airport.city,
            airport.country,
            airport.latitude,
            airport.longitude,
            airport
                .weight
                .map(|w| w.to_string())
                .unwrap_or_else(|| "-".to_string())
        ))),
        Ok(None) => Ok(Some(format!("Airport {} not found", iata))),
        Err(e) => Ok(Some(format!("Error: {:#}", e))),
    }
}

fn show_price(args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    let src = args.get_one::<String>("src").unwrap().to_uppercase();
    let dst = args.get_one::<String>("dst").unwrap().to_uppercase();

    match calculate_price(&context.store, &src, &dst, &context.params) {
        Ok(Some(price)) => Ok(Some(format!("{} -> {}: ${}", src, dst, price))),
        Ok(None) => Ok(Some("Airport not found".to_string())),
        Err(e) => Ok(Some(format!("Error: {:#}", e))),
    }
}

fn top_airports(args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    let n = *args.get_one::<usize>("n").unwrap_or(&10);

    let routes = match context.store.routes() {
        Ok(routes) => routes,
        Err(e) => return Ok(Some(format!("Error: {:#}", e))),
    };

    let weights = assign_weights(&routes);
    let mut res = String::new();
    for (iata, count) in rank_airports(&routes).iter().take(n) {
        res.push_str(&format!(
            "{}: {} routes, weight {}\n",
            iata, count, weights[iata]
        ));
    }

    Ok(Some(res))
}

struct Context {
    store: SqliteStore,
    params: PricingParams,
}

impl Context {
    fn new(store: SqliteStore) -> Self {
        Self {
            store,
            params: PricingParams::default(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Init store
    let path_to_db = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "fares.sqlite".to_string());
    let store = SqliteStore::open(Path::new(&path_to_db))?;
    let context = Context::new(store);

    let mut repl = Repl::new(context)
        .with_name("Fares")
        .with_version("v0.1.0")
        .with_description("Simple REPL to inspect airport weights and flight prices")
        .with_banner("Welcome to Fares")
        .with_history(PathBuf::from("history"), 100)
        .with_command(Command::new("info").about("Print store info"), info)
        .with_command(
            Command::new("airport")
                .arg(
                    Arg::new("iata")
                        .required(true)
                        .help("IATA code of the airport"),
                )
                .about("Show a stored airport"),
            show_airport,
        )
        .with_command(
            Command::new("price")
                .arg(
                    Arg::new("src")
                        .required(true)
                        .help("IATA code of the origin"),
                )
                .arg(
                    Arg::new("dst")
                        .required(true)
                        .help("IATA code of the destination"),
                )
                .about("Calculate the price of a flight without storing it"),
            show_price,
        )
        .with_command(
            Command::new("top")
                .arg(
                    Arg::new("n")
                        .value_parser(value_parser!(usize))
                        .required(false)
                        .help("Number of airports to list"),
                )
                .about("List the `n` most referenced airports"),
            top_airports,
        );

    repl.run().map_err(|e| anyhow::anyhow!("{:?}", e))
}
