use std::{ffi::OsString, path::PathBuf};

use clap::{Parser, Subcommand};

use crate::pricing_params::PricingParams;

#[derive(Parser)]
#[command(version, about = "Weights airports and prices flights", long_about = None)]
struct Cli {
    /// Path to the SQLite store
    #[arg(long, env = "FARES_DB", default_value = "fares.sqlite")]
    db: PathBuf,

    /// Set the base fee of every flight
    #[arg(long, value_name = "fee")]
    base_fee: Option<f64>,

    /// Set the price per mile
    #[arg(long, value_name = "price")]
    price_per_mile: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Load filtered airports and routes into the store
    Import {
        #[arg(long, default_value = "filtered_airports.csv")]
        airports: PathBuf,
        #[arg(long, default_value = "filtered_routes.csv")]
        routes: PathBuf,
    },
    /// Load a flight timetable into the store
    ImportSchedule {
        #[arg(long, default_value = "flights.csv")]
        flights: PathBuf,
    },
    /// Recompute the popularity weight of every airport
    Weigh,
    /// Price every route
    Price,
    /// Weigh airports, then price every route
    Run,
    /// Print the stored and the computed price of one connection
    Show { origin: String, destination: String },
    /// Write all priced flights to a CSV file
    Export {
        #[arg(long, default_value = "prices.csv")]
        out: PathBuf,
    },
}

#[derive(Debug, Clone)]
pub struct Cfg {
    pub db: PathBuf,
    pub params: PricingParams,
    pub command: Command,
}

fn into_cfg(cli: Cli) -> Cfg {
    let mut params = PricingParams::default();

    if let Some(fee) = cli.base_fee {
        params = params.base_fee(fee);
    }
    if let Some(price) = cli.price_per_mile {
        params = params.price_per_mile(price);
    }

    Cfg {
        db: cli.db,
        params,
        command: cli.command,
    }
}

pub fn parse() -> Cfg {
    into_cfg(Cli::parse())
}

pub fn parse_from<I, T>(args: I) -> anyhow::Result<Cfg>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Ok(into_cfg(Cli::try_parse_from(args)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = parse_from(["fares", "--db", "test.sqlite", "run"]).unwrap();

        assert_eq!(cfg.db, PathBuf::from("test.sqlite"));
        assert_eq!(cfg.params, PricingParams::default());
        assert_eq!(cfg.command, Command::Run);
    }

    #[test]
    fn pricing_overrides() {
        let cfg = parse_from([
            "fares",
            "--base-fee",
            "40",
            "--price-per-mile",
            "0.06",
            "price",
        ])
        .unwrap();

        assert_eq!(cfg.params.base_fee, 40.0);
        assert_eq!(cfg.params.price_per_mile, 0.06);
        assert_eq!(cfg.params.weight_step, 2.0);
    }

    #[test]
    fn import_paths() {
        let cfg = parse_from(["fares", "import", "--routes", "r.csv"]).unwrap();

        assert_eq!(
            cfg.command,
            Command::Import {
                airports: PathBuf::from("filtered_airports.csv"),
                routes: PathBuf::from("r.csv"),
            }
        );
    }

    #[test]
    fn import_schedule_path() {
        let cfg = parse_from(["fares", "import-schedule", "--flights", "timetable.csv"]).unwrap();

        assert_eq!(
            cfg.command,
            Command::ImportSchedule {
                flights: PathBuf::from("timetable.csv"),
            }
        );
    }

    #[test]
    fn show_needs_both_airports() {
        assert!(parse_from(["fares", "show", "JFK"]).is_err());

        let cfg = parse_from(["fares", "show", "JFK", "LAX"]).unwrap();
        assert_eq!(
            cfg.command,
            Command::Show {
                origin: "JFK".to_string(),
                destination: "LAX".to_string()
            }
        );
    }

    #[test]
    fn missing_command() {
        assert!(parse_from(["fares"]).is_err());
    }
}
