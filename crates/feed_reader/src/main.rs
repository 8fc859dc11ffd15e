use std::path::{Path, PathBuf};

use anyhow::Context;
use feed_reader::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let now = std::time::Instant::now();
    // airports.csv, an IATA code list or --large-scheduled, routes.dat and an
    // optional output directory
    let mut args = std::env::args().skip(1);
    let airports_csv = args.next().context("No path to airports.csv given")?;
    let filter_arg = args.next().context("No path to IATA code list or --large-scheduled given")?;
    let routes_dat = args.next().context("No path to routes.dat given")?;
    let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    let filter = match filter_arg.as_str() {
        "--large-scheduled" => AirportFilter::LargeScheduled,
        path => AirportFilter::AllowList(IataCodes::from_csv(Path::new(path))?),
    };
    let airports = AirportFeed::from_csv(Path::new(&airports_csv), &filter)?;
    let routes = RouteFeed::from_dat(Path::new(&routes_dat), &airports.iata_codes())?;

    airports.write_csv(&out_dir.join("filtered_airports.csv"))?;
    routes.write_csv(&out_dir.join("filtered_routes.csv"))?;

    let elapsed = now.elapsed();

    println!(
        "Finished reading feeds in {}.{:03} seconds",
        elapsed.as_secs(),
        elapsed.subsec_millis()
    );
    println!(
        "Kept {} airports and {} routes",
        airports.get_airports().len(),
        routes.get_routes().len()
    );
    Ok(())
}
