use anyhow::Context;
use log::{debug, info};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod iata;
mod schedule;
pub use iata::IataCodes;
pub use schedule::{ScheduleFeed, ScheduleRecord};

// OpenFlights route table columns
const ROUTE_ORIGIN_COLUMN: usize = 2;
const ROUTE_DESTINATION_COLUMN: usize = 4;
const ROUTE_STOPS_COLUMN: usize = 7;

/// Airport as written to `filtered_airports.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRecord {
    pub iata_code: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: String,
    pub city: String,
}

/// Subset of the OurAirports columns (https://ourairports.com/data/)
#[derive(Debug, Deserialize)]
struct OurAirportsRow {
    #[serde(rename = "type")]
    airport_type: String,
    scheduled_service: String,
    name: String,
    latitude_deg: f64,
    longitude_deg: f64,
    iso_country: String,
    municipality: String,
    iata_code: String,
}

impl From<OurAirportsRow> for AirportRecord {
    fn from(row: OurAirportsRow) -> Self {
        AirportRecord {
            iata_code: row.iata_code,
            name: row.name,
            latitude: row.latitude_deg,
            longitude: row.longitude_deg,
            country: row.iso_country,
            city: row.municipality,
        }
    }
}

/// Rows of an OurAirports dump kept by [`AirportFeed::from_csv`]
#[derive(Debug, Clone)]
pub enum AirportFilter {
    /// Airports whose IATA code is listed
    AllowList(IataCodes),
    /// Large airports with scheduled service and an IATA code
    LargeScheduled,
}

impl AirportFilter {
    fn keeps(&self, row: &OurAirportsRow) -> bool {
        match self {
            AirportFilter::AllowList(codes) => codes.contains(&row.iata_code),
            AirportFilter::LargeScheduled => {
                !row.iata_code.is_empty()
                    && row.airport_type == "large_airport"
                    && row.scheduled_service == "yes"
            }
        }
    }
}

/// Route as written to `filtered_routes.csv`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub origin: String,
    pub destination: String,
    pub stops: String,
}

pub struct AirportFeed {
    airports: Vec<AirportRecord>,
}

impl AirportFeed {
    pub fn new() -> Self {
        AirportFeed {
            airports: Vec::new(),
        }
    }

    pub fn add_airport(&mut self, airport: AirportRecord) {
        self.airports.push(airport);
    }

    pub fn get_airports(&self) -> &Vec<AirportRecord> {
        &self.airports
    }

    /// IATA codes of the kept airports. Routes are filtered against these.
    pub fn iata_codes(&self) -> IataCodes {
        self.airports.iter().map(|a| a.iata_code.as_str()).collect()
    }

    /// Parses an OurAirports `airports.csv` dump and keeps the airports
    /// matching `filter`.
    pub fn from_csv(airports_csv: &Path, filter: &AirportFilter) -> anyhow::Result<AirportFeed> {
        let mut feed = AirportFeed::new();

        let mut reader = csv::Reader::from_path(airports_csv)
            .with_context(|| format!("Could not open {}", airports_csv.display()))?;

        let now = std::time::Instant::now();
        info!("BEGIN parsing {}", airports_csv.display());
        let mut total = 0;
        for result in reader.deserialize() {
            let row: OurAirportsRow = result.context("Failed to parse airport row")?;
            total += 1;
            if !filter.keeps(&row) {
                continue;
            }
            feed.add_airport(row.into());
        }
        info!(
            "FINISHED parsing. Kept {} of {} airports. Took {:?}",
            feed.airports.len(),
            total,
            now.elapsed()
        );

        Ok(feed)
    }

    /// Reads a file previously written by [`AirportFeed::write_csv`]
    pub fn from_filtered_csv(path: &Path) -> anyhow::Result<AirportFeed> {
        let mut feed = AirportFeed::new();
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Could not open {}", path.display()))?;
        for result in reader.deserialize() {
            let airport: AirportRecord = result.context("Failed to parse AirportRecord")?;
            feed.add_airport(airport);
        }
        Ok(feed)
    }

    pub fn write_csv(&self, path: &Path) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;

        debug!("BEGIN writing airports");
        for airport in self.airports.iter() {
            wtr.serialize(airport)?;
        }
        wtr.flush()?;
        debug!("FINISHED writing airports");

        Ok(())
    }
}

impl Default for AirportFeed {
    fn default() -> Self {
        Self::new()
    }
}

pub struct RouteFeed {
    routes: Vec<RouteRecord>,
}

impl RouteFeed {
    pub fn new() -> Self {
        RouteFeed { routes: Vec::new() }
    }

    pub fn add_route(&mut self, route: RouteRecord) {
        self.routes.push(route);
    }

    pub fn get_routes(&self) -> &Vec<RouteRecord> {
        &self.routes
    }

    /// Parses an OpenFlights `routes.dat` table. A route is kept if both ends
    /// are in `iata_codes`, usually [`AirportFeed::iata_codes`]. Only the
    /// first occurrence of each (origin, destination) pair survives.
    pub fn from_dat(routes_dat: &Path, iata_codes: &IataCodes) -> anyhow::Result<RouteFeed> {
        let mut feed = RouteFeed::new();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(routes_dat)
            .with_context(|| format!("Could not open {}", routes_dat.display()))?;

        let mut unique_pairs: FxHashSet<(String, String)> = FxHashSet::default();

        let now = std::time::Instant::now();
        info!("BEGIN parsing {}", routes_dat.display());
        let mut total = 0;
        for result in reader.records() {
            let record = result.context("Failed to parse route row")?;
            total += 1;

            let (Some(origin), Some(destination)) = (
                record.get(ROUTE_ORIGIN_COLUMN),
                record.get(ROUTE_DESTINATION_COLUMN),
            ) else {
                debug!("Skipping short route row {}", total);
                continue;
            };

            if !iata_codes.contains(origin) || !iata_codes.contains(destination) {
                continue;
            }

            // Airlines flying the same pair collapse into one route
            if !unique_pairs.insert((origin.to_string(), destination.to_string())) {
                continue;
            }

            feed.add_route(RouteRecord {
                origin: origin.to_string(),
                destination: destination.to_string(),
                stops: record.get(ROUTE_STOPS_COLUMN).unwrap_or("0").to_string(),
            });
        }
        info!(
            "FINISHED parsing. Kept {} of {} routes. Took {:?}",
            feed.routes.len(),
            total,
            now.elapsed()
        );

        Ok(feed)
    }

    /// Reads a file previously written by [`RouteFeed::write_csv`]
    pub fn from_filtered_csv(path: &Path) -> anyhow::Result<RouteFeed> {
        let mut feed = RouteFeed::new();
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Could not open {}", path.display()))?;
        for result in reader.deserialize() {
            let route: RouteRecord = result.context("Failed to parse RouteRecord")?;
            feed.add_route(route);
        }
        Ok(feed)
    }

    pub fn write_csv(&self, path: &Path) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;

        debug!("BEGIN writing routes");
        for route in self.routes.iter() {
            wtr.serialize(route)?;
        }
        wtr.flush()?;
        debug!("FINISHED writing routes");

        Ok(())
    }
}

impl Default for RouteFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_data(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data").join(name)
    }

    fn allow_list() -> AirportFilter {
        AirportFilter::AllowList(IataCodes::from_csv(&test_data("iata_codes.csv")).unwrap())
    }

    fn airports() -> AirportFeed {
        AirportFeed::from_csv(&test_data("airports.csv"), &allow_list()).unwrap()
    }

    #[test]
    fn airports_from_csv_works() {
        let feed = airports();

        assert_eq!(feed.airports.len(), 4);

        let jfk = feed
            .airports
            .iter()
            .find(|a| a.iata_code == "JFK")
            .unwrap();
        assert_eq!(jfk.latitude, 40.6413);
        assert_eq!(jfk.longitude, -73.7781);
        assert_eq!(jfk.country, "US");
        assert_eq!(jfk.city, "New York");

        // Not on the allow-list
        assert!(feed.airports.iter().all(|a| a.iata_code != "ORD"));
    }

    #[test]
    fn large_scheduled_airports() {
        let feed = AirportFeed::from_csv(&test_data("airports.csv"), &AirportFilter::LargeScheduled)
            .unwrap();

        // The heliport has neither scheduled service nor an IATA code
        assert_eq!(feed.airports.len(), 5);
        assert!(feed.airports.iter().any(|a| a.iata_code == "ORD"));
    }

    #[test]
    fn routes_from_dat_works() {
        let feed = RouteFeed::from_dat(&test_data("routes.dat"), &airports().iata_codes()).unwrap();

        // Duplicate JFK-LAX and the ORD route are dropped
        assert_eq!(feed.routes.len(), 6);
        assert_eq!(
            feed.routes
                .iter()
                .filter(|r| r.origin == "JFK" && r.destination == "LAX")
                .count(),
            1
        );
        // Reverse direction is a different pair
        assert!(feed
            .routes
            .iter()
            .any(|r| r.origin == "LAX" && r.destination == "JFK"));
        assert!(feed.routes.iter().all(|r| r.stops == "0"));
    }

    #[test]
    fn write_csv_works() {
        let dir = std::env::temp_dir().join("feed_reader_write_csv_works");
        std::fs::create_dir_all(&dir).unwrap();

        let airports = airports();
        let routes = RouteFeed::from_dat(&test_data("routes.dat"), &airports.iata_codes()).unwrap();

        airports.write_csv(&dir.join("filtered_airports.csv")).unwrap();
        routes.write_csv(&dir.join("filtered_routes.csv")).unwrap();

        let airports_back =
            AirportFeed::from_filtered_csv(&dir.join("filtered_airports.csv")).unwrap();
        let routes_back = RouteFeed::from_filtered_csv(&dir.join("filtered_routes.csv")).unwrap();

        assert_eq!(airports_back.get_airports(), airports.get_airports());
        assert_eq!(routes_back.get_routes(), routes.get_routes());
    }

    #[test]
    fn routes_to_listed_but_missing_airport_are_dropped() {
        let dir = std::env::temp_dir().join("feed_reader_routes_to_missing_airport");
        std::fs::create_dir_all(&dir).unwrap();

        std::fs::write(dir.join("iata_codes.csv"), "1,Kennedy,JFK\n2,Nowhere,XXX\n").unwrap();
        std::fs::copy(test_data("airports.csv"), dir.join("airports.csv")).unwrap();
        std::fs::write(
            dir.join("routes.dat"),
            "AA,24,JFK,3797,XXX,1,,0,738\nAA,24,JFK,3797,LAX,3484,,0,738\n",
        )
        .unwrap();

        let codes = IataCodes::from_csv(&dir.join("iata_codes.csv")).unwrap();
        let airports =
            AirportFeed::from_csv(&dir.join("airports.csv"), &AirportFilter::AllowList(codes))
                .unwrap();
        assert_eq!(airports.get_airports().len(), 1);

        // XXX is listed but has no airport row, LAX has a row but is not listed
        let routes = RouteFeed::from_dat(&dir.join("routes.dat"), &airports.iata_codes()).unwrap();
        assert!(routes.get_routes().is_empty());
    }
}
