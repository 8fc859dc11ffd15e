use anyhow::Context;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Row of a `flights.csv` timetable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub origin_iata: String,
    pub flight_number: String,
    pub dest_iata: String,
    pub departure: String,
    pub arrival: String,
    pub duration: String,
}

pub struct ScheduleFeed {
    flights: Vec<ScheduleRecord>,
}

impl ScheduleFeed {
    pub fn new() -> Self {
        ScheduleFeed {
            flights: Vec::new(),
        }
    }

    pub fn add_flight(&mut self, flight: ScheduleRecord) {
        self.flights.push(flight);
    }

    pub fn get_flights(&self) -> &Vec<ScheduleRecord> {
        &self.flights
    }

    /// Reads a `flights.csv` timetable with a header row. Rows are kept in
    /// file order, repeated flight numbers included.
    pub fn from_csv(flights_csv: &Path) -> anyhow::Result<ScheduleFeed> {
        let mut feed = ScheduleFeed::new();
        let mut reader = csv::Reader::from_path(flights_csv)
            .with_context(|| format!("Could not open {}", flights_csv.display()))?;

        info!("BEGIN parsing {}", flights_csv.display());
        for result in reader.deserialize() {
            let flight: ScheduleRecord = result.context("Failed to parse schedule row")?;
            feed.add_flight(flight);
        }
        info!("FINISHED parsing. Read {} scheduled flights", feed.flights.len());

        Ok(feed)
    }
}

impl Default for ScheduleFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_schedule() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data/flights.csv");
        let feed = ScheduleFeed::from_csv(&path).unwrap();

        assert_eq!(feed.get_flights().len(), 4);

        let first = &feed.get_flights()[0];
        assert_eq!(first.flight_number, "AA100");
        assert_eq!(first.origin_iata, "JFK");
        assert_eq!(first.dest_iata, "LHR");
        assert_eq!(first.duration, "7h10m");
    }

    #[test]
    fn missing_column_is_an_error() {
        let path = std::env::temp_dir().join("feed_reader_missing_column.csv");
        std::fs::write(&path, "origin_iata,flight_number\nJFK,AA100\n").unwrap();

        assert!(ScheduleFeed::from_csv(&path).is_err());
    }
}
