use anyhow::bail;
use rustc_hash::{FxHashMap, FxHashSet};

use super::{AirportStore, FlightStore, RouteStore, ScheduleStore, UpsertOutcome};
use crate::constants::Weight;
use crate::model::{Airport, Flight, Route, ScheduledFlight};

/// Store that keeps everything in memory. Routes are kept as a plain list,
/// so duplicates added through [`MemoryStore::add_route`] are preserved.
#[derive(Debug, Default)]
pub struct MemoryStore {
    airports: FxHashMap<String, Airport>,
    routes: Vec<Route>,
    flights: FxHashMap<(String, String), Flight>,
    schedule: FxHashMap<String, ScheduledFlight>,
    // Keys whose writes are rejected, see `fail_writes_for`
    failing: FxHashSet<String>,
    /// Number of write attempts on the flight store
    pub flight_writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_airport(&mut self, airport: Airport) {
        self.airports.insert(airport.iata_code.clone(), airport);
    }

    pub fn add_airports(&mut self, airports: Vec<Airport>) {
        for airport in airports {
            self.add_airport(airport);
        }
    }

    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    pub fn add_routes(&mut self, routes: Vec<Route>) {
        for route in routes {
            self.add_route(route);
        }
    }

    /// Makes every write touching `key` fail. `key` is an IATA code for
    /// airports, `ORIGIN-DESTINATION` for routes and flights and the flight
    /// number for scheduled flights.
    pub fn fail_writes_for(&mut self, key: &str) {
        self.failing.insert(key.to_string());
    }

    fn check_writable(&self, key: &str) -> anyhow::Result<()> {
        if self.failing.contains(key) {
            bail!("write rejected for {}", key);
        }
        Ok(())
    }
}

fn pair_key(origin: &str, destination: &str) -> String {
    format!("{}-{}", origin, destination)
}

impl AirportStore for MemoryStore {
    fn airport(&self, iata_code: &str) -> anyhow::Result<Option<Airport>> {
        Ok(self.airports.get(iata_code).cloned())
    }

    fn airports(&self) -> anyhow::Result<Vec<Airport>> {
        let mut airports: Vec<Airport> = self.airports.values().cloned().collect();
        airports.sort_by(|a, b| a.iata_code.cmp(&b.iata_code));
        Ok(airports)
    }

    fn upsert_airport(&mut self, airport: &Airport) -> anyhow::Result<UpsertOutcome> {
        self.check_writable(&airport.iata_code)?;

        match self.airports.get_mut(&airport.iata_code) {
            Some(existing) => {
                let mut new = airport.clone();
                if new.weight.is_none() {
                    new.weight = existing.weight;
                }
                if *existing == new {
                    return Ok(UpsertOutcome::Unchanged);
                }
                *existing = new;
                Ok(UpsertOutcome::Modified)
            }
            None => {
                self.add_airport(airport.clone());
                Ok(UpsertOutcome::Created)
            }
        }
    }

    fn set_weight(&mut self, iata_code: &str, weight: Weight) -> anyhow::Result<bool> {
        self.check_writable(iata_code)?;

        match self.airports.get_mut(iata_code) {
            Some(airport) => {
                airport.weight = Some(weight);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl RouteStore for MemoryStore {
    fn routes(&self) -> anyhow::Result<Vec<Route>> {
        Ok(self.routes.clone())
    }

    fn upsert_route(&mut self, route: &Route) -> anyhow::Result<UpsertOutcome> {
        self.check_writable(&pair_key(&route.origin, &route.destination))?;

        match self
            .routes
            .iter_mut()
            .find(|r| r.origin == route.origin && r.destination == route.destination)
        {
            Some(existing) if existing == route => Ok(UpsertOutcome::Unchanged),
            Some(existing) => {
                *existing = route.clone();
                Ok(UpsertOutcome::Modified)
            }
            None => {
                self.routes.push(route.clone());
                Ok(UpsertOutcome::Created)
            }
        }
    }
}

impl FlightStore for MemoryStore {
    fn flight(&self, origin: &str, destination: &str) -> anyhow::Result<Option<Flight>> {
        Ok(self
            .flights
            .get(&(origin.to_string(), destination.to_string()))
            .cloned())
    }

    fn flights(&self) -> anyhow::Result<Vec<Flight>> {
        let mut flights: Vec<Flight> = self.flights.values().cloned().collect();
        flights.sort_by(|a, b| (&a.origin, &a.destination).cmp(&(&b.origin, &b.destination)));
        Ok(flights)
    }

    fn upsert_flight(&mut self, flight: &Flight) -> anyhow::Result<UpsertOutcome> {
        self.flight_writes += 1;
        self.check_writable(&pair_key(&flight.origin, &flight.destination))?;

        let key = (flight.origin.clone(), flight.destination.clone());
        match self.flights.get_mut(&key) {
            Some(existing) if existing == flight => Ok(UpsertOutcome::Unchanged),
            Some(existing) => {
                *existing = flight.clone();
                Ok(UpsertOutcome::Modified)
            }
            None => {
                self.flights.insert(key, flight.clone());
                Ok(UpsertOutcome::Created)
            }
        }
    }
}

impl ScheduleStore for MemoryStore {
    fn scheduled_flight(&self, flight_number: &str) -> anyhow::Result<Option<ScheduledFlight>> {
        Ok(self.schedule.get(flight_number).cloned())
    }

    fn scheduled_flights(&self) -> anyhow::Result<Vec<ScheduledFlight>> {
        let mut flights: Vec<ScheduledFlight> = self.schedule.values().cloned().collect();
        flights.sort_by(|a, b| a.flight_number.cmp(&b.flight_number));
        Ok(flights)
    }

    fn upsert_scheduled_flight(
        &mut self,
        flight: &ScheduledFlight,
    ) -> anyhow::Result<UpsertOutcome> {
        self.check_writable(&flight.flight_number)?;

        match self.schedule.get_mut(&flight.flight_number) {
            Some(existing) if existing == flight => Ok(UpsertOutcome::Unchanged),
            Some(existing) => {
                *existing = flight.clone();
                Ok(UpsertOutcome::Modified)
            }
            None => {
                self.schedule.insert(flight.flight_number.clone(), flight.clone());
                Ok(UpsertOutcome::Created)
            }
        }
    }
}
