use std::path::Path;

use anyhow::Context;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{AirportStore, FlightStore, RouteStore, ScheduleStore, UpsertOutcome};
use crate::constants::Weight;
use crate::model::{Airport, Flight, Route, ScheduledFlight};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS airports (
    iata_code TEXT PRIMARY KEY,
    name      TEXT NOT NULL DEFAULT '',
    latitude  REAL NOT NULL,
    longitude REAL NOT NULL,
    country   TEXT NOT NULL DEFAULT '',
    city      TEXT NOT NULL DEFAULT '',
    weight    INTEGER
);
CREATE TABLE IF NOT EXISTS routes (
    origin      TEXT NOT NULL,
    destination TEXT NOT NULL,
    timestamp   TEXT NOT NULL DEFAULT '',
    PRIMARY KEY (origin, destination)
);
CREATE TABLE IF NOT EXISTS flights (
    origin      TEXT NOT NULL,
    destination TEXT NOT NULL,
    price       TEXT NOT NULL,
    timestamp   TEXT NOT NULL,
    PRIMARY KEY (origin, destination)
);
CREATE TABLE IF NOT EXISTS schedule (
    flight_number TEXT PRIMARY KEY,
    origin_iata   TEXT NOT NULL,
    dest_iata     TEXT NOT NULL,
    departure     TEXT NOT NULL,
    arrival       TEXT NOT NULL,
    duration      TEXT NOT NULL
);
";

const AIRPORT_COLUMNS: &str = "iata_code, name, latitude, longitude, country, city, weight";
const ROUTE_COLUMNS: &str = "origin, destination, timestamp";
const FLIGHT_COLUMNS: &str = "origin, destination, price, timestamp";
const SCHEDULE_COLUMNS: &str =
    "flight_number, origin_iata, dest_iata, departure, arrival, duration";

/// Persistent store backed by a single SQLite file
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        debug!("Opening store {}", path.display());
        let conn = Connection::open(path)
            .with_context(|| format!("Could not open store {}", path.display()))?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> anyhow::Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> anyhow::Result<Self> {
        conn.execute_batch(SCHEMA)
            .context("Could not create store tables")?;
        Ok(SqliteStore { conn })
    }
}

fn airport_from_row(row: &Row<'_>) -> rusqlite::Result<Airport> {
    Ok(Airport {
        iata_code: row.get(0)?,
        name: row.get(1)?,
        latitude: row.get(2)?,
        longitude: row.get(3)?,
        country: row.get(4)?,
        city: row.get(5)?,
        weight: row.get(6)?,
    })
}

fn route_from_row(row: &Row<'_>) -> rusqlite::Result<Route> {
    Ok(Route {
        origin: row.get(0)?,
        destination: row.get(1)?,
        timestamp: row.get(2)?,
    })
}

fn flight_from_row(row: &Row<'_>) -> rusqlite::Result<Flight> {
    Ok(Flight {
        origin: row.get(0)?,
        destination: row.get(1)?,
        price: row.get(2)?,
        timestamp: row.get(3)?,
    })
}

fn scheduled_flight_from_row(row: &Row<'_>) -> rusqlite::Result<ScheduledFlight> {
    Ok(ScheduledFlight {
        flight_number: row.get(0)?,
        origin_iata: row.get(1)?,
        dest_iata: row.get(2)?,
        departure: row.get(3)?,
        arrival: row.get(4)?,
        duration: row.get(5)?,
    })
}

impl AirportStore for SqliteStore {
    fn airport(&self, iata_code: &str) -> anyhow::Result<Option<Airport>> {
        let airport = self
            .conn
            .query_row(
                &format!("SELECT {AIRPORT_COLUMNS} FROM airports WHERE iata_code = ?1"),
                params![iata_code],
                airport_from_row,
            )
            .optional()?;
        Ok(airport)
    }

    fn airports(&self) -> anyhow::Result<Vec<Airport>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {AIRPORT_COLUMNS} FROM airports ORDER BY iata_code"))?;
        let airports = stmt
            .query_map([], airport_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(airports)
    }

    fn upsert_airport(&mut self, airport: &Airport) -> anyhow::Result<UpsertOutcome> {
        let Some(existing) = self.airport(&airport.iata_code)? else {
            self.conn.execute(
                &format!(
                    "INSERT INTO airports ({AIRPORT_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
                ),
                params![
                    airport.iata_code,
                    airport.name,
                    airport.latitude,
                    airport.longitude,
                    airport.country,
                    airport.city,
                    airport.weight
                ],
            )?;
            return Ok(UpsertOutcome::Created);
        };

        let mut new = airport.clone();
        if new.weight.is_none() {
            new.weight = existing.weight;
        }
        if existing == new {
            return Ok(UpsertOutcome::Unchanged);
        }

        self.conn.execute(
            "UPDATE airports
             SET name = ?2, latitude = ?3, longitude = ?4, country = ?5, city = ?6, weight = ?7
             WHERE iata_code = ?1",
            params![
                new.iata_code,
                new.name,
                new.latitude,
                new.longitude,
                new.country,
                new.city,
                new.weight
            ],
        )?;
        Ok(UpsertOutcome::Modified)
    }

    fn set_weight(&mut self, iata_code: &str, weight: Weight) -> anyhow::Result<bool> {
        let updated = self.conn.execute(
            "UPDATE airports SET weight = ?2 WHERE iata_code = ?1",
            params![iata_code, weight],
        )?;
        Ok(updated > 0)
    }
}

impl RouteStore for SqliteStore {
    fn routes(&self) -> anyhow::Result<Vec<Route>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ROUTE_COLUMNS} FROM routes ORDER BY origin, destination"
        ))?;
        let routes = stmt
            .query_map([], route_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(routes)
    }

    fn upsert_route(&mut self, route: &Route) -> anyhow::Result<UpsertOutcome> {
        let existing = self
            .conn
            .query_row(
                &format!(
                    "SELECT {ROUTE_COLUMNS} FROM routes WHERE origin = ?1 AND destination = ?2"
                ),
                params![route.origin, route.destination],
                route_from_row,
            )
            .optional()?;

        match existing {
            Some(existing) if existing == *route => Ok(UpsertOutcome::Unchanged),
            Some(_) => {
                self.conn.execute(
                    "UPDATE routes SET timestamp = ?3 WHERE origin = ?1 AND destination = ?2",
                    params![route.origin, route.destination, route.timestamp],
                )?;
                Ok(UpsertOutcome::Modified)
            }
            None => {
                self.conn.execute(
                    "INSERT INTO routes (origin, destination, timestamp) VALUES (?1, ?2, ?3)",
                    params![route.origin, route.destination, route.timestamp],
                )?;
                Ok(UpsertOutcome::Created)
            }
        }
    }
}

impl FlightStore for SqliteStore {
    fn flight(&self, origin: &str, destination: &str) -> anyhow::Result<Option<Flight>> {
        let flight = self
            .conn
            .query_row(
                &format!(
                    "SELECT {FLIGHT_COLUMNS} FROM flights WHERE origin = ?1 AND destination = ?2"
                ),
                params![origin, destination],
                flight_from_row,
            )
            .optional()?;
        Ok(flight)
    }

    fn flights(&self) -> anyhow::Result<Vec<Flight>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {FLIGHT_COLUMNS} FROM flights ORDER BY origin, destination"
        ))?;
        let flights = stmt
            .query_map([], flight_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(flights)
    }

    fn upsert_flight(&mut self, flight: &Flight) -> anyhow::Result<UpsertOutcome> {
        match self.flight(&flight.origin, &flight.destination)? {
            Some(existing) if existing == *flight => Ok(UpsertOutcome::Unchanged),
            Some(_) => {
                self.conn.execute(
                    "UPDATE flights SET price = ?3, timestamp = ?4
                     WHERE origin = ?1 AND destination = ?2",
                    params![flight.origin, flight.destination, flight.price, flight.timestamp],
                )?;
                Ok(UpsertOutcome::Modified)
            }
            None => {
                self.conn.execute(
                    &format!("INSERT INTO flights ({FLIGHT_COLUMNS}) VALUES (?1, ?2, ?3, ?4)"),
                    params![flight.origin, flight.destination, flight.price, flight.timestamp],
                )?;
                Ok(UpsertOutcome::Created)
            }
        }
    }
}

impl ScheduleStore for SqliteStore {
    fn scheduled_flight(&self, flight_number: &str) -> anyhow::Result<Option<ScheduledFlight>> {
        let flight = self
            .conn
            .query_row(
                &format!("SELECT {SCHEDULE_COLUMNS} FROM schedule WHERE flight_number = ?1"),
                params![flight_number],
                scheduled_flight_from_row,
            )
            .optional()?;
        Ok(flight)
    }

    fn scheduled_flights(&self) -> anyhow::Result<Vec<ScheduledFlight>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SCHEDULE_COLUMNS} FROM schedule ORDER BY flight_number"
        ))?;
        let flights = stmt
            .query_map([], scheduled_flight_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(flights)
    }

    fn upsert_scheduled_flight(
        &mut self,
        flight: &ScheduledFlight,
    ) -> anyhow::Result<UpsertOutcome> {
        let outcome = match self.scheduled_flight(&flight.flight_number)? {
            Some(existing) if existing == *flight => return Ok(UpsertOutcome::Unchanged),
            Some(_) => UpsertOutcome::Modified,
            None => UpsertOutcome::Created,
        };

        self.conn.execute(
            &format!(
                "INSERT OR REPLACE INTO schedule ({SCHEDULE_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
            ),
            params![
                flight.flight_number,
                flight.origin_iata,
                flight.dest_iata,
                flight.departure,
                flight.arrival,
                flight.duration
            ],
        )?;
        Ok(outcome)
    }
}
