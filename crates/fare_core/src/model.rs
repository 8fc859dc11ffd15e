use crate::constants::{IataCode, Weight, DEFAULT_WEIGHT, TIMESTAMP_FORMAT};
use feed_reader::{AirportRecord, RouteRecord, ScheduleRecord};
use serde::{Deserialize, Serialize};

/// Airport as kept in the airport store
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Airport {
    pub iata_code: IataCode,
    #[serde(default)]
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub city: String,
    /// Popularity weight, `None` until the weight assigner has run
    #[serde(default)]
    pub weight: Option<Weight>,
}

impl Airport {
    pub fn new(iata_code: &str, latitude: f64, longitude: f64) -> Self {
        Airport {
            iata_code: iata_code.to_string(),
            name: String::new(),
            latitude,
            longitude,
            country: String::new(),
            city: String::new(),
            weight: None,
        }
    }

    pub fn with_weight(mut self, weight: Weight) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn weight_or_default(&self) -> Weight {
        self.weight.unwrap_or(DEFAULT_WEIGHT)
    }
}

impl From<&AirportRecord> for Airport {
    fn from(record: &AirportRecord) -> Self {
        Airport {
            iata_code: record.iata_code.clone(),
            name: record.name.clone(),
            latitude: record.latitude,
            longitude: record.longitude,
            country: record.country.clone(),
            city: record.city.clone(),
            weight: None,
        }
    }
}

/// Directed connection between two airports
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Route {
    pub origin: IataCode,
    pub destination: IataCode,
    #[serde(default)]
    pub timestamp: String,
}

impl Route {
    pub fn new(origin: &str, destination: &str) -> Self {
        Route {
            origin: origin.to_string(),
            destination: destination.to_string(),
            timestamp: String::new(),
        }
    }

    pub fn from_record(record: &RouteRecord, timestamp: &str) -> Self {
        Route {
            origin: record.origin.clone(),
            destination: record.destination.clone(),
            timestamp: timestamp.to_string(),
        }
    }
}

/// Priced flight between two airports, one per route
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Flight {
    pub origin: IataCode,
    pub destination: IataCode,
    /// Decimal string with at most two fraction digits
    pub price: String,
    pub timestamp: String,
}

impl Flight {
    pub fn new(origin: &str, destination: &str, price: f64, timestamp: &str) -> Self {
        Flight {
            origin: origin.to_string(),
            destination: destination.to_string(),
            price: format_price(price),
            timestamp: timestamp.to_string(),
        }
    }

    pub fn price_value(&self) -> Option<f64> {
        self.price.parse().ok()
    }
}

/// Timetable entry keyed by its flight number
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScheduledFlight {
    pub flight_number: String,
    pub origin_iata: IataCode,
    pub dest_iata: IataCode,
    pub departure: String,
    pub arrival: String,
    pub duration: String,
}

impl From<&ScheduleRecord> for ScheduledFlight {
    fn from(record: &ScheduleRecord) -> Self {
        ScheduledFlight {
            flight_number: record.flight_number.clone(),
            origin_iata: record.origin_iata.clone(),
            dest_iata: record.dest_iata.clone(),
            departure: record.departure.clone(),
            arrival: record.arrival.clone(),
            duration: record.duration.clone(),
        }
    }
}

/// Shortest decimal form of `price`, whole amounts keep one fraction digit
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{:.1}", price)
    } else {
        price.to_string()
    }
}

/// Current local time formatted as stored on routes and flights
pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Macro to create an airport with a given IATA code, lat, lon and optional weight
///
/// airport!("JFK", 40.6413, -73.7781)
///
/// airport!("JFK", 40.6413, -73.7781, 1)
#[macro_export]
macro_rules! airport {
    ($iata:expr, $lat:expr, $lon:expr) => {
        $crate::model::Airport::new($iata, $lat, $lon)
    };
    ($iata:expr, $lat:expr, $lon:expr, $weight:expr) => {
        $crate::model::Airport::new($iata, $lat, $lon).with_weight($weight)
    };
}

/// Macro to create routes between IATA codes
///
/// route!("JFK" => "LAX") Returns a single route
///
/// route!("JFK", "LAX") Returns routes in both directions
#[macro_export]
macro_rules! route {
    ($origin:expr => $destination:expr) => {
        $crate::model::Route::new($origin, $destination)
    };
    ($origin:expr , $destination:expr) => {
        vec![
            $crate::model::Route::new($origin, $destination),
            $crate::model::Route::new($destination, $origin),
        ]
    };
}
