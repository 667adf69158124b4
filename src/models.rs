use chrono::{Duration, NaiveDate};

/// A monitored district. The set is fixed for the process lifetime, see [`LOCATIONS`].
#[derive(serde::Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub const fn new(name: &'static str, latitude: f64, longitude: f64) -> Self {
        Self {
            name,
            latitude,
            longitude,
        }
    }
}

pub const LOCATIONS: [Location; 5] = [
    Location::new("Delhi", 28.6139, 77.2090),
    Location::new("Gurgaon", 28.4595, 77.0266),
    Location::new("Noida", 28.5355, 77.3910),
    Location::new("Faridabad", 28.4089, 77.3178),
    Location::new("Ghaziabad", 28.6692, 77.4538),
];

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct WeatherSample {
    pub location: Location,
    /// °C
    pub temperature: f64,
    /// °C
    pub feels_like: f64,
    /// %
    pub humidity: f64,
}

/// Days between the default start date and today.
pub const DEFAULT_RANGE_DAYS: i64 = 60;

#[derive(serde::Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("start date {start} is after end date {end}")]
pub struct InvertedRangeError {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, InvertedRangeError> {
        if start > end {
            return Err(InvertedRangeError { start, end });
        }
        Ok(Self { start, end })
    }

    /// The picker default: `today` and the sixty days before it.
    pub fn ending_on(today: NaiveDate) -> Self {
        Self {
            start: today - Duration::days(DEFAULT_RANGE_DAYS),
            end: today,
        }
    }

    /// Fill in whichever bound is missing from the picker defaults.
    pub fn from_parts(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Self, InvertedRangeError> {
        let default = Self::ending_on(today);
        Self::new(start.unwrap_or(default.start), end.unwrap_or(default.end))
    }
}

/// Regional mean land surface temperature of one satellite image.
#[derive(serde::Serialize, Debug, Clone, Copy, PartialEq)]
pub struct LstPoint {
    pub date: NaiveDate,
    pub mean_celsius: f64,
}
