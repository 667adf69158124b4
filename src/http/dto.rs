//! Request and response shapes of the JSON API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::districts::{DistrictTable, SpatialStats};
use crate::heat::HeatCategory;
use crate::imagery::{LstSeries, LstStats};
use crate::models::{DateRange, LstPoint, WeatherSample};
use crate::uhi::UhiSummary;

use super::error::AppError;

/// Date picker values. Empty strings count as absent, which is what an untouched HTML date
/// input submits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RangeQuery {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

impl RangeQuery {
    /// Picker bounds with defaults filled in. The pair is not checked for order.
    pub fn bounds(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), AppError> {
        let default = DateRange::ending_on(today);
        let start = parse_date("start", self.start.as_deref())?.unwrap_or(default.start);
        let end = parse_date("end", self.end.as_deref())?.unwrap_or(default.end);
        Ok((start, end))
    }

    pub fn range(&self, today: NaiveDate) -> Result<DateRange, AppError> {
        let (start, end) = self.bounds(today)?;
        Ok(DateRange::new(start, end)?)
    }
}

fn parse_date(name: &str, value: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| AppError::BadRequest(format!("invalid {} date `{}`: {}", name, s, e))),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DistrictReading {
    pub district: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub category: HeatCategory,
    pub alert: &'static str,
}

impl From<&WeatherSample> for DistrictReading {
    fn from(s: &WeatherSample) -> Self {
        let category = HeatCategory::classify(s.temperature);
        Self {
            district: s.location.name,
            latitude: s.location.latitude,
            longitude: s.location.longitude,
            temperature: s.temperature,
            feels_like: s.feels_like,
            humidity: s.humidity,
            category,
            alert: category.alert_message(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DistrictFailure {
    pub district: &'static str,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DistrictsResponse {
    pub readings: Vec<DistrictReading>,
    pub failures: Vec<DistrictFailure>,
}

impl From<&DistrictTable> for DistrictsResponse {
    fn from(table: &DistrictTable) -> Self {
        Self {
            readings: table.samples.iter().map(Into::into).collect(),
            failures: failures(table),
        }
    }
}

fn failures(table: &DistrictTable) -> Vec<DistrictFailure> {
    table
        .failures
        .iter()
        .map(|(location, e)| DistrictFailure {
            district: location.name,
            error: e.to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct UhiResponse {
    pub summary: UhiSummary,
    pub spatial: Option<SpatialStats>,
    pub failures: Vec<DistrictFailure>,
}

impl UhiResponse {
    pub fn new(summary: UhiSummary, table: &DistrictTable) -> Self {
        Self {
            summary,
            spatial: table.spatial_stats(),
            failures: failures(table),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeSeriesResponse {
    pub range: DateRange,
    pub points: Vec<LstPoint>,
    pub stats: Option<LstStats>,
}

impl TimeSeriesResponse {
    pub fn new(range: DateRange, series: LstSeries) -> Self {
        let stats = series.stats();
        Self {
            range,
            points: series.points,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    #[test]
    fn empty_inputs_take_defaults() {
        let q = RangeQuery {
            start: Some(String::new()),
            end: None,
        };
        let range = q.range(today()).unwrap();
        assert_eq!(range, DateRange::ending_on(today()));
    }

    #[test]
    fn bad_dates_are_rejected() {
        let q = RangeQuery {
            start: Some("01/02/2026".into()),
            end: None,
        };
        assert!(matches!(q.range(today()), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn inverted_range_is_bad_request_but_bounds_survive() {
        let q = RangeQuery {
            start: Some("2026-02-10".into()),
            end: Some("2026-02-01".into()),
        };
        assert!(matches!(q.range(today()), Err(AppError::BadRequest(_))));
        assert!(q.bounds(today()).is_ok());
    }
}
