//! One refresh cycle of the dashboard.
//!
//! Sections run one after another and each owns its failure: a broken imagery call leaves an
//! inline message in its own section and the weather sections still render, and vice versa.

use std::time::Instant;

use chrono::{DateTime, NaiveDate, Utc};
use log::{error, info, warn};

use crate::districts::{DistrictTable, SpatialStats};
use crate::imagery::{ImageryService, LstSeries, TileLayer};
use crate::models::{DateRange, LOCATIONS};
use crate::uhi::UhiSummary;
use crate::weather::WeatherSource;

/// A section's content, or the message shown in its place.
pub type Section<T> = Result<T, String>;

/// Everything one render needs. Built fresh per cycle and dropped afterwards.
#[derive(Debug)]
pub struct Dashboard {
    pub generated_at: DateTime<Utc>,
    /// Picker values as submitted, even when they form an invalid range.
    pub picker_start: NaiveDate,
    pub picker_end: NaiveDate,
    pub overlay: Section<TileLayer>,
    pub districts: DistrictTable,
    pub series: Section<LstSeries>,
    pub uhi: Section<UhiSummary>,
    pub spatial: Option<SpatialStats>,
}

pub struct RefreshCycle<'a> {
    pub weather: &'a dyn WeatherSource,
    pub imagery: &'a dyn ImageryService,
    /// Window of the map overlay composite.
    pub composite: DateRange,
}

impl RefreshCycle<'_> {
    pub async fn run(&self, picker_start: NaiveDate, picker_end: NaiveDate) -> Dashboard {
        let started = Instant::now();
        info!("refresh cycle for {}..{}", picker_start, picker_end);

        let overlay = self
            .imagery
            .lst_composite_tiles(&self.composite)
            .await
            .map_err(|e| {
                error!("LST overlay: {}", e);
                e.to_string()
            });

        let districts = DistrictTable::collect(self.weather, &LOCATIONS).await;

        let series = match DateRange::new(picker_start, picker_end) {
            Ok(range) => self.imagery.lst_time_series(&range).await.map_err(|e| {
                error!("LST time series: {}", e);
                format!("Error fetching time series data: {}", e)
            }),
            Err(e) => {
                warn!("rejected date range: {}", e);
                Err(format!("Error fetching time series data: {}", e))
            }
        };

        let uhi = UhiSummary::compute(&districts.samples).map_err(|e| {
            error!("UHI analysis: {}", e);
            format!("Error in spatial distribution analysis: {}", e)
        });
        let spatial = districts.spatial_stats();

        info!("refresh cycle done in {:?}", started.elapsed());
        Dashboard {
            generated_at: Utc::now(),
            picker_start,
            picker_end,
            overlay,
            districts,
            series,
            uhi,
            spatial,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imagery::ImageryError;
    use crate::models::{Location, LstPoint, WeatherSample};
    use crate::weather::WeatherFetchError;
    use async_trait::async_trait;

    struct Unreachable;

    #[async_trait]
    impl WeatherSource for Unreachable {
        async fn fetch(&self, location: &Location) -> Result<WeatherSample, WeatherFetchError> {
            Err(WeatherFetchError::Status {
                district: location.name,
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            })
        }
    }

    struct Constant(f64);

    #[async_trait]
    impl WeatherSource for Constant {
        async fn fetch(&self, location: &Location) -> Result<WeatherSample, WeatherFetchError> {
            Ok(WeatherSample {
                location: *location,
                temperature: self.0,
                feels_like: self.0,
                humidity: 30.0,
            })
        }
    }

    struct OneDay;

    #[async_trait]
    impl ImageryService for OneDay {
        async fn lst_composite_tiles(&self, range: &DateRange) -> Result<TileLayer, ImageryError> {
            Err(ImageryError::EmptyComposite {
                start: range.start,
                end: range.end,
            })
        }

        async fn lst_time_series(&self, range: &DateRange) -> Result<LstSeries, ImageryError> {
            Ok(LstSeries {
                points: vec![LstPoint {
                    date: range.start,
                    mean_celsius: 30.0,
                }],
            })
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    fn cycle<'a>(weather: &'a dyn WeatherSource) -> RefreshCycle<'a> {
        RefreshCycle {
            weather,
            imagery: &OneDay,
            composite: DateRange::new(date(1), date(30)).unwrap(),
        }
    }

    #[tokio::test]
    async fn sections_fail_independently() {
        let dashboard = cycle(&Constant(36.0)).run(date(1), date(20)).await;

        assert!(dashboard.overlay.unwrap_err().contains("no images found"));
        assert_eq!(dashboard.series.unwrap().points.len(), 1);
        assert_eq!(dashboard.districts.samples.len(), LOCATIONS.len());
        assert_eq!(dashboard.uhi.unwrap().mean_temperature, 36.0);
    }

    #[tokio::test]
    async fn no_weather_means_no_uhi() {
        let dashboard = cycle(&Unreachable).run(date(1), date(20)).await;

        assert_eq!(dashboard.districts.failures.len(), LOCATIONS.len());
        assert!(dashboard.uhi.is_err());
        assert!(dashboard.spatial.is_none());
        assert!(dashboard.series.is_ok());
    }

    #[tokio::test]
    async fn inverted_picker_only_breaks_series() {
        let dashboard = cycle(&Constant(30.0)).run(date(20), date(1)).await;

        assert!(dashboard.series.unwrap_err().contains("is after end date"));
        assert!(dashboard.uhi.is_ok());
        assert_eq!(dashboard.picker_start, date(20));
    }
}
