//! Client side of the satellite imagery gateway.
//!
//! Compositing, reprojection, tiling and the regional reduction all run remotely. This module
//! only states what it wants (collection, band, window, reducer, scale) and shapes the replies:
//! a tile URL template for the map overlay and a per-image regional mean series for the chart.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::configuration::{ImagerySettings, RegionSettings};
use crate::models::{DateRange, LstPoint};

/// MODIS LST digital numbers are Kelvin scaled by 50.
pub const LST_SCALE_FACTOR: f64 = 0.02;
pub const KELVIN_OFFSET: f64 = -273.15;

pub const SERIES_SCALE_METERS: u32 = 1000;
pub const SERIES_MAX_PIXELS: f64 = 1e9;
pub const OVERLAY_SCALE_METERS: u32 = 250;
pub const OVERLAY_CRS: &str = "EPSG:4326";

pub const VIS_MIN_CELSIUS: f64 = 25.0;
pub const VIS_MAX_CELSIUS: f64 = 50.0;
pub const VIS_PALETTE: [&str; 5] = ["blue", "green", "yellow", "orange", "red"];
pub const OVERLAY_OPACITY: f64 = 0.5;

#[derive(Debug, thiserror::Error)]
pub enum ImageryError {
    #[error("imagery request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("imagery service returned {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed imagery response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("no images found between {start} and {end}")]
    EmptyComposite { start: NaiveDate, end: NaiveDate },
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub url_format: String,
    pub name: &'static str,
    pub attribution: &'static str,
    pub opacity: f64,
    pub min: f64,
    pub max: f64,
    pub palette: &'static [&'static str],
}

/// Regional mean LST per image, ascending by date.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct LstSeries {
    pub points: Vec<LstPoint>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct LstStats {
    pub average: f64,
    pub max: f64,
    pub min: f64,
    pub count: usize,
}

impl LstSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn stats(&self) -> Option<LstStats> {
        if self.points.is_empty() {
            return None;
        }
        let values = self.points.iter().map(|p| p.mean_celsius);
        let count = self.points.len();
        Some(LstStats {
            average: values.clone().sum::<f64>() / count as f64,
            max: values.clone().fold(f64::NEG_INFINITY, f64::max),
            min: values.fold(f64::INFINITY, f64::min),
            count,
        })
    }
}

#[async_trait]
pub trait ImageryService: Send + Sync {
    /// Mean composite of the LST band over `range`, in °C, smoothed and clipped to the region.
    async fn lst_composite_tiles(&self, range: &DateRange) -> Result<TileLayer, ImageryError>;

    async fn lst_time_series(&self, range: &DateRange) -> Result<LstSeries, ImageryError>;
}

#[derive(Serialize, Debug)]
struct VisParams {
    min: f64,
    max: f64,
    palette: &'static [&'static str],
}

#[derive(Serialize, Debug)]
struct TilesRequest<'a> {
    collection: &'a str,
    band: &'a str,
    start: NaiveDate,
    end: NaiveDate,
    scale_factor: f64,
    offset: f64,
    resample: &'static str,
    crs: &'static str,
    scale: u32,
    region: RegionSettings,
    visualization: VisParams,
}

#[derive(Deserialize, Debug)]
struct TilesResponse {
    band_count: u32,
    url_format: Option<String>,
}

#[derive(Serialize, Debug)]
struct TimeSeriesRequest<'a> {
    collection: &'a str,
    band: &'a str,
    start: NaiveDate,
    end: NaiveDate,
    scale_factor: f64,
    offset: f64,
    reducer: &'static str,
    region: RegionSettings,
    scale: u32,
    max_pixels: f64,
}

#[derive(Deserialize, Debug)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Option<Feature>>,
}

#[derive(Deserialize, Debug)]
struct Feature {
    properties: Option<FeatureProperties>,
}

#[derive(Deserialize, Debug)]
struct FeatureProperties {
    date: Option<NaiveDate>,
    #[serde(alias = "mean_lst")]
    mean_value: Option<f64>,
}

/// Keeps features that carry both a date and a value (cloud-covered days reduce to null),
/// then sorts by date.
pub fn parse_time_series(body: &str) -> Result<LstSeries, ImageryError> {
    let collection: FeatureCollection = serde_json::from_str(body)?;
    let mut points: Vec<LstPoint> = collection
        .features
        .into_iter()
        .flatten()
        .filter_map(|f| f.properties)
        .filter_map(|p| match (p.date, p.mean_value) {
            (Some(date), Some(mean_celsius)) => Some(LstPoint { date, mean_celsius }),
            _ => None,
        })
        .collect();
    points.sort_by_key(|p| p.date);
    Ok(LstSeries { points })
}

fn parse_tiles(body: &str, range: &DateRange) -> Result<TileLayer, ImageryError> {
    let response: TilesResponse = serde_json::from_str(body)?;
    let url_format = match response.url_format {
        Some(url) if response.band_count > 0 => url,
        _ => {
            return Err(ImageryError::EmptyComposite {
                start: range.start,
                end: range.end,
            })
        }
    };
    Ok(TileLayer {
        url_format,
        name: "MODIS LST Smooth Heat Map (°C)",
        attribution: "Google Earth Engine",
        opacity: OVERLAY_OPACITY,
        min: VIS_MIN_CELSIUS,
        max: VIS_MAX_CELSIUS,
        palette: &VIS_PALETTE,
    })
}

/// Talks JSON to the gateway in front of the imagery backend, authenticating as the
/// configured service account.
pub struct ImageryGatewayClient {
    http: reqwest::Client,
    base_url: String,
    service_account: String,
    private_key: Secret<String>,
    collection: String,
    band: String,
    region: RegionSettings,
}

impl ImageryGatewayClient {
    pub fn new(settings: &ImagerySettings) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            service_account: settings.service_account.clone(),
            private_key: settings.private_key.clone(),
            collection: settings.collection.clone(),
            band: settings.band.clone(),
            region: settings.region,
        })
    }

    async fn post<T: Serialize + Sync>(&self, path: &str, body: &T) -> Result<String, ImageryError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("imagery request {}", url);
        let response = self
            .http
            .post(&url)
            .basic_auth(&self.service_account, Some(self.private_key.expose_secret()))
            .json(body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImageryError::Status(status));
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl ImageryService for ImageryGatewayClient {
    async fn lst_composite_tiles(&self, range: &DateRange) -> Result<TileLayer, ImageryError> {
        let request = TilesRequest {
            collection: &self.collection,
            band: &self.band,
            start: range.start,
            end: range.end,
            scale_factor: LST_SCALE_FACTOR,
            offset: KELVIN_OFFSET,
            resample: "bilinear",
            crs: OVERLAY_CRS,
            scale: OVERLAY_SCALE_METERS,
            region: self.region,
            visualization: VisParams {
                min: VIS_MIN_CELSIUS,
                max: VIS_MAX_CELSIUS,
                palette: &VIS_PALETTE,
            },
        };
        let body = self.post("/v1/lst/tiles", &request).await?;
        parse_tiles(&body, range)
    }

    async fn lst_time_series(&self, range: &DateRange) -> Result<LstSeries, ImageryError> {
        let request = TimeSeriesRequest {
            collection: &self.collection,
            band: &self.band,
            start: range.start,
            end: range.end,
            scale_factor: LST_SCALE_FACTOR,
            offset: KELVIN_OFFSET,
            reducer: "mean",
            region: self.region,
            scale: SERIES_SCALE_METERS,
            max_pixels: SERIES_MAX_PIXELS,
        };
        let body = self.post("/v1/lst/timeseries", &request).await?;
        let series = parse_time_series(&body)?;
        info!(
            "LST series {}..{}: {} points",
            range.start,
            range.end,
            series.points.len()
        );
        Ok(series)
    }
}
