//! Current-conditions lookup against the OpenWeather API.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::configuration::WeatherSettings;
use crate::models::{Location, WeatherSample};

#[derive(Debug, thiserror::Error)]
pub enum WeatherFetchError {
    #[error("weather request for {district} failed: {source}")]
    Request {
        district: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("weather API returned {status} for {district}")]
    Status {
        district: &'static str,
        status: reqwest::StatusCode,
    },
    #[error("malformed weather response for {district}: {source}")]
    Malformed {
        district: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Anything that can produce a current reading for a district.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch(&self, location: &Location) -> Result<WeatherSample, WeatherFetchError>;
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    main: MainReadings,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

/// Extract the sample from a `/data/2.5/weather` response body.
pub fn parse_current_conditions(
    location: &Location,
    body: &str,
) -> Result<WeatherSample, WeatherFetchError> {
    let conditions: CurrentConditions =
        serde_json::from_str(body).map_err(|source| WeatherFetchError::Malformed {
            district: location.name,
            source,
        })?;
    Ok(WeatherSample {
        location: *location,
        temperature: conditions.main.temp,
        feels_like: conditions.main.feels_like,
        humidity: conditions.main.humidity,
    })
}

pub struct OpenWeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Secret<String>,
}

impl OpenWeatherClient {
    pub fn new(settings: &WeatherSettings) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        })
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    /// One GET, no retry.
    async fn fetch(&self, location: &Location) -> Result<WeatherSample, WeatherFetchError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        debug!("weather request for {} at {}", location.name, url);

        let request_error = |source| WeatherFetchError::Request {
            district: location.name,
            source,
        };
        let response = self
            .http
            .get(&url)
            .query(&[
                ("lat", location.latitude.to_string()),
                ("lon", location.longitude.to_string()),
                ("appid", self.api_key.expose_secret().clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherFetchError::Status {
                district: location.name,
                status,
            });
        }

        let body = response.text().await.map_err(request_error)?;
        parse_current_conditions(location, &body)
    }
}
