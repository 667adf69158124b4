use std::path::Path;

use chrono::NaiveDate;
use config::{Config, ConfigError, File};
use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::models::DateRange;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub weather: WeatherSettings,
    pub imagery: ImagerySettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    /// Page auto-refresh period.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub refresh_interval_secs: u64,
    pub map: MapSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct MapSettings {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub zoom: u8,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct WeatherSettings {
    pub base_url: String,
    pub api_key: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_secs: u64,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ImagerySettings {
    pub base_url: String,
    pub service_account: String,
    pub private_key: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_secs: u64,
    pub collection: String,
    pub band: String,
    pub region: RegionSettings,
    /// Window averaged into the map overlay.
    pub composite_start: NaiveDate,
    pub composite_end: NaiveDate,
}

/// Bounding rectangle in degrees, `[west, south, east, north]`.
#[derive(serde::Deserialize, serde::Serialize, Clone, Copy, Debug, PartialEq)]
pub struct RegionSettings {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl ImagerySettings {
    pub fn composite_range(&self) -> Result<DateRange, ConfigError> {
        DateRange::new(self.composite_start, self.composite_end)
            .map_err(|e| ConfigError::Message(format!("imagery composite window: {}", e)))
    }
}

impl Settings {
    /// Both credentials must be present and non-blank; the dashboard cannot do anything useful without them.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.weather.api_key.expose_secret().trim().is_empty() {
            return Err(ConfigError::Message("weather.api_key is empty".into()));
        }
        if self.imagery.service_account.trim().is_empty() {
            return Err(ConfigError::Message("imagery.service_account is empty".into()));
        }
        if self.imagery.private_key.expose_secret().trim().is_empty() {
            return Err(ConfigError::Message("imagery.private_key is empty".into()));
        }
        self.imagery.composite_range()?;
        Ok(())
    }
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| ConfigError::Message(format!("failed to determine the current directory: {}", e)))?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigError::Message)?;

    load_settings(&configuration_directory, environment, app_environment_overlay())
}

/// `APP_WEATHER__API_KEY` overrides `weather.api_key`, and so on.
fn app_environment_overlay() -> config::Environment {
    config::Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// `base`, then the environment's file, then `overlay` on top.
pub fn load_settings(
    configuration_directory: &Path,
    environment: Environment,
    overlay: config::Environment,
) -> Result<Settings, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(configuration_directory.join("base")).required(true))
        .add_source(File::from(configuration_directory.join(environment.as_str())).required(true))
        .add_source(overlay)
        .build()?;

    let settings: Settings = config.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}
impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}
impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
