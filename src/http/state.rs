//! Application state shared by all handlers.

use std::sync::Arc;

use crate::configuration::Settings;
use crate::imagery::{ImageryGatewayClient, ImageryService};
use crate::weather::{OpenWeatherClient, WeatherSource};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub weather: Arc<dyn WeatherSource>,
    pub imagery: Arc<dyn ImageryService>,
}

impl AppState {
    pub fn new(
        settings: Settings,
        weather: Arc<dyn WeatherSource>,
        imagery: Arc<dyn ImageryService>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            weather,
            imagery,
        }
    }

    /// State wired to the real OpenWeather and imagery gateway clients.
    pub fn from_settings(settings: Settings) -> Result<Self, reqwest::Error> {
        let weather = Arc::new(OpenWeatherClient::new(&settings.weather)?);
        let imagery = Arc::new(ImageryGatewayClient::new(&settings.imagery)?);
        Ok(Self::new(settings, weather, imagery))
    }
}
