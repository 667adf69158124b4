//! Delhi-NCR urban heat monitor.
//!
//! Live air temperature for five districts (OpenWeather) next to satellite land surface
//! temperature (MODIS LST, via an imagery gateway), served as a single auto-refreshing page.

pub mod configuration;
pub mod dashboard;
pub mod districts;
pub mod heat;
pub mod http;
pub mod imagery;
pub mod models;
pub mod render;
pub mod uhi;
pub mod weather;
