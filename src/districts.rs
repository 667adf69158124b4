use log::{info, warn};
use std::time::Instant;

use crate::models::{Location, WeatherSample};
use crate::weather::{WeatherFetchError, WeatherSource};

/// One refresh cycle's worth of district readings, in fixed-list order.
#[derive(Debug, Default)]
pub struct DistrictTable {
    pub samples: Vec<WeatherSample>,
    /// Districts that could not be read this cycle.
    pub failures: Vec<(Location, WeatherFetchError)>,
}

impl DistrictTable {
    /// Visits every location in order, one request at a time. A failed district is recorded and
    /// skipped so the rest of the table still renders.
    pub async fn collect(source: &dyn WeatherSource, locations: &[Location]) -> Self {
        let started = Instant::now();
        let mut table = DistrictTable::default();
        for location in locations {
            match source.fetch(location).await {
                Ok(sample) => table.samples.push(sample),
                Err(e) => {
                    warn!("skipping {}: {}", location.name, e);
                    table.failures.push((*location, e));
                }
            }
        }
        info!(
            "collected {} of {} districts in {:?}",
            table.samples.len(),
            locations.len(),
            started.elapsed()
        );
        table
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn spatial_stats(&self) -> Option<SpatialStats> {
        SpatialStats::compute(&self.samples)
    }
}

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct SpatialStats {
    pub max_district: &'static str,
    pub max_temperature: f64,
    pub min_district: &'static str,
    pub min_temperature: f64,
    pub range: f64,
    pub average_temperature: f64,
    pub average_humidity: f64,
}

impl SpatialStats {
    pub fn compute(samples: &[WeatherSample]) -> Option<Self> {
        let first = samples.first()?;
        let (mut max, mut min) = (first, first);
        for s in &samples[1..] {
            if s.temperature > max.temperature {
                max = s;
            }
            if s.temperature < min.temperature {
                min = s;
            }
        }
        let n = samples.len() as f64;
        Some(Self {
            max_district: max.location.name,
            max_temperature: max.temperature,
            min_district: min.location.name,
            min_temperature: min.temperature,
            range: max.temperature - min.temperature,
            average_temperature: samples.iter().map(|s| s.temperature).sum::<f64>() / n,
            average_humidity: samples.iter().map(|s| s.humidity).sum::<f64>() / n,
        })
    }
}

/// Color band of a district on the heat distribution map.
#[derive(serde::Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HeatBand {
    Blue,
    Orange,
    Red,
}

impl HeatBand {
    /// Buckets `temperature` by its position within `[min, max]`. A zero-width range puts every
    /// district at the bottom.
    pub fn of(temperature: f64, min: f64, max: f64) -> Self {
        let span = max - min;
        let normalized = if span > 0.0 {
            (temperature - min) / span
        } else {
            0.0
        };
        if normalized < 0.33 {
            HeatBand::Blue
        } else if normalized < 0.66 {
            HeatBand::Orange
        } else {
            HeatBand::Red
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HeatBand::Blue => "blue",
            HeatBand::Orange => "orange",
            HeatBand::Red => "red",
        }
    }
}
