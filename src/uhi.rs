//! Urban heat island statistics over one snapshot of district readings.
//!
//! The "intensity" of a district is its deviation from the cross-district mean at the same instant.
//! Nothing here rounds; display precision is the renderer's business.

use crate::models::{Location, WeatherSample};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid input: {0}")]
pub struct InvalidInputError(pub &'static str);

#[derive(serde::Serialize, Debug, Clone, Copy, PartialEq)]
pub struct DistrictAnomaly {
    pub location: Location,
    pub temperature: f64,
    pub anomaly: f64,
}

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct UhiSummary {
    pub mean_temperature: f64,
    /// In input order.
    pub anomalies: Vec<DistrictAnomaly>,
    pub hottest: DistrictAnomaly,
    pub coolest: DistrictAnomaly,
}

impl UhiSummary {
    /// Fails on an empty table rather than producing a NaN mean. A NaN temperature in the input
    /// does propagate into the mean and every anomaly.
    pub fn compute(samples: &[WeatherSample]) -> Result<Self, InvalidInputError> {
        if samples.is_empty() {
            return Err(InvalidInputError("no samples to summarize"));
        }

        let mean_temperature =
            samples.iter().map(|s| s.temperature).sum::<f64>() / samples.len() as f64;

        let anomalies: Vec<DistrictAnomaly> = samples
            .iter()
            .map(|s| DistrictAnomaly {
                location: s.location,
                temperature: s.temperature,
                anomaly: s.temperature - mean_temperature,
            })
            .collect();

        // strict comparisons keep the earliest district on ties
        let mut hottest = anomalies[0];
        let mut coolest = anomalies[0];
        for a in &anomalies[1..] {
            if a.anomaly > hottest.anomaly {
                hottest = *a;
            }
            if a.anomaly < coolest.anomaly {
                coolest = *a;
            }
        }

        Ok(Self {
            mean_temperature,
            anomalies,
            hottest,
            coolest,
        })
    }

    pub fn anomaly_of(&self, name: &str) -> Option<f64> {
        self.anomalies
            .iter()
            .find(|a| a.location.name == name)
            .map(|a| a.anomaly)
    }

    pub fn max_temperature(&self) -> f64 {
        self.hottest.temperature
    }

    pub fn min_temperature(&self) -> f64 {
        self.coolest.temperature
    }
}
