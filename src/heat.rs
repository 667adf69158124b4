//! Heat alert categories for a single air temperature reading.

use std::fmt;

pub const EXTREME_HEAT_CELSIUS: f64 = 40.0;
pub const HIGH_HEAT_CELSIUS: f64 = 35.0;

/// Ordered by severity, `Normal` lowest.
#[derive(serde::Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeatCategory {
    Normal,
    HighHeat,
    ExtremeHeat,
}

impl HeatCategory {
    /// Thresholds are checked from the top down, first match wins. Anything that fails both
    /// comparisons (including NaN and implausibly cold readings) is `Normal`.
    pub fn classify(temperature: f64) -> Self {
        if temperature >= EXTREME_HEAT_CELSIUS {
            HeatCategory::ExtremeHeat
        } else if temperature >= HIGH_HEAT_CELSIUS {
            HeatCategory::HighHeat
        } else {
            HeatCategory::Normal
        }
    }

    pub fn alert_message(&self) -> &'static str {
        match self {
            HeatCategory::ExtremeHeat => {
                "Extreme Heat Alert! Stay Hydrated and Avoid Outdoor Activities."
            }
            HeatCategory::HighHeat => "High Heat Warning! Take Precautions.",
            HeatCategory::Normal => "Normal Temperature.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HeatCategory::Normal => "NORMAL",
            HeatCategory::HighHeat => "HIGH_HEAT",
            HeatCategory::ExtremeHeat => "EXTREME_HEAT",
        }
    }

    /// Map marker color: anything at or above the high-heat threshold is red.
    pub fn marker_color(&self) -> &'static str {
        match self {
            HeatCategory::Normal => "green",
            HeatCategory::HighHeat | HeatCategory::ExtremeHeat => "red",
        }
    }
}

impl fmt::Display for HeatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
