//! Pure mappings from a reading to display buckets.
//!
//! Every function here is total: any input yields a bucket, nothing fails.

use serde::{Deserialize, Serialize};

use crate::{
    locale::Locale,
    model::{AirReading, Units, WeatherReading},
};

pub mod aqi;
pub mod outfit;
pub mod theme;

pub use aqi::{AqiLevel, AqiSummary, classify_aqi};
pub use outfit::{OutfitBand, OutfitSuggestion, suggest_outfit, to_celsius};
pub use theme::{Theme, classify_theme};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub outfit: OutfitSuggestion,
    pub theme: Theme,
    /// Absent when no air reading was available.
    pub aqi: Option<AqiSummary>,
}

pub fn classify(
    reading: &WeatherReading,
    units: Units,
    air: Option<&AirReading>,
    locale: Locale,
) -> ClassificationResult {
    let aqi = air.map(|a| classify_aqi(a.aqi, locale));

    ClassificationResult {
        outfit: suggest_outfit(
            reading.temperature,
            units,
            &reading.condition,
            aqi.as_ref().map(|s| s.level),
            locale,
        ),
        theme: classify_theme(&reading.condition, &reading.icon),
        aqi,
    }
}
