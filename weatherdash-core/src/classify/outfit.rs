use serde::{Deserialize, Serialize};

use crate::{
    classify::aqi::AqiLevel,
    locale::Locale,
    model::{Condition, Units},
};

/// Temperature band, coldest first. Upper bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OutfitBand {
    Freezing,
    Cold,
    Cool,
    Mild,
    Warm,
    Hot,
}

impl OutfitBand {
    pub const ALL: [OutfitBand; 6] = [
        OutfitBand::Freezing,
        OutfitBand::Cold,
        OutfitBand::Cool,
        OutfitBand::Mild,
        OutfitBand::Warm,
        OutfitBand::Hot,
    ];

    /// Upper bounds in ℃ for every band but the last.
    pub const UPPER_BOUNDS_C: [f64; 5] = [0.0, 8.0, 16.0, 23.0, 28.0];

    /// NaN lands in `Hot`, like any value above the last bound.
    pub fn from_celsius(temp_c: f64) -> Self {
        Self::UPPER_BOUNDS_C
            .iter()
            .position(|bound| temp_c <= *bound)
            .map_or(OutfitBand::Hot, |idx| Self::ALL[idx])
    }

    fn index(&self) -> usize {
        *self as usize
    }

    pub fn icon(&self) -> &'static str {
        match self {
            OutfitBand::Freezing => "🧣🧤",
            OutfitBand::Cold => "🧥",
            OutfitBand::Cool => "🧥👕",
            OutfitBand::Mild => "👕",
            OutfitBand::Warm => "👕🧢",
            OutfitBand::Hot => "🩳☀️",
        }
    }
}

pub fn to_celsius(temperature: f64, units: Units) -> f64 {
    match units {
        Units::Metric => temperature,
        Units::Imperial => (temperature - 32.0) * 5.0 / 9.0,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitSuggestion {
    pub band: OutfitBand,
    pub message: String,
    pub icon: String,
}

/// Base message for the band, then a condition suffix, then an air-quality suffix.
pub fn suggest_outfit(
    temperature: f64,
    units: Units,
    condition: &Condition,
    aqi: Option<AqiLevel>,
    locale: Locale,
) -> OutfitSuggestion {
    let catalog = locale.catalog();
    let band = OutfitBand::from_celsius(to_celsius(temperature, units));

    let mut message = catalog.outfit[band.index()].to_string();
    let mut icon = band.icon().to_string();

    let condition_suffix = match condition {
        Condition::Rain | Condition::Drizzle => Some((catalog.wet_suffix, " ☔")),
        Condition::Snow => Some((catalog.snow_suffix, " ❄️")),
        Condition::Thunderstorm => Some((catalog.storm_suffix, " ⛈️")),
        _ => None,
    };
    if let Some((text, glyph)) = condition_suffix {
        message.push_str(text);
        icon.push_str(glyph);
    }

    match aqi {
        Some(level) if level >= AqiLevel::Poor => {
            message.push_str(catalog.mask_suffix);
            icon.push_str(" 😷");
        }
        Some(AqiLevel::Moderate) => message.push_str(catalog.air_advisory_suffix),
        _ => {}
    }

    OutfitSuggestion { band, message, icon }
}
