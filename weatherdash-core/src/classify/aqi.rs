use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// Provider air-quality index bucket, 1 (best) to 5 (worst).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AqiLevel {
    VeryGood = 1,
    Good = 2,
    Moderate = 3,
    Poor = 4,
    VeryPoor = 5,
}

impl AqiLevel {
    /// Anything outside 1..=5, including a missing index, lands in the worst bucket.
    pub fn from_index(aqi: Option<i64>) -> Self {
        match aqi {
            Some(1) => AqiLevel::VeryGood,
            Some(2) => AqiLevel::Good,
            Some(3) => AqiLevel::Moderate,
            Some(4) => AqiLevel::Poor,
            _ => AqiLevel::VeryPoor,
        }
    }

    pub fn index(&self) -> u8 {
        *self as u8
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            AqiLevel::VeryGood => "aqi-level-1",
            AqiLevel::Good => "aqi-level-2",
            AqiLevel::Moderate => "aqi-level-3",
            AqiLevel::Poor => "aqi-level-4",
            AqiLevel::VeryPoor => "aqi-level-5",
        }
    }

    pub fn summary(&self, locale: Locale) -> AqiSummary {
        let (label, description) = locale.catalog().aqi[usize::from(self.index()) - 1];

        AqiSummary {
            level: *self,
            label: label.to_string(),
            description: description.to_string(),
            css_class: self.css_class().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AqiSummary {
    pub level: AqiLevel,
    pub label: String,
    pub description: String,
    pub css_class: String,
}

pub fn classify_aqi(aqi: Option<i64>, locale: Locale) -> AqiSummary {
    AqiLevel::from_index(aqi).summary(locale)
}
