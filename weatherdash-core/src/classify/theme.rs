use serde::{Deserialize, Serialize};

use crate::model::Condition;

/// Background theme for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Default,
    ClearDay,
    Rain,
    Snow,
    Night,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::ClearDay => "clear-day",
            Theme::Rain => "rain",
            Theme::Snow => "snow",
            Theme::Night => "night",
        }
    }

    pub fn css_class(&self) -> String {
        format!("theme-{}", self.as_str())
    }
}

/// Night icons override the condition.
pub fn classify_theme(condition: &Condition, icon: &str) -> Theme {
    if icon.ends_with('n') {
        return Theme::Night;
    }

    match condition {
        Condition::Clear => Theme::ClearDay,
        Condition::Rain | Condition::Drizzle | Condition::Thunderstorm => Theme::Rain,
        Condition::Snow => Theme::Snow,
        _ => Theme::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn night_icon_overrides_condition() {
        for condition in [Condition::Clear, Condition::Rain, Condition::Snow, Condition::Unknown] {
            assert_eq!(classify_theme(&condition, "01n"), Theme::Night);
        }
    }

    #[test]
    fn day_conditions_map_to_themes() {
        assert_eq!(classify_theme(&Condition::Clear, "01d"), Theme::ClearDay);
        assert_eq!(classify_theme(&Condition::Drizzle, "09d"), Theme::Rain);
        assert_eq!(classify_theme(&Condition::Thunderstorm, "11d"), Theme::Rain);
        assert_eq!(classify_theme(&Condition::Snow, "13d"), Theme::Snow);
        assert_eq!(classify_theme(&Condition::Clouds, "04d"), Theme::Default);
        assert_eq!(classify_theme(&Condition::Other("Mist".into()), "50d"), Theme::Default);
    }

    #[test]
    fn empty_icon_is_treated_as_day() {
        assert_eq!(classify_theme(&Condition::Clear, ""), Theme::ClearDay);
    }

    #[test]
    fn css_class_is_prefixed() {
        assert_eq!(Theme::ClearDay.css_class(), "theme-clear-day");
        assert_eq!(Theme::Night.css_class(), "theme-night");
    }
}
