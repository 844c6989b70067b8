//! Summaries derived from the 5-day / 3-hour forecast.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::model::{Forecast, ForecastEntry};

/// Entries kept for the hourly chart; eight 3-hour steps cover a day.
pub const HOURLY_POINTS: usize = 8;
pub const OUTLOOK_DAYS: usize = 3;

const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyOutlook {
    /// Calendar date as written by the provider, `YYYY-MM-DD`.
    pub date: String,
    pub entry: ForecastEntry,
}

impl DailyOutlook {
    /// `M/D` label.
    pub fn day_label(&self) -> String {
        chrono::NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map(|d| d.format("%-m/%-d").to_string())
            .unwrap_or_else(|_| self.date.clone())
    }
}

/// One entry per date, preferring the noon slot, first `days` dates in order.
pub fn daily_outlook(forecast: &Forecast, days: usize) -> Vec<DailyOutlook> {
    let mut outlook: Vec<DailyOutlook> = Vec::new();

    for entry in &forecast.entries {
        let Some((date, time)) = entry.dt_txt.split_once(' ') else {
            continue;
        };

        match outlook.iter_mut().find(|d| d.date == date) {
            Some(existing) if time == "12:00:00" => existing.entry = entry.clone(),
            Some(_) => {}
            None => outlook.push(DailyOutlook { date: date.to_string(), entry: entry.clone() }),
        }
    }

    outlook.truncate(days);
    outlook
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPoint {
    pub hour: u32,
    pub temperature: f64,
}

/// Temperatures for the next `points` forecast slots, labelled by hour of day.
pub fn hourly_temperatures(forecast: &Forecast, points: usize) -> Vec<HourlyPoint> {
    forecast
        .entries
        .iter()
        .take(points)
        .map(|e| HourlyPoint {
            hour: NaiveDateTime::parse_from_str(&e.dt_txt, DT_TXT_FORMAT)
                .map(|dt| dt.hour())
                .unwrap_or_else(|_| e.at.hour()),
            temperature: e.reading.temperature,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn forecast(slots: &[(&str, f64)]) -> Forecast {
        let list: Vec<_> = slots
            .iter()
            .enumerate()
            .map(|(i, (dt_txt, temp))| {
                json!({
                    "dt": 1_700_000_000 + (i as i64) * 10_800,
                    "dt_txt": dt_txt,
                    "main": { "temp": temp, "humidity": 50 },
                    "weather": [{ "main": "Clouds", "description": "구름", "icon": "04d" }],
                    "wind": { "speed": 1.0 }
                })
            })
            .collect();

        Forecast::from_body(json!({ "list": list })).expect("forecast parses")
    }

    #[test]
    fn outlook_prefers_noon_slot() {
        let f = forecast(&[
            ("2024-05-01 09:00:00", 15.0),
            ("2024-05-01 12:00:00", 19.0),
            ("2024-05-01 15:00:00", 21.0),
            ("2024-05-02 00:00:00", 11.0),
            ("2024-05-02 12:00:00", 20.0),
            ("2024-05-03 03:00:00", 9.0),
            ("2024-05-04 12:00:00", 22.0),
        ]);

        let outlook = daily_outlook(&f, OUTLOOK_DAYS);

        let picked: Vec<_> = outlook.iter().map(|d| (d.date.as_str(), d.entry.reading.temperature)).collect();
        assert_eq!(picked, [("2024-05-01", 19.0), ("2024-05-02", 20.0), ("2024-05-03", 9.0)]);
        assert_eq!(outlook[0].day_label(), "5/1");
    }

    #[test]
    fn outlook_of_empty_forecast_is_empty() {
        assert!(daily_outlook(&Forecast::default(), OUTLOOK_DAYS).is_empty());
    }

    #[test]
    fn hourly_takes_the_first_points() {
        let slots: Vec<(String, f64)> = (0..10)
            .map(|i| (format!("2024-05-01 {:02}:00:00", (i * 3) % 24), i as f64))
            .collect();
        let refs: Vec<(&str, f64)> = slots.iter().map(|(s, t)| (s.as_str(), *t)).collect();

        let hourly = hourly_temperatures(&forecast(&refs), HOURLY_POINTS);

        assert_eq!(hourly.len(), 8);
        assert_eq!(hourly[0], HourlyPoint { hour: 0, temperature: 0.0 });
        assert_eq!(hourly[7], HourlyPoint { hour: 21, temperature: 7.0 });
    }
}
