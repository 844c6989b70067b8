//! Plain-text rendering of a dashboard report.

use chrono::Local;
use std::fmt::{self, Write};
use weatherdash_core::{DashboardReport, Session};

pub fn dashboard(report: &DashboardReport, session: &Session) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_dashboard(&mut out, report, session)?;
    Ok(out)
}

fn write_dashboard(out: &mut String, report: &DashboardReport, session: &Session) -> fmt::Result {
    let catalog = report.locale.catalog();
    let labels = &catalog.labels;
    let temp_unit = report.units.temperature_symbol();
    let reading = &report.current.reading;

    writeln!(out, "[{}]", report.classification.theme.css_class())?;
    writeln!(out, "{}", report.current.display_name())?;
    writeln!(out, "  {}{}  {}", reading.temperature.round(), temp_unit, reading.description)?;
    writeln!(
        out,
        "  {}: {}%  {}: {} {}",
        labels.humidity,
        reading.humidity_pct,
        labels.wind,
        reading.wind_speed,
        report.units.wind_symbol()
    )?;

    let outfit = &report.classification.outfit;
    writeln!(out)?;
    writeln!(out, "{} ({}{})", catalog.outfit_heading, reading.temperature.round(), temp_unit)?;
    writeln!(out, "  {} {}", outfit.icon, outfit.message)?;

    writeln!(out)?;
    writeln!(out, "{}", labels.air_quality)?;
    match (&report.air, &report.classification.aqi) {
        (Some(air), Some(summary)) => {
            let index = air.aqi.map_or_else(|| "-".to_string(), |i| i.to_string());
            writeln!(out, "  AQI {index} - {} [{}]", summary.label, summary.css_class)?;
            writeln!(out, "  {}", summary.description)?;
            let pollutants: Vec<String> = air
                .components
                .labelled()
                .iter()
                .map(|(name, value)| match value {
                    Some(v) => format!("{name} {v:.1}"),
                    None => format!("{name} -"),
                })
                .collect();
            writeln!(out, "  {} µg/m³", pollutants.join("  "))?;
        }
        _ => writeln!(out, "  {}", labels.no_air_data)?,
    }

    writeln!(out)?;
    writeln!(out, "{}", labels.outlook)?;
    if report.outlook.is_empty() {
        writeln!(out, "  {}", labels.no_forecast)?;
    }
    for day in &report.outlook {
        writeln!(
            out,
            "  {:>5}  {}{}  {}",
            day.day_label(),
            day.entry.reading.temperature.round(),
            temp_unit,
            day.entry.reading.description
        )?;
    }

    if !report.hourly.is_empty() {
        writeln!(out)?;
        writeln!(out, "{} ({})", labels.hourly, temp_unit)?;
        let points: Vec<String> = report
            .hourly
            .iter()
            .map(|p| format!("{}{} {}", p.hour, labels.hour_suffix, p.temperature.round()))
            .collect();
        writeln!(out, "  {}", points.join(" | "))?;
    }

    if !session.recent.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}: {}", labels.recent, session.recent.as_slice().join(", "))?;
    }

    writeln!(
        out,
        "{}: {}",
        labels.last_updated,
        report.fetched_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use weatherdash_core::{
        LocationQuery, Locale, Units, classify,
        forecast::{DailyOutlook, HourlyPoint},
        model::{AirReading, Condition, CurrentWeather, ForecastEntry, Pollutants, WeatherReading},
    };

    fn reading(temperature: f64, condition: Condition, icon: &str) -> WeatherReading {
        WeatherReading {
            temperature,
            condition,
            description: "light rain".into(),
            icon: icon.into(),
            humidity_pct: 80,
            wind_speed: 4.2,
        }
    }

    fn report(locale: Locale, air: Option<AirReading>) -> DashboardReport {
        let current = CurrentWeather {
            name: "Seoul".into(),
            country: "KR".into(),
            lat: 37.5,
            lon: 127.0,
            observed_at: Utc::now(),
            reading: reading(12.4, Condition::Rain, "10d"),
        };
        let classification = classify(&current.reading, Units::Metric, air.as_ref(), locale);

        DashboardReport {
            location: LocationQuery::city("Seoul"),
            units: Units::Metric,
            locale,
            outlook: vec![DailyOutlook {
                date: "2024-05-01".into(),
                entry: ForecastEntry {
                    at: Utc::now(),
                    dt_txt: "2024-05-01 12:00:00".into(),
                    reading: reading(14.0, Condition::Clouds, "04d"),
                },
            }],
            hourly: vec![HourlyPoint { hour: 9, temperature: 11.6 }],
            current,
            air,
            classification,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn renders_every_section() {
        let air = AirReading {
            aqi: Some(2),
            components: Pollutants { pm2_5: Some(12.34), ..Default::default() },
        };
        let mut session = Session::default();
        session.recent.push("Seoul");

        let text = dashboard(&report(Locale::English, Some(air)), &session).unwrap();

        assert!(text.starts_with("[theme-rain]\nSeoul, KR\n"));
        assert!(text.contains("12℃  light rain"));
        assert!(text.contains("AQI 2 - Good [aqi-level-2]"));
        assert!(text.contains("PM2.5 12.3"));
        assert!(text.contains("PM10 -"));
        assert!(text.contains("5/1"));
        assert!(text.contains("9h 12"));
        assert!(text.contains("Recent searches: Seoul"));
        assert!(text.contains("☔"));
    }

    #[test]
    fn missing_air_shows_placeholder() {
        let text = dashboard(&report(Locale::Korean, None), &Session::default()).unwrap();

        assert!(text.contains("공기질 데이터를 가져오지 못했습니다."));
        assert!(!text.contains("최근 검색"));
    }
}
