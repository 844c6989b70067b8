use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::ProxyError, locale::Locale};

/// Where to look up weather. Coordinates always win over a city name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum LocationQuery {
    City { name: String },
    Coords { lat: f64, lon: f64 },
}

impl LocationQuery {
    pub fn city(name: impl Into<String>) -> Self {
        LocationQuery::City { name: name.into() }
    }

    pub fn coords(lat: f64, lon: f64) -> Self {
        LocationQuery::Coords { lat, lon }
    }

    pub fn is_coords(&self) -> bool {
        matches!(self, LocationQuery::Coords { .. })
    }
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationQuery::City { name } => f.write_str(name),
            LocationQuery::Coords { lat, lon } => write!(f, "{lat}, {lon}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Current,
    Forecast,
    Air,
}

impl DataType {
    /// Unknown or missing values select current weather.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("forecast") => DataType::Forecast,
            Some("air") => DataType::Air,
            _ => DataType::Current,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Current => "current",
            DataType::Forecast => "forecast",
            DataType::Air => "air",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Unknown or missing values select metric.
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("imperial") => Units::Imperial,
            _ => Units::Metric,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Units::Metric => Units::Imperial,
            Units::Imperial => Units::Metric,
        }
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "℃",
            Units::Imperial => "℉",
        }
    }

    pub fn wind_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw query parameters of an inbound proxy request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProxyParams {
    pub city: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    #[serde(rename = "type")]
    pub data_type: Option<String>,
    pub units: Option<String>,
    pub lang: Option<String>,
}

pub const DEFAULT_LANG: &str = "kr";

/// A validated proxy request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyRequest {
    pub location: LocationQuery,
    /// Inbound `lat`/`lon` text, trimmed. Forwarded upstream as sent.
    pub coords_text: Option<(String, String)>,
    pub data_type: DataType,
    pub units: Units,
    pub lang: String,
}

impl ProxyRequest {
    pub fn new(location: LocationQuery, data_type: DataType, units: Units, locale: Locale) -> Self {
        Self { location, coords_text: None, data_type, units, lang: locale.lang_code().to_string() }
    }

    pub fn from_params(params: &ProxyParams) -> Result<Self, ProxyError> {
        let (location, coords_text) = match (parse_coord(params.lat.as_deref()), parse_coord(params.lon.as_deref())) {
            (Some((lat, lat_text)), Some((lon, lon_text))) => {
                (Some(LocationQuery::coords(lat, lon)), Some((lat_text, lon_text)))
            }
            _ => (None, None),
        };

        let location = location
            .or_else(|| {
                params
                    .city
                    .as_deref()
                    .filter(|c| !c.trim().is_empty())
                    .map(LocationQuery::city)
            })
            .ok_or_else(|| {
                ProxyError::BadRequest("city 또는 lat/lon 중 하나는 반드시 필요합니다.".to_string())
            })?;

        Ok(Self {
            location,
            coords_text,
            data_type: DataType::from_param(params.data_type.as_deref()),
            units: Units::from_param(params.units.as_deref()),
            lang: params
                .lang
                .clone()
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| DEFAULT_LANG.to_string()),
        })
    }
}

/// The parsed value plus the trimmed text it came from.
fn parse_coord(raw: Option<&str>) -> Option<(f64, String)> {
    let text = raw?.trim();
    let value = text.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some((value, text.to_string()))
}

/// Provider weather group (`weather[0].main`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Condition {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Snow,
    Thunderstorm,
    #[default]
    Unknown,
    Other(String),
}

impl From<&str> for Condition {
    fn from(value: &str) -> Self {
        match value {
            "Clear" => Condition::Clear,
            "Clouds" => Condition::Clouds,
            "Rain" => Condition::Rain,
            "Drizzle" => Condition::Drizzle,
            "Snow" => Condition::Snow,
            "Thunderstorm" => Condition::Thunderstorm,
            "" => Condition::Unknown,
            other => Condition::Other(other.to_string()),
        }
    }
}

impl From<String> for Condition {
    fn from(value: String) -> Self {
        Condition::from(value.as_str())
    }
}

impl From<Condition> for String {
    fn from(value: Condition) -> Self {
        match value {
            Condition::Clear => "Clear".into(),
            Condition::Clouds => "Clouds".into(),
            Condition::Rain => "Rain".into(),
            Condition::Drizzle => "Drizzle".into(),
            Condition::Snow => "Snow".into(),
            Condition::Thunderstorm => "Thunderstorm".into(),
            Condition::Unknown => String::new(),
            Condition::Other(s) => s,
        }
    }
}

/// The part of a weather observation the classifiers consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// In the units the request was made with.
    pub temperature: f64,
    pub condition: Condition,
    pub description: String,
    /// Provider icon code, e.g. `01d`; the trailing `d`/`n` marks day or night.
    pub icon: String,
    pub humidity_pct: u8,
    pub wind_speed: f64,
}

impl WeatherReading {
    pub fn is_night(&self) -> bool {
        self.icon.ends_with('n')
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub observed_at: DateTime<Utc>,
    pub reading: WeatherReading,
}

impl CurrentWeather {
    pub fn from_body(body: Value) -> serde_json::Result<Self> {
        let parsed: OwCurrentResponse = serde_json::from_value(body)?;

        Ok(Self {
            name: parsed.name,
            country: parsed.sys.country,
            lat: parsed.coord.lat,
            lon: parsed.coord.lon,
            observed_at: unix_to_utc(parsed.dt).unwrap_or_else(Utc::now),
            reading: reading_from(parsed.main, &parsed.weather, parsed.wind),
        })
    }

    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub at: DateTime<Utc>,
    /// Provider timestamp text, `YYYY-MM-DD HH:MM:SS`.
    pub dt_txt: String,
    pub reading: WeatherReading,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Forecast {
    pub entries: Vec<ForecastEntry>,
}

impl Forecast {
    pub fn from_body(body: Value) -> serde_json::Result<Self> {
        let parsed: OwForecastResponse = serde_json::from_value(body)?;

        let entries = parsed
            .list
            .into_iter()
            .map(|e| ForecastEntry {
                at: unix_to_utc(e.dt).unwrap_or_else(Utc::now),
                dt_txt: e.dt_txt,
                reading: reading_from(e.main, &e.weather, e.wind),
            })
            .collect();

        Ok(Self { entries })
    }
}

/// Pollutant concentrations in µg/m³; any may be missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Pollutants {
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
    pub o3: Option<f64>,
    pub no2: Option<f64>,
    pub so2: Option<f64>,
    pub co: Option<f64>,
}

impl Pollutants {
    /// Display order with labels.
    pub fn labelled(&self) -> [(&'static str, Option<f64>); 6] {
        [
            ("PM2.5", self.pm2_5),
            ("PM10", self.pm10),
            ("O₃", self.o3),
            ("NO₂", self.no2),
            ("SO₂", self.so2),
            ("CO", self.co),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AirReading {
    /// Provider index, nominally 1..=5.
    pub aqi: Option<i64>,
    pub components: Pollutants,
}

impl AirReading {
    /// First entry of the air-pollution `list`, or `None` when it is empty.
    pub fn from_body(body: Value) -> serde_json::Result<Option<Self>> {
        let parsed: OwAirResponse = serde_json::from_value(body)?;

        Ok(parsed.list.into_iter().next().map(|entry| Self {
            aqi: entry.main.aqi,
            components: entry.components,
        }))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwSys {
    country: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    coord: OwCoord,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwForecastEntry {
    dt: i64,
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwAirIndex {
    aqi: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwAirEntry {
    main: OwAirIndex,
    components: Pollutants,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwAirResponse {
    list: Vec<OwAirEntry>,
}

fn reading_from(main: OwMain, weather: &[OwWeather], wind: OwWind) -> WeatherReading {
    let first = weather.first();

    WeatherReading {
        temperature: main.temp,
        condition: first.map(|w| Condition::from(w.main.as_str())).unwrap_or_default(),
        description: first.map(|w| w.description.clone()).unwrap_or_default(),
        icon: first.map(|w| w.icon.clone()).unwrap_or_default(),
        humidity_pct: main.humidity,
        wind_speed: wind.speed,
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}
