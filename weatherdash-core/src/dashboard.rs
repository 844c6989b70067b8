//! Fetches current weather, forecast and air quality for one location and
//! classifies the result.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::{
    classify::{ClassificationResult, classify},
    error::{FetchError, FetchStage},
    forecast::{DailyOutlook, HOURLY_POINTS, HourlyPoint, OUTLOOK_DAYS, daily_outlook, hourly_temperatures},
    locale::Locale,
    model::{AirReading, CurrentWeather, DataType, Forecast, LocationQuery, ProxyRequest, Units},
    proxy::WeatherProxy,
    session::Session,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    #[error("no city given")]
    EmptyCity,

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl DashboardError {
    pub fn user_message(&self, locale: Locale) -> &'static str {
        match self {
            Self::EmptyCity => locale.catalog().errors.empty_city,
            Self::Fetch(err) => err.user_message(locale),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub location: LocationQuery,
    pub units: Units,
    pub locale: Locale,
    pub current: CurrentWeather,
    pub outlook: Vec<DailyOutlook>,
    pub hourly: Vec<HourlyPoint>,
    pub air: Option<AirReading>,
    pub classification: ClassificationResult,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    proxy: WeatherProxy,
}

impl Dashboard {
    pub fn new(proxy: WeatherProxy) -> Self {
        Self { proxy }
    }

    /// Refresh whatever the session looked at last.
    pub async fn refresh(&self, session: &mut Session) -> Option<Result<DashboardReport, DashboardError>> {
        match session.last_location.clone()? {
            LocationQuery::City { name } => Some(self.by_city(&name, session).await),
            LocationQuery::Coords { lat, lon } => Some(self.by_coords(lat, lon, session).await),
        }
    }

    /// Current weather first for its coordinates, then forecast and air together.
    #[instrument(skip(self, session))]
    pub async fn by_city(&self, city: &str, session: &mut Session) -> Result<DashboardReport, DashboardError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(DashboardError::EmptyCity);
        }

        let location = LocationQuery::city(city);
        session.last_location = Some(location.clone());

        let current = self.current(&location, session).await?;
        let air_location = LocationQuery::coords(current.lat, current.lon);

        let (forecast, air) = tokio::try_join!(
            self.forecast(&location, session),
            self.air(&air_location, session),
        )?;

        session.recent.push(city);

        Ok(self.report(location, session, current, forecast, air))
    }

    #[instrument(skip(self, session))]
    pub async fn by_coords(&self, lat: f64, lon: f64, session: &mut Session) -> Result<DashboardReport, DashboardError> {
        let location = LocationQuery::coords(lat, lon);
        session.last_location = Some(location.clone());

        let (current, forecast, air) = tokio::try_join!(
            self.current(&location, session),
            self.forecast(&location, session),
            self.air(&location, session),
        )?;

        session.recent.push(&current.name);

        Ok(self.report(location, session, current, forecast, air))
    }

    fn report(
        &self,
        location: LocationQuery,
        session: &Session,
        current: CurrentWeather,
        forecast: Forecast,
        air: Option<AirReading>,
    ) -> DashboardReport {
        let classification = classify(&current.reading, session.units, air.as_ref(), session.locale);

        info!(
            location = %location,
            theme = classification.theme.as_str(),
            band = ?classification.outfit.band,
            "dashboard ready"
        );

        DashboardReport {
            location,
            units: session.units,
            locale: session.locale,
            outlook: daily_outlook(&forecast, OUTLOOK_DAYS),
            hourly: hourly_temperatures(&forecast, HOURLY_POINTS),
            current,
            air,
            classification,
            fetched_at: Utc::now(),
        }
    }

    async fn current(&self, location: &LocationQuery, session: &Session) -> Result<CurrentWeather, FetchError> {
        self.get(location, DataType::Current, session, FetchStage::Current, CurrentWeather::from_body)
            .await
    }

    async fn forecast(&self, location: &LocationQuery, session: &Session) -> Result<Forecast, FetchError> {
        self.get(location, DataType::Forecast, session, FetchStage::Forecast, Forecast::from_body)
            .await
    }

    async fn air(&self, location: &LocationQuery, session: &Session) -> Result<Option<AirReading>, FetchError> {
        self.get(location, DataType::Air, session, FetchStage::Air, AirReading::from_body)
            .await
    }

    async fn get<T>(
        &self,
        location: &LocationQuery,
        data_type: DataType,
        session: &Session,
        stage: FetchStage,
        decode: fn(Value) -> serde_json::Result<T>,
    ) -> Result<T, FetchError> {
        let request = ProxyRequest::new(location.clone(), data_type, session.units, session.locale);
        let by_coords = location.is_coords();

        let body = self
            .proxy
            .fetch(&request)
            .await
            .map_err(|err| FetchError::from_proxy(stage, by_coords, &err))?;

        decode(body).map_err(|e| {
            error!(error = %e, stage = ?stage, "unexpected upstream payload");
            FetchError { stage, status: 500, message: None, by_coords }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{AqiLevel, OutfitBand, Theme};
    use crate::provider::OpenWeatherProvider;
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn current_body(name: &str, temp: f64, main: &str, icon: &str) -> Value {
        json!({
            "coord": { "lat": 37.5683, "lon": 126.9778 },
            "weather": [{ "main": main, "description": "desc", "icon": icon }],
            "main": { "temp": temp, "humidity": 55 },
            "wind": { "speed": 3.1 },
            "sys": { "country": "KR" },
            "name": name,
            "dt": 1700000000
        })
    }

    fn forecast_body() -> Value {
        json!({
            "list": [
                { "dt": 1700000000, "dt_txt": "2024-05-01 09:00:00", "main": { "temp": 10.0 },
                  "weather": [{ "main": "Clouds", "icon": "04d" }] },
                { "dt": 1700010800, "dt_txt": "2024-05-01 12:00:00", "main": { "temp": 14.0 },
                  "weather": [{ "main": "Clear", "icon": "01d" }] }
            ]
        })
    }

    fn air_body(aqi: i64) -> Value {
        json!({ "list": [{ "main": { "aqi": aqi }, "components": { "pm2_5": 35.5 } }] })
    }

    async fn mount(server: &MockServer, endpoint: &str, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/{endpoint}")))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(server)
            .await;
    }

    fn dashboard(server: &MockServer) -> Dashboard {
        Dashboard::new(WeatherProxy::new(
            Some("KEY".into()),
            Arc::new(OpenWeatherProvider::with_base_url(server.uri())),
        ))
    }

    #[tokio::test]
    async fn by_city_fetches_air_with_current_coordinates() {
        let server = MockServer::start().await;
        mount(&server, "weather", 200, current_body("Seoul", 2.0, "Snow", "13d")).await;
        mount(&server, "forecast", 200, forecast_body()).await;
        Mock::given(method("GET"))
            .and(path("/air_pollution"))
            .and(query_param("lat", "37.5683"))
            .and(query_param("lon", "126.9778"))
            .respond_with(ResponseTemplate::new(200).set_body_json(air_body(4)))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = Session::default();
        let report = dashboard(&server).by_city("Seoul", &mut session).await.unwrap();

        assert_eq!(report.current.display_name(), "Seoul, KR");
        assert_eq!(report.classification.theme, Theme::Snow);
        assert_eq!(report.classification.outfit.band, OutfitBand::Cold);
        assert_eq!(report.classification.aqi.as_ref().map(|a| a.level), Some(AqiLevel::Poor));
        assert_eq!(report.outlook.len(), 1);
        assert_eq!(report.outlook[0].entry.reading.temperature, 14.0);
        assert_eq!(report.hourly.len(), 2);

        assert_eq!(session.recent.as_slice(), ["Seoul"]);
        assert_eq!(session.last_location, Some(LocationQuery::city("Seoul")));
    }

    #[tokio::test]
    async fn by_coords_records_resolved_city_name() {
        let server = MockServer::start().await;
        mount(&server, "weather", 200, current_body("Jung-gu", 30.0, "Clear", "01n")).await;
        mount(&server, "forecast", 200, forecast_body()).await;
        mount(&server, "air_pollution", 200, air_body(1)).await;

        let mut session = Session::default();
        let report = dashboard(&server).by_coords(37.5, 127.0, &mut session).await.unwrap();

        assert_eq!(report.classification.theme, Theme::Night);
        assert_eq!(report.classification.outfit.band, OutfitBand::Hot);
        assert_eq!(session.recent.as_slice(), ["Jung-gu"]);
        assert_eq!(session.last_location, Some(LocationQuery::coords(37.5, 127.0)));
    }

    #[tokio::test]
    async fn unknown_city_maps_to_not_found_message() {
        let server = MockServer::start().await;
        mount(&server, "weather", 404, json!({ "cod": "404", "message": "city not found" })).await;

        let mut session = Session::default();
        let err = dashboard(&server).by_city("Atlantis", &mut session).await.unwrap_err();

        assert_eq!(err.user_message(Locale::Korean), "해당 도시를 찾을 수 없습니다. 철자를 다시 확인해주세요.");
        assert!(session.recent.is_empty());
    }

    #[tokio::test]
    async fn any_failed_fetch_fails_the_report() {
        let server = MockServer::start().await;
        mount(&server, "weather", 200, current_body("Seoul", 10.0, "Clear", "01d")).await;
        mount(&server, "forecast", 200, forecast_body()).await;
        mount(&server, "air_pollution", 500, json!({ "message": "internal" })).await;

        let mut session = Session::default();
        let err = dashboard(&server).by_coords(37.5, 127.0, &mut session).await.unwrap_err();

        assert_eq!(err.user_message(Locale::English), "Could not load air quality data.");
    }

    #[tokio::test]
    async fn empty_city_is_rejected_without_fetching() {
        let server = MockServer::start().await;

        let mut session = Session::default();
        let err = dashboard(&server).by_city("  ", &mut session).await.unwrap_err();

        assert_eq!(err, DashboardError::EmptyCity);
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn refresh_uses_last_location_and_current_units() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("units", "imperial"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body("Seoul", 50.0, "Rain", "10d")))
            .expect(1)
            .mount(&server)
            .await;
        mount(&server, "forecast", 200, forecast_body()).await;
        mount(&server, "air_pollution", 200, air_body(2)).await;

        let mut session = Session::default();
        session.last_location = Some(LocationQuery::city("Seoul"));
        session.toggle_units();

        let report = dashboard(&server).refresh(&mut session).await.unwrap().unwrap();

        assert_eq!(report.units, Units::Imperial);
        assert_eq!(report.classification.outfit.band, OutfitBand::Cool);
        assert_eq!(report.classification.theme, Theme::Rain);
    }

    #[tokio::test]
    async fn refresh_without_history_does_nothing() {
        let server = MockServer::start().await;
        let mut session = Session::default();

        assert!(dashboard(&server).refresh(&mut session).await.is_none());
    }
}
