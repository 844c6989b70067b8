use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::ProxyError;

use super::{UpstreamProvider, UpstreamQuery, UpstreamResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), http: Client::new() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for OpenWeatherProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamProvider for OpenWeatherProvider {
    #[instrument(skip(self), level = "debug")]
    async fn send(&self, query: &UpstreamQuery) -> Result<UpstreamResponse, ProxyError> {
        let url = query.url(&self.base_url);

        let res = self.http.get(&url).send().await.map_err(|e| {
            ProxyError::Network(format!(
                "failed to send request to OpenWeather ({}): {}",
                query.endpoint.path(),
                e.without_url()
            ))
        })?;

        let status = res.status().as_u16();
        let text = res.text().await.map_err(|e| {
            ProxyError::Network(format!("failed to read OpenWeather response body: {}", e.without_url()))
        })?;

        let body: Value = serde_json::from_str(&text).map_err(|e| {
            ProxyError::Network(format!(
                "failed to parse OpenWeather JSON (status {status}): {e}; body: {}",
                truncate_body(&text)
            ))
        })?;

        debug!(status, endpoint = query.endpoint.path(), "upstream responded");

        Ok(UpstreamResponse { status, body })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use crate::model::{DataType, LocationQuery, ProxyRequest, Units};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn seoul_current() -> UpstreamQuery {
        let request = ProxyRequest::new(LocationQuery::city("Seoul"), DataType::Current, Units::Metric, Locale::Korean);
        UpstreamQuery::build(&request, "test_key")
    }

    #[tokio::test]
    async fn relays_success_body_and_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Seoul"))
            .and(query_param("units", "metric"))
            .and(query_param("lang", "kr"))
            .and(query_param("appid", "test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "Seoul" })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::with_base_url(mock_server.uri());
        let response = provider.send(&seoul_current()).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, json!({ "name": "Seoul" }));
    }

    #[tokio::test]
    async fn non_success_status_is_returned_not_raised() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "cod": "404", "message": "city not found" })),
            )
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::with_base_url(mock_server.uri());
        let response = provider.send(&seoul_current()).await.unwrap();

        assert_eq!(response.status, 404);
        assert!(!response.is_success());
        assert_eq!(response.body["message"], "city not found");
    }

    #[tokio::test]
    async fn non_json_body_is_a_network_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::with_base_url(mock_server.uri());
        let err = provider.send(&seoul_current()).await.unwrap_err();

        assert!(matches!(err, ProxyError::Network(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn unreachable_upstream_is_a_network_error() {
        let provider = OpenWeatherProvider::with_base_url("http://127.0.0.1:1");
        let err = provider.send(&seoul_current()).await.unwrap_err();

        assert!(matches!(err, ProxyError::Network(_)));
        assert!(!err.to_string().contains("test_key"));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "가".repeat(300);
        let truncated = truncate_body(&long);

        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
    }
}
