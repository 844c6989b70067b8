use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use crate::{
    error::ProxyError,
    model::{DataType, LocationQuery, ProxyRequest},
};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Upstream resource a request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Weather,
    Forecast,
    AirPollution,
}

impl Endpoint {
    pub fn for_data_type(data_type: DataType) -> Self {
        match data_type {
            DataType::Current => Endpoint::Weather,
            DataType::Forecast => Endpoint::Forecast,
            DataType::Air => Endpoint::AirPollution,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Weather => "weather",
            Endpoint::Forecast => "forecast",
            Endpoint::AirPollution => "air_pollution",
        }
    }
}

/// Endpoint plus the fully-built query string, API key included.
#[derive(Clone, PartialEq)]
pub struct UpstreamQuery {
    pub endpoint: Endpoint,
    pub query: String,
}

impl UpstreamQuery {
    pub fn build(request: &ProxyRequest, api_key: &str) -> Self {
        let mut query = match (&request.location, &request.coords_text) {
            (LocationQuery::Coords { .. }, Some((lat, lon))) => {
                format!("lat={}&lon={}", urlencoding::encode(lat), urlencoding::encode(lon))
            }
            // Display formatting never switches to exponent notation.
            (LocationQuery::Coords { lat, lon }, None) => format!("lat={lat}&lon={lon}"),
            (LocationQuery::City { name }, _) => format!("q={}", urlencoding::encode(name)),
        };

        // The air-pollution resource takes neither units nor lang.
        if request.data_type != DataType::Air {
            query.push_str(&format!(
                "&units={}&lang={}",
                request.units.as_str(),
                urlencoding::encode(&request.lang)
            ));
        }

        query.push_str(&format!("&appid={}", urlencoding::encode(api_key)));

        Self { endpoint: Endpoint::for_data_type(request.data_type), query }
    }

    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}?{}", base_url.trim_end_matches('/'), self.endpoint.path(), self.query)
    }

    /// Query string with the API key masked, for logging.
    pub fn redacted(&self) -> String {
        match self.query.rfind("&appid=") {
            Some(idx) => format!("{}&appid=***", &self.query[..idx]),
            None => self.query.clone(),
        }
    }
}

impl Debug for UpstreamQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamQuery")
            .field("endpoint", &self.endpoint)
            .field("query", &self.redacted())
            .finish()
    }
}

/// Status and decoded JSON body exactly as the provider returned them.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Value,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait UpstreamProvider: Send + Sync + Debug {
    /// One attempt, no retry. Non-2xx statuses are returned, not raised;
    /// only transport and decode failures are errors.
    async fn send(&self, query: &UpstreamQuery) -> Result<UpstreamResponse, ProxyError>;
}
