//! Error types surfaced by the proxy and the dashboard.

use serde_json::{Value, json};
use thiserror::Error;

use crate::locale::Locale;

/// Upstream `message` that marks an unknown city.
pub const CITY_NOT_FOUND: &str = "city not found";

/// Failure of a single proxied request. Every variant maps to an HTTP reply.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProxyError {
    #[error("API key not configured")]
    Configuration,

    #[error("{0}")]
    BadRequest(String),

    /// Non-2xx from the provider; relayed without translation.
    #[error("upstream responded with status {status}")]
    Upstream { status: u16, body: Value },

    /// Transport or decode failure. The detail only goes to the log.
    #[error("network error: {0}")]
    Network(String),
}

impl ProxyError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Configuration => 500,
            Self::BadRequest(_) => 400,
            Self::Upstream { status, .. } => *status,
            Self::Network(_) => 500,
        }
    }

    /// JSON body sent back to the caller.
    pub fn body(&self) -> Value {
        match self {
            Self::Configuration => json!({ "message": "API key not configured" }),
            Self::BadRequest(msg) => json!({ "message": msg }),
            Self::Upstream { body, .. } => body.clone(),
            Self::Network(_) => {
                json!({ "message": "Failed to fetch weather data from OpenWeather" })
            }
        }
    }
}

/// Which dashboard call failed, used to pick the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    Current,
    Forecast,
    Air,
}

/// Failure of one dashboard fetch, as seen by the rendering layer.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{stage:?} request failed with status {status}: {message:?}")]
pub struct FetchError {
    pub stage: FetchStage,
    pub status: u16,
    /// `message` field of the error body, if it had one.
    pub message: Option<String>,
    /// Set when the lookup was by coordinates rather than a city name.
    pub by_coords: bool,
}

impl FetchError {
    pub fn from_proxy(stage: FetchStage, by_coords: bool, err: &ProxyError) -> Self {
        let message = err
            .body()
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned);

        Self { stage, status: err.status_code(), message, by_coords }
    }

    pub fn is_city_not_found(&self) -> bool {
        self.status == 404 || self.message.as_deref() == Some(CITY_NOT_FOUND)
    }

    /// Localised message for display.
    pub fn user_message(&self, locale: Locale) -> &'static str {
        let errors = &locale.catalog().errors;

        if self.is_city_not_found() {
            return errors.city_not_found;
        }

        match (self.stage, self.by_coords) {
            (FetchStage::Current, false) => errors.current_failed,
            (FetchStage::Current, true) => errors.current_by_coords_failed,
            (FetchStage::Forecast, false) => errors.forecast_failed,
            (FetchStage::Forecast, true) => errors.forecast_by_coords_failed,
            (FetchStage::Air, _) => errors.air_failed,
        }
    }
}
