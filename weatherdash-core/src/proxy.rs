//! The single proxy route: validate, build the upstream query, relay.

use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    config::Config,
    error::ProxyError,
    model::{ProxyParams, ProxyRequest},
    provider::{OpenWeatherProvider, UpstreamProvider, UpstreamQuery},
};

/// HTTP status and JSON body handed back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyReply {
    pub status: u16,
    pub body: Value,
}

impl From<ProxyError> for ProxyReply {
    fn from(err: ProxyError) -> Self {
        Self { status: err.status_code(), body: err.body() }
    }
}

/// Stateless per request; clones share the upstream client.
#[derive(Debug, Clone)]
pub struct WeatherProxy {
    api_key: Option<String>,
    upstream: Arc<dyn UpstreamProvider>,
}

impl WeatherProxy {
    pub fn new(api_key: Option<String>, upstream: Arc<dyn UpstreamProvider>) -> Self {
        Self { api_key, upstream }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.resolve_api_key(),
            Arc::new(OpenWeatherProvider::with_base_url(config.base_url())),
        )
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Entry point for the HTTP route. Never fails: every error becomes a reply.
    pub async fn handle(&self, params: &ProxyParams) -> ProxyReply {
        match self.try_handle(params).await {
            Ok(body) => ProxyReply { status: 200, body },
            Err(err) => ProxyReply::from(err),
        }
    }

    async fn try_handle(&self, params: &ProxyParams) -> Result<Value, ProxyError> {
        // Key check precedes validation.
        self.api_key()?;
        let request = ProxyRequest::from_params(params)?;
        self.fetch(&request).await
    }

    /// Typed entry point. Returns the provider's body on 2xx.
    pub async fn fetch(&self, request: &ProxyRequest) -> Result<Value, ProxyError> {
        let api_key = self.api_key()?;
        let query = UpstreamQuery::build(request, api_key);

        info!(
            endpoint = query.endpoint.path(),
            location = %request.location,
            units = request.units.as_str(),
            "proxying weather request"
        );

        let response = self.upstream.send(&query).await.inspect_err(|err| {
            error!(error = %err, endpoint = query.endpoint.path(), "upstream fetch failed");
        })?;

        if !response.is_success() {
            warn!(status = response.status, endpoint = query.endpoint.path(), "upstream returned an error");
            return Err(ProxyError::Upstream { status: response.status, body: response.body });
        }

        Ok(response.body)
    }

    fn api_key(&self) -> Result<&str, ProxyError> {
        self.api_key.as_deref().ok_or(ProxyError::Configuration)
    }
}
