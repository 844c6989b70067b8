//! HTTP surface for the browser dashboard: one proxy route plus a health check.

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use weatherdash_core::{ProxyParams, WeatherProxy};

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub proxy: WeatherProxy,
}

/// GET /api/weather - Relay a weather, forecast or air-quality lookup
async fn weather(
    State(state): State<AppState>,
    Query(params): Query<ProxyParams>,
) -> (StatusCode, Json<Value>) {
    let reply = state.proxy.handle(&params).await;
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);
    (status, Json(reply.body))
}

/// GET /health - Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

/// Create the HTTP router
pub fn create_router(proxy: WeatherProxy) -> Router {
    let state = AppState { proxy };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/weather", get(weather))
        .layer(cors)
        .with_state(state)
}

/// Run the HTTP server until the process is stopped
pub async fn run_server(proxy: WeatherProxy, bind: &str) -> anyhow::Result<()> {
    if !proxy.has_api_key() {
        tracing::warn!("no API key configured; every request will answer 500");
    }

    let app = create_router(proxy);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {bind}"))?;
    tracing::info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("HTTP server stopped unexpectedly")?;

    Ok(())
}
