//! Core library for `weatherdash`.
//!
//! This crate defines:
//! - Configuration & API key handling
//! - The weather proxy route and its upstream provider
//! - Classification of readings into outfit, air-quality and theme buckets
//! - Forecast summaries, session state and dashboard orchestration
//!
//! It is used by `weatherdash-cli`, but can also be reused by other binaries or services.

pub mod classify;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod locale;
pub mod model;
pub mod provider;
pub mod proxy;
pub mod session;

pub use classify::{ClassificationResult, classify};
pub use config::Config;
pub use dashboard::{Dashboard, DashboardError, DashboardReport};
pub use error::{FetchError, ProxyError};
pub use locale::Locale;
pub use model::{DataType, LocationQuery, ProxyParams, ProxyRequest, Units};
pub use provider::{OpenWeatherProvider, UpstreamProvider};
pub use proxy::{ProxyReply, WeatherProxy};
pub use session::Session;
