use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use weatherdash_core::{
    Config, Dashboard, DashboardError, DashboardReport, Locale, Session, Units, WeatherProxy,
    config::API_KEY_ENV,
};

use crate::{render, server};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherdash", version, about = "Weather dashboard and OpenWeather proxy")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Serve the `/api/weather` proxy route over HTTP.
    Serve {
        /// Listen address; overrides the config file.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Show the dashboard for a city or a coordinate pair.
    Show {
        /// City name; ignored when --lat/--lon are given.
        city: Option<String>,

        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// "metric" or "imperial".
        #[arg(long, value_parser = parse_units)]
        units: Option<Units>,

        /// Display language: "kr"/"ko" for Korean, anything else for English.
        #[arg(long)]
        lang: Option<String>,

        /// Print the report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Switch between ℃ and ℉ and refresh the last location.
    ToggleUnits,

    /// List recent searches.
    Recent,
}

fn parse_units(value: &str) -> Result<Units, String> {
    match value.to_ascii_lowercase().as_str() {
        "metric" | "c" => Ok(Units::Metric),
        "imperial" | "f" => Ok(Units::Imperial),
        _ => Err(format!("unknown units '{value}', expected metric or imperial")),
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure(config),
            Command::Serve { bind } => {
                let bind = bind.unwrap_or_else(|| config.bind().to_string());
                server::run_server(WeatherProxy::from_config(&config), &bind).await
            }
            Command::Show { city, lat, lon, units, lang, json } => {
                let mut session = load_session(&config)?;
                if let Some(units) = units {
                    session.units = units;
                }
                if let Some(lang) = lang {
                    session.locale = Locale::from_lang(&lang);
                }

                let dashboard = Dashboard::new(WeatherProxy::from_config(&config));
                let result = match (lat, lon, city) {
                    (Some(lat), Some(lon), _) => dashboard.by_coords(lat, lon, &mut session).await,
                    (_, _, Some(city)) => dashboard.by_city(&city, &mut session).await,
                    _ => bail!("Give a city name or both --lat and --lon."),
                };

                finish(result, session, json)
            }
            Command::ToggleUnits => {
                let mut session = load_session(&config)?;
                let units = session.units.toggled();

                if session.toggle_units().is_none() {
                    session.save()?;
                    println!("Units set to {units}.");
                    return Ok(());
                }

                let dashboard = Dashboard::new(WeatherProxy::from_config(&config));
                match dashboard.refresh(&mut session).await {
                    Some(result) => finish(result, session, false),
                    None => Ok(()),
                }
            }
            Command::Recent => {
                let session = load_session(&config)?;
                let label = session.locale.catalog().labels.recent;

                println!("{label}:");
                for city in session.recent.as_slice() {
                    println!("  {city}");
                }
                Ok(())
            }
        }
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_help_message(&format!("{API_KEY_ENV} in the environment takes precedence"))
        .prompt()
        .context("Failed to read API key")?;

    let key = key.trim();
    if key.is_empty() {
        bail!("API key must not be empty");
    }

    config.set_api_key(key.to_string());
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Stored session, with config defaults applied on first use.
fn load_session(config: &Config) -> anyhow::Result<Session> {
    if Session::session_file_path()?.exists() {
        return Session::load();
    }

    Ok(Session::new(
        config.default_units.unwrap_or_default(),
        config.default_locale.unwrap_or_default(),
    ))
}

/// Persist the session and print the report or a localised failure.
fn finish(
    result: Result<DashboardReport, DashboardError>,
    session: Session,
    json: bool,
) -> anyhow::Result<()> {
    session.save()?;

    match result {
        Ok(report) if json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Ok(report) => {
            print!("{}", render::dashboard(&report, &session)?);
            Ok(())
        }
        Err(err) => {
            tracing::debug!(error = %err, "dashboard fetch failed");
            bail!("{}", err.user_message(session.locale))
        }
    }
}
