//! Dashboard view state: units, language, last location and recent searches.
//!
//! Passed explicitly to the dashboard and renderers and persisted as TOML in
//! the platform data directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

use crate::{
    config::project_dirs,
    locale::Locale,
    model::{LocationQuery, Units},
};

pub const MAX_RECENT: usize = 5;

/// Most-recent-first list of searched cities, de-duplicated case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentCities(Vec<String>);

impl RecentCities {
    pub fn push(&mut self, city: &str) {
        let city = city.trim();
        if city.is_empty() {
            return;
        }

        let lower = city.to_lowercase();
        self.0.retain(|c| c.to_lowercase() != lower);
        self.0.insert(0, city.to_string());
        self.0.truncate(MAX_RECENT);
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Session {
    pub units: Units,
    pub locale: Locale,
    #[serde(default)]
    pub recent: RecentCities,
    pub last_location: Option<LocationQuery>,
}

impl Session {
    pub fn new(units: Units, locale: Locale) -> Self {
        Self { units, locale, ..Default::default() }
    }

    /// Flip metric/imperial. Returns the location that should be fetched again, if any.
    pub fn toggle_units(&mut self) -> Option<&LocationQuery> {
        self.units = self.units.toggled();
        self.last_location.as_ref()
    }

    /// Load the session, falling back to an empty one when the file is missing or unreadable.
    pub fn load() -> Result<Self> {
        Ok(Self::load_from(&Self::session_file_path()?))
    }

    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };

        toml::from_str(&contents).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "discarding unreadable session file");
            Self::default()
        })
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::session_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create session directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize session to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write session file: {}", path.display()))
    }

    pub fn session_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.data_dir().join("session.toml"))
    }
}
