use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::{Clock, FixedClock, SystemClock};
use crate::insights::DEFAULT_RECENT_SALES;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Studio settings, usually read from `atelier.toml`.
///
/// ```toml
/// [seed]
/// fixtures = true
/// path = "my-inventory.json"
///
/// [clock]
/// today = "2024-03-01"
///
/// [dashboard]
/// recent_sales_limit = 5
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudioConfig {
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Start from fixture data rather than empty collections.
    #[serde(default = "default_true")]
    pub fixtures: bool,
    /// JSON fixture file to seed from instead of the built-in sample.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            fixtures: default_true(),
            path: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Pin "today" to a fixed date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_recent_sales_limit")]
    pub recent_sales_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_sales_limit: default_recent_sales_limit(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_recent_sales_limit() -> usize {
    DEFAULT_RECENT_SALES
}

impl StudioConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// The clock this config asks for: pinned if `clock.today` is set, else the wall clock.
    pub fn clock(&self) -> Arc<dyn Clock> {
        match self.clock.today {
            Some(date) => Arc::new(FixedClock::new(date)),
            None => Arc::new(SystemClock),
        }
    }
}
