/// Service configuration loader - parses binmon.toml
///
/// Separates deployment tuning (poll cadence, endpoint port, forecast
/// location label) from code. Bins themselves live in the database; this
/// file only shapes how the daemon runs.
///
/// Unlike the bin fleet, every field here has a sensible default, so a
/// missing binmon.toml is not an error — the service starts with defaults.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Forecast location label used when none is configured.
pub const DEFAULT_LOCATION: &str = "Bangalore";

/// Service tuning loaded from binmon.toml.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Display label attached to rainfall forecasts.
    #[serde(default = "default_location")]
    pub location: String,

    /// How often the daemon re-scores the bin fleet (default: 15 minutes).
    #[serde(default = "default_poll_interval")]
    pub poll_interval_minutes: u64,

    /// Port for the HTTP forecast endpoint. None disables the endpoint
    /// unless --endpoint is passed on the command line.
    #[serde(default)]
    pub endpoint_port: Option<u16>,

    /// Worker threads handling endpoint requests (default: 4).
    #[serde(default = "default_endpoint_workers")]
    pub endpoint_workers: usize,
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

fn default_poll_interval() -> u64 {
    15
}

fn default_endpoint_workers() -> usize {
    4
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            poll_interval_minutes: default_poll_interval(),
            endpoint_port: None,
            endpoint_workers: default_endpoint_workers(),
        }
    }
}

/// Root configuration structure for TOML parsing.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    service: Option<ServiceConfig>,
}

/// Parses a binmon.toml document.
pub fn parse_config(contents: &str) -> Result<ServiceConfig, toml::de::Error> {
    let file: ConfigFile = toml::from_str(contents)?;
    Ok(file.service.unwrap_or_default())
}

/// Loads binmon.toml from the working directory.
///
/// A missing file falls back to defaults; a present but malformed file is
/// a hard error, since silently ignoring an operator's config would mask
/// typos.
pub fn load_config() -> Result<ServiceConfig, String> {
    let config_path = "binmon.toml";

    if !Path::new(config_path).exists() {
        return Ok(ServiceConfig::default());
    }

    let contents = fs::read_to_string(config_path)
        .map_err(|e| format!("Failed to read {}: {}", config_path, e))?;

    parse_config(&contents).map_err(|e| format!("Failed to parse {}: {}", config_path, e))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
