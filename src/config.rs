// Runtime configuration, read from environment variables:
// - `FLIGHTDESK_LOG`: log level (trace|debug|info|warn|error).
// - `FLIGHTDESK_LOG_DIR`: absolute directory for rolling log files.
// - `FLIGHTDESK_FLIGHTS`: optional JSON file with the flight catalog.

use crate::desk::default_flights;
use crate::logging::default_log_level;
use crate::model::Flight;
use crate::ui::RESERVATION_KEYWORDS;
use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const LOG_LEVEL_VAR: &str = "FLIGHTDESK_LOG";
pub const LOG_DIR_VAR: &str = "FLIGHTDESK_LOG_DIR";
pub const FLIGHTS_VAR: &str = "FLIGHTDESK_FLIGHTS";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: PathBuf,
    pub flights_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; `from_env` passes
    /// the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            log_level: non_empty(LOG_LEVEL_VAR).unwrap_or_else(|| default_log_level().into()),
            log_dir: non_empty(LOG_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(default_log_dir),
            flights_path: non_empty(FLIGHTS_VAR).map(PathBuf::from),
        }
    }

    /// Flight catalog to start with: the configured file, or the built-in
    /// three flights.
    pub fn load_flights(&self) -> Result<Vec<Flight>> {
        match &self.flights_path {
            Some(path) => load_catalog(path),
            None => Ok(default_flights()),
        }
    }
}

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("flightdesk").join("logs"))
        .unwrap_or_else(|| {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("logs")
        })
}

/// Reads a JSON array of flights and checks it is usable.
pub fn load_catalog(path: &Path) -> Result<Vec<Flight>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read flight catalog {}", path.display()))?;
    let flights: Vec<Flight> = serde_json::from_str(&data)
        .with_context(|| format!("Parsing flight catalog {}", path.display()))?;
    validate_catalog(&flights)?;
    Ok(flights)
}

fn validate_catalog(flights: &[Flight]) -> Result<()> {
    if flights.is_empty() {
        bail!("flight catalog is empty");
    }
    let mut seen = HashSet::new();
    for flight in flights {
        if flight.flight_number.trim().is_empty() {
            bail!("flight catalog contains an empty flight number");
        }
        // Typed input is trimmed before matching.
        if flight.flight_number.trim() != flight.flight_number {
            bail!(
                "flight number `{}` has surrounding whitespace",
                flight.flight_number
            );
        }
        if RESERVATION_KEYWORDS
            .iter()
            .any(|keyword| flight.flight_number.eq_ignore_ascii_case(keyword))
        {
            bail!(
                "flight number `{}` is a reserved command word",
                flight.flight_number
            );
        }
        if !seen.insert(flight.flight_number.to_ascii_lowercase()) {
            bail!("duplicate flight number `{}` in catalog", flight.flight_number);
        }
    }
    Ok(())
}
