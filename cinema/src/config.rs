//! Configuration management for the cinema terminal.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Room name shown in the header and the farewell screen
    pub title: String,
    /// Currency symbol placed before every amount
    pub currency: String,
    /// Pause after an invalid menu choice
    pub invalid_choice_delay: Duration,
    /// Length of a bar covering the whole room in the occupancy chart
    pub bar_width: u32,
    /// Events kept in the store journal
    pub journal_capacity: usize,
    /// Log file; when unset only warnings reach stderr
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "CINEMA ESTRELA CADENTE".to_string(),
            currency: "R$".to_string(),
            invalid_choice_delay: Duration::from_millis(1500),
            bar_width: cinema_core::BAR_SCALE,
            journal_capacity: cinema_runtime::StoreConfig::DEFAULT_JOURNAL_CAPACITY,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Missing or unparsable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            title: lookup("CINEMA_TITLE")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.title),
            currency: lookup("CINEMA_CURRENCY").unwrap_or(defaults.currency),
            invalid_choice_delay: lookup("CINEMA_INVALID_CHOICE_DELAY_MS")
                .and_then(|s| s.parse().ok())
                .map_or(defaults.invalid_choice_delay, Duration::from_millis),
            bar_width: lookup("CINEMA_BAR_WIDTH")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.bar_width),
            journal_capacity: lookup("CINEMA_JOURNAL_CAPACITY")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.journal_capacity),
            log_file: lookup("CINEMA_LOG_FILE")
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        }
    }
}
