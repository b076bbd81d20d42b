//! Configuration Module
//!
//! Handles loading and managing cache server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_size: usize,
    /// Default max age in milliseconds, None = entries never expire
    pub max_age_ms: Option<u64>,
    /// HTTP server port
    pub server_port: u16,
    /// Expiry sweep interval in milliseconds
    pub sweep_interval_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_SIZE` - Maximum cache entries (default: 1000)
    /// - `MAX_AGE_MS` - Default max age in milliseconds; unset or 0 disables expiry
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL_MS` - Expiry sweep frequency in milliseconds (default: 1000)
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_size: parse_var("MAX_SIZE").unwrap_or(defaults.max_size),
            max_age_ms: parse_var("MAX_AGE_MS").filter(|ms| *ms > 0),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            sweep_interval_ms: parse_var("SWEEP_INTERVAL_MS")
                .filter(|ms| *ms > 0)
                .unwrap_or(defaults.sweep_interval_ms),
        }
    }

    /// Default max age as a Duration.
    pub fn max_age(&self) -> Option<Duration> {
        self.max_age_ms.map(Duration::from_millis)
    }

    /// Sweep interval as a Duration.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_size: 1000,
            max_age_ms: None,
            server_port: 3000,
            sweep_interval_ms: 1000,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
