//! Configuration module
//!
//! Loads configuration from environment variables. Every setting has a
//! default, so the service starts with no environment at all.

use std::env;
use std::str::FromStr;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Load the two demo events at startup
    pub seed_demo_events: bool,

    /// Log output format
    pub log_format: LogFormat,
}

/// How log lines are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3030,
            environment: "development".to_string(),
            seed_demo_events: true,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue("PORT"))?,
            None => defaults.port,
        };

        let environment = lookup("ENVIRONMENT").unwrap_or(defaults.environment);

        let seed_demo_events = match lookup("SEED_DEMO_EVENTS") {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidValue("SEED_DEMO_EVENTS"))?,
            None => defaults.seed_demo_events,
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue("LOG_FORMAT"))?,
            None => defaults.log_format,
        };

        Ok(Self {
            host,
            port,
            environment,
            seed_demo_events,
            log_format,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
