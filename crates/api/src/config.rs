//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the Slotwise API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3001)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins (default: "*";
//!   set it empty to send no CORS headers)
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `BUSINESS_TIMEZONE`: IANA zone business hours are read in (default: "UTC")
//! - `BUSINESS_HOURS`: Weekly table such as `mon=8-17,tue=8-17` (default: Mon-Fri 8-17)
//! - `AVAILABILITY_MAX_DAYS`: Longest date range one availability query may span (default: 62)
//! - `DEFAULT_CLIENT_TIMEZONE`: Timezone echoed when a query sends none (default: "America/New_York")
//!
//! Twilio settings are read separately by `slotwise_notify::TwilioConfig`.

use chrono_tz::Tz;
use eyre::{Result, WrapErr, eyre};
use slotwise_core::business_hours::BusinessHours;
use std::env;
use tracing::Level;

/// Configuration for the Slotwise API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use slotwise_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins; `*` allows any, empty disables CORS
    pub cors_origins: Vec<String>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Zone in which business hours are interpreted
    pub business_timezone: Tz,

    /// Weekly opening hours
    pub business_hours: BusinessHours,

    /// Longest inclusive day range accepted by the availability endpoint
    pub max_range_days: i64,

    /// Timezone echoed back when an availability query does not name one
    pub default_client_timezone: String,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    /// - BUSINESS_TIMEZONE is not a known IANA zone
    /// - LOG_LEVEL is not a tracing level
    /// - API_REQUEST_TIMEOUT_SECONDS is not a positive integer
    /// - BUSINESS_HOURS or AVAILABILITY_MAX_DAYS is malformed
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "3001".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;

        // Logging settings
        let log_level = match lookup("LOG_LEVEL") {
            Some(level) => level
                .trim()
                .parse::<Level>()
                .map_err(|e| eyre!("Invalid LOG_LEVEL value: {}", e))?,
            None => Level::INFO,
        };

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        // Performance settings
        let request_timeout = lookup("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|| "30".to_string())
            .parse::<u64>()
            .wrap_err("Invalid API_REQUEST_TIMEOUT_SECONDS value")?;
        if request_timeout == 0 {
            return Err(eyre!("API_REQUEST_TIMEOUT_SECONDS must be at least 1"));
        }

        // Scheduling settings
        let business_timezone = match lookup("BUSINESS_TIMEZONE") {
            Some(zone) => zone
                .trim()
                .parse::<Tz>()
                .map_err(|e| eyre!("Invalid BUSINESS_TIMEZONE value: {}", e))?,
            None => Tz::UTC,
        };

        let business_hours = match lookup("BUSINESS_HOURS") {
            Some(table) => table
                .parse::<BusinessHours>()
                .wrap_err("Invalid BUSINESS_HOURS value")?,
            None => BusinessHours::default(),
        };

        let max_range_days = lookup("AVAILABILITY_MAX_DAYS")
            .unwrap_or_else(|| "62".to_string())
            .parse::<i64>()
            .wrap_err("Invalid AVAILABILITY_MAX_DAYS value")?;
        if max_range_days < 1 {
            return Err(eyre!("AVAILABILITY_MAX_DAYS must be at least 1"));
        }

        let default_client_timezone = lookup("DEFAULT_CLIENT_TIMEZONE")
            .unwrap_or_else(|| "America/New_York".to_string());

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            business_timezone,
            business_hours,
            max_range_days,
            default_client_timezone,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
