//! Configuration for the `GeoProxy` server
//!
//! Everything comes from environment variables at startup. The weather API
//! key is required; the rest has sensible defaults and exists mainly so
//! tests can point the clients at stub upstream servers.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Production base URL of the REST Countries directory
pub const DEFAULT_COUNTRIES_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Production base URL of the OpenWeatherMap API
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration, resolved once in `main`
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server binds to
    pub port: u16,
    /// OpenWeatherMap API credential, passed explicitly to the weather client
    pub openweather_api_key: String,
    /// Base URL of the country directory service
    pub countries_base_url: String,
    /// Base URL of the weather service
    pub weather_base_url: String,
    /// Bound timeout applied to every upstream request
    pub http_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// `OPENWEATHER_API_KEY` is required; `PORT`, `COUNTRIES_BASE_URL`,
    /// `WEATHER_BASE_URL` and `HTTP_TIMEOUT_SECS` are optional overrides.
    pub fn from_env() -> Result<Self> {
        let openweather_api_key =
            env::var("OPENWEATHER_API_KEY").context("Missing OPENWEATHER_API_KEY env var")?;

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().context("PORT must be a valid port number")?,
            Err(_) => DEFAULT_PORT,
        };

        let timeout_secs = match env::var("HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse()
                .context("HTTP_TIMEOUT_SECS must be a number of seconds")?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let countries_base_url = env::var("COUNTRIES_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_COUNTRIES_BASE_URL.to_string());
        let weather_base_url =
            env::var("WEATHER_BASE_URL").unwrap_or_else(|_| DEFAULT_WEATHER_BASE_URL.to_string());

        Ok(Self {
            port,
            openweather_api_key,
            countries_base_url,
            weather_base_url,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The only test touching process env; keep it that way so parallel
    // test execution stays safe.
    #[test]
    fn test_from_env_defaults_and_overrides() {
        unsafe {
            env::remove_var("OPENWEATHER_API_KEY");
            env::remove_var("PORT");
            env::remove_var("HTTP_TIMEOUT_SECS");
            env::remove_var("COUNTRIES_BASE_URL");
            env::remove_var("WEATHER_BASE_URL");
        }
        assert!(AppConfig::from_env().is_err());

        unsafe {
            env::set_var("OPENWEATHER_API_KEY", "test-key");
        }
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.countries_base_url, DEFAULT_COUNTRIES_BASE_URL);
        assert_eq!(config.weather_base_url, DEFAULT_WEATHER_BASE_URL);
        assert_eq!(config.http_timeout, Duration::from_secs(10));

        unsafe {
            env::set_var("PORT", "9100");
            env::set_var("HTTP_TIMEOUT_SECS", "3");
        }
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.http_timeout, Duration::from_secs(3));

        unsafe {
            env::set_var("PORT", "not-a-port");
        }
        assert!(AppConfig::from_env().is_err());

        unsafe {
            env::remove_var("OPENWEATHER_API_KEY");
            env::remove_var("PORT");
            env::remove_var("HTTP_TIMEOUT_SECS");
        }
    }
}
