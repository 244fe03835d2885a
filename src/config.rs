//! Configuration management for the contact agenda.
//!
//! Configuration comes from environment variables, optionally seeded from a
//! `.env` file in the working directory.

use crate::error::{ConfigError, ConfigResult};
use crate::view::DEFAULT_PAGE_SIZE;
use std::env;
use std::time::Duration;

/// Configuration for the contact agenda.
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the contacts collection resource (e.g. `http://localhost:3001/contactos`)
    pub api_base_url: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Contacts shown per page (default: 3)
    pub page_size: usize,

    /// How long success/error banners stay visible, in milliseconds (default: 3500)
    pub banner_timeout_ms: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `AGENDA_API_BASE_URL`: URL of the contacts collection
    ///
    /// Optional environment variables:
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `AGENDA_PAGE_SIZE`: Contacts per page (default: 3)
    /// - `BANNER_TIMEOUT_MS`: Banner lifetime in milliseconds (default: 3500)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        let api_base_url = env::var("AGENDA_API_BASE_URL")
            .map_err(|_| ConfigError::MissingVar("AGENDA_API_BASE_URL".to_string()))?;

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "AGENDA_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let request_timeout = Self::parse_env("REQUEST_TIMEOUT", 10u64)?;
        let page_size = Self::parse_env("AGENDA_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        let banner_timeout_ms = Self::parse_env("BANNER_TIMEOUT_MS", 3500u64)?;

        if page_size == 0 {
            return Err(ConfigError::InvalidValue {
                var: "AGENDA_PAGE_SIZE".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            api_base_url,
            request_timeout,
            page_size,
            banner_timeout_ms,
            log_level,
        })
    }

    /// Banner lifetime as a `Duration`.
    pub fn banner_timeout(&self) -> Duration {
        Duration::from_millis(self.banner_timeout_ms)
    }

    /// Parse a numeric environment variable, falling back to `default` when unset.
    fn parse_env<T: std::str::FromStr>(var_name: &str, default: T) -> ConfigResult<T> {
        match env::var(var_name) {
            Ok(val) => val.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: String::new(),
            request_timeout: 10,
            page_size: DEFAULT_PAGE_SIZE,
            banner_timeout_ms: 3500,
            log_level: "error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    // Sets env vars and removes them again on drop
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.request_timeout, 10);
        assert_eq!(config.page_size, 3);
        assert_eq!(config.banner_timeout(), Duration::from_millis(3500));
        assert_eq!(config.log_level, "error");
    }

    #[test]
    #[serial]
    fn test_config_from_env_invalid_url() {
        let mut guard = EnvGuard::new();
        guard.set("AGENDA_API_BASE_URL", "localhost:3001/contactos");

        let result = Config::from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => {
                assert_eq!(var, "AGENDA_API_BASE_URL")
            }
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("AGENDA_API_BASE_URL", "http://localhost:3001/contactos");
        guard.set("AGENDA_PAGE_SIZE", "5");
        guard.set("BANNER_TIMEOUT_MS", "1000");

        let config = Config::from_env().expect("config should load");
        assert_eq!(config.api_base_url, "http://localhost:3001/contactos");
        assert_eq!(config.page_size, 5);
        assert_eq!(config.banner_timeout_ms, 1000);
    }

    #[test]
    #[serial]
    fn test_config_rejects_zero_page_size() {
        let mut guard = EnvGuard::new();
        guard.set("AGENDA_API_BASE_URL", "http://localhost:3001/contactos");
        guard.set("AGENDA_PAGE_SIZE", "0");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "AGENDA_PAGE_SIZE"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_parse_env() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_AGENDA_U64", "42");

        assert_eq!(Config::parse_env("TEST_AGENDA_U64", 10u64).unwrap(), 42);
        assert_eq!(Config::parse_env("TEST_AGENDA_UNSET", 10u64).unwrap(), 10);
    }

    #[test]
    #[serial]
    fn test_parse_env_invalid() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_AGENDA_BAD", "not-a-number");

        assert!(Config::parse_env("TEST_AGENDA_BAD", 10u64).is_err());
    }
}
