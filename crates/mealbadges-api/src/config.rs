//! Server configuration, read from the environment once at startup.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_EVENT_LOG_PATH: &str = "event.log";
const DEFAULT_REPLY_TIMEOUT_MS: u64 = 5_000;

/// Runtime configuration for the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interface to bind (`HOST`).
    pub host: String,
    /// Port to bind (`PORT`).
    pub port: u16,
    /// Path of the JSON Lines event log (`EVENT_LOG_PATH`).
    pub event_log_path: PathBuf,
    /// How long a query waits for the event actor (`REPLY_TIMEOUT_MS`).
    pub reply_timeout: Duration,
}

impl Config {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, applying defaults for unset keys.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a value is set but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };
        let event_log_path = lookup("EVENT_LOG_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_EVENT_LOG_PATH), PathBuf::from);
        let reply_timeout_ms = match lookup("REPLY_TIMEOUT_MS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                AppError::Config(format!("REPLY_TIMEOUT_MS must be a whole number: {e}"))
            })?,
            None => DEFAULT_REPLY_TIMEOUT_MS,
        };
        if reply_timeout_ms == 0 {
            return Err(AppError::Config(
                "REPLY_TIMEOUT_MS must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            event_log_path,
            reply_timeout: Duration::from_millis(reply_timeout_ms),
        })
    }

    /// Returns the address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.event_log_path, PathBuf::from("event.log"));
        assert_eq!(config.reply_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_values_are_read_from_lookup() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("EVENT_LOG_PATH", "/var/lib/meals/events.log"),
            ("REPLY_TIMEOUT_MS", "250"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:3000");
        assert_eq!(config.event_log_path, PathBuf::from("/var/lib/meals/events.log"));
        assert_eq!(config.reply_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_port_is_a_config_error() {
        let result = config_from(&[("PORT", "eighty")]);

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_zero_reply_timeout_is_rejected() {
        let result = config_from(&[("REPLY_TIMEOUT_MS", "0")]);

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_bad_host_fails_socket_addr() {
        let config = config_from(&[("HOST", "not a host")]).unwrap();

        assert!(matches!(config.socket_addr(), Err(AppError::Config(_))));
    }
}
