use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::errors::AppError;

pub const DEFAULT_APOLLO_BASE_URL: &str = "https://api.apollo.io/v1";
const DEFAULT_OUTPUT_DIR: &str = "./results";
const DEFAULT_LOCATION: &str = "United States";
const DEFAULT_SENIORITY: &str = "entry,junior";
const DEFAULT_LIMIT: u32 = 25;
const DEFAULT_PORT: &str = "3000";

/// Application configuration loaded from environment variables.
///
/// The Apollo key is optional at load time so the server can still start and
/// answer `/health`; every search asks for it through [`Config::api_key`].
#[derive(Clone)]
pub struct Config {
    pub apollo_api_key: Option<String>,
    pub apollo_base_url: String,
    pub output_dir: PathBuf,
    pub default_location: String,
    pub default_seniority: Vec<String>,
    pub default_limit: u32,
    /// Raw `PORT`; only `serve` parses it, through [`Config::bind_port`].
    pub port: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Config {
            apollo_api_key: lookup("APOLLO_API_KEY").filter(|k| !k.trim().is_empty()),
            apollo_base_url: lookup("APOLLO_BASE_URL")
                .unwrap_or_else(|| DEFAULT_APOLLO_BASE_URL.to_string()),
            output_dir: PathBuf::from(
                lookup("OUTPUT_DIR").unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()),
            ),
            default_location: lookup("DEFAULT_LOCATION")
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            default_seniority: lookup("DEFAULT_SENIORITY")
                .unwrap_or_else(|| DEFAULT_SENIORITY.to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            // DEFAULT_LIMIT falls back silently, like an unset value.
            default_limit: lookup("DEFAULT_LIMIT")
                .and_then(|v| v.trim().parse::<u32>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_LIMIT),
            port: lookup("PORT").unwrap_or_else(|| DEFAULT_PORT.to_string()),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        }
    }

    pub fn bind_port(&self) -> Result<u16> {
        self.port
            .trim()
            .parse::<u16>()
            .context("PORT must be a valid port number")
    }

    /// Returns the Apollo credential, or a configuration error when it is unset.
    pub fn api_key(&self) -> Result<&str, AppError> {
        self.apollo_api_key
            .as_deref()
            .ok_or_else(|| AppError::NotConfigured("Apollo API key not configured".to_string()))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "apollo_api_key",
                &self.apollo_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("apollo_base_url", &self.apollo_base_url)
            .field("output_dir", &self.output_dir)
            .field("default_location", &self.default_location)
            .field("default_seniority", &self.default_seniority)
            .field("default_limit", &self.default_limit)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_env_is_empty() {
        let config = config_from(&[]);
        assert!(config.apollo_api_key.is_none());
        assert_eq!(config.apollo_base_url, DEFAULT_APOLLO_BASE_URL);
        assert_eq!(config.output_dir, PathBuf::from("./results"));
        assert_eq!(config.default_location, "United States");
        assert_eq!(config.default_seniority, vec!["entry", "junior"]);
        assert_eq!(config.default_limit, 25);
        assert_eq!(config.bind_port().unwrap(), 3000);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_missing_key_is_not_configured_error() {
        let config = config_from(&[]);
        let err = config.api_key().unwrap_err();
        assert!(matches!(err, AppError::NotConfigured(_)));
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let config = config_from(&[("APOLLO_API_KEY", "   ")]);
        assert!(config.api_key().is_err());
    }

    #[test]
    fn test_present_key_is_returned() {
        let config = config_from(&[("APOLLO_API_KEY", "abc123")]);
        assert_eq!(config.api_key().unwrap(), "abc123");
    }

    #[test]
    fn test_unparseable_limit_falls_back_to_default() {
        let config = config_from(&[("DEFAULT_LIMIT", "lots")]);
        assert_eq!(config.default_limit, 25);
    }

    #[test]
    fn test_seniority_csv_is_split_and_trimmed() {
        let config = config_from(&[("DEFAULT_SENIORITY", "entry, associate ,")]);
        assert_eq!(config.default_seniority, vec!["entry", "associate"]);
    }

    #[test]
    fn test_invalid_port_fails_only_when_binding() {
        let config = config_from(&[("PORT", "not-a-port"), ("APOLLO_API_KEY", "abc123")]);
        assert_eq!(config.api_key().unwrap(), "abc123");
        assert!(config.bind_port().is_err());
    }

    #[test]
    fn test_custom_port_is_parsed() {
        assert_eq!(config_from(&[("PORT", "8080")]).bind_port().unwrap(), 8080);
    }

    #[test]
    fn test_debug_output_redacts_key() {
        let config = config_from(&[("APOLLO_API_KEY", "super-secret")]);
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
