// src/config.rs
use std::env;
use std::str::FromStr;

use thiserror::Error;

use crate::paragraph::{DEFAULT_MAIN_LIMIT, DEFAULT_SECONDARY_LIMIT};

const DEFAULT_JSON_PAYLOAD_LIMIT: usize = 4 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Limits used when a request does not pass its own
    pub default_main_limit: i64,
    pub default_secondary_limit: i64,
    pub json_payload_limit: usize,
    pub workers: Option<usize>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3010,
            default_main_limit: DEFAULT_MAIN_LIMIT,
            default_secondary_limit: DEFAULT_SECONDARY_LIMIT,
            json_payload_limit: DEFAULT_JSON_PAYLOAD_LIMIT,
            workers: None,
        }
    }
}

impl ApiConfig {
    /// Loads `.env` (unless `NO_DOTENV=true`) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let skip_dotenv = env::var("NO_DOTENV")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(false);
        if !skip_dotenv {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            host: lookup("BACKEND_HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "BACKEND_PORT", defaults.port)?,
            default_main_limit: parse_or(&lookup, "DEFAULT_MAIN_LIMIT", defaults.default_main_limit)?,
            default_secondary_limit: parse_or(
                &lookup,
                "DEFAULT_SECONDARY_LIMIT",
                defaults.default_secondary_limit,
            )?,
            json_payload_limit: parse_or(&lookup, "JSON_PAYLOAD_LIMIT", defaults.json_payload_limit)?,
            workers: match lookup("ACTIX_WORKERS") {
                Some(raw) => Some(parse_value("ACTIX_WORKERS", &raw)?),
                None => None,
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:3010");
        assert_eq!(config.default_main_limit, 1200);
        assert_eq!(config.default_secondary_limit, 800);
        assert_eq!(config.json_payload_limit, 4 * 1024 * 1024);
        assert_eq!(config.workers, None);
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            ("BACKEND_HOST", "0.0.0.0"),
            ("BACKEND_PORT", "8080"),
            ("DEFAULT_MAIN_LIMIT", "20"),
            ("DEFAULT_SECONDARY_LIMIT", " 10 "),
            ("ACTIX_WORKERS", "2"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.default_main_limit, 20);
        assert_eq!(config.default_secondary_limit, 10);
        assert_eq!(config.workers, Some(2));
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = ApiConfig::from_lookup(lookup_from(&[("BACKEND_PORT", "http")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "BACKEND_PORT".to_string(),
                value: "http".to_string()
            }
        );
    }
}
