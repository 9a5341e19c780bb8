//! Runtime configuration, read once from the environment at startup.

use axum::http::HeaderValue;
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_PORT: &str = "3001";
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173";
pub const DEFAULT_ACTOR_BUFFER: &str = "32";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Where `menu.json`, `orders.json` and `orderhistory.json` live. `None` keeps everything
    /// in memory.
    pub data_dir: Option<PathBuf>,
    pub allowed_origins: Vec<HeaderValue>,
    /// Request channel capacity of each actor.
    pub actor_buffer: usize,
}

impl Config {
    /// Reads the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the real environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = try_load(&lookup, "PORT", DEFAULT_PORT)?;

        let data_dir = lookup("DATA_DIR")
            .map(|dir| dir.trim().to_string())
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);
        match &data_dir {
            Some(dir) => info!(data_dir = %dir.display(), "Using file-backed stores"),
            None => warn!("DATA_DIR not set, stores are in memory only"),
        }

        let origins = var(&lookup, "CORS_ORIGINS", DEFAULT_CORS_ORIGINS);
        let allowed_origins = parse_origins(&origins)?;

        let actor_buffer: usize = try_load(&lookup, "ACTOR_BUFFER", DEFAULT_ACTOR_BUFFER)?;
        if actor_buffer == 0 {
            return Err(ConfigError::Invalid {
                key: "ACTOR_BUFFER",
                value: actor_buffer.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            port,
            data_dir,
            allowed_origins,
            actor_buffer,
        })
    }
}

fn var(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = var(lookup, key, default);
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }
    })
}

fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
                key: "CORS_ORIGINS",
                value: origin.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port, 3001);
        assert_eq!(config.data_dir, None);
        assert_eq!(config.allowed_origins, vec![HeaderValue::from_static("http://localhost:5173")]);
        assert_eq!(config.actor_buffer, 32);
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("PORT", "8080"),
            ("DATA_DIR", "/var/lib/order-desk"),
            (
                "CORS_ORIGINS",
                "http://localhost:5173, https://admin.example.com",
            ),
            ("ACTOR_BUFFER", "4"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/order-desk")));
        assert_eq!(config.allowed_origins.len(), 2);
        assert_eq!(config.allowed_origins[1], "https://admin.example.com");
        assert_eq!(config.actor_buffer, 4);
    }

    #[test]
    fn invalid_values_name_the_key() {
        let err = config(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));

        let err = config(&[("ACTOR_BUFFER", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "ACTOR_BUFFER", .. }));
    }

    #[test]
    fn blank_data_dir_means_memory() {
        assert_eq!(config(&[("DATA_DIR", "  ")]).unwrap().data_dir, None);
    }
}
