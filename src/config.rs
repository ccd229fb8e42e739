use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use std::{env, fmt};

use tracing::{info, warn};

use crate::domain::ValidationMode;
use crate::engine::EngineSettings;
use crate::store::ScyllaSettings;

#[derive(Debug, thiserror::Error)]
#[error("invalid {key} value {value:?}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Scylla,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "scylla" | "scylladb" => Ok(StoreBackend::Scylla),
            other => Err(format!("expected `memory` or `scylla`, got `{other}`")),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Scylla => write!(f, "scylla"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub store_backend: StoreBackend,
    pub scylla: ScyllaSettings,
    pub store_timeout: Duration,
    pub validation_mode: ValidationMode,
}

impl Config {
    /// Read the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let timeout_ms: u64 = try_load(&lookup, "STORE_TIMEOUT_MS", "2000")?;

        Ok(Self {
            bind_addr: try_load(&lookup, "FOOD_ORDER_BIND_ADDR", "0.0.0.0:8080")?,
            store_backend: try_load(&lookup, "FOOD_ORDER_STORE", "memory")?,
            scylla: ScyllaSettings {
                node: try_load(&lookup, "SCYLLA_NODE", "127.0.0.1:9042")?,
                keyspace: try_load(&lookup, "SCYLLA_KEYSPACE", "food_order")?,
                connect_attempts: try_load(&lookup, "STORE_CONNECT_ATTEMPTS", "5")?,
            },
            store_timeout: Duration::from_millis(timeout_ms),
            validation_mode: try_load(&lookup, "VALIDATION_MODE", "lenient")?,
        })
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            mode: self.validation_mode,
            store_timeout: self.store_timeout,
        }
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError {
            key,
            value: value.clone(),
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.scylla.node, "127.0.0.1:9042");
        assert_eq!(config.scylla.keyspace, "food_order");
        assert_eq!(config.scylla.connect_attempts, 5);
        assert_eq!(config.store_timeout, Duration::from_secs(2));
        assert_eq!(config.validation_mode, ValidationMode::Lenient);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("FOOD_ORDER_STORE", "scylla"),
            ("VALIDATION_MODE", "strict"),
            ("STORE_TIMEOUT_MS", "250"),
        ])
        .unwrap();

        assert_eq!(config.store_backend, StoreBackend::Scylla);
        assert!(config.engine_settings().mode.is_strict());
        assert_eq!(config.engine_settings().store_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_malformed_values_are_errors() {
        let err = load(&[("VALIDATION_MODE", "relaxed")]).unwrap_err();
        assert_eq!(err.key, "VALIDATION_MODE");

        let err = load(&[("STORE_TIMEOUT_MS", "soon")]).unwrap_err();
        assert_eq!(err.key, "STORE_TIMEOUT_MS");

        assert!(load(&[("FOOD_ORDER_BIND_ADDR", "localhost")]).is_err());
    }
}
