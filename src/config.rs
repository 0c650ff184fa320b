//! Process configuration read from `CRIBBAGE_*` environment variables.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

pub const BIND_ADDR_VAR: &str = "CRIBBAGE_BIND_ADDR";
pub const EVENT_CAPACITY_VAR: &str = "CRIBBAGE_EVENT_CAPACITY";
pub const NPC_DELAY_VAR: &str = "CRIBBAGE_NPC_DELAY_MS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Buffered events per game before slow subscribers start missing some
    pub event_capacity: usize,
    /// How long automated players wait before moving
    pub npc_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            event_capacity: 100,
            npc_delay: Duration::from_millis(250),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the config from `lookup`, falling back to defaults for
    /// anything unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bind_addr = match lookup(BIND_ADDR_VAR) {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                var: BIND_ADDR_VAR,
                expected: "a socket address like 0.0.0.0:3000",
                value,
            })?,
            None => defaults.bind_addr,
        };

        let event_capacity = match lookup(EVENT_CAPACITY_VAR) {
            Some(value) => match value.parse::<usize>() {
                Ok(capacity) if capacity > 0 => capacity,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: EVENT_CAPACITY_VAR,
                        expected: "a positive integer",
                        value,
                    })
                }
            },
            None => defaults.event_capacity,
        };

        let npc_delay = match lookup(NPC_DELAY_VAR) {
            Some(value) => value
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::Invalid {
                    var: NPC_DELAY_VAR,
                    expected: "a number of milliseconds",
                    value,
                })?,
            None => defaults.npc_delay,
        };

        Ok(Self {
            bind_addr,
            event_capacity,
            npc_delay,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn unset_variables_use_defaults() {
        assert_eq!(config_from(&[]).unwrap(), AppConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = config_from(&[
            (BIND_ADDR_VAR, "127.0.0.1:8080"),
            (EVENT_CAPACITY_VAR, "8"),
            (NPC_DELAY_VAR, "0"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.event_capacity, 8);
        assert_eq!(config.npc_delay, Duration::ZERO);
    }

    #[test]
    fn malformed_values_are_errors() {
        assert!(config_from(&[(BIND_ADDR_VAR, "localhost")]).is_err());
        assert!(config_from(&[(EVENT_CAPACITY_VAR, "0")]).is_err());
        assert_eq!(
            config_from(&[(NPC_DELAY_VAR, "soon")]),
            Err(ConfigError::Invalid {
                var: NPC_DELAY_VAR,
                expected: "a number of milliseconds",
                value: "soon".into(),
            })
        );
    }
}
