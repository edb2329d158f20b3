//! Runtime configuration, read from environment variables at startup.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `BLOCKFALL_SEED` | unset (OS entropy) | Seed for the shape sequencer |
//! | `BLOCKFALL_GRAVITY_TICKS` | 36 | Frames between gravity steps |
//! | `BLOCKFALL_TICK_MS` | 16 | Frame interval in milliseconds |
//!
//! Unset or blank variables fall back to the default; anything else must parse.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::engine::EngineConfig;
use crate::types::{GRAVITY_TICKS, TICK_MS};

pub const SEED_VAR: &str = "BLOCKFALL_SEED";
pub const GRAVITY_TICKS_VAR: &str = "BLOCKFALL_GRAVITY_TICKS";
pub const TICK_MS_VAR: &str = "BLOCKFALL_TICK_MS";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be an unsigned integer, got {value:?}")]
    NotANumber { var: &'static str, value: String },
    #[error("{var} must be at least 1")]
    Zero { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seed: Option<u64>,
    pub gravity_ticks: u32,
    pub tick_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            gravity_ticks: GRAVITY_TICKS,
            tick_ms: TICK_MS as u64,
        }
    }
}

impl Config {
    /// Create from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Create from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let seed = read::<u64>(&lookup, SEED_VAR)?;
        let gravity_ticks =
            read::<u32>(&lookup, GRAVITY_TICKS_VAR)?.unwrap_or(defaults.gravity_ticks);
        let tick_ms = read::<u64>(&lookup, TICK_MS_VAR)?.unwrap_or(defaults.tick_ms);

        if gravity_ticks == 0 {
            return Err(ConfigError::Zero {
                var: GRAVITY_TICKS_VAR,
            });
        }
        if tick_ms == 0 {
            return Err(ConfigError::Zero { var: TICK_MS_VAR });
        }

        Ok(Self {
            seed,
            gravity_ticks,
            tick_ms,
        })
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            gravity_ticks: self.gravity_ticks,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

fn read<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::NotANumber {
            var,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(Config::from_lookup(lookup(&[])), Ok(Config::default()));
    }

    #[test]
    fn values_are_parsed() {
        let config = Config::from_lookup(lookup(&[
            (SEED_VAR, "42"),
            (GRAVITY_TICKS_VAR, " 10 "),
            (TICK_MS_VAR, "20"),
        ]))
        .unwrap();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.engine_config().gravity_ticks, 10);
        assert_eq!(config.tick_interval(), Duration::from_millis(20));
    }

    #[test]
    fn blank_value_is_unset() {
        let config = Config::from_lookup(lookup(&[(SEED_VAR, "  ")])).unwrap();
        assert_eq!(config.seed, None);
    }

    #[test]
    fn garbage_is_rejected() {
        let err = Config::from_lookup(lookup(&[(TICK_MS_VAR, "fast")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::NotANumber {
                var: TICK_MS_VAR,
                value: "fast".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "BLOCKFALL_TICK_MS must be an unsigned integer, got \"fast\""
        );
    }

    #[test]
    fn zero_gravity_is_rejected() {
        let err = Config::from_lookup(lookup(&[(GRAVITY_TICKS_VAR, "0")])).unwrap_err();
        assert_eq!(err, ConfigError::Zero { var: GRAVITY_TICKS_VAR });
    }
}
