//! # World Configuration
//!
//! Everything the core needs from world setup: the domain size, the tick
//! rate and the handful of tuning constants used by collision handling.
//! Configs are usually loaded from JSON; every field has a default so a
//! file only needs to name what it changes.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Accepted range for `tick_rate`, in ticks per second.
pub const TICK_RATE_RANGE: std::ops::RangeInclusive<f32> = 0.01..=10_000.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Half-width `S` of the toroidal domain `[-S, S]^3`.
    pub half_width: f32,
    /// Logic ticks per second.
    pub tick_rate: f32,
    /// Sanity ceiling on body speed, in units per second. A body over it
    /// faults the tick. An elastic bounce off a much heavier body can send
    /// a light one away at up to twice the heavy one's speed, so set this
    /// above twice the fastest speed gameplay expects.
    pub max_speed: f32,
    /// Push attempts `separate_from` makes before giving up.
    pub separation_retries: u32,
    /// Fraction of a ship's radius used as its collision margin.
    pub ship_margin_factor: f32,
    /// Rocks at least this large split instead of vanishing.
    pub rock_split_min_size: f32,
    pub rock_fragments: u32,
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            half_width: 10_000.0,
            tick_rate: 25.0,
            max_speed: 5_000.0,
            separation_retries: 8,
            ship_margin_factor: 0.25,
            rock_split_min_size: 4.0,
            rock_fragments: 3,
            seed: 0x5EED,
        }
    }
}

impl WorldConfig {
    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`WorldConfig::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &str, v: f32) -> Result<(), ConfigError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be positive and finite, got {v}")))
            }
        }

        positive("half_width", self.half_width)?;
        positive("tick_rate", self.tick_rate)?;
        if !TICK_RATE_RANGE.contains(&self.tick_rate) {
            return Err(ConfigError::Invalid(format!(
                "tick_rate must be within {:?}, got {}",
                TICK_RATE_RANGE, self.tick_rate
            )));
        }
        positive("max_speed", self.max_speed)?;
        positive("rock_split_min_size", self.rock_split_min_size)?;
        if !(self.ship_margin_factor > 0.0 && self.ship_margin_factor <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "ship_margin_factor must be in (0, 1], got {}",
                self.ship_margin_factor
            )));
        }
        if self.rock_fragments < 2 {
            return Err(ConfigError::Invalid("rock_fragments must be at least 2".into()));
        }
        Ok(())
    }

    /// Seconds of simulated time per tick.
    #[must_use]
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.tick_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = WorldConfig::from_json(r#"{ "half_width": 500.0 }"#).unwrap();
        assert!((config.half_width - 500.0).abs() < f32::EPSILON);
        assert!((config.tick_rate - 25.0).abs() < f32::EPSILON);
        assert_eq!(config.rock_fragments, 3);
    }

    #[test]
    fn rejects_non_positive_tick_rate() {
        let err = WorldConfig::from_json(r#"{ "tick_rate": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{err}");
    }

    #[test]
    fn rejects_tick_rates_outside_the_range() {
        for json in [r#"{ "tick_rate": 1e-30 }"#, r#"{ "tick_rate": 1e9 }"#] {
            let err = WorldConfig::from_json(json).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("tick_rate")), "{err}");
        }
        let slow = WorldConfig { tick_rate: *TICK_RATE_RANGE.start(), ..WorldConfig::default() };
        assert!(slow.validate().is_ok());
    }

    #[test]
    fn rejects_bad_margin() {
        let config = WorldConfig { ship_margin_factor: 1.5, ..WorldConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn reports_parse_errors() {
        let err = WorldConfig::from_json("{ half_width: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn tick_seconds_is_reciprocal_rate() {
        let config = WorldConfig::default();
        assert!((config.tick_seconds() - 0.04).abs() < 1e-6);
    }
}
