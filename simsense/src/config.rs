// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde::Deserialize;
use simsense_core::{ValueRange, DEFAULT_JITTER_AMPLITUDE};
use simsense_error::{Result, ResultExt, SimError};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

const DEFAULT_TICK_MS: u64 = 1000;

fn default_tick_ms() -> u64 {
    DEFAULT_TICK_MS
}

fn default_jitter() -> u32 {
    DEFAULT_JITTER_AMPLITUDE
}

/// Configuration for a single sensor
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensorConfig {
    pub id: String,
    pub lo: i32,
    pub hi: i32,
    #[serde(default)]
    pub initial: Option<i32>,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_jitter")]
    pub jitter: u32,
}

impl SensorConfig {
    /// A sensor over `[lo, hi]` with every optional field at its default.
    pub fn new(id: impl Into<String>, lo: i32, hi: i32) -> Self {
        Self {
            id: id.into(),
            lo,
            hi,
            initial: None,
            tick_ms: DEFAULT_TICK_MS,
            jitter: DEFAULT_JITTER_AMPLITUDE,
        }
    }

    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if `lo > hi`.
    pub fn range(&self) -> Result<ValueRange> {
        ValueRange::new(self.lo, self.hi)
    }

    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Starting raw value: `initial` if given, else the center of the range.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if the range is invalid or
    /// `initial` lies outside it.
    pub fn initial_value(&self) -> Result<i32> {
        let range = self.range()?;
        match self.initial {
            Some(initial) => range.check_initial(initial),
            None => Ok(range.center()),
        }
    }

    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] naming the sensor and the
    /// first rejected field.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(SimError::invalid_configuration("sensor id must not be empty"));
        }
        if self.tick_ms == 0 {
            return Err(SimError::invalid_configuration(format!(
                "sensor {}: tick_ms must be greater than zero",
                self.id
            )));
        }
        self.initial_value()
            .map(|_| ())
            .map_err(|e| SimError::invalid_configuration(format!("sensor {}: {e}", self.id)))
    }
}

/// Complete simulation configuration
///
/// ```toml
/// [[sensor]]
/// id = "room"
/// lo = 15
/// hi = 35
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    #[serde(rename = "sensor", default)]
    pub sensors: Vec<SensorConfig>,
}

impl SimulationConfig {
    /// # Errors
    ///
    /// Returns [`SimError::Config`] on malformed TOML and
    /// [`SimError::InvalidConfiguration`] on rejected values.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| SimError::config(format!("invalid simulation config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`SimError::Config`] if the file cannot be read or parsed and
    /// [`SimError::InvalidConfiguration`] on rejected values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml_str(&source)
    }

    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] for the first invalid sensor
    /// or duplicated id.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for sensor in &self.sensors {
            sensor.validate()?;
            if !seen.insert(sensor.id.as_str()) {
                return Err(SimError::invalid_configuration(format!(
                    "duplicate sensor id {}",
                    sensor.id
                )));
            }
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    /// Room, device and city temperature sensors.
    fn default() -> Self {
        Self {
            sensors: vec![
                SensorConfig::new("room", 15, 35),
                SensorConfig::new("device", 20, 60),
                SensorConfig::new("city", -5, 15),
            ],
        }
    }
}
