// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Explicitly passed owner of all sensors of an application.

use crate::config::{SensorConfig, SimulationConfig};
use crate::simulated_value::{SimulatedObservableValue, SimulatedValueBuilder};
use simsense_core::{CancellationToken, Jitter};
use simsense_error::{Result, SimError};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use tracing::info;

/// Key of a sensor within a [`SensorRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SensorId(String);

impl SensorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SensorId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Creates every sensor of an application once and hands out handles.
///
/// All sensors run under the registry's scope: [`shutdown`](Self::shutdown),
/// cancelling the parent scope, or dropping the registry disposes them
/// together. Consumers hold cloned handles and never own the generators.
///
/// ```rust,no_run
/// use simsense::{SensorRegistry, SimulationConfig};
///
/// # #[tokio::main]
/// # async fn main() -> simsense::Result<()> {
/// let registry = SensorRegistry::from_config(&SimulationConfig::default())?;
/// let city = registry.get("city")?;
/// city.calibrate_by(1);
/// registry.shutdown();
/// # Ok(())
/// # }
/// ```
pub struct SensorRegistry {
    scope: CancellationToken,
    sensors: BTreeMap<SensorId, SimulatedObservableValue>,
}

impl SensorRegistry {
    /// An empty registry with its own root scope.
    #[must_use]
    pub fn new() -> Self {
        Self::with_scope(&CancellationToken::new())
    }

    /// An empty registry whose scope is a child of `parent`.
    #[must_use]
    pub fn with_scope(parent: &CancellationToken) -> Self {
        Self {
            scope: parent.child_token(),
            sensors: BTreeMap::new(),
        }
    }

    /// Starts one sensor per configuration entry.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if the configuration is
    /// rejected. No sensor keeps running in that case.
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        let mut registry = Self::new();
        for sensor in &config.sensors {
            registry.insert(sensor)?;
        }
        info!(sensors = registry.len(), "sensor registry started");
        Ok(registry)
    }

    /// Starts a sensor with uniform jitter of the configured amplitude.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if the entry is invalid or
    /// its id is already registered.
    pub fn insert(&mut self, config: &SensorConfig) -> Result<SimulatedObservableValue> {
        self.start(config, |builder| builder.jitter_amplitude(config.jitter))
    }

    /// Starts a sensor with a custom delta source.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if the entry is invalid or
    /// its id is already registered.
    pub fn insert_with_jitter(
        &mut self,
        config: &SensorConfig,
        jitter: impl Jitter,
    ) -> Result<SimulatedObservableValue> {
        self.start(config, |builder| builder.jitter_source(jitter))
    }

    fn start(
        &mut self,
        config: &SensorConfig,
        with_jitter: impl FnOnce(SimulatedValueBuilder) -> SimulatedValueBuilder,
    ) -> Result<SimulatedObservableValue> {
        config.validate()?;
        let id = SensorId::new(config.id.clone());
        if self.sensors.contains_key(&id) {
            return Err(SimError::invalid_configuration(format!(
                "duplicate sensor id {id}"
            )));
        }

        let builder = SimulatedObservableValue::builder(config.range()?)
            .name(config.id.clone())
            .initial(config.initial_value()?)
            .tick_interval(config.tick_interval())
            .scope(&self.scope);
        let sensor = with_jitter(builder).build()?;

        self.sensors.insert(id, sensor.clone());
        Ok(sensor)
    }

    /// # Errors
    ///
    /// Returns [`SimError::UnknownSensor`] if no sensor is registered under `id`.
    pub fn get(&self, id: &str) -> Result<SimulatedObservableValue> {
        self.sensors
            .get(id)
            .cloned()
            .ok_or_else(|| SimError::unknown_sensor(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = &SensorId> {
        self.sensors.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SensorId, &SimulatedObservableValue)> {
        self.sensors.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    #[must_use]
    pub fn scope(&self) -> &CancellationToken {
        &self.scope
    }

    /// Disposes every sensor: all subscriptions end.
    pub fn shutdown(&self) {
        if !self.scope.is_cancelled() {
            info!(sensors = self.len(), "sensor registry shutting down");
            self.scope.cancel();
        }
    }
}

impl Default for SensorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SensorRegistry {
    fn drop(&mut self) {
        self.shutdown();
    }
}
