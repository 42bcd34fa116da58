// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Sensor that only advances when its owner asks for a new value.

use crate::sensor_core::{FieldStream, SensorCore};
use parking_lot::Mutex;
use simsense_core::{Jitter, Reading, Subscription, UniformJitter, ValueRange};
use simsense_error::Result;
use std::sync::Arc;

/// The poll-mode twin of [`SimulatedObservableValue`](crate::SimulatedObservableValue).
///
/// No background task: every [`fetch`](Self::fetch) performs exactly one
/// random-walk step. Subscribers are notified the same way as for the
/// ticking sensor.
#[derive(Clone)]
pub struct PolledValue {
    core: SensorCore,
    jitter: Arc<Mutex<Box<dyn Jitter>>>,
}

impl PolledValue {
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`](simsense_error::SimError::InvalidConfiguration)
    /// if `initial_raw` is outside `range`.
    pub fn create(initial_raw: i32, range: ValueRange) -> Result<Self> {
        Self::with_jitter("sensor", initial_raw, range, UniformJitter::default())
    }

    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`](simsense_error::SimError::InvalidConfiguration)
    /// if `initial_raw` is outside `range`.
    pub fn with_jitter(
        name: &str,
        initial_raw: i32,
        range: ValueRange,
        jitter: impl Jitter,
    ) -> Result<Self> {
        let jitter: Box<dyn Jitter> = Box::new(jitter);
        Ok(Self {
            core: SensorCore::new(name, range, initial_raw)?,
            jitter: Arc::new(Mutex::new(jitter)),
        })
    }

    /// Advances the simulation by one step and returns the new snapshot.
    pub fn fetch(&self) -> Reading {
        let mut jitter = self.jitter.lock();
        self.core.tick(jitter.next_delta())
    }

    #[must_use]
    pub fn current_reading(&self) -> Reading {
        self.core.current_reading()
    }

    pub fn observe(&self) -> Subscription<Reading> {
        self.core.observe()
    }

    pub fn observe_calibrated(&self) -> FieldStream<i64> {
        self.core.observe_calibrated()
    }

    pub fn calibrate(&self, new_bias: i32) -> Reading {
        self.core.calibrate(new_bias)
    }

    pub fn calibrate_by(&self, delta: i32) -> Reading {
        self.core.calibrate_by(delta)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.core.name()
    }

    #[must_use]
    pub fn range(&self) -> ValueRange {
        self.core.range()
    }
}
