// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! State shared by every sensor flavour: the snapshot holder and the
//! operations on it.

use futures::stream::{Map, StreamExt};
use simsense_core::{
    DistinctUntilChanged, DistinctUntilChangedExt, Reading, StateSubject, Subscription, ValueRange,
};
use simsense_error::Result;
use std::sync::Arc;
use tracing::debug;

/// A single field of a reading, with consecutive duplicates removed.
pub type FieldStream<T> = DistinctUntilChanged<Map<Subscription<Reading>, fn(Reading) -> T>>;

/// Snapshot holder plus the operations every sensor exposes.
///
/// Cloning is cheap and yields a handle to the same sensor.
#[derive(Debug, Clone)]
pub(crate) struct SensorCore {
    name: Arc<str>,
    range: ValueRange,
    subject: StateSubject<Reading>,
}

impl SensorCore {
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`](simsense_error::SimError::InvalidConfiguration)
    /// if `initial` lies outside `range`.
    pub(crate) fn new(name: impl Into<Arc<str>>, range: ValueRange, initial: i32) -> Result<Self> {
        let initial = range.check_initial(initial)?;
        Ok(Self {
            name: name.into(),
            range,
            subject: StateSubject::new(Reading::new(initial, 0)),
        })
    }

    #[must_use]
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub(crate) const fn range(&self) -> ValueRange {
        self.range
    }

    #[must_use]
    pub(crate) fn current_reading(&self) -> Reading {
        self.subject.current()
    }

    pub(crate) fn observe(&self) -> Subscription<Reading> {
        self.subject.subscribe()
    }

    pub(crate) fn observe_raw(&self) -> FieldStream<i32> {
        self.observe_field(|r| r.raw_value)
    }

    pub(crate) fn observe_bias(&self) -> FieldStream<i32> {
        self.observe_field(|r| r.bias)
    }

    pub(crate) fn observe_calibrated(&self) -> FieldStream<i64> {
        self.observe_field(|r| r.calibrated_value())
    }

    fn observe_field<T>(&self, field: fn(Reading) -> T) -> FieldStream<T>
    where
        T: PartialEq + Clone,
    {
        self.observe().map(field).distinct_until_changed()
    }

    /// Replaces the bias; the raw value is untouched.
    pub(crate) fn calibrate(&self, new_bias: i32) -> Reading {
        self.publish("calibration", |r| r.with_bias(new_bias))
    }

    /// Shifts the bias by `delta`, saturating at the `i32` bounds.
    pub(crate) fn calibrate_by(&self, delta: i32) -> Reading {
        self.publish("calibration", |r| r.with_bias(r.bias.saturating_add(delta)))
    }

    /// One random-walk step of the raw value; the bias is preserved.
    pub(crate) fn tick(&self, delta: i32) -> Reading {
        let range = self.range;
        self.publish("value", |r| {
            r.with_raw_value(range.step(r.raw_value, delta))
        })
    }

    #[must_use]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.subject.subscriber_count()
    }

    /// Ends every subscription. Later updates still change the snapshot.
    pub(crate) fn dispose(&self) {
        self.subject.close();
    }

    fn publish<F>(&self, what: &'static str, f: F) -> Reading
    where
        F: FnOnce(&Reading) -> Reading,
    {
        match self.subject.update(f) {
            Ok(reading) => {
                debug!(
                    sensor = %self.name,
                    raw = reading.raw_value,
                    bias = reading.bias,
                    calibrated = reading.calibrated_value(),
                    "new {what}"
                );
                reading
            }
            Err(_) => {
                let reading = self.subject.current();
                debug!(sensor = %self.name, %reading, "new {what} not published: sensor disposed");
                reading
            }
        }
    }
}
