// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Sensor that advances on its own fixed tick.

use crate::sensor_core::{FieldStream, SensorCore};
use simsense_core::{
    CancellationToken, Jitter, Reading, Subscription, TickTask, UniformJitter, ValueRange,
    DEFAULT_JITTER_AMPLITUDE,
};
use simsense_error::{Result, SimError};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::select;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::info;

/// Period between two random-walk steps unless configured otherwise.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// A reading that walks randomly inside a range, one step per tick, and
/// broadcasts every new snapshot to all subscribers.
///
/// The tick loop starts on construction and runs until the owning scope is
/// cancelled or the last handle is dropped. From then on all subscriptions
/// end and new ones finish immediately; [`current_reading`](Self::current_reading)
/// and [`calibrate`](Self::calibrate) keep working on the final snapshot.
///
/// Handles are cheap to clone and all refer to the same generator.
///
/// Must be created inside a Tokio runtime.
#[derive(Clone)]
pub struct SimulatedObservableValue {
    inner: Arc<Inner>,
}

struct Inner {
    core: SensorCore,
    tick_interval: Duration,
    _task: TickTask,
}

impl SimulatedObservableValue {
    /// Starts a generator at `initial_raw` with bias `0`, the default tick
    /// interval and uniform `[-2, 2]` jitter.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if `initial_raw` is outside `range`.
    pub fn create(initial_raw: i32, range: ValueRange) -> Result<Self> {
        Self::builder(range).initial(initial_raw).build()
    }

    #[must_use]
    pub fn builder(range: ValueRange) -> SimulatedValueBuilder {
        SimulatedValueBuilder::new(range)
    }

    /// Latest snapshot. Never blocks.
    #[must_use]
    pub fn current_reading(&self) -> Reading {
        self.inner.core.current_reading()
    }

    /// Stream of snapshots: the latest one immediately, then every update.
    pub fn observe(&self) -> Subscription<Reading> {
        self.inner.core.observe()
    }

    pub fn observe_raw(&self) -> FieldStream<i32> {
        self.inner.core.observe_raw()
    }

    pub fn observe_bias(&self) -> FieldStream<i32> {
        self.inner.core.observe_bias()
    }

    pub fn observe_calibrated(&self) -> FieldStream<i64> {
        self.inner.core.observe_calibrated()
    }

    /// Replaces the bias and publishes the result immediately.
    pub fn calibrate(&self, new_bias: i32) -> Reading {
        self.inner.core.calibrate(new_bias)
    }

    /// Shifts the bias by `delta` in one atomic step.
    pub fn calibrate_by(&self, delta: i32) -> Reading {
        self.inner.core.calibrate_by(delta)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.inner.core.name()
    }

    #[must_use]
    pub fn range(&self) -> ValueRange {
        self.inner.core.range()
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.inner.tick_interval
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.core.subscriber_count()
    }
}

impl fmt::Debug for SimulatedObservableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedObservableValue")
            .field("name", &self.name())
            .field("range", &self.range())
            .field("tick_interval", &self.inner.tick_interval)
            .field("reading", &self.current_reading())
            .finish()
    }
}

/// Configures and starts a [`SimulatedObservableValue`].
///
/// ```rust,no_run
/// use simsense::{CancellationToken, SimulatedObservableValue, ValueRange};
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> simsense::Result<()> {
/// let app_scope = CancellationToken::new();
/// let city = SimulatedObservableValue::builder(ValueRange::new(-5, 15)?)
///     .name("city")
///     .tick_interval(Duration::from_millis(500))
///     .scope(&app_scope)
///     .build()?;
///
/// assert_eq!(city.current_reading().raw_value, 5);
/// app_scope.cancel();
/// # Ok(())
/// # }
/// ```
pub struct SimulatedValueBuilder {
    range: ValueRange,
    name: String,
    initial: Option<i32>,
    tick_interval: Duration,
    jitter: Option<Box<dyn Jitter>>,
    amplitude: u32,
    scope: Option<CancellationToken>,
}

impl SimulatedValueBuilder {
    fn new(range: ValueRange) -> Self {
        Self {
            range,
            name: "sensor".to_string(),
            initial: None,
            tick_interval: DEFAULT_TICK_INTERVAL,
            jitter: None,
            amplitude: DEFAULT_JITTER_AMPLITUDE,
            scope: None,
        }
    }

    /// Label used in log events.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Starting raw value; defaults to the center of the range.
    #[must_use]
    pub fn initial(mut self, initial: i32) -> Self {
        self.initial = Some(initial);
        self
    }

    #[must_use]
    pub fn tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    /// Maximum absolute delta of the default uniform jitter.
    #[must_use]
    pub fn jitter_amplitude(mut self, amplitude: u32) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Replaces the uniform jitter with a custom delta source.
    #[must_use]
    pub fn jitter_source(mut self, jitter: impl Jitter) -> Self {
        self.jitter = Some(Box::new(jitter));
        self
    }

    /// Binds the tick loop to the owner's scope; cancelling it disposes the sensor.
    #[must_use]
    pub fn scope(mut self, scope: &CancellationToken) -> Self {
        self.scope = Some(scope.clone());
        self
    }

    /// Validates the configuration and starts the tick loop.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if the initial value is
    /// outside the range or the tick interval is zero or too large to schedule.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn build(self) -> Result<SimulatedObservableValue> {
        if self.tick_interval.is_zero() {
            return Err(SimError::invalid_configuration(format!(
                "sensor {}: tick interval must be greater than zero",
                self.name
            )));
        }
        // the loop schedules its first deadline one period ahead, then one more
        let now = Instant::now();
        if now
            .checked_add(self.tick_interval)
            .and_then(|first| first.checked_add(self.tick_interval))
            .is_none()
        {
            return Err(SimError::invalid_configuration(format!(
                "sensor {}: tick interval {:?} is too large",
                self.name, self.tick_interval
            )));
        }

        let initial = self.initial.unwrap_or_else(|| self.range.center());
        let core = SensorCore::new(self.name, self.range, initial)?;
        let jitter = self
            .jitter
            .unwrap_or_else(|| Box::new(UniformJitter::new(self.amplitude)));
        let scope = self.scope.unwrap_or_default();
        let period = self.tick_interval;

        let loop_core = core.clone();
        let task = TickTask::spawn(&scope, move |cancel| run(loop_core, jitter, period, cancel));

        Ok(SimulatedObservableValue {
            inner: Arc::new(Inner {
                core,
                tick_interval: period,
                _task: task,
            }),
        })
    }
}

async fn run(
    core: SensorCore,
    mut jitter: Box<dyn Jitter>,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        sensor = core.name(),
        range = %core.range(),
        reading = %core.current_reading(),
        ?period,
        "simulation started"
    );

    loop {
        select! {
            biased;
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {
                core.tick(jitter.next_delta());
            }
        }
    }

    core.dispose();
    info!(sensor = core.name(), reading = %core.current_reading(), "simulation stopped");
}
