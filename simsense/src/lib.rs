// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # simsense
//!
//! Simulated observable sensors. A sensor owns one [`Reading`], walks its raw
//! value randomly inside a [`ValueRange`] on a fixed tick, and broadcasts
//! every new snapshot to any number of subscribers.
//!
//! ## Overview
//!
//! - [`SimulatedObservableValue`]: ticks on its own background task
//! - [`PolledValue`]: advances only when its owner calls `fetch`
//! - [`SensorRegistry`]: creates sensors once from a [`SimulationConfig`]
//!   and hands out handles by [`SensorId`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use simsense::{SimulatedObservableValue, ValueRange};
//!
//! #[tokio::main]
//! async fn main() -> simsense::Result<()> {
//!     let room = SimulatedObservableValue::create(25, ValueRange::new(15, 35)?)?;
//!     room.calibrate(2);
//!
//!     let mut readings = room.observe();
//!     while let Some(reading) = readings.next().await {
//!         println!("room: {reading}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod polled_value;
pub mod registry;
mod sensor_core;
pub mod simulated_value;

pub use config::{SensorConfig, SimulationConfig};
pub use polled_value::PolledValue;
pub use registry::{SensorId, SensorRegistry};
pub use sensor_core::FieldStream;
pub use simulated_value::{SimulatedObservableValue, SimulatedValueBuilder, DEFAULT_TICK_INTERVAL};

pub use simsense_core::{
    CancellationToken, Jitter, Reading, Subscription, UniformJitter, ValueRange,
};
pub use simsense_error::{Result, ResultExt, SimError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        PolledValue, Reading, SensorRegistry, SimulatedObservableValue, SimulationConfig,
        ValueRange,
    };
    pub use futures::StreamExt;
}
