// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core building blocks for simulated observable sensors.
//!
//! - [`Reading`]: immutable `{raw_value, bias}` snapshot
//! - [`ValueRange`]: the closed interval a raw value walks in
//! - [`Jitter`]: source of per-tick deltas ([`UniformJitter`] by default)
//! - [`StateSubject`]: latest-value broadcast with explicit subscriptions
//! - [`TickTask`]: cancellable background task bound to an owner scope

pub mod distinct_until_changed;
pub mod jitter;
pub mod reading;
pub mod state_subject;
pub mod subscription;
pub mod tick_task;
pub mod value_range;

pub use self::distinct_until_changed::{DistinctUntilChanged, DistinctUntilChangedExt};
pub use self::jitter::{Jitter, UniformJitter, DEFAULT_JITTER_AMPLITUDE};
pub use self::reading::Reading;
pub use self::state_subject::StateSubject;
pub use self::subscription::Subscription;
pub use self::tick_task::TickTask;
pub use self::value_range::ValueRange;
pub use simsense_error::{Result, ResultExt, SimError};
pub use tokio_util::sync::CancellationToken;
