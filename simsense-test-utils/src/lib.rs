// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for simsense.
//!
//! - [`ScriptedJitter`]: deterministic deltas, pushed from the test body
//! - [`helpers`]: assertions over reading streams under paused Tokio time
//! - [`test_data`]: the ranges used across the test suites

pub mod helpers;
pub mod scripted_jitter;
pub mod test_data;

pub use scripted_jitter::ScriptedJitter;
