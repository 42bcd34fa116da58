// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;
use simsense_error::{Result, SimError};

/// Closed interval `[lo, hi]` a simulated raw value is confined to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueRange {
    lo: i32,
    hi: i32,
}

impl ValueRange {
    /// Creates a range, rejecting `lo > hi`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if the bounds are inverted.
    pub fn new(lo: i32, hi: i32) -> Result<Self> {
        if lo > hi {
            return Err(SimError::invalid_configuration(format!(
                "range lower bound {lo} exceeds upper bound {hi}"
            )));
        }
        Ok(Self { lo, hi })
    }

    #[must_use]
    pub const fn lo(&self) -> i32 {
        self.lo
    }

    #[must_use]
    pub const fn hi(&self) -> i32 {
        self.hi
    }

    #[must_use]
    pub const fn contains(&self, value: i32) -> bool {
        self.lo <= value && value <= self.hi
    }

    #[must_use]
    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.lo, self.hi)
    }

    /// Midpoint rounded towards `lo`; the default starting value of a sensor.
    #[must_use]
    pub const fn center(&self) -> i32 {
        let lo = self.lo as i64;
        let hi = self.hi as i64;
        (lo + (hi - lo) / 2) as i32
    }

    /// One random-walk step: `clamp(raw + delta)`.
    #[must_use]
    pub fn step(&self, raw: i32, delta: i32) -> i32 {
        self.clamp(raw.saturating_add(delta))
    }

    /// Accepts `initial` only if it lies within the range.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if `initial` is outside.
    pub fn check_initial(&self, initial: i32) -> Result<i32> {
        if self.contains(initial) {
            Ok(initial)
        } else {
            Err(SimError::invalid_configuration(format!(
                "initial value {initial} outside {self}"
            )))
        }
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}
