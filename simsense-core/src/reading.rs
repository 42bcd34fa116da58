// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;

/// A sensor snapshot: the simulated raw value and the user-applied bias.
///
/// Readings are `Copy` and never mutated in place; every update produces a
/// new snapshot that replaces the previous one as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Reading {
    pub raw_value: i32,
    pub bias: i32,
}

impl Reading {
    #[must_use]
    pub const fn new(raw_value: i32, bias: i32) -> Self {
        Self { raw_value, bias }
    }

    /// `raw_value + bias`, widened so that no bias can overflow it.
    #[must_use]
    pub const fn calibrated_value(&self) -> i64 {
        self.raw_value as i64 + self.bias as i64
    }

    /// Same raw value, different bias.
    #[must_use]
    pub const fn with_bias(self, bias: i32) -> Self {
        Self {
            raw_value: self.raw_value,
            bias,
        }
    }

    /// Same bias, different raw value.
    #[must_use]
    pub const fn with_raw_value(self, raw_value: i32) -> Self {
        Self {
            raw_value,
            bias: self.bias,
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({};{})",
            self.calibrated_value(),
            self.raw_value,
            self.bias
        )
    }
}
