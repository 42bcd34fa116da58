// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Per-tick deltas for the random walk.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Maximum absolute delta drawn per tick unless configured otherwise.
pub const DEFAULT_JITTER_AMPLITUDE: u32 = 2;

/// A source of random-walk deltas, consulted once per tick.
///
/// Closures returning `i32` are sources too, which keeps deterministic
/// schedules in tests short:
///
/// ```
/// use simsense_core::Jitter;
///
/// let mut always_up = || 1;
/// assert_eq!(always_up.next_delta(), 1);
/// ```
pub trait Jitter: Send + 'static {
    fn next_delta(&mut self) -> i32;
}

impl<F> Jitter for F
where
    F: FnMut() -> i32 + Send + 'static,
{
    fn next_delta(&mut self) -> i32 {
        self()
    }
}

/// Uniform integer deltas in `[-amplitude, amplitude]`.
#[derive(Debug, Clone)]
pub struct UniformJitter {
    amplitude: i32,
    rng: StdRng,
}

impl UniformJitter {
    /// Seeds from the operating system.
    #[must_use]
    pub fn new(amplitude: u32) -> Self {
        Self::with_rng(amplitude, StdRng::from_os_rng())
    }

    /// Reproducible sequence for a given seed.
    #[must_use]
    pub fn seeded(amplitude: u32, seed: u64) -> Self {
        Self::with_rng(amplitude, StdRng::seed_from_u64(seed))
    }

    fn with_rng(amplitude: u32, rng: StdRng) -> Self {
        Self {
            amplitude: i32::try_from(amplitude).unwrap_or(i32::MAX),
            rng,
        }
    }

    #[must_use]
    pub const fn amplitude(&self) -> u32 {
        self.amplitude as u32
    }
}

impl Default for UniformJitter {
    fn default() -> Self {
        Self::new(DEFAULT_JITTER_AMPLITUDE)
    }
}

impl Jitter for UniformJitter {
    fn next_delta(&mut self) -> i32 {
        if self.amplitude == 0 {
            return 0;
        }
        self.rng.random_range(-self.amplitude..=self.amplitude)
    }
}
