// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use simsense_core::Jitter;
use std::collections::VecDeque;
use std::sync::Arc;

/// A [`Jitter`] that replays queued deltas, then yields `0` forever.
///
/// Clones share the queue, so a test can keep one clone and feed more deltas
/// after handing the other to a generator.
#[derive(Debug, Clone, Default)]
pub struct ScriptedJitter {
    deltas: Arc<Mutex<VecDeque<i32>>>,
}

impl ScriptedJitter {
    pub fn new(deltas: impl IntoIterator<Item = i32>) -> Self {
        Self {
            deltas: Arc::new(Mutex::new(deltas.into_iter().collect())),
        }
    }

    pub fn push(&self, delta: i32) {
        self.deltas.lock().push_back(delta);
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.deltas.lock().len()
    }
}

impl Jitter for ScriptedJitter {
    fn next_delta(&mut self) -> i32 {
        self.deltas.lock().pop_front().unwrap_or(0)
    }
}
