// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Short-lived consumer of one sensor: prints calibrated values until the
//! sensor is disposed or the monitor is stopped.

use futures::StreamExt;
use simsense::{CancellationToken, SensorId, SimulatedObservableValue};
use tokio::select;
use tokio::task::JoinHandle;

pub struct SensorMonitor {
    id: SensorId,
    sensor: SimulatedObservableValue,
    cancel_token: CancellationToken,
    task_handle: Option<JoinHandle<usize>>,
}

impl SensorMonitor {
    pub fn new(id: SensorId, sensor: SimulatedObservableValue, cancel_token: CancellationToken) -> Self {
        Self {
            id,
            sensor,
            cancel_token,
            task_handle: None,
        }
    }

    pub fn start(&mut self) {
        let id = self.id.clone();
        let sensor = self.sensor.clone();
        let cancel_token = self.cancel_token.clone();
        let handle = tokio::spawn(async move { Self::run(id, sensor, cancel_token).await });
        self.task_handle = Some(handle);
    }

    /// Nudges the bias the way a "+1" button would.
    pub fn calibrate(&self, delta: i32) {
        let reading = self.sensor.calibrate_by(delta);
        println!("  [{}] calibrated by {delta:+}: {reading}", self.id);
    }

    /// Waits for the monitor to finish and returns how many values it printed.
    pub async fn join(&mut self) -> usize {
        match self.task_handle.take() {
            Some(handle) => handle.await.unwrap_or(0),
            None => 0,
        }
    }

    async fn run(id: SensorId, sensor: SimulatedObservableValue, cancel_token: CancellationToken) -> usize {
        let mut values = sensor.observe_calibrated();
        let mut seen = 0;

        loop {
            select! {
                value = values.next() => match value {
                    Some(value) => {
                        seen += 1;
                        println!("  [{id}] {value}");
                    }
                    None => break,
                },
                () = cancel_token.cancelled() => break,
            }
        }

        tracing::debug!(sensor = %id, seen, "monitor finished");
        seen
    }
}
