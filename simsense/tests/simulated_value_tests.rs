// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use simsense::{
    CancellationToken, Reading, SimError, SimulatedObservableValue, UniformJitter, ValueRange,
    DEFAULT_TICK_INTERVAL,
};
use simsense_test_utils::helpers::{
    assert_no_element_emitted, expect_next_reading, expect_next_value, expect_stream_end,
};
use simsense_test_utils::test_data::{city_range, room_range};
use simsense_test_utils::ScriptedJitter;
use std::time::Duration;

fn scripted(initial: i32, range: ValueRange, deltas: &[i32]) -> SimulatedObservableValue {
    SimulatedObservableValue::builder(range)
        .initial(initial)
        .jitter_source(ScriptedJitter::new(deltas.iter().copied()))
        .build()
        .expect("valid sensor")
}

#[tokio::test(start_paused = true)]
async fn test_create_starts_at_initial_value_without_bias() -> anyhow::Result<()> {
    // Arrange & Act
    let sensor = SimulatedObservableValue::create(25, room_range())?;

    // Assert
    assert_eq!(sensor.current_reading(), Reading::new(25, 0));
    assert_eq!(sensor.tick_interval(), DEFAULT_TICK_INTERVAL);
    assert_eq!(sensor.range(), room_range());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_create_accepts_range_bounds() -> anyhow::Result<()> {
    assert_eq!(
        SimulatedObservableValue::create(15, room_range())?.current_reading(),
        Reading::new(15, 0)
    );
    assert_eq!(
        SimulatedObservableValue::create(35, room_range())?.current_reading(),
        Reading::new(35, 0)
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_create_rejects_initial_outside_range() {
    for initial in [14, 36, i32::MIN, i32::MAX] {
        let err = SimulatedObservableValue::create(initial, room_range()).unwrap_err();
        assert!(
            matches!(err, SimError::InvalidConfiguration { .. }),
            "{initial}: {err}"
        );
    }
}

#[tokio::test(start_paused = true)]
async fn test_builder_defaults_to_range_center() -> anyhow::Result<()> {
    let sensor = SimulatedObservableValue::builder(city_range())
        .name("city")
        .build()?;

    assert_eq!(sensor.current_reading(), Reading::new(5, 0));
    assert_eq!(sensor.name(), "city");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_builder_rejects_zero_tick_interval() {
    let err = SimulatedObservableValue::builder(room_range())
        .tick_interval(Duration::ZERO)
        .build()
        .unwrap_err();
    assert!(matches!(err, SimError::InvalidConfiguration { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_builder_rejects_tick_interval_beyond_the_clock() {
    let err = SimulatedObservableValue::builder(room_range())
        .tick_interval(Duration::MAX)
        .build()
        .unwrap_err();
    assert!(matches!(err, SimError::InvalidConfiguration { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_current_reading_is_idempotent_between_updates() {
    let sensor = scripted(25, room_range(), &[2]);

    let first = sensor.current_reading();
    let second = sensor.current_reading();

    assert_eq!(first, second);
}

#[tokio::test(start_paused = true)]
async fn test_observe_delivers_latest_value_immediately() {
    let sensor = scripted(25, room_range(), &[]);
    sensor.calibrate(3);

    let mut readings = sensor.observe();

    expect_next_reading(&mut readings, 25, 3).await;
}

#[tokio::test(start_paused = true)]
async fn test_no_update_before_first_tick() {
    let sensor = scripted(25, room_range(), &[2]);
    let mut readings = sensor.observe();
    expect_next_reading(&mut readings, 25, 0).await;

    assert_no_element_emitted(&mut readings, 900).await;

    expect_next_reading(&mut readings, 27, 0).await;
}

#[tokio::test(start_paused = true)]
async fn test_calibrate_then_tick_scenario() {
    // Arrange
    let sensor = scripted(25, room_range(), &[2]);
    let mut readings = sensor.observe();
    expect_next_reading(&mut readings, 25, 0).await;

    // Act
    let calibrated = sensor.calibrate(2);

    // Assert
    assert_eq!(calibrated, Reading::new(25, 2));
    assert_eq!(sensor.current_reading().calibrated_value(), 27);
    expect_next_reading(&mut readings, 25, 2).await;

    expect_next_reading(&mut readings, 27, 2).await;
    assert_eq!(sensor.current_reading().calibrated_value(), 29);
}

#[tokio::test(start_paused = true)]
async fn test_tick_clamps_at_upper_bound() {
    let sensor = scripted(15, city_range(), &[2]);
    let mut readings = sensor.observe();
    expect_next_reading(&mut readings, 15, 0).await;

    expect_next_reading(&mut readings, 15, 0).await;
}

#[tokio::test(start_paused = true)]
async fn test_tick_clamps_at_lower_bound() {
    let sensor = scripted(-4, city_range(), &[-2, -2]);
    let mut readings = sensor.observe();
    expect_next_reading(&mut readings, -4, 0).await;

    expect_next_reading(&mut readings, -5, 0).await;
    expect_next_reading(&mut readings, -5, 0).await;
}

#[tokio::test(start_paused = true)]
async fn test_tick_preserves_bias() {
    let sensor = scripted(0, city_range(), &[1, 1]);
    let mut readings = sensor.observe();
    expect_next_reading(&mut readings, 0, 0).await;

    expect_next_reading(&mut readings, 1, 0).await;
    sensor.calibrate(-7);
    expect_next_reading(&mut readings, 1, -7).await;
    expect_next_reading(&mut readings, 2, -7).await;
}

#[tokio::test(start_paused = true)]
async fn test_random_walk_stays_within_range() {
    let range = ValueRange::new(0, 4).unwrap();
    let sensor = SimulatedObservableValue::builder(range)
        .jitter_source(UniformJitter::seeded(3, 11))
        .build()
        .unwrap();
    let mut readings = sensor.observe();

    for _ in 0..200 {
        let reading = readings.next().await.expect("sensor keeps ticking");
        assert!(range.contains(reading.raw_value), "{reading} left {range}");
        assert!(range.contains(sensor.current_reading().raw_value));
    }
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_receive_the_same_next_snapshot() {
    let sensor = scripted(25, room_range(), &[-1]);
    let mut a = sensor.observe();
    let mut b = sensor.observe();
    assert_eq!(sensor.subscriber_count(), 2);

    expect_next_reading(&mut a, 25, 0).await;
    expect_next_reading(&mut b, 25, 0).await;

    let next_a = a.next().await.unwrap();
    let next_b = b.next().await.unwrap();
    assert_eq!(next_a, next_b);
    assert_eq!(next_a, Reading::new(24, 0));
}

#[tokio::test(start_paused = true)]
async fn test_unsubscribe_leaves_generator_and_other_subscribers_running() {
    let sensor = scripted(25, room_range(), &[1, 1]);
    let leaving = sensor.observe();
    let mut staying = sensor.observe();
    expect_next_reading(&mut staying, 25, 0).await;

    leaving.unsubscribe();

    expect_next_reading(&mut staying, 26, 0).await;
    expect_next_reading(&mut staying, 27, 0).await;
    assert_eq!(sensor.subscriber_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_observe_is_restartable() {
    let sensor = scripted(25, room_range(), &[1]);
    let first = sensor.observe();
    drop(first);

    let mut again = sensor.observe();
    expect_next_reading(&mut again, 25, 0).await;
    expect_next_reading(&mut again, 26, 0).await;
}

#[tokio::test(start_paused = true)]
async fn test_calibrate_accepts_any_bias() {
    let sensor = scripted(25, room_range(), &[]);

    assert_eq!(sensor.calibrate(i32::MIN), Reading::new(25, i32::MIN));
    assert_eq!(
        sensor.current_reading().calibrated_value(),
        25 + i64::from(i32::MIN)
    );
    assert_eq!(sensor.calibrate(1_000_000), Reading::new(25, 1_000_000));
}

#[tokio::test(start_paused = true)]
async fn test_calibrate_by_accumulates_and_saturates() {
    let sensor = scripted(25, room_range(), &[]);

    sensor.calibrate_by(1);
    sensor.calibrate_by(1);
    assert_eq!(sensor.current_reading().bias, 2);
    assert_eq!(sensor.calibrate_by(-5).bias, -3);

    sensor.calibrate(i32::MAX);
    assert_eq!(sensor.calibrate_by(1).bias, i32::MAX);
}

#[tokio::test(start_paused = true)]
async fn test_projections_skip_unchanged_fields() {
    let sensor = scripted(25, room_range(), &[0, 1]);
    let mut raw = sensor.observe_raw();
    let mut bias = sensor.observe_bias();
    let mut calibrated = sensor.observe_calibrated();

    expect_next_value(&mut raw, 25).await;
    expect_next_value(&mut bias, 0).await;
    expect_next_value(&mut calibrated, 25_i64).await;

    // first tick draws 0: nothing changes, the second draws +1
    expect_next_value(&mut raw, 26).await;
    expect_next_value(&mut calibrated, 26_i64).await;

    sensor.calibrate(0);
    sensor.calibrate(4);
    expect_next_value(&mut bias, 4).await;
    expect_next_value(&mut calibrated, 30_i64).await;
}

#[tokio::test(start_paused = true)]
async fn test_scope_cancellation_disposes_sensor() {
    // Arrange
    let scope = CancellationToken::new();
    let sensor = SimulatedObservableValue::builder(room_range())
        .initial(25)
        .jitter_source(ScriptedJitter::default())
        .scope(&scope)
        .build()
        .unwrap();
    let mut readings = sensor.observe();
    expect_next_reading(&mut readings, 25, 0).await;

    // Act
    scope.cancel();

    // Assert
    expect_stream_end(&mut readings, 10).await;
    let mut late = sensor.observe();
    expect_stream_end(&mut late, 10).await;

    assert_eq!(sensor.calibrate(5), Reading::new(25, 5));
    assert_eq!(sensor.current_reading(), Reading::new(25, 5));
    assert_eq!(sensor.subscriber_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_last_handle_disposes_sensor() {
    let sensor = scripted(25, room_range(), &[]);
    let consumer = sensor.clone();
    let mut readings = sensor.observe();
    expect_next_reading(&mut readings, 25, 0).await;

    drop(sensor);
    expect_next_reading(&mut readings, 25, 0).await;

    drop(consumer);
    expect_stream_end(&mut readings, 10).await;
}

#[tokio::test(start_paused = true)]
async fn test_custom_tick_interval() {
    let sensor = SimulatedObservableValue::builder(room_range())
        .initial(25)
        .tick_interval(Duration::from_millis(100))
        .jitter_source(ScriptedJitter::new([1, 1]))
        .build()
        .unwrap();
    let mut readings = sensor.observe();
    expect_next_reading(&mut readings, 25, 0).await;

    assert_no_element_emitted(&mut readings, 90).await;
    expect_next_reading(&mut readings, 26, 0).await;
    expect_next_reading(&mut readings, 27, 0).await;
}

#[tokio::test(start_paused = true)]
async fn test_zero_jitter_amplitude_keeps_reading_constant() {
    let sensor = SimulatedObservableValue::builder(room_range())
        .initial(25)
        .jitter_amplitude(0)
        .build()
        .unwrap();
    let mut readings = sensor.observe();
    expect_next_reading(&mut readings, 25, 0).await;

    for _ in 0..5 {
        expect_next_reading(&mut readings, 25, 0).await;
    }
    assert_eq!(sensor.current_reading(), Reading::new(25, 0));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_calibrations_are_seen_in_one_order() {
    let sensor = SimulatedObservableValue::builder(room_range())
        .initial(25)
        .tick_interval(Duration::from_secs(3600))
        .build()
        .unwrap();
    let a = sensor.observe();
    let b = sensor.observe();

    let writers: Vec<_> = (0..4)
        .map(|_| {
            let sensor = sensor.clone();
            tokio::spawn(async move {
                for _ in 0..50 {
                    sensor.calibrate_by(1);
                }
            })
        })
        .collect();
    for writer in writers {
        writer.await.unwrap();
    }
    drop(sensor);

    let left: Vec<Reading> = a.collect().await;
    let right: Vec<Reading> = b.collect().await;
    assert_eq!(left, right);
    let biases: Vec<i32> = left.iter().map(|r| r.bias).collect();
    assert_eq!(biases, (0..=200).collect::<Vec<_>>());
}
