// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use simsense_core::{Jitter, SimError, UniformJitter, ValueRange};
use simsense_test_utils::test_data::{city_range, room_range};

#[test]
fn test_inverted_bounds_are_rejected() {
    let err = ValueRange::new(10, 5).unwrap_err();
    assert!(matches!(err, SimError::InvalidConfiguration { .. }));
}

#[test]
fn test_single_point_range_is_valid() {
    let range = ValueRange::new(7, 7).unwrap();
    assert_eq!(range.center(), 7);
    assert_eq!(range.step(7, 2), 7);
    assert_eq!(range.step(7, -2), 7);
}

#[test]
fn test_center_rounds_towards_lower_bound() {
    assert_eq!(room_range().center(), 25);
    assert_eq!(city_range().center(), 5);
    assert_eq!(ValueRange::new(0, 3).unwrap().center(), 1);
    assert_eq!(ValueRange::new(-3, 0).unwrap().center(), -2);
}

#[test]
fn test_center_of_full_i32_range_does_not_overflow() {
    let range = ValueRange::new(i32::MIN, i32::MAX).unwrap();
    assert_eq!(range.center(), -1);
}

#[test]
fn test_step_clamps_at_upper_bound() {
    let range = city_range();
    assert_eq!(range.step(15, 2), 15);
    assert_eq!(range.step(14, 2), 15);
}

#[test]
fn test_step_clamps_at_lower_bound() {
    let range = city_range();
    assert_eq!(range.step(-5, -2), -5);
    assert_eq!(range.step(-4, -2), -5);
}

#[test]
fn test_step_saturates_instead_of_overflowing() {
    let range = ValueRange::new(0, i32::MAX).unwrap();
    assert_eq!(range.step(i32::MAX, i32::MAX), i32::MAX);
}

#[test]
fn test_check_initial() {
    let range = room_range();
    assert_eq!(range.check_initial(15).unwrap(), 15);
    assert_eq!(range.check_initial(35).unwrap(), 35);

    let err = range.check_initial(36).unwrap_err();
    assert!(matches!(err, SimError::InvalidConfiguration { .. }));
    assert!(err.to_string().contains("[15, 35]"));
    assert!(range.check_initial(14).is_err());
}

#[test]
fn test_random_walk_never_leaves_range() {
    for seed in 0..32 {
        let range = city_range();
        let mut jitter = UniformJitter::seeded(5, seed);
        let mut raw = range.center();

        for _ in 0..1_000 {
            raw = range.step(raw, jitter.next_delta());
            assert!(range.contains(raw), "seed {seed}: {raw} left {range}");
        }
    }
}
