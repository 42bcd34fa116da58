// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use simsense_core::ValueRange;

#[must_use]
pub fn room_range() -> ValueRange {
    ValueRange::new(15, 35).expect("room range is valid")
}

#[must_use]
pub fn device_range() -> ValueRange {
    ValueRange::new(20, 60).expect("device range is valid")
}

#[must_use]
pub fn city_range() -> ValueRange {
    ValueRange::new(-5, 15).expect("city range is valid")
}
