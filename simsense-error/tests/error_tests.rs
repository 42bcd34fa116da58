// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use simsense_error::{Result, ResultExt, SimError};
use std::io;

#[test]
fn test_error_display() {
    let err = SimError::invalid_configuration("initial 40 outside [15, 35]");
    assert_eq!(
        err.to_string(),
        "Invalid configuration: initial 40 outside [15, 35]"
    );

    let err = SimError::unknown_sensor("garage");
    assert_eq!(err.to_string(), "Unknown sensor: garage");
}

#[test]
fn test_error_constructors() {
    assert!(matches!(
        SimError::invalid_configuration("x"),
        SimError::InvalidConfiguration { .. }
    ));
    assert!(matches!(SimError::config("x"), SimError::Config { .. }));
    assert!(matches!(
        SimError::unknown_sensor("x"),
        SimError::UnknownSensor { .. }
    ));
}

#[test]
fn test_is_configuration() {
    assert!(SimError::invalid_configuration("x").is_configuration());
    assert!(SimError::config("x").is_configuration());
    assert!(!SimError::unknown_sensor("x").is_configuration());
    assert!(!SimError::SubscriptionClosed.is_configuration());
}

#[test]
fn test_io_error_gets_context() {
    let result: std::result::Result<(), io::Error> =
        Err(io::Error::new(io::ErrorKind::NotFound, "no such file"));

    let err = result.context("reading sensors.toml").unwrap_err();
    assert!(matches!(err, SimError::Config { .. }));
    assert!(err.to_string().contains("reading sensors.toml"));
    assert!(err.to_string().contains("no such file"));
}

#[test]
fn test_context_preserves_non_user_errors() {
    let result: Result<()> = Err(SimError::unknown_sensor("garage"));

    let err = result.context("lookup failed").unwrap_err();
    assert!(matches!(err, SimError::UnknownSensor { .. }));
}

#[test]
fn test_with_context_is_lazy_on_ok() {
    let result: Result<i32> = Ok(7);
    let value = result
        .with_context(|| panic!("context must not be evaluated"))
        .unwrap();
    assert_eq!(value, 7);
}
