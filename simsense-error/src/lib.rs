// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the simsense workspace
//!
//! Every fallible simsense operation returns [`SimError`]. Most of the sensor
//! API is total; errors only surface while building generators, resolving
//! registry entries and loading configuration.
//!
//! # Examples
//!
//! ```
//! use simsense_error::{Result, SimError};
//!
//! fn check_initial(initial: i32, lo: i32, hi: i32) -> Result<()> {
//!     if initial < lo || initial > hi {
//!         return Err(SimError::invalid_configuration(format!(
//!             "initial value {initial} outside [{lo}, {hi}]"
//!         )));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_initial(40, 15, 35).is_err());
//! ```

/// Root error type for all simsense operations
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A generator, range or registry was configured with invalid values
    ///
    /// Raised at construction time only; the message names the offending value.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Description of the rejected configuration
        message: String,
    },

    /// A registry lookup named a sensor that was never registered
    #[error("Unknown sensor: {id}")]
    UnknownSensor {
        /// The identifier that was looked up
        id: String,
    },

    /// Configuration could not be read or parsed
    #[error("Configuration error: {context}")]
    Config {
        /// What failed while loading the configuration
        context: String,
    },

    /// The subject behind a sensor has been disposed
    ///
    /// Publishing after the owning scope was cancelled yields this error.
    #[error("Subscription source closed")]
    SubscriptionClosed,

    /// Custom error from user code
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SimError {
    /// Create an invalid configuration error with the given message
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create an unknown sensor error for the given identifier
    pub fn unknown_sensor(id: impl Into<String>) -> Self {
        Self::UnknownSensor { id: id.into() }
    }

    /// Create a configuration loading error with the given context
    pub fn config(context: impl Into<String>) -> Self {
        Self::Config {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Check if this error was caused by the caller's configuration
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfiguration { .. } | Self::Config { .. }
        )
    }
}

/// Specialized Result type for simsense operations
pub type Result<T> = std::result::Result<T, SimError>;

/// Helper trait for adding context to `Result`s
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// # Errors
    /// Returns `Err(SimError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure (lazy evaluation)
    ///
    /// # Errors
    /// Returns `Err(SimError)` if the underlying result is `Err`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<SimError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.with_context(|| context.into())
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| match e.into() {
            SimError::UserError(inner) => SimError::Config {
                context: format!("{}: {inner}", f()),
            },
            other => other,
        })
    }
}

impl From<std::io::Error> for SimError {
    fn from(error: std::io::Error) -> Self {
        Self::user_error(error)
    }
}
