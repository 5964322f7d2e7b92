//! Core error types for Fundwatch.
//!
//! This module defines storage- and transport-agnostic error types. The
//! SQLite and HTTP crates convert their own errors into these at the boundary.

use chrono::NaiveDate;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for a watcher run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Trading calendar error: {0}")]
    Calendar(#[from] CalendarError),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Delta computation failed: {0}")]
    Delta(#[from] DeltaError),

    #[error("Notification failed: {0}")]
    Notification(#[from] NotificationError),

    #[error("Holdings feed could not be fetched: {0}")]
    Feed(String),

    #[error("Holdings ingestion failed: {0}")]
    Ingestion(String),

    #[error("Invalid configuration value: {0}")]
    Config(String),
}

/// Database-agnostic error type for storage operations.
///
/// The storage layer converts diesel/r2d2 errors into this form.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Field-level errors raised while normalising feed rows.
///
/// These are recovered locally: the offending row is skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Malformed field '{field}' with value '{value}': {reason}")]
    MalformedField {
        field: String,
        value: String,
        reason: String,
    },
}

impl ValidationError {
    pub fn malformed(field: &str, value: &str, reason: impl Into<String>) -> Self {
        ValidationError::MalformedField {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors from trading-day resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("No trading day found within {lookback_days} days before {from}")]
    NoTradingDayFound { from: NaiveDate, lookback_days: u32 },

    #[error("Holiday calendar unavailable: {0}")]
    Unavailable(String),
}

/// Errors about the presence of stored snapshots.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("No holdings stored for either {previous} or {current}")]
    MissingSnapshot {
        current: NaiveDate,
        previous: NaiveDate,
    },
}

/// Errors raised by the delta engine itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeltaError {
    #[error("Current snapshot date {current} must be after previous snapshot date {previous}")]
    InvertedSnapshots {
        current: NaiveDate,
        previous: NaiveDate,
    },
}

/// Errors from the notification transport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    #[error("Delivery to channel '{channel}' failed: {message}")]
    DeliveryFailed { channel: String, message: String },
}

impl Error {
    /// Whether this error should be reported to the channel as a degraded
    /// "could not compute" notice instead of aborting silently.
    pub fn is_reportable(&self) -> bool {
        matches!(
            self,
            Error::Calendar(_) | Error::Snapshot(_) | Error::Delta(_)
        )
    }
}
