//! Core error types for learning-journey-core.
//!
//! This module defines the error hierarchy using thiserror. `LogError` is the
//! expected, recoverable failure of a logging intent; everything else is
//! wrapped by `CoreError`.

use std::path::PathBuf;
use thiserror::Error;

use crate::day_key::DayKey;

/// Core error type for learning-journey-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Rejected logging intent
    #[error("Log rejected: {0}")]
    Log(#[from] LogError),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A day could not be logged.
///
/// Both variants are routine (double taps, an exhausted allowance) and leave
/// the engine untouched. Callers can avoid them by checking the matching
/// `is_log_*_available` guard first.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    /// The day already carries an outcome
    #[error("{day} is already logged")]
    AlreadyLogged { day: DayKey },

    /// Every freeze for the current goal has been used
    #[error("Freeze quota exhausted: {used} of {quota} freezes used")]
    FreezeQuotaExhausted { used: u32, quota: u32 },
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A day key that is not a `YYYY-MM-DD` date
    #[error("Invalid day key '{0}': expected YYYY-MM-DD")]
    InvalidDayKey(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Restored state uses more freezes than its goal allows
    #[error("{frozen} frozen days exceed the freeze quota of {quota}")]
    FreezeQuotaExceeded { frozen: u32, quota: u32 },
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
