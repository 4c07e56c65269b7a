//! Domain-specific error types for the project builder.
//!
//! Library modules return typed errors ([`SettingsError`], [`PathsError`])
//! and command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise from loading, editing, or writing the settings store.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing the settings file
    /// (or creating its directory).
    #[error("IO error accessing settings at {path}: {source}")]
    Io {
        /// Path of the file or directory involved.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A stored or supplied window placement is not one of the known names.
    #[error("Invalid window placement '{0}': must be one of Floating, Maximized, Fullscreen")]
    InvalidPlacement(String),

    /// The key does not name a recognised setting.
    #[error("Unknown setting '{0}'")]
    UnknownKey(String),

    /// A value supplied for a typed setting could not be parsed.
    #[error("Invalid value '{value}' for {key}: expected {expected}")]
    InvalidValue {
        /// Setting key.
        key: String,
        /// Rejected raw value.
        value: String,
        /// Human-readable description of the accepted values.
        expected: &'static str,
    },
}

/// Errors that arise from project path validation.
#[derive(Error, Debug)]
pub enum PathsError {
    /// One or more project paths lack a `gradlew` marker.
    #[error("Invalid project path(s): {0}")]
    Invalid(String),
}
