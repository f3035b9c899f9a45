//! Error types for airtime.
//!
//! Every failure in airtime is fatal to the run. The variants here exist so
//! that the final diagnostic names the file or directory at fault and the
//! underlying cause.

use std::path::PathBuf;
use thiserror::Error;

use crate::igc::LogError;

/// The main error type for airtime operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Log Errors ===
    /// A flight log was read but did not contain the records we need.
    #[error("invalid flight log {path}: {source}")]
    InvalidLog {
        /// Path to the offending log file.
        path: PathBuf,
        /// What was wrong with it.
        #[source]
        source: LogError,
    },

    // === I/O Errors ===
    /// A flight log could not be read.
    #[error("failed to read {path}: {source}")]
    FileRead {
        /// Path of the file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// File attributes (size, type) could not be read.
    #[error("failed to read metadata of {path}: {source}")]
    Metadata {
        /// Path of the file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A directory could not be listed.
    #[error("failed to list directory {path}: {source}")]
    DirectoryRead {
        /// Path of the directory.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Writing the report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },
}

/// A specialized Result type for airtime operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Attach a file path to a log extraction failure.
    #[must_use]
    pub fn invalid_log(path: impl Into<PathBuf>, source: LogError) -> Self {
        Self::InvalidLog {
            path: path.into(),
            source,
        }
    }

    /// Check if this error is a missing or malformed record in a log file.
    #[must_use]
    pub fn is_invalid_log(&self) -> bool {
        matches!(self, Self::InvalidLog { .. })
    }

    /// The log extraction failure behind this error, if any.
    #[must_use]
    pub fn log_error(&self) -> Option<&LogError> {
        match self {
            Self::InvalidLog { source, .. } => Some(source),
            _ => None,
        }
    }
}
