//! # Configural Core Errors
//!
//! Defines the crate-wide error type.
//!
//! [`Error`] wraps the typed errors of each subsystem (codecs, platform
//! directory resolution, storage) so callers can match on one enum, and
//! adds the few errors that belong to the application root itself.
use std::path::PathBuf;
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::codec::error::CodecError;
use crate::platform::error::PlatformError;
use crate::storage::error::StorageSystemError;

/// Error type shared by every public operation of the crate
#[derive(Debug, ThisError)]
pub enum Error {
    /// Codec lookup, decode, or encode failure
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Base directory resolution failure
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    /// Specific, typed storage system error
    #[error("Storage system error: {0}")]
    StorageSystem(#[from] StorageSystemError),

    /// The application name cannot be used to namespace directories
    #[error("Invalid application name '{name}': {reason}")]
    InvalidAppName { name: String, reason: String },

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl Error {
    /// Wrap an I/O error with the operation and path it happened on
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        Error::StorageSystem(StorageSystemError::io(source, operation, path))
    }

    /// True for errors that indicate broken setup rather than bad file contents
    pub fn is_configuration_error(&self) -> bool {
        match self {
            Error::Codec(CodecError::UnknownFormat(_) | CodecError::UnknownExtension(_)) => true,
            Error::Platform(_) | Error::InvalidAppName { .. } => true,
            Error::StorageSystem(StorageSystemError::InvalidName { .. }) => true,
            _ => false,
        }
    }
}
