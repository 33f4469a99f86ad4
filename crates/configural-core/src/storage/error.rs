//! # Configural Storage System Errors
//!
//! Defines error types specific to reading and writing backing files.
//!
//! [`StorageSystemError`] covers file I/O failures (with the operation and
//! path they happened on), writes refused by the filesystem, and logical
//! file names that cannot be mapped into a store's base directory.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageSystemError {
    #[error("I/O error during operation '{operation}' on path '{path}': {source}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: io::Error,
    },

    #[error("Path is not writable: '{path}': {source}")]
    PathNotWritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid file name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
}

impl StorageSystemError {
    /// Helper for creating Io errors, ensuring path is always included.
    ///
    /// Permission failures on write operations become [`PathNotWritable`](Self::PathNotWritable).
    pub fn io(source: io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        let operation = operation.into();
        if source.kind() == io::ErrorKind::PermissionDenied && is_write_operation(&operation) {
            return StorageSystemError::PathNotWritable { path, source };
        }
        StorageSystemError::Io {
            source,
            operation,
            path,
        }
    }

    /// True when the underlying I/O error is "not found"
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageSystemError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

fn is_write_operation(operation: &str) -> bool {
    matches!(
        operation,
        "write_bytes"
            | "create_dir_all"
            | "create_temp_file"
            | "write_to_temp_file"
            | "persist_temp_file"
            | "remove_file"
    )
}
