//! # Platform Errors
//!
//! Errors raised while working out where an application's config, cache,
//! and data directories live on the current operating system.
use thiserror::Error;

use crate::platform::resolver::OsKind;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Sorry, your operating system ({0}) is not yet supported")]
    UnsupportedPlatform(String),

    #[error("Environment variable {var} is required to locate base directories on {os}")]
    MissingEnvironment { var: &'static str, os: OsKind },
}
