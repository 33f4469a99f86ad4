//! # Configural Platform Directories
//!
//! Works out where an application's config, cache, and data directories
//! live on the host OS. [`PlatformResolver::resolve`] is a pure function of
//! an [`OsKind`], the application name, and an [`EnvSnapshot`]; callers that
//! want the result reused (such as [`Application`](crate::Application))
//! resolve once and keep the [`BaseDirs`].
pub mod error;
pub mod resolver;

pub use error::PlatformError;
pub use resolver::{BaseDirs, EnvSnapshot, OsKind, PlatformResolver};

#[cfg(test)]
mod tests;
