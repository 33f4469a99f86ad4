//! # Configural Core Kernel
//!
//! The application root and the pieces every other module leans on.
//!
//! - **Application**: [`Application`](bootstrap::Application) resolves an
//!   application's base directories once and lazily opens its config,
//!   cache, and data [`FileStore`](crate::storage::FileStore)s. Built with
//!   [`ApplicationBuilder`](bootstrap::ApplicationBuilder).
//! - **Constants**: defaults such as the fallback format, in `constants`.
//! - **Error Handling**: the crate-wide [`Error`](error::Error) and `Result`
//!   alias in the `error` submodule.
pub mod bootstrap;
pub mod constants;
pub mod error;

pub use bootstrap::{Application, ApplicationBuilder};
pub use error::{Error, Result};
