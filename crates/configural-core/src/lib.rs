//! Per-application configuration, cache, and data files.
//!
//! An [`Application`] resolves the platform's base directories for an
//! application name and exposes three [`FileStore`]s. Each store hands out
//! lazily loaded [`FileHandle`]s whose format is picked by a pluggable
//! [`Codec`] from a [`CodecRegistry`].
//!
//! ```no_run
//! use configural_core::Application;
//!
//! # fn main() -> configural_core::Result<()> {
//! let app = Application::new("myapp")?;
//! let settings = app.config().get("settings")?;
//! settings.set("theme", "dark");
//! settings.save();
//! # Ok(())
//! # }
//! ```
pub mod codec;
pub mod kernel;
pub mod platform;
pub mod storage;
pub mod utils;

pub use codec::{Codec, CodecError, CodecRegistry, JsonCodec};
#[cfg(feature = "plist-config")]
pub use codec::PlistCodec;
#[cfg(feature = "toml-config")]
pub use codec::TomlCodec;
#[cfg(feature = "yaml-config")]
pub use codec::YamlCodec;
pub use kernel::{Application, ApplicationBuilder, Error, Result};
pub use platform::{BaseDirs, EnvSnapshot, OsKind, PlatformError, PlatformResolver};
pub use storage::{
    ConfigData, FileHandle, FileStore, LoadState, LocalStorageProvider, Mapping, RawFile,
    StorageProvider, StorageSystemError, StoreKind,
};

#[cfg(test)]
mod tests;
