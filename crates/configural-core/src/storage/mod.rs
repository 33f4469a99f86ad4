//! # Configural Storage
//!
//! Named structured files and the stores that hold them.
//!
//! - [`FileStore`]: one per base directory (config, cache, data); hands out
//!   one shared [`FileHandle`] per logical name.
//! - [`FileHandle`]: lazily loaded [`ConfigData`] with a resolved backing
//!   path and the codec that reads and writes it.
//! - [`RawFile`]: byte-level access for files no codec should touch.
//! - [`StorageProvider`]: the filesystem seam; [`LocalStorageProvider`] is
//!   the real implementation.
pub mod config;
pub mod error;
pub mod handle;
pub mod local;
pub mod provider;
pub mod raw;
pub mod store;

pub use config::{ConfigData, Mapping};
pub use error::StorageSystemError;
pub use handle::{FileHandle, LoadState};
pub use local::LocalStorageProvider;
pub use provider::StorageProvider;
pub use raw::RawFile;
pub use store::{FileStore, StoreKind};
