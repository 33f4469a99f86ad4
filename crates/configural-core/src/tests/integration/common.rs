#![cfg(test)]

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::codec::{Codec, CodecError, CodecRegistry, JsonCodec};
use crate::kernel::error::{Error, Result};
use crate::storage::config::ConfigData;
use crate::storage::local::LocalStorageProvider;
use crate::storage::provider::StorageProvider;
use crate::storage::store::{FileStore, StoreKind};

// ===== MOCK CODECS =====

/// JSON codec claiming two extensions, for multi-extension path resolution
#[derive(Debug, Default)]
pub struct DualExtensionCodec;

impl Codec for DualExtensionCodec {
    fn format_name(&self) -> &str {
        "dual"
    }

    fn extensions(&self) -> &[&str] {
        &[".dj", ".dual"]
    }

    fn decode(&self, bytes: &[u8]) -> std::result::Result<ConfigData, CodecError> {
        JsonCodec.decode(bytes)
    }

    fn encode(&self, data: &ConfigData) -> std::result::Result<Vec<u8>, CodecError> {
        JsonCodec.encode(data)
    }
}

/// Codec that reads like JSON but refuses to encode anything
#[derive(Debug, Default)]
pub struct RejectingCodec;

impl Codec for RejectingCodec {
    fn format_name(&self) -> &str {
        "rejecting"
    }

    fn extensions(&self) -> &[&str] {
        &[".rej"]
    }

    fn decode(&self, bytes: &[u8]) -> std::result::Result<ConfigData, CodecError> {
        JsonCodec.decode(bytes)
    }

    fn encode(&self, _data: &ConfigData) -> std::result::Result<Vec<u8>, CodecError> {
        Err(CodecError::encode(self.format_name(), "unsupported shape"))
    }
}

// ===== MOCK PROVIDERS =====

/// Local provider that answers writes (and optionally reads) with PermissionDenied
#[derive(Debug, Default)]
pub struct DeniedProvider {
    inner: LocalStorageProvider,
    deny_reads: bool,
    pub write_attempts: AtomicUsize,
}

impl DeniedProvider {
    pub fn read_only() -> Self {
        Self::default()
    }

    pub fn no_access() -> Self {
        Self {
            deny_reads: true,
            ..Self::default()
        }
    }

    pub fn writes_attempted(&self) -> usize {
        self.write_attempts.load(Ordering::SeqCst)
    }

    fn denied(operation: &str, path: &Path) -> Error {
        Error::io(
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
            operation,
            path.to_path_buf(),
        )
    }
}

impl StorageProvider for DeniedProvider {
    fn name(&self) -> &str {
        "denied"
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.inner.is_file(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner.is_dir(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.inner.create_dir_all(path)
    }

    fn read_to_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        if self.deny_reads {
            return Err(Self::denied("read_to_bytes", path));
        }
        self.inner.read_to_bytes(path)
    }

    fn write_bytes(&self, path: &Path, _contents: &[u8]) -> Result<()> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        Err(Self::denied("write_bytes", path))
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        Err(Self::denied("remove_file", path))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        self.inner.read_dir(path)
    }
}

// ===== SETUP HELPERS =====

/// Built-in codecs plus the test codecs above
pub fn test_registry() -> Arc<CodecRegistry> {
    let mut registry = CodecRegistry::with_builtin();
    registry.register(DualExtensionCodec);
    registry.register(RejectingCodec);
    Arc::new(registry)
}

/// Config store at `dir` whose default format is `format`
pub fn store_with_format(dir: &Path, format: &str) -> FileStore {
    FileStore::with_default_format(StoreKind::Config, dir, test_registry(), format)
        .expect("test registry knows the format")
}

/// Config store at `dir` defaulting to JSON
pub fn json_store(dir: &Path) -> FileStore {
    store_with_format(dir, "json")
}
