use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::kernel::error::{Error, Result};
use crate::storage::provider::StorageProvider;

/// Unstructured file under a store's base directory
///
/// For cache blobs and data files that no codec should interpret. Unlike
/// [`FileHandle`](crate::storage::FileHandle), nothing is buffered and every
/// error is returned to the caller.
#[derive(Debug, Clone)]
pub struct RawFile {
    path: PathBuf,
    provider: Arc<dyn StorageProvider>,
}

impl RawFile {
    pub fn new(path: PathBuf, provider: Arc<dyn StorageProvider>) -> Self {
        Self { path, provider }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.provider.is_file(&self.path)
    }

    pub fn read(&self) -> Result<Vec<u8>> {
        self.provider.read_to_bytes(&self.path)
    }

    pub fn read_to_string(&self) -> Result<String> {
        let bytes = self.read()?;
        String::from_utf8(bytes).map_err(|e| {
            Error::io(
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
                "read_to_string",
                self.path.clone(),
            )
        })
    }

    /// Replace the file's contents, creating parent directories as needed
    pub fn write(&self, contents: impl AsRef<[u8]>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            self.provider.create_dir_all(parent)?;
        }
        self.provider.write_bytes(&self.path, contents.as_ref())
    }

    /// Remove the file; a missing file is not an error
    pub fn delete(&self) -> Result<()> {
        match self.provider.remove_file(&self.path) {
            Err(Error::StorageSystem(e)) if e.is_not_found() => Ok(()),
            other => other,
        }
    }
}
