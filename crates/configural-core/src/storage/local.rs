use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::kernel::error::{Error, Result};
use crate::storage::provider::StorageProvider;

/// Local filesystem storage provider
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageProvider;

impl LocalStorageProvider {
    pub fn new() -> Self {
        Self
    }
}

impl StorageProvider for LocalStorageProvider {
    fn name(&self) -> &str {
        "local"
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|e| Error::io(e, "create_dir_all", path.to_path_buf()))
    }

    fn read_to_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| Error::io(e, "read_to_bytes", path.to_path_buf()))
    }

    fn write_bytes(&self, path: &Path, contents: &[u8]) -> Result<()> {
        // Ensure parent directory exists
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !self.is_dir(parent) {
            self.create_dir_all(parent)?;
        }

        // Write next to the target, then atomically replace it
        let mut temp_file = NamedTempFile::new_in(parent)
            .map_err(|e| Error::io(e, "create_temp_file", parent.to_path_buf()))?;

        temp_file
            .write_all(contents)
            .map_err(|e| Error::io(e, "write_to_temp_file", temp_file.path().to_path_buf()))?;

        temp_file
            .persist(path)
            .map_err(|e| Error::io(e.error, "persist_temp_file", path.to_path_buf()))?;

        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|e| Error::io(e, "remove_file", path.to_path_buf()))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let entries =
            fs::read_dir(path).map_err(|e| Error::io(e, "read_dir", path.to_path_buf()))?;
        let mut result = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(e, "read_dir_entry", path.to_path_buf()))?;
            result.push(entry.path());
        }
        result.sort();
        Ok(result)
    }
}
