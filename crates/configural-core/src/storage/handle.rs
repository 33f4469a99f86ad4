use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::codec::Codec;
use crate::kernel::error::{Error, Result};
use crate::storage::config::ConfigData;
use crate::storage::local::LocalStorageProvider;
use crate::storage::provider::StorageProvider;
use crate::utils::file_extension;

/// Whether a handle currently holds its file's contents in memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing read yet (or closed); the next access reads the file
    Unloaded,
    /// In-memory data is the source of truth until closed
    Loaded,
}

#[derive(Debug)]
struct HandleState {
    /// `None` while unloaded
    data: Option<ConfigData>,
    /// Memoized result of path resolution
    path: Option<PathBuf>,
}

/// One named structured file, loaded on first access
///
/// Every read or write goes through the in-memory [`ConfigData`]; the file
/// on disk is only touched when the handle loads, saves, or deletes. All
/// operations on one handle are serialized by an internal lock, so a
/// shared `Arc<FileHandle>` can be used from several threads.
///
/// Load and save are lenient: a missing file loads as an empty mapping,
/// and an unreadable, undecodable, or unwritable file is reported with a
/// warning instead of an error. [`try_reload`](Self::try_reload) and
/// [`try_save`](Self::try_save) surface those errors instead.
#[derive(Debug)]
pub struct FileHandle {
    name: String,
    base_dir: PathBuf,
    codec: Arc<dyn Codec>,
    provider: Arc<dyn StorageProvider>,
    state: Mutex<HandleState>,
}

impl FileHandle {
    /// Create a handle backed by the local filesystem
    pub fn new(name: impl Into<String>, base_dir: impl Into<PathBuf>, codec: Arc<dyn Codec>) -> Self {
        Self::with_provider(name, base_dir, codec, Arc::new(LocalStorageProvider::new()))
    }

    /// Create a handle backed by a custom storage provider
    pub fn with_provider(
        name: impl Into<String>,
        base_dir: impl Into<PathBuf>,
        codec: Arc<dyn Codec>,
        provider: Arc<dyn StorageProvider>,
    ) -> Self {
        Self {
            name: name.into(),
            base_dir: base_dir.into(),
            codec,
            provider,
            state: Mutex::new(HandleState {
                data: None,
                path: None,
            }),
        }
    }

    /// Logical name as requested, with or without extension
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn codec(&self) -> &Arc<dyn Codec> {
        &self.codec
    }

    /// Format name of the codec reading and writing this file
    pub fn format_name(&self) -> &str {
        self.codec.format_name()
    }

    // --- Path resolution ---

    /// Every path this handle could live at, in preference order
    ///
    /// A name with an extension has exactly one candidate. A bare name gets
    /// one candidate per extension the codec recognizes.
    pub fn possible_paths(&self) -> Vec<PathBuf> {
        let joined = self.base_dir.join(&self.name);
        if file_extension(&self.name).is_some() {
            return vec![joined];
        }
        self.codec
            .extensions()
            .iter()
            .map(|ext| {
                let mut path = joined.clone().into_os_string();
                path.push(ext);
                PathBuf::from(path)
            })
            .collect()
    }

    /// The resolved backing path
    ///
    /// Resolved on first use and then fixed until [`close`](Self::close):
    /// the first candidate that exists on disk, or the first candidate when
    /// none does.
    pub fn path(&self) -> PathBuf {
        let mut state = self.lock();
        self.resolve_path(&mut state)
    }

    /// Check whether the backing file exists
    pub fn exists(&self) -> bool {
        let path = self.path();
        self.provider.exists(&path)
    }

    fn resolve_path(&self, state: &mut HandleState) -> PathBuf {
        if let Some(path) = &state.path {
            return path.clone();
        }
        let candidates = self.possible_paths();
        let path = candidates
            .iter()
            .find(|candidate| self.provider.exists(candidate))
            .or_else(|| candidates.first())
            .cloned()
            .unwrap_or_else(|| self.base_dir.join(&self.name));
        log::debug!("Resolved '{}' to {}", self.name, path.display());
        state.path = Some(path.clone());
        path
    }

    // --- Load state ---

    pub fn state(&self) -> LoadState {
        match self.lock().data {
            Some(_) => LoadState::Loaded,
            None => LoadState::Unloaded,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.state() == LoadState::Loaded
    }

    /// Load the file if it has not been loaded yet
    pub fn load(&self) {
        let mut state = self.lock();
        self.ensure_loaded(&mut state);
    }

    /// Re-read the file, discarding in-memory changes
    ///
    /// Falls back to an empty mapping on failure, like the initial load.
    pub fn reload(&self) {
        let mut state = self.lock();
        let path = self.resolve_path(&mut state);
        state.data = Some(self.read_or_default(&path));
    }

    /// Re-read the file, surfacing read and decode failures
    ///
    /// A missing file still loads as an empty mapping. On error the
    /// handle's in-memory state is left untouched.
    pub fn try_reload(&self) -> Result<()> {
        let mut state = self.lock();
        let path = self.resolve_path(&mut state);
        let data = self.read(&path)?;
        state.data = Some(data);
        Ok(())
    }

    fn ensure_loaded<'a>(&self, state: &'a mut HandleState) -> &'a mut ConfigData {
        let data = match state.data.take() {
            Some(data) => data,
            None => {
                let path = self.resolve_path(state);
                self.read_or_default(&path)
            }
        };
        state.data.insert(data)
    }

    fn read(&self, path: &Path) -> Result<ConfigData> {
        let bytes = match self.provider.read_to_bytes(path) {
            Ok(bytes) => bytes,
            Err(Error::StorageSystem(e)) if e.is_not_found() => {
                log::debug!("No file at {}, starting with empty data", path.display());
                return Ok(ConfigData::new());
            }
            Err(e) => return Err(e),
        };
        let data = self.codec.decode(&bytes)?;
        log::debug!("Loaded {} keys from {}", data.len(), path.display());
        Ok(data)
    }

    fn read_or_default(&self, path: &Path) -> ConfigData {
        self.read(path).unwrap_or_else(|e| {
            log::warn!(
                "Could not load config file {}: {}. Using empty dataset instead.",
                path.display(),
                e
            );
            ConfigData::new()
        })
    }

    // --- Reading ---

    /// Get a raw value
    pub fn get(&self, key: &str) -> Option<Value> {
        self.with_data(|data| data.get_value(key).cloned())
    }

    /// Get a value converted to `T`
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.with_data(|data| data.get(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.with_data(|data| data.contains_key(key))
    }

    /// Get all keys in order
    pub fn keys(&self) -> Vec<String> {
        self.with_data(ConfigData::keys)
    }

    pub fn len(&self) -> usize {
        self.with_data(ConfigData::len)
    }

    pub fn is_empty(&self) -> bool {
        self.with_data(ConfigData::is_empty)
    }

    /// Copy of the whole in-memory mapping
    pub fn to_data(&self) -> ConfigData {
        self.with_data(ConfigData::clone)
    }

    /// Run `f` against the loaded data while holding the handle's lock
    pub fn with_data<R>(&self, f: impl FnOnce(&ConfigData) -> R) -> R {
        let mut state = self.lock();
        f(self.ensure_loaded(&mut state))
    }

    // --- Writing ---

    /// Set a value, returning the previous one
    ///
    /// Loads first, so a write never discards keys that are only on disk.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> Option<Value> {
        let value = value.into();
        self.update(|data| data.insert(key, value))
    }

    /// Set a value from anything serializable
    pub fn set_serialized<T: Serialize>(&self, key: &str, value: T) -> Result<()> {
        self.update(|data| data.set(key, value))
    }

    /// Remove a value, returning it
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.update(|data| data.remove(key))
    }

    /// Read-modify-write the loaded data while holding the handle's lock
    pub fn update<R>(&self, f: impl FnOnce(&mut ConfigData) -> R) -> R {
        let mut state = self.lock();
        f(self.ensure_loaded(&mut state))
    }

    // --- Persistence ---

    /// Write the in-memory data to disk
    ///
    /// Does nothing if the handle was never loaded. Encode and write
    /// failures are logged and swallowed.
    pub fn save(&self) {
        if let Err(e) = self.try_save() {
            log::warn!("Could not save config file {}: {}", self.path().display(), e);
        }
    }

    /// Write the in-memory data to disk, surfacing encode and write failures
    pub fn try_save(&self) -> Result<()> {
        let mut state = self.lock();
        let path = self.resolve_path(&mut state);
        let data = match &state.data {
            Some(data) => data,
            None => {
                log::debug!("'{}' was never loaded, nothing to save", self.name);
                return Ok(());
            }
        };

        let bytes = self.codec.encode(data)?;
        if let Some(parent) = path.parent() {
            self.provider.create_dir_all(parent)?;
        }
        self.provider.write_bytes(&path, &bytes)?;
        log::debug!("Saved {} keys to {}", data.len(), path.display());
        Ok(())
    }

    /// Empty the data and mark it loaded, so the next save writes an empty file
    pub fn clear(&self) {
        let mut state = self.lock();
        state.data = Some(ConfigData::new());
    }

    /// Drop the in-memory data; the next access reads the file again
    ///
    /// Also forgets the resolved path, so it is recomputed on next use.
    pub fn close(&self) {
        let mut state = self.lock();
        state.data = None;
        state.path = None;
    }

    /// Remove the backing file if present; in-memory data is kept
    pub fn delete(&self) -> Result<()> {
        let path = self.path();
        match self.provider.remove_file(&path) {
            Ok(()) => {
                log::debug!("Deleted {}", path.display());
                Ok(())
            }
            Err(Error::StorageSystem(e)) if e.is_not_found() => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HandleState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
