use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::codec::{Codec, CodecRegistry};
use crate::kernel::error::Result;
use crate::storage::handle::FileHandle;
use crate::storage::local::LocalStorageProvider;
use crate::storage::provider::StorageProvider;
use crate::storage::raw::RawFile;
use crate::utils::{file_extension, find_files_with_extension, normalize_logical_name, relative_name};

/// Which of an application's three directories a store is rooted at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKind {
    Config,
    Cache,
    Data,
}

impl StoreKind {
    pub const ALL: [StoreKind; 3] = [StoreKind::Config, StoreKind::Cache, StoreKind::Data];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::Config => "config",
            StoreKind::Cache => "cache",
            StoreKind::Data => "data",
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyed collection of [`FileHandle`]s rooted at one base directory
///
/// Handles are created on first request and kept for the life of the
/// store; asking twice for the same name returns the same handle.
pub struct FileStore {
    kind: StoreKind,
    base_dir: PathBuf,
    registry: Arc<CodecRegistry>,
    /// Used for names without a file extension
    default_codec: Arc<dyn Codec>,
    provider: Arc<dyn StorageProvider>,
    /// Load handles as soon as they are created
    eager_load: bool,
    handles: Mutex<HashMap<String, Arc<FileHandle>>>,
}

impl FileStore {
    /// Create a store backed by the local filesystem
    pub fn new(
        kind: StoreKind,
        base_dir: impl Into<PathBuf>,
        registry: Arc<CodecRegistry>,
        default_codec: Arc<dyn Codec>,
    ) -> Self {
        Self {
            kind,
            base_dir: base_dir.into(),
            registry,
            default_codec,
            provider: Arc::new(LocalStorageProvider::new()),
            eager_load: false,
            handles: Mutex::new(HashMap::new()),
        }
    }

    /// Create a store whose default codec is looked up by format name
    pub fn with_default_format(
        kind: StoreKind,
        base_dir: impl Into<PathBuf>,
        registry: Arc<CodecRegistry>,
        default_format: &str,
    ) -> Result<Self> {
        let default_codec = registry.lookup_by_name(default_format)?;
        Ok(Self::new(kind, base_dir, registry, default_codec))
    }

    /// Use a custom storage provider for every handle of this store
    pub fn with_provider(mut self, provider: Arc<dyn StorageProvider>) -> Self {
        self.provider = provider;
        self
    }

    /// Load each handle right after it is created instead of on first access
    pub fn with_eager_load(mut self, eager_load: bool) -> Self {
        self.eager_load = eager_load;
        self
    }

    pub fn kind(&self) -> StoreKind {
        self.kind
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn registry(&self) -> &Arc<CodecRegistry> {
        &self.registry
    }

    pub fn default_codec(&self) -> &Arc<dyn Codec> {
        &self.default_codec
    }

    /// Get the handle for `name`, creating it on first request
    ///
    /// A name with an extension uses the codec registered for that
    /// extension; a bare name uses the store's default codec. Names are
    /// normalized first, so `"./settings"` and `"settings"` share a handle.
    pub fn get(&self, name: impl AsRef<str>) -> Result<Arc<FileHandle>> {
        let name = normalize_logical_name(name.as_ref())?;
        let handle = {
            let mut handles = self.lock();
            if let Some(handle) = handles.get(&name) {
                return Ok(handle.clone());
            }
            let handle = Arc::new(self.make_handle(&name)?);
            handles.insert(name.clone(), handle.clone());
            handle
        };
        log::debug!(
            "Created {} handle '{}' ({})",
            self.kind,
            name,
            handle.format_name()
        );
        if self.eager_load {
            handle.load();
        }
        Ok(handle)
    }

    fn make_handle(&self, name: &str) -> Result<FileHandle> {
        let codec = match file_extension(name) {
            // Has a file extension, so find a matching format
            Some(extension) => self.registry.lookup_by_extension(&extension)?,
            // No file extension, so use the default format
            None => self.default_codec.clone(),
        };
        Ok(FileHandle::with_provider(
            name,
            self.base_dir.clone(),
            codec,
            self.provider.clone(),
        ))
    }

    /// Check whether a handle for `name` has been created
    pub fn contains(&self, name: &str) -> bool {
        normalize_logical_name(name).is_ok_and(|name| self.lock().contains_key(&name))
    }

    /// Names of the handles created so far, sorted
    pub fn handle_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Save every handle held by this store
    ///
    /// Each handle recovers from its own failures, so one unwritable file
    /// does not stop the others from being saved.
    pub fn save_all(&self) {
        let handles: Vec<Arc<FileHandle>> = self.lock().values().cloned().collect();
        log::debug!("Saving {} {} handles", handles.len(), self.kind);
        for handle in handles {
            handle.save();
        }
    }

    /// Logical names of files on disk that some registered codec can read
    ///
    /// Names are relative to the base directory, use `/` separators, and
    /// keep their extension.
    pub fn list_files(&self) -> Result<Vec<String>> {
        let registry = &self.registry;
        let paths = find_files_with_extension(self.provider.as_ref(), &self.base_dir, |ext| {
            registry.recognizes(ext)
        })?;
        let mut names: Vec<String> = paths
            .iter()
            .filter_map(|path| relative_name(&self.base_dir, path))
            .collect();
        names.sort();
        Ok(names)
    }

    /// Unstructured access to `base_dir/name`
    pub fn raw(&self, name: impl AsRef<str>) -> Result<RawFile> {
        let name = normalize_logical_name(name.as_ref())?;
        Ok(RawFile::new(self.base_dir.join(name), self.provider.clone()))
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<FileHandle>>> {
        self.handles.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for FileStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileStore")
            .field("kind", &self.kind)
            .field("base_dir", &self.base_dir)
            .field("default_format", &self.default_codec.format_name())
            .field("provider", &self.provider.name())
            .field("handles", &self.handle_names())
            .finish()
    }
}
