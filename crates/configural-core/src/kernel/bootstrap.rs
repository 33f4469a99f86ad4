use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::codec::{Codec, CodecRegistry};
use crate::kernel::constants;
use crate::kernel::error::{Error, Result};
use crate::platform::{BaseDirs, EnvSnapshot, OsKind, PlatformResolver};
use crate::storage::{FileStore, LocalStorageProvider, StorageProvider, StoreKind};

/// Per-application root holding the resolved directories and the three stores
///
/// Directories are resolved once when the application is built. Each store
/// is created the first time it is accessed.
pub struct Application {
    name: String,
    dirs: BaseDirs,
    registry: Arc<CodecRegistry>,
    provider: Arc<dyn StorageProvider>,
    /// Default codec per store kind, validated at build time
    codecs: HashMap<StoreKind, Arc<dyn Codec>>,
    lazy_loading: bool,
    config: OnceLock<FileStore>,
    cache: OnceLock<FileStore>,
    data: OnceLock<FileStore>,
}

impl Application {
    /// Create an application using platform directories and built-in codecs
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::builder(name).build()
    }

    pub fn builder(name: impl Into<String>) -> ApplicationBuilder {
        ApplicationBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dirs(&self) -> &BaseDirs {
        &self.dirs
    }

    pub fn config_dir(&self) -> &Path {
        &self.dirs.config_dir
    }

    pub fn cache_dir(&self) -> &Path {
        &self.dirs.cache_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.dirs.data_dir
    }

    pub fn registry(&self) -> &Arc<CodecRegistry> {
        &self.registry
    }

    /// Configuration files
    pub fn config(&self) -> &FileStore {
        self.store(StoreKind::Config)
    }

    /// Cache files
    pub fn cache(&self) -> &FileStore {
        self.store(StoreKind::Cache)
    }

    /// Data files
    pub fn data(&self) -> &FileStore {
        self.store(StoreKind::Data)
    }

    /// Get the store of the given kind, creating it on first access
    pub fn store(&self, kind: StoreKind) -> &FileStore {
        self.slot(kind).get_or_init(|| self.make_store(kind))
    }

    fn slot(&self, kind: StoreKind) -> &OnceLock<FileStore> {
        match kind {
            StoreKind::Config => &self.config,
            StoreKind::Cache => &self.cache,
            StoreKind::Data => &self.data,
        }
    }

    fn make_store(&self, kind: StoreKind) -> FileStore {
        let codec = self.codecs[&kind].clone();
        log::debug!(
            "Opening {} store at {} (default format '{}')",
            kind,
            self.dirs.dir(kind).display(),
            codec.format_name()
        );
        FileStore::new(kind, self.dirs.dir(kind), self.registry.clone(), codec)
            .with_provider(self.provider.clone())
            .with_eager_load(!self.lazy_loading)
    }

    /// Save every handle of every store opened so far
    pub fn save_all(&self) {
        for kind in StoreKind::ALL {
            if let Some(store) = self.slot(kind).get() {
                store.save_all();
            }
        }
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("name", &self.name)
            .field("dirs", &self.dirs)
            .field("registry", &self.registry)
            .field("lazy_loading", &self.lazy_loading)
            .finish()
    }
}

/// Builder for [`Application`]
pub struct ApplicationBuilder {
    name: String,
    os: Option<OsKind>,
    env: Option<EnvSnapshot>,
    overrides: HashMap<StoreKind, PathBuf>,
    registry: Option<CodecRegistry>,
    default_format: String,
    store_formats: HashMap<StoreKind, String>,
    provider: Option<Arc<dyn StorageProvider>>,
    lazy_loading: bool,
}

impl ApplicationBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            os: None,
            env: None,
            overrides: HashMap::new(),
            registry: None,
            default_format: constants::DEFAULT_FORMAT.to_string(),
            store_formats: HashMap::new(),
            provider: None,
            lazy_loading: constants::DEFAULT_LAZY_LOADING,
        }
    }

    /// Resolve directories as if running on `os`
    pub fn os(mut self, os: OsKind) -> Self {
        self.os = Some(os);
        self
    }

    /// Resolve directories from this environment instead of the process one
    pub fn env(mut self, env: EnvSnapshot) -> Self {
        self.env = Some(env);
        self
    }

    /// Use an explicit directory for one store kind
    pub fn dir(mut self, kind: StoreKind, dir: impl Into<PathBuf>) -> Self {
        self.overrides.insert(kind, dir.into());
        self
    }

    pub fn config_dir(self, dir: impl Into<PathBuf>) -> Self {
        self.dir(StoreKind::Config, dir)
    }

    pub fn cache_dir(self, dir: impl Into<PathBuf>) -> Self {
        self.dir(StoreKind::Cache, dir)
    }

    pub fn data_dir(self, dir: impl Into<PathBuf>) -> Self {
        self.dir(StoreKind::Data, dir)
    }

    /// Use this registry instead of [`CodecRegistry::with_builtin`]
    pub fn registry(mut self, registry: CodecRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Default format for every store without its own override
    pub fn default_format(mut self, format: impl Into<String>) -> Self {
        self.default_format = format.into();
        self
    }

    /// Default format for one store kind
    pub fn store_format(mut self, kind: StoreKind, format: impl Into<String>) -> Self {
        self.store_formats.insert(kind, format.into());
        self
    }

    pub fn provider(mut self, provider: Arc<dyn StorageProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// When false, handles are loaded as soon as a store creates them
    pub fn lazy_loading(mut self, lazy_loading: bool) -> Self {
        self.lazy_loading = lazy_loading;
        self
    }

    pub fn build(self) -> Result<Application> {
        validate_app_name(&self.name)?;
        log::info!(
            "Initializing {} v{} for '{}'",
            constants::LIB_NAME,
            constants::LIB_VERSION,
            self.name
        );

        let dirs = self.resolve_dirs()?;
        log::info!("Using config directory: {}", dirs.config_dir.display());
        log::info!("Using cache directory: {}", dirs.cache_dir.display());
        log::info!("Using data directory: {}", dirs.data_dir.display());

        let registry = Arc::new(self.registry.unwrap_or_else(CodecRegistry::with_builtin));
        let mut codecs = HashMap::new();
        for kind in StoreKind::ALL {
            let format = self
                .store_formats
                .get(&kind)
                .unwrap_or(&self.default_format);
            codecs.insert(kind, registry.lookup_by_name(format)?);
        }

        Ok(Application {
            name: self.name,
            dirs,
            registry,
            provider: self
                .provider
                .unwrap_or_else(|| Arc::new(LocalStorageProvider::new()) as Arc<dyn StorageProvider>),
            codecs,
            lazy_loading: self.lazy_loading,
            config: OnceLock::new(),
            cache: OnceLock::new(),
            data: OnceLock::new(),
        })
    }

    // The platform is only consulted when some directory is not overridden.
    fn resolve_dirs(&self) -> Result<BaseDirs> {
        let overridden = |kind: StoreKind| self.overrides.get(&kind).cloned();
        if let (Some(config_dir), Some(cache_dir), Some(data_dir)) = (
            overridden(StoreKind::Config),
            overridden(StoreKind::Cache),
            overridden(StoreKind::Data),
        ) {
            return Ok(BaseDirs {
                config_dir,
                cache_dir,
                data_dir,
            });
        }

        let os = match self.os {
            Some(os) => os,
            None => OsKind::current()?,
        };
        let env = self.env.clone().unwrap_or_else(EnvSnapshot::from_env);
        let mut dirs = PlatformResolver::resolve(os, &self.name, &env)?;
        for (kind, dir) in &self.overrides {
            dirs.set_dir(*kind, dir.clone());
        }
        Ok(dirs)
    }
}

fn validate_app_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidAppName {
        name: name.to_string(),
        reason: reason.to_string(),
    };
    if name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid("name must not contain path separators"));
    }
    if name == "." || name == ".." {
        return Err(invalid("name must not be a relative directory"));
    }
    Ok(())
}
