use std::env;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::platform::error::PlatformError;
use crate::storage::store::StoreKind;

/// Operating system families with distinct directory conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsKind {
    /// Linux and the BSDs, following the XDG base directory layout
    Linux,
    /// macOS, using `~/Library`
    MacOs,
    /// Windows, using `%APPDATA%`
    Windows,
}

impl OsKind {
    /// Classify an OS identifier such as `std::env::consts::OS` or a host triple
    pub fn from_os_str(os: &str) -> Option<Self> {
        let os = os.to_ascii_lowercase();
        if os.contains("linux") || os.contains("bsd") || os.contains("dragonfly") {
            Some(OsKind::Linux)
        } else if os.contains("darwin") || os.contains("macos") {
            Some(OsKind::MacOs)
        } else if os.contains("windows") || os.contains("mswin") || os.contains("mingw") {
            Some(OsKind::Windows)
        } else {
            None
        }
    }

    /// Classify the host this process runs on
    pub fn current() -> Result<Self, PlatformError> {
        Self::from_os_str(env::consts::OS)
            .ok_or_else(|| PlatformError::UnsupportedPlatform(env::consts::OS.to_string()))
    }
}

impl fmt::Display for OsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsKind::Linux => write!(f, "linux"),
            OsKind::MacOs => write!(f, "macos"),
            OsKind::Windows => write!(f, "windows"),
        }
    }
}

/// The environment values base directories are derived from
///
/// Captured once so resolution is a pure function of its inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    pub home: Option<PathBuf>,
    pub app_data: Option<PathBuf>,
    pub xdg_config_home: Option<PathBuf>,
    pub xdg_cache_home: Option<PathBuf>,
    pub xdg_data_home: Option<PathBuf>,
}

impl EnvSnapshot {
    /// An empty snapshot; fill it with the `with_*` methods
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the relevant variables from the process environment
    pub fn from_env() -> Self {
        let home = non_empty(env::var_os("HOME")).or_else(|| non_empty(env::var_os("USERPROFILE")));
        Self {
            home,
            app_data: non_empty(env::var_os("APPDATA")),
            xdg_config_home: non_empty(env::var_os("XDG_CONFIG_HOME")),
            xdg_cache_home: non_empty(env::var_os("XDG_CACHE_HOME")),
            xdg_data_home: non_empty(env::var_os("XDG_DATA_HOME")),
        }
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn with_app_data(mut self, app_data: impl Into<PathBuf>) -> Self {
        self.app_data = Some(app_data.into());
        self
    }

    pub fn with_xdg_config_home(mut self, dir: impl Into<PathBuf>) -> Self {
        self.xdg_config_home = Some(dir.into());
        self
    }

    pub fn with_xdg_cache_home(mut self, dir: impl Into<PathBuf>) -> Self {
        self.xdg_cache_home = Some(dir.into());
        self
    }

    pub fn with_xdg_data_home(mut self, dir: impl Into<PathBuf>) -> Self {
        self.xdg_data_home = Some(dir.into());
        self
    }
}

fn non_empty(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// The three base directories of one application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseDirs {
    pub config_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl BaseDirs {
    /// Get the directory backing one store kind
    pub fn dir(&self, kind: StoreKind) -> &Path {
        match kind {
            StoreKind::Config => &self.config_dir,
            StoreKind::Cache => &self.cache_dir,
            StoreKind::Data => &self.data_dir,
        }
    }

    /// Replace the directory backing one store kind
    pub fn set_dir(&mut self, kind: StoreKind, dir: PathBuf) {
        match kind {
            StoreKind::Config => self.config_dir = dir,
            StoreKind::Cache => self.cache_dir = dir,
            StoreKind::Data => self.data_dir = dir,
        }
    }
}

/// Derives base directories from OS conventions
///
/// | OS      | config                          | cache                     | data                                  |
/// |---------|---------------------------------|---------------------------|---------------------------------------|
/// | Linux   | `$HOME/.config/<app>`           | `$HOME/.cache/<app>`      | `$HOME/.local/share/<app>`            |
/// | macOS   | `$HOME/Library/Preferences/<app>` | `$HOME/Library/Caches/<app>` | `$HOME/Library/Application Support/<app>` |
/// | Windows | `%APPDATA%/<app>/Config`        | `%APPDATA%/<app>/Cache`   | `%APPDATA%/<app>/Data`                |
///
/// On Linux an absolute `XDG_CONFIG_HOME`, `XDG_CACHE_HOME`, or
/// `XDG_DATA_HOME` replaces the matching `$HOME` root.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformResolver;

impl PlatformResolver {
    pub fn resolve(os: OsKind, app_name: &str, env: &EnvSnapshot) -> Result<BaseDirs, PlatformError> {
        let dirs = match os {
            OsKind::Linux => {
                let home = || require(&env.home, "HOME", os);
                let config_root = match xdg_root(&env.xdg_config_home) {
                    Some(root) => root,
                    None => home()?.join(".config"),
                };
                let cache_root = match xdg_root(&env.xdg_cache_home) {
                    Some(root) => root,
                    None => home()?.join(".cache"),
                };
                let data_root = match xdg_root(&env.xdg_data_home) {
                    Some(root) => root,
                    None => home()?.join(".local").join("share"),
                };
                BaseDirs {
                    config_dir: config_root.join(app_name),
                    cache_dir: cache_root.join(app_name),
                    data_dir: data_root.join(app_name),
                }
            }
            OsKind::MacOs => {
                let library = require(&env.home, "HOME", os)?.join("Library");
                BaseDirs {
                    config_dir: library.join("Preferences").join(app_name),
                    cache_dir: library.join("Caches").join(app_name),
                    data_dir: library.join("Application Support").join(app_name),
                }
            }
            OsKind::Windows => {
                let app_root = require(&env.app_data, "APPDATA", os)?.join(app_name);
                BaseDirs {
                    config_dir: app_root.join("Config"),
                    cache_dir: app_root.join("Cache"),
                    data_dir: app_root.join("Data"),
                }
            }
        };
        log::debug!("Resolved {} directories for '{}': {:?}", os, app_name, dirs);
        Ok(dirs)
    }

    /// Resolve for the host OS using the process environment
    pub fn resolve_current(app_name: &str) -> Result<BaseDirs, PlatformError> {
        Self::resolve(OsKind::current()?, app_name, &EnvSnapshot::from_env())
    }
}

fn require<'a>(
    value: &'a Option<PathBuf>,
    var: &'static str,
    os: OsKind,
) -> Result<&'a PathBuf, PlatformError> {
    value
        .as_ref()
        .ok_or(PlatformError::MissingEnvironment { var, os })
}

// XDG base directories must be absolute; relative values are ignored.
fn xdg_root(value: &Option<PathBuf>) -> Option<PathBuf> {
    value.as_ref().filter(|p| p.is_absolute()).cloned()
}
