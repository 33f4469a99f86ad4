use std::path::PathBuf;

use crate::platform::error::PlatformError;
use crate::platform::resolver::{BaseDirs, EnvSnapshot, OsKind, PlatformResolver};
use crate::storage::store::StoreKind;

fn home_env() -> EnvSnapshot {
    EnvSnapshot::new().with_home("/home/u")
}

#[test]
fn test_linux_dirs() {
    let dirs = PlatformResolver::resolve(OsKind::Linux, "myapp", &home_env()).unwrap();
    assert_eq!(dirs.config_dir, PathBuf::from("/home/u/.config/myapp"));
    assert_eq!(dirs.cache_dir, PathBuf::from("/home/u/.cache/myapp"));
    assert_eq!(dirs.data_dir, PathBuf::from("/home/u/.local/share/myapp"));
}

#[test]
fn test_macos_dirs() {
    let dirs = PlatformResolver::resolve(OsKind::MacOs, "myapp", &home_env()).unwrap();
    assert_eq!(dirs.config_dir, PathBuf::from("/home/u/Library/Preferences/myapp"));
    assert_eq!(dirs.cache_dir, PathBuf::from("/home/u/Library/Caches/myapp"));
    assert_eq!(
        dirs.data_dir,
        PathBuf::from("/home/u/Library/Application Support/myapp")
    );
}

#[test]
fn test_windows_dirs() {
    let app_data = PathBuf::from(r"C:\Users\u\AppData\Roaming");
    let env = EnvSnapshot::new().with_app_data(app_data.clone());
    let dirs = PlatformResolver::resolve(OsKind::Windows, "myapp", &env).unwrap();

    let root = app_data.join("myapp");
    assert_eq!(dirs.config_dir, root.join("Config"));
    assert_eq!(dirs.cache_dir, root.join("Cache"));
    assert_eq!(dirs.data_dir, root.join("Data"));
}

#[test]
fn test_xdg_overrides_on_linux() {
    let env = home_env()
        .with_xdg_config_home("/xdg/config")
        .with_xdg_data_home("/xdg/data");
    let dirs = PlatformResolver::resolve(OsKind::Linux, "myapp", &env).unwrap();

    assert_eq!(dirs.config_dir, PathBuf::from("/xdg/config/myapp"));
    assert_eq!(dirs.cache_dir, PathBuf::from("/home/u/.cache/myapp"));
    assert_eq!(dirs.data_dir, PathBuf::from("/xdg/data/myapp"));
}

#[test]
fn test_relative_xdg_values_are_ignored() {
    let env = home_env().with_xdg_cache_home("relative/cache");
    let dirs = PlatformResolver::resolve(OsKind::Linux, "myapp", &env).unwrap();
    assert_eq!(dirs.cache_dir, PathBuf::from("/home/u/.cache/myapp"));
}

#[test]
fn test_xdg_ignored_on_macos() {
    let env = home_env().with_xdg_config_home("/xdg/config");
    let dirs = PlatformResolver::resolve(OsKind::MacOs, "myapp", &env).unwrap();
    assert_eq!(dirs.config_dir, PathBuf::from("/home/u/Library/Preferences/myapp"));
}

#[test]
fn test_full_xdg_needs_no_home() {
    let env = EnvSnapshot::new()
        .with_xdg_config_home("/c")
        .with_xdg_cache_home("/k")
        .with_xdg_data_home("/d");
    let dirs = PlatformResolver::resolve(OsKind::Linux, "myapp", &env).unwrap();
    assert_eq!(dirs.cache_dir, PathBuf::from("/k/myapp"));
}

#[test]
fn test_missing_environment() {
    match PlatformResolver::resolve(OsKind::Linux, "myapp", &EnvSnapshot::new()) {
        Err(PlatformError::MissingEnvironment { var, os }) => {
            assert_eq!(var, "HOME");
            assert_eq!(os, OsKind::Linux);
        }
        other => panic!("Expected MissingEnvironment, got {:?}", other),
    }

    // HOME alone does not help on Windows
    match PlatformResolver::resolve(OsKind::Windows, "myapp", &home_env()) {
        Err(PlatformError::MissingEnvironment { var, .. }) => assert_eq!(var, "APPDATA"),
        other => panic!("Expected MissingEnvironment, got {:?}", other),
    }
}

#[test]
fn test_os_classification() {
    assert_eq!(OsKind::from_os_str("linux"), Some(OsKind::Linux));
    assert_eq!(OsKind::from_os_str("x86_64-unknown-linux-gnu"), Some(OsKind::Linux));
    assert_eq!(OsKind::from_os_str("freebsd"), Some(OsKind::Linux));
    assert_eq!(OsKind::from_os_str("openbsd"), Some(OsKind::Linux));
    assert_eq!(OsKind::from_os_str("x86_64-apple-darwin"), Some(OsKind::MacOs));
    assert_eq!(OsKind::from_os_str("macos"), Some(OsKind::MacOs));
    assert_eq!(OsKind::from_os_str("windows"), Some(OsKind::Windows));
    assert_eq!(OsKind::from_os_str("x86_64-pc-mingw32"), Some(OsKind::Windows));
    assert_eq!(OsKind::from_os_str("haiku"), None);
}

#[cfg(target_os = "linux")]
#[test]
fn test_current_os_is_supported() {
    assert_eq!(OsKind::current().unwrap(), OsKind::Linux);
}

#[test]
fn test_unsupported_platform_message() {
    let error = PlatformError::UnsupportedPlatform("haiku".to_string());
    assert_eq!(
        error.to_string(),
        "Sorry, your operating system (haiku) is not yet supported"
    );
}

#[test]
fn test_base_dirs_by_kind() {
    let mut dirs = BaseDirs {
        config_dir: PathBuf::from("/c"),
        cache_dir: PathBuf::from("/k"),
        data_dir: PathBuf::from("/d"),
    };
    assert_eq!(dirs.dir(StoreKind::Cache), PathBuf::from("/k"));

    dirs.set_dir(StoreKind::Data, PathBuf::from("/elsewhere"));
    assert_eq!(dirs.dir(StoreKind::Data), PathBuf::from("/elsewhere"));
    assert_eq!(dirs.dir(StoreKind::Config), PathBuf::from("/c"));
}
