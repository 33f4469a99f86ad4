#![cfg(test)]

use std::sync::Arc;

use serde_json::json;
use tempfile::tempdir;

use crate::kernel::bootstrap::Application;
use crate::kernel::error::Result;
use crate::storage::store::StoreKind;
use crate::tests::integration::common::DeniedProvider;

#[test]
fn test_application_end_to_end() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let root = temp_dir.path();

    let app = Application::builder("myapp")
        .config_dir(root.join("config"))
        .cache_dir(root.join("cache"))
        .data_dir(root.join("data"))
        .default_format("json")
        .build()?;

    let settings = app.config().get("settings")?;
    settings.set("theme", "dark");
    app.cache().raw("blob.bin")?.write(b"\x00\x01")?;
    app.save_all();

    // A second application over the same directories reads it all back
    let again = Application::builder("myapp")
        .config_dir(root.join("config"))
        .cache_dir(root.join("cache"))
        .data_dir(root.join("data"))
        .default_format("json")
        .build()?;

    assert_eq!(again.config().get("settings")?.get("theme"), Some(json!("dark")));
    assert_eq!(again.cache().raw("blob.bin")?.read()?, vec![0u8, 1]);
    assert_eq!(again.config().list_files()?, vec!["settings.json"]);
    assert!(again.store(StoreKind::Data).list_files()?.is_empty());
    Ok(())
}

#[test]
fn test_unwritable_provider_keeps_data_in_memory() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = Arc::new(DeniedProvider::read_only());

    let app = Application::builder("myapp")
        .config_dir(temp_dir.path())
        .cache_dir(temp_dir.path())
        .data_dir(temp_dir.path())
        .default_format("json")
        .provider(provider.clone())
        .build()?;

    let settings = app.config().get("settings")?;
    settings.set("theme", "dark");
    app.save_all();

    assert_eq!(provider.writes_attempted(), 1);
    assert!(!settings.exists());
    assert_eq!(settings.get("theme"), Some(json!("dark")));
    Ok(())
}
