#![cfg(test)]

use std::fs;

use serde_json::json;
use tempfile::tempdir;

use crate::kernel::error::Result;
use crate::tests::integration::common::{json_store, store_with_format};

#[test]
fn test_settings_roundtrip_through_disk() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("settings.json");

    {
        let store = json_store(temp_dir.path());
        let settings = store.get("settings")?;
        settings.set("theme", "dark");
        settings.save();
    }

    let on_disk: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk, json!({"theme": "dark"}));

    // A fresh store sees what the first one wrote
    let store = json_store(temp_dir.path());
    assert_eq!(store.get("settings")?.get("theme"), Some(json!("dark")));
    Ok(())
}

#[test]
fn test_recover_from_corrupt_file() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("settings.json");
    fs::write(&path, "}}} garbage").unwrap();

    let store = json_store(temp_dir.path());
    let settings = store.get("settings")?;
    assert!(settings.is_empty());

    // Writing over the corrupt file repairs it
    settings.set("theme", "dark");
    settings.save();

    settings.close();
    assert_eq!(settings.get("theme"), Some(json!("dark")));
    Ok(())
}

#[test]
fn test_mixed_formats_in_one_store() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let store = store_with_format(temp_dir.path(), "json");

    store.get("main")?.set("k", "json");
    store.get("extra.dual")?.set("k", "dual");
    store.save_all();

    assert_eq!(store.list_files()?, vec!["extra.dual", "main.json"]);
    Ok(())
}

#[cfg(feature = "yaml-config")]
#[test]
fn test_existing_yaml_spelling_is_reused() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    fs::write(temp_dir.path().join("settings.yaml"), "theme: light\n").unwrap();

    let store = store_with_format(temp_dir.path(), "yaml");
    let settings = store.get("settings")?;
    assert_eq!(settings.get("theme"), Some(json!("light")));

    settings.set("theme", "dark");
    settings.save();

    // Saved back to the file it came from, no .yml created
    assert!(!temp_dir.path().join("settings.yml").exists());
    let text = fs::read_to_string(temp_dir.path().join("settings.yaml")).unwrap();
    assert!(text.contains("theme: dark"));
    Ok(())
}

#[cfg(feature = "yaml-config")]
#[test]
fn test_new_yaml_file_uses_first_extension() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let store = store_with_format(temp_dir.path(), "yaml");

    let settings = store.get("settings")?;
    settings.set("theme", "dark");
    settings.save();

    assert!(temp_dir.path().join("settings.yml").is_file());
    Ok(())
}

#[cfg(feature = "toml-config")]
#[test]
fn test_toml_file_by_extension() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    fs::write(
        temp_dir.path().join("Cargo.toml"),
        "[package]\nname = \"demo\"\nversion = \"0.1.0\"\n",
    )
    .unwrap();

    let store = json_store(temp_dir.path());
    let manifest = store.get("Cargo.toml")?;
    assert_eq!(manifest.format_name(), "toml");
    assert_eq!(manifest.get("package"), Some(json!({"name": "demo", "version": "0.1.0"})));
    Ok(())
}
