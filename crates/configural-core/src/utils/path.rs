use std::path::{Component, Path};

use crate::storage::error::StorageSystemError;

/// Extension of a logical name including the leading dot, if it has one
///
/// Follows `Path::extension`: `"app.yml"` gives `".yml"`, while `"app"` and
/// dotfiles such as `".hidden"` have none.
pub fn file_extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
}

/// Canonical form of a logical name, rejecting names that would not stay
/// inside a store's base directory
///
/// `.` components and repeated or trailing separators are dropped, so
/// `"./profiles//work/"` becomes `"profiles/work"`.
pub fn normalize_logical_name(name: &str) -> Result<String, StorageSystemError> {
    let invalid = |reason: &str| StorageSystemError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }
    let path = Path::new(name);
    if path.is_absolute() || path.has_root() {
        return Err(invalid("name must be relative to the store directory"));
    }
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::ParentDir => return Err(invalid("name must not contain '..'")),
            Component::Prefix(_) | Component::RootDir => {
                return Err(invalid("name must be relative to the store directory"));
            }
            Component::CurDir => {}
            Component::Normal(part) => parts.push(part.to_string_lossy()),
        }
    }
    if parts.is_empty() {
        return Err(invalid("name does not name a file"));
    }
    Ok(parts.join("/"))
}

/// Render `path` relative to `base` with forward slashes
pub fn relative_name(base: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(base).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
