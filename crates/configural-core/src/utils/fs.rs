use std::path::{Path, PathBuf};

use crate::kernel::error::Result;
use crate::storage::provider::StorageProvider;

/// Find files recursively in a directory that match a predicate
///
/// A missing `path` yields no files; a `path` that is itself a file is
/// checked against the predicate directly.
pub fn find_files<F>(provider: &dyn StorageProvider, path: &Path, predicate: &F) -> Result<Vec<PathBuf>>
where
    F: Fn(&Path) -> bool + ?Sized,
{
    let mut result = Vec::new();

    if !provider.exists(path) {
        return Ok(result);
    }

    if provider.is_file(path) {
        if predicate(path) {
            result.push(path.to_path_buf());
        }
        return Ok(result);
    }

    for entry_path in provider.read_dir(path)? {
        if provider.is_file(&entry_path) {
            if predicate(&entry_path) {
                result.push(entry_path);
            }
        } else if provider.is_dir(&entry_path) {
            let mut sub_results = find_files(provider, &entry_path, predicate)?;
            result.append(&mut sub_results);
        }
    }

    Ok(result)
}

/// Find files whose extension satisfies `accept` (extension passed with leading dot)
pub fn find_files_with_extension<F>(
    provider: &dyn StorageProvider,
    path: &Path,
    accept: F,
) -> Result<Vec<PathBuf>>
where
    F: Fn(&str) -> bool,
{
    find_files(provider, path, &|p: &Path| match p.extension() {
        Some(ext) => accept(&format!(".{}", ext.to_string_lossy())),
        None => false,
    })
}
