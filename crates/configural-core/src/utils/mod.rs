//! Filesystem and logical-name helpers shared by the storage layer.
pub mod fs;
pub mod path;

pub use fs::{find_files, find_files_with_extension};
pub use path::{file_extension, normalize_logical_name, relative_name};
