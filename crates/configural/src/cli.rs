use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use configural_core::StoreKind;
use configural_core::kernel::constants::{LIB_NAME, LIB_VERSION};

/// Configural: inspect and edit an application's config, cache, and data files
#[derive(Parser, Debug)]
#[command(name = LIB_NAME, version = LIB_VERSION, author, about, long_about = None)]
pub struct CliArgs {
    /// Application name used to locate the base directories
    #[arg(long)]
    pub app: String,

    /// Which store the file commands operate on
    #[arg(long, value_enum, default_value_t = StoreArg::Config)]
    pub store: StoreArg,

    /// Default format for names without an extension
    #[arg(long)]
    pub format: Option<String>,

    /// Override the config directory
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Override the cache directory
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Override the data directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the resolved base directories
    Paths,
    /// Print the value of a key as JSON
    Get {
        /// Logical file name, with or without extension
        file: String,
        key: String,
    },
    /// Set a key and save the file
    Set {
        /// Logical file name, with or without extension
        file: String,
        key: String,
        /// Parsed as JSON, otherwise stored as a string
        value: String,
    },
    /// Print the keys of a file in order
    Keys {
        /// Logical file name, with or without extension
        file: String,
    },
    /// List the files in the store directory that a codec can read
    List,
    /// Remove a file from disk
    Delete {
        /// Logical file name, with or without extension
        file: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreArg {
    Config,
    Cache,
    Data,
}

impl From<StoreArg> for StoreKind {
    fn from(arg: StoreArg) -> Self {
        match arg {
            StoreArg::Config => StoreKind::Config,
            StoreArg::Cache => StoreKind::Cache,
            StoreArg::Data => StoreKind::Data,
        }
    }
}
