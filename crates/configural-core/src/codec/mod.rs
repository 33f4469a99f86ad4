//! # Configural Codecs
//!
//! A codec turns the bytes of one file into a [`ConfigData`] mapping and
//! back. Codecs are plugged into a [`CodecRegistry`], which the stores
//! consult to pick a codec either by format name (the store's default
//! format) or by the extension of a logical file name.
//!
//! Built-in codecs: [`JsonCodec`] always, [`TomlCodec`] with the
//! `toml-config` feature, [`YamlCodec`] with the `yaml-config` feature,
//! [`PlistCodec`] with the `plist-config` feature.
pub mod error;
pub mod json;
#[cfg(feature = "plist-config")]
pub mod plist;
pub mod registry;
#[cfg(feature = "toml-config")]
pub mod toml;
pub mod traits;
#[cfg(feature = "yaml-config")]
pub mod yaml;

pub use error::CodecError;
pub use json::JsonCodec;
#[cfg(feature = "plist-config")]
pub use plist::PlistCodec;
pub use registry::CodecRegistry;
#[cfg(feature = "toml-config")]
pub use toml::TomlCodec;
pub use traits::Codec;
#[cfg(feature = "yaml-config")]
pub use yaml::YamlCodec;

use serde_json::Value;

use crate::storage::config::ConfigData;

/// Whitespace-only input decodes to an empty mapping in every format
pub(crate) fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(|b| b.is_ascii_whitespace())
}

/// Accept a decoded document only if its top level is a mapping
///
/// An explicit null document counts as empty.
pub(crate) fn into_config_data(value: Value, format: &str) -> Result<ConfigData, CodecError> {
    match value {
        Value::Object(map) => Ok(ConfigData::from_map(map)),
        Value::Null => Ok(ConfigData::new()),
        other => Err(CodecError::decode(
            format,
            format!("top-level value must be a mapping, found {}", kind_of(&other)),
        )),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
