use serde_json::Value;

use crate::codec::error::CodecError;
use crate::codec::traits::Codec;
use crate::codec::{into_config_data, is_blank};
use crate::storage::config::ConfigData;

/// YAML format (.yml, .yaml) - requires "yaml-config" feature
///
/// New files get the `.yml` spelling; existing `.yaml` files are still found.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    fn format_name(&self) -> &str {
        "yaml"
    }

    fn extensions(&self) -> &[&str] {
        &[".yml", ".yaml"]
    }

    fn decode(&self, bytes: &[u8]) -> Result<ConfigData, CodecError> {
        if is_blank(bytes) {
            return Ok(ConfigData::new());
        }
        let value: Value =
            serde_yaml::from_slice(bytes).map_err(|e| CodecError::decode(self.format_name(), e))?;
        into_config_data(value, self.format_name())
    }

    fn encode(&self, data: &ConfigData) -> Result<Vec<u8>, CodecError> {
        serde_yaml::to_string(data)
            .map(String::into_bytes)
            .map_err(|e| CodecError::encode(self.format_name(), e))
    }
}
