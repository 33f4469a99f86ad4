use serde_json::Value;

use crate::codec::error::CodecError;
use crate::codec::traits::Codec;
use crate::codec::{into_config_data, is_blank};
use crate::storage::config::ConfigData;

/// JSON format (.json), written pretty-printed
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn format_name(&self) -> &str {
        "json"
    }

    fn extensions(&self) -> &[&str] {
        &[".json"]
    }

    fn decode(&self, bytes: &[u8]) -> Result<ConfigData, CodecError> {
        if is_blank(bytes) {
            return Ok(ConfigData::new());
        }
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| CodecError::decode(self.format_name(), e))?;
        into_config_data(value, self.format_name())
    }

    fn encode(&self, data: &ConfigData) -> Result<Vec<u8>, CodecError> {
        let mut bytes = serde_json::to_vec_pretty(data)
            .map_err(|e| CodecError::encode(self.format_name(), e))?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}
