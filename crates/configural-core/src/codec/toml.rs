use ::toml::value::Datetime;
use ::toml::{Table, Value as TomlValue};
use serde_json::{Number, Value};

use crate::codec::error::CodecError;
use crate::codec::is_blank;
use crate::codec::traits::Codec;
use crate::storage::config::{ConfigData, Mapping};

/// TOML format (.toml) - requires "toml-config" feature
///
/// Datetimes read as their TOML string form. On write, a string whose exact
/// form is a TOML datetime is written back as a datetime, so a
/// load-then-save keeps the file's types. TOML has no null, so encoding a
/// mapping that contains one fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlCodec;

impl Codec for TomlCodec {
    fn format_name(&self) -> &str {
        "toml"
    }

    fn extensions(&self) -> &[&str] {
        &[".toml"]
    }

    fn decode(&self, bytes: &[u8]) -> Result<ConfigData, CodecError> {
        if is_blank(bytes) {
            return Ok(ConfigData::new());
        }
        let text =
            std::str::from_utf8(bytes).map_err(|e| CodecError::decode(self.format_name(), e))?;
        let table: Table =
            ::toml::from_str(text).map_err(|e| CodecError::decode(self.format_name(), e))?;
        let map = table_to_mapping(table).map_err(|e| CodecError::decode(self.format_name(), e))?;
        Ok(ConfigData::from_map(map))
    }

    fn encode(&self, data: &ConfigData) -> Result<Vec<u8>, CodecError> {
        let table =
            mapping_to_table(data.as_map()).map_err(|e| CodecError::encode(self.format_name(), e))?;
        ::toml::to_string_pretty(&table)
            .map(String::into_bytes)
            .map_err(|e| CodecError::encode(self.format_name(), e))
    }
}

fn table_to_mapping(table: Table) -> Result<Mapping, String> {
    table
        .into_iter()
        .map(|(key, value)| toml_to_json(value).map(|value| (key, value)))
        .collect()
}

fn toml_to_json(value: TomlValue) -> Result<Value, String> {
    Ok(match value {
        TomlValue::String(s) => Value::String(s),
        TomlValue::Integer(i) => Value::from(i),
        TomlValue::Float(f) => Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| format!("float {} has no mapping equivalent", f))?,
        TomlValue::Boolean(b) => Value::Bool(b),
        TomlValue::Datetime(dt) => Value::String(dt.to_string()),
        TomlValue::Array(items) => Value::Array(
            items
                .into_iter()
                .map(toml_to_json)
                .collect::<Result<_, _>>()?,
        ),
        TomlValue::Table(table) => Value::Object(table_to_mapping(table)?),
    })
}

fn mapping_to_table(map: &Mapping) -> Result<Table, String> {
    map.iter()
        .map(|(key, value)| json_to_toml(key, value).map(|value| (key.clone(), value)))
        .collect()
}

fn json_to_toml(key: &str, value: &Value) -> Result<TomlValue, String> {
    Ok(match value {
        Value::Null => return Err(format!("'{}' is null, which TOML cannot represent", key)),
        Value::Bool(b) => TomlValue::Boolean(*b),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => TomlValue::Integer(i),
            (None, Some(f)) if !n.is_u64() => TomlValue::Float(f),
            _ => return Err(format!("'{}' is {}, too large for a TOML integer", key, n)),
        },
        Value::String(s) => match as_datetime(s) {
            Some(dt) => TomlValue::Datetime(dt),
            None => TomlValue::String(s.clone()),
        },
        Value::Array(items) => TomlValue::Array(
            items
                .iter()
                .map(|item| json_to_toml(key, item))
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(map) => TomlValue::Table(mapping_to_table(map)?),
    })
}

// Only strings that print back identically, so decode(encode(m)) == m.
fn as_datetime(s: &str) -> Option<Datetime> {
    s.parse::<Datetime>().ok().filter(|dt| dt.to_string() == s)
}
