use std::io::Cursor;

use ::plist::{Date, Dictionary, Integer, Value as PlistValue};
use serde_json::{Number, Value};

use crate::codec::error::CodecError;
use crate::codec::is_blank;
use crate::codec::traits::Codec;
use crate::storage::config::{ConfigData, Mapping};

/// Property list format (.plist) - requires "plist-config" feature
///
/// Reads XML and binary property lists, always writes XML. Dates read as
/// their XML string form and are written back as dates. `<data>` blobs read
/// as sequences of byte values.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlistCodec;

impl Codec for PlistCodec {
    fn format_name(&self) -> &str {
        "plist"
    }

    fn extensions(&self) -> &[&str] {
        &[".plist"]
    }

    fn decode(&self, bytes: &[u8]) -> Result<ConfigData, CodecError> {
        if is_blank(bytes) {
            return Ok(ConfigData::new());
        }
        let value = PlistValue::from_reader(Cursor::new(bytes))
            .map_err(|e| CodecError::decode(self.format_name(), e))?;
        match value {
            PlistValue::Dictionary(dict) => dictionary_to_mapping(dict)
                .map(ConfigData::from_map)
                .map_err(|e| CodecError::decode(self.format_name(), e)),
            _ => Err(CodecError::decode(
                self.format_name(),
                "top-level value must be a dictionary",
            )),
        }
    }

    fn encode(&self, data: &ConfigData) -> Result<Vec<u8>, CodecError> {
        let dict = mapping_to_dictionary(data.as_map())
            .map_err(|e| CodecError::encode(self.format_name(), e))?;
        let mut bytes = Vec::new();
        PlistValue::Dictionary(dict)
            .to_writer_xml(&mut bytes)
            .map_err(|e| CodecError::encode(self.format_name(), e))?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

fn dictionary_to_mapping(dict: Dictionary) -> Result<Mapping, String> {
    dict.into_iter()
        .map(|(key, value)| plist_to_json(value).map(|value| (key, value)))
        .collect()
}

fn plist_to_json(value: PlistValue) -> Result<Value, String> {
    Ok(match value {
        PlistValue::String(s) => Value::String(s),
        PlistValue::Boolean(b) => Value::Bool(b),
        PlistValue::Integer(i) => match (i.as_signed(), i.as_unsigned()) {
            (Some(n), _) => Value::from(n),
            (None, Some(n)) => Value::from(n),
            (None, None) => return Err(format!("integer {:?} is out of range", i)),
        },
        PlistValue::Real(f) => Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| format!("real {} has no mapping equivalent", f))?,
        PlistValue::Date(date) => Value::String(date.to_xml_format()),
        PlistValue::Data(bytes) => Value::Array(bytes.into_iter().map(Value::from).collect()),
        PlistValue::Uid(uid) => Value::from(uid.get()),
        PlistValue::Array(items) => Value::Array(
            items
                .into_iter()
                .map(plist_to_json)
                .collect::<Result<_, _>>()?,
        ),
        PlistValue::Dictionary(dict) => Value::Object(dictionary_to_mapping(dict)?),
        other => return Err(format!("unsupported property list value {:?}", other)),
    })
}

fn mapping_to_dictionary(map: &Mapping) -> Result<Dictionary, String> {
    map.iter()
        .map(|(key, value)| json_to_plist(key, value).map(|value| (key.clone(), value)))
        .collect()
}

fn json_to_plist(key: &str, value: &Value) -> Result<PlistValue, String> {
    Ok(match value {
        Value::Null => {
            return Err(format!("'{}' is null, which a property list cannot represent", key));
        }
        Value::Bool(b) => PlistValue::Boolean(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                PlistValue::Integer(Integer::from(i))
            } else if let Some(u) = n.as_u64() {
                PlistValue::Integer(Integer::from(u))
            } else {
                PlistValue::Real(n.as_f64().unwrap_or_default())
            }
        }
        Value::String(s) => match as_date(s) {
            Some(date) => PlistValue::Date(date),
            None => PlistValue::String(s.clone()),
        },
        Value::Array(items) => PlistValue::Array(
            items
                .iter()
                .map(|item| json_to_plist(key, item))
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(map) => PlistValue::Dictionary(mapping_to_dictionary(map)?),
    })
}

// Only strings that print back identically, so decode(encode(m)) == m.
fn as_date(s: &str) -> Option<Date> {
    Date::from_xml_format(s)
        .ok()
        .filter(|date| date.to_xml_format() == s)
}
