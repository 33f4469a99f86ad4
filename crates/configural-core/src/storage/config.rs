use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec::error::CodecError;
use crate::kernel::error::Result;

/// Ordered string-keyed mapping every codec decodes to and encodes from
pub type Mapping = Map<String, Value>;

/// In-memory representation of one structured file
///
/// Keys keep their insertion order, so encoding the same data twice
/// produces the same bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigData {
    /// Raw configuration values
    values: Mapping,
}

impl ConfigData {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self {
            values: Mapping::new(),
        }
    }

    /// Create a configuration from an existing mapping
    pub fn from_map(values: Mapping) -> Self {
        Self { values }
    }

    /// Borrow the underlying mapping
    pub fn as_map(&self) -> &Mapping {
        &self.values
    }

    /// Consume and return the underlying mapping
    pub fn into_map(self) -> Mapping {
        self.values
    }

    /// Get a raw configuration value
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Get a configuration value converted to `T`
    ///
    /// Returns `None` both when the key is absent and when the stored value
    /// does not have the shape of `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.values
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Get a configuration value with default
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Set a configuration value from anything serializable
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let value = serde_json::to_value(value).map_err(|e| CodecError::encode("value", e))?;
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    /// Insert a raw value, returning the previous one
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(key.into(), value)
    }

    /// Remove a configuration value
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.shift_remove(key)
    }

    /// Check if key exists
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Get all keys in order
    pub fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over entries in order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Merge with another config, overriding existing values
    pub fn merge(&mut self, other: &ConfigData) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }
}

impl From<Mapping> for ConfigData {
    fn from(values: Mapping) -> Self {
        Self::from_map(values)
    }
}

impl From<ConfigData> for Value {
    fn from(data: ConfigData) -> Self {
        Value::Object(data.values)
    }
}

impl<'a> IntoIterator for &'a ConfigData {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
