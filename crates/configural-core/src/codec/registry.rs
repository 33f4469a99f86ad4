use std::fmt;
use std::sync::Arc;

use crate::codec::error::CodecError;
use crate::codec::traits::{normalize_extension, Codec};

/// Registry mapping format names and file extensions to codecs
///
/// Lookups search the most recently registered codec first, so a codec
/// registered later shadows an earlier one with the same format name or
/// extension. There is no removal.
#[derive(Clone, Default)]
pub struct CodecRegistry {
    /// Registered codecs in registration order
    codecs: Vec<Arc<dyn Codec>>,
}

impl CodecRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { codecs: Vec::new() }
    }

    /// Create a registry holding every codec compiled into this crate
    ///
    /// JSON is always present; TOML, YAML, and property lists depend on the
    /// `toml-config`, `yaml-config`, and `plist-config` features.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(crate::codec::json::JsonCodec);
        #[cfg(feature = "toml-config")]
        registry.register(crate::codec::toml::TomlCodec);
        #[cfg(feature = "yaml-config")]
        registry.register(crate::codec::yaml::YamlCodec);
        #[cfg(feature = "plist-config")]
        registry.register(crate::codec::plist::PlistCodec);
        registry
    }

    /// Register a codec
    pub fn register(&mut self, codec: impl Codec + 'static) {
        self.register_arc(Arc::new(codec));
    }

    /// Register an already shared codec
    pub fn register_arc(&mut self, codec: Arc<dyn Codec>) {
        log::debug!(
            "Registering codec '{}' for extensions {:?}",
            codec.format_name(),
            codec.extensions()
        );
        self.codecs.push(codec);
    }

    /// Find the codec registered under `format`
    pub fn lookup_by_name(&self, format: &str) -> Result<Arc<dyn Codec>, CodecError> {
        self.codecs
            .iter()
            .rev()
            .find(|codec| codec.format_name() == format)
            .cloned()
            .ok_or_else(|| CodecError::UnknownFormat(format.to_string()))
    }

    /// Find the codec claiming `extension` (given with or without leading dot)
    pub fn lookup_by_extension(&self, extension: &str) -> Result<Arc<dyn Codec>, CodecError> {
        self.codecs
            .iter()
            .rev()
            .find(|codec| codec.recognizes(extension))
            .cloned()
            .ok_or_else(|| CodecError::UnknownExtension(normalize_extension(extension)))
    }

    /// Check whether any codec claims `extension`
    pub fn recognizes(&self, extension: &str) -> bool {
        self.codecs.iter().any(|codec| codec.recognizes(extension))
    }

    /// Distinct format names, most recently registered first
    pub fn format_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for codec in self.codecs.iter().rev() {
            if !names.iter().any(|n| n == codec.format_name()) {
                names.push(codec.format_name().to_string());
            }
        }
        names
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("formats", &self.format_names())
            .finish()
    }
}
