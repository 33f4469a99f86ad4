use std::fmt::Debug;

use crate::codec::error::CodecError;
use crate::storage::config::ConfigData;

/// A named, stateless transformer between raw bytes and [`ConfigData`]
///
/// Implementations are registered with a [`CodecRegistry`](crate::codec::CodecRegistry)
/// and looked up either by [`format_name`](Codec::format_name) or by one of
/// their [`extensions`](Codec::extensions).
pub trait Codec: Send + Sync + Debug {
    /// Short format name, e.g. `"yaml"`
    fn format_name(&self) -> &str;

    /// Recognized file extensions including the leading dot, in preference order
    ///
    /// The first entry is used when a brand-new file has to be created.
    fn extensions(&self) -> &[&str];

    /// Decode file contents into a mapping
    fn decode(&self, bytes: &[u8]) -> Result<ConfigData, CodecError>;

    /// Encode a mapping into file contents
    fn encode(&self, data: &ConfigData) -> Result<Vec<u8>, CodecError>;

    /// Check whether this codec claims the given extension (with or without leading dot)
    fn recognizes(&self, extension: &str) -> bool {
        let extension = normalize_extension(extension);
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(&extension))
    }
}

/// Ensure an extension carries exactly one leading dot
pub fn normalize_extension(extension: &str) -> String {
    format!(".{}", extension.trim_start_matches('.'))
}
