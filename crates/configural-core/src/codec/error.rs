//! # Codec Errors
//!
//! [`CodecError`] covers registry lookups that name a format or file
//! extension nobody registered, and failures of an individual codec to
//! turn bytes into a mapping or back.
use thiserror::Error;

/// Boxed source error carried by decode/encode failures
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Unrecognized file format: {0}")]
    UnknownFormat(String),

    #[error("Unrecognized file extension: {0}")]
    UnknownExtension(String),

    #[error("Decoding from '{format}' failed: {source}")]
    Decode {
        format: String,
        #[source]
        source: BoxedSource,
    },

    #[error("Encoding to '{format}' failed: {source}")]
    Encode {
        format: String,
        #[source]
        source: BoxedSource,
    },
}

impl CodecError {
    pub fn decode(format: impl Into<String>, source: impl Into<BoxedSource>) -> Self {
        CodecError::Decode {
            format: format.into(),
            source: source.into(),
        }
    }

    pub fn encode(format: impl Into<String>, source: impl Into<BoxedSource>) -> Self {
        CodecError::Encode {
            format: format.into(),
            source: source.into(),
        }
    }
}
