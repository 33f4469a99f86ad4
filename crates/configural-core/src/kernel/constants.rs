/// Library name
pub const LIB_NAME: &str = "configural";

/// Library version
pub const LIB_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Format used for logical names without an extension, unless configured otherwise
#[cfg(feature = "yaml-config")]
pub const DEFAULT_FORMAT: &str = "yaml";

/// Format used for logical names without an extension, unless configured otherwise
#[cfg(not(feature = "yaml-config"))]
pub const DEFAULT_FORMAT: &str = "json";

/// Whether stores defer reading files until first access
pub const DEFAULT_LAZY_LOADING: bool = true;
