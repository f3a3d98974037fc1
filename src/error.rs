use std::path::PathBuf;

use thiserror::Error;

/// Error taxonomy for token issuance. A cache miss is not an error; it is
/// the `Ok(None)` arm of the cache read path.
#[derive(Error, Debug)]
pub enum TokenError {
    /// A required auth context field is empty
    #[error("auth context field '{field}' must not be empty")]
    MissingContextField { field: &'static str },

    /// The numeric token version has no known context variant
    #[error("unsupported token version {actual}")]
    UnsupportedVersion { actual: u8 },

    /// Configured token version and supplied context variant disagree
    #[error("token version {expected} does not match auth context version {actual}")]
    VersionMismatch { expected: u8, actual: u8 },

    #[error("could not read token cache file {path}: {source}")]
    CacheRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Cache file is present but unparsable. Fatal: falling back silently
    /// would mask a data-integrity problem.
    #[error("token cache file {path} is corrupt: {reason}")]
    CacheCorrupt { path: PathBuf, reason: String },

    #[error("could not persist token cache file {path}: {reason}")]
    CachePersist { path: PathBuf, reason: String },

    /// Timestamp does not parse under the configured wire time format
    #[error("could not parse wire timestamp '{value}': {reason}")]
    WireTime { value: String, reason: String },

    #[error("could not serialize token data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("sealing with key '{key_id}' failed: {reason}")]
    Sealing { key_id: String, reason: String },

    #[error("unsealing failed: {reason}")]
    Unsealing { reason: String },
}
