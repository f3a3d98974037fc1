use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// Encryption context handed to the sealing service and stored alongside a
/// cached token. Values are nullable on the wire, so the map carries
/// `Option<String>` even though contexts built here always fill them in.
pub type SealContext = HashMap<String, Option<String>>;

/// Version tag of an auth context / token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TokenVersion {
    V1,
    V2,
}

impl From<TokenVersion> for u8 {
    fn from(version: TokenVersion) -> u8 {
        match version {
            TokenVersion::V1 => 1,
            TokenVersion::V2 => 2,
        }
    }
}

impl TryFrom<u8> for TokenVersion {
    type Error = TokenError;

    fn try_from(value: u8) -> Result<Self, TokenError> {
        match value {
            1 => Ok(TokenVersion::V1),
            2 => Ok(TokenVersion::V2),
            actual => Err(TokenError::UnsupportedVersion { actual }),
        }
    }
}

impl fmt::Display for TokenVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// Identity descriptor bound into every sealed token. New versions extend
/// the tag set; every accessor matches exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    V1 {
        from: String,
        to: String,
    },
    V2 {
        from: String,
        to: String,
        user_type: String,
    },
}

impl AuthContext {
    pub fn version(&self) -> TokenVersion {
        match self {
            AuthContext::V1 { .. } => TokenVersion::V1,
            AuthContext::V2 { .. } => TokenVersion::V2,
        }
    }

    /// Check that every required field is non-empty.
    pub fn validate(&self) -> Result<(), TokenError> {
        match self {
            AuthContext::V1 { from, to } => {
                require_field("from", from)?;
                require_field("to", to)
            }
            AuthContext::V2 {
                from,
                to,
                user_type,
            } => {
                require_field("from", from)?;
                require_field("to", to)?;
                require_field("user_type", user_type)
            }
        }
    }

    /// Human-readable principal name, for display and audit only. Cache
    /// validity is decided by `seal_context`, never by this string.
    pub fn principal(&self) -> String {
        match self {
            AuthContext::V1 { from, .. } => from.clone(),
            AuthContext::V2 {
                from, user_type, ..
            } => format!("{}/{}/{}", TokenVersion::V2, user_type, from),
        }
    }

    /// Field name to value map used as the seal's authenticated context and
    /// as the unit of cache-key comparison.
    pub fn seal_context(&self) -> SealContext {
        match self {
            AuthContext::V1 { from, to } => HashMap::from([
                ("from".to_string(), Some(from.clone())),
                ("to".to_string(), Some(to.clone())),
            ]),
            AuthContext::V2 {
                from,
                to,
                user_type,
            } => HashMap::from([
                ("from".to_string(), Some(from.clone())),
                ("to".to_string(), Some(to.clone())),
                ("user_type".to_string(), Some(user_type.clone())),
            ]),
        }
    }
}

fn require_field(field: &'static str, value: &str) -> Result<(), TokenError> {
    if value.is_empty() {
        return Err(TokenError::MissingContextField { field });
    }
    Ok(())
}
