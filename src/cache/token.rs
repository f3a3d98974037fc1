use std::fmt;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TokenError;
use crate::utils::constants::DEFAULT_WIRE_TIME_FORMAT;

/// Strftime-style format every wire timestamp is written and read with.
/// Carried in configuration rather than a compile-time constant so a
/// deployment migrates formats explicitly; both sides must agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireTimeFormat(String);

impl WireTimeFormat {
    pub fn new(format: impl Into<String>) -> Self {
        Self(format.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn format(&self, instant: DateTime<Utc>) -> String {
        instant.format(&self.0).to_string()
    }

    pub fn parse(&self, value: &str) -> Result<DateTime<Utc>, TokenError> {
        NaiveDateTime::parse_from_str(value, &self.0)
            .map(|naive| naive.and_utc())
            .map_err(|e| TokenError::WireTime {
                value: value.to_string(),
                reason: e.to_string(),
            })
    }
}

impl Default for WireTimeFormat {
    fn default() -> Self {
        Self(DEFAULT_WIRE_TIME_FORMAT.to_string())
    }
}

/// Validity window of an issued token. Never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
}

impl Token {
    /// Window for a token minted at `now`. Skew is subtracted on both ends:
    /// a verifier whose clock runs ahead must already see the token as
    /// valid, and the token must read as expired slightly before its
    /// nominal lifetime.
    pub fn new(lifetime: Duration, now: DateTime<Utc>, skew: Duration) -> Self {
        Self {
            not_before: now - skew,
            not_after: now + lifetime - skew,
        }
    }

    pub fn to_wire(&self, format: &WireTimeFormat) -> TokenWire {
        TokenWire {
            not_before: format.format(self.not_before),
            not_after: format.format(self.not_after),
        }
    }
}

/// Wire shape of a token: both instants as fixed-format strings. This is
/// the plaintext handed to the sealing service and the form stored in the
/// cache file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenWire {
    pub not_before: String,
    pub not_after: String,
}

impl TokenWire {
    pub fn parse(&self, format: &WireTimeFormat) -> Result<Token, TokenError> {
        Ok(Token {
            not_before: format.parse(&self.not_before)?,
            not_after: format.parse(&self.not_after)?,
        })
    }
}

/// Sealed token ciphertext, base64. Terminal artifact: callers pass it on
/// as a bearer credential without interpreting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncryptedToken(pub String);

impl EncryptedToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EncryptedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
