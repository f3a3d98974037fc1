use std::path::PathBuf;

use chrono::Duration;
use serde::Deserialize;

use crate::auth::context::{AuthContext, TokenVersion};
use crate::cache::token::WireTimeFormat;
use crate::error::TokenError;
use crate::utils::constants::{
    DEFAULT_TIME_SKEW_SECS, DEFAULT_TOKEN_LIFETIME_SECS, DEFAULT_WIRE_TIME_FORMAT,
};

/// ================================
/// Settings file (YAML) shapes
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceSettings {
    pub generator: GeneratorConfig,
    pub context: ContextConfig,
    pub sealing: SealingConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneratorConfig {
    /// key id or alias the sealing service encrypts under
    pub auth_key: String,
    pub region: String,
    pub token_version: u8,
    #[serde(default = "default_token_lifetime_seconds")]
    pub token_lifetime_seconds: i64,
    pub token_cache_file: Option<PathBuf>,
    #[serde(default = "default_time_skew_seconds")]
    pub time_skew_seconds: i64,
    #[serde(default = "default_wire_time_format")]
    pub wire_time_format: String,
}

impl GeneratorConfig {
    pub fn into_settings(self) -> Result<GeneratorSettings, TokenError> {
        Ok(GeneratorSettings {
            auth_key: self.auth_key,
            region: self.region,
            token_version: TokenVersion::try_from(self.token_version)?,
            token_lifetime: Duration::seconds(self.token_lifetime_seconds),
            token_cache_file: self.token_cache_file,
            time_skew: Duration::seconds(self.time_skew_seconds),
            wire_time_format: WireTimeFormat::new(self.wire_time_format),
        })
    }
}

/// Serde-facing shape of the auth context; `user_type` is only meaningful
/// for version 2 and validation catches it when missing there.
#[derive(Debug, Deserialize, Clone)]
pub struct ContextConfig {
    pub from: String,
    pub to: String,
    pub user_type: Option<String>,
}

impl ContextConfig {
    pub fn into_auth_context(self, version: TokenVersion) -> AuthContext {
        match version {
            TokenVersion::V1 => AuthContext::V1 {
                from: self.from,
                to: self.to,
            },
            TokenVersion::V2 => AuthContext::V2 {
                from: self.from,
                to: self.to,
                user_type: self.user_type.unwrap_or_default(),
            },
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SealingConfig {
    /// base URL of the key-encryption service
    pub endpoint: String,
}

/// ================================
/// Runtime generator settings
/// ================================
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub auth_key: String,
    pub region: String,
    pub token_version: TokenVersion,
    pub token_lifetime: Duration,
    pub token_cache_file: Option<PathBuf>,
    pub time_skew: Duration,
    pub wire_time_format: WireTimeFormat,
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

fn default_token_lifetime_seconds() -> i64 {
    DEFAULT_TOKEN_LIFETIME_SECS
}

fn default_time_skew_seconds() -> i64 {
    DEFAULT_TIME_SKEW_SECS
}

fn default_wire_time_format() -> String {
    DEFAULT_WIRE_TIME_FORMAT.to_string()
}
