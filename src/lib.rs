//! # Sealed Token Library
//!
//! Issues short-lived authentication tokens that bind a versioned auth
//! context to a skew-tolerant validity window, caches them locally keyed by
//! structural equality of the context, and seals them through an external
//! key-encryption service. The resulting ciphertext is a bearer credential;
//! a verifier decrypts it and checks context and window on its side.
//!
//! Modules:
//! - `auth` — versioned authentication context
//! - `cache` — token value object, wire codec, cache file
//! - `generator` — token lifecycle orchestration
//! - `sealing` — key-encryption service contract and HTTP adapter
//! - `config` — settings structures and YAML loading

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod generator;
pub mod sealing;
pub mod tests;
pub mod utils;

pub use crate::auth::context::{AuthContext, SealContext, TokenVersion};
pub use crate::cache::token::{EncryptedToken, Token, TokenWire, WireTimeFormat};
pub use crate::cache::token_cache::{FileTokenCache, TokenCacheRecord};
pub use crate::config::settings::GeneratorSettings;
pub use crate::error::TokenError;
pub use crate::generator::token_generator::TokenGenerator;
pub use crate::sealing::{HttpSealingClient, SealingService};
pub use crate::utils::maps::seal_contexts_equal;
