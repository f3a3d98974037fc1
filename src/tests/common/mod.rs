// tests/common/mod.rs
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Duration;

use crate::auth::context::{AuthContext, SealContext, TokenVersion};
use crate::cache::token::WireTimeFormat;
use crate::config::settings::GeneratorSettings;
use crate::error::TokenError;
use crate::sealing::SealingService;

pub const TEST_AUTH_KEY: &str = "alias/auth-key";
pub const TEST_CIPHERTEXT: &str = "c2VhbGVkLXRva2Vu";

pub fn v2_context() -> AuthContext {
    AuthContext::V2 {
        from: "service-a".to_string(),
        to: "service-b".to_string(),
        user_type: "service".to_string(),
    }
}

/// Generator settings used across tests: 60 minute lifetime, 3 minute skew.
pub fn test_settings(cache_file: Option<PathBuf>) -> GeneratorSettings {
    GeneratorSettings {
        auth_key: TEST_AUTH_KEY.to_string(),
        region: "us-west-2".to_string(),
        token_version: TokenVersion::V2,
        token_lifetime: Duration::minutes(60),
        token_cache_file: cache_file,
        time_skew: Duration::minutes(3),
        wire_time_format: WireTimeFormat::default(),
    }
}

/// Sealing service double: records every encrypt call and returns a fixed
/// ciphertext.
#[derive(Debug, Default)]
pub struct MockSealer {
    pub calls: Mutex<Vec<(String, Vec<u8>, SealContext)>>,
}

impl SealingService for MockSealer {
    async fn encrypt(
        &self,
        key_id: &str,
        plaintext: &[u8],
        context: &SealContext,
    ) -> Result<String, TokenError> {
        self.calls
            .lock()
            .unwrap()
            .push((key_id.to_string(), plaintext.to_vec(), context.clone()));
        Ok(TEST_CIPHERTEXT.to_string())
    }

    async fn decrypt(
        &self,
        _ciphertext: &[u8],
        _context: &SealContext,
    ) -> Result<(Vec<u8>, String), TokenError> {
        Ok((b"plaintext".to_vec(), TEST_AUTH_KEY.to_string()))
    }
}
