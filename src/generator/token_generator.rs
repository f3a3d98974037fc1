use chrono::Utc;
use tracing::{debug, warn};

use crate::auth::context::AuthContext;
use crate::cache::token::{EncryptedToken, Token};
use crate::cache::token_cache::{FileTokenCache, TokenCacheRecord};
use crate::config::settings::GeneratorSettings;
use crate::error::TokenError;
use crate::sealing::SealingService;

/// Issues tokens for one auth context: consults the cache under the
/// freshness rule, mints and persists new tokens, and seals them through
/// the key-encryption service.
///
/// Safe for concurrent use within one process; the cache file is the only
/// shared mutable resource and is serialized by [`FileTokenCache`]. No
/// deadlines or retries live here: callers needing timeouts wrap the whole
/// `get_encrypted_token` call at a higher layer.
#[derive(Debug)]
pub struct TokenGenerator<S> {
    settings: GeneratorSettings,
    auth_context: AuthContext,
    sealing: S,
    cache: Option<FileTokenCache>,
}

impl<S: SealingService> TokenGenerator<S> {
    /// Build a generator. The context must validate and its variant must
    /// match the configured token version, so a constructed generator is
    /// always in a usable state.
    pub fn new(
        settings: GeneratorSettings,
        auth_context: AuthContext,
        sealing: S,
    ) -> Result<Self, TokenError> {
        auth_context.validate()?;
        if settings.token_version != auth_context.version() {
            return Err(TokenError::VersionMismatch {
                expected: settings.token_version.into(),
                actual: auth_context.version().into(),
            });
        }
        let cache = settings
            .token_cache_file
            .as_ref()
            .map(|path| FileTokenCache::new(path.clone(), settings.wire_time_format.clone()));
        Ok(Self {
            settings,
            auth_context,
            sealing,
            cache,
        })
    }

    /// Re-check the auth context field contents.
    pub fn validate(&self) -> Result<(), TokenError> {
        self.auth_context.validate()
    }

    /// Principal name of the bound context, for display and audit.
    pub fn principal(&self) -> String {
        self.auth_context.principal()
    }

    pub fn auth_context(&self) -> &AuthContext {
        &self.auth_context
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    pub fn sealing(&self) -> &S {
        &self.sealing
    }

    async fn get_cached_token(&self) -> Result<Option<Token>, TokenError> {
        let cache = match &self.cache {
            Some(cache) => cache,
            None => {
                debug!("no token cache file configured");
                return Ok(None);
            }
        };
        cache
            .load(
                Utc::now(),
                &self.auth_context.seal_context(),
                self.settings.time_skew,
            )
            .await
    }

    async fn cache_token(&self, record: &TokenCacheRecord) -> Result<(), TokenError> {
        match &self.cache {
            Some(cache) => cache.store(record).await,
            None => Ok(()),
        }
    }

    /// Return the cached token when it is still fresh, otherwise mint a new
    /// one and persist it. A persist failure does not invalidate the minted
    /// token: it is surfaced here as a warning and the next call simply
    /// misses the cache.
    pub async fn get_token(&self) -> Result<Token, TokenError> {
        if let Some(token) = self.get_cached_token().await? {
            return Ok(token);
        }

        let token = Token::new(
            self.settings.token_lifetime,
            Utc::now(),
            self.settings.time_skew,
        );
        let record = TokenCacheRecord {
            auth_context: self.auth_context.seal_context(),
            token: token.to_wire(&self.settings.wire_time_format),
        };
        if let Err(e) = self.cache_token(&record).await {
            warn!("could not cache freshly minted token: {}", e);
        }
        Ok(token)
    }

    /// Serialize the current token to its wire form and seal it under the
    /// configured key, bound to this generator's seal context.
    pub async fn get_encrypted_token(&self) -> Result<EncryptedToken, TokenError> {
        let token = self.get_token().await?;
        let wire = token.to_wire(&self.settings.wire_time_format);
        let plaintext = serde_json::to_vec(&wire)?;

        let ciphertext = self
            .sealing
            .encrypt(
                &self.settings.auth_key,
                &plaintext,
                &self.auth_context.seal_context(),
            )
            .await?;
        Ok(EncryptedToken(ciphertext))
    }
}
