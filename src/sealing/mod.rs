use crate::auth::context::SealContext;
use crate::error::TokenError;

pub mod http;

pub use http::HttpSealingClient;

/// Encrypt/Decrypt contract of the external key-encryption service. Both
/// operations are bound to the supplied context map; decryption under a
/// context that differs from the one used at encryption time fails inside
/// the service, not here.
pub trait SealingService {
    /// Seal `plaintext` under `key_id`; returns base64 ciphertext.
    fn encrypt(
        &self,
        key_id: &str,
        plaintext: &[u8],
        context: &SealContext,
    ) -> impl std::future::Future<Output = Result<String, TokenError>> + Send;

    /// Recover plaintext from base64 ciphertext; returns the plaintext and
    /// the key id it was sealed under.
    fn decrypt(
        &self,
        ciphertext: &[u8],
        context: &SealContext,
    ) -> impl std::future::Future<Output = Result<(Vec<u8>, String), TokenError>> + Send;
}
