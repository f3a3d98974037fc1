use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::auth::context::SealContext;
use crate::error::TokenError;
use crate::sealing::SealingService;

/// Thin JSON-over-HTTP adapter for a key-encryption service exposing
/// `/encrypt` and `/decrypt`. Plaintext and ciphertext travel base64
/// encoded; the region rides along as a header. Failures are returned as-is
/// to the caller: no retry, no backoff.
#[derive(Debug, Clone)]
pub struct HttpSealingClient {
    endpoint: String,
    region: String,
    client: Client,
}

#[derive(Serialize)]
struct EncryptRequest<'a> {
    key_id: &'a str,
    plaintext: String,
    context: &'a SealContext,
}

#[derive(Deserialize)]
struct EncryptResponse {
    ciphertext: String,
}

#[derive(Serialize)]
struct DecryptRequest<'a> {
    ciphertext: String,
    context: &'a SealContext,
}

#[derive(Deserialize)]
struct DecryptResponse {
    plaintext: String,
    key_id: String,
}

impl HttpSealingClient {
    pub fn new(endpoint: impl Into<String>, region: impl Into<String>) -> Self {
        let client = Client::builder()
            .build()
            .expect("Failed to build HTTP client");
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            region: region.into(),
            client,
        }
    }
}

impl SealingService for HttpSealingClient {
    async fn encrypt(
        &self,
        key_id: &str,
        plaintext: &[u8],
        context: &SealContext,
    ) -> Result<String, TokenError> {
        let seal_error = |reason: String| TokenError::Sealing {
            key_id: key_id.to_string(),
            reason,
        };

        let body = EncryptRequest {
            key_id,
            plaintext: STANDARD.encode(plaintext),
            context,
        };
        let response = self
            .client
            .post(format!("{}/encrypt", self.endpoint))
            .header("x-kms-region", &self.region)
            .json(&body)
            .send()
            .await
            .map_err(|e| seal_error(e.to_string()))?;
        if !response.status().is_success() {
            return Err(seal_error(format!(
                "encrypt request failed: {}",
                response.status()
            )));
        }

        let parsed: EncryptResponse = response
            .json()
            .await
            .map_err(|e| seal_error(format!("malformed encrypt response: {e}")))?;
        Ok(parsed.ciphertext)
    }

    async fn decrypt(
        &self,
        ciphertext: &[u8],
        context: &SealContext,
    ) -> Result<(Vec<u8>, String), TokenError> {
        let unseal_error = |reason: String| TokenError::Unsealing { reason };

        let body = DecryptRequest {
            ciphertext: STANDARD.encode(ciphertext),
            context,
        };
        let response = self
            .client
            .post(format!("{}/decrypt", self.endpoint))
            .header("x-kms-region", &self.region)
            .json(&body)
            .send()
            .await
            .map_err(|e| unseal_error(e.to_string()))?;
        if !response.status().is_success() {
            return Err(unseal_error(format!(
                "decrypt request failed: {}",
                response.status()
            )));
        }

        let parsed: DecryptResponse = response
            .json()
            .await
            .map_err(|e| unseal_error(format!("malformed decrypt response: {e}")))?;
        let plaintext = STANDARD
            .decode(parsed.plaintext.as_bytes())
            .map_err(|e| unseal_error(format!("bad base64 plaintext: {e}")))?;
        Ok((plaintext, parsed.key_id))
    }
}
