use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::auth::context::SealContext;
use crate::cache::token::{Token, TokenWire, WireTimeFormat};
use crate::error::TokenError;
use crate::utils::maps::seal_contexts_equal;

/// Persisted pairing of a seal context snapshot and the token issued under
/// it. Sole content of the cache file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCacheRecord {
    pub auth_context: SealContext,
    pub token: TokenWire,
}

/// JSON cache file guarded by an in-process reader/writer lock: concurrent
/// reads share, a write excludes everything for the duration of the file
/// operation. The file itself is a passive store; whether its record is
/// trustworthy is decided here by the context-equality and freshness checks.
///
/// Writers in other processes can still race (last-writer-wins); the
/// temp-then-rename write keeps every observable file state complete.
#[derive(Debug)]
pub struct FileTokenCache {
    path: PathBuf,
    wire_format: WireTimeFormat,
    lock: RwLock<()>,
}

impl FileTokenCache {
    pub fn new(path: PathBuf, wire_format: WireTimeFormat) -> Self {
        Self {
            path,
            wire_format,
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cache and return its token when the stored context matches
    /// `current_context` and the skew-adjusted expiry has not passed.
    /// A missing file is a miss; a present but unparsable file is fatal.
    pub async fn load(
        &self,
        now: DateTime<Utc>,
        current_context: &SealContext,
        skew: Duration,
    ) -> Result<Option<Token>, TokenError> {
        let _read = self.lock.read().await;

        let raw = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(TokenError::CacheRead {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        let record: TokenCacheRecord =
            serde_json::from_slice(&raw).map_err(|e| TokenError::CacheCorrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        // a record written under a different wire format is corrupt, not a miss
        let token = record
            .token
            .parse(&self.wire_format)
            .map_err(|e| TokenError::CacheCorrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        if !seal_contexts_equal(&record.auth_context, current_context) {
            info!("cached token context mismatch, ignoring '{}'", self.path.display());
            return Ok(None);
        }
        // subtract skew so the token stops being served before a drifting
        // verifier would reject it
        if now >= token.not_after - skew {
            debug!("cached token in '{}' expired", self.path.display());
            return Ok(None);
        }
        Ok(Some(token))
    }

    /// Overwrite the cache file. The record goes to a sibling temp file
    /// first and is renamed into place, so a concurrent reader never
    /// observes a partially written file.
    pub async fn store(&self, record: &TokenCacheRecord) -> Result<(), TokenError> {
        let _write = self.lock.write().await;

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| self.persist_error(format!("could not create cache directories: {e}")))?;
        }

        let data = serde_json::to_vec(record)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, &data)
            .await
            .map_err(|e| self.persist_error(format!("could not write '{}': {e}", tmp.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            use crate::utils::constants::CACHE_FILE_MODE;

            fs::set_permissions(&tmp, std::fs::Permissions::from_mode(CACHE_FILE_MODE))
                .await
                .map_err(|e| self.persist_error(format!("could not set cache file mode: {e}")))?;
        }
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.persist_error(format!("could not rename temp cache file: {e}")))
    }

    fn persist_error(&self, reason: String) -> TokenError {
        TokenError::CachePersist {
            path: self.path.clone(),
            reason,
        }
    }
}
