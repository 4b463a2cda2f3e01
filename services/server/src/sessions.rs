//! Session store for opaque bearer tokens
//!
//! Sessions live in an in-memory map guarded by a single mutex and are
//! mirrored wholesale to a flat JSON file on every mutation. Tokens are
//! random v4 UUIDs; expiry is absolute and never renewed.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use common::error::StorageResult;

/// Session store mapping token to absolute expiry
#[derive(Clone)]
pub struct SessionStore {
    path: PathBuf,
    ttl: Duration,
    sessions: Arc<Mutex<HashMap<Uuid, DateTime<Utc>>>>,
}

impl SessionStore {
    /// Load the session table from disk
    ///
    /// A missing or corrupt file yields an empty table, never a startup
    /// failure.
    pub async fn load(path: PathBuf, ttl_seconds: i64) -> Self {
        let sessions = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(table) => table,
                Err(e) => {
                    warn!("Ignoring corrupt session file {}: {}", path.display(), e);
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Self {
            path,
            ttl: Duration::seconds(ttl_seconds),
            sessions: Arc::new(Mutex::new(sessions)),
        }
    }

    /// Create a new session and return its token
    pub async fn create(&self) -> StorageResult<Uuid> {
        let token = Uuid::new_v4();
        let mut sessions = self.sessions.lock().await;
        sessions.insert(token, Utc::now() + self.ttl);
        self.persist(&sessions).await?;
        info!("Session created");
        Ok(token)
    }

    /// True iff the token exists and has not expired
    ///
    /// An expired-but-present entry is pruned and the table persisted as a
    /// side effect of the check.
    pub async fn validate(&self, token: Uuid) -> bool {
        let mut sessions = self.sessions.lock().await;
        match sessions.get(&token) {
            Some(expiry) if *expiry > Utc::now() => true,
            Some(_) => {
                sessions.remove(&token);
                if let Err(e) = self.persist(&sessions).await {
                    warn!("Failed to persist session table after pruning: {}", e);
                }
                false
            }
            None => false,
        }
    }

    /// Remove a session if present; removing an unknown token succeeds
    pub async fn remove(&self, token: Uuid) -> StorageResult<()> {
        let mut sessions = self.sessions.lock().await;
        if sessions.remove(&token).is_some() {
            self.persist(&sessions).await?;
            info!("Session removed");
        }
        Ok(())
    }

    async fn persist(&self, sessions: &HashMap<Uuid, DateTime<Utc>>) -> StorageResult<()> {
        let raw = serde_json::to_string(sessions)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}
