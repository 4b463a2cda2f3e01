//! Credential store for the single shared password
//!
//! A single argon2 hash lives in `password.hash`. Once the file exists,
//! setup is permanently disabled; there is no rotation or reset path.

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use std::path::PathBuf;
use tracing::info;

use common::error::{StorageError, StorageResult};

/// File-backed store for the single password credential
#[derive(Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Create a new credential store backed by the given hash file
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// True iff a credential has been persisted
    pub fn is_configured(&self) -> bool {
        self.path.exists()
    }

    /// Hash and persist the shared password
    ///
    /// This is the only path that ever creates the credential; callers must
    /// reject setup when one already exists.
    pub async fn setup(&self, password: &str) -> StorageResult<()> {
        let salt = SaltString::generate(&mut rand::thread_rng());
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| StorageError::Credential(format!("Failed to hash password: {}", e)))?
            .to_string();

        tokio::fs::write(&self.path, password_hash).await?;
        info!("Credential persisted");
        Ok(())
    }

    /// Verify a password against the stored hash
    ///
    /// A wrong password yields `Ok(false)`; only a missing or unparseable
    /// hash file is an error.
    pub async fn verify(&self, password: &str) -> StorageResult<bool> {
        let stored = tokio::fs::read_to_string(&self.path).await?;
        let parsed_hash = PasswordHash::new(stored.trim())
            .map_err(|e| StorageError::Credential(format!("Failed to parse password hash: {}", e)))?;

        let argon2 = Argon2::default();
        Ok(argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> CredentialStore {
        CredentialStore::new(dir.path().join("password.hash"))
    }

    #[tokio::test]
    async fn unconfigured_until_setup() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(!store.is_configured());
        store.setup("longenough1").await.unwrap();
        assert!(store.is_configured());
    }

    #[tokio::test]
    async fn verifies_correct_and_rejects_wrong_password() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.setup("longenough1").await.unwrap();

        assert!(store.verify("longenough1").await.unwrap());
        assert!(!store.verify("wrong").await.unwrap());
    }

    #[tokio::test]
    async fn verify_without_credential_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.verify("longenough1").await.is_err());
    }
}
