//! "Remember me" cache for the login form.
//!
//! This is a convenience cache, not a secret store: the pair is kept as entered,
//! unencrypted and without expiry. Its lifecycle is independent of the session;
//! logging out does not clear it.

use crate::storage::{KeyValueStore, Profile, StorageError};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Client-persistent key holding the remembered pair.
pub const CREDENTIALS_STORAGE_KEY: &str = "remembered_credentials";

#[derive(Debug, Clone)]
pub struct RememberedCredential {
    pub identifier: String,
    pub secret: SecretString,
}

#[derive(Serialize, Deserialize)]
struct StoredCredential {
    identifier: String,
    secret: String,
}

#[derive(Clone)]
pub struct CredentialVault {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialVault {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn from_profile(profile: &Profile) -> Self {
        Self::new(profile.local_storage.clone())
    }

    /// Replace any remembered pair.
    ///
    /// # Errors
    /// Returns an error if the pair cannot be written.
    pub fn save(&self, identifier: &str, secret: &SecretString) -> Result<(), StorageError> {
        let stored = StoredCredential {
            identifier: identifier.to_string(),
            secret: secret.expose_secret().to_string(),
        };
        self.store
            .set(CREDENTIALS_STORAGE_KEY, &serde_json::to_string(&stored)?)
    }

    /// The remembered pair, or `None` when nothing usable is stored.
    #[must_use]
    pub fn read(&self) -> Option<RememberedCredential> {
        let raw = self.store.get(CREDENTIALS_STORAGE_KEY)?;
        match serde_json::from_str::<StoredCredential>(&raw) {
            Ok(stored) => Some(RememberedCredential {
                identifier: stored.identifier,
                secret: SecretString::from(stored.secret),
            }),
            Err(err) => {
                debug!("Ignoring unreadable remembered credentials: {err}");
                None
            }
        }
    }

    /// Forget the remembered pair; idempotent.
    ///
    /// # Errors
    /// Returns an error if the removal cannot be written.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(CREDENTIALS_STORAGE_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn vault() -> (CredentialVault, Arc<dyn KeyValueStore>) {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        (CredentialVault::new(store.clone()), store)
    }

    #[test]
    fn save_then_read_returns_pair() {
        let (vault, _) = vault();
        vault
            .save("a@b.com", &SecretString::from("pw".to_string()))
            .unwrap();

        let remembered = vault.read().unwrap();
        assert_eq!(remembered.identifier, "a@b.com");
        assert_eq!(remembered.secret.expose_secret(), "pw");
    }

    #[test]
    fn save_overwrites_previous_pair() {
        let (vault, _) = vault();
        vault
            .save("old@b.com", &SecretString::from("old".to_string()))
            .unwrap();
        vault
            .save("new@b.com", &SecretString::from("new".to_string()))
            .unwrap();

        let remembered = vault.read().unwrap();
        assert_eq!(remembered.identifier, "new@b.com");
        assert_eq!(remembered.secret.expose_secret(), "new");
    }

    #[test]
    fn clear_is_idempotent() {
        let (vault, _) = vault();
        vault.clear().unwrap();
        vault
            .save("a@b.com", &SecretString::from("pw".to_string()))
            .unwrap();
        vault.clear().unwrap();
        vault.clear().unwrap();
        assert!(vault.read().is_none());
    }

    #[test]
    fn malformed_value_reads_as_nothing_remembered() {
        let (vault, store) = vault();
        for raw in ["", "not json", r#"{"identifier":"a@b.com"}"#, "[1,2]"] {
            store.set(CREDENTIALS_STORAGE_KEY, raw).unwrap();
            assert!(vault.read().is_none(), "{raw:?}");
        }
    }
}
