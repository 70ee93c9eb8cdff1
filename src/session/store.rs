use super::token;
use crate::storage::{KeyValueStore, Profile, StorageError};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error};

/// Cookie carrying the session token to the edge filter.
pub const AUTH_COOKIE: &str = "auth_token";
/// Client-persistent key carrying the session token to client code.
pub const TOKEN_STORAGE_KEY: &str = "auth_token";

/// Sole owner of both session locations.
///
/// Callers never write the cookie or the client store directly; `save` and
/// `clear` fan out to both so the copies cannot drift through this API.
#[derive(Clone)]
pub struct SessionStore {
    cookies: Arc<dyn KeyValueStore>,
    local_storage: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(cookies: Arc<dyn KeyValueStore>, local_storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            cookies,
            local_storage,
        }
    }

    #[must_use]
    pub fn from_profile(profile: &Profile) -> Self {
        Self::new(profile.cookies.clone(), profile.local_storage.clone())
    }

    /// Write the token to the cookie and the client store.
    ///
    /// The cookie only reaches the edge filter on the next request.
    ///
    /// # Errors
    /// Returns an error if either location cannot be written; a failed client
    /// store write rolls the cookie back.
    pub fn save(&self, token: &str) -> Result<(), StorageError> {
        self.cookies.set(AUTH_COOKIE, token)?;
        if let Err(err) = self.local_storage.set(TOKEN_STORAGE_KEY, token) {
            if let Err(rollback) = self.cookies.remove(AUTH_COOKIE) {
                error!("Failed to roll back session cookie: {rollback}");
            }
            return Err(err);
        }
        debug!("Session saved");
        Ok(())
    }

    /// Remove the token from both locations; a no-op when nothing is stored.
    ///
    /// # Errors
    /// Returns the first removal error after attempting both locations.
    pub fn clear(&self) -> Result<(), StorageError> {
        let cookie = self.cookies.remove(AUTH_COOKIE);
        let local = self.local_storage.remove(TOKEN_STORAGE_KEY);
        debug!("Session cleared");
        cookie.and(local)
    }

    /// Client-store copy of the token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.local_storage
            .get(TOKEN_STORAGE_KEY)
            .filter(|token| !token.is_empty())
    }

    /// Cookie copy of the token, as the next request would carry it.
    #[must_use]
    pub fn cookie_token(&self) -> Option<String> {
        self.cookies
            .get(AUTH_COOKIE)
            .filter(|token| !token.is_empty())
    }

    /// Decode the client-store copy and check its expiry against the clock.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now().timestamp())
    }

    #[must_use]
    pub fn is_valid_at(&self, now: i64) -> bool {
        self.token()
            .is_some_and(|raw| token::is_valid_at(&raw, now))
    }
}
