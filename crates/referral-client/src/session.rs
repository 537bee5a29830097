//! The locally persisted half of a login.

use std::sync::Arc;

use referral_shared::constants::{REFERRAL_CODE_KEY, TOKEN_KEY};
use referral_store::KeyValueStore;

use crate::error::Result;

/// Session token and referral code, backed by durable storage.
///
/// Nothing is cached in memory: every read goes to the store, so another
/// handle writing the same keys is observed immediately (last write wins).
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The persisted token, if any. An empty string counts as no token.
    pub fn token(&self) -> Result<Option<String>> {
        Ok(self.store.get(TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        self.store.set(TOKEN_KEY, token)?;
        Ok(())
    }

    pub fn clear_token(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY)?;
        Ok(())
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.token()?.is_some())
    }

    pub fn referral_code(&self) -> Result<Option<String>> {
        Ok(self.store.get(REFERRAL_CODE_KEY)?)
    }

    /// Remember the user's referral code. Logout keeps it.
    pub fn set_referral_code(&self, code: &str) -> Result<()> {
        self.store.set(REFERRAL_CODE_KEY, code)?;
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}
