//! # Local-storage session store: browser-side token persistence
//!
//! [`LocalStorageSessionStore`] is the [`SessionStore`] used on the **web platform**.
//! The token is kept under a single `window.localStorage` key (by default
//! [`TOKEN_STORAGE_KEY`](crate::session::TOKEN_STORAGE_KEY)) so that a reload keeps
//! the admin signed in.
//!
//! The struct only holds the key; the `Storage` handle is looked up on every call
//! because `web_sys::Storage` is not `Send`. Storage failures (private mode, quota,
//! disabled storage) are swallowed: reads return `None`, writes do nothing, which
//! degrades to "signed out" rather than crashing.

use crate::session::{normalize_token, SessionStore, TOKEN_STORAGE_KEY};

/// `window.localStorage`-backed SessionStore for the web platform.
#[derive(Clone, Debug)]
pub struct LocalStorageSessionStore {
    key: String,
}

impl LocalStorageSessionStore {
    /// Store using the default key.
    pub fn new() -> Self {
        Self::with_key(TOKEN_STORAGE_KEY)
    }

    /// Store using a custom key (from `[session] token_key`).
    pub fn with_key(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl Default for LocalStorageSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for LocalStorageSessionStore {
    fn token(&self) -> Option<String> {
        let storage = Self::storage()?;
        normalize_token(storage.get_item(&self.key).ok().flatten())
    }

    fn set_token(&self, token: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(&self.key, token).is_err() {
                tracing::warn!("Failed to persist session token");
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}
