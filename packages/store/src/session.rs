//! # Session store: where the admin bearer token lives
//!
//! The console authenticates against the API with a single bearer token. The
//! presence of that token is the only client-side signal that a session exists;
//! whether the session is actually valid is decided by the API (`/auth/me`).
//!
//! [`SessionStore`] hides the storage medium behind `get`/`set`/`clear` so the HTTP
//! client and the route guard can be exercised without a browser:
//!
//! | Implementation | Platform | Backing |
//! |----------------|----------|---------|
//! | [`crate::MemorySessionStore`] | native, tests | `Arc<Mutex<Option<String>>>` |
//! | `crate::LocalStorageSessionStore` | wasm + `web` feature | `window.localStorage` |

/// Default local-storage key for the bearer token.
pub const TOKEN_STORAGE_KEY: &str = "campus_admin_token";

/// Synchronous token storage shared by the HTTP client and the auth guard.
pub trait SessionStore: Send + Sync {
    /// The stored token, if any. Blank values count as absent.
    fn token(&self) -> Option<String>;

    /// Replace the stored token.
    fn set_token(&self, token: &str);

    /// Forget the stored token.
    fn clear(&self);

    /// Whether a token is present. Says nothing about its validity.
    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

/// Normalise a raw stored value: trims whitespace and maps blank to `None`.
pub(crate) fn normalize_token(raw: Option<String>) -> Option<String> {
    raw.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
