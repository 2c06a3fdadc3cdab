use std::sync::{Arc, Mutex};

use crate::session::{normalize_token, SessionStore};

/// In-memory SessionStore for tests and native builds.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore {
    token: Arc<Mutex<Option<String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts out holding `token`.
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.set_token(token);
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        let guard = match self.token.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        normalize_token(guard.clone())
    }

    fn set_token(&self, token: &str) {
        let mut guard = match self.token.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(token.to_string());
    }

    fn clear(&self) {
        let mut guard = match self.token.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_is_not_authenticated() {
        let store = MemorySessionStore::new();
        assert!(store.token().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_set_and_clear_token() {
        let store = MemorySessionStore::new();
        store.set_token("abc.def.ghi");
        assert_eq!(store.token().as_deref(), Some("abc.def.ghi"));
        assert!(store.is_authenticated());

        store.clear();
        assert!(store.token().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_blank_token_counts_as_absent() {
        let store = MemorySessionStore::with_token("   ");
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_clones_share_state() {
        let store = MemorySessionStore::new();
        let other = store.clone();
        other.set_token("shared");
        assert_eq!(store.token().as_deref(), Some("shared"));
        store.clear();
        assert!(other.token().is_none());
    }
}
