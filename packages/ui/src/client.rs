//! Shared API client constructor for all platforms.
//!
//! Returns an [`api::ApiClient`] backed by the appropriate [`store::SessionStore`]:
//! - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalStorageSessionStore`]
//! - **Native** (tests, tooling): in memory via [`store::MemorySessionStore`]

use std::sync::Arc;

use api::ApiClient;
use dioxus::prelude::*;
use store::{AdminConfig, SessionStore};

use crate::auth::redirect_to_login;
use crate::query::QueryClient;

/// Session store for the current platform, keyed by `[session] token_key`.
pub fn make_session_store(config: &AdminConfig) -> Arc<dyn SessionStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Arc::new(store::LocalStorageSessionStore::with_key(
            &config.session.token_key,
        ))
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let _ = config;
        Arc::new(store::MemorySessionStore::new())
    }
}

/// Client whose 401 hook sends the browser back to `/login`.
pub fn make_client(config: &AdminConfig) -> ApiClient {
    ApiClient::new(config, make_session_store(config))
        .with_unauthorized_hook(Arc::new(redirect_to_login))
}

/// The client provided by [`ApiProvider`].
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
}

/// Provides the API client and the query cache to everything below it.
#[component]
pub fn ApiProvider(children: Element) -> Element {
    let config = use_hook(AdminConfig::from_build_env);
    use_hook(|| tracing::info!("API base URL: {}", config.base_url()));

    use_context_provider(|| make_client(&config));
    use_context_provider(|| QueryClient::new(&config));

    rsx! {
        {children}
    }
}
