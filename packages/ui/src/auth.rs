//! Authentication state, the admin route guard, and sign-out.

use std::future::Future;

use api::models::User;
use api::{ApiError, SessionStore};
use dioxus::prelude::*;

use crate::client::use_api;
use crate::query::use_query_client;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the admin signs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component holding the [`AuthState`] signal.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    use_context_provider(|| Signal::new(AuthState::default()));

    rsx! {
        {children}
    }
}

/// Outcome of checking the stored session against the API.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCheck {
    /// No token was stored; nothing was fetched.
    SignedOut,
    Admin(User),
    /// The token was cleared because the fetch failed or the user is not an admin.
    Rejected(String),
}

/// What the guard renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    RedirectToLogin,
    Loading,
    Render,
}

/// Resolve the stored session. `fetch_user` only runs when a token is present; a
/// failed fetch or a non-admin account clears the token.
pub async fn check_session<F, Fut>(session: &dyn SessionStore, fetch_user: F) -> SessionCheck
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<User, ApiError>>,
{
    if !session.is_authenticated() {
        return SessionCheck::SignedOut;
    }
    match fetch_user().await {
        Ok(user) if user.is_admin() => SessionCheck::Admin(user),
        Ok(user) => {
            tracing::warn!("{} is not an admin, signing out", user.email);
            session.clear();
            SessionCheck::Rejected("Admin access required".to_string())
        }
        Err(e) => {
            tracing::warn!("Session check failed: {e}");
            session.clear();
            SessionCheck::Rejected(e.to_string())
        }
    }
}

/// Pure routing decision for the guard.
pub fn guard_decision(has_token: bool, check: Option<&SessionCheck>) -> GuardDecision {
    match check {
        Some(SessionCheck::Admin(_)) if has_token => GuardDecision::Render,
        Some(_) => GuardDecision::RedirectToLogin,
        None if !has_token => GuardDecision::RedirectToLogin,
        None => GuardDecision::Loading,
    }
}

/// Full page load of `/login`, dropping all in-memory state.
pub fn redirect_to_login() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/login");
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::info!("Redirect to /login requested");
}

/// Renders `children` only for a signed-in admin.
#[component]
pub fn AdminGuard(on_unauthenticated: EventHandler<()>, children: Element) -> Element {
    let client = use_api();
    let mut auth = use_auth();

    let check = use_resource({
        let client = client.clone();
        move || {
            let client = client.clone();
            async move {
                let result = check_session(client.session().as_ref(), || {
                    api::services::auth::me(&client)
                })
                .await;
                let user = match &result {
                    SessionCheck::Admin(user) => Some(user.clone()),
                    _ => None,
                };
                auth.set(AuthState {
                    user,
                    loading: false,
                });
                result
            }
        }
    });

    let decision = guard_decision(client.is_authenticated(), check.read().as_ref());
    match decision {
        GuardDecision::Render => rsx! {
            {children}
        },
        GuardDecision::Loading => rsx! {
            div {
                class: "guard-loading",
                div { class: "spinner" }
                p { "Checking your session..." }
            }
        },
        GuardDecision::RedirectToLogin => {
            on_unauthenticated.call(());
            rsx! {}
        }
    }
}

/// Button to sign the admin out.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let client = use_api();
    let mut auth_state = use_auth();
    let queries = use_query_client();

    let onclick = move |_| {
        let client = client.clone();
        async move {
            api::services::auth::logout(&client).await;
            queries.clear();
            auth_state.set(AuthState {
                user: None,
                loading: false,
            });
            redirect_to_login();
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use api::models::UserRole;
    use store::MemorySessionStore;

    fn user(role: UserRole) -> User {
        serde_json::from_value(serde_json::json!({
            "_id": "u1",
            "email": "root@campus.edu",
            "role": role.as_str(),
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_no_token_redirects_without_fetch() {
        let session = MemorySessionStore::new();
        let fetched = Cell::new(false);
        let check = check_session(&session, || {
            fetched.set(true);
            async { Ok(user(UserRole::Admin)) }
        })
        .await;
        assert_eq!(check, SessionCheck::SignedOut);
        assert!(!fetched.get());
        assert_eq!(
            guard_decision(false, Some(&check)),
            GuardDecision::RedirectToLogin
        );
        assert_eq!(guard_decision(false, None), GuardDecision::RedirectToLogin);
    }

    #[tokio::test]
    async fn test_admin_is_let_in() {
        let session = MemorySessionStore::with_token("tok");
        let check = check_session(&session, || async { Ok(user(UserRole::Admin)) }).await;
        assert!(matches!(check, SessionCheck::Admin(_)));
        assert!(session.is_authenticated());
        assert_eq!(guard_decision(true, Some(&check)), GuardDecision::Render);
    }

    #[tokio::test]
    async fn test_non_admin_clears_token() {
        let session = MemorySessionStore::with_token("tok");
        let check = check_session(&session, || async { Ok(user(UserRole::Student)) }).await;
        assert_eq!(
            check,
            SessionCheck::Rejected("Admin access required".to_string())
        );
        assert!(!session.is_authenticated());
        assert_eq!(
            guard_decision(session.is_authenticated(), Some(&check)),
            GuardDecision::RedirectToLogin
        );
    }

    #[tokio::test]
    async fn test_fetch_error_clears_token() {
        let session = MemorySessionStore::with_token("tok");
        let check = check_session(&session, || async {
            Err(ApiError::network("connection refused"))
        })
        .await;
        assert!(matches!(check, SessionCheck::Rejected(_)));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_pending_fetch_shows_loading() {
        assert_eq!(guard_decision(true, None), GuardDecision::Loading);
    }
}
