//! Admin sign-in.

use api::models::{LoginRequest, User};
use api::{ApiClient, ApiError};
use dioxus::prelude::*;
use ui::{use_api, use_auth, use_query_client, AuthState};

use crate::Route;

/// Log in, then make sure the account is an administrator. A non-admin token
/// is discarded straight away.
async fn sign_in(client: &ApiClient, request: &LoginRequest) -> Result<User, ApiError> {
    let response = api::services::auth::login(client, request).await?;
    let user = match response.user {
        Some(user) => user,
        None => api::services::auth::me(client).await?,
    };
    if !user.is_admin() {
        api::services::auth::logout(client).await;
        return Err(ApiError::Http {
            status: 403,
            message: "This account does not have admin access".to_string(),
            code: Some("NOT_ADMIN".to_string()),
            errors: Vec::new(),
        });
    }
    Ok(user)
}

#[component]
pub fn Login() -> Element {
    let client = use_api();
    let mut auth = use_auth();
    let queries = use_query_client();
    let nav = use_navigator();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<ApiError>::None);
    let mut busy = use_signal(|| false);

    // Already signed in
    if auth.read().user.is_some() && client.is_authenticated() {
        nav.replace(Route::Dashboard {});
    }

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        async move {
            busy.set(true);
            error.set(None);
            let request = LoginRequest {
                email: email().trim().to_string(),
                password: password(),
            };
            let result = sign_in(&client, &request).await;
            busy.set(false);
            match result {
                Ok(user) => {
                    queries.clear();
                    auth.set(AuthState {
                        user: Some(user),
                        loading: false,
                    });
                    nav.replace(Route::Dashboard {});
                }
                Err(e) => {
                    tracing::warn!("Sign-in failed: {e}");
                    password.set(String::new());
                    error.set(Some(e));
                }
            }
        }
    };

    let current = error();
    let email_error = current
        .as_ref()
        .and_then(|e| e.field_error("email"))
        .map(str::to_string);
    let password_error = current
        .as_ref()
        .and_then(|e| e.field_error("password"))
        .map(str::to_string);
    let banner = current
        .as_ref()
        .filter(|e| e.field_errors().is_empty())
        .map(|e| e.to_string());

    rsx! {
        div {
            class: "login-page",
            form {
                class: "card login-card",
                novalidate: true,
                onsubmit: onsubmit,
                h1 { "Campus Admin" }
                p { class: "muted", "Sign in with your administrator account." }

                if let Some(message) = banner {
                    div { class: "alert alert--error", role: "alert", "{message}" }
                }

                label {
                    class: "form-field",
                    span { class: "form-label", "Email" }
                    input {
                        class: if email_error.is_some() { "input input--invalid" } else { "input" },
                        r#type: "email",
                        autocomplete: "username",
                        value: "{email}",
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                    if let Some(ref message) = email_error {
                        span { class: "form-error", "{message}" }
                    }
                }
                label {
                    class: "form-field",
                    span { class: "form-label", "Password" }
                    input {
                        class: if password_error.is_some() { "input input--invalid" } else { "input" },
                        r#type: "password",
                        autocomplete: "current-password",
                        value: "{password}",
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                    if let Some(ref message) = password_error {
                        span { class: "form-error", "{message}" }
                    }
                }

                button {
                    class: "btn btn-primary btn-block",
                    r#type: "submit",
                    disabled: busy(),
                    if busy() { "Signing in..." } else { "Sign in" }
                }
            }
        }
    }
}
