//! Admin sign-in, sign-out, and session checks.

use crate::client::ApiClient;
use crate::error::{ApiError, FieldError};
use crate::models::{LoginRequest, LoginResponse, User};
use crate::validate::is_valid_email;

/// Log in and store the returned token in the client's session store.
pub async fn login(client: &ApiClient, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
    let mut fields = Vec::new();
    if !is_valid_email(&request.email) {
        fields.push(FieldError::new("email", "Enter a valid email address"));
    }
    if request.password.is_empty() {
        fields.push(FieldError::new("password", "Password is required"));
    }
    if !fields.is_empty() {
        return Err(ApiError::validation(fields));
    }

    let response: LoginResponse = client.post("/auth/login", request).await?;
    client.session().set_token(&response.token);
    tracing::info!("Signed in as {}", request.email);
    Ok(response)
}

/// Tell the API the session is over, then forget the token whatever it answers.
pub async fn logout(client: &ApiClient) {
    if client.is_authenticated() {
        let result = client
            .post::<_, serde_json::Value>("/auth/logout", &serde_json::json!({}))
            .await;
        if let Err(e) = result {
            tracing::warn!("Logout request failed: {e}");
        }
    }
    client.session().clear();
}

/// The user owning the stored token.
pub async fn me(client: &ApiClient) -> Result<User, ApiError> {
    client.get("/auth/me").await
}

/// Whether the API still accepts the stored token.
pub async fn verify(client: &ApiClient) -> Result<bool, ApiError> {
    match client.get::<serde_json::Value>("/auth/verify").await {
        Ok(_) => Ok(true),
        Err(ApiError::Unauthorized { .. }) => Ok(false),
        Err(e) => Err(e),
    }
}

