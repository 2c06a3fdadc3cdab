//! # HTTP client wrapper
//!
//! [`ApiClient`] is the single door to the backend. Every request it sends:
//!
//! 1. is resolved against the configured base URL (`/colleges/...` →
//!    `http://localhost:4000/api/v1/colleges/...`);
//! 2. carries `Authorization: Bearer <token>` when the [`SessionStore`] holds one;
//! 3. is timed, and the timing is logged at `debug` level and returned as
//!    [`RequestMeta`];
//! 4. has its failure normalised into [`ApiError`] exactly once.
//!
//! ## 401 handling
//!
//! A 401 clears the stored token. When the failing request carried a token, the
//! optional unauthorised hook runs as well; the web front end installs a hook that
//! hard-redirects to `/login`. A 401 on a request sent without a token (a failed
//! login, for instance) only surfaces the error.
//!
//! ## Envelopes
//!
//! Success bodies are unwrapped from `{status, message, data}` (or the legacy
//! `{statusCode, ...}` variant) by [`crate::envelope::unwrap_body`] before decoding.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use store::{AdminConfig, SessionStore};

use crate::envelope::{decode, unwrap_body};
use crate::error::ApiError;

/// Callback run after a 401 on an authenticated request.
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// Timing metadata of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestMeta {
    pub method: String,
    pub path: String,
    pub status: Option<u16>,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: i64,
}

/// A decoded success response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub data: T,
    pub message: Option<String>,
    pub meta: RequestMeta,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.session.is_authenticated())
            .finish()
    }
}

impl PartialEq for ApiClient {
    /// Clients are interchangeable when they target the same API with the same
    /// session store.
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url && Arc::ptr_eq(&self.session, &other.session)
    }
}

impl ApiClient {
    pub fn new(config: &AdminConfig, session: Arc<dyn SessionStore>) -> Self {
        Self {
            http: build_http_client(config),
            base_url: config.base_url().to_string(),
            session,
            on_unauthorized: None,
        }
    }

    /// Builder method installing the 401 hook.
    pub fn with_unauthorized_hook(mut self, hook: UnauthorizedHook) -> Self {
        self.on_unauthorized = Some(hook);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self
            .http
            .request(method, self.url(path))
            .header(ACCEPT, "application/json");
        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }
        req
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.request(Method::GET, path)).await?.decode()
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.execute(self.request(Method::GET, path).query(query))
            .await?
            .decode()
    }

    /// GET returning the raw unwrapped payload, for callers that decode
    /// themselves (list endpoints with several shapes).
    pub async fn get_value<Q>(&self, path: &str, query: &Q) -> Result<Value, ApiError>
    where
        Q: Serialize + ?Sized,
    {
        Ok(self
            .execute(self.request(Method::GET, path).query(query))
            .await?
            .data)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::POST, path).json(body))
            .await?
            .decode()
    }

    /// POST returning the envelope message alongside the data.
    pub async fn post_with_message<B, T>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(self.request(Method::POST, path).json(body))
            .await?;
        Ok(ApiResponse {
            data: decode(response.data)?,
            message: response.message,
            meta: response.meta,
        })
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::PUT, path).json(body))
            .await?
            .decode()
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::PATCH, path).json(body))
            .await?
            .decode()
    }

    /// DELETE, ignoring whatever payload comes back.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    /// Send a prepared request and unwrap its envelope.
    pub async fn execute(&self, builder: RequestBuilder) -> Result<ApiResponse<Value>, ApiError> {
        let request = builder.build()?;
        let had_token = request
            .headers()
            .contains_key(reqwest::header::AUTHORIZATION);
        let method = request.method().to_string();
        let path = request.url().path().to_string();
        let started_at = Utc::now();

        let result = self.http.execute(request).await;
        let elapsed_ms = (Utc::now() - started_at).num_milliseconds();

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%method, %path, elapsed_ms, "Request failed: {e}");
                return Err(ApiError::from(e));
            }
        };

        let status = response.status();
        let meta = RequestMeta {
            method,
            path,
            status: Some(status.as_u16()),
            started_at,
            elapsed_ms,
        };
        tracing::debug!(
            method = %meta.method,
            path = %meta.path,
            status = status.as_u16(),
            elapsed_ms,
            "API request"
        );

        let text = response.text().await?;

        if !status.is_success() {
            let error = ApiError::from_response(status.as_u16(), status.canonical_reason(), &text);
            if error.is_unauthorized() {
                self.handle_unauthorized(had_token);
            } else {
                tracing::warn!(
                    method = %meta.method,
                    path = %meta.path,
                    status = status.as_u16(),
                    "API error: {error}"
                );
            }
            return Err(error);
        }

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| ApiError::decode(e.to_string()))?
        };
        let (data, message) = unwrap_body(body);
        Ok(ApiResponse {
            data,
            message,
            meta,
        })
    }

    fn handle_unauthorized(&self, had_token: bool) {
        self.session.clear();
        if !had_token {
            return;
        }
        tracing::info!("Session rejected by API, signing out");
        if let Some(hook) = &self.on_unauthorized {
            hook();
        }
    }
}

impl ApiResponse<Value> {
    fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        decode(self.data)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http_client(config: &AdminConfig) -> reqwest::Client {
    let timeout = std::time::Duration::from_secs(config.api.timeout_secs.max(1));
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::error!("Falling back to default HTTP client: {e}");
            reqwest::Client::new()
        })
}

#[cfg(target_arch = "wasm32")]
fn build_http_client(_config: &AdminConfig) -> reqwest::Client {
    reqwest::Client::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemorySessionStore;

    fn client(base: &str) -> ApiClient {
        let config = AdminConfig::default().with_base_url_override(Some(base));
        ApiClient::new(&config, Arc::new(MemorySessionStore::new()))
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let c = client("http://localhost:4000/api/v1/");
        assert_eq!(
            c.url("/colleges/getAllColleges"),
            "http://localhost:4000/api/v1/colleges/getAllColleges"
        );
        assert_eq!(c.url("auth/me"), "http://localhost:4000/api/v1/auth/me");
    }

    #[test]
    fn test_bearer_header_only_with_token() {
        let session = Arc::new(MemorySessionStore::new());
        let c = ApiClient::new(&AdminConfig::default(), session.clone());

        let req = c.request(Method::GET, "/auth/me").build().unwrap();
        assert!(req.headers().get(reqwest::header::AUTHORIZATION).is_none());

        session.set_token("tok123");
        let req = c.request(Method::GET, "/auth/me").build().unwrap();
        assert_eq!(
            req.headers()
                .get(reqwest::header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer tok123")
        );
    }

    #[test]
    fn test_clients_compare_by_session_identity() {
        let session: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
        let a = ApiClient::new(&AdminConfig::default(), session.clone());
        let b = ApiClient::new(&AdminConfig::default(), session);
        assert_eq!(a, b);
        assert_ne!(a, client("http://localhost:4000/api/v1"));
    }
}
