//! # Console configuration: `campus-admin.toml`
//!
//! Every tunable of the console in one TOML document. The browser has no file
//! system, so the document is usually empty and the defaults apply; the API base URL
//! can be overridden at build time through `CAMPUS_API_BASE_URL`.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:4000/api/v1"
//! timeout_secs = 30
//!
//! [cache]
//! stale_secs = 300      # served without refetch while younger than this
//! retention_secs = 600  # dropped once older than this
//! max_attempts = 3      # total attempts for a failing query
//!
//! [session]
//! token_key = "campus_admin_token"
//! ```
//!
//! All structs derive `Default` (with production defaults) so that a missing or
//! empty document is equivalent to the default configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::CachePolicy;
use crate::session::TOKEN_STORAGE_KEY;

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:4000/api/v1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("api.base_url must start with http:// or https://, got {0:?}")]
    BaseUrl(String),
}

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout. Ignored on wasm, where the browser owns timeouts.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_stale_secs")]
    pub stale_secs: u32,
    #[serde(default = "default_retention_secs")]
    pub retention_secs: u32,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_stale_secs() -> u32 {
    300
}

fn default_retention_secs() -> u32 {
    600
}

fn default_max_attempts() -> u32 {
    3
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_secs: default_stale_secs(),
            retention_secs: default_retention_secs(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl CacheConfig {
    pub fn policy(&self) -> CachePolicy {
        CachePolicy {
            stale_after: Duration::seconds(i64::from(self.stale_secs)),
            retain_for: Duration::seconds(i64::from(self.retention_secs.max(self.stale_secs))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_token_key")]
    pub token_key: String,
}

fn default_token_key() -> String {
    TOKEN_STORAGE_KEY.to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_key: default_token_key(),
        }
    }
}

impl AdminConfig {
    /// Defaults plus the `CAMPUS_API_BASE_URL` value captured at compile time.
    pub fn from_build_env() -> Self {
        Self::default().with_base_url_override(option_env!("CAMPUS_API_BASE_URL"))
    }

    /// Builder method applying an optional base URL; blank values are ignored.
    pub fn with_base_url_override(mut self, base_url: Option<&str>) -> Self {
        if let Some(url) = base_url.map(str::trim).filter(|u| !u.is_empty()) {
            self.api.base_url = url.to_string();
        }
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "campus-admin.toml"
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }

    /// Parse and validate from a TOML string.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::BaseUrl(self.api.base_url.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = AdminConfig::from_toml("").unwrap();
        assert_eq!(config, AdminConfig::default());
        assert_eq!(config.base_url(), "http://localhost:4000/api/v1");
        assert_eq!(config.cache.max_attempts, 3);
        assert_eq!(config.session.token_key, "campus_admin_token");
    }

    #[test]
    fn test_partial_sections() {
        let config = AdminConfig::from_toml(
            r#"
            [api]
            base_url = "https://api.campus.example/api/v1/"

            [cache]
            stale_secs = 60
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url(), "https://api.campus.example/api/v1");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.cache.stale_secs, 60);
        assert_eq!(config.cache.retention_secs, 600);
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let err = AdminConfig::from_toml("[api]\nbase_url = \"ftp://nope\"").unwrap_err();
        assert!(matches!(err, ConfigError::BaseUrl(_)));
    }

    #[test]
    fn test_base_url_override() {
        let config = AdminConfig::default().with_base_url_override(Some("  "));
        assert_eq!(config.base_url(), DEFAULT_API_BASE_URL);
        let config = config.with_base_url_override(Some("https://prod.example/api/v1"));
        assert_eq!(config.base_url(), "https://prod.example/api/v1");
    }

    #[test]
    fn test_cache_policy_never_retains_less_than_stale() {
        let cache = CacheConfig {
            stale_secs: 120,
            retention_secs: 30,
            max_attempts: 1,
        };
        let policy = cache.policy();
        assert_eq!(policy.stale_after, Duration::seconds(120));
        assert_eq!(policy.retain_for, Duration::seconds(120));
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = AdminConfig::default();
        config.cache.stale_secs = 42;
        let text = config.to_toml().unwrap();
        assert_eq!(AdminConfig::from_toml(&text).unwrap(), config);
    }
}
