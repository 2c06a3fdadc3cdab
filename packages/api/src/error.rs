//! # Error taxonomy for every API call
//!
//! Errors are normalised exactly once, at the client boundary, into [`ApiError`].
//! Views never inspect raw bodies: they match on the variant and read `message`,
//! `code`, or the per-field errors.
//!
//! ## Body normalisation
//!
//! [`ApiError::from_response`] accepts the shapes the backend produces:
//!
//! - `{"message": "Not found"}`
//! - `{"message": ["name should not be empty", "email must be an email"]}`
//! - `{"status": "error", "message": "...", "code": "COLLEGE_EXISTS"}`
//! - `{"errors": {"email": "already taken"}}` or
//!   `{"errors": [{"field": "email", "message": "already taken"}]}`
//! - a non-JSON body, where the HTTP reason phrase is used instead.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A validation message attached to one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// The uniform `{message, code, errors?}` shape shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Network error: {message}")]
    Network { message: String },
    /// HTTP 401. The session token has already been cleared.
    #[error("{message}")]
    Unauthorized { message: String },
    /// Any other non-success status.
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        code: Option<String>,
        errors: Vec<FieldError>,
    },
    /// A success response whose body did not have the expected shape.
    #[error("Unexpected response from server: {message}")]
    Decode { message: String },
    /// Client-side form validation failed; nothing was sent.
    #[error("Please correct the highlighted fields")]
    Validation { fields: Vec<FieldError> },
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn validation(fields: Vec<FieldError>) -> Self {
        Self::Validation { fields }
    }

    /// HTTP status, when the error came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Transport failures and 5xx responses are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network { .. } => true,
            ApiError::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Per-field messages, from the server or from local validation.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ApiError::Http { errors, .. } => errors,
            ApiError::Validation { fields } => fields,
            _ => &[],
        }
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors()
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn body(&self) -> ErrorBody {
        let code = match self {
            ApiError::Http { code, .. } => code.clone(),
            ApiError::Network { .. } => Some("NETWORK_ERROR".to_string()),
            ApiError::Unauthorized { .. } => Some("UNAUTHORIZED".to_string()),
            ApiError::Decode { .. } => Some("DECODE_ERROR".to_string()),
            ApiError::Validation { .. } => Some("VALIDATION_ERROR".to_string()),
        };
        ErrorBody {
            message: self.to_string(),
            code,
            errors: self.field_errors().to_vec(),
        }
    }

    /// Build the error for a non-success response.
    pub fn from_response(status: u16, reason: Option<&str>, body: &str) -> Self {
        let json: Option<Value> = serde_json::from_str(body).ok();
        let fallback = || match reason {
            Some(r) if !r.is_empty() => r.to_string(),
            _ => format!("Request failed with status {status}"),
        };

        let (message, code, errors) = match json {
            Some(Value::Object(ref map)) => {
                let message = map
                    .get("message")
                    .and_then(message_text)
                    .or_else(|| map.get("error").and_then(message_text))
                    .unwrap_or_else(fallback);
                let code = map.get("code").and_then(|c| match c {
                    Value::String(s) if !s.is_empty() => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                });
                let errors = map.get("errors").map(field_errors).unwrap_or_default();
                (message, code, errors)
            }
            Some(Value::String(s)) if !s.trim().is_empty() => (s, None, Vec::new()),
            _ => (fallback(), None, Vec::new()),
        };

        if status == 401 {
            return ApiError::Unauthorized { message };
        }
        ApiError::Http {
            status,
            message,
            code,
            errors,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::decode(e.to_string())
        } else {
            ApiError::network(e.to_string())
        }
    }
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("; "))
            }
        }
        _ => None,
    }
}

fn field_errors(value: &Value) -> Vec<FieldError> {
    match value {
        Value::Object(map) => map
            .iter()
            .filter_map(|(field, msg)| {
                message_text(msg).map(|message| FieldError {
                    field: field.clone(),
                    message,
                })
            })
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| {
                let obj = item.as_object()?;
                let field = ["field", "path", "property", "param"]
                    .iter()
                    .find_map(|k| obj.get(*k).and_then(Value::as_str))?;
                let message = ["message", "msg"]
                    .iter()
                    .find_map(|k| obj.get(*k).and_then(message_text))
                    .unwrap_or_else(|| "is invalid".to_string());
                Some(FieldError {
                    field: field.to_string(),
                    message,
                })
            })
            .collect(),
        _ => Vec::new(),
    }
}
