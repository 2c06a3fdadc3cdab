//! Email campaigns sent to platform users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailCampaign {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub subject: String,
    #[serde(default, alias = "message", alias = "html")]
    pub body: String,
    #[serde(default, alias = "to", alias = "emails")]
    pub recipients: Vec<String>,
    #[serde(default)]
    pub sent_count: u32,
    #[serde(default)]
    pub failed_count: u32,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body for `POST /email/send-to-many`. An empty recipient list with
/// `send_to_all` set targets every user.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
    pub is_html: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub send_to_all: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailResult {
    #[serde(default, alias = "sent", alias = "successCount")]
    pub sent_count: u32,
    #[serde(default, alias = "failed", alias = "failureCount")]
    pub failed_count: u32,
}

/// Split a free-form recipient field (commas, semicolons, newlines) into trimmed,
/// de-duplicated addresses, preserving first-seen order.
pub fn parse_recipients(raw: &str) -> Vec<String> {
    let mut seen = Vec::<String>::new();
    for part in raw.split([',', ';', '\n', '\r']) {
        let addr = part.trim();
        if addr.is_empty() {
            continue;
        }
        if !seen.iter().any(|s| s.eq_ignore_ascii_case(addr)) {
            seen.push(addr.to_string());
        }
    }
    seen
}
