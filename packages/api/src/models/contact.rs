//! Contact-us requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    New,
    #[serde(alias = "in-progress", alias = "inProgress")]
    InProgress,
    Resolved,
    #[serde(other)]
    Unknown,
}

impl ContactStatus {
    pub const FILTERABLE: [ContactStatus; 3] = [
        ContactStatus::New,
        ContactStatus::InProgress,
        ContactStatus::Resolved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::New => "new",
            ContactStatus::InProgress => "in_progress",
            ContactStatus::Resolved => "resolved",
            ContactStatus::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContactStatus::New => "New",
            ContactStatus::InProgress => "In progress",
            ContactStatus::Resolved => "Resolved",
            ContactStatus::Unknown => "Unknown",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::FILTERABLE
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: ContactStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body for `PATCH /contact-us/:id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactStatusUpdate {
    pub status: ContactStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_spellings() {
        for raw in ["in_progress", "in-progress", "inProgress"] {
            let c: Contact = serde_json::from_value(json!({
                "_id": "c", "name": "n", "email": "e@x.io", "status": raw
            }))
            .unwrap();
            assert_eq!(c.status, ContactStatus::InProgress);
        }
        assert_eq!(
            serde_json::to_value(ContactStatus::InProgress).unwrap(),
            json!("in_progress")
        );
    }
}
