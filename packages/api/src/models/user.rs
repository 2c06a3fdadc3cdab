//! # Platform users as seen by the moderation console
//!
//! [`User`] is the full record returned by `/users` and `/auth/me`.
//! [`UserSummary`] is the embedded author/payer shape other resources carry.
//! [`UserUpdate`] is the partial body sent to `PATCH /users/:id`; only the fields
//! that are `Some` are serialised.
//!
//! The console only lets in users whose role is [`UserRole::Admin`]; the check
//! lives in [`User::is_admin`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[serde(alias = "ADMIN")]
    Admin,
    #[default]
    Student,
    Alumni,
    Faculty,
    #[serde(other)]
    Other,
}

impl UserRole {
    pub const ASSIGNABLE: [UserRole; 4] = [
        UserRole::Student,
        UserRole::Alumni,
        UserRole::Faculty,
        UserRole::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Student => "student",
            UserRole::Alumni => "alumni",
            UserRole::Faculty => "faculty",
            UserRole::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::Student => "Student",
            UserRole::Alumni => "Alumni",
            UserRole::Faculty => "Faculty",
            UserRole::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ASSIGNABLE
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Suspended,
    Banned,
    Pending,
    #[serde(other)]
    Unknown,
}

impl UserStatus {
    pub const FILTERABLE: [UserStatus; 4] = [
        UserStatus::Active,
        UserStatus::Suspended,
        UserStatus::Banned,
        UserStatus::Pending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Suspended => "suspended",
            UserStatus::Banned => "banned",
            UserStatus::Pending => "pending",
            UserStatus::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Suspended => "Suspended",
            UserStatus::Banned => "Banned",
            UserStatus::Pending => "Pending",
            UserStatus::Unknown => "Unknown",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::FILTERABLE
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(value))
    }
}

/// Full user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default, alias = "avatar", alias = "profileImage")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Get display name, falling back to email if name is not set.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn initials(&self) -> String {
        self.display_name()
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// The embedded author/payer shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "avatar", alias = "profileImage")]
    pub avatar_url: Option<String>,
}

impl UserSummary {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("Unknown user")
    }
}

/// Partial update for `PATCH /users/:id`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
}

impl UserUpdate {
    pub fn status(status: UserStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn role(role: UserRole) -> Self {
        Self {
            role: Some(role),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_mongo_user() {
        let user: User = serde_json::from_value(json!({
            "_id": "65f0c1",
            "name": "Grace Hopper",
            "email": "grace@navy.mil",
            "role": "admin",
            "status": "active",
            "isVerified": true,
            "createdAt": "2024-03-01T12:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(user.id, "65f0c1");
        assert!(user.is_admin());
        assert!(user.is_verified);
        assert_eq!(user.initials(), "GH");
    }

    #[test]
    fn test_unknown_role_and_status_are_preserved_as_other() {
        let user: User = serde_json::from_value(json!({
            "id": "1",
            "email": "x@y.z",
            "role": "moderator",
            "status": "deleted"
        }))
        .unwrap();
        assert_eq!(user.role, UserRole::Other);
        assert_eq!(user.status, UserStatus::Unknown);
        assert!(!user.is_admin());
        assert_eq!(user.display_name(), "x@y.z");
    }

    #[test]
    fn test_update_only_serialises_set_fields() {
        let body = serde_json::to_value(UserUpdate::status(UserStatus::Banned)).unwrap();
        assert_eq!(body, json!({"status": "banned"}));
    }
}
