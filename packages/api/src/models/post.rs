//! Posts published by platform users, moderated from the console.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Published,
    Flagged,
    Hidden,
    Removed,
    #[serde(other)]
    Unknown,
}

impl PostStatus {
    pub const FILTERABLE: [PostStatus; 4] = [
        PostStatus::Published,
        PostStatus::Flagged,
        PostStatus::Hidden,
        PostStatus::Removed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Published => "published",
            PostStatus::Flagged => "flagged",
            PostStatus::Hidden => "hidden",
            PostStatus::Removed => "removed",
            PostStatus::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PostStatus::Published => "Published",
            PostStatus::Flagged => "Flagged",
            PostStatus::Hidden => "Hidden",
            PostStatus::Removed => "Removed",
            PostStatus::Unknown => "Unknown",
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
pub struct Post {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default, alias = "user")]
    pub author: UserSummary,
    #[serde(default, alias = "text", alias = "body")]
    pub content: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub likes_count: u32,
    #[serde(default)]
    pub comments_count: u32,
    #[serde(default)]
    pub reports_count: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Post {
    /// First `max` characters of the content, with an ellipsis when cut.
    pub fn excerpt(&self, max: usize) -> String {
        let trimmed = self.content.trim();
        if trimmed.chars().count() <= max {
            return trimmed.to_string();
        }
        let cut: String = trimmed.chars().take(max).collect();
        format!("{}…", cut.trim_end())
    }
}

/// Body for `PATCH /post/:id/status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostStatusUpdate {
    pub status: PostStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_excerpt_respects_char_boundaries() {
        let post: Post = serde_json::from_value(json!({
            "_id": "p1",
            "user": {"_id": "u1", "name": "Ada"},
            "content": "Ünïcödé content that is long"
        }))
        .unwrap();
        assert_eq!(post.author.display_name(), "Ada");
        assert_eq!(post.excerpt(7), "Ünïcödé…");
        assert_eq!(post.excerpt(100), "Ünïcödé content that is long");
    }
}
