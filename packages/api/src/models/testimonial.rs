//! Testimonials shown on the public site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub name: String,
    #[serde(default, alias = "role")]
    pub designation: Option<String>,
    #[serde(default, alias = "content")]
    pub message: String,
    #[serde(default = "default_rating")]
    pub rating: u8,
    #[serde(default, alias = "avatar", alias = "image")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_rating() -> u8 {
    5
}

impl Testimonial {
    /// Five characters of filled/empty stars.
    pub fn stars(&self) -> String {
        let filled = usize::from(self.rating.min(5));
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }
}

/// Body for create and update.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    pub message: String,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub is_published: bool,
}

impl Default for TestimonialInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            designation: None,
            message: String::new(),
            rating: default_rating(),
            avatar_url: None,
            is_published: false,
        }
    }
}

impl From<&Testimonial> for TestimonialInput {
    fn from(t: &Testimonial) -> Self {
        Self {
            name: t.name.clone(),
            designation: t.designation.clone(),
            message: t.message.clone(),
            rating: t.rating,
            avatar_url: t.avatar_url.clone(),
            is_published: t.is_published,
        }
    }
}
