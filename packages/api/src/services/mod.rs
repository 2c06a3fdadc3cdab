//! # Resource services
//!
//! One module per REST resource, each a set of `async fn`s taking the shared
//! [`ApiClient`](crate::ApiClient). Services translate view parameters into HTTP
//! calls and decode the response; caching and invalidation happen one layer up, in
//! the UI query hooks.
//!
//! | Module | Endpoints |
//! |--------|-----------|
//! | [`auth`] | `/auth/login`, `/auth/logout`, `/auth/me`, `/auth/verify` |
//! | [`colleges`] | `/colleges/*` |
//! | [`users`] | `/users`, `/users/:id` |
//! | [`posts`] | `/post`, `/post/:id`, `/post/:id/status` |
//! | [`testimonials`] | `/testimonials`, `/testimonials/:id` |
//! | [`contacts`] | `/contact-us`, `/contact-us/:id` |
//! | [`payments`] | `/transactions/admin/all` |
//! | [`email`] | `/email/send-to-many`, `/email/campaigns` |
//! | [`analytics`] | `/recent-activity`, `/recent-activity/dashboard` |

use serde::Serialize;
use store::{QueryKey, Resource};

pub mod analytics;
pub mod auth;
pub mod colleges;
pub mod contacts;
pub mod email;
pub mod payments;
pub mod posts;
pub mod testimonials;
pub mod users;

/// Default page size of every list view.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Query parameters shared by list endpoints. Unset fields are not sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: Some(1),
            limit: Some(DEFAULT_PAGE_SIZE),
            search: None,
            status: None,
            role: None,
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl ListParams {
    /// No pagination: the endpoint returns everything.
    pub fn all() -> Self {
        Self {
            page: None,
            limit: None,
            ..Self::default()
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page.max(1));
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit.max(1));
        self
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = non_blank(search);
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = non_blank(status);
        self
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.role = non_blank(role);
        self
    }

    /// Cache key for these parameters under `resource`.
    pub fn query_key(&self, resource: Resource) -> QueryKey {
        QueryKey::new(resource)
            .with_opt_param("page", self.page)
            .with_opt_param("limit", self.limit)
            .with_opt_param("search", self.search.as_deref())
            .with_opt_param("status", self.status.as_deref())
            .with_opt_param("role", self.role.as_deref())
    }
}
