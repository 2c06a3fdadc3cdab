//! # API crate: typed REST client for the Campus Admin console
//!
//! Everything the console knows about the backend lives here: the HTTP client with
//! bearer-token injection, the error taxonomy, the response envelopes, the wire
//! models, and one service module per resource.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: base URL resolution, bearer header, timing, 401 handling |
//! | [`error`] | [`ApiError`] tagged enum and body normalisation |
//! | [`envelope`] | `{status, message, data}` unwrapping and [`Page`] decoding |
//! | [`retry`] | [`RetryPolicy`] for queries |
//! | [`models`] | Records mirrored from the backend |
//! | [`validate`] | Email, phone, and URL shape checks |
//! | [`services`] | `async fn`s per resource (`colleges::list`, `users::update`, …) |
//!
//! The crate has no UI dependency and runs on native targets, which is how its
//! integration tests drive it against an in-process server.

pub mod client;
pub mod envelope;
pub mod error;
pub mod models;
pub mod retry;
pub mod services;
pub mod validate;

pub use client::{ApiClient, ApiResponse, RequestMeta, UnauthorizedHook};
pub use envelope::Page;
pub use error::{ApiError, ErrorBody, FieldError};
pub use retry::RetryPolicy;
pub use services::{ListParams, DEFAULT_PAGE_SIZE};

pub use store::{AdminConfig, QueryKey, Resource, SessionStore};
