//! User moderation.

use crate::client::ApiClient;
use crate::envelope::{decode_page, Page};
use crate::error::ApiError;
use crate::models::{User, UserUpdate};
use crate::services::ListParams;

pub async fn list(client: &ApiClient, params: &ListParams) -> Result<Page<User>, ApiError> {
    let data = client.get_value("/users", params).await?;
    decode_page(data, "users")
}

pub async fn get(client: &ApiClient, id: &str) -> Result<User, ApiError> {
    client.get(&format!("/users/{id}")).await
}

pub async fn update(client: &ApiClient, id: &str, update: &UserUpdate) -> Result<User, ApiError> {
    client.patch(&format!("/users/{id}"), update).await
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    client.delete(&format!("/users/{id}")).await
}
