//! Post moderation.

use crate::client::ApiClient;
use crate::envelope::{decode_page, Page};
use crate::error::ApiError;
use crate::models::post::PostStatusUpdate;
use crate::models::{Post, PostStatus};
use crate::services::ListParams;

pub async fn list(client: &ApiClient, params: &ListParams) -> Result<Page<Post>, ApiError> {
    let data = client.get_value("/post", params).await?;
    decode_page(data, "posts")
}

pub async fn get(client: &ApiClient, id: &str) -> Result<Post, ApiError> {
    client.get(&format!("/post/{id}")).await
}

pub async fn set_status(
    client: &ApiClient,
    id: &str,
    status: PostStatus,
    reason: Option<String>,
) -> Result<Post, ApiError> {
    client
        .patch(
            &format!("/post/{id}/status"),
            &PostStatusUpdate { status, reason },
        )
        .await
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    client.delete(&format!("/post/{id}")).await
}
