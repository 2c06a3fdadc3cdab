//! Contact-us requests.

use crate::client::ApiClient;
use crate::envelope::{decode_page, Page};
use crate::error::ApiError;
use crate::models::contact::ContactStatusUpdate;
use crate::models::{Contact, ContactStatus};
use crate::services::ListParams;

pub async fn list(client: &ApiClient, params: &ListParams) -> Result<Page<Contact>, ApiError> {
    let data = client.get_value("/contact-us", params).await?;
    decode_page(data, "contacts")
}

pub async fn set_status(
    client: &ApiClient,
    id: &str,
    status: ContactStatus,
) -> Result<Contact, ApiError> {
    client
        .patch(&format!("/contact-us/{id}"), &ContactStatusUpdate { status })
        .await
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    client.delete(&format!("/contact-us/{id}")).await
}
