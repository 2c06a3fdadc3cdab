//! College CRUD.

use serde_json::json;

use crate::client::ApiClient;
use crate::envelope::{decode_page, Page};
use crate::error::ApiError;
use crate::models::{College, CollegeInput};
use crate::services::ListParams;

pub async fn list(client: &ApiClient, params: &ListParams) -> Result<Page<College>, ApiError> {
    let data = client.get_value("/colleges/getAllColleges", params).await?;
    decode_page(data, "colleges")
}

pub async fn get(client: &ApiClient, id: &str) -> Result<College, ApiError> {
    client.get(&format!("/colleges/getCollegeById/{id}")).await
}

pub async fn create(client: &ApiClient, input: &CollegeInput) -> Result<College, ApiError> {
    client.post("/colleges/createCollege", input).await
}

pub async fn update(client: &ApiClient, id: &str, input: &CollegeInput) -> Result<College, ApiError> {
    client
        .put(&format!("/colleges/updateCollegeById/{id}"), input)
        .await
}

/// Flip the active flag without resending the whole record.
pub async fn set_active(client: &ApiClient, id: &str, active: bool) -> Result<College, ApiError> {
    client
        .put(
            &format!("/colleges/updateCollegeById/{id}"),
            &json!({ "isActive": active }),
        )
        .await
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    client
        .delete(&format!("/colleges/deleteCollegeById/{id}"))
        .await
}
