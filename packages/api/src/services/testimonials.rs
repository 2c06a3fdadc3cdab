//! Testimonial CRUD.

use serde_json::json;

use crate::client::ApiClient;
use crate::envelope::{decode_page, Page};
use crate::error::ApiError;
use crate::models::{Testimonial, TestimonialInput};
use crate::services::ListParams;

pub async fn list(client: &ApiClient, params: &ListParams) -> Result<Page<Testimonial>, ApiError> {
    let data = client.get_value("/testimonials", params).await?;
    decode_page(data, "testimonials")
}

pub async fn create(client: &ApiClient, input: &TestimonialInput) -> Result<Testimonial, ApiError> {
    client.post("/testimonials", input).await
}

pub async fn update(
    client: &ApiClient,
    id: &str,
    input: &TestimonialInput,
) -> Result<Testimonial, ApiError> {
    client.patch(&format!("/testimonials/{id}"), input).await
}

pub async fn set_published(
    client: &ApiClient,
    id: &str,
    published: bool,
) -> Result<Testimonial, ApiError> {
    client
        .patch(
            &format!("/testimonials/{id}"),
            &json!({ "isPublished": published }),
        )
        .await
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    client.delete(&format!("/testimonials/{id}")).await
}
