//! Email campaigns.

use crate::client::ApiClient;
use crate::envelope::{decode_page, Page};
use crate::error::{ApiError, FieldError};
use crate::models::email::{EmailCampaign, SendEmailRequest, SendEmailResult};
use crate::services::ListParams;
use crate::validate::is_valid_email;

/// Send a campaign. The request is checked locally first so an obviously bad
/// campaign never reaches the API.
pub async fn send_to_many(
    client: &ApiClient,
    request: &SendEmailRequest,
) -> Result<SendEmailResult, ApiError> {
    validate(request)?;
    let response = client
        .post_with_message::<_, Option<SendEmailResult>>("/email/send-to-many", request)
        .await?;
    Ok(response.data.unwrap_or(SendEmailResult {
        sent_count: request.recipients.len() as u32,
        failed_count: 0,
    }))
}

pub async fn list_campaigns(
    client: &ApiClient,
    params: &ListParams,
) -> Result<Page<EmailCampaign>, ApiError> {
    let data = client.get_value("/email/campaigns", params).await?;
    decode_page(data, "campaigns")
}

/// Client-side validation of a send request.
pub fn validate(request: &SendEmailRequest) -> Result<(), ApiError> {
    let mut fields = Vec::new();
    if request.subject.trim().is_empty() {
        fields.push(FieldError::new("subject", "Subject is required"));
    }
    if request.body.trim().is_empty() {
        fields.push(FieldError::new("body", "Message is required"));
    }
    if !request.send_to_all {
        if request.recipients.is_empty() {
            fields.push(FieldError::new("recipients", "Add at least one recipient"));
        } else if let Some(bad) = request.recipients.iter().find(|r| !is_valid_email(r)) {
            fields.push(FieldError::new(
                "recipients",
                &format!("{bad} is not a valid email address"),
            ));
        }
    }
    if fields.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation(fields))
    }
}
