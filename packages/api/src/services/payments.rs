//! Payment transactions (read-only).

use crate::client::ApiClient;
use crate::envelope::{decode_page, Page};
use crate::error::ApiError;
use crate::models::Transaction;
use crate::services::ListParams;

pub async fn list(client: &ApiClient, params: &ListParams) -> Result<Page<Transaction>, ApiError> {
    let data = client.get_value("/transactions/admin/all", params).await?;
    decode_page(data, "transactions")
}
