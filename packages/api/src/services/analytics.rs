//! Dashboard analytics and the activity feed.

use crate::client::ApiClient;
use crate::envelope::{decode_page, Page};
use crate::error::ApiError;
use crate::models::{DashboardAnalytics, RecentActivity};
use crate::services::ListParams;

pub async fn dashboard(client: &ApiClient) -> Result<DashboardAnalytics, ApiError> {
    client.get("/recent-activity/dashboard").await
}

pub async fn recent_activity(
    client: &ApiClient,
    params: &ListParams,
) -> Result<Page<RecentActivity>, ApiError> {
    let data = client.get_value("/recent-activity", params).await?;
    decode_page(data, "activities")
}
