//! Dashboard analytics and the recent-activity feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTotals {
    #[serde(default, alias = "totalUsers")]
    pub users: u64,
    #[serde(default, alias = "totalColleges")]
    pub colleges: u64,
    #[serde(default, alias = "totalPosts")]
    pub posts: u64,
    #[serde(default, alias = "totalTestimonials")]
    pub testimonials: u64,
    #[serde(default, alias = "totalContacts")]
    pub contacts: u64,
    #[serde(default, alias = "totalRevenue")]
    pub revenue: f64,
}

/// One labelled value of a chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    #[serde(alias = "month", alias = "name", alias = "_id")]
    pub label: String,
    #[serde(alias = "count", alias = "total", alias = "amount")]
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardAnalytics {
    #[serde(default)]
    pub totals: DashboardTotals,
    #[serde(default)]
    pub new_users_this_month: u64,
    #[serde(default, alias = "userGrowth")]
    pub monthly_signups: Vec<SeriesPoint>,
    #[serde(default, alias = "monthlyRevenue")]
    pub revenue: Vec<SeriesPoint>,
    #[serde(default)]
    pub posts_by_status: Vec<SeriesPoint>,
    #[serde(default, alias = "recentActivities")]
    pub recent_activity: Vec<RecentActivity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default, alias = "type", alias = "action")]
    pub kind: String,
    #[serde(default, alias = "message")]
    pub description: String,
    #[serde(default, alias = "user", alias = "performedBy")]
    pub actor: Option<String>,
    #[serde(default, alias = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl RecentActivity {
    /// "5m ago"-style age relative to `now`.
    pub fn age(&self, now: DateTime<Utc>) -> String {
        let Some(at) = self.created_at else {
            return String::new();
        };
        let secs = (now - at).num_seconds().max(0);
        match secs {
            0..=59 => "just now".to_string(),
            60..=3_599 => format!("{}m ago", secs / 60),
            3_600..=86_399 => format!("{}h ago", secs / 3_600),
            _ => format!("{}d ago", secs / 86_400),
        }
    }
}
