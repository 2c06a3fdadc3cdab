use api::models::DashboardAnalytics;
use api::{QueryKey, Resource};
use dioxus::prelude::*;
use ui::components::{ErrorAlert, LoadingState};
use ui::dashboard::{headline_stats, ActivityFeed, BarChart, Breakdown, ClockWidget, LineChart, StatCard};
use ui::{use_auth, use_query, QueryState};

#[component]
pub fn Dashboard() -> Element {
    let auth = use_auth();
    let analytics = use_query(
        || QueryKey::new(Resource::Dashboard),
        |client| async move { api::services::analytics::dashboard(&client).await },
    );
    let name = auth.read().user.as_ref().map(|u| u.display_name().to_string());

    rsx! {
        div {
            class: "page",
            ClockWidget { name }
            if let QueryState::Ready(data) = analytics.state() {
                DashboardBody { data }
            } else if let QueryState::Failed(error) = analytics.state() {
                ErrorAlert { error, on_retry: move |_| analytics.refetch() }
            } else {
                LoadingState { label: "Loading dashboard..." }
            }
        }
    }
}

#[component]
fn DashboardBody(data: DashboardAnalytics) -> Element {
    let stats = headline_stats(&data);

    rsx! {
        div {
            class: "stat-grid",
            for stat in stats {
                StatCard { key: "{stat.label}", stat }
            }
        }
        div {
            class: "chart-grid",
            BarChart { title: "New users per month", points: data.monthly_signups.clone() }
            LineChart { title: "Revenue", points: data.revenue.clone() }
            Breakdown { title: "Posts by status", points: data.posts_by_status.clone() }
        }
        ActivityFeed { items: data.recent_activity.clone() }
    }
}
