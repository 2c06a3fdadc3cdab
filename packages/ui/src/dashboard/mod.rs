//! # Dashboard widgets
//!
//! | Widget | Shows |
//! |--------|-------|
//! | [`StatCard`] | One headline number |
//! | [`BarChart`] / [`LineChart`] | Monthly series |
//! | [`Breakdown`] | Share per category |
//! | [`ActivityFeed`] | Latest platform events |
//! | [`ClockWidget`] | Local time and greeting |

use api::models::transaction::format_amount;
use api::models::{DashboardAnalytics, RecentActivity};
use chrono::Utc;
use dioxus::prelude::*;

mod charts;
mod clock;

pub use charts::{bar_layout, line_path, percentages, Bar, BarChart, Breakdown, LineChart};
pub use clock::{format_hms, greeting, ClockWidget};

/// A headline number for the stat row.
#[derive(Debug, Clone, PartialEq)]
pub struct Stat {
    pub label: &'static str,
    pub value: String,
    pub hint: Option<String>,
}

/// The stat row of the dashboard, in display order.
pub fn headline_stats(analytics: &DashboardAnalytics) -> Vec<Stat> {
    let t = &analytics.totals;
    vec![
        Stat {
            label: "Users",
            value: t.users.to_string(),
            hint: (analytics.new_users_this_month > 0)
                .then(|| format!("+{} this month", analytics.new_users_this_month)),
        },
        Stat {
            label: "Colleges",
            value: t.colleges.to_string(),
            hint: None,
        },
        Stat {
            label: "Posts",
            value: t.posts.to_string(),
            hint: None,
        },
        Stat {
            label: "Revenue",
            value: format_amount(t.revenue, "INR"),
            hint: None,
        },
        Stat {
            label: "Testimonials",
            value: t.testimonials.to_string(),
            hint: None,
        },
        Stat {
            label: "Contact requests",
            value: t.contacts.to_string(),
            hint: None,
        },
    ]
}

#[component]
pub fn StatCard(stat: Stat) -> Element {
    rsx! {
        div {
            class: "card stat-card",
            span { class: "stat-label", "{stat.label}" }
            span { class: "stat-value", "{stat.value}" }
            if let Some(hint) = stat.hint {
                span { class: "stat-hint", "{hint}" }
            }
        }
    }
}

#[component]
pub fn ActivityFeed(items: Vec<RecentActivity>) -> Element {
    let now = Utc::now();

    rsx! {
        div {
            class: "card",
            h3 { class: "card-title", "Recent activity" }
            if items.is_empty() {
                p { class: "muted", "Nothing has happened yet" }
            }
            ul {
                class: "activity-feed",
                for item in items {
                    li {
                        key: "{item.id}",
                        span { class: "activity-kind", "{item.kind}" }
                        span { class: "activity-text", "{item.description}" }
                        if let Some(actor) = item.actor.clone() {
                            span { class: "muted", "by {actor}" }
                        }
                        span { class: "activity-age", {item.age(now)} }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::models::DashboardTotals;

    #[test]
    fn test_headline_stats() {
        let analytics = DashboardAnalytics {
            totals: DashboardTotals {
                users: 120,
                colleges: 8,
                revenue: 1500.0,
                ..DashboardTotals::default()
            },
            new_users_this_month: 12,
            ..DashboardAnalytics::default()
        };
        let stats = headline_stats(&analytics);
        assert_eq!(stats.len(), 6);
        assert_eq!(stats[0].value, "120");
        assert_eq!(stats[0].hint.as_deref(), Some("+12 this month"));
        assert_eq!(stats[1].hint, None);
        assert_eq!(stats[3].value, format_amount(1500.0, "INR"));
    }
}
