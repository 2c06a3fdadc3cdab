use api::models::transaction::{completed_total, format_amount};
use api::models::{Transaction, TransactionStatus};
use api::Resource;
use dioxus::prelude::*;
use ui::components::{
    EmptyState, ErrorAlert, FilterSelect, LoadingState, Pagination, SearchBar, StatusBadge, Tone,
};
use ui::table::filter_rows;
use ui::{use_query, QueryState};

use super::list::{options, short_date, use_list_controls};

fn status_tone(status: TransactionStatus) -> Tone {
    match status {
        TransactionStatus::Completed => Tone::Success,
        TransactionStatus::Pending => Tone::Warning,
        TransactionStatus::Failed => Tone::Danger,
        TransactionStatus::Refunded => Tone::Info,
        TransactionStatus::Unknown => Tone::Neutral,
    }
}

/// Currency of the page; mixed pages fall back to the first one seen.
fn page_currency(rows: &[Transaction]) -> &str {
    rows.first().map(|t| t.currency.as_str()).unwrap_or("INR")
}

#[component]
pub fn Payments() -> Element {
    let controls = use_list_controls();
    let payments = use_query(
        move || controls.params().query_key(Resource::Payments),
        move |client| async move {
            let params = controls.snapshot();
            api::services::payments::list(&client, &params).await
        },
    );

    rsx! {
        div {
            class: "page",
            div {
                class: "toolbar",
                SearchBar {
                    value: controls.search.read().clone(),
                    placeholder: "Search by reference or user...",
                    on_change: move |v| controls.set_search(v),
                }
                FilterSelect {
                    label: "Status",
                    value: controls.status.read().clone(),
                    options: options(
                        &TransactionStatus::FILTERABLE,
                        TransactionStatus::as_str,
                        TransactionStatus::label,
                    ),
                    on_change: move |v| controls.set_status(v),
                }
            }

            if let QueryState::Ready(page) = payments.state() {
                PaymentTable {
                    rows: filter_rows(&page.items, &controls.search.read(), |t| {
                        vec![
                            t.reference.as_deref().unwrap_or_default(),
                            t.user.display_name(),
                            t.user.email.as_deref().unwrap_or_default(),
                        ]
                    })
                    .into_iter()
                    .cloned()
                    .collect::<Vec<_>>(),
                }
                Pagination {
                    page: page.page,
                    total_pages: page.total_pages(),
                    limit: page.limit,
                    total: page.total,
                    shown: page.items.len(),
                    on_change: move |p| controls.set_page(p),
                }
            } else if let QueryState::Failed(error) = payments.state() {
                ErrorAlert { error, on_retry: move |_| payments.refetch() }
            } else {
                LoadingState { label: "Loading payments..." }
            }
        }
    }
}

#[component]
fn PaymentTable(rows: Vec<Transaction>) -> Element {
    if rows.is_empty() {
        return rsx! {
            EmptyState { message: "No transactions found" }
        };
    }

    let completed = rows
        .iter()
        .filter(|t| t.status == TransactionStatus::Completed)
        .count();
    let revenue = format_amount(completed_total(&rows), page_currency(&rows));

    rsx! {
        div {
            class: "summary-row",
            div {
                class: "card stat-card",
                span { class: "stat-label", "Completed on this page" }
                span { class: "stat-value", "{completed}" }
            }
            div {
                class: "card stat-card",
                span { class: "stat-label", "Revenue on this page" }
                span { class: "stat-value", "{revenue}" }
            }
        }
        table {
            class: "table",
            thead {
                tr {
                    th { "Reference" }
                    th { "User" }
                    th { "Amount" }
                    th { "Provider" }
                    th { "Status" }
                    th { "Date" }
                }
            }
            tbody {
                for transaction in rows {
                    PaymentRow { key: "{transaction.id}", transaction }
                }
            }
        }
    }
}

#[component]
fn PaymentRow(transaction: Transaction) -> Element {
    let reference = transaction.reference.clone().unwrap_or_else(|| transaction.id.clone());
    let user = transaction.user.display_name().to_string();
    let amount = transaction.formatted_amount();
    let provider = transaction.provider.clone().unwrap_or_else(|| "-".to_string());
    let status = transaction.status.label();
    let tone = status_tone(transaction.status);
    let date = short_date(transaction.created_at);

    rsx! {
        tr {
            td { class: "mono", "{reference}" }
            td { "{user}" }
            td { class: "numeric", "{amount}" }
            td { "{provider}" }
            td { StatusBadge { label: "{status}", tone } }
            td { "{date}" }
        }
    }
}
