//! Bulk email: compose and send, then the history of past campaigns.

use api::models::email::parse_recipients;
use api::models::{EmailCampaign, SendEmailRequest};
use api::{ApiError, ListParams, Page, Resource};
use dioxus::prelude::*;
use ui::components::{EmptyState, ErrorAlert, LoadingState, Pagination, StatusBadge, Tone};
use ui::{use_api, use_mutation, use_query, use_toasts, MutateOptions, QueryState};

use super::list::short_date;

#[derive(Debug, Clone, PartialEq, Default)]
struct Compose {
    recipients: String,
    subject: String,
    body: String,
    is_html: bool,
    send_to_all: bool,
}

impl Compose {
    fn request(&self) -> SendEmailRequest {
        SendEmailRequest {
            recipients: if self.send_to_all {
                Vec::new()
            } else {
                parse_recipients(&self.recipients)
            },
            subject: self.subject.trim().to_string(),
            body: self.body.clone(),
            is_html: self.is_html,
            send_to_all: self.send_to_all,
        }
    }
}

fn sent_message(sent: u32, failed: u32) -> String {
    let noun = if sent == 1 { "recipient" } else { "recipients" };
    if failed == 0 {
        format!("Email sent to {sent} {noun}")
    } else {
        format!("Email sent to {sent} {noun}, {failed} failed")
    }
}

#[component]
pub fn EmailCampaigns() -> Element {
    let client = use_api();
    let toasts = use_toasts();
    let mut compose = use_signal(Compose::default);
    let mut error = use_signal(|| Option::<ApiError>::None);
    let mut page = use_signal(|| 1u32);

    let campaigns = use_query(
        move || ListParams::default().with_page(page()).query_key(Resource::EmailCampaigns),
        move |client| async move {
            let params = ListParams::default().with_page(*page.peek());
            api::services::email::list_campaigns(&client, &params).await
        },
    );
    let send = use_mutation(&[Resource::EmailCampaigns]);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let request = compose.read().request();
        if let Err(e) = api::services::email::validate(&request) {
            error.set(Some(e));
            return;
        }
        error.set(None);
        let client = client.clone();
        send.run(
            MutateOptions::silent(),
            async move { api::services::email::send_to_many(&client, &request).await },
            move |result| match result {
                Ok(outcome) => {
                    toasts.success(sent_message(outcome.sent_count, outcome.failed_count));
                    compose.set(Compose::default());
                }
                Err(e) if e.is_unauthorized() => {}
                Err(e) => error.set(Some(e)),
            },
        );
    };

    let current = compose();
    let recipient_count = current.request().recipients.len();
    let failure = error();
    let field = |name: &str| {
        failure
            .as_ref()
            .and_then(|e| e.field_error(name))
            .map(str::to_string)
    };
    let recipients_error = field("recipients");
    let subject_error = field("subject");
    let body_error = field("body");
    let banner = failure
        .as_ref()
        .filter(|e| e.field_errors().is_empty())
        .map(|e| e.to_string());

    rsx! {
        div {
            class: "page page--split",
            form {
                class: "card compose",
                novalidate: true,
                onsubmit: onsubmit,
                h2 { class: "card-title", "Compose" }

                if let Some(message) = banner {
                    div { class: "alert alert--error", role: "alert", "{message}" }
                }

                label {
                    class: "form-check",
                    input {
                        r#type: "checkbox",
                        checked: current.send_to_all,
                        onchange: move |evt: FormEvent| compose.write().send_to_all = evt.checked(),
                    }
                    span { "Send to all users" }
                }
                if !current.send_to_all {
                    label {
                        class: "form-field",
                        span { class: "form-label", "Recipients" }
                        textarea {
                            class: "input",
                            rows: "3",
                            placeholder: "ada@campus.edu, alan@campus.edu",
                            value: "{current.recipients}",
                            oninput: move |evt: FormEvent| compose.write().recipients = evt.value(),
                        }
                        span { class: "form-hint", "Separate addresses with commas or new lines. {recipient_count} added." }
                        if let Some(message) = recipients_error {
                            span { class: "form-error", "{message}" }
                        }
                    }
                }
                label {
                    class: "form-field",
                    span { class: "form-label", "Subject" }
                    input {
                        class: "input",
                        value: "{current.subject}",
                        oninput: move |evt: FormEvent| compose.write().subject = evt.value(),
                    }
                    if let Some(message) = subject_error {
                        span { class: "form-error", "{message}" }
                    }
                }
                label {
                    class: "form-field",
                    span { class: "form-label", "Message" }
                    textarea {
                        class: "input",
                        rows: "10",
                        value: "{current.body}",
                        oninput: move |evt: FormEvent| compose.write().body = evt.value(),
                    }
                    if let Some(message) = body_error {
                        span { class: "form-error", "{message}" }
                    }
                }
                label {
                    class: "form-check",
                    input {
                        r#type: "checkbox",
                        checked: current.is_html,
                        onchange: move |evt: FormEvent| compose.write().is_html = evt.checked(),
                    }
                    span { "Message is HTML" }
                }
                div {
                    class: "form-actions",
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: send.is_busy(),
                        if send.is_busy() { "Sending..." } else { "Send" }
                    }
                }
            }

            section {
                class: "card",
                h2 { class: "card-title", "Past campaigns" }
                if let QueryState::Ready(history) = campaigns.state() {
                    CampaignList { history, on_page: move |p: u32| page.set(p.max(1)) }
                } else if let QueryState::Failed(error) = campaigns.state() {
                    ErrorAlert { error, on_retry: move |_| campaigns.refetch() }
                } else {
                    LoadingState { label: "Loading campaigns..." }
                }
            }
        }
    }
}

#[component]
fn CampaignList(history: Page<EmailCampaign>, on_page: EventHandler<u32>) -> Element {
    if history.items.is_empty() {
        return rsx! {
            EmptyState { message: "No campaigns sent yet" }
        };
    }

    rsx! {
        ul {
            class: "campaign-list",
            for campaign in history.items.iter().cloned() {
                CampaignItem { key: "{campaign.id}", campaign }
            }
        }
        Pagination {
            page: history.page,
            total_pages: history.total_pages(),
            limit: history.limit,
            total: history.total,
            shown: history.items.len(),
            on_change: on_page,
        }
    }
}

#[component]
fn CampaignItem(campaign: EmailCampaign) -> Element {
    let sent = short_date(campaign.created_at);
    let counts = format!("{} sent · {} failed", campaign.sent_count, campaign.failed_count);
    let (status, tone) = match campaign.status.as_deref() {
        Some("failed") => ("Failed", Tone::Danger),
        Some("pending") | Some("queued") => ("Queued", Tone::Warning),
        _ if campaign.failed_count > 0 => ("Partial", Tone::Warning),
        _ => ("Sent", Tone::Success),
    };

    rsx! {
        li {
            class: "campaign",
            div {
                class: "campaign-head",
                span { class: "cell-title", "{campaign.subject}" }
                StatusBadge { label: "{status}", tone }
            }
            div { class: "muted", "{sent} · {counts}" }
        }
    }
}
