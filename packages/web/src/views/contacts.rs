//! Messages sent through the public contact form.

use api::models::{Contact, ContactStatus};
use api::{Page, Resource};
use dioxus::prelude::*;
use ui::components::{
    ConfirmDialog, EmptyState, ErrorAlert, FilterSelect, LoadingState, ModalOverlay, Pagination,
    SearchBar, StatusBadge, Tone,
};
use ui::table::filter_rows;
use ui::{use_api, use_mutation, use_query, MutateOptions, QueryState};

use super::list::{options, short_date, use_list_controls};

fn status_tone(status: ContactStatus) -> Tone {
    match status {
        ContactStatus::New => Tone::Info,
        ContactStatus::InProgress => Tone::Warning,
        ContactStatus::Resolved => Tone::Success,
        ContactStatus::Unknown => Tone::Neutral,
    }
}

#[component]
pub fn Contacts() -> Element {
    let client = use_api();
    let controls = use_list_controls();
    let mut viewing = use_signal(|| Option::<Contact>::None);
    let mut deleting = use_signal(|| Option::<Contact>::None);

    let contacts = use_query(
        move || controls.params().query_key(Resource::Contacts),
        move |client| async move {
            let params = controls.snapshot();
            api::services::contacts::list(&client, &params).await
        },
    );
    let update = use_mutation(&[Resource::Contacts]);
    let remove = use_mutation(&[Resource::Contacts]);

    let on_status = {
        let client = client.clone();
        move |(contact, status): (Contact, ContactStatus)| {
            let client = client.clone();
            let message = format!("Marked as {}", status.label().to_lowercase());
            update.run(
                MutateOptions::success(message),
                async move { api::services::contacts::set_status(&client, &contact.id, status).await },
                move |result| {
                    if let Ok(updated) = result {
                        if viewing.read().is_some() {
                            viewing.set(Some(updated));
                        }
                    }
                },
            );
        }
    };

    let on_delete = move |_: ()| {
        let Some(contact) = deleting() else {
            return;
        };
        let client = client.clone();
        remove.run(
            MutateOptions::success("Message deleted"),
            async move { api::services::contacts::delete(&client, &contact.id).await },
            move |result| {
                deleting.set(None);
                if result.is_ok() {
                    viewing.set(None);
                }
            },
        );
    };

    rsx! {
        div {
            class: "page",
            div {
                class: "toolbar",
                SearchBar {
                    value: controls.search.read().clone(),
                    placeholder: "Search messages...",
                    on_change: move |v| controls.set_search(v),
                }
                FilterSelect {
                    label: "Status",
                    value: controls.status.read().clone(),
                    options: options(&ContactStatus::FILTERABLE, ContactStatus::as_str, ContactStatus::label),
                    on_change: move |v| controls.set_status(v),
                }
            }

            if let QueryState::Ready(page) = contacts.state() {
                ContactTable {
                    page,
                    search: controls.search.read().clone(),
                    on_open: move |contact| viewing.set(Some(contact)),
                    on_page: move |p| controls.set_page(p),
                }
            } else if let QueryState::Failed(error) = contacts.state() {
                ErrorAlert { error, on_retry: move |_| contacts.refetch() }
            } else {
                LoadingState { label: "Loading messages..." }
            }
        }

        if let Some(contact) = viewing() {
            ContactDetails {
                contact,
                busy: update.is_busy(),
                on_status: on_status.clone(),
                on_delete: move |contact| deleting.set(Some(contact)),
                on_close: move |_| viewing.set(None),
            }
        }

        if let Some(contact) = deleting() {
            ConfirmDialog {
                title: "Delete message",
                message: format!("The message from {} will be removed.", contact.name),
                busy: remove.is_busy(),
                on_confirm: on_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}

#[component]
fn ContactTable(
    page: Page<Contact>,
    search: String,
    on_open: EventHandler<Contact>,
    on_page: EventHandler<u32>,
) -> Element {
    let rows: Vec<Contact> = filter_rows(&page.items, &search, |c| {
        vec![
            c.name.as_str(),
            c.email.as_str(),
            c.subject.as_deref().unwrap_or_default(),
            c.message.as_str(),
        ]
    })
    .into_iter()
    .cloned()
    .collect();

    if rows.is_empty() {
        return rsx! {
            EmptyState { message: "No messages" }
        };
    }

    rsx! {
        table {
            class: "table",
            thead {
                tr {
                    th { "From" }
                    th { "Subject" }
                    th { "Status" }
                    th { "Received" }
                }
            }
            tbody {
                for contact in rows {
                    ContactRow { key: "{contact.id}", contact, on_open }
                }
            }
        }
        Pagination {
            page: page.page,
            total_pages: page.total_pages(),
            limit: page.limit,
            total: page.total,
            shown: page.items.len(),
            on_change: on_page,
        }
    }
}

#[component]
fn ContactRow(contact: Contact, on_open: EventHandler<Contact>) -> Element {
    let subject = contact.subject.clone().unwrap_or_else(|| "(no subject)".to_string());
    let status = contact.status.label();
    let tone = status_tone(contact.status);
    let received = short_date(contact.created_at);
    let target = contact.clone();

    rsx! {
        tr {
            class: "table-row--clickable",
            onclick: move |_| on_open.call(target.clone()),
            td {
                div { class: "cell-title", "{contact.name}" }
                div { class: "cell-sub muted", "{contact.email}" }
            }
            td { "{subject}" }
            td { StatusBadge { label: "{status}", tone } }
            td { "{received}" }
        }
    }
}

#[component]
fn ContactDetails(
    contact: Contact,
    busy: bool,
    on_status: EventHandler<(Contact, ContactStatus)>,
    on_delete: EventHandler<Contact>,
    on_close: EventHandler<()>,
) -> Element {
    let subject = contact.subject.clone().unwrap_or_else(|| "(no subject)".to_string());
    let phone = contact.phone.clone().unwrap_or_else(|| "-".to_string());
    let received = short_date(contact.created_at);
    let status = contact.status.label();
    let tone = status_tone(contact.status);
    let can_start = contact.status == ContactStatus::New;
    let can_resolve = contact.status != ContactStatus::Resolved;

    let start_target = contact.clone();
    let resolve_target = contact.clone();
    let delete_target = contact.clone();

    rsx! {
        ModalOverlay {
            title: "{subject}",
            on_close: move |_| on_close.call(()),
            div {
                class: "modal-body",
                dl {
                    class: "detail-list",
                    dt { "From" }
                    dd { "{contact.name}" }
                    dt { "Email" }
                    dd { a { href: "mailto:{contact.email}", "{contact.email}" } }
                    dt { "Phone" }
                    dd { "{phone}" }
                    dt { "Received" }
                    dd { "{received}" }
                    dt { "Status" }
                    dd { StatusBadge { label: "{status}", tone } }
                }
                p { class: "contact-message", "{contact.message}" }
                div {
                    class: "form-actions",
                    if can_start {
                        button {
                            class: "btn btn-outline",
                            disabled: busy,
                            onclick: move |_| on_status.call((start_target.clone(), ContactStatus::InProgress)),
                            "Mark in progress"
                        }
                    }
                    if can_resolve {
                        button {
                            class: "btn btn-primary",
                            disabled: busy,
                            onclick: move |_| on_status.call((resolve_target.clone(), ContactStatus::Resolved)),
                            "Mark resolved"
                        }
                    }
                    button {
                        class: "btn btn-danger",
                        onclick: move |_| on_delete.call(delete_target.clone()),
                        "Delete"
                    }
                }
            }
        }
    }
}
