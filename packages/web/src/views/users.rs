//! Member management: filters by role and status, account details, status and
//! role changes.

use api::models::{User, UserRole, UserStatus, UserUpdate};
use api::{Page, Resource};
use dioxus::prelude::*;
use ui::components::{
    ConfirmDialog, EmptyState, ErrorAlert, FilterSelect, LoadingState, ModalOverlay, Pagination,
    SearchBar, StatusBadge, Tone,
};
use ui::table::filter_rows;
use ui::{use_api, use_mutation, use_query, MutateOptions, QueryState};

use super::list::{options, short_date, use_list_controls};

fn status_tone(status: UserStatus) -> Tone {
    match status {
        UserStatus::Active => Tone::Success,
        UserStatus::Suspended | UserStatus::Pending => Tone::Warning,
        UserStatus::Banned => Tone::Danger,
        UserStatus::Unknown => Tone::Neutral,
    }
}

#[component]
pub fn Users() -> Element {
    let client = use_api();
    let controls = use_list_controls();
    let mut selected = use_signal(|| Option::<User>::None);
    let mut deleting = use_signal(|| Option::<User>::None);

    let users = use_query(
        move || controls.params().query_key(Resource::Users),
        move |client| async move {
            let params = controls.snapshot();
            api::services::users::list(&client, &params).await
        },
    );
    let update = use_mutation(&[Resource::Users]);
    let remove = use_mutation(&[Resource::Users]);

    let on_update = {
        let client = client.clone();
        move |(user, change): (User, UserUpdate)| {
            let client = client.clone();
            update.run(
                MutateOptions::success("User updated"),
                async move { api::services::users::update(&client, &user.id, &change).await },
                move |result| {
                    if let Ok(updated) = result {
                        if selected.read().is_some() {
                            selected.set(Some(updated));
                        }
                    }
                },
            );
        }
    };

    let on_delete = move |_: ()| {
        let Some(user) = deleting() else {
            return;
        };
        let client = client.clone();
        remove.run(
            MutateOptions::success("User deleted"),
            async move { api::services::users::delete(&client, &user.id).await },
            move |result| {
                deleting.set(None);
                if result.is_ok() {
                    selected.set(None);
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
                    placeholder: "Search by name or email...",
                    on_change: move |v| controls.set_search(v),
                }
                FilterSelect {
                    label: "Role",
                    value: controls.role.read().clone(),
                    options: options(&UserRole::ASSIGNABLE, UserRole::as_str, UserRole::label),
                    on_change: move |v| controls.set_role(v),
                }
                FilterSelect {
                    label: "Status",
                    value: controls.status.read().clone(),
                    options: options(&UserStatus::FILTERABLE, UserStatus::as_str, UserStatus::label),
                    on_change: move |v| controls.set_status(v),
                }
            }

            if let QueryState::Ready(page) = users.state() {
                UserTable {
                    page,
                    search: controls.search.read().clone(),
                    on_open: move |user| selected.set(Some(user)),
                    on_page: move |p| controls.set_page(p),
                }
            } else if let QueryState::Failed(error) = users.state() {
                ErrorAlert { error, on_retry: move |_| users.refetch() }
            } else {
                LoadingState { label: "Loading users..." }
            }
        }

        if let Some(user) = selected() {
            UserDetails {
                user,
                busy: update.is_busy(),
                on_update: on_update.clone(),
                on_delete: move |user| deleting.set(Some(user)),
                on_close: move |_| selected.set(None),
            }
        }

        if let Some(user) = deleting() {
            ConfirmDialog {
                title: "Delete user",
                message: format!("{} and their content will be removed.", user.display_name()),
                busy: remove.is_busy(),
                on_confirm: on_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}

#[component]
fn UserTable(
    page: Page<User>,
    search: String,
    on_open: EventHandler<User>,
    on_page: EventHandler<u32>,
) -> Element {
    let rows: Vec<User> = filter_rows(&page.items, &search, |u| {
        vec![u.display_name(), u.email.as_str()]
    })
    .into_iter()
    .cloned()
    .collect();

    if rows.is_empty() {
        return rsx! {
            EmptyState { message: "No users found" }
        };
    }

    rsx! {
        table {
            class: "table",
            thead {
                tr {
                    th { "Name" }
                    th { "Email" }
                    th { "Role" }
                    th { "Status" }
                    th { "Joined" }
                }
            }
            tbody {
                for user in rows {
                    UserRow { key: "{user.id}", user, on_open }
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
fn UserRow(user: User, on_open: EventHandler<User>) -> Element {
    let name = user.display_name().to_string();
    let role = user.role.label();
    let status = user.status.label();
    let tone = status_tone(user.status);
    let joined = short_date(user.created_at);
    let initials = user.initials();
    let target = user.clone();

    rsx! {
        tr {
            class: "table-row--clickable",
            onclick: move |_| on_open.call(target.clone()),
            td {
                div {
                    class: "cell-user",
                    span { class: "avatar", "{initials}" }
                    span { class: "cell-title", "{name}" }
                }
            }
            td { "{user.email}" }
            td { "{role}" }
            td { StatusBadge { label: "{status}", tone } }
            td { "{joined}" }
        }
    }
}

#[component]
fn UserDetails(
    user: User,
    busy: bool,
    on_update: EventHandler<(User, UserUpdate)>,
    on_delete: EventHandler<User>,
    on_close: EventHandler<()>,
) -> Element {
    let name = user.display_name().to_string();
    let college = user.college.clone().unwrap_or_else(|| "-".to_string());
    let joined = short_date(user.created_at);
    let verified = if user.is_verified { "Yes" } else { "No" };
    let status = user.status.label();
    let tone = status_tone(user.status);
    let current_role = user.role.as_str();
    let roles: Vec<(&'static str, &'static str)> = UserRole::ASSIGNABLE
        .iter()
        .map(|r| (r.as_str(), r.label()))
        .collect();

    let activate = user.clone();
    let suspend = user.clone();
    let ban = user.clone();
    let role_target = user.clone();
    let delete_target = user.clone();

    rsx! {
        ModalOverlay {
            title: "{name}",
            on_close: move |_| on_close.call(()),
            div {
                class: "modal-body",
                dl {
                    class: "detail-list",
                    dt { "Email" }
                    dd { "{user.email}" }
                    dt { "College" }
                    dd { "{college}" }
                    dt { "Verified" }
                    dd { "{verified}" }
                    dt { "Joined" }
                    dd { "{joined}" }
                    dt { "Status" }
                    dd { StatusBadge { label: "{status}", tone } }
                }

                label {
                    class: "form-field",
                    span { class: "form-label", "Role" }
                    select {
                        class: "input",
                        disabled: busy,
                        value: "{current_role}",
                        onchange: move |evt: FormEvent| {
                            if let Some(role) = UserRole::parse(&evt.value()) {
                                on_update.call((role_target.clone(), UserUpdate::role(role)));
                            }
                        },
                        for (value, label) in roles {
                            option {
                                key: "{value}",
                                value: "{value}",
                                selected: value == current_role,
                                "{label}"
                            }
                        }
                    }
                }

                div {
                    class: "form-actions",
                    if user.status != UserStatus::Active {
                        button {
                            class: "btn btn-outline",
                            disabled: busy,
                            onclick: move |_| on_update.call((activate.clone(), UserUpdate::status(UserStatus::Active))),
                            "Activate"
                        }
                    }
                    if user.status != UserStatus::Suspended {
                        button {
                            class: "btn btn-outline",
                            disabled: busy,
                            onclick: move |_| on_update.call((suspend.clone(), UserUpdate::status(UserStatus::Suspended))),
                            "Suspend"
                        }
                    }
                    if user.status != UserStatus::Banned {
                        button {
                            class: "btn btn-outline btn-danger-text",
                            disabled: busy,
                            onclick: move |_| on_update.call((ban.clone(), UserUpdate::status(UserStatus::Banned))),
                            "Ban"
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
