//! College directory: list, create and edit through the tabbed form, toggle
//! active, delete.

use api::models::{College, CollegeInput};
use api::{Page, Resource};
use dioxus::prelude::*;
use ui::college_form::{server_field_errors, FieldErrors};
use ui::components::{
    ConfirmDialog, EmptyState, ErrorAlert, FilterSelect, LoadingState, ModalOverlay, Pagination,
    SearchBar, StatusBadge, Tone,
};
use ui::icons::FaPlus;
use ui::table::{filter_rows, matches_status};
use ui::{use_api, use_mutation, use_query, CollegeForm, Icon, MutateOptions, QueryState};

use super::list::{short_date, use_list_controls};

#[derive(Clone, PartialEq)]
enum Editor {
    New,
    Edit(College),
}

fn active_key(college: &College) -> &'static str {
    if college.is_active {
        "active"
    } else {
        "inactive"
    }
}

#[component]
pub fn Colleges() -> Element {
    let client = use_api();
    let controls = use_list_controls();
    let mut active = use_signal(String::new);
    let mut editor = use_signal(|| Option::<Editor>::None);
    let mut server_errors = use_signal(FieldErrors::new);
    let mut deleting = use_signal(|| Option::<College>::None);

    let colleges = use_query(
        move || controls.params().query_key(Resource::Colleges),
        move |client| async move {
            let params = controls.snapshot();
            api::services::colleges::list(&client, &params).await
        },
    );
    let save = use_mutation(&[Resource::Colleges]);
    let toggle = use_mutation(&[Resource::Colleges]);
    let remove = use_mutation(&[Resource::Colleges]);

    let on_submit = {
        let client = client.clone();
        move |input: CollegeInput| {
            let client = client.clone();
            let target = editor();
            let options = if matches!(target, Some(Editor::Edit(_))) {
                MutateOptions::success("College updated")
            } else {
                MutateOptions::success("College created")
            };
            let op = async move {
                match target {
                    Some(Editor::Edit(college)) => {
                        api::services::colleges::update(&client, &college.id, &input).await
                    }
                    _ => api::services::colleges::create(&client, &input).await,
                }
            };
            save.run(options, op, move |result| match result {
                Ok(_) => {
                    server_errors.set(FieldErrors::new());
                    editor.set(None);
                }
                Err(e) => server_errors.set(server_field_errors(&e)),
            });
        }
    };

    let on_toggle = {
        let client = client.clone();
        move |college: College| {
            let client = client.clone();
            let next = !college.is_active;
            let message = if next { "College activated" } else { "College deactivated" };
            toggle.run(
                MutateOptions::success(message),
                async move { api::services::colleges::set_active(&client, &college.id, next).await },
                |_| {},
            );
        }
    };

    let on_delete = move |_: ()| {
        let Some(college) = deleting() else {
            return;
        };
        let client = client.clone();
        remove.run(
            MutateOptions::success("College deleted"),
            async move { api::services::colleges::delete(&client, &college.id).await },
            move |_| deleting.set(None),
        );
    };

    let heading = if matches!(*editor.read(), Some(Editor::Edit(_))) {
        "Edit college"
    } else {
        "New college"
    };

    rsx! {
        div {
            class: "page",
            div {
                class: "toolbar",
                SearchBar {
                    value: controls.search.read().clone(),
                    placeholder: "Search colleges...",
                    on_change: move |v| controls.set_search(v),
                }
                FilterSelect {
                    label: "Status",
                    value: active(),
                    options: vec![
                        ("active".to_string(), "Active".to_string()),
                        ("inactive".to_string(), "Inactive".to_string()),
                    ],
                    on_change: move |v| active.set(v),
                }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| {
                        server_errors.set(FieldErrors::new());
                        editor.set(Some(Editor::New));
                    },
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    span { "Add college" }
                }
            }

            if let QueryState::Ready(page) = colleges.state() {
                CollegeTable {
                    page,
                    search: controls.search.read().clone(),
                    active: active(),
                    on_edit: move |college: College| {
                        server_errors.set(FieldErrors::new());
                        editor.set(Some(Editor::Edit(college)));
                    },
                    on_toggle: on_toggle.clone(),
                    on_delete: move |college| deleting.set(Some(college)),
                    on_page: move |p| controls.set_page(p),
                }
            } else if let QueryState::Failed(error) = colleges.state() {
                ErrorAlert { error, on_retry: move |_| colleges.refetch() }
            } else {
                LoadingState { label: "Loading colleges..." }
            }
        }

        if let Some(target) = editor() {
            ModalOverlay {
                title: "{heading}",
                wide: true,
                on_close: move |_| editor.set(None),
                CollegeForm {
                    initial: if let Editor::Edit(college) = target { Some(college) } else { None },
                    busy: save.is_busy(),
                    server_errors: server_errors(),
                    on_submit: on_submit.clone(),
                    on_cancel: move |_| editor.set(None),
                }
            }
        }

        if let Some(college) = deleting() {
            ConfirmDialog {
                title: "Delete college",
                message: format!("\"{}\" will be removed permanently.", college.name),
                busy: remove.is_busy(),
                on_confirm: on_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}

#[component]
fn CollegeTable(
    page: Page<College>,
    search: String,
    active: String,
    on_edit: EventHandler<College>,
    on_toggle: EventHandler<College>,
    on_delete: EventHandler<College>,
    on_page: EventHandler<u32>,
) -> Element {
    let rows: Vec<College> = filter_rows(&page.items, &search, |c| {
        vec![
            c.name.as_str(),
            c.city.as_deref().unwrap_or_default(),
            c.email.as_deref().unwrap_or_default(),
        ]
    })
    .into_iter()
    .filter(|c| matches_status(&active, active_key(c)))
    .cloned()
    .collect();
    let total_pages = page.total_pages();

    if rows.is_empty() {
        return rsx! {
            EmptyState { message: "No colleges match these filters" }
        };
    }

    rsx! {
        table {
            class: "table",
            thead {
                tr {
                    th { "Name" }
                    th { "Type" }
                    th { "Contact" }
                    th { "Status" }
                    th { "Added" }
                    th { class: "table-actions", "" }
                }
            }
            tbody {
                for college in rows.iter().cloned() {
                    CollegeRow {
                        key: "{college.id}",
                        college,
                        on_edit,
                        on_toggle,
                        on_delete,
                    }
                }
            }
        }
        Pagination {
            page: page.page,
            total_pages,
            limit: page.limit,
            total: page.total,
            shown: page.items.len(),
            on_change: on_page,
        }
    }
}

#[component]
fn CollegeRow(
    college: College,
    on_edit: EventHandler<College>,
    on_toggle: EventHandler<College>,
    on_delete: EventHandler<College>,
) -> Element {
    let location = college.location();
    let kind = college.college_type.clone().unwrap_or_else(|| "-".to_string());
    let contact = college.email.clone().unwrap_or_else(|| "-".to_string());
    let added = short_date(college.created_at);
    let (status, tone, toggle_label) = if college.is_active {
        ("Active", Tone::Success, "Deactivate")
    } else {
        ("Inactive", Tone::Neutral, "Activate")
    };
    let edit_target = college.clone();
    let toggle_target = college.clone();
    let delete_target = college.clone();

    rsx! {
        tr {
            td {
                div { class: "cell-title", "{college.name}" }
                if !location.is_empty() {
                    div { class: "cell-sub muted", "{location}" }
                }
            }
            td { "{kind}" }
            td { "{contact}" }
            td { StatusBadge { label: "{status}", tone } }
            td { "{added}" }
            td {
                class: "table-actions",
                button {
                    class: "btn btn-ghost btn-sm",
                    onclick: move |_| on_edit.call(edit_target.clone()),
                    "Edit"
                }
                button {
                    class: "btn btn-ghost btn-sm",
                    onclick: move |_| on_toggle.call(toggle_target.clone()),
                    "{toggle_label}"
                }
                button {
                    class: "btn btn-ghost btn-sm btn-danger-text",
                    onclick: move |_| on_delete.call(delete_target.clone()),
                    "Delete"
                }
            }
        }
    }
}
