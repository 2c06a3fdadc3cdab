//! Testimonials shown on the public site.

use std::collections::BTreeMap;

use api::models::{Testimonial, TestimonialInput};
use api::validate::is_http_url;
use api::{Page, Resource};
use dioxus::prelude::*;
use ui::components::{
    ConfirmDialog, EmptyState, ErrorAlert, FilterSelect, LoadingState, ModalOverlay, Pagination,
    SearchBar, StatusBadge, Tone,
};
use ui::icons::FaPlus;
use ui::table::{filter_rows, matches_status};
use ui::{use_api, use_mutation, use_query, Icon, MutateOptions, QueryState};

use super::list::{short_date, use_list_controls};

/// Editable copy of a testimonial; every field as typed.
#[derive(Debug, Clone, PartialEq)]
struct Draft {
    name: String,
    designation: String,
    message: String,
    rating: String,
    avatar_url: String,
    is_published: bool,
}

impl Draft {
    fn new(existing: Option<&Testimonial>) -> Self {
        match existing {
            Some(t) => Self {
                name: t.name.clone(),
                designation: t.designation.clone().unwrap_or_default(),
                message: t.message.clone(),
                rating: t.rating.to_string(),
                avatar_url: t.avatar_url.clone().unwrap_or_default(),
                is_published: t.is_published,
            },
            None => Self {
                name: String::new(),
                designation: String::new(),
                message: String::new(),
                rating: "5".to_string(),
                avatar_url: String::new(),
                is_published: false,
            },
        }
    }

    /// The request body, or the message per invalid field.
    fn to_input(&self) -> Result<TestimonialInput, BTreeMap<&'static str, &'static str>> {
        let mut errors = BTreeMap::new();
        if self.name.trim().is_empty() {
            errors.insert("name", "Name is required");
        }
        if self.message.trim().is_empty() {
            errors.insert("message", "Message is required");
        }
        let rating = self.rating.trim().parse::<u8>().ok().filter(|r| (1..=5).contains(r));
        if rating.is_none() {
            errors.insert("rating", "Rating must be between 1 and 5");
        }
        let avatar = self.avatar_url.trim();
        if !avatar.is_empty() && !is_http_url(avatar) {
            errors.insert("avatar_url", "Enter a valid URL");
        }
        match rating {
            Some(rating) if errors.is_empty() => Ok(TestimonialInput {
                name: self.name.trim().to_string(),
                designation: non_blank(&self.designation),
                message: self.message.trim().to_string(),
                rating,
                avatar_url: non_blank(avatar),
                is_published: self.is_published,
            }),
            _ => Err(errors),
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn published_key(t: &Testimonial) -> &'static str {
    if t.is_published {
        "published"
    } else {
        "draft"
    }
}

#[derive(Clone, PartialEq)]
enum Editor {
    New,
    Edit(Testimonial),
}

#[component]
pub fn Testimonials() -> Element {
    let client = use_api();
    let controls = use_list_controls();
    let mut visibility = use_signal(String::new);
    let mut editor = use_signal(|| Option::<Editor>::None);
    let mut deleting = use_signal(|| Option::<Testimonial>::None);

    let testimonials = use_query(
        move || controls.params().query_key(Resource::Testimonials),
        move |client| async move {
            let params = controls.snapshot();
            api::services::testimonials::list(&client, &params).await
        },
    );
    let save = use_mutation(&[Resource::Testimonials]);
    let publish = use_mutation(&[Resource::Testimonials]);
    let remove = use_mutation(&[Resource::Testimonials]);

    let on_save = {
        let client = client.clone();
        move |input: TestimonialInput| {
            let client = client.clone();
            let target = editor();
            let options = if matches!(target, Some(Editor::Edit(_))) {
                MutateOptions::success("Testimonial updated")
            } else {
                MutateOptions::success("Testimonial added")
            };
            let op = async move {
                match target {
                    Some(Editor::Edit(t)) => {
                        api::services::testimonials::update(&client, &t.id, &input).await
                    }
                    _ => api::services::testimonials::create(&client, &input).await,
                }
            };
            save.run(options, op, move |result| {
                if result.is_ok() {
                    editor.set(None);
                }
            });
        }
    };

    let on_publish = {
        let client = client.clone();
        move |t: Testimonial| {
            let client = client.clone();
            let next = !t.is_published;
            let message = if next { "Testimonial published" } else { "Testimonial unpublished" };
            publish.run(
                MutateOptions::success(message),
                async move { api::services::testimonials::set_published(&client, &t.id, next).await },
                |_| {},
            );
        }
    };

    let on_delete = move |_: ()| {
        let Some(t) = deleting() else {
            return;
        };
        let client = client.clone();
        remove.run(
            MutateOptions::success("Testimonial deleted"),
            async move { api::services::testimonials::delete(&client, &t.id).await },
            move |_| deleting.set(None),
        );
    };

    let heading = if matches!(*editor.read(), Some(Editor::Edit(_))) {
        "Edit testimonial"
    } else {
        "New testimonial"
    };

    rsx! {
        div {
            class: "page",
            div {
                class: "toolbar",
                SearchBar {
                    value: controls.search.read().clone(),
                    placeholder: "Search testimonials...",
                    on_change: move |v| controls.set_search(v),
                }
                FilterSelect {
                    label: "Visibility",
                    value: visibility(),
                    options: vec![
                        ("published".to_string(), "Published".to_string()),
                        ("draft".to_string(), "Draft".to_string()),
                    ],
                    on_change: move |v| visibility.set(v),
                }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| editor.set(Some(Editor::New)),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    span { "Add testimonial" }
                }
            }

            if let QueryState::Ready(page) = testimonials.state() {
                TestimonialTable {
                    page,
                    search: controls.search.read().clone(),
                    visibility: visibility(),
                    on_edit: move |t| editor.set(Some(Editor::Edit(t))),
                    on_publish: on_publish.clone(),
                    on_delete: move |t| deleting.set(Some(t)),
                    on_page: move |p| controls.set_page(p),
                }
            } else if let QueryState::Failed(error) = testimonials.state() {
                ErrorAlert { error, on_retry: move |_| testimonials.refetch() }
            } else {
                LoadingState { label: "Loading testimonials..." }
            }
        }

        if let Some(target) = editor() {
            ModalOverlay {
                title: "{heading}",
                on_close: move |_| editor.set(None),
                TestimonialForm {
                    initial: if let Editor::Edit(t) = target { Some(t) } else { None },
                    busy: save.is_busy(),
                    on_submit: on_save.clone(),
                    on_cancel: move |_| editor.set(None),
                }
            }
        }

        if let Some(t) = deleting() {
            ConfirmDialog {
                title: "Delete testimonial",
                message: format!("The testimonial from {} will be removed.", t.name),
                busy: remove.is_busy(),
                on_confirm: on_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}

#[component]
fn TestimonialTable(
    page: Page<Testimonial>,
    search: String,
    visibility: String,
    on_edit: EventHandler<Testimonial>,
    on_publish: EventHandler<Testimonial>,
    on_delete: EventHandler<Testimonial>,
    on_page: EventHandler<u32>,
) -> Element {
    let rows: Vec<Testimonial> = filter_rows(&page.items, &search, |t| {
        vec![
            t.name.as_str(),
            t.message.as_str(),
            t.designation.as_deref().unwrap_or_default(),
        ]
    })
    .into_iter()
    .filter(|t| matches_status(&visibility, published_key(t)))
    .cloned()
    .collect();

    if rows.is_empty() {
        return rsx! {
            EmptyState { message: "No testimonials yet" }
        };
    }

    rsx! {
        table {
            class: "table",
            thead {
                tr {
                    th { "Name" }
                    th { "Message" }
                    th { "Rating" }
                    th { "Status" }
                    th { "Added" }
                    th { class: "table-actions", "" }
                }
            }
            tbody {
                for testimonial in rows {
                    TestimonialRow { key: "{testimonial.id}", testimonial, on_edit, on_publish, on_delete }
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
fn TestimonialRow(
    testimonial: Testimonial,
    on_edit: EventHandler<Testimonial>,
    on_publish: EventHandler<Testimonial>,
    on_delete: EventHandler<Testimonial>,
) -> Element {
    let stars = testimonial.stars();
    let designation = testimonial.designation.clone().unwrap_or_default();
    let added = short_date(testimonial.created_at);
    let (status, tone, publish_label) = if testimonial.is_published {
        ("Published", Tone::Success, "Unpublish")
    } else {
        ("Draft", Tone::Neutral, "Publish")
    };
    let edit_target = testimonial.clone();
    let publish_target = testimonial.clone();
    let delete_target = testimonial.clone();

    rsx! {
        tr {
            td {
                div { class: "cell-title", "{testimonial.name}" }
                if !designation.is_empty() {
                    div { class: "cell-sub muted", "{designation}" }
                }
            }
            td { class: "cell-wide", "{testimonial.message}" }
            td { class: "stars", "{stars}" }
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
                    onclick: move |_| on_publish.call(publish_target.clone()),
                    "{publish_label}"
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

#[component]
fn TestimonialForm(
    initial: Option<Testimonial>,
    busy: bool,
    on_submit: EventHandler<TestimonialInput>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut draft = use_signal(move || Draft::new(initial.as_ref()));
    let mut errors = use_signal(BTreeMap::<&'static str, &'static str>::new);

    let error_for = move |field: &'static str| errors.read().get(field).map(|m| m.to_string());
    let name_error = error_for("name");
    let message_error = error_for("message");
    let rating_error = error_for("rating");
    let avatar_error = error_for("avatar_url");
    let current = draft();

    rsx! {
        form {
            class: "modal-body form-grid",
            novalidate: true,
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                match draft.read().to_input() {
                    Ok(input) => {
                        errors.set(BTreeMap::new());
                        on_submit.call(input);
                    }
                    Err(found) => errors.set(found),
                }
            },
            label {
                class: "form-field",
                span { class: "form-label", "Name *" }
                input {
                    class: "input",
                    value: "{current.name}",
                    oninput: move |evt: FormEvent| draft.write().name = evt.value(),
                }
                if let Some(message) = name_error {
                    span { class: "form-error", "{message}" }
                }
            }
            label {
                class: "form-field",
                span { class: "form-label", "Designation" }
                input {
                    class: "input",
                    placeholder: "Class of 2021, Software Engineer",
                    value: "{current.designation}",
                    oninput: move |evt: FormEvent| draft.write().designation = evt.value(),
                }
            }
            label {
                class: "form-field form-field--wide",
                span { class: "form-label", "Message *" }
                textarea {
                    class: "input",
                    rows: "4",
                    value: "{current.message}",
                    oninput: move |evt: FormEvent| draft.write().message = evt.value(),
                }
                if let Some(message) = message_error {
                    span { class: "form-error", "{message}" }
                }
            }
            label {
                class: "form-field",
                span { class: "form-label", "Rating" }
                input {
                    class: "input",
                    r#type: "number",
                    min: "1",
                    max: "5",
                    value: "{current.rating}",
                    oninput: move |evt: FormEvent| draft.write().rating = evt.value(),
                }
                if let Some(message) = rating_error {
                    span { class: "form-error", "{message}" }
                }
            }
            label {
                class: "form-field",
                span { class: "form-label", "Avatar URL" }
                input {
                    class: "input",
                    r#type: "url",
                    value: "{current.avatar_url}",
                    oninput: move |evt: FormEvent| draft.write().avatar_url = evt.value(),
                }
                if let Some(message) = avatar_error {
                    span { class: "form-error", "{message}" }
                }
            }
            label {
                class: "form-check",
                input {
                    r#type: "checkbox",
                    checked: current.is_published,
                    onchange: move |evt: FormEvent| draft.write().is_published = evt.checked(),
                }
                span { "Published" }
            }
            div {
                class: "form-actions form-field--wide",
                button {
                    class: "btn btn-outline",
                    r#type: "button",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: busy,
                    if busy { "Saving..." } else { "Save" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_draft_reports_required_fields() {
        let draft = Draft::new(None);
        let errors = draft.to_input().unwrap_err();
        assert_eq!(errors.get("name"), Some(&"Name is required"));
        assert_eq!(errors.get("message"), Some(&"Message is required"));
        assert!(!errors.contains_key("rating"));
    }

    #[test]
    fn test_rating_out_of_range() {
        let mut draft = Draft::new(None);
        draft.name = "Ada".into();
        draft.message = "Great campus".into();
        draft.rating = "7".into();
        assert!(draft.to_input().unwrap_err().contains_key("rating"));
    }

    #[test]
    fn test_valid_draft_trims_and_drops_blanks() {
        let mut draft = Draft::new(None);
        draft.name = "  Ada Lovelace ".into();
        draft.message = "Loved it".into();
        draft.rating = "4".into();
        draft.designation = "   ".into();
        draft.avatar_url = "https://cdn.campus.edu/ada.png".into();
        let input = draft.to_input().unwrap();
        assert_eq!(input.name, "Ada Lovelace");
        assert_eq!(input.rating, 4);
        assert_eq!(input.designation, None);
        assert_eq!(input.avatar_url.as_deref(), Some("https://cdn.campus.edu/ada.png"));
    }

    #[test]
    fn test_bad_avatar_url() {
        let mut draft = Draft::new(None);
        draft.name = "Ada".into();
        draft.message = "Hi".into();
        draft.avatar_url = "ftp://nope".into();
        assert_eq!(draft.to_input().unwrap_err().get("avatar_url"), Some(&"Enter a valid URL"));

        draft.avatar_url = "https://".into();
        assert!(draft.to_input().unwrap_err().contains_key("avatar_url"));
    }
}
