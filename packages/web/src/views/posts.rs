//! Post moderation.

use api::models::{Post, PostStatus};
use api::{Page, Resource};
use dioxus::prelude::*;
use ui::components::{
    ConfirmDialog, EmptyState, ErrorAlert, FilterSelect, LoadingState, ModalOverlay, Pagination,
    SearchBar, StatusBadge, Tone,
};
use ui::table::filter_rows;
use ui::{use_api, use_mutation, use_query, MutateOptions, QueryState};

use super::list::{options, short_date, use_list_controls};

fn status_tone(status: PostStatus) -> Tone {
    match status {
        PostStatus::Published => Tone::Success,
        PostStatus::Flagged => Tone::Warning,
        PostStatus::Hidden | PostStatus::Unknown => Tone::Neutral,
        PostStatus::Removed => Tone::Danger,
    }
}

/// Moderation actions offered for a post, as `(target status, button label)`.
fn moderation_actions(current: PostStatus) -> Vec<(PostStatus, &'static str)> {
    [
        (PostStatus::Published, "Publish"),
        (PostStatus::Hidden, "Hide"),
        (PostStatus::Flagged, "Flag"),
    ]
    .into_iter()
    .filter(|(status, _)| *status != current)
    .collect()
}

#[component]
pub fn Posts() -> Element {
    let client = use_api();
    let controls = use_list_controls();
    let mut viewing = use_signal(|| Option::<Post>::None);
    let mut deleting = use_signal(|| Option::<Post>::None);

    let posts = use_query(
        move || controls.params().query_key(Resource::Posts),
        move |client| async move {
            let params = controls.snapshot();
            api::services::posts::list(&client, &params).await
        },
    );
    let moderate = use_mutation(&[Resource::Posts]);
    let remove = use_mutation(&[Resource::Posts]);

    let on_moderate = {
        let client = client.clone();
        move |(post, status): (Post, PostStatus)| {
            let client = client.clone();
            let message = format!("Post marked {}", status.label().to_lowercase());
            moderate.run(
                MutateOptions::success(message),
                async move { api::services::posts::set_status(&client, &post.id, status, None).await },
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
        let Some(post) = deleting() else {
            return;
        };
        let client = client.clone();
        remove.run(
            MutateOptions::success("Post deleted"),
            async move { api::services::posts::delete(&client, &post.id).await },
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
                    placeholder: "Search posts...",
                    on_change: move |v| controls.set_search(v),
                }
                FilterSelect {
                    label: "Status",
                    value: controls.status.read().clone(),
                    options: options(&PostStatus::FILTERABLE, PostStatus::as_str, PostStatus::label),
                    on_change: move |v| controls.set_status(v),
                }
            }

            if let QueryState::Ready(page) = posts.state() {
                PostTable {
                    page,
                    search: controls.search.read().clone(),
                    on_open: move |post| viewing.set(Some(post)),
                    on_page: move |p| controls.set_page(p),
                }
            } else if let QueryState::Failed(error) = posts.state() {
                ErrorAlert { error, on_retry: move |_| posts.refetch() }
            } else {
                LoadingState { label: "Loading posts..." }
            }
        }

        if let Some(post) = viewing() {
            PostDetails {
                post,
                busy: moderate.is_busy(),
                on_moderate: on_moderate.clone(),
                on_delete: move |post| deleting.set(Some(post)),
                on_close: move |_| viewing.set(None),
            }
        }

        if deleting.read().is_some() {
            ConfirmDialog {
                title: "Delete post",
                message: "The post and its comments will be removed permanently.",
                busy: remove.is_busy(),
                on_confirm: on_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}

#[component]
fn PostTable(
    page: Page<Post>,
    search: String,
    on_open: EventHandler<Post>,
    on_page: EventHandler<u32>,
) -> Element {
    let rows: Vec<Post> = filter_rows(&page.items, &search, |p| {
        vec![p.content.as_str(), p.author.display_name()]
    })
    .into_iter()
    .cloned()
    .collect();

    if rows.is_empty() {
        return rsx! {
            EmptyState { message: "No posts found" }
        };
    }

    rsx! {
        table {
            class: "table",
            thead {
                tr {
                    th { "Post" }
                    th { "Author" }
                    th { "Engagement" }
                    th { "Reports" }
                    th { "Status" }
                    th { "Posted" }
                }
            }
            tbody {
                for post in rows {
                    PostRow { key: "{post.id}", post, on_open }
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
fn PostRow(post: Post, on_open: EventHandler<Post>) -> Element {
    let excerpt = post.excerpt(80);
    let author = post.author.display_name().to_string();
    let engagement = format!("{} likes · {} comments", post.likes_count, post.comments_count);
    let status = post.status.label();
    let tone = status_tone(post.status);
    let posted = short_date(post.created_at);
    let reports_class = if post.reports_count > 0 { "text-danger" } else { "muted" };
    let target = post.clone();

    rsx! {
        tr {
            class: "table-row--clickable",
            onclick: move |_| on_open.call(target.clone()),
            td { class: "cell-wide", "{excerpt}" }
            td { "{author}" }
            td { class: "muted", "{engagement}" }
            td { class: "{reports_class}", "{post.reports_count}" }
            td { StatusBadge { label: "{status}", tone } }
            td { "{posted}" }
        }
    }
}

#[component]
fn PostDetails(
    post: Post,
    busy: bool,
    on_moderate: EventHandler<(Post, PostStatus)>,
    on_delete: EventHandler<Post>,
    on_close: EventHandler<()>,
) -> Element {
    let author = post.author.display_name().to_string();
    let posted = short_date(post.created_at);
    let status = post.status.label();
    let tone = status_tone(post.status);
    let actions = moderation_actions(post.status);
    let delete_target = post.clone();

    rsx! {
        ModalOverlay {
            title: "Post by {author}",
            wide: true,
            on_close: move |_| on_close.call(()),
            div {
                class: "modal-body",
                div {
                    class: "post-meta",
                    StatusBadge { label: "{status}", tone }
                    span { class: "muted", "{posted}" }
                    span { class: "muted", "{post.likes_count} likes" }
                    span { class: "muted", "{post.comments_count} comments" }
                    span { class: "muted", "{post.reports_count} reports" }
                }
                p { class: "post-content", "{post.content}" }
                if !post.images.is_empty() {
                    div {
                        class: "post-images",
                        for src in post.images.iter().cloned() {
                            img { key: "{src}", src: "{src}", alt: "Post image" }
                        }
                    }
                }
                div {
                    class: "form-actions",
                    for (target, label) in actions {
                        ModerationButton {
                            key: "{label}",
                            post: post.clone(),
                            target,
                            label,
                            busy,
                            on_moderate,
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

#[component]
fn ModerationButton(
    post: Post,
    target: PostStatus,
    label: &'static str,
    busy: bool,
    on_moderate: EventHandler<(Post, PostStatus)>,
) -> Element {
    rsx! {
        button {
            class: "btn btn-outline",
            disabled: busy,
            onclick: move |_| on_moderate.call((post.clone(), target)),
            "{label}"
        }
    }
}
