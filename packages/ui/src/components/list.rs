use dioxus::prelude::*;

use crate::table::{page_window, showing_range};

/// Debounce-free search box; every keystroke updates `value`.
#[component]
pub fn SearchBar(
    value: String,
    #[props(default = "Search...".to_string())] placeholder: String,
    on_change: EventHandler<String>,
) -> Element {
    rsx! {
        div {
            class: "search-bar",
            input {
                class: "input",
                r#type: "search",
                placeholder: "{placeholder}",
                value: "{value}",
                oninput: move |evt: FormEvent| on_change.call(evt.value()),
            }
        }
    }
}

/// `<select>` over `(value, label)` pairs, with an "All" entry mapped to "".
#[component]
pub fn FilterSelect(
    label: String,
    value: String,
    options: Vec<(String, String)>,
    on_change: EventHandler<String>,
) -> Element {
    rsx! {
        label {
            class: "filter-select",
            span { "{label}" }
            select {
                class: "input",
                value: "{value}",
                onchange: move |evt: FormEvent| on_change.call(evt.value()),
                option { value: "", "All" }
                for (v, l) in options {
                    option { key: "{v}", value: "{v}", selected: v == value, "{l}" }
                }
            }
        }
    }
}

/// Pager under a server-paginated table.
#[component]
pub fn Pagination(
    page: u32,
    total_pages: u32,
    limit: u32,
    total: u64,
    shown: usize,
    on_change: EventHandler<u32>,
) -> Element {
    let (from, to) = showing_range(page, limit, total, shown);
    let window = page_window(page as usize, total_pages as usize);

    rsx! {
        div {
            class: "pagination",
            span { class: "muted", "Showing {from}–{to} of {total}" }
            div {
                class: "pagination-pages",
                button {
                    class: "btn btn-ghost btn-sm",
                    disabled: page <= 1,
                    onclick: move |_| on_change.call(page.saturating_sub(1).max(1)),
                    "Previous"
                }
                for (i, entry) in window.into_iter().enumerate() {
                    if let Some(p) = entry {
                        button {
                            key: "{i}",
                            class: if p as u32 == page { "btn btn-sm btn-primary" } else { "btn btn-sm btn-ghost" },
                            onclick: move |_| on_change.call(p as u32),
                            "{p}"
                        }
                    } else {
                        span { key: "{i}", class: "pagination-gap", "…" }
                    }
                }
                button {
                    class: "btn btn-ghost btn-sm",
                    disabled: page >= total_pages,
                    onclick: move |_| on_change.call((page + 1).min(total_pages.max(1))),
                    "Next"
                }
            }
        }
    }
}
