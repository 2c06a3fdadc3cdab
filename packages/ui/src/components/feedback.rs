use api::ApiError;
use dioxus::prelude::*;

/// Inline alert for a failed query, with a retry button bound to its refetch.
#[component]
pub fn ErrorAlert(error: ApiError, on_retry: EventHandler<()>) -> Element {
    let title = match &error {
        ApiError::Network { .. } => "Can't reach the server",
        ApiError::Unauthorized { .. } => "Session expired",
        ApiError::Http { status, .. } if *status >= 500 => "Server error",
        _ => "Request failed",
    };

    rsx! {
        div {
            class: "alert alert--error",
            role: "alert",
            div {
                strong { "{title}" }
                p { "{error}" }
            }
            button {
                class: "btn btn-outline btn-sm",
                onclick: move |_| on_retry.call(()),
                "Retry"
            }
        }
    }
}

#[component]
pub fn LoadingState(#[props(default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        div {
            class: "loading-state",
            div { class: "spinner" }
            span { "{label}" }
        }
    }
}

#[component]
pub fn EmptyState(message: String) -> Element {
    rsx! {
        div { class: "empty-state", "{message}" }
    }
}

/// Coloured pill for a status value.
#[component]
pub fn StatusBadge(label: String, #[props(default)] tone: Tone) -> Element {
    let class = format!("badge {}", tone.class());
    rsx! {
        span { class: "{class}", "{label}" }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Neutral,
    Success,
    Warning,
    Danger,
    Info,
}

impl Tone {
    pub fn class(&self) -> &'static str {
        match self {
            Tone::Neutral => "badge--neutral",
            Tone::Success => "badge--success",
            Tone::Warning => "badge--warning",
            Tone::Danger => "badge--danger",
            Tone::Info => "badge--info",
        }
    }
}
