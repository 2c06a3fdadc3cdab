//! Top-level error boundary with a recoverable fallback page.

use dioxus::prelude::*;

/// Catches render errors below it and shows [`ErrorFallback`].
#[component]
pub fn AppErrorBoundary(children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: move |errors: ErrorContext| {
                let detail = format!("{errors:?}");
                tracing::error!("Render error: {detail}");
                rsx! {
                    ErrorFallback {
                        detail,
                        on_retry: move |_| errors.clear_errors(),
                    }
                }
            },
            {children}
        }
    }
}

/// Full-page "something went wrong" with retry, home, and a collapsible
/// technical detail block.
#[component]
pub fn ErrorFallback(detail: String, on_retry: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "error-page",
            h1 { "Something went wrong" }
            p {
                class: "muted",
                "The page hit an unexpected error. You can try again or go back to the dashboard."
            }
            div {
                class: "error-page-actions",
                button {
                    class: "btn btn-primary",
                    onclick: move |_| on_retry.call(()),
                    "Try again"
                }
                button {
                    class: "btn btn-outline",
                    onclick: move |_| go_home(),
                    "Go home"
                }
            }
            details {
                class: "error-detail",
                summary { "Technical details" }
                pre { "{detail}" }
            }
        }
    }
}

fn go_home() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/");
        }
    }
}
