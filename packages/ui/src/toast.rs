//! Toast notifications: a bounded queue in context, rendered bottom-right, each
//! entry dismissing itself after a few seconds. The dismissal timer belongs to
//! the provider, so a toast raised by a page that unmounts right away (a save
//! that navigates back to the list) still goes away.

use std::time::Duration;

use chrono::{DateTime, Utc};
use dioxus::core::{current_scope_id, Runtime};
use dioxus::prelude::*;

use crate::timer::sleep;

/// How long a toast stays up.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(4);
/// Older toasts are dropped beyond this many.
pub const MAX_TOASTS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    fn class(&self) -> &'static str {
        match self {
            ToastLevel::Info => "toast toast--info",
            ToastLevel::Success => "toast toast--success",
            ToastLevel::Warning => "toast toast--warning",
            ToastLevel::Error => "toast toast--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastQueue {
    entries: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    pub fn entries(&self) -> &[Toast] {
        &self.entries
    }

    /// Append a toast, dropping the oldest beyond [`MAX_TOASTS`]. Returns its id.
    pub fn push(&mut self, level: ToastLevel, message: &str) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.push(Toast {
            id,
            level,
            message: message.to_string(),
            created_at: Utc::now(),
        });
        if self.entries.len() > MAX_TOASTS {
            let excess = self.entries.len() - MAX_TOASTS;
            self.entries.drain(..excess);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|t| t.id != id);
    }
}

/// Context handle for raising toasts.
#[derive(Clone, Copy, PartialEq)]
pub struct Toasts {
    queue: Signal<ToastQueue>,
    /// Scope of the [`ToastProvider`].
    scope: ScopeId,
}

impl Toasts {
    pub fn show(self, level: ToastLevel, message: impl Into<String>) {
        let mut queue = self.queue;
        let message = message.into();
        match level {
            ToastLevel::Error => tracing::error!("{message}"),
            ToastLevel::Warning => tracing::warn!("{message}"),
            _ => tracing::info!("{message}"),
        }
        let id = queue.write().push(level, &message);
        Runtime::current().spawn(self.scope, async move {
            sleep(TOAST_LIFETIME).await;
            queue.write().dismiss(id);
        });
    }

    pub fn success(self, message: impl Into<String>) {
        self.show(ToastLevel::Success, message);
    }

    pub fn error(self, message: impl Into<String>) {
        self.show(ToastLevel::Error, message);
    }

    pub fn info(self, message: impl Into<String>) {
        self.show(ToastLevel::Info, message);
    }

    pub fn dismiss(self, id: u64) {
        let mut queue = self.queue;
        queue.write().dismiss(id);
    }

    /// Toasts currently shown. Subscribes the caller.
    pub fn entries(&self) -> Vec<Toast> {
        self.queue.read().entries().to_vec()
    }
}

pub fn use_toasts() -> Toasts {
    use_context::<Toasts>()
}

/// Provides [`Toasts`] and renders the toast stack above `children`.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    let toasts = use_context_provider(|| Toasts {
        queue: Signal::new(ToastQueue::default()),
        scope: current_scope_id(),
    });
    let entries = toasts.entries();

    rsx! {
        {children}
        div {
            class: "toast-stack",
            role: "status",
            for toast in entries {
                div {
                    key: "{toast.id}",
                    class: toast.level.class(),
                    span { class: "toast-message", "{toast.message}" }
                    button {
                        class: "toast-close",
                        title: "Dismiss",
                        onclick: move |_| toasts.dismiss(toast.id),
                        "×"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use dioxus::core::NoOpMutations;

    use super::*;

    #[derive(Default)]
    struct Handles {
        toasts: Option<Toasts>,
        page_shown: Option<Signal<bool>>,
    }

    type Shared = Rc<RefCell<Handles>>;

    #[component]
    fn App() -> Element {
        rsx! {
            ToastProvider {
                Shell {}
            }
        }
    }

    #[component]
    fn Shell() -> Element {
        let shared = use_context::<Shared>();
        let page_shown = use_signal(|| true);
        {
            let mut handles = shared.borrow_mut();
            handles.toasts = Some(use_toasts());
            handles.page_shown = Some(page_shown);
        }
        rsx! {
            if page_shown() {
                SavingPage {}
            }
        }
    }

    /// Raises a toast as soon as it mounts, like a save that just finished.
    #[component]
    fn SavingPage() -> Element {
        let toasts = use_toasts();
        use_effect(move || toasts.success("College saved"));
        rsx! {}
    }

    async fn run_for(dom: &mut VirtualDom, duration: Duration) {
        let _ = tokio::time::timeout(duration, async move {
            loop {
                dom.wait_for_work().await;
                dom.render_immediate(&mut NoOpMutations);
            }
        })
        .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_outlives_the_page_that_raised_it() {
        let shared = Shared::default();
        let mut dom = VirtualDom::new(App).with_root_context(shared.clone());
        dom.rebuild_in_place();
        run_for(&mut dom, Duration::from_millis(10)).await;

        let toasts = shared.borrow().toasts.expect("provider mounted");
        let shown = |dom: &VirtualDom| dom.in_runtime(|| toasts.queue.peek().entries().len());
        assert_eq!(shown(&dom), 1);

        let mut page_shown = shared.borrow().page_shown.expect("shell mounted");
        dom.in_runtime(|| page_shown.set(false));
        run_for(&mut dom, Duration::from_secs(1)).await;
        assert_eq!(shown(&dom), 1);

        run_for(&mut dom, TOAST_LIFETIME).await;
        assert_eq!(shown(&dom), 0);
    }

    #[test]
    fn test_push_assigns_increasing_ids() {
        let mut queue = ToastQueue::default();
        let a = queue.push(ToastLevel::Info, "one");
        let b = queue.push(ToastLevel::Error, "two");
        assert!(b > a);
        assert_eq!(queue.entries().len(), 2);
        assert_eq!(queue.entries()[1].level, ToastLevel::Error);
    }

    #[test]
    fn test_queue_is_bounded() {
        let mut queue = ToastQueue::default();
        for i in 0..8 {
            queue.push(ToastLevel::Info, &format!("toast {i}"));
        }
        assert_eq!(queue.entries().len(), MAX_TOASTS);
        assert_eq!(queue.entries()[0].message, "toast 3");
    }

    #[test]
    fn test_dismiss_removes_only_that_toast() {
        let mut queue = ToastQueue::default();
        let a = queue.push(ToastLevel::Success, "saved");
        queue.push(ToastLevel::Success, "deleted");
        queue.dismiss(a);
        assert_eq!(queue.entries().len(), 1);
        assert_eq!(queue.entries()[0].message, "deleted");
        queue.dismiss(999);
        assert_eq!(queue.entries().len(), 1);
    }
}
