//! # Multi-tab college form
//!
//! Four tabs (`basic → contact → academic → social`) over one set of values. The
//! first two auto-advance once complete and left alone; see [`auto_advance`] for
//! the state machine. [`use_auto_advance`] wires the machine to real timers owned
//! by the calling component, cancels them on every interaction, and tears them
//! down with the component.
//!
//! Submitting validates every field regardless of the visible tab and jumps to the
//! first tab holding an error.

use std::collections::BTreeSet;

use api::models::{College, CollegeInput};
use dioxus::core::{current_scope_id, Runtime, Task};
use dioxus::prelude::*;

pub mod auto_advance;
pub mod values;

pub use auto_advance::{AutoAdvance, Phase, TimerRequest, Transition};
pub use values::{server_field_errors, CollegeFormValues, FieldErrors, FormField, TabCompletion};

use crate::timer::{now, sleep};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormTab {
    Basic,
    Contact,
    Academic,
    Social,
}

impl FormTab {
    pub const ALL: [FormTab; 4] = [
        FormTab::Basic,
        FormTab::Contact,
        FormTab::Academic,
        FormTab::Social,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormTab::Basic => "Basic Info",
            FormTab::Contact => "Contact",
            FormTab::Academic => "Academic",
            FormTab::Social => "Social",
        }
    }

    pub fn next(&self) -> Option<FormTab> {
        match self {
            FormTab::Basic => Some(FormTab::Contact),
            FormTab::Contact => Some(FormTab::Academic),
            FormTab::Academic => Some(FormTab::Social),
            FormTab::Social => None,
        }
    }

    /// Only the first two tabs move on by themselves.
    pub fn auto_advances(&self) -> bool {
        matches!(self, FormTab::Basic | FormTab::Contact)
    }
}

/// Connects the machine to timer tasks spawned in the owning component's scope.
#[derive(Clone, Copy)]
pub struct AutoAdvanceDriver {
    machine: Signal<AutoAdvance>,
    timer: Signal<Option<Task>>,
    values: Signal<CollegeFormValues>,
    active_tab: Signal<FormTab>,
    scope: ScopeId,
}

impl AutoAdvanceDriver {
    /// Seconds left on the visible countdown. Subscribes the caller.
    pub fn remaining(&self) -> Option<u32> {
        self.machine.read().remaining()
    }

    pub fn phase(&self) -> Phase {
        self.machine.read().phase()
    }

    /// Focus, change, key press, explicit tab click, or dismissing the countdown.
    pub fn interact(self) {
        let mut machine = self.machine;
        let transition = machine.write().interact(now());
        self.apply(transition);
    }

    fn apply(mut self, transition: Transition) {
        match transition {
            Transition::Unchanged => {}
            Transition::Cancel => self.cancel_timer(),
            Transition::Advance(tab) => {
                self.cancel_timer();
                tracing::debug!("Auto-advancing to {:?}", tab);
                self.active_tab.set(tab);
            }
            Transition::Schedule(request) => {
                self.cancel_timer();
                let task = Runtime::current().spawn(self.scope, async move {
                    sleep(request.delay()).await;
                    self.fire(request);
                });
                self.timer.set(Some(task));
            }
        }
    }

    fn fire(mut self, request: TimerRequest) {
        // This task is finishing; forget it rather than cancel it.
        self.timer.set(None);

        let tab = *self.active_tab.peek();
        let complete = self.values.peek().completion().is_complete(tab);
        let transition = {
            let mut machine = self.machine.write();
            match request {
                TimerRequest::Quiet { generation, .. } => {
                    machine.quiet_elapsed(generation, tab, complete, now())
                }
                TimerRequest::Tick { generation } => machine.tick(generation, tab, complete),
                TimerRequest::Finish { generation } => machine.finish(generation, tab, complete),
            }
        };
        self.apply(transition);
    }

    fn cancel_timer(mut self) {
        if let Some(task) = self.timer.write().take() {
            task.cancel();
        }
    }
}

/// Runs the auto-advance machine for `values` shown on `active_tab`.
pub fn use_auto_advance(
    values: Signal<CollegeFormValues>,
    active_tab: Signal<FormTab>,
) -> AutoAdvanceDriver {
    let machine = use_signal(|| AutoAdvance::new(now()));
    let timer = use_signal(|| Option::<Task>::None);
    let scope = use_hook(current_scope_id);

    let driver = AutoAdvanceDriver {
        machine,
        timer,
        values,
        active_tab,
        scope,
    };

    // Subscribes to the values, not a completion memo: an edit that keeps the
    // tab complete still has to re-arm the quiet timer.
    use_effect(move || {
        let tab = active_tab();
        let complete = values.read().completion().is_complete(tab);
        let mut machine = driver.machine;
        let transition = machine.write().evaluate(tab, complete);
        driver.apply(transition);
    });

    use_drop(move || {
        let mut machine = driver.machine;
        if let Ok(mut machine) = machine.try_write() {
            machine.teardown();
        }
        let mut timer = driver.timer;
        if let Ok(mut timer) = timer.try_write() {
            if let Some(task) = timer.take() {
                task.cancel();
            }
        };
    });

    driver
}

#[component]
pub fn CollegeForm(
    /// Record being edited; `None` creates a new college.
    initial: Option<College>,
    #[props(default)] busy: bool,
    /// Field errors returned by the API for the last submit.
    #[props(default)]
    server_errors: FieldErrors,
    on_submit: EventHandler<CollegeInput>,
    on_cancel: EventHandler<()>,
) -> Element {
    let editing = initial.is_some();
    let values = use_signal(move || {
        initial
            .as_ref()
            .map(CollegeFormValues::from_college)
            .unwrap_or_else(CollegeFormValues::new)
    });
    let mut active_tab = use_signal(|| FormTab::Basic);
    let mut touched = use_signal(BTreeSet::<FormField>::new);
    let mut submitted = use_signal(|| false);
    let driver = use_auto_advance(values, active_tab);

    let completion = use_memo(move || values.read().completion());
    let errors = use_memo(move || values.read().errors());

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        driver.interact();
        submitted.set(true);
        let current = values.read().clone();
        match current.to_input() {
            Ok(input) => on_submit.call(input),
            Err(e) => {
                tracing::debug!("College form invalid: {e}");
                if let Some(tab) = CollegeFormValues::first_invalid_tab(&current.errors()) {
                    active_tab.set(tab);
                }
            }
        }
    };

    let visible_error = move |field: FormField| -> Option<String> {
        if submitted() || touched.read().contains(&field) {
            if let Some(e) = errors.read().get(&field) {
                return Some(e.clone());
            }
        }
        server_errors.get(&field).cloned()
    };

    let tab = active_tab();
    let remaining = driver.remaining();
    let next_label = tab.next().map(|t| t.label()).unwrap_or_default();
    let tabs: Vec<(FormTab, &'static str, bool)> = FormTab::ALL
        .into_iter()
        .map(|t| (t, t.label(), t.auto_advances() && completion.read().is_complete(t)))
        .collect();
    let fields: Vec<(FormField, &'static str, Option<String>)> = FormField::on_tab(tab)
        .map(|f| (f, f.key(), visible_error(f)))
        .collect();

    rsx! {
        form {
            class: "college-form",
            novalidate: true,
            onsubmit: handle_submit,
            onfocusin: move |_| driver.interact(),
            onkeydown: move |_| driver.interact(),

            nav {
                class: "form-tabs",
                role: "tablist",
                for (t, label, done) in tabs {
                    button {
                        key: "{label}",
                        r#type: "button",
                        role: "tab",
                        class: if t == tab { "form-tab form-tab--active" } else { "form-tab" },
                        aria_selected: t == tab,
                        onclick: move |_| {
                            driver.interact();
                            active_tab.set(t);
                        },
                        span { "{label}" }
                        if done {
                            span { class: "form-tab-check", "✓" }
                        }
                    }
                }
            }

            if let Some(seconds) = remaining {
                div {
                    class: "auto-advance-notice",
                    role: "status",
                    if seconds > 0 {
                        span { "Moving to {next_label} in {seconds}s" }
                    } else {
                        span { "Moving to {next_label} now" }
                    }
                    button {
                        r#type: "button",
                        class: "btn btn-ghost btn-sm",
                        onclick: move |_| driver.interact(),
                        "Stay here"
                    }
                }
            }

            div {
                class: "form-tab-panel",
                for (field, key, error) in fields {
                    FieldInput {
                        key: "{key}",
                        field,
                        values,
                        error,
                        on_touch: move |f: FormField| {
                            touched.write().insert(f);
                        },
                        on_change: move |_| driver.interact(),
                    }
                }
                if tab == FormTab::Basic {
                    label {
                        class: "form-check",
                        input {
                            r#type: "checkbox",
                            checked: values.read().is_active,
                            onchange: move |evt: FormEvent| {
                                let mut values = values;
                                values.write().is_active = evt.checked();
                            },
                        }
                        span { "Active" }
                    }
                }
            }

            div {
                class: "form-actions",
                button {
                    r#type: "button",
                    class: "btn btn-outline",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                button {
                    r#type: "submit",
                    class: "btn btn-primary",
                    disabled: busy,
                    if busy {
                        "Saving..."
                    } else if editing {
                        "Save changes"
                    } else {
                        "Create college"
                    }
                }
            }
        }
    }
}

#[component]
fn FieldInput(
    field: FormField,
    values: Signal<CollegeFormValues>,
    error: Option<String>,
    on_touch: EventHandler<FormField>,
    on_change: EventHandler<()>,
) -> Element {
    let id = format!("college-{}", field.key());
    let label = field.label();
    let value = values.read().get(field).to_string();
    let input_class = if error.is_some() {
        "input input--invalid"
    } else {
        "input"
    };
    let mut values = values;
    let oninput = move |evt: FormEvent| {
        on_change.call(());
        values.write().set(field, evt.value());
    };

    rsx! {
        div {
            class: "form-field",
            label {
                r#for: "{id}",
                "{label}"
                if field.is_required() {
                    span { class: "form-required", " *" }
                }
            }
            if field.is_multiline() {
                textarea {
                    id: "{id}",
                    class: "{input_class}",
                    rows: "3",
                    value: "{value}",
                    oninput: oninput,
                    onblur: move |_| on_touch.call(field),
                }
            } else {
                input {
                    id: "{id}",
                    class: "{input_class}",
                    r#type: "text",
                    value: "{value}",
                    oninput: oninput,
                    onblur: move |_| on_touch.call(field),
                }
            }
            if let Some(message) = error {
                p { class: "form-error", "{message}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use dioxus::core::NoOpMutations;

    use super::*;

    /// Handles the mounted components publish for the test body.
    #[derive(Default)]
    struct Handles {
        values: Option<Signal<CollegeFormValues>>,
        active_tab: Option<Signal<FormTab>>,
        mounted: Option<Signal<bool>>,
        driver: Option<AutoAdvanceDriver>,
        shown: Vec<Option<u32>>,
    }

    type Shared = Rc<RefCell<Handles>>;

    #[component]
    fn Page() -> Element {
        let shared = use_context::<Shared>();
        let values = use_signal(CollegeFormValues::new);
        let active_tab = use_signal(|| FormTab::Basic);
        let mounted = use_signal(|| true);
        {
            let mut handles = shared.borrow_mut();
            handles.values = Some(values);
            handles.active_tab = Some(active_tab);
            handles.mounted = Some(mounted);
        }
        rsx! {
            if mounted() {
                Countdown { values, active_tab }
            }
        }
    }

    #[component]
    fn Countdown(values: Signal<CollegeFormValues>, active_tab: Signal<FormTab>) -> Element {
        let shared = use_context::<Shared>();
        let driver = use_auto_advance(values, active_tab);
        let remaining = driver.remaining();
        {
            let mut handles = shared.borrow_mut();
            handles.driver = Some(driver);
            if handles.shown.last() != Some(&remaining) {
                handles.shown.push(remaining);
            }
        }
        rsx! {
            if let Some(seconds) = remaining {
                span { "{seconds}" }
            }
        }
    }

    async fn mount() -> (VirtualDom, Shared) {
        let shared = Shared::default();
        let mut dom = VirtualDom::new(Page).with_root_context(shared.clone());
        dom.rebuild_in_place();
        run_for(&mut dom, Duration::from_millis(10)).await;
        (dom, shared)
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

    fn driver(shared: &Shared) -> AutoAdvanceDriver {
        shared.borrow().driver.expect("form mounted")
    }

    /// What an input's `oninput` does.
    fn type_into(dom: &VirtualDom, shared: &Shared, field: FormField, text: &str) {
        let driver = driver(shared);
        let mut values = shared.borrow().values.expect("page mounted");
        dom.in_runtime(|| {
            driver.interact();
            values.write().set(field, text.to_string());
        });
    }

    fn tab(dom: &VirtualDom, shared: &Shared) -> FormTab {
        let active_tab = shared.borrow().active_tab.expect("page mounted");
        dom.in_runtime(|| *active_tab.peek())
    }

    fn countdown(dom: &VirtualDom, shared: &Shared) -> Option<u32> {
        let driver = driver(shared);
        dom.in_runtime(|| driver.machine.peek().remaining())
    }

    /// Fills the basic tab and leaves the form alone until the countdown shows 5.
    async fn start_countdown(dom: &mut VirtualDom, shared: &Shared) {
        type_into(dom, shared, FormField::Name, "MIT");
        run_for(dom, Duration::from_secs(1)).await;
        type_into(dom, shared, FormField::Description, "desc");
        run_for(dom, Duration::from_millis(3500)).await;
        assert_eq!(countdown(dom, shared), Some(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_then_idling_counts_down_to_zero_and_advances() {
        let (mut dom, shared) = mount().await;

        type_into(&dom, &shared, FormField::Name, "MIT");
        run_for(&mut dom, Duration::from_secs(1)).await;
        type_into(&dom, &shared, FormField::Description, "desc");

        run_for(&mut dom, Duration::from_millis(2500)).await;
        assert_eq!(countdown(&dom, &shared), None);
        assert_eq!(tab(&dom, &shared), FormTab::Basic);

        run_for(&mut dom, Duration::from_secs(1)).await;
        assert_eq!(countdown(&dom, &shared), Some(5));

        run_for(&mut dom, Duration::from_secs(6)).await;
        assert_eq!(tab(&dom, &shared), FormTab::Contact);
        assert_eq!(countdown(&dom, &shared), None);

        let shown: Vec<u32> = shared.borrow().shown.iter().flatten().copied().collect();
        assert_eq!(shown, vec![5, 4, 3, 2, 1, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_keeping_tab_complete_restarts_quiet_period() {
        let (mut dom, shared) = mount().await;
        start_countdown(&mut dom, &shared).await;

        type_into(&dom, &shared, FormField::Description, "desc, longer");
        run_for(&mut dom, Duration::from_millis(100)).await;
        assert_eq!(countdown(&dom, &shared), None);

        run_for(&mut dom, Duration::from_millis(2800)).await;
        assert_eq!(countdown(&dom, &shared), None);

        run_for(&mut dom, Duration::from_millis(200)).await;
        assert_eq!(countdown(&dom, &shared), Some(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismissing_countdown_keeps_tab() {
        let (mut dom, shared) = mount().await;
        start_countdown(&mut dom, &shared).await;

        let driver = driver(&shared);
        dom.in_runtime(|| driver.interact());
        run_for(&mut dom, Duration::from_millis(10)).await;
        assert_eq!(countdown(&dom, &shared), None);

        run_for(&mut dom, Duration::from_secs(15)).await;
        assert_eq!(countdown(&dom, &shared), None);
        assert_eq!(tab(&dom, &shared), FormTab::Basic);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmounting_mid_countdown_fires_nothing() {
        let (mut dom, shared) = mount().await;
        start_countdown(&mut dom, &shared).await;

        let mut mounted = shared.borrow().mounted.expect("page mounted");
        dom.in_runtime(|| mounted.set(false));
        run_for(&mut dom, Duration::from_secs(15)).await;

        assert_eq!(tab(&dom, &shared), FormTab::Basic);
        let shown = shared.borrow().shown.clone();
        assert_eq!(shown.last(), Some(&Some(5)));
    }
}
