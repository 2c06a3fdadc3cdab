//! Page, search, and filter state shared by the resource list views.

use api::ListParams;
use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq)]
pub(crate) struct ListControls {
    pub page: Signal<u32>,
    pub search: Signal<String>,
    pub status: Signal<String>,
    pub role: Signal<String>,
}

pub(crate) fn use_list_controls() -> ListControls {
    ListControls {
        page: use_signal(|| 1),
        search: use_signal(String::new),
        status: use_signal(String::new),
        role: use_signal(String::new),
    }
}

impl ListControls {
    /// Server parameters; subscribes the caller to every control.
    pub fn params(&self) -> ListParams {
        ListParams::default()
            .with_page(*self.page.read())
            .with_search(&self.search.read())
            .with_status(&self.status.read())
            .with_role(&self.role.read())
    }

    /// Same as [`params`](Self::params) without subscribing; for use inside fetches.
    pub fn snapshot(&self) -> ListParams {
        ListParams::default()
            .with_page(*self.page.peek())
            .with_search(&self.search.peek())
            .with_status(&self.status.peek())
            .with_role(&self.role.peek())
    }

    pub fn set_page(self, page: u32) {
        let mut signal = self.page;
        signal.set(page.max(1));
    }

    /// Filters reset to the first page.
    pub fn set_search(self, value: String) {
        let mut search = self.search;
        search.set(value);
        self.set_page(1);
    }

    pub fn set_status(self, value: String) {
        let mut status = self.status;
        status.set(value);
        self.set_page(1);
    }

    pub fn set_role(self, value: String) {
        let mut role = self.role;
        role.set(value);
        self.set_page(1);
    }
}

/// `(value, label)` pairs for a [`ui::components::FilterSelect`].
pub(crate) fn options<T: Copy>(
    values: &[T],
    value: impl Fn(&T) -> &'static str,
    label: impl Fn(&T) -> &'static str,
) -> Vec<(String, String)> {
    values
        .iter()
        .map(|v| (value(v).to_string(), label(v).to_string()))
        .collect()
}

pub(crate) fn short_date(at: Option<chrono::DateTime<chrono::Utc>>) -> String {
    at.map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}
