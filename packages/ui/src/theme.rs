//! Colour scheme: `None` follows the OS, otherwise `"light"` or `"dark"`. The choice
//! is applied as `data-theme` on `<html>` and remembered in local storage.

use dioxus::prelude::*;

use crate::icons::{FaCircleHalfStroke, FaMoon, FaSun};
use crate::Icon;

/// Theme context: None = system, Some("dark"), Some("light").
pub type ThemeSignal = Signal<Option<String>>;

#[cfg(target_arch = "wasm32")]
const THEME_STORAGE_KEY: &str = "campus_admin_theme";

/// Accept only the themes the stylesheet knows.
pub fn parse_theme(value: Option<&str>) -> Option<String> {
    match value.map(str::trim) {
        Some("light") => Some("light".to_string()),
        Some("dark") => Some("dark".to_string()),
        _ => None,
    }
}

/// Theme after `current` in the toggle cycle system → light → dark → system.
pub fn next_theme(current: Option<&str>) -> Option<String> {
    match parse_theme(current).as_deref() {
        None => Some("light".to_string()),
        Some("light") => Some("dark".to_string()),
        _ => None,
    }
}

pub fn apply_theme(theme: Option<&str>) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(root) = window.document().and_then(|d| d.document_element()) {
            let _ = match theme {
                Some(t) => root.set_attribute("data-theme", t),
                None => root.remove_attribute("data-theme"),
            };
        }
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = match theme {
                Some(t) => storage.set_item(THEME_STORAGE_KEY, t),
                None => storage.remove_item(THEME_STORAGE_KEY),
            };
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = theme;
}

pub fn load_theme_from_storage(theme: &mut ThemeSignal) {
    #[cfg(target_arch = "wasm32")]
    {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item(THEME_STORAGE_KEY).ok().flatten());
        let parsed = parse_theme(stored.as_deref());
        apply_theme(parsed.as_deref());
        theme.set(parsed);
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = theme;
}

/// Header button cycling through the three themes.
#[component]
pub fn ThemeToggle() -> Element {
    let mut theme = use_context::<ThemeSignal>();
    let current = theme();

    let (title, icon) = match current.as_deref() {
        Some("light") => (
            "Theme: light",
            rsx! { Icon { icon: FaSun, width: 14, height: 14 } },
        ),
        Some("dark") => (
            "Theme: dark",
            rsx! { Icon { icon: FaMoon, width: 14, height: 14 } },
        ),
        _ => (
            "Theme: system",
            rsx! { Icon { icon: FaCircleHalfStroke, width: 14, height: 14 } },
        ),
    };

    rsx! {
        button {
            class: "icon-button",
            title: title,
            onclick: move |_| {
                let next = next_theme(theme().as_deref());
                apply_theme(next.as_deref());
                theme.set(next);
            },
            {icon}
        }
    }
}
