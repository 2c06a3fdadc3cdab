//! Live clock with a time-of-day greeting, refreshed every second while mounted.

use std::time::Duration;

use dioxus::prelude::*;

use crate::timer::sleep;

/// Local wall-clock time as (hour, minute, second).
#[cfg(target_arch = "wasm32")]
fn local_hms() -> (u32, u32, u32) {
    let date = js_sys::Date::new_0();
    (date.get_hours(), date.get_minutes(), date.get_seconds())
}

#[cfg(not(target_arch = "wasm32"))]
fn local_hms() -> (u32, u32, u32) {
    use chrono::Timelike;
    let now = chrono::Utc::now();
    (now.hour(), now.minute(), now.second())
}

pub fn greeting(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        17..=21 => "Good evening",
        _ => "Working late",
    }
}

pub fn format_hms((h, m, s): (u32, u32, u32)) -> String {
    format!("{h:02}:{m:02}:{s:02}")
}

#[component]
pub fn ClockWidget(#[props(default)] name: Option<String>) -> Element {
    let mut now = use_signal(local_hms);

    let ticker = use_hook(|| {
        spawn(async move {
            loop {
                sleep(Duration::from_secs(1)).await;
                now.set(local_hms());
            }
        })
    });
    use_drop(move || ticker.cancel());

    let (hour, _, _) = now();
    let text = format_hms(now());
    let salutation = match name {
        Some(name) => format!("{}, {name}", greeting(hour)),
        None => greeting(hour).to_string(),
    };

    rsx! {
        div {
            class: "card clock-widget",
            p { class: "clock-greeting", "{salutation}" }
            p { class: "clock-time", "{text}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_by_hour() {
        assert_eq!(greeting(7), "Good morning");
        assert_eq!(greeting(12), "Good afternoon");
        assert_eq!(greeting(20), "Good evening");
        assert_eq!(greeting(2), "Working late");
    }

    #[test]
    fn test_format_pads() {
        assert_eq!(format_hms((9, 5, 0)), "09:05:00");
    }
}
