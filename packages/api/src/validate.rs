//! Shape checks shared by the login form, the email composer, and the college
//! and testimonial forms.

use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Url;

lazy_static! {
    static ref EMAIL: Regex =
        Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email pattern compiles");
    static ref PHONE: Regex = Regex::new(r"^\+?[\d\s().-]+$").expect("phone pattern compiles");
}

/// One `@`, a non-empty local part, and a dotted domain without empty labels.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value.trim())
}

/// Digits with the usual separators, 7 to 15 digits in total.
pub fn is_valid_phone(value: &str) -> bool {
    let value = value.trim();
    let digits = value.chars().filter(char::is_ascii_digit).count();
    (7..=15).contains(&digits) && PHONE.is_match(value)
}

/// An absolute `http`/`https` URL whose host has at least one dot.
pub fn is_http_url(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Ok(url) = Url::parse(value) else {
        return false;
    };
    matches!(url.scheme(), "http" | "https")
        && url
            .host_str()
            .is_some_and(|host| host.contains('.') && !host.ends_with('.'))
}
