//! Built-in validators.
//!
//! Every validator reads the value as text; non-string values fail.

use regex::Regex;
use std::sync::LazyLock;

use crate::value::{self, Value};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+@[\w.-]+\.[A-Za-z]{2,24}$").unwrap());

/// Symbols accepted by the strict password rule
pub const STRICT_SYMBOLS: &str = "@#$%^&+=!";

/// Symbols counted as a character class by [`password_extra`]
pub const EXTRA_SYMBOLS: &str = r#"~`!@#$%^&*()_-+={[}]|\:;"'<,>.?/§±"#;

pub fn email(value: &Value) -> bool {
    value.as_str().is_some_and(|s| EMAIL.is_match(s))
}

/// Spanish phone number: exactly nine digits.
pub fn phone_es(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| s.len() == 9 && s.chars().all(|c| c.is_ascii_digit()))
}

/// At least eight characters with an uppercase letter and a digit.
pub fn password(value: &Value) -> bool {
    value.as_str().is_some_and(|s| {
        s.chars().count() >= 8
            && s.chars().any(|c| c.is_ascii_uppercase())
            && s.chars().any(|c| c.is_ascii_digit())
    })
}

pub fn password_strict(value: &Value) -> bool {
    password(value)
        && value
            .as_str()
            .is_some_and(|s| s.chars().any(|c| STRICT_SYMBOLS.contains(c)))
}

/// Length of at least `min_len` and at least `min_classes` of the four
/// classes: uppercase, lowercase, digit, symbol.
pub fn password_extra(value: &Value, min_len: usize, min_classes: usize) -> bool {
    let Some(s) = value.as_str() else {
        return false;
    };
    if s.chars().count() < min_len {
        return false;
    }

    let classes = [
        s.chars().any(|c| c.is_ascii_uppercase()),
        s.chars().any(|c| c.is_ascii_lowercase()),
        s.chars().any(|c| c.is_ascii_digit()),
        s.chars().any(|c| EXTRA_SYMBOLS.contains(c)),
    ];
    classes.iter().filter(|present| **present).count() >= min_classes
}

/// Spanish postal code: five digits whose first two name a province (01-52).
pub fn postal_code_es(value: &Value) -> bool {
    let Some(s) = value.as_str().map(str::trim) else {
        return false;
    };
    if s.len() != 5 || !s.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    s[..2]
        .parse::<u8>()
        .is_ok_and(|province| (1..=52).contains(&province))
}

pub fn not_empty(value: &Value) -> bool {
    !value::is_empty(value)
}

/// Build a validator from a custom regular expression.
pub fn pattern(regex: Regex) -> impl Fn(&Value) -> bool + Send + Sync + 'static {
    move |value: &Value| value.as_str().is_some_and(|s| regex.is_match(s))
}
