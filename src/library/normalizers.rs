//! Built-in normalizers.
//!
//! All of them operate on text. `Null` is treated as the empty string and any
//! other non-string value passes through untouched.

use regex::Regex;
use std::sync::LazyLock;

use crate::value::Value;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

fn map_text(value: &Value, f: impl FnOnce(&str) -> String) -> Value {
    match value {
        Value::Null => Value::String(f("")),
        Value::String(s) => Value::String(f(s)),
        other => other.clone(),
    }
}

pub fn trim(value: &Value) -> Value {
    map_text(value, |s| s.trim().to_string())
}

pub fn lowercase(value: &Value) -> Value {
    map_text(value, str::to_lowercase)
}

/// Collapse runs of whitespace to a single space and trim both ends.
pub fn collapse_whitespace(value: &Value) -> Value {
    map_text(value, |s| WHITESPACE_RUN.replace_all(s.trim(), " ").into_owned())
}

/// Keep only the ASCII digits.
pub fn digits_only(value: &Value) -> Value {
    map_text(value, |s| s.chars().filter(char::is_ascii_digit).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(
            collapse_whitespace(&json!("  Teclado   USB \t ")),
            json!("Teclado USB")
        );
        assert_eq!(collapse_whitespace(&Value::Null), json!(""));
    }

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only(&json!("612 345 678 f")), json!("612345678"));
        assert_eq!(digits_only(&json!("612-345-678")), json!("612345678"));
        assert_eq!(digits_only(&json!("abc")), json!(""));
    }

    #[test]
    fn test_trim_and_lowercase() {
        assert_eq!(lowercase(&trim(&json!("  Usuario@TEST.com "))), json!("usuario@test.com"));
    }

    #[test]
    fn test_non_text_passes_through() {
        assert_eq!(trim(&json!(42)), json!(42));
        assert_eq!(digits_only(&json!(true)), json!(true));
    }
}
