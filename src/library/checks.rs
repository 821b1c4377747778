//! Built-in cross-field checks.

use crate::rules::{CheckOutcome, GlobalCheck};
use crate::value::{self, FieldMap};

use super::validators;

/// Domain that marks an email address as corporate
pub const CORPORATE_DOMAIN: &str = "@empresa.com";

/// A corporate email address needs a phone number to go with it.
pub fn corporate_email_requires_phone() -> GlobalCheck {
    GlobalCheck::new("corporate_email_requires_phone", |values: &FieldMap| {
        let corporate = values
            .get("email")
            .and_then(|v| v.as_str())
            .is_some_and(|email| email.ends_with(CORPORATE_DOMAIN));
        let has_phone = values.get("telefono").is_some_and(|v| !value::is_empty(v));

        if corporate && !has_phone {
            CheckOutcome::fail("Corporate email requires a phone number")
        } else {
            CheckOutcome::pass()
        }
    })
}

/// The password must meet the strict rule (uppercase, digit and symbol).
pub fn strict_password() -> GlobalCheck {
    GlobalCheck::new("strict_password", |values: &FieldMap| {
        let strict = values
            .get("password")
            .is_some_and(validators::password_strict);
        if strict {
            CheckOutcome::pass()
        } else {
            CheckOutcome::fail("Password must be strict (uppercase, digit and symbol)")
        }
    })
}
