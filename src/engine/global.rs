//! Global Check Runner
//!
//! Cross-field checks over the normalized values, run after every field.

use crate::rules::GlobalCheck;
use crate::value::FieldMap;

/// Message recorded when a failing check does not supply one
pub const UNLABELLED_CHECK_MESSAGE: &str = "global check failed";

/// Run every check in order and collect the messages of the failing ones.
///
/// A failing check with a blank message is reported under a generic label
/// naming the check, so the failure is never lost.
pub fn run_global_checks(checks: &[GlobalCheck], values: &FieldMap) -> Vec<String> {
    let mut messages = Vec::new();

    for check in checks {
        let outcome = check.run(values);
        if outcome.ok {
            continue;
        }

        log::debug!("Global check '{}' failed", check.name());
        if outcome.message.trim().is_empty() {
            log::warn!("Global check '{}' failed without a message", check.name());
            messages.push(format!("{}: {}", UNLABELLED_CHECK_MESSAGE, check.name()));
        } else {
            messages.push(outcome.message);
        }
    }

    messages
}
