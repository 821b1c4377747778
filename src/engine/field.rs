//! Field Processor
//!
//! Normalize one field, enforce required-ness, then run every validator.

use crate::rules::RuleSpec;
use crate::value::{self, Value};

use super::result::FieldResult;

/// Message recorded for a required field whose normalized value is empty
pub const REQUIRED_MESSAGE: &str = "field required";

/// Run the normalizer chain in declaration order
pub fn apply_normalizers(raw: Value, spec: &RuleSpec) -> Value {
    spec.normalizers().iter().fold(raw, |value, normalizer| {
        let next = normalizer.apply(&value);
        log::trace!("normalized {} -> {}", value, next);
        next
    })
}

/// Process a single declared field.
///
/// A missing input value is treated as the empty string. Validators are not
/// short-circuited: every failing one contributes its message, in order. A
/// required field that normalizes to empty gets exactly one message and its
/// validators are skipped.
pub fn process_field(name: &str, raw: Option<&Value>, spec: &RuleSpec) -> FieldResult {
    let raw = raw.cloned().unwrap_or_else(value::absent);
    let normalized = apply_normalizers(raw, spec);

    let errors = if spec.is_required() && value::is_empty(&normalized) {
        vec![REQUIRED_MESSAGE.to_string()]
    } else {
        spec.rules()
            .iter()
            .filter(|rule| !rule.validator.check(&normalized))
            .map(|rule| rule.message.clone())
            .collect()
    };

    log::debug!("Field '{}': {} error(s)", name, errors.len());

    FieldResult {
        name: name.to_string(),
        errors,
        value: normalized,
    }
}
