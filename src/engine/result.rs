//! Result Aggregation
//!
//! Per-field outcomes and global messages merged into one report.
//!
//! Errors are sparse: a field that passed has no key at all, so `ok` is just
//! "the error map is empty". Never insert an empty message list.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::value::{FieldMap, Value};

/// Reserved error key for global check messages
pub const GLOBAL_KEY: &str = "_global";

/// Outcome of processing one field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldResult {
    pub name: String,
    pub errors: Vec<String>,
    pub value: Value,
}

impl FieldResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The report returned for one invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormResult {
    pub ok: bool,
    pub errors: BTreeMap<String, Vec<String>>,
    pub values: FieldMap,
}

impl FormResult {
    /// Errors recorded for a field, if it failed
    pub fn field_errors(&self, name: &str) -> Option<&[String]> {
        self.errors.get(name).map(Vec::as_slice)
    }

    pub fn global_errors(&self) -> Option<&[String]> {
        self.field_errors(GLOBAL_KEY)
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

/// Collects field results, then global messages, into a [`FormResult`]
#[derive(Debug, Default)]
pub struct Aggregator {
    errors: BTreeMap<String, Vec<String>>,
    values: FieldMap,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a field's outcome; its normalized value is always stored.
    pub fn add_field(&mut self, result: FieldResult) {
        if !result.errors.is_empty() {
            self.errors
                .entry(result.name.clone())
                .or_default()
                .extend(result.errors);
        }
        self.values.insert(result.name, result.value);
    }

    /// Normalized values committed so far
    pub fn values(&self) -> &FieldMap {
        &self.values
    }

    pub fn finish(mut self, global_messages: Vec<String>) -> FormResult {
        if !global_messages.is_empty() {
            self.errors.insert(GLOBAL_KEY.to_string(), global_messages);
        }

        FormResult {
            ok: self.errors.is_empty(),
            errors: self.errors,
            values: self.values,
        }
    }
}
