//! Rule Schema Types
//!
//! Runtime rule specs are built from closures; rule files describe the same
//! thing as TOML and reference built-in capabilities by name.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::value::{FieldMap, Value};

/// Total value-to-value transform applied before validation
#[derive(Clone)]
pub struct Normalizer(Arc<dyn Fn(&Value) -> Value + Send + Sync>);

impl Normalizer {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn apply(&self, value: &Value) -> Value {
        (self.0)(value)
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Normalizer(..)")
    }
}

/// Pure predicate over a normalized value
#[derive(Clone)]
pub struct Validator(Arc<dyn Fn(&Value) -> bool + Send + Sync>);

impl Validator {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn check(&self, value: &Value) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

/// A validator paired with the message reported when it fails
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub validator: Validator,
    pub message: String,
}

/// Per-field configuration: ordered normalizers, ordered validators, required flag
#[derive(Debug, Clone, Default)]
pub struct RuleSpec {
    normalizers: Vec<Normalizer>,
    rules: Vec<FieldRule>,
    required: bool,
}

impl RuleSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Append a normalizer; normalizers run in the order they were added.
    pub fn normalizer<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.normalizers.push(Normalizer::new(f));
        self
    }

    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizers.push(normalizer);
        self
    }

    /// Append a validator with its failure message.
    pub fn validator<F>(self, f: F, message: impl Into<String>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.with_validator(Validator::new(f), message)
    }

    pub fn with_validator(mut self, validator: Validator, message: impl Into<String>) -> Self {
        self.rules.push(FieldRule {
            validator,
            message: message.into(),
        });
        self
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn normalizers(&self) -> &[Normalizer] {
        &self.normalizers
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }
}

/// Outcome of one global check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub ok: bool,
    pub message: String,
}

impl CheckOutcome {
    pub fn pass() -> Self {
        Self {
            ok: true,
            message: String::new(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Cross-field predicate over the complete normalized value mapping
#[derive(Clone)]
pub struct GlobalCheck {
    name: String,
    check: Arc<dyn Fn(&FieldMap) -> CheckOutcome + Send + Sync>,
}

impl GlobalCheck {
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&FieldMap) -> CheckOutcome + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(f),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn run(&self, values: &FieldMap) -> CheckOutcome {
        (self.check)(values)
    }
}

impl fmt::Debug for GlobalCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalCheck")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Root rule file structure (matches TOML)
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RuleFile {
    pub form: FormMeta,
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    #[serde(default)]
    pub global_checks: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

/// Form metadata
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FormMeta {
    pub name: String,
    pub description: Option<String>,
}

/// Field definition as written in a rule file
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FieldDef {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub normalizers: Vec<String>,
    #[serde(default)]
    pub validators: Vec<ValidatorDef>,
}

/// Reference to a built-in validator plus its failure message
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ValidatorDef {
    pub name: String,
    pub message: String,
    pub min_len: Option<usize>,
    pub min_classes: Option<usize>,
    pub pattern: Option<String>,
}

impl ValidatorDef {
    /// Names of the optional parameters that are set
    pub fn given_parameters(&self) -> Vec<&'static str> {
        [
            ("min_len", self.min_len.is_some()),
            ("min_classes", self.min_classes.is_some()),
            ("pattern", self.pattern.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, given)| given.then_some(name))
        .collect()
    }
}
