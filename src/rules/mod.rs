//! Rule Definitions
//!
//! Per-field rule specs, the registry that holds them, and the TOML rule file
//! format that describes them.

pub mod registry;
pub mod schema;

pub use registry::{AliasMap, RuleRegistry, RuleSet};
pub use schema::{
    CheckOutcome, FieldDef, FieldRule, FormMeta, GlobalCheck, Normalizer, RuleFile, RuleSpec,
    Validator, ValidatorDef,
};
