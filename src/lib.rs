//! Form Rules
//!
//! A declarative engine for normalizing and validating named form fields.
//!
//! This library provides:
//! - Per-field rule specs (ordered normalizers, ordered validators, required flag)
//! - Alias resolution of incoming field names
//! - Cross-field global checks over normalized values
//! - A sparse, deterministic error report
//! - TOML rule files referencing built-in capabilities

pub mod cli;
pub mod config;
pub mod engine;
pub mod library;
pub mod rules;
pub mod value;

// Re-exports for clean public API
pub use config::Config;
pub use engine::{FormResult, GLOBAL_KEY, REQUIRED_MESSAGE, process, process_with_aliases};
pub use library::Catalog;
pub use rules::{AliasMap, CheckOutcome, GlobalCheck, RuleRegistry, RuleSet, RuleSpec};
pub use value::{FieldMap, Value};
