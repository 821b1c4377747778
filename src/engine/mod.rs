//! Processing Engine
//!
//! A single linear pass per call: resolve aliases, process every declared
//! field, run the global checks over the normalized values, and aggregate.
//!
//! The engine holds no state between calls. Panics raised by supplied
//! normalizers, validators or checks are configuration defects and propagate
//! to the caller unchanged.

pub mod alias;
pub mod field;
pub mod global;
pub mod result;

pub use alias::resolve_aliases;
pub use field::{REQUIRED_MESSAGE, apply_normalizers, process_field};
pub use global::{UNLABELLED_CHECK_MESSAGE, run_global_checks};
pub use result::{Aggregator, FieldResult, FormResult, GLOBAL_KEY};

use crate::rules::{AliasMap, GlobalCheck, RuleRegistry, RuleSet};
use crate::value::FieldMap;

/// Normalize and validate `raw` against `registry`.
///
/// Input keys not declared in the registry are ignored. Global checks see
/// the normalized value of every declared field, including failed ones.
pub fn process(
    raw: FieldMap,
    registry: &RuleRegistry,
    checks: &[GlobalCheck],
    aliases: &AliasMap,
) -> FormResult {
    let canonical = resolve_aliases(raw, aliases);

    let mut aggregator = Aggregator::new();
    for (name, spec) in registry.fields() {
        aggregator.add_field(process_field(name, canonical.get(name), spec));
    }

    let global_messages = run_global_checks(checks, aggregator.values());
    let result = aggregator.finish(global_messages);

    log::debug!(
        "Processed {} field(s): ok={}, {} error key(s)",
        registry.len(),
        result.ok,
        result.errors.len()
    );
    result
}

/// Process `raw` with a rule set's registry, global checks and aliases
pub fn process_with_aliases(raw: FieldMap, rule_set: &RuleSet) -> FormResult {
    process(raw, &rule_set.registry, &rule_set.checks, &rule_set.aliases)
}
