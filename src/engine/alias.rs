//! Alias Resolver
//!
//! One-shot rename of incoming field names to canonical ones.

use crate::rules::AliasMap;
use crate::value::FieldMap;

/// Rename every key found in `aliases` to its canonical name.
///
/// Keys without an alias pass through unchanged. Renaming is not recursive.
///
/// Input is a [`FieldMap`], so keys are visited in lexicographic order, not
/// in the order the caller inserted them. When two keys land on the same
/// canonical name, the lexicographically later source key wins; collisions
/// are not reported. Callers that care about precedence must avoid
/// colliding aliases.
pub fn resolve_aliases(raw: FieldMap, aliases: &AliasMap) -> FieldMap {
    if aliases.is_empty() {
        return raw;
    }

    let mut resolved = FieldMap::new();
    for (name, value) in raw {
        match aliases.get(&name) {
            Some(canonical) => {
                log::debug!("Alias '{}' -> '{}'", name, canonical);
                resolved.insert(canonical.clone(), value);
            }
            None => {
                resolved.insert(name, value);
            }
        }
    }
    resolved
}
