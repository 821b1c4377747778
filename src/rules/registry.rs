//! Rule Registry
//!
//! Immutable field name to rule spec mapping, and the rule set that bundles a
//! registry with its global checks and alias table.

use anyhow::{Context, Result, bail};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::schema::{GlobalCheck, RuleFile, RuleSpec};
use crate::engine::GLOBAL_KEY;
use crate::library::Catalog;

/// Alias table: external field name to canonical field name
///
/// Lookup only; its own order never affects which input key wins a collision.
pub type AliasMap = BTreeMap<String, String>;

/// Field name to rule spec, in field name order
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    fields: BTreeMap<String, RuleSpec>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field. Registration consumes the registry so that a built
    /// registry is never mutated while it is being used.
    ///
    /// The name reserved for global check errors cannot be declared as a field.
    pub fn with_field(mut self, name: impl Into<String>, spec: RuleSpec) -> Result<Self> {
        let name = name.into();
        if name == GLOBAL_KEY {
            bail!("Field name '{}' is reserved for global check errors", GLOBAL_KEY);
        }
        self.fields.insert(name, spec);
        Ok(self)
    }

    /// Build a registry from `(name, spec)` pairs
    pub fn from_fields<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, RuleSpec)>,
        S: Into<String>,
    {
        fields
            .into_iter()
            .try_fold(Self::new(), |registry, (name, spec)| registry.with_field(name, spec))
    }

    pub fn get(&self, name: &str) -> Option<&RuleSpec> {
        self.fields.get(name)
    }

    /// Iterate over declared fields in name order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &RuleSpec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A complete form configuration
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub name: String,
    pub description: Option<String>,
    pub registry: RuleRegistry,
    pub checks: Vec<GlobalCheck>,
    pub aliases: AliasMap,
}

impl RuleSet {
    /// Resolve a parsed rule file against the built-in catalog
    pub fn from_rule_file(file: RuleFile, catalog: &Catalog) -> Result<Self> {
        let mut registry = RuleRegistry::new();

        for field in file.fields {
            let mut spec = RuleSpec::new().required(field.required);

            for name in &field.normalizers {
                let normalizer = catalog
                    .normalizer(name)
                    .with_context(|| format!("Field '{}'", field.name))?;
                spec = spec.with_normalizer(normalizer);
            }

            for def in &field.validators {
                let validator = catalog
                    .validator(def)
                    .with_context(|| format!("Field '{}'", field.name))?;
                spec = spec.with_validator(validator, def.message.clone());
            }

            if registry.get(&field.name).is_some() {
                log::warn!(
                    "Field '{}' declared twice in form '{}', keeping the last definition",
                    field.name,
                    file.form.name
                );
            }
            registry = registry
                .with_field(field.name, spec)
                .with_context(|| format!("Form '{}'", file.form.name))?;
        }

        let checks = file
            .global_checks
            .iter()
            .map(|name| catalog.check(name))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("Form '{}'", file.form.name))?;

        Ok(Self {
            name: file.form.name,
            description: file.form.description,
            registry,
            checks,
            aliases: file.aliases,
        })
    }

    /// Parse and resolve a rule file from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: RuleFile = toml::from_str(text).context("Failed to parse rule file")?;
        Self::from_rule_file(file, &Catalog::new())
    }

    /// Load a rule file from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule file {:?}", path))?;
        let rule_set =
            Self::from_toml_str(&text).with_context(|| format!("In rule file {:?}", path))?;
        log::info!(
            "Loaded form '{}' ({} fields) from {:?}",
            rule_set.name,
            rule_set.registry.len(),
            path
        );
        Ok(rule_set)
    }

    /// The embedded registration form: email, optional phone and password
    pub fn embedded_registration() -> Result<Self> {
        let embedded_toml = include_str!("../../resources/rules/registration.rules.toml");
        Self::from_toml_str(embedded_toml).context("Embedded registration rules are invalid")
    }

    /// Replace the global checks, e.g. when the caller selects its own
    pub fn with_checks(mut self, checks: Vec<GlobalCheck>) -> Self {
        self.checks = checks;
        self
    }

    /// Add aliases on top of the ones declared by the rule file
    pub fn with_aliases(mut self, aliases: AliasMap) -> Self {
        self.aliases.extend(aliases);
        self
    }
}
