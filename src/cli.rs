//! Command driver
//!
//! Loads the rule set, reads raw fields as JSON, runs the engine and renders
//! the report.

use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::config::{CheckSelection, Config, DEFAULT_RULES, RULE_FILE_SUFFIX};
use crate::engine::{FormResult, process_with_aliases};
use crate::library::Catalog;
use crate::rules::RuleSet;
use crate::value::{FieldMap, Value};

/// Resolve the rule set: explicit path, then named file in the rule
/// directories, then the embedded default.
pub fn load_rule_set(config: &Config) -> Result<RuleSet> {
    let explicit = Path::new(&config.rules);
    if explicit.is_file() {
        return RuleSet::from_file(explicit);
    }

    let file_name = format!("{}{}", config.rules, RULE_FILE_SUFFIX);
    for dir in &config.rules_dirs {
        let candidate = dir.join(&file_name);
        if candidate.is_file() {
            return RuleSet::from_file(&candidate);
        }
        log::debug!("No rule file at {:?}", candidate);
    }

    if config.rules == DEFAULT_RULES {
        log::info!("Using embedded '{}' rules", DEFAULT_RULES);
        return RuleSet::embedded_registration();
    }

    bail!(
        "Rule set '{}' not found (searched: {:?})",
        config.rules,
        config.rules_dirs
    )
}

/// Apply CLI alias and check overrides to a loaded rule set
pub fn apply_overrides(rule_set: RuleSet, config: &Config) -> Result<RuleSet> {
    let rule_set = rule_set.with_aliases(config.aliases.clone());

    match &config.checks {
        CheckSelection::FromRules => Ok(rule_set),
        CheckSelection::None => Ok(rule_set.with_checks(Vec::new())),
        CheckSelection::Named(names) => {
            let catalog = Catalog::new();
            let checks = names
                .iter()
                .map(|name| catalog.check(name))
                .collect::<Result<Vec<_>>>()?;
            Ok(rule_set.with_checks(checks))
        }
    }
}

/// Parse a JSON object of raw fields
pub fn parse_input(text: &str) -> Result<FieldMap> {
    let value: Value = serde_json::from_str(text).context("Input is not valid JSON")?;
    match value {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => bail!("Input must be a JSON object of fields, got {}", other),
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input {:?}", path)),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read input from stdin")?;
            Ok(text)
        }
    }
}

pub fn render(result: &FormResult, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(text)
}

/// Run the CLI for a resolved configuration and return the report
pub fn run(config: &Config) -> Result<FormResult> {
    let rule_set = apply_overrides(load_rule_set(config)?, config)?;
    let raw = parse_input(&read_input(config.input.as_deref())?)?;

    log::info!(
        "Processing {} input field(s) with form '{}'",
        raw.len(),
        rule_set.name
    );
    Ok(process_with_aliases(raw, &rule_set))
}
