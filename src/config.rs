//! Configuration management for the form rules CLI.
//!
//! Handles:
//! - Command-line argument parsing
//! - Rule file lookup directories
//! - Alias and global check overrides

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;

use crate::rules::AliasMap;

/// Name of the rule set used when none is given
pub const DEFAULT_RULES: &str = "registration";

/// File suffix of rule files found by name
pub const RULE_FILE_SUFFIX: &str = ".rules.toml";

/// Command-line arguments for the form rules CLI
#[derive(Debug, Parser)]
#[command(name = "formrules")]
#[command(about = "Normalize and validate form fields against declarative rules")]
#[command(version)]
pub struct Args {
    /// Rule set name or path to a rule file
    #[arg(long, help = "Rule set name (e.g. 'registration') or path to a .rules.toml file")]
    pub rules: Option<String>,

    /// Extra directory to search for rule files
    #[arg(long, help = "Directory containing *.rules.toml files")]
    pub rules_dir: Option<PathBuf>,

    /// JSON object with the raw fields; stdin when omitted
    #[arg(long, help = "Path to a JSON object of raw fields (reads stdin if omitted)")]
    pub input: Option<PathBuf>,

    /// Extra aliases
    #[arg(long = "alias", value_name = "SRC=DST", help = "Rename input field SRC to DST")]
    pub aliases: Vec<String>,

    /// Global checks replacing the ones declared by the rule file
    #[arg(long = "check", value_name = "NAME", help = "Global check to run (repeatable)")]
    pub checks: Vec<String>,

    /// Skip all global checks
    #[arg(long, conflicts_with = "checks")]
    pub no_global_checks: bool,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,

    /// Log level for the CLI
    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Which global checks to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckSelection {
    /// Whatever the rule file declares
    FromRules,
    /// An explicit list, replacing the rule file's
    Named(Vec<String>),
    None,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Rule set name or path
    pub rules: String,
    /// Directories searched for `<name>.rules.toml`, in priority order
    pub rules_dirs: Vec<PathBuf>,
    pub input: Option<PathBuf>,
    pub aliases: AliasMap,
    pub checks: CheckSelection,
    pub pretty: bool,
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let mut rules_dirs = Vec::new();

        if let Some(custom_dir) = args.rules_dir {
            rules_dirs.push(custom_dir);
        }

        if let Some(config_dir) = dirs::config_dir() {
            rules_dirs.push(config_dir.join("formrules").join("rules"));
        }

        let aliases = parse_aliases(&args.aliases)?;

        let checks = if args.no_global_checks {
            CheckSelection::None
        } else if args.checks.is_empty() {
            CheckSelection::FromRules
        } else {
            CheckSelection::Named(args.checks)
        };

        Ok(Config {
            rules: args.rules.unwrap_or_else(|| DEFAULT_RULES.to_string()),
            rules_dirs,
            input: args.input,
            aliases,
            checks,
            pretty: args.pretty,
            log_level: args.log_level,
        })
    }
}

/// Parse `SRC=DST` pairs into an alias map
pub fn parse_aliases(pairs: &[String]) -> Result<AliasMap> {
    let mut aliases = AliasMap::new();
    for pair in pairs {
        let Some((source, target)) = pair.split_once('=') else {
            bail!("Invalid alias '{}', expected SRC=DST", pair);
        };
        let (source, target) = (source.trim(), target.trim());
        if source.is_empty() || target.is_empty() {
            bail!("Invalid alias '{}', expected SRC=DST", pair);
        }
        aliases.insert(source.to_string(), target.to_string());
    }
    Ok(aliases)
}
