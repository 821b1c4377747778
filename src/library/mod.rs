//! Built-in Capabilities
//!
//! Concrete normalizers, validators and global checks, plus the catalog that
//! lets rule files refer to them by name.

pub mod checks;
pub mod normalizers;
pub mod validators;

use anyhow::{Context, Result, anyhow, bail};
use regex::Regex;

use crate::rules::{GlobalCheck, Normalizer, Validator, ValidatorDef};

const DEFAULT_EXTRA_MIN_LEN: usize = 12;
const DEFAULT_EXTRA_MIN_CLASSES: usize = 2;

/// Name-based lookup of the built-in capabilities
#[derive(Debug, Default, Clone, Copy)]
pub struct Catalog;

impl Catalog {
    pub fn new() -> Self {
        Self
    }

    pub fn normalizer_names(&self) -> &'static [&'static str] {
        &["trim", "lowercase", "collapse_whitespace", "digits_only"]
    }

    pub fn validator_names(&self) -> &'static [&'static str] {
        &[
            "email",
            "phone_es",
            "password",
            "password_strict",
            "password_extra",
            "postal_code_es",
            "not_empty",
            "pattern",
        ]
    }

    pub fn check_names(&self) -> &'static [&'static str] {
        &["corporate_email_requires_phone", "strict_password"]
    }

    /// Resolve a normalizer by name
    pub fn normalizer(&self, name: &str) -> Result<Normalizer> {
        let normalizer = match name {
            "trim" => Normalizer::new(normalizers::trim),
            "lowercase" => Normalizer::new(normalizers::lowercase),
            "collapse_whitespace" => Normalizer::new(normalizers::collapse_whitespace),
            "digits_only" => Normalizer::new(normalizers::digits_only),
            other => bail!(
                "Unknown normalizer '{}' (available: {})",
                other,
                self.normalizer_names().join(", ")
            ),
        };
        Ok(normalizer)
    }

    /// Parameters accepted by a validator
    fn accepted_parameters(name: &str) -> &'static [&'static str] {
        match name {
            "password_extra" => &["min_len", "min_classes"],
            "pattern" => &["pattern"],
            _ => &[],
        }
    }

    /// Resolve a validator definition, including its parameters
    pub fn validator(&self, def: &ValidatorDef) -> Result<Validator> {
        let accepted = Self::accepted_parameters(&def.name);
        if let Some(unused) = def
            .given_parameters()
            .into_iter()
            .find(|param| !accepted.contains(param))
        {
            bail!(
                "Validator '{}' does not take parameter '{}'",
                def.name,
                unused
            );
        }

        let validator = match def.name.as_str() {
            "email" => Validator::new(validators::email),
            "phone_es" => Validator::new(validators::phone_es),
            "password" => Validator::new(validators::password),
            "password_strict" => Validator::new(validators::password_strict),
            "password_extra" => {
                let min_len = def.min_len.unwrap_or(DEFAULT_EXTRA_MIN_LEN);
                let min_classes = def.min_classes.unwrap_or(DEFAULT_EXTRA_MIN_CLASSES);
                Validator::new(move |v| validators::password_extra(v, min_len, min_classes))
            }
            "postal_code_es" => Validator::new(validators::postal_code_es),
            "not_empty" => Validator::new(validators::not_empty),
            "pattern" => {
                let source = def
                    .pattern
                    .as_deref()
                    .ok_or_else(|| anyhow!("Validator 'pattern' needs a 'pattern' value"))?;
                let regex = Regex::new(source)
                    .with_context(|| format!("Invalid pattern '{}'", source))?;
                Validator::new(validators::pattern(regex))
            }
            other => bail!(
                "Unknown validator '{}' (available: {})",
                other,
                self.validator_names().join(", ")
            ),
        };
        Ok(validator)
    }

    /// Resolve a global check by name
    pub fn check(&self, name: &str) -> Result<GlobalCheck> {
        match name {
            "corporate_email_requires_phone" => Ok(checks::corporate_email_requires_phone()),
            "strict_password" => Ok(checks::strict_password()),
            other => bail!(
                "Unknown global check '{}' (available: {})",
                other,
                self.check_names().join(", ")
            ),
        }
    }
}
