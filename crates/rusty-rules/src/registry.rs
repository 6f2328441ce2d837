// File: src/registry.rs
// Purpose: Named custom validators and aliases usable from rule strings

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::directive::{parse_directives, Directive, BUILTIN_NAMES};
use crate::error::RuleError;
use crate::value::FieldValue;

/// A custom validator: returns `true` when the value is acceptable.
pub type CustomValidator = Arc<dyn Fn(&FieldValue<'_>) -> bool + Send + Sync>;

/// Registry consulted while parsing rule strings.
///
/// `Validators::default()` knows the `phone` validator and the
/// `canadian_postal_code` alias; `Validators::empty()` knows neither.
#[derive(Clone)]
pub struct Validators {
    custom: HashMap<String, CustomValidator>,
    aliases: HashMap<String, String>,
}

impl Validators {
    /// Registry with built-in directives only
    pub fn empty() -> Self {
        Self {
            custom: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Registers a named validator, replacing any previous one with that name.
    pub fn register_validation<F>(
        &mut self,
        name: impl Into<String>,
        validator: F,
    ) -> Result<(), RuleError>
    where
        F: Fn(&FieldValue<'_>) -> bool + Send + Sync + 'static,
    {
        let name = self.check_name(name.into())?;
        self.aliases.remove(&name);
        self.custom.insert(name, Arc::new(validator));
        Ok(())
    }

    /// Registers `alias` as shorthand for the rule string `expansion`.
    pub fn register_alias(
        &mut self,
        alias: impl Into<String>,
        expansion: impl Into<String>,
    ) -> Result<(), RuleError> {
        let alias = self.check_name(alias.into())?;
        self.custom.remove(&alias);
        self.aliases.insert(alias, expansion.into());
        Ok(())
    }

    /// Parses a rule string for `field` against this registry
    pub fn parse(&self, field: &str, rule: &str) -> Result<Vec<Directive>, RuleError> {
        parse_directives(field, rule, self)
    }

    pub fn has_custom(&self, name: &str) -> bool {
        self.custom.contains_key(name)
    }

    pub fn alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    /// Runs a custom validator; an unregistered name never holds.
    pub fn run_custom(&self, name: &str, value: &FieldValue<'_>) -> bool {
        self.custom.get(name).is_some_and(|validator| validator(value))
    }

    fn check_name(&self, name: String) -> Result<String, RuleError> {
        if BUILTIN_NAMES.contains(&name.as_str()) {
            return Err(RuleError::ReservedName(name));
        }
        Ok(name)
    }
}

impl Default for Validators {
    fn default() -> Self {
        let mut validators = Self::empty();
        validators
            .custom
            .insert("phone".to_string(), Arc::new(nanp_phone));
        validators.aliases.insert(
            "canadian_postal_code".to_string(),
            "postcode_iso3166_alpha2=CA".to_string(),
        );
        validators
    }
}

fn nanp_phone(value: &FieldValue<'_>) -> bool {
    value.as_str().is_some_and(rusty_rules_validation::is_nanp_phone)
}

impl fmt::Debug for Validators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut custom: Vec<&String> = self.custom.keys().collect();
        custom.sort();
        f.debug_struct("Validators")
            .field("custom", &custom)
            .field("aliases", &self.aliases)
            .finish()
    }
}
