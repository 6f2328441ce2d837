// File: src/rules.rs
// Purpose: Rule maps, their composition, and compilation against entity schemas

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::directive::{Directive, DIRECTIVE_SEPARATOR};
use crate::error::RuleError;
use crate::record::SCHEMAS;
use crate::registry::Validators;
use crate::schema::{Field, Schema};

/// Field name → directive string, e.g. `{"Age": "min=18"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet(BTreeMap<String, String>);

/// Entity name → rule set, e.g. `{"User": {"Age": "min=18"}}`.
pub type EntityRules = BTreeMap<String, RuleSet>;

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`RuleSet::append_rule`]
    pub fn with(mut self, field: impl Into<String>, rule: impl AsRef<str>) -> Self {
        self.append_rule(field, rule);
        self
    }

    /// Adds `rule` to `field`, after any directives already there.
    ///
    /// An empty existing rule is replaced; an empty `rule` leaves an existing
    /// one untouched.
    pub fn append_rule(&mut self, field: impl Into<String>, rule: impl AsRef<str>) {
        let rule = rule.as_ref();
        let current = self.0.entry(field.into()).or_default();
        if current.is_empty() {
            *current = rule.to_string();
        } else if !rule.is_empty() {
            current.push(DIRECTIVE_SEPARATOR);
            current.push_str(rule);
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: AsRef<str>> FromIterator<(K, V)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut rules = RuleSet::new();
        for (field, rule) in iter {
            rules.append_rule(field, rule);
        }
        rules
    }
}

/// Merges rule sets in order, concatenating directives for shared fields.
///
/// `compose([{A: "x"}, {A: "y"}])` is `{A: "x,y"}`.
pub fn compose<'a>(sets: impl IntoIterator<Item = &'a RuleSet>) -> RuleSet {
    let mut composed = RuleSet::new();
    for set in sets {
        for (field, rule) in set.iter() {
            composed.append_rule(field, rule);
        }
    }
    composed
}

/// [`compose`] applied per entity name.
pub fn compose_entity_rules<'a>(
    layers: impl IntoIterator<Item = &'a EntityRules>,
) -> EntityRules {
    let mut composed = EntityRules::new();
    for layer in layers {
        for (entity, set) in layer {
            let current = composed.entry(entity.clone()).or_default();
            *current = compose([&*current, set]);
        }
    }
    composed
}

/// Parsed rules of one entity, in schema field order.
pub type CompiledRules = Vec<(&'static Field, Vec<Directive>)>;

/// Parsed rules for every known entity.
#[derive(Debug, Clone, Default)]
pub struct RuleBook {
    entities: HashMap<&'static str, CompiledRules>,
}

impl RuleBook {
    /// Parses `rules` against the known entity schemas.
    ///
    /// Fails on unknown entities, unknown fields and malformed directives.
    pub fn compile(rules: &EntityRules, validators: &Validators) -> Result<Self, RuleError> {
        let mut entities = HashMap::new();

        for (entity, set) in rules {
            let schema: &'static Schema = SCHEMAS
                .iter()
                .find(|s| s.name == entity.as_str())
                .copied()
                .ok_or_else(|| RuleError::UnknownEntity(entity.clone()))?;

            let unknown = set.iter().find(|(field, _)| schema.field(field).is_none());
            if let Some((field, _)) = unknown {
                return Err(RuleError::UnknownField {
                    entity: entity.clone(),
                    field: field.to_string(),
                });
            }

            let mut compiled = CompiledRules::new();
            for field in schema.fields {
                if let Some(rule) = set.get(field.name) {
                    let directives = validators.parse(field.name, rule)?;
                    if !directives.is_empty() {
                        compiled.push((field, directives));
                    }
                }
            }
            entities.insert(schema.name, compiled);
        }

        Ok(Self { entities })
    }

    /// Rules for the entity called `name`; empty when none were given.
    pub fn rules_for(&self, name: &str) -> &[(&'static Field, Vec<Directive>)] {
        self.entities.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compose_concatenates() {
        let a = RuleSet::new().with("A", "x");
        let b = RuleSet::new().with("A", "y").with("B", "z");

        let composed = compose([&a, &b]);
        assert_eq!(composed.get("A"), Some("x,y"));
        assert_eq!(composed.get("B"), Some("z"));
    }

    #[test]
    fn test_compose_empty_inputs() {
        assert!(compose(Vec::<&RuleSet>::new()).is_empty());
        assert!(compose([&RuleSet::new(), &RuleSet::new()]).is_empty());
    }

    #[test]
    fn test_append_rule_empty_values() {
        let mut rules = RuleSet::new();
        rules.append_rule("Email", "");
        assert_eq!(rules.get("Email"), Some(""));

        rules.append_rule("Email", "required");
        assert_eq!(rules.get("Email"), Some("required"));

        rules.append_rule("Email", "");
        assert_eq!(rules.get("Email"), Some("required"));

        rules.append_rule("Email", "email");
        assert_eq!(rules.get("Email"), Some("required,email"));
    }

    #[test]
    fn test_compose_entity_rules() {
        let defaults = EntityRules::from([(
            "User".to_string(),
            RuleSet::new().with("Age", "min=18"),
        )]);
        let overlay = EntityRules::from([
            ("User".to_string(), RuleSet::new().with("Age", "max=40")),
            ("Account".to_string(), RuleSet::new().with("ID", "required")),
        ]);

        let composed = compose_entity_rules([&defaults, &overlay]);
        assert_eq!(composed["User"].get("Age"), Some("min=18,max=40"));
        assert_eq!(composed["Account"].get("ID"), Some("required"));
    }

    #[test]
    fn test_compile_follows_schema_order() {
        let rules = EntityRules::from([(
            "User".to_string(),
            RuleSet::new().with("Email", "required").with("Age", "min=18"),
        )]);
        let book = RuleBook::compile(&rules, &Validators::default()).unwrap();

        let names: Vec<&str> = book.rules_for("User").iter().map(|(f, _)| f.name).collect();
        assert_eq!(names, vec!["Age", "Email"]);
        assert!(book.rules_for("Account").is_empty());
    }

    #[test]
    fn test_compile_rejects_unknown_names() {
        let validators = Validators::default();

        let rules = EntityRules::from([("Customer".to_string(), RuleSet::new())]);
        assert_eq!(
            RuleBook::compile(&rules, &validators).unwrap_err(),
            RuleError::UnknownEntity("Customer".into())
        );

        let rules = EntityRules::from([(
            "User".to_string(),
            RuleSet::new().with("Nickname", "required"),
        )]);
        assert_eq!(
            RuleBook::compile(&rules, &validators).unwrap_err(),
            RuleError::UnknownField {
                entity: "User".into(),
                field: "Nickname".into()
            }
        );
    }
}
