// File: src/report.rs
// Purpose: Violation report and the checker that accumulates it

use serde::Serialize;
use std::fmt;

use crate::directive::Directive;
use crate::registry::Validators;
use crate::rules::RuleBook;
use crate::schema::{Entity, Field};
use crate::value::FieldValue;

/// One failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Full path from the root entity, e.g. `User.Addresses[0].ZipCode`
    pub path: String,
    /// Field identifier, e.g. `ZipCode`
    pub field: String,
    /// Display name of the field, e.g. `anID` for `Account.ID`
    pub label: String,
    /// Failed directives joined by `,`, or the name of a struct-level check
    pub rule: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Key: '{}' Error: field validation for '{}' failed on the '{}' rule",
            self.path, self.label, self.rule
        )
    }
}

/// Aggregate of every violation found by one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("{}", render(.violations))]
pub struct ValidationErrors {
    violations: Vec<Violation>,
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl ValidationErrors {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Paths of the failing fields, in report order
    pub fn paths(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.path.as_str()).collect()
    }

    /// Identifiers of the failing fields, in report order
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }
}

impl IntoIterator for ValidationErrors {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

/// Accumulates violations while walking a record.
///
/// Struct-level checks receive a `Checker` and report through it; nested
/// records are visited inside [`Checker::nested`] so paths stay correct.
pub struct Checker<'v> {
    validators: &'v Validators,
    rules: &'v RuleBook,
    path: Vec<String>,
    violations: Vec<Violation>,
}

impl<'v> Checker<'v> {
    pub fn new(validators: &'v Validators, rules: &'v RuleBook, root: &str) -> Self {
        Self {
            validators,
            rules,
            path: vec![root.to_string()],
            violations: Vec::new(),
        }
    }

    /// Records a failure of `rule` on `field` at the current path.
    pub fn report(&mut self, field: &Field, rule: impl Into<String>) {
        self.push(field, "", rule.into());
    }

    /// Evaluates `directives` against `value` and reports at most one
    /// violation for the field, listing every directive that failed.
    ///
    /// Returns `true` when nothing was reported.
    pub fn check(
        &mut self,
        field: &Field,
        value: &FieldValue<'_>,
        directives: &[Directive],
    ) -> bool {
        let before = self.violations.len();
        self.evaluate(field, String::new(), value, directives);
        self.violations.len() == before
    }

    /// Applies the compiled rules for `E` to `entity`.
    pub fn apply<E: Entity>(&mut self, entity: &E) {
        let rules = self.rules;
        for (field, directives) in rules.rules_for(E::SCHEMA.name) {
            let value = entity.value(field.name);
            self.evaluate(field, String::new(), &value, directives);
        }
    }

    /// Runs `f` with `segment` appended to the current path.
    pub fn nested<R>(
        &mut self,
        segment: impl Into<String>,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.path.push(segment.into());
        let result = f(self);
        self.path.pop();
        result
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors::new(self.violations))
        }
    }

    fn evaluate(
        &mut self,
        field: &Field,
        suffix: String,
        value: &FieldValue<'_>,
        directives: &[Directive],
    ) {
        let mut failed = Vec::new();

        for (i, directive) in directives.iter().enumerate() {
            match directive {
                Directive::OmitEmpty if value.is_empty() => break,
                Directive::Dive => {
                    match value {
                        FieldValue::Items(items) => {
                            self.flush(field, &suffix, &mut failed);
                            for (key, item) in items {
                                let item_suffix = format!("{}[{}]", suffix, key);
                                self.evaluate(field, item_suffix, item, &directives[i + 1..]);
                            }
                        }
                        _ => {
                            failed.push(directive.to_string());
                            self.flush(field, &suffix, &mut failed);
                        }
                    }
                    return;
                }
                _ => {
                    if !directive.holds(value, self.validators) {
                        failed.push(directive.to_string());
                    }
                }
            }
        }

        self.flush(field, &suffix, &mut failed);
    }

    fn flush(&mut self, field: &Field, suffix: &str, failed: &mut Vec<String>) {
        if !failed.is_empty() {
            let rule = failed.join(",");
            failed.clear();
            self.push(field, suffix, rule);
        }
    }

    fn push(&mut self, field: &Field, suffix: &str, rule: String) {
        let mut path = self.path.join(".");
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(field.name);
        path.push_str(suffix);

        self.violations.push(Violation {
            path,
            field: field.name.to_string(),
            label: field.display.to_string(),
            rule,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NAME: Field = Field::new("FirstName", "FIRSTNAME");
    const TAGS: Field = Field::plain("Tags");

    fn checker_parts() -> (Validators, RuleBook) {
        (Validators::default(), RuleBook::default())
    }

    #[test]
    fn test_check_reports_all_failed_directives_once() {
        let (validators, book) = checker_parts();
        let mut checker = Checker::new(&validators, &book, "User");

        let directives = validators
            .parse("FirstName", "min=5,startswith=S,max=10")
            .unwrap();
        assert!(!checker.check(&NAME, &FieldValue::Str("Joe"), &directives));

        assert_eq!(
            checker.violations(),
            &[Violation {
                path: "User.FirstName".into(),
                field: "FirstName".into(),
                label: "FIRSTNAME".into(),
                rule: "min=5,startswith=S".into(),
            }]
        );
    }

    #[test]
    fn test_omitempty_skips_empty_values() {
        let (validators, book) = checker_parts();
        let mut checker = Checker::new(&validators, &book, "User");

        let directives = validators.parse("FirstName", "omitempty,min=10").unwrap();
        assert!(checker.check(&NAME, &FieldValue::Str(""), &directives));
        assert!(!checker.check(&NAME, &FieldValue::Str("Short"), &directives));
        assert_eq!(checker.violations().len(), 1);
    }

    #[test]
    fn test_alias_with_omitempty_matches_inline_rule() {
        let mut validators = Validators::default();
        validators.register_alias("optstreet", "omitempty,min=10").unwrap();
        let book = RuleBook::default();
        let mut checker = Checker::new(&validators, &book, "Address");
        let street = Field::plain("Street");

        let aliased = validators.parse("Street", "optstreet").unwrap();
        let inline = validators.parse("Street", "omitempty,min=10").unwrap();
        for value in [FieldValue::Str(""), FieldValue::Str("Long St SW Calgary")] {
            assert!(checker.check(&street, &value, &aliased));
            assert!(checker.check(&street, &value, &inline));
        }

        assert!(!checker.check(&street, &FieldValue::Str("Short St"), &aliased));
        assert_eq!(checker.violations()[0].rule, "optstreet");
    }

    #[test]
    fn test_dive_reports_element_paths() {
        let (validators, book) = checker_parts();
        let mut checker = Checker::new(&validators, &book, "Post");

        let directives = validators.parse("Tags", "min=1,dive,required,max=3").unwrap();
        let tags = FieldValue::Items(vec![
            ("0".into(), FieldValue::Str("rust")),
            ("1".into(), FieldValue::Str("go")),
            ("2".into(), FieldValue::Absent),
        ]);
        checker.check(&TAGS, &tags, &directives);

        let paths: Vec<&str> = checker.violations().iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["Post.Tags[0]", "Post.Tags[2]"]);
        assert_eq!(checker.violations()[0].rule, "max=3");
        assert_eq!(checker.violations()[1].rule, "required,max=3");
    }

    #[test]
    fn test_nested_paths_and_finish() {
        let (validators, book) = checker_parts();
        let mut checker = Checker::new(&validators, &book, "User");

        checker.nested("Addresses[1]", |c| {
            c.report(&Field::plain("Province"), "isprovincecode")
        });
        checker.report(&NAME, "namestartswith");

        let errors = checker.finish().unwrap_err();
        assert_eq!(errors.paths(), vec!["User.Addresses[1].Province", "User.FirstName"]);
        assert_eq!(errors.fields(), vec!["Province", "FirstName"]);
        assert_eq!(
            errors.to_string(),
            "Key: 'User.Addresses[1].Province' Error: field validation for 'Province' failed on the 'isprovincecode' rule\n\
             Key: 'User.FirstName' Error: field validation for 'FIRSTNAME' failed on the 'namestartswith' rule"
        );
    }

    #[test]
    fn test_errors_serialize_as_violation_list() {
        let (validators, book) = checker_parts();
        let mut checker = Checker::new(&validators, &book, "User");
        checker.nested("Account", |c| c.report(&Field::new("ID", "anID"), "required"));

        let errors = checker.finish().unwrap_err();
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!([{
                "path": "User.Account.ID",
                "field": "ID",
                "label": "anID",
                "rule": "required",
            }])
        );
    }

    #[test]
    fn test_finish_without_violations() {
        let (validators, book) = checker_parts();
        assert!(Checker::new(&validators, &book, "User").finish().is_ok());
    }
}
