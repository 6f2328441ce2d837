// File: src/directive.rs
// Purpose: Typed directives parsed from rule strings such as "required,min=18"

use std::fmt;

use rusty_rules_validation as checks;

use crate::error::RuleError;
use crate::registry::Validators;
use crate::value::FieldValue;

/// Separator between directives in a rule string
pub const DIRECTIVE_SEPARATOR: char = ',';

/// A single named, optionally parameterized check.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Value must not be absent, empty or zero
    Required,
    /// Skip the remaining directives when the value is empty
    OmitEmpty,
    /// Apply the remaining directives to every collection element
    Dive,
    /// Minimum number, or minimum length for strings and collections
    Min(f64),
    /// Maximum number, or maximum length for strings and collections
    Max(f64),
    /// Exact length of a string or collection
    Len(usize),
    Email,
    E164,
    OneOf(Vec<String>),
    StartsWith(String),
    ProvinceCode,
    ProvinceName,
    CountryCode,
    /// Postal code format of an alpha-2 country
    PostCode(String),
    /// A validator registered by name in [`Validators`]
    Custom(String),
    /// A registered alias, reported under its own name
    Alias { name: String, directives: Vec<Directive> },
}

/// Names of built-in directives; custom validators and aliases may not reuse them.
pub const BUILTIN_NAMES: &[&str] = &[
    "required",
    "omitempty",
    "dive",
    "min",
    "max",
    "len",
    "email",
    "e164",
    "oneof",
    "startswith",
    "province_code",
    "province_name",
    "country_code",
    "postcode_iso3166_alpha2",
];

impl Directive {
    /// Evaluates the check against `value`.
    ///
    /// `omitempty` and `dive` only steer evaluation order and always hold on
    /// their own. Inside an alias they steer the alias expansion, which then
    /// holds or fails as a whole. A directive applied to a value of the wrong
    /// kind does not hold.
    pub fn holds(&self, value: &FieldValue<'_>, validators: &Validators) -> bool {
        match self {
            Directive::Required => !value.is_empty(),
            Directive::OmitEmpty | Directive::Dive => true,
            Directive::Min(min) => match value {
                FieldValue::Str(s) => checks::validate_min_length(s, min.ceil() as usize).is_ok(),
                FieldValue::Items(items) => {
                    checks::validate_min_items(items.len(), min.ceil() as usize).is_ok()
                }
                _ => value
                    .magnitude()
                    .is_some_and(|m| checks::validate_min(m, *min).is_ok()),
            },
            Directive::Max(max) => match value {
                FieldValue::Str(s) => checks::validate_max_length(s, max.floor() as usize).is_ok(),
                FieldValue::Items(items) => {
                    checks::validate_max_items(items.len(), max.floor() as usize).is_ok()
                }
                _ => value
                    .magnitude()
                    .is_some_and(|m| checks::validate_max(m, *max).is_ok()),
            },
            Directive::Len(len) => match value {
                FieldValue::Str(s) => checks::validate_exact_length(s, *len).is_ok(),
                FieldValue::Items(items) => items.len() == *len,
                _ => false,
            },
            Directive::Email => value.as_str().is_some_and(checks::is_valid_email),
            Directive::E164 => value.as_str().is_some_and(checks::is_e164),
            Directive::OneOf(allowed) => value
                .to_text()
                .is_some_and(|text| checks::is_one_of(&text, allowed.as_slice())),
            Directive::StartsWith(prefix) => {
                value.as_str().is_some_and(|s| checks::starts_with(s, prefix))
            }
            Directive::ProvinceCode => value.as_str().is_some_and(checks::is_province_code),
            Directive::ProvinceName => value.as_str().is_some_and(checks::is_province_name),
            Directive::CountryCode => match value {
                FieldValue::Str(s) => checks::is_country_code(s),
                FieldValue::UInt(n) => u16::try_from(*n).is_ok_and(checks::is_country_numeric),
                FieldValue::Int(n) => u16::try_from(*n).is_ok_and(checks::is_country_numeric),
                _ => false,
            },
            Directive::PostCode(country) => value
                .as_str()
                .and_then(|s| checks::is_postal_code(s, country))
                .unwrap_or(false),
            Directive::Custom(name) => validators.run_custom(name, value),
            Directive::Alias { directives, .. } => all_hold(directives, value, validators),
        }
    }
}

fn all_hold(directives: &[Directive], value: &FieldValue<'_>, validators: &Validators) -> bool {
    for (i, directive) in directives.iter().enumerate() {
        match directive {
            Directive::OmitEmpty if value.is_empty() => return true,
            Directive::Dive => {
                return match value {
                    FieldValue::Items(items) => items
                        .iter()
                        .all(|(_, item)| all_hold(&directives[i + 1..], item, validators)),
                    _ => false,
                };
            }
            _ if !directive.holds(value, validators) => return false,
            _ => {}
        }
    }
    true
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Required => write!(f, "required"),
            Directive::OmitEmpty => write!(f, "omitempty"),
            Directive::Dive => write!(f, "dive"),
            Directive::Min(n) => write!(f, "min={}", n),
            Directive::Max(n) => write!(f, "max={}", n),
            Directive::Len(n) => write!(f, "len={}", n),
            Directive::Email => write!(f, "email"),
            Directive::E164 => write!(f, "e164"),
            Directive::OneOf(values) => write!(f, "oneof={}", values.join(" ")),
            Directive::StartsWith(prefix) => write!(f, "startswith={}", prefix),
            Directive::ProvinceCode => write!(f, "province_code"),
            Directive::ProvinceName => write!(f, "province_name"),
            Directive::CountryCode => write!(f, "country_code"),
            Directive::PostCode(country) => write!(f, "postcode_iso3166_alpha2={}", country),
            Directive::Custom(name) => write!(f, "{}", name),
            Directive::Alias { name, .. } => write!(f, "{}", name),
        }
    }
}

/// Parses a rule string for `field` into directives.
///
/// Segments are trimmed and empty segments are skipped, so `""` parses to
/// no directives at all. Aliases registered in `validators` are expanded.
pub fn parse_directives(
    field: &str,
    rule: &str,
    validators: &Validators,
) -> Result<Vec<Directive>, RuleError> {
    let mut expanding = Vec::new();
    parse_with_aliases(field, rule, validators, &mut expanding)
}

fn parse_with_aliases(
    field: &str,
    rule: &str,
    validators: &Validators,
    expanding: &mut Vec<String>,
) -> Result<Vec<Directive>, RuleError> {
    rule.split(DIRECTIVE_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| parse_segment(field, segment, validators, expanding))
        .collect()
}

fn parse_segment(
    field: &str,
    segment: &str,
    validators: &Validators,
    expanding: &mut Vec<String>,
) -> Result<Directive, RuleError> {
    let (name, param) = match segment.split_once('=') {
        Some((name, param)) => (name.trim(), Some(param.trim())),
        None => (segment, None),
    };

    let require_param = || {
        param.filter(|p| !p.is_empty()).ok_or_else(|| RuleError::MissingParameter {
            field: field.to_string(),
            directive: name.to_string(),
        })
    };
    let invalid = |param: &str| RuleError::InvalidParameter {
        field: field.to_string(),
        directive: name.to_string(),
        param: param.to_string(),
    };
    let number = |param: &str| {
        param
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| invalid(param))
    };

    let directive = match name {
        "required" => Directive::Required,
        "omitempty" => Directive::OmitEmpty,
        "dive" => Directive::Dive,
        "min" => Directive::Min(number(require_param()?)?),
        "max" => Directive::Max(number(require_param()?)?),
        "len" => {
            let param = require_param()?;
            Directive::Len(param.parse().map_err(|_| invalid(param))?)
        }
        "email" => Directive::Email,
        "e164" => Directive::E164,
        "oneof" => Directive::OneOf(
            require_param()?
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        ),
        "startswith" => Directive::StartsWith(require_param()?.to_string()),
        "province_code" => Directive::ProvinceCode,
        "province_name" => Directive::ProvinceName,
        "country_code" => Directive::CountryCode,
        "postcode_iso3166_alpha2" => {
            let country = require_param()?;
            if !checks::POSTAL_CODE_COUNTRIES.contains(&country) {
                return Err(invalid(country));
            }
            Directive::PostCode(country.to_string())
        }
        other if validators.has_custom(other) => Directive::Custom(other.to_string()),
        other => match validators.alias(other) {
            Some(expansion) => {
                if expanding.iter().any(|a| a == other) {
                    return Err(RuleError::RecursiveAlias(other.to_string()));
                }
                expanding.push(other.to_string());
                let directives = parse_with_aliases(field, expansion, validators, expanding)?;
                expanding.pop();
                Directive::Alias {
                    name: other.to_string(),
                    directives,
                }
            }
            None => {
                return Err(RuleError::UnknownDirective {
                    field: field.to_string(),
                    directive: segment.to_string(),
                })
            }
        },
    };

    Ok(directive)
}
