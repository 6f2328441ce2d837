// File: src/tenant.rs
// Purpose: Tenant identifiers, tenant strategies and struct-level decoration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::record::user::{AGE, FIRST_NAME, PHONE, PROVINCE, USER};
use crate::record::{Application, User};
use crate::report::Checker;
use crate::rules::{compose_entity_rules, EntityRules, RuleSet};

/// Identifier of a tenant, passed explicitly to every validation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub u32);

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TenantId {
    fn from(id: u32) -> Self {
        TenantId(id)
    }
}

/// A struct-level check over a whole record of type `T`.
pub type StructLevelFn<T> = Arc<dyn Fn(&T, &mut Checker<'_>) + Send + Sync>;

/// Wraps a closure or function as a [`StructLevelFn`].
pub fn struct_level<T, F>(f: F) -> StructLevelFn<T>
where
    F: Fn(&T, &mut Checker<'_>) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Chains struct-level checks: the result runs each of them in order.
///
/// Every check runs regardless of what earlier ones reported.
pub fn decorate<T: 'static>(
    checks: impl IntoIterator<Item = StructLevelFn<T>>,
) -> StructLevelFn<T> {
    let checks: Vec<StructLevelFn<T>> = checks.into_iter().collect();
    struct_level::<T, _>(move |record, checker| {
        for check in &checks {
            check(record, checker);
        }
    })
}

/// Tenant-specific validation layered on the shared defaults.
///
/// A tenant contributes rule maps (composed after the default rules) and
/// struct-level checks (run after the default struct-level checks).
pub trait TenantValidator: Send + Sync {
    fn name(&self) -> &str;

    /// Rule maps composed after the defaults, keyed by entity name.
    fn rules(&self) -> EntityRules {
        EntityRules::new()
    }

    fn validate_user(&self, _user: &User, _checker: &mut Checker<'_>) {}

    fn validate_application(&self, _application: &Application, _checker: &mut Checker<'_>) {}
}

/// First name must start with a given letter; phone must be E.164.
#[derive(Debug, Clone)]
pub struct NameInitialValidator {
    pub initial: char,
}

impl Default for NameInitialValidator {
    fn default() -> Self {
        Self { initial: 'S' }
    }
}

impl TenantValidator for NameInitialValidator {
    fn name(&self) -> &str {
        "name-initial"
    }

    fn rules(&self) -> EntityRules {
        EntityRules::from([(
            USER.name.to_string(),
            RuleSet::new().with(PHONE.name, "e164"),
        )])
    }

    fn validate_user(&self, user: &User, checker: &mut Checker<'_>) {
        if !rusty_rules_validation::starts_with_char(&user.first_name, self.initial) {
            checker.report(&FIRST_NAME, format!("namestartswith={}", self.initial));
        }
    }
}

/// Age must fall in an inclusive band; every address needs a province code.
#[derive(Debug, Clone)]
pub struct AgeBandValidator {
    pub min_age: u8,
    pub max_age: u8,
}

impl Default for AgeBandValidator {
    fn default() -> Self {
        Self {
            min_age: 20,
            max_age: 40,
        }
    }
}

impl TenantValidator for AgeBandValidator {
    fn name(&self) -> &str {
        "age-band"
    }

    fn validate_user(&self, user: &User, checker: &mut Checker<'_>) {
        if rusty_rules_validation::validate_range(user.age, self.min_age, self.max_age).is_err() {
            let rule = format!("agebetween={}-{}", self.min_age, self.max_age);
            checker.report(&AGE, rule);
        }

        for (i, address) in user.addresses.iter().enumerate() {
            if !rusty_rules_validation::is_province_code(&address.province) {
                checker.nested(format!("Addresses[{}]", i), |c| {
                    c.report(&PROVINCE, "isprovincecode")
                });
            }
        }
    }
}

/// A named tenant made of an optional base strategy plus extra rule maps.
pub struct OverlayTenant {
    name: String,
    base: Option<Box<dyn TenantValidator>>,
    rules: EntityRules,
}

impl OverlayTenant {
    /// Tenant that only adds rule maps
    pub fn rules_only(name: impl Into<String>, rules: EntityRules) -> Self {
        Self {
            name: name.into(),
            base: None,
            rules,
        }
    }

    /// Tenant that runs `base` and composes `rules` after the base's own rules
    pub fn with_base(
        name: impl Into<String>,
        base: impl TenantValidator + 'static,
        rules: EntityRules,
    ) -> Self {
        Self {
            name: name.into(),
            base: Some(Box::new(base)),
            rules,
        }
    }
}

impl fmt::Debug for OverlayTenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayTenant")
            .field("name", &self.name)
            .field("base", &self.base.as_ref().map(|b| b.name().to_string()))
            .field("rules", &self.rules)
            .finish()
    }
}

impl TenantValidator for OverlayTenant {
    fn name(&self) -> &str {
        &self.name
    }

    fn rules(&self) -> EntityRules {
        match &self.base {
            Some(base) => compose_entity_rules([&base.rules(), &self.rules]),
            None => self.rules.clone(),
        }
    }

    fn validate_user(&self, user: &User, checker: &mut Checker<'_>) {
        if let Some(base) = &self.base {
            base.validate_user(user, checker);
        }
    }

    fn validate_application(&self, application: &Application, checker: &mut Checker<'_>) {
        if let Some(base) = &self.base {
            base.validate_application(application, checker);
        }
    }
}
