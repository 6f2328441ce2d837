// File: src/provider.rs
// Purpose: Tenant registry and validation dispatch

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::Config;
use crate::defaults::{application_validation, default_rules, user_validation};
use crate::error::{RuleError, ValidateError};
use crate::record::{Application, Record, User};
use crate::registry::Validators;
use crate::report::{Checker, ValidationErrors, Violation};
use crate::rules::{compose_entity_rules, EntityRules, RuleBook};
use crate::tenant::{decorate, struct_level, StructLevelFn, TenantId, TenantValidator};

/// Everything needed to validate records for one tenant, built at registration.
struct TenantEntry {
    name: String,
    rules: RuleBook,
    validators: Validators,
    user: StructLevelFn<User>,
    application: StructLevelFn<Application>,
}

/// Validates records on behalf of registered tenants.
///
/// Every tenant shares the default rules and struct-level checks; its own
/// rule maps are composed after the defaults and its struct-level checks run
/// after the default ones. Tenants are registered up front and the provider
/// is read-only afterwards, so it can be shared across threads.
pub struct ValidationProvider {
    validators: Validators,
    defaults: EntityRules,
    tenants: HashMap<TenantId, TenantEntry>,
}

impl Default for ValidationProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationProvider {
    /// Provider with the built-in default rules and validator registry
    pub fn new() -> Self {
        Self {
            validators: Validators::default(),
            defaults: default_rules(),
            tenants: HashMap::new(),
        }
    }

    /// Replaces the validator registry for tenants registered later.
    ///
    /// Each tenant keeps the registry it was compiled against.
    pub fn with_validators(mut self, validators: Validators) -> Self {
        self.validators = validators;
        self
    }

    /// Composes `rules` after the current defaults for tenants registered later.
    pub fn with_default_rules(mut self, rules: &EntityRules) -> Self {
        self.defaults = compose_entity_rules([&self.defaults, rules]);
        self
    }

    /// Builds a provider from a loaded [`Config`], registering every tenant
    /// in order. A later entry with an already used id replaces the earlier one.
    pub fn from_config(config: &Config) -> Result<Self, RuleError> {
        let mut provider = Self::new().with_default_rules(&config.defaults);

        // Surface broken default overlays even when no tenant is configured
        RuleBook::compile(&provider.defaults, &provider.validators)?;

        for tenant in &config.tenants {
            provider.register_tenant(tenant.id, tenant.build())?;
        }
        Ok(provider)
    }

    /// Registers `tenant` under `id`, compiling its composed rule maps.
    ///
    /// Fails when the composed rules reference unknown entities, fields or
    /// directives. Registering an id twice replaces the earlier tenant.
    pub fn register_tenant(
        &mut self,
        id: TenantId,
        tenant: impl TenantValidator + 'static,
    ) -> Result<(), RuleError> {
        let tenant: Arc<dyn TenantValidator> = Arc::new(tenant);

        let composed = compose_entity_rules([&self.defaults, &tenant.rules()]);
        let rules = RuleBook::compile(&composed, &self.validators)?;

        let user = {
            let tenant = Arc::clone(&tenant);
            decorate([
                struct_level::<User, _>(user_validation),
                struct_level(move |user: &User, c| tenant.validate_user(user, c)),
            ])
        };
        let application = {
            let tenant = Arc::clone(&tenant);
            decorate([
                struct_level::<Application, _>(application_validation),
                struct_level(move |application: &Application, c| {
                    tenant.validate_application(application, c)
                }),
            ])
        };

        let entry = TenantEntry {
            name: tenant.name().to_string(),
            rules,
            validators: self.validators.clone(),
            user,
            application,
        };

        tracing::debug!("Registered tenant {} ({})", id, entry.name);
        if let Some(previous) = self.tenants.insert(id, entry) {
            tracing::warn!("Tenant {} ({}) was replaced", id, previous.name);
        }
        Ok(())
    }

    /// Registered tenant ids, sorted
    pub fn tenant_ids(&self) -> Vec<TenantId> {
        let mut ids: Vec<TenantId> = self.tenants.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Runs every check for `tenant` and returns all violations found.
    ///
    /// An empty list means the record is valid.
    pub fn violations<'r>(
        &self,
        tenant: TenantId,
        record: impl Into<Record<'r>>,
    ) -> Result<Vec<Violation>, ValidateError> {
        let record = record.into();
        let Some(entry) = self.tenants.get(&tenant) else {
            tracing::warn!("No validator registered for tenant {}", tenant);
            return Err(ValidateError::UnknownTenant(tenant));
        };

        let mut checker = Checker::new(&entry.validators, &entry.rules, record.entity_name());
        match record {
            Record::User(user) => (entry.user)(user, &mut checker),
            Record::Application(application) => (entry.application)(application, &mut checker),
        }

        let violations = checker.into_violations();
        tracing::debug!(
            "Validated {} for tenant {}: {} violation(s)",
            record.entity_name(),
            tenant,
            violations.len()
        );
        Ok(violations)
    }

    /// Validates `record` for `tenant`.
    ///
    /// Returns [`ValidateError::Invalid`] carrying every violation, or
    /// [`ValidateError::UnknownTenant`] when nothing is registered for `tenant`.
    pub fn validate<'r>(
        &self,
        tenant: TenantId,
        record: impl Into<Record<'r>>,
    ) -> Result<(), ValidateError> {
        let violations = self.violations(tenant, record)?;
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors::new(violations).into())
        }
    }

    pub fn validate_user(&self, tenant: TenantId, user: &User) -> Result<(), ValidateError> {
        self.validate(tenant, user)
    }

    pub fn validate_application(
        &self,
        tenant: TenantId,
        application: &Application,
    ) -> Result<(), ValidateError> {
        self.validate(tenant, application)
    }
}

impl fmt::Debug for ValidationProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tenants: Vec<(TenantId, &str)> = self
            .tenant_ids()
            .into_iter()
            .filter_map(|id| self.tenants.get(&id).map(|e| (id, e.name.as_str())))
            .collect();
        f.debug_struct("ValidationProvider")
            .field("validators", &self.validators)
            .field("defaults", &self.defaults)
            .field("tenants", &tenants)
            .finish()
    }
}
