// Rusty Rules - multi-tenant record validation
// Composable rule maps, tenant overlays and struct-level checks over typed records

//! ```
//! use rusty_rules::{NameInitialValidator, TenantId, User, ValidationProvider};
//!
//! let mut provider = ValidationProvider::new();
//! provider.register_tenant(TenantId(1), NameInitialValidator::default()).unwrap();
//!
//! let user = User { first_name: "John".into(), age: 25, ..User::default() };
//! let err = provider.validate(TenantId(1), &user).unwrap_err();
//! assert!(err.violations().unwrap().fields().contains(&"FirstName"));
//! ```

// Rule engine
pub mod directive;
pub mod registry;
pub mod rules;
pub mod schema;
pub mod value;

// Records and reports
pub mod record;
pub mod report;

// Tenants and dispatch
pub mod config;
pub mod defaults;
pub mod error;
pub mod provider;
pub mod tenant;

// Re-export the public surface
pub use config::{Config, Strategy, TenantConfig};
pub use defaults::{application_validation, default_rules, user_validation};
pub use directive::Directive;
pub use error::{RuleError, ValidateError};
pub use provider::ValidationProvider;
pub use record::{
    Account, Address, Applicant, Application, PostalAddress, Record, Sin, User,
};
pub use registry::{CustomValidator, Validators};
pub use report::{Checker, ValidationErrors, Violation};
pub use rules::{compose, compose_entity_rules, EntityRules, RuleBook, RuleSet};
pub use schema::{Entity, Field, Schema};
pub use tenant::{
    decorate, struct_level, AgeBandValidator, NameInitialValidator, OverlayTenant,
    StructLevelFn, TenantId, TenantValidator,
};
pub use value::FieldValue;

// Re-export the field validators
pub use rusty_rules_validation as checks;
