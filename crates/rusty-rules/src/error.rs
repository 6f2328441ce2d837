// File: src/error.rs
// Purpose: Error types for rule compilation and validation dispatch

use crate::report::ValidationErrors;
use crate::tenant::TenantId;

/// Problems with rule maps or the validator registry.
///
/// These are programming errors and surface when rules are compiled,
/// i.e. when a tenant is registered, never during a validation pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("unknown directive `{directive}` on field {field}")]
    UnknownDirective { field: String, directive: String },

    #[error("directive `{directive}` on field {field} requires a parameter")]
    MissingParameter { field: String, directive: String },

    #[error("directive `{directive}` on field {field} has invalid parameter `{param}`")]
    InvalidParameter {
        field: String,
        directive: String,
        param: String,
    },

    #[error("entity {entity} has no field named {field}")]
    UnknownField { entity: String, field: String },

    #[error("no entity named {0}")]
    UnknownEntity(String),

    #[error("`{0}` is a built-in directive and cannot be redefined")]
    ReservedName(String),

    #[error("alias `{0}` expands into itself")]
    RecursiveAlias(String),
}

/// Outcome of a failed validation call.
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    /// The record broke one or more rules.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    /// Nothing is registered for the requested tenant.
    #[error("no validator registered for tenant {0}")]
    UnknownTenant(TenantId),
}

impl ValidateError {
    /// The aggregate of violations, if this is a validation failure.
    pub fn violations(&self) -> Option<&ValidationErrors> {
        match self {
            ValidateError::Invalid(errors) => Some(errors),
            ValidateError::UnknownTenant(_) => None,
        }
    }
}
