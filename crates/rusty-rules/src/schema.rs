// File: src/schema.rs
// Purpose: Static field declarations for validated entities

use crate::value::FieldValue;

/// A field of an entity: its identifier (used in rule maps and paths) and
/// its display name (the serialized name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: &'static str,
    pub display: &'static str,
}

impl Field {
    pub const fn new(name: &'static str, display: &'static str) -> Self {
        Self { name, display }
    }

    /// Field whose display name equals its identifier
    pub const fn plain(name: &'static str) -> Self {
        Self {
            name,
            display: name,
        }
    }
}

/// Ordered list of the fields of one entity.
#[derive(Debug, PartialEq, Eq)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A record type that rule maps can be applied to.
pub trait Entity {
    const SCHEMA: &'static Schema;

    /// Current value of the field called `name`.
    ///
    /// Only called with names from [`Entity::SCHEMA`].
    fn value(&self, name: &str) -> FieldValue<'_>;
}
