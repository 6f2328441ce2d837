// File: src/value.rs
// Purpose: Borrowed view of a single record field, as seen by directives

/// Value of one field handed to the directive engine.
///
/// Records build these from their own typed fields, so the engine never
/// needs to inspect a record's layout at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// `None`, or a nil element inside a collection
    Absent,
    Str(&'a str),
    Int(i64),
    UInt(u64),
    Float(f64),
    /// A nested record that is present
    Record,
    /// Collection elements, each with the key used in its path (`[0]`, `[1111]`)
    Items(Vec<(String, FieldValue<'a>)>),
}

impl<'a> FieldValue<'a> {
    /// Zero value check used by `required` and `omitempty`.
    ///
    /// A present nested record is never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Absent => true,
            FieldValue::Str(s) => s.is_empty(),
            FieldValue::Int(n) => *n == 0,
            FieldValue::UInt(n) => *n == 0,
            FieldValue::Float(n) => *n == 0.0,
            FieldValue::Record => false,
            FieldValue::Items(items) => items.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view used by `min`/`max`: the number itself, or the length
    /// (in characters or items) for strings and collections.
    pub fn magnitude(&self) -> Option<f64> {
        match self {
            FieldValue::Str(s) => Some(rusty_rules_validation::char_len(s) as f64),
            FieldValue::Int(n) => Some(*n as f64),
            FieldValue::UInt(n) => Some(*n as f64),
            FieldValue::Float(n) => Some(*n),
            FieldValue::Items(items) => Some(items.len() as f64),
            FieldValue::Absent | FieldValue::Record => None,
        }
    }

    /// Text form used by `oneof`.
    pub fn to_text(&self) -> Option<String> {
        match self {
            FieldValue::Str(s) => Some((*s).to_string()),
            FieldValue::Int(n) => Some(n.to_string()),
            FieldValue::UInt(n) => Some(n.to_string()),
            FieldValue::Float(n) => Some(n.to_string()),
            FieldValue::Absent | FieldValue::Record | FieldValue::Items(_) => None,
        }
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::Str(value)
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(value: &'a String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<u8> for FieldValue<'_> {
    fn from(value: u8) -> Self {
        FieldValue::UInt(value.into())
    }
}

impl From<i64> for FieldValue<'_> {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<f64> for FieldValue<'_> {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl<'a, T> From<Option<T>> for FieldValue<'a>
where
    T: Into<FieldValue<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Absent, Into::into)
    }
}
