//! Validation of raw domain directory records.
//!
//! The directory hands back rows as loosely-typed JSON because its live schema
//! is not guaranteed to match any declared one. [`StoreRecord::from_json`] is the
//! one place that shape is checked; everything past it is strongly typed.

use serde_json::{Map, Value};

use super::store::{Store, StoreId, UNNAMED_STORE};

/// The raw record did not have the shape the resolver expects.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The record is not a JSON object.
    #[error("directory record must be an object, got {0}")]
    NotAnObject(&'static str),
    /// A required field is absent or null.
    #[error("directory record is missing `{0}`")]
    MissingField(&'static str),
    /// A field is present with an unsupported type.
    #[error("directory record field `{field}` must be {expected}, got {actual}")]
    InvalidField {
        /// Field name.
        field: &'static str,
        /// Accepted types.
        expected: &'static str,
        /// Observed JSON type.
        actual: &'static str,
    },
}

/// A directory record that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreRecord {
    /// Store identifier (stringified if numeric).
    pub id: StoreId,
    /// Current-schema name column.
    pub store_name: Option<String>,
    /// Legacy name column.
    pub name: Option<String>,
    /// Matched domain.
    pub domain: String,
    /// Creation timestamp, opaque.
    pub created_at: String,
}

impl StoreRecord {
    /// Validate a raw JSON row.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] if the value is not an object, `id` or `domain`
    /// is missing, or a field carries an unsupported type.
    pub fn from_json(value: Value) -> Result<Self, RecordError> {
        let mut fields = match value {
            Value::Object(fields) => fields,
            other => return Err(RecordError::NotAnObject(json_type(&other))),
        };

        let id = match take(&mut fields, "id") {
            Some(Value::String(s)) => StoreId::new(s),
            Some(Value::Number(n)) => StoreId::new(n.to_string()),
            Some(other) => {
                return Err(RecordError::InvalidField {
                    field: "id",
                    expected: "a string or number",
                    actual: json_type(&other),
                });
            }
            None => return Err(RecordError::MissingField("id")),
        };

        let domain = optional_string(&mut fields, "domain")?
            .ok_or(RecordError::MissingField("domain"))?;
        let store_name = optional_string(&mut fields, "store_name")?;
        let name = optional_string(&mut fields, "name")?;

        let created_at = match take(&mut fields, "created_at") {
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        };

        Ok(Self {
            id,
            store_name,
            name,
            domain,
            created_at,
        })
    }

    /// Convert into the public [`Store`] shape.
    #[must_use]
    pub fn into_store(self) -> Store {
        let name = display_name(self.store_name.as_deref(), self.name.as_deref());
        Store {
            id: self.id,
            name,
            domain: self.domain,
            created_at: self.created_at,
        }
    }
}

/// Pick a store's display name across the directory's two naming columns.
///
/// Compatibility shim: stores created before the `store_name` column existed
/// only carry `name`. Prefers `store_name`, then `name`, then [`UNNAMED_STORE`].
/// Empty strings count as absent.
#[must_use]
pub fn display_name(store_name: Option<&str>, name: Option<&str>) -> String {
    store_name
        .filter(|s| !s.is_empty())
        .or_else(|| name.filter(|s| !s.is_empty()))
        .unwrap_or(UNNAMED_STORE)
        .to_owned()
}

/// Remove a field, treating JSON `null` as absent.
fn take(fields: &mut Map<String, Value>, key: &str) -> Option<Value> {
    fields.remove(key).filter(|v| !v.is_null())
}

fn optional_string(
    fields: &mut Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, RecordError> {
    match take(fields, field) {
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(RecordError::InvalidField {
            field,
            expected: "a string",
            actual: json_type(&other),
        }),
        None => Ok(None),
    }
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
