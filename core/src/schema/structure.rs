use super::FieldDef;
use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A reusable bag of fields with no relations or identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Structure {
    /// Structure name.
    pub name: String,
    /// Fields keyed by name.
    #[serde(default)]
    pub fields: BTreeMap<String, FieldDef>,
}

impl Structure {
    /// Creates an empty structure.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Adds a field.
    pub fn field(mut self, name: impl Into<String>, field: FieldDef) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    /// Structural checks: a name and at least one field.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.name.is_empty() {
            return Err(SchemaError::MissingName { kind: "structure" });
        }
        if self.fields.is_empty() {
            return Err(SchemaError::MissingFields { kind: "structure" });
        }
        Ok(())
    }
}
