use super::{FieldDef, Identifier, Relation};
use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A composite view assembled from model fields.
///
/// Field types are dotted paths (`Root.hop.Terminal`) into the model graph;
/// relations link to other entities.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Entity {
    /// Entity name.
    pub name: String,
    /// Fields keyed by name; `type_name` is a model field path.
    #[serde(default)]
    pub fields: BTreeMap<String, FieldDef>,
    /// Identifiers keyed by name.
    #[serde(default)]
    pub identifiers: BTreeMap<String, Identifier>,
    /// Relations to other entities, keyed by name.
    #[serde(default)]
    pub related: BTreeMap<String, Relation>,
}

impl Entity {
    /// Creates an empty entity.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a field.
    pub fn field(mut self, name: impl Into<String>, field: FieldDef) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    /// Adds an identifier.
    pub fn identifier(mut self, name: impl Into<String>, identifier: Identifier) -> Self {
        self.identifiers.insert(name.into(), identifier);
        self
    }

    /// Adds a relation.
    pub fn relation(mut self, name: impl Into<String>, relation: Relation) -> Self {
        self.related.insert(name.into(), relation);
        self
    }

    /// Structural checks, as for models.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.name.is_empty() {
            return Err(SchemaError::MissingName { kind: "entity" });
        }
        if self.fields.is_empty() {
            return Err(SchemaError::MissingFields { kind: "entity" });
        }
        if self.identifiers.is_empty() {
            return Err(SchemaError::MissingIdentifiers { kind: "entity" });
        }
        Ok(())
    }
}
