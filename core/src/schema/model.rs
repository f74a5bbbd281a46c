use super::{FieldDef, Identifier, Relation};
use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A persisted shape: fields, identifiers and relations to other models.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Model {
    /// Model name.
    pub name: String,
    /// Fields keyed by name; each declares a primitive or enum type.
    #[serde(default)]
    pub fields: BTreeMap<String, FieldDef>,
    /// Identifiers keyed by name.
    #[serde(default)]
    pub identifiers: BTreeMap<String, Identifier>,
    /// Relations keyed by name.
    #[serde(default)]
    pub related: BTreeMap<String, Relation>,
}

impl Model {
    /// Creates an empty model.
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

    /// Structural checks: a name, at least one field and at least one identifier.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.name.is_empty() {
            return Err(SchemaError::MissingName { kind: "model" });
        }
        if self.fields.is_empty() {
            return Err(SchemaError::MissingFields { kind: "model" });
        }
        if self.identifiers.is_empty() {
            return Err(SchemaError::MissingIdentifiers { kind: "model" });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_model_yaml() {
        let yaml = r#"
name: Company
fields:
  ID:
    type: AutoIncrement
    attributes:
      - mandatory
  Name:
    type: String
identifiers:
  primary: ID
related:
  Person:
    type: HasMany
  MailingContact:
    type: ForOne
    aliased: Contact
"#;
        let model: Model = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(model.name, "Company");
        assert_eq!(model.fields["ID"].attributes, vec!["mandatory"]);
        assert_eq!(
            model.related.keys().collect::<Vec<_>>(),
            vec!["MailingContact", "Person"]
        );
        assert_eq!(model.related["MailingContact"].aliased.as_deref(), Some("Contact"));
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            Model::default().validate(),
            Err(SchemaError::MissingName { kind: "model" })
        );
        assert_eq!(
            Model::new("Basic").validate(),
            Err(SchemaError::MissingFields { kind: "model" })
        );
        assert_eq!(
            Model::new("Basic")
                .field("ID", FieldDef::new("AutoIncrement"))
                .validate(),
            Err(SchemaError::MissingIdentifiers { kind: "model" })
        );
    }
}
