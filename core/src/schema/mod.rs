//! # Schema Definitions
//!
//! The declarative inputs the compiler reads: models, entities, enums and
//! structures, as decoded from YAML. All name-keyed collections are
//! `BTreeMap`s, so iterating them always walks names in lexicographic order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

mod entity;
mod enum_def;
mod model;
mod relation;
mod structure;

pub use entity::Entity;
pub use enum_def::{Enum, EnumKind, EnumValue};
pub use model::Model;
pub use relation::{Cardinality, Direction, Relation, RelationKind};
pub use structure::Structure;

/// Attribute marking a field as nullable.
pub const OPTIONAL_ATTRIBUTE: &str = "optional";

/// Name of the identifier relations use to key their targets.
pub const PRIMARY_IDENTIFIER: &str = "primary";

/// A declared field: its type (a primitive or enum name, or a dotted path on
/// entities) and free-form attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldDef {
    /// Declared type.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Attributes in declared order.
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl FieldDef {
    /// Creates a field without attributes.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attributes: Vec::new(),
        }
    }

    /// Appends an attribute.
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    /// True when the field carries the `optional` attribute.
    pub fn is_optional(&self) -> bool {
        self.attributes.iter().any(|a| a == OPTIONAL_ATTRIBUTE)
    }
}

/// A named key: an ordered list of field names.
///
/// YAML may give a single field name or a list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "IdentifierRepr", into = "IdentifierRepr")]
pub struct Identifier {
    fields: Vec<String>,
}

impl Identifier {
    /// Creates an identifier over `fields`, keeping their order.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Field names in declared order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum IdentifierRepr {
    Single(String),
    List(Vec<String>),
}

impl From<IdentifierRepr> for Identifier {
    fn from(repr: IdentifierRepr) -> Self {
        match repr {
            IdentifierRepr::Single(field) => Identifier::new([field]),
            IdentifierRepr::List(fields) => Identifier::new(fields),
        }
    }
}

impl From<Identifier> for IdentifierRepr {
    fn from(identifier: Identifier) -> Self {
        IdentifierRepr::List(identifier.fields)
    }
}

/// A schema object with identifiers and relations: a model or an entity.
pub trait Relational {
    /// Kind name used in messages (`model`, `entity`).
    const KIND: &'static str;

    /// Object name.
    fn name(&self) -> &str;

    /// Declared fields.
    fn fields(&self) -> &BTreeMap<String, FieldDef>;

    /// Declared identifiers.
    fn identifiers(&self) -> &BTreeMap<String, Identifier>;

    /// Declared relations.
    fn related(&self) -> &BTreeMap<String, Relation>;
}

impl Relational for Model {
    const KIND: &'static str = "model";

    fn name(&self) -> &str {
        &self.name
    }

    fn fields(&self) -> &BTreeMap<String, FieldDef> {
        &self.fields
    }

    fn identifiers(&self) -> &BTreeMap<String, Identifier> {
        &self.identifiers
    }

    fn related(&self) -> &BTreeMap<String, Relation> {
        &self.related
    }
}

impl Relational for Entity {
    const KIND: &'static str = "entity";

    fn name(&self) -> &str {
        &self.name
    }

    fn fields(&self) -> &BTreeMap<String, FieldDef> {
        &self.fields
    }

    fn identifiers(&self) -> &BTreeMap<String, Identifier> {
        &self.identifiers
    }

    fn related(&self) -> &BTreeMap<String, Relation> {
        &self.related
    }
}
