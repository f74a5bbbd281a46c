//! # IR Assembly
//!
//! One entrypoint per schema kind. Each validates the config and the object,
//! builds fields, derives identifier structs, collects imports, and runs the
//! whole thing inside the compile hook pipeline.

use crate::casing::Casing;
use crate::error::AppResult;
use crate::ir::Field;
use crate::schema::FieldDef;
use crate::tags::build_field_tags;
use crate::type_mapping::TypeMapper;
use std::collections::BTreeMap;

mod entities;
mod enums;
mod models;
mod structures;

pub use entities::{compile_all_entities, compile_entity};
pub use enums::{compile_all_enums, compile_enum};
pub use models::{compile_all_models, compile_model};
pub use structures::{compile_all_structures, compile_structure};

/// Maps declared fields one to one, in name order.
fn direct_fields(
    fields: &BTreeMap<String, FieldDef>,
    mapper: &dyn TypeMapper,
    casing: Casing,
) -> AppResult<Vec<Field>> {
    fields
        .iter()
        .map(|(name, def)| {
            let ty = mapper.map(&def.type_name, &def.attributes)?;
            let tags = build_field_tags(name, &def.attributes, casing);
            Ok(Field::new(name.clone(), ty).with_tags(tags))
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::config::{CompileConfig, EnumSectionConfig, StructSectionConfig};
    use crate::registry::Registry;
    use crate::schema::{Enum, EnumKind, EnumValue, FieldDef, Identifier, Model, Relation};

    pub fn config() -> CompileConfig {
        CompileConfig {
            models: StructSectionConfig::new("github.com/kalo-build/dummy/models", "m"),
            enums: EnumSectionConfig::new("github.com/kalo-build/dummy/enums"),
            structures: StructSectionConfig::new("github.com/kalo-build/dummy/structures", "s"),
            entities: StructSectionConfig::new("github.com/kalo-build/dummy/entities", "e"),
        }
    }

    pub fn rel(kind: &str) -> Relation {
        Relation::new(kind.parse().unwrap())
    }

    pub fn keyed(name: &str) -> Model {
        Model::new(name)
            .field("ID", FieldDef::new("AutoIncrement"))
            .identifier("primary", Identifier::new(["ID"]))
    }

    /// Company, Person, Contact and Comment, shaped like a small CRM.
    pub fn registry() -> Registry {
        Registry::new()
            .insert_model(
                keyed("Company")
                    .field("ID", FieldDef::new("AutoIncrement").with_attribute("mandatory"))
                    .field("Name", FieldDef::new("String"))
                    .field("TaxID", FieldDef::new("String"))
                    .identifier("name", Identifier::new(["Name"]))
                    .relation("MailingContact", rel("ForOne").aliased("Contact"))
                    .relation("Person", rel("HasMany"))
                    .relation("Note", rel("HasManyPoly").aliased("Comment").through("Commentable")),
            )
            .insert_model(
                keyed("Person")
                    .field("FirstName", FieldDef::new("String"))
                    .field("LastName", FieldDef::new("String"))
                    .field("Nationality", FieldDef::new("Nationality"))
                    .identifier("name", Identifier::new(["FirstName", "LastName"]))
                    .relation("Company", rel("ForOne")),
            )
            .insert_model(
                keyed("Contact")
                    .field("Email", FieldDef::new("String"))
                    .field("Phone", FieldDef::new("String")),
            )
            .insert_model(
                keyed("Comment")
                    .field("Text", FieldDef::new("String"))
                    .relation(
                        "Commentable",
                        rel("ForOnePoly").for_targets(["Company", "Person"]),
                    ),
            )
            .insert_enum(
                Enum::new("Nationality", EnumKind::String)
                    .entry("DE", EnumValue::String("German".into()))
                    .entry("US", EnumValue::String("American".into())),
            )
            .insert_enum(
                Enum::new("UniversalNumber", EnumKind::Float)
                    .entry("Pi", EnumValue::Float(3.1415926535))
                    .entry("Euler", EnumValue::Float(2.7182818285)),
            )
    }
}
