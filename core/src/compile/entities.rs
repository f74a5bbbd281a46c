use crate::casing::Casing;
use crate::config::{CompileConfig, StructSection};
use crate::error::AppResult;
use crate::hooks::{run_compile, CompileHooks};
use crate::identifiers::derive_identifier_structs;
use crate::imports::collect_imports;
use crate::ir::{Field, StructIr};
use crate::registry::Registry;
use crate::relations::{resolve_field_path, EntityTargets, RelationResolver};
use crate::schema::Entity;
use crate::tags::build_field_tags;
use crate::type_mapping::{GoTypeMapper, TypeMapper};
use std::collections::BTreeMap;

/// Compiles every registered entity, in name order, stopping at the first failure.
pub fn compile_all_entities<H>(
    config: &CompileConfig,
    registry: &Registry,
    hooks: &H,
) -> AppResult<BTreeMap<String, Vec<StructIr>>>
where
    H: CompileHooks<Entity, Vec<StructIr>> + ?Sized,
{
    let mut compiled = BTreeMap::new();
    for (name, entity) in registry.all_entities() {
        compiled.insert(name.clone(), compile_entity(config, registry, entity, hooks)?);
    }
    Ok(compiled)
}

/// Compiles one entity into its struct followed by one key struct per identifier.
///
/// Direct fields take the type of the model field their path ends at.
pub fn compile_entity<H>(
    config: &CompileConfig,
    registry: &Registry,
    entity: &Entity,
    hooks: &H,
) -> AppResult<Vec<StructIr>>
where
    H: CompileHooks<Entity, Vec<StructIr>> + ?Sized,
{
    run_compile("entity", hooks, config, entity, |config, entity| {
        entity_structs(config, registry, entity)
    })
}

fn entity_structs(config: &CompileConfig, registry: &Registry, entity: &Entity) -> AppResult<Vec<StructIr>> {
    let casing = config.validate_for(StructSection::Entities)?;
    entity.validate()?;

    let section = &config.entities;
    let mapper = GoTypeMapper::new(registry.all_enums(), &config.enums.namespace);
    let targets = EntityTargets::new(registry, &mapper);
    let resolver = RelationResolver::new(&targets, casing);
    resolver.validate_aliases(&entity.name, &entity.related)?;

    let mut fields = path_fields(registry, &mapper, entity, casing)?;
    fields.extend(resolver.resolve_all(&entity.related)?);

    let mut entity_struct = StructIr {
        namespace: section.namespace.clone(),
        name: entity.name.clone(),
        imports: collect_imports(&fields, &section.namespace),
        fields,
        methods: Vec::new(),
    };

    let identifier_structs = derive_identifier_structs(
        "entity",
        &mut entity_struct,
        &entity.identifiers,
        &section.receiver_name,
    )?;

    tracing::info!(
        entity = %entity.name,
        fields = entity_struct.fields.len(),
        identifiers = identifier_structs.len(),
        "compiled entity"
    );

    let mut all = Vec::with_capacity(identifier_structs.len() + 1);
    all.push(entity_struct);
    all.extend(identifier_structs);
    Ok(all)
}

fn path_fields(
    registry: &Registry,
    mapper: &dyn TypeMapper,
    entity: &Entity,
    casing: Casing,
) -> AppResult<Vec<Field>> {
    entity
        .fields
        .iter()
        .map(|(name, def)| {
            let ty = resolve_field_path(registry, mapper, &def.type_name, &def.attributes)?;
            let tags = build_field_tags(name, &def.attributes, casing);
            Ok(Field::new(name.clone(), ty).with_tags(tags))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::fixtures::{config, registry, rel};
    use crate::error::{AppError, SchemaError};
    use crate::hooks::NoHooks;
    use crate::ir::TargetType;
    use crate::schema::{FieldDef, Identifier};
    use pretty_assertions::assert_eq;

    fn company_entity() -> Entity {
        Entity::new("Company")
            .field("ID", FieldDef::new("Company.ID").with_attribute("immutable"))
            .field("Name", FieldDef::new("Company.Name"))
            .field("TaxID", FieldDef::new("Company.TaxID"))
            .identifier("primary", Identifier::new(["ID"]))
            .relation("Person", rel("HasMany"))
    }

    fn person_entity() -> Entity {
        Entity::new("Person")
            .field("ID", FieldDef::new("Person.ID"))
            .field("Nationality", FieldDef::new("Person.Nationality"))
            .field("CompanyName", FieldDef::new("Person.Company.Name"))
            .identifier("primary", Identifier::new(["ID"]))
    }

    fn with_entities() -> Registry {
        registry()
            .insert_entity(company_entity())
            .insert_entity(person_entity())
    }

    #[test]
    fn test_company_entity() {
        let registry = with_entities();
        let entity = registry.get_entity("Company").unwrap();
        let structs = compile_entity(&config(), &registry, entity, &NoHooks).unwrap();

        let company = &structs[0];
        assert_eq!(company.namespace.name, "entities");
        assert_eq!(
            company.fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            vec!["ID", "Name", "TaxID", "PersonIDs", "Persons"]
        );
        assert_eq!(company.fields[0].ty, TargetType::primitive("uint"));
        assert_eq!(company.fields[0].tags, vec!["morphe:\"immutable\""]);
        assert_eq!(
            company.fields[3].ty,
            TargetType::slice(TargetType::primitive("uint"))
        );
        assert_eq!(company.methods[0].receiver_name, "e");
        assert_eq!(structs[1].name, "CompanyIDPrimary");
    }

    #[test]
    fn test_multi_hop_and_enum_paths() {
        let registry = with_entities();
        let entity = registry.get_entity("Person").unwrap();
        let structs = compile_entity(&config(), &registry, entity, &NoHooks).unwrap();

        let person = &structs[0];
        assert_eq!(
            person.fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            vec!["CompanyName", "ID", "Nationality"]
        );
        assert_eq!(person.fields[0].ty, TargetType::primitive("string"));
        assert!(matches!(person.fields[2].ty, TargetType::Derived { .. }));
        assert_eq!(person.imports, vec!["github.com/kalo-build/dummy/enums"]);
    }

    #[test]
    fn test_bad_path_fails() {
        let registry = with_entities();
        let entity = Entity::new("Broken")
            .field("ID", FieldDef::new("Company.Fax"))
            .identifier("primary", Identifier::new(["ID"]));

        let err = compile_entity(&config(), &registry, &entity, &NoHooks).unwrap_err();
        assert!(matches!(
            err,
            AppError::Schema(SchemaError::InvalidFieldPath { .. })
        ));
    }

    #[test]
    fn test_missing_related_entity() {
        let registry = registry().insert_entity(company_entity());
        let entity = registry.get_entity("Company").unwrap();
        let err = compile_entity(&config(), &registry, entity, &NoHooks).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to get entity 'Person' for relation 'Person': entity not found: Person"
        );
    }

    #[test]
    fn test_entities_config_validated() {
        let registry = with_entities();
        let mut config = config();
        config.entities.receiver_name.clear();
        let entity = registry.get_entity("Company").unwrap();
        let err = compile_entity(&config, &registry, entity, &NoHooks).unwrap_err();
        assert_eq!(err.to_string(), "entities method receiver name cannot be empty");
    }
}
