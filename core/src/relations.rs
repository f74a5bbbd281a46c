#![deny(missing_docs)]

//! # Relation Resolution
//!
//! Turns declared relations into generated fields, and resolves entity
//! field paths (`Root.hop.Terminal`) through the model graph.
//!
//! * Forward polymorphic relations become a `<Rel>Type` / `<Rel>ID` string pair.
//! * Everything else becomes an id field typed after the target's primary
//!   identifier, plus a typed reference field.

use crate::casing::Casing;
use crate::error::{AppError, AppResult, RegistryError, SchemaError};
use crate::ir::{Field, TargetType};
use crate::registry::Registry;
use crate::schema::{Entity, FieldDef, Model, Relation, Relational, PRIMARY_IDENTIFIER};
use crate::tags::build_field_tags;
use crate::type_mapping::TypeMapper;
use std::collections::BTreeMap;

/// The objects a relation may point at, and how their key fields are typed.
pub trait RelationTargets {
    /// Model or entity.
    type Node: Relational;

    /// Looks up a target by name.
    fn get(&self, name: &str) -> Result<&Self::Node, RegistryError>;

    /// Go type of a target's declared field, ignoring attributes.
    fn field_type(&self, field: &FieldDef) -> AppResult<TargetType>;
}

/// Models as relation targets.
pub struct ModelTargets<'a> {
    registry: &'a Registry,
    mapper: &'a dyn TypeMapper,
}

impl<'a> ModelTargets<'a> {
    /// Creates the model view over `registry`.
    pub fn new(registry: &'a Registry, mapper: &'a dyn TypeMapper) -> Self {
        Self { registry, mapper }
    }
}

impl RelationTargets for ModelTargets<'_> {
    type Node = Model;

    fn get(&self, name: &str) -> Result<&Model, RegistryError> {
        self.registry.get_model(name)
    }

    fn field_type(&self, field: &FieldDef) -> AppResult<TargetType> {
        self.mapper.map(&field.type_name, &[])
    }
}

/// Entities as relation targets. Their key fields are typed through the model graph.
pub struct EntityTargets<'a> {
    registry: &'a Registry,
    mapper: &'a dyn TypeMapper,
}

impl<'a> EntityTargets<'a> {
    /// Creates the entity view over `registry`.
    pub fn new(registry: &'a Registry, mapper: &'a dyn TypeMapper) -> Self {
        Self { registry, mapper }
    }
}

impl RelationTargets for EntityTargets<'_> {
    type Node = Entity;

    fn get(&self, name: &str) -> Result<&Entity, RegistryError> {
        self.registry.get_entity(name)
    }

    fn field_type(&self, field: &FieldDef) -> AppResult<TargetType> {
        resolve_field_path(self.registry, self.mapper, &field.type_name, &[])
    }
}

/// Generates relation fields for one owner.
pub struct RelationResolver<'a, T: RelationTargets> {
    targets: &'a T,
    casing: Casing,
}

impl<'a, T: RelationTargets> RelationResolver<'a, T> {
    /// Creates a resolver emitting tags with `casing`.
    pub fn new(targets: &'a T, casing: Casing) -> Self {
        Self { targets, casing }
    }

    /// Fails if a non-polymorphic relation's alias names a missing object.
    ///
    /// Polymorphic aliases are labels, not references, and are skipped.
    pub fn validate_aliases(&self, owner: &str, related: &BTreeMap<String, Relation>) -> AppResult<()> {
        for (name, relation) in related {
            let unaliased = relation.aliased.as_deref().map_or(true, str::is_empty);
            if relation.kind.polymorphic || unaliased {
                continue;
            }
            let target = relation.resolved_target(name);
            if self.targets.get(target).is_err() {
                return Err(SchemaError::UnknownAliasTarget {
                    kind: T::Node::KIND,
                    owner: owner.to_string(),
                    relation: name.clone(),
                    target: target.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Resolves every relation, in relation-name order.
    pub fn resolve_all(&self, related: &BTreeMap<String, Relation>) -> AppResult<Vec<Field>> {
        let mut fields = Vec::new();
        for (name, relation) in related {
            fields.extend(self.resolve(name, relation)?);
        }
        Ok(fields)
    }

    /// Resolves one relation into its generated fields.
    pub fn resolve(&self, name: &str, relation: &Relation) -> AppResult<Vec<Field>> {
        if relation.kind.is_forward_polymorphic() {
            return self.resolve_forward_polymorphic(name, relation);
        }
        if relation.kind.is_reverse_polymorphic() {
            self.check_through(name, relation)?;
        }
        self.resolve_typed(name, relation)
    }

    fn resolve_forward_polymorphic(&self, name: &str, relation: &Relation) -> AppResult<Vec<Field>> {
        if relation.for_targets.is_empty() {
            return Err(SchemaError::MissingPolymorphicTargets {
                kind: T::Node::KIND,
                relation: name.to_string(),
            }
            .into());
        }

        // The concrete target varies at runtime, so no typed reference is emitted.
        let type_field = format!("{}Type", name);
        let id_field = format!("{}ID", name);
        tracing::debug!(relation = name, "resolved forward polymorphic relation");
        Ok(vec![
            self.field(type_field, TargetType::primitive("string")),
            self.field(id_field, TargetType::primitive("string")),
        ])
    }

    fn check_through(&self, name: &str, relation: &Relation) -> AppResult<()> {
        let Some(through) = relation.through.as_deref().filter(|t| !t.is_empty()) else {
            return Ok(());
        };

        let target_name = relation.resolved_target(name);
        let target = self.targets.get(target_name)?;
        let Some(through_relation) = target.related().get(through) else {
            return Err(SchemaError::UnknownThroughRelation {
                kind: T::Node::KIND,
                relation: name.to_string(),
                through: through.to_string(),
                target: target_name.to_string(),
            }
            .into());
        };
        if !through_relation.kind.is_forward_polymorphic() {
            return Err(SchemaError::InvalidThroughRelation {
                relation: name.to_string(),
                through: through.to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn resolve_typed(&self, name: &str, relation: &Relation) -> AppResult<Vec<Field>> {
        let target_name = relation.resolved_target(name);
        let target = self.targets.get(target_name).map_err(|e| {
            AppError::from(e).context(format!(
                "failed to get {} '{}' for relation '{}'",
                T::Node::KIND,
                target_name,
                name
            ))
        })?;

        // 1. Primary key of the target
        let (primary_field, primary_type) = self.primary_key(target)?;

        // 2. Id field and reference field
        let reference = TargetType::local_struct(target.name());
        let plural = if relation.kind.is_many() { "s" } else { "" };
        let id_name = format!("{}{}{}", name, primary_field, plural);
        let ref_name = format!("{}{}", name, plural);
        let (id_type, ref_type) = if relation.kind.is_many() {
            (TargetType::slice(primary_type), TargetType::slice(reference))
        } else {
            (TargetType::pointer(primary_type), TargetType::pointer(reference))
        };

        tracing::debug!(relation = name, target = target_name, kind = %relation.kind, "resolved relation");
        Ok(vec![self.field(id_name, id_type), self.field(ref_name, ref_type)])
    }

    fn primary_key<'n>(&self, target: &'n T::Node) -> AppResult<(&'n str, TargetType)> {
        let kind = T::Node::KIND;
        let identifier = target
            .identifiers()
            .get(PRIMARY_IDENTIFIER)
            .ok_or_else(|| SchemaError::MissingPrimaryIdentifier {
                kind,
                target: target.name().to_string(),
            })?;

        let [field_name] = identifier.fields() else {
            return Err(SchemaError::CompositePrimaryIdentifier {
                kind,
                target: target.name().to_string(),
            }
            .into());
        };

        let field = target
            .fields()
            .get(field_name)
            .ok_or_else(|| SchemaError::MissingPrimaryField {
                kind,
                target: target.name().to_string(),
                field: field_name.clone(),
            })?;

        Ok((field_name.as_str(), self.targets.field_type(field)?))
    }

    fn field(&self, name: String, ty: TargetType) -> Field {
        let tags = build_field_tags(&name, &[], self.casing);
        Field::new(name, ty).with_tags(tags)
    }
}

/// Resolves an entity field path `Root.hop…Terminal` to the terminal field's Go type.
///
/// Interior hops are relation names, followed through their aliases. The
/// terminal type is mapped with `attributes`, so an `optional` entity field
/// becomes a pointer.
pub fn resolve_field_path(
    registry: &Registry,
    mapper: &dyn TypeMapper,
    path: &str,
    attributes: &[String],
) -> AppResult<TargetType> {
    let invalid = |reason: String| -> AppError {
        SchemaError::InvalidFieldPath {
            path: path.to_string(),
            reason,
        }
        .into()
    };

    let segments: Vec<&str> = path.split('.').collect();
    let [root, hops @ .., terminal] = segments.as_slice() else {
        return Err(invalid("is not a valid field type path".to_string()));
    };

    let mut current = registry
        .get_model(root)
        .map_err(|_| invalid(format!("references unknown root model: {}", root)))?;

    for hop in hops {
        let relation = current
            .related
            .get(*hop)
            .ok_or_else(|| invalid(format!("references unknown related model: {}", hop)))?;
        let target = relation.target_name(hop);
        current = registry
            .get_model(target)
            .map_err(|_| invalid(format!("references invalid related model: {}", hop)))?;
    }

    let field = current
        .fields
        .get(*terminal)
        .ok_or_else(|| invalid(format!("references unknown model field: {}", terminal)))?;

    mapper.map(&field.type_name, attributes)
}
