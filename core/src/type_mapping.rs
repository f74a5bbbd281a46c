#![deny(missing_docs)]

//! # Type Mapping
//!
//! Converts declared schema field types into Go target types.
//! Handles primitives, enum references, and nullability (`optional`).

use crate::config::Namespace;
use crate::error::{AppResult, SchemaError};
use crate::ir::TargetType;
use crate::schema::{Enum, EnumKind, OPTIONAL_ATTRIBUTE};
use std::collections::BTreeMap;

/// Maps a builtin schema type name to its Go type.
pub fn primitive_type(type_name: &str) -> Option<TargetType> {
    let go = match type_name {
        "UUID" | "String" | "Protected" | "Sealed" => "string",
        "AutoIncrement" => "uint",
        "Integer" => "int",
        "Float" => "float64",
        "Boolean" => "bool",
        "Time" | "Date" => return Some(TargetType::time()),
        _ => return None,
    };
    Some(TargetType::primitive(go))
}

/// Go builtin underlying an enum of `kind`.
pub fn enum_base_type(kind: EnumKind) -> TargetType {
    match kind {
        EnumKind::Integer => TargetType::primitive("int"),
        EnumKind::Float => TargetType::primitive("float64"),
        EnumKind::String => TargetType::primitive("string"),
    }
}

/// The derived Go type declared for an enum.
pub fn enum_type(namespace: &Namespace, name: &str, kind: EnumKind) -> TargetType {
    TargetType::Derived {
        namespace: namespace.clone(),
        name: name.to_string(),
        base: Box::new(enum_base_type(kind)),
    }
}

/// Trait for converting declared field types to Go types.
pub trait TypeMapper {
    /// Maps a declared type and its attributes to a Go type.
    fn map(&self, type_name: &str, attributes: &[String]) -> AppResult<TargetType>;

    /// True if `type_name` names a known enum.
    fn is_enum(&self, type_name: &str) -> bool;
}

/// The standard `TypeMapper`: the enum catalog first, then the primitive table.
pub struct GoTypeMapper<'a> {
    enums: &'a BTreeMap<String, Enum>,
    enum_namespace: &'a Namespace,
}

impl<'a> GoTypeMapper<'a> {
    /// Creates a mapper resolving enums from `enums` into `enum_namespace`.
    pub fn new(enums: &'a BTreeMap<String, Enum>, enum_namespace: &'a Namespace) -> Self {
        Self {
            enums,
            enum_namespace,
        }
    }
}

impl TypeMapper for GoTypeMapper<'_> {
    fn map(&self, type_name: &str, attributes: &[String]) -> AppResult<TargetType> {
        // 1. Enum catalog
        let base = match self.enums.get(type_name) {
            Some(enum_def) => enum_type(self.enum_namespace, &enum_def.name, enum_def.kind),
            // 2. Primitive table
            None => primitive_type(type_name)
                .ok_or_else(|| SchemaError::UnsupportedFieldType(type_name.to_string()))?,
        };

        // 3. Nullability
        if attributes.iter().any(|a| a == OPTIONAL_ATTRIBUTE) {
            return Ok(TargetType::pointer(base));
        }
        Ok(base)
    }

    fn is_enum(&self, type_name: &str) -> bool {
        self.enums.contains_key(type_name)
    }
}
