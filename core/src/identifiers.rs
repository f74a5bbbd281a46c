#![deny(missing_docs)]

//! # Identifier Derivation
//!
//! Every identifier of a model or entity becomes a sibling key struct
//! (`<Owner>ID<Ident>`) holding the identifier's fields, plus a getter on the
//! owner (`GetID<Ident>`) that copies those fields out of the receiver.

use crate::casing::to_pascal;
use crate::error::{AppResult, SchemaError};
use crate::imports::collect_imports;
use crate::ir::{MethodIr, StructIr, TargetType};
use crate::schema::Identifier;
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Name of the key struct for `identifier` on `owner`.
pub fn identifier_struct_name(owner: &str, identifier: &str) -> String {
    format!("{}ID{}", owner, to_pascal(identifier))
}

/// Name of the getter for `identifier`.
pub fn identifier_getter_name(identifier: &str) -> String {
    format!("GetID{}", to_pascal(identifier))
}

/// Derives key structs for `identifiers` and appends their getters to `owner`.
///
/// Identifiers are processed in name order; fields keep the identifier's own order.
pub fn derive_identifier_structs(
    kind: &'static str,
    owner: &mut StructIr,
    identifiers: &BTreeMap<String, Identifier>,
    receiver_name: &str,
) -> AppResult<Vec<StructIr>> {
    let mut siblings = Vec::with_capacity(identifiers.len());

    for (ident_name, identifier) in identifiers {
        let mut fields = Vec::with_capacity(identifier.fields().len());
        for field_name in identifier.fields() {
            let field = owner
                .fields
                .iter()
                .find(|f| &f.name == field_name)
                .ok_or_else(|| SchemaError::UnknownIdentifierField {
                    kind,
                    owner: owner.name.clone(),
                    identifier: ident_name.clone(),
                    field: field_name.clone(),
                })?;
            fields.push(field.clone());
        }

        let sibling = StructIr {
            namespace: owner.namespace.clone(),
            name: identifier_struct_name(&owner.name, ident_name),
            imports: collect_imports(&fields, &owner.namespace),
            fields,
            methods: Vec::new(),
        };
        owner.methods.push(getter(owner, ident_name, &sibling, receiver_name));
        siblings.push(sibling);
    }

    Ok(siblings)
}

fn getter(owner: &StructIr, ident_name: &str, sibling: &StructIr, receiver_name: &str) -> MethodIr {
    let mut body = Vec::with_capacity(sibling.fields.len() + 2);
    body.push(format!("\treturn {}{{", sibling.name));
    for field in &sibling.fields {
        body.push(format!("\t\t{}:\t{}.{},", field.name, receiver_name, field.name));
    }
    body.push("\t}".to_string());

    MethodIr {
        receiver_name: receiver_name.to_string(),
        receiver_type: TargetType::StructRef {
            namespace: owner.namespace.clone(),
            name: owner.name.clone(),
        },
        name: identifier_getter_name(ident_name),
        parameters: IndexMap::new(),
        return_types: vec![TargetType::StructRef {
            namespace: owner.namespace.clone(),
            name: sibling.name.clone(),
        }],
        body,
    }
}
