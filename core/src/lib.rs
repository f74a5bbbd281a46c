#![deny(missing_docs)]

//! # Structgen Core
//!
//! Compiles a registry of morphe schema definitions (models, entities,
//! enums, structures) into Go struct declarations.

/// Shared error types.
pub mod error;

/// Field-name casing conventions.
pub mod casing;

/// Per-section compile configuration.
pub mod config;

/// Schema definitions decoded from YAML.
pub mod schema;

/// Name-keyed schema catalog.
pub mod registry;

/// Intermediate representation of generated Go code.
pub mod ir;

/// Type mapping logic (morphe -> Go).
pub mod type_mapping;

/// Struct tag construction.
pub mod tags;

/// Relation field resolution.
pub mod relations;

/// Identifier sibling structs and getters.
pub mod identifiers;

/// Import collection.
pub mod imports;

/// Compile and write hook pipeline.
pub mod hooks;

/// Compile entrypoints per schema kind.
pub mod compile;

/// Go rendering, formatting and file writing.
pub mod emit;

pub use casing::Casing;
pub use compile::{
    compile_all_entities, compile_all_enums, compile_all_models, compile_all_structures,
    compile_entity, compile_enum, compile_model, compile_structure,
};
pub use config::{CompileConfig, EnumSectionConfig, Namespace, StructSectionConfig};
pub use emit::{
    format_go_source, render_enum, render_struct, EnumFileWriter, GoEnumWriter, GoStructWriter,
    StructFileWriter,
};
pub use error::{AppError, AppResult};
pub use hooks::{CompileHooks, LoadHooks, NoHooks, WriteHooks};
pub use ir::{EnumIr, Field, MethodIr, StructIr, TargetType};
pub use registry::Registry;
pub use schema::{Entity, Enum, Model, Structure};
pub use type_mapping::{GoTypeMapper, TypeMapper};
