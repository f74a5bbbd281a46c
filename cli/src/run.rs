#![deny(missing_docs)]

//! # Run
//!
//! Loads the schema tree and compiles it section by section:
//! enums, models, structures, then entities. The first failure stops the
//! run; files already written are left in place.

use std::path::Path;

use structgen_core::config::CompileConfig;
use structgen_core::emit::{EnumFileWriter, GoEnumWriter, GoStructWriter, StructFileWriter};
use structgen_core::{
    compile_all_entities, compile_all_enums, compile_all_models, compile_all_structures, AppResult,
    NoHooks, Registry,
};

use crate::error::CliResult;
use crate::invocation::Invocation;

/// Number of files written per section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Enum files.
    pub enums: usize,
    /// Model files, identifier structs included.
    pub models: usize,
    /// Structure files.
    pub structures: usize,
    /// Entity files, identifier structs included.
    pub entities: usize,
}

/// Validates the invocation and runs the full compile.
pub fn execute(invocation: &Invocation) -> CliResult<RunSummary> {
    invocation.validate()?;

    let config = invocation.compile_config();
    let input = invocation.input_dir();
    let output = invocation.output_dir();
    tracing::info!(input = %input.display(), output = %output.display(), "compiling schema tree");

    let summary = compile_tree(&config, &input, &output)?;
    tracing::info!(
        enums = summary.enums,
        models = summary.models,
        structures = summary.structures,
        entities = summary.entities,
        "compilation completed"
    );
    Ok(summary)
}

fn compile_tree(config: &CompileConfig, input: &Path, output: &Path) -> AppResult<RunSummary> {
    let registry = Registry::load_with_hooks(input, &NoHooks)?;
    let mut summary = RunSummary::default();

    // 1. Enums
    let writer = EnumFileWriter::new(output.join("enums"));
    for ir in compile_all_enums(config, &registry, &NoHooks)?.values() {
        writer.write_enum(ir, &NoHooks)?;
        summary.enums += 1;
    }

    // 2. Models
    let writer = StructFileWriter::new(output.join("models"));
    for ir in compile_all_models(config, &registry, &NoHooks)?.values().flatten() {
        writer.write_struct(ir, &NoHooks)?;
        summary.models += 1;
    }

    // 3. Structures
    let writer = StructFileWriter::new(output.join("structures"));
    for ir in compile_all_structures(config, &registry, &NoHooks)?.values() {
        writer.write_struct(ir, &NoHooks)?;
        summary.structures += 1;
    }

    // 4. Entities project model fields, so they need models to exist.
    if !registry.has_models() {
        tracing::info!("no models registered, skipping entities");
        return Ok(summary);
    }
    let writer = StructFileWriter::new(output.join("entities"));
    for ir in compile_all_entities(config, &registry, &NoHooks)?.values().flatten() {
        writer.write_struct(ir, &NoHooks)?;
        summary.entities += 1;
    }

    Ok(summary)
}
