use super::direct_fields;
use crate::config::{CompileConfig, StructSection};
use crate::error::AppResult;
use crate::hooks::{run_compile, CompileHooks};
use crate::imports::collect_imports;
use crate::ir::StructIr;
use crate::registry::Registry;
use crate::schema::Structure;
use crate::type_mapping::GoTypeMapper;
use std::collections::BTreeMap;

/// Compiles every registered structure, in name order, stopping at the first failure.
pub fn compile_all_structures<H>(
    config: &CompileConfig,
    registry: &Registry,
    hooks: &H,
) -> AppResult<BTreeMap<String, StructIr>>
where
    H: CompileHooks<Structure, StructIr> + ?Sized,
{
    let mut compiled = BTreeMap::new();
    for (name, structure) in registry.all_structures() {
        compiled.insert(name.clone(), compile_structure(config, registry, structure, hooks)?);
    }
    Ok(compiled)
}

/// Compiles one structure. No relations, no identifiers, no methods.
pub fn compile_structure<H>(
    config: &CompileConfig,
    registry: &Registry,
    structure: &Structure,
    hooks: &H,
) -> AppResult<StructIr>
where
    H: CompileHooks<Structure, StructIr> + ?Sized,
{
    run_compile("structure", hooks, config, structure, |config, structure| {
        let casing = config.validate_for(StructSection::Structures)?;
        structure.validate()?;

        let section = &config.structures;
        let mapper = GoTypeMapper::new(registry.all_enums(), &config.enums.namespace);
        let fields = direct_fields(&structure.fields, &mapper, casing)?;

        tracing::info!(structure = %structure.name, fields = fields.len(), "compiled structure");
        Ok(StructIr {
            namespace: section.namespace.clone(),
            name: structure.name.clone(),
            imports: collect_imports(&fields, &section.namespace),
            fields,
            methods: Vec::new(),
        })
    })
}
