use super::direct_fields;
use crate::config::{CompileConfig, StructSection};
use crate::error::AppResult;
use crate::hooks::{run_compile, CompileHooks};
use crate::identifiers::derive_identifier_structs;
use crate::imports::collect_imports;
use crate::ir::StructIr;
use crate::registry::Registry;
use crate::relations::{ModelTargets, RelationResolver};
use crate::schema::Model;
use crate::type_mapping::GoTypeMapper;
use std::collections::BTreeMap;

/// Compiles every registered model, in name order, stopping at the first failure.
pub fn compile_all_models<H>(
    config: &CompileConfig,
    registry: &Registry,
    hooks: &H,
) -> AppResult<BTreeMap<String, Vec<StructIr>>>
where
    H: CompileHooks<Model, Vec<StructIr>> + ?Sized,
{
    let mut compiled = BTreeMap::new();
    for (name, model) in registry.all_models() {
        compiled.insert(name.clone(), compile_model(config, registry, model, hooks)?);
    }
    Ok(compiled)
}

/// Compiles one model into its struct followed by one key struct per identifier.
pub fn compile_model<H>(
    config: &CompileConfig,
    registry: &Registry,
    model: &Model,
    hooks: &H,
) -> AppResult<Vec<StructIr>>
where
    H: CompileHooks<Model, Vec<StructIr>> + ?Sized,
{
    run_compile("model", hooks, config, model, |config, model| {
        model_structs(config, registry, model)
    })
}

fn model_structs(config: &CompileConfig, registry: &Registry, model: &Model) -> AppResult<Vec<StructIr>> {
    // 1. Validation
    let casing = config.validate_for(StructSection::Models)?;
    model.validate()?;

    let section = &config.models;
    let mapper = GoTypeMapper::new(registry.all_enums(), &config.enums.namespace);
    let targets = ModelTargets::new(registry, &mapper);
    let resolver = RelationResolver::new(&targets, casing);
    resolver.validate_aliases(&model.name, &model.related)?;

    // 2. Direct fields, then related fields
    let mut fields = direct_fields(&model.fields, &mapper, casing)?;
    fields.extend(resolver.resolve_all(&model.related)?);

    let mut model_struct = StructIr {
        namespace: section.namespace.clone(),
        name: model.name.clone(),
        imports: collect_imports(&fields, &section.namespace),
        fields,
        methods: Vec::new(),
    };

    // 3. Identifier structs
    let identifier_structs = derive_identifier_structs(
        "model",
        &mut model_struct,
        &model.identifiers,
        &section.receiver_name,
    )?;

    tracing::info!(
        model = %model.name,
        fields = model_struct.fields.len(),
        identifiers = identifier_structs.len(),
        "compiled model"
    );

    let mut all = Vec::with_capacity(identifier_structs.len() + 1);
    all.push(model_struct);
    all.extend(identifier_structs);
    Ok(all)
}
