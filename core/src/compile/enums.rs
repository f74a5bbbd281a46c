use crate::config::CompileConfig;
use crate::error::AppResult;
use crate::hooks::{run_compile, CompileHooks};
use crate::ir::{EnumEntry, EnumIr};
use crate::registry::Registry;
use crate::schema::Enum;
use crate::type_mapping::enum_type;
use std::collections::BTreeMap;

/// Compiles every registered enum, in name order, stopping at the first failure.
pub fn compile_all_enums<H>(
    config: &CompileConfig,
    registry: &Registry,
    hooks: &H,
) -> AppResult<BTreeMap<String, EnumIr>>
where
    H: CompileHooks<Enum, EnumIr> + ?Sized,
{
    let mut compiled = BTreeMap::new();
    for (name, enum_def) in registry.all_enums() {
        compiled.insert(name.clone(), compile_enum(config, enum_def, hooks)?);
    }
    Ok(compiled)
}

/// Compiles one enum into a derived type and its constants, sorted by entry key.
pub fn compile_enum<H>(config: &CompileConfig, enum_def: &Enum, hooks: &H) -> AppResult<EnumIr>
where
    H: CompileHooks<Enum, EnumIr> + ?Sized,
{
    run_compile("enum", hooks, config, enum_def, |config, enum_def| {
        config.enums.validate()?;
        enum_def.validate()?;

        let namespace = &config.enums.namespace;
        let entries = enum_def
            .entries
            .iter()
            .map(|(key, value)| EnumEntry {
                name: format!("{}{}", enum_def.name, key),
                value: value.clone(),
            })
            .collect::<Vec<_>>();

        tracing::info!(enum_name = %enum_def.name, entries = entries.len(), "compiled enum");
        Ok(EnumIr {
            namespace: namespace.clone(),
            name: enum_def.name.clone(),
            ty: enum_type(namespace, &enum_def.name, enum_def.kind),
            entries,
        })
    })
}
