#![deny(missing_docs)]

//! # Schema Registry
//!
//! Holds every model, enum, structure and entity of one schema tree, keyed by
//! name. The compiler only ever reads from it; loading from disk and the
//! `insert_*` builders are the sole writers.

use crate::error::{AppError, AppResult, RegistryError};
use crate::hooks::{run_load, LoadHooks};
use crate::schema::{Entity, Enum, Model, Structure};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// File extensions recognised by `Registry::load_from_dir`.
pub const SCHEMA_EXTENSIONS: &[&str] = &["yaml", "yml", "mod", "enum", "str", "ent"];

/// Name-keyed schema objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    models: BTreeMap<String, Model>,
    enums: BTreeMap<String, Enum>,
    structures: BTreeMap<String, Structure>,
    entities: BTreeMap<String, Entity>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a model.
    pub fn get_model(&self, name: &str) -> Result<&Model, RegistryError> {
        self.models.get(name).ok_or_else(|| RegistryError::NotFound {
            kind: "model",
            name: name.to_string(),
        })
    }

    /// Looks up an entity.
    pub fn get_entity(&self, name: &str) -> Result<&Entity, RegistryError> {
        self.entities.get(name).ok_or_else(|| RegistryError::NotFound {
            kind: "entity",
            name: name.to_string(),
        })
    }

    /// All models.
    pub fn all_models(&self) -> &BTreeMap<String, Model> {
        &self.models
    }

    /// All enums.
    pub fn all_enums(&self) -> &BTreeMap<String, Enum> {
        &self.enums
    }

    /// All structures.
    pub fn all_structures(&self) -> &BTreeMap<String, Structure> {
        &self.structures
    }

    /// All entities.
    pub fn all_entities(&self) -> &BTreeMap<String, Entity> {
        &self.entities
    }

    /// True if at least one model is registered.
    pub fn has_models(&self) -> bool {
        !self.models.is_empty()
    }

    /// True if at least one enum is registered.
    pub fn has_enums(&self) -> bool {
        !self.enums.is_empty()
    }

    /// True if at least one structure is registered.
    pub fn has_structures(&self) -> bool {
        !self.structures.is_empty()
    }

    /// True if at least one entity is registered.
    pub fn has_entities(&self) -> bool {
        !self.entities.is_empty()
    }

    /// Registers a model, replacing any model of the same name.
    pub fn insert_model(mut self, model: Model) -> Self {
        self.models.insert(model.name.clone(), model);
        self
    }

    /// Registers an enum, replacing any enum of the same name.
    pub fn insert_enum(mut self, enum_def: Enum) -> Self {
        self.enums.insert(enum_def.name.clone(), enum_def);
        self
    }

    /// Registers a structure, replacing any structure of the same name.
    pub fn insert_structure(mut self, structure: Structure) -> Self {
        self.structures.insert(structure.name.clone(), structure);
        self
    }

    /// Registers an entity, replacing any entity of the same name.
    pub fn insert_entity(mut self, entity: Entity) -> Self {
        self.entities.insert(entity.name.clone(), entity);
        self
    }

    /// Loads a schema tree.
    ///
    /// Reads `models/`, `enums/`, `structures/` and `entities/` beneath `root`.
    /// A missing section directory is an empty section.
    pub fn load_from_dir(root: impl AsRef<Path>) -> AppResult<Self> {
        let root = root.as_ref();
        let registry = Registry {
            models: load_section(&root.join("models"), "model", |m: &Model| &m.name)?,
            enums: load_section(&root.join("enums"), "enum", |e: &Enum| &e.name)?,
            structures: load_section(&root.join("structures"), "structure", |s: &Structure| {
                &s.name
            })?,
            entities: load_section(&root.join("entities"), "entity", |e: &Entity| &e.name)?,
        };

        tracing::info!(
            root = %root.display(),
            models = registry.models.len(),
            enums = registry.enums.len(),
            structures = registry.structures.len(),
            entities = registry.entities.len(),
            "loaded schema registry"
        );
        Ok(registry)
    }

    /// `load_from_dir` wrapped in load hooks.
    pub fn load_with_hooks<H: LoadHooks + ?Sized>(root: impl AsRef<Path>, hooks: &H) -> AppResult<Self> {
        run_load(hooks, root.as_ref(), |root| Registry::load_from_dir(root))
    }
}

fn load_section<T, F>(dir: &Path, kind: &'static str, name_of: F) -> AppResult<BTreeMap<String, T>>
where
    T: DeserializeOwned,
    F: Fn(&T) -> &String,
{
    let mut section = BTreeMap::new();
    if !dir.is_dir() {
        return Ok(section);
    }

    // Sorted so duplicate reports name the same file on every run.
    let walker = WalkDir::new(dir).sort_by_file_name().into_iter();
    for entry in walker {
        let entry = entry.map_err(|e| AppError::General(e.to_string()))?;
        let path = entry.path();
        let recognised = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| SCHEMA_EXTENSIONS.contains(&ext));
        if !entry.file_type().is_file() || !recognised {
            continue;
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::from(e).context(format!("reading {}", path.display())))?;
        let object: T = serde_yaml::from_str(&content)
            .map_err(|e| AppError::from(e).context(format!("parsing {}", path.display())))?;

        let name = name_of(&object).clone();
        tracing::debug!(kind, name = %name, path = %path.display(), "registered schema object");
        if section.insert(name.clone(), object).is_some() {
            return Err(RegistryError::Duplicate { kind, name }.into());
        }
    }
    Ok(section)
}
