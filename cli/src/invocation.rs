#![deny(missing_docs)]

//! # Invocation
//!
//! The single JSON argument the binary is called with, and its conversion
//! into a core `CompileConfig`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use structgen_core::config::{CompileConfig, EnumSectionConfig, StructSectionConfig};

use crate::error::{CliError, CliResult};

/// Default receiver for model methods.
pub const DEFAULT_MODEL_RECEIVER: &str = "m";
/// Default receiver for structure methods.
pub const DEFAULT_STRUCTURE_RECEIVER: &str = "s";
/// Default receiver for entity methods.
pub const DEFAULT_ENTITY_RECEIVER: &str = "e";

/// Top-level invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invocation {
    /// Schema tree root.
    #[serde(default)]
    pub input_path: String,
    /// Output root; sections are written beneath it.
    #[serde(default)]
    pub output_path: String,
    /// Per-section settings.
    #[serde(default)]
    pub config: InvocationConfig,
    /// Raises the default log level to `info`.
    #[serde(default)]
    pub verbose: bool,
}

/// The `config` object of an invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvocationConfig {
    /// Casing of `json` tags for every struct section.
    #[serde(rename = "fieldCasing", default)]
    pub field_casing: String,
    /// Models section.
    #[serde(default)]
    pub models: StructEntry,
    /// Enums section.
    #[serde(default)]
    pub enums: EnumEntry,
    /// Structures section.
    #[serde(default)]
    pub structures: StructEntry,
    /// Entities section.
    #[serde(default)]
    pub entities: StructEntry,
}

/// A struct section entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructEntry {
    /// Go import path of the generated package.
    #[serde(rename = "PackagePath", default)]
    pub package_path: String,
    /// Method receiver; a per-section default applies when empty.
    #[serde(rename = "ReceiverName", default)]
    pub receiver_name: String,
}

/// The enums section entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnumEntry {
    /// Go import path of the generated package.
    #[serde(rename = "PackagePath", default)]
    pub package_path: String,
}

impl Invocation {
    /// Parses the raw argument.
    pub fn parse(raw: &str) -> CliResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Checks mandatory paths in the order they are reported.
    pub fn validate(&self) -> CliResult<()> {
        if self.input_path.is_empty() {
            return Err(CliError::MissingInputPath);
        }
        if self.output_path.is_empty() {
            return Err(CliError::MissingOutputPath);
        }

        let sections = [
            ("Models", &self.config.models.package_path),
            ("Enums", &self.config.enums.package_path),
            ("Structures", &self.config.structures.package_path),
            ("Entities", &self.config.entities.package_path),
        ];
        for (section, path) in sections {
            if path.is_empty() {
                return Err(CliError::MissingPackagePath { section });
            }
        }
        Ok(())
    }

    /// Schema tree root.
    pub fn input_dir(&self) -> PathBuf {
        PathBuf::from(&self.input_path)
    }

    /// Output root.
    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.output_path)
    }

    /// Builds the core config. Field casing is copied into every struct section.
    pub fn compile_config(&self) -> CompileConfig {
        let casing = &self.config.field_casing;
        CompileConfig {
            models: struct_section(&self.config.models, DEFAULT_MODEL_RECEIVER, casing),
            enums: EnumSectionConfig::new(self.config.enums.package_path.clone()),
            structures: struct_section(&self.config.structures, DEFAULT_STRUCTURE_RECEIVER, casing),
            entities: struct_section(&self.config.entities, DEFAULT_ENTITY_RECEIVER, casing),
        }
    }
}

fn struct_section(entry: &StructEntry, default_receiver: &str, casing: &str) -> StructSectionConfig {
    let receiver = if entry.receiver_name.is_empty() {
        default_receiver
    } else {
        entry.receiver_name.as_str()
    };
    StructSectionConfig::new(entry.package_path.clone(), receiver).with_casing(casing)
}
