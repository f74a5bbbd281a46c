//! # Compile Configuration
//!
//! Per-section output settings (Go package, method receiver, field casing)
//! and their validation.

use crate::casing::Casing;
use crate::error::{AppResult, ConfigError};
use serde::{Deserialize, Serialize};

/// A Go package: its import path and the short name used in qualified references.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    /// Full import path, e.g. `github.com/acme/app/models`.
    pub import_path: String,
    /// Package name, e.g. `models`.
    pub name: String,
}

impl Namespace {
    /// Builds a namespace whose name is the last segment of `import_path`.
    pub fn from_import_path(import_path: impl Into<String>) -> Self {
        let import_path = import_path.into();
        let name = import_path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        Self { import_path, name }
    }

    /// True for the implicit "current package" namespace.
    pub fn is_local(&self) -> bool {
        self.import_path.is_empty()
    }

    fn validate(&self, section: &'static str) -> Result<(), ConfigError> {
        if self.import_path.is_empty() {
            return Err(ConfigError::MissingNamespacePath { section });
        }
        if self.name.is_empty() {
            return Err(ConfigError::MissingNamespaceName { section });
        }
        Ok(())
    }
}

/// Settings for a section that compiles to structs (models, structures, entities).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructSectionConfig {
    /// Target package.
    pub namespace: Namespace,
    /// Receiver variable name for generated methods.
    pub receiver_name: String,
    /// Raw casing value; checked by `validate`.
    #[serde(default)]
    pub field_casing: String,
}

impl StructSectionConfig {
    /// Creates a section config with no serialisation casing.
    pub fn new(import_path: impl Into<String>, receiver_name: impl Into<String>) -> Self {
        Self {
            namespace: Namespace::from_import_path(import_path),
            receiver_name: receiver_name.into(),
            field_casing: String::new(),
        }
    }

    /// Sets the casing value.
    pub fn with_casing(mut self, casing: impl Into<String>) -> Self {
        self.field_casing = casing.into();
        self
    }

    /// Checks the section and returns its parsed casing.
    pub fn validate(&self, section: &'static str) -> Result<Casing, ConfigError> {
        self.namespace.validate(section)?;
        if self.receiver_name.is_empty() {
            return Err(ConfigError::MissingReceiverName { section });
        }
        Casing::parse_for(section, &self.field_casing)
    }
}

/// Settings for the enum section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumSectionConfig {
    /// Target package.
    pub namespace: Namespace,
}

impl EnumSectionConfig {
    /// Creates an enum section config.
    pub fn new(import_path: impl Into<String>) -> Self {
        Self {
            namespace: Namespace::from_import_path(import_path),
        }
    }

    /// Checks the section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.namespace.validate("enums")
    }
}

/// All four sections.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileConfig {
    /// Models section.
    pub models: StructSectionConfig,
    /// Enums section.
    pub enums: EnumSectionConfig,
    /// Structures section.
    pub structures: StructSectionConfig,
    /// Entities section.
    pub entities: StructSectionConfig,
}

/// Which struct section a compile entrypoint targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructSection {
    /// `models`
    Models,
    /// `structures`
    Structures,
    /// `entities`
    Entities,
}

impl StructSection {
    /// Section name as it appears in messages and output directories.
    pub fn as_str(self) -> &'static str {
        match self {
            StructSection::Models => "models",
            StructSection::Structures => "structures",
            StructSection::Entities => "entities",
        }
    }
}

impl CompileConfig {
    /// Decodes a config from its camelCase JSON form.
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The config for one struct section.
    pub fn section(&self, section: StructSection) -> &StructSectionConfig {
        match section {
            StructSection::Models => &self.models,
            StructSection::Structures => &self.structures,
            StructSection::Entities => &self.entities,
        }
    }

    /// Validates `section` plus the enums section it references, returning the section's casing.
    pub fn validate_for(&self, section: StructSection) -> Result<Casing, ConfigError> {
        let casing = self.section(section).validate(section.as_str())?;
        self.enums.validate()?;
        Ok(casing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid() -> CompileConfig {
        CompileConfig {
            models: StructSectionConfig::new("github.com/kalo-build/dummy/models", "m"),
            enums: EnumSectionConfig::new("github.com/kalo-build/dummy/enums"),
            structures: StructSectionConfig::new("github.com/kalo-build/dummy/structures", "s"),
            entities: StructSectionConfig::new("github.com/kalo-build/dummy/entities", "e"),
        }
    }

    #[test]
    fn test_namespace_from_import_path() {
        let ns = Namespace::from_import_path("github.com/kalo-build/dummy/models");
        assert_eq!(ns.name, "models");
        assert_eq!(Namespace::from_import_path("time").name, "time");
        assert_eq!(Namespace::from_import_path("a/b/").name, "b");
        assert!(Namespace::default().is_local());
    }

    #[test]
    fn test_validate_sections() {
        let config = valid();
        assert_eq!(config.validate_for(StructSection::Models).unwrap(), Casing::None);
        assert!(config.validate_for(StructSection::Entities).is_ok());
        assert!(config.enums.validate().is_ok());
    }

    #[test]
    fn test_validate_failures() {
        let mut config = valid();
        config.models.namespace.import_path.clear();
        assert_eq!(
            config.validate_for(StructSection::Models).unwrap_err(),
            ConfigError::MissingNamespacePath { section: "models" }
        );
        // Other sections are unaffected.
        assert!(config.validate_for(StructSection::Structures).is_ok());

        let mut config = valid();
        config.structures.namespace.name.clear();
        assert_eq!(
            config.validate_for(StructSection::Structures).unwrap_err(),
            ConfigError::MissingNamespaceName { section: "structures" }
        );

        let mut config = valid();
        config.entities.receiver_name.clear();
        assert_eq!(
            config.validate_for(StructSection::Entities).unwrap_err(),
            ConfigError::MissingReceiverName { section: "entities" }
        );

        let mut config = valid();
        config.enums.namespace = Namespace::default();
        assert_eq!(
            config.validate_for(StructSection::Models).unwrap_err(),
            ConfigError::MissingNamespacePath { section: "enums" }
        );
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "models": {
                "namespace": {"importPath": "github.com/kalo-build/dummy/models", "name": "models"},
                "receiverName": "m",
                "fieldCasing": "camel"
            },
            "enums": {"namespace": {"importPath": "github.com/kalo-build/dummy/enums", "name": "enums"}},
            "structures": {
                "namespace": {"importPath": "github.com/kalo-build/dummy/structures", "name": "structures"},
                "receiverName": "s"
            },
            "entities": {
                "namespace": {"importPath": "github.com/kalo-build/dummy/entities", "name": "entities"},
                "receiverName": "e"
            }
        }"#;
        let config = CompileConfig::from_json(json).unwrap();
        let mut expected = valid();
        expected.models = expected.models.with_casing("camel");
        assert_eq!(config, expected);

        let round_trip = serde_json::to_string(&config).unwrap();
        assert_eq!(CompileConfig::from_json(&round_trip).unwrap(), config);

        assert!(matches!(
            CompileConfig::from_json("{\"models\": 3}"),
            Err(crate::error::AppError::Json(_))
        ));
    }

    #[test]
    fn test_casing_validation() {
        let mut config = valid();
        config.models = config.models.with_casing("snake");
        assert_eq!(config.validate_for(StructSection::Models).unwrap(), Casing::Snake);

        config.models.field_casing = "kebab".into();
        assert!(matches!(
            config.validate_for(StructSection::Models),
            Err(ConfigError::InvalidCasing { section: "models", .. })
        ));
    }
}
