//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace, plus the
//! per-concern taxonomies it wraps (configuration, schema, registry, hooks,
//! emission).

use derive_more::{Display, From};

/// Invalid or incomplete compile configuration.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ConfigError {
    /// A section has no namespace import path.
    #[display("{section} package path cannot be empty")]
    MissingNamespacePath {
        /// Config section (`models`, `enums`, ...).
        section: &'static str,
    },

    /// A section has no namespace short name.
    #[display("{section} package name cannot be empty")]
    MissingNamespaceName {
        /// Config section.
        section: &'static str,
    },

    /// A struct section has no method receiver name.
    #[display("{section} method receiver name cannot be empty")]
    MissingReceiverName {
        /// Config section.
        section: &'static str,
    },

    /// The field casing is not one of the supported values.
    #[display(
        "{section}: invalid fieldCasing value {value:?}, must be one of: camel, snake, pascal, or empty"
    )]
    InvalidCasing {
        /// Config section.
        section: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// A schema object that cannot be compiled as declared.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SchemaError {
    /// The object has an empty name.
    #[display("morphe {kind} has no name")]
    MissingName {
        /// Object kind (`model`, `entity`, `enum`, `structure`).
        kind: &'static str,
    },

    /// The object declares no fields.
    #[display("morphe {kind} has no fields")]
    MissingFields {
        /// Object kind.
        kind: &'static str,
    },

    /// A model or entity declares no identifiers.
    #[display("morphe {kind} has no identifiers")]
    MissingIdentifiers {
        /// Object kind.
        kind: &'static str,
    },

    /// An enum declares no entries.
    #[display("morphe enum {name} has no entries")]
    MissingEntries {
        /// Enum name.
        name: String,
    },

    /// An enum entry's literal does not match the enum's base kind.
    #[display("morphe enum {name} entry {entry} is not of type {kind}")]
    EnumEntryKindMismatch {
        /// Enum name.
        name: String,
        /// Entry key.
        entry: String,
        /// Declared base kind.
        kind: String,
    },

    /// A declared field type has no target mapping.
    #[display("unsupported morphe field type for go conversion: '{_0}'")]
    UnsupportedFieldType(String),

    /// An identifier lists a field the object does not have.
    #[display("morphe {kind} '{owner}' identifier {identifier} references unknown field: {field}")]
    UnknownIdentifierField {
        /// Object kind.
        kind: &'static str,
        /// Owning object name.
        owner: String,
        /// Identifier name.
        identifier: String,
        /// Missing field name.
        field: String,
    },

    /// An aliased relation points at an object the registry does not hold.
    #[display("aliased target {kind} '{target}' for relation '{relation}' in {kind} '{owner}' not found")]
    UnknownAliasTarget {
        /// Object kind.
        kind: &'static str,
        /// Owning object name.
        owner: String,
        /// Relation name.
        relation: String,
        /// Resolved target name.
        target: String,
    },

    /// A forward polymorphic relation has an empty `for` set.
    #[display("polymorphic relation '{relation}' must have at least one {kind} in 'for' property")]
    MissingPolymorphicTargets {
        /// Object kind of the targets.
        kind: &'static str,
        /// Relation name.
        relation: String,
    },

    /// A `through` reference does not name a relation on the target.
    #[display("polymorphic relation '{relation}' has invalid 'through' property: relation '{through}' not found on {kind} '{target}'")]
    UnknownThroughRelation {
        /// Object kind.
        kind: &'static str,
        /// Relation name.
        relation: String,
        /// Through name.
        through: String,
        /// Target object name.
        target: String,
    },

    /// A `through` reference names a relation that is not forward polymorphic.
    #[display("polymorphic relation '{relation}' has invalid 'through' property: relation '{through}' must be a polymorphic For* relationship")]
    InvalidThroughRelation {
        /// Relation name.
        relation: String,
        /// Through name.
        through: String,
    },

    /// The target's `primary` identifier is missing.
    #[display("related {kind} {target} has no primary identifier")]
    MissingPrimaryIdentifier {
        /// Object kind.
        kind: &'static str,
        /// Target object name.
        target: String,
    },

    /// The target's `primary` identifier is not a single field.
    #[display("related {kind} {target} primary identifier must have exactly one field")]
    CompositePrimaryIdentifier {
        /// Object kind.
        kind: &'static str,
        /// Target object name.
        target: String,
    },

    /// The target's `primary` identifier names a field it does not have.
    #[display("related {kind} {target} primary identifier field {field} not found")]
    MissingPrimaryField {
        /// Object kind.
        kind: &'static str,
        /// Target object name.
        target: String,
        /// Field name.
        field: String,
    },

    /// A relation kind string could not be decoded.
    #[display("unknown relation type: {_0}")]
    UnknownRelationKind(String),

    /// An entity field type path is malformed or does not resolve.
    #[display("morphe entity field {path} {reason}")]
    InvalidFieldPath {
        /// The declared dotted path.
        path: String,
        /// What went wrong.
        reason: String,
    },
}

/// Lookup failures against the schema registry.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum RegistryError {
    /// No object of that kind and name is registered.
    #[display("{kind} not found: {name}")]
    NotFound {
        /// Object kind.
        kind: &'static str,
        /// Requested name.
        name: String,
    },

    /// Two sources declare the same object.
    #[display("duplicate {kind} definition: {name}")]
    Duplicate {
        /// Object kind.
        kind: &'static str,
        /// Duplicated name.
        name: String,
    },
}

/// Errors raised by, or about, extension hooks.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum HookError {
    /// A hook rejected its input.
    #[display("{_0}")]
    Rejected(String),

    /// A success hook handed back nothing where output was expected.
    #[display("{stage} hook returned no output")]
    EmptyOutput {
        /// The pipeline stage name.
        stage: &'static str,
    },
}

/// Rendering and formatting failures in the Go emitter.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum EmitError {
    /// The source text is not well formed.
    #[display("go source does not format cleanly (line {line}): {reason}")]
    Format {
        /// 1-based line number.
        line: usize,
        /// What is wrong.
        reason: String,
    },

    /// A name cannot be used as a Go identifier.
    #[display("invalid go identifier: {_0:?}")]
    InvalidIdentifier(String),
}

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Configuration validation failure.
    #[display("{_0}")]
    Config(ConfigError),

    /// Schema object failure.
    #[display("{_0}")]
    Schema(SchemaError),

    /// Registry lookup failure.
    #[display("{_0}")]
    Registry(RegistryError),

    /// Hook failure.
    #[display("{_0}")]
    Hook(HookError),

    /// Emitter failure.
    #[display("{_0}")]
    Emit(EmitError),

    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Wrapper for YAML decoding errors.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// Wrapper for JSON decoding errors.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// An error with a leading description.
    #[from(ignore)]
    #[display("{context}: {source}")]
    Context {
        /// What was being done.
        context: String,
        /// The underlying error.
        source: Box<AppError>,
    },

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

impl AppError {
    /// Wraps `self` with a leading description.
    pub fn context(self, context: impl Into<String>) -> Self {
        AppError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Builds the error a hook returns to reject its input.
    pub fn hook(message: impl Into<String>) -> Self {
        AppError::Hook(HookError::Rejected(message.into()))
    }

    /// Returns the innermost error beneath any `Context` layers.
    pub fn root(&self) -> &AppError {
        match self {
            AppError::Context { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(e) => Some(e),
            AppError::Yaml(e) => Some(e),
            AppError::Json(e) => Some(e),
            AppError::Context { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
