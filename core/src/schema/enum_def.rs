use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Base kind shared by every entry of an enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnumKind {
    /// Whole numbers.
    Integer,
    /// Floating point numbers.
    Float,
    /// Text.
    #[default]
    String,
}

impl Display for EnumKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnumKind::Integer => write!(f, "Integer"),
            EnumKind::Float => write!(f, "Float"),
            EnumKind::String => write!(f, "String"),
        }
    }
}

/// An entry literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    /// Integer literal.
    Integer(i64),
    /// Float literal.
    Float(f64),
    /// String literal.
    String(String),
}

impl EnumValue {
    /// Whether the literal may appear in an enum of `kind`. Integers are valid floats.
    pub fn fits(&self, kind: EnumKind) -> bool {
        matches!(
            (self, kind),
            (EnumValue::Integer(_), EnumKind::Integer | EnumKind::Float)
                | (EnumValue::Float(_), EnumKind::Float)
                | (EnumValue::String(_), EnumKind::String)
        )
    }
}

/// A named set of literal entries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Enum {
    /// Enum name.
    pub name: String,
    /// Base kind.
    #[serde(rename = "type")]
    pub kind: EnumKind,
    /// Entries keyed by entry name.
    #[serde(default)]
    pub entries: BTreeMap<String, EnumValue>,
}

impl Enum {
    /// Creates an enum without entries.
    pub fn new(name: impl Into<String>, kind: EnumKind) -> Self {
        Self {
            name: name.into(),
            kind,
            entries: BTreeMap::new(),
        }
    }

    /// Adds an entry.
    pub fn entry(mut self, key: impl Into<String>, value: EnumValue) -> Self {
        self.entries.insert(key.into(), value);
        self
    }

    /// Structural checks: a name, entries, and literals matching the base kind.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.name.is_empty() {
            return Err(SchemaError::MissingName { kind: "enum" });
        }
        if self.entries.is_empty() {
            return Err(SchemaError::MissingEntries {
                name: self.name.clone(),
            });
        }
        for (key, value) in &self.entries {
            if !value.fits(self.kind) {
                return Err(SchemaError::EnumEntryKindMismatch {
                    name: self.name.clone(),
                    entry: key.clone(),
                    kind: self.kind.to_string(),
                });
            }
        }
        Ok(())
    }
}
