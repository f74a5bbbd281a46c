//! # Intermediate Representation
//!
//! What the compiler produces and the emitter consumes. IR is built fresh per
//! compile call; hooks only ever see clones of it.

use crate::config::Namespace;
use crate::schema::EnumValue;
use indexmap::IndexMap;

mod target_type;

pub use target_type::TargetType;

/// A struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Go field name.
    pub name: String,
    /// Field type.
    pub ty: TargetType,
    /// Tag strings such as `json:"id"`, in emission order.
    pub tags: Vec<String>,
}

impl Field {
    /// A field without tags.
    pub fn new(name: impl Into<String>, ty: TargetType) -> Self {
        Self {
            name: name.into(),
            ty,
            tags: Vec::new(),
        }
    }

    /// Replaces the tags.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// A value-receiver method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodIr {
    /// Receiver variable.
    pub receiver_name: String,
    /// Receiver type.
    pub receiver_type: TargetType,
    /// Method name.
    pub name: String,
    /// Parameters by name, in declaration order.
    pub parameters: IndexMap<String, TargetType>,
    /// Result types.
    pub return_types: Vec<TargetType>,
    /// Body lines, already indented with tabs.
    pub body: Vec<String>,
}

/// A struct declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructIr {
    /// Owning package.
    pub namespace: Namespace,
    /// Type name.
    pub name: String,
    /// Sorted, deduplicated import paths.
    pub imports: Vec<String>,
    /// Fields in emission order.
    pub fields: Vec<Field>,
    /// Methods in emission order.
    pub methods: Vec<MethodIr>,
}

/// A single enum constant.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumEntry {
    /// Constant name (`<Enum><Key>`).
    pub name: String,
    /// Literal value.
    pub value: EnumValue,
}

/// An enum declaration: a derived type plus its constants.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumIr {
    /// Owning package.
    pub namespace: Namespace,
    /// Type name.
    pub name: String,
    /// Always `TargetType::Derived`.
    pub ty: TargetType,
    /// Entries sorted by key.
    pub entries: Vec<EnumEntry>,
}
