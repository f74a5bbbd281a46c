//! # Target Types
//!
//! Closed description of a Go type as referenced from a field, parameter or
//! return position.

use crate::config::Namespace;
use std::collections::BTreeSet;

/// A Go type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetType {
    /// A builtin such as `uint` or `string`.
    Primitive(String),
    /// `*T`
    Pointer(Box<TargetType>),
    /// `[]T` when `length` is `None`, `[N]T` otherwise.
    Array {
        /// Element type.
        element: Box<TargetType>,
        /// Fixed length.
        length: Option<usize>,
    },
    /// `map[K]V`
    Map {
        /// Key type.
        key: Box<TargetType>,
        /// Value type.
        value: Box<TargetType>,
    },
    /// A named struct, possibly in another package.
    StructRef {
        /// Owning package; local when its import path is empty.
        namespace: Namespace,
        /// Type name.
        name: String,
    },
    /// `interface{}` when `name` is `None`, else a named interface.
    InterfaceRef {
        /// Owning package.
        namespace: Namespace,
        /// Interface name.
        name: Option<String>,
    },
    /// A named type declared over a builtin, e.g. an enum.
    Derived {
        /// Owning package.
        namespace: Namespace,
        /// Type name.
        name: String,
        /// Underlying type.
        base: Box<TargetType>,
    },
}

impl TargetType {
    /// A builtin type.
    pub fn primitive(name: impl Into<String>) -> Self {
        TargetType::Primitive(name.into())
    }

    /// `*inner`
    pub fn pointer(inner: TargetType) -> Self {
        TargetType::Pointer(Box::new(inner))
    }

    /// `[]element`
    pub fn slice(element: TargetType) -> Self {
        TargetType::Array {
            element: Box::new(element),
            length: None,
        }
    }

    /// A struct declared in the package being generated.
    pub fn local_struct(name: impl Into<String>) -> Self {
        TargetType::StructRef {
            namespace: Namespace::default(),
            name: name.into(),
        }
    }

    /// `time.Time`
    pub fn time() -> Self {
        TargetType::StructRef {
            namespace: Namespace {
                import_path: "time".to_string(),
                name: "time".to_string(),
            },
            name: "Time".to_string(),
        }
    }

    /// Import paths this type depends on, recursively.
    pub fn imports(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_imports(&mut out);
        out
    }

    fn collect_imports(&self, out: &mut BTreeSet<String>) {
        match self {
            TargetType::Primitive(_) => {}
            TargetType::Pointer(inner) => inner.collect_imports(out),
            TargetType::Array { element, .. } => element.collect_imports(out),
            TargetType::Map { key, value } => {
                key.collect_imports(out);
                value.collect_imports(out);
            }
            TargetType::StructRef { namespace, .. }
            | TargetType::InterfaceRef { namespace, .. }
            | TargetType::Derived { namespace, .. } => {
                if !namespace.is_local() {
                    out.insert(namespace.import_path.clone());
                }
            }
        }
    }

    /// Go syntax as written inside the package `current`.
    pub fn syntax_in(&self, current: &Namespace) -> String {
        match self {
            TargetType::Primitive(name) => name.clone(),
            TargetType::Pointer(inner) => format!("*{}", inner.syntax_in(current)),
            TargetType::Array { element, length } => match length {
                Some(n) => format!("[{}]{}", n, element.syntax_in(current)),
                None => format!("[]{}", element.syntax_in(current)),
            },
            TargetType::Map { key, value } => {
                format!("map[{}]{}", key.syntax_in(current), value.syntax_in(current))
            }
            TargetType::StructRef { namespace, name } | TargetType::Derived { namespace, name, .. } => {
                qualify(namespace, name, current)
            }
            TargetType::InterfaceRef { namespace, name } => match name {
                Some(name) => qualify(namespace, name, current),
                None => "interface{}".to_string(),
            },
        }
    }
}

fn qualify(namespace: &Namespace, name: &str, current: &Namespace) -> String {
    if namespace.is_local() || namespace.import_path == current.import_path {
        name.to_string()
    } else {
        format!("{}.{}", namespace.name, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn models() -> Namespace {
        Namespace::from_import_path("github.com/kalo-build/dummy/models")
    }

    fn nationality() -> TargetType {
        TargetType::Derived {
            namespace: Namespace::from_import_path("github.com/kalo-build/dummy/enums"),
            name: "Nationality".into(),
            base: Box::new(TargetType::primitive("string")),
        }
    }

    #[test]
    fn test_syntax() {
        let current = models();
        let cases = vec![
            (TargetType::pointer(TargetType::primitive("uint")), "*uint"),
            (TargetType::slice(TargetType::local_struct("Person")), "[]Person"),
            (
                TargetType::Array {
                    element: Box::new(TargetType::primitive("byte")),
                    length: Some(16),
                },
                "[16]byte",
            ),
            (
                TargetType::Map {
                    key: Box::new(TargetType::primitive("string")),
                    value: Box::new(TargetType::InterfaceRef {
                        namespace: Namespace::default(),
                        name: None,
                    }),
                },
                "map[string]interface{}",
            ),
            (TargetType::time(), "time.Time"),
            (nationality(), "enums.Nationality"),
            (
                TargetType::StructRef {
                    namespace: models(),
                    name: "CompanyIDPrimary".into(),
                },
                "CompanyIDPrimary",
            ),
        ];

        for (ty, expected) in cases {
            assert_eq!(ty.syntax_in(&current), expected);
        }
    }

    #[test]
    fn test_imports_recurse() {
        let ty = TargetType::Map {
            key: Box::new(TargetType::primitive("string")),
            value: Box::new(TargetType::slice(TargetType::pointer(TargetType::time()))),
        };
        assert_eq!(ty.imports().into_iter().collect::<Vec<_>>(), vec!["time"]);

        assert_eq!(
            nationality().imports().into_iter().collect::<Vec<_>>(),
            vec!["github.com/kalo-build/dummy/enums"]
        );
        assert!(TargetType::local_struct("Person").imports().is_empty());
    }
}
