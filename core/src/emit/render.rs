//! # Go Rendering
//!
//! Turns IR into Go source text with tab-separated cells, ready for
//! `format_go_source`.

use super::format::{check_identifier, format_go_source};
use crate::error::EmitError;
use crate::ir::{EnumIr, MethodIr, StructIr, TargetType};
use crate::schema::EnumValue;
use std::fmt::Write;

/// Renders a struct file: package clause, imports, declaration, methods.
pub fn render_struct(ir: &StructIr) -> Result<String, EmitError> {
    check_identifier(&ir.name)?;
    let ns = &ir.namespace;

    let mut src = String::new();
    push_header(&mut src, &ns.name, &ir.imports);

    src.push_str(&format!("type {} struct {{\n", ir.name));
    for field in &ir.fields {
        check_identifier(&field.name)?;
        src.push_str(&format!("\t{}\t{}", field.name, field.ty.syntax_in(ns)));
        if !field.tags.is_empty() {
            src.push_str(&format!("\t`{}`", field.tags.join(" ")));
        }
        src.push('\n');
    }
    src.push_str("}\n");

    for method in &ir.methods {
        src.push('\n');
        render_method(&mut src, method, ir)?;
    }

    format_go_source(&src)
}

fn render_method(src: &mut String, method: &MethodIr, owner: &StructIr) -> Result<(), EmitError> {
    check_identifier(&method.name)?;
    check_identifier(&method.receiver_name)?;
    let ns = &owner.namespace;

    let params = method
        .parameters
        .iter()
        .map(|(name, ty)| format!("{} {}", name, ty.syntax_in(ns)))
        .collect::<Vec<_>>()
        .join(", ");
    let returns = match method.return_types.as_slice() {
        [] => String::new(),
        [single] => format!(" {}", single.syntax_in(ns)),
        many => format!(
            " ({})",
            many.iter()
                .map(|t| t.syntax_in(ns))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    };

    src.push_str(&format!(
        "func ({} {}) {}({}){} {{\n",
        method.receiver_name,
        method.receiver_type.syntax_in(ns),
        method.name,
        params,
        returns
    ));
    for line in &method.body {
        src.push_str(line);
        src.push('\n');
    }
    src.push_str("}\n");
    Ok(())
}

/// Renders an enum file: package clause, derived type, `const` block.
pub fn render_enum(ir: &EnumIr) -> Result<String, EmitError> {
    check_identifier(&ir.name)?;
    let ns = &ir.namespace;

    let base = match &ir.ty {
        TargetType::Derived { base, .. } => base.syntax_in(ns),
        other => other.syntax_in(ns),
    };

    let mut src = String::new();
    push_header(&mut src, &ns.name, &[]);
    src.push_str(&format!("type {} {}\n", ir.name, base));

    if !ir.entries.is_empty() {
        src.push_str("\nconst (\n");
        for entry in &ir.entries {
            check_identifier(&entry.name)?;
            src.push_str(&format!("\t{}\t{} = {}\n", entry.name, ir.name, go_literal(&entry.value)));
        }
        src.push_str(")\n");
    }

    format_go_source(&src)
}

fn push_header(src: &mut String, package: &str, imports: &[String]) {
    src.push_str(&format!("package {}\n\n", package));
    if imports.is_empty() {
        return;
    }
    src.push_str("import (\n");
    for import in imports {
        src.push_str(&format!("\t{}\n", go_quote(import)));
    }
    src.push_str(")\n\n");
}

/// A Go literal for an enum value.
pub fn go_literal(value: &EnumValue) -> String {
    match value {
        EnumValue::Integer(i) => i.to_string(),
        EnumValue::Float(f) => f.to_string(),
        EnumValue::String(s) => go_quote(s),
    }
}

/// An interpreted Go string literal.
pub fn go_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Namespace;
    use crate::ir::{EnumEntry, Field};
    use crate::type_mapping::enum_type;
    use crate::schema::EnumKind;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    fn models() -> Namespace {
        Namespace::from_import_path("github.com/kalo-build/dummy/models")
    }

    #[test]
    fn test_render_struct_with_imports_and_method() {
        let enums = Namespace::from_import_path("github.com/kalo-build/dummy/enums");
        let ir = StructIr {
            namespace: models(),
            name: "Person".into(),
            imports: vec!["github.com/kalo-build/dummy/enums".into()],
            fields: vec![
                Field::new("ID", TargetType::primitive("uint")).with_tags(vec!["morphe:\"mandatory\"".into()]),
                Field::new("Nationality", enum_type(&enums, "Nationality", EnumKind::String)),
                Field::new("CompanyID", TargetType::pointer(TargetType::primitive("uint"))),
            ],
            methods: vec![MethodIr {
                receiver_name: "m".into(),
                receiver_type: TargetType::StructRef {
                    namespace: models(),
                    name: "Person".into(),
                },
                name: "GetIDPrimary".into(),
                parameters: IndexMap::new(),
                return_types: vec![TargetType::StructRef {
                    namespace: models(),
                    name: "PersonIDPrimary".into(),
                }],
                body: vec![
                    "\treturn PersonIDPrimary{".into(),
                    "\t\tID:\tm.ID,".into(),
                    "\t}".into(),
                ],
            }],
        };

        let expected = "package models

import (
\t\"github.com/kalo-build/dummy/enums\"
)

type Person struct {
\tID          uint `morphe:\"mandatory\"`
\tNationality enums.Nationality
\tCompanyID   *uint
}

func (m Person) GetIDPrimary() PersonIDPrimary {
\treturn PersonIDPrimary{
\t\tID: m.ID,
\t}
}
";
        assert_eq!(render_struct(&ir).unwrap(), expected);
    }

    #[test]
    fn test_render_method_signature_variants() {
        let mut params = IndexMap::new();
        params.insert("limit".to_string(), TargetType::primitive("int"));
        params.insert("since".to_string(), TargetType::time());
        let ir = StructIr {
            namespace: models(),
            name: "Feed".into(),
            imports: vec!["time".into()],
            fields: vec![],
            methods: vec![MethodIr {
                receiver_name: "m".into(),
                receiver_type: TargetType::local_struct("Feed"),
                name: "Window".into(),
                parameters: params,
                return_types: vec![TargetType::primitive("int"), TargetType::primitive("error")],
                body: vec!["\treturn limit, nil".into()],
            }],
        };

        let out = render_struct(&ir).unwrap();
        assert!(out.contains("type Feed struct {\n}\n"));
        assert!(out.contains("func (m Feed) Window(limit int, since time.Time) (int, error) {\n"));
    }

    #[test]
    fn test_render_enum() {
        let enums = Namespace::from_import_path("github.com/kalo-build/dummy/enums");
        let ir = EnumIr {
            namespace: enums.clone(),
            name: "UniversalNumber".into(),
            ty: enum_type(&enums, "UniversalNumber", EnumKind::Float),
            entries: vec![
                EnumEntry {
                    name: "UniversalNumberEuler".into(),
                    value: EnumValue::Float(2.7182818285),
                },
                EnumEntry {
                    name: "UniversalNumberPi".into(),
                    value: EnumValue::Float(3.1415926535),
                },
            ],
        };

        let expected = "package enums

type UniversalNumber float64

const (
\tUniversalNumberEuler UniversalNumber = 2.7182818285
\tUniversalNumberPi    UniversalNumber = 3.1415926535
)
";
        assert_eq!(render_enum(&ir).unwrap(), expected);
    }

    #[test]
    fn test_string_literals_quoted() {
        assert_eq!(go_literal(&EnumValue::String("American".into())), "\"American\"");
        assert_eq!(go_quote("say \"hi\"\\"), "\"say \\\"hi\\\"\\\\\"");
        assert_eq!(go_literal(&EnumValue::Integer(-3)), "-3");
    }

    #[test]
    fn test_invalid_field_name() {
        let ir = StructIr {
            namespace: models(),
            name: "Bad".into(),
            imports: vec![],
            fields: vec![Field::new("Tax ID", TargetType::primitive("string"))],
            methods: vec![],
        };
        assert_eq!(
            render_struct(&ir).unwrap_err(),
            EmitError::InvalidIdentifier("Tax ID".into())
        );
    }
}
