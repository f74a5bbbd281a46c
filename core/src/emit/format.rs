//! # Go Source Formatting
//!
//! A small gofmt stand-in for generated code. Rendered lines separate
//! alignable cells with tabs after their leading indentation; this pass
//! checks the text is well formed and pads the cells into columns the way
//! gofmt's tabwriter does (padding 1, alignment blocks broken by any line
//! that lacks the column).

use crate::error::EmitError;
use regex::Regex;
use std::sync::OnceLock;

const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough", "for",
    "func", "go", "goto", "if", "import", "interface", "map", "package", "range", "return",
    "select", "struct", "switch", "type", "var",
];

/// True if `name` can be used as a Go identifier.
pub fn is_go_identifier(name: &str) -> bool {
    static IDENT_RE: OnceLock<Regex> = OnceLock::new();
    let ident_re =
        IDENT_RE.get_or_init(|| Regex::new(r"^[\p{L}_][\p{L}\p{Nd}_]*$").expect("Invalid regex"));
    ident_re.is_match(name) && !GO_KEYWORDS.contains(&name)
}

/// Checks `name` is a Go identifier.
pub fn check_identifier(name: &str) -> Result<(), EmitError> {
    if is_go_identifier(name) {
        Ok(())
    } else {
        Err(EmitError::InvalidIdentifier(name.to_string()))
    }
}

/// Validates and aligns generated Go source.
pub fn format_go_source(source: &str) -> Result<String, EmitError> {
    check_delimiters(source)?;
    check_declarations(source)?;

    let lines: Vec<Line<'_>> = source.lines().map(Line::parse).collect();
    let widths = column_widths(&lines);

    let mut out = String::with_capacity(source.len());
    for (line, widths) in lines.iter().zip(&widths) {
        out.push_str(&"\t".repeat(line.indent));
        let last = line.cells.len().saturating_sub(1);
        for (i, cell) in line.cells.iter().enumerate() {
            out.push_str(cell);
            if i < last {
                let pad = widths[i] - cell.chars().count();
                out.push_str(&" ".repeat(pad));
            }
        }
        out.push('\n');
    }

    // Exactly one trailing newline.
    let trimmed = out.trim_end_matches('\n').len();
    out.truncate(trimmed);
    out.push('\n');
    Ok(out)
}

struct Line<'a> {
    indent: usize,
    cells: Vec<&'a str>,
}

impl<'a> Line<'a> {
    fn parse(raw: &'a str) -> Self {
        let body = raw.trim_start_matches('\t');
        let indent = raw.len() - body.len();
        let body = body.trim_end();
        let cells = if body.is_empty() {
            Vec::new()
        } else {
            body.split('\t').collect()
        };
        Line { indent, cells }
    }

    /// Number of cells followed by another cell on the same line.
    fn terminated(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }
}

/// Padded width of every terminated cell, per line.
fn column_widths(lines: &[Line<'_>]) -> Vec<Vec<usize>> {
    let mut widths: Vec<Vec<usize>> = lines.iter().map(|l| vec![0; l.terminated()]).collect();
    let max_columns = lines.iter().map(Line::terminated).max().unwrap_or(0);

    for column in 0..max_columns {
        let mut start = 0;
        while start < lines.len() {
            if lines[start].terminated() <= column {
                start += 1;
                continue;
            }
            // A block is a run of lines sharing indentation that all have this column.
            let indent = lines[start].indent;
            let mut end = start;
            while end < lines.len() && lines[end].terminated() > column && lines[end].indent == indent {
                end += 1;
            }
            let width = lines[start..end]
                .iter()
                .map(|l| l.cells[column].chars().count())
                .max()
                .unwrap_or(0)
                + 1;
            for row in &mut widths[start..end] {
                row[column] = width;
            }
            start = end;
        }
    }
    widths
}

fn check_delimiters(source: &str) -> Result<(), EmitError> {
    let mut stack: Vec<(char, usize)> = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let mut chars = raw.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '/' if chars.peek() == Some(&'/') => break,
                '"' | '\'' => {
                    let mut closed = false;
                    while let Some(s) = chars.next() {
                        if s == '\\' {
                            chars.next();
                        } else if s == c {
                            closed = true;
                            break;
                        }
                    }
                    if !closed {
                        return Err(EmitError::Format {
                            line: line_no,
                            reason: format!("unterminated {} literal", if c == '"' { "string" } else { "rune" }),
                        });
                    }
                }
                '`' => {
                    if !chars.any(|s| s == '`') {
                        return Err(EmitError::Format {
                            line: line_no,
                            reason: "unterminated raw string".to_string(),
                        });
                    }
                }
                '(' | '{' | '[' => stack.push((c, line_no)),
                ')' | '}' | ']' => {
                    let expected = match c {
                        ')' => '(',
                        '}' => '{',
                        _ => '[',
                    };
                    match stack.pop() {
                        Some((open, _)) if open == expected => {}
                        _ => {
                            return Err(EmitError::Format {
                                line: line_no,
                                reason: format!("unexpected '{}'", c),
                            })
                        }
                    }
                }
                _ => {}
            }
        }
    }

    match stack.pop() {
        Some((open, line)) => Err(EmitError::Format {
            line,
            reason: format!("unclosed '{}'", open),
        }),
        None => Ok(()),
    }
}

fn check_declarations(source: &str) -> Result<(), EmitError> {
    for (idx, line) in source.lines().enumerate() {
        let declared = line
            .strip_prefix("package ")
            .or_else(|| line.strip_prefix("type "))
            .and_then(|rest| rest.split_whitespace().next());
        if let Some(name) = declared {
            if !is_go_identifier(name) {
                return Err(EmitError::Format {
                    line: idx + 1,
                    reason: format!("invalid go identifier: {:?}", name),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_aligns_struct_fields() {
        let src = "type Company struct {\n\tID\tuint\t`morphe:\"mandatory\"`\n\tName\tstring\n\tMailingContactID\t*uint\n}\n";
        let expected = "type Company struct {\n\tID               uint `morphe:\"mandatory\"`\n\tName             string\n\tMailingContactID *uint\n}\n";
        assert_eq!(format_go_source(src).unwrap(), expected);
    }

    #[test]
    fn test_tag_column_only_spans_tagged_run() {
        let src = "type T struct {\n\tA\tstring\t`x:\"1\"`\n\tLonger\tint\n\tB\tbool\t`y:\"2\"`\n}\n";
        let expected = "type T struct {\n\tA      string `x:\"1\"`\n\tLonger int\n\tB      bool `y:\"2\"`\n}\n";
        assert_eq!(format_go_source(src).unwrap(), expected);
    }

    #[test]
    fn test_aligns_composite_literal_keys() {
        let src = "func (m Person) GetIDName() PersonIDName {\n\treturn PersonIDName{\n\t\tFirstName:\tm.FirstName,\n\t\tLastName:\tm.LastName,\n\t}\n}\n";
        let expected = "func (m Person) GetIDName() PersonIDName {\n\treturn PersonIDName{\n\t\tFirstName: m.FirstName,\n\t\tLastName:  m.LastName,\n\t}\n}\n";
        assert_eq!(format_go_source(src).unwrap(), expected);
    }

    #[test]
    fn test_blank_lines_break_blocks_and_trailing_newlines_collapse() {
        let src = "const (\n\tA\tX = 1\n\n\tLongName\tX = 2\n)\n\n\n";
        let expected = "const (\n\tA X = 1\n\n\tLongName X = 2\n)\n";
        assert_eq!(format_go_source(src).unwrap(), expected);
    }

    #[test]
    fn test_unbalanced_delimiters() {
        let err = format_go_source("type A struct {\n\tB\tstring\n").unwrap_err();
        assert_eq!(
            err,
            EmitError::Format {
                line: 1,
                reason: "unclosed '{'".to_string()
            }
        );

        let err = format_go_source("func f() {\n\treturn (1]\n}\n").unwrap_err();
        assert!(matches!(err, EmitError::Format { line: 2, .. }));
    }

    #[test]
    fn test_delimiters_inside_literals_are_ignored() {
        let src = "const (\n\tA\tX = \"({[\"\n\tB\tX = '}'\n)\n\ntype T struct {\n\tC\tstring\t`json:\"c)\"`\n}\n";
        assert!(format_go_source(src).is_ok());

        let err = format_go_source("const A = \"open\n").unwrap_err();
        assert!(matches!(err, EmitError::Format { line: 1, .. }));
    }

    #[test]
    fn test_identifiers() {
        assert!(is_go_identifier("CompanyIDPrimary"));
        assert!(is_go_identifier("_x9"));
        assert!(!is_go_identifier("9lives"));
        assert!(!is_go_identifier("type"));
        assert!(!is_go_identifier("Contact Info"));
        assert!(check_identifier("").is_err());

        let err = format_go_source("package models\n\ntype 1Bad struct {\n}\n").unwrap_err();
        assert!(matches!(err, EmitError::Format { line: 3, .. }));
    }
}
