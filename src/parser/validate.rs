//! Checks the grammar leaves to the caller
//!
//! The parser keeps duplicate function parameters and duplicate object keys
//! exactly as written. [`check_program`] reports them as [`Diagnostic`]s, and
//! [`merged`] applies the usual last-write-wins policy to an object literal.

use crate::parser::ast::*;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;

/// Informational note about a successfully parsed program
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A function declares the same parameter name twice
    DuplicateParam {
        function: String,
        name: String,
        location: SourceLocation,
    },
    /// An object literal repeats a key; the later value wins when merged
    DuplicateKey {
        key: String,
        location: SourceLocation,
    },
}

impl Diagnostic {
    /// Location of the statement the note refers to
    pub fn location(&self) -> SourceLocation {
        match self {
            Diagnostic::DuplicateParam { location, .. }
            | Diagnostic::DuplicateKey { location, .. } => *location,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DuplicateParam {
                function,
                name,
                location,
            } => write!(
                f,
                "Duplicate parameter '{}' in function '{}' at {}",
                name, function, location
            ),
            Diagnostic::DuplicateKey { key, location } => {
                write!(f, "Duplicate object key '{}' at {}", key, location)
            }
        }
    }
}

impl std::error::Error for Diagnostic {}

/// Collect diagnostics for every statement, nested bodies included
pub fn check_program(program: &Program) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for stmt in &program.statements {
        check_stmt(stmt, &mut diagnostics);
    }
    diagnostics
}

fn check_stmt(stmt: &Stmt, out: &mut Vec<Diagnostic>) {
    let location = *stmt.location();
    match stmt {
        Stmt::VarDecl { init, .. } => {
            if let Some(expr) = init {
                check_expr(expr, location, out);
            }
        }
        Stmt::Assignment { value, .. }
        | Stmt::Expression { value, .. }
        | Stmt::Return { value, .. } => check_expr(value, location, out),
        Stmt::While {
            condition, body, ..
        } => {
            check_expr(condition, location, out);
            for inner in body {
                check_stmt(inner, out);
            }
        }
        Stmt::FunctionDecl {
            name, params, body, ..
        } => {
            let mut seen = FxHashSet::default();
            for param in params {
                if !seen.insert(param.as_str()) {
                    out.push(Diagnostic::DuplicateParam {
                        function: name.clone(),
                        name: param.clone(),
                        location,
                    });
                }
            }
            for inner in body {
                check_stmt(inner, out);
            }
        }
    }
}

fn check_expr(expr: &Expr, location: SourceLocation, out: &mut Vec<Diagnostic>) {
    match expr {
        Expr::Binary { left, right, .. } => {
            check_expr(left, location, out);
            check_expr(right, location, out);
        }
        Expr::Array(elements) => {
            for element in elements {
                check_expr(element, location, out);
            }
        }
        Expr::Object(properties) => {
            let mut seen = FxHashSet::default();
            for property in properties {
                let key = property.key.as_str();
                if !seen.insert(key) {
                    out.push(Diagnostic::DuplicateKey {
                        key: key.to_string(),
                        location,
                    });
                }
                check_expr(&property.value, location, out);
            }
        }
        _ => {}
    }
}

/// Merge an object literal's properties, last write wins.
///
/// Each key keeps the position of its first occurrence.
pub fn merged(properties: &[Property]) -> Vec<(&str, &Expr)> {
    let mut slots: FxHashMap<&str, usize> = FxHashMap::default();
    let mut entries: Vec<(&str, &Expr)> = Vec::with_capacity(properties.len());

    for property in properties {
        let key = property.key.as_str();
        match slots.get(key).copied() {
            Some(index) => entries[index].1 = &property.value,
            None => {
                slots.insert(key, entries.len());
                entries.push((key, &property.value));
            }
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::parse;
    use crate::parser::profile::Profile;

    fn check(source: &str) -> Vec<Diagnostic> {
        let program = parse(&tokenize(source, Profile::Full).tokens, Profile::Full).unwrap();
        check_program(&program)
    }

    #[test]
    fn test_clean_program_has_no_diagnostics() {
        assert!(check("var o = {a: 1, b: [1, 2]}; function f(x, y) { return x; }").is_empty());
    }

    #[test]
    fn test_duplicate_param() {
        let diagnostics = check("function f(a, b, a) {}");
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            &diagnostics[0],
            Diagnostic::DuplicateParam { function, name, .. } if function == "f" && name == "a"
        ));
        assert_eq!(
            diagnostics[0].to_string(),
            "Duplicate parameter 'a' in function 'f' at line 1, column 1"
        );
    }

    #[test]
    fn test_duplicate_key_inside_nested_statements() {
        let diagnostics = check("while (i < 3) {\n  x = [{k: 1, k: 2}];\n}");
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(&diagnostics[0], Diagnostic::DuplicateKey { key, .. } if key == "k"));
        assert_eq!(diagnostics[0].location().line, 2);
    }

    #[test]
    fn test_distinct_numeric_keys_and_separate_objects() {
        let diagnostics = check("o = {1: 1, 1.5: 2}; p = {1: 3};");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_merged_last_write_wins() {
        let properties = vec![
            Property::new(PropertyKey::Ident("a".to_string()), Expr::IntegerLiteral(1)),
            Property::new(PropertyKey::Ident("b".to_string()), Expr::IntegerLiteral(2)),
            Property::new(PropertyKey::Ident("a".to_string()), Expr::IntegerLiteral(3)),
        ];
        let merged = merged(&properties);
        assert_eq!(
            merged,
            vec![
                ("a", &Expr::IntegerLiteral(3)),
                ("b", &Expr::IntegerLiteral(2)),
            ]
        );
    }
}
