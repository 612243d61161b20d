//! Canonical text rendering of syntax trees
//!
//! [`Render`] turns a [`Program`], [`Stmt`] or [`Expr`] back into source text
//! that re-tokenizes and re-parses to the same tree:
//!
//! - every binary expression is parenthesized: `(a + (b * c))`
//! - floats always carry a decimal point: `3.0`
//! - strings keep their original delimiter and raw escapes
//! - a single statement has no terminator; inside programs and blocks every
//!   statement except `while`/`function` is followed by `;`
//! - a program renders one statement per line, a block on one line
//!
//! [`outline`] produces the indented one-node-per-line dump shown in the
//! shell's syntax tree pane.

use crate::parser::ast::*;
use crate::parser::lexer::format_float;
use std::fmt;

/// Conversion of a syntax tree node to canonical source text
pub trait Render {
    /// Append the rendering of `self` to `out`
    fn render_into(&self, out: &mut String);

    fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }
}

/// Render any node to its canonical text
pub fn render<T: Render + ?Sized>(node: &T) -> String {
    node.render()
}

impl Render for Expr {
    fn render_into(&self, out: &mut String) {
        match self {
            Expr::Identifier(name) => out.push_str(name),
            Expr::IntegerLiteral(n) => out.push_str(&n.to_string()),
            Expr::FloatLiteral(x) => out.push_str(&format_float(*x)),
            Expr::StringLiteral { raw, quote } => {
                out.push(quote.as_char());
                out.push_str(raw);
                out.push(quote.as_char());
            }
            Expr::BooleanLiteral(b) => out.push_str(if *b { "true" } else { "false" }),
            Expr::NullLiteral => out.push_str("null"),
            Expr::Binary { op, left, right } => {
                out.push('(');
                left.render_into(out);
                out.push(' ');
                out.push_str(op.symbol());
                out.push(' ');
                right.render_into(out);
                out.push(')');
            }
            Expr::Array(elements) => {
                out.push('[');
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    element.render_into(out);
                }
                out.push(']');
            }
            Expr::Object(properties) => {
                out.push('{');
                for (i, property) in properties.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(property.key.as_str());
                    out.push_str(": ");
                    property.value.render_into(out);
                }
                out.push('}');
            }
        }
    }
}

impl Render for Stmt {
    fn render_into(&self, out: &mut String) {
        match self {
            Stmt::VarDecl {
                kind, name, init, ..
            } => {
                out.push_str(kind.keyword());
                out.push(' ');
                out.push_str(name);
                if let Some(value) = init {
                    out.push_str(" = ");
                    value.render_into(out);
                }
            }
            Stmt::Assignment { name, value, .. } => {
                out.push_str(name);
                out.push_str(" = ");
                value.render_into(out);
            }
            Stmt::Expression { value, .. } => value.render_into(out),
            Stmt::While {
                condition, body, ..
            } => {
                out.push_str("while ");
                // Hand-built trees may hold a bare operand here
                if matches!(condition, Expr::Binary { .. }) {
                    condition.render_into(out);
                } else {
                    out.push('(');
                    condition.render_into(out);
                    out.push(')');
                }
                out.push(' ');
                render_block(body, out);
            }
            Stmt::FunctionDecl {
                name, params, body, ..
            } => {
                out.push_str("function ");
                out.push_str(name);
                out.push('(');
                out.push_str(&params.join(", "));
                out.push_str(") ");
                render_block(body, out);
            }
            Stmt::Return { value, .. } => {
                out.push_str("return ");
                value.render_into(out);
            }
        }
    }
}

impl Render for Program {
    fn render_into(&self, out: &mut String) {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            render_terminated(stmt, out);
        }
    }
}

/// A statement as it appears in a sequence, with its `;` when it needs one
fn render_terminated(stmt: &Stmt, out: &mut String) {
    stmt.render_into(out);
    if !stmt.is_block_statement() {
        out.push(';');
    }
}

fn render_block(body: &[Stmt], out: &mut String) {
    if body.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{ ");
    for stmt in body {
        render_terminated(stmt, out);
        out.push(' ');
    }
    out.push('}');
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Indented one-node-per-line dump of a program
pub fn outline(program: &Program) -> Vec<String> {
    let mut lines = Vec::new();
    for stmt in &program.statements {
        outline_stmt(stmt, 0, &mut lines);
    }
    lines
}

fn push_line(lines: &mut Vec<String>, depth: usize, text: String) {
    lines.push(format!("{}{}", "  ".repeat(depth), text));
}

fn outline_stmt(stmt: &Stmt, depth: usize, lines: &mut Vec<String>) {
    match stmt {
        Stmt::VarDecl {
            kind, name, init, ..
        } => {
            push_line(lines, depth, format!("VarDecl {} {}", kind.keyword(), name));
            if let Some(value) = init {
                outline_expr(value, depth + 1, lines);
            }
        }
        Stmt::Assignment { name, value, .. } => {
            push_line(lines, depth, format!("Assignment {}", name));
            outline_expr(value, depth + 1, lines);
        }
        Stmt::Expression { value, .. } => {
            push_line(lines, depth, "ExpressionStatement".to_string());
            outline_expr(value, depth + 1, lines);
        }
        Stmt::While {
            condition, body, ..
        } => {
            push_line(lines, depth, "While".to_string());
            outline_expr(condition, depth + 1, lines);
            push_line(lines, depth + 1, "Body".to_string());
            for inner in body {
                outline_stmt(inner, depth + 2, lines);
            }
        }
        Stmt::FunctionDecl {
            name, params, body, ..
        } => {
            push_line(
                lines,
                depth,
                format!("FunctionDecl {}({})", name, params.join(", ")),
            );
            for inner in body {
                outline_stmt(inner, depth + 1, lines);
            }
        }
        Stmt::Return { value, .. } => {
            push_line(lines, depth, "Return".to_string());
            outline_expr(value, depth + 1, lines);
        }
    }
}

fn outline_expr(expr: &Expr, depth: usize, lines: &mut Vec<String>) {
    match expr {
        Expr::Identifier(name) => push_line(lines, depth, format!("Identifier {}", name)),
        Expr::IntegerLiteral(n) => push_line(lines, depth, format!("Integer {}", n)),
        Expr::FloatLiteral(x) => push_line(lines, depth, format!("Float {}", format_float(*x))),
        Expr::StringLiteral { .. } => push_line(lines, depth, format!("String {}", expr)),
        Expr::BooleanLiteral(b) => push_line(lines, depth, format!("Boolean {}", b)),
        Expr::NullLiteral => push_line(lines, depth, "Null".to_string()),
        Expr::Binary { op, left, right } => {
            push_line(lines, depth, format!("Binary {}", op.symbol()));
            outline_expr(left, depth + 1, lines);
            outline_expr(right, depth + 1, lines);
        }
        Expr::Array(elements) => {
            push_line(lines, depth, "Array".to_string());
            for element in elements {
                outline_expr(element, depth + 1, lines);
            }
        }
        Expr::Object(properties) => {
            push_line(lines, depth, "Object".to_string());
            for property in properties {
                push_line(lines, depth + 1, format!("Property {}", property.key.as_str()));
                outline_expr(&property.value, depth + 2, lines);
            }
        }
    }
}
