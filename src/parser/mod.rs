//! Script source parser
//!
//! This module transforms script source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), extended by [`statements`],
//!   [`declarations`] and [`expressions`]
//! - [`ast`]: AST node definitions
//! - [`profile`]: Language profiles and the capability flags they enable
//! - [`validate`]: Duplicate parameter and key checks on a parsed program
//!
//! # Supported Language
//!
//! A small JavaScript-like subset:
//! - Declarations: `var`, `let`, `const`, with an optional initializer
//! - Statements: assignments, expression statements, `while` loops,
//!   `function` declarations and `return`
//! - Expressions: `+ - * /`, one comparison, `&&`/`||` combinations of
//!   comparisons, array and object literals
//! - No unary operators, calls, member access or `if` statements
//!   (`if` and `else` are reserved words only)
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one method per precedence level.
//! No external parser generator dependencies.

pub mod ast;
pub mod declarations;
pub mod expressions;
pub mod lexer;
pub mod parse;
pub mod profile;
pub mod statements;
pub mod validate;
