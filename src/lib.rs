//! # Introduction
//!
//! jsparse tokenizes and parses a small JavaScript-like language and renders
//! the resulting syntax tree back to canonical source text. An interactive
//! shell shows the tokens, the tree and a running transcript in a terminal UI
//! built with [ratatui](https://docs.rs/ratatui), or prints reports line by
//! line when stdin is not a terminal.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → Renderer → canonical text
//! ```
//!
//! 1. [`parser`]: tokenizes the source, builds the AST and checks it for
//!    duplicate parameters and keys. A [`parser::profile::Profile`] selects
//!    which optional constructs are accepted.
//! 2. [`render`]: canonical text and an indented outline of a tree.
//! 3. [`session`]: runs the whole pipeline on one line of input and keeps a
//!    bounded [`session::History`] of the results.
//! 4. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Supported language
//!
//! `var`/`let`/`const` declarations, assignments, expression statements,
//! `while` loops over comparisons joined with `&&`/`||`, `function`
//! declarations with `return`, arithmetic, integer/float/string/boolean/null
//! literals, arrays and objects.
//!
//! ```
//! use jsparse::parser::{lexer::tokenize, parse::parse, profile::Profile};
//! use jsparse::render::render;
//!
//! let tokens = tokenize("let a = 1 + 2 * 3;", Profile::Full).tokens;
//! let program = parse(&tokens, Profile::Full).unwrap();
//! assert_eq!(render(&program), "let a = (1 + (2 * 3));");
//! ```

pub mod parser;
pub mod render;
pub mod session;
pub mod ui;
