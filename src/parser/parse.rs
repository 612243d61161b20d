//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, helper methods, and the [`parse`] entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: variable and function declarations
//! - `statements`: statement dispatch, assignments, `while`, `return`, blocks
//! - `expressions`: conditions, arithmetic, literals, arrays and objects
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! A parser borrows one token slice and is consumed by a single parse; nothing
//! survives between calls. Parsing stops at the first token that cannot extend
//! the current derivation.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::profile::Capabilities;
use std::fmt;
use tracing::{debug, instrument};

/// Parser error type
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A token that cannot extend the current derivation
    Unexpected { expected: String, found: Token },
    /// Tokens ran out while `expected` was still required
    UnexpectedEndOfInput {
        expected: String,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn expected(&self) -> &str {
        match self {
            ParseError::Unexpected { expected, .. }
            | ParseError::UnexpectedEndOfInput { expected, .. } => expected,
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Unexpected { found, .. } => found.location,
            ParseError::UnexpectedEndOfInput { location, .. } => *location,
        }
    }

    /// The offending token, `None` at end of input
    pub fn found(&self) -> Option<&Token> {
        match self {
            ParseError::Unexpected { found, .. } => Some(found),
            ParseError::UnexpectedEndOfInput { .. } => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = self.location();
        match self {
            ParseError::Unexpected { expected, found } => write!(
                f,
                "Parse error at {}: expected {}, found {}",
                location, expected, found
            ),
            ParseError::UnexpectedEndOfInput { expected, .. } => write!(
                f,
                "Parse error at {}: expected {}, found end of input",
                location, expected
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Deepest nesting of parentheses, arrays, objects and blocks a parse accepts
pub const MAX_NESTING_DEPTH: usize = 128;

/// Parse a token sequence into a [`Program`].
#[instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(
    tokens: &[Token],
    capabilities: impl Into<Capabilities>,
) -> Result<Program, ParseError> {
    let result = Parser::new(tokens, capabilities).parse_program();
    if let Err(err) = &result {
        debug!(%err, "parse failed");
    }
    result
}

/// Recursive descent parser for the script language
pub struct Parser<'t> {
    pub(crate) tokens: &'t [Token],
    pub(crate) position: usize,
    pub(crate) capabilities: Capabilities,
    /// Open `(`, `[`, `{` and blocks around the current position
    pub(crate) depth: usize,
    /// Set while parsing an array element or property value
    pub(crate) literal_member: Option<&'static str>,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token], capabilities: impl Into<Capabilities>) -> Self {
        Self {
            tokens,
            position: 0,
            capabilities: capabilities.into(),
            depth: 0,
            literal_member: None,
        }
    }

    /// Parse the entire input (a sequence of statements)
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            let stmt = self.parse_statement()?;
            program.statements.push(stmt);
        }

        Ok(program)
    }

    // ===== Helper methods =====

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub(crate) fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.position)
    }

    pub(crate) fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&'t Token> {
        self.tokens.get(self.position + n)
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        match self.peek() {
            Some(token) => token.location,
            None => self.end_location(),
        }
    }

    /// Location just past the last token
    fn end_location(&self) -> SourceLocation {
        let Some(last) = self.tokens.last() else {
            return SourceLocation::new(0, 1, 1);
        };
        let mut end = last.location;
        end.offset += last.lexeme.len();
        for ch in last.lexeme.chars() {
            if ch == '\n' {
                end.line += 1;
                end.column = 1;
            } else {
                end.column += 1;
            }
        }
        end
    }

    /// Error describing what was expected at the current position
    pub(crate) fn error(&self, expected: impl Into<String>) -> ParseError {
        match self.peek() {
            Some(found) => ParseError::Unexpected {
                expected: expected.into(),
                found: found.clone(),
            },
            None => ParseError::UnexpectedEndOfInput {
                expected: expected.into(),
                location: self.end_location(),
            },
        }
    }

    pub(crate) fn expect_token(
        &mut self,
        kind: TokenKind,
        expected: &str,
    ) -> Result<&'t Token, ParseError> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.position += 1;
                Ok(token)
            }
            _ => Err(self.error(expected)),
        }
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::LParen, &format!("'(' {ctx}")).map(|_| ())
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::RParen, &format!("')' {ctx}")).map(|_| ())
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::Semicolon, &format!("';' {ctx}")).map(|_| ())
    }

    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<String, ParseError> {
        self.expect_token(TokenKind::Ident, &format!("identifier {ctx}"))
            .map(|t| t.lexeme.clone())
    }

    /// Run `f` one nesting level deeper, failing past [`MAX_NESTING_DEPTH`]
    pub(crate) fn nested<T>(
        &mut self,
        what: &str,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(format!("{what} (nesting too deep)")));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}
