//! Statement parsing implementation
//!
//! This module handles statement dispatch and the statement forms that are not
//! declarations:
//!
//! - Assignments: `x = expr;`
//! - Expression statements: `expr;`
//! - Loops: `while (condition) { ... }`
//! - Returns: `return expr;`
//! - Blocks: `{ statement* }` (bodies of loops and functions)
//!
//! # Grammar
//!
//! ```text
//! statement ::= var_decl | assignment | expr_stmt
//!             | while_stmt | function_decl | return_stmt
//! block     ::= "{" statement* "}"
//! ```
//!
//! The first token picks the form: a keyword selects its statement, an
//! identifier followed by `=` is an assignment, anything else starts an
//! expression statement.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use tracing::trace;

impl Parser<'_> {
    /// Parse `{ statement* }`
    pub(crate) fn parse_block(&mut self, ctx: &str) -> Result<Vec<Stmt>, ParseError> {
        self.nested("block", |parser| {
            parser.expect_token(TokenKind::LBrace, &format!("'{{' before {ctx}"))?;

            let mut statements = Vec::new();
            while !parser.check(TokenKind::RBrace) && !parser.is_at_end() {
                statements.push(parser.parse_statement()?);
            }

            parser.expect_token(TokenKind::RBrace, &format!("'}}' after {ctx}"))?;
            Ok(statements)
        })
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();
        trace!(line = loc.line, column = loc.column, "statement");

        match self.peek_kind() {
            Some(TokenKind::Var | TokenKind::Let | TokenKind::Const) => {
                self.parse_variable_declaration()
            }
            Some(TokenKind::While) => self.parse_while_statement(),
            Some(TokenKind::Function) if self.capabilities.function_declarations => {
                self.parse_function_declaration()
            }
            Some(TokenKind::Return) if self.capabilities.function_declarations => {
                self.parse_return_statement()
            }
            Some(TokenKind::Function | TokenKind::Return | TokenKind::If | TokenKind::Else) => {
                Err(self.error("statement"))
            }
            Some(TokenKind::Ident)
                if self
                    .peek_ahead(1)
                    .is_some_and(|t| t.kind == TokenKind::Assign) =>
            {
                self.parse_assignment()
            }
            _ => {
                let value = self.parse_expression()?;
                self.expect_semicolon("after expression")?;
                Ok(Stmt::Expression {
                    value,
                    location: loc,
                })
            }
        }
    }

    /// Parse assignment: `name = expr;`
    fn parse_assignment(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();
        let name = self.expect_identifier("in assignment")?;
        self.expect_token(TokenKind::Assign, "'=' in assignment")?;
        let value = self.parse_expression()?;
        self.expect_semicolon("after assignment")?;

        Ok(Stmt::Assignment {
            name,
            value,
            location: loc,
        })
    }

    /// Parse while statement: `while (condition) { body }`
    fn parse_while_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();
        self.expect_token(TokenKind::While, "'while'")?;

        self.expect_lparen("after 'while'")?;
        let condition = self.parse_condition()?;
        self.expect_rparen("after while condition")?;

        let body = self.parse_block("while body")?;

        Ok(Stmt::While {
            condition,
            body,
            location: loc,
        })
    }

    /// Parse return statement: `return expr;`
    fn parse_return_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();
        self.expect_token(TokenKind::Return, "'return'")?;
        let value = self.parse_expression()?;
        self.expect_semicolon("after return value")?;

        Ok(Stmt::Return {
            value,
            location: loc,
        })
    }
}
