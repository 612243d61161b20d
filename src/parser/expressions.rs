//! Expression parsing implementation
//!
//! This module handles parsing of expressions, one method per precedence level,
//! lowest binding first:
//!
//! ```text
//! expression ::= or
//! or         ::= and ("||" and)*
//! and        ::= comparison ("&&" comparison)*
//! comparison ::= additive (("==" | "!=" | "<=" | ">=" | "<" | ">") additive)?
//! additive   ::= term (("+" | "-") term)*
//! term       ::= factor (("*" | "/") factor)*
//! factor     ::= INTEGER | FLOAT | STRING | BOOLEAN | NULL | identifier
//!              | "(" expression ")" | array | object
//! array      ::= "[" (expression ("," expression)*)? "]"
//! object     ::= "{" (property ("," property)*)? "}"
//! property   ::= (identifier | NUMBER) ":" expression
//! ```
//!
//! # Precedence
//!
//! `*` and `/` bind tighter than `+` and `-`, which bind tighter than the
//! comparisons. Comparisons do not chain. `&&` binds tighter than `||`; both
//! are left-associative, as are the arithmetic operators.
//!
//! Every operand of `&&`/`||` must be a comparison (possibly parenthesized)
//! or a logical combination of comparisons. A `while` condition is parsed in
//! strict mode: it must be such a condition even without `&&`/`||`.
//!
//! Without the nested-literals capability no array or object may appear
//! anywhere inside an array element or property value, parenthesized or not.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{Literal, TokenKind};
use crate::parser::parse::{ParseError, Parser};

impl Parser<'_> {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_logical_or(false)
    }

    /// Parse a loop condition (strict: comparisons required)
    pub(crate) fn parse_condition(&mut self) -> Result<Expr, ParseError> {
        self.parse_logical_or(true)
    }

    /// Parse logical OR (||)
    fn parse_logical_or(&mut self, strict: bool) -> Result<Expr, ParseError> {
        let mut left = self.parse_logical_and(strict)?;

        while self.check(TokenKind::OrOr) {
            self.require_condition(&left)?;
            self.advance();
            let right = self.parse_logical_and(true)?;
            left = Expr::binary(BinOp::Or, left, right);
        }

        Ok(left)
    }

    /// Parse logical AND (&&)
    fn parse_logical_and(&mut self, strict: bool) -> Result<Expr, ParseError> {
        let mut left = self.parse_comparison(strict)?;

        while self.check(TokenKind::AndAnd) {
            self.require_condition(&left)?;
            self.advance();
            let right = self.parse_comparison(true)?;
            left = Expr::binary(BinOp::And, left, right);
        }

        Ok(left)
    }

    /// Left operand of `&&`/`||`, checked before the operator is consumed
    fn require_condition(&self, operand: &Expr) -> Result<(), ParseError> {
        if operand.is_condition() {
            Ok(())
        } else {
            Err(self.error("comparison operator"))
        }
    }

    /// Parse a single, non-chaining comparison
    fn parse_comparison(&mut self, strict: bool) -> Result<Expr, ParseError> {
        let left = self.parse_additive()?;

        let Some(op) = self.peek_kind().and_then(comparison_op) else {
            if strict && !left.is_condition() {
                return Err(self.error("comparison operator"));
            }
            return Ok(left);
        };
        self.advance();

        let right = self.parse_additive()?;

        if self.peek_kind().is_some_and(|k| k.is_comparison()) {
            return Err(self.error("end of comparison (comparisons do not chain)"));
        }

        Ok(Expr::binary(op, left, right))
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = if self.match_token(TokenKind::Plus) {
                BinOp::Add
            } else if self.match_token(TokenKind::Minus) {
                BinOp::Sub
            } else {
                break;
            };

            let right = self.parse_multiplicative()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    /// Parse multiplicative (* /)
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_primary()?;

        loop {
            let op = if self.match_token(TokenKind::Star) {
                BinOp::Mul
            } else if self.match_token(TokenKind::Slash) {
                BinOp::Div
            } else {
                break;
            };

            let right = self.parse_primary()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    /// Parse primary expression (literals, identifiers, parentheses, arrays, objects)
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let Some(token) = self.peek() else {
            return Err(self.error("expression"));
        };

        if let Some(what) = self.literal_member {
            let opens_literal = matches!(token.kind, TokenKind::LBracket | TokenKind::LBrace);
            if opens_literal && !self.capabilities.nested_literals {
                return Err(self.error(format!("{what} (nested literals are not enabled)")));
            }
        }

        let expr = match (token.kind, &token.literal) {
            (TokenKind::IntLiteral, Some(Literal::Integer(n))) => Expr::IntegerLiteral(*n),
            (TokenKind::FloatLiteral, Some(Literal::Float(x))) => Expr::FloatLiteral(*x),
            (TokenKind::StringLiteral, Some(Literal::String { raw, quote })) => {
                Expr::StringLiteral {
                    raw: raw.clone(),
                    quote: *quote,
                }
            }
            (TokenKind::BoolLiteral, Some(Literal::Boolean(b))) => Expr::BooleanLiteral(*b),
            (TokenKind::NullLiteral, _) => Expr::NullLiteral,
            (TokenKind::Ident, _) => Expr::Identifier(token.lexeme.clone()),
            (TokenKind::LParen, _) => {
                return self.nested("expression", |parser| {
                    parser.advance();
                    let inner = parser.parse_expression()?;
                    parser.expect_rparen("after parenthesized expression")?;
                    Ok(inner)
                });
            }
            (TokenKind::LBracket, _) => {
                return self.nested("expression", |parser| parser.parse_array_literal());
            }
            (TokenKind::LBrace, _) => {
                return self.nested("expression", |parser| parser.parse_object_literal());
            }
            _ => return Err(self.error("expression")),
        };

        self.advance();
        Ok(expr)
    }

    /// Parse array literal: `[e1, e2, ...]`
    fn parse_array_literal(&mut self) -> Result<Expr, ParseError> {
        self.expect_token(TokenKind::LBracket, "'['")?;

        let mut elements = Vec::new();
        if !self.check(TokenKind::RBracket) {
            loop {
                elements.push(self.parse_literal_member("array element")?);

                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect_token(TokenKind::RBracket, "']' after array elements")?;
        Ok(Expr::Array(elements))
    }

    /// Parse object literal: `{k1: v1, k2: v2, ...}`
    fn parse_object_literal(&mut self) -> Result<Expr, ParseError> {
        self.expect_token(TokenKind::LBrace, "'{'")?;

        let mut properties = Vec::new();
        if !self.check(TokenKind::RBrace) {
            loop {
                let key = self.parse_property_key()?;
                self.expect_token(TokenKind::Colon, "':' after property key")?;
                let value = self.parse_literal_member("property value")?;
                properties.push(Property::new(key, value));

                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect_token(TokenKind::RBrace, "'}' after object properties")?;
        Ok(Expr::Object(properties))
    }

    /// Element of an array or value of an object; nesting is profile-gated
    fn parse_literal_member(&mut self, what: &'static str) -> Result<Expr, ParseError> {
        let outer = self.literal_member.replace(what);
        let result = self.parse_expression();
        self.literal_member = outer;
        result
    }

    /// Parse property key: identifier, or a number coerced to its text
    fn parse_property_key(&mut self) -> Result<PropertyKey, ParseError> {
        let numeric = self.capabilities.numeric_object_keys;
        let Some(token) = self.peek() else {
            return Err(self.error("property key"));
        };

        let key = match (token.kind, &token.literal) {
            (TokenKind::Ident, _) => PropertyKey::Ident(token.lexeme.clone()),
            (TokenKind::IntLiteral | TokenKind::FloatLiteral, Some(literal)) if numeric => {
                PropertyKey::Numeric(literal.to_string())
            }
            _ if numeric => return Err(self.error("property key (identifier or number)")),
            _ => return Err(self.error("property key (identifier)")),
        };

        self.advance();
        Ok(key)
    }
}

fn comparison_op(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::EqEq => Some(BinOp::Eq),
        TokenKind::NotEq => Some(BinOp::Ne),
        TokenKind::Lt => Some(BinOp::Lt),
        TokenKind::Le => Some(BinOp::Le),
        TokenKind::Gt => Some(BinOp::Gt),
        TokenKind::Ge => Some(BinOp::Ge),
        _ => None,
    }
}
