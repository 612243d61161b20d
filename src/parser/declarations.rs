//! Declaration parsing implementation
//!
//! This module handles parsing of declarations:
//!
//! - Variable declarations: `var x = 1;`, `let y;`, `const z = [1, 2];`
//! - Function declarations: `function name(a, b) { ... }`
//! - Function parameter lists
//!
//! # Grammar
//!
//! ```text
//! var_decl      ::= ("var" | "let" | "const") identifier ("=" expression)? ";"
//! function_decl ::= "function" identifier "(" params? ")" block
//! params        ::= identifier ("," identifier)*
//! ```
//!
//! Parameter names are not checked for uniqueness here; see
//! [`crate::parser::validate`].
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser<'_> {
    /// Parse variable declaration: `kind name [= expr];`
    pub(crate) fn parse_variable_declaration(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();
        let kind = match self.peek_kind() {
            Some(TokenKind::Var) => DeclKind::Var,
            Some(TokenKind::Let) => DeclKind::Let,
            Some(TokenKind::Const) => DeclKind::Const,
            _ => return Err(self.error("'var', 'let' or 'const'")),
        };
        self.advance();

        let name = self.expect_identifier(&format!("after '{}'", kind.keyword()))?;

        let init = if self.match_token(TokenKind::Assign) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.expect_semicolon("after variable declaration")?;

        Ok(Stmt::VarDecl {
            kind,
            name,
            init,
            location: loc,
        })
    }

    /// Parse function declaration: `function name(params) { body }`
    pub(crate) fn parse_function_declaration(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();
        self.expect_token(TokenKind::Function, "'function'")?;

        let name = self.expect_identifier("after 'function'")?;

        self.expect_lparen("after function name")?;
        let params = self.parse_parameter_list()?;
        self.expect_rparen("after parameters")?;

        let body = self.parse_block("function body")?;

        Ok(Stmt::FunctionDecl {
            name,
            params,
            body,
            location: loc,
        })
    }

    /// Parse parameter list: `a, b, c` (possibly empty)
    fn parse_parameter_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut params = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(params);
        }

        loop {
            params.push(self.expect_identifier("in parameter list")?);

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::{parse, ParseError};
    use crate::parser::profile::Profile;
    use pretty_assertions::assert_eq;

    fn parse_with(source: &str, profile: Profile) -> Result<Program, ParseError> {
        parse(&tokenize(source, profile).tokens, profile)
    }

    #[test]
    fn test_declaration_kinds() {
        let program =
            parse_with("var a = 1; let b = 'x'; const c = 2.5; let d;", Profile::Full).unwrap();
        let summary: Vec<_> = program
            .statements
            .iter()
            .map(|s| match s {
                Stmt::VarDecl {
                    kind, name, init, ..
                } => (*kind, name.clone(), init.clone()),
                other => panic!("Expected declaration, got {other:?}"),
            })
            .collect();

        assert_eq!(
            summary,
            vec![
                (DeclKind::Var, "a".to_string(), Some(Expr::IntegerLiteral(1))),
                (
                    DeclKind::Let,
                    "b".to_string(),
                    Some(Expr::StringLiteral {
                        raw: "x".to_string(),
                        quote: Quote::Single
                    })
                ),
                (DeclKind::Const, "c".to_string(), Some(Expr::FloatLiteral(2.5))),
                (DeclKind::Let, "d".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_keyword_literal_initializers() {
        let program =
            parse_with("const flag = true; var nothing = null;", Profile::Declarations).unwrap();
        assert!(matches!(
            &program.statements[0],
            Stmt::VarDecl { init: Some(Expr::BooleanLiteral(true)), .. }
        ));
        assert!(matches!(
            &program.statements[1],
            Stmt::VarDecl { init: Some(Expr::NullLiteral), .. }
        ));
    }

    #[test]
    fn test_function_declaration() {
        let program = parse_with("function add(a, b) { return a + b; }", Profile::Full).unwrap();
        match &program.statements[0] {
            Stmt::FunctionDecl {
                name, params, body, ..
            } => {
                assert_eq!(name, "add");
                assert_eq!(params, &vec!["a".to_string(), "b".to_string()]);
                assert_eq!(body.len(), 1);
                assert!(matches!(&body[0], Stmt::Return { .. }));
            }
            other => panic!("Expected function declaration, got {other:?}"),
        }
    }

    #[test]
    fn test_function_without_params_or_body() {
        let program = parse_with("function noop() {}", Profile::Functions).unwrap();
        assert!(matches!(
            &program.statements[0],
            Stmt::FunctionDecl { params, body, .. } if params.is_empty() && body.is_empty()
        ));
    }

    #[test]
    fn test_duplicate_params_are_accepted() {
        let program = parse_with("function f(a, a) {}", Profile::Full).unwrap();
        assert!(matches!(&program.statements[0], Stmt::FunctionDecl { params, .. } if params.len() == 2));
    }

    #[test]
    fn test_function_requires_profile() {
        let err = parse_with("function f() {}", Profile::Objects).unwrap_err();
        assert_eq!(err.expected(), "statement");
    }

    #[test]
    fn test_trailing_comma_in_params() {
        let err = parse_with("function f(a,) {}", Profile::Full).unwrap_err();
        assert_eq!(err.expected(), "identifier in parameter list");
    }

    #[test]
    fn test_declaration_missing_name() {
        let err = parse_with("const = 1;", Profile::Full).unwrap_err();
        assert_eq!(err.expected(), "identifier after 'const'");
    }
}
