//! Property-based tests for the tokenize → parse → render pipeline
//!
//! Tokenizing any string must neither panic nor report a location outside the
//! input, and every accepted program must render to text that parses back to
//! the same rendering, under every profile.

use jsparse::parser::ast::*;
use jsparse::parser::lexer::{format_float, tokenize};
use jsparse::parser::parse::parse;
use jsparse::parser::profile::Profile;
use jsparse::render::render;
use proptest::prelude::*;

const NAMES: &[&str] = &["a", "b", "count", "x1", "_tmp"];

/// Source fragments joined with spaces into token soups
const FRAGMENTS: &[&str] = &[
    "var", "let", "const", "while", "function", "return", "if", "x", "y", "f", "true", "null",
    "0", "7", "2.", "3.5", "'s'", "\"t\"", "=", "+", "-", "*", "/", "==", "!=", "<", "<=", ">",
    ">=", "&&", "||", "(", ")", "[", "]", "{", "}", ",", ":", ";",
];

fn name() -> impl Strategy<Value = String> {
    prop::sample::select(NAMES.to_vec()).prop_map(|s| s.to_string())
}

fn leaf() -> impl Strategy<Value = Expr> {
    prop_oneof![
        name().prop_map(Expr::Identifier),
        (0..=i64::MAX).prop_map(Expr::IntegerLiteral),
        (0u32..10_000).prop_map(|n| Expr::FloatLiteral(f64::from(n) / 8.0)),
        ("[a-z ]{0,6}", any::<bool>()).prop_map(|(raw, single)| Expr::StringLiteral {
            raw,
            quote: if single { Quote::Single } else { Quote::Double },
        }),
        any::<bool>().prop_map(Expr::BooleanLiteral),
        Just(Expr::NullLiteral),
    ]
}

fn key() -> impl Strategy<Value = PropertyKey> {
    prop_oneof![
        name().prop_map(PropertyKey::Ident),
        (0u32..1000).prop_map(|n| PropertyKey::Numeric(n.to_string())),
        (0u32..1000).prop_map(|n| PropertyKey::Numeric(format_float(f64::from(n) / 4.0))),
    ]
}

fn arithmetic_op() -> impl Strategy<Value = BinOp> {
    prop::sample::select(vec![BinOp::Add, BinOp::Sub, BinOp::Mul, BinOp::Div])
}

fn comparison_op() -> impl Strategy<Value = BinOp> {
    prop::sample::select(vec![
        BinOp::Eq,
        BinOp::Ne,
        BinOp::Lt,
        BinOp::Le,
        BinOp::Gt,
        BinOp::Ge,
    ])
}

/// Comparisons of `operand`s, combined with `&&`/`||`
fn condition(operand: BoxedStrategy<Expr>) -> BoxedStrategy<Expr> {
    (comparison_op(), operand.clone(), operand)
        .prop_map(|(op, left, right)| Expr::binary(op, left, right))
        .prop_recursive(2, 8, 2, |inner| {
            (
                prop::sample::select(vec![BinOp::And, BinOp::Or]),
                inner.clone(),
                inner,
            )
                .prop_map(|(op, left, right)| Expr::binary(op, left, right))
        })
        .boxed()
}

fn expr() -> BoxedStrategy<Expr> {
    leaf()
        .prop_recursive(3, 24, 3, |inner| {
            prop_oneof![
                (arithmetic_op(), inner.clone(), inner.clone())
                    .prop_map(|(op, left, right)| Expr::binary(op, left, right)),
                condition(inner.clone()),
                prop::collection::vec(inner.clone(), 0..3).prop_map(Expr::Array),
                prop::collection::vec((key(), inner), 0..3).prop_map(|pairs| {
                    Expr::Object(
                        pairs
                            .into_iter()
                            .map(|(key, value)| Property::new(key, value))
                            .collect(),
                    )
                }),
            ]
        })
        .boxed()
}

fn simple_statement() -> impl Strategy<Value = Stmt> {
    let location = SourceLocation::default();
    let kind = prop::sample::select(vec![DeclKind::Var, DeclKind::Let, DeclKind::Const]);
    prop_oneof![
        (kind, name(), prop::option::of(expr())).prop_map(move |(kind, name, init)| {
            Stmt::VarDecl {
                kind,
                name,
                init,
                location,
            }
        }),
        (name(), expr()).prop_map(move |(name, value)| Stmt::Assignment {
            name,
            value,
            location,
        }),
        expr().prop_map(move |value| Stmt::Expression { value, location }),
    ]
}

fn statement() -> impl Strategy<Value = Stmt> {
    let location = SourceLocation::default();
    simple_statement().prop_recursive(2, 12, 3, move |inner| {
        prop_oneof![
            (condition(expr()), prop::collection::vec(inner.clone(), 0..3)).prop_map(
                move |(condition, body)| Stmt::While {
                    condition,
                    body,
                    location,
                }
            ),
            (
                name(),
                prop::collection::vec(name(), 0..3),
                prop::collection::vec(inner, 0..2),
                expr(),
            )
                .prop_map(move |(name, params, mut body, value)| {
                    body.push(Stmt::Return { value, location });
                    Stmt::FunctionDecl {
                        name,
                        params,
                        body,
                        location,
                    }
                }),
        ]
    })
}

fn program() -> impl Strategy<Value = Program> {
    prop::collection::vec(statement(), 0..4).prop_map(|statements| Program { statements })
}

fn token_soup() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS.to_vec()), 0..24)
        .prop_map(|parts| parts.join(" "))
}

/// Rendering of `source` parsed under `profile`, `None` when it does not parse
fn reparse(source: &str, profile: Profile) -> Option<String> {
    parse(&tokenize(source, profile).tokens, profile)
        .ok()
        .map(|program| render(&program))
}

proptest! {
    #[test]
    fn test_tokenize_locations_stay_inside_input(source in any::<String>()) {
        for profile in Profile::ALL {
            let out = tokenize(&source, profile);

            for token in &out.tokens {
                let start = token.location.offset;
                prop_assert!(source.is_char_boundary(start));
                prop_assert_eq!(
                    source.get(start..start + token.lexeme.len()),
                    Some(token.lexeme.as_str())
                );
                prop_assert_eq!(token.location.line, 1 + source[..start].matches('\n').count());
            }
            for warning in &out.warnings {
                let at = warning.location().offset;
                prop_assert!(at < source.len() && source.is_char_boundary(at));
            }

            // Must return, whatever the outcome
            let _ = parse(&out.tokens, profile);
        }
    }

    #[test]
    fn test_generated_programs_render_stably(program in program()) {
        let rendered = render(&program);
        prop_assert_eq!(reparse(&rendered, Profile::Full), Some(rendered.clone()));

        for profile in Profile::ALL {
            if let Some(once) = reparse(&rendered, profile) {
                prop_assert_eq!(reparse(&once, profile), Some(once.clone()), "under {}", profile);
            }
        }
    }

    #[test]
    fn test_token_soup_renders_stably(source in token_soup()) {
        for profile in Profile::ALL {
            if let Some(once) = reparse(&source, profile) {
                prop_assert_eq!(
                    reparse(&once, profile),
                    Some(once.clone()),
                    "{} under {}",
                    source,
                    profile
                );
            }
        }
    }
}
