//! Lexer (tokenizer) for script source text
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Lexing never fails: characters that start no token are reported as
//! [`LexWarning`]s and skipped, and scanning carries on with the rest of the
//! input.
//!
//! [`Lexer`] is an iterator, so tokens can be pulled lazily. Each lexer owns its
//! own position and line counter; [`tokenize`] builds a fresh one per call.

use super::ast::{Quote, SourceLocation};
use super::profile::Capabilities;
use std::fmt;
use tracing::{instrument, trace};

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Var,
    Let,
    Const,
    While,
    If,
    Else,
    Function,
    Return,

    // Identifiers and literals
    Ident,
    IntLiteral,
    FloatLiteral,
    StringLiteral,
    BoolLiteral,
    NullLiteral,
    /// A string that reached end of input before its closing quote
    UnterminatedString,

    // Operators
    Assign, // =
    Plus,   // +
    Minus,  // -
    Star,   // *
    Slash,  // /
    EqEq,   // ==
    NotEq,  // !=
    Le,     // <=
    Ge,     // >=
    Lt,     // <
    Gt,     // >
    AndAnd, // &&
    OrOr,   // ||

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]
    Comma,     // ,
    Colon,     // :
    Semicolon, // ;
}

impl TokenKind {
    /// Upper-case name shown in token listings
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Var => "VAR",
            TokenKind::Let => "LET",
            TokenKind::Const => "CONST",
            TokenKind::While => "WHILE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Function => "FUNCTION",
            TokenKind::Return => "RETURN",
            TokenKind::Ident => "ID",
            TokenKind::IntLiteral => "INTEGER",
            TokenKind::FloatLiteral => "FLOAT",
            TokenKind::StringLiteral => "STRING",
            TokenKind::BoolLiteral => "BOOLEAN",
            TokenKind::NullLiteral => "NULL",
            TokenKind::UnterminatedString => "UNTERMINATED_STRING",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "TIMES",
            TokenKind::Slash => "DIVIDE",
            TokenKind::EqEq => "EQ",
            TokenKind::NotEq => "NE",
            TokenKind::Le => "LE",
            TokenKind::Ge => "GE",
            TokenKind::Lt => "LT",
            TokenKind::Gt => "GT",
            TokenKind::AndAnd => "AND",
            TokenKind::OrOr => "OR",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::Comma => "COMMA",
            TokenKind::Colon => "COLON",
            TokenKind::Semicolon => "SEMICOLON",
        }
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Var
                | TokenKind::Let
                | TokenKind::Const
                | TokenKind::While
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::Function
                | TokenKind::Return
        )
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            TokenKind::EqEq
                | TokenKind::NotEq
                | TokenKind::Le
                | TokenKind::Ge
                | TokenKind::Lt
                | TokenKind::Gt
        )
    }
}

/// Literal value carried by literal tokens
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    String { raw: String, quote: Quote },
    Boolean(bool),
    Null,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(n) => write!(f, "{}", n),
            Literal::Float(x) => f.write_str(&format_float(*x)),
            Literal::String { raw, .. } => f.write_str(raw),
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Null => f.write_str("null"),
        }
    }
}

/// Format a float so that it always reads back as a float (`3.0`, not `3`).
///
/// Infinities clamp to `±f64::MAX` and NaN becomes `0.0`, so the text is
/// always a number literal.
pub fn format_float(value: f64) -> String {
    let value = if value.is_nan() {
        0.0
    } else {
        value.clamp(f64::MIN, f64::MAX)
    };
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// A token: kind, source text, optional literal value and location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<Literal>,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            location,
        }
    }

    pub fn with_literal(mut self, literal: Literal) -> Self {
        self.literal = Some(literal);
        self
    }

    /// Value shown next to the kind in token listings
    pub fn value_text(&self) -> String {
        match &self.literal {
            Some(literal) => literal.to_string(),
            None => self.lexeme.clone(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.literal) {
            (TokenKind::Ident, _) => write!(f, "identifier '{}'", self.lexeme),
            (TokenKind::IntLiteral, Some(lit)) => write!(f, "integer literal {}", lit),
            (TokenKind::FloatLiteral, Some(lit)) => write!(f, "float literal {}", lit),
            (TokenKind::StringLiteral, _) => write!(f, "string literal {}", self.lexeme),
            (TokenKind::UnterminatedString, _) => {
                write!(f, "unterminated string literal {}", self.lexeme)
            }
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}

/// Non-fatal lexical diagnostics
#[derive(Debug, Clone, PartialEq)]
pub enum LexWarning {
    /// A character that starts no token; it was skipped
    UnexpectedChar { ch: char, location: SourceLocation },
    /// End of input reached inside a string literal
    UnterminatedString { location: SourceLocation },
    /// Integer literal too large for 64 bits; lexed as a float instead
    IntegerOutOfRange {
        text: String,
        location: SourceLocation,
    },
    /// Number too large for a finite `f64`; lexed as `f64::MAX`
    FloatOutOfRange {
        text: String,
        location: SourceLocation,
    },
}

impl LexWarning {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexWarning::UnexpectedChar { location, .. }
            | LexWarning::UnterminatedString { location }
            | LexWarning::IntegerOutOfRange { location, .. }
            | LexWarning::FloatOutOfRange { location, .. } => *location,
        }
    }
}

impl fmt::Display for LexWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexWarning::UnexpectedChar { ch, location } => {
                write!(f, "Illegal character '{}' at {}", ch.escape_debug(), location)
            }
            LexWarning::UnterminatedString { location } => {
                write!(f, "Unterminated string literal starting at {}", location)
            }
            LexWarning::IntegerOutOfRange { text, location } => write!(
                f,
                "Integer literal {} at {} does not fit in 64 bits, read as a float",
                text, location
            ),
            LexWarning::FloatOutOfRange { text, location } => write!(
                f,
                "Number {} at {} is too large for a float, read as {}",
                text,
                location,
                format_float(f64::MAX)
            ),
        }
    }
}

impl std::error::Error for LexWarning {}

/// Result of tokenizing a whole input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tokens {
    pub tokens: Vec<Token>,
    pub warnings: Vec<LexWarning>,
}

/// Tokenize `source` with a freshly constructed [`Lexer`].
#[instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn tokenize(source: &str, capabilities: impl Into<Capabilities>) -> Tokens {
    let mut out = Tokens::default();
    for item in Lexer::new(source, capabilities) {
        match item {
            Ok(token) => out.tokens.push(token),
            Err(warning) => out.warnings.push(warning),
        }
    }
    trace!(
        tokens = out.tokens.len(),
        warnings = out.warnings.len(),
        "tokenized"
    );
    out
}

/// Lexer for script source
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    offset: usize,
    line: usize,
    column: usize,
    capabilities: Capabilities,
    /// Token to yield after a warning that accompanies it
    pending: Option<Token>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str, capabilities: impl Into<Capabilities>) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            offset: 0,
            line: 1,
            column: 1,
            capabilities: capabilities.into(),
            pending: None,
        }
    }

    /// Scan the next token or warning, `None` at end of input
    fn scan(&mut self) -> Option<Result<Token, LexWarning>> {
        if let Some(token) = self.pending.take() {
            return Some(Ok(token));
        }

        self.skip_whitespace();
        let loc = self.current_location();
        let ch = self.advance()?;

        let token = match ch {
            '"' | '\'' => return Some(self.string_literal(ch, loc)),
            '0'..='9' => return Some(self.number_literal(loc)),
            'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(loc),

            '=' => self.one_or_two('=', TokenKind::EqEq, TokenKind::Assign, loc),
            '<' => self.one_or_two('=', TokenKind::Le, TokenKind::Lt, loc),
            '>' => self.one_or_two('=', TokenKind::Ge, TokenKind::Gt, loc),
            '!' if self.peek() == Some('=') => {
                self.advance();
                Token::new(TokenKind::NotEq, "!=", loc)
            }
            '&' if self.capabilities.logical_conditions && self.peek() == Some('&') => {
                self.advance();
                Token::new(TokenKind::AndAnd, "&&", loc)
            }
            '|' if self.capabilities.logical_conditions && self.peek() == Some('|') => {
                self.advance();
                Token::new(TokenKind::OrOr, "||", loc)
            }
            '+' => Token::new(TokenKind::Plus, "+", loc),
            '-' => Token::new(TokenKind::Minus, "-", loc),
            '*' => Token::new(TokenKind::Star, "*", loc),
            '/' => Token::new(TokenKind::Slash, "/", loc),
            '(' => Token::new(TokenKind::LParen, "(", loc),
            ')' => Token::new(TokenKind::RParen, ")", loc),
            '{' => Token::new(TokenKind::LBrace, "{", loc),
            '}' => Token::new(TokenKind::RBrace, "}", loc),
            '[' => Token::new(TokenKind::LBracket, "[", loc),
            ']' => Token::new(TokenKind::RBracket, "]", loc),
            ',' => Token::new(TokenKind::Comma, ",", loc),
            ':' => Token::new(TokenKind::Colon, ":", loc),
            ';' => Token::new(TokenKind::Semicolon, ";", loc),

            _ => {
                trace!(%ch, line = loc.line, column = loc.column, "skipping illegal character");
                return Some(Err(LexWarning::UnexpectedChar { ch, location: loc }));
            }
        };

        Some(Ok(token))
    }

    /// `first` alone, or `first` + `second` when the next char is `second`
    fn one_or_two(
        &mut self,
        second: char,
        double: TokenKind,
        single: TokenKind,
        loc: SourceLocation,
    ) -> Token {
        let first = self.input[self.position - 1];
        if self.peek() == Some(second) {
            self.advance();
            Token::new(double, format!("{}{}", first, second), loc)
        } else {
            Token::new(single, first.to_string(), loc)
        }
    }

    /// Parse string literal; escapes are kept verbatim
    fn string_literal(
        &mut self,
        delimiter: char,
        loc: SourceLocation,
    ) -> Result<Token, LexWarning> {
        let quote = Quote::from_char(delimiter).unwrap_or(Quote::Double);
        let mut raw = String::new();

        while let Some(ch) = self.advance() {
            if ch == delimiter {
                let lexeme = format!("{}{}{}", delimiter, raw, delimiter);
                return Ok(Token::new(TokenKind::StringLiteral, lexeme, loc)
                    .with_literal(Literal::String { raw, quote }));
            }
            raw.push(ch);
            if ch == '\\' {
                if let Some(escaped) = self.advance() {
                    raw.push(escaped);
                }
            }
        }

        let lexeme = format!("{}{}", delimiter, raw);
        self.pending = Some(
            Token::new(TokenKind::UnterminatedString, lexeme, loc)
                .with_literal(Literal::String { raw, quote }),
        );
        Err(LexWarning::UnterminatedString { location: loc })
    }

    /// Parse numeric literal: digits, optionally `.` and more digits
    fn number_literal(&mut self, loc: SourceLocation) -> Result<Token, LexWarning> {
        let mut text = String::new();
        text.push(self.input[self.position - 1]);
        self.take_digits(&mut text);

        let is_float = self.peek() == Some('.');
        if is_float {
            self.advance();
            text.push('.');
            self.take_digits(&mut text);
        }

        if !is_float {
            if let Ok(value) = text.parse::<i64>() {
                return Ok(Token::new(TokenKind::IntLiteral, text, loc)
                    .with_literal(Literal::Integer(value)));
            }
        }

        // Digits with an optional trailing fraction always parse as f64
        let value = text.parse::<f64>().unwrap_or(f64::INFINITY);
        let finite = value.is_finite();
        let token = Token::new(TokenKind::FloatLiteral, text.clone(), loc)
            .with_literal(Literal::Float(if finite { value } else { f64::MAX }));

        if is_float && finite {
            return Ok(token);
        }
        self.pending = Some(token);
        if finite {
            Err(LexWarning::IntegerOutOfRange {
                text,
                location: loc,
            })
        } else {
            trace!(line = loc.line, column = loc.column, "float literal out of range");
            Err(LexWarning::FloatOutOfRange {
                text,
                location: loc,
            })
        }
    }

    fn take_digits(&mut self, text: &mut String) {
        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            text.push(ch);
            self.advance();
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(self.input[self.position - 1]);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let keyword_literals = self.capabilities.keyword_literals;
        let kind = match ident.as_str() {
            "var" => TokenKind::Var,
            "let" => TokenKind::Let,
            "const" => TokenKind::Const,
            "while" => TokenKind::While,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "function" => TokenKind::Function,
            "return" => TokenKind::Return,
            "true" | "false" if keyword_literals => TokenKind::BoolLiteral,
            "null" if keyword_literals => TokenKind::NullLiteral,
            _ => TokenKind::Ident,
        };

        let literal = match kind {
            TokenKind::BoolLiteral => Some(Literal::Boolean(ident == "true")),
            TokenKind::NullLiteral => Some(Literal::Null),
            _ => None,
        };
        let mut token = Token::new(kind, ident, loc);
        token.literal = literal;
        token
    }

    /// Skip spaces, tabs, carriage returns and newlines
    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\r' | '\n') = self.peek() {
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;
        self.offset += ch.len_utf8();

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.offset, self.line, self.column)
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexWarning>;

    fn next(&mut self) -> Option<Self::Item> {
        self.scan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::profile::Profile;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source, Profile::Full)
            .tokens
            .iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let out = tokenize("var x = 5;", Profile::Full);
        let tokens = &out.tokens;

        assert!(out.warnings.is_empty());
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[0].kind, TokenKind::Var);
        assert!(matches!(&tokens[1], Token { kind: TokenKind::Ident, lexeme, .. } if lexeme == "x"));
        assert_eq!(tokens[2].kind, TokenKind::Assign);
        assert_eq!(tokens[3].literal, Some(Literal::Integer(5)));
        assert_eq!(tokens[4].kind, TokenKind::Semicolon);
    }

    #[test]
    fn test_operators_longest_match() {
        use TokenKind::*;
        assert_eq!(
            kinds("== != <= >= < > = && ||"),
            vec![EqEq, NotEq, Le, Ge, Lt, Gt, Assign, AndAnd, OrOr]
        );
        assert_eq!(kinds("a<=b"), vec![Ident, Le, Ident]);
        assert_eq!(kinds("+-*/"), vec![Plus, Minus, Star, Slash]);
    }

    #[test]
    fn test_numbers_keep_integer_float_distinction() {
        let out = tokenize("3 3. 3.0 42.25", Profile::Full);
        let literals: Vec<_> = out.tokens.iter().map(|t| t.literal.clone()).collect();
        assert_eq!(
            literals,
            vec![
                Some(Literal::Integer(3)),
                Some(Literal::Float(3.0)),
                Some(Literal::Float(3.0)),
                Some(Literal::Float(42.25)),
            ]
        );
        assert_eq!(out.tokens[1].lexeme, "3.");
    }

    #[test]
    fn test_integer_overflow_becomes_float_with_warning() {
        let out = tokenize("99999999999999999999", Profile::Full);
        assert_eq!(out.tokens.len(), 1);
        assert_eq!(out.tokens[0].kind, TokenKind::FloatLiteral);
        assert!(matches!(
            out.warnings[0],
            LexWarning::IntegerOutOfRange { .. }
        ));
    }

    #[test]
    fn test_float_overflow_is_clamped_with_warning() {
        let digits = "9".repeat(400);
        for source in [format!("{digits}."), format!("{digits}.5"), digits.clone()] {
            let out = tokenize(&source, Profile::Full);
            assert_eq!(out.tokens.len(), 1);
            assert_eq!(out.tokens[0].kind, TokenKind::FloatLiteral);
            assert_eq!(out.tokens[0].literal, Some(Literal::Float(f64::MAX)));
            assert!(matches!(
                &out.warnings[..],
                [LexWarning::FloatOutOfRange { text, .. }] if *text == source
            ));
        }
    }

    #[test]
    fn test_format_float_never_produces_non_numbers() {
        assert_eq!(format_float(3.0), "3.0");
        assert_eq!(format_float(0.25), "0.25");
        assert_eq!(format_float(f64::INFINITY), format_float(f64::MAX));
        assert_eq!(format_float(f64::NAN), "0.0");

        let text = format_float(f64::INFINITY);
        assert!(text.ends_with(".0"));
        let out = tokenize(&text, Profile::Full);
        assert!(out.warnings.is_empty());
        assert_eq!(out.tokens[0].literal, Some(Literal::Float(f64::MAX)));
    }

    #[test]
    fn test_string_literal_keeps_escapes_raw() {
        let out = tokenize(r#""hello\nworld" 'it\'s'"#, Profile::Full);
        assert!(out.warnings.is_empty());
        assert_eq!(
            out.tokens[0].literal,
            Some(Literal::String {
                raw: r"hello\nworld".to_string(),
                quote: Quote::Double
            })
        );
        assert_eq!(
            out.tokens[1].literal,
            Some(Literal::String {
                raw: r"it\'s".to_string(),
                quote: Quote::Single
            })
        );
    }

    #[test]
    fn test_unterminated_string() {
        let out = tokenize("x = \"abc", Profile::Full);
        assert_eq!(out.warnings.len(), 1);
        assert!(matches!(
            out.warnings[0],
            LexWarning::UnterminatedString { location } if location.column == 5
        ));
        assert_eq!(out.tokens.last().map(|t| t.kind), Some(TokenKind::UnterminatedString));
    }

    #[test]
    fn test_unknown_character_is_skipped() {
        let out = tokenize("a @ b", Profile::Full);
        assert_eq!(out.tokens.len(), 2);
        assert_eq!(out.tokens[1].lexeme, "b");
        assert_eq!(out.tokens[1].location.column, 5);
        assert_eq!(
            out.warnings,
            vec![LexWarning::UnexpectedChar {
                ch: '@',
                location: SourceLocation::new(2, 1, 3)
            }]
        );
    }

    #[test]
    fn test_keywords_and_keyword_literals() {
        use TokenKind::*;
        assert_eq!(
            kinds("var let const while if else function return true false null foo_1"),
            vec![
                Var,
                Let,
                Const,
                While,
                If,
                Else,
                Function,
                Return,
                BoolLiteral,
                BoolLiteral,
                NullLiteral,
                Ident,
            ]
        );

        let out = tokenize("true null", Profile::Arrays);
        assert!(out.tokens.iter().all(|t| t.kind == Ident));
    }

    #[test]
    fn test_logical_operators_depend_on_profile() {
        let out = tokenize("a && b", Profile::Declarations);
        assert_eq!(out.tokens.len(), 2);
        assert_eq!(out.warnings.len(), 2);
    }

    #[test]
    fn test_newlines_advance_line_counter() {
        let out = tokenize("a\n  b\r\n\tc", Profile::Full);
        let lines: Vec<_> = out
            .tokens
            .iter()
            .map(|t| (t.location.line, t.location.column))
            .collect();
        assert_eq!(lines, vec![(1, 1), (2, 3), (3, 2)]);
    }

    #[test]
    fn test_offsets_are_bytes() {
        let out = tokenize("é x", Profile::Full);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.tokens[0].location.offset, 3);
    }

    #[test]
    fn test_lexers_do_not_share_state() {
        let first: Vec<_> = Lexer::new("a\nb", Profile::Full).collect();
        let second: Vec<_> = Lexer::new("c", Profile::Full).collect();
        assert_eq!(first.len(), 2);
        match &second[0] {
            Ok(token) => assert_eq!(token.location, SourceLocation::new(0, 1, 1)),
            Err(w) => panic!("unexpected warning {w}"),
        }
    }
}
