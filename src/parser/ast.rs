// AST (Abstract Syntax Tree) definitions for the script parser

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    /// Byte offset into the source text
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Declaration keyword of a variable declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Var,
    Let,
    Const,
}

impl DeclKind {
    pub fn keyword(self) -> &'static str {
        match self {
            DeclKind::Var => "var",
            DeclKind::Let => "let",
            DeclKind::Const => "const",
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge
        )
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinOp::And | BinOp::Or)
    }
}

/// Delimiter a string literal was written with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Single,
    Double,
}

impl Quote {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '\'' => Some(Quote::Single),
            '"' => Some(Quote::Double),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }
}

/// Object literal key: an identifier or a numeric literal in textual form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Ident(String),
    Numeric(String),
}

impl PropertyKey {
    pub fn as_str(&self) -> &str {
        match self {
            PropertyKey::Ident(name) => name,
            PropertyKey::Numeric(text) => text,
        }
    }
}

/// One `key: value` pair of an object literal
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: PropertyKey,
    pub value: Expr,
}

impl Property {
    pub fn new(key: PropertyKey, value: Expr) -> Self {
        Property { key, value }
    }
}

/// Expressions
///
/// Expressions carry no source location so that trees compare structurally;
/// the enclosing statement records where it started.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(String),
    IntegerLiteral(i64),
    FloatLiteral(f64),
    /// Quotes stripped, escapes left exactly as written
    StringLiteral {
        raw: String,
        quote: Quote,
    },
    BooleanLiteral(bool),
    NullLiteral,
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Array(Vec<Expr>),
    /// Properties in source order; duplicate keys are kept
    Object(Vec<Property>),
}

impl Expr {
    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn ident(name: &str) -> Self {
        Expr::Identifier(name.to_string())
    }

    /// True for comparisons and logical combinations of them
    pub fn is_condition(&self) -> bool {
        match self {
            Expr::Binary { op, .. } if op.is_comparison() => true,
            Expr::Binary { op, left, right } if op.is_logical() => {
                left.is_condition() && right.is_condition()
            }
            _ => false,
        }
    }
}

/// Statements
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl {
        kind: DeclKind,
        name: String,
        init: Option<Expr>,
        location: SourceLocation,
    },
    Assignment {
        name: String,
        value: Expr,
        location: SourceLocation,
    },
    Expression {
        value: Expr,
        location: SourceLocation,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
        location: SourceLocation,
    },
    FunctionDecl {
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
        location: SourceLocation,
    },
    Return {
        value: Expr,
        location: SourceLocation,
    },
}

impl Stmt {
    /// Get the source location of this statement
    pub fn location(&self) -> &SourceLocation {
        match self {
            Stmt::VarDecl { location, .. } => location,
            Stmt::Assignment { location, .. } => location,
            Stmt::Expression { location, .. } => location,
            Stmt::While { location, .. } => location,
            Stmt::FunctionDecl { location, .. } => location,
            Stmt::Return { location, .. } => location,
        }
    }

    /// Whether the statement ends with a block rather than a `;`
    pub fn is_block_statement(&self) -> bool {
        matches!(self, Stmt::While { .. } | Stmt::FunctionDecl { .. })
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}
