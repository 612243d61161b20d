use crate::parser::lexer::TokenKind;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub operator: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub bar_bg: Color, // Status bar and input background
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(203, 166, 247),        // Mauve for keywords
    string: Color::Rgb(166, 227, 161),         // Green for strings
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    operator: Color::Rgb(148, 226, 213),       // Teal for operators
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    bar_bg: Color::Rgb(50, 50, 70),
};

impl Theme {
    /// Foreground color for a token of the given kind
    pub fn token_color(&self, kind: TokenKind) -> Color {
        use TokenKind::*;
        match kind {
            k if k.is_keyword() => self.keyword,
            StringLiteral => self.string,
            UnterminatedString => self.error,
            IntLiteral | FloatLiteral | BoolLiteral | NullLiteral => self.number,
            Ident => self.fg,
            LParen | RParen | LBrace | RBrace | LBracket | RBracket | Comma | Colon
            | Semicolon => self.comment,
            _ => self.operator,
        }
    }
}
