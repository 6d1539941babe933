//! Token types and representations for SQL lexical analysis.

use crate::ast::Span;
use smol_str::SmolStr;
use std::fmt;
use std::mem;

/// The kind of a lexical token in a SQL `SELECT` statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Statement and clause keywords
    Select,
    Distinct,
    All,
    From,
    Where,
    Group,
    By,
    Having,
    Order,
    Asc,
    Desc,
    Limit,
    Offset,
    As,

    // Join keywords
    Natural,
    Left,
    Inner,
    Cross,
    Outer,
    Join,
    On,
    Using,

    // Operator keywords
    Or,
    And,
    Not,
    Is,
    In,
    Like,
    Glob,
    Match,
    Regexp,

    // Literal keywords
    Null,
    True,
    False,

    // Identifiers (bare or quoted), carrying the decoded name
    Identifier(SmolStr),

    // Literals
    StringLiteral(SmolStr),
    /// Numeric literal; the text is kept in [`Token::lexeme`] and decoded by the parser.
    NumericLiteral,

    // Operators
    Eq,         // =
    DoubleEq,   // ==
    NotEqBang,  // !=
    NotEq,      // <>
    Lt,         // <
    LtEq,       // <=
    Gt,         // >
    GtEq,       // >=
    ShiftLeft,  // <<
    ShiftRight, // >>
    Ampersand,  // &
    Pipe,       // |
    DoublePipe, // ||
    Plus,       // +
    Minus,      // -
    Star,       // *
    Slash,      // /
    Percent,    // %
    Tilde,      // ~

    // Punctuation
    Comma,     // ,
    Dot,       // .
    LParen,    // (
    RParen,    // )
    Question,  // ?
    Colon,     // :
    Semicolon, // ;

    // Special
    Eof,
}

impl TokenKind {
    /// Returns true if both kinds are the same variant, ignoring payloads.
    ///
    /// `Identifier("a")` and `Identifier("b")` are the same kind.
    pub fn same_kind(&self, other: &TokenKind) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Select => write!(f, "SELECT"),
            TokenKind::Distinct => write!(f, "DISTINCT"),
            TokenKind::All => write!(f, "ALL"),
            TokenKind::From => write!(f, "FROM"),
            TokenKind::Where => write!(f, "WHERE"),
            TokenKind::Group => write!(f, "GROUP"),
            TokenKind::By => write!(f, "BY"),
            TokenKind::Having => write!(f, "HAVING"),
            TokenKind::Order => write!(f, "ORDER"),
            TokenKind::Asc => write!(f, "ASC"),
            TokenKind::Desc => write!(f, "DESC"),
            TokenKind::Limit => write!(f, "LIMIT"),
            TokenKind::Offset => write!(f, "OFFSET"),
            TokenKind::As => write!(f, "AS"),
            TokenKind::Natural => write!(f, "NATURAL"),
            TokenKind::Left => write!(f, "LEFT"),
            TokenKind::Inner => write!(f, "INNER"),
            TokenKind::Cross => write!(f, "CROSS"),
            TokenKind::Outer => write!(f, "OUTER"),
            TokenKind::Join => write!(f, "JOIN"),
            TokenKind::On => write!(f, "ON"),
            TokenKind::Using => write!(f, "USING"),
            TokenKind::Or => write!(f, "OR"),
            TokenKind::And => write!(f, "AND"),
            TokenKind::Not => write!(f, "NOT"),
            TokenKind::Is => write!(f, "IS"),
            TokenKind::In => write!(f, "IN"),
            TokenKind::Like => write!(f, "LIKE"),
            TokenKind::Glob => write!(f, "GLOB"),
            TokenKind::Match => write!(f, "MATCH"),
            TokenKind::Regexp => write!(f, "REGEXP"),
            TokenKind::Null => write!(f, "NULL"),
            TokenKind::True => write!(f, "TRUE"),
            TokenKind::False => write!(f, "FALSE"),
            TokenKind::Identifier(name) => write!(f, "identifier `{name}`"),
            TokenKind::StringLiteral(s) => write!(f, "'{s}'"),
            TokenKind::NumericLiteral => write!(f, "numeric literal"),
            TokenKind::Eq => write!(f, "="),
            TokenKind::DoubleEq => write!(f, "=="),
            TokenKind::NotEqBang => write!(f, "!="),
            TokenKind::NotEq => write!(f, "<>"),
            TokenKind::Lt => write!(f, "<"),
            TokenKind::LtEq => write!(f, "<="),
            TokenKind::Gt => write!(f, ">"),
            TokenKind::GtEq => write!(f, ">="),
            TokenKind::ShiftLeft => write!(f, "<<"),
            TokenKind::ShiftRight => write!(f, ">>"),
            TokenKind::Ampersand => write!(f, "&"),
            TokenKind::Pipe => write!(f, "|"),
            TokenKind::DoublePipe => write!(f, "||"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Percent => write!(f, "%"),
            TokenKind::Tilde => write!(f, "~"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Dot => write!(f, "."),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Question => write!(f, "?"),
            TokenKind::Colon => write!(f, ":"),
            TokenKind::Semicolon => write!(f, ";"),
            TokenKind::Eof => write!(f, "<EOF>"),
        }
    }
}

/// A lexical token with its kind, source span and exact source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The span in source text.
    pub span: Span,
    /// The source text covered by the token, before any decoding.
    pub lexeme: SmolStr,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, span: Span, lexeme: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            span,
            lexeme: lexeme.into(),
        }
    }

    /// Creates an end-of-input token at `pos`.
    pub fn eof(pos: usize) -> Self {
        Self::new(TokenKind::Eof, pos..pos, "")
    }
}
