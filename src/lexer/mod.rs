//! Lexical analysis for SQL.
//!
//! Raw scanning is generated by `logos`; this module then classifies words
//! into keywords or identifiers, decodes quoted text, and reports anything
//! the scanner could not match as a diagnostic before moving on.

pub mod keywords;
pub mod token;

use crate::ast::Span;
use crate::diag::Diag;
use logos::Logos;
use smol_str::SmolStr;
use token::{Token, TokenKind};

/// Result of lexical analysis.
///
/// Contains both the tokens produced and any diagnostics encountered during scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerResult {
    /// The tokens produced, including an EOF token at the end.
    pub tokens: Vec<Token>,
    /// Diagnostics (errors) encountered during lexing.
    pub diagnostics: Vec<Diag>,
}

/// Shapes recognized by the generated scanner, before keyword classification.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"--[^\n]*")]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]
enum RawToken {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,
    #[regex(r#""([^"]|"")*""#)]
    DoubleQuoted,
    #[regex(r"`([^`]|``)*`")]
    BacktickQuoted,
    #[regex(r"\[[^\]]*\]")]
    BracketQuoted,
    #[regex(r"'([^']|'')*'")]
    String,
    #[regex(r"0[xX][0-9a-fA-F]+")]
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    Number,
    /// Only matches when the closing `*/` is missing; a complete comment is
    /// the longer match and is skipped.
    #[token("/*")]
    CommentOpen,

    #[token("=")]
    Eq,
    #[token("==")]
    DoubleEq,
    #[token("!=")]
    NotEqBang,
    #[token("<>")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("<<")]
    ShiftLeft,
    #[token(">>")]
    ShiftRight,
    #[token("&")]
    Ampersand,
    #[token("|")]
    Pipe,
    #[token("||")]
    DoublePipe,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("~")]
    Tilde,

    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
}

/// A lexical analyzer for SQL source text.
///
/// The lexer continues scanning after errors to report every bad character
/// in one pass.
pub struct Lexer<'a> {
    /// The source text being lexed.
    source: &'a str,
    /// Accumulated tokens.
    tokens: Vec<Token>,
    /// Accumulated diagnostics.
    diagnostics: Vec<Diag>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Tokenizes the source text and returns the result.
    ///
    /// This consumes the lexer and returns both tokens and diagnostics.
    pub fn tokenize(mut self) -> LexerResult {
        let mut raw = RawToken::lexer(self.source);

        while let Some(scanned) = raw.next() {
            let span = raw.span();
            let text = raw.slice();
            match scanned {
                Ok(kind) => match Self::classify(kind, text) {
                    Some(kind) => self.tokens.push(Token::new(kind, span, text)),
                    None => {
                        self.unterminated(span.start, "block comment", "add the closing `*/`");
                        break;
                    }
                },
                Err(()) => {
                    if self.unrecognized(span, text) {
                        break;
                    }
                }
            }
        }

        // Always add EOF token
        self.tokens.push(Token::eof(self.source.len()));

        LexerResult {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }

    /// Maps a raw token to its kind; `None` for an unterminated block
    /// comment.
    fn classify(raw: RawToken, text: &str) -> Option<TokenKind> {
        let kind = match raw {
            RawToken::Word => keywords::lookup_keyword(text)
                .unwrap_or_else(|| TokenKind::Identifier(SmolStr::new(text))),
            RawToken::DoubleQuoted => TokenKind::Identifier(unquote(text, '"')),
            RawToken::BacktickQuoted => TokenKind::Identifier(unquote(text, '`')),
            RawToken::BracketQuoted => TokenKind::Identifier(SmolStr::new(&text[1..text.len() - 1])),
            RawToken::String => TokenKind::StringLiteral(unquote(text, '\'')),
            RawToken::Number => TokenKind::NumericLiteral,
            RawToken::Eq => TokenKind::Eq,
            RawToken::DoubleEq => TokenKind::DoubleEq,
            RawToken::NotEqBang => TokenKind::NotEqBang,
            RawToken::NotEq => TokenKind::NotEq,
            RawToken::Lt => TokenKind::Lt,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::Gt => TokenKind::Gt,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::ShiftLeft => TokenKind::ShiftLeft,
            RawToken::ShiftRight => TokenKind::ShiftRight,
            RawToken::Ampersand => TokenKind::Ampersand,
            RawToken::Pipe => TokenKind::Pipe,
            RawToken::DoublePipe => TokenKind::DoublePipe,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Percent => TokenKind::Percent,
            RawToken::Tilde => TokenKind::Tilde,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Dot => TokenKind::Dot,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::Question => TokenKind::Question,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::CommentOpen => return None,
        };
        Some(kind)
    }

    /// Reports input the scanner could not match.
    ///
    /// Returns true for an unterminated literal, which runs to the end of
    /// the source.
    fn unrecognized(&mut self, span: Span, text: &str) -> bool {
        match text.chars().next() {
            Some(quote @ ('\'' | '"' | '`' | '[')) => {
                let what = if quote == '\'' {
                    "string literal"
                } else {
                    "quoted identifier"
                };
                self.unterminated(span.start, what, "add the closing quote");
                true
            }
            Some(ch) => {
                let diag = Diag::error(format!("unexpected character '{ch}'"))
                    .with_primary_label(span, "here")
                    .with_code("L001");
                self.diagnostics.push(diag);
                false
            }
            None => false,
        }
    }

    /// Reports a literal or comment that runs to the end of the source.
    fn unterminated(&mut self, start: usize, what: &str, help: &str) {
        let diag = Diag::error(format!("unterminated {what}"))
            .with_primary_label(start..self.source.len(), "starts here")
            .with_help(help)
            .with_code("L002");
        self.diagnostics.push(diag);
    }
}

/// Strips the surrounding quotes and collapses doubled quote characters.
fn unquote(text: &str, quote: char) -> SmolStr {
    let inner = &text[quote.len_utf8()..text.len() - quote.len_utf8()];
    let doubled: String = [quote, quote].iter().collect();
    if inner.contains(&doubled) {
        SmolStr::new(inner.replace(&doubled, &quote.to_string()))
    } else {
        SmolStr::new(inner)
    }
}

/// Convenience function to tokenize source text.
pub fn tokenize(source: &str) -> LexerResult {
    Lexer::new(source).tokenize()
}
