//! Token cursor and the parser's error type.
//!
//! Every grammar rule reads tokens through [`Cursor`]; none of them index
//! the token slice directly.

use crate::ast::{Span, Spanned};
use crate::diag::Diag;
use crate::lexer::token::{Token, TokenKind};
use smol_str::SmolStr;

/// A syntax error anchored at the offending token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParsingError {
    /// The token the parser could not accept.
    pub token: Token,
    /// Human-readable description of what was expected.
    pub message: String,
    /// The `(` still waiting for its `)`, when that is what went missing.
    pub unclosed: Option<Span>,
}

impl ParsingError {
    /// Creates an error at `token`.
    pub fn new(token: Token, message: impl Into<String>) -> Self {
        Self {
            token,
            message: message.into(),
            unclosed: None,
        }
    }

    /// Returns the span of the offending token.
    pub fn span(&self) -> Span {
        self.token.span.clone()
    }

    /// Converts this error into a diagnostic labeled at the offending token.
    pub fn to_diag(&self) -> Diag {
        let label = match &self.token.kind {
            TokenKind::Eof => "unexpected end of input".to_string(),
            kind => format!("unexpected {kind}"),
        };
        let diag = Diag::error(self.message.clone())
            .with_primary_label(self.span(), label)
            .with_code("P001");
        match &self.unclosed {
            Some(open) => diag.with_secondary_label(open.clone(), "unclosed '(' opened here"),
            None => diag,
        }
    }
}

/// Result type for grammar rules.
pub type ParsingResult<T> = Result<T, ParsingError>;

/// Read position over a borrowed token slice.
///
/// The position only moves forward, except through [`Cursor::restore`],
/// which the result-column rule uses to undo a failed `table.*` attempt.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
    eof: Token,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the first token.
    ///
    /// If the slice does not end in an EOF token, one is synthesized right
    /// after the last token so that [`Cursor::peek`] always has an answer.
    pub fn new(tokens: &'a [Token]) -> Self {
        let eof = match tokens.last() {
            Some(last) if last.kind == TokenKind::Eof => last.clone(),
            Some(last) => Token::eof(last.span.end),
            None => Token::eof(0),
        };
        Self {
            tokens,
            pos: 0,
            eof,
        }
    }

    /// Returns true when the current token is end-of-input.
    pub fn at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Returns the current token without consuming it.
    pub fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    /// Returns the last consumed token, if any.
    pub fn previous(&self) -> Option<&Token> {
        self.pos.checked_sub(1).and_then(|index| self.tokens.get(index))
    }

    /// Consumes the current token and returns it.
    ///
    /// At end-of-input this returns the EOF token and stays put.
    pub fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.at_end() {
            self.pos += 1;
        }
        token
    }

    /// Checks the current token's kind without consuming it.
    ///
    /// Payload-carrying kinds compare by variant only.
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.peek().kind.same_kind(kind)
    }

    /// Returns true when the current token is an identifier.
    pub fn check_identifier(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Identifier(_))
    }

    /// Consumes the current token if it has the given kind.
    pub fn match_one(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it has any of the given kinds.
    pub fn match_any(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|kind| self.check(kind)) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes an identifier and returns its decoded name.
    pub fn match_identifier(&mut self) -> Option<Spanned<SmolStr>> {
        match &self.peek().kind {
            TokenKind::Identifier(name) => {
                let name = Spanned::new(name.clone(), self.peek().span.clone());
                self.advance();
                Some(name)
            }
            _ => None,
        }
    }

    /// Consumes a token of the given kind or fails at the current token.
    pub fn consume_or_fail(&mut self, kind: &TokenKind, message: &str) -> ParsingResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_here(message))
        }
    }

    /// Consumes the `)` matching `open`; the error points back at `open`.
    pub fn close_paren(&mut self, open: &Token, message: &str) -> ParsingResult<Token> {
        self.consume_or_fail(&TokenKind::RParen, message)
            .map_err(|error| ParsingError {
                unclosed: Some(open.span.clone()),
                ..error
            })
    }

    /// Consumes an identifier or fails at the current token.
    pub fn consume_identifier(&mut self, message: &str) -> ParsingResult<Spanned<SmolStr>> {
        self.match_identifier()
            .ok_or_else(|| self.error_here(message))
    }

    /// Creates an error at the current token.
    pub fn error_here(&self, message: impl Into<String>) -> ParsingError {
        ParsingError::new(self.peek().clone(), message)
    }

    /// Returns the current position, for [`Cursor::restore`].
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Rewinds to a position previously returned by [`Cursor::position`].
    pub fn restore(&mut self, pos: usize) {
        self.pos = pos.min(self.tokens.len());
    }

    /// Returns the span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: usize) -> Span {
        let end = self.previous().map_or(start, |token| token.span.end);
        start..end.max(start)
    }
}
