//! Recursive-descent parser for `SELECT` statements.
//!
//! The grammar rules are split by area: [`expression`] holds the operator
//! precedence ladder, [`query`] the statement skeleton and its clauses, and
//! [`from`] the `FROM` list with joins. All of them are methods on
//! [`Parser`], which owns the cursor, the nesting guard and the error list.

pub mod base;
mod expression;
mod from;
pub mod numeric;
mod query;

pub use base::{Cursor, ParsingError, ParsingResult};
pub use numeric::{NumericError, decode_numeric};

use crate::ast::{Expression, SelectStatement};
use crate::lexer::token::{Token, TokenKind};
use tracing::debug;

/// Parser limits.
///
/// `max_depth` bounds how deep the parser itself recurses; the default fits
/// in a 2 MiB thread stack in unoptimized builds. `max_expression_height`
/// bounds the height of the trees it returns, so that dropping, comparing
/// or rendering them stays within the stack as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum nesting of expressions, prefix operators and subqueries
    /// before parsing is abandoned.
    pub max_depth: usize,
    /// Maximum [`Expression::height`] of any expression, and
    /// [`SelectStatement::height`] of any statement.
    pub max_expression_height: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: 40,
            max_expression_height: 500,
        }
    }
}

/// `SELECT` parser over a borrowed token sequence.
///
/// Errors that escape [`Parser::select`], [`Parser::expression`] or
/// [`Parser::statement`] are returned to the caller and also kept in
/// [`Parser::errors`].
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    errors: Vec<ParsingError>,
    config: ParserConfig,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser with the default configuration.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self::with_config(tokens, ParserConfig::default())
    }

    /// Creates a parser with custom limits.
    pub fn with_config(tokens: &'a [Token], config: ParserConfig) -> Self {
        Self {
            cursor: Cursor::new(tokens),
            errors: Vec::new(),
            config,
            depth: 0,
        }
    }

    /// Parses a `SELECT` statement at the current position.
    ///
    /// Returns `Ok(None)` without consuming anything when the current token
    /// is not `SELECT`. Tokens after the statement are left unread.
    pub fn select(&mut self) -> ParsingResult<Option<SelectStatement>> {
        debug!(position = self.cursor.position(), "parsing select statement");
        self.depth = 0;
        let result = self.parse_select();
        self.record(result)
    }

    /// Parses one expression at the current position.
    pub fn expression(&mut self) -> ParsingResult<Expression> {
        debug!(position = self.cursor.position(), "parsing expression");
        self.depth = 0;
        let result = self.parse_expression();
        self.record(result)
    }

    /// Parses a complete input: one `SELECT`, an optional `;`, then end of
    /// input.
    pub fn statement(&mut self) -> ParsingResult<SelectStatement> {
        let statement = match self.select()? {
            Some(statement) => statement,
            None => {
                let found = self.cursor.peek().kind.clone();
                let error = self
                    .cursor
                    .error_here(format!("expected a SELECT statement, found {found}"));
                return self.record(Err(error));
            }
        };
        self.expect_end()?;
        Ok(statement)
    }

    /// Accepts an optional `;` and requires end of input after it.
    pub fn expect_end(&mut self) -> ParsingResult<()> {
        self.cursor.match_one(&TokenKind::Semicolon);
        if self.cursor.at_end() {
            return Ok(());
        }
        let found = self.cursor.peek().kind.clone();
        let error = self
            .cursor
            .error_here(format!("unexpected trailing input, found {found}"));
        self.record(Err(error))
    }

    /// Returns true when every token has been consumed.
    pub fn at_end(&self) -> bool {
        self.cursor.at_end()
    }

    /// Errors recorded so far, oldest first.
    pub fn errors(&self) -> &[ParsingError] {
        &self.errors
    }

    fn record<T>(&mut self, result: ParsingResult<T>) -> ParsingResult<T> {
        if let Err(error) = &result {
            debug!(
                message = %error.message,
                span = ?error.span(),
                "parse error recorded"
            );
            self.errors.push(error.clone());
        }
        result
    }

    /// Runs `rule` one nesting level deeper, failing once the configured
    /// limit is reached.
    fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> ParsingResult<T>,
    ) -> ParsingResult<T> {
        if self.depth >= self.config.max_depth {
            return Err(self.cursor.error_here(format!(
                "nesting depth exceeds the configured limit of {}",
                self.config.max_depth
            )));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// Fails once a tree built so far is taller than the configured limit.
    fn check_height(&self, height: usize) -> ParsingResult<()> {
        if height > self.config.max_expression_height {
            return Err(self.cursor.error_here(format!(
                "expression height exceeds the configured limit of {}",
                self.config.max_expression_height
            )));
        }
        Ok(())
    }
}
