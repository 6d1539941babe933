//! SQL `SELECT` parser with rich diagnostics.
//!
//! This library turns the text of a single `SELECT` statement into a typed,
//! span-carrying syntax tree. Errors are reported through miette so they can
//! be rendered against the source text.
//!
//! # Example
//!
//! ```
//! use sql_select_parser::{parse, Queryable, TokenKind, tokenize};
//!
//! let source = "SELECT name FROM users WHERE age > 18";
//!
//! let lexed = tokenize(source);
//! assert_eq!(lexed.tokens[0].kind, TokenKind::Select);
//! assert!(lexed.diagnostics.is_empty());
//!
//! let result = parse(source);
//! assert!(result.diagnostics.is_empty());
//! let statement = result.ast.expect("statement");
//! assert!(matches!(statement.from[0], Queryable::Table(_)));
//!
//! // The tree renders back to SQL.
//! assert_eq!(statement.to_string(), "SELECT name FROM users WHERE age > 18");
//! ```

pub mod ast;
pub mod diag;
pub mod lexer;
pub mod parser;

// Re-export syntax span primitives.
pub use ast::{Span, Spanned};

// Re-export the tree.
pub use ast::{
    BinaryOperator, ColumnReference, Expression, FunctionCall, FunctionParameters, GroupBy,
    IsExpression, Join, JoinClause, JoinConstraint, JoinOperator, Limit, Literal, NumericValue,
    Offset, OffsetSeparator, OrderBy, OrderingMode, OrderingTerm, Queryable, ResultColumn,
    SelectStatement, SelectStatementAsSource, TableReference, UnaryOperator,
};

// Re-export lexer and diagnostic types for convenience.
pub use diag::{Diag, DiagLabel, LabelRole, SourceFile};
pub use lexer::token::{Token, TokenKind};
pub use lexer::{Lexer, LexerResult, tokenize};
pub use parser::{
    NumericError, Parser, ParserConfig, ParsingError, ParsingResult, decode_numeric,
};

use diag::convert_diagnostics_to_reports;
use miette::Report;

/// Result of parsing one statement.
#[derive(Debug)]
pub struct ParseResult {
    /// The parsed statement, or `None` if parsing failed or the input was
    /// empty.
    pub ast: Option<SelectStatement>,
    /// Lexer and parser diagnostics rendered as miette reports.
    pub diagnostics: Vec<Report>,
}

/// Parses a complete `SELECT` statement with default limits.
///
/// The statement may be followed by one `;`. Anything after that is an
/// error. Empty input yields no statement and no diagnostics.
pub fn parse(source: &str) -> ParseResult {
    parse_with_config(source, ParserConfig::default())
}

/// Parses a complete `SELECT` statement with custom limits.
pub fn parse_with_config(source: &str, config: ParserConfig) -> ParseResult {
    let lexed = tokenize(source);
    let mut diagnostics = lexed.diagnostics;

    let mut parser = Parser::with_config(&lexed.tokens, config);
    let ast = if parser.at_end() {
        None
    } else {
        parser.statement().ok()
    };
    diagnostics.extend(parser.errors().iter().map(ParsingError::to_diag));

    let source_file = SourceFile::new(source);
    ParseResult {
        ast,
        diagnostics: convert_diagnostics_to_reports(&diagnostics, &source_file),
    }
}

/// Parses a standalone expression such as `price * 1.2`.
pub fn parse_expression(source: &str) -> Result<Expression, Vec<Report>> {
    let lexed = tokenize(source);
    let mut diagnostics = lexed.diagnostics;

    let mut parser = Parser::new(&lexed.tokens);
    let expression = parser
        .expression()
        .and_then(|expression| parser.expect_end().map(|()| expression));
    diagnostics.extend(parser.errors().iter().map(ParsingError::to_diag));

    match expression {
        Ok(expression) if diagnostics.is_empty() => Ok(expression),
        _ => Err(convert_diagnostics_to_reports(
            &diagnostics,
            &SourceFile::new(source),
        )),
    }
}
