//! Common test utilities
//!
//! Shared helpers for the integration test files.
//!
//! # Diagnostic Helpers
//! - [`format_diagnostics`] - Format diagnostics for display in assertions
//! - [`assert_parse_error_at`] - Assert that parsing fails with a label at a span
//!
//! # Parsing Helpers
//! - [`parse_cleanly`] - Parse a statement, panicking on diagnostics
//! - [`parse_statement`] - Alias of [`parse_cleanly`] for readability in join tests
//! - [`expression_of`] - Parse `SELECT <expr>` and return the expression
//!
//! # Tree Helpers
//! - [`without_spans`] - Debug rendering of a tree with every span blanked

#![allow(dead_code)]

use miette::Report;
use sql_select_parser::{Expression, ResultColumn, SelectStatement, Span, parse};
use std::fmt::Debug;

/// Format diagnostics for display in assertion messages.
pub fn format_diagnostics(diags: &[Report]) -> String {
    diags
        .iter()
        .map(|diag| format!("{diag:?}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse `source` and return its statement.
///
/// # Panics
/// Panics if any diagnostics are produced or no statement comes back.
pub fn parse_cleanly(source: &str) -> SelectStatement {
    let result = parse(source);
    assert!(
        result.diagnostics.is_empty(),
        "unexpected diagnostics for `{source}`:\n{}",
        format_diagnostics(&result.diagnostics)
    );
    result
        .ast
        .unwrap_or_else(|| panic!("no statement for `{source}`"))
}

pub fn parse_statement(source: &str) -> SelectStatement {
    parse_cleanly(source)
}

/// Parse `SELECT <expression>` and return the single result expression.
pub fn expression_of(expression: &str) -> Expression {
    let source = format!("SELECT {expression}");
    let statement = parse_cleanly(&source);
    assert_eq!(statement.columns.len(), 1, "more than one column in `{source}`");
    match statement.columns.into_iter().next() {
        Some(ResultColumn::Expression { expression, .. }) => expression,
        other => panic!("expected an expression column in `{source}`, got {other:?}"),
    }
}

/// Assert that `source` fails to parse and that the first diagnostic
/// contains `message` and is labeled at `span`.
pub fn assert_parse_error_at(source: &str, message: &str, span: Span) {
    let result = parse(source);
    assert!(result.ast.is_none(), "`{source}` should not parse");
    let first = result
        .diagnostics
        .first()
        .unwrap_or_else(|| panic!("no diagnostics for `{source}`"));
    assert!(
        first.to_string().contains(message),
        "expected `{message}` for `{source}`, got:\n{}",
        format_diagnostics(&result.diagnostics)
    );
    let label = first
        .labels()
        .and_then(|mut labels| labels.next())
        .unwrap_or_else(|| panic!("diagnostic for `{source}` has no label"));
    assert_eq!(
        label.offset()..label.offset() + label.len(),
        span,
        "label span for `{source}`"
    );
}

/// Debug rendering of `tree` with every `start..end` span replaced by `_`.
///
/// Two trees with equal output differ only in where their nodes sit in the
/// source.
pub fn without_spans(tree: &impl Debug) -> String {
    let chars: Vec<char> = format!("{tree:?}").chars().collect();
    let mut out = String::with_capacity(chars.len());
    let mut index = 0;
    while index < chars.len() {
        match span_end(&chars, index) {
            Some(end) => {
                out.push('_');
                index = end;
            }
            None => {
                out.push(chars[index]);
                index += 1;
            }
        }
    }
    out
}

fn span_end(chars: &[char], start: usize) -> Option<usize> {
    if start > 0 && chars[start - 1].is_ascii_digit() {
        return None;
    }
    let digits = |from: usize| {
        chars
            .get(from..)
            .map_or(0, |rest| rest.iter().take_while(|c| c.is_ascii_digit()).count())
    };
    let first = digits(start);
    let dots = start + first;
    if first == 0 || chars.get(dots..dots + 2) != Some(&['.', '.'][..]) {
        return None;
    }
    let second = digits(dots + 2);
    (second > 0).then_some(dots + 2 + second)
}
