//! AST foundation types: spans and spanned nodes.

use std::ops::Range;

/// A span representing a byte range in source text.
/// This is the canonical span type used throughout the parser.
pub type Span = Range<usize>;

/// A value with an associated source span.
///
/// Used for the small leaf nodes of the tree (names and aliases) that carry
/// no structure of their own but still need a location for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T> {
    /// The wrapped value.
    pub node: T,
    /// The span in source text where this node appears.
    pub span: Span,
}

impl<T> Spanned<T> {
    /// Creates a new spanned value.
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Merges two spans into a single span covering both.
pub fn merge_spans(start: &Span, end: &Span) -> Span {
    start.start..end.end.max(start.start)
}
