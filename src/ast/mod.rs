//! AST foundation types and node structures.

mod display;
pub mod expression;
pub mod query;
mod span;

// Re-export span types
pub use span::{Span, Spanned, merge_spans};

// Re-export node types
pub use expression::{
    BinaryOperator, ColumnReference, Expression, FunctionCall, FunctionParameters, IsExpression,
    Literal, NumericValue, UnaryOperator,
};
pub use query::{
    GroupBy, Join, JoinClause, JoinConstraint, JoinOperator, Limit, Offset, OffsetSeparator,
    OrderBy, OrderingMode, OrderingTerm, Queryable, ResultColumn, SelectStatement,
    SelectStatementAsSource, TableReference,
};
