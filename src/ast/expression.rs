//! Expression AST nodes.
//!
//! Every variant carries the span it was parsed from. Operators are folded
//! left-associatively by the parser, so a tree's shape already encodes
//! precedence and no explicit grouping is stored beyond
//! [`Expression::Parenthesized`].

use crate::ast::query::SelectStatement;
use crate::ast::{Span, Spanned};
use smol_str::SmolStr;

/// Represents any expression in a `SELECT` statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Literal value (numeric, string, NULL, boolean)
    Literal(Literal, Span),

    /// Prefix operator (`-`, `+`, `~`, `NOT`)
    Unary(UnaryOperator, Box<Expression>, Span),

    /// Left-associative binary operator
    Binary(BinaryOperator, Box<Expression>, Box<Expression>, Span),

    /// `left IS [NOT] right`
    Is(IsExpression),

    /// Column reference, optionally qualified by a table name
    Column(ColumnReference),

    /// Function call
    FunctionCall(FunctionCall),

    /// Parenthesized `SELECT` used as a value
    Subquery(Box<SelectStatement>, Span),

    /// Parenthesized expression
    Parenthesized(Box<Expression>, Span),

    /// Positional (`?`) or numbered (`?N`) bind variable
    NumberedVariable(Option<u32>, Span),

    /// Named bind variable; the name includes the leading colon (`:name`)
    NamedVariable(SmolStr, Span),
}

impl Expression {
    /// Returns the span of this expression.
    pub fn span(&self) -> Span {
        match self {
            Expression::Literal(_, span) => span.clone(),
            Expression::Unary(_, _, span) => span.clone(),
            Expression::Binary(_, _, _, span) => span.clone(),
            Expression::Is(is) => is.span.clone(),
            Expression::Column(column) => column.span.clone(),
            Expression::FunctionCall(call) => call.span.clone(),
            Expression::Subquery(_, span) => span.clone(),
            Expression::Parenthesized(_, span) => span.clone(),
            Expression::NumberedVariable(_, span) => span.clone(),
            Expression::NamedVariable(_, span) => span.clone(),
        }
    }

    /// Number of nodes on the longest path from this expression to a leaf,
    /// counting through subqueries.
    pub fn height(&self) -> usize {
        let below = match self {
            Expression::Literal(..)
            | Expression::Column(_)
            | Expression::NumberedVariable(..)
            | Expression::NamedVariable(..) => 0,
            Expression::Unary(_, operand, _) => operand.height(),
            Expression::Binary(_, left, right, _) => left.height().max(right.height()),
            Expression::Is(is) => is.left.height().max(is.right.height()),
            Expression::FunctionCall(call) => match &call.parameters {
                FunctionParameters::Star => 0,
                FunctionParameters::Arguments { arguments, .. } => {
                    arguments.iter().map(Expression::height).max().unwrap_or(0)
                }
            },
            Expression::Subquery(statement, _) => statement.height(),
            Expression::Parenthesized(inner, _) => inner.height(),
        };
        below + 1
    }
}

/// Literal value types.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Numeric literal with its decoded value and original text.
    Numeric {
        value: NumericValue,
        lexeme: SmolStr,
    },

    /// String literal, with doubled quotes already collapsed
    String(SmolStr),

    /// NULL
    Null,

    /// TRUE or FALSE
    Boolean(bool),
}

/// A decoded numeric literal.
///
/// Integer forms stay exact; anything with a fraction or exponent, and
/// decimal integers too large for `i64`, become floats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericValue {
    Integer(i64),
    Float(f64),
}

impl NumericValue {
    /// Returns the value as an integer, truncating floats toward zero.
    pub fn as_i64(&self) -> i64 {
        match *self {
            NumericValue::Integer(value) => value,
            NumericValue::Float(value) => value as i64,
        }
    }

    /// Returns the value as a float.
    pub fn as_f64(&self) -> f64 {
        match *self {
            NumericValue::Integer(value) => value as f64,
            NumericValue::Float(value) => value,
        }
    }

    /// Returns true if the literal was decoded as an integer.
    pub fn is_integer(&self) -> bool {
        matches!(self, NumericValue::Integer(_))
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// -
    Minus,
    /// +
    Plus,
    /// ~
    BitwiseNot,
    /// NOT
    Not,
}

/// Binary operators, grouped by precedence level from loosest to tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Or,
    And,

    /// `=` or `==`
    Equal,
    /// `!=` or `<>`
    NotEqual,
    In,
    Like,
    Glob,
    Match,
    Regexp,

    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,

    ShiftLeft,
    ShiftRight,
    BitwiseAnd,
    BitwiseOr,

    Add,
    Subtract,

    Multiply,
    Divide,
    Modulo,

    Concatenate,
}

/// `left IS [NOT] right`.
///
/// Kept apart from [`BinaryOperator`] so the negation is a flag rather than
/// a separate operator.
#[derive(Debug, Clone, PartialEq)]
pub struct IsExpression {
    pub negated: bool,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub span: Span,
}

/// A column reference such as `price` or `orders.price`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnReference {
    pub table: Option<Spanned<SmolStr>>,
    pub column: Spanned<SmolStr>,
    pub span: Span,
}

/// A function call such as `count(*)` or `max(DISTINCT price)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: Spanned<SmolStr>,
    pub parameters: FunctionParameters,
    pub span: Span,
}

/// The argument list of a [`FunctionCall`].
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionParameters {
    /// `f(*)`
    Star,
    /// `f([DISTINCT] a, b, ...)`, possibly empty
    Arguments {
        distinct: bool,
        arguments: Vec<Expression>,
    },
}
