//! `SELECT` statement AST nodes: result columns, sources, joins and the
//! trailing clauses.

use crate::ast::expression::Expression;
use crate::ast::{Span, Spanned};
use smol_str::SmolStr;

/// A complete `SELECT` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    /// `SELECT DISTINCT`; `SELECT ALL` and plain `SELECT` are both `false`.
    pub distinct: bool,
    /// Result columns, never empty.
    pub columns: Vec<ResultColumn>,
    /// Sources after `FROM`; empty when there is no `FROM` clause.
    pub from: Vec<Queryable>,
    pub where_clause: Option<Expression>,
    pub group_by: Option<GroupBy>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<Limit>,
    pub span: Span,
}

impl SelectStatement {
    /// Deepest expression nesting anywhere in the statement, including
    /// subqueries in `FROM` and inside expressions, plus one for the
    /// statement itself.
    pub fn height(&self) -> usize {
        let columns = self.columns.iter().map(|column| match column {
            ResultColumn::Star { .. } => 0,
            ResultColumn::Expression { expression, .. } => expression.height(),
        });
        let sources = self.from.iter().map(Queryable::height);
        let filter = self.where_clause.iter().map(Expression::height);
        let grouping = self.group_by.iter().flat_map(|group_by| {
            group_by
                .by
                .iter()
                .chain(group_by.having.iter())
                .map(Expression::height)
        });
        let ordering = self
            .order_by
            .iter()
            .flat_map(|order_by| order_by.terms.iter().map(|term| term.expression.height()));
        let limit = self.limit.iter().flat_map(|limit| {
            std::iter::once(&limit.count)
                .chain(limit.offset.iter().map(|offset| &offset.expression))
                .map(Expression::height)
        });

        let below = columns
            .chain(sources)
            .chain(filter)
            .chain(grouping)
            .chain(ordering)
            .chain(limit)
            .max()
            .unwrap_or(0);
        below + 1
    }
}

/// One item of the result column list.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultColumn {
    /// `*` or `table.*`
    Star {
        table: Option<Spanned<SmolStr>>,
        span: Span,
    },
    /// `expression [[AS] alias]`
    Expression {
        expression: Expression,
        alias: Option<Spanned<SmolStr>>,
        span: Span,
    },
}

impl ResultColumn {
    /// Returns the span of this result column.
    pub fn span(&self) -> Span {
        match self {
            ResultColumn::Star { span, .. } => span.clone(),
            ResultColumn::Expression { span, .. } => span.clone(),
        }
    }
}

/// Anything that can appear in a `FROM` list.
#[derive(Debug, Clone, PartialEq)]
pub enum Queryable {
    Table(TableReference),
    Subquery(SelectStatementAsSource),
    Join(JoinClause),
}

impl Queryable {
    /// Returns the span of this source.
    pub fn span(&self) -> Span {
        match self {
            Queryable::Table(table) => table.span.clone(),
            Queryable::Subquery(subquery) => subquery.span.clone(),
            Queryable::Join(join) => join.span.clone(),
        }
    }

    /// Expression height contributed by this source; plain tables add none.
    pub fn height(&self) -> usize {
        match self {
            Queryable::Table(_) => 0,
            Queryable::Subquery(subquery) => subquery.statement.height(),
            Queryable::Join(clause) => {
                let joined = clause.joins.iter().map(|join| {
                    let constraint = match &join.constraint {
                        JoinConstraint::On(expression) => expression.height(),
                        JoinConstraint::Using(_) => 0,
                    };
                    join.query.height().max(constraint)
                });
                joined.fold(clause.primary.height(), usize::max)
            }
        }
    }
}

/// `name [[AS] alias]`
#[derive(Debug, Clone, PartialEq)]
pub struct TableReference {
    pub name: Spanned<SmolStr>,
    pub alias: Option<Spanned<SmolStr>>,
    pub span: Span,
}

/// `(SELECT ...) [[AS] alias]`
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatementAsSource {
    pub statement: Box<SelectStatement>,
    pub alias: Option<Spanned<SmolStr>>,
    pub span: Span,
}

/// A primary source followed by one or more joins.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    pub primary: Box<Queryable>,
    pub joins: Vec<Join>,
    pub span: Span,
}

/// One join step of a [`JoinClause`].
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// `NATURAL` prefix; independent of the operator.
    pub natural: bool,
    pub operator: JoinOperator,
    pub query: Queryable,
    /// Every join in this grammar carries a constraint.
    pub constraint: JoinConstraint,
    pub span: Span,
}

/// The kind of join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinOperator {
    /// `INNER JOIN`, bare `JOIN`, or `NATURAL JOIN`
    Inner,
    /// `LEFT JOIN`
    Left,
    /// `LEFT OUTER JOIN`
    LeftOuter,
    /// `CROSS JOIN`
    Cross,
    /// `,` between two sources of a join chain
    Comma,
}

/// The `ON` / `USING` part of a join.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinConstraint {
    On(Expression),
    Using(Vec<Spanned<SmolStr>>),
}

/// `GROUP BY expr, ... [HAVING expr]`
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBy {
    pub by: Vec<Expression>,
    pub having: Option<Expression>,
    pub span: Span,
}

/// `ORDER BY term, ...`
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub terms: Vec<OrderingTerm>,
    pub span: Span,
}

/// One `ORDER BY` term.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderingTerm {
    pub expression: Expression,
    pub mode: OrderingMode,
    pub span: Span,
}

/// Sort direction of an [`OrderingTerm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderingMode {
    Ascending,
    Descending,
    #[default]
    Unspecified,
}

/// `LIMIT count [OFFSET offset]` or `LIMIT count, offset`.
///
/// The expressions are stored in source order; the separator records which
/// form was written.
#[derive(Debug, Clone, PartialEq)]
pub struct Limit {
    pub count: Expression,
    pub offset: Option<Offset>,
    pub span: Span,
}

/// The second expression of a [`Limit`].
#[derive(Debug, Clone, PartialEq)]
pub struct Offset {
    pub separator: OffsetSeparator,
    pub separator_span: Span,
    pub expression: Expression,
}

/// How the offset of a [`Limit`] was introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OffsetSeparator {
    /// `OFFSET`
    Keyword,
    /// `,`
    Comma,
}
