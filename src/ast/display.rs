//! Canonical SQL rendering via `fmt::Display`.
//!
//! Output re-parses to a tree that renders identically, so
//! `parse(stmt.to_string())` is a fixed point of rendering.

use crate::ast::expression::{
    BinaryOperator, ColumnReference, Expression, FunctionCall, FunctionParameters, IsExpression,
    Literal, UnaryOperator,
};
use crate::ast::query::{
    GroupBy, Join, JoinClause, JoinConstraint, JoinOperator, Limit, OffsetSeparator, OrderBy,
    OrderingMode, OrderingTerm, Queryable, ResultColumn, SelectStatement,
    SelectStatementAsSource, TableReference,
};
use crate::ast::Spanned;
use crate::lexer::keywords;
use smol_str::SmolStr;
use std::fmt;

fn comma_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Returns true if `name` cannot be written as a bare word.
fn needs_quoting(name: &str) -> bool {
    let mut bytes = name.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_alphabetic() || first == b'_' => {}
        _ => return true,
    }
    bytes.any(|b| !(b.is_ascii_alphanumeric() || b == b'_')) || keywords::is_keyword(name)
}

fn write_identifier(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if needs_quoting(name) {
        write!(f, "\"{}\"", name.replace('"', "\"\""))
    } else {
        f.write_str(name)
    }
}

fn write_alias(f: &mut fmt::Formatter<'_>, alias: &Option<Spanned<SmolStr>>) -> fmt::Result {
    if let Some(alias) = alias {
        f.write_str(" AS ")?;
        write_identifier(f, &alias.node)?;
    }
    Ok(())
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Numeric { lexeme, .. } => f.write_str(lexeme),
            Literal::String(value) => write!(f, "'{}'", value.replace('\'', "''")),
            Literal::Null => f.write_str("NULL"),
            Literal::Boolean(true) => f.write_str("TRUE"),
            Literal::Boolean(false) => f.write_str("FALSE"),
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnaryOperator::Minus => "-",
            UnaryOperator::Plus => "+",
            UnaryOperator::BitwiseNot => "~",
            UnaryOperator::Not => "NOT",
        })
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinaryOperator::Or => "OR",
            BinaryOperator::And => "AND",
            BinaryOperator::Equal => "=",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::In => "IN",
            BinaryOperator::Like => "LIKE",
            BinaryOperator::Glob => "GLOB",
            BinaryOperator::Match => "MATCH",
            BinaryOperator::Regexp => "REGEXP",
            BinaryOperator::Less => "<",
            BinaryOperator::LessOrEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterOrEqual => ">=",
            BinaryOperator::ShiftLeft => "<<",
            BinaryOperator::ShiftRight => ">>",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Concatenate => "||",
        })
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(literal, _) => write!(f, "{literal}"),
            // NOT needs a space; symbolic operators get one too so `- -1`
            // never collapses into a `--` comment.
            Expression::Unary(operator, operand, _) => write!(f, "{operator} {operand}"),
            Expression::Binary(operator, left, right, _) => {
                write!(f, "{left} {operator} {right}")
            }
            Expression::Is(is) => write!(f, "{is}"),
            Expression::Column(column) => write!(f, "{column}"),
            Expression::FunctionCall(call) => write!(f, "{call}"),
            Expression::Subquery(statement, _) => write!(f, "({statement})"),
            Expression::Parenthesized(inner, _) => write!(f, "({inner})"),
            Expression::NumberedVariable(Some(index), _) => write!(f, "?{index}"),
            Expression::NumberedVariable(None, _) => f.write_str("?"),
            Expression::NamedVariable(name, _) => {
                f.write_str(":")?;
                write_identifier(f, name.strip_prefix(':').unwrap_or(name))
            }
        }
    }
}

impl fmt::Display for IsExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let not = if self.negated { " NOT" } else { "" };
        write!(f, "{} IS{not} {}", self.left, self.right)
    }
}

impl fmt::Display for ColumnReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(table) = &self.table {
            write_identifier(f, &table.node)?;
            f.write_str(".")?;
        }
        write_identifier(f, &self.column.node)
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_identifier(f, &self.name.node)?;
        f.write_str("(")?;
        match &self.parameters {
            FunctionParameters::Star => f.write_str("*")?,
            FunctionParameters::Arguments {
                distinct,
                arguments,
            } => {
                if *distinct {
                    f.write_str("DISTINCT ")?;
                }
                comma_list(f, arguments)?;
            }
        }
        f.write_str(")")
    }
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        comma_list(f, &self.columns)?;

        if !self.from.is_empty() {
            f.write_str(" FROM ")?;
            comma_list(f, &self.from)?;
        }
        if let Some(predicate) = &self.where_clause {
            write!(f, " WHERE {predicate}")?;
        }
        if let Some(group_by) = &self.group_by {
            write!(f, " {group_by}")?;
        }
        if let Some(order_by) = &self.order_by {
            write!(f, " {order_by}")?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " {limit}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ResultColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultColumn::Star { table: None, .. } => f.write_str("*"),
            ResultColumn::Star {
                table: Some(table), ..
            } => {
                write_identifier(f, &table.node)?;
                f.write_str(".*")
            }
            ResultColumn::Expression {
                expression, alias, ..
            } => {
                write!(f, "{expression}")?;
                write_alias(f, alias)
            }
        }
    }
}

impl fmt::Display for Queryable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Queryable::Table(table) => write!(f, "{table}"),
            Queryable::Subquery(subquery) => write!(f, "{subquery}"),
            Queryable::Join(join) => write!(f, "{join}"),
        }
    }
}

impl fmt::Display for TableReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_identifier(f, &self.name.node)?;
        write_alias(f, &self.alias)
    }
}

impl fmt::Display for SelectStatementAsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.statement)?;
        write_alias(f, &self.alias)
    }
}

impl fmt::Display for JoinClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.primary)?;
        for join in &self.joins {
            write!(f, "{join}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self.operator {
            JoinOperator::Comma => None,
            JoinOperator::Inner => Some("INNER JOIN"),
            JoinOperator::Left => Some("LEFT JOIN"),
            JoinOperator::LeftOuter => Some("LEFT OUTER JOIN"),
            JoinOperator::Cross => Some("CROSS JOIN"),
        };
        match keyword {
            None => f.write_str(",")?,
            Some(keyword) => {
                if self.natural {
                    f.write_str(" NATURAL")?;
                }
                write!(f, " {keyword}")?;
            }
        }
        write!(f, " {} {}", self.query, self.constraint)
    }
}

impl fmt::Display for JoinConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinConstraint::On(predicate) => write!(f, "ON {predicate}"),
            JoinConstraint::Using(columns) => {
                f.write_str("USING (")?;
                for (i, column) in columns.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_identifier(f, &column.node)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GROUP BY ")?;
        comma_list(f, &self.by)?;
        if let Some(having) = &self.having {
            write!(f, " HAVING {having}")?;
        }
        Ok(())
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ORDER BY ")?;
        comma_list(f, &self.terms)
    }
}

impl fmt::Display for OrderingTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)?;
        match self.mode {
            OrderingMode::Ascending => f.write_str(" ASC"),
            OrderingMode::Descending => f.write_str(" DESC"),
            OrderingMode::Unspecified => Ok(()),
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LIMIT {}", self.count)?;
        if let Some(offset) = &self.offset {
            match offset.separator {
                OffsetSeparator::Keyword => write!(f, " OFFSET {}", offset.expression)?,
                OffsetSeparator::Comma => write!(f, ", {}", offset.expression)?,
            }
        }
        Ok(())
    }
}
