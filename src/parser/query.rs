//! `SELECT` statement skeleton and its trailing clauses.

use crate::ast::{
    Expression, GroupBy, Limit, Offset, OffsetSeparator, OrderBy, OrderingMode, OrderingTerm,
    ResultColumn, SelectStatement, Spanned, merge_spans,
};
use crate::lexer::token::TokenKind;
use crate::parser::Parser;
use crate::parser::base::ParsingResult;
use smol_str::SmolStr;
use tracing::trace;

impl Parser<'_> {
    /// Parses `SELECT ...` if the current token is `SELECT`.
    pub(crate) fn parse_select(&mut self) -> ParsingResult<Option<SelectStatement>> {
        if !self.cursor.check(&TokenKind::Select) {
            return Ok(None);
        }
        self.nested(|parser| parser.parse_select_body()).map(Some)
    }

    /// Parses a `SELECT` that the grammar requires at this point.
    pub(crate) fn parse_required_select(&mut self, message: &str) -> ParsingResult<SelectStatement> {
        match self.parse_select()? {
            Some(statement) => Ok(statement),
            None => Err(self.cursor.error_here(message)),
        }
    }

    fn parse_select_body(&mut self) -> ParsingResult<SelectStatement> {
        let start = self.cursor.advance().span.start;

        let distinct = if self.cursor.match_one(&TokenKind::Distinct) {
            true
        } else {
            self.cursor.match_one(&TokenKind::All);
            false
        };

        let columns = self.parse_result_columns()?;
        let from = self.parse_from()?.unwrap_or_default();
        let where_clause = self.parse_where()?;
        let group_by = self.parse_group_by()?;
        let order_by = self.parse_order_by()?;
        let limit = self.parse_limit()?;

        let statement = SelectStatement {
            distinct,
            columns,
            from,
            where_clause,
            group_by,
            order_by,
            limit,
            span: self.cursor.span_from(start),
        };
        self.check_height(statement.height())?;
        Ok(statement)
    }

    fn parse_result_columns(&mut self) -> ParsingResult<Vec<ResultColumn>> {
        let mut columns = vec![self.parse_result_column()?];
        while self.cursor.match_one(&TokenKind::Comma) {
            columns.push(self.parse_result_column()?);
        }
        Ok(columns)
    }

    /// `*`, `table.*`, or an expression with an optional alias.
    fn parse_result_column(&mut self) -> ParsingResult<ResultColumn> {
        if self.cursor.check(&TokenKind::Star) {
            let star = self.cursor.advance();
            return Ok(ResultColumn::Star {
                table: None,
                span: star.span,
            });
        }

        // `t.*` and `t.col` share a prefix; try the star form first.
        let saved = self.cursor.position();
        if let Some(table) = self.cursor.match_identifier() {
            if self.cursor.match_one(&TokenKind::Dot) && self.cursor.check(&TokenKind::Star) {
                let star = self.cursor.advance();
                let span = table.span.start..star.span.end;
                return Ok(ResultColumn::Star {
                    table: Some(table),
                    span,
                });
            }
            trace!(position = saved, "result column is not a qualified star, rewinding");
            self.cursor.restore(saved);
        }

        let expression = self.parse_expression()?;
        let alias = self.parse_alias()?;
        let span = match &alias {
            Some(alias) => merge_spans(&expression.span(), &alias.span),
            None => expression.span(),
        };
        Ok(ResultColumn::Expression {
            expression,
            alias,
            span,
        })
    }

    /// `AS name` or a bare identifier.
    pub(crate) fn parse_alias(&mut self) -> ParsingResult<Option<Spanned<SmolStr>>> {
        if self.cursor.match_one(&TokenKind::As) {
            return self
                .cursor
                .consume_identifier("expected an alias after AS")
                .map(Some);
        }
        Ok(self.cursor.match_identifier())
    }

    fn parse_where(&mut self) -> ParsingResult<Option<Expression>> {
        if !self.cursor.match_one(&TokenKind::Where) {
            return Ok(None);
        }
        self.parse_expression().map(Some)
    }

    fn parse_group_by(&mut self) -> ParsingResult<Option<GroupBy>> {
        if !self.cursor.check(&TokenKind::Group) {
            return Ok(None);
        }
        let start = self.cursor.advance().span.start;
        self.cursor
            .consume_or_fail(&TokenKind::By, "expected BY after GROUP")?;

        let by = self.parse_expression_list()?;
        let having = if self.cursor.match_one(&TokenKind::Having) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        Ok(Some(GroupBy {
            by,
            having,
            span: self.cursor.span_from(start),
        }))
    }

    fn parse_order_by(&mut self) -> ParsingResult<Option<OrderBy>> {
        if !self.cursor.check(&TokenKind::Order) {
            return Ok(None);
        }
        let start = self.cursor.advance().span.start;
        self.cursor
            .consume_or_fail(&TokenKind::By, "expected BY after ORDER")?;

        let mut terms = vec![self.parse_ordering_term()?];
        while self.cursor.match_one(&TokenKind::Comma) {
            terms.push(self.parse_ordering_term()?);
        }

        Ok(Some(OrderBy {
            terms,
            span: self.cursor.span_from(start),
        }))
    }

    fn parse_ordering_term(&mut self) -> ParsingResult<OrderingTerm> {
        let expression = self.parse_expression()?;
        let start = expression.span().start;
        let mode = if self.cursor.match_one(&TokenKind::Asc) {
            OrderingMode::Ascending
        } else if self.cursor.match_one(&TokenKind::Desc) {
            OrderingMode::Descending
        } else {
            OrderingMode::Unspecified
        };
        Ok(OrderingTerm {
            expression,
            mode,
            span: self.cursor.span_from(start),
        })
    }

    /// `LIMIT count [OFFSET offset]` or `LIMIT count, offset`.
    fn parse_limit(&mut self) -> ParsingResult<Option<Limit>> {
        if !self.cursor.check(&TokenKind::Limit) {
            return Ok(None);
        }
        let start = self.cursor.advance().span.start;
        let count = self.parse_expression()?;

        let separator = match self.cursor.peek().kind {
            TokenKind::Offset => Some(OffsetSeparator::Keyword),
            TokenKind::Comma => Some(OffsetSeparator::Comma),
            _ => None,
        };
        let offset = match separator {
            Some(separator) => {
                let separator_span = self.cursor.advance().span;
                let expression = self.parse_expression()?;
                Some(Offset {
                    separator,
                    separator_span,
                    expression,
                })
            }
            None => None,
        };

        Ok(Some(Limit {
            count,
            offset,
            span: self.cursor.span_from(start),
        }))
    }

    fn parse_expression_list(&mut self) -> ParsingResult<Vec<Expression>> {
        let mut expressions = vec![self.parse_expression()?];
        while self.cursor.match_one(&TokenKind::Comma) {
            expressions.push(self.parse_expression()?);
        }
        Ok(expressions)
    }
}
