//! `FROM` list parsing: tables, subqueries and join chains.

use crate::ast::{
    Join, JoinClause, JoinConstraint, JoinOperator, Queryable, SelectStatementAsSource,
    TableReference,
};
use crate::lexer::token::TokenKind;
use crate::parser::Parser;
use crate::parser::base::ParsingResult;

/// Keywords that may open a join operator.
const JOIN_LEAD_TOKENS: &[TokenKind] = &[
    TokenKind::Natural,
    TokenKind::Left,
    TokenKind::Inner,
    TokenKind::Cross,
    TokenKind::Join,
];

/// A join operator that has been read but whose right side has not.
struct JoinHead {
    natural: bool,
    operator: JoinOperator,
    start: usize,
}

/// Resolves the keywords read before `JOIN` (or a lone comma) into one
/// operator. `NATURAL` is tracked separately and ignored here.
fn resolve_join_operator(keywords: &[TokenKind]) -> JoinOperator {
    let has = |kind: TokenKind| keywords.contains(&kind);
    if has(TokenKind::Left) {
        if has(TokenKind::Outer) {
            JoinOperator::LeftOuter
        } else {
            JoinOperator::Left
        }
    } else if has(TokenKind::Cross) {
        JoinOperator::Cross
    } else if has(TokenKind::Comma) {
        JoinOperator::Comma
    } else {
        JoinOperator::Inner
    }
}

impl Parser<'_> {
    /// Parses `FROM ...` if present.
    ///
    /// A join operator directly after the first source turns the rest of the
    /// list into a single [`Queryable::Join`], with later commas read as
    /// [`JoinOperator::Comma`] steps. Otherwise the sources form a flat comma
    /// list, and a join keyword after the second source is an error.
    pub(crate) fn parse_from(&mut self) -> ParsingResult<Option<Vec<Queryable>>> {
        if !self.cursor.match_one(&TokenKind::From) {
            return Ok(None);
        }

        let first = self.parse_table_or_subquery()?;
        if let Some(head) = self.parse_join_operator()? {
            let clause = self.parse_join_chain(first, head)?;
            return Ok(Some(vec![Queryable::Join(clause)]));
        }

        let mut sources = vec![first];
        while self.cursor.match_one(&TokenKind::Comma) {
            sources.push(self.parse_table_or_subquery()?);
        }
        Ok(Some(sources))
    }

    fn parse_join_chain(&mut self, primary: Queryable, head: JoinHead) -> ParsingResult<JoinClause> {
        let start = primary.span().start;
        let mut joins = Vec::new();
        let mut next = Some(head);

        while let Some(head) = next {
            let query = self.parse_table_or_subquery()?;
            let constraint = self.parse_join_constraint()?;
            joins.push(Join {
                natural: head.natural,
                operator: head.operator,
                query,
                constraint,
                span: self.cursor.span_from(head.start),
            });

            next = if self.cursor.check(&TokenKind::Comma) {
                let comma = self.cursor.advance();
                Some(JoinHead {
                    natural: false,
                    operator: resolve_join_operator(&[TokenKind::Comma]),
                    start: comma.span.start,
                })
            } else {
                self.parse_join_operator()?
            };
        }

        Ok(JoinClause {
            primary: Box::new(primary),
            joins,
            span: self.cursor.span_from(start),
        })
    }

    /// `[NATURAL] [LEFT [OUTER] | INNER | CROSS] JOIN`
    fn parse_join_operator(&mut self) -> ParsingResult<Option<JoinHead>> {
        if !JOIN_LEAD_TOKENS.iter().any(|kind| self.cursor.check(kind)) {
            return Ok(None);
        }
        let start = self.cursor.peek().span.start;

        let mut keywords = Vec::new();
        if self.cursor.match_one(&TokenKind::Natural) {
            keywords.push(TokenKind::Natural);
        }
        if self.cursor.match_one(&TokenKind::Left) {
            keywords.push(TokenKind::Left);
            if self.cursor.match_one(&TokenKind::Outer) {
                keywords.push(TokenKind::Outer);
            }
        } else if self.cursor.match_one(&TokenKind::Inner) {
            keywords.push(TokenKind::Inner);
        } else if self.cursor.match_one(&TokenKind::Cross) {
            keywords.push(TokenKind::Cross);
        }

        if !self.cursor.match_one(&TokenKind::Join) {
            let after = keywords
                .last()
                .map_or_else(String::new, |kind| format!(" after {kind}"));
            return Err(self.cursor.error_here(format!("expected JOIN{after}")));
        }

        Ok(Some(JoinHead {
            natural: keywords.contains(&TokenKind::Natural),
            operator: resolve_join_operator(&keywords),
            start,
        }))
    }

    /// `ON expr` or `USING (name, ...)`.
    fn parse_join_constraint(&mut self) -> ParsingResult<JoinConstraint> {
        if self.cursor.match_one(&TokenKind::On) {
            return self.parse_expression().map(JoinConstraint::On);
        }

        if self.cursor.match_one(&TokenKind::Using) {
            let open = self
                .cursor
                .consume_or_fail(&TokenKind::LParen, "expected '(' after USING")?;
            let mut columns = vec![
                self.cursor
                    .consume_identifier("expected a column name in USING")?,
            ];
            while self.cursor.match_one(&TokenKind::Comma) {
                columns.push(
                    self.cursor
                        .consume_identifier("expected a column name in USING")?,
                );
            }
            self.cursor
                .close_paren(&open, "expected ')' to close USING")?;
            return Ok(JoinConstraint::Using(columns));
        }

        Err(self
            .cursor
            .error_here("expected ON or USING after the joined table"))
    }

    /// A table name or a parenthesized `SELECT`, either with an optional alias.
    fn parse_table_or_subquery(&mut self) -> ParsingResult<Queryable> {
        if let Some(name) = self.cursor.match_identifier() {
            if self.cursor.check(&TokenKind::Dot) {
                return Err(self
                    .cursor
                    .error_here("schema-qualified table names are not supported"));
            }
            let alias = self.parse_alias()?;
            let span = self.cursor.span_from(name.span.start);
            return Ok(Queryable::Table(TableReference { name, alias, span }));
        }

        if self.cursor.check(&TokenKind::LParen) {
            let open = self.cursor.advance();
            let start = open.span.start;
            let statement = self.nested(|parser| {
                parser.parse_required_select("expected SELECT after '(' in FROM")
            })?;
            self.cursor
                .close_paren(&open, "expected ')' to close the subquery")?;
            let alias = self.parse_alias()?;
            return Ok(Queryable::Subquery(SelectStatementAsSource {
                statement: Box::new(statement),
                alias,
                span: self.cursor.span_from(start),
            }));
        }

        let found = self.cursor.peek().kind.clone();
        Err(self
            .cursor
            .error_here(format!("expected a table name or subquery, found {found}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::SelectStatement;
    use crate::lexer::tokenize;
    use crate::parser::ParsingError;

    fn parse(source: &str) -> SelectStatement {
        let lexed = tokenize(source);
        let mut parser = Parser::new(&lexed.tokens);
        parser
            .statement()
            .unwrap_or_else(|error| panic!("{source:?} failed: {error}"))
    }

    fn parse_err(source: &str) -> ParsingError {
        let lexed = tokenize(source);
        let mut parser = Parser::new(&lexed.tokens);
        parser.statement().expect_err("statement should fail")
    }

    fn join_clause(statement: &SelectStatement) -> &JoinClause {
        match statement.from.as_slice() {
            [Queryable::Join(clause)] => clause,
            other => panic!("expected one join clause, got {other:?}"),
        }
    }

    #[test]
    fn operator_resolution() {
        let cases = [
            (vec![], JoinOperator::Inner),
            (vec![TokenKind::Natural], JoinOperator::Inner),
            (vec![TokenKind::Inner], JoinOperator::Inner),
            (vec![TokenKind::Left], JoinOperator::Left),
            (
                vec![TokenKind::Natural, TokenKind::Left, TokenKind::Outer],
                JoinOperator::LeftOuter,
            ),
            (vec![TokenKind::Cross], JoinOperator::Cross),
            (vec![TokenKind::Comma], JoinOperator::Comma),
        ];
        for (keywords, expected) in cases {
            assert_eq!(resolve_join_operator(&keywords), expected, "{keywords:?}");
        }
    }

    #[test]
    fn flat_comma_list() {
        let statement = parse("SELECT * FROM a, b AS x, (SELECT 1) y");
        assert_eq!(statement.from.len(), 3);
        match &statement.from[1] {
            Queryable::Table(table) => {
                assert_eq!(table.name.node, "b");
                assert_eq!(table.alias.as_ref().map(|a| a.node.as_str()), Some("x"));
                assert_eq!(table.span, 17..23);
            }
            other => panic!("unexpected {other:?}"),
        }
        match &statement.from[2] {
            Queryable::Subquery(subquery) => {
                assert_eq!(subquery.alias.as_ref().map(|a| a.node.as_str()), Some("y"));
                assert_eq!(subquery.span, 25..37);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn natural_join_using() {
        let statement = parse("SELECT * FROM a NATURAL JOIN b USING (id)");
        let clause = join_clause(&statement);
        assert!(matches!(clause.primary.as_ref(), Queryable::Table(t) if t.name.node == "a"));
        assert_eq!(clause.joins.len(), 1);
        let join = &clause.joins[0];
        assert!(join.natural);
        assert_eq!(join.operator, JoinOperator::Inner);
        match &join.constraint {
            JoinConstraint::Using(columns) => {
                assert_eq!(columns.len(), 1);
                assert_eq!(columns[0].node, "id");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(join.span, 16..41);
        assert_eq!(clause.span, 14..41);
    }

    #[test]
    fn join_kinds() {
        for (source, expected) in [
            ("SELECT * FROM a JOIN b ON 1", JoinOperator::Inner),
            ("SELECT * FROM a INNER JOIN b ON 1", JoinOperator::Inner),
            ("SELECT * FROM a LEFT JOIN b ON 1", JoinOperator::Left),
            ("SELECT * FROM a LEFT OUTER JOIN b ON 1", JoinOperator::LeftOuter),
            ("SELECT * FROM a CROSS JOIN b ON 1", JoinOperator::Cross),
        ] {
            let statement = parse(source);
            let clause = join_clause(&statement);
            assert_eq!(clause.joins[0].operator, expected, "{source}");
            assert!(!clause.joins[0].natural);
        }
    }

    #[test]
    fn chained_joins_with_comma() {
        let statement = parse(
            "SELECT * FROM a JOIN b ON a.id = b.id, c USING (id) LEFT JOIN d ON 1",
        );
        let clause = join_clause(&statement);
        let operators: Vec<_> = clause.joins.iter().map(|join| join.operator).collect();
        assert_eq!(
            operators,
            vec![JoinOperator::Inner, JoinOperator::Comma, JoinOperator::Left]
        );
        assert!(matches!(clause.joins[0].constraint, JoinConstraint::On(_)));
    }

    #[test]
    fn join_after_a_flat_list_is_rejected() {
        let error = parse_err("SELECT * FROM a, b JOIN c ON 1");
        assert_eq!(error.token.kind, TokenKind::Join);
        assert!(error.message.starts_with("unexpected trailing input"));
    }

    #[test]
    fn join_requires_a_constraint() {
        let error = parse_err("SELECT * FROM a JOIN b WHERE 1");
        assert_eq!(error.message, "expected ON or USING after the joined table");
        assert_eq!(error.token.kind, TokenKind::Where);
    }

    #[test]
    fn join_keyword_required_after_lead_in() {
        let error = parse_err("SELECT * FROM a LEFT b ON 1");
        assert_eq!(error.message, "expected JOIN after LEFT");
    }

    #[test]
    fn missing_table() {
        let error = parse_err("SELECT * FROM");
        assert_eq!(error.token.kind, TokenKind::Eof);
        assert!(error.message.starts_with("expected a table name or subquery"));

        let error = parse_err("SELECT * FROM (1)");
        assert_eq!(error.message, "expected SELECT after '(' in FROM");
    }

    #[test]
    fn schema_qualified_names_are_rejected() {
        let error = parse_err("SELECT * FROM main.users");
        assert_eq!(error.token.kind, TokenKind::Dot);
    }

    #[test]
    fn using_list() {
        let statement = parse("SELECT * FROM a JOIN b USING (x, y)");
        let clause = join_clause(&statement);
        let JoinConstraint::Using(columns) = &clause.joins[0].constraint else {
            panic!("expected USING");
        };
        let names: Vec<_> = columns.iter().map(|c| c.node.as_str()).collect();
        assert_eq!(names, vec!["x", "y"]);

        let error = parse_err("SELECT * FROM a JOIN b USING ()");
        assert_eq!(error.token.kind, TokenKind::RParen);
    }
}
