//! `FROM` lists, join chains and join constraints.

mod common;

use common::{assert_parse_error_at, parse_statement};
use sql_select_parser::{
    BinaryOperator, Expression, JoinClause, JoinConstraint, JoinOperator, Queryable,
    SelectStatement,
};

fn single_join_clause(statement: &SelectStatement) -> &JoinClause {
    match statement.from.as_slice() {
        [Queryable::Join(clause)] => clause,
        other => panic!("expected a single join clause, got {other:?}"),
    }
}

#[test]
fn natural_join_using() {
    let statement = parse_statement("SELECT * FROM a NATURAL JOIN b USING (id)");
    let clause = single_join_clause(&statement);
    let join = &clause.joins[0];
    assert!(join.natural);
    assert_eq!(join.operator, JoinOperator::Inner);
    let JoinConstraint::Using(columns) = &join.constraint else {
        panic!("expected USING, got {:?}", join.constraint);
    };
    assert_eq!(columns[0].node, "id");
}

#[test]
fn left_outer_join_on() {
    let statement =
        parse_statement("SELECT o.id FROM orders o LEFT OUTER JOIN customers c ON o.cid = c.id");
    let clause = single_join_clause(&statement);

    let Queryable::Table(primary) = clause.primary.as_ref() else {
        panic!("expected a table as primary source");
    };
    assert_eq!(primary.name.node, "orders");
    assert_eq!(primary.alias.as_ref().map(|a| a.node.as_str()), Some("o"));

    let join = &clause.joins[0];
    assert!(!join.natural);
    assert_eq!(join.operator, JoinOperator::LeftOuter);
    assert!(matches!(
        join.constraint,
        JoinConstraint::On(Expression::Binary(BinaryOperator::Equal, ..))
    ));
    let Queryable::Table(joined) = &join.query else {
        panic!("expected a table");
    };
    assert_eq!(joined.name.node, "customers");
}

#[test]
fn natural_left_join() {
    let statement = parse_statement("SELECT * FROM a NATURAL LEFT JOIN b ON 1");
    let join = &single_join_clause(&statement).joins[0];
    assert!(join.natural);
    assert_eq!(join.operator, JoinOperator::Left);
}

#[test]
fn three_way_join_chain() {
    let statement = parse_statement(
        "SELECT * FROM a \
         JOIN b ON a.x = b.x \
         CROSS JOIN c ON 1 \
         INNER JOIN d USING (y, z)",
    );
    let clause = single_join_clause(&statement);
    let operators: Vec<_> = clause.joins.iter().map(|j| j.operator).collect();
    assert_eq!(
        operators,
        [JoinOperator::Inner, JoinOperator::Cross, JoinOperator::Inner]
    );
    assert_eq!(clause.span.start, 14);
}

#[test]
fn comma_inside_a_join_chain() {
    let statement = parse_statement("SELECT * FROM a JOIN b ON 1, c ON 2");
    let clause = single_join_clause(&statement);
    assert_eq!(clause.joins.len(), 2);
    assert_eq!(clause.joins[1].operator, JoinOperator::Comma);
}

#[test]
fn plain_comma_list_is_flat() {
    let statement = parse_statement("SELECT * FROM a, b, c");
    assert_eq!(statement.from.len(), 3);
    assert!(
        statement
            .from
            .iter()
            .all(|source| matches!(source, Queryable::Table(_)))
    );
}

#[test]
fn derived_table_in_join() {
    let statement = parse_statement(
        "SELECT * FROM (SELECT id FROM a) AS s JOIN b ON s.id = b.id",
    );
    let clause = single_join_clause(&statement);
    let Queryable::Subquery(subquery) = clause.primary.as_ref() else {
        panic!("expected a subquery source");
    };
    assert_eq!(subquery.alias.as_ref().map(|a| a.node.as_str()), Some("s"));
    assert_eq!(subquery.statement.columns.len(), 1);
}

#[test]
fn join_without_constraint_is_an_error() {
    assert_parse_error_at(
        "SELECT * FROM a JOIN b",
        "expected ON or USING",
        22..22,
    );
}

#[test]
fn natural_without_join_is_an_error() {
    assert_parse_error_at(
        "SELECT * FROM a NATURAL b USING (x)",
        "expected JOIN after NATURAL",
        24..25,
    );
}

#[test]
fn empty_using_list_is_an_error() {
    assert_parse_error_at(
        "SELECT * FROM a JOIN b USING ()",
        "expected a column name in USING",
        30..31,
    );
}
