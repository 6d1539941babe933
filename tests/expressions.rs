//! Expression precedence, associativity and primary forms.

mod common;

use common::expression_of;
use sql_select_parser::{
    BinaryOperator, Expression, FunctionParameters, Literal, NumericValue, UnaryOperator,
    parse_expression,
};

fn binary(expression: &Expression) -> (BinaryOperator, &Expression, &Expression) {
    match expression {
        Expression::Binary(operator, left, right, _) => (*operator, left, right),
        other => panic!("expected a binary expression, got {other:?}"),
    }
}

fn int(expression: &Expression) -> i64 {
    match expression {
        Expression::Literal(
            Literal::Numeric {
                value: NumericValue::Integer(value),
                ..
            },
            _,
        ) => *value,
        other => panic!("expected an integer literal, got {other:?}"),
    }
}

#[test]
fn product_nests_under_sum() {
    let expression = expression_of("1 + 2 * 3");
    let (operator, one, product) = binary(&expression);
    assert_eq!(operator, BinaryOperator::Add);
    assert_eq!(int(one), 1);
    let (operator, two, three) = binary(product);
    assert_eq!(operator, BinaryOperator::Multiply);
    assert_eq!((int(two), int(three)), (2, 3));
}

#[test]
fn same_level_folds_left() {
    let expression = expression_of("1 - 2 - 3");
    let (operator, difference, three) = binary(&expression);
    assert_eq!(operator, BinaryOperator::Subtract);
    assert_eq!(int(three), 3);
    let (operator, one, two) = binary(difference);
    assert_eq!(operator, BinaryOperator::Subtract);
    assert_eq!((int(one), int(two)), (1, 2));
}

#[test]
fn concatenation_binds_tightest() {
    let expression = expression_of("a * b || c");
    let (operator, _, right) = binary(&expression);
    assert_eq!(operator, BinaryOperator::Multiply);
    assert_eq!(binary(right).0, BinaryOperator::Concatenate);
}

#[test]
fn and_binds_tighter_than_or() {
    let expression = expression_of("a OR b AND c");
    let (operator, _, right) = binary(&expression);
    assert_eq!(operator, BinaryOperator::Or);
    assert_eq!(binary(right).0, BinaryOperator::And);
}

#[test]
fn comparison_binds_tighter_than_equality() {
    let expression = expression_of("a = b < c");
    let (operator, _, right) = binary(&expression);
    assert_eq!(operator, BinaryOperator::Equal);
    assert_eq!(binary(right).0, BinaryOperator::Less);
}

#[test]
fn is_not_null_builds_an_is_node() {
    let expression = expression_of("a IS NOT NULL");
    let Expression::Is(is) = expression else {
        panic!("expected IS");
    };
    assert!(is.negated);
    assert!(matches!(*is.left, Expression::Column(_)));
    assert!(matches!(*is.right, Expression::Literal(Literal::Null, _)));
    assert_eq!(is.span, 7..20);
}

#[test]
fn plain_is() {
    let Expression::Is(is) = expression_of("a IS b") else {
        panic!("expected IS");
    };
    assert!(!is.negated);
}

#[test]
fn not_prefix() {
    let expression = expression_of("NOT flag");
    assert!(matches!(
        expression,
        Expression::Unary(UnaryOperator::Not, _, ref span) if *span == (7..15)
    ));
}

#[test]
fn numeric_literal_forms() {
    for (text, value) in [
        ("0x1A", NumericValue::Integer(26)),
        ("42", NumericValue::Integer(42)),
        ("1.5e-3", NumericValue::Float(0.0015)),
        (".5", NumericValue::Float(0.5)),
        ("0xFFFFFFFFFFFFFFFF", NumericValue::Integer(-1)),
    ] {
        match expression_of(text) {
            Expression::Literal(Literal::Numeric { value: decoded, lexeme }, _) => {
                assert_eq!(decoded, value, "{text}");
                assert_eq!(lexeme, text);
            }
            other => panic!("expected a numeric literal for {text}, got {other:?}"),
        }
    }
}

#[test]
fn string_and_boolean_literals() {
    assert!(matches!(
        expression_of("'O''Brien'"),
        Expression::Literal(Literal::String(ref s), _) if s == "O'Brien"
    ));
    assert!(matches!(
        expression_of("TRUE"),
        Expression::Literal(Literal::Boolean(true), _)
    ));
}

#[test]
fn aggregate_calls() {
    let Expression::FunctionCall(call) = expression_of("count(DISTINCT a)") else {
        panic!("expected a call");
    };
    assert_eq!(call.name.node, "count");
    assert!(matches!(
        call.parameters,
        FunctionParameters::Arguments { distinct: true, ref arguments } if arguments.len() == 1
    ));

    let Expression::FunctionCall(call) = expression_of("count(*)") else {
        panic!("expected a call");
    };
    assert_eq!(call.parameters, FunctionParameters::Star);
}

#[test]
fn multi_argument_call() {
    let Expression::FunctionCall(call) = expression_of("substr(name, 1, 3)") else {
        panic!("expected a call");
    };
    let FunctionParameters::Arguments { arguments, .. } = call.parameters else {
        panic!("expected arguments");
    };
    assert_eq!(arguments.len(), 3);
}

#[test]
fn bind_variables() {
    assert!(matches!(
        expression_of("?"),
        Expression::NumberedVariable(None, _)
    ));
    assert!(matches!(
        expression_of("?7"),
        Expression::NumberedVariable(Some(7), _)
    ));
    assert!(matches!(
        expression_of(":max_rows"),
        Expression::NamedVariable(ref name, _) if name == ":max_rows"
    ));
}

#[test]
fn standalone_expression_entry_point() {
    let expression = parse_expression("a.b + ?1").expect("expression");
    assert_eq!(expression.span(), 0..8);
    assert!(parse_expression("a +").is_err());
}

#[test]
fn nested_parentheses_within_limit() {
    let depth = 30;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let mut expression = parse_expression(&source).expect("expression");
    let mut levels = 0;
    while let Expression::Parenthesized(inner, _) = expression {
        expression = *inner;
        levels += 1;
    }
    assert_eq!(levels, depth);
    assert_eq!(int(&expression), 1);
}
