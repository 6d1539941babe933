//! Expression parsing.
//!
//! Binary operators are parsed by one left-associative fold driven by
//! [`PRECEDENCE_LADDER`]. Below the ladder sit the prefix operators, an
//! empty postfix level and the primary expressions.

use crate::ast::{
    BinaryOperator, ColumnReference, Expression, FunctionCall, FunctionParameters, IsExpression,
    Literal, UnaryOperator, merge_spans,
};
use crate::lexer::token::TokenKind;
use crate::parser::Parser;
use crate::parser::base::{ParsingError, ParsingResult};
use crate::parser::numeric::decode_numeric;
use smol_str::SmolStr;

/// Binary operator levels, loosest first.
const PRECEDENCE_LADDER: &[&[(TokenKind, BinaryOperator)]] = &[
    &[(TokenKind::Or, BinaryOperator::Or)],
    &[(TokenKind::And, BinaryOperator::And)],
    &[
        (TokenKind::Eq, BinaryOperator::Equal),
        (TokenKind::DoubleEq, BinaryOperator::Equal),
        (TokenKind::NotEqBang, BinaryOperator::NotEqual),
        (TokenKind::NotEq, BinaryOperator::NotEqual),
        (TokenKind::In, BinaryOperator::In),
        (TokenKind::Like, BinaryOperator::Like),
        (TokenKind::Glob, BinaryOperator::Glob),
        (TokenKind::Match, BinaryOperator::Match),
        (TokenKind::Regexp, BinaryOperator::Regexp),
    ],
    &[
        (TokenKind::Lt, BinaryOperator::Less),
        (TokenKind::LtEq, BinaryOperator::LessOrEqual),
        (TokenKind::Gt, BinaryOperator::Greater),
        (TokenKind::GtEq, BinaryOperator::GreaterOrEqual),
    ],
    &[
        (TokenKind::ShiftLeft, BinaryOperator::ShiftLeft),
        (TokenKind::ShiftRight, BinaryOperator::ShiftRight),
        (TokenKind::Ampersand, BinaryOperator::BitwiseAnd),
        (TokenKind::Pipe, BinaryOperator::BitwiseOr),
    ],
    &[
        (TokenKind::Plus, BinaryOperator::Add),
        (TokenKind::Minus, BinaryOperator::Subtract),
    ],
    &[
        (TokenKind::Star, BinaryOperator::Multiply),
        (TokenKind::Slash, BinaryOperator::Divide),
        (TokenKind::Percent, BinaryOperator::Modulo),
    ],
    &[(TokenKind::DoublePipe, BinaryOperator::Concatenate)],
];

/// `IS [NOT]` shares this level with `=`.
const EQUALITY_LEVEL: usize = 2;

/// An infix operator found at the cursor.
enum Infix {
    Binary(BinaryOperator),
    Is,
}

/// Finds the operator for `kind` at `min_level` or tighter, with its level.
fn lookup_operator(min_level: usize, kind: &TokenKind) -> Option<(usize, Infix)> {
    if *kind == TokenKind::Is && min_level <= EQUALITY_LEVEL {
        return Some((EQUALITY_LEVEL, Infix::Is));
    }
    PRECEDENCE_LADDER
        .iter()
        .enumerate()
        .skip(min_level)
        .find_map(|(level, operators)| {
            operators
                .iter()
                .find(|(token, _)| token == kind)
                .map(|(_, operator)| (level, Infix::Binary(*operator)))
        })
}

impl Parser<'_> {
    /// Parses a full expression, one nesting level deeper than the caller.
    pub(crate) fn parse_expression(&mut self) -> ParsingResult<Expression> {
        self.nested(|parser| parser.parse_binary(0))
    }

    /// Folds operators of `min_level` or tighter onto the left operand.
    ///
    /// The right operand of an operator at level `n` only takes operators
    /// tighter than `n`, which keeps every level left-associative. A chain
    /// of operators is folded in a loop, so only its height is bounded.
    fn parse_binary(&mut self, min_level: usize) -> ParsingResult<Expression> {
        let mut left = self.parse_unary()?;
        let mut height = left.height();

        while let Some((level, infix)) = lookup_operator(min_level, &self.cursor.peek().kind) {
            self.cursor.advance();
            let negated = matches!(infix, Infix::Is) && self.cursor.match_one(&TokenKind::Not);
            let right = self.parse_binary(level + 1)?;

            height = height.max(right.height()) + 1;
            self.check_height(height)?;

            let span = merge_spans(&left.span(), &right.span());
            left = match infix {
                Infix::Binary(operator) => {
                    Expression::Binary(operator, Box::new(left), Box::new(right), span)
                }
                Infix::Is => Expression::Is(IsExpression {
                    negated,
                    left: Box::new(left),
                    right: Box::new(right),
                    span,
                }),
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> ParsingResult<Expression> {
        let operator = match self.cursor.peek().kind {
            TokenKind::Minus => UnaryOperator::Minus,
            TokenKind::Plus => UnaryOperator::Plus,
            TokenKind::Tilde => UnaryOperator::BitwiseNot,
            TokenKind::Not => UnaryOperator::Not,
            _ => return self.parse_postfix(),
        };
        let start = self.cursor.advance().span.start;
        let operand = self.nested(|parser| parser.parse_unary())?;
        let span = start..operand.span().end;
        Ok(Expression::Unary(operator, Box::new(operand), span))
    }

    /// No postfix operators are recognized yet; `ISNULL`, `NOTNULL` and
    /// `COLLATE` would bind here.
    fn parse_postfix(&mut self) -> ParsingResult<Expression> {
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> ParsingResult<Expression> {
        let token = self.cursor.peek().clone();
        let literal = match &token.kind {
            TokenKind::NumericLiteral => {
                let value = decode_numeric(&token.lexeme)
                    .map_err(|error| ParsingError::new(token.clone(), error.to_string()))?;
                Literal::Numeric {
                    value,
                    lexeme: token.lexeme.clone(),
                }
            }
            TokenKind::StringLiteral(value) => Literal::String(value.clone()),
            TokenKind::Null => Literal::Null,
            TokenKind::True => Literal::Boolean(true),
            TokenKind::False => Literal::Boolean(false),
            TokenKind::LParen => return self.parse_parenthesized(),
            TokenKind::Identifier(_) => return self.parse_identifier_expression(),
            TokenKind::Question => return self.parse_numbered_variable(),
            TokenKind::Colon => return self.parse_named_variable(),
            kind => {
                return Err(ParsingError::new(
                    token.clone(),
                    format!("expected an expression, found {kind}"),
                ));
            }
        };
        self.cursor.advance();
        Ok(Expression::Literal(literal, token.span))
    }

    fn parse_parenthesized(&mut self) -> ParsingResult<Expression> {
        let open = self.cursor.advance();

        if self.cursor.check(&TokenKind::Select) {
            let statement = self.parse_required_select("expected SELECT after '('")?;
            let close = self
                .cursor
                .close_paren(&open, "expected ')' to close the subquery")?;
            return Ok(Expression::Subquery(
                Box::new(statement),
                open.span.start..close.span.end,
            ));
        }

        let inner = self.parse_expression()?;
        let close = self
            .cursor
            .close_paren(&open, "expected ')' after expression")?;
        Ok(Expression::Parenthesized(
            Box::new(inner),
            open.span.start..close.span.end,
        ))
    }

    /// Column reference, qualified column reference or function call.
    fn parse_identifier_expression(&mut self) -> ParsingResult<Expression> {
        let first = self
            .cursor
            .consume_identifier("expected an identifier")?;

        if self.cursor.match_one(&TokenKind::Dot) {
            let column = self
                .cursor
                .consume_identifier("expected a column name after '.'")?;
            let span = merge_spans(&first.span, &column.span);
            return Ok(Expression::Column(ColumnReference {
                table: Some(first),
                column,
                span,
            }));
        }

        if self.cursor.check(&TokenKind::LParen) {
            return self.parse_function_call(first);
        }

        let span = first.span.clone();
        Ok(Expression::Column(ColumnReference {
            table: None,
            column: first,
            span,
        }))
    }

    fn parse_function_call(
        &mut self,
        name: crate::ast::Spanned<SmolStr>,
    ) -> ParsingResult<Expression> {
        let open = self.cursor.advance();

        let parameters = if self.cursor.match_one(&TokenKind::Star) {
            FunctionParameters::Star
        } else {
            let distinct = self.cursor.match_one(&TokenKind::Distinct);
            let mut arguments = Vec::new();
            if distinct || !self.cursor.check(&TokenKind::RParen) {
                loop {
                    arguments.push(self.parse_expression()?);
                    if !self.cursor.match_one(&TokenKind::Comma) {
                        break;
                    }
                }
            }
            FunctionParameters::Arguments {
                distinct,
                arguments,
            }
        };

        let close = self.cursor.close_paren(
            &open,
            &format!("expected ')' to close the arguments of `{}`", name.node),
        )?;
        let span = name.span.start..close.span.end;
        Ok(Expression::FunctionCall(FunctionCall {
            name,
            parameters,
            span,
        }))
    }

    /// `?` or `?N`; the index must directly follow the question mark.
    fn parse_numbered_variable(&mut self) -> ParsingResult<Expression> {
        let question = self.cursor.advance();
        let next = self.cursor.peek();
        if next.kind != TokenKind::NumericLiteral || next.span.start != question.span.end {
            return Ok(Expression::NumberedVariable(None, question.span));
        }

        let index_token = self.cursor.advance();
        let index = index_token.lexeme.parse::<u32>().map_err(|_| {
            ParsingError::new(
                index_token.clone(),
                format!("invalid bind variable index `{}`", index_token.lexeme),
            )
        })?;
        Ok(Expression::NumberedVariable(
            Some(index),
            question.span.start..index_token.span.end,
        ))
    }

    /// `:name`; the stored name keeps the colon.
    fn parse_named_variable(&mut self) -> ParsingResult<Expression> {
        let colon = self.cursor.advance();
        let name = self
            .cursor
            .consume_identifier("expected a variable name after ':'")?;
        Ok(Expression::NamedVariable(
            SmolStr::new(format!(":{}", name.node)),
            colon.span.start..name.span.end,
        ))
    }
}
