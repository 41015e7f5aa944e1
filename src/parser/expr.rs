use crate::{
    ast::ast::{Node, NodeKind, Operator},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

/// Parses `[ "+" | "-" ] term { ( "+" | "-" ) term }`.
///
/// A sign is only accepted here, at the very start of an expression.
pub fn parse_expression(parser: &mut Parser) -> Result<Node, Error> {
    match parser.current_token_kind() {
        TokenKind::Plus | TokenKind::Dash => parse_signed_expr(parser),
        _ => parse_expr(parser, BindingPower::Default),
    }
}

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Node, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: parser.current_token().value.clone(),
                    message: String::from("expected an identifier, number or '('"),
                },
                parser.get_position(),
            ))
        }
    };

    let left = nud(parser)?;
    parse_infix(parser, left, bp)
}

// While the current token binds tighter than `bp`, keep extending the lhs.
// Each operator in the chain nests the tree one level deeper.
fn parse_infix(parser: &mut Parser, mut left: Node, bp: BindingPower) -> Result<Node, Error> {
    let mut levels = 0;
    while parser.current_binding_power() > bp {
        parser.enter_nesting()?;
        levels += 1;

        let token_kind = parser.current_token_kind();
        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: parser.current_token().value.clone(),
                    },
                    parser.get_position(),
                ))
            }
        };

        let operator_bp = parser.current_binding_power();
        left = led(parser, left, operator_bp)?;
    }

    parser.leave_nesting(levels);
    Ok(left)
}

/// `-t` becomes `0 - t`; `+t` is just `t`.
pub fn parse_signed_expr(parser: &mut Parser) -> Result<Node, Error> {
    let sign = parser.advance().clone();
    let term = parse_expr(parser, BindingPower::Additive)?;

    let first = if sign.kind == TokenKind::Dash {
        let span = Span {
            start: sign.span.start.clone(),
            end: term.get_span().end.clone(),
        };
        Node::new(
            NodeKind::BinaryOp {
                operator: Operator::Minus,
                left: Box::new(Node::new(NodeKind::Number { value: 0 }, sign.span.clone())),
                right: Box::new(term),
            },
            span,
        )
    } else {
        term
    };

    parse_infix(parser, first, BindingPower::Default)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Node, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let result = parser.current_token().value.parse::<i64>();

            match result {
                Ok(value) => Ok(Node::new(
                    NodeKind::Number { value },
                    parser.advance().span.clone(),
                )),
                Err(_) => Err(Error::new(
                    ErrorImpl::NumberParseError {
                        token: parser.current_token().value.clone(),
                    },
                    parser.get_position(),
                )),
            }
        }
        TokenKind::Identifier => {
            let name = parser.current_token().value.clone();
            Ok(Node::new(
                NodeKind::Identifier { name },
                parser.advance().span.clone(),
            ))
        }
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        )),
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Node, bp: BindingPower) -> Result<Node, Error> {
    let operator_token = parser.advance().clone();
    let operator = match Operator::from_token_kind(operator_token.kind) {
        Some(operator) if operator.is_arithmetic() => operator,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator_token.value,
                },
                operator_token.span.start,
            ))
        }
    };

    let right = parse_expr(parser, bp)?;
    let span = Span {
        start: left.get_span().start.clone(),
        end: right.get_span().end.clone(),
    };

    Ok(Node::new(
        NodeKind::BinaryOp {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    ))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Node, Error> {
    parser.advance();
    parser.enter_nesting()?;
    let expr = parse_expression(parser)?;
    parser.leave_nesting(1);
    parser.expect_detailed(TokenKind::CloseParen, "expected ')' to close the group")?;

    Ok(expr)
}

/// Parses `"ODD" expression | expression relop expression`.
pub fn parse_condition(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();

    if parser.current_token_kind() == TokenKind::Odd {
        parser.advance();
        let operand = parse_expression(parser)?;

        return Ok(Node::new(
            NodeKind::Condition {
                operator: Operator::Odd,
                left: Box::new(operand),
                right: None,
            },
            parser.span_from(start),
        ));
    }

    let left = parse_expression(parser)?;

    let operator = match Operator::from_token_kind(parser.current_token_kind()) {
        Some(operator) if operator.is_relational() => operator,
        _ => return Err(parser.error_here("expected a comparison operator")),
    };
    parser.advance();

    let right = parse_expression(parser)?;

    Ok(Node::new(
        NodeKind::Condition {
            operator,
            left: Box::new(left),
            right: Some(Box::new(right)),
        },
        parser.span_from(start),
    ))
}
