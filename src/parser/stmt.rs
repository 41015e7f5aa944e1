use crate::{
    ast::ast::{Node, NodeKind},
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::expr::{parse_condition, parse_expression},
};

use super::{expr::parse_primary_expr, parser::Parser};

/// Parses one statement, or nothing if the current token cannot start one.
///
/// The empty statement is legal wherever a statement is.
pub fn parse_stmt(parser: &mut Parser) -> Result<Option<Node>, Error> {
    let token_kind = parser.current_token_kind();
    let handler = parser.get_stmt_lookup().get(&token_kind).copied();

    match handler {
        Some(handler) => Ok(Some(handler(parser)?)),
        None => Ok(None),
    }
}

/// Parses the declaration sections of a block followed by its statement.
pub fn parse_block(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();
    parser.enter_nesting()?;

    let mut constants = vec![];
    if parser.current_token_kind() == TokenKind::Const {
        parser.advance();
        loop {
            constants.push(parse_const_decl(parser)?);
            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
        parser.expect_detailed(TokenKind::Semicolon, "expected ';' after constant declarations")?;
    }

    let mut variables = vec![];
    if parser.current_token_kind() == TokenKind::Var {
        parser.advance();
        loop {
            let name_token = parser.expect_detailed(TokenKind::Identifier, "expected identifier during variable declaration")?;
            variables.push(Node::new(
                NodeKind::VarDecl { name: name_token.value },
                name_token.span,
            ));
            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
        parser.expect_detailed(TokenKind::Semicolon, "expected ';' after variable declarations")?;
    }

    let mut procedures = vec![];
    while parser.current_token_kind() == TokenKind::Procedure {
        procedures.push(parse_proc_decl(parser)?);
    }

    let statement = parse_stmt(parser)?.map(Box::new);
    parser.leave_nesting(1);

    Ok(Node::new(
        NodeKind::Block {
            constants,
            variables,
            procedures,
            statement,
        },
        parser.span_from(start),
    ))
}

fn parse_const_decl(parser: &mut Parser) -> Result<Node, Error> {
    let name_token = parser.expect_detailed(TokenKind::Identifier, "expected identifier during constant declaration")?;
    parser.expect_detailed(TokenKind::Equals, "expected '=' in constant declaration")?;

    if parser.current_token_kind() != TokenKind::Number {
        return Err(parser.error_here("constants must be initialized with a number"));
    }
    let value = parse_primary_expr(parser)?;

    Ok(Node::new(
        NodeKind::ConstDecl {
            name: name_token.value,
            value: Box::new(value),
        },
        parser.span_from(name_token.span.start),
    ))
}

fn parse_proc_decl(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start.clone();

    let name = parser.expect_detailed(TokenKind::Identifier, "expected procedure name")?.value;
    parser.expect_detailed(TokenKind::Semicolon, "expected ';' after procedure name")?;

    let block = parse_block(parser)?;
    parser.expect_detailed(TokenKind::Semicolon, "expected ';' after procedure body")?;

    Ok(Node::new(
        NodeKind::ProcDecl {
            name,
            block: Box::new(block),
        },
        parser.span_from(start),
    ))
}

pub fn parse_assignment_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let target = parser.advance().clone();
    parser.expect_detailed(TokenKind::Assignment, "expected ':=' in assignment")?;

    let value = parse_expression(parser)?;

    Ok(Node::new(
        NodeKind::Assign {
            target: target.value,
            value: Box::new(value),
        },
        parser.span_from(target.span.start),
    ))
}

pub fn parse_call_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start.clone();
    let target = parser.expect_detailed(TokenKind::Identifier, "expected procedure name after CALL")?;

    Ok(Node::new(
        NodeKind::Call { target: target.value },
        parser.span_from(start),
    ))
}

pub fn parse_read_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start.clone();
    let target = parser.expect_detailed(TokenKind::Identifier, "expected variable name after READ")?;

    Ok(Node::new(
        NodeKind::Input { target: target.value },
        parser.span_from(start),
    ))
}

pub fn parse_write_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start.clone();
    let value = parse_expression(parser)?;

    Ok(Node::new(
        NodeKind::Output {
            value: Box::new(value),
        },
        parser.span_from(start),
    ))
}

pub fn parse_compound_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start.clone();
    parser.enter_nesting()?;

    let mut statements = vec![];
    loop {
        if let Some(statement) = parse_stmt(parser)? {
            statements.push(statement);
        }

        if parser.current_token_kind() != TokenKind::Semicolon {
            break;
        }
        parser.advance();
    }

    parser.expect_detailed(TokenKind::End, "expected ';' or END")?;
    parser.leave_nesting(1);

    Ok(Node::new(
        NodeKind::Compound { statements },
        parser.span_from(start),
    ))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start.clone();
    parser.enter_nesting()?;

    let condition = parse_condition(parser)?;
    parser.expect_detailed(TokenKind::Then, "expected THEN after condition")?;
    let body = parse_stmt(parser)?.map(Box::new);
    parser.leave_nesting(1);

    Ok(Node::new(
        NodeKind::If {
            condition: Box::new(condition),
            body,
        },
        parser.span_from(start),
    ))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start.clone();
    parser.enter_nesting()?;

    let condition = parse_condition(parser)?;
    parser.expect_detailed(TokenKind::Do, "expected DO after condition")?;
    let body = parse_stmt(parser)?.map(Box::new);
    parser.leave_nesting(1);

    Ok(Node::new(
        NodeKind::While {
            condition: Box::new(condition),
            body,
        },
        parser.span_from(start),
    ))
}
