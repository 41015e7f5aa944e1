use std::collections::HashMap;

use crate::{ast::ast::Node, errors::errors::Error, lexer::tokens::TokenKind};

use super::{expr::*, parser::Parser, stmt::*};

#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Additive,
    Multiplicative,
    Primary,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Node, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Node, Error>;
pub type LEDHandler = fn(&mut Parser, Node, BindingPower) -> Result<Node, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);

    // Literals and symbols
    parser.nud(TokenKind::Number, parse_primary_expr);
    parser.nud(TokenKind::Identifier, parse_primary_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);

    // Statements
    parser.stmt(TokenKind::Identifier, parse_assignment_stmt);
    parser.stmt(TokenKind::Call, parse_call_stmt);
    parser.stmt(TokenKind::Read, parse_read_stmt);
    parser.stmt(TokenKind::Write, parse_write_stmt);
    parser.stmt(TokenKind::Begin, parse_compound_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::While, parse_while_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
